// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use thiserror::Error;

/// Fatal input-validity failures. Numerical trouble inside the narrow phase
/// is never reported here; it is resolved locally to a definite contribution.
#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    #[error("cell {cell} of type {cell_type} has {got} nodes, expected {expected}")]
    InvalidCellArity {
        cell: usize,
        cell_type: &'static str,
        got: usize,
        expected: usize,
    },

    #[error("cell {cell} references node {node}, mesh has {nb_nodes} nodes")]
    NodeIndexOutOfRange {
        cell: usize,
        node: usize,
        nb_nodes: usize,
    },

    #[error("coordinate {index} is not finite")]
    NonFiniteCoordinate { index: usize },

    #[error("cell type {0} is not supported in dimension {1}")]
    UnsupportedCellType(&'static str, usize),

    #[error("coordinate array length {len} is not a multiple of the space dimension {dim}")]
    CoordinateLengthMismatch { len: usize, dim: usize },

    #[error("interpolation order {0} is not supported for this mesh pair")]
    UnsupportedOrder(&'static str),
}
