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

//! Intersection of non-matching unstructured meshes: for two meshes covering
//! overlapping regions of the plane or of space, compute the sparse matrix of
//! overlap areas (2D) or volumes (3D) between every intersecting pair of
//! cells. The matrix is the basis of conservative field remapping between
//! meshes of different solvers.
//!
//! The broad phase runs over a static bounding-box tree ([`geometry::bbtree`]);
//! the planar narrow phase offers three interchangeable polygon-clipping
//! strategies ([`geometry::triangulation`], [`geometry::convex_clip`]); the
//! volumic narrow phase implements Grandy's double/triple-product tetrahedron
//! intersection ([`tetra`]).
//!
//! ```
//! use intermesh::interp::interpolate_planar;
//! use intermesh::mesh::{CellType, Mesh};
//! use intermesh::options::InterpolationOptions;
//!
//! let mut src = Mesh::<2>::new(vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]).unwrap();
//! src.add_cell(CellType::Quad4, &[0, 1, 2, 3]).unwrap();
//! let mut tgt = Mesh::<2>::new(vec![0.5, 0.5, 1.5, 0.5, 1.5, 1.5, 0.5, 1.5]).unwrap();
//! tgt.add_cell(CellType::Quad4, &[0, 1, 2, 3]).unwrap();
//!
//! let matrix = interpolate_planar(&src, &tgt, &InterpolationOptions::default());
//! assert!((matrix.get(0, 0).unwrap() - 0.25).abs() < 1e-12);
//! ```

pub mod error;
pub mod geometry;
pub mod interp;
pub mod mesh;
pub mod options;
pub mod tetra;

pub use error::MeshError;
pub use interp::IntersectionMatrix;
pub use mesh::{CellType, Mesh};
pub use options::{InterpolationOptions, InterpolationOrder, IntersectionType, SplittingPolicy};
