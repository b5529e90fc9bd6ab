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

/// Narrow-phase strategy for planar (2D) cell pairs. The 3D method is fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntersectionType {
    /// Fan-triangulate both cells and intersect every triangle pair.
    Triangulation,
    /// Successive half-plane clipping of convex cells.
    Convex,
    /// Closed-form area: convex clip followed by the shoelace formula.
    Geometric2D,
}

/// How a hexahedral target cell is decomposed into tetrahedra.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplittingPolicy {
    /// 5 tetrahedra sharing no interior node.
    PlanarFace5,
    /// 6 tetrahedra around a main diagonal.
    PlanarFace6,
    /// 24 tetrahedra from face and cell barycenters.
    General24,
    /// 48 tetrahedra from edge, face and cell barycenters.
    General48,
}

/// Field-representation pairing between the source and target meshes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterpolationOrder {
    /// Cell-wise constant on both sides; one matrix row per source cell.
    P0P0,
    /// Cell-wise constant source, node-wise linear target.
    P0P1,
    /// Node-wise linear source, cell-wise constant target.
    P1P0,
    /// Node-wise linear on both sides; one matrix row per source node.
    P1P1,
}

impl InterpolationOrder {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            InterpolationOrder::P0P0 => "P0P0",
            InterpolationOrder::P0P1 => "P0P1",
            InterpolationOrder::P1P0 => "P1P0",
            InterpolationOrder::P1P1 => "P1P1",
        }
    }
}

/// Tolerances and strategy switches for one matrix build.
#[derive(Clone, Debug)]
pub struct InterpolationOptions {
    /// Minimum reportable measure, relative to the characteristic cell size.
    pub precision: f64,
    /// Relative bounding-box enlargement applied before the broad phase.
    pub bounding_box_adjustment: f64,
    /// Absolute bounding-box enlargement, added on top of the relative one.
    pub bounding_box_adjustment_abs: f64,
    pub intersection_type: IntersectionType,
    pub splitting_policy: SplittingPolicy,
    /// 0 keeps every overlap; +1/-1 keep only positively/negatively
    /// oriented planar overlaps.
    pub orientation: i8,
    /// Report absolute measures. When false, planar measures keep the sign
    /// given by the cell orientations.
    pub measure_abs: bool,
}

impl Default for InterpolationOptions {
    fn default() -> Self {
        InterpolationOptions {
            precision: 1e-12,
            bounding_box_adjustment: 0.1,
            bounding_box_adjustment_abs: 0.0,
            intersection_type: IntersectionType::Triangulation,
            splitting_policy: SplittingPolicy::PlanarFace5,
            orientation: 0,
            measure_abs: true,
        }
    }
}
