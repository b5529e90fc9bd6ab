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

//! Tetrahedron intersection after Grandy, "Conservative Remapping and
//! Region Overlays by Intersecting Arbitrary Polyhedra", J. Comput. Phys.
//! (1999). One tetrahedron is affine-mapped onto the unit tetrahedron with
//! corners O, X, Y, Z; the faces of the other cell become transformed
//! triangles PQR whose intersection volume with the unit tetrahedron is
//! evaluated through double and triple products of the transformed
//! coordinates.

pub mod affine;
pub mod intersect;
pub mod products;
pub mod splitter;
pub mod triangle;

/// Machine epsilon, base of the precision corrections.
pub(crate) const MACH_EPS: f64 = f64::EPSILON;

/// Precision of a multiplication (`f` in Grandy).
pub(crate) const MULT_PREC_F: f64 = 4.0 * MACH_EPS;

/// Threshold for zeroing imprecise products (`F/f` in Grandy).
pub(crate) const THRESHOLD_F: f64 = 500.0;

/// Largest edge-to-triangle angle for which the projection correction of
/// the triple products is applied (Grandy, [57]).
pub(crate) const TRIPLE_PRODUCT_ANGLE_THRESHOLD: f64 = 0.1;

/// Default absolute tolerance for scalar comparisons.
pub(crate) const DEFAULT_ABS_TOL: f64 = 5.0e-12;

pub(crate) fn epsilon_equal(x: f64, y: f64, tol: f64) -> bool {
    (x - y).abs() < tol
}

/// Corners of the unit tetrahedron.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TetraCorner {
    O = 0,
    X,
    Y,
    Z,
}

impl TetraCorner {
    pub const ALL: [TetraCorner; 4] = [TetraCorner::O, TetraCorner::X, TetraCorner::Y, TetraCorner::Z];
    /// X, Y and Z: the corners of the h = 0 facet.
    pub const ON_XYZ_FACET: [TetraCorner; 3] = [TetraCorner::X, TetraCorner::Y, TetraCorner::Z];
}

/// Edges of the unit tetrahedron. H01 and H10 are the pseudo-edges where
/// the planes H = 0 and h = 0 meet the triangle plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TetraEdge {
    OX = 0,
    OY,
    OZ,
    XY,
    YZ,
    ZX,
    H01,
    H10,
}

impl TetraEdge {
    /// The six real edges.
    pub const ALL: [TetraEdge; 6] = [
        TetraEdge::OX,
        TetraEdge::OY,
        TetraEdge::OZ,
        TetraEdge::XY,
        TetraEdge::YZ,
        TetraEdge::ZX,
    ];
    /// Edges of the h = 0 facet, above which the halfstrips lie.
    pub const ON_XYZ_FACET: [TetraEdge; 3] = [TetraEdge::XY, TetraEdge::YZ, TetraEdge::ZX];
}

/// Facets of the unit tetrahedron; the discriminant is also the index of
/// the coordinate that vanishes on the facet (x, y, z, h).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TetraFacet {
    Oyz = 0,
    Ozx,
    Oxy,
    Xyz,
}

impl TetraFacet {
    pub const ALL: [TetraFacet; 4] = [
        TetraFacet::Oyz,
        TetraFacet::Ozx,
        TetraFacet::Oxy,
        TetraFacet::Xyz,
    ];
}

/// Corners of the triangle PQR.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriCorner {
    P = 0,
    Q,
    R,
}

impl TriCorner {
    pub const ALL: [TriCorner; 3] = [TriCorner::P, TriCorner::Q, TriCorner::R];
}

/// Segments of the triangle PQR. The discriminant doubles as the index of
/// the segment's first corner (PQ starts at P, and so on).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriSegment {
    PQ = 0,
    QR,
    RP,
}

impl TriSegment {
    pub const ALL: [TriSegment; 3] = [TriSegment::PQ, TriSegment::QR, TriSegment::RP];
}

/// The eight double products per segment. The order of the first six
/// corresponds to `TetraEdge` (Grandy, table III), which lets an edge be
/// used directly as a double-product index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoubleProduct {
    CYz = 0,
    CZx,
    CXy,
    CZh,
    CXh,
    CYh,
    C01,
    C10,
}

impl DoubleProduct {
    pub const ALL: [DoubleProduct; 8] = [
        DoubleProduct::CYz,
        DoubleProduct::CZx,
        DoubleProduct::CXy,
        DoubleProduct::CZh,
        DoubleProduct::CXh,
        DoubleProduct::CYh,
        DoubleProduct::C01,
        DoubleProduct::C10,
    ];

    pub fn of_edge(edge: TetraEdge) -> DoubleProduct {
        Self::ALL[edge as usize]
    }
}

/// First coordinate (a) of the double product c^pq_ab = p_a q_b - p_b q_a,
/// indexed by `DoubleProduct`.
pub(crate) const DP_OFFSET_1: [usize; 8] = [1, 2, 0, 2, 0, 1, 4, 1];

/// Second coordinate (b) of the double product, indexed by `DoubleProduct`.
pub(crate) const DP_OFFSET_2: [usize; 8] = [2, 0, 1, 3, 3, 3, 0, 4];

/// Coordinates of the corners of the unit tetrahedron, `3*corner + coord`.
pub(crate) const COORDS_TET_CORNER: [f64; 12] = [
    0.0, 0.0, 0.0, //
    1.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, //
    0.0, 0.0, 1.0,
];

/// The two corners bounding each edge, `2*edge + {0,1}`.
pub(crate) const CORNERS_FOR_EDGE: [TetraCorner; 12] = [
    TetraCorner::O, TetraCorner::X, // OX
    TetraCorner::O, TetraCorner::Y, // OY
    TetraCorner::O, TetraCorner::Z, // OZ
    TetraCorner::X, TetraCorner::Y, // XY
    TetraCorner::Y, TetraCorner::Z, // YZ
    TetraCorner::Z, TetraCorner::X, // ZX
];

/// The two facets sharing each edge, `2*edge + {0,1}`.
pub(crate) const FACET_FOR_EDGE: [TetraFacet; 12] = [
    TetraFacet::Oxy, TetraFacet::Ozx, // OX
    TetraFacet::Oxy, TetraFacet::Oyz, // OY
    TetraFacet::Ozx, TetraFacet::Oyz, // OZ
    TetraFacet::Oxy, TetraFacet::Xyz, // XY
    TetraFacet::Oyz, TetraFacet::Xyz, // YZ
    TetraFacet::Ozx, TetraFacet::Xyz, // ZX
];

/// The three edges meeting at each corner, `3*corner + {0,1,2}`.
pub(crate) const EDGES_FOR_CORNER: [TetraEdge; 12] = [
    TetraEdge::OX, TetraEdge::OY, TetraEdge::OZ, // O
    TetraEdge::OX, TetraEdge::XY, TetraEdge::ZX, // X
    TetraEdge::OY, TetraEdge::XY, TetraEdge::YZ, // Y
    TetraEdge::OZ, TetraEdge::ZX, TetraEdge::YZ, // Z
];
