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

//! Sign-based intersection predicates between the transformed triangle and
//! the unit tetrahedron, and the corresponding intersection points. Each
//! test follows an equation of Grandy section III; all of them reduce to
//! sign comparisons of the precalculated double and triple products.

use super::triangle::TransformedTriangle;
use super::{
    COORDS_TET_CORNER, CORNERS_FOR_EDGE, DoubleProduct, FACET_FOR_EDGE, TetraCorner, TetraEdge,
    TetraFacet, TriCorner, TriSegment,
};

/// Double products of each facet (Grandy, table IV), `3*facet + {0,1,2}`.
const DP_FOR_SEG_FACET_INTERSECTION: [DoubleProduct; 12] = [
    DoubleProduct::CXh, DoubleProduct::CXy, DoubleProduct::CZx, // OYZ
    DoubleProduct::CYh, DoubleProduct::CYz, DoubleProduct::CXy, // OZX
    DoubleProduct::CZh, DoubleProduct::CZx, DoubleProduct::CYz, // OXY
    DoubleProduct::CXh, DoubleProduct::CYh, DoubleProduct::CZh, // XYZ
];

/// Signs going with `DP_FOR_SEG_FACET_INTERSECTION` (Grandy, table IV).
const SIGN_FOR_SEG_FACET_INTERSECTION: [f64; 12] = [
    1.0, 1.0, -1.0, //
    1.0, 1.0, -1.0, //
    1.0, 1.0, -1.0, //
    1.0, 1.0, 1.0,
];

/// Index into the two tables above for each coordinate of a segment-facet
/// intersection point, `3*facet + coord`; -1 marks a zero coordinate.
const DP_INDEX: [i32; 12] = [
    -1, 1, 2, // OYZ
    5, -1, 4, // OZX
    7, 8, -1, // OXY
    9, 10, 11, // XYZ
];

/// Double products of the halfstrip tests (Grandy, [30]),
/// `4*(edge-3) + {0,1,2,3}`; the first two drive the positive-product
/// condition and the last two the negative one.
const DP_FOR_HALFSTRIP_INTERSECTION: [DoubleProduct; 12] = [
    DoubleProduct::C10, DoubleProduct::C01, DoubleProduct::CZh, DoubleProduct::C10, // XY
    DoubleProduct::C01, DoubleProduct::CXy, DoubleProduct::CXh, DoubleProduct::C01, // YZ
    DoubleProduct::CXy, DoubleProduct::C10, DoubleProduct::CYh, DoubleProduct::CXy, // ZX
];

/// Double products of the segment-ray tests (Grandy, [29]),
/// `7*(corner-1) + {0..6}`; offset 0 is the product that must vanish.
const DP_SEGMENT_RAY_INTERSECTION: [DoubleProduct; 21] = [
    DoubleProduct::C10, DoubleProduct::CYh, DoubleProduct::CZh, DoubleProduct::C01,
    DoubleProduct::CXy, DoubleProduct::CYh, DoubleProduct::CXy, // X
    DoubleProduct::C01, DoubleProduct::CXh, DoubleProduct::CZh, DoubleProduct::CXy,
    DoubleProduct::C10, DoubleProduct::CZh, DoubleProduct::C10, // Y
    DoubleProduct::CXy, DoubleProduct::CYh, DoubleProduct::CXh, DoubleProduct::C10,
    DoubleProduct::C01, DoubleProduct::CXh, DoubleProduct::C01, // Z
];

/// The double product that must vanish for a segment to touch the upwards
/// ray of a corner on the h = 0 facet.
pub(super) fn ray_dp(corner: TetraCorner) -> DoubleProduct {
    DP_SEGMENT_RAY_INTERSECTION[7 * (corner as usize - 1)]
}

/// The i-th double product associated with a facet (Grandy, table IV).
pub(super) fn facet_dp(facet: TetraFacet, i: usize) -> DoubleProduct {
    DP_FOR_SEG_FACET_INTERSECTION[3 * facet as usize + i]
}

impl TransformedTriangle {
    /// Does the triangle surface cut the given tetrahedron edge (Grandy,
    /// [16])?
    pub(super) fn test_surface_edge_intersection(&self, edge: TetraEdge) -> bool {
        self.tri_surrounds_edge[edge as usize] && self.test_edge_intersects_triangle(edge)
    }

    /// Does the triangle segment cut the given facet (Grandy, [19])?
    pub(super) fn test_segment_facet_intersection(&self, seg: TriSegment, facet: TetraFacet) -> bool {
        self.test_facet_surrounds_segment(seg, facet) && self.test_segment_intersects_facet(seg, facet)
    }

    /// Does the triangle surface cut the upwards ray of a corner of the
    /// h = 0 facet (Grandy, [24])?
    pub(super) fn test_surface_ray_intersection(&self, corner: TetraCorner) -> bool {
        self.test_triangle_surrounds_ray(corner) && self.test_surface_above_corner(corner)
    }

    /// Is the given triangle corner inside the tetrahedron?
    pub(super) fn test_corner_in_tetrahedron(&self, corner: TriCorner) -> bool {
        let base = 5 * corner as usize;
        (0..4).all(|i| {
            let c = self.coords[base + i];
            (0.0..=1.0).contains(&c)
        })
    }

    /// Is the given triangle corner on the h = 0 facet?
    pub(super) fn test_corner_on_xyz_facet(&self, corner: TriCorner) -> bool {
        let base = 5 * corner as usize;
        if self.coords[base + 3] != 0.0 {
            return false;
        }
        (0..3).all(|i| {
            let c = self.coords[base + i];
            (0.0..=1.0).contains(&c)
        })
    }

    /// Is the given triangle corner above the h = 0 facet, inside the
    /// infinite prism over it?
    pub(super) fn test_corner_above_xyz_facet(&self, corner: TriCorner) -> bool {
        let base = 5 * corner as usize;
        let x = self.coords[base];
        let y = self.coords[base + 1];
        let h = self.coords[base + 3];
        let cap_h = self.coords[base + 4];
        h < 0.0 && cap_h >= 0.0 && x >= 0.0 && y >= 0.0
    }

    /// The edge's two corners lie on opposite sides of the triangle plane
    /// (Grandy, [16]).
    fn test_edge_intersects_triangle(&self, edge: TetraEdge) -> bool {
        // corners whose triple products switch sign across each edge
        const TRIPLE_PRODUCTS: [TetraCorner; 12] = [
            TetraCorner::X, TetraCorner::O, // OX
            TetraCorner::Y, TetraCorner::O, // OY
            TetraCorner::Z, TetraCorner::O, // OZ
            TetraCorner::X, TetraCorner::Y, // XY
            TetraCorner::Y, TetraCorner::Z, // YZ
            TetraCorner::Z, TetraCorner::X, // ZX
        ];
        let t1 = self.calc_stable_t(TRIPLE_PRODUCTS[2 * edge as usize]);
        let t2 = self.calc_stable_t(TRIPLE_PRODUCTS[2 * edge as usize + 1]);
        t1 * t2 <= 0.0 && t1 - t2 != 0.0
    }

    /// The line of the segment passes within the wedge of the facet
    /// (Grandy, [19], first two conditions).
    fn test_facet_surrounds_segment(&self, seg: TriSegment, facet: TetraFacet) -> bool {
        let f = 3 * facet as usize;
        let c1 = SIGN_FOR_SEG_FACET_INTERSECTION[f]
            * self.calc_stable_c(seg, DP_FOR_SEG_FACET_INTERSECTION[f]);
        let c2 = SIGN_FOR_SEG_FACET_INTERSECTION[f + 1]
            * self.calc_stable_c(seg, DP_FOR_SEG_FACET_INTERSECTION[f + 1]);
        let c3 = SIGN_FOR_SEG_FACET_INTERSECTION[f + 2]
            * self.calc_stable_c(seg, DP_FOR_SEG_FACET_INTERSECTION[f + 2]);
        c1 * c3 > 0.0 && c2 * c3 > 0.0
    }

    /// The segment's endpoints lie on opposite sides of the facet plane.
    /// A facet's index is the index of the coordinate vanishing on it.
    pub(super) fn test_segment_intersects_facet(&self, seg: TriSegment, facet: TetraFacet) -> bool {
        let coord1 = self.coords[5 * seg as usize + facet as usize];
        let coord2 = self.coords[5 * ((seg as usize + 1) % 3) + facet as usize];
        coord1 * coord2 <= 0.0 && coord1 != coord2
    }

    /// The segment's endpoints lie on opposite sides of the plane H = 0.
    fn test_segment_intersects_h_plane(&self, seg: TriSegment) -> bool {
        let coord1 = self.coords[5 * seg as usize + 4];
        let coord2 = self.coords[5 * ((seg as usize + 1) % 3) + 4];
        coord1 * coord2 <= 0.0 && coord1 != coord2
    }

    /// Is the triangle surface above the given corner (Grandy, [28])?
    /// The triple product is always developed along the same row as the
    /// normal, never taken from the corrected stable values.
    fn test_surface_above_corner(&self, corner: TetraCorner) -> bool {
        let normal = self.calc_stable_c(TriSegment::PQ, DoubleProduct::CXy)
            + self.calc_stable_c(TriSegment::QR, DoubleProduct::CXy)
            + self.calc_stable_c(TriSegment::RP, DoubleProduct::CXy);
        let t = self.calc_t_by_developing_row(corner, 1, false);
        t * normal >= 0.0
    }

    /// Does the triangle surround the vertical ray over a corner of the
    /// h = 0 facet (Grandy, [18])?
    fn test_triangle_surrounds_ray(&self, corner: TetraCorner) -> bool {
        let dp = ray_dp(corner);
        let c_pq = self.calc_stable_c(TriSegment::PQ, dp);
        let c_qr = self.calc_stable_c(TriSegment::QR, dp);
        let c_rp = self.calc_stable_c(TriSegment::RP, dp);
        c_pq * c_qr > 0.0 && c_pq * c_rp > 0.0
    }

    /// Does the triangle surround the axis carrying the given edge
    /// (Grandy, [53])? Two or more vanishing double products disqualify
    /// the edge.
    pub(super) fn test_triangle_surrounds_edge(&self, edge: TetraEdge) -> bool {
        let dp = DoubleProduct::of_edge(edge);
        let c_pq = self.calc_stable_c(TriSegment::PQ, dp);
        let c_qr = self.calc_stable_c(TriSegment::QR, dp);
        let c_rp = self.calc_stable_c(TriSegment::RP, dp);
        let num_zeros = (c_pq == 0.0) as usize + (c_qr == 0.0) as usize + (c_rp == 0.0) as usize;
        c_pq * c_qr >= 0.0 && c_qr * c_rp >= 0.0 && c_rp * c_pq >= 0.0 && num_zeros < 2
    }

    /// Intersection point of the triangle surface with a tetra edge,
    /// by barycentric interpolation along the edge (Grandy, [22]).
    pub(super) fn calc_intersection_pt_surface_edge(&self, edge: TetraEdge) -> [f64; 3] {
        let corner_a = CORNERS_FOR_EDGE[2 * edge as usize] as usize;
        let corner_b = CORNERS_FOR_EDGE[2 * edge as usize + 1] as usize;
        let t_a = self.calc_stable_t(CORNERS_FOR_EDGE[2 * edge as usize]);
        let t_b = self.calc_stable_t(CORNERS_FOR_EDGE[2 * edge as usize + 1]);
        let alpha = t_a / (t_a - t_b);
        let mut pt = [0.0; 3];
        for i in 0..3 {
            pt[i] = (1.0 - alpha) * COORDS_TET_CORNER[3 * corner_a + i]
                + alpha * COORDS_TET_CORNER[3 * corner_b + i];
        }
        pt
    }

    /// Intersection point of a triangle segment with a facet (Grandy,
    /// [23]).
    pub(super) fn calc_intersection_pt_segment_facet(
        &self,
        seg: TriSegment,
        facet: TetraFacet,
    ) -> [f64; 3] {
        let f = 3 * facet as usize;
        let mut s = 0.0;
        for i in 0..3 {
            s -= SIGN_FOR_SEG_FACET_INTERSECTION[f + i]
                * self.calc_stable_c(seg, DP_FOR_SEG_FACET_INTERSECTION[f + i]);
        }

        let mut pt = [0.0; 3];
        for i in 0..3 {
            let dp_idx = DP_INDEX[f + i];
            if dp_idx >= 0 {
                let idx = dp_idx as usize;
                pt[i] = -(SIGN_FOR_SEG_FACET_INTERSECTION[idx]
                    * self.calc_stable_c(seg, DP_FOR_SEG_FACET_INTERSECTION[idx]))
                    / s;
            }
        }
        pt
    }

    /// Does the triangle segment cut a tetra edge (Grandy, [20])? The
    /// vanishing of the edge's own double product is checked by the
    /// caller.
    pub(super) fn test_segment_edge_intersection(&self, seg: TriSegment, edge: TetraEdge) -> bool {
        let mut facets = [TetraFacet::Oyz; 2];
        let mut facet_cond_verified = false;
        for i in 0..2 {
            let facet = FACET_FOR_EDGE[2 * edge as usize + i];
            facets[i] = facet;

            // the two double products of the facet other than the edge's own
            let f = 3 * facet as usize;
            let mut idx1 = 0;
            let mut idx2 = 1;
            if DP_FOR_SEG_FACET_INTERSECTION[f + idx1] == DoubleProduct::of_edge(edge) {
                idx1 = 2;
            } else if DP_FOR_SEG_FACET_INTERSECTION[f + idx2] == DoubleProduct::of_edge(edge) {
                idx2 = 2;
            }
            let c1 = SIGN_FOR_SEG_FACET_INTERSECTION[f + idx1]
                * self.calc_stable_c(seg, DP_FOR_SEG_FACET_INTERSECTION[f + idx1]);
            let c2 = SIGN_FOR_SEG_FACET_INTERSECTION[f + idx2]
                * self.calc_stable_c(seg, DP_FOR_SEG_FACET_INTERSECTION[f + idx2]);
            if c1 * c2 > 0.0 {
                facet_cond_verified = true;
            }
        }
        if !facet_cond_verified {
            false
        } else {
            self.test_segment_intersects_facet(seg, facets[0])
                || self.test_segment_intersects_facet(seg, facets[1])
        }
    }

    /// Intersection point of a triangle segment with a tetra edge,
    /// combining the two adjacent facets (Grandy, [25]).
    pub(super) fn calc_intersection_pt_segment_edge(
        &self,
        seg: TriSegment,
        edge: TetraEdge,
    ) -> [f64; 3] {
        let facets = [
            FACET_FOR_EDGE[2 * edge as usize],
            FACET_FOR_EDGE[2 * edge as usize + 1],
        ];

        let mut s = [0.0; 2];
        for i in 0..2 {
            let f = 3 * facets[i] as usize;
            for j in 0..3 {
                s[i] += SIGN_FOR_SEG_FACET_INTERSECTION[f + j]
                    * self.calc_stable_c(seg, DP_FOR_SEG_FACET_INTERSECTION[f + j]);
            }
        }
        let denominator = s[0] * s[0] + s[1] * s[1];

        let mut pt = [0.0; 3];
        for i in 0..3 {
            let mut c = [0.0; 2];
            for j in 0..2 {
                let dp_idx = DP_INDEX[3 * facets[j] as usize + i];
                if dp_idx >= 0 {
                    let idx = dp_idx as usize;
                    c[j] = SIGN_FOR_SEG_FACET_INTERSECTION[idx]
                        * self.calc_stable_c(seg, DP_FOR_SEG_FACET_INTERSECTION[idx]);
                }
            }
            pt[i] = (c[0] * s[0] + c[1] * s[1]) / denominator;
        }
        pt
    }

    /// Does the triangle segment pass through a tetra corner (Grandy,
    /// [21])? The vanishing double products are checked by the caller.
    pub(super) fn test_segment_corner_intersection(
        &self,
        seg: TriSegment,
        corner: TetraCorner,
    ) -> bool {
        const FACETS_FOR_CORNER: [TetraFacet; 12] = [
            TetraFacet::Oxy, TetraFacet::Oyz, TetraFacet::Ozx, // O
            TetraFacet::Ozx, TetraFacet::Oxy, TetraFacet::Xyz, // X
            TetraFacet::Oyz, TetraFacet::Xyz, TetraFacet::Oxy, // Y
            TetraFacet::Ozx, TetraFacet::Xyz, TetraFacet::Oyz, // Z
        ];
        (0..3).any(|i| {
            self.test_segment_intersects_facet(seg, FACETS_FOR_CORNER[3 * corner as usize + i])
        })
    }

    /// Does the triangle segment cut the halfstrip above an edge of the
    /// h = 0 facet (Grandy, [30])?
    pub(super) fn test_segment_halfstrip_intersection(
        &self,
        seg: TriSegment,
        edge: TetraEdge,
    ) -> bool {
        let edge_index = edge as usize - 3;

        let c_vals = [
            self.calc_stable_c(seg, DP_FOR_HALFSTRIP_INTERSECTION[4 * edge_index]),
            self.calc_stable_c(seg, DP_FOR_HALFSTRIP_INTERSECTION[4 * edge_index + 1]),
            self.calc_stable_c(seg, DP_FOR_HALFSTRIP_INTERSECTION[4 * edge_index + 2]),
            self.calc_stable_c(seg, DP_FOR_HALFSTRIP_INTERSECTION[4 * edge_index + 3]),
        ];

        // second condition: XY tests against the plane H = 0, the others
        // against a facet
        let cond2 = match edge {
            TetraEdge::XY => self.test_segment_intersects_h_plane(seg),
            TetraEdge::YZ => self.test_segment_intersects_facet(seg, TetraFacet::Oyz),
            _ => self.test_segment_intersects_facet(seg, TetraFacet::Ozx),
        };

        c_vals[0] * c_vals[1] < 0.0 && cond2 && c_vals[2] * c_vals[3] > 0.0
    }

    /// Intersection point of a triangle segment with a halfstrip, by
    /// barycentric interpolation on the underlying edge (Grandy, [31]).
    pub(super) fn calc_intersection_pt_segment_halfstrip(
        &self,
        seg: TriSegment,
        edge: TetraEdge,
    ) -> [f64; 3] {
        let edge_index = edge as usize - 3;
        let c_a = self.calc_stable_c(seg, DP_FOR_HALFSTRIP_INTERSECTION[4 * edge_index]);
        let c_b = self.calc_stable_c(seg, DP_FOR_HALFSTRIP_INTERSECTION[4 * edge_index + 1]);
        let alpha = c_a / (c_a - c_b);

        let corner_a = CORNERS_FOR_EDGE[2 * edge as usize] as usize;
        let corner_b = CORNERS_FOR_EDGE[2 * edge as usize + 1] as usize;
        let mut pt = [0.0; 3];
        for i in 0..3 {
            pt[i] = (1.0 - alpha) * COORDS_TET_CORNER[3 * corner_a + i]
                + alpha * COORDS_TET_CORNER[3 * corner_b + i];
        }
        pt
    }

    /// Does the triangle segment cut the upwards ray from a corner of the
    /// h = 0 facet (Grandy, [29])? The vanishing double product is
    /// checked by the caller.
    pub(super) fn test_segment_ray_intersection(&self, seg: TriSegment, corner: TetraCorner) -> bool {
        let corner_idx = corner as usize - 1;

        const FIRST_FACET_SEGMENT_RAY_INTERSECTION: [TetraFacet; 3] = [
            TetraFacet::Ozx, // X
            TetraFacet::Oyz, // Y
            TetraFacet::Ozx, // Z
        ];

        let cond21 =
            self.test_segment_intersects_facet(seg, FIRST_FACET_SEGMENT_RAY_INTERSECTION[corner_idx]);
        let cond22 = if corner == TetraCorner::Z {
            self.test_segment_intersects_facet(seg, TetraFacet::Oyz)
        } else {
            self.test_segment_intersects_h_plane(seg)
        };
        if !(cond21 || cond22) {
            return false;
        }

        let c_vals = [
            self.calc_stable_c(seg, DP_SEGMENT_RAY_INTERSECTION[7 * corner_idx + 1]),
            self.calc_stable_c(seg, DP_SEGMENT_RAY_INTERSECTION[7 * corner_idx + 2]),
            self.calc_stable_c(seg, DP_SEGMENT_RAY_INTERSECTION[7 * corner_idx + 3]),
            self.calc_stable_c(seg, DP_SEGMENT_RAY_INTERSECTION[7 * corner_idx + 4]),
            self.calc_stable_c(seg, DP_SEGMENT_RAY_INTERSECTION[7 * corner_idx + 5]),
            self.calc_stable_c(seg, DP_SEGMENT_RAY_INTERSECTION[7 * corner_idx + 6]),
        ];
        (c_vals[0] + c_vals[1]) * (c_vals[2] - c_vals[3]) - c_vals[4] * c_vals[5] < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::super::triangle::TransformedTriangle;
    use super::super::{TetraCorner, TetraEdge, TetraFacet, TriCorner, TriSegment};

    #[test]
    fn surface_cuts_all_three_origin_edges() {
        // plane x + y + z = 1/2 with a triangle large enough to cover the
        // whole cross-section of the tetrahedron
        let p = [1.5, -0.5, -0.5];
        let q = [-0.5, 1.5, -0.5];
        let r = [-0.5, -0.5, 1.5];
        let tri = TransformedTriangle::new(&p, &q, &r);
        for edge in [TetraEdge::OX, TetraEdge::OY, TetraEdge::OZ] {
            assert!(tri.test_surface_edge_intersection(edge), "{:?}", edge);
            let pt = tri.calc_intersection_pt_surface_edge(edge);
            assert!((pt[0] + pt[1] + pt[2] - 0.5).abs() < 1e-12);
        }
        for edge in [TetraEdge::XY, TetraEdge::YZ, TetraEdge::ZX] {
            assert!(!tri.test_surface_edge_intersection(edge), "{:?}", edge);
        }
    }

    #[test]
    fn corner_classification() {
        let p = [0.2, 0.2, 0.2];
        let q = [0.7, 0.1, 0.2];
        let r = [0.25, 0.5, 0.0];
        let tri = TransformedTriangle::new(&p, &q, &r);
        assert!(tri.test_corner_in_tetrahedron(TriCorner::P));
        assert!(tri.test_corner_in_tetrahedron(TriCorner::Q));
        assert!(tri.test_corner_in_tetrahedron(TriCorner::R));
        assert!(!tri.test_corner_on_xyz_facet(TriCorner::P));
    }

    #[test]
    fn rays_over_facet_corners_hit_a_plane_beyond_the_facet() {
        // plane x + y + z = 2 lies beyond the h = 0 facet; the upward rays
        // from its corners all pierce a triangle covering that plane
        let above = TransformedTriangle::new(
            &[3.0, -0.5, -0.5],
            &[-0.5, 3.0, -0.5],
            &[-0.5, -0.5, 3.0],
        );
        // plane x + y + z = 0.2 stays below the facet corners
        let below = TransformedTriangle::new(
            &[1.2, -0.5, -0.5],
            &[-0.5, 1.2, -0.5],
            &[-0.5, -0.5, 1.2],
        );
        for corner in [TetraCorner::X, TetraCorner::Y, TetraCorner::Z] {
            assert!(above.test_surface_ray_intersection(corner), "{:?}", corner);
            assert!(!below.test_surface_ray_intersection(corner), "{:?}", corner);
        }
    }

    #[test]
    fn segment_crossing_facet_is_detected() {
        // PQ crosses the facet x = 0 inside the tetrahedron
        let p = [-0.2, 0.3, 0.3];
        let q = [0.3, 0.2, 0.2];
        let r = [0.1, 0.1, 0.9];
        let tri = TransformedTriangle::new(&p, &q, &r);
        assert!(tri.test_segment_intersects_facet(TriSegment::PQ, TetraFacet::Oyz));
        assert!(tri.test_segment_facet_intersection(TriSegment::PQ, TetraFacet::Oyz));
        let pt = tri.calc_intersection_pt_segment_facet(TriSegment::PQ, TetraFacet::Oyz);
        assert!(pt[0].abs() < 1e-12);
        // the crossing point lies on the segment: interpolate directly
        let alpha = 0.2 / 0.5;
        assert!((pt[1] - (0.3 + alpha * (0.2 - 0.3))).abs() < 1e-12);
        assert!((pt[2] - (0.3 + alpha * (0.2 - 0.3))).abs() < 1e-12);
    }
}
