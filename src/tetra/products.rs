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

//! Double and triple products of the transformed triangle (Grandy, [42]
//! and [50]), with the consistency and imprecision corrections of section
//! IV.3 that keep the sign tests of the intersection predicates coherent.

use super::triangle::TransformedTriangle;
use super::{
    COORDS_TET_CORNER, DP_OFFSET_1, DP_OFFSET_2, DoubleProduct, MACH_EPS, MULT_PREC_F, THRESHOLD_F,
    TRIPLE_PRODUCT_ANGLE_THRESHOLD, TetraCorner, TetraEdge, TriSegment, epsilon_equal,
};

/// How the double products of one triangle segment were settled: either
/// they were consistent as computed, or they were deemed contradictory
/// (Grandy, [46]) and the three products associated with the nearest
/// tetrahedron corner were forced to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoubleProductResolution {
    Resolved,
    ResolvedToZero(TetraCorner),
}

/// Double product to zero for each corner when a segment is found
/// inconsistent, `3*corner + {0,1,2}`.
const DOUBLE_PRODUCTS_FOR_CORNER: [DoubleProduct; 12] = [
    DoubleProduct::CYz, DoubleProduct::CZx, DoubleProduct::CXy, // O
    DoubleProduct::CYz, DoubleProduct::CZh, DoubleProduct::CYh, // X
    DoubleProduct::CZx, DoubleProduct::CZh, DoubleProduct::CXh, // Y
    DoubleProduct::CXy, DoubleProduct::CYh, DoubleProduct::CXh, // Z
];

/// Coordinate offset used when developing the triple-product determinant
/// by a given row, `3*corner + row-1`.
const COORDINATE_FOR_DETERMINANT_EXPANSION: [usize; 12] = [
    0, 1, 2, // O
    3, 1, 2, // X
    0, 3, 2, // Y
    0, 1, 3, // Z
];

/// Double product of each term when developing the triple-product
/// determinant by a given row, `3*corner + row-1`.
const DP_FOR_DETERMINANT_EXPANSION: [DoubleProduct; 12] = [
    DoubleProduct::CYz, DoubleProduct::CZx, DoubleProduct::CXy, // O
    DoubleProduct::CYz, DoubleProduct::CZh, DoubleProduct::CYh, // X
    DoubleProduct::CZh, DoubleProduct::CZx, DoubleProduct::CXh, // Y
    DoubleProduct::CYh, DoubleProduct::CXh, DoubleProduct::CXy, // Z
];

/// Signs of the determinant expansions, `3*corner + row-1`.
const SIGNS_FOR_DETERMINANT_EXPANSION: [f64; 12] = [
    1.0, 1.0, 1.0, // O
    -1.0, -1.0, 1.0, // X
    1.0, -1.0, -1.0, // Y
    -1.0, 1.0, -1.0, // Z
];

/// Coordinate to project on for each double product used in the
/// determinant expansion (Grandy, [57]).
const PROJECTION_COORDS: [usize; 6] = [1, 2, 0, 3, 3, 3];

/// Direction vectors of the tetrahedron edges, `3*edge + coord`.
const EDGE_VECTORS: [f64; 18] = [
    1.0, 0.0, 0.0, // OX
    0.0, 1.0, 0.0, // OY
    0.0, 0.0, 1.0, // OZ
    -1.0, 1.0, 0.0, // XY
    0.0, -1.0, 1.0, // YZ
    1.0, 0.0, -1.0, // ZX
];

fn cross(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

impl TransformedTriangle {
    /// Snap coordinates indistinguishable from zero at machine precision,
    /// so that the exclusion tests see clean zeros.
    pub(super) fn reset_near_zero_coordinates(&mut self) {
        for c in self.coords.iter_mut() {
            if c.abs() < 40.0 * MACH_EPS {
                *c = 0.0;
            }
        }
    }

    /// Double product `c` read from the precalculated, corrected table.
    pub(super) fn calc_stable_c(&self, seg: TriSegment, dp: DoubleProduct) -> f64 {
        self.double_products[8 * seg as usize + dp as usize]
    }

    /// Triple product `t` for a corner; only meaningful when the
    /// precalculation marked the corner valid.
    pub(super) fn calc_stable_t(&self, corner: TetraCorner) -> f64 {
        debug_assert!(self.triple_products[corner as usize].is_some());
        self.triple_products[corner as usize].unwrap_or(0.0)
    }

    /// Double product straight from the coordinates (Grandy, [42]),
    /// without corrections.
    pub(super) fn calc_unstable_c(&self, seg: TriSegment, dp: DoubleProduct) -> f64 {
        let pt1 = seg as usize;
        let pt2 = (seg as usize + 1) % 3;
        let off1 = DP_OFFSET_1[dp as usize];
        let off2 = DP_OFFSET_2[dp as usize];
        self.coords[5 * pt1 + off1] * self.coords[5 * pt2 + off2]
            - self.coords[5 * pt1 + off2] * self.coords[5 * pt2 + off1]
    }

    /// Compute all 24 double products, then apply the two corrections:
    /// segments whose products are contradictory (Grandy, [46]) have the
    /// products of the nearest tetrahedron corner zeroed, and products
    /// below the rounding-error threshold (Grandy, [47]) are zeroed.
    pub(super) fn pre_calculate_double_products(&mut self) {
        for seg in TriSegment::ALL {
            for dp in DoubleProduct::ALL {
                self.double_products[8 * seg as usize + dp as usize] =
                    self.calc_unstable_c(seg, dp);
            }
        }

        for seg in TriSegment::ALL {
            if !self.are_double_products_consistent(seg) {
                let mut min_corner = TetraCorner::O;
                let mut min_dist = f64::INFINITY;
                for corner in TetraCorner::ALL {
                    let dist = self.distance2_corner_segment(corner, seg);
                    if dist < min_dist {
                        min_dist = dist;
                        min_corner = corner;
                    }
                }
                self.reset_double_products(seg, min_corner);
                self.dp_resolution[seg as usize] = DoubleProductResolution::ResolvedToZero(min_corner);
            }
        }

        for seg in TriSegment::ALL {
            for dp in DoubleProduct::ALL {
                let pt1 = seg as usize;
                let pt2 = (seg as usize + 1) % 3;
                let off1 = DP_OFFSET_1[dp as usize];
                let off2 = DP_OFFSET_2[dp as usize];
                let term1 = self.coords[5 * pt1 + off1] * self.coords[5 * pt2 + off2];
                let term2 = self.coords[5 * pt1 + off2] * self.coords[5 * pt2 + off1];
                let delta = MULT_PREC_F * (term1.abs() + term2.abs());
                let idx = 8 * seg as usize + dp as usize;
                if epsilon_equal(self.double_products[idx], 0.0, THRESHOLD_F * delta) {
                    self.double_products[idx] = 0.0;
                }
            }
        }
    }

    /// Consistency check of Grandy, [46]: the three products
    /// c_yz*c_xh, c_zx*c_yh, c_xy*c_zh must describe a coherent sign
    /// pattern for the segment to cut the tetrahedron's faces sanely.
    pub(super) fn are_double_products_consistent(&self, seg: TriSegment) -> bool {
        let terms = [
            self.calc_stable_c(seg, DoubleProduct::CYz) * self.calc_stable_c(seg, DoubleProduct::CXh),
            self.calc_stable_c(seg, DoubleProduct::CZx) * self.calc_stable_c(seg, DoubleProduct::CYh),
            self.calc_stable_c(seg, DoubleProduct::CXy) * self.calc_stable_c(seg, DoubleProduct::CZh),
        ];
        let num_zero = terms.iter().filter(|t| **t == 0.0).count();
        let num_neg = terms.iter().filter(|t| **t < 0.0).count();

        let inconsistent = (num_zero == 1 && num_neg != 1)
            || num_zero == 2
            || (num_neg == 0 && num_zero != 3)
            || num_neg == 3;
        !inconsistent
    }

    /// Squared distance from a tetrahedron corner to the line carrying a
    /// triangle segment.
    fn distance2_corner_segment(&self, corner: TetraCorner, seg: TriSegment) -> f64 {
        let p_idx = seg as usize;
        let q_idx = (seg as usize + 1) % 3;
        let pt_p = [
            self.coords[5 * p_idx],
            self.coords[5 * p_idx + 1],
            self.coords[5 * p_idx + 2],
        ];
        let pt_q = [
            self.coords[5 * q_idx],
            self.coords[5 * q_idx + 1],
            self.coords[5 * q_idx + 2],
        ];
        let c = corner as usize;
        let diff_pq = [pt_q[0] - pt_p[0], pt_q[1] - pt_p[1], pt_q[2] - pt_p[2]];
        let diff_corner_p = [
            pt_p[0] - COORDS_TET_CORNER[3 * c],
            pt_p[1] - COORDS_TET_CORNER[3 * c + 1],
            pt_p[2] - COORDS_TET_CORNER[3 * c + 2],
        ];
        let cross_prod = cross(&diff_pq, &diff_corner_p);
        dot(&cross_prod, &cross_prod) / dot(&diff_pq, &diff_pq)
    }

    /// Zero the three double products associated with a corner for the
    /// given segment.
    fn reset_double_products(&mut self, seg: TriSegment, corner: TetraCorner) {
        for i in 0..3 {
            let dp = DOUBLE_PRODUCTS_FOR_CORNER[3 * corner as usize + i];
            self.double_products[8 * seg as usize + dp as usize] = 0.0;
        }
    }

    /// Compute the triple product of each corner, choosing for each the
    /// expansion row whose associated edge makes the smallest angle with
    /// the triangle (rows whose edge the triangle does not surround are
    /// unusable). The projection correction of Grandy, [57] is applied
    /// when that angle falls below the threshold. Corners with no usable
    /// row are left without a triple product.
    pub(super) fn pre_calculate_triple_products(&mut self) {
        for corner in TetraCorner::ALL {
            let mut best: Option<(f64, usize)> = None;
            for row in 1..4 {
                let dp = DP_FOR_DETERMINANT_EXPANSION[3 * corner as usize + row - 1];
                // the first six double products map onto the tetra edges
                let edge = TetraEdge::ALL[dp as usize];
                if self.tri_surrounds_edge[edge as usize] {
                    let angle = self.calculate_angle_edge_triangle(edge);
                    if best.map_or(true, |(a, _)| angle < a) {
                        best = Some((angle, row));
                    }
                }
            }
            self.triple_products[corner as usize] = best.map(|(min_angle, min_row)| {
                let project = min_angle < TRIPLE_PRODUCT_ANGLE_THRESHOLD;
                self.calc_t_by_developing_row(corner, min_row, project)
            });
        }
    }

    /// Angle between a tetrahedron edge and the triangle plane.
    fn calculate_angle_edge_triangle(&self, edge: TetraEdge) -> f64 {
        let pq = [
            self.coords[5] - self.coords[0],
            self.coords[6] - self.coords[1],
            self.coords[7] - self.coords[2],
        ];
        let pr = [
            self.coords[10] - self.coords[0],
            self.coords[11] - self.coords[1],
            self.coords[12] - self.coords[2],
        ];
        let normal = cross(&pq, &pr);
        let e = edge as usize;
        let edge_vec = [
            EDGE_VECTORS[3 * e],
            EDGE_VECTORS[3 * e + 1],
            EDGE_VECTORS[3 * e + 2],
        ];
        let len_normal = dot(&normal, &normal).sqrt();
        let len_edge_vec = dot(&edge_vec, &edge_vec).sqrt();
        let dot_prod = dot(&normal, &edge_vec);
        let tmp = (dot_prod / (len_normal * len_edge_vec)).clamp(-1.0, 1.0);
        std::f64::consts::PI - tmp.acos()
    }

    /// Triple product by development of the determinant along `row`
    /// (Grandy, [50]), optionally projecting the coordinates onto the
    /// plane of the double products first ([57]), and zeroing a result
    /// below its rounding-error estimate ([53]).
    pub(super) fn calc_t_by_developing_row(
        &self,
        corner: TetraCorner,
        row: usize,
        project: bool,
    ) -> f64 {
        let sign = SIGNS_FOR_DETERMINANT_EXPANSION[3 * corner as usize + row - 1];
        let offset = COORDINATE_FOR_DETERMINANT_EXPANSION[3 * corner as usize + row - 1];
        let dp = DP_FOR_DETERMINANT_EXPANSION[3 * corner as usize + row - 1];

        let c_qr = self.calc_stable_c(TriSegment::QR, dp);
        let c_rp = self.calc_stable_c(TriSegment::RP, dp);
        let c_pq = self.calc_stable_c(TriSegment::PQ, dp);

        let (c_qr_bar, c_rp_bar, c_pq_bar) = if project {
            let coord = PROJECTION_COORDS[dp as usize];
            let coord_values = [
                self.coords[coord],
                self.coords[5 + coord],
                self.coords[10 + coord],
            ];
            let coord_dp_prod = [
                coord_values[0] * c_qr,
                coord_values[1] * c_rp,
                coord_values[2] * c_pq,
            ];
            let sum_dp_prod = coord_dp_prod[0] + coord_dp_prod[1] + coord_dp_prod[2];
            let sum_dp_prod_sq = dot(&coord_dp_prod, &coord_dp_prod);
            let alpha = if sum_dp_prod_sq != 0.0 {
                sum_dp_prod / sum_dp_prod_sq
            } else {
                0.0
            };
            (
                c_qr * (1.0 - alpha * coord_values[0] * c_qr),
                c_rp * (1.0 - alpha * coord_values[1] * c_rp),
                c_pq * (1.0 - alpha * coord_values[2] * c_pq),
            )
        } else {
            (c_qr, c_rp, c_pq)
        };

        let p_term = self.coords[offset] * c_qr_bar;
        let q_term = self.coords[5 + offset] * c_rp_bar;
        let r_term = self.coords[10 + offset] * c_pq_bar;

        let delta = MULT_PREC_F * (p_term.abs() + q_term.abs() + r_term.abs());
        if epsilon_equal(p_term + q_term + r_term, 0.0, THRESHOLD_F * delta) {
            0.0
        } else {
            sign * (p_term + q_term + r_term)
        }
    }
}
