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

//! A triangle expressed in the coordinates of the unit tetrahedron, and
//! the volume of its intersection with it (Grandy, section III). The
//! volume is accumulated from two polygons: A, the intersection of the
//! triangle with the tetrahedron's interior, and B, the intersection of
//! the downward projection of the triangle with the facet x + y + z = 1.

use smallvec::SmallVec;

use super::intersect::ray_dp;
use super::products::DoubleProductResolution;
use super::{
    COORDS_TET_CORNER, DEFAULT_ABS_TOL, DoubleProduct, EDGES_FOR_CORNER, TetraCorner, TetraEdge,
    TetraFacet, TriCorner, TriSegment, epsilon_equal,
};

/// Plane of projection for the circular sort of an intersection polygon.
#[derive(Clone, Copy, PartialEq, Eq)]
enum ProjectionPlane {
    Xy,
    Xz,
    Yz,
}

/// A triangle PQR in transformed coordinates. Each corner carries five
/// values `(x, y, z, h, H)` with `h = 1 - x - y - z` and `H = 1 - x - y`,
/// stored as a flat block of 15 doubles. All double and triple products
/// are precalculated and stabilized on construction.
pub struct TransformedTriangle {
    pub(super) coords: [f64; 15],
    pub(super) double_products: [f64; 24],
    pub(super) triple_products: [Option<f64>; 4],
    pub(super) dp_resolution: [DoubleProductResolution; 3],
    pub(super) tri_surrounds_edge: [bool; 8],
    polygon_a: SmallVec<[[f64; 3]; 20]>,
    polygon_b: SmallVec<[[f64; 3]; 20]>,
}

impl TransformedTriangle {
    /// Build the triangle from its three corners, given in the coordinate
    /// system of the unit tetrahedron, and precalculate the products.
    pub fn new(p: &[f64], q: &[f64], r: &[f64]) -> Self {
        let mut coords = [0.0; 15];
        for (i, pt) in [p, q, r].into_iter().enumerate() {
            coords[5 * i] = pt[0];
            coords[5 * i + 1] = pt[1];
            coords[5 * i + 2] = pt[2];
            coords[5 * i + 3] = 1.0 - pt[0] - pt[1] - pt[2];
            coords[5 * i + 4] = 1.0 - pt[0] - pt[1];
        }
        let mut tri = TransformedTriangle {
            coords,
            double_products: [0.0; 24],
            triple_products: [None; 4],
            dp_resolution: [DoubleProductResolution::Resolved; 3],
            tri_surrounds_edge: [false; 8],
            polygon_a: SmallVec::new(),
            polygon_b: SmallVec::new(),
        };
        tri.reset_near_zero_coordinates();
        tri.pre_calculate_double_products();
        for edge in TetraEdge::ALL {
            tri.tri_surrounds_edge[edge as usize] = tri.test_triangle_surrounds_edge(edge);
        }
        tri.pre_calculate_triple_products();
        tri
    }

    /// How the double products of `seg` were settled during construction.
    pub fn double_product_resolution(&self, seg: TriSegment) -> DoubleProductResolution {
        self.dp_resolution[seg as usize]
    }

    /// Signed volume between the triangle and the h = 0 facet, clipped to
    /// the unit tetrahedron (Grandy, [34]). The sign follows the
    /// z-component of the triangle normal; summed over the (outward
    /// oriented) faces of a polyhedron this yields the volume of its
    /// intersection with the tetrahedron.
    pub fn calculate_intersection_volume(&mut self) -> f64 {
        if self.is_triangle_below_tetraeder() {
            return 0.0;
        }

        // a triangle perpendicular to the h = 0 facet sweeps no volume
        let sign = self.is_triangle_inclined_to_facet(TetraFacet::Oxy);
        if sign == 0 {
            return 0.0;
        }

        self.calculate_intersection_and_projection_polygons();

        let mut vol_a = 0.0;
        if self.polygon_a.len() > 2 {
            let barycenter = polygon_barycenter(&self.polygon_a);
            let plane = self.projection_plane_for_a();
            sort_polygon(&mut self.polygon_a, &barycenter, plane);
            vol_a = volume_under_polygon(&self.polygon_a, &barycenter);
        }

        let mut vol_b = 0.0;
        if self.polygon_b.len() > 2 && !self.is_triangle_in_plane_of_facet(TetraFacet::Xyz) {
            let barycenter = polygon_barycenter(&self.polygon_b);
            sort_polygon(&mut self.polygon_b, &barycenter, ProjectionPlane::Xy);
            vol_b = volume_under_polygon(&self.polygon_b, &barycenter);
        }

        sign as f64 * (vol_a + vol_b)
    }

    /// Collect the corners of polygons A and B from all the intersection
    /// configurations of Grandy section III: surface against edges and
    /// rays, segments against facets, edges, corners, rays and halfstrips,
    /// and the inclusion of the triangle corners themselves. The per-dp
    /// zero flags route the segment tests so that each configuration is
    /// detected exactly once.
    fn calculate_intersection_and_projection_polygons(&mut self) {
        // surface - edge
        for edge in TetraEdge::ALL {
            if self.test_surface_edge_intersection(edge) {
                let pt = self.calc_intersection_pt_surface_edge(edge);
                self.polygon_a.push(pt);
                if edge as usize >= TetraEdge::XY as usize {
                    self.polygon_b.push(pt);
                }
            }
        }

        // surface - ray
        for corner in TetraCorner::ON_XYZ_FACET {
            if self.test_surface_ray_intersection(corner) {
                self.polygon_b.push(corner_coords(corner));
            }
        }

        for seg in TriSegment::ALL {
            let mut is_zero = [false; 8];
            for dp in DoubleProduct::ALL {
                is_zero[dp as usize] = self.calc_stable_c(seg, dp) == 0.0;
            }

            // segment - facet
            for facet in TetraFacet::ALL {
                let do_test = !self.facet_dp_is_zero(&is_zero, facet, 0)
                    && !self.facet_dp_is_zero(&is_zero, facet, 1)
                    && !self.facet_dp_is_zero(&is_zero, facet, 2);
                if do_test && self.test_segment_facet_intersection(seg, facet) {
                    let pt = self.calc_intersection_pt_segment_facet(seg, facet);
                    self.polygon_a.push(pt);
                    if facet == TetraFacet::Xyz {
                        self.polygon_b.push(pt);
                    }
                }
            }

            // segment - edge
            for edge in TetraEdge::ALL {
                if is_zero[DoubleProduct::of_edge(edge) as usize]
                    && self.test_segment_edge_intersection(seg, edge)
                {
                    let pt = self.calc_intersection_pt_segment_edge(seg, edge);
                    self.polygon_a.push(pt);
                    if edge as usize >= TetraEdge::XY as usize {
                        self.polygon_b.push(pt);
                    }
                }
            }

            // segment - corner
            for corner in TetraCorner::ALL {
                let do_test = (0..3).all(|i| {
                    is_zero[EDGES_FOR_CORNER[3 * corner as usize + i] as usize]
                });
                if do_test && self.test_segment_corner_intersection(seg, corner) {
                    self.polygon_a.push(corner_coords(corner));
                    if corner != TetraCorner::O {
                        self.polygon_b.push(corner_coords(corner));
                    }
                }
            }

            // segment - ray
            for corner in TetraCorner::ON_XYZ_FACET {
                if is_zero[ray_dp(corner) as usize] && self.test_segment_ray_intersection(seg, corner)
                {
                    self.polygon_b.push(corner_coords(corner));
                }
            }

            // segment - halfstrip
            for edge in TetraEdge::ON_XYZ_FACET {
                if self.test_segment_halfstrip_intersection(seg, edge) {
                    let pt = self.calc_intersection_pt_segment_halfstrip(seg, edge);
                    self.polygon_b.push(pt);
                }
            }
        }

        // inclusion of the triangle corners
        for corner in TriCorner::ALL {
            let base = 5 * corner as usize;
            let pt = [
                self.coords[base],
                self.coords[base + 1],
                self.coords[base + 2],
            ];
            if self.test_corner_in_tetrahedron(corner) {
                self.polygon_a.push(pt);
            }
            if self.test_corner_on_xyz_facet(corner) {
                self.polygon_b.push(pt);
            }
            if self.test_corner_above_xyz_facet(corner) {
                // projected straight down onto the facet x + y + z = 1
                self.polygon_b.push([pt[0], pt[1], 1.0 - pt[0] - pt[1]]);
            }
        }
    }

    fn facet_dp_is_zero(&self, is_zero: &[bool; 8], facet: TetraFacet, i: usize) -> bool {
        is_zero[super::intersect::facet_dp(facet, i) as usize]
    }

    /// Plane used to project polygon A for the circular sort. Polygon B
    /// lies on the h = 0 facet and always sorts in the xy-plane.
    fn projection_plane_for_a(&self) -> ProjectionPlane {
        if self.is_triangle_inclined_to_facet(TetraFacet::Oxy) != 0 {
            ProjectionPlane::Xy
        } else if self.is_triangle_inclined_to_facet(TetraFacet::Ozx) != 0 {
            ProjectionPlane::Xz
        } else {
            ProjectionPlane::Yz
        }
    }

    /// Do all three corners lie in the plane of the facet?
    fn is_triangle_in_plane_of_facet(&self, facet: TetraFacet) -> bool {
        TriCorner::ALL
            .iter()
            .all(|c| self.coords[5 * *c as usize + facet as usize] == 0.0)
    }

    /// Sign of the component of the triangle normal perpendicular to the
    /// facet: 0 when the triangle is perpendicular to it.
    fn is_triangle_inclined_to_facet(&self, facet: TetraFacet) -> i32 {
        let coord = facet as usize;
        let ind1 = (coord + 1) % 3;
        let ind2 = (coord + 2) % 3;
        let u = [
            self.coords[5 + ind1] - self.coords[ind1],
            self.coords[5 + ind2] - self.coords[ind2],
        ];
        let v = [
            self.coords[10 + ind1] - self.coords[ind1],
            self.coords[10 + ind2] - self.coords[ind2],
        ];
        let sign = u[0] * v[1] - u[1] * v[0];
        if epsilon_equal(sign, 0.0, DEFAULT_ABS_TOL) {
            0
        } else if sign < 0.0 {
            -1
        } else {
            1
        }
    }

    /// All three corners strictly below the z = 0 plane.
    fn is_triangle_below_tetraeder(&self) -> bool {
        TriCorner::ALL
            .iter()
            .all(|c| self.coords[5 * *c as usize + 2] < 0.0)
    }
}

fn corner_coords(corner: TetraCorner) -> [f64; 3] {
    let c = 3 * corner as usize;
    [
        COORDS_TET_CORNER[c],
        COORDS_TET_CORNER[c + 1],
        COORDS_TET_CORNER[c + 2],
    ]
}

fn polygon_barycenter(polygon: &[[f64; 3]]) -> [f64; 3] {
    let m = polygon.len() as f64;
    let mut barycenter = [0.0; 3];
    for pt in polygon {
        for j in 0..3 {
            barycenter[j] += pt[j] / m;
        }
    }
    barycenter
}

/// Sort the polygon corners circularly around the barycenter, in the
/// given projection plane, by decreasing angle.
fn sort_polygon(polygon: &mut [[f64; 3]], barycenter: &[f64; 3], plane: ProjectionPlane) {
    if polygon.is_empty() {
        return;
    }
    let a_idx = if plane == ProjectionPlane::Yz { 1 } else { 0 };
    let b_idx = if plane == ProjectionPlane::Xy { 1 } else { 2 };
    let a = barycenter[a_idx];
    let b = barycenter[b_idx];
    let angle = |pt: &[f64; 3]| (pt[a_idx] - a).atan2(pt[b_idx] - b);
    polygon.sort_by(|p1, p2| {
        angle(p2)
            .partial_cmp(&angle(p1))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Volume between the sorted polygon and the z = 0 plane (Grandy, [34]):
/// each edge forms a wedge with the barycenter whose volume is the mean
/// height times the signed projected triangle area.
fn volume_under_polygon(polygon: &[[f64; 3]], barycenter: &[f64; 3]) -> f64 {
    let m = polygon.len();
    let mut vol = 0.0;
    for i in 0..m {
        let pt_curr = &polygon[i];
        let pt_next = &polygon[(i + 1) % m];
        let factor1 = pt_curr[2] + pt_next[2] + barycenter[2];
        let factor2 = pt_curr[0] * (pt_next[1] - barycenter[1])
            + pt_next[0] * (barycenter[1] - pt_curr[1])
            + barycenter[0] * (pt_curr[1] - pt_next[1]);
        vol += factor1 * factor2 / 6.0;
    }
    vol
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cross_section_triangle(z: f64) -> TransformedTriangle {
        TransformedTriangle::new(&[-1.0, -1.0, z], &[3.0, -1.0, z], &[-1.0, 3.0, z])
    }

    #[test]
    fn horizontal_plane_cuts_off_lower_frustum() {
        // a triangle covering the whole section z = c leaves the volume of
        // the tetrahedron below that plane: (1 - (1-c)^3) / 6
        for c in [0.25, 0.5, 0.75] {
            let mut tri = cross_section_triangle(c);
            let vol = tri.calculate_intersection_volume().abs();
            let expected = (1.0 - (1.0 - c) * (1.0 - c) * (1.0 - c)) / 6.0;
            assert!(
                (vol - expected).abs() < 1e-10,
                "c = {}: {} vs {}",
                c,
                vol,
                expected
            );
        }
    }

    #[test]
    fn triangle_below_z_plane_gives_no_volume() {
        let mut tri = cross_section_triangle(-0.5);
        assert_eq!(tri.calculate_intersection_volume(), 0.0);
    }

    #[test]
    fn vertical_triangle_gives_no_volume() {
        // plane x = 0.3, perpendicular to the h = 0 facet
        let mut tri = TransformedTriangle::new(
            &[0.3, -1.0, -1.0],
            &[0.3, 3.0, -1.0],
            &[0.3, -1.0, 3.0],
        );
        assert_eq!(tri.calculate_intersection_volume(), 0.0);
    }

    #[test]
    fn triangle_above_tetrahedron_covers_full_projection() {
        // a face passing entirely above the tetrahedron contributes the
        // whole prism below it; the counter-oriented faces of a closed
        // polyhedron cancel this out again
        let mut tri = cross_section_triangle(2.0);
        let vol = tri.calculate_intersection_volume().abs();
        assert!((vol - 1.0 / 6.0).abs() < 1e-10);
    }
}
