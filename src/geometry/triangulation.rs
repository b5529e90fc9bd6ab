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

//! Triangulation-based intersection of coplanar convex polygons: both
//! polygons are fan-triangulated from their first vertex and every triangle
//! pair contributes its crossing points and contained vertices.

use crate::geometry::polygon::{Polygon, intersect_triangles, sort_convex_polygon};

/// Vertex cloud of the intersection of two convex polygons, sorted into a
/// convex polygon when it has more than three points. Vertices closer than
/// `dim_caracteristic * precision` are merged.
pub fn intersect_polygons(
    coords_a: &[f64],
    coords_b: &[f64],
    dim_caracteristic: f64,
    precision: f64,
) -> Polygon {
    let nb_a = coords_a.len() / 2;
    let nb_b = coords_b.len() / 2;
    let mut inter = Polygon::new();
    for i_a in 1..nb_a.saturating_sub(1) {
        for i_b in 1..nb_b.saturating_sub(1) {
            intersect_triangles(
                &coords_a[0..2],
                &coords_a[2 * i_a..2 * i_a + 2],
                &coords_a[2 * (i_a + 1)..2 * (i_a + 1) + 2],
                &coords_b[0..2],
                &coords_b[2 * i_b..2 * i_b + 2],
                &coords_b[2 * (i_b + 1)..2 * (i_b + 1) + 2],
                &mut inter,
                dim_caracteristic,
                precision,
            );
        }
    }
    if inter.len() / 2 > 3 {
        inter = sort_convex_polygon(&inter);
    }
    inter
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::polygon::polygon_area;

    #[test]
    fn quarter_overlap_of_unit_squares() {
        let a = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
        let b = [0.5, 0.5, 1.5, 0.5, 1.5, 1.5, 0.5, 1.5];
        let inter = intersect_polygons(&a, &b, 1.0, 1e-12);
        assert!((polygon_area(&inter) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn disjoint_polygons_yield_nothing() {
        let a = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
        let b = [5.0, 5.0, 6.0, 5.0, 6.0, 6.0, 5.0, 6.0];
        let inter = intersect_polygons(&a, &b, 1.0, 1e-12);
        assert!(inter.is_empty());
    }
}
