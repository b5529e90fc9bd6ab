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

//! Planar polygon primitives over flat `[x0,y0, x1,y1, ...]` vertex lists.

use smallvec::SmallVec;

/// Flat 2D vertex list; intersections of mesh cells rarely exceed 8 points.
pub type Polygon = SmallVec<[f64; 16]>;

/// Unsigned area of the triangle `p1 p2 p3`.
pub fn tri_area(p1: &[f64], p2: &[f64], p3: &[f64]) -> f64 {
    let a = (p3[1] - p1[1]) * (p2[0] - p1[0]) - (p2[1] - p1[1]) * (p3[0] - p1[0]);
    0.5 * a.abs()
}

/// Determinant of the vectors `p3p1` and `p3p2`.
pub fn vec_det(p1: &[f64], p2: &[f64], p3: &[f64]) -> f64 {
    (p1[0] - p3[0]) * (p2[1] - p3[1]) - (p2[0] - p3[0]) * (p1[1] - p3[1])
}

pub fn seg_norm(p1: &[f64], p2: &[f64]) -> f64 {
    let x = p1[0] - p2[0];
    let y = p1[1] - p2[1];
    (x * x + y * y).sqrt()
}

/// Cosine and sine of the angle between `p1p2` and `p1p3`.
fn cos_sin(p1: &[f64], p2: &[f64], p3: &[f64]) -> (f64, f64) {
    let p1_p2 = seg_norm(p1, p2);
    let p2_p3 = seg_norm(p2, p3);
    let p3_p1 = seg_norm(p3, p1);
    let cos = (p1_p2 * p1_p2 + p3_p1 * p3_p1 - p2_p3 * p2_p3) / (2.0 * p1_p2 * p3_p1);
    let sin = vec_det(p2, p3, p1) / (p1_p2 * p3_p1);
    (cos, sin)
}

/// Vertex barycenter of a polygon.
pub fn barycenter(poly: &[f64]) -> [f64; 2] {
    let n = poly.len() / 2;
    let mut x = 0.0;
    let mut y = 0.0;
    for i in 0..n {
        x += poly[2 * i];
        y += poly[2 * i + 1];
    }
    [x / n as f64, y / n as f64]
}

/// Unsigned polygon area by fan triangulation from vertex 0.
pub fn polygon_area(poly: &[f64]) -> f64 {
    let n = poly.len() / 2;
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 1..n - 1 {
        area += tri_area(&poly[0..2], &poly[2 * i..2 * i + 2], &poly[2 * i + 2..2 * i + 4]);
    }
    area
}

/// Signed (shoelace) polygon area; positive for counter-clockwise order.
pub fn signed_polygon_area(poly: &[f64]) -> f64 {
    let n = poly.len() / 2;
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        acc += poly[2 * i] * poly[2 * j + 1] - poly[2 * j] * poly[2 * i + 1];
    }
    0.5 * acc
}

/// Is `p0` inside the triangle `p1 p2 p3` (within `eps` of its boundary)?
pub fn point_in_triangle(p0: &[f64], p1: &[f64], p2: &[f64], p3: &[f64], eps: f64) -> bool {
    let det_1 = vec_det(p1, p3, p0);
    let det_2 = vec_det(p3, p2, p0);
    let det_3 = vec_det(p2, p1, p0);
    (det_1 >= -eps && det_2 >= -eps && det_3 >= -eps)
        || (det_1 <= eps && det_2 <= eps && det_3 <= eps)
}

/// Append `p` unless a vertex within `absolute_precision` is already stored.
pub fn push_if_new(p: &[f64], poly: &mut Polygon, absolute_precision: f64) {
    let n = poly.len() / 2;
    for i in 0..n {
        let dx = p[0] - poly[2 * i];
        let dy = p[1] - poly[2 * i + 1];
        if (dx * dx + dy * dy).sqrt() < absolute_precision {
            return;
        }
    }
    poly.push(p[0]);
    poly.push(p[1]);
}

/// Intersection point of segments `p1p2` and `p3p4`, appended to `out` when
/// the segments cross within tolerance. Near-parallel segments contribute
/// nothing; their endpoints are caught by the vertex-inclusion pass.
pub fn segment_intersection(
    p1: &[f64],
    p2: &[f64],
    p3: &[f64],
    p4: &[f64],
    out: &mut Polygon,
    dim_caracteristic: f64,
    precision: f64,
) {
    let det = (p2[0] - p1[0]) * (p4[1] - p3[1]) - (p4[0] - p3[0]) * (p2[1] - p1[1]);
    let absolute_precision = dim_caracteristic * precision;
    if det.abs() > absolute_precision {
        let k_1 = -((p3[1] - p4[1]) * (p3[0] - p1[0]) + (p4[0] - p3[0]) * (p3[1] - p1[1])) / det;
        if k_1 >= -absolute_precision && k_1 <= 1.0 + absolute_precision {
            let k_2 = ((p1[1] - p2[1]) * (p1[0] - p3[0]) + (p2[0] - p1[0]) * (p1[1] - p3[1])) / det;
            if k_2 >= -absolute_precision && k_2 <= 1.0 + absolute_precision {
                let p0 = [p1[0] + k_1 * (p2[0] - p1[0]), p1[1] + k_1 * (p2[1] - p1[1])];
                push_if_new(&p0, out, absolute_precision);
            }
        }
    }
}

/// Append the vertices of triangle `p1 p2 p3` lying inside triangle
/// `p4 p5 p6`.
fn add_contained_vertices(
    p1: &[f64],
    p2: &[f64],
    p3: &[f64],
    p4: &[f64],
    p5: &[f64],
    p6: &[f64],
    out: &mut Polygon,
    dim_caracteristic: f64,
    precision: f64,
) {
    let absolute_precision = precision * dim_caracteristic;
    for p in [p1, p2, p3] {
        if point_in_triangle(p, p4, p5, p6, absolute_precision) {
            push_if_new(p, out, absolute_precision);
        }
    }
}

/// Collect the intersection points of two triangles: all nine edge pairs
/// plus both vertex-inclusion passes.
pub fn intersect_triangles(
    p1: &[f64],
    p2: &[f64],
    p3: &[f64],
    p4: &[f64],
    p5: &[f64],
    p6: &[f64],
    out: &mut Polygon,
    dim_caracteristic: f64,
    precision: f64,
) {
    for (a, b) in [(p1, p2), (p2, p3), (p3, p1)] {
        for (c, d) in [(p4, p5), (p5, p6), (p6, p4)] {
            segment_intersection(a, b, c, d, out, dim_caracteristic, precision);
        }
    }
    add_contained_vertices(p1, p2, p3, p4, p5, p6, out, dim_caracteristic, precision);
    add_contained_vertices(p4, p5, p6, p1, p2, p3, out, dim_caracteristic, precision);
}

/// Reorder a cloud of points into a convex polygon by sorting angularly
/// around the vertex barycenter. Three points or fewer are returned as-is.
pub fn sort_convex_polygon(poly: &[f64]) -> Polygon {
    let n = poly.len() / 2;
    if n <= 3 {
        return Polygon::from_slice(poly);
    }
    let bary = barycenter(poly);
    let mut angles: Vec<(f64, usize)> = Vec::with_capacity(n);
    angles.push((0.0, 0));
    for i in 1..n {
        let (cos, sin) = cos_sin(&bary, &poly[0..2], &poly[2 * i..2 * i + 2]);
        let angle = if sin >= 0.0 {
            cos.clamp(-1.0, 1.0).acos()
        } else {
            -cos.clamp(-1.0, 1.0).acos()
        };
        angles.push((angle, i));
    }
    angles.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    let mut out = Polygon::with_capacity(poly.len());
    for (_, i) in angles {
        out.push(poly[2 * i]);
        out.push(poly[2 * i + 1]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_area_and_containment() {
        let a = [0.0, 0.0];
        let b = [1.0, 0.0];
        let c = [0.0, 1.0];
        assert_eq!(tri_area(&a, &b, &c), 0.5);
        assert!(point_in_triangle(&[0.25, 0.25], &a, &b, &c, 1e-12));
        assert!(!point_in_triangle(&[0.75, 0.75], &a, &b, &c, 1e-12));
        // boundary point counts as inside
        assert!(point_in_triangle(&[0.5, 0.5], &a, &b, &c, 1e-12));
    }

    #[test]
    fn segment_crossing_inserted_once() {
        let mut out = Polygon::new();
        segment_intersection(
            &[0.0, -1.0],
            &[0.0, 1.0],
            &[-1.0, 0.0],
            &[1.0, 0.0],
            &mut out,
            1.0,
            1e-12,
        );
        segment_intersection(
            &[0.0, -1.0],
            &[0.0, 1.0],
            &[-1.0, 0.0],
            &[1.0, 0.0],
            &mut out,
            1.0,
            1e-12,
        );
        assert_eq!(out.as_slice(), &[0.0, 0.0]);
    }

    #[test]
    fn angular_sort_restores_square() {
        // shuffled unit square corners
        let cloud = [1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
        let sorted = sort_convex_polygon(&cloud);
        assert_eq!(sorted.len(), 8);
        assert!((signed_polygon_area(&sorted).abs() - 1.0).abs() < 1e-12);
    }
}
