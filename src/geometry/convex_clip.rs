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

//! Convex polygon intersection by successive half-plane clipping, with a
//! tolerance band so that tangential contact (shared vertices, overlapping
//! edges) collapses to the empty polygon instead of a sliver.

use crate::geometry::polygon::{Polygon, push_if_new, signed_polygon_area};

/// Intersection polygon of two convex polygons. Degenerate results — fewer
/// than three vertices distinct at scale `eps` — are returned empty, so a
/// point or segment tangency contributes no area.
pub fn intersect_convex_polygons(poly_a: &[f64], poly_b: &[f64], eps: f64) -> Polygon {
    if poly_a.len() < 6 || poly_b.len() < 6 {
        return Polygon::new();
    }

    let mut subject: Vec<[f64; 2]> = poly_a.chunks_exact(2).map(|c| [c[0], c[1]]).collect();
    let mut clipper: Vec<[f64; 2]> = poly_b.chunks_exact(2).map(|c| [c[0], c[1]]).collect();
    // Clipping assumes a counter-clockwise clipper.
    if signed_polygon_area(poly_b) < 0.0 {
        clipper.reverse();
    }

    let nb = clipper.len();
    for i in 0..nb {
        let e1 = clipper[i];
        let e2 = clipper[(i + 1) % nb];
        let ux = e2[0] - e1[0];
        let uy = e2[1] - e1[1];
        if ux.abs() < eps && uy.abs() < eps {
            continue;
        }
        subject = clip_half_plane(&subject, &e1, ux, uy, eps);
        if subject.is_empty() {
            return Polygon::new();
        }
    }

    // Merge coincident vertices; tangential configurations leave a point or
    // a segment here.
    let mut out = Polygon::new();
    for p in &subject {
        push_if_new(p, &mut out, eps);
    }
    if out.len() < 6 {
        return Polygon::new();
    }
    out
}

/// One Sutherland-Hodgman pass against the half-plane left of `(e1, e1+u)`.
/// Vertices within `eps` of the boundary are kept as inside.
fn clip_half_plane(subject: &[[f64; 2]], e1: &[f64; 2], ux: f64, uy: f64, eps: f64) -> Vec<[f64; 2]> {
    let side = |p: &[f64; 2]| ux * (p[1] - e1[1]) - uy * (p[0] - e1[0]);
    let mut out = Vec::with_capacity(subject.len() + 2);
    let n = subject.len();
    for i in 0..n {
        let cur = subject[i];
        let next = subject[(i + 1) % n];
        let d_cur = side(&cur);
        let d_next = side(&next);
        if d_cur >= -eps {
            out.push(cur);
        }
        // genuine transversal crossing only; touches stay on their vertex
        if (d_cur > eps && d_next < -eps) || (d_cur < -eps && d_next > eps) {
            let t = d_cur / (d_cur - d_next);
            out.push([
                cur[0] + t * (next[0] - cur[0]),
                cur[1] + t * (next[1] - cur[1]),
            ]);
        }
    }
    out
}
