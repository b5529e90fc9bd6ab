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

use crate::geometry::point::Point;

/// An axis-aligned bounding box in N dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox<const N: usize> {
    pub min: Point<N>,
    pub max: Point<N>,
}

impl<const N: usize> BoundingBox<N> {
    pub fn new(min: Point<N>, max: Point<N>) -> Self {
        BoundingBox { min, max }
    }

    /// Smallest box containing the points of a flat coordinate slice
    /// (`nb_points * N` values, stride N).
    pub fn from_flat_coords(coords: &[f64]) -> Self {
        debug_assert!(coords.len() >= N && coords.len() % N == 0);
        let mut min = Point::from_slice(coords);
        let mut max = min;
        for chunk in coords.chunks_exact(N).skip(1) {
            for i in 0..N {
                if chunk[i] < min[i] {
                    min[i] = chunk[i];
                }
                if chunk[i] > max[i] {
                    max[i] = chunk[i];
                }
            }
        }
        BoundingBox { min, max }
    }

    /// Smallest box containing the listed points of a flat coordinate slice.
    pub fn from_indexed_coords(coords: &[f64], indices: &[usize]) -> Self {
        debug_assert!(!indices.is_empty());
        let mut min = Point::from_slice(&coords[indices[0] * N..]);
        let mut max = min;
        for &idx in &indices[1..] {
            let p = &coords[idx * N..idx * N + N];
            for i in 0..N {
                if p[i] < min[i] {
                    min[i] = p[i];
                }
                if p[i] > max[i] {
                    max[i] = p[i];
                }
            }
        }
        BoundingBox { min, max }
    }

    /// Grow the box by `eps` on every side.
    pub fn enlarge(&self, eps: f64) -> Self {
        let mut out = *self;
        for i in 0..N {
            out.min[i] -= eps;
            out.max[i] += eps;
        }
        out
    }

    pub fn union(&self, other: &BoundingBox<N>) -> Self {
        let mut out = *self;
        for i in 0..N {
            out.min[i] = out.min[i].min(other.min[i]);
            out.max[i] = out.max[i].max(other.max[i]);
        }
        out
    }

    pub fn intersects(&self, other: &BoundingBox<N>) -> bool {
        for i in 0..N {
            if self.max[i] < other.min[i] || other.max[i] < self.min[i] {
                return false;
            }
        }
        true
    }

    pub fn contains_point(&self, p: &Point<N>) -> bool {
        for i in 0..N {
            if p[i] < self.min[i] || p[i] > self.max[i] {
                return false;
            }
        }
        true
    }

    /// Center coordinate along axis `i`.
    pub fn center(&self, i: usize) -> f64 {
        0.5 * (self.min[i] + self.max[i])
    }

    /// Length along axis `i`.
    pub fn extent(&self, i: usize) -> f64 {
        self.max[i] - self.min[i]
    }

    /// Axis index with the largest extent.
    pub fn longest_axis(&self) -> usize {
        let mut best_i = 0usize;
        let mut best = self.extent(0);
        for i in 1..N {
            let e = self.extent(i);
            if e > best {
                best_i = i;
                best = e;
            }
        }
        best_i
    }

    /// Squared distance from `p` to the box, zero when inside.
    pub fn distance2_to_point(&self, p: &Point<N>) -> f64 {
        let mut acc = 0.0;
        for i in 0..N {
            let d = if p[i] < self.min[i] {
                self.min[i] - p[i]
            } else if p[i] > self.max[i] {
                p[i] - self.max[i]
            } else {
                0.0
            };
            acc += d * d;
        }
        acc
    }
}
