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

use crate::geometry::{aabb::BoundingBox, point::Point};

/// Stop subdividing below this many boxes per leaf.
const LEAF_SIZE: usize = 8;

/// A static balanced binary tree over axis-aligned boxes, built once per
/// mesh and queried many times. Read-only after construction, so concurrent
/// queries are safe.
pub struct BBTree<const N: usize> {
    boxes: Vec<BoundingBox<N>>,
    root: Option<TreeNode<N>>,
}

enum TreeNode<const N: usize> {
    Leaf {
        elems: Vec<usize>,
    },
    Inner {
        bbox: BoundingBox<N>,
        left: Box<TreeNode<N>>,
        right: Box<TreeNode<N>>,
    },
}

impl<const N: usize> BBTree<N> {
    /// Build over per-element boxes, each enlarged by `eps`. An empty input
    /// yields an always-empty tree.
    pub fn new(boxes: Vec<BoundingBox<N>>, eps: f64) -> Self {
        let boxes: Vec<BoundingBox<N>> = boxes.iter().map(|b| b.enlarge(eps)).collect();
        let root = if boxes.is_empty() {
            None
        } else {
            let ids: Vec<usize> = (0..boxes.len()).collect();
            Some(Self::build(&boxes, ids, 0))
        };
        BBTree { boxes, root }
    }

    fn build(boxes: &[BoundingBox<N>], mut elems: Vec<usize>, depth: usize) -> TreeNode<N> {
        if elems.len() <= LEAF_SIZE {
            return TreeNode::Leaf { elems };
        }
        let mut bbox = boxes[elems[0]];
        for &e in &elems[1..] {
            bbox = bbox.union(&boxes[e]);
        }
        // Median split on the widest axis; fall back to cycling axes when
        // the node box is degenerate.
        let axis = if bbox.extent(bbox.longest_axis()) > 0.0 {
            bbox.longest_axis()
        } else {
            depth % N
        };
        elems.sort_by(|&a, &b| {
            boxes[a]
                .center(axis)
                .partial_cmp(&boxes[b].center(axis))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let right_elems = elems.split_off(elems.len() / 2);
        let left = Box::new(Self::build(boxes, elems, depth + 1));
        let right = Box::new(Self::build(boxes, right_elems, depth + 1));
        TreeNode::Inner { bbox, left, right }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Indices of all stored boxes in contact with `query`. May contain
    /// false positives from the eps enlargement, never false negatives.
    pub fn get_intersecting_elems(&self, query: &BoundingBox<N>) -> Vec<usize> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            self.query_boxes(root, query, &mut out);
        }
        out
    }

    fn query_boxes(&self, node: &TreeNode<N>, query: &BoundingBox<N>, out: &mut Vec<usize>) {
        match node {
            TreeNode::Leaf { elems } => {
                for &e in elems {
                    if self.boxes[e].intersects(query) {
                        out.push(e);
                    }
                }
            }
            TreeNode::Inner { bbox, left, right } => {
                if bbox.intersects(query) {
                    self.query_boxes(left, query, out);
                    self.query_boxes(right, query, out);
                }
            }
        }
    }

    /// Indices of all stored boxes containing `point`.
    pub fn get_elements_around_point(&self, point: &Point<N>) -> Vec<usize> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            self.query_point(root, point, &mut out);
        }
        out
    }

    fn query_point(&self, node: &TreeNode<N>, point: &Point<N>, out: &mut Vec<usize>) {
        match node {
            TreeNode::Leaf { elems } => {
                for &e in elems {
                    if self.boxes[e].contains_point(point) {
                        out.push(e);
                    }
                }
            }
            TreeNode::Inner { bbox, left, right } => {
                if bbox.contains_point(point) {
                    self.query_point(left, point, out);
                    self.query_point(right, point, out);
                }
            }
        }
    }

    /// Nearest stored box to `point` (by box distance, zero when inside),
    /// found by doubling a search radius until at least one candidate turns
    /// up. Returns `None` on an empty tree.
    pub fn get_nearest_element(&self, point: &Point<N>, initial_radius: f64) -> Option<(usize, f64)> {
        self.root.as_ref()?;
        let mut radius = if initial_radius > 0.0 { initial_radius } else { 1.0 };
        loop {
            let query = BoundingBox::new(*point, *point).enlarge(radius);
            let candidates = self.get_intersecting_elems(&query);
            if !candidates.is_empty() {
                let mut best = (candidates[0], f64::INFINITY);
                for e in candidates {
                    let d2 = self.boxes[e].distance2_to_point(point);
                    if d2 < best.1 {
                        best = (e, d2);
                    }
                }
                return Some((best.0, best.1.sqrt()));
            }
            radius *= 2.0;
        }
    }
}
