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

use intermesh::geometry::aabb::BoundingBox;
use intermesh::geometry::bbtree::BBTree;
use intermesh::geometry::point::Point;
use rand::prelude::*;

/// 10x10 grid of unit boxes, row-major: box (i, j) covers [i,i+1]x[j,j+1].
fn grid_tree() -> BBTree<2> {
    let mut boxes = Vec::with_capacity(100);
    for j in 0..10 {
        for i in 0..10 {
            boxes.push(BoundingBox::new(
                Point::new([i as f64, j as f64]),
                Point::new([i as f64 + 1.0, j as f64 + 1.0]),
            ));
        }
    }
    BBTree::new(boxes, 0.0)
}

#[test]
fn disjoint_query_finds_nothing() {
    let tree = grid_tree();
    let query = BoundingBox::new(Point::new([20.0, 20.0]), Point::new([21.0, 21.0]));
    assert!(tree.get_intersecting_elems(&query).is_empty());
}

#[test]
fn query_over_four_cells_finds_four() {
    let tree = grid_tree();
    let query = BoundingBox::new(Point::new([0.5, 0.5]), Point::new([1.5, 1.5]));
    let mut found = tree.get_intersecting_elems(&query);
    found.sort_unstable();
    assert_eq!(found, vec![0, 1, 10, 11]);
}

#[test]
fn query_over_two_cells_finds_two() {
    let tree = grid_tree();
    let query = BoundingBox::new(Point::new([3.2, 5.1]), Point::new([3.8, 6.9]));
    let mut found = tree.get_intersecting_elems(&query);
    found.sort_unstable();
    assert_eq!(found, vec![53, 63]);
}

#[test]
fn point_query_inside_one_cell() {
    let tree = grid_tree();
    let found = tree.get_elements_around_point(&Point::new([2.5, 3.5]));
    assert_eq!(found, vec![32]);
}

#[test]
fn point_query_on_shared_grid_node() {
    let tree = grid_tree();
    let mut found = tree.get_elements_around_point(&Point::new([4.0, 4.0]));
    found.sort_unstable();
    assert_eq!(found, vec![33, 34, 43, 44]);
}

#[test]
fn nearest_element_outside_the_grid() {
    let tree = grid_tree();
    // closest box to (12, 0.5) is box (9, 0), at distance 2
    let (idx, dist) = tree.get_nearest_element(&Point::new([12.0, 0.5]), 0.5).unwrap();
    assert_eq!(idx, 9);
    assert!((dist - 2.0).abs() < 1e-12);
}

#[test]
fn empty_tree_answers_empty() {
    let tree: BBTree<2> = BBTree::new(Vec::new(), 0.0);
    assert!(tree.is_empty());
    let query = BoundingBox::new(Point::new([0.0, 0.0]), Point::new([1.0, 1.0]));
    assert!(tree.get_intersecting_elems(&query).is_empty());
    assert!(tree.get_elements_around_point(&Point::new([0.0, 0.0])).is_empty());
    assert!(tree.get_nearest_element(&Point::new([0.0, 0.0]), 1.0).is_none());
}

#[test]
fn random_queries_match_brute_force() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut boxes = Vec::with_capacity(200);
    for _ in 0..200 {
        let min = [rng.random_range(0.0..10.0), rng.random_range(0.0..10.0)];
        let ext = [rng.random_range(0.0..2.0), rng.random_range(0.0..2.0)];
        boxes.push(BoundingBox::new(
            Point::new(min),
            Point::new([min[0] + ext[0], min[1] + ext[1]]),
        ));
    }
    let tree = BBTree::new(boxes.clone(), 0.0);

    for _ in 0..50 {
        let min = [rng.random_range(-1.0..11.0), rng.random_range(-1.0..11.0)];
        let ext = [rng.random_range(0.0..3.0), rng.random_range(0.0..3.0)];
        let query = BoundingBox::new(
            Point::new(min),
            Point::new([min[0] + ext[0], min[1] + ext[1]]),
        );
        let mut found = tree.get_intersecting_elems(&query);
        found.sort_unstable();
        let expected: Vec<usize> = (0..boxes.len())
            .filter(|&i| boxes[i].intersects(&query))
            .collect();
        assert_eq!(found, expected);
    }
}

#[test]
fn enlargement_pulls_in_neighbours() {
    let boxes = vec![
        BoundingBox::new(Point::new([0.0, 0.0]), Point::new([1.0, 1.0])),
        BoundingBox::new(Point::new([2.0, 0.0]), Point::new([3.0, 1.0])),
    ];
    let tree = BBTree::new(boxes, 0.6);
    let query = BoundingBox::new(Point::new([1.2, 0.2]), Point::new([1.3, 0.8]));
    let mut found = tree.get_intersecting_elems(&query);
    found.sort_unstable();
    assert_eq!(found, vec![0, 1]);
}
