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

//! Planar (2D) matrix build: broad phase over the target bounding-box tree,
//! then per candidate pair one of the interchangeable polygon intersection
//! strategies.

use log::{debug, trace};

use crate::error::MeshError;
use crate::geometry::bbtree::BBTree;
use crate::geometry::convex_clip::intersect_convex_polygons;
use crate::geometry::polygon::{barycenter, polygon_area, signed_polygon_area};
use crate::geometry::triangulation::intersect_polygons;
use crate::interp::matrix::IntersectionMatrix;
use crate::mesh::{CellType, Mesh};
use crate::options::{InterpolationOptions, InterpolationOrder, IntersectionType};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Shared per-build state: the meshes, the target tree and the resolved
/// tolerances.
struct PlanarRun<'a> {
    src: &'a Mesh<2>,
    tgt: &'a Mesh<2>,
    tree: BBTree<2>,
    options: &'a InterpolationOptions,
    dim_caracteristic: f64,
}

impl<'a> PlanarRun<'a> {
    fn new(src: &'a Mesh<2>, tgt: &'a Mesh<2>, options: &'a InterpolationOptions) -> Self {
        let dim_caracteristic = src
            .characteristic_dimension()
            .max(tgt.characteristic_dimension());
        let adjustment = options.bounding_box_adjustment * dim_caracteristic
            + options.bounding_box_adjustment_abs;
        let boxes = (0..tgt.nb_cells())
            .map(|c| tgt.cell_bounding_box(c))
            .collect();
        let tree = BBTree::new(boxes, adjustment);
        PlanarRun {
            src,
            tgt,
            tree,
            options,
            dim_caracteristic,
        }
    }

    /// Minimum area that reaches the matrix.
    fn threshold(&self) -> f64 {
        self.options.precision * self.dim_caracteristic * self.dim_caracteristic
    }

    /// Unsigned intersection area of two cells given as flat vertex lists.
    fn intersection_area(&self, coords_a: &[f64], coords_b: &[f64]) -> f64 {
        let eps = self.dim_caracteristic * self.options.precision;
        match self.options.intersection_type {
            IntersectionType::Triangulation => polygon_area(&intersect_polygons(
                coords_a,
                coords_b,
                self.dim_caracteristic,
                self.options.precision,
            )),
            IntersectionType::Convex => {
                polygon_area(&intersect_convex_polygons(coords_a, coords_b, eps))
            }
            IntersectionType::Geometric2D => {
                signed_polygon_area(&intersect_convex_polygons(coords_a, coords_b, eps)).abs()
            }
        }
    }

    /// Orientation filter and signed/absolute reporting for one overlap of
    /// unsigned area `area` between cells of orientation signs `sign_a` and
    /// `sign_b`. `None` when the overlap is filtered out.
    fn oriented_measure(&self, area: f64, sign_a: f64, sign_b: f64) -> Option<f64> {
        let sign = sign_a * sign_b;
        if self.options.orientation != 0 && sign != self.options.orientation as f64 {
            return None;
        }
        Some(if self.options.measure_abs { area } else { sign * area })
    }

    /// One P0P0 row: overlaps of source cell `i` with every candidate.
    fn source_row(&self, i: usize) -> Vec<(usize, f64)> {
        let coords_a = self.src.cell_coords(i);
        let sign_a = self.src.cell_area(i).signum();
        let threshold = self.threshold();
        let mut row = Vec::new();
        for j in self.tree.get_intersecting_elems(&self.src.cell_bounding_box(i)) {
            let coords_b = self.tgt.cell_coords(j);
            let area = self.intersection_area(&coords_a, &coords_b);
            trace!("cells {i} x {j}: area {area:.6e}");
            if area < threshold {
                continue;
            }
            if let Some(m) = self.oriented_measure(area, sign_a, self.tgt.cell_area(j).signum()) {
                row.push((j, m));
            }
        }
        row
    }
}

/// Cell-to-cell (P0P0) intersection matrix: one row per source cell, one
/// entry per target cell with overlap area at least
/// `precision * dim_caracteristic^2`.
pub fn interpolate_planar(
    src: &Mesh<2>,
    tgt: &Mesh<2>,
    options: &InterpolationOptions,
) -> IntersectionMatrix {
    let run = PlanarRun::new(src, tgt, options);

    #[cfg(feature = "parallel")]
    let rows: Vec<Vec<(usize, f64)>> = (0..src.nb_cells())
        .into_par_iter()
        .map(|i| run.source_row(i))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let rows: Vec<Vec<(usize, f64)>> = (0..src.nb_cells()).map(|i| run.source_row(i)).collect();

    let mut matrix = IntersectionMatrix::new(src.nb_cells());
    for (i, row) in rows.into_iter().enumerate() {
        for (j, m) in row {
            matrix.add(i, j, m);
        }
    }
    debug!(
        "planar build: {} x {} cells, {} entries",
        src.nb_cells(),
        tgt.nb_cells(),
        matrix.nb_entries()
    );
    matrix
}

/// Front door dispatching on the interpolation order. The nodal orders
/// attribute overlap to mesh nodes through the barycentric dual cells of a
/// triangle mesh; any other cell type on a node side is rejected.
pub fn interpolate(
    src: &Mesh<2>,
    tgt: &Mesh<2>,
    order: InterpolationOrder,
    options: &InterpolationOptions,
) -> Result<IntersectionMatrix, MeshError> {
    match order {
        InterpolationOrder::P0P0 => Ok(interpolate_planar(src, tgt, options)),
        InterpolationOrder::P0P1 => {
            require_tri3(tgt, order.name())?;
            Ok(interpolate_cell_to_node(src, tgt, options))
        }
        InterpolationOrder::P1P0 => {
            require_tri3(src, order.name())?;
            Ok(interpolate_node_to_cell(src, tgt, options))
        }
        InterpolationOrder::P1P1 => {
            require_tri3(src, order.name())?;
            require_tri3(tgt, order.name())?;
            Ok(interpolate_node_to_node(src, tgt, options))
        }
    }
}

fn require_tri3(mesh: &Mesh<2>, order: &'static str) -> Result<(), MeshError> {
    for c in 0..mesh.nb_cells() {
        if mesh.cell_type(c) != CellType::Tri3 {
            return Err(MeshError::UnsupportedOrder(order));
        }
    }
    Ok(())
}

/// The three barycentric dual cells of a triangle: for each node, the quad
/// spanned by the node, the two adjacent edge midpoints and the barycenter.
/// Each keeps the orientation of the triangle and a third of its area.
fn dual_cells(mesh: &Mesh<2>, cell: usize) -> [([f64; 8], usize); 3] {
    let nodes = mesh.cell_nodes(cell);
    let coords = mesh.cell_coords(cell);
    let g = barycenter(&coords);
    let mid = |a: usize, b: usize| {
        [
            0.5 * (coords[2 * a] + coords[2 * b]),
            0.5 * (coords[2 * a + 1] + coords[2 * b + 1]),
        ]
    };
    let mut out = [([0.0; 8], 0); 3];
    for i in 0..3 {
        let prev = mid((i + 2) % 3, i);
        let next = mid(i, (i + 1) % 3);
        out[i] = (
            [
                coords[2 * i],
                coords[2 * i + 1],
                next[0],
                next[1],
                g[0],
                g[1],
                prev[0],
                prev[1],
            ],
            nodes[i],
        );
    }
    out
}

/// P0P1: rows are source cells, columns are target nodes; each target
/// triangle contributes through its three dual cells.
fn interpolate_cell_to_node(
    src: &Mesh<2>,
    tgt: &Mesh<2>,
    options: &InterpolationOptions,
) -> IntersectionMatrix {
    let run = PlanarRun::new(src, tgt, options);
    let mut matrix = IntersectionMatrix::new(src.nb_cells());
    for i in 0..src.nb_cells() {
        let coords_a = src.cell_coords(i);
        let sign_a = src.cell_area(i).signum();
        for j in run.tree.get_intersecting_elems(&src.cell_bounding_box(i)) {
            let sign_b = tgt.cell_area(j).signum();
            for (quad, node) in dual_cells(tgt, j) {
                let area = run.intersection_area(&coords_a, &quad);
                if let Some(m) = run.oriented_measure(area, sign_a, sign_b) {
                    matrix.add(i, node, m);
                }
            }
        }
    }
    matrix.prune_below(run.threshold());
    debug!(
        "planar P0P1 build: {} cells x {} nodes, {} entries",
        src.nb_cells(),
        tgt.nb_nodes(),
        matrix.nb_entries()
    );
    matrix
}

/// P1P0: rows are source nodes, columns are target cells; each source
/// triangle distributes its overlaps through its three dual cells.
fn interpolate_node_to_cell(
    src: &Mesh<2>,
    tgt: &Mesh<2>,
    options: &InterpolationOptions,
) -> IntersectionMatrix {
    let run = PlanarRun::new(src, tgt, options);
    let mut matrix = IntersectionMatrix::new(src.nb_nodes());
    for i in 0..src.nb_cells() {
        let sign_a = src.cell_area(i).signum();
        let duals = dual_cells(src, i);
        for j in run.tree.get_intersecting_elems(&src.cell_bounding_box(i)) {
            let coords_b = tgt.cell_coords(j);
            let sign_b = tgt.cell_area(j).signum();
            for (quad, node) in &duals {
                let area = run.intersection_area(quad, &coords_b);
                if let Some(m) = run.oriented_measure(area, sign_a, sign_b) {
                    matrix.add(*node, j, m);
                }
            }
        }
    }
    matrix.prune_below(run.threshold());
    debug!(
        "planar P1P0 build: {} nodes x {} cells, {} entries",
        src.nb_nodes(),
        tgt.nb_cells(),
        matrix.nb_entries()
    );
    matrix
}

/// P1P1: rows are source nodes, columns are target nodes; every overlap is
/// the intersection of one source dual cell with one target dual cell.
fn interpolate_node_to_node(
    src: &Mesh<2>,
    tgt: &Mesh<2>,
    options: &InterpolationOptions,
) -> IntersectionMatrix {
    let run = PlanarRun::new(src, tgt, options);
    let mut matrix = IntersectionMatrix::new(src.nb_nodes());
    for i in 0..src.nb_cells() {
        let sign_a = src.cell_area(i).signum();
        let duals_a = dual_cells(src, i);
        for j in run.tree.get_intersecting_elems(&src.cell_bounding_box(i)) {
            let sign_b = tgt.cell_area(j).signum();
            let duals_b = dual_cells(tgt, j);
            for (quad_a, node_a) in &duals_a {
                for (quad_b, node_b) in &duals_b {
                    let area = run.intersection_area(quad_a, quad_b);
                    if let Some(m) = run.oriented_measure(area, sign_a, sign_b) {
                        matrix.add(*node_a, *node_b, m);
                    }
                }
            }
        }
    }
    matrix.prune_below(run.threshold());
    debug!(
        "planar P1P1 build: {} nodes x {} nodes, {} entries",
        src.nb_nodes(),
        tgt.nb_nodes(),
        matrix.nb_entries()
    );
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_mesh(x0: f64, y0: f64, side: f64) -> Mesh<2> {
        let mut mesh = Mesh::<2>::new(vec![
            x0,
            y0,
            x0 + side,
            y0,
            x0 + side,
            y0 + side,
            x0,
            y0 + side,
        ])
        .unwrap();
        mesh.add_cell(CellType::Quad4, &[0, 1, 2, 3]).unwrap();
        mesh
    }

    fn two_triangle_square() -> Mesh<2> {
        let mut mesh = Mesh::<2>::new(vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]).unwrap();
        mesh.add_cell(CellType::Tri3, &[0, 1, 2]).unwrap();
        mesh.add_cell(CellType::Tri3, &[0, 2, 3]).unwrap();
        mesh
    }

    #[test]
    fn quarter_overlap_all_strategies() {
        let src = square_mesh(0.0, 0.0, 1.0);
        let tgt = square_mesh(0.5, 0.5, 1.0);
        for strategy in [
            IntersectionType::Triangulation,
            IntersectionType::Convex,
            IntersectionType::Geometric2D,
        ] {
            let options = InterpolationOptions {
                intersection_type: strategy,
                ..Default::default()
            };
            let matrix = interpolate_planar(&src, &tgt, &options);
            assert_eq!(matrix.row(0).len(), 1, "{strategy:?}");
            assert!((matrix.get(0, 0).unwrap() - 0.25).abs() < 1e-12, "{strategy:?}");
        }
    }

    #[test]
    fn disjoint_meshes_yield_empty_rows() {
        let src = square_mesh(0.0, 0.0, 1.0);
        let tgt = square_mesh(10.0, 10.0, 1.0);
        let matrix = interpolate_planar(&src, &tgt, &InterpolationOptions::default());
        assert_eq!(matrix.nb_entries(), 0);
    }

    #[test]
    fn dual_cells_cover_the_triangle() {
        let mesh = two_triangle_square();
        let total: f64 = dual_cells(&mesh, 0)
            .iter()
            .map(|(quad, _)| signed_polygon_area(quad))
            .sum();
        assert!((total - mesh.cell_area(0)).abs() < 1e-12);
        for (quad, _) in dual_cells(&mesh, 0) {
            assert!(signed_polygon_area(&quad) > 0.0);
        }
    }

    #[test]
    fn cell_to_node_rows_conserve_area() {
        let src = square_mesh(0.0, 0.0, 1.0);
        let tgt = two_triangle_square();
        let matrix = interpolate(
            &src,
            &tgt,
            InterpolationOrder::P0P1,
            &InterpolationOptions::default(),
        )
        .unwrap();
        // the whole square is covered by the dual cells of the two triangles
        assert!((matrix.row_sum(0) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn node_to_cell_rows_sum_to_dual_areas() {
        let src = two_triangle_square();
        let tgt = square_mesh(0.0, 0.0, 1.0);
        let matrix = interpolate(
            &src,
            &tgt,
            InterpolationOrder::P1P0,
            &InterpolationOptions::default(),
        )
        .unwrap();
        assert_eq!(matrix.nb_rows(), src.nb_nodes());
        let total: f64 = (0..matrix.nb_rows()).map(|i| matrix.row_sum(i)).sum();
        assert!((total - 1.0).abs() < 1e-10);
    }

    #[test]
    fn node_to_node_rows_sum_to_dual_areas() {
        let mesh = two_triangle_square();
        let matrix = interpolate(
            &mesh,
            &mesh,
            InterpolationOrder::P1P1,
            &InterpolationOptions::default(),
        )
        .unwrap();
        assert_eq!(matrix.nb_rows(), mesh.nb_nodes());
        // nodes 0 and 2 belong to both triangles, 1 and 3 to one each
        let expected = [1.0 / 3.0, 1.0 / 6.0, 1.0 / 3.0, 1.0 / 6.0];
        for (n, &area) in expected.iter().enumerate() {
            assert!((matrix.row_sum(n) - area).abs() < 1e-10, "node {n}");
        }
        let total: f64 = (0..matrix.nb_rows()).map(|i| matrix.row_sum(i)).sum();
        assert!((total - 1.0).abs() < 1e-10);
    }

    #[test]
    fn quad_mesh_rejected_for_nodal_orders() {
        let src = square_mesh(0.0, 0.0, 1.0);
        let tgt = square_mesh(0.0, 0.0, 1.0);
        let err = interpolate(
            &src,
            &tgt,
            InterpolationOrder::P0P1,
            &InterpolationOptions::default(),
        );
        assert_eq!(err.unwrap_err(), MeshError::UnsupportedOrder("P0P1"));
        let err = interpolate(
            &src,
            &tgt,
            InterpolationOrder::P1P1,
            &InterpolationOptions::default(),
        );
        assert_eq!(err.unwrap_err(), MeshError::UnsupportedOrder("P1P1"));
    }

    #[test]
    fn orientation_filter_drops_mismatched_signs() {
        let src = square_mesh(0.0, 0.0, 1.0);
        // clockwise target cell
        let mut tgt = Mesh::<2>::new(vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]).unwrap();
        tgt.add_cell(CellType::Quad4, &[3, 2, 1, 0]).unwrap();

        let mut options = InterpolationOptions {
            orientation: 1,
            ..Default::default()
        };
        assert_eq!(interpolate_planar(&src, &tgt, &options).nb_entries(), 0);

        options.orientation = -1;
        options.measure_abs = false;
        let matrix = interpolate_planar(&src, &tgt, &options);
        assert!((matrix.get(0, 0).unwrap() + 1.0).abs() < 1e-12);
    }
}
