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

//! Volume (3D) matrix build. Each target cell is decomposed into
//! tetrahedra; each candidate source cell is intersected against every
//! tetrahedron of the decomposition and the volumes are summed. Per-target
//! caches (node transforms, shared-face volumes) live for the whole scan of
//! one target cell.

use log::{debug, trace};

use crate::error::MeshError;
use crate::geometry::bbtree::BBTree;
use crate::interp::matrix::IntersectionMatrix;
use crate::mesh::Mesh;
use crate::options::InterpolationOptions;
use crate::tetra::splitter::{TargetTetra, split_into_tetras};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Cell-to-cell (P0P0) intersection matrix between two volumic meshes: one
/// row per source cell, one entry per target cell with overlap volume at
/// least `precision * dim_caracteristic^3`.
pub fn interpolate_volumes(
    src: &Mesh<3>,
    tgt: &Mesh<3>,
    options: &InterpolationOptions,
) -> Result<IntersectionMatrix, MeshError> {
    let dim_caracteristic = src
        .characteristic_dimension()
        .max(tgt.characteristic_dimension());
    let adjustment =
        options.bounding_box_adjustment * dim_caracteristic + options.bounding_box_adjustment_abs;
    let boxes = (0..src.nb_cells())
        .map(|c| src.cell_bounding_box(c))
        .collect();
    let tree = BBTree::new(boxes, adjustment);

    #[cfg(feature = "parallel")]
    let columns: Vec<Vec<(usize, f64)>> = (0..tgt.nb_cells())
        .into_par_iter()
        .map(|j| target_column(src, tgt, &tree, options, j))
        .collect::<Result<_, _>>()?;
    #[cfg(not(feature = "parallel"))]
    let columns: Vec<Vec<(usize, f64)>> = (0..tgt.nb_cells())
        .map(|j| target_column(src, tgt, &tree, options, j))
        .collect::<Result<_, _>>()?;

    let mut matrix = IntersectionMatrix::new(src.nb_cells());
    for (j, column) in columns.into_iter().enumerate() {
        for (i, vol) in column {
            matrix.add(i, j, vol);
        }
    }
    matrix.prune_below(options.precision * dim_caracteristic.powi(3));
    debug!(
        "volume build: {} x {} cells, {} entries",
        src.nb_cells(),
        tgt.nb_cells(),
        matrix.nb_entries()
    );
    Ok(matrix)
}

/// Overlap volumes of one target cell with every candidate source cell,
/// as `(source cell, volume)` pairs.
fn target_column(
    src: &Mesh<3>,
    tgt: &Mesh<3>,
    tree: &BBTree<3>,
    options: &InterpolationOptions,
    j: usize,
) -> Result<Vec<(usize, f64)>, MeshError> {
    let split = split_into_tetras(
        tgt.cell_type(j),
        tgt.cell_nodes(j),
        tgt.coords(),
        options.splitting_policy,
    )?;
    let mut tetras: Vec<TargetTetra> = split
        .iter()
        .filter_map(|t| TargetTetra::new(&t.corners))
        .collect();

    let mut column = Vec::new();
    for i in tree.get_intersecting_elems(&tgt.cell_bounding_box(j)) {
        let mut vol = 0.0;
        for tetra in &mut tetras {
            vol += tetra.intersect_source_cell(src, i);
        }
        trace!("cells {i} x {j}: volume {vol:.6e}");
        if vol > 0.0 {
            column.push((i, vol));
        }
    }
    Ok(column)
}
