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

//! Unstructured meshes over flat coordinate and connectivity arrays. A
//! mesh holds nodes in `N`-dimensional space and cells referencing them;
//! the cell list is heterogeneous, mixing any of the types valid for the
//! mesh dimension.

use crate::error::MeshError;
use crate::geometry::aabb::BoundingBox;

/// The linear cell types handled by the intersection routines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellType {
    Tri3,
    Quad4,
    /// Planar polygon with an arbitrary number of nodes (at least 3).
    Polygon,
    Tetra4,
    Pyra5,
    Penta6,
    Hexa8,
}

impl CellType {
    pub fn name(&self) -> &'static str {
        match self {
            CellType::Tri3 => "TRI3",
            CellType::Quad4 => "QUAD4",
            CellType::Polygon => "POLYGON",
            CellType::Tetra4 => "TETRA4",
            CellType::Pyra5 => "PYRA5",
            CellType::Penta6 => "PENTA6",
            CellType::Hexa8 => "HEXA8",
        }
    }

    /// Expected node count, `None` for variable-arity cells.
    pub fn nb_nodes(&self) -> Option<usize> {
        match self {
            CellType::Tri3 => Some(3),
            CellType::Quad4 => Some(4),
            CellType::Polygon => None,
            CellType::Tetra4 => Some(4),
            CellType::Pyra5 => Some(5),
            CellType::Penta6 => Some(6),
            CellType::Hexa8 => Some(8),
        }
    }

    /// Topological dimension of the cell.
    pub fn dimension(&self) -> usize {
        match self {
            CellType::Tri3 | CellType::Quad4 | CellType::Polygon => 2,
            _ => 3,
        }
    }
}

/// An unstructured mesh with nodes in `N`-dimensional space. Coordinates
/// are stored interleaved (`N` doubles per node); cell connectivity is a
/// flat index list sliced through an offset table.
pub struct Mesh<const N: usize> {
    coords: Vec<f64>,
    cell_types: Vec<CellType>,
    connectivity: Vec<usize>,
    offsets: Vec<usize>,
}

impl<const N: usize> Mesh<N> {
    /// Empty mesh; populate with [`add_cell`](Self::add_cell).
    pub fn new(coords: Vec<f64>) -> Result<Self, MeshError> {
        if coords.len() % N != 0 {
            return Err(MeshError::CoordinateLengthMismatch {
                len: coords.len(),
                dim: N,
            });
        }
        if let Some(i) = coords.iter().position(|c| !c.is_finite()) {
            return Err(MeshError::NonFiniteCoordinate { index: i / N });
        }
        Ok(Mesh {
            coords,
            cell_types: Vec::new(),
            connectivity: Vec::new(),
            offsets: vec![0],
        })
    }

    /// Append a cell, validating its arity, dimension and node indices.
    pub fn add_cell(&mut self, cell_type: CellType, nodes: &[usize]) -> Result<(), MeshError> {
        let cell = self.cell_types.len();
        if cell_type.dimension() != N {
            return Err(MeshError::UnsupportedCellType(cell_type.name(), N));
        }
        match cell_type.nb_nodes() {
            Some(expected) if nodes.len() != expected => {
                return Err(MeshError::InvalidCellArity {
                    cell,
                    cell_type: cell_type.name(),
                    got: nodes.len(),
                    expected,
                });
            }
            None if nodes.len() < 3 => {
                return Err(MeshError::InvalidCellArity {
                    cell,
                    cell_type: cell_type.name(),
                    got: nodes.len(),
                    expected: 3,
                });
            }
            _ => {}
        }
        let nb_nodes = self.nb_nodes();
        for &node in nodes {
            if node >= nb_nodes {
                return Err(MeshError::NodeIndexOutOfRange {
                    cell,
                    node,
                    nb_nodes,
                });
            }
        }
        self.cell_types.push(cell_type);
        self.connectivity.extend_from_slice(nodes);
        self.offsets.push(self.connectivity.len());
        Ok(())
    }

    pub fn nb_nodes(&self) -> usize {
        self.coords.len() / N
    }

    pub fn nb_cells(&self) -> usize {
        self.cell_types.len()
    }

    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    pub fn node(&self, idx: usize) -> &[f64] {
        &self.coords[N * idx..N * idx + N]
    }

    pub fn cell_type(&self, cell: usize) -> CellType {
        self.cell_types[cell]
    }

    pub fn cell_nodes(&self, cell: usize) -> &[usize] {
        &self.connectivity[self.offsets[cell]..self.offsets[cell + 1]]
    }

    /// Axis-aligned bounding box of a cell.
    pub fn cell_bounding_box(&self, cell: usize) -> BoundingBox<N> {
        BoundingBox::from_indexed_coords(&self.coords, self.cell_nodes(cell))
    }

    /// Bounding box of the whole mesh; `None` for a mesh without nodes.
    pub fn bounding_box(&self) -> Option<BoundingBox<N>> {
        if self.coords.is_empty() {
            return None;
        }
        Some(BoundingBox::from_flat_coords(&self.coords))
    }

    /// Largest bounding-box extent over all axes; the scale against which
    /// relative precisions are measured.
    pub fn characteristic_dimension(&self) -> f64 {
        match self.bounding_box() {
            Some(bbox) => (0..N).fold(0.0, |acc: f64, i| acc.max(bbox.extent(i))),
            None => 0.0,
        }
    }

    /// Cell vertices gathered into a flat `[x0,y0,..., x1,y1,...]` list.
    pub fn cell_coords(&self, cell: usize) -> Vec<f64> {
        let nodes = self.cell_nodes(cell);
        let mut out = Vec::with_capacity(N * nodes.len());
        for &node in nodes {
            out.extend_from_slice(self.node(node));
        }
        out
    }
}

impl Mesh<2> {
    /// Signed area of a planar cell (shoelace over its contour);
    /// positive for counter-clockwise node order.
    pub fn cell_area(&self, cell: usize) -> f64 {
        let nodes = self.cell_nodes(cell);
        let n = nodes.len();
        let mut acc = 0.0;
        for i in 0..n {
            let p = self.node(nodes[i]);
            let q = self.node(nodes[(i + 1) % n]);
            acc += p[0] * q[1] - q[0] * p[1];
        }
        0.5 * acc
    }
}

impl Mesh<3> {
    /// Volume of a cell, as the sum of the volumes of its tetrahedral
    /// decomposition.
    pub fn cell_volume(&self, cell: usize) -> Result<f64, MeshError> {
        let tetras = crate::tetra::splitter::split_into_tetras(
            self.cell_type(cell),
            self.cell_nodes(cell),
            &self.coords,
            crate::options::SplittingPolicy::PlanarFace5,
        )?;
        let mut vol = 0.0;
        for tetra in &tetras {
            vol += tetra_volume(&tetra.corners).abs();
        }
        Ok(vol)
    }
}

/// Unsigned volume of the tetrahedron spanned by four corners.
pub(crate) fn tetra_volume(corners: &[[f64; 3]; 4]) -> f64 {
    let a = sub(&corners[1], &corners[0]);
    let b = sub(&corners[2], &corners[0]);
    let c = sub(&corners[3], &corners[0]);
    let det = a[0] * (b[1] * c[2] - b[2] * c[1]) - a[1] * (b[0] * c[2] - b[2] * c[0])
        + a[2] * (b[0] * c[1] - b[1] * c[0]);
    det / 6.0
}

fn sub(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}
