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

//! Decomposition of 3D target cells into tetrahedra, and the per-tetrahedron
//! worker that accumulates the intersection volume with a source cell face
//! by face.

use std::collections::HashMap;

use crate::error::MeshError;
use crate::mesh::{CellType, Mesh};
use crate::options::SplittingPolicy;
use crate::tetra::affine::TetraAffineTransform;
use crate::tetra::triangle::TransformedTriangle;

/// Volume contributions smaller than this are dropped before scaling back
/// to real space.
const SPARSE_TRUNCATION_LIMIT: f64 = 1.0e-14;

/// One tetrahedron of a target-cell decomposition, by corner coordinates.
pub struct SplitTetra {
    pub corners: [[f64; 3]; 4],
}

/// A triangular face identified by its three global node ids, independent
/// of orientation. Lets a face shared by two neighbouring source cells be
/// recognised the second time it is met.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TriangleFaceKey {
    nodes: [usize; 3],
}

impl TriangleFaceKey {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        let mut nodes = [a, b, c];
        nodes.sort_unstable();
        TriangleFaceKey { nodes }
    }
}

// Corner indices of the tetrahedra for each fixed decomposition. The two
// hexahedron variants tile the cell along planar diagonal cuts; the pyramid
// and wedge splits are policy-independent.
const SPLIT_PYRA5: [[usize; 4]; 2] = [[0, 1, 2, 4], [0, 2, 3, 4]];
const SPLIT_PENTA6: [[usize; 4]; 3] = [[0, 1, 2, 3], [3, 5, 4, 2], [4, 2, 1, 3]];
const SPLIT_HEXA8_PLANAR_5: [[usize; 4]; 5] = [
    [0, 1, 3, 4],
    [1, 2, 3, 6],
    [1, 4, 5, 6],
    [3, 4, 6, 7],
    [1, 3, 4, 6],
];
const SPLIT_HEXA8_PLANAR_6: [[usize; 4]; 6] = [
    [0, 1, 2, 6],
    [0, 2, 3, 6],
    [0, 3, 7, 6],
    [0, 7, 4, 6],
    [0, 4, 5, 6],
    [0, 5, 1, 6],
];

/// Hexahedron faces in outward order: bottom, top, then the four sides.
const HEXA8_FACES: [[usize; 4]; 6] = [
    [0, 3, 2, 1],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [1, 2, 6, 5],
    [2, 3, 7, 6],
    [3, 0, 4, 7],
];

/// Hexahedron edges, for the 48-tetra refinement.
const HEXA8_EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

// Sub-hexahedra of the octant refinement, over the 27-point set built from
// the corners (0-7), edge midpoints (8-19), face centres (20-25) and cell
// centre (26).
const HEXA8_OCTANTS: [[usize; 8]; 8] = [
    [0, 8, 20, 11, 16, 22, 26, 25],
    [1, 9, 20, 8, 17, 23, 26, 22],
    [2, 10, 20, 9, 18, 24, 26, 23],
    [3, 11, 20, 10, 19, 25, 26, 24],
    [16, 22, 26, 25, 4, 12, 21, 15],
    [17, 23, 26, 22, 5, 13, 21, 12],
    [18, 24, 26, 23, 6, 14, 21, 13],
    [19, 25, 26, 24, 7, 15, 21, 14],
];

/// Decompose a 3D cell into tetrahedra. Tetrahedra keep the orientation of
/// the cell; `policy` only affects hexahedra.
pub fn split_into_tetras(
    cell_type: CellType,
    nodes: &[usize],
    coords: &[f64],
    policy: SplittingPolicy,
) -> Result<Vec<SplitTetra>, MeshError> {
    let node = |i: usize| -> [f64; 3] {
        let n = nodes[i];
        [coords[3 * n], coords[3 * n + 1], coords[3 * n + 2]]
    };
    match cell_type {
        CellType::Tetra4 => Ok(vec![SplitTetra {
            corners: [node(0), node(1), node(2), node(3)],
        }]),
        CellType::Pyra5 => Ok(tetras_from_tables(&SPLIT_PYRA5, &node)),
        CellType::Penta6 => Ok(tetras_from_tables(&SPLIT_PENTA6, &node)),
        CellType::Hexa8 => match policy {
            SplittingPolicy::PlanarFace5 => Ok(tetras_from_tables(&SPLIT_HEXA8_PLANAR_5, &node)),
            SplittingPolicy::PlanarFace6 => Ok(tetras_from_tables(&SPLIT_HEXA8_PLANAR_6, &node)),
            SplittingPolicy::General24 => Ok(split_hexa8_24(&node)),
            SplittingPolicy::General48 => Ok(split_hexa8_48(&node)),
        },
        other => Err(MeshError::UnsupportedCellType(other.name(), 3)),
    }
}

fn tetras_from_tables<const M: usize>(
    tables: &[[usize; 4]; M],
    node: &impl Fn(usize) -> [f64; 3],
) -> Vec<SplitTetra> {
    tables
        .iter()
        .map(|t| SplitTetra {
            corners: [node(t[0]), node(t[1]), node(t[2]), node(t[3])],
        })
        .collect()
}

fn barycenter(points: &[[f64; 3]]) -> [f64; 3] {
    let mut c = [0.0; 3];
    for p in points {
        for i in 0..3 {
            c[i] += p[i];
        }
    }
    for v in &mut c {
        *v /= points.len() as f64;
    }
    c
}

fn midpoint(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        0.5 * (a[0] + b[0]),
        0.5 * (a[1] + b[1]),
        0.5 * (a[2] + b[2]),
    ]
}

/// Four tetrahedra per face, fanned from the face centre to the cell centre.
fn split_hexa8_24(node: &impl Fn(usize) -> [f64; 3]) -> Vec<SplitTetra> {
    let face_centers: Vec<[f64; 3]> = HEXA8_FACES
        .iter()
        .map(|f| barycenter(&[node(f[0]), node(f[1]), node(f[2]), node(f[3])]))
        .collect();
    let cell_center = barycenter(&face_centers);

    let mut out = Vec::with_capacity(24);
    for (face, center) in HEXA8_FACES.iter().zip(&face_centers) {
        for j in 0..4 {
            out.push(SplitTetra {
                corners: [
                    node(face[j]),
                    node(face[(j + 1) % 4]),
                    *center,
                    cell_center,
                ],
            });
        }
    }
    out
}

/// Octant refinement: the cell is cut into 8 sub-hexahedra through the edge
/// midpoints, face centres and cell centre, each split into 6 tetrahedra.
fn split_hexa8_48(node: &impl Fn(usize) -> [f64; 3]) -> Vec<SplitTetra> {
    let mut points = [[0.0f64; 3]; 27];
    for i in 0..8 {
        points[i] = node(i);
    }
    for (e, edge) in HEXA8_EDGES.iter().enumerate() {
        points[8 + e] = midpoint(&points[edge[0]], &points[edge[1]]);
    }
    for (f, face) in HEXA8_FACES.iter().enumerate() {
        points[20 + f] = barycenter(&[
            points[face[0]],
            points[face[1]],
            points[face[2]],
            points[face[3]],
        ]);
    }
    points[26] = barycenter(&points[0..8]);

    let mut out = Vec::with_capacity(48);
    for octant in &HEXA8_OCTANTS {
        for t in &SPLIT_HEXA8_PLANAR_6 {
            out.push(SplitTetra {
                corners: [
                    points[octant[t[0]]],
                    points[octant[t[1]]],
                    points[octant[t[2]]],
                    points[octant[t[3]]],
                ],
            });
        }
    }
    out
}

/// Faces of the source cell types, fan-triangulated from their first node
/// when quadrangular. Outward orientation for a positively oriented cell.
fn source_faces(cell_type: CellType) -> &'static [&'static [usize]] {
    match cell_type {
        CellType::Tetra4 => &[&[0, 1, 2], &[0, 3, 1], &[1, 3, 2], &[2, 3, 0]],
        CellType::Pyra5 => &[
            &[0, 1, 2, 3],
            &[0, 4, 1],
            &[1, 4, 2],
            &[2, 4, 3],
            &[3, 4, 0],
        ],
        CellType::Penta6 => &[
            &[0, 1, 2],
            &[3, 5, 4],
            &[0, 3, 4, 1],
            &[1, 4, 5, 2],
            &[2, 5, 3, 0],
        ],
        CellType::Hexa8 => &[
            &[0, 3, 2, 1],
            &[4, 5, 6, 7],
            &[0, 1, 5, 4],
            &[1, 2, 6, 5],
            &[2, 3, 7, 6],
            &[3, 0, 4, 7],
        ],
        _ => &[],
    }
}

/// One target tetrahedron armed with its affine transform and the per-node
/// and per-face caches shared by all source cells tested against it.
pub struct TargetTetra {
    transform: TetraAffineTransform,
    nodes: HashMap<usize, [f64; 3]>,
    volumes: HashMap<TriangleFaceKey, f64>,
}

impl TargetTetra {
    /// `None` when the tetrahedron is (nearly) flat and cannot intersect
    /// anything with nonzero volume.
    pub fn new(corners: &[[f64; 3]; 4]) -> Option<Self> {
        let transform =
            TetraAffineTransform::new([&corners[0], &corners[1], &corners[2], &corners[3]]);
        if transform.determinant() == 0.0 {
            return None;
        }
        Some(TargetTetra {
            transform,
            nodes: HashMap::new(),
            volumes: HashMap::new(),
        })
    }

    fn transformed_node(&mut self, mesh: &Mesh<3>, node: usize) -> [f64; 3] {
        match self.nodes.get(&node) {
            Some(pt) => *pt,
            None => {
                let mut pt = [0.0; 3];
                self.transform.apply(&mut pt, mesh.node(node));
                self.nodes.insert(node, pt);
                pt
            }
        }
    }

    /// All nodes on the far side of one of the eight bounding halfspaces of
    /// the unit tetrahedron means no intersection is possible.
    fn is_outside(points: &[[f64; 3]]) -> bool {
        let mut outside = [true; 8];
        for pt in points {
            let (x, y, z) = (pt[0], pt[1], pt[2]);
            let h = 1.0 - x - y - z;
            outside[0] &= x <= 0.0;
            outside[1] &= x >= 1.0;
            outside[2] &= y <= 0.0;
            outside[3] &= y >= 1.0;
            outside[4] &= z <= 0.0;
            outside[5] &= z >= 1.0;
            outside[6] &= h <= 0.0;
            outside[7] &= h >= 1.0;
        }
        outside.iter().any(|&o| o)
    }

    /// Volume of the intersection between this tetrahedron and one source
    /// cell, in real space. The faces of the source cell are triangulated
    /// and each triangle contributes the signed volume between itself and
    /// the reference facets; a face already met through a neighbouring
    /// source cell reappears with the opposite orientation, so the cached
    /// value is subtracted instead of recomputed.
    pub fn intersect_source_cell(&mut self, mesh: &Mesh<3>, cell: usize) -> f64 {
        let cell_nodes = mesh.cell_nodes(cell);
        let points: Vec<[f64; 3]> = cell_nodes
            .iter()
            .map(|&n| self.transformed_node(mesh, n))
            .collect();
        if Self::is_outside(&points) {
            return 0.0;
        }

        let mut total = 0.0;
        for face in source_faces(mesh.cell_type(cell)) {
            for j in 1..face.len() - 1 {
                let (a, b, c) = (face[0], face[j], face[j + 1]);
                let key = TriangleFaceKey::new(cell_nodes[a], cell_nodes[b], cell_nodes[c]);
                match self.volumes.get(&key) {
                    Some(&cached) => total -= cached,
                    None => {
                        let mut tri =
                            TransformedTriangle::new(&points[a], &points[b], &points[c]);
                        let vol = tri.calculate_intersection_volume();
                        total += vol;
                        self.volumes.insert(key, vol);
                    }
                }
            }
        }

        if total.abs() < SPARSE_TRUNCATION_LIMIT {
            total = 0.0;
        }
        (total / self.transform.determinant()).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::tetra_volume;

    fn unit_cube_coords() -> Vec<f64> {
        vec![
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0,
        ]
    }

    fn split_cube(policy: SplittingPolicy) -> Vec<SplitTetra> {
        split_into_tetras(
            CellType::Hexa8,
            &[0, 1, 2, 3, 4, 5, 6, 7],
            &unit_cube_coords(),
            policy,
        )
        .unwrap()
    }

    #[test]
    fn hexa_splits_conserve_volume() {
        for (policy, count) in [
            (SplittingPolicy::PlanarFace5, 5),
            (SplittingPolicy::PlanarFace6, 6),
            (SplittingPolicy::General24, 24),
            (SplittingPolicy::General48, 48),
        ] {
            let tetras = split_cube(policy);
            assert_eq!(tetras.len(), count);
            let vol: f64 = tetras.iter().map(|t| tetra_volume(&t.corners).abs()).sum();
            assert!((vol - 1.0).abs() < 1e-12, "{policy:?}: {vol}");
        }
    }

    #[test]
    fn wedge_split_conserves_volume() {
        // prism over the unit triangle, height 1, volume 1/2
        let coords = vec![
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0,
        ];
        let tetras = split_into_tetras(
            CellType::Penta6,
            &[0, 1, 2, 3, 4, 5],
            &coords,
            SplittingPolicy::PlanarFace5,
        )
        .unwrap();
        assert_eq!(tetras.len(), 3);
        let vol: f64 = tetras.iter().map(|t| tetra_volume(&t.corners).abs()).sum();
        assert!((vol - 0.5).abs() < 1e-12);
    }

    #[test]
    fn face_key_ignores_orientation() {
        assert_eq!(TriangleFaceKey::new(5, 2, 9), TriangleFaceKey::new(9, 5, 2));
        assert_ne!(TriangleFaceKey::new(5, 2, 9), TriangleFaceKey::new(5, 2, 8));
    }

    fn unit_tetra_mesh() -> Mesh<3> {
        let mut mesh = Mesh::<3>::new(vec![
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0,
        ])
        .unwrap();
        mesh.add_cell(CellType::Tetra4, &[0, 1, 2, 3]).unwrap();
        mesh
    }

    #[test]
    fn tetra_self_intersection_is_its_volume() {
        let mesh = unit_tetra_mesh();
        let corners = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ];
        let mut target = TargetTetra::new(&corners).unwrap();
        let vol = target.intersect_source_cell(&mesh, 0);
        assert!((vol - 1.0 / 6.0).abs() < 1e-10, "{vol}");
    }

    #[test]
    fn disjoint_source_cell_gives_zero() {
        let mut mesh = Mesh::<3>::new(vec![
            5.0, 5.0, 5.0, 6.0, 5.0, 5.0, 5.0, 6.0, 5.0, 5.0, 5.0, 6.0,
        ])
        .unwrap();
        mesh.add_cell(CellType::Tetra4, &[0, 1, 2, 3]).unwrap();
        let corners = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ];
        let mut target = TargetTetra::new(&corners).unwrap();
        assert_eq!(target.intersect_source_cell(&mesh, 0), 0.0);
    }

    #[test]
    fn flat_target_tetra_is_rejected() {
        let corners = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.5, 0.5, 0.0],
        ];
        assert!(TargetTetra::new(&corners).is_none());
    }

    #[test]
    fn planar_cell_type_is_rejected() {
        let err = split_into_tetras(
            CellType::Tri3,
            &[0, 1, 2],
            &unit_cube_coords(),
            SplittingPolicy::PlanarFace5,
        );
        assert!(matches!(err, Err(MeshError::UnsupportedCellType(..))));
    }
}
