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

//! End-to-end matrix properties: reflexivity, non-negativity, conservation
//! on covering meshes, and a documented robustness gap for hexahedra in
//! general position.

use approx::assert_relative_eq;
use intermesh::interp::{interpolate_planar, interpolate_volumes};
use intermesh::mesh::{CellType, Mesh};
use intermesh::options::InterpolationOptions;

/// Regular nx x ny quad grid over `[0, lx] x [0, ly]`.
fn quad_grid(nx: usize, ny: usize, lx: f64, ly: f64) -> Mesh<2> {
    let mut coords = Vec::new();
    for j in 0..=ny {
        for i in 0..=nx {
            coords.push(lx * i as f64 / nx as f64);
            coords.push(ly * j as f64 / ny as f64);
        }
    }
    let mut mesh = Mesh::<2>::new(coords).unwrap();
    for j in 0..ny {
        for i in 0..nx {
            let n = j * (nx + 1) + i;
            mesh.add_cell(CellType::Quad4, &[n, n + 1, n + nx + 2, n + nx + 1])
                .unwrap();
        }
    }
    mesh
}

/// Regular nx x ny x nz hexahedral grid over `[0, l]^3`.
fn hexa_grid(nx: usize, ny: usize, nz: usize, l: f64) -> Mesh<3> {
    let mut coords = Vec::new();
    for k in 0..=nz {
        for j in 0..=ny {
            for i in 0..=nx {
                coords.push(l * i as f64 / nx as f64);
                coords.push(l * j as f64 / ny as f64);
                coords.push(l * k as f64 / nz as f64);
            }
        }
    }
    let mut mesh = Mesh::<3>::new(coords).unwrap();
    let layer = (nx + 1) * (ny + 1);
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                let n = k * layer + j * (nx + 1) + i;
                mesh.add_cell(
                    CellType::Hexa8,
                    &[
                        n,
                        n + 1,
                        n + nx + 2,
                        n + nx + 1,
                        n + layer,
                        n + layer + 1,
                        n + layer + nx + 2,
                        n + layer + nx + 1,
                    ],
                )
                .unwrap();
            }
        }
    }
    mesh
}

#[test]
fn planar_reflexivity() {
    let mesh = quad_grid(3, 3, 1.0, 1.0);
    let matrix = interpolate_planar(&mesh, &mesh, &InterpolationOptions::default());
    for i in 0..mesh.nb_cells() {
        assert_relative_eq!(matrix.get(i, i).unwrap(), mesh.cell_area(i), epsilon = 1e-10);
        assert_relative_eq!(matrix.row_sum(i), mesh.cell_area(i), epsilon = 1e-10);
    }
}

#[test]
fn planar_conservation_on_covering_grids() {
    // 3x3 and 2x2 grids over the same square
    let src = quad_grid(3, 3, 1.0, 1.0);
    let tgt = quad_grid(2, 2, 1.0, 1.0);
    let matrix = interpolate_planar(&src, &tgt, &InterpolationOptions::default());
    for i in 0..src.nb_cells() {
        assert_relative_eq!(matrix.row_sum(i), src.cell_area(i), epsilon = 1e-10);
    }
    for row in matrix.rows() {
        for &(_, m) in row {
            assert!(m >= 0.0);
        }
    }
}

#[test]
fn volume_reflexivity() {
    let mesh = hexa_grid(2, 2, 2, 1.0);
    let matrix = interpolate_volumes(&mesh, &mesh, &InterpolationOptions::default()).unwrap();
    for i in 0..mesh.nb_cells() {
        assert_relative_eq!(
            matrix.get(i, i).unwrap(),
            mesh.cell_volume(i).unwrap(),
            epsilon = 1e-9
        );
    }
}

#[test]
fn volume_conservation_on_covering_grids() {
    let src = hexa_grid(2, 2, 2, 1.0);
    let tgt = hexa_grid(3, 3, 3, 1.0);
    let matrix = interpolate_volumes(&src, &tgt, &InterpolationOptions::default()).unwrap();
    for i in 0..src.nb_cells() {
        assert_relative_eq!(
            matrix.row_sum(i),
            src.cell_volume(i).unwrap(),
            epsilon = 1e-8
        );
    }
    for row in matrix.rows() {
        for &(_, m) in row {
            assert!(m >= 0.0);
        }
    }
}

#[test]
fn covering_boxes_overlap_volume() {
    // [0,2]^3 against [1,3]^3: shared cube of volume 1
    let src = hexa_grid(1, 1, 1, 2.0);
    let mut coords = Vec::new();
    for k in 0..=1 {
        for j in 0..=1 {
            for i in 0..=1 {
                coords.push(1.0 + 2.0 * i as f64);
                coords.push(1.0 + 2.0 * j as f64);
                coords.push(1.0 + 2.0 * k as f64);
            }
        }
    }
    let mut tgt = Mesh::<3>::new(coords).unwrap();
    tgt.add_cell(CellType::Hexa8, &[0, 1, 3, 2, 4, 5, 7, 6])
        .unwrap();
    let matrix = interpolate_volumes(&src, &tgt, &InterpolationOptions::default()).unwrap();
    assert_relative_eq!(matrix.get(0, 0).unwrap(), 1.0, epsilon = 1e-9);
}

/// Transpose consistency of A->B against B->A for hexahedra moved into
/// general (non-axis-aligned) position. Known to fail for some cells; kept
/// as a documented robustness gap rather than silently patched.
#[test]
#[ignore]
fn symmetry_moved_hexa_boxes() {
    let shear = |mesh: &Mesh<3>| -> Mesh<3> {
        let mut coords = mesh.coords().to_vec();
        for p in coords.chunks_exact_mut(3) {
            p[0] += 0.1 * p[1] + 0.05 * p[2];
            p[1] += 0.07 * p[2];
        }
        let mut out = Mesh::<3>::new(coords).unwrap();
        for c in 0..mesh.nb_cells() {
            out.add_cell(mesh.cell_type(c), mesh.cell_nodes(c)).unwrap();
        }
        out
    };
    let a = shear(&hexa_grid(2, 2, 2, 1.0));
    let b = shear(&hexa_grid(3, 3, 3, 1.0));
    let options = InterpolationOptions::default();
    let ab = interpolate_volumes(&a, &b, &options).unwrap();
    let ba = interpolate_volumes(&b, &a, &options).unwrap();
    for i in 0..ab.nb_rows() {
        for &(j, m) in ab.row(i) {
            let back = ba.get(j, i).unwrap_or(0.0);
            assert_relative_eq!(m, back, epsilon = 1e-9);
        }
    }
}
