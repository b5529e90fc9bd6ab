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

use approx::assert_relative_eq;
use intermesh::interp::interpolate_volumes;
use intermesh::mesh::{CellType, Mesh};
use intermesh::options::{InterpolationOptions, SplittingPolicy};

fn unit_tetra() -> Mesh<3> {
    let mut mesh = Mesh::<3>::new(vec![
        0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0,
    ])
    .unwrap();
    mesh.add_cell(CellType::Tetra4, &[0, 1, 2, 3]).unwrap();
    mesh
}

#[test]
fn unit_tetra_self_intersection_is_one_sixth() {
    let mesh = unit_tetra();
    let matrix = interpolate_volumes(&mesh, &mesh, &InterpolationOptions::default()).unwrap();
    assert_relative_eq!(matrix.get(0, 0).unwrap(), 1.0 / 6.0, epsilon = 1e-10);
}

#[test]
fn translated_tetra_overlap() {
    // both tetras contain the region x,y,z >= 0.2 of the shifted simplex
    let a = unit_tetra();
    let mut b = Mesh::<3>::new(vec![
        0.2, 0.2, 0.2, 1.2, 0.2, 0.2, 0.2, 1.2, 0.2, 0.2, 0.2, 1.2,
    ])
    .unwrap();
    b.add_cell(CellType::Tetra4, &[0, 1, 2, 3]).unwrap();
    let matrix = interpolate_volumes(&a, &b, &InterpolationOptions::default()).unwrap();
    // overlap is the simplex x,y,z >= 0.2, x+y+z <= 1: side 0.4, volume 0.4^3/6
    assert_relative_eq!(
        matrix.get(0, 0).unwrap(),
        0.4f64.powi(3) / 6.0,
        epsilon = 1e-9
    );
}

#[test]
fn tetra_against_containing_hexa() {
    let tetra = unit_tetra();
    let mut hexa = Mesh::<3>::new(vec![
        0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0,
    ])
    .unwrap();
    hexa.add_cell(CellType::Hexa8, &[0, 1, 2, 3, 4, 5, 6, 7])
        .unwrap();

    for policy in [
        SplittingPolicy::PlanarFace5,
        SplittingPolicy::PlanarFace6,
        SplittingPolicy::General24,
        SplittingPolicy::General48,
    ] {
        let options = InterpolationOptions {
            splitting_policy: policy,
            ..Default::default()
        };
        let matrix = interpolate_volumes(&tetra, &hexa, &options).unwrap();
        assert_relative_eq!(matrix.get(0, 0).unwrap(), 1.0 / 6.0, epsilon = 1e-9);
    }
}

#[test]
fn pyramid_and_wedge_sources() {
    // pyramid and wedge tiling the unit cube with volumes 1/3 and 1/2 checked
    // against a target cube that contains them
    let mut src = Mesh::<3>::new(vec![
        0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0, //
        0.5, 0.5, 0.5,
    ])
    .unwrap();
    src.add_cell(CellType::Pyra5, &[0, 3, 2, 1, 8]).unwrap();
    src.add_cell(CellType::Penta6, &[0, 1, 3, 4, 5, 7]).unwrap();

    let mut tgt = Mesh::<3>::new(vec![
        -1.0, -1.0, -1.0, 2.0, -1.0, -1.0, 2.0, 2.0, -1.0, -1.0, 2.0, -1.0, //
        -1.0, -1.0, 2.0, 2.0, -1.0, 2.0, 2.0, 2.0, 2.0, -1.0, 2.0, 2.0,
    ])
    .unwrap();
    tgt.add_cell(CellType::Hexa8, &[0, 1, 2, 3, 4, 5, 6, 7])
        .unwrap();

    let matrix = interpolate_volumes(&src, &tgt, &InterpolationOptions::default()).unwrap();
    assert_relative_eq!(matrix.get(0, 0).unwrap(), src.cell_volume(0).unwrap(), epsilon = 1e-9);
    assert_relative_eq!(matrix.get(1, 0).unwrap(), src.cell_volume(1).unwrap(), epsilon = 1e-9);
}
