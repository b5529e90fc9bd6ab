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

//! The affine map `x -> Ax + b` sending a tetrahedron onto the unit
//! (reference) tetrahedron with corners O, X, Y, Z.

/// Absolute tolerance for the degenerate-tetrahedron determinant check.
const DEGENERACY_ABS_TOL: f64 = 5.0e-12;

pub struct TetraAffineTransform {
    linear: [f64; 9],
    translation: [f64; 3],
    determinant: f64,
}

impl TetraAffineTransform {
    /// Build the transform from four corners given as `[f64; 3]` slices.
    /// A (nearly) flat tetrahedron yields a transform whose determinant is
    /// exactly 0 so callers can skip it; no inversion is attempted then.
    pub fn new(corners: [&[f64]; 4]) -> Self {
        let mut linear = [0.0; 9];
        // columns are the edge vectors from the first corner
        for i in 0..3 {
            for j in 0..3 {
                linear[3 * j + i] = corners[i + 1][j] - corners[0][j];
            }
        }

        let det = determinant_of(&linear);
        if det.abs() < DEGENERACY_ABS_TOL {
            return TetraAffineTransform {
                linear,
                translation: [0.0; 3],
                determinant: 0.0,
            };
        }

        invert(&mut linear);

        // translation lives in transformed space: b = -A * corner0
        let mut translation = [0.0; 3];
        for i in 0..3 {
            translation[i] = -(linear[3 * i] * corners[0][0]
                + linear[3 * i + 1] * corners[0][1]
                + linear[3 * i + 2] * corners[0][2]);
        }

        let determinant = determinant_of(&linear);
        TetraAffineTransform {
            linear,
            translation,
            determinant,
        }
    }

    /// Transform `src` into reference-tetrahedron coordinates.
    pub fn apply(&self, dest: &mut [f64; 3], src: &[f64]) {
        for i in 0..3 {
            dest[i] = self.linear[3 * i] * src[0]
                + self.linear[3 * i + 1] * src[1]
                + self.linear[3 * i + 2] * src[2]
                + self.translation[i];
        }
    }

    /// Determinant of the linear part (of the inverted map once built).
    pub fn determinant(&self) -> f64 {
        self.determinant
    }
}

fn determinant_of(m: &[f64; 9]) -> f64 {
    let sub = [
        m[4] * m[8] - m[5] * m[7],
        m[3] * m[8] - m[5] * m[6],
        m[3] * m[7] - m[4] * m[6],
    ];
    m[0] * sub[0] - m[1] * sub[1] + m[2] * sub[2]
}

/// Invert the 3x3 matrix in place by LU factorization with partial pivoting
/// and per-column substitution.
fn invert(m: &mut [f64; 9]) {
    let mut lu = *m;
    let mut idx = [0usize; 3];
    factorize_lu(&mut lu, &mut idx);

    for i in 0..3 {
        let b = [
            if i == 0 { 1.0 } else { 0.0 },
            if i == 1 { 1.0 } else { 0.0 },
            if i == 2 { 1.0 } else { 0.0 },
        ];
        let y = forward_substitution(&lu, &b, &idx);
        let x = backward_substitution(&lu, &y, &idx);
        for j in 0..3 {
            m[3 * j + i] = x[idx[j]];
        }
    }
}

/// Rows are permuted through `idx`: entry (i,j) of the factorization is
/// `lu[3*idx[i] + j]`. L carries an implicit unit diagonal.
fn factorize_lu(lu: &mut [f64; 9], idx: &mut [usize; 3]) {
    for i in 0..3 {
        idx[i] = i;
    }
    for k in 0..2 {
        let mut max = lu[3 * idx[k] + k].abs();
        let mut row = k;
        for i in k..3 {
            if lu[3 * idx[i] + k].abs() > max {
                max = lu[3 * idx[i] + k].abs();
                row = i;
            }
        }
        idx.swap(k, row);

        for j in k + 1..3 {
            lu[3 * idx[j] + k] /= lu[3 * idx[k] + k];
            for s in k + 1..3 {
                lu[3 * idx[j] + s] -= lu[3 * idx[j] + k] * lu[3 * idx[k] + s];
            }
        }
    }
}

fn forward_substitution(lu: &[f64; 9], b: &[f64; 3], idx: &[usize; 3]) -> [f64; 3] {
    let mut x = [0.0; 3];
    x[idx[0]] = b[idx[0]];
    x[idx[1]] = b[idx[1]] - lu[3 * idx[1]] * x[idx[0]];
    x[idx[2]] = b[idx[2]] - lu[3 * idx[2]] * x[idx[0]] - lu[3 * idx[2] + 1] * x[idx[1]];
    x
}

fn backward_substitution(lu: &[f64; 9], b: &[f64; 3], idx: &[usize; 3]) -> [f64; 3] {
    let mut x = [0.0; 3];
    x[idx[2]] = b[idx[2]] / lu[3 * idx[2] + 2];
    x[idx[1]] = (b[idx[1]] - lu[3 * idx[1] + 2] * x[idx[2]]) / lu[3 * idx[1] + 1];
    x[idx[0]] =
        (b[idx[0]] - lu[3 * idx[0] + 1] * x[idx[1]] - lu[3 * idx[0] + 2] * x[idx[2]]) / lu[3 * idx[0]];
    x
}
