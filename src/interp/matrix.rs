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

/// Sparse matrix of overlap measures: one row per source entity, each row a
/// list of `(target index, measure)` pairs with unique target indices.
#[derive(Clone, Debug, Default)]
pub struct IntersectionMatrix {
    rows: Vec<Vec<(usize, f64)>>,
}

impl IntersectionMatrix {
    pub fn new(nb_rows: usize) -> Self {
        IntersectionMatrix {
            rows: vec![Vec::new(); nb_rows],
        }
    }

    pub fn nb_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, i: usize) -> &[(usize, f64)] {
        &self.rows[i]
    }

    pub fn rows(&self) -> &[Vec<(usize, f64)>] {
        &self.rows
    }

    /// Add `measure` to entry `(row, col)`, merging with an existing entry
    /// for the same column.
    pub fn add(&mut self, row: usize, col: usize, measure: f64) {
        let entries = &mut self.rows[row];
        match entries.iter_mut().find(|(c, _)| *c == col) {
            Some((_, m)) => *m += measure,
            None => entries.push((col, measure)),
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.rows[row]
            .iter()
            .find(|(c, _)| *c == col)
            .map(|&(_, m)| m)
    }

    /// Drop every entry whose magnitude is below `threshold`. Called once
    /// per build, after accumulation, so that partial sums are not truncated
    /// mid-way.
    pub fn prune_below(&mut self, threshold: f64) {
        for row in &mut self.rows {
            row.retain(|&(_, m)| m.abs() >= threshold);
        }
    }

    pub fn row_sum(&self, i: usize) -> f64 {
        self.rows[i].iter().map(|&(_, m)| m).sum()
    }

    pub fn nb_entries(&self) -> usize {
        self.rows.iter().map(|r| r.len()).sum()
    }
}
