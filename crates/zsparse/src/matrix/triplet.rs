// SPDX-License-Identifier: LGPL-2.1-or-later
//
// This file is based on the CXSparse implementation by Timothy A. Davis.
//
// CXSparse, Copyright (c) 2006-2024, Timothy A. Davis. All Rights Reserved.

use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::{KernelError, KernelResult};
use crate::matrix::Dim;

/// Unordered `(row, col, value)` entries, in insertion order.
///
/// Duplicates are allowed and are only summed when the matrix is compressed
/// (see [`TripletMatrix::compress`] and [`CscMatrix::sum_duplicates`]).
///
/// [`CscMatrix::sum_duplicates`]: crate::matrix::csc::CscMatrix::sum_duplicates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripletMatrix {
    pub dim: Dim,
    nzmax: usize,
    pub(crate) rows: Vec<usize>,
    pub(crate) cols: Vec<usize>,
    pub(crate) values: Option<Vec<Complex>>,
}

impl TripletMatrix {
    /// Empty triplet matrix. The dimensions are hints: they only ever grow
    /// as entries are added.
    pub fn new(nrows: usize, ncols: usize, nzmax: usize, with_values: bool) -> Self {
        let nzmax = nzmax.max(1);
        Self {
            dim: Dim { nrows, ncols },
            nzmax,
            rows: Vec::with_capacity(nzmax),
            cols: Vec::with_capacity(nzmax),
            values: with_values.then(|| Vec::with_capacity(nzmax)),
        }
    }

    /// number of entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.rows.len()
    }

    /// current capacity
    #[inline]
    pub fn nzmax(&self) -> usize {
        self.nzmax
    }

    #[inline]
    pub fn has_values(&self) -> bool {
        self.values.is_some()
    }

    /// Append `A(row, col) = value`, doubling the capacity when full.
    /// Pattern-only matrices ignore `value`.
    pub fn entry(&mut self, row: isize, col: isize, value: Complex) -> KernelResult<()> {
        if row < 0 || col < 0 {
            return Err(KernelError::InvalidIndex { row, col });
        }
        if self.nnz() >= self.nzmax {
            self.reallocate(2 * self.nzmax)?;
        }
        let (i, j) = (row as usize, col as usize);
        self.rows.push(i);
        self.cols.push(j);
        if let Some(x) = &mut self.values {
            x.push(value);
        }
        self.dim.nrows = self.dim.nrows.max(i + 1);
        self.dim.ncols = self.dim.ncols.max(j + 1);
        Ok(())
    }

    /// Change the capacity to `nzmax` (at least one); `0` trims to exactly
    /// `nnz()`. Shrinking below `nnz()` drops the trailing entries.
    pub fn reallocate(&mut self, nzmax: usize) -> KernelResult<()> {
        let nzmax = if nzmax == 0 { self.nnz() } else { nzmax }.max(1);
        if nzmax < self.nnz() {
            log::debug!("triplet shrink drops {} entries", self.nnz() - nzmax);
            self.rows.truncate(nzmax);
            self.cols.truncate(nzmax);
            if let Some(x) = &mut self.values {
                x.truncate(nzmax);
            }
        }
        reserve_total(&mut self.rows, nzmax)?;
        reserve_total(&mut self.cols, nzmax)?;
        if let Some(x) = &mut self.values {
            reserve_total(x, nzmax)?;
        }
        self.nzmax = nzmax;
        log::trace!("triplet reallocated to nzmax={nzmax} (nnz={})", self.nnz());
        Ok(())
    }

    /// Iterate `(row, col, value)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Complex)> + '_ {
        (0..self.nnz()).map(move |p| {
            let v = self.values.as_ref().map_or(Complex::ONE, |x| x[p]);
            (self.rows[p], self.cols[p], v)
        })
    }
}

fn reserve_total<T>(v: &mut Vec<T>, total: usize) -> KernelResult<()> {
    if total > v.capacity() {
        v.try_reserve_exact(total - v.len())
            .map_err(|_| KernelError::AllocationFailed { requested: total })?;
    } else {
        v.shrink_to(total);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(8)]
    fn growth_doubles_and_keeps_every_entry(#[case] n: usize) {
        let mut t = TripletMatrix::new(0, 0, n, true);
        let mut caps = vec![t.nzmax()];
        for k in 0..(2 * n + 1) {
            t.entry(k as isize, (k % 3) as isize, Complex::new(k as f64, -(k as f64)))
                .unwrap();
            assert!(t.nzmax() >= t.nnz());
            if *caps.last().unwrap() != t.nzmax() {
                caps.push(t.nzmax());
            }
        }
        for w in caps.windows(2) {
            assert_eq!(w[1], 2 * w[0]);
        }
        assert_eq!(t.nnz(), 2 * n + 1);
        for (k, (i, j, v)) in t.iter().enumerate() {
            assert_eq!((i, j), (k, k % 3));
            assert_eq!(v, Complex::new(k as f64, -(k as f64)));
        }
    }

    #[test]
    fn dimensions_follow_largest_index() {
        let mut t = TripletMatrix::new(2, 2, 1, true);
        t.entry(0, 0, Complex::ONE).unwrap();
        assert_eq!(t.dim, Dim { nrows: 2, ncols: 2 });
        t.entry(4, 1, Complex::ONE).unwrap();
        t.entry(1, 6, Complex::ONE).unwrap();
        assert_eq!(t.dim, Dim { nrows: 5, ncols: 7 });
    }

    #[rstest]
    #[case(-1, 0)]
    #[case(0, -1)]
    #[case(-3, -3)]
    fn rejects_negative_indices(#[case] row: isize, #[case] col: isize) {
        let mut t = TripletMatrix::new(0, 0, 1, true);
        let err = t.entry(row, col, Complex::ONE).unwrap_err();
        assert!(matches!(err, KernelError::InvalidIndex { .. }));
        assert_eq!(t.nnz(), 0);
    }

    #[test]
    fn reallocate_trims_to_fit() {
        let mut t = TripletMatrix::new(0, 0, 10, false);
        t.entry(0, 0, Complex::ZERO).unwrap();
        t.entry(1, 1, Complex::ZERO).unwrap();
        t.reallocate(0).unwrap();
        assert_eq!(t.nzmax(), 2);
        t.reallocate(1).unwrap();
        assert_eq!(t.nnz(), 1);
        assert!(t.iter().all(|(_, _, v)| v == Complex::ONE));
    }
}
