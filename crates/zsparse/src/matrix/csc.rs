// SPDX-License-Identifier: LGPL-2.1-or-later
//
// This file is based on the CXSparse implementation by Timothy A. Davis.
//
// CXSparse, Copyright (c) 2006-2024, Timothy A. Davis. All Rights Reserved.

use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::{KernelError, KernelResult};
use crate::matrix::Dim;
use crate::utils::{cumsum, try_filled};

/// Compressed Sparse Column matrix
/// - column pointers are the indices of the start and end of each column
/// - row indices are the indices of the rows of the stored entries
/// - values are the stored entries, or `None` for a pattern-only matrix
///
/// `row_indices` (and `values`) may be longer than `nnz()`: the tail beyond
/// `column_pointers[ncols]` is spare capacity, see [`CscMatrix::reallocate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CscMatrix {
    pub dim: Dim,
    /// Column pointers, len = ncols + 1
    pub column_pointers: Vec<usize>,
    /// Row indices, len = nzmax
    pub row_indices: Vec<usize>,
    /// Entry values, len = nzmax
    pub values: Option<Vec<Complex>>,
}

impl CscMatrix {
    /// An empty matrix with room for `nzmax` entries (at least one).
    pub fn new(nrows: usize, ncols: usize, nzmax: usize, with_values: bool) -> Self {
        let nzmax = nzmax.max(1);
        Self {
            dim: Dim { nrows, ncols },
            column_pointers: vec![0; ncols + 1],
            row_indices: vec![0; nzmax],
            values: with_values.then(|| vec![Complex::ZERO; nzmax]),
        }
    }

    /// Like [`CscMatrix::new`], but the column pointers and entry arrays are
    /// reserved fallibly, so dimensions that cannot be allocated give
    /// `AllocationFailed`.
    pub fn try_new(nrows: usize, ncols: usize, nzmax: usize, with_values: bool) -> KernelResult<Self> {
        let nzmax = nzmax.max(1);
        let column_pointers = try_filled(
            ncols
                .checked_add(1)
                .ok_or(KernelError::AllocationFailed { requested: ncols })?,
            0,
        )?;
        let row_indices = try_filled(nzmax, 0)?;
        let values = if with_values {
            Some(try_filled(nzmax, Complex::ZERO)?)
        } else {
            None
        };
        Ok(Self {
            dim: Dim { nrows, ncols },
            column_pointers,
            row_indices,
            values,
        })
    }

    /// Build from raw arrays, checking the structural invariants.
    pub fn from_parts(
        nrows: usize,
        ncols: usize,
        column_pointers: Vec<usize>,
        row_indices: Vec<usize>,
        values: Option<Vec<Complex>>,
    ) -> KernelResult<Self> {
        let a = Self {
            dim: Dim { nrows, ncols },
            column_pointers,
            row_indices,
            values,
        };
        a.check_invariants()?;
        Ok(a)
    }

    /// number of stored entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.column_pointers[self.dim.ncols]
    }

    /// allocated room for entries
    #[inline]
    pub fn nzmax(&self) -> usize {
        self.row_indices.len()
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.dim.nrows == self.dim.ncols
    }

    #[inline]
    pub fn has_values(&self) -> bool {
        self.values.is_some()
    }

    #[inline]
    pub fn col_start(&self, j: usize) -> usize {
        self.column_pointers[j]
    }

    #[inline]
    pub fn col_end(&self, j: usize) -> usize {
        self.column_pointers[j + 1]
    }

    #[inline]
    pub fn row_index(&self, p: usize) -> usize {
        self.row_indices[p]
    }

    /// Value at storage position `p`; pattern-only matrices read as one.
    #[inline]
    pub fn value(&self, p: usize) -> Complex {
        match &self.values {
            Some(x) => x[p],
            None => Complex::ONE,
        }
    }

    /// Return (row_indices, values) slices for column j
    pub fn col(&self, j: usize) -> (&[usize], Option<&[Complex]>) {
        let (s, e) = (self.col_start(j), self.col_end(j));
        (
            &self.row_indices[s..e],
            self.values.as_ref().map(|x| &x[s..e]),
        )
    }

    /// Iterate `(row, col, value)` in column order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Complex)> + '_ {
        (0..self.dim.ncols).flat_map(move |j| {
            (self.col_start(j)..self.col_end(j)).map(move |p| (self.row_index(p), j, self.value(p)))
        })
    }

    pub fn check_invariants(&self) -> KernelResult<()> {
        let ncols = self.dim.ncols;
        if self.column_pointers.len() != ncols + 1 {
            return Err(KernelError::shape(
                "column pointers length",
                ncols + 1,
                self.column_pointers.len(),
            ));
        }
        if self.column_pointers[0] != 0 {
            return Err(KernelError::shape("first column pointer", 0, self.column_pointers[0]));
        }
        if self.nnz() > self.nzmax() {
            return Err(KernelError::shape("stored entries", self.nzmax(), self.nnz()));
        }
        if let Some(x) = &self.values {
            if x.len() != self.row_indices.len() {
                return Err(KernelError::shape(
                    "values length",
                    self.row_indices.len(),
                    x.len(),
                ));
            }
        }
        for j in 0..ncols {
            let (start, end) = (self.col_start(j), self.col_end(j));
            if start > end {
                return Err(KernelError::shape("column pointers order", start, end));
            }
            if end > self.nzmax() {
                return Err(KernelError::shape("column pointer range", self.nzmax(), end));
            }
            for &r in &self.row_indices[start..end] {
                if r >= self.dim.nrows {
                    return Err(KernelError::InvalidIndex {
                        row: r as isize,
                        col: j as isize,
                    });
                }
            }
        }
        Ok(())
    }

    /// Resize the entry arrays to `nzmax` slots (at least one); `0` trims to
    /// exactly `nnz()`. Stored entries are never discarded.
    pub fn reallocate(&mut self, nzmax: usize) -> KernelResult<()> {
        let used = self.nnz();
        let nzmax = if nzmax == 0 { used } else { nzmax }.max(1);
        if nzmax < used {
            return Err(KernelError::shape("csc reallocation below nnz", used, nzmax));
        }
        resize_exact(&mut self.row_indices, nzmax, 0)?;
        if let Some(x) = &mut self.values {
            resize_exact(x, nzmax, Complex::ZERO)?;
        }
        log::trace!("csc reallocated to nzmax={nzmax} (nnz={used})");
        Ok(())
    }

    /// `Aᵀ` (no conjugation). Pattern-only when `with_values` is false.
    /// Columns of the result have increasing row indices.
    pub fn transpose(&self, with_values: bool) -> KernelResult<CscMatrix> {
        let (m, n) = (self.dim.nrows, self.dim.ncols);
        let values = with_values && self.has_values();
        let mut c = CscMatrix::try_new(n, m, self.nnz(), values)?;

        // count entries per row
        let mut w = try_filled(m, 0usize)?;
        for p in 0..self.nnz() {
            w[self.row_indices[p]] += 1;
        }
        cumsum(&mut c.column_pointers, &mut w);

        for j in 0..n {
            for p in self.col_start(j)..self.col_end(j) {
                let q = w[self.row_indices[p]];
                w[self.row_indices[p]] += 1;
                c.row_indices[q] = j;
                if let (Some(cx), Some(ax)) = (&mut c.values, &self.values) {
                    cx[q] = ax[p];
                }
            }
        }
        Ok(c)
    }

    /// Conjugate transpose `Aᴴ`.
    pub fn adjoint(&self) -> KernelResult<CscMatrix> {
        let mut c = self.transpose(true)?;
        if let Some(cx) = &mut c.values {
            cx.iter_mut().for_each(|v| *v = v.conj());
        }
        Ok(c)
    }

    /// Sum duplicate entries in place; the first occurrence in each column
    /// keeps its position. Returns the new nnz.
    pub fn sum_duplicates(&mut self) -> KernelResult<usize> {
        let (m, n) = (self.dim.nrows, self.dim.ncols);
        // w[i] = position of row i in the current column, if already seen
        let mut w: Vec<Option<usize>> = try_filled(m, None)?;
        let mut nz = 0;
        for j in 0..n {
            let q = nz;
            let (start, end) = (self.col_start(j), self.col_end(j));
            for p in start..end {
                let i = self.row_indices[p];
                match w[i] {
                    Some(pos) if pos >= q => {
                        if let Some(x) = &mut self.values {
                            let v = x[p];
                            x[pos] += v;
                        }
                    }
                    _ => {
                        w[i] = Some(nz);
                        self.row_indices[nz] = i;
                        if let Some(x) = &mut self.values {
                            x[nz] = x[p];
                        }
                        nz += 1;
                    }
                }
            }
            self.column_pointers[j] = q;
        }
        self.column_pointers[n] = nz;
        self.reallocate(0)?;
        Ok(nz)
    }
}

pub(crate) fn resize_exact<T: Clone>(v: &mut Vec<T>, len: usize, fill: T) -> KernelResult<()> {
    if len > v.len() {
        v.try_reserve_exact(len - v.len())
            .map_err(|_| KernelError::AllocationFailed { requested: len })?;
        v.resize(len, fill);
    } else {
        v.truncate(len);
        v.shrink_to_fit();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::triplet::TripletMatrix;

    fn c(re: f64) -> Complex {
        Complex::from_real(re)
    }

    // A = [ 10  0  3
    //        0 20  0
    //        2  0 30 ]
    fn sample() -> CscMatrix {
        CscMatrix::from_parts(
            3,
            3,
            vec![0, 2, 3, 5],
            vec![0, 2, 1, 0, 2],
            Some(vec![c(10.0), c(2.0), c(20.0), c(3.0), c(30.0)]),
        )
        .unwrap()
    }

    #[test]
    fn access_columns() {
        let a = sample();
        assert_eq!(a.nnz(), 5);
        let (r0, v0) = a.col(0);
        assert_eq!(r0, &[0, 2]);
        assert_eq!(v0.unwrap(), &[c(10.0), c(2.0)]);
        let entries: Vec<_> = a.iter().map(|(i, j, _)| (i, j)).collect();
        assert_eq!(entries, vec![(0, 0), (2, 0), (1, 1), (0, 2), (2, 2)]);
    }

    #[test]
    fn invariants_reject_out_of_range_rows() {
        let err = CscMatrix::from_parts(2, 1, vec![0, 1], vec![5], None).unwrap_err();
        assert!(matches!(err, KernelError::InvalidIndex { row: 5, col: 0 }));
        let err = CscMatrix::from_parts(2, 2, vec![0, 1], vec![0], None).unwrap_err();
        assert!(matches!(err, KernelError::InvalidShape { .. }));
        // a column running past the stored entries, then back
        let err = CscMatrix::from_parts(2, 2, vec![0, 5, 1], vec![0], None).unwrap_err();
        assert!(matches!(err, KernelError::InvalidShape { context: "column pointer range", .. }));
        let err = CscMatrix::from_parts(2, 2, vec![0, 2, 1], vec![0, 1], None).unwrap_err();
        assert!(matches!(err, KernelError::InvalidShape { context: "column pointers order", .. }));
    }

    #[test]
    fn try_new_reports_unallocatable_dimensions() {
        let a = CscMatrix::try_new(3, 2, 0, true).unwrap();
        assert_eq!(a, CscMatrix::new(3, 2, 0, true));
        assert!(matches!(
            CscMatrix::try_new(1, 1_000_000_000_000_000_000, 1, true),
            Err(KernelError::AllocationFailed { .. })
        ));
    }

    #[test]
    fn huge_row_count_fails_without_aborting() {
        let mut a = CscMatrix::from_parts(1 << 62, 1, vec![0, 1], vec![7], Some(vec![c(1.0)])).unwrap();
        assert!(matches!(a.transpose(true), Err(KernelError::AllocationFailed { .. })));
        assert!(matches!(a.sum_duplicates(), Err(KernelError::AllocationFailed { .. })));
    }

    #[test]
    fn reallocate_grows_and_trims() {
        let mut a = sample();
        a.reallocate(12).unwrap();
        assert_eq!(a.nzmax(), 12);
        assert_eq!(a.values.as_ref().unwrap().len(), 12);
        assert_eq!(a.nnz(), 5);
        a.reallocate(0).unwrap();
        assert_eq!(a.nzmax(), 5);
        assert_eq!(a, sample());
        assert!(a.reallocate(3).is_err());
    }

    #[test]
    fn transpose_moves_entries() {
        let a = sample();
        let t = a.transpose(true).unwrap();
        assert_eq!(t.column_pointers, vec![0, 2, 3, 5]);
        assert_eq!(t.row_indices, vec![0, 2, 1, 0, 2]);
        assert_eq!(
            t.values.unwrap(),
            vec![c(10.0), c(3.0), c(20.0), c(2.0), c(30.0)]
        );
        assert_eq!(a.transpose(true).unwrap().transpose(true).unwrap(), a);
        assert!(a.transpose(false).unwrap().values.is_none());
    }

    #[test]
    fn adjoint_conjugates() {
        let a = CscMatrix::from_parts(1, 1, vec![0, 1], vec![0], Some(vec![Complex::new(1.0, 2.0)]))
            .unwrap();
        assert_eq!(a.adjoint().unwrap().values.unwrap(), vec![Complex::new(1.0, -2.0)]);
    }

    #[test]
    fn sum_duplicates_merges_within_columns() {
        let mut t = TripletMatrix::new(0, 0, 4, true);
        for (i, j, v) in [(0, 0, 1.0), (1, 0, 2.0), (0, 0, 3.0), (1, 1, 4.0), (1, 1, -4.0), (0, 1, 5.0)] {
            t.entry(i, j, c(v)).unwrap();
        }
        let mut a = t.compress().unwrap();
        assert_eq!(a.nnz(), 6);
        let nz = a.sum_duplicates().unwrap();
        assert_eq!(nz, 4);
        assert_eq!(a.column_pointers, vec![0, 2, 4]);
        assert_eq!(a.row_indices, vec![0, 1, 1, 0]);
        assert_eq!(a.values.unwrap(), vec![c(4.0), c(2.0), c(0.0), c(5.0)]);
    }
}
