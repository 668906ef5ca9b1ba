// SPDX-License-Identifier: LGPL-2.1-or-later
//
// This file is based on the CXSparse implementation by Timothy A. Davis.
//
// CXSparse, Copyright (c) 2006-2024, Timothy A. Davis. All Rights Reserved.

use crate::error::KernelResult;
use crate::matrix::csc::CscMatrix;
use crate::matrix::triplet::TripletMatrix;
use crate::utils::{cumsum, try_filled};

impl TripletMatrix {
    /// Triplet → CSC, with a counting pass then a placement pass.
    ///
    /// Within each column entries keep their insertion order; duplicates are
    /// kept as separate entries (see `CscMatrix::sum_duplicates`). Column
    /// counts that cannot be allocated give `AllocationFailed`.
    pub fn compress(&self) -> KernelResult<CscMatrix> {
        let (m, n) = (self.dim.nrows, self.dim.ncols);
        let nz = self.nnz();
        let mut c = CscMatrix::try_new(m, n, nz, self.has_values())?;

        // column counts
        let mut w = try_filled(n, 0usize)?;
        for &j in &self.cols {
            w[j] += 1;
        }
        cumsum(&mut c.column_pointers, &mut w);

        for k in 0..nz {
            let j = self.cols[k];
            let p = w[j];
            w[j] += 1;
            c.row_indices[p] = self.rows[k];
            if let (Some(cx), Some(tx)) = (&mut c.values, &self.values) {
                cx[p] = tx[k];
            }
        }
        debug_assert!(c.check_invariants().is_ok());
        Ok(c)
    }
}

#[cfg(test)]
mod tests {
    use crate::complex::Complex;
    use crate::error::KernelError;
    use crate::matrix::triplet::TripletMatrix;

    fn c(re: f64) -> Complex {
        Complex::from_real(re)
    }

    #[test]
    fn compress_basic() {
        // A = [ 10  0  3
        //       0 20  0
        //       2  0 30 ] with a duplicate (2,2) += 5 kept separately
        let mut t = TripletMatrix::new(0, 0, 2, true);
        t.entry(0, 0, c(10.0)).unwrap();
        t.entry(0, 2, c(3.0)).unwrap();
        t.entry(1, 1, c(20.0)).unwrap();
        t.entry(2, 0, c(2.0)).unwrap();
        t.entry(2, 2, c(30.0)).unwrap();
        t.entry(2, 2, c(5.0)).unwrap();

        let a = t.compress().unwrap();
        assert_eq!(a.column_pointers, vec![0, 2, 3, 6]);
        assert_eq!(a.row_indices, vec![0, 2, 1, 0, 2, 2]);
        assert_eq!(
            a.values.as_ref().unwrap(),
            &vec![c(10.0), c(2.0), c(20.0), c(3.0), c(30.0), c(5.0)]
        );
        assert!(a.check_invariants().is_ok());
    }

    #[test]
    fn compress_pattern_only() {
        let mut t = TripletMatrix::new(3, 3, 1, false);
        t.entry(1, 2, Complex::ZERO).unwrap();
        let a = t.compress().unwrap();
        assert!(a.values.is_none());
        assert_eq!(a.column_pointers, vec![0, 0, 0, 1]);
        assert_eq!(a.row_indices, vec![1]);
    }

    #[test]
    fn compress_empty_keeps_dimensions() {
        let t = TripletMatrix::new(4, 2, 0, true);
        let a = t.compress().unwrap();
        assert_eq!(a.nnz(), 0);
        assert_eq!((a.dim.nrows, a.dim.ncols), (4, 2));
        assert_eq!(a.nzmax(), 1);
    }

    #[test]
    fn compress_reports_unallocatable_column_count() {
        let mut t = TripletMatrix::new(0, 0, 1, true);
        t.entry(0, 1_000_000_000_000_000_000, c(1.0)).unwrap();
        assert!(matches!(t.compress(), Err(KernelError::AllocationFailed { .. })));
    }
}
