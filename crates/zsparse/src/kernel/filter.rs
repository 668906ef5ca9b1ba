// SPDX-License-Identifier: LGPL-2.1-or-later
//
// This file is based on the CXSparse implementation by Timothy A. Davis.
//
// CXSparse, Copyright (c) 2006-2024, Timothy A. Davis. All Rights Reserved.

use crate::complex::Complex;
use crate::error::KernelResult;
use crate::matrix::csc::CscMatrix;

/// Keep the entries of `a` for which `keep(row, col, value)` is true,
/// compacting them in place, and trim the storage to the new size.
///
/// Entries are visited column by column in their stored order. Pattern-only
/// matrices pass `Complex::ONE` as the value. Returns the new nnz.
pub fn filter<F>(a: &mut CscMatrix, mut keep: F) -> KernelResult<usize>
where
    F: FnMut(usize, usize, Complex) -> bool,
{
    let n = a.dim.ncols;
    let before = a.nnz();
    let mut nz = 0;
    for j in 0..n {
        // the start of column j is about to be overwritten
        let start = a.column_pointers[j];
        let end = a.column_pointers[j + 1];
        a.column_pointers[j] = nz;
        for p in start..end {
            let i = a.row_indices[p];
            let v = a.value(p);
            if keep(i, j, v) {
                if let Some(x) = &mut a.values {
                    x[nz] = v;
                }
                a.row_indices[nz] = i;
                nz += 1;
            }
        }
    }
    a.column_pointers[n] = nz;
    a.reallocate(0)?;
    log::debug!("filter kept {nz} of {before} entries");
    Ok(nz)
}

/// Remove entries with `|a_ij| <= tol`.
pub fn drop_below_tolerance(a: &mut CscMatrix, tol: f64) -> KernelResult<usize> {
    filter(a, |_, _, v| v.abs() > tol)
}

/// Remove explicitly stored zeros.
pub fn drop_zeros(a: &mut CscMatrix) -> KernelResult<usize> {
    filter(a, |_, _, v| !v.is_zero())
}
