// SPDX-License-Identifier: LGPL-2.1-or-later
//
// This file is based on the CXSparse implementation by Timothy A. Davis.
//
// CXSparse, Copyright (c) 2006-2024, Timothy A. Davis. All Rights Reserved.

use crate::error::{KernelError, KernelResult};
use crate::matrix::csc::CscMatrix;

/// `C = P·A·Q`.
///
/// The two permutations run in opposite directions:
/// - `row_new_for_old[i]` is the row of `C` that old row `i` moves to;
/// - `col_old_for_new[k]` is the column of `A` copied into column `k` of `C`.
///
/// `None` means identity. A repeated or out-of-range entry in either gives
/// `InvalidPermutation`. `C` is pattern-only when `with_values` is false or
/// `A` has no values.
pub fn permute(
    a: &CscMatrix,
    row_new_for_old: Option<&[usize]>,
    col_old_for_new: Option<&[usize]>,
    with_values: bool,
) -> KernelResult<CscMatrix> {
    let (m, n) = (a.dim.nrows, a.dim.ncols);
    if let Some(pinv) = row_new_for_old {
        check_permutation(pinv, m, "permute: row permutation length")?;
    }
    if let Some(q) = col_old_for_new {
        check_permutation(q, n, "permute: column permutation length")?;
    }

    let values = with_values && a.has_values();
    let mut c = CscMatrix::try_new(m, n, a.nnz(), values)?;
    let mut nz = 0;
    for k in 0..n {
        c.column_pointers[k] = nz;
        let j = col_old_for_new.map_or(k, |q| q[k]);
        for t in a.col_start(j)..a.col_end(j) {
            if let (Some(cx), Some(ax)) = (&mut c.values, &a.values) {
                cx[nz] = ax[t];
            }
            let i = a.row_index(t);
            c.row_indices[nz] = row_new_for_old.map_or(i, |pinv| pinv[i]);
            nz += 1;
        }
    }
    c.column_pointers[n] = nz;
    Ok(c)
}

// p must hold each of 0..n exactly once
fn check_permutation(p: &[usize], n: usize, context: &'static str) -> KernelResult<()> {
    if p.len() != n {
        return Err(KernelError::shape(context, n, p.len()));
    }
    let mut seen = vec![false; n];
    for (index, &value) in p.iter().enumerate() {
        if value >= n || seen[value] {
            return Err(KernelError::InvalidPermutation { index, value, n });
        }
        seen[value] = true;
    }
    Ok(())
}

/// `pinv[p[k]] = k`. Fails unless `p` is a permutation of `0..p.len()`.
pub fn invert_permutation(p: &[usize]) -> KernelResult<Vec<usize>> {
    let n = p.len();
    let mut pinv = vec![usize::MAX; n];
    for (k, &i) in p.iter().enumerate() {
        if i >= n || pinv[i] != usize::MAX {
            return Err(KernelError::InvalidPermutation { index: k, value: i, n });
        }
        pinv[i] = k;
    }
    Ok(pinv)
}
