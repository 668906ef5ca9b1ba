// SPDX-License-Identifier: LGPL-2.1-or-later
//
// This file is based on the CXSparse implementation by Timothy A. Davis.
//
// CXSparse, Copyright (c) 2006-2024, Timothy A. Davis. All Rights Reserved.

use crate::error::{KernelError, KernelResult};
use crate::matrix::csc::CscMatrix;
use crate::utils::{EMPTY, try_filled};

/// Elimination tree of `A` (using its upper triangular part) or, when `ata`
/// is set, of `AᵀA` without forming it. `parent[k]` is `EMPTY` for roots.
pub fn etree(a: &CscMatrix, ata: bool) -> KernelResult<Vec<isize>> {
    let (m, n) = (a.dim.nrows, a.dim.ncols);
    if !ata && m != n {
        return Err(KernelError::shape("etree: rows of a symmetric matrix", n, m));
    }

    let mut parent = vec![EMPTY; n];
    let mut ancestor = vec![EMPTY; n];
    // prev[i] is the last column seen with an entry in row i
    let mut prev = if ata { try_filled(m, EMPTY)? } else { Vec::new() };

    for k in 0..n {
        for p in a.col_start(k)..a.col_end(k) {
            let row = a.row_index(p);
            let mut i = if ata { prev[row] } else { row as isize };
            // traverse from i to k, compressing the path as we go
            while i != EMPTY && i < k as isize {
                let inext = ancestor[i as usize];
                ancestor[i as usize] = k as isize;
                if inext == EMPTY {
                    parent[i as usize] = k as isize;
                }
                i = inext;
            }
            if ata {
                prev[row] = k as isize;
            }
        }
    }
    Ok(parent)
}
