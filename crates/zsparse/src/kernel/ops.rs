// SPDX-License-Identifier: LGPL-2.1-or-later
//
// This file is based on the CXSparse implementation by Timothy A. Davis.
//
// CXSparse, Copyright (c) 2006-2024, Timothy A. Davis. All Rights Reserved.

use crate::complex::Complex;
use crate::error::{KernelError, KernelResult};
use crate::matrix::csc::CscMatrix;

/// `y += A·x`
pub fn gaxpy(a: &CscMatrix, x: &[Complex], y: &mut [Complex]) -> KernelResult<()> {
    if x.len() < a.dim.ncols {
        return Err(KernelError::workspace("x", a.dim.ncols, x.len()));
    }
    if y.len() < a.dim.nrows {
        return Err(KernelError::workspace("y", a.dim.nrows, y.len()));
    }
    for (j, &xj) in x.iter().enumerate().take(a.dim.ncols) {
        for p in a.col_start(j)..a.col_end(j) {
            y[a.row_index(p)] += a.value(p) * xj;
        }
    }
    Ok(())
}

/// 1-norm: largest column sum of `|a_ij|`.
pub fn norm1(a: &CscMatrix) -> f64 {
    (0..a.dim.ncols)
        .map(|j| (a.col_start(j)..a.col_end(j)).map(|p| a.value(p).abs()).sum::<f64>())
        .fold(0.0, f64::max)
}
