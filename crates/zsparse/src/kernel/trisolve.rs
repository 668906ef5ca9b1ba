// SPDX-License-Identifier: LGPL-2.1-or-later
//
// This file is based on the CXSparse implementation by Timothy A. Davis.
//
// CXSparse, Copyright (c) 2006-2024, Timothy A. Davis. All Rights Reserved.

//! Dense right-hand side triangular solves, `x` overwritten in place.
//!
//! Every routine checks the whole factor before touching `x`: a column
//! whose diagonal is missing or misplaced, or a zero pivot, leaves `x`
//! unchanged.

use crate::complex::Complex;
use crate::error::{KernelError, KernelResult};
use crate::matrix::csc::CscMatrix;

#[derive(Clone, Copy, PartialEq)]
enum Diagonal {
    First,
    Last,
}

fn check_triangular<'a>(
    a: &'a CscMatrix,
    x: &[Complex],
    diagonal: Diagonal,
    context: &'static str,
) -> KernelResult<&'a [Complex]> {
    let Some(ax) = a.values.as_deref() else {
        return Err(KernelError::MissingValues { context });
    };
    let n = a.dim.ncols;
    if !a.is_square() {
        return Err(KernelError::shape(context, n, a.dim.nrows));
    }
    if x.len() < n {
        return Err(KernelError::workspace("x", n, x.len()));
    }
    for col in 0..n {
        let (start, end) = (a.col_start(col), a.col_end(col));
        let diag = match diagonal {
            Diagonal::First => start,
            Diagonal::Last => end.wrapping_sub(1),
        };
        if start == end || a.row_index(diag) != col {
            return Err(match diagonal {
                Diagonal::First => KernelError::DiagonalNotFirst { col },
                Diagonal::Last => KernelError::DiagonalNotLast { col },
            });
        }
        if ax[diag].is_zero() {
            return Err(KernelError::ZeroPivot { col });
        }
    }
    Ok(ax)
}

/// Solve `L·x = b` where `b` is passed in `x`. `L` is lower triangular with
/// the diagonal stored first in each column.
pub fn lsolve(l: &CscMatrix, x: &mut [Complex]) -> KernelResult<()> {
    let lx = check_triangular(l, x, Diagonal::First, "lsolve")?;
    for j in 0..l.dim.ncols {
        let start = l.col_start(j);
        x[j] /= lx[start];
        let xj = x[j];
        for p in start + 1..l.col_end(j) {
            x[l.row_index(p)] -= lx[p] * xj;
        }
    }
    Ok(())
}

/// Solve `Lᴴ·x = b`, same storage as [`lsolve`].
pub fn ltsolve(l: &CscMatrix, x: &mut [Complex]) -> KernelResult<()> {
    let lx = check_triangular(l, x, Diagonal::First, "ltsolve")?;
    for j in (0..l.dim.ncols).rev() {
        let start = l.col_start(j);
        for p in start + 1..l.col_end(j) {
            let xi = x[l.row_index(p)];
            x[j] -= lx[p].conj() * xi;
        }
        x[j] /= lx[start].conj();
    }
    Ok(())
}

/// Solve `U·x = b` where `b` is passed in `x`. `U` is upper triangular with
/// the diagonal stored last in each column.
pub fn usolve(u: &CscMatrix, x: &mut [Complex]) -> KernelResult<()> {
    let ux = check_triangular(u, x, Diagonal::Last, "usolve")?;
    for j in (0..u.dim.ncols).rev() {
        let diag = u.col_end(j) - 1;
        x[j] /= ux[diag];
        let xj = x[j];
        for p in u.col_start(j)..diag {
            x[u.row_index(p)] -= ux[p] * xj;
        }
    }
    Ok(())
}

/// Solve `Uᴴ·x = b`, same storage as [`usolve`].
pub fn utsolve(u: &CscMatrix, x: &mut [Complex]) -> KernelResult<()> {
    let ux = check_triangular(u, x, Diagonal::Last, "utsolve")?;
    for j in 0..u.dim.ncols {
        let diag = u.col_end(j) - 1;
        for p in u.col_start(j)..diag {
            let xi = x[u.row_index(p)];
            x[j] -= ux[p].conj() * xi;
        }
        x[j] /= ux[diag].conj();
    }
    Ok(())
}
