// SPDX-License-Identifier: LGPL-2.1-or-later
//
// This file is based on the CXSparse implementation by Timothy A. Davis.
//
// CXSparse, Copyright (c) 2006-2024, Timothy A. Davis. All Rights Reserved.

use crate::complex::Complex;
use crate::error::{KernelError, KernelResult};
use crate::matrix::csc::CscMatrix;
use crate::utils::try_filled;

/// Scatter `beta * A(:,j)` into the accumulator `x`, recording the pattern
/// in `c.row_indices[nz..]`.
///
/// Row `i` counts as new for this pass when `mark[i] < mark_value`; it is
/// then stamped with `mark_value`, appended to the pattern of `c`, and
/// `x[i]` is overwritten. Rows already stamped accumulate into `x[i]`.
/// `mark_value` must grow between passes that share `mark`.
///
/// Returns the new `nz`.
pub fn scatter(
    a: &CscMatrix,
    j: usize,
    beta: Complex,
    mark: &mut [usize],
    mark_value: usize,
    mut x: Option<&mut [Complex]>,
    c: &mut CscMatrix,
    mut nz: usize,
) -> KernelResult<usize> {
    let m = a.dim.nrows;
    if j >= a.dim.ncols {
        return Err(KernelError::shape("scatter: column index", a.dim.ncols, j));
    }
    if mark.len() < m {
        return Err(KernelError::workspace("mark", m, mark.len()));
    }
    if let Some(x) = &x {
        if x.len() < m {
            return Err(KernelError::workspace("x", m, x.len()));
        }
        if !a.has_values() {
            return Err(KernelError::MissingValues { context: "scatter" });
        }
    }
    for p in a.col_start(j)..a.col_end(j) {
        let i = a.row_index(p);
        if mark[i] < mark_value {
            // i is new entry in column j
            if nz >= c.nzmax() {
                return Err(KernelError::shape("scatter: room in C", nz + 1, c.nzmax()));
            }
            mark[i] = mark_value;
            c.row_indices[nz] = i;
            nz += 1;
            if let Some(x) = x.as_deref_mut() {
                x[i] = beta * a.value(p);
            }
        } else if let Some(x) = x.as_deref_mut() {
            // i exists in C(:,j) already
            x[i] += beta * a.value(p);
        }
    }
    Ok(nz)
}

/// Sparse product `C = A·B`.
pub fn multiply(a: &CscMatrix, b: &CscMatrix) -> KernelResult<CscMatrix> {
    if a.dim.ncols != b.dim.nrows {
        return Err(KernelError::shape("multiply: inner dimension", a.dim.ncols, b.dim.nrows));
    }
    let (m, n) = (a.dim.nrows, b.dim.ncols);
    let values = a.has_values() && b.has_values();
    let mut w = try_filled(m, 0usize)?;
    let mut x = if values { Some(try_filled(m, Complex::ZERO)?) } else { None };
    let mut c = CscMatrix::try_new(m, n, a.nnz() + b.nnz(), values)?;

    let mut nz = 0;
    for j in 0..n {
        if nz + m > c.nzmax() {
            let grow = 2 * c.nzmax() + m;
            c.reallocate(grow)?;
        }
        c.column_pointers[j] = nz;
        for p in b.col_start(j)..b.col_end(j) {
            nz = scatter(a, b.row_index(p), b.value(p), &mut w, j + 1, x.as_deref_mut(), &mut c, nz)?;
        }
        gather(&mut c, j, nz, x.as_deref());
    }
    c.column_pointers[n] = nz;
    c.reallocate(0)?;
    log::trace!("multiply: {}x{} result with {nz} entries", m, n);
    Ok(c)
}

/// Sparse sum `C = alpha·A + beta·B`.
pub fn add(a: &CscMatrix, b: &CscMatrix, alpha: Complex, beta: Complex) -> KernelResult<CscMatrix> {
    if a.dim != b.dim {
        return Err(KernelError::shape(
            "add: dimensions",
            a.dim.nrows * a.dim.ncols,
            b.dim.nrows * b.dim.ncols,
        ));
    }
    let (m, n) = (a.dim.nrows, a.dim.ncols);
    let values = a.has_values() && b.has_values();
    let mut w = try_filled(m, 0usize)?;
    let mut x = if values { Some(try_filled(m, Complex::ZERO)?) } else { None };
    let mut c = CscMatrix::try_new(m, n, a.nnz() + b.nnz(), values)?;

    let mut nz = 0;
    for j in 0..n {
        c.column_pointers[j] = nz;
        nz = scatter(a, j, alpha, &mut w, j + 1, x.as_deref_mut(), &mut c, nz)?;
        nz = scatter(b, j, beta, &mut w, j + 1, x.as_deref_mut(), &mut c, nz)?;
        gather(&mut c, j, nz, x.as_deref());
    }
    c.column_pointers[n] = nz;
    c.reallocate(0)?;
    Ok(c)
}

// copy the accumulated values of column j out of x
fn gather(c: &mut CscMatrix, j: usize, nz: usize, x: Option<&[Complex]>) {
    if let (Some(cx), Some(x)) = (&mut c.values, x) {
        for p in c.column_pointers[j]..nz {
            cx[p] = x[c.row_indices[p]];
        }
    }
}
