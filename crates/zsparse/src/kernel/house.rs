// SPDX-License-Identifier: LGPL-2.1-or-later
//
// This file is based on the CXSparse implementation by Timothy A. Davis.
//
// CXSparse, Copyright (c) 2006-2024, Timothy A. Davis. All Rights Reserved.

use crate::complex::Complex;
use crate::error::{KernelError, KernelResult};
use crate::matrix::csc::CscMatrix;

/// Scalar part of a Householder reflection `H = I - beta·v·vᴴ`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Householder {
    pub beta: f64,
    /// `H·x = s·e₁` for the vector `x` the reflection was built from.
    pub s: Complex,
}

// 2-norm of x, accumulated as scale·sqrt(ssq) to avoid overflow
fn norm2(x: &[Complex]) -> f64 {
    let mut scale = 0.0_f64;
    let mut ssq = 1.0_f64;
    for c in x.iter().flat_map(|v| [v.re, v.im]) {
        if c == 0.0 {
            continue;
        }
        let a = c.abs();
        if scale < a {
            let r = scale / a;
            ssq = 1.0 + ssq * r * r;
            scale = a;
        } else {
            let r = a / scale;
            ssq += r * r;
        }
    }
    scale * ssq.sqrt()
}

/// Overwrite `x` with the Householder vector `v` such that
/// `(I - beta·v·vᴴ)·x = s·e₁`.
///
/// An all-zero `x` gives `beta = 0`, `v = e₁`, `s = 0`.
pub fn house(x: &mut [Complex]) -> KernelResult<Householder> {
    if x.is_empty() {
        return Err(KernelError::shape("house: vector length", 1, 0));
    }
    let sigma = norm2(x);
    if sigma == 0.0 {
        x[0] = Complex::ONE;
        return Ok(Householder {
            beta: 0.0,
            s: Complex::ZERO,
        });
    }
    // s has the phase of x[0] so that x[0] + s does not cancel
    let s = x[0].phase() * sigma;
    x[0] += s;
    let beta = 1.0 / (s.conj() * x[0]).re;
    Ok(Householder { beta, s: -s })
}

/// Apply the reflection stored in column `i` of `v` to `x`:
/// `x -= v·(beta·vᴴx)`.
pub fn happly(v: &CscMatrix, i: usize, beta: f64, x: &mut [Complex]) -> KernelResult<()> {
    let Some(vx) = &v.values else {
        return Err(KernelError::MissingValues { context: "happly" });
    };
    if i >= v.dim.ncols {
        return Err(KernelError::shape("happly: column index", v.dim.ncols, i));
    }
    if x.len() < v.dim.nrows {
        return Err(KernelError::workspace("x", v.dim.nrows, x.len()));
    }
    let range = v.col_start(i)..v.col_end(i);
    let mut tau = Complex::ZERO;
    for p in range.clone() {
        tau += vx[p].conj() * x[v.row_index(p)];
    }
    tau = tau * beta;
    for p in range {
        x[v.row_index(p)] -= vx[p] * tau;
    }
    Ok(())
}
