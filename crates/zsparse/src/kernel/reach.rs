// SPDX-License-Identifier: LGPL-2.1-or-later
//
// This file is based on the CXSparse implementation by Timothy A. Davis.
//
// CXSparse, Copyright (c) 2006-2024, Timothy A. Davis. All Rights Reserved.

use crate::complex::Complex;
use crate::error::{KernelError, KernelResult};
use crate::matrix::csc::CscMatrix;

// Depth-first search from node j over the graph of G (edge j -> i iff
// G(i,j) != 0). xi[..n] holds the node stack at its head and the finished
// nodes at its tail (from `top` downwards); xi[n..2n] holds, per stack
// frame, where the scan of that node's column resumes.
fn dfs(
    mut j: usize,
    g: &CscMatrix,
    mut top: usize,
    xi: &mut [usize],
    pinv: Option<&[isize]>,
    marked: &mut [bool],
) -> usize {
    let n = g.dim.ncols;
    let (stack, pstack) = xi.split_at_mut(n);
    let mut head: isize = 0;
    stack[0] = j;

    while head >= 0 {
        j = stack[head as usize];
        // column of G holding the out-edges of j; negative means none
        let jnew = match pinv {
            Some(pinv) => pinv[j],
            None => j as isize,
        };

        if !marked[j] {
            // first time that j has been visited
            marked[j] = true;
            pstack[head as usize] = if jnew < 0 { 0 } else { g.col_start(jnew as usize) };
        }

        let end = if jnew < 0 { 0 } else { g.col_end(jnew as usize) };
        let mut done = true;
        for p in pstack[head as usize]..end {
            let i = g.row_index(p);
            if marked[i] {
                continue;
            }
            // remember where to resume j, then descend into i
            pstack[head as usize] = p;
            head += 1;
            stack[head as usize] = i;
            done = false;
            break;
        }

        if done {
            // all neighbours of j are finished: pop j onto the output
            head -= 1;
            top -= 1;
            stack[top] = j;
        }
    }

    top
}

fn check_reach_args(
    g: &CscMatrix,
    b: &CscMatrix,
    k: usize,
    xi: &[usize],
    pinv: Option<&[isize]>,
    marked: &[bool],
) -> KernelResult<usize> {
    let n = g.dim.ncols;
    if !g.is_square() {
        return Err(KernelError::shape("reach: rows of G", n, g.dim.nrows));
    }
    if b.dim.nrows > n {
        return Err(KernelError::shape("reach: rows of B", n, b.dim.nrows));
    }
    if k >= b.dim.ncols {
        return Err(KernelError::shape("reach: column of B", b.dim.ncols, k));
    }
    if xi.len() < 2 * n {
        return Err(KernelError::workspace("xi", 2 * n, xi.len()));
    }
    if marked.len() < n {
        return Err(KernelError::workspace("marked", n, marked.len()));
    }
    if let Some(pinv) = pinv {
        if pinv.len() < n {
            return Err(KernelError::workspace("pinv", n, pinv.len()));
        }
        if let Some(index) = pinv.iter().take(n).position(|&c| c >= n as isize) {
            return Err(KernelError::InvalidPermutation {
                index,
                value: pinv[index] as usize,
                n,
            });
        }
    }
    Ok(n)
}

/// Nonzero pattern of `x = G \ B(:,k)` without doing any arithmetic.
///
/// `xi` needs `2n` entries and `marked` needs `n` flags, all false on entry.
/// On return `xi[top..n]` holds the reachable nodes in topological order
/// (every node comes before the nodes it reaches) and every flag in
/// `marked` is false again. Returns `top`.
///
/// When `pinv` is given, the out-edges of node `j` are column `pinv[j]` of
/// `G`; a negative `pinv[j]` means node `j` has no out-edges.
pub fn reach(
    g: &CscMatrix,
    b: &CscMatrix,
    k: usize,
    xi: &mut [usize],
    pinv: Option<&[isize]>,
    marked: &mut [bool],
) -> KernelResult<usize> {
    let n = check_reach_args(g, b, k, xi, pinv, marked)?;
    let mut top = n;

    for p in b.col_start(k)..b.col_end(k) {
        let i = b.row_index(p);
        if !marked[i] {
            top = dfs(i, g, top, xi, pinv, marked);
        }
    }

    // restore the workspace for the next call
    for &j in &xi[top..n] {
        marked[j] = false;
    }

    log::trace!("reach: column {k} reaches {} of {n} nodes", n - top);
    Ok(top)
}

/// Solve `G·x = B(:,k)` for a sparse triangular `G` and sparse right-hand
/// side. `G` is lower triangular with the diagonal stored first in each
/// column when `lower`, upper triangular with the diagonal stored last
/// otherwise.
///
/// `x` is a dense work vector of length `n`; only `x[xi[top..n]]` are
/// meaningful on return. Returns `top`.
pub fn spsolve(
    g: &CscMatrix,
    b: &CscMatrix,
    k: usize,
    xi: &mut [usize],
    x: &mut [Complex],
    pinv: Option<&[isize]>,
    lower: bool,
    marked: &mut [bool],
) -> KernelResult<usize> {
    let (Some(gx), Some(_)) = (&g.values, &b.values) else {
        return Err(KernelError::MissingValues { context: "spsolve" });
    };
    let n = g.dim.ncols;
    if x.len() < n {
        return Err(KernelError::workspace("x", n, x.len()));
    }

    let top = reach(g, b, k, xi, pinv, marked)?;

    for &j in &xi[top..n] {
        x[j] = Complex::ZERO;
    }
    for p in b.col_start(k)..b.col_end(k) {
        x[b.row_index(p)] = b.value(p);
    }

    for px in top..n {
        let j = xi[px];
        let col = match pinv {
            Some(pinv) if pinv[j] < 0 => continue,
            Some(pinv) => pinv[j] as usize,
            None => j,
        };
        let (start, end) = (g.col_start(col), g.col_end(col));
        if start == end {
            return Err(if lower {
                KernelError::DiagonalNotFirst { col }
            } else {
                KernelError::DiagonalNotLast { col }
            });
        }
        let (diag, rest) = if lower {
            (start, start + 1..end)
        } else {
            (end - 1, start..end - 1)
        };
        if gx[diag].is_zero() {
            return Err(KernelError::ZeroPivot { col });
        }
        x[j] /= gx[diag];
        let xj = x[j];
        for p in rest {
            x[g.row_index(p)] -= gx[p] * xj;
        }
    }
    Ok(top)
}
