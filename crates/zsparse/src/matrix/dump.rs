// Human-readable listings of sparse matrices. Diagnostic only; the layout is
// not meant to be parsed back.

use std::fmt::Write;

use crate::kernel::norm1;
use crate::matrix::csc::CscMatrix;
use crate::matrix::triplet::TripletMatrix;

/// List a CSC matrix column by column. With `limit = Some(k)` only the
/// first `k` entries are printed, followed by `  ...` if more remain.
pub fn dump(a: &CscMatrix, limit: Option<usize>) -> String {
    let mut out = String::new();
    let (m, n) = (a.dim.nrows, a.dim.ncols);
    let _ = writeln!(
        out,
        "{m}-by-{n}, nzmax: {} nnz: {}, 1-norm: {}",
        a.nzmax(),
        a.nnz(),
        norm1(a)
    );

    let mut printed = 0usize;
    for j in 0..n {
        let (start, end) = (a.col_start(j), a.col_end(j));
        let _ = writeln!(out, "    col {j} : locations {start} to {}", end as isize - 1);
        for p in start..end {
            if limit.is_some_and(|k| printed >= k) {
                out.push_str("  ...\n");
                return out;
            }
            let _ = writeln!(out, "      {} : {}", a.row_index(p), a.value(p));
            printed += 1;
        }
    }
    out
}

/// List a triplet matrix in insertion order.
pub fn dump_triplet(t: &TripletMatrix, limit: Option<usize>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "triplet: {}-by-{}, nzmax: {} nnz: {}",
        t.dim.nrows,
        t.dim.ncols,
        t.nzmax(),
        t.nnz()
    );
    for (k, (i, j, v)) in t.iter().enumerate() {
        if limit.is_some_and(|l| k >= l) {
            out.push_str("  ...\n");
            break;
        }
        let _ = writeln!(out, "    {i} {j} : {v}");
    }
    out
}
