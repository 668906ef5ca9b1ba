// SPDX-License-Identifier: LGPL-2.1-or-later
//
// Structured errors for the sparse kernel. Every kernel routine reports
// failure through `KernelResult` instead of panicking.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KernelError {
    // --- Shape / storage form ---
    #[error("invalid shape in {context}: expected {expected}, got {actual}")]
    InvalidShape {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("workspace `{name}` too small: need at least {required} entries, got {actual}")]
    WorkspaceTooSmall {
        name: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("{context} requires numerical values, but the matrix is pattern-only")]
    MissingValues { context: &'static str },

    // --- Indices ---
    #[error("invalid index (row={row}, col={col})")]
    InvalidIndex { row: isize, col: isize },

    #[error("invalid permutation: entry {index} has value {value} (n={n})")]
    InvalidPermutation { index: usize, value: usize, n: usize },

    #[error("invalid elimination forest: only {ordered} of {n} nodes reachable from a root")]
    InvalidForest { ordered: usize, n: usize },

    // --- Memory ---
    #[error("failed to allocate room for {requested} entries")]
    AllocationFailed { requested: usize },

    // --- Input data ---
    #[error("malformed input at line {line}: {msg}")]
    MalformedInput { line: usize, msg: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    // --- Triangular solve preconditions ---
    #[error("column {col}: diagonal entry is not stored last")]
    DiagonalNotLast { col: usize },

    #[error("column {col}: diagonal entry is not stored first")]
    DiagonalNotFirst { col: usize },

    #[error("zero pivot in column {col}")]
    ZeroPivot { col: usize },
}

pub type KernelResult<T> = Result<T, KernelError>;

impl KernelError {
    pub(crate) fn workspace(name: &'static str, required: usize, actual: usize) -> Self {
        Self::WorkspaceTooSmall {
            name,
            required,
            actual,
        }
    }

    pub(crate) fn shape(context: &'static str, expected: usize, actual: usize) -> Self {
        Self::InvalidShape {
            context,
            expected,
            actual,
        }
    }
}
