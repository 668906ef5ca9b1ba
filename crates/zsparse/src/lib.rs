//! Complex-valued sparse matrix kernels: triplet and compressed-column
//! storage, and the graph and numeric primitives sparse direct solvers are
//! built from (scatter, reach, elimination trees, postorder, Householder
//! reflections, triangular solves).

pub mod complex;
pub mod config;
pub mod error;
pub mod kernel;
pub mod matrix;
pub mod utils;

pub use complex::Complex;
pub use config::KernelConfig;
pub use error::{KernelError, KernelResult};
pub use matrix::Dim;
pub use matrix::csc::CscMatrix;
pub use matrix::triplet::TripletMatrix;
