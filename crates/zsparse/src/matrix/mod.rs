pub mod builder;
pub mod csc;
pub mod dump;
pub mod loader;
pub mod triplet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dim {
    pub nrows: usize,
    pub ncols: usize,
}
