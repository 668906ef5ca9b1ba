// SPDX-License-Identifier: LGPL-2.1-or-later
//
// The routines in this module are based on CXSparse by Timothy A. Davis.
//
// CXSparse, Copyright (c) 2006-2024, Timothy A. Davis. All Rights Reserved.

mod etree;
mod filter;
mod house;
mod ops;
mod permute;
mod postorder;
mod reach;
mod scatter;
mod trisolve;

pub use etree::etree;
pub use filter::{drop_below_tolerance, drop_zeros, filter};
pub use house::{Householder, happly, house};
pub use ops::{gaxpy, norm1};
pub use permute::{invert_permutation, permute};
pub use postorder::{postorder, postorder_with};
pub use reach::{reach, spsolve};
pub use scatter::{add, multiply, scatter};
pub use trisolve::{lsolve, ltsolve, usolve, utsolve};
