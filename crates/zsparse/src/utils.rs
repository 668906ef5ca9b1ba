// SPDX-License-Identifier: LGPL-2.1-or-later
//
// This file is based on the CXSparse implementation by Timothy A. Davis.
//
// CXSparse, Copyright (c) 2006-2024, Timothy A. Davis. All Rights Reserved.

use crate::error::{KernelError, KernelResult};

pub const EMPTY: isize = -1;

/// `vec![fill; len]`, but a failed allocation comes back as
/// `AllocationFailed` instead of aborting the process.
pub fn try_filled<T: Clone>(len: usize, fill: T) -> KernelResult<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| KernelError::AllocationFailed { requested: len })?;
    v.resize(len, fill);
    Ok(v)
}

/// p[0..n] = cumulative sum of c[0..n-1], and copies p[0..n-1] back into c.
/// Returns the total, i.e. p[n].
pub fn cumsum(p: &mut [usize], c: &mut [usize]) -> usize {
    debug_assert!(p.len() >= c.len() + 1);
    let mut nz = 0;
    for (pi, ci) in p.iter_mut().zip(c.iter_mut()) {
        *pi = nz;
        nz += *ci;
        *ci = *pi;
    }
    p[c.len()] = nz;
    nz
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cumsum_writes_offsets_into_both_arrays() {
        let mut c = vec![2, 0, 3, 1];
        let mut p = vec![0; 5];
        let total = cumsum(&mut p, &mut c);
        assert_eq!(total, 6);
        assert_eq!(p, vec![0, 2, 2, 5, 6]);
        assert_eq!(c, vec![0, 2, 2, 5]);
    }

    #[test]
    fn try_filled_reports_impossible_sizes() {
        assert_eq!(try_filled(3, 7u8).unwrap(), vec![7, 7, 7]);
        assert!(matches!(
            try_filled(usize::MAX / 2, 0usize),
            Err(KernelError::AllocationFailed { .. })
        ));
    }
}
