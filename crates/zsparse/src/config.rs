// SPDX-License-Identifier: LGPL-2.1-or-later

/// Tunables shared by the loader, the dump and the inspection binary.
#[derive(Debug, Clone, Copy)]
pub struct KernelConfig {
    /// Initial capacity of a triplet matrix built by the loader.
    pub initial_nzmax: usize,
    /// Number of entries a truncated dump prints before `...`.
    pub dump_limit: usize,
    /// Entries with `|a_ij| <= drop_tol` are removed by `drop_below_tolerance`.
    pub drop_tol: f64,
    /// Run `CscMatrix::check_invariants` after building or transforming a matrix.
    pub check_invariants: bool,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            initial_nzmax: 16,
            dump_limit: 20,
            drop_tol: 0.0,
            check_invariants: cfg!(debug_assertions),
        }
    }
}

impl KernelConfig {
    pub fn validate(&mut self) {
        self.initial_nzmax = self.initial_nzmax.max(1);
        self.dump_limit = self.dump_limit.max(1);
        if !self.drop_tol.is_finite() || self.drop_tol < 0.0 {
            self.drop_tol = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_clamps_out_of_range_values() {
        let mut config = KernelConfig {
            initial_nzmax: 0,
            dump_limit: 0,
            drop_tol: f64::NAN,
            check_invariants: true,
        };
        config.validate();
        assert_eq!(config.initial_nzmax, 1);
        assert_eq!(config.dump_limit, 1);
        assert_eq!(config.drop_tol, 0.0);
    }
}
