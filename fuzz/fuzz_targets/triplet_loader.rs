#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use zsparse::KernelConfig;
use zsparse::matrix::loader::load_triplet_from_reader;

fuzz_target!(|data: &[u8]| {
    let config = KernelConfig::default();
    if let Ok(t) = load_triplet_from_reader(Cursor::new(data), &config) {
        if let Ok(mut a) = t.compress() {
            let _ = a.check_invariants();
            let _ = a.sum_duplicates();
        }
    }
});
