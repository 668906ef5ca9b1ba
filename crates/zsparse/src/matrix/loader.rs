use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::complex::Complex;
use crate::config::KernelConfig;
use crate::error::{KernelError, KernelResult};
use crate::matrix::triplet::TripletMatrix;

/// Load a triplet matrix from a text file.
///
/// Format: one entry per line, `row col re im`, zero-based indices,
/// whitespace separated. Blank lines are skipped. Any other line that does
/// not hold exactly four numeric tokens aborts the load.
pub fn load_triplet_file(path: impl AsRef<Path>, config: &KernelConfig) -> KernelResult<TripletMatrix> {
    let path = path.as_ref();
    let f = File::open(path)?;
    log::debug!("loading triplet matrix from {}", path.display());
    load_triplet_from_reader(BufReader::new(f), config)
}

/// Same as [`load_triplet_file`], but reads from any buffered reader (useful for tests).
pub fn load_triplet_from_reader<R: BufRead>(reader: R, config: &KernelConfig) -> KernelResult<TripletMatrix> {
    let mut t = TripletMatrix::new(0, 0, config.initial_nzmax, true);

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line?;
        let l = line.trim();
        if l.is_empty() {
            continue;
        }

        let parts: Vec<&str> = l.split_whitespace().collect();
        if parts.len() != 4 {
            return Err(KernelError::MalformedInput {
                line: line_no,
                msg: format!("expected 4 tokens 'row col re im', got {}: {}", parts.len(), l),
            });
        }

        let row: isize = parts[0].parse().map_err(|e| KernelError::MalformedInput {
            line: line_no,
            msg: format!("bad row index '{}': {}", parts[0], e),
        })?;
        let col: isize = parts[1].parse().map_err(|e| KernelError::MalformedInput {
            line: line_no,
            msg: format!("bad col index '{}': {}", parts[1], e),
        })?;
        let re: f64 = parts[2].parse().map_err(|e| KernelError::MalformedInput {
            line: line_no,
            msg: format!("bad real part '{}': {}", parts[2], e),
        })?;
        let im: f64 = parts[3].parse().map_err(|e| KernelError::MalformedInput {
            line: line_no,
            msg: format!("bad imaginary part '{}': {}", parts[3], e),
        })?;

        t.entry(row, col, Complex::new(re, im))?;
    }

    log::debug!(
        "loaded {}x{} triplet matrix with {} entries",
        t.dim.nrows,
        t.dim.ncols,
        t.nnz()
    );
    Ok(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    #[test]
    fn parse_small_matrix() {
        let text = "
0 0 1.5 -2
2 1 3 0

1 1 0 4e-3
2 1 1 1
";
        let t = load_triplet_from_reader(Cursor::new(text), &KernelConfig::default()).unwrap();
        assert_eq!(t.nnz(), 4);
        assert_eq!((t.dim.nrows, t.dim.ncols), (3, 2));
        let entries: Vec<_> = t.iter().collect();
        assert_eq!(entries[0], (0, 0, Complex::new(1.5, -2.0)));
        assert_eq!(entries[2], (1, 1, Complex::new(0.0, 4e-3)));
        assert_eq!(entries[3], (2, 1, Complex::new(1.0, 1.0)));
    }

    #[rstest]
    #[case("0 0 1\n", 1)]
    #[case("0 0 1 2\n0 1 2 3 4\n", 2)]
    #[case("0 0 1 2\nx 0 1 2\n", 2)]
    #[case("0 0 1 2\n0 0.5 1 2\n", 2)]
    #[case("0 0 1 2\n1 1 1 nope\n", 2)]
    fn malformed_lines_abort(#[case] text: &str, #[case] bad_line: usize) {
        let err = load_triplet_from_reader(Cursor::new(text), &KernelConfig::default()).unwrap_err();
        match err {
            KernelError::MalformedInput { line, .. } => assert_eq!(line, bad_line),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn negative_index_is_invalid() {
        let err = load_triplet_from_reader(Cursor::new("-1 0 1 1\n"), &KernelConfig::default())
            .unwrap_err();
        assert!(matches!(err, KernelError::InvalidIndex { row: -1, col: 0 }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_triplet_file("/nonexistent/zsparse/matrix.txt", &KernelConfig::default())
            .unwrap_err();
        assert!(matches!(err, KernelError::Io(_)));
    }
}
