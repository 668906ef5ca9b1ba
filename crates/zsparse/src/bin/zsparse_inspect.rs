use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use zsparse::kernel::{drop_below_tolerance, etree, norm1, postorder};
use zsparse::matrix::dump::{dump, dump_triplet};
use zsparse::matrix::loader::load_triplet_file;
use zsparse::{CscMatrix, KernelConfig};

// seconds, milliseconds or microseconds with three decimals; whole ns below
fn fmt_duration(d: Duration) -> String {
    const UNITS: [(f64, &str); 3] = [(1.0, "s"), (1e3, "ms"), (1e6, "us")];
    let secs = d.as_secs_f64();
    match UNITS.iter().find(|(scale, _)| secs * scale >= 1.0) {
        Some((scale, unit)) => format!("{:.3}{unit}", secs * scale),
        None => format!("{}ns", d.as_nanos()),
    }
}

fn print_timing_breakdown(stages: &[(&str, Duration)], total_elapsed: Duration) {
    let accounted: Duration = stages.iter().map(|(_, d)| *d).sum();
    let total_secs = total_elapsed.as_secs_f64();
    let pct = |d: Duration| {
        if total_secs > 0.0 {
            d.as_secs_f64() / total_secs * 100.0
        } else {
            0.0
        }
    };

    println!();
    println!(
        "timing breakdown (accounted {}, total {}):",
        fmt_duration(accounted),
        fmt_duration(total_elapsed)
    );
    for (name, dur) in stages {
        println!("  {name:<22} {:>12} ({:>6.2}%)", fmt_duration(*dur), pct(*dur));
    }
    let other = total_elapsed.saturating_sub(accounted);
    println!(
        "  {:<22} {:>12} ({:>6.2}%)",
        "other_overhead",
        fmt_duration(other),
        pct(other)
    );
}

#[derive(Parser, Debug)]
#[command(
    about = "Loads a complex triplet file (`row col re im` per line), compresses it to CSC and prints a listing.",
    after_help = "Set RUST_LOG=debug (or trace) for kernel-level logging.",
    version
)]
struct Args {
    /// Sum duplicate entries after compressing.
    #[arg(long)]
    sum_duplicates: bool,

    /// Drop entries with |a_ij| <= TOL.
    #[arg(long, value_name = "TOL")]
    drop_tol: Option<f64>,

    /// List the conjugate transpose instead of the matrix.
    #[arg(long)]
    transpose: bool,

    /// Print every entry instead of truncating the listing.
    #[arg(long)]
    full: bool,

    /// Also list the triplet form in insertion order.
    #[arg(long)]
    triplet: bool,

    /// Print the elimination tree and its postorder (square matrices only).
    #[arg(long)]
    etree: bool,

    /// Write the CSC matrix as JSON to this file.
    #[arg(long, value_name = "OUT")]
    json: Option<PathBuf>,

    /// Path to the triplet file.
    #[arg(value_name = "PATH")]
    path: PathBuf,
}

fn print_matrix_stats(path: &Path, a: &CscMatrix) {
    println!("matrix: {}", path.display());
    println!("dim: {} x {}", a.dim.nrows, a.dim.ncols);
    println!("nnz: {} (nzmax {})", a.nnz(), a.nzmax());
    println!("square: {}", a.is_square());
    println!("1-norm: {}", norm1(a));
}

fn print_tree(a: &CscMatrix, limit: usize) -> Result<()> {
    let parent = etree(a, false)?;
    let post = postorder(&parent)?;
    let roots = parent.iter().filter(|&&p| p < 0).count();
    println!("etree: {roots} root(s)");
    let shown = post.len().min(limit);
    let head: Vec<String> = post[..shown].iter().map(|k| k.to_string()).collect();
    let tail = if shown < post.len() { " ..." } else { "" };
    println!("postorder: {}{tail}", head.join(" "));
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logger: {}", e))?;

    let total_start = Instant::now();
    let mut stages: Vec<(&str, Duration)> = Vec::new();

    let args = Args::parse();
    let mut config = KernelConfig::default();
    if let Some(tol) = args.drop_tol {
        config.drop_tol = tol;
    }
    config.validate();
    log::debug!("config: {config:?}");

    let t = Instant::now();
    let triplet = load_triplet_file(&args.path, &config)
        .with_context(|| format!("failed to load triplet file {}", args.path.display()))?;
    stages.push(("load_triplet", t.elapsed()));

    if args.triplet {
        let limit = (!args.full).then_some(config.dump_limit);
        print!("{}", dump_triplet(&triplet, limit));
    }

    let t = Instant::now();
    let mut a = triplet
        .compress()
        .with_context(|| format!("failed to compress {} x {}", triplet.dim.nrows, triplet.dim.ncols))?;
    stages.push(("compress", t.elapsed()));

    if args.sum_duplicates {
        let t = Instant::now();
        let before = a.nnz();
        let nz = a.sum_duplicates()?;
        log::info!("summed duplicates: {before} -> {nz} entries");
        stages.push(("sum_duplicates", t.elapsed()));
    }

    if args.drop_tol.is_some() {
        let t = Instant::now();
        let before = a.nnz();
        let nz = drop_below_tolerance(&mut a, config.drop_tol)?;
        log::info!("dropped {} entries with |a_ij| <= {}", before - nz, config.drop_tol);
        stages.push(("drop_tolerance", t.elapsed()));
    }

    if args.transpose {
        let t = Instant::now();
        a = a.adjoint()?;
        stages.push(("adjoint", t.elapsed()));
    }

    if config.check_invariants {
        let t = Instant::now();
        a.check_invariants().context("invalid CSC matrix")?;
        stages.push(("check_invariants", t.elapsed()));
    }

    print_matrix_stats(&args.path, &a);

    let t = Instant::now();
    let limit = (!args.full).then_some(config.dump_limit);
    print!("{}", dump(&a, limit));
    stages.push(("dump", t.elapsed()));

    if args.etree {
        if a.is_square() {
            let t = Instant::now();
            print_tree(&a, config.dump_limit)?;
            stages.push(("etree_postorder", t.elapsed()));
        } else {
            log::warn!("--etree needs a square matrix, got {} x {}", a.dim.nrows, a.dim.ncols);
        }
    }

    if let Some(out) = &args.json {
        let t = Instant::now();
        let json = serde_json::to_string_pretty(&a)?;
        std::fs::write(out, json).with_context(|| format!("failed to write {}", out.display()))?;
        log::info!("wrote {}", out.display());
        stages.push(("write_json", t.elapsed()));
    }

    print_timing_breakdown(&stages, total_start.elapsed());
    Ok(())
}
