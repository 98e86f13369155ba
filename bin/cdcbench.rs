//! `cdcbench` CLI entry point.
//!
//! Walks `input_dir` recursively, runs every regular file through the
//! configured chunking algorithm, and appends `<digest_hex>,<size>` lines
//! to the configured output file. Thin by design: directory walking,
//! config parsing, and hashing all live in the library; this binary just
//! wires them together and reports diagnostics.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use cdcbench::algo::Algorithm;
use cdcbench::driver::StreamingDriver;
use cdcbench::error::{ConfigError, EngineError};
use cdcbench::hashing::{self, HashBackend};

#[derive(Parser, Debug)]
#[command(name = "cdcbench", about = "Benchmarks content-defined chunking algorithms over a directory tree.")]
struct Cli {
    /// Directory to walk recursively for input files.
    input_dir: PathBuf,

    /// Path to the `key = value` config file.
    config_path: PathBuf,

    /// Pass `t` to disable hashing entirely (digest field becomes `INVALID HASH`).
    #[arg(default_value = "f")]
    disable_hashing: String,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{}", message);
            eprintln!("cdcbench: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let config = cdcbench::config::parse(&cli.config_path).map_err(|e| e.to_string())?;
    let algorithm = Algorithm::new(config.algo).map_err(|e: ConfigError| e.to_string())?;

    let hashing_disabled = cli.disable_hashing.eq_ignore_ascii_case("t");
    let hasher: Option<Box<dyn HashBackend>> = if hashing_disabled {
        None
    } else {
        Some(hashing::by_name(&config.hashing_algo).map_err(|e| e.to_string())?)
    };

    let mut driver = StreamingDriver::new(algorithm, config.buffer_size, hasher);

    let out_file = File::create(&config.output_file).map_err(|e| format!("failed to open {}: {}", config.output_file, e))?;
    let mut out = BufWriter::new(out_file);

    let files = walk(&cli.input_dir).map_err(|e| format!("failed to walk {}: {}", cli.input_dir.display(), e))?;
    info!("found {} input files under {}", files.len(), cli.input_dir.display());

    for path in &files {
        info!("chunking {}", path.display());
        let mut reader = File::open(path).map_err(|e| format!("failed to open {}: {}", path.display(), e))?;
        let mut chunk_count = 0usize;
        driver
            .process_stream(&mut reader, |record| {
                chunk_count += 1;
                let digest_field = match &record.digest {
                    Some(bytes) => hex_encode(bytes),
                    None => "INVALID HASH".to_string(),
                };
                let _ = writeln!(out, "{},{}", digest_field, record.size);
            })
            .map_err(|e: EngineError| format!("{}: {}", path.display(), e))?;
        info!("{}: {} chunks", path.display(), chunk_count);
    }

    out.flush().map_err(|e| format!("failed to flush {}: {}", config.output_file, e))?;

    let metrics = driver.metrics();
    info!(
        "done: {} bytes, {:?} chunking time, {:?} hashing time",
        metrics.total_bytes, metrics.chunk_time, metrics.hash_time
    );
    Ok(())
}

/// Recursively collects every regular file under `root`, depth-first, in
/// directory-read order. Not a stable sort — determinism across runs on
/// the same filesystem is what the invariants in `tests/properties.rs`
/// rely on, not a particular traversal order.
fn walk(root: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                stack.push(path);
            } else if file_type.is_file() {
                out.push(path);
            }
        }
    }
    Ok(out)
}

fn hex_encode(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        use std::fmt::Write as _;
        let _ = write!(s, "{:02x}", b);
    }
    s
}
