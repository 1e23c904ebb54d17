// src/bin/convert_all.rs

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use glob::glob;
use indexmap::IndexMap;
use rayon::prelude::*;
use scripturesets::convert_file;
use std::{
    io::{self, Write},
    path::PathBuf,
};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Convert every matching sheet to a sibling `.json` file.
#[derive(Parser, Debug)]
#[command(version, about = "Convert many scripture set sheets in parallel")]
struct Args {
    /// Glob pattern selecting the tab-delimited inputs
    #[arg(default_value = "./*.csv")]
    pattern: String,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    // 1) resolve inputs
    let inputs: Vec<PathBuf> = glob(&args.pattern)
        .with_context(|| format!("Failed to read glob pattern '{}'", args.pattern))?
        .filter_map(|entry| entry.ok())
        .filter(|p| p.is_file() && p.extension().map_or(true, |ext| ext != "json"))
        .collect();
    if inputs.is_empty() {
        bail!("No files found matching '{}'", args.pattern);
    }
    info!("{} files to convert", inputs.len());

    // 2) convert and report
    let total = inputs.len();
    let failed = convert_all(inputs, &mut io::stdout().lock())?;
    if failed > 0 {
        bail!("{} of {} conversions failed", failed, total);
    }
    Ok(())
}

/// Pair each input with its `.json` destination. Inputs that share a
/// destination (e.g. `a.csv` and `a.tsv`) are all refused.
fn plan_destinations(inputs: Vec<PathBuf>) -> Vec<(PathBuf, Result<PathBuf>)> {
    let mut by_dst: IndexMap<PathBuf, Vec<PathBuf>> = IndexMap::new();
    for src in &inputs {
        by_dst
            .entry(src.with_extension("json"))
            .or_default()
            .push(src.clone());
    }

    inputs
        .into_iter()
        .map(|src| {
            let dst = src.with_extension("json");
            let sources = &by_dst[&dst];
            if sources.len() > 1 {
                let others: Vec<String> = sources
                    .iter()
                    .filter(|s| **s != src)
                    .map(|s| s.display().to_string())
                    .collect();
                let clash = anyhow!(
                    "{} would also be written from {}",
                    dst.display(),
                    others.join(", ")
                );
                (src, Err(clash))
            } else {
                (src, Ok(dst))
            }
        })
        .collect()
}

/// Convert every input in parallel, write one line per input to `out`, and
/// return how many failed.
fn convert_all<W: Write>(inputs: Vec<PathBuf>, out: &mut W) -> io::Result<usize> {
    // each file owns its own builder and temp file
    let results: Vec<(PathBuf, Result<(PathBuf, usize, usize)>)> = plan_destinations(inputs)
        .into_par_iter()
        .map(|(src, dst)| {
            let outcome = dst.and_then(|dst| {
                let sets = convert_file(&src, &dst)?;
                Ok((dst, sets.len(), sets.entry_count()))
            });
            (src, outcome)
        })
        .collect();

    let mut failed = 0;
    for (src, outcome) in &results {
        match outcome {
            Ok((dst, categories, entries)) => writeln!(
                out,
                "{} -> {}: {} categories, {} entries",
                src.display(),
                dst.display(),
                categories,
                entries
            )?,
            Err(e) => {
                failed += 1;
                error!(src = %src.display(), "conversion failed");
                writeln!(out, "{}: Error: {:#}", src.display(), e)?;
            }
        }
    }
    Ok(failed)
}
