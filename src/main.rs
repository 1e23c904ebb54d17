// src/main.rs

use anyhow::Result;
use clap::Parser;
use scripturesets::{convert_file, to_json_string, ScriptureSets};
use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Convert a tab-delimited scripture set sheet into nested JSON"
)]
struct Args {
    /// Tab-delimited source file
    #[arg(short, long, default_value = "ScriptureSetsESP300Kingdom.csv")]
    input: PathBuf,

    /// JSON destination file
    #[arg(short, long, default_value = "ScriptureSetsESP300Kingdom.json")]
    output: PathBuf,

    /// Also print the JSON document to stdout
    #[arg(long)]
    print: bool,
}

fn main() -> ExitCode {
    // ─── 1) init logging ─────────────────────────────────────────────
    // logs go to stderr; stdout carries the summary
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    // ─── 2) parse args ───────────────────────────────────────────────
    let args = Args::parse();

    // ─── 3) convert + report ─────────────────────────────────────────
    let stdout = io::stdout();
    match execute(&args, &mut stdout.lock()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("failed to write to stdout: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run one conversion, writing the banner, summary or `Error:` line to `out`.
/// Returns whether the conversion succeeded.
fn execute<W: Write>(args: &Args, out: &mut W) -> io::Result<bool> {
    writeln!(
        out,
        "Converting {} to {}...",
        args.input.display(),
        args.output.display()
    )?;

    match run(args, out) {
        Ok(()) => Ok(true),
        Err(e) => {
            writeln!(out, "Error: {:#}", e)?;
            Ok(false)
        }
    }
}

fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let sets = convert_file(&args.input, &args.output)?;

    writeln!(out, "Successfully converted to {}", args.output.display())?;
    print_summary(out, &sets)?;

    if args.print {
        writeln!(out, "{}", to_json_string(&sets)?)?;
    }
    Ok(())
}

fn print_summary<W: Write>(out: &mut W, sets: &ScriptureSets) -> io::Result<()> {
    writeln!(out, "Found {} main categories:", sets.len())?;
    for name in sets.category_names() {
        writeln!(out, "  - {}", name)?;
    }
    Ok(())
}
