#![warn(rust_2024_compatibility, clippy::all)]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cbo::cli::{Args, normalize_legacy_flags};
use cbo::lint::run_once;

fn main() -> Result<()> {
    // stdout carries diagnostics only
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse_from(normalize_legacy_flags(std::env::args()));
    let code = run_once(args)?;
    std::process::exit(code);
}
