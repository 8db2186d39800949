// src/bin/wikigraph.rs
use std::process;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use wikigraph_core::cli::{self, Args};

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("{} {e}", "error:".red().bold());
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    cli::run(&args)?;
    Ok(())
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();
}
