// src/bin/utskel.rs
use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use utskel_core::cli::{self, Cli};
use utskel_core::exit::SkeletonExit;

fn main() -> SkeletonExit {
    let result = run();
    if let Err(e) = &result {
        eprintln!("{} {e}", "error:".red().bold());
    }
    SkeletonExit::from(result)
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    if cli.init {
        return cli::handle_init();
    }
    cli::handle_generate(&cli)
}
