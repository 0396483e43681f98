// src/cli/handlers.rs
use crate::cli::Cli;
use crate::config::{self, CONFIG_FILE};
use crate::events::EventLogger;
use crate::reporting::{self, ConsoleLog};
use crate::skeleton::Skeleton;
use crate::store::Listener;
use anyhow::{bail, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

/// Writes a starter `utskel.toml` in the working directory.
///
/// # Errors
/// Fails if the file already exists or cannot be written.
pub fn handle_init() -> Result<()> {
    if Path::new(CONFIG_FILE).exists() {
        bail!("{CONFIG_FILE} already exists");
    }
    fs::write(CONFIG_FILE, config::generate_toml())?;
    eprintln!("{}", format!("Created {CONFIG_FILE}").dimmed());
    Ok(())
}

/// Runs generation for every input, in order, stopping at the first failure.
///
/// # Errors
/// Returns the first generation error unchanged.
pub fn handle_generate(cli: &Cli) -> Result<()> {
    let mut skeleton = Skeleton::create();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| Path::new(CONFIG_FILE).to_path_buf());
    if cli.config.is_some() && !config_path.exists() {
        bail!("configuration file {} not found", config_path.display());
    }
    // Profiles are tuned before the engine's profile is lifted to the root.
    skeleton.configure(config::load_overrides(&config_path)?);
    skeleton.use_test_engine(&cli.engine)?;

    let mut console = ConsoleLog::new(cli.verbose);
    if let Some(events) = &cli.events {
        console = console.with_trail(EventLogger::new(events));
    }
    console.listen(skeleton.store_mut().events_mut());

    for root in &cli.autoload {
        let count = skeleton.autoload(root)?;
        skeleton.store().log_at(
            "autoload",
            &format!("{count} classes under {}", root.display()),
            "debug",
        );
    }

    let mut generated = Vec::new();
    for input in &cli.inputs {
        generated.extend(skeleton.run(input)?);
    }
    reporting::print_summary(&generated);
    Ok(())
}
