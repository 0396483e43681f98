use crate::events::DEFAULT_EVENTS_FILE;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "utskel",
    version,
    about = "Generate unit-test skeletons mirrored into the nearest test tree"
)]
pub struct Cli {
    /// Class directories, class files, or class names
    #[arg(value_name = "INPUT", required_unless_present = "init")]
    pub inputs: Vec<String>,
    /// Test engine profile
    #[arg(long, short, default_value = "php_unit")]
    pub engine: String,
    /// Configuration file (defaults to ./utskel.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Directories scanned so class names can be resolved
    #[arg(long, short, value_name = "DIR")]
    pub autoload: Vec<PathBuf>,
    /// Append every log entry as JSON to this file (.utskel/events.jsonl when no FILE is given)
    #[arg(
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = DEFAULT_EVENTS_FILE
    )]
    pub events: Option<PathBuf>,
    /// Show debug-level log entries
    #[arg(long, short)]
    pub verbose: bool,
    /// Write a starter utskel.toml and exit
    #[arg(long)]
    pub init: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inputs_and_flags() {
        let cli = Cli::parse_from([
            "utskel", "lib/model", "Foo", "--engine", "lime", "-a", "lib", "-a", "plugins", "-v",
        ]);
        assert_eq!(cli.inputs, vec!["lib/model", "Foo"]);
        assert_eq!(cli.engine, "lime");
        assert_eq!(cli.autoload.len(), 2);
        assert!(cli.verbose);
        assert!(cli.config.is_none());
        assert!(cli.events.is_none());
    }

    #[test]
    fn test_events_flag_defaults_to_trail_file() {
        let cli = Cli::parse_from(["utskel", "Foo", "--events"]);
        assert_eq!(cli.events, Some(PathBuf::from(DEFAULT_EVENTS_FILE)));

        let cli = Cli::parse_from(["utskel", "Foo", "--events", "out/trail.jsonl"]);
        assert_eq!(cli.events, Some(PathBuf::from("out/trail.jsonl")));
    }

    #[test]
    fn test_input_required_without_init() {
        assert!(Cli::try_parse_from(["utskel"]).is_err());
        assert!(Cli::try_parse_from(["utskel", "--init"]).is_ok());
    }
}
