//! Console output for generation runs.
//!
//! `ConsoleLog` is installed on the generator's `log` event through
//! [`Listener::listen`]; each entry is printed as a colored, category-tagged
//! line on stderr and optionally mirrored to the JSON-lines trail.

use crate::events::{EventLogger, Level};
use crate::skeleton::Generated;
use crate::store::{Callback, Listener, LOG};
use colored::Colorize;
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct ConsoleLog {
    verbose: bool,
    trail: Option<EventLogger>,
}

impl ConsoleLog {
    #[must_use]
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            trail: None,
        }
    }

    #[must_use]
    pub fn with_trail(mut self, trail: EventLogger) -> Self {
        self.trail = Some(trail);
        self
    }

    fn emit(&self, args: &[Value]) {
        let text = |idx: usize| args.get(idx).and_then(Value::as_str);
        let category = text(0).unwrap_or("log");
        let message = text(1).unwrap_or_default();
        let level = Level::parse(text(2));

        if let Some(trail) = &self.trail {
            trail.log(category, message, level);
        }
        if level == Level::Debug && !self.verbose {
            return;
        }
        eprintln!("{} {}", tag(category), message);
    }
}

impl Listener for ConsoleLog {
    fn events(&self) -> Vec<(String, Callback)> {
        let console = self.clone();
        vec![(
            LOG.to_string(),
            Callback::new(move |args: &[Value]| {
                console.emit(args);
                Value::Null
            }),
        )]
    }
}

fn tag(category: &str) -> colored::ColoredString {
    let label = format!("{category:>9}");
    match category {
        "file+" => label.green().bold(),
        "dir+" => label.cyan().bold(),
        "read-dir" | "parsing" => label.dimmed(),
        _ => label.yellow(),
    }
}

/// Prints the run summary on stdout.
pub fn print_summary(generated: &[Generated]) {
    for item in generated {
        println!(
            "  {} {} {}",
            "✓".green(),
            item.identifier.bold(),
            item.path.display().to_string().dimmed()
        );
    }
    let created: usize = generated.iter().map(|g| g.created_dirs).sum();
    println!(
        "{} {} ({} {} created)",
        "Generated".green().bold(),
        pluralize("skeleton", generated.len()),
        created,
        if created == 1 { "directory" } else { "directories" }
    );
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        format!("1 {word}")
    } else {
        format!("{count} {word}s")
    }
}
