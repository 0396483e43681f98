// src/events.rs
//! Machine-readable log trail.
//!
//! With `--events`, every `log` event is appended as one JSON line to a file,
//! `.utskel/events.jsonl` unless another path is given.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Default location of the trail relative to the working directory.
pub const DEFAULT_EVENTS_FILE: &str = ".utskel/events.jsonl";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Debug,
    Info,
}

impl Level {
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("debug") => Self::Debug,
            _ => Self::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub timestamp: u64,
    pub category: String,
    pub message: String,
    pub level: Level,
}

#[derive(Debug, Clone)]
pub struct EventLogger {
    log_path: PathBuf,
}

impl EventLogger {
    #[must_use]
    pub fn new(log_path: &Path) -> Self {
        Self {
            log_path: log_path.to_path_buf(),
        }
    }

    pub fn log(&self, category: &str, message: &str, level: Level) {
        // Logging is best-effort. We swallow errors to avoid crashing main flow.
        if let Ok(json) = Self::serialize_event(category, message, level) {
            let _ = self.append_to_file(&json);
        }
    }

    fn serialize_event(category: &str, message: &str, level: Level) -> Result<String> {
        let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        let event = LogEvent {
            timestamp,
            category: category.to_string(),
            message: message.to_string(),
            level,
        };
        Ok(serde_json::to_string(&event)?)
    }

    fn append_to_file(&self, line: &str) -> Result<()> {
        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_events_are_appended_as_json_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("events.jsonl");
        let logger = EventLogger::new(&path);

        logger.log("dir+", "/tmp/test/unit/model", Level::Info);
        logger.log("parsing", "Parsing class \"Foo\"", Level::Debug);

        let content = fs::read_to_string(&path).unwrap();
        let events: Vec<LogEvent> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].category, "dir+");
        assert_eq!(events[1].level, Level::Debug);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(Level::parse(Some("debug")), Level::Debug);
        assert_eq!(Level::parse(None), Level::Info);
        assert_eq!(Level::parse(Some("loud")), Level::Info);
    }
}
