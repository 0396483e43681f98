// src/cli/mod.rs
//! CLI command handlers.

pub mod args;
pub mod handlers;

pub use args::Cli;
pub use handlers::{handle_generate, handle_init};
