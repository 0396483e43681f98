pub mod classpath;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod exit;
pub mod inspect;
pub mod metadata;
pub mod render;
pub mod reporting;
pub mod resolver;
pub mod skeleton;
pub mod store;
pub mod test_path;
