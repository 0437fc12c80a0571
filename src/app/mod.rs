//! Application Layer
//!
//! CLI surface, TOML configuration, and PNG export.

pub mod cli;
pub mod config;
pub mod export;

pub use cli::{Cli, Commands};
pub use config::Config;
