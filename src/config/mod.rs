//! Configuration module for Hut-Ripple
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use hut_ripple::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("huts.toml")).unwrap();
//! println!("Targets configured: {}", config.targets.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, DateRangeConfig, HttpConfig, OrchestrationConfig, OutputConfig, TargetEntry,
    DEFAULT_DAYS_AHEAD,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
