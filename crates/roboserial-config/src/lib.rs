// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # roboserial Configuration System
//!
//! Type-safe configuration loader for the serial shim and its tools with
//! support for:
//! - TOML file parsing
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! ## Usage
//!
//! ```rust,no_run
//! use roboserial_config::load_config;
//!
//! let config = load_config(None, None).expect("Failed to load config");
//! println!("Device: {}", config.device.path);
//! ```
//!
//! The line profile (115200 8N1, raw) is intentionally absent: it is fixed by
//! the HAL and cannot be configured here.

/// Default configuration file name searched by [`find_config_file`].
pub const CONFIG_FILE_NAME: &str = "roboserial.toml";

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{apply_cli_overrides, apply_environment_overrides, find_config_file, load_config};
pub use types::*;
pub use validation::{validate_config, ConfigValidationError};

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
