// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{validate_config, ConfigError, ConfigResult, RoboserialConfig, CONFIG_FILE_NAME};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Find the roboserial configuration file
///
/// Search order:
/// 1. `ROBOSERIAL_CONFIG_PATH` environment variable
/// 2. Current working directory: `./roboserial.toml`
/// 3. Parent directories (up to 5 levels)
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("ROBOSERIAL_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(ConfigError::FileNotFound(format!(
                "Config file specified by ROBOSERIAL_CONFIG_PATH not found: {}",
                path.display()
            )));
        }
    }

    let mut search_paths = Vec::new();

    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd.clone();
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join(CONFIG_FILE_NAME));
                current = parent.to_path_buf();
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet ROBOSERIAL_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found, contains invalid TOML, or fails validation
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<RoboserialConfig> {
    let config_file = if let Some(path) = config_path {
        path.to_path_buf()
    } else {
        find_config_file()?
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: RoboserialConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    validate_config(&config)?;
    Ok(config)
}

fn parse_flag(value: &str) -> bool {
    let value = value.to_lowercase();
    value == "true" || value == "1" || value == "yes"
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `ROBOSERIAL_DEVICE_PATH` -> `device.path`
/// - `ROBOSERIAL_LOG_LEVEL` -> `logging.level`
/// - `ROBOSERIAL_LOG_DIR` -> `logging.log_dir`
/// - `ROBOSERIAL_MONITOR_TX` -> `monitor.tx`
/// - `ROBOSERIAL_MONITOR_RX` -> `monitor.rx`
pub fn apply_environment_overrides(config: &mut RoboserialConfig) {
    if let Ok(value) = env::var("ROBOSERIAL_DEVICE_PATH") {
        config.device.path = value;
    }
    if let Ok(value) = env::var("ROBOSERIAL_LOG_LEVEL") {
        config.logging.level = value;
    }
    if let Ok(value) = env::var("ROBOSERIAL_LOG_DIR") {
        config.logging.log_dir = Some(PathBuf::from(value));
    }
    if let Ok(value) = env::var("ROBOSERIAL_MONITOR_TX") {
        config.monitor.tx = parse_flag(&value);
    }
    if let Ok(value) = env::var("ROBOSERIAL_MONITOR_RX") {
        config.monitor.rx = parse_flag(&value);
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"device_path": "/dev/ttyS1", "monitor_tx": "true"}`)
pub fn apply_cli_overrides(config: &mut RoboserialConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("device_path") {
        config.device.path = value.clone();
    }
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
    if let Some(value) = cli_args.get("log_dir") {
        config.logging.log_dir = Some(PathBuf::from(value));
    }
    if let Some(value) = cli_args.get("monitor_tx") {
        config.monitor.tx = parse_flag(value);
    }
    if let Some(value) = cli_args.get("monitor_rx") {
        config.monitor.rx = parse_flag(value);
    }
}
