// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-roboserial-hal` to raise one crate to debug
//! level while the rest stay at the configured default.

use std::collections::BTreeSet;
use std::env;

use crate::{crate_target, KNOWN_CRATES};

/// Parse debug flags from command-line arguments
///
/// # Example
/// ```rust
/// use roboserial_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(vec!["--debug-roboserial-hal".to_string()]);
/// assert!(flags.is_enabled("roboserial-hal"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CrateDebugFlags {
    pub enabled_crates: BTreeSet<String>,
    /// Targets forced to trace level regardless of crate flags
    pub trace_targets: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// Looks for arguments matching `--debug-{crate-name}` pattern.
    /// Also supports `--debug-all` to enable all crates.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();

        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
                continue;
            }

            if let Some(crate_name) = arg.strip_prefix("--debug-") {
                if !crate_name.is_empty() {
                    flags.enabled_crates.insert(crate_name.to_string());
                }
            }
        }

        flags
    }

    /// Enable debug for every known crate
    pub fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enabled_crates.insert(crate_name.to_string());
        }
    }

    /// Add crates named in `ROBOSERIAL_DEBUG`
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(env_var) = env::var("ROBOSERIAL_DEBUG") {
            merge_env_flags(&mut self, &env_var);
        }
        self
    }

    /// Force a tracing target (e.g. `roboserial_hal::monitor`) to trace level
    pub fn enable_trace(&mut self, target: &str) {
        self.trace_targets.insert(target.to_string());
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(crate_name)
    }

    /// Check if debug is enabled for any crate
    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// Create a tracing filter from debug flags
    ///
    /// Returns a filter string usable with `EnvFilter`, e.g.
    /// `"warn,roboserial_hal=debug"`. The default level comes first so the
    /// per-target directives refine it.
    pub fn to_filter_string(&self, default_level: &str) -> String {
        let mut filters = vec![default_level.to_lowercase()];
        for crate_name in &self.enabled_crates {
            filters.push(format!("{}=debug", crate_target(crate_name)));
        }
        for target in &self.trace_targets {
            filters.push(format!("{}=trace", target));
        }
        filters.join(",")
    }
}

fn merge_env_flags(flags: &mut CrateDebugFlags, env_var: &str) {
    if env_var.trim() == "all" {
        flags.enable_all();
        return;
    }
    for crate_name in env_var.split(',') {
        let crate_name = crate_name.trim();
        if !crate_name.is_empty() {
            flags.enabled_crates.insert(crate_name.to_string());
        }
    }
}

/// Help text listing the crates accepted by the debug flags
///
/// Tools append this to their `--help` output.
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug crates (use "all" for every crate):
  {}

Environment Variable:
  ROBOSERIAL_DEBUG={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  ROBOSERIAL_DEBUG=all                              Enable debug for all crates
"#,
        KNOWN_CRATES.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_crate_flag() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-roboserial-hal".to_string()]);
        assert!(flags.is_enabled("roboserial-hal"));
        assert!(!flags.is_enabled("roboserial-config"));
    }

    #[test]
    fn test_unrelated_args_ignored() {
        let flags = CrateDebugFlags::from_args(vec![
            "serial_probe".to_string(),
            "--debug-".to_string(),
            "/dev/ttyUSB0".to_string(),
        ]);
        assert!(!flags.any_enabled());
    }

    #[test]
    fn test_debug_all() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-all".to_string()]);
        for crate_name in KNOWN_CRATES {
            assert!(flags.is_enabled(crate_name), "{} should be enabled", crate_name);
        }
    }

    #[test]
    fn test_filter_string_uses_targets() {
        let mut flags = CrateDebugFlags::from_args(vec!["--debug-roboserial-hal".to_string()]);
        flags.enable_trace("roboserial_hal::monitor");
        let filter = flags.to_filter_string("WARN");
        assert!(filter.starts_with("warn,"));
        assert!(filter.contains("roboserial_hal=debug"));
        assert!(filter.contains("roboserial_hal::monitor=trace"));
    }

    #[test]
    fn test_filter_string_without_flags() {
        let flags = CrateDebugFlags::default();
        assert_eq!(flags.to_filter_string("info"), "info");
    }

    #[test]
    fn test_env_flags_merge() {
        let mut flags = CrateDebugFlags::default();
        merge_env_flags(&mut flags, "roboserial-hal, roboserial-config,");
        assert!(flags.is_enabled("roboserial-hal"));
        assert!(flags.is_enabled("roboserial-config"));
        assert_eq!(flags.enabled_crates.len(), 2);

        let mut all = CrateDebugFlags::default();
        merge_env_flags(&mut all, "all");
        assert_eq!(all.enabled_crates.len(), KNOWN_CRATES.len());
    }

    #[test]
    fn test_help_lists_every_crate() {
        let help = debug_flags_help();
        for crate_name in KNOWN_CRATES {
            assert!(help.contains(crate_name), "{} missing from help", crate_name);
        }
        assert!(help.contains("ROBOSERIAL_DEBUG"));
    }
}
