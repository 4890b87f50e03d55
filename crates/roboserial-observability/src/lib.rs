// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # roboserial-observability
//!
//! Logging setup shared by the roboserial crates and tools, with per-crate
//! debug flag support.
//!
//! ## Features
//! - `file-logging`: JSON log files in timestamped run folders

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Known roboserial crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "roboserial",
    "roboserial-hal",
    "roboserial-config",
    "roboserial-observability",
];

/// Tracing target of a crate name (`roboserial-hal` -> `roboserial_hal`)
pub fn crate_target(crate_name: &str) -> String {
    crate_name.replace('-', "_")
}
