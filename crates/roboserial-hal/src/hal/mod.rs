// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Hardware Abstraction Layer (HAL) trait definitions
//!
//! This module defines the platform-agnostic serial capability that each
//! platform backend implements, plus the data shared by all backends:
//! - Serial I/O (SerialIO)
//! - Line settings (LineSettings)
//! - Traffic monitor (ByteMonitor)

/// Fixed line profile (115200 8N1 raw).
pub mod line;
/// Hex dump of serial traffic.
pub mod monitor;
/// Serial input/output traits for UART-style communication.
pub mod serial;

// Re-export trait types
pub use line::{LineSettings, LINE_PROFILE};
pub use monitor::{hex_dump, ByteMonitor, MONITOR_TARGET};
pub use serial::{ReadOutcome, SerialIO};
