// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Hex dump of serial traffic at trace level
//!
//! Enable the `roboserial_hal::monitor` target at `trace` to see the output:
//!
//! ```text
//! TRACE roboserial_hal::monitor: TX: aa 55 01 00
//! TRACE roboserial_hal::monitor: RX: aa 55 81 00 3c
//! ```

use std::fmt::Write as _;

/// Tracing target for monitor events
pub const MONITOR_TARGET: &str = "roboserial_hal::monitor";

/// Which directions to dump
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByteMonitor {
    pub tx: bool,
    pub rx: bool,
}

impl ByteMonitor {
    pub fn new(tx: bool, rx: bool) -> Self {
        Self { tx, rx }
    }

    pub fn is_enabled(&self) -> bool {
        self.tx || self.rx
    }

    pub fn record_tx(&self, bytes: &[u8]) {
        if self.tx && !bytes.is_empty() {
            tracing::trace!(target: MONITOR_TARGET, "TX: {}", hex_dump(bytes));
        }
    }

    pub fn record_rx(&self, bytes: &[u8]) {
        if self.rx && !bytes.is_empty() {
            tracing::trace!(target: MONITOR_TARGET, "RX: {}", hex_dump(bytes));
        }
    }
}

/// Space-separated lowercase hex, two digits per byte
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{:02x}", byte);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_dump() {
        assert_eq!(hex_dump(&[0xaa, 0x05, 0x00, 0xff]), "aa 05 00 ff");
        assert_eq!(hex_dump(&[]), "");
    }

    #[test]
    fn test_monitor_enabled() {
        assert!(!ByteMonitor::default().is_enabled());
        assert!(ByteMonitor::new(false, true).is_enabled());
    }
}
