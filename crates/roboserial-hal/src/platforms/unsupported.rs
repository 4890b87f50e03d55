// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Stand-in backend for targets without a serial implementation
//!
//! Every operation fails with [`SerialError::Unsupported`]; nothing pretends to
//! succeed. `close` is the exception, since closing an absent handle is always
//! a no-op.

use std::path::{Path, PathBuf};

use crate::error::SerialError;
use crate::hal::{ByteMonitor, ReadOutcome, SerialIO};

/// Serial handle that can never be opened
///
/// Carries the same inherent surface as the POSIX port so code written
/// against [`SerialPort`](crate::SerialPort) builds on every target.
#[derive(Debug)]
pub struct UnsupportedSerialPort {
    path: PathBuf,
    monitor: ByteMonitor,
}

fn unsupported() -> SerialError {
    SerialError::Unsupported(std::env::consts::OS)
}

impl UnsupportedSerialPort {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn monitor(&self) -> ByteMonitor {
        self.monitor
    }

    /// Stored only; nothing is ever transferred
    pub fn set_monitor(&mut self, monitor: ByteMonitor) {
        self.monitor = monitor;
    }

    pub fn configure_strict(&mut self) -> Result<(), SerialError> {
        Err(unsupported())
    }

    pub fn read_strict(&mut self, _buffer: &mut [u8]) -> Result<ReadOutcome, SerialError> {
        Err(unsupported())
    }
}

impl SerialIO for UnsupportedSerialPort {
    type Error = SerialError;

    fn open(path: &Path) -> Result<Self, SerialError> {
        tracing::error!(device = %path.display(), os = std::env::consts::OS, "No serial backend for this platform");
        Err(unsupported())
    }

    fn configure(&mut self) -> Result<(), SerialError> {
        Err(unsupported())
    }

    fn write(&mut self, _data: &[u8]) -> Result<usize, SerialError> {
        Err(unsupported())
    }

    fn read(&mut self, _buffer: &mut [u8]) -> Result<usize, SerialError> {
        Err(unsupported())
    }

    fn flush(&mut self) -> Result<(), SerialError> {
        Err(unsupported())
    }

    fn close(&mut self) -> Result<(), SerialError> {
        Ok(())
    }

    fn is_open(&self) -> bool {
        false
    }

    fn available(&self) -> Result<bool, SerialError> {
        Err(unsupported())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_fails_explicitly() {
        match UnsupportedSerialPort::open(Path::new("COM3")) {
            Err(err @ SerialError::Unsupported(_)) => {
                assert_eq!(err.sentinel(), crate::error::UNSUPPORTED)
            }
            other => panic!("expected Unsupported, got {:?}", other),
        }
    }

    #[test]
    fn test_operations_fail_and_close_is_noop() {
        let mut port = UnsupportedSerialPort {
            path: PathBuf::from("COM3"),
            monitor: ByteMonitor::default(),
        };
        assert!(port.configure().is_err());
        assert!(port.write(b"abc").is_err());
        assert!(port.read(&mut [0u8; 4]).is_err());
        assert!(port.flush().is_err());
        assert!(port.available().is_err());
        assert!(port.close().is_ok());
        assert!(!port.is_open());
        assert_eq!(port.descriptor(), None);
    }

    #[test]
    fn test_inherent_surface_matches_posix_port() {
        let mut port = UnsupportedSerialPort {
            path: PathBuf::from("COM3"),
            monitor: ByteMonitor::default(),
        };
        assert_eq!(port.path(), Path::new("COM3"));

        port.set_monitor(ByteMonitor::new(true, false));
        assert_eq!(port.monitor(), ByteMonitor::new(true, false));

        assert!(matches!(port.configure_strict(), Err(SerialError::Unsupported(_))));
        assert!(matches!(
            port.read_strict(&mut [0u8; 4]),
            Err(SerialError::Unsupported(_))
        ));
    }
}
