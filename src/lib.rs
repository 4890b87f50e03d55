// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # roboserial
//!
//! Serial-port shim for robot control stacks. Opens a terminal device, applies
//! a fixed 115200 8N1 raw line profile, and moves bytes through an owned
//! handle so the rest of the stack never touches termios directly.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! roboserial = "0.1"
//! ```
//!
//! ```rust,no_run
//! use roboserial::hal::{SerialIO, SerialPort};
//! use std::path::Path;
//!
//! let mut port = SerialPort::open(Path::new("/dev/ttyACM0"))?;
//! port.configure()?;
//! port.write(b"\xaa\x55\x01")?;
//!
//! let mut reply = [0u8; 32];
//! let n = port.read(&mut reply)?;
//! println!("{} bytes back", n);
//! # Ok::<(), roboserial::hal::SerialError>(())
//! ```
//!
//! Callers that work with integer return codes use [`compat`] instead:
//!
//! ```rust,no_run
//! use roboserial::compat::{close_serial, open_serial, setup_serial, write_data};
//!
//! let mut port = None;
//! if open_serial(&mut port, "/dev/ttyACM0") >= 0 {
//!     setup_serial(&mut port);
//!     write_data(&mut port, b"\x01\x02");
//! }
//! close_serial(&mut port);
//! ```
//!
//! ## Crates
//!
//! - **roboserial-hal**: `SerialIO` trait, line profile, POSIX backend
//! - **roboserial-config**: `roboserial.toml` loader with env/CLI overrides
//! - **roboserial-observability**: `tracing` setup and per-crate debug flags
//!
//! ## Platform Support
//!
//! - Linux, macOS and other `cfg(unix)` targets through termios
//! - Every other target compiles, but each operation reports `Unsupported`
//!
//! ## License
//!
//! Apache-2.0

pub use roboserial_config as config;
pub use roboserial_hal as hal;
pub use roboserial_observability as observability;

pub mod compat;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::hal::{ByteMonitor, ReadOutcome, SerialError, SerialIO, SerialPort, LINE_PROFILE};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_facade_imports() {
        use crate::prelude::*;
        assert_eq!(LINE_PROFILE.baud_rate(), 115_200);
        assert!(!ByteMonitor::default().is_enabled());
    }
}
