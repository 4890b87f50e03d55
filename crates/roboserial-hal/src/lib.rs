// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # roboserial-hal
//!
//! Serial-port shim for robot control stacks: open a terminal device, apply
//! the fixed 115200 8N1 raw profile, and move bytes through an owned handle.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use roboserial_hal::{SerialIO, SerialPort};
//! use std::path::Path;
//!
//! let mut port = SerialPort::open(Path::new("/dev/ttyUSB0"))?;
//! port.configure()?;
//!
//! let written = port.write(&[0xaa, 0x55, 0x01])?;
//! let mut buf = [0u8; 64];
//! let read = port.read(&mut buf)?; // 0 when nothing arrived within 0.1 s
//! port.close()?;
//! # let _ = (written, read);
//! # Ok::<(), roboserial_hal::SerialError>(())
//! ```
//!
//! ## Platform Support
//!
//! - **POSIX** (`cfg(unix)`): termios backend, [`PosixSerialPort`]
//! - **Everything else**: [`UnsupportedSerialPort`], which fails every call

pub mod error;
pub mod hal;
pub mod platforms;

pub use error::SerialError;
pub use hal::{
    hex_dump, ByteMonitor, LineSettings, ReadOutcome, SerialIO, LINE_PROFILE, MONITOR_TARGET,
};
pub use platforms::{SerialPort, UnsupportedSerialPort};

#[cfg(unix)]
pub use platforms::PosixSerialPort;
