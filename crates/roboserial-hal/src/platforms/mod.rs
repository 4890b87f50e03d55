// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Platform backends for [`SerialIO`](crate::hal::SerialIO)

#[cfg(unix)]
pub mod posix;
pub mod unsupported;

#[cfg(unix)]
pub use posix::PosixSerialPort;
pub use unsupported::UnsupportedSerialPort;

/// Serial backend for the build target
#[cfg(unix)]
pub type SerialPort = PosixSerialPort;

/// Serial backend for the build target
#[cfg(not(unix))]
pub type SerialPort = UnsupportedSerialPort;
