// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Serial error taxonomy and the integer sentinels used by procedural callers

use std::io;

/// Write failed (also returned for writes on an absent handle)
pub const WRITE_FAILED: i32 = -1;
/// Line configuration failed (strict configure only)
pub const CONFIGURE_FAILED: i32 = -2;
/// Device missing or permission denied
pub const OPEN_FAILED: i32 = -3;
/// Path opened but is not a terminal device
pub const NOT_A_TERMINAL: i32 = -4;
/// Handle already closed
pub const CLOSED: i32 = -5;
/// No serial backend for this platform
pub const UNSUPPORTED: i32 = -6;
/// Read failed (strict read only)
pub const READ_FAILED: i32 = -7;

/// Serial shim errors
#[derive(Debug, thiserror::Error)]
pub enum SerialError {
    #[error("Unable to open {path}: {source}")]
    OpenFailed {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{path} is not a serial port")]
    NotATerminal { path: String },

    #[error("Serial line configuration failed: {0}")]
    ConfigureFailed(#[source] io::Error),

    #[error("Error in serial write: {0}")]
    WriteFailed(#[source] io::Error),

    #[error("Error in serial read: {0}")]
    ReadFailed(#[source] io::Error),

    #[error("Serial port is closed")]
    Closed,

    #[error("Serial ports are not supported on {0}")]
    Unsupported(&'static str),
}

impl SerialError {
    /// Negative return code for this error
    pub fn sentinel(&self) -> i32 {
        match self {
            SerialError::OpenFailed { .. } => OPEN_FAILED,
            SerialError::NotATerminal { .. } => NOT_A_TERMINAL,
            SerialError::ConfigureFailed(_) => CONFIGURE_FAILED,
            SerialError::WriteFailed(_) => WRITE_FAILED,
            SerialError::ReadFailed(_) => READ_FAILED,
            SerialError::Closed => CLOSED,
            SerialError::Unsupported(_) => UNSUPPORTED,
        }
    }
}
