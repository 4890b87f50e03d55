// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

/// Result of a read that keeps "no data" apart from an OS error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// This many bytes were copied into the buffer
    Data(usize),
    /// Nothing arrived before the read timeout (or the device reported EOF)
    NoData,
}

impl ReadOutcome {
    /// Byte count, with `NoData` as zero
    pub fn len(&self) -> usize {
        match self {
            ReadOutcome::Data(n) => *n,
            ReadOutcome::NoData => 0,
        }
    }

    /// True for `NoData`
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Serial I/O capability for one character device
///
/// A handle moves Unopened -> Open -> Closed and never back. After
/// [`close`](SerialIO::close) every operation except `close` itself fails.
///
/// ## Thread Safety
///
/// All mutating operations take `&mut self`. A handle is owned by exactly one
/// caller between open and close; sharing it across threads needs external
/// synchronization.
pub trait SerialIO {
    /// Platform-specific error type
    type Error;

    /// Open a device node
    ///
    /// # Errors
    /// Fails if the node cannot be opened or is not a terminal device. No
    /// descriptor is left open on failure.
    fn open(path: &Path) -> Result<Self, Self::Error>
    where
        Self: Sized;

    /// Apply the fixed line profile
    ///
    /// Failures of the underlying terminal calls are tolerated. Only a closed
    /// handle is an error.
    fn configure(&mut self) -> Result<(), Self::Error>;

    /// Write bytes to serial port
    ///
    /// # Returns
    /// Number of bytes written, which may be fewer than `data.len()`
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Read bytes from serial port
    ///
    /// # Returns
    /// Number of bytes read. Zero covers both "nothing arrived within the
    /// timeout" and "the device reported an error".
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, Self::Error>;

    /// Wait until queued output has been transmitted
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Release the device; a no-op when already closed
    fn close(&mut self) -> Result<(), Self::Error>;

    /// True between a successful open and close
    fn is_open(&self) -> bool;

    /// OS descriptor number while open
    fn descriptor(&self) -> Option<i32> {
        None
    }

    /// Check if data is available to read
    fn available(&self) -> Result<bool, Self::Error> {
        // Default implementation - platforms can override
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_outcome_len() {
        assert_eq!(ReadOutcome::Data(7).len(), 7);
        assert_eq!(ReadOutcome::NoData.len(), 0);
        assert!(ReadOutcome::NoData.is_empty());
        assert!(!ReadOutcome::Data(1).is_empty());
    }
}
