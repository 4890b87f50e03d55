// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Integer return-code API over [`SerialPort`]
//!
//! Each function works on a caller-owned `Option<SerialPort>` slot and returns
//! a non-negative count on success or one of the negative codes from
//! [`roboserial_hal::error`]:
//!
//! | Function       | Success          | Failure                         |
//! |----------------|------------------|---------------------------------|
//! | `open_serial`  | descriptor (>=0) | `OPEN_FAILED`, `NOT_A_TERMINAL` |
//! | `setup_serial` | 0                | never fails                     |
//! | `write_data`   | bytes written    | `WRITE_FAILED`                  |
//! | `read_data`    | bytes read       | never fails, 0 means no data    |
//! | `close_serial` | 0                | never fails                     |
//!
//! On targets without a backend `open_serial` returns `UNSUPPORTED`.

use std::path::Path;

use roboserial_hal::error::WRITE_FAILED;
use roboserial_hal::{SerialIO, SerialPort};

/// Open `path` into `slot`
///
/// Any handle already in the slot is closed first. On failure the slot is
/// left empty.
pub fn open_serial(slot: &mut Option<SerialPort>, path: impl AsRef<Path>) -> i32 {
    *slot = None;
    match SerialPort::open(path.as_ref()) {
        Ok(port) => {
            let fd = port.descriptor().unwrap_or(0);
            *slot = Some(port);
            fd
        }
        Err(e) => e.sentinel(),
    }
}

/// Apply the line profile; failures are logged by the backend and ignored
pub fn setup_serial(slot: &mut Option<SerialPort>) -> i32 {
    if let Some(port) = slot.as_mut() {
        let _ = port.configure();
    }
    0
}

pub fn write_data(slot: &mut Option<SerialPort>, data: &[u8]) -> i32 {
    let Some(port) = slot.as_mut() else {
        return WRITE_FAILED;
    };
    match port.write(data) {
        Ok(n) => clamp_count(n),
        Err(_) => WRITE_FAILED,
    }
}

/// Read into `buffer`; timeouts, EOF, errors and an empty slot all give 0
pub fn read_data(slot: &mut Option<SerialPort>, buffer: &mut [u8]) -> i32 {
    slot.as_mut()
        .and_then(|port| port.read(buffer).ok())
        .map(clamp_count)
        .unwrap_or(0)
}

pub fn close_serial(slot: &mut Option<SerialPort>) -> i32 {
    if let Some(mut port) = slot.take() {
        let _ = port.close();
    }
    0
}

fn clamp_count(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use roboserial_hal::error::{NOT_A_TERMINAL, OPEN_FAILED, UNSUPPORTED};

    #[test]
    fn test_open_missing_device() {
        let dir = tempfile::tempdir().unwrap();
        let mut slot = None;
        let code = open_serial(&mut slot, dir.path().join("ttyUSB9"));
        if cfg!(unix) {
            assert_eq!(code, OPEN_FAILED);
        } else {
            assert_eq!(code, UNSUPPORTED);
        }
        assert!(slot.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_open_regular_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut slot = None;
        assert_eq!(open_serial(&mut slot, file.path()), NOT_A_TERMINAL);
        assert!(slot.is_none());
    }

    #[test]
    fn test_empty_slot() {
        let mut slot: Option<SerialPort> = None;
        let mut buf = [0u8; 8];
        assert_eq!(setup_serial(&mut slot), 0);
        assert_eq!(write_data(&mut slot, b"abc"), WRITE_FAILED);
        assert_eq!(read_data(&mut slot, &mut buf), 0);
        assert_eq!(close_serial(&mut slot), 0);
        assert_eq!(close_serial(&mut slot), 0);
    }

    #[test]
    fn test_clamp_count() {
        assert_eq!(clamp_count(7), 7);
        assert_eq!(clamp_count(usize::MAX), i32::MAX);
    }
}
