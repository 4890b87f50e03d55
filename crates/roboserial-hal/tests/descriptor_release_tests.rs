// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Descriptor accounting through /proc/self/fd
//!
//! Kept to a single test so no other test thread opens descriptors while the
//! counts are compared.

#![cfg(target_os = "linux")]

mod common;

use roboserial_hal::{SerialError, SerialIO, SerialPort};

fn open_fd_count() -> usize {
    std::fs::read_dir("/proc/self/fd")
        .expect("procfs available")
        .count()
}

#[test]
fn failed_and_closed_handles_release_descriptors() {
    let regular_file = tempfile::NamedTempFile::new().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("ttyUSB42");
    let pty = common::open_pty();

    let baseline = open_fd_count();

    // Not a terminal: descriptor closed before the error comes back
    let result = SerialPort::open(regular_file.path());
    assert!(matches!(result, Err(SerialError::NotATerminal { .. })));
    assert_eq!(open_fd_count(), baseline);

    // Missing node: nothing allocated
    let result = SerialPort::open(&missing);
    assert!(matches!(result, Err(SerialError::OpenFailed { .. })));
    assert_eq!(open_fd_count(), baseline);

    // Explicit close releases, second close does not touch anything
    let mut port = SerialPort::open(&pty.slave_path).unwrap();
    assert_eq!(open_fd_count(), baseline + 1);
    port.close().unwrap();
    assert_eq!(open_fd_count(), baseline);
    port.close().unwrap();
    assert_eq!(open_fd_count(), baseline);

    // Dropping an open handle releases too
    let port = SerialPort::open(&pty.slave_path).unwrap();
    assert_eq!(open_fd_count(), baseline + 1);
    drop(port);
    assert_eq!(open_fd_count(), baseline);
}
