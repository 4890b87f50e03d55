// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Pseudo-terminal pairs standing in for a serial cable

#![allow(dead_code)]

use std::io::{ErrorKind, Read};
use std::os::unix::io::AsRawFd;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use nix::fcntl::{fcntl, FcntlArg, OFlag};
use nix::pty::{grantpt, posix_openpt, ptsname_r, unlockpt, PtyMaster};

/// Master side of a pty plus the path of its slave device
pub struct PtyPair {
    pub master: PtyMaster,
    pub slave_path: PathBuf,
}

pub fn open_pty() -> PtyPair {
    let master = posix_openpt(OFlag::O_RDWR | OFlag::O_NOCTTY).expect("posix_openpt");
    grantpt(&master).expect("grantpt");
    unlockpt(&master).expect("unlockpt");
    let slave_path = PathBuf::from(ptsname_r(&master).expect("ptsname_r"));

    let fd = master.as_raw_fd();
    let flags = OFlag::from_bits_truncate(fcntl(fd, FcntlArg::F_GETFL).expect("F_GETFL"));
    fcntl(fd, FcntlArg::F_SETFL(flags | OFlag::O_NONBLOCK)).expect("F_SETFL");

    PtyPair { master, slave_path }
}

/// Collect `len` bytes from the master side, giving up after two seconds
pub fn read_from_master(master: &mut PtyMaster, len: usize) -> Vec<u8> {
    let deadline = Instant::now() + Duration::from_secs(2);
    let mut received = Vec::with_capacity(len);
    let mut buf = [0u8; 512];
    while received.len() < len && Instant::now() < deadline {
        match master.read(&mut buf) {
            Ok(n) => received.extend_from_slice(&buf[..n]),
            Err(e) if e.kind() == ErrorKind::WouldBlock => thread::sleep(Duration::from_millis(5)),
            Err(e) => panic!("pty master read failed: {}", e),
        }
    }
    received
}
