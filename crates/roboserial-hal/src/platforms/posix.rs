// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! POSIX serial port backed by termios
//!
//! Opens the node with `O_NOCTTY | O_NONBLOCK`. [`SerialIO::configure`]
//! applies [`LINE_PROFILE`] with `TCSAFLUSH` and then clears `O_NONBLOCK`, so
//! every read is bounded by the 0.1 s inter-byte timeout instead of returning
//! immediately.
//!
//! The descriptor is owned by a [`File`]: it is released on
//! [`close`](SerialIO::close) or when the port is dropped, whichever comes
//! first, and never twice.

use std::fs::{File, OpenOptions};
use std::io::{self, IsTerminal, Read, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

use nix::fcntl::{fcntl, FcntlArg, OFlag};
use nix::sys::termios::{self, SetArg};
use tracing::{debug, error, trace, warn};

use crate::error::SerialError;
use crate::hal::{ByteMonitor, ReadOutcome, SerialIO, LINE_PROFILE};

/// Serial handle for one POSIX terminal device
#[derive(Debug)]
pub struct PosixSerialPort {
    path: PathBuf,
    file: Option<File>,
    monitor: ByteMonitor,
}

impl PosixSerialPort {
    /// Device path this handle was opened with
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directions currently dumped by the traffic monitor
    pub fn monitor(&self) -> ByteMonitor {
        self.monitor
    }

    /// Dump traffic in the enabled directions at trace level
    pub fn set_monitor(&mut self, monitor: ByteMonitor) {
        self.monitor = monitor;
    }

    fn file(&self) -> Result<&File, SerialError> {
        self.file.as_ref().ok_or(SerialError::Closed)
    }

    /// Apply the line profile, reporting any termios failure
    ///
    /// # Errors
    /// `Closed` on a closed handle, `ConfigureFailed` if `tcgetattr`,
    /// `tcsetattr` or `fcntl` fails.
    pub fn configure_strict(&mut self) -> Result<(), SerialError> {
        let file = self.file()?;
        let to_error = |e: nix::Error| SerialError::ConfigureFailed(io::Error::from(e));

        let mut options = termios::tcgetattr(file).map_err(to_error)?;
        LINE_PROFILE.apply_to(&mut options).map_err(to_error)?;
        termios::tcsetattr(file, SetArg::TCSAFLUSH, &options).map_err(to_error)?;

        let fd = file.as_raw_fd();
        let flags = fcntl(fd, FcntlArg::F_GETFL).map_err(to_error)?;
        let mut flags = OFlag::from_bits_truncate(flags);
        flags.remove(OFlag::O_NONBLOCK);
        fcntl(fd, FcntlArg::F_SETFL(flags)).map_err(to_error)?;

        debug!(device = %self.path.display(), profile = %LINE_PROFILE, "Serial line configured");
        Ok(())
    }

    /// Read that tells "nothing arrived" apart from an OS error
    ///
    /// # Errors
    /// `Closed` on a closed handle, `ReadFailed` for any OS error other than
    /// `EAGAIN`/`EINTR`.
    pub fn read_strict(&mut self, buffer: &mut [u8]) -> Result<ReadOutcome, SerialError> {
        let file = self.file.as_mut().ok_or(SerialError::Closed)?;
        match file.read(buffer) {
            Ok(0) => Ok(ReadOutcome::NoData),
            Ok(n) => {
                self.monitor.record_rx(&buffer[..n]);
                Ok(ReadOutcome::Data(n))
            }
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                ) =>
            {
                Ok(ReadOutcome::NoData)
            }
            Err(e) => Err(SerialError::ReadFailed(e)),
        }
    }
}

impl SerialIO for PosixSerialPort {
    type Error = SerialError;

    fn open(path: &Path) -> Result<Self, SerialError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags((OFlag::O_NOCTTY | OFlag::O_NONBLOCK).bits())
            .open(path)
            .map_err(|source| {
                error!(device = %path.display(), error = %source, "Unable to open serial device");
                SerialError::OpenFailed {
                    path: path.display().to_string(),
                    source,
                }
            })?;

        if !file.is_terminal() {
            drop(file);
            error!(device = %path.display(), "Not a serial port");
            return Err(SerialError::NotATerminal {
                path: path.display().to_string(),
            });
        }

        debug!(device = %path.display(), fd = file.as_raw_fd(), "Serial device opened");
        Ok(Self {
            path: path.to_path_buf(),
            file: Some(file),
            monitor: ByteMonitor::default(),
        })
    }

    fn configure(&mut self) -> Result<(), SerialError> {
        match self.configure_strict() {
            Err(SerialError::ConfigureFailed(e)) => {
                warn!(device = %self.path.display(), error = %e, "Serial line configuration failed; continuing");
                Ok(())
            }
            other => other,
        }
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, SerialError> {
        let file = self.file.as_mut().ok_or(SerialError::Closed)?;
        match file.write(data) {
            Ok(n) => {
                self.monitor.record_tx(&data[..n]);
                Ok(n)
            }
            Err(e) => {
                error!(device = %self.path.display(), error = %e, "Error in serial write");
                Err(SerialError::WriteFailed(e))
            }
        }
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, SerialError> {
        match self.read_strict(buffer) {
            Ok(outcome) => Ok(outcome.len()),
            Err(SerialError::ReadFailed(e)) => {
                trace!(device = %self.path.display(), error = %e, "Serial read error reported as no data");
                Ok(0)
            }
            Err(e) => Err(e),
        }
    }

    fn flush(&mut self) -> Result<(), SerialError> {
        let file = self.file()?;
        termios::tcdrain(file).map_err(|e| SerialError::WriteFailed(io::Error::from(e)))
    }

    fn close(&mut self) -> Result<(), SerialError> {
        if let Some(file) = self.file.take() {
            drop(file);
            debug!(device = %self.path.display(), "Serial device closed");
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.file.is_some()
    }

    fn descriptor(&self) -> Option<i32> {
        self.file.as_ref().map(|f| f.as_raw_fd())
    }
}
