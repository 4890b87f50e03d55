// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! The single line profile applied by `configure`
//!
//! 115200 baud, 8 data bits, no parity, 1 stop bit, raw. Reads return as soon
//! as any byte is available or after 0.1 s with nothing.

use std::fmt;
use std::time::Duration;

/// Fixed serial line settings
///
/// Fields are private: the only value is [`LINE_PROFILE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSettings {
    baud_rate: u32,
    data_bits: u8,
    parity: bool,
    stop_bits: u8,
    vmin: u8,
    vtime_deciseconds: u8,
}

/// 115200 8N1, raw, VMIN 0, VTIME 1
pub const LINE_PROFILE: LineSettings = LineSettings {
    baud_rate: 115_200,
    data_bits: 8,
    parity: false,
    stop_bits: 1,
    vmin: 0,
    vtime_deciseconds: 1,
};

impl LineSettings {
    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }

    pub fn data_bits(&self) -> u8 {
        self.data_bits
    }

    pub fn parity(&self) -> bool {
        self.parity
    }

    pub fn stop_bits(&self) -> u8 {
        self.stop_bits
    }

    /// Minimum byte count before a read returns
    pub fn vmin(&self) -> u8 {
        self.vmin
    }

    /// Inter-byte timeout in tenths of a second
    pub fn vtime_deciseconds(&self) -> u8 {
        self.vtime_deciseconds
    }

    /// Longest a read waits when nothing arrives
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.vtime_deciseconds) * 100)
    }

    /// Write this profile into a termios structure
    ///
    /// Control flags are replaced, not merged: only `CS8 | CLOCAL | CREAD`
    /// plus the speed bits remain. Input, output and local processing are
    /// cleared.
    #[cfg(unix)]
    pub fn apply_to(&self, termios: &mut nix::sys::termios::Termios) -> nix::Result<()> {
        use nix::sys::termios::{
            cfsetispeed, cfsetospeed, BaudRate, ControlFlags, InputFlags, LocalFlags, OutputFlags,
            SpecialCharacterIndices,
        };

        termios.control_flags = ControlFlags::CS8 | ControlFlags::CLOCAL | ControlFlags::CREAD;
        termios.input_flags = InputFlags::empty();
        termios.output_flags = OutputFlags::empty();
        termios.local_flags = LocalFlags::empty();
        termios.control_chars[SpecialCharacterIndices::VMIN as usize] = self.vmin;
        termios.control_chars[SpecialCharacterIndices::VTIME as usize] = self.vtime_deciseconds;

        cfsetispeed(termios, BaudRate::B115200)?;
        cfsetospeed(termios, BaudRate::B115200)?;
        Ok(())
    }
}

impl fmt::Display for LineSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}{}{} raw (vmin={}, timeout={}ms)",
            self.baud_rate,
            self.data_bits,
            if self.parity { 'P' } else { 'N' },
            self.stop_bits,
            self.vmin,
            self.read_timeout().as_millis()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_values() {
        assert_eq!(LINE_PROFILE.baud_rate(), 115_200);
        assert_eq!(LINE_PROFILE.data_bits(), 8);
        assert!(!LINE_PROFILE.parity());
        assert_eq!(LINE_PROFILE.stop_bits(), 1);
        assert_eq!(LINE_PROFILE.vmin(), 0);
        assert_eq!(LINE_PROFILE.read_timeout(), Duration::from_millis(100));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            LINE_PROFILE.to_string(),
            "115200 8N1 raw (vmin=0, timeout=100ms)"
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_apply_to_pty_termios() {
        use nix::fcntl::OFlag;
        use nix::pty::{grantpt, posix_openpt, ptsname_r, unlockpt};
        use nix::sys::termios::{
            cfgetispeed, cfgetospeed, tcgetattr, BaudRate, ControlFlags, InputFlags, LocalFlags,
            OutputFlags, SpecialCharacterIndices,
        };

        let master = posix_openpt(OFlag::O_RDWR | OFlag::O_NOCTTY).unwrap();
        grantpt(&master).unwrap();
        unlockpt(&master).unwrap();
        let slave = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open(ptsname_r(&master).unwrap())
            .unwrap();

        let mut termios = tcgetattr(&slave).unwrap();
        LINE_PROFILE.apply_to(&mut termios).unwrap();

        assert_eq!(cfgetispeed(&termios), BaudRate::B115200);
        assert_eq!(cfgetospeed(&termios), BaudRate::B115200);
        assert!(termios.control_flags.contains(ControlFlags::CS8));
        assert!(termios.control_flags.contains(ControlFlags::CLOCAL | ControlFlags::CREAD));
        assert!(!termios.control_flags.contains(ControlFlags::PARENB));
        assert!(!termios.control_flags.contains(ControlFlags::CSTOPB));
        assert_eq!(termios.input_flags, InputFlags::empty());
        assert_eq!(termios.output_flags, OutputFlags::empty());
        assert_eq!(termios.local_flags, LocalFlags::empty());
        assert_eq!(termios.control_chars[SpecialCharacterIndices::VMIN as usize], 0);
        assert_eq!(termios.control_chars[SpecialCharacterIndices::VTIME as usize], 1);
    }
}
