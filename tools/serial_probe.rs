// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Serial probe.
//!
//! Opens the configured device with the fixed line profile, optionally sends a
//! hex payload, then polls for replies and prints each one as hex. Exits
//! non-zero when the device cannot be opened.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};

use roboserial::config::{
    apply_cli_overrides, apply_environment_overrides, load_config, validate_config, ConfigError,
    RoboserialConfig,
};
use roboserial::hal::{hex_dump, ByteMonitor, SerialIO, SerialPort, LINE_PROFILE, MONITOR_TARGET};
use roboserial::observability::{debug_flags_help, init_logging, CrateDebugFlags};

/// Probe a serial device: send bytes, print what comes back
#[derive(Parser, Debug)]
#[command(name = "serial_probe", version, long_about = None, after_help = debug_flags_help())]
struct Args {
    /// Path to roboserial.toml (searched for when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Device node, overrides the configured one
    #[arg(short, long)]
    device: Option<String>,

    /// Hex payload to send, e.g. "ff ff 01 02 01 fb"
    #[arg(short, long)]
    send: Option<String>,

    /// Number of 0.1 s read polls after sending
    #[arg(long, default_value_t = 10)]
    cycles: u32,

    /// Log level, overrides the configured one
    #[arg(long)]
    log_level: Option<String>,

    /// Enable debug logging for a crate (repeatable, or "all")
    #[arg(long = "debug", value_name = "CRATE")]
    debug: Vec<String>,

    /// Hex dump TX and RX traffic at trace level
    #[arg(short, long, default_value_t = false)]
    monitor: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_settings(&args)?;
    let _logging = init_logging(
        &debug_flags(&args, &config),
        &config.logging.level,
        config.logging.log_dir.clone(),
        Some(config.logging.retention_runs),
    )?;

    let payload = args
        .send
        .as_deref()
        .map(parse_hex)
        .transpose()
        .context("Invalid --send payload")?;

    let device = Path::new(&config.device.path);
    let mut port = SerialPort::open(device)
        .with_context(|| format!("Failed to open serial device {}", device.display()))?;
    port.configure()?;
    port.set_monitor(ByteMonitor::new(config.monitor.tx, config.monitor.rx));
    info!(device = %device.display(), profile = %LINE_PROFILE, "Probe started");

    if let Some(payload) = payload {
        send_all(&mut port, &payload)?;
        info!(bytes = payload.len(), "Payload sent");
    }

    let mut buffer = [0u8; 256];
    let mut received = 0usize;
    for _ in 0..args.cycles {
        let n = port.read(&mut buffer)?;
        if n > 0 {
            received += n;
            println!("{}", hex_dump(&buffer[..n]));
        }
    }

    if received == 0 {
        warn!(cycles = args.cycles, "No reply from device");
    } else {
        info!(bytes = received, "Probe finished");
    }

    port.close()?;
    Ok(())
}

fn load_settings(args: &Args) -> Result<RoboserialConfig> {
    let mut cli_args = HashMap::new();
    if let Some(device) = &args.device {
        cli_args.insert("device_path".to_string(), device.clone());
    }
    if let Some(level) = &args.log_level {
        cli_args.insert("log_level".to_string(), level.clone());
    }
    if args.monitor {
        cli_args.insert("monitor_tx".to_string(), "true".to_string());
        cli_args.insert("monitor_rx".to_string(), "true".to_string());
    }

    match load_config(args.config.as_deref(), Some(&cli_args)) {
        Ok(config) => Ok(config),
        // No file anywhere is fine when none was asked for
        Err(ConfigError::FileNotFound(_)) if args.config.is_none() => {
            let mut config = RoboserialConfig::default();
            apply_environment_overrides(&mut config);
            apply_cli_overrides(&mut config, &cli_args);
            validate_config(&config)?;
            Ok(config)
        }
        Err(e) => Err(e).context("Failed to load configuration"),
    }
}

fn debug_flags(args: &Args, config: &RoboserialConfig) -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(args.debug.iter().map(|name| format!("--debug-{}", name)))
        .with_env_overrides();
    if config.monitor.tx || config.monitor.rx {
        flags.enable_trace(MONITOR_TARGET);
    }
    flags
}

fn send_all(port: &mut SerialPort, payload: &[u8]) -> Result<()> {
    let mut sent = 0;
    while sent < payload.len() {
        let n = port.write(&payload[sent..])?;
        if n == 0 {
            bail!("Device accepted no bytes after {} of {}", sent, payload.len());
        }
        sent += n;
    }
    port.flush()?;
    Ok(())
}

/// Parse hex bytes, ignoring whitespace, commas and `0x` prefixes
fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let digits: String = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(|token| token.trim_start_matches("0x").trim_start_matches("0X"))
        .collect();
    if !digits.is_ascii() {
        bail!("non-hex characters in {:?}", text);
    }
    if digits.len() % 2 != 0 {
        bail!("odd number of hex digits in {:?}", text);
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .with_context(|| format!("{:?} is not a hex byte", &digits[i..i + 2]))
        })
        .collect()
}
