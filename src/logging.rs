// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Log output setup.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing::Level;

use crate::config::LoggingConfig;

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error (one-shot runs)
    Stderr,
    /// The configured log file, or nowhere (the form owns the terminal)
    FileOnly,
}

/// Parse a level name, case-insensitive
pub fn parse_level(name: &str) -> Result<Level> {
    name.trim()
        .parse::<Level>()
        .map_err(|_| anyhow!("Unknown log level: {:?}", name))
}

/// Install the global subscriber. Call once, from the binary.
pub fn init(config: &LoggingConfig, target: LogTarget) -> Result<()> {
    let level = parse_level(&config.level)?;
    let builder = tracing_subscriber::fmt().with_max_level(level);

    match (target, &config.file) {
        (_, Some(path)) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {:?}", path))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow!(e))
        }
        (LogTarget::Stderr, None) => builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow!(e)),
        (LogTarget::FileOnly, None) => Ok(()),
    }
}
