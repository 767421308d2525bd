//! Configuration loading traits and types.
//!
//! This module provides the reader and writer options and a standardized
//! way to load them from TOML files.
//!
//! Configuration is caller-supplied, so every failure here is reported as
//! [`FormatError::InvalidArgument`], including an unreadable or malformed
//! file.
//!
//! # Usage
//!
//! ```rust,no_run
//! use orc_common::config::FormatConfig;
//! use orc_common::error::FormatResult;
//! use std::path::Path;
//!
//! fn main() -> FormatResult<()> {
//!     let config = FormatConfig::from_path(Path::new("orc.toml"))?;
//!     println!("verify checksums: {}", config.reader.verify_checksums);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{FormatError, FormatResult};
use crate::format::compression::CompressionKind;
use crate::format::consts::DEFAULT_MAX_STRIPE_BYTES;

/// Log level for library tracing output.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, per-stripe detail.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about file-level operations.
    #[default]
    Info,
    /// Rejected input and other recoverable problems.
    Warn,
    /// Error messages only.
    Error,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub const fn as_filter(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Options controlling how stripes are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReaderOptions {
    /// Verify each stripe payload against its header checksum.
    pub verify_checksums: bool,
    /// Largest stripe payload the reader will accept, in bytes.
    pub max_stripe_bytes: u64,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            verify_checksums: true,
            max_stripe_bytes: DEFAULT_MAX_STRIPE_BYTES,
        }
    }
}

impl ReaderOptions {
    /// Validate the options.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::InvalidArgument` if `max_stripe_bytes` is zero.
    pub fn validate(&self) -> FormatResult<()> {
        if self.max_stripe_bytes == 0 {
            return Err(FormatError::invalid_argument(
                "reader.max_stripe_bytes must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Options controlling how stripes are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WriterOptions {
    /// Codec applied to stripe payloads.
    pub compression: CompressionKind,
    /// Largest stripe payload the writer will produce, in bytes.
    pub max_stripe_bytes: u64,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            compression: CompressionKind::None,
            max_stripe_bytes: DEFAULT_MAX_STRIPE_BYTES,
        }
    }
}

impl WriterOptions {
    /// Validate the options.
    ///
    /// A recognised but unsupported `compression` passes validation; the
    /// writer refuses it with `NotImplemented` when it is constructed.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::InvalidArgument` if `max_stripe_bytes` is zero.
    pub fn validate(&self) -> FormatResult<()> {
        if self.max_stripe_bytes == 0 {
            return Err(FormatError::invalid_argument(
                "writer.max_stripe_bytes must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Top-level configuration file.
///
/// # TOML Example
///
/// ```toml
/// log_level = "debug"
///
/// [reader]
/// verify_checksums = true
/// max_stripe_bytes = 67108864
///
/// [writer]
/// compression = "none"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatConfig {
    /// Tracing verbosity.
    pub log_level: LogLevel,
    /// Reader options.
    pub reader: ReaderOptions,
    /// Writer options.
    pub writer: WriterOptions,
}

impl FormatConfig {
    /// Validate every section.
    pub fn validate(&self) -> FormatResult<()> {
        self.reader.validate()?;
        self.writer.validate()
    }

    /// Load from a TOML file and validate.
    pub fn from_path(path: &Path) -> FormatResult<Self> {
        let config = Self::load(path)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded format configuration");
        Ok(config)
    }
}

/// Trait for loading configuration from TOML files.
///
/// This trait provides a default implementation that works with any type
/// implementing `serde::de::DeserializeOwned`.
///
/// # Contract
///
/// - Returns `FormatError::InvalidArgument` if the file cannot be read
/// - Returns `FormatError::InvalidArgument` if the TOML is malformed or does
///   not match the target type
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> FormatResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FormatError::invalid_argument(format!(
                "cannot read configuration {}: {e}",
                path.display()
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            FormatError::invalid_argument(format!(
                "malformed configuration {}: {e}",
                path.display()
            ))
        })
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}
