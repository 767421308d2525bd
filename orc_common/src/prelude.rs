//! Prelude module for common re-exports.
//!
//! This module provides convenient re-exports of commonly used types
//! so that consumers can do `use orc_common::prelude::*;` and get
//! the most important types without listing individual paths.
//!
//! # Usage
//!
//! ```rust
//! use orc_common::prelude::*;
//!
//! let err = FormatError::parse_error("bad magic");
//! assert_eq!(err.kind(), ErrorKind::ParseError);
//! ```

// ─── Errors ─────────────────────────────────────────────────────────
pub use crate::error::{ErrorKind, FormatError, FormatResult, Message};

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigLoader, FormatConfig, LogLevel, ReaderOptions, WriterOptions};

// ─── Wire Format ────────────────────────────────────────────────────
pub use crate::format::compression::CompressionKind;
pub use crate::format::consts::{ORC_MAGIC, STRIPE_HEADER_SIZE};
pub use crate::format::header::{FileTail, StripeHeader, payload_checksum};
