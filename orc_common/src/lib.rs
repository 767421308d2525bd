//! ORC Common Library
//!
//! This crate is the leaf of the stripe format workspace. It defines the
//! error taxonomy every other crate reports failures through, together with
//! the wire constants, header codecs and configuration types they share.
//!
//! # Module Structure
//!
//! - [`error`] - The closed [`FormatError`](error::FormatError) taxonomy
//! - [`format`] - Magic bytes, versions, stripe header and file tail codecs
//! - [`config`] - Reader/writer options and TOML configuration loading
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! Add to your `Cargo.toml` with alias for shorter imports:
//! ```toml
//! [dependencies]
//! orc = { package = "orc_common", path = "../orc_common" }
//! ```
//!
//! Then import:
//! ```rust
//! use orc_common::error::{FormatError, FormatResult};
//! use orc_common::config::{ConfigLoader, FormatConfig};
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod prelude;

pub use error::{ErrorKind, FormatError, FormatResult, Message};
