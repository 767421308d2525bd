//! # ORC Stripe Reader / Writer
//!
//! A small reference codec for the stripe format defined in `orc_common`.
//! It exists to exercise the error taxonomy on real decode and encode paths:
//! every failure it reports is a [`FormatError`], chosen by the rule
//! "would different input bytes fix this without the caller changing
//! anything?".
//!
//! ## File Layout
//!
//! ```text
//! ┌───────┬──────────────────────────┬─────┬──────────────────────────┬──────────────┐
//! │ "ORC" │ stripe header (32 bytes) │ ... │ stripe payload (chunks)  │ tail + "ORC" │
//! └───────┴──────────────────────────┴─────┴──────────────────────────┴──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use orc_stripe::{ColumnProjection, ReaderOptions, StripeReader, StripeWriter, WriterOptions};
//!
//! # fn main() -> orc_stripe::FormatResult<()> {
//! let mut writer = StripeWriter::new(2, WriterOptions::default())?;
//! writer.write_stripe(3, &[b"ids", b"names"])?;
//! let bytes = writer.finish();
//!
//! let reader = StripeReader::open(&bytes, ReaderOptions::default())?;
//! let stripe = reader.read_stripe(0, &ColumnProjection::select([1]))?;
//! assert_eq!(stripe.column(1)?, b"names");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All operations return `FormatResult<T>` and never re-wrap an error:
//!
//! ```rust
//! use orc_stripe::{FormatError, ReaderOptions, StripeReader};
//!
//! match StripeReader::open(b"not a stripe file at all", ReaderOptions::default()) {
//!     Ok(_) => unreachable!(),
//!     Err(FormatError::ParseError(msg)) => eprintln!("corrupt input: {msg}"),
//!     Err(FormatError::NotImplemented(msg)) => eprintln!("unsupported: {msg}"),
//!     Err(FormatError::InvalidArgument(msg)) => eprintln!("fix the call: {msg}"),
//! }
//! ```
//!
//! ## Thread Safety
//!
//! - **StripeReader**: `Sync`; stripes can be read from several threads at once
//! - **StripeWriter**: single owner, moved between threads if needed
//! - **FormatError**: `Send + Sync`, owns its message

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod projection;
pub mod reader;
pub mod writer;

pub use orc::config::{LogLevel, ReaderOptions, WriterOptions};
pub use orc::error::{ErrorKind, FormatError, FormatResult};
pub use orc::format::compression::CompressionKind;
pub use projection::ColumnProjection;
pub use reader::{ColumnChunk, Stripe, StripeInfo, StripeReader};
pub use writer::StripeWriter;

/// Initialize tracing output.
///
/// `RUST_LOG` takes precedence; `level` applies when it is unset or invalid.
/// Calling this more than once is harmless.
///
/// ```rust
/// use orc_stripe::{LogLevel, init_tracing};
///
/// init_tracing(LogLevel::Warn);
/// init_tracing(LogLevel::Warn);
/// ```
pub fn init_tracing(level: LogLevel) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
