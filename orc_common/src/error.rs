//! Error taxonomy for the stripe format library.
//!
//! Every fallible routine in the workspace reports failure through
//! [`FormatError`]. The set of kinds is closed:
//!
//! - [`FormatError::NotImplemented`]: the input needs a feature this build
//!   recognises but does not support (a known codec, encoding or type).
//! - [`FormatError::ParseError`]: the input bytes break the binary contract
//!   (bad magic, checksum mismatch, truncation, inconsistent counts).
//! - [`FormatError::InvalidArgument`]: the caller passed a value that cannot
//!   be honoured (missing column, bad size, invalid configuration).
//!
//! ## Choosing a kind
//!
//! When a failure could plausibly be either of the last two, ask whether
//! different *input bytes* would fix it without the caller changing
//! anything. If so it is a [`ParseError`](FormatError::ParseError),
//! otherwise it is an [`InvalidArgument`](FormatError::InvalidArgument).
//!
//! ## Value semantics
//!
//! Errors own their message text and hold no reference to the buffer that
//! triggered them, so they may outlive the failed operation and cross thread
//! boundaries freely. There are no mutators: to change an error, build a new
//! one.

use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use static_assertions::{assert_impl_all, assert_not_impl_any};
use thiserror::Error;

/// Owned, read-only error message.
///
/// The inner text is private; once built, a `Message` can only be read.
/// Cloning copies the text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Message(Box<str>);

impl Message {
    /// View the message text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Message {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Message {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self(Box::from(text))
    }
}

impl From<&String> for Message {
    fn from(text: &String) -> Self {
        Self(Box::from(text.as_str()))
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self(text.into_boxed_str())
    }
}

impl From<Box<str>> for Message {
    fn from(text: Box<str>) -> Self {
        Self(text)
    }
}

impl From<Cow<'_, str>> for Message {
    fn from(text: Cow<'_, str>) -> Self {
        Self::from(text.into_owned())
    }
}

impl PartialEq<str> for Message {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Message {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// Machine-readable discriminator of a [`FormatError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Recognised but unsupported feature.
    NotImplemented,
    /// Input bytes violate the format.
    ParseError,
    /// Caller-supplied value is unusable.
    InvalidArgument,
}

impl ErrorKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 3] = [Self::NotImplemented, Self::ParseError, Self::InvalidArgument];

    /// Stable token used in logs and serialized records.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotImplemented => "not_implemented",
            Self::ParseError => "parse_error",
            Self::InvalidArgument => "invalid_argument",
        }
    }

    /// Prefix used when a [`FormatError`] is displayed.
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotImplemented => "not implemented",
            Self::ParseError => "parse error",
            Self::InvalidArgument => "invalid argument",
        }
    }

    /// Returns true if the caller can resolve the failure by changing the
    /// arguments of the call, without needing different input data.
    #[inline]
    pub const fn is_caller_fixable(self) -> bool {
        matches!(self, Self::InvalidArgument)
    }

    /// Recover the kind from a displayed [`FormatError`] (`"<label>: <message>"`).
    ///
    /// Returns `None` if the line does not start with a known label.
    pub fn from_display(line: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| {
            line.strip_prefix(kind.label())
                .is_some_and(|rest| rest.starts_with(": "))
        })
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorKind {
    type Err = FormatError;

    /// Accepts either the token (`parse_error`) or the label (`parse error`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s || kind.label() == s)
            .ok_or_else(|| FormatError::invalid_argument(format!("unknown error kind `{s}`")))
    }
}

/// Failure raised anywhere in the stripe format library.
///
/// Serializes as `{"kind": "<token>", "message": "<text>"}`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum FormatError {
    /// The input requires a feature, encoding or type that is recognised
    /// but not supported by this build.
    #[error("not implemented: {0}")]
    NotImplemented(Message),

    /// The input bytes are structurally invalid, truncated, or written by
    /// an incompatible version.
    #[error("parse error: {0}")]
    ParseError(Message),

    /// The caller supplied a parameter, schema or configuration value that
    /// is invalid for the requested operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(Message),
}

assert_impl_all!(FormatError: Send, Sync, Clone, std::error::Error);
assert_impl_all!(Message: Send, Sync, Clone);
assert_not_impl_any!(FormatError: Copy);

impl FormatError {
    /// Build an error whose kind is chosen at runtime.
    pub fn new(kind: ErrorKind, message: impl Into<Message>) -> Self {
        let message = message.into();
        match kind {
            ErrorKind::NotImplemented => Self::NotImplemented(message),
            ErrorKind::ParseError => Self::ParseError(message),
            ErrorKind::InvalidArgument => Self::InvalidArgument(message),
        }
    }

    /// Recognised-but-unsupported feature.
    #[inline]
    pub fn not_implemented(message: impl Into<Message>) -> Self {
        Self::NotImplemented(message.into())
    }

    /// Input bytes inconsistent with the format.
    #[inline]
    pub fn parse_error(message: impl Into<Message>) -> Self {
        Self::ParseError(message.into())
    }

    /// Caller-supplied value rejected.
    #[inline]
    pub fn invalid_argument(message: impl Into<Message>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// The active kind.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotImplemented(_) => ErrorKind::NotImplemented,
            Self::ParseError(_) => ErrorKind::ParseError,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
        }
    }

    /// The message text, without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::NotImplemented(m) | Self::ParseError(m) | Self::InvalidArgument(m) => m.as_str(),
        }
    }

    /// See [`ErrorKind::is_caller_fixable`].
    #[inline]
    pub fn is_caller_fixable(&self) -> bool {
        self.kind().is_caller_fixable()
    }
}

/// Result type for stripe format operations.
pub type FormatResult<T> = Result<T, FormatError>;
