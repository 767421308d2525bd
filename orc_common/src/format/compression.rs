//! Compression kinds recorded in stripe headers.

use serde::{Deserialize, Serialize};

use crate::error::{FormatError, FormatResult};

/// Compression codec identifier stored in byte 5 of a stripe header.
///
/// Every kind the format defines is recognised, but only [`CompressionKind::None`]
/// is implemented. The rest surface as [`FormatError::NotImplemented`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum CompressionKind {
    /// Uncompressed payload.
    #[default]
    None = 0,
    /// zlib / deflate.
    Zlib = 1,
    /// Snappy.
    Snappy = 2,
    /// LZO.
    Lzo = 3,
    /// LZ4.
    Lz4 = 4,
    /// Zstandard.
    Zstd = 5,
}

impl CompressionKind {
    /// Convert from raw `u8` value. Returns `None` for unknown codes.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Zlib),
            2 => Some(Self::Snappy),
            3 => Some(Self::Lzo),
            4 => Some(Self::Lz4),
            5 => Some(Self::Zstd),
            _ => None,
        }
    }

    /// Decode a header code. Unknown codes are corrupt input.
    pub fn from_code(code: u8) -> FormatResult<Self> {
        Self::from_u8(code).ok_or_else(|| {
            FormatError::parse_error(format!("unknown compression kind code {code}"))
        })
    }

    /// The code written to a stripe header.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Lowercase codec name, matching the configuration spelling.
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Zlib => "zlib",
            Self::Snappy => "snappy",
            Self::Lzo => "lzo",
            Self::Lz4 => "lz4",
            Self::Zstd => "zstd",
        }
    }

    /// Returns true if this build can read and write the codec.
    #[inline]
    pub const fn is_supported(self) -> bool {
        matches!(self, Self::None)
    }

    /// Fail with [`FormatError::NotImplemented`] unless the codec is supported.
    pub fn ensure_supported(self) -> FormatResult<()> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(FormatError::not_implemented(format!(
                "{} compression not supported in this build",
                self.name()
            )))
        }
    }
}
