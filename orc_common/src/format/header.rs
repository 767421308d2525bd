//! Stripe header and file tail codecs.
//!
//! Both sections are fixed-size and little-endian. Decoders validate every
//! field and report violations as [`FormatError::ParseError`]; nothing here
//! raises [`FormatError::InvalidArgument`], since the bytes are never the
//! caller's request.
//!
//! ## Stripe header layout (32 bytes)
//!
//! ```text
//!   [0..3]   magic:          "ORC"
//!   [3]      major_version:  u8 (must be 0)
//!   [4]      minor_version:  u8 (11 or 12)
//!   [5]      compression:    u8 (CompressionKind code)
//!   [6..8]   reserved:       must be zero
//!   [8..12]  column_count:   u32
//!   [12..20] row_count:      u64
//!   [20..28] payload_len:    u64
//!   [28..32] checksum:       u32 (FNV-1a of the payload)
//! ```
//!
//! ## File tail layout (19 bytes)
//!
//! ```text
//!   [0..8]   total_rows:     u64
//!   [8..12]  stripe_count:   u32
//!   [12..16] column_count:   u32
//!   [16..19] magic:          "ORC"
//! ```

use crate::error::{FormatError, FormatResult};
use crate::format::compression::CompressionKind;
use crate::format::consts::{
    CURRENT_MINOR_VERSION, FILE_TAIL_SIZE, FORMAT_MAJOR_VERSION, ORC_MAGIC, STRIPE_HEADER_SIZE,
    SUPPORTED_MINOR_VERSIONS,
};

const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;
const FNV_PRIME: u32 = 0x0100_0193;

/// FNV-1a checksum of a stripe payload.
pub const fn payload_checksum(bytes: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

#[inline]
fn le_u32(bytes: &[u8], at: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[at..at + 4]);
    u32::from_le_bytes(buf)
}

#[inline]
fn le_u64(bytes: &[u8], at: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[at..at + 8]);
    u64::from_le_bytes(buf)
}

/// Decoded stripe header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripeHeader {
    /// Minor format version the stripe was written with.
    pub minor_version: u8,
    /// Codec applied to the payload.
    pub compression: CompressionKind,
    /// Number of column chunks in the payload.
    pub column_count: u32,
    /// Rows stored in the stripe.
    pub row_count: u64,
    /// Payload length in bytes, excluding this header.
    pub payload_len: u64,
    /// FNV-1a checksum of the payload.
    pub checksum: u32,
}

impl StripeHeader {
    /// Describe `payload` with the current format version.
    pub fn new(
        compression: CompressionKind,
        column_count: u32,
        row_count: u64,
        payload: &[u8],
    ) -> Self {
        Self {
            minor_version: CURRENT_MINOR_VERSION,
            compression,
            column_count,
            row_count,
            payload_len: payload.len() as u64,
            checksum: payload_checksum(payload),
        }
    }

    /// Encode to the fixed 32-byte layout.
    pub fn encode(&self) -> [u8; STRIPE_HEADER_SIZE] {
        let mut out = [0u8; STRIPE_HEADER_SIZE];
        out[0..3].copy_from_slice(&ORC_MAGIC);
        out[3] = FORMAT_MAJOR_VERSION;
        out[4] = self.minor_version;
        out[5] = self.compression.code();
        out[8..12].copy_from_slice(&self.column_count.to_le_bytes());
        out[12..20].copy_from_slice(&self.row_count.to_le_bytes());
        out[20..28].copy_from_slice(&self.payload_len.to_le_bytes());
        out[28..32].copy_from_slice(&self.checksum.to_le_bytes());
        out
    }

    /// Decode and validate a header from the start of `bytes`.
    ///
    /// Trailing bytes beyond the header are ignored.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::ParseError` if:
    /// - fewer than 32 bytes are available
    /// - the magic is not `"ORC"`
    /// - the version is not 0.11 or 0.12
    /// - the compression code is unknown
    /// - the reserved bytes are not zero
    pub fn decode(bytes: &[u8]) -> FormatResult<Self> {
        if bytes.len() < STRIPE_HEADER_SIZE {
            return Err(FormatError::parse_error(format!(
                "truncated stripe header: need {STRIPE_HEADER_SIZE} bytes, have {}",
                bytes.len()
            )));
        }
        if bytes[0..3] != ORC_MAGIC {
            return Err(FormatError::parse_error(format!(
                "bad stripe magic {:02x?}",
                &bytes[0..3]
            )));
        }

        let (major, minor) = (bytes[3], bytes[4]);
        if major != FORMAT_MAJOR_VERSION || !SUPPORTED_MINOR_VERSIONS.contains(&minor) {
            return Err(FormatError::parse_error(format!(
                "incompatible format version {major}.{minor}"
            )));
        }

        let compression = CompressionKind::from_code(bytes[5])?;

        if bytes[6] != 0 || bytes[7] != 0 {
            return Err(FormatError::parse_error("reserved stripe header bytes are not zero"));
        }

        Ok(Self {
            minor_version: minor,
            compression,
            column_count: le_u32(bytes, 8),
            row_count: le_u64(bytes, 12),
            payload_len: le_u64(bytes, 20),
            checksum: le_u32(bytes, 28),
        })
    }

    /// Check `payload` against the recorded length and checksum.
    pub fn verify_payload(&self, payload: &[u8]) -> FormatResult<()> {
        if payload.len() as u64 != self.payload_len {
            return Err(FormatError::parse_error(format!(
                "payload length mismatch: header records {} bytes, found {}",
                self.payload_len,
                payload.len()
            )));
        }
        let actual = payload_checksum(payload);
        if actual != self.checksum {
            return Err(FormatError::parse_error(format!(
                "checksum mismatch: header records {:#010x}, payload hashes to {actual:#010x}",
                self.checksum
            )));
        }
        Ok(())
    }
}

/// Decoded file tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileTail {
    /// Sum of all stripe row counts.
    pub total_rows: u64,
    /// Number of stripes between the leading magic and the tail.
    pub stripe_count: u32,
    /// Columns in the file schema.
    pub column_count: u32,
}

impl FileTail {
    /// Encode to the fixed 19-byte layout.
    pub fn encode(&self) -> [u8; FILE_TAIL_SIZE] {
        let mut out = [0u8; FILE_TAIL_SIZE];
        out[0..8].copy_from_slice(&self.total_rows.to_le_bytes());
        out[8..12].copy_from_slice(&self.stripe_count.to_le_bytes());
        out[12..16].copy_from_slice(&self.column_count.to_le_bytes());
        out[16..19].copy_from_slice(&ORC_MAGIC);
        out
    }

    /// Decode the tail from exactly the last 19 bytes of a file.
    pub fn decode(bytes: &[u8]) -> FormatResult<Self> {
        if bytes.len() != FILE_TAIL_SIZE {
            return Err(FormatError::parse_error(format!(
                "file tail must be {FILE_TAIL_SIZE} bytes, have {}",
                bytes.len()
            )));
        }
        if bytes[16..19] != ORC_MAGIC {
            return Err(FormatError::parse_error("missing trailing file magic"));
        }
        Ok(Self {
            total_rows: le_u64(bytes, 0),
            stripe_count: le_u32(bytes, 8),
            column_count: le_u32(bytes, 12),
        })
    }
}
