//! Stripe format constants.
//!
//! These constants define the fixed parts of the binary layout. They are the
//! single source of truth - all other crates should import from here.

use static_assertions::{const_assert, const_assert_eq};

/// Magic bytes opening every file and every stripe header, and closing the file tail.
pub const ORC_MAGIC: [u8; 3] = *b"ORC";

/// The only major format version this build reads or writes.
pub const FORMAT_MAJOR_VERSION: u8 = 0;

/// Minor versions accepted by the reader.
pub const SUPPORTED_MINOR_VERSIONS: [u8; 2] = [11, 12];

/// Minor version stamped by the writer.
pub const CURRENT_MINOR_VERSION: u8 = 12;

/// Size of an encoded stripe header in bytes.
pub const STRIPE_HEADER_SIZE: usize = 32;

/// Size of the file tail in bytes: rows (8) + stripes (4) + columns (4) + magic (3).
pub const FILE_TAIL_SIZE: usize = 19;

/// Size of the length prefix in front of every column chunk.
pub const COLUMN_LENGTH_PREFIX: usize = 4;

/// Smallest well-formed file: leading magic plus an empty-file tail.
pub const MIN_FILE_SIZE: usize = ORC_MAGIC.len() + FILE_TAIL_SIZE;

/// Default upper bound on a single stripe payload (64 MiB).
pub const DEFAULT_MAX_STRIPE_BYTES: u64 = 64 * 1024 * 1024;

const_assert_eq!(FILE_TAIL_SIZE, 8 + 4 + 4 + ORC_MAGIC.len());
const_assert_eq!(MIN_FILE_SIZE, 22);
// Checksum (4 bytes at offset 28) is the last header field.
const_assert_eq!(STRIPE_HEADER_SIZE, 28 + 4);
const_assert!(CURRENT_MINOR_VERSION == SUPPORTED_MINOR_VERSIONS[1]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_version_is_supported() {
        assert!(SUPPORTED_MINOR_VERSIONS.contains(&CURRENT_MINOR_VERSION));
    }

    #[test]
    fn test_tail_size_matches_fields() {
        assert_eq!(FILE_TAIL_SIZE, 8 + 4 + 4 + ORC_MAGIC.len());
    }

    #[test]
    fn test_min_file_size() {
        assert_eq!(MIN_FILE_SIZE, 22);
    }
}
