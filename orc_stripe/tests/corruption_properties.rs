//! Property tests: damaged files are rejected, never blamed on the caller,
//! and never bring the process down.

use orc::format::header::{FileTail, StripeHeader};
use orc_stripe::{
    ColumnProjection, CompressionKind, ErrorKind, FormatResult, ReaderOptions, StripeReader,
    StripeWriter, WriterOptions,
};
use proptest::prelude::*;

/// Offset of the first payload byte of stripe 0.
const FIRST_PAYLOAD: usize = 3 + 32;

fn sample_file() -> Vec<u8> {
    let mut writer = StripeWriter::new(3, WriterOptions::default()).unwrap();
    writer.write_stripe(4, &[b"1,2,3,4", b"a,b,c,d", b""]).unwrap();
    writer.write_stripe(1, &[b"5", b"e", b"x"]).unwrap();
    writer.finish()
}

/// Open the file and read every stripe with a valid projection.
fn read_all(bytes: &[u8]) -> FormatResult<u64> {
    let reader = StripeReader::open(bytes, ReaderOptions::default())?;
    let mut rows = 0;
    for index in 0..reader.stripe_count() {
        rows += reader.read_stripe(index, &ColumnProjection::all())?.row_count();
    }
    Ok(rows)
}

proptest! {
    #[test]
    fn flipped_bytes_are_never_invalid_argument(
        flips in prop::collection::vec((any::<prop::sample::Index>(), 1u8..=255), 1..8),
    ) {
        let mut bytes = sample_file();
        for (at, mask) in &flips {
            let at = at.index(bytes.len());
            bytes[at] ^= mask;
        }

        // Some flips land on equivalent encodings (a still-supported minor
        // version, a recognised codec code), so success is allowed.
        if let Err(err) = read_all(&bytes) {
            prop_assert_ne!(err.kind(), ErrorKind::InvalidArgument, "{}", err);
        }
    }

    #[test]
    fn flipped_payload_byte_is_parse_error(offset in 0usize..26, mask in 1u8..=255) {
        let mut bytes = sample_file();
        bytes[FIRST_PAYLOAD + offset] ^= mask;
        let err = read_all(&bytes).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::ParseError);
    }

    #[test]
    fn truncated_file_is_parse_error(keep in 0usize..90) {
        let bytes = sample_file();
        prop_assume!(keep < bytes.len());
        let err = read_all(&bytes[..keep]).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::ParseError);
    }

    #[test]
    fn declared_columns_bounded_by_payload(columns in 1u32.., payload_len in 0usize..64) {
        prop_assume!(u64::from(columns) * 4 > payload_len as u64);

        let payload = vec![0u8; payload_len];
        let header = StripeHeader::new(CompressionKind::None, columns, 0, &payload);
        let tail = FileTail {
            total_rows: 0,
            stripe_count: 1,
            column_count: columns,
        };
        let mut bytes = b"ORC".to_vec();
        bytes.extend_from_slice(&header.encode());
        bytes.extend_from_slice(&payload);
        bytes.extend_from_slice(&tail.encode());

        let err = StripeReader::open(&bytes, ReaderOptions::default()).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::ParseError);
    }
}
