//! Stripe file writer.

use orc::config::WriterOptions;
use orc::error::{FormatError, FormatResult};
use orc::format::consts::{COLUMN_LENGTH_PREFIX, ORC_MAGIC, STRIPE_HEADER_SIZE};
use orc::format::header::{FileTail, StripeHeader};
use tracing::{debug, trace};

/// Buffers stripes in memory and produces a complete file on [`finish`](Self::finish).
///
/// Every rejection comes from the caller's arguments or options; a writer
/// never raises `ParseError`.
#[derive(Debug)]
pub struct StripeWriter {
    options: WriterOptions,
    column_count: u32,
    buf: Vec<u8>,
    stripe_count: u32,
    total_rows: u64,
}

impl StripeWriter {
    /// Start a file with a `column_count`-column schema.
    ///
    /// # Errors
    /// - `InvalidArgument` if `options` fail validation or `column_count` is zero.
    /// - `NotImplemented` if `options.compression` is not supported by this build.
    pub fn new(column_count: u32, options: WriterOptions) -> FormatResult<Self> {
        options.validate()?;
        if column_count == 0 {
            return Err(FormatError::invalid_argument("schema must have at least one column"));
        }
        options.compression.ensure_supported()?;

        Ok(Self {
            options,
            column_count,
            buf: ORC_MAGIC.to_vec(),
            stripe_count: 0,
            total_rows: 0,
        })
    }

    /// Append one stripe holding `row_count` rows.
    ///
    /// `columns` must contain exactly one chunk per schema column, in order.
    ///
    /// # Errors
    /// `InvalidArgument` if the column count is wrong, a chunk is too large
    /// for its length prefix, the payload exceeds `max_stripe_bytes`, or the
    /// stripe/row totals would overflow.
    pub fn write_stripe(&mut self, row_count: u64, columns: &[&[u8]]) -> FormatResult<()> {
        if columns.len() != self.column_count as usize {
            return Err(FormatError::invalid_argument(format!(
                "stripe has {} columns, writer schema has {}",
                columns.len(),
                self.column_count
            )));
        }

        let payload_len: usize = columns.iter().map(|c| COLUMN_LENGTH_PREFIX + c.len()).sum();
        if payload_len as u64 > self.options.max_stripe_bytes {
            return Err(FormatError::invalid_argument(format!(
                "stripe payload of {payload_len} bytes exceeds the {} byte limit",
                self.options.max_stripe_bytes
            )));
        }

        let stripe_count = self.stripe_count.checked_add(1).ok_or_else(|| {
            FormatError::invalid_argument("stripe count exceeds u32::MAX")
        })?;
        let total_rows = self.total_rows.checked_add(row_count).ok_or_else(|| {
            FormatError::invalid_argument(format!(
                "adding {row_count} rows overflows the file row count"
            ))
        })?;

        let mut payload = Vec::with_capacity(payload_len);
        for (column, data) in columns.iter().enumerate() {
            let len = u32::try_from(data.len()).map_err(|_| {
                FormatError::invalid_argument(format!(
                    "column {column} chunk of {} bytes does not fit a u32 length prefix",
                    data.len()
                ))
            })?;
            payload.extend_from_slice(&len.to_le_bytes());
            payload.extend_from_slice(data);
        }

        let header =
            StripeHeader::new(self.options.compression, self.column_count, row_count, &payload);
        self.buf.reserve(STRIPE_HEADER_SIZE + payload.len());
        self.buf.extend_from_slice(&header.encode());
        self.buf.extend_from_slice(&payload);
        self.stripe_count = stripe_count;
        self.total_rows = total_rows;

        trace!(stripe = stripe_count - 1, rows = row_count, bytes = payload.len(), "wrote stripe");
        Ok(())
    }

    /// Stripes written so far.
    pub fn stripe_count(&self) -> u32 {
        self.stripe_count
    }

    /// Rows written so far.
    pub fn total_rows(&self) -> u64 {
        self.total_rows
    }

    /// Append the file tail and return the encoded file.
    pub fn finish(mut self) -> Vec<u8> {
        let tail = FileTail {
            total_rows: self.total_rows,
            stripe_count: self.stripe_count,
            column_count: self.column_count,
        };
        self.buf.extend_from_slice(&tail.encode());
        debug!(
            stripes = self.stripe_count,
            rows = self.total_rows,
            bytes = self.buf.len(),
            "finished stripe file"
        );
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orc::error::ErrorKind;
    use orc::format::compression::CompressionKind;
    use orc::format::consts::FILE_TAIL_SIZE;

    #[test]
    fn empty_file_layout() {
        let bytes = StripeWriter::new(2, WriterOptions::default()).unwrap().finish();
        assert_eq!(bytes.len(), ORC_MAGIC.len() + FILE_TAIL_SIZE);
        assert_eq!(&bytes[..3], b"ORC");
        assert_eq!(&bytes[bytes.len() - 3..], b"ORC");
    }

    #[test]
    fn counts_accumulate() {
        let mut writer = StripeWriter::new(1, WriterOptions::default()).unwrap();
        writer.write_stripe(10, &[b"a"]).unwrap();
        writer.write_stripe(5, &[b"bc"]).unwrap();
        assert_eq!(writer.stripe_count(), 2);
        assert_eq!(writer.total_rows(), 15);
    }

    #[test]
    fn zero_columns_is_invalid_argument() {
        let err = StripeWriter::new(0, WriterOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn unsupported_compression_is_not_implemented() {
        let options = WriterOptions {
            compression: CompressionKind::Zstd,
            ..Default::default()
        };
        let err = StripeWriter::new(1, options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotImplemented);
        assert_eq!(err.message(), "zstd compression not supported in this build");
    }

    #[test]
    fn wrong_column_count_is_invalid_argument() {
        let mut writer = StripeWriter::new(2, WriterOptions::default()).unwrap();
        let err = writer.write_stripe(1, &[b"only one"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(writer.stripe_count(), 0);
    }

    #[test]
    fn oversized_stripe_is_invalid_argument() {
        let options = WriterOptions {
            max_stripe_bytes: 8,
            ..Default::default()
        };
        let mut writer = StripeWriter::new(1, options).unwrap();
        assert!(writer.write_stripe(1, &[b"abcd"]).is_ok());
        let err = writer.write_stripe(1, &[b"abcde"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn row_overflow_is_invalid_argument() {
        let mut writer = StripeWriter::new(1, WriterOptions::default()).unwrap();
        writer.write_stripe(u64::MAX, &[b""]).unwrap();
        let err = writer.write_stripe(1, &[b""]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(writer.total_rows(), u64::MAX);
    }
}
