//! Stripe file reader.
//!
//! [`StripeReader::open`] validates the whole file layout up front (magic,
//! tail, every stripe header, and stripe/row/column consistency) without
//! touching payloads. [`StripeReader::read_stripe`] then verifies and
//! decodes one stripe on demand.
//!
//! Errors are returned exactly as they were raised. Rejections at the two
//! public entry points are logged once at `warn` with the error kind as a
//! structured field.

use std::ops::Range;

use orc::config::ReaderOptions;
use orc::error::{FormatError, FormatResult};
use orc::format::consts::{
    COLUMN_LENGTH_PREFIX, FILE_TAIL_SIZE, MIN_FILE_SIZE, ORC_MAGIC, STRIPE_HEADER_SIZE,
};
use orc::format::header::{FileTail, StripeHeader};
use tracing::{debug, trace, warn};

use crate::projection::ColumnProjection;

/// Location and header of one stripe inside the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripeInfo {
    /// Position of the stripe in the file.
    pub index: usize,
    /// Byte offset of the stripe header.
    pub offset: usize,
    /// Decoded header.
    pub header: StripeHeader,
}

impl StripeInfo {
    /// Rows stored in the stripe.
    pub fn row_count(&self) -> u64 {
        self.header.row_count
    }

    /// Byte range of the payload following the header.
    pub fn payload_range(&self) -> Range<usize> {
        let start = self.offset + STRIPE_HEADER_SIZE;
        start..start + self.header.payload_len as usize
    }
}

/// Owned copy of one column chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnChunk {
    /// Column index in the file schema.
    pub column: usize,
    /// Raw chunk bytes.
    pub data: Vec<u8>,
}

/// A decoded, projected stripe. Holds no borrow of the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stripe {
    index: usize,
    row_count: u64,
    columns: Vec<ColumnChunk>,
}

impl Stripe {
    /// Position of the stripe in the file.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Rows stored in the stripe.
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    /// Projected chunks, in projection order.
    pub fn columns(&self) -> &[ColumnChunk] {
        &self.columns
    }

    /// Bytes of schema column `column`.
    ///
    /// # Errors
    /// `InvalidArgument` if the column was not part of the projection.
    pub fn column(&self, column: usize) -> FormatResult<&[u8]> {
        self.columns
            .iter()
            .find(|chunk| chunk.column == column)
            .map(|chunk| chunk.data.as_slice())
            .ok_or_else(|| {
                FormatError::invalid_argument(format!(
                    "column {column} was not projected when stripe {} was read",
                    self.index
                ))
            })
    }
}

/// Reader over an in-memory stripe file.
#[derive(Debug)]
pub struct StripeReader<'a> {
    data: &'a [u8],
    options: ReaderOptions,
    tail: FileTail,
    stripes: Vec<StripeInfo>,
}

impl<'a> StripeReader<'a> {
    /// Validate the file layout and index its stripes.
    ///
    /// # Errors
    /// - `InvalidArgument` if `options` fail validation.
    /// - `ParseError` for any structural problem in `data`.
    pub fn open(data: &'a [u8], options: ReaderOptions) -> FormatResult<Self> {
        Self::scan(data, options).inspect_err(|e| {
            warn!(kind = %e.kind(), error = %e, len = data.len(), "rejected stripe file");
        })
    }

    fn scan(data: &'a [u8], options: ReaderOptions) -> FormatResult<Self> {
        options.validate()?;

        if data.len() < MIN_FILE_SIZE {
            return Err(FormatError::parse_error(format!(
                "file of {} bytes is shorter than the minimum {MIN_FILE_SIZE} bytes",
                data.len()
            )));
        }
        if data[..ORC_MAGIC.len()] != ORC_MAGIC {
            return Err(FormatError::parse_error("missing leading file magic"));
        }

        let tail_start = data.len() - FILE_TAIL_SIZE;
        let tail = FileTail::decode(&data[tail_start..])?;
        if tail.column_count == 0 {
            return Err(FormatError::parse_error("file tail records zero columns"));
        }

        // The tail is untrusted until the scan agrees with it.
        let max_stripes = tail_start / STRIPE_HEADER_SIZE;
        let mut stripes = Vec::with_capacity((tail.stripe_count as usize).min(max_stripes));
        let mut rows: u64 = 0;
        let mut offset = ORC_MAGIC.len();

        while offset < tail_start {
            let index = stripes.len();
            let header = StripeHeader::decode(&data[offset..tail_start])?;

            if header.column_count != tail.column_count {
                return Err(FormatError::parse_error(format!(
                    "stripe {index} has {} columns, file tail records {}",
                    header.column_count, tail.column_count
                )));
            }
            let prefixes = u64::from(header.column_count) * COLUMN_LENGTH_PREFIX as u64;
            if prefixes > header.payload_len {
                return Err(FormatError::parse_error(format!(
                    "stripe {index} declares {} columns but its {} byte payload cannot hold \
                     their length prefixes",
                    header.column_count, header.payload_len
                )));
            }
            if header.payload_len > options.max_stripe_bytes {
                return Err(FormatError::parse_error(format!(
                    "stripe {index} payload of {} bytes exceeds the {} byte limit",
                    header.payload_len, options.max_stripe_bytes
                )));
            }

            let payload_start = offset + STRIPE_HEADER_SIZE;
            let remaining = (tail_start - payload_start) as u64;
            if header.payload_len > remaining {
                return Err(FormatError::parse_error(format!(
                    "unexpected end of stream at stripe {index}: payload needs {} bytes, {remaining} remain",
                    header.payload_len
                )));
            }

            rows = rows.checked_add(header.row_count).ok_or_else(|| {
                FormatError::parse_error(format!("row count overflows at stripe {index}"))
            })?;

            trace!(stripe = index, offset, rows = header.row_count, "indexed stripe");
            stripes.push(StripeInfo {
                index,
                offset,
                header,
            });
            offset = payload_start + header.payload_len as usize;
        }

        if stripes.len() != tail.stripe_count as usize {
            return Err(FormatError::parse_error(format!(
                "file tail records {} stripes, found {}",
                tail.stripe_count,
                stripes.len()
            )));
        }
        if rows != tail.total_rows {
            return Err(FormatError::parse_error(format!(
                "file tail records {} rows, stripes hold {rows}",
                tail.total_rows
            )));
        }

        debug!(
            stripes = stripes.len(),
            rows,
            columns = tail.column_count,
            "opened stripe file"
        );

        Ok(Self {
            data,
            options,
            tail,
            stripes,
        })
    }

    /// Number of stripes in the file.
    pub fn stripe_count(&self) -> usize {
        self.stripes.len()
    }

    /// Total rows across all stripes.
    pub fn row_count(&self) -> u64 {
        self.tail.total_rows
    }

    /// Columns in the file schema.
    pub fn column_count(&self) -> u32 {
        self.tail.column_count
    }

    /// Every indexed stripe, in file order.
    pub fn stripes(&self) -> &[StripeInfo] {
        &self.stripes
    }

    /// Look up one stripe.
    ///
    /// # Errors
    /// `InvalidArgument` if `index >= stripe_count()`.
    pub fn stripe_info(&self, index: usize) -> FormatResult<&StripeInfo> {
        self.stripes.get(index).ok_or_else(|| {
            FormatError::invalid_argument(format!(
                "stripe index {index} out of range (file has {} stripes)",
                self.stripes.len()
            ))
        })
    }

    /// Verify and decode one stripe, returning the projected columns.
    ///
    /// # Errors
    /// - `InvalidArgument` for a bad stripe index or projection.
    /// - `NotImplemented` if the stripe uses a recognised but unsupported codec.
    /// - `ParseError` for a checksum mismatch or malformed column chunks.
    pub fn read_stripe(&self, index: usize, projection: &ColumnProjection) -> FormatResult<Stripe> {
        self.decode_stripe(index, projection).inspect_err(|e| {
            warn!(kind = %e.kind(), error = %e, stripe = index, "stripe read failed");
        })
    }

    fn decode_stripe(&self, index: usize, projection: &ColumnProjection) -> FormatResult<Stripe> {
        let info = self.stripe_info(index)?;
        let selected = projection.resolve(self.column_count())?;
        info.header.compression.ensure_supported()?;

        let payload = &self.data[info.payload_range()];
        if self.options.verify_checksums {
            info.header.verify_payload(payload)?;
        }

        let chunks = split_columns(payload, info.header.column_count, index)?;
        let columns = selected
            .into_iter()
            .map(|column| ColumnChunk {
                column,
                data: chunks[column].to_vec(),
            })
            .collect();

        Ok(Stripe {
            index,
            row_count: info.row_count(),
            columns,
        })
    }
}

/// Split a payload into its length-prefixed column chunks.
fn split_columns(payload: &[u8], column_count: u32, stripe: usize) -> FormatResult<Vec<&[u8]>> {
    let capacity = (column_count as usize).min(payload.len() / COLUMN_LENGTH_PREFIX);
    let mut chunks = Vec::with_capacity(capacity);
    let mut cursor = 0usize;

    for column in 0..column_count {
        let Some(prefix) = payload.get(cursor..cursor + COLUMN_LENGTH_PREFIX) else {
            return Err(FormatError::parse_error(format!(
                "unexpected end of stream at stripe {stripe}: column {column} length prefix truncated"
            )));
        };
        let mut len = [0u8; COLUMN_LENGTH_PREFIX];
        len.copy_from_slice(prefix);
        let len = u32::from_le_bytes(len) as usize;
        cursor += COLUMN_LENGTH_PREFIX;

        let Some(chunk) = payload.get(cursor..cursor + len) else {
            return Err(FormatError::parse_error(format!(
                "unexpected end of stream at stripe {stripe}: column {column} needs {len} bytes, {} remain",
                payload.len() - cursor
            )));
        };
        chunks.push(chunk);
        cursor += len;
    }

    if cursor != payload.len() {
        return Err(FormatError::parse_error(format!(
            "stripe {stripe} has {} trailing bytes after the last column",
            payload.len() - cursor
        )));
    }
    Ok(chunks)
}
