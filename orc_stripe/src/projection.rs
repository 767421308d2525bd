//! Column projection against a file schema.

use std::collections::HashSet;

use orc::error::{FormatError, FormatResult};

/// Which columns of a stripe the caller wants back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColumnProjection {
    /// Every column, in schema order.
    #[default]
    All,
    /// The listed column indices, in the given order.
    Select(Vec<usize>),
}

impl ColumnProjection {
    /// Project every column.
    pub fn all() -> Self {
        Self::All
    }

    /// Project the given columns.
    pub fn select(indices: impl IntoIterator<Item = usize>) -> Self {
        Self::Select(indices.into_iter().collect())
    }

    /// Resolve against a schema of `column_count` columns.
    ///
    /// The indices come from the caller, never from the file, so every
    /// rejection here is an `InvalidArgument`.
    ///
    /// # Errors
    /// - `InvalidArgument` if the selection is empty.
    /// - `InvalidArgument` if an index is `>= column_count`.
    /// - `InvalidArgument` if an index appears twice.
    pub fn resolve(&self, column_count: u32) -> FormatResult<Vec<usize>> {
        let count = column_count as usize;
        let indices = match self {
            Self::All => return Ok((0..count).collect()),
            Self::Select(indices) => indices,
        };

        if indices.is_empty() {
            return Err(FormatError::invalid_argument("column projection selects no columns"));
        }

        let mut seen = HashSet::with_capacity(indices.len());
        for &index in indices {
            if index >= count {
                return Err(FormatError::invalid_argument(format!(
                    "column index {index} out of range (schema has {count} columns)"
                )));
            }
            if !seen.insert(index) {
                return Err(FormatError::invalid_argument(format!(
                    "column index {index} selected more than once"
                )));
            }
        }
        Ok(indices.clone())
    }
}
