use std::{fmt, slice};

use crate::{error::UsageError, protocol::ServerError};

/// A failed row of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    ordinal: usize,
    error: ServerError,
}

impl BatchEntry {
    pub(crate) fn new(ordinal: usize, error: ServerError) -> Self {
        Self { ordinal, error }
    }

    /// 1-based position of the row in the transmitted batch.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn error(&self) -> &ServerError {
        &self.error
    }
}

/// Rows of a batch rejected by the server.
///
/// Rows which are not listed succeeded, their count is in
/// [`rows_affected`][BatchError::rows_affected].
///
/// ```no_run
/// # async fn app<IO: hdbro::transport::HdbTransport>(exec: &mut hdbro::BatchExecutor<IO>) {
/// if let Err(err) = exec.flush().await {
///     if let Some(batch) = err.as_batch() {
///         for entry in batch {
///             eprintln!("row {} failed: {}", entry.ordinal(), entry.error());
///         }
///     }
/// }
/// # }
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BatchError {
    entries: Vec<BatchEntry>,
    rows: usize,
    rows_affected: u64,
}

impl BatchError {
    /// `entries` ordinals must be strictly increasing.
    pub(crate) fn new(entries: Vec<BatchEntry>, rows: usize, rows_affected: u64) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].ordinal < w[1].ordinal));
        Self { entries, rows, rows_affected }
    }

    /// Number of failed rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of failed rows.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&BatchEntry> {
        self.entries.get(index)
    }

    /// Ordinal of the `index`-th failed row.
    pub fn ordinal_at(&self, index: usize) -> Result<usize, UsageError> {
        self.entry(index).map(BatchEntry::ordinal)
    }

    /// Server error of the `index`-th failed row.
    pub fn detail_at(&self, index: usize) -> Result<&ServerError, UsageError> {
        self.entry(index).map(BatchEntry::error)
    }

    pub fn iter(&self) -> slice::Iter<'_, BatchEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    /// Returns a cursor over the failed rows, nothing is selected initially.
    pub fn cursor(&self) -> BatchCursor<'_> {
        BatchCursor { error: self, selected: None }
    }

    /// Number of rows transmitted in the batch.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Affected row count of the rows which succeeded.
    pub fn rows_affected(&self) -> u64 {
        self.rows_affected
    }

    fn entry(&self, index: usize) -> Result<&BatchEntry, UsageError> {
        self.entries
            .get(index)
            .ok_or(UsageError::IndexOutOfRange { index, len: self.entries.len() })
    }
}

impl<'a> IntoIterator for &'a BatchError {
    type Item = &'a BatchEntry;

    type IntoIter = slice::Iter<'a, BatchEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::error::Error for BatchError { }

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} rows failed", self.entries.len(), self.rows)?;
        if let Some(first) = self.entries.first() {
            write!(f, ", row {}: {}", first.ordinal, first.error)?;
        }
        Ok(())
    }
}

impl fmt::Debug for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

/// Select then read access to a [`BatchError`].
#[derive(Debug, Clone)]
pub struct BatchCursor<'a> {
    error: &'a BatchError,
    selected: Option<&'a BatchEntry>,
}

impl<'a> BatchCursor<'a> {
    /// Select the `index`-th failed row.
    ///
    /// On error, the previous selection is kept.
    pub fn select(&mut self, index: usize) -> Result<(), UsageError> {
        self.selected = Some(self.error.entry(index)?);
        Ok(())
    }

    /// Ordinal of the selected row.
    pub fn ordinal(&self) -> Option<usize> {
        self.selected.map(BatchEntry::ordinal)
    }

    /// Server error of the selected row.
    pub fn detail(&self) -> Option<&'a ServerError> {
        self.selected.map(BatchEntry::error)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::protocol::ErrorLevel;

    fn batch_error() -> BatchError {
        let err = |text: &'static str| ServerError::new(301, ErrorLevel::Error, *b"23000", text);
        BatchError::new(
            vec![BatchEntry::new(2, err("first")), BatchEntry::new(5, err("second"))],
            6,
            4,
        )
    }

    #[test]
    fn random_access() {
        let err = batch_error();
        assert_eq!(err.count(), 2);
        assert!(!err.is_empty());
        assert_eq!(err.ordinal_at(0), Ok(2));
        assert_eq!(err.ordinal_at(1), Ok(5));
        assert_eq!(err.detail_at(1).unwrap().text(), "second");
        assert_eq!(
            err.ordinal_at(2),
            Err(UsageError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert!(err.detail_at(7).is_err());
        assert_eq!(err.get(0).map(BatchEntry::ordinal), Some(2));
        assert_eq!(err.iter().map(BatchEntry::ordinal).collect::<Vec<_>>(), [2, 5]);
    }

    #[test]
    fn cursor() {
        let err = batch_error();
        let mut cursor = err.cursor();
        assert_eq!(cursor.ordinal(), None);

        cursor.select(1).unwrap();
        assert_eq!(cursor.ordinal(), Some(5));
        assert_eq!(cursor.detail().unwrap().text(), "second");

        assert!(cursor.select(2).is_err());
        assert_eq!(cursor.ordinal(), Some(5));
    }

    #[test]
    fn display() {
        assert_eq!(
            batch_error().to_string(),
            "2 of 6 rows failed, row 2: SQL error 301: first (SQLSTATE 23000)"
        );
    }
}
