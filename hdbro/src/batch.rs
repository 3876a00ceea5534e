//! Buffered execution of a prepared statement.
//!
//! Rows are buffered until the bulk size is reached or until an explicit
//! flush, then sent as one execute request.
//!
//! ```no_run
//! use hdbro::{BatchExecutor, PreparedStatement, transport::HdbTransport};
//!
//! # async fn app<IO: HdbTransport>(io: IO, stmt: PreparedStatement) -> hdbro::Result<()> {
//! let mut exec = BatchExecutor::new(io, stmt);
//!
//! for i in 0..25_000 {
//!     exec.bind((i, "foo")).await?;
//! }
//!
//! let result = exec.flush().await?;
//! assert_eq!(result.rows, 5_000);
//! # Ok(())
//! # }
//! ```
use std::mem;

use crate::{
    Result,
    common::{report, span, verbose},
    config::Config,
    encode::IntoRow,
    error::UsageError,
    protocol::{
        MessageType, Parameters, PartKind, ProtocolError, Reply, Request, RowsAffected,
        ServerErrors, StatementContext, TransactionFlags,
    },
    statement::PreparedStatement,
    transport::{HdbTransport, HdbTransportExt},
    value::Value,
};

mod error;

pub use error::{BatchCursor, BatchEntry, BatchError};

/// State of a [`BatchExecutor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    /// No row buffered.
    Idle,
    /// Some rows are buffered.
    Buffering,
    /// Buffered rows are being transmitted.
    Flushing,
}

/// Whether a bound row should be flushed immediately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlushMode {
    /// Buffer the row, flush only when the bulk size is reached.
    #[default]
    NoFlush,
    /// Buffer the row then flush the whole buffer.
    Flush,
}

/// Outcome of a successful flush.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchResult {
    /// Number of rows transmitted.
    pub rows: usize,
    /// Sum of the affected row count reported for each row.
    pub rows_affected: u64,
}

/// Buffers parameter rows of a prepared statement and execute them in
/// batches.
///
/// If some rows are rejected by the server, the flush returns
/// [`ErrorKind::Batch`][crate::ErrorKind::Batch], rows which succeeded
/// stay applied.
#[derive(Debug)]
pub struct BatchExecutor<IO> {
    io: IO,
    stmt: PreparedStatement,
    bulk_size: usize,
    rows: Vec<Vec<Value>>,
    state: BatchState,
    statement_context: StatementContext,
    transaction_flags: TransactionFlags,
}

impl<IO: HdbTransport> BatchExecutor<IO> {
    /// Create executor with default bulk size.
    pub fn new(io: IO, stmt: PreparedStatement) -> Self {
        Self::with_config(io, stmt, &Config::default())
    }

    /// Create executor with the bulk size of `config`.
    pub fn with_config(io: IO, stmt: PreparedStatement, config: &Config) -> Self {
        Self {
            io,
            stmt,
            bulk_size: config.bulk_size(),
            rows: vec![],
            state: BatchState::Idle,
            statement_context: StatementContext::new(),
            transaction_flags: TransactionFlags::new(),
        }
    }

    pub fn bulk_size(&self) -> usize {
        self.bulk_size
    }

    /// Set the number of buffered rows which trigger an implicit flush.
    ///
    /// Already buffered rows are kept, the next bind flushes if the buffer
    /// is at or above the new size.
    pub fn set_bulk_size(&mut self, bulk_size: usize) -> Result<(), UsageError> {
        if bulk_size == 0 {
            return Err(UsageError::InvalidBulkSize);
        }
        self.bulk_size = bulk_size;
        Ok(())
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Number of buffered rows.
    pub fn buffered(&self) -> usize {
        self.rows.len()
    }

    pub fn statement(&self) -> &PreparedStatement {
        &self.stmt
    }

    /// Statement context of the last reply.
    pub fn last_statement_context(&self) -> &StatementContext {
        &self.statement_context
    }

    /// Transaction flags of the last reply.
    pub fn last_transaction_flags(&self) -> &TransactionFlags {
        &self.transaction_flags
    }

    /// Returns the transport, buffered rows are dropped.
    pub fn into_inner(self) -> IO {
        self.io
    }

    /// Buffer a row.
    ///
    /// When the buffer reaches the bulk size, it is flushed before returning
    /// and the flush result is returned.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::ArityMismatch`] without buffering if the row
    /// length is not equal to the statement parameter count.
    pub async fn bind(&mut self, row: impl IntoRow) -> Result<Option<BatchResult>> {
        self.bind_with(row, FlushMode::NoFlush).await
    }

    /// Buffer a row, and flush the buffer if `mode` is [`FlushMode::Flush`].
    pub async fn bind_with(&mut self, row: impl IntoRow, mode: FlushMode) -> Result<Option<BatchResult>> {
        self.push(row.into_row())?;
        if mode == FlushMode::Flush || self.rows.len() >= self.bulk_size {
            return self.flush().await.map(Some);
        }
        Ok(None)
    }

    /// Execute a row the way the statement was declared.
    ///
    /// For a `bulk` statement, a row is buffered and an empty row flushes the
    /// buffer. Otherwise the row is executed immediately.
    pub async fn exec(&mut self, row: impl IntoRow) -> Result<Option<BatchResult>> {
        let row = row.into_row();
        if !self.stmt.is_bulk() {
            return self.bind_with(row, FlushMode::Flush).await;
        }
        if row.is_empty() {
            return self.flush().await.map(Some);
        }
        self.bind_with(row, FlushMode::NoFlush).await
    }

    /// Transmit buffered rows.
    ///
    /// Flushing an empty buffer does nothing.
    ///
    /// # Cancel safety
    ///
    /// This method is not cancel safe. If the returned future is dropped
    /// before completion, the buffered rows are lost and the state stays
    /// [`BatchState::Flushing`]. The transport is then out of sync and must
    /// be discarded.
    pub async fn flush(&mut self) -> Result<BatchResult> {
        if self.rows.is_empty() {
            return Ok(BatchResult::default());
        }

        let rows = mem::take(&mut self.rows);
        let count = rows.len();
        verbose!(statement = %self.stmt.id(), rows = count, "flush batch");

        let mut request = Request::new(MessageType::Execute);
        request.push(&self.stmt.id());
        request.push(&Parameters::new(rows));

        self.state = BatchState::Flushing;
        let result = self.roundtrip(request, count).await;
        self.state = BatchState::Idle;

        verbose!(ok = result.is_ok(), "flush batch complete");
        result
    }

    fn push(&mut self, row: Vec<Value>) -> Result<(), UsageError> {
        let expect = self.stmt.param_count();
        if row.len() != expect {
            return Err(UsageError::ArityMismatch { expect, found: row.len() });
        }
        self.rows.push(row);
        self.state = BatchState::Buffering;
        Ok(())
    }

    async fn roundtrip(&mut self, request: Request, count: usize) -> Result<BatchResult> {
        self.io.send(request);
        self.io.flush().await?;
        let reply = self.io.recv().await?;
        self.outcome(reply, count)
    }

    fn outcome(&mut self, reply: Reply, count: usize) -> Result<BatchResult> {
        span!("batch_reply", parts = reply.num_parts());

        let mut rows_affected = None;
        let mut errors = ServerErrors::default();

        for part in reply.parts() {
            let part = part.inspect_err(|_err| {
                report!(error, "malformed batch reply: {_err}");
            })?;
            match part.kind() {
                PartKind::RowsAffected => rows_affected = Some(part.decode::<RowsAffected>()?),
                PartKind::Error => part.decode_into(&mut errors)?,
                PartKind::StatementContext => part.decode_into(&mut self.statement_context)?,
                PartKind::TransactionFlags => part.decode_into(&mut self.transaction_flags)?,
                _ => {
                    verbose!(kind = ?part.kind(), "skip reply part");
                },
            }
        }

        let (warnings, errors): (Vec<_>, Vec<_>) = errors.0.into_iter().partition(|e| e.is_warning());

        for _warning in &warnings {
            report!(warn, "{_warning}");
        }

        let Some(rows_affected) = rows_affected else {
            if let Some(err) = errors.into_iter().next() {
                return Err(err.into());
            }
            return Err(ProtocolError::missing_part(PartKind::RowsAffected, "batch reply").into());
        };

        if rows_affected.len() != count {
            return Err(ProtocolError::RowCountMismatch { expect: count, found: rows_affected.len() }.into());
        }

        let affected: u64 = rows_affected.outcomes().map(|o| o.affected()).sum();
        let failed = rows_affected.outcomes().filter(|o| o.is_failed()).count();

        if failed != errors.len() {
            return Err(ProtocolError::ErrorCountMismatch { failed, errors: errors.len() }.into());
        }

        if failed == 0 {
            return Ok(BatchResult { rows: count, rows_affected: affected });
        }

        let entries = rows_affected
            .outcomes()
            .enumerate()
            .filter(|(_, o)| o.is_failed())
            .zip(errors)
            .map(|((i, _), err)| BatchEntry::new(i + 1, err))
            .collect();

        let err = BatchError::new(entries, count, affected);

        report!(warn, "{err}");

        Err(err.into())
    }
}
