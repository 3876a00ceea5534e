//! In memory server for tests.
//!
//! Executes batches against a single table with an integer primary key in the
//! first column, and replies the way the server does for array execution.
use std::{
    collections::{BTreeSet, VecDeque},
    io,
    task::{Context, Poll},
};

use super::HdbTransport;
use crate::{
    Result,
    protocol::{
        ErrorLevel, MessageType, Parameters, PartKind, ReplyBuilder, Reply, Request,
        RowsAffected, ServerError, ServerErrors, StatementContext, TransactionFlags,
        keys::{StatementContextOption, TransactionFlag},
    },
    statement::StatementId,
    value::Value,
};

#[derive(Debug, Default)]
pub(crate) struct MockServer {
    fields: usize,
    table: BTreeSet<i32>,
    canned: VecDeque<Reply>,
    replies: VecDeque<Reply>,
    batches: Vec<usize>,
    flushes: usize,
    stalled: bool,
}

impl MockServer {
    /// Server for statements with `fields` parameters.
    pub(crate) fn new(fields: usize) -> Self {
        Self { fields, ..Default::default() }
    }

    /// Reply with `reply` to the next request instead of executing it.
    pub(crate) fn respond_with(&mut self, reply: Reply) {
        self.canned.push_back(reply);
    }

    /// Never deliver replies.
    pub(crate) fn stall(&mut self) {
        self.stalled = true;
    }

    /// Keys stored in the table, ascending.
    pub(crate) fn table(&self) -> Vec<i32> {
        self.table.iter().copied().collect()
    }

    /// Number of rows of each received batch.
    pub(crate) fn batches(&self) -> &[usize] {
        &self.batches
    }

    pub(crate) fn transmissions(&self) -> usize {
        self.batches.len()
    }

    pub(crate) fn flushes(&self) -> usize {
        self.flushes
    }

    fn receive(&mut self, request: &Request) -> Parameters {
        let mut statement = None;
        let mut params = Parameters::with_fields(self.fields);

        for part in request.parts() {
            let part = part.expect("client sent malformed part");
            match part.kind() {
                PartKind::StatementId => statement = Some(part.decode::<StatementId>().unwrap()),
                PartKind::Parameters => part.decode_into(&mut params).unwrap(),
                kind => panic!("unexpected part {kind:?}"),
            }
        }

        assert!(statement.is_some(), "execute without statement id");
        self.batches.push(params.rows().len());
        params
    }

    fn execute(&mut self, params: Parameters) -> Reply {
        let mut rows = RowsAffected::default();
        let mut errors = ServerErrors::default();

        for (i, row) in params.rows().iter().enumerate() {
            let Some(Value::Integer(key)) = row.first() else {
                panic!("first column must be an integer");
            };
            match self.table.insert(*key) {
                true => rows.0.push(1),
                false => {
                    rows.0.push(RowsAffected::EXECUTION_FAILED);
                    errors.0.push(
                        ServerError::new(
                            ServerError::UNIQUE_CONSTRAINT_VIOLATED,
                            ErrorLevel::Error,
                            *b"23000",
                            format!("unique constraint violated: key {key}"),
                        )
                        .with_position(i as i32 + 1),
                    );
                },
            }
        }

        let mut flags = TransactionFlags::new();
        flags.insert(TransactionFlag::WriteTransactionStarted, true);
        let mut context = StatementContext::new();
        context.insert(StatementContextOption::ServerProcessingTime, 42i64);

        let mut reply = ReplyBuilder::new();
        reply.push(&rows);
        if !errors.0.is_empty() {
            reply.push(&errors);
        }
        reply.push(&context).push(&flags);
        reply.build()
    }
}

impl HdbTransport for MockServer {
    fn poll_flush(&mut self, _: &mut Context) -> Poll<io::Result<()>> {
        self.flushes += 1;
        Poll::Ready(Ok(()))
    }

    fn poll_recv(&mut self, _: &mut Context) -> Poll<Result<Reply>> {
        if self.stalled {
            return Poll::Pending;
        }
        Poll::Ready(match self.replies.pop_front() {
            Some(reply) => Ok(reply),
            None => Err(io::Error::from(io::ErrorKind::UnexpectedEof).into()),
        })
    }

    fn send(&mut self, request: Request) {
        let reply = match request.message() {
            MessageType::Execute => {
                let params = self.receive(&request);
                match self.canned.pop_front() {
                    Some(reply) => reply,
                    None => self.execute(params),
                }
            },
            _ => ReplyBuilder::new().build(),
        };
        self.replies.push_back(reply);
    }
}
