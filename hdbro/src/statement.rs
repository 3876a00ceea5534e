//! Prepared statement handle.
use bytes::{Buf, BufMut, Bytes};
use std::fmt;

use crate::{
    protocol::{PartDecode, PartEncode, PartKind, ProtocolError},
    sql::Sql,
};

/// Server side statement id.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StatementId(u64);

impl StatementId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl PartDecode for StatementId {
    fn decode(&mut self, body: &mut Bytes, _: usize) -> Result<(), ProtocolError> {
        self.0 = body.try_get_u64_le()?;
        Ok(())
    }
}

impl PartEncode for StatementId {
    const KIND: PartKind = PartKind::StatementId;

    fn num_arg(&self) -> usize {
        1
    }

    fn size(&self) -> usize {
        8
    }

    fn encode(&self, mut buf: impl BufMut) {
        buf.put_u64_le(self.0);
    }
}

impl fmt::Display for StatementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

impl fmt::Debug for StatementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StatementId").field(&format_args!("{self}")).finish()
    }
}

/// A statement prepared by the server.
///
/// Producing the handle is the job of the prepare round trip, the batch
/// executor only needs the id and the parameter count.
#[derive(Debug, Clone)]
pub struct PreparedStatement {
    id: StatementId,
    sql: String,
    param_count: usize,
    bulk: bool,
}

impl PreparedStatement {
    pub fn new(sql: impl Sql, id: StatementId, param_count: usize) -> Self {
        Self {
            id,
            bulk: sql.is_bulk(),
            sql: sql.sql().to_owned(),
            param_count,
        }
    }

    pub fn id(&self) -> StatementId {
        self.id
    }

    /// Sql string, without the `bulk` keyword.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn param_count(&self) -> usize {
        self.param_count
    }

    /// Whether the statement was declared with the `bulk` keyword.
    pub fn is_bulk(&self) -> bool {
        self.bulk
    }
}
