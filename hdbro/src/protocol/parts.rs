//! Batch related parts.
use bytes::{Buf, BufMut, Bytes};

use super::{PartDecode, PartEncode, PartKind, ProtocolError};
use crate::{ext::BytesExt, value::Value};

/// Outcome of one row in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// Row succeeded, affecting the given number of rows.
    Affected(u64),
    /// Row succeeded, the server did not report the count.
    SuccessNoInfo,
    /// Row failed, the detail is in the error part.
    Failed,
}

impl RowOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Affected row count, unknown count is zero.
    pub fn affected(&self) -> u64 {
        match self {
            Self::Affected(n) => *n,
            Self::SuccessNoInfo | Self::Failed => 0,
        }
    }
}

/// Affected row count for each row of a batch.
///
/// A negative entry is either [`SUCCESS_NO_INFO`][Self::SUCCESS_NO_INFO] or
/// [`EXECUTION_FAILED`][Self::EXECUTION_FAILED].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowsAffected(pub Vec<i32>);

impl RowsAffected {
    pub const SUCCESS_NO_INFO: i32 = -2;
    pub const EXECUTION_FAILED: i32 = -3;

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn outcomes(&self) -> impl ExactSizeIterator<Item = RowOutcome> + '_ {
        self.0.iter().map(|&n| match n {
            Self::EXECUTION_FAILED => RowOutcome::Failed,
            n if n >= 0 => RowOutcome::Affected(n as u64),
            _ => RowOutcome::SuccessNoInfo,
        })
    }
}

impl PartDecode for RowsAffected {
    fn decode(&mut self, body: &mut Bytes, num_arg: usize) -> Result<(), ProtocolError> {
        body.check_count(num_arg, 4)?;
        self.0.clear();
        self.0.extend((0..num_arg).map(|_| body.get_i32_le()));
        Ok(())
    }
}

impl PartEncode for RowsAffected {
    const KIND: PartKind = PartKind::RowsAffected;

    fn num_arg(&self) -> usize {
        self.0.len()
    }

    fn size(&self) -> usize {
        self.0.len() * 4
    }

    fn encode(&self, mut buf: impl BufMut) {
        for n in &self.0 {
            buf.put_i32_le(*n);
        }
    }
}

/// Parameter rows of a statement execution.
///
/// Every row is written back to back, the argument count is the number of
/// rows. Decoding requires the number of fields per row to be known, see
/// [`Parameters::with_fields`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    fields: usize,
    rows: Vec<Vec<Value>>,
}

impl Parameters {
    pub fn new(rows: Vec<Vec<Value>>) -> Self {
        let fields = rows.first().map(Vec::len).unwrap_or_default();
        Self { fields, rows }
    }

    /// Create empty parameters which decode `fields` values per row.
    pub fn with_fields(fields: usize) -> Self {
        Self { fields, rows: vec![] }
    }

    pub fn fields(&self) -> usize {
        self.fields
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<Value>> {
        self.rows
    }
}

impl PartDecode for Parameters {
    fn decode(&mut self, body: &mut Bytes, num_arg: usize) -> Result<(), ProtocolError> {
        body.check_count(num_arg, self.fields.max(1))?;
        self.rows.clear();
        self.rows.reserve(num_arg);
        for _ in 0..num_arg {
            let row = (0..self.fields)
                .map(|_| Value::decode(body))
                .collect::<Result<_, _>>()?;
            self.rows.push(row);
        }
        Ok(())
    }
}

impl PartEncode for Parameters {
    const KIND: PartKind = PartKind::Parameters;

    fn num_arg(&self) -> usize {
        self.rows.len()
    }

    fn size(&self) -> usize {
        self.rows.iter().flatten().map(Value::size).sum()
    }

    fn encode(&self, mut buf: impl BufMut) {
        for value in self.rows.iter().flatten() {
            value.encode(&mut buf);
        }
    }
}

#[cfg(test)]
mod test {
    use bytes::BytesMut;

    use super::*;
    use crate::protocol::{TypeCode, part};

    #[test]
    fn rows_affected_outcomes() {
        let rows = RowsAffected(vec![1, -3, 0, -2, -3, -7]);
        let outcomes: Vec<_> = rows.outcomes().collect();
        assert_eq!(
            outcomes,
            [
                RowOutcome::Affected(1),
                RowOutcome::Failed,
                RowOutcome::Affected(0),
                RowOutcome::SuccessNoInfo,
                RowOutcome::Failed,
                RowOutcome::SuccessNoInfo,
            ]
        );
        assert_eq!(outcomes.iter().map(RowOutcome::affected).sum::<u64>(), 1);
    }

    #[test]
    fn rows_affected_truncated() {
        let mut body = Bytes::from_static(&[1, 0, 0, 0, 2, 0]);
        let err = RowsAffected::default().decode(&mut body, 2).unwrap_err();
        assert!(matches!(err, ProtocolError::Truncated { requested: 8, available: 6 }));
    }

    #[test]
    fn parameters_part() {
        let params = Parameters::new(vec![
            vec![Value::Integer(1), Value::String(Bytes::from_static(b"one"))],
            vec![Value::Integer(2), Value::Null(TypeCode::String)],
        ]);

        let mut buf = BytesMut::new();
        part::write(&params, &mut buf);

        let raw = part::read(&mut buf.freeze()).unwrap();
        assert_eq!(raw.kind(), PartKind::Parameters);
        assert_eq!(raw.header.num_arg, 2);
        assert_eq!(raw.header.buffer_length, 5 + 5 + 5 + 1);

        let mut decoded = Parameters::with_fields(2);
        raw.decode_into(&mut decoded).unwrap();
        assert_eq!(decoded, params);
    }
}
