//! Server reported error.
use bytes::{Buf, BufMut, Bytes};
use std::{borrow::Cow, fmt};

use super::{PartDecode, PartEncode, PartKind, ProtocolError};
use crate::ext::{BufMutExt, BytesExt, FmtExt, UsizeExt, padding};

/// Severity of a [`ServerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorLevel {
    Warning,
    Error,
    FatalError,
    Other(i8),
}

impl From<i8> for ErrorLevel {
    fn from(level: i8) -> Self {
        match level {
            0 => Self::Warning,
            1 => Self::Error,
            2 => Self::FatalError,
            other => Self::Other(other),
        }
    }
}

impl From<ErrorLevel> for i8 {
    fn from(level: ErrorLevel) -> Self {
        match level {
            ErrorLevel::Warning => 0,
            ErrorLevel::Error => 1,
            ErrorLevel::FatalError => 2,
            ErrorLevel::Other(level) => level,
        }
    }
}

/// An error reported by the server.
///
/// ```text
/// ┏━━━━━━┳━━━━━━━━━━┳━━━━━━━━━┳━━━━━━━┳━━━━━━━━━━┳━━━━━━┓
/// ┃ Code ┃ Position ┃ TextLen ┃ Level ┃ SqlState ┃ Text ┃
/// ┣━━━━━━╋━━━━━━━━━━╋━━━━━━━━━╋━━━━━━━╋━━━━━━━━━━╋━━━━━━┫
/// ┃ i32  ┃   i32    ┃   i32   ┃  i8   ┃  [u8;5]  ┃ [u8] ┃
/// ┗━━━━━━┻━━━━━━━━━━┻━━━━━━━━━┻━━━━━━━┻━━━━━━━━━━┻━━━━━━┛
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ServerError {
    code: i32,
    position: i32,
    level: ErrorLevel,
    sql_state: [u8; 5],
    text: Bytes,
}

impl ServerError {
    /// Unique constraint violated.
    pub const UNIQUE_CONSTRAINT_VIOLATED: i32 = 301;

    /// Size of the fixed fields.
    const FIXED_SIZE: usize = 4 + 4 + 4 + 1 + 5;

    pub fn new(code: i32, level: ErrorLevel, sql_state: [u8; 5], text: impl Into<Bytes>) -> Self {
        Self { code, position: 0, level, sql_state, text: text.into() }
    }

    /// Set the position in the statement text the error refers to.
    pub fn with_position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn position(&self) -> i32 {
        self.position
    }

    pub fn level(&self) -> ErrorLevel {
        self.level
    }

    pub fn sql_state(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.sql_state)
    }

    /// The error message, the server may send non utf8 text.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.text)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self.level, ErrorLevel::Warning)
    }

    pub fn is_unique_violation(&self) -> bool {
        self.code == Self::UNIQUE_CONSTRAINT_VIOLATED
    }

    fn size(&self) -> usize {
        Self::FIXED_SIZE + self.text.len()
    }

    fn decode(buf: &mut Bytes) -> Result<Self, ProtocolError> {
        let code = buf.try_get_i32_le()?;
        let position = buf.try_get_i32_le()?;
        let text_len = buf.try_get_i32_le()?;
        let level = ErrorLevel::from(buf.try_get_i8()?);
        let mut sql_state = [0u8; 5];
        buf.try_copy_to_slice(&mut sql_state)?;
        let text_len = usize::try_from(text_len)
            .map_err(|_| ProtocolError::invalid_length("error text length", text_len))?;
        let text = buf.try_split_to(text_len)?;
        Ok(Self { code, position, level, sql_state, text })
    }

    fn encode(&self, mut buf: impl BufMut) {
        buf.put_i32_le(self.code);
        buf.put_i32_le(self.position);
        buf.put_i32_le(self.text.len().to_i32());
        buf.put_i8(self.level.into());
        buf.put_slice(&self.sql_state);
        buf.put_slice(&self.text);
    }
}

impl std::error::Error for ServerError { }

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            ErrorLevel::Warning => "warning",
            ErrorLevel::Error | ErrorLevel::Other(_) => "error",
            ErrorLevel::FatalError => "fatal error",
        };
        write!(
            f,
            "SQL {level} {}: {} (SQLSTATE {}",
            self.code,
            self.text.lossy(),
            self.sql_state.lossy(),
        )?;
        if self.position != 0 {
            write!(f, ", position {}", self.position)?;
        }
        f.write_str(")")
    }
}

impl fmt::Debug for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

/// The error part, entries are padded to 8 bytes except the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerErrors(pub Vec<ServerError>);

impl ServerErrors {
    const ALIGNMENT: usize = 8;
}

impl PartDecode for ServerErrors {
    fn decode(&mut self, body: &mut Bytes, num_arg: usize) -> Result<(), ProtocolError> {
        body.check_count(num_arg, ServerError::FIXED_SIZE)?;
        self.0.clear();
        self.0.reserve(num_arg);
        for i in 0..num_arg {
            let err = ServerError::decode(body)?;
            if i + 1 < num_arg {
                body.try_skip(padding(err.size(), Self::ALIGNMENT))?;
            }
            self.0.push(err);
        }
        Ok(())
    }
}

impl PartEncode for ServerErrors {
    const KIND: PartKind = PartKind::Error;

    fn num_arg(&self) -> usize {
        self.0.len()
    }

    fn size(&self) -> usize {
        let last = self.0.len().saturating_sub(1);
        self.0
            .iter()
            .enumerate()
            .map(|(i, e)| match i < last {
                true => e.size() + padding(e.size(), Self::ALIGNMENT),
                false => e.size(),
            })
            .sum()
    }

    fn encode(&self, mut buf: impl BufMut) {
        let last = self.0.len().saturating_sub(1);
        for (i, err) in self.0.iter().enumerate() {
            err.encode(&mut buf);
            if i < last {
                buf.put_padding(err.size(), Self::ALIGNMENT);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use bytes::BytesMut;

    use super::*;
    use crate::protocol::part;

    fn unique(pos: i32) -> ServerError {
        ServerError::new(
            ServerError::UNIQUE_CONSTRAINT_VIOLATED,
            ErrorLevel::Error,
            *b"23000",
            "unique constraint violated",
        )
        .with_position(pos)
    }

    #[test]
    fn error_part_roundtrip() {
        let errors = ServerErrors(vec![
            unique(1),
            ServerError::new(1347, ErrorLevel::Warning, *b"01000", Bytes::new()),
            unique(3),
        ]);

        let mut buf = BytesMut::new();
        part::write(&errors, &mut buf);

        let raw = part::read(&mut buf.freeze()).unwrap();
        assert_eq!(raw.kind(), PartKind::Error);
        assert_eq!(raw.header.num_arg, 3);

        let decoded: ServerErrors = raw.decode().unwrap();
        assert_eq!(decoded, errors);
        assert!(decoded.0[1].is_warning());
        assert_eq!(decoded.0[2].position(), 3);
        assert_eq!(decoded.0[0].sql_state(), "23000");
        assert!(decoded.0[0].is_unique_violation());
    }

    #[test]
    fn display() {
        assert_eq!(
            unique(0).to_string(),
            "SQL error 301: unique constraint violated (SQLSTATE 23000)"
        );
        assert_eq!(
            unique(12).to_string(),
            "SQL error 301: unique constraint violated (SQLSTATE 23000, position 12)"
        );
    }

    #[test]
    fn negative_text_length() {
        let mut buf = BytesMut::new();
        buf.put_i32_le(1);
        buf.put_i32_le(0);
        buf.put_i32_le(-5);
        buf.put_i8(1);
        buf.put_slice(b"HY000");
        let mut errors = ServerErrors::default();
        let err = errors.decode(&mut buf.freeze(), 1).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidLength { value: -5, .. }));
    }
}
