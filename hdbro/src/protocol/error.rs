//! Protocol error
use std::fmt;

use bytes::TryGetError;

use super::PartKind;

/// An error when translating buffer from the server.
///
/// Any protocol error leaves the connection out of sync, it must not be used
/// for further exchange.
pub enum ProtocolError {
    /// Type code is not part of the known set.
    UnknownTypeCode {
        code: u8,
    },
    /// Buffer ended before the expected data.
    Truncated {
        requested: usize,
        available: usize,
    },
    /// Length or count field holds a negative value.
    InvalidLength {
        field: &'static str,
        value: i64,
    },
    /// Reply does not contain a required part.
    MissingPart {
        kind: PartKind,
        phase: &'static str,
    },
    /// Server reported outcome for different number of rows than sent.
    RowCountMismatch {
        expect: usize,
        found: usize,
    },
    /// Number of failed rows does not match number of reported errors.
    ErrorCountMismatch {
        failed: usize,
        errors: usize,
    },
}

impl ProtocolError {
    pub(crate) fn unknown_type_code(code: u8) -> ProtocolError {
        Self::UnknownTypeCode { code }
    }

    pub(crate) fn truncated(requested: usize, available: usize) -> ProtocolError {
        Self::Truncated { requested, available }
    }

    pub(crate) fn invalid_length(field: &'static str, value: impl Into<i64>) -> ProtocolError {
        Self::InvalidLength { field, value: value.into() }
    }

    pub(crate) fn missing_part(kind: PartKind, phase: &'static str) -> ProtocolError {
        Self::MissingPart { kind, phase }
    }
}

impl From<TryGetError> for ProtocolError {
    fn from(err: TryGetError) -> Self {
        Self::truncated(err.requested, err.available)
    }
}

impl std::error::Error for ProtocolError { }

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTypeCode { code } => write!(f, "Unknown type code `{code}`"),
            Self::Truncated { requested, available } => write!(
                f,
                "Unexpected end of buffer, requested {requested} bytes but {available} available"
            ),
            Self::InvalidLength { field, value } => write!(f, "Invalid `{field}` value {value}"),
            Self::MissingPart { kind, phase } => write!(f, "Expected part `{kind:?}` in `{phase}`"),
            Self::RowCountMismatch { expect, found } => write!(
                f,
                "Expected outcome for {expect} rows, server reported {found}"
            ),
            Self::ErrorCountMismatch { failed, errors } => write!(
                f,
                "Server reported {failed} failed rows but {errors} errors"
            ),
        }
    }
}

impl fmt::Debug for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
