//! `hdbro` error types.
use std::{backtrace::Backtrace, fmt, io};

use crate::{
    batch::BatchError,
    config::ParseError,
    protocol::{ProtocolError, ServerError},
};

/// A specialized [`Result`] type for `hdbro` operation.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// All possible error from `hdbro` library.
pub struct Error {
    context: String,
    backtrace: Backtrace,
    kind: ErrorKind,
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    /// Add context to the error message.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Returns the [`BatchError`] if some rows of a batch failed.
    pub fn as_batch(&self) -> Option<&BatchError> {
        match &self.kind {
            ErrorKind::Batch(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the [`ServerError`] if the server rejected the request.
    pub fn as_database(&self) -> Option<&ServerError> {
        match &self.kind {
            ErrorKind::Database(e) => Some(e),
            _ => None,
        }
    }
}

/// All possible error kind from `hdbro` library.
pub enum ErrorKind {
    Config(ParseError),
    Protocol(ProtocolError),
    Io(io::Error),
    Database(ServerError),
    Batch(BatchError),
    Usage(UsageError),
}

macro_rules! from {
    (<$ty:ty>$pat:pat => $body:expr) => {
        impl From<$ty> for Error {
            fn from($pat: $ty) -> Self {
                let backtrace = std::backtrace::Backtrace::capture();
                Self { context: String::new(), backtrace, kind: $body }
            }
        }
    };
}

from!(<ErrorKind>e => e);
from!(<ParseError>e => ErrorKind::Config(e));
from!(<ProtocolError>e => ErrorKind::Protocol(e));
from!(<std::io::Error>e => ErrorKind::Io(e));
from!(<ServerError>e => ErrorKind::Database(e));
from!(<BatchError>e => ErrorKind::Batch(e));
from!(<UsageError>e => ErrorKind::Usage(e));

impl std::error::Error for Error { }

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.context.is_empty() {
            write!(f, "{}: ", self.context)?;
        }

        fmt::Display::fmt(&self.kind, f)?;

        if let std::backtrace::BacktraceStatus::Captured = self.backtrace.status() {
            let mut backtrace = self.backtrace.to_string();
            write!(f, "\n\n")?;
            writeln!(f, "Stack backtrace:")?;
            backtrace.truncate(backtrace.trim_end().len());
            write!(f, "{}", backtrace)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

impl std::error::Error for ErrorKind { }

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => e.fmt(f),
            Self::Protocol(e) => e.fmt(f),
            Self::Io(e) => e.fmt(f),
            Self::Database(e) => e.fmt(f),
            Self::Batch(e) => e.fmt(f),
            Self::Usage(e) => e.fmt(f),
        }
    }
}

impl fmt::Debug for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

/// Caller misuse, detected before any io.
#[derive(Clone, PartialEq, Eq)]
pub enum UsageError {
    /// Row length is not equal to the statement parameter count.
    ArityMismatch { expect: usize, found: usize },
    /// Index is past the end of a collection.
    IndexOutOfRange { index: usize, len: usize },
    /// Bulk size is zero.
    InvalidBulkSize,
    /// Option text or binary longer than 65535 bytes.
    ValueTooLarge { len: usize },
}

impl std::error::Error for UsageError { }

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArityMismatch { expect, found } => write!(
                f,
                "row has {found} values while the statement expects {expect} parameters"
            ),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            },
            Self::InvalidBulkSize => f.write_str("bulk size must be greater than zero"),
            Self::ValueTooLarge { len } => {
                write!(f, "value of {len} bytes exceed the maximum of 65535")
            },
        }
    }
}

impl fmt::Debug for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}
