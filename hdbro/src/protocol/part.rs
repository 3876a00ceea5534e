//! Part framing.
//!
//! A part is written as a fixed 16 bytes header followed by the part buffer,
//! padded with zero to an 8 bytes boundary.
//!
//! ```text
//! ┏━━━━━━┳━━━━━━━┳━━━━━━━━━┳━━━━━━━━━━━━━┳━━━━━━━━━━━━┳━━━━━━━━━━━━┳━━━━━━━━┳━━━━━━━━━┓
//! ┃ Kind ┃ Attrs ┃ ArgCount ┃ BigArgCount ┃ BufferLen  ┃ BufferSize ┃ Buffer ┃ Padding ┃
//! ┣━━━━━━╋━━━━━━━╋━━━━━━━━━╋━━━━━━━━━━━━━╋━━━━━━━━━━━━╋━━━━━━━━━━━━╋━━━━━━━━╋━━━━━━━━━┫
//! ┃  i8  ┃  i8   ┃   i16    ┃     i32     ┃    i32     ┃    i32     ┃  [u8]  ┃  [u8]   ┃
//! ┗━━━━━━┻━━━━━━━┻━━━━━━━━━┻━━━━━━━━━━━━━┻━━━━━━━━━━━━┻━━━━━━━━━━━━┻━━━━━━━━┻━━━━━━━━━┛
//! ```
//!
//! Argument count larger than `i16::MAX` is written in `BigArgCount`, with
//! `ArgCount` set to `-1`.
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::fmt;

use super::ProtocolError;
use crate::ext::{BufMutExt, BytesExt, UsizeExt, padding};

/// Part buffers are aligned to this boundary.
pub const PART_ALIGNMENT: usize = 8;

macro_rules! part_kind {
    ($($name:ident = $code:literal,)*) => {
        /// Kind of a part.
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub enum PartKind {
            $($name,)*
            /// Part kind not known by this crate.
            Other(i8),
        }

        impl From<i8> for PartKind {
            fn from(code: i8) -> Self {
                match code {
                    $($code => Self::$name,)*
                    other => Self::Other(other),
                }
            }
        }

        impl From<PartKind> for i8 {
            fn from(kind: PartKind) -> i8 {
                match kind {
                    $(PartKind::$name => $code,)*
                    PartKind::Other(code) => code,
                }
            }
        }

        impl fmt::Debug for PartKind {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Self::$name => f.write_str(stringify!($name)),)*
                    Self::Other(code) => write!(f, "Other({code})"),
                }
            }
        }
    };
}

part_kind! {
    Command = 3,
    ResultSet = 5,
    Error = 6,
    StatementId = 10,
    TransactionId = 11,
    RowsAffected = 12,
    ResultSetId = 13,
    TopologyInformation = 15,
    Parameters = 32,
    StatementContext = 39,
    ConnectOptions = 42,
    CommitOptions = 43,
    FetchOptions = 44,
    ParameterMetadata = 47,
    ResultMetadata = 48,
    TransactionFlags = 64,
}

/// Decode side of the part framing contract.
pub trait PartDecode {
    /// Populate self from the part buffer.
    ///
    /// `num_arg` is the argument count of the part header, its meaning is
    /// part specific (entries, lines, rows).
    fn decode(&mut self, body: &mut Bytes, num_arg: usize) -> Result<(), ProtocolError>;
}

/// Encode side of the part framing contract.
pub trait PartEncode {
    /// Part kind written in the header.
    const KIND: PartKind;

    /// Argument count written in the header.
    fn num_arg(&self) -> usize;

    /// Size of the part buffer.
    ///
    /// The length written by [`encode`][PartEncode::encode] must be equal
    /// to this size.
    fn size(&self) -> usize;

    /// Write the part buffer.
    fn encode(&self, buf: impl BufMut);
}

/// A type which can be read from and written as a part.
pub trait Part: PartDecode + PartEncode { }

impl<P: PartDecode + PartEncode> Part for P { }

/// Part header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartHeader {
    pub kind: PartKind,
    pub attributes: i8,
    pub num_arg: usize,
    pub buffer_length: usize,
    pub buffer_size: usize,
}

impl PartHeader {
    /// Header size in bytes.
    pub const SIZE: usize = 16;

    pub fn decode(buf: &mut Bytes) -> Result<Self, ProtocolError> {
        if buf.len() < Self::SIZE {
            return Err(ProtocolError::truncated(Self::SIZE, buf.len()));
        }
        let kind = PartKind::from(buf.get_i8());
        let attributes = buf.get_i8();
        let arg_count = buf.get_i16_le();
        let big_arg_count = buf.get_i32_le();
        let buffer_length = buf.get_i32_le();
        let buffer_size = buf.get_i32_le();

        let num_arg = match arg_count {
            -1 => big_arg_count,
            n => n as i32,
        };

        Ok(Self {
            kind,
            attributes,
            num_arg: non_negative("argument count", num_arg)?,
            buffer_length: non_negative("buffer length", buffer_length)?,
            buffer_size: non_negative("buffer size", buffer_size)?,
        })
    }

    pub fn encode(&self, mut buf: impl BufMut) {
        buf.put_i8(self.kind.into());
        buf.put_i8(self.attributes);
        match i16::try_from(self.num_arg) {
            Ok(n) => {
                buf.put_i16_le(n);
                buf.put_i32_le(0);
            },
            Err(_) => {
                buf.put_i16_le(-1);
                buf.put_i32_le(self.num_arg.to_i32());
            },
        }
        buf.put_i32_le(self.buffer_length.to_i32());
        buf.put_i32_le(self.buffer_size.to_i32());
    }
}

fn non_negative(field: &'static str, value: i32) -> Result<usize, ProtocolError> {
    usize::try_from(value).map_err(|_| ProtocolError::invalid_length(field, value))
}

/// Write a part header, buffer and padding to `buf`.
///
/// # Panics
///
/// Panics if the length written by [`PartEncode::encode`] is not equal to
/// [`PartEncode::size`].
pub fn write<P: PartEncode>(part: &P, buf: &mut BytesMut) {
    let size = part.size();
    buf.reserve(PartHeader::SIZE + size + padding(size, PART_ALIGNMENT));

    PartHeader {
        kind: P::KIND,
        attributes: 0,
        num_arg: part.num_arg(),
        buffer_length: size,
        buffer_size: size,
    }
    .encode(&mut *buf);

    let offset = buf.len();
    part.encode(&mut *buf);

    assert_eq!(
        buf.len() - offset,
        size,
        "Part {:?} buffer size not equal to size hint",
        P::KIND,
    );

    buf.put_padding(size, PART_ALIGNMENT);
}

/// A part which buffer is not yet decoded.
#[derive(Debug, Clone)]
pub struct RawPart {
    pub header: PartHeader,
    pub body: Bytes,
}

impl RawPart {
    pub fn kind(&self) -> PartKind {
        self.header.kind
    }

    /// Decode the buffer into `part`.
    pub fn decode_into<P: PartDecode>(&self, part: &mut P) -> Result<(), ProtocolError> {
        part.decode(&mut self.body.clone(), self.header.num_arg)
    }

    /// Decode the buffer into a new `P`.
    pub fn decode<P: PartDecode + Default>(&self) -> Result<P, ProtocolError> {
        let mut part = P::default();
        self.decode_into(&mut part)?;
        Ok(part)
    }
}

/// Read one part from `buf`.
///
/// Padding of the last part in a buffer may be omitted.
pub fn read(buf: &mut Bytes) -> Result<RawPart, ProtocolError> {
    let header = PartHeader::decode(buf)?;
    let body = buf.try_split_to(header.buffer_length)?;
    let pad = padding(header.buffer_length, PART_ALIGNMENT).min(buf.len());
    buf.try_skip(pad)?;
    Ok(RawPart { header, body })
}

/// Iterator of parts in a buffer.
///
/// Iteration stops after the first error.
#[derive(Debug, Clone)]
pub struct Parts {
    buf: Bytes,
    remaining: usize,
}

impl Parts {
    /// Iterate `num_parts` parts in `buf`.
    pub fn new(buf: Bytes, num_parts: usize) -> Self {
        Self { buf, remaining: num_parts }
    }
}

impl Iterator for Parts {
    type Item = Result<RawPart, ProtocolError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let result = read(&mut self.buf);
        self.remaining = match result {
            Ok(_) => self.remaining - 1,
            Err(_) => 0,
        };
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
