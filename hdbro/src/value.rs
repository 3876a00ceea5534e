//! Row parameter value.
use bytes::{Buf, BufMut, Bytes};

use crate::{
    ext::{BytesExt, UsizeExt},
    protocol::{ProtocolError, TypeCode},
};

/// Largest length written in the single byte length indicator.
const LEN_INDICATOR_MAX: usize = 245;
/// Length indicator followed by `i16` length.
const LEN_INDICATOR_I16: u8 = 246;
/// Length indicator followed by `i32` length.
const LEN_INDICATOR_I32: u8 = 247;

/// A bound parameter value.
///
/// Written as the type code followed by the value. NULL is written as the
/// type code with [`TypeCode::NULL_FLAG`] set and no value. Variable length
/// data is prefixed by a length indicator:
///
/// | length          | indicator           |
/// |-----------------|---------------------|
/// | 0 ..= 245       | `u8` length         |
/// | ..= `i16::MAX`  | `246`, `i16` length |
/// | ..= `i32::MAX`  | `247`, `i32` length |
#[derive(Debug, Clone)]
pub enum Value {
    Null(TypeCode),
    Boolean(bool),
    Integer(i32),
    Bigint(i64),
    Double(f64),
    String(Bytes),
    Binary(Bytes),
}

impl Value {
    pub const fn type_code(&self) -> TypeCode {
        match self {
            Self::Null(code) => *code,
            Self::Boolean(_) => TypeCode::Boolean,
            Self::Integer(_) => TypeCode::Integer,
            Self::Bigint(_) => TypeCode::Bigint,
            Self::Double(_) => TypeCode::Double,
            Self::String(_) => TypeCode::String,
            Self::Binary(_) => TypeCode::Bstring,
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null(_))
    }

    /// Wire size, type code included.
    pub fn size(&self) -> usize {
        1 + match self {
            Self::Null(_) => 0,
            Self::Boolean(_) => 1,
            Self::Integer(_) => 4,
            Self::Bigint(_) => 8,
            Self::Double(_) => 8,
            Self::String(v) | Self::Binary(v) => len_indicator_size(v.len()) + v.len(),
        }
    }

    /// # Panics
    ///
    /// Panics if variable length data is longer than `i32::MAX`.
    pub fn encode(&self, mut buf: impl BufMut) {
        match self {
            Self::Null(code) => buf.put_u8(code.null_code()),
            Self::Boolean(v) => {
                buf.put_u8(TypeCode::Boolean.code());
                buf.put_u8(*v as u8);
            },
            Self::Integer(v) => {
                buf.put_u8(TypeCode::Integer.code());
                buf.put_i32_le(*v);
            },
            Self::Bigint(v) => {
                buf.put_u8(TypeCode::Bigint.code());
                buf.put_i64_le(*v);
            },
            Self::Double(v) => {
                buf.put_u8(TypeCode::Double.code());
                buf.put_f64_le(*v);
            },
            Self::String(v) | Self::Binary(v) => {
                buf.put_u8(self.type_code().code());
                put_len_indicator(&mut buf, v.len());
                buf.put_slice(v);
            },
        }
    }

    pub fn decode(buf: &mut Bytes) -> Result<Self, ProtocolError> {
        let code = buf.try_get_u8()?;
        if code & TypeCode::NULL_FLAG != 0 {
            return Ok(Self::Null(TypeCode::try_from(code & !TypeCode::NULL_FLAG)?));
        }
        let value = match TypeCode::try_from(code)? {
            TypeCode::Boolean => Self::Boolean(buf.try_get_u8()? != 0),
            TypeCode::Integer => Self::Integer(buf.try_get_i32_le()?),
            TypeCode::Bigint => Self::Bigint(buf.try_get_i64_le()?),
            TypeCode::Double => Self::Double(buf.try_get_f64_le()?),
            TypeCode::String => {
                let len = get_len_indicator(buf)?;
                Self::String(buf.try_split_to(len)?)
            },
            TypeCode::Bstring => {
                let len = get_len_indicator(buf)?;
                Self::Binary(buf.try_split_to(len)?)
            },
        };
        Ok(value)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null(a), Self::Null(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Bigint(a), Self::Bigint(b)) => a == b,
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Binary(a), Self::Binary(b)) => a == b,
            _ => false,
        }
    }
}

fn len_indicator_size(len: usize) -> usize {
    if len <= LEN_INDICATOR_MAX {
        1
    } else if len <= i16::MAX as usize {
        1 + 2
    } else {
        1 + 4
    }
}

fn put_len_indicator(mut buf: impl BufMut, len: usize) {
    if len <= LEN_INDICATOR_MAX {
        buf.put_u8(len as u8);
    } else if len <= i16::MAX as usize {
        buf.put_u8(LEN_INDICATOR_I16);
        buf.put_i16_le(len.to_i16());
    } else {
        buf.put_u8(LEN_INDICATOR_I32);
        buf.put_i32_le(len.to_i32());
    }
}

fn get_len_indicator(buf: &mut Bytes) -> Result<usize, ProtocolError> {
    let len = match buf.try_get_u8()? {
        LEN_INDICATOR_I16 => buf.try_get_i16_le()? as i64,
        LEN_INDICATOR_I32 => buf.try_get_i32_le()? as i64,
        len if len as usize <= LEN_INDICATOR_MAX => len as i64,
        len => return Err(ProtocolError::invalid_length("length indicator", len)),
    };
    usize::try_from(len).map_err(|_| ProtocolError::invalid_length("value length", len))
}
