use bytes::{Buf, BufMut, Bytes};

use crate::protocol::ProtocolError;

/// Length is `usize` in rust, while the protocol wants fixed width integer.
pub trait UsizeExt {
    /// Convert to `u16`, this will panic when overflow instead of wrapping.
    fn to_u16(self) -> u16;
    /// Convert to `i16`, this will panic when overflow instead of wrapping.
    fn to_i16(self) -> i16;
    /// Convert to `i32`, this will panic when overflow instead of wrapping.
    fn to_i32(self) -> i32;
}

/// Checked read operation in [`Bytes`].
pub trait BytesExt {
    /// Split off `len` bytes, or returns [`ProtocolError::Truncated`].
    fn try_split_to(&mut self, len: usize) -> Result<Bytes, ProtocolError>;

    /// Skip `len` bytes, or returns [`ProtocolError::Truncated`].
    fn try_skip(&mut self, len: usize) -> Result<(), ProtocolError>;

    /// Check that `count` items of at least `min_size` bytes each can be
    /// read, before allocating for them.
    fn check_count(&self, count: usize, min_size: usize) -> Result<(), ProtocolError>;
}

/// Variable length operation in [`BufMut`].
pub trait BufMutExt {
    /// Write zero bytes until `written` is aligned to `align`.
    fn put_padding(&mut self, written: usize, align: usize);
}

/// Helper trait to [`Display`][std::fmt::Display] bytes.
pub trait FmtExt {
    /// Lossy [`Display`][std::fmt::Display] bytes.
    fn lossy(&self) -> LossyFmt<'_>;
}

/// Lossy [`Display`][std::fmt::Display] implementation for bytes.
pub struct LossyFmt<'a>(pub &'a [u8]);

/// Number of bytes required to pad `len` up to a multiple of `align`.
pub const fn padding(len: usize, align: usize) -> usize {
    match len % align {
        0 => 0,
        rem => align - rem,
    }
}

impl UsizeExt for usize {
    fn to_u16(self) -> u16 {
        self.try_into().expect("value length too large for protocol")
    }

    fn to_i16(self) -> i16 {
        self.try_into().expect("argument count too large for protocol")
    }

    fn to_i32(self) -> i32 {
        self.try_into().expect("buffer length too large for protocol")
    }
}

impl BytesExt for Bytes {
    fn try_split_to(&mut self, len: usize) -> Result<Bytes, ProtocolError> {
        if self.len() < len {
            return Err(ProtocolError::truncated(len, self.len()));
        }
        Ok(self.split_to(len))
    }

    fn try_skip(&mut self, len: usize) -> Result<(), ProtocolError> {
        if self.len() < len {
            return Err(ProtocolError::truncated(len, self.len()));
        }
        Buf::advance(self, len);
        Ok(())
    }

    fn check_count(&self, count: usize, min_size: usize) -> Result<(), ProtocolError> {
        let requested = count.saturating_mul(min_size);
        if self.len() < requested {
            return Err(ProtocolError::truncated(requested, self.len()));
        }
        Ok(())
    }
}

impl<B: BufMut> BufMutExt for B {
    fn put_padding(&mut self, written: usize, align: usize) {
        self.put_bytes(0, padding(written, align));
    }
}

impl FmtExt for [u8] {
    fn lossy(&self) -> LossyFmt<'_> {
        LossyFmt(self)
    }
}

impl std::fmt::Display for LossyFmt<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &b in self.0 {
            if b.is_ascii_graphic() || b.is_ascii_whitespace() {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:x}")?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for LossyFmt<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "b\"{self}\"")
    }
}
