//! Typed option records.
//!
//! An option is a key and a self describing value. Options are grouped in
//! blocks, a block is written as its entries back to back, the number of
//! entries is carried outside of the block (part argument count, or the
//! count prefix of a [`MultiLineOptions`] line).
//!
//! ```text
//! ┏━━━━━┳━━━━━━┳━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┓
//! ┃ Key ┃ Type ┃ Payload                                 ┃
//! ┣━━━━━╋━━━━━━╋━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┫
//! ┃ i8  ┃  u8  ┃ bool | i32 | i64 | f64 | u16 len, [u8]  ┃
//! ┗━━━━━┻━━━━━━┻━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛
//! ```
use bytes::{Buf, BufMut, Bytes};
use std::fmt;

use super::{PartDecode, PartEncode, PartKind, ProtocolError, TypeCode};
use crate::{
    error::UsageError,
    ext::{BytesExt, FmtExt, UsizeExt},
};

/// A typed option value.
///
/// Equality compares `Double` by bit pattern, so a NaN equals a NaN with the
/// same payload and `0.0` does not equal `-0.0`.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionValue {
    Boolean(bool),
    Integer(i32),
    Bigint(i64),
    Double(f64),
    /// Text, not validated as utf8.
    String(Bytes),
    Binary(Bytes),
}

impl OptionValue {
    /// Maximum length of `String` and `Binary` value.
    pub const MAX_LEN: usize = u16::MAX as usize;

    /// Create text value, checking its length.
    pub fn string(value: impl Into<Bytes>) -> Result<Self, UsageError> {
        let value = value.into();
        match value.len() > Self::MAX_LEN {
            true => Err(UsageError::ValueTooLarge { len: value.len() }),
            false => Ok(Self::String(value)),
        }
    }

    /// Create binary value, checking its length.
    pub fn binary(value: impl Into<Bytes>) -> Result<Self, UsageError> {
        let value = value.into();
        match value.len() > Self::MAX_LEN {
            true => Err(UsageError::ValueTooLarge { len: value.len() }),
            false => Ok(Self::Binary(value)),
        }
    }

    /// Returns the wire type code of the variant.
    pub const fn type_code(&self) -> TypeCode {
        match self {
            Self::Boolean(_) => TypeCode::Boolean,
            Self::Integer(_) => TypeCode::Integer,
            Self::Bigint(_) => TypeCode::Bigint,
            Self::Double(_) => TypeCode::Double,
            Self::String(_) => TypeCode::String,
            Self::Binary(_) => TypeCode::Bstring,
        }
    }

    /// Payload width in bytes, excluding the type code.
    pub fn size(&self) -> usize {
        match self {
            Self::Boolean(_) => 1,
            Self::Integer(_) => 4,
            Self::Bigint(_) => 8,
            Self::Double(_) => 8,
            Self::String(v) | Self::Binary(v) => 2 + v.len(),
        }
    }

    /// Read the payload of an already read type `code`.
    pub fn decode(buf: &mut Bytes, code: u8) -> Result<Self, ProtocolError> {
        let value = match TypeCode::try_from(code)? {
            TypeCode::Boolean => Self::Boolean(buf.try_get_u8()? != 0),
            TypeCode::Integer => Self::Integer(buf.try_get_i32_le()?),
            TypeCode::Bigint => Self::Bigint(buf.try_get_i64_le()?),
            TypeCode::Double => Self::Double(buf.try_get_f64_le()?),
            TypeCode::String => {
                let len = buf.try_get_u16_le()?;
                Self::String(buf.try_split_to(len as usize)?)
            },
            TypeCode::Bstring => {
                let len = buf.try_get_u16_le()?;
                Self::Binary(buf.try_split_to(len as usize)?)
            },
        };
        Ok(value)
    }

    /// Write type code followed by the payload, `1 + size()` bytes in total.
    ///
    /// # Panics
    ///
    /// Panics if `String` or `Binary` is longer than [`OptionValue::MAX_LEN`].
    pub fn encode(&self, mut buf: impl BufMut) {
        buf.put_u8(self.type_code().code());
        match self {
            Self::Boolean(v) => buf.put_u8(*v as u8),
            Self::Integer(v) => buf.put_i32_le(*v),
            Self::Bigint(v) => buf.put_i64_le(*v),
            Self::Double(v) => buf.put_f64_le(*v),
            Self::String(v) | Self::Binary(v) => {
                buf.put_u16_le(v.len().to_u16());
                buf.put_slice(v);
            },
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns `Bigint`, or `Integer` widened.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Bigint(v) => Some(*v),
            Self::Integer(v) => Some(*v as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the bytes of `String` or `Binary`.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::String(v) | Self::Binary(v) => Some(v),
            _ => None,
        }
    }
}

impl PartialEq for OptionValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
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

impl Eq for OptionValue { }

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Bigint(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{}", v.lossy()),
            Self::Binary(v) => write!(f, "{:?}", &v[..]),
        }
    }
}

impl fmt::Debug for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({self})", self.type_code().name())
    }
}

macro_rules! from {
    ($ty:ty => $variant:ident) => {
        impl From<$ty> for OptionValue {
            fn from(value: $ty) -> Self {
                Self::$variant(value)
            }
        }
    };
}

from!(bool => Boolean);
from!(i32 => Integer);
from!(i64 => Bigint);
from!(f64 => Double);

/// Key of an option block.
///
/// Each option part defines its own closed set of keys, see [`keys`][super::keys].
pub trait OptionKey: Copy + Eq + fmt::Debug + From<i8> + Into<i8> {
    /// Part kind that carries options with this key.
    const PART: PartKind;
}

/// An option block, key unique mapping from [`OptionKey`] to [`OptionValue`].
///
/// Entries keep their insertion order, so decoding then encoding a block
/// writes the entries back in wire order.
#[derive(Clone, PartialEq)]
pub struct PlainOptions<K> {
    entries: Vec<(K, OptionValue)>,
}

impl<K: OptionKey> PlainOptions<K> {
    /// Create empty block.
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if block contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert an entry, returning the previous value of `key`.
    ///
    /// Replacing an existing key keeps its position.
    pub fn insert(&mut self, key: K, value: impl Into<OptionValue>) -> Option<OptionValue> {
        let key = K::from(key.into());
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, old)) => Some(std::mem::replace(old, value)),
            None => {
                self.entries.push((key, value));
                None
            },
        }
    }

    pub fn get(&self, key: K) -> Option<&OptionValue> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: K) -> Option<OptionValue> {
        let i = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.remove(i).1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (K, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn get_bool(&self, key: K) -> Option<bool> {
        self.get(key).and_then(OptionValue::as_bool)
    }

    pub fn get_i32(&self, key: K) -> Option<i32> {
        self.get(key).and_then(OptionValue::as_i32)
    }

    pub fn get_i64(&self, key: K) -> Option<i64> {
        self.get(key).and_then(OptionValue::as_i64)
    }

    pub fn get_f64(&self, key: K) -> Option<f64> {
        self.get(key).and_then(OptionValue::as_f64)
    }

    pub fn get_bytes(&self, key: K) -> Option<&Bytes> {
        self.get(key).and_then(OptionValue::as_bytes)
    }

    /// Wire size of all entries, key and type code included.
    pub fn size(&self) -> usize {
        self.entries.iter().map(|(_, v)| 2 + v.size()).sum()
    }

    /// Replace the content with `count` entries read from `buf`.
    ///
    /// A key repeated in the stream overwrites the earlier value.
    pub fn decode(&mut self, buf: &mut Bytes, count: usize) -> Result<(), ProtocolError> {
        // key, type code, and one byte boolean at least
        buf.check_count(count, 3)?;
        self.entries.clear();
        self.entries.reserve(count);
        for _ in 0..count {
            let key = K::from(buf.try_get_i8()?);
            let code = buf.try_get_u8()?;
            let value = OptionValue::decode(buf, code)?;
            self.insert(key, value);
        }
        Ok(())
    }

    /// Write all entries, [`size`][PlainOptions::size] bytes in total.
    pub fn encode(&self, mut buf: impl BufMut) {
        for (key, value) in &self.entries {
            buf.put_i8((*key).into());
            value.encode(&mut buf);
        }
    }
}

impl<K: OptionKey> Default for PlainOptions<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: OptionKey, V: Into<OptionValue>> FromIterator<(K, V)> for PlainOptions<K> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut me = Self::new();
        for (k, v) in iter {
            me.insert(k, v);
        }
        me
    }
}

impl<K: OptionKey> fmt::Debug for PlainOptions<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter().map(|(k, v)| (k, v))).finish()
    }
}

impl<K: OptionKey> PartDecode for PlainOptions<K> {
    fn decode(&mut self, body: &mut Bytes, num_arg: usize) -> Result<(), ProtocolError> {
        PlainOptions::decode(self, body, num_arg)
    }
}

impl<K: OptionKey> PartEncode for PlainOptions<K> {
    const KIND: PartKind = K::PART;

    fn num_arg(&self) -> usize {
        self.len()
    }

    fn size(&self) -> usize {
        PlainOptions::size(self)
    }

    fn encode(&self, buf: impl BufMut) {
        PlainOptions::encode(self, buf)
    }
}

/// Ordered sequence of option blocks.
///
/// Each line is written as its entry count followed by the block.
///
/// ```text
/// ┏━━━━━━━┳━━━━━━━━━━━━━━┳━━━━━━━┳━━━━━━━━━━━━━━┳━━━━
/// ┃ Count ┃ PlainOptions ┃ Count ┃ PlainOptions ┃ ..
/// ┣━━━━━━━╋━━━━━━━━━━━━━━╋━━━━━━━╋━━━━━━━━━━━━━━╋━━━━
/// ┃  u16  ┃     [u8]     ┃  u16  ┃     [u8]     ┃ ..
/// ┗━━━━━━━┻━━━━━━━━━━━━━━┻━━━━━━━┻━━━━━━━━━━━━━━┻━━━━
/// ```
#[derive(Clone, PartialEq)]
pub struct MultiLineOptions<K> {
    lines: Vec<PlainOptions<K>>,
}

impl<K: OptionKey> MultiLineOptions<K> {
    /// Create empty sequence.
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if there is no line.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PlainOptions<K>> {
        self.lines.get(index)
    }

    pub fn push(&mut self, line: PlainOptions<K>) {
        self.lines.push(line);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlainOptions<K>> {
        self.lines.iter()
    }

    /// Resize to exactly `len` lines, reusing existing storage.
    ///
    /// Kept lines are cleared.
    pub fn reset(&mut self, len: usize) {
        self.lines.truncate(len);
        self.lines.iter_mut().for_each(PlainOptions::clear);
        self.lines.resize_with(len, PlainOptions::new);
    }

    /// Sum of each line size, excluding the line count prefix.
    pub fn size(&self) -> usize {
        self.lines.iter().map(PlainOptions::size).sum()
    }

    /// Replace the content with `line_count` lines read from `buf`.
    pub fn decode(&mut self, buf: &mut Bytes, line_count: usize) -> Result<(), ProtocolError> {
        buf.check_count(line_count, 2)?;
        self.reset(line_count);
        for line in &mut self.lines {
            let count = buf.try_get_u16_le()?;
            line.decode(buf, count as usize)?;
        }
        Ok(())
    }

    /// Write all lines with their count prefix.
    ///
    /// # Panics
    ///
    /// Panics if a line has more than `u16::MAX` entries.
    pub fn encode(&self, mut buf: impl BufMut) {
        for line in &self.lines {
            buf.put_u16_le(line.len().to_u16());
            line.encode(&mut buf);
        }
    }
}

impl<K: OptionKey> Default for MultiLineOptions<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: OptionKey> FromIterator<PlainOptions<K>> for MultiLineOptions<K> {
    fn from_iter<I: IntoIterator<Item = PlainOptions<K>>>(iter: I) -> Self {
        Self { lines: iter.into_iter().collect() }
    }
}

impl<'a, K: OptionKey> IntoIterator for &'a MultiLineOptions<K> {
    type Item = &'a PlainOptions<K>;

    type IntoIter = std::slice::Iter<'a, PlainOptions<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: OptionKey> fmt::Debug for MultiLineOptions<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.lines).finish()
    }
}

impl<K: OptionKey> PartDecode for MultiLineOptions<K> {
    fn decode(&mut self, body: &mut Bytes, num_arg: usize) -> Result<(), ProtocolError> {
        MultiLineOptions::decode(self, body, num_arg)
    }
}

impl<K: OptionKey> PartEncode for MultiLineOptions<K> {
    const KIND: PartKind = K::PART;

    fn num_arg(&self) -> usize {
        self.len()
    }

    /// Line count prefixes are part of the part buffer.
    fn size(&self) -> usize {
        MultiLineOptions::size(self) + 2 * self.len()
    }

    fn encode(&self, buf: impl BufMut) {
        MultiLineOptions::encode(self, buf)
    }
}

#[cfg(test)]
mod test {
    use bytes::BytesMut;

    use super::*;
    use crate::protocol::keys::{ConnectOption, TopologyOption};

    fn roundtrip(value: OptionValue) -> OptionValue {
        let mut buf = BytesMut::new();
        value.encode(&mut buf);
        assert_eq!(buf.len(), 1 + value.size());
        let mut buf = buf.freeze();
        let code = buf.get_u8();
        let decoded = OptionValue::decode(&mut buf, code).unwrap();
        assert!(buf.is_empty());
        decoded
    }

    #[test]
    fn value_roundtrip() {
        let values = [
            OptionValue::Boolean(true),
            OptionValue::Boolean(false),
            OptionValue::Integer(0),
            OptionValue::Integer(i32::MIN),
            OptionValue::Integer(-1),
            OptionValue::Bigint(i64::MAX),
            OptionValue::Bigint(-42),
            OptionValue::Double(0.0),
            OptionValue::Double(-0.0),
            OptionValue::Double(f64::INFINITY),
            OptionValue::Double(f64::NEG_INFINITY),
            OptionValue::String(Bytes::new()),
            OptionValue::String(Bytes::from_static(b"en_US")),
            OptionValue::Binary(Bytes::from_static(&[0, 1, 2, 255])),
        ];
        for value in values {
            assert_eq!(roundtrip(value.clone()), value);
        }
    }

    #[test]
    fn nan_keeps_bit_pattern() {
        let nan = f64::from_bits(0x7ff8_0000_dead_beef);
        match roundtrip(OptionValue::Double(nan)) {
            OptionValue::Double(v) => assert_eq!(v.to_bits(), nan.to_bits()),
            v => panic!("unexpected {v:?}"),
        }
    }

    #[test]
    fn max_length_value() {
        let max = OptionValue::binary(vec![7u8; OptionValue::MAX_LEN]).unwrap();
        assert_eq!(max.size(), 2 + 65535);
        assert_eq!(roundtrip(max.clone()), max);

        let err = OptionValue::string(vec![b'a'; OptionValue::MAX_LEN + 1]).unwrap_err();
        assert!(matches!(err, UsageError::ValueTooLarge { len: 65536 }));
    }

    #[test]
    fn unknown_type_code() {
        let mut buf = Bytes::from_static(&[0, 0, 0, 0, 0, 0, 0, 0]);
        let err = OptionValue::decode(&mut buf, 0x55).unwrap_err();
        assert!(matches!(err, ProtocolError::UnknownTypeCode { code: 0x55 }));
        assert_eq!(buf.len(), 8, "payload must not be consumed");

        // key, unknown type code
        let mut buf = Bytes::from_static(&[3, 0x55, 1, 2, 3, 4]);
        let mut opts = PlainOptions::<ConnectOption>::new();
        assert!(opts.decode(&mut buf, 1).is_err());
        assert!(opts.is_empty());
    }

    #[test]
    fn truncated_value() {
        let mut buf = Bytes::from_static(&[5, 0, b'a', b'b']);
        let err = OptionValue::decode(&mut buf, TypeCode::String.code()).unwrap_err();
        assert!(matches!(err, ProtocolError::Truncated { requested: 5, available: 2 }));
    }

    fn sample() -> PlainOptions<ConnectOption> {
        let mut opts = PlainOptions::new();
        opts.insert(ConnectOption::ClientLocale, OptionValue::string("en_US").unwrap());
        opts.insert(ConnectOption::CompleteArrayExecution, true);
        opts.insert(ConnectOption::DataFormatVersion2, 8);
        opts.insert(ConnectOption::ConnectionId, 200_123i64);
        opts.insert(ConnectOption::Other(99), 1.5);
        opts.insert(ConnectOption::OsUser, OptionValue::binary(&b"\x00\x01"[..]).unwrap());
        opts
    }

    #[test]
    fn block_size_matches_encode() {
        let opts = sample();
        let mut buf = BytesMut::new();
        opts.encode(&mut buf);
        assert_eq!(opts.size(), buf.len());
        assert_eq!(opts.size(), (2 + 7) + (2 + 1) + (2 + 4) + (2 + 8) + (2 + 8) + (2 + 4));

        let empty = PlainOptions::<ConnectOption>::new();
        assert_eq!(empty.size(), 0);
    }

    #[test]
    fn block_roundtrip() {
        let opts = sample();
        let mut buf = BytesMut::new();
        opts.encode(&mut buf);

        let mut decoded = PlainOptions::new();
        decoded.decode(&mut buf.freeze(), opts.len()).unwrap();

        assert_eq!(decoded.len(), opts.len());
        for (key, value) in opts.iter() {
            assert_eq!(decoded.get(key), Some(value), "{key:?}");
        }
        assert_eq!(decoded.get_i32(ConnectOption::DataFormatVersion2), Some(8));
        assert_eq!(decoded.get_bool(ConnectOption::CompleteArrayExecution), Some(true));
        assert_eq!(decoded.get_f64(ConnectOption::Other(99)), Some(1.5));
        assert_eq!(&decoded.get_bytes(ConnectOption::ClientLocale).unwrap()[..], b"en_US");
    }

    #[test]
    fn duplicate_key_last_write_wins() {
        let buf = [
            3, TypeCode::Integer.code(), 1, 0, 0, 0,
            5, TypeCode::Boolean.code(), 1,
            3, TypeCode::Integer.code(), 2, 0, 0, 0,
        ];
        let mut opts = PlainOptions::<ConnectOption>::new();
        opts.decode(&mut Bytes::copy_from_slice(&buf), 3).unwrap();
        assert_eq!(opts.len(), 2);
        assert_eq!(opts.get_i32(ConnectOption::from(3)), Some(2));
        assert_eq!(opts.iter().next().map(|(k, _)| k), Some(ConnectOption::from(3)));
    }

    #[test]
    fn map_operations() {
        let mut opts = sample();
        assert_eq!(opts.insert(ConnectOption::DataFormatVersion2, 9), Some(OptionValue::Integer(8)));
        assert_eq!(opts.remove(ConnectOption::ClientLocale).and_then(|e| e.as_bytes().cloned()), Some(Bytes::from_static(b"en_US")));
        assert!(!opts.contains_key(ConnectOption::ClientLocale));
        assert_eq!(opts.len(), 5);
    }

    fn host(name: &'static str, port: i32, master: bool) -> PlainOptions<TopologyOption> {
        [
            (TopologyOption::HostName, OptionValue::String(Bytes::from_static(name.as_bytes()))),
            (TopologyOption::HostPortNumber, OptionValue::Integer(port)),
            (TopologyOption::IsMaster, OptionValue::Boolean(master)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn sequence_keeps_order() {
        let lines: MultiLineOptions<TopologyOption> = [
            host("hana-a", 30013, true),
            host("hana-b", 30040, false),
            PlainOptions::new(),
            host("hana-c", 30041, false),
        ]
        .into_iter()
        .collect();

        let mut buf = BytesMut::new();
        lines.encode(&mut buf);
        assert_eq!(buf.len(), lines.size() + 2 * lines.len());

        let mut decoded = MultiLineOptions::new();
        let mut read = buf.clone().freeze();
        decoded.decode(&mut read, lines.len()).unwrap();
        assert!(read.is_empty());
        assert_eq!(decoded, lines);

        let names: Vec<_> = decoded
            .iter()
            .map(|e| e.get_bytes(TopologyOption::HostName).cloned())
            .collect();
        assert_eq!(names, [
            Some(Bytes::from_static(b"hana-a")),
            Some(Bytes::from_static(b"hana-b")),
            None,
            Some(Bytes::from_static(b"hana-c")),
        ]);

        let mut again = BytesMut::new();
        decoded.encode(&mut again);
        assert_eq!(again, buf);
    }

    #[test]
    fn sequence_reuses_storage() {
        let mut lines: MultiLineOptions<TopologyOption> = (0..4).map(|i| host("h", i, false)).collect();
        let capacity = lines.lines.capacity();

        lines.reset(2);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(PlainOptions::is_empty));
        assert_eq!(lines.lines.capacity(), capacity);

        lines.reset(3);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines.lines.capacity(), capacity);
    }

    #[test]
    fn other_key_is_unique() {
        let mut opts = PlainOptions::new();
        opts.insert(ConnectOption::ConnectionId, 1);
        assert_eq!(opts.insert(ConnectOption::Other(1), 2), Some(OptionValue::Integer(1)));
        assert_eq!(opts.len(), 1);
        assert_eq!(opts.get_i32(ConnectOption::ConnectionId), Some(2));
        assert_eq!(opts.iter().next().map(|(k, _)| format!("{k:?}")).as_deref(), Some("ConnectionId"));

        let mut buf = BytesMut::new();
        opts.encode(&mut buf);
        assert_eq!(buf.len(), opts.size());

        let mut decoded = PlainOptions::<ConnectOption>::new();
        decoded.decode(&mut buf.freeze(), opts.len()).unwrap();
        assert_eq!(decoded, opts);

        assert_eq!(opts.remove(ConnectOption::Other(1)), Some(OptionValue::Integer(2)));
        assert!(opts.is_empty());
    }
}
