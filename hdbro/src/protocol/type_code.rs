use std::fmt;

use super::ProtocolError;

macro_rules! type_code {
    ($(
        $(#[$doc:meta])* $name:ident = $code:literal, $width:expr;
    )*) => {
        /// Wire code identifying the kind of a typed value.
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u8)]
        pub enum TypeCode {
            $($(#[$doc])* $name = $code,)*
        }

        impl TypeCode {
            /// Returns the wire code.
            pub const fn code(self) -> u8 {
                self as u8
            }

            /// Returns the payload width for fixed width type.
            ///
            /// Returns `None` for length prefixed type.
            pub const fn fixed_width(self) -> Option<usize> {
                match self {
                    $(Self::$name => $width,)*
                }
            }

            /// Returns the type name.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$name => stringify!($name),)*
                }
            }
        }

        impl TryFrom<u8> for TypeCode {
            type Error = ProtocolError;

            fn try_from(code: u8) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok(Self::$name),)*
                    code => Err(ProtocolError::unknown_type_code(code)),
                }
            }
        }
    };
}

type_code! {
    /// 4 byte signed integer.
    Integer = 3, Some(4);
    /// 8 byte signed integer.
    Bigint = 4, Some(8);
    /// 8 byte IEEE 754 double.
    Double = 7, Some(8);
    /// 1 byte boolean.
    Boolean = 28, Some(1);
    /// Length prefixed text.
    String = 29, None;
    /// Length prefixed binary.
    Bstring = 33, None;
}

impl TypeCode {
    /// Flag set on a parameter type code to mark the value as NULL.
    pub const NULL_FLAG: u8 = 0x80;

    /// Returns the wire code of the NULL value of this type.
    pub const fn null_code(self) -> u8 {
        self.code() | Self::NULL_FLAG
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Debug for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.code())
    }
}

/// A type that have corresponding wire type code.
pub trait HdbType {
    const TYPE_CODE: TypeCode;
}

macro_rules! hdb_type {
    ($ty:ty, $code:ident) => {
        impl HdbType for $ty {
            const TYPE_CODE: TypeCode = TypeCode::$code;
        }
    };
}

hdb_type!(bool, Boolean);
hdb_type!(i32, Integer);
hdb_type!(i64, Bigint);
hdb_type!(f64, Double);
hdb_type!(str, String);
hdb_type!(String, String);
hdb_type!([u8], Bstring);
hdb_type!(Vec<u8>, Bstring);
hdb_type!(bytes::Bytes, Bstring);

impl<T: HdbType + ?Sized> HdbType for &T {
    const TYPE_CODE: TypeCode = T::TYPE_CODE;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_codes() {
        for code in [3u8, 4, 7, 28, 29, 33] {
            assert_eq!(TypeCode::try_from(code).unwrap().code(), code);
        }
        assert_eq!(TypeCode::Integer.fixed_width(), Some(4));
        assert_eq!(TypeCode::Bstring.fixed_width(), None);
        assert_eq!(TypeCode::Integer.null_code(), 0x83);
    }

    #[test]
    fn unknown_code() {
        assert!(matches!(
            TypeCode::try_from(0x55),
            Err(ProtocolError::UnknownTypeCode { code: 0x55 })
        ));
    }
}
