//! Conversion of rust values into bound parameters.
use bytes::Bytes;

use crate::{protocol::HdbType, value::Value};

/// Value that can be encoded to be bound to sql parameter.
pub trait Encode {
    fn encode(self) -> Value;
}

macro_rules! encode {
    (<$lf:tt> $ty:ty => $var:ident) => {
        impl<$lf> Encode for &$lf $ty {
            fn encode(self) -> Value {
                Value::$var(Bytes::copy_from_slice(AsRef::<[u8]>::as_ref(self)))
            }
        }
    };
    ($ty:ty => $var:ident) => {
        impl Encode for $ty {
            fn encode(self) -> Value {
                Value::$var(self.into())
            }
        }
    };
}

encode!(bool => Boolean);
encode!(i32 => Integer);
encode!(i64 => Bigint);
encode!(f64 => Double);
encode!(String => String);
encode!(Vec<u8> => Binary);
encode!(Bytes => Binary);
encode!(<'a> str => String);
encode!(<'a> [u8] => Binary);
encode!(<'a> String => String);

impl Encode for Value {
    fn encode(self) -> Value {
        self
    }
}

impl<T: Encode + HdbType> Encode for Option<T> {
    fn encode(self) -> Value {
        match self {
            Some(value) => value.encode(),
            None => Value::Null(T::TYPE_CODE),
        }
    }
}

/// Type that can be bound as one row of parameters.
pub trait IntoRow {
    fn into_row(self) -> Vec<Value>;
}

impl IntoRow for Vec<Value> {
    fn into_row(self) -> Vec<Value> {
        self
    }
}

impl IntoRow for () {
    fn into_row(self) -> Vec<Value> {
        vec![]
    }
}

impl<T: Encode, const N: usize> IntoRow for [T; N] {
    fn into_row(self) -> Vec<Value> {
        self.into_iter().map(Encode::encode).collect()
    }
}

macro_rules! into_row {
    ($($t:ident $v:ident),*) => {
        impl<$($t: Encode),*> IntoRow for ($($t,)*) {
            fn into_row(self) -> Vec<Value> {
                let ($($v,)*) = self;
                vec![$($v.encode()),*]
            }
        }
    };
}

into_row!(T0 t0);
into_row!(T0 t0, T1 t1);
into_row!(T0 t0, T1 t1, T2 t2);
into_row!(T0 t0, T1 t1, T2 t2, T3 t3);
into_row!(T0 t0, T1 t1, T2 t2, T3 t3, T4 t4);
into_row!(T0 t0, T1 t1, T2 t2, T3 t3, T4 t4, T5 t5);

#[cfg(test)]
mod test {
    use super::*;
    use crate::protocol::TypeCode;

    #[test]
    fn encode_values() {
        assert_eq!(true.encode(), Value::Boolean(true));
        assert_eq!(7i64.encode(), Value::Bigint(7));
        assert_eq!("foo".encode(), Value::String(Bytes::from_static(b"foo")));
        assert_eq!(vec![1u8, 2].encode(), Value::Binary(Bytes::from_static(&[1, 2])));
        assert_eq!(None::<i32>.encode(), Value::Null(TypeCode::Integer));
        assert_eq!(None::<&str>.encode(), Value::Null(TypeCode::String));
        assert_eq!(Some(1.5f64).encode(), Value::Double(1.5));
    }

    #[test]
    fn encode_borrowed() {
        let owned = String::from("bar");
        assert_eq!((&owned).encode(), Value::String(Bytes::from_static(b"bar")));
        assert_eq!((&b"\x01"[..]).encode(), Value::Binary(Bytes::from_static(&[1])));
        assert_eq!(
            (1, "a", &owned).into_row(),
            [
                Value::Integer(1),
                Value::String(Bytes::from_static(b"a")),
                Value::String(Bytes::from_static(b"bar")),
            ]
        );
    }

    #[test]
    fn into_row() {
        assert!(().into_row().is_empty());
        assert_eq!([1, 2].into_row(), [Value::Integer(1), Value::Integer(2)]);
        assert_eq!(
            (1, "a", None::<i64>).into_row(),
            [
                Value::Integer(1),
                Value::String(Bytes::from_static(b"a")),
                Value::Null(TypeCode::Bigint),
            ]
        );
    }
}
