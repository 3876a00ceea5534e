//! Request and reply envelope.
//!
//! Message and segment headers are the transport concern, this module only
//! carries the message type and the framed parts.
use bytes::{Bytes, BytesMut};
use std::fmt;

use super::{PartEncode, Parts, part};

macro_rules! message_type {
    ($($name:ident = $code:literal,)*) => {
        /// Request message type.
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub enum MessageType {
            $($name,)*
            Other(i8),
        }

        impl From<i8> for MessageType {
            fn from(code: i8) -> Self {
                match code {
                    $($code => Self::$name,)*
                    other => Self::Other(other),
                }
            }
        }

        impl From<MessageType> for i8 {
            fn from(ty: MessageType) -> i8 {
                match ty {
                    $(MessageType::$name => $code,)*
                    MessageType::Other(code) => code,
                }
            }
        }

        impl fmt::Debug for MessageType {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Self::$name => f.write_str(stringify!($name)),)*
                    Self::Other(code) => write!(f, "Other({code})"),
                }
            }
        }
    };
}

message_type! {
    ExecuteDirect = 2,
    Prepare = 3,
    Execute = 13,
    Connect = 66,
    Commit = 67,
    Rollback = 68,
    DropStatementId = 70,
    Disconnect = 77,
}

/// An outgoing message, parts are written as they are pushed.
#[derive(Debug, Clone)]
pub struct Request {
    message: MessageType,
    num_parts: usize,
    parts: BytesMut,
}

impl Request {
    pub fn new(message: MessageType) -> Self {
        Self { message, num_parts: 0, parts: BytesMut::new() }
    }

    /// Write a part into the request.
    pub fn push<P: PartEncode>(&mut self, part: &P) {
        part::write(part, &mut self.parts);
        self.num_parts += 1;
    }

    pub fn message(&self) -> MessageType {
        self.message
    }

    pub fn num_parts(&self) -> usize {
        self.num_parts
    }

    /// Encoded parts, including padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.parts
    }

    /// Iterate the written parts.
    pub fn parts(&self) -> Parts {
        Parts::new(Bytes::copy_from_slice(&self.parts), self.num_parts)
    }
}

/// An incoming message.
#[derive(Debug, Clone)]
pub struct Reply {
    num_parts: usize,
    body: Bytes,
}

impl Reply {
    pub fn new(num_parts: usize, body: Bytes) -> Self {
        Self { num_parts, body }
    }

    pub fn num_parts(&self) -> usize {
        self.num_parts
    }

    pub fn parts(&self) -> Parts {
        Parts::new(self.body.clone(), self.num_parts)
    }
}

/// Builds a [`Reply`] the same way a [`Request`] is built.
#[derive(Debug, Default)]
pub struct ReplyBuilder {
    num_parts: usize,
    body: BytesMut,
}

impl ReplyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<P: PartEncode>(&mut self, part: &P) -> &mut Self {
        part::write(part, &mut self.body);
        self.num_parts += 1;
        self
    }

    pub fn build(&mut self) -> Reply {
        Reply::new(std::mem::take(&mut self.num_parts), self.body.split().freeze())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::protocol::{PartKind, RowsAffected, TransactionFlags, keys::TransactionFlag};

    #[test]
    fn request_parts() {
        let mut req = Request::new(MessageType::Execute);
        req.push(&RowsAffected(vec![1, 2]));
        let mut flags = TransactionFlags::new();
        flags.insert(TransactionFlag::WriteTransactionStarted, true);
        req.push(&flags);

        assert_eq!(req.message(), MessageType::Execute);
        assert_eq!(req.num_parts(), 2);
        let kinds: Vec<_> = req.parts().map(|p| p.unwrap().kind()).collect();
        assert_eq!(kinds, [PartKind::RowsAffected, PartKind::TransactionFlags]);
    }

    #[test]
    fn reply_builder() {
        let reply = ReplyBuilder::new()
            .push(&RowsAffected(vec![1]))
            .build();
        assert_eq!(reply.num_parts(), 1);
        let raw = reply.parts().next().unwrap().unwrap();
        assert_eq!(raw.decode::<RowsAffected>().unwrap(), RowsAffected(vec![1]));
        assert_eq!(i8::from(MessageType::from(13)), 13);
    }
}
