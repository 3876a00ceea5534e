//! HANA SQL Command Network Protocol
//!
//! ## Parts
//!
//! A message carries a sequence of parts. Each part is an independently framed
//! payload unit, see [`part`] for the header layout.
//!
//! ```text
//! ┏━━━━━━━━━━━━━┳━━━━━━━━┳━━━━━━━━━┳━━━━━━━━━━━━━┳━━━━━━━━┳━━━━━━━━━┓
//! ┃ Part Header ┃ Buffer ┃ Padding ┃ Part Header ┃ Buffer ┃ Padding ┃ ..
//! ┣━━━━━━━━━━━━━╋━━━━━━━━╋━━━━━━━━━╋━━━━━━━━━━━━━╋━━━━━━━━╋━━━━━━━━━┫
//! ┃  16 bytes   ┃  [u8]  ┃  0..8   ┃  16 bytes   ┃  [u8]  ┃  0..8   ┃
//! ┗━━━━━━━━━━━━━┻━━━━━━━━┻━━━━━━━━━┻━━━━━━━━━━━━━┻━━━━━━━━┻━━━━━━━━━┛
//! ```
//!
//! All integers and floats are little endian.
//!
//! ## Options
//!
//! Several parts are a list of typed key value pairs, an option block. One
//! entry is the key, the [`TypeCode`] and the value:
//!
//! ```text
//! ┏━━━━━┳━━━━━━┳━━━━━━━┓
//! ┃ Key ┃ Type ┃ Value ┃
//! ┣━━━━━╋━━━━━━╋━━━━━━━┫
//! ┃ i8  ┃  i8  ┃  ..   ┃
//! ┗━━━━━┻━━━━━━┻━━━━━━━┛
//! ```
//!
//! The argument count of the part header is the number of entries. Parts
//! with multiple lines, like [`TopologyInformation`], prefix each block with
//! its own `i16` entry count and use the argument count for the number of
//! lines.
mod type_code;
mod option;
mod server_error;
mod parts;
mod message;

pub mod keys;
pub mod part;

mod error;

pub use type_code::{HdbType, TypeCode};
pub use option::{MultiLineOptions, OptionKey, OptionValue, PlainOptions};
pub use part::{Part, PartDecode, PartEncode, PartHeader, PartKind, Parts, RawPart};
pub use server_error::{ErrorLevel, ServerError, ServerErrors};
pub use parts::{Parameters, RowOutcome, RowsAffected};
pub use message::{MessageType, Reply, ReplyBuilder, Request};
pub use error::ProtocolError;

/// Connection parameters exchanged on connect.
pub type ConnectOptions = PlainOptions<keys::ConnectOption>;

/// Execution context of a statement reply.
pub type StatementContext = PlainOptions<keys::StatementContextOption>;

/// Transaction state change of a reply.
pub type TransactionFlags = PlainOptions<keys::TransactionFlag>;

/// Hosts of the database landscape.
pub type TopologyInformation = MultiLineOptions<keys::TopologyOption>;
