//! HANA Protocol Core
//!
//! Typed option codec, part framing, and bulk execution of prepared
//! statements for the HANA SQL command network protocol.
//!
//! # Examples
//!
//! Option block:
//!
//! ```
//! use bytes::BytesMut;
//! use hdbro::protocol::{TransactionFlags, part, keys::TransactionFlag};
//!
//! let mut flags = TransactionFlags::new();
//! flags.insert(TransactionFlag::Committed, true);
//! flags.insert(TransactionFlag::NewIsolationLevel, 2);
//!
//! let mut buf = BytesMut::new();
//! part::write(&flags, &mut buf);
//!
//! let raw = part::read(&mut buf.freeze()).unwrap();
//! let decoded: TransactionFlags = raw.decode().unwrap();
//! assert_eq!(decoded.get_bool(TransactionFlag::Committed), Some(true));
//! ```
//!
//! Bulk insert:
//!
//! ```no_run
//! use hdbro::{BatchExecutor, PreparedStatement, transport::HdbTransport};
//!
//! # async fn app<IO: HdbTransport>(io: IO, stmt: PreparedStatement) -> hdbro::Result<()> {
//! let mut exec = BatchExecutor::new(io, stmt);
//!
//! for i in 0..5 {
//!     exec.bind((i,)).await?;
//! }
//!
//! match exec.flush().await {
//!     Ok(result) => assert_eq!(result.rows, 5),
//!     Err(err) => match err.as_batch() {
//!         Some(batch) => {
//!             for entry in batch {
//!                 eprintln!("row {} failed: {}", entry.ordinal(), entry.error());
//!             }
//!         },
//!         None => return Err(err),
//!     },
//! }
//! # Ok(())
//! # }
//! ```

pub mod common;
mod ext;

// Protocol
pub mod protocol;

// Encoding
mod value;
pub mod encode;

// Component
mod statement;
pub mod sql;

// Operation
pub mod transport;
pub mod batch;

mod config;
mod error;


pub use value::Value;
pub use encode::{Encode, IntoRow};
pub use sql::SqlExt;
pub use statement::{PreparedStatement, StatementId};

pub use batch::{BatchError, BatchExecutor, BatchResult, FlushMode};
pub use config::{Config, ParseError};
pub use error::{Error, ErrorKind, Result, UsageError};
