//! # firebird-protocol
//!
//! Pure implementation of the Firebird remote wire protocol (version 10).
//!
//! This crate provides XDR primitives, request encoding, response decoding,
//! status vector interpretation, type descriptors and BLR message
//! generation.
//!
//! ## Design Philosophy
//!
//! This crate is intentionally IO-agnostic. It contains no networking logic and
//! makes no assumptions about the async runtime. Decoders work on any
//! [`bytes::Buf`] and report [`ProtocolError::Incomplete`] when more input is
//! needed, so the async layer above can simply read more and retry.
//!
//! ## Example
//!
//! ```rust
//! use firebird_protocol::{Request, FreeMode};
//!
//! let request = Request::FreeStatement { stmt: 7, mode: FreeMode::Drop };
//! let bytes = request.encode().unwrap();
//! assert_eq!(&bytes[..], &[0, 0, 0, 67, 0, 0, 0, 7, 0, 0, 0, 2]);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod blr;
pub mod codec;
pub mod error;
pub mod info;
pub mod op;
pub mod param_block;
pub mod request;
pub mod response;
pub mod status;
pub mod types;
pub mod version;

pub use blr::message_blr;
pub use error::ProtocolError;
pub use info::{DescribedVars, RecordCounts, Section, SqlInfoItem, StatementInfo};
pub use op::OpCode;
pub use param_block::{AttachParams, ParamBlock};
pub use request::{FreeMode, MessageRef, Request, MAX_SEGMENT_SIZE};
pub use response::{
    AcceptResponse, Expect, FetchFrame, GenericResponse, RawRow, Response, SqlResponse,
};
pub use status::{Diagnostic, EmptyCatalog, MessageCatalog, StaticCatalog, StatusArg, StatusVector};
pub use types::{BlobId, SqlType, StatementType, XSqlVar};
pub use version::{ProtocolVersion, SUPPORTED_PROTOCOLS};
