//! # firebird-codec
//!
//! Async framing layer for the Firebird wire protocol.
//!
//! Firebird responses have no length header, so framing is driven by the
//! protocol decoder itself: the codec parses a response out of the read
//! buffer and, when the buffer runs short, waits for more bytes without
//! consuming anything.
//!
//! ## Architecture
//!
//! ```text
//! TCP Stream → WireCodec (response framing) → Connection → Session
//! ```
//!
//! ### Closing
//!
//! The connection splits the transport into read and write halves. A
//! [`CloseHandle`] can be cloned into another task to shut the socket down;
//! a read blocked on the server then fails with
//! [`CodecError::ConnectionClosed`].
//!
//! ```rust,ignore
//! use firebird_codec::Connection;
//!
//! let conn = Connection::new(tcp_stream);
//! let close = conn.close_handle();
//!
//! tokio::spawn(async move {
//!     close.close().await?;
//! });
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod codec;
pub mod connection;
pub mod error;
pub mod framed;

pub use codec::WireCodec;
pub use connection::{CloseHandle, Connection};
pub use error::CodecError;
pub use framed::{RequestWriter, ResponseReader};
