//! Codec error types.

use firebird_protocol::ProtocolError;
use thiserror::Error;

/// Errors raised while framing requests and responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// Transport failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The byte stream did not decode as the expected response.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The peer closed the connection, or it was closed locally.
    #[error("connection closed")]
    ConnectionClosed,
}
