//! Client error types.

use firebird_protocol::{Diagnostic, ProtocolError};
use thiserror::Error;

/// Errors that can occur during client operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Connection closed, by the server or by a close handle.
    #[error("connection closed")]
    ConnectionClosed,

    /// Connection timeout occurred.
    #[error("connection timed out")]
    ConnectionTimeout,

    /// The server refused the protocol offer.
    #[error("connection rejected by server")]
    Rejected,

    /// Protocol error.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Codec error.
    #[error("codec error: {0}")]
    Codec(firebird_codec::CodecError),

    /// Type conversion error.
    #[error("type error: {0}")]
    Type(#[from] firebird_types::TypeError),

    /// Server returned an error.
    #[error("{message}")]
    Server {
        /// Every gds code reported, in order.
        gds_codes: Vec<i32>,
        /// SQL error code, 0 when none was reported.
        sql_code: i32,
        /// SQLSTATE, when the server sent one.
        sql_state: Option<String>,
        /// Composed error message.
        message: String,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Operation not valid in the current session state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Wrong number of parameters for a prepared statement.
    #[error("statement expects {expected} parameters, got {actual}")]
    ParameterCount {
        /// Parameters the statement declares.
        expected: usize,
        /// Parameters supplied.
        actual: usize,
    },
}

impl From<firebird_codec::CodecError> for Error {
    fn from(e: firebird_codec::CodecError) -> Self {
        match e {
            firebird_codec::CodecError::ConnectionClosed => Self::ConnectionClosed,
            other => Self::Codec(other),
        }
    }
}

impl From<Diagnostic> for Error {
    fn from(d: Diagnostic) -> Self {
        Self::Server {
            gds_codes: d.gds_codes,
            sql_code: d.sql_code,
            sql_state: d.sql_state,
            message: d.message,
        }
    }
}

impl Error {
    /// Check if the connection can no longer be used after this error.
    ///
    /// Transport failures and protocol desynchronisation both leave the
    /// stream in an unknown position; the session is poisoned.
    #[must_use]
    pub fn is_connection_lost(&self) -> bool {
        match self {
            Self::Io(_) | Self::ConnectionClosed | Self::ConnectionTimeout | Self::Codec(_) => {
                true
            }
            Self::Protocol(e) => e.is_desync() || e.is_incomplete(),
            _ => false,
        }
    }

    /// Check if this error was reported by the database engine.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    /// Get the SQL error code if this is a server error.
    #[must_use]
    pub fn sql_code(&self) -> Option<i32> {
        match self {
            Self::Server { sql_code, .. } => Some(*sql_code),
            _ => None,
        }
    }

    /// Check if the server reported a specific gds code.
    #[must_use]
    pub fn has_gds_code(&self, code: i32) -> bool {
        matches!(self, Self::Server { gds_codes, .. } if gds_codes.contains(&code))
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
