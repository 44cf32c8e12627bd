//! Session state tracking.
//!
//! ## State Transitions
//!
//! ```text
//! Disconnected -> Handshaking (TCP connected, op_connect sent)
//! Handshaking -> Connected (op_accept)
//! Connected -> Attached (op_attach / op_create)
//! Attached -> Closed (op_detach / op_drop_database / close)
//! any -> Poisoned (transport failure or protocol desync)
//! ```
//!
//! Transactions and statements are tracked by handle while `Attached`; they
//! do not change the session state.

/// Runtime state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No transport yet.
    #[default]
    Disconnected,
    /// Transport open, protocol negotiation in progress.
    Handshaking,
    /// Protocol negotiated, no database attached.
    Connected,
    /// A database is attached.
    Attached,
    /// Detached or closed; the transport is gone.
    Closed,
    /// The stream is in an unknown position; no further requests are sent.
    Poisoned,
}

impl SessionState {
    /// Check if requests may still be sent.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !matches!(self, Self::Closed | Self::Poisoned)
    }

    /// Check if a database is attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        matches!(self, Self::Attached)
    }

    /// Get the state name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Handshaking => "handshaking",
            Self::Connected => "connected",
            Self::Attached => "attached",
            Self::Closed => "closed",
            Self::Poisoned => "poisoned",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable() {
        assert!(SessionState::Attached.is_usable());
        assert!(SessionState::Connected.is_usable());
        assert!(!SessionState::Poisoned.is_usable());
        assert!(!SessionState::Closed.is_usable());
        assert_eq!(SessionState::default(), SessionState::Disconnected);
    }
}
