//! Protocol version negotiation.

use core::fmt;

/// Version of the connect request layout itself.
pub const CONNECT_VERSION2: i32 = 2;

/// Remote protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProtocolVersion(i32);

impl ProtocolVersion {
    /// Protocol 10 (Firebird 1.x and later).
    pub const V10: Self = Self(10);

    /// Flag set on versions 11 and newer to mark them as Firebird-specific.
    const FB_FLAG: i32 = 0x8000;

    /// Create a version from its raw wire value.
    ///
    /// The Firebird-specific flag bit is stripped.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw & !Self::FB_FLAG)
    }

    /// Get the raw version number.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::V10
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "protocol {}", self.0)
    }
}

/// Client architecture advertised during connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Architecture {
    /// XDR, byte-order independent.
    Generic = 1,
}

/// Packet delivery types a client can accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i32)]
pub enum PacketType {
    /// Strict request/response.
    Rpc = 2,
    /// Batched sends.
    BatchSend = 3,
    /// Out-of-band packets.
    OutOfBand = 4,
    /// Deferred packets.
    LazySend = 5,
}

/// One protocol version offered in the connect request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolOffer {
    /// Offered version.
    pub version: ProtocolVersion,
    /// Offered architecture.
    pub architecture: Architecture,
    /// Minimum accepted packet type.
    pub min_type: PacketType,
    /// Maximum accepted packet type.
    pub max_type: PacketType,
    /// Preference weight; the server picks the highest.
    pub weight: i32,
}

/// The protocols this driver speaks.
pub const SUPPORTED_PROTOCOLS: &[ProtocolOffer] = &[ProtocolOffer {
    version: ProtocolVersion::V10,
    architecture: Architecture::Generic,
    min_type: PacketType::Rpc,
    max_type: PacketType::BatchSend,
    weight: 2,
}];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_stripped() {
        assert_eq!(ProtocolVersion::new(0x800d).raw(), 13);
        assert_eq!(ProtocolVersion::new(10), ProtocolVersion::V10);
    }

    #[test]
    fn test_supported_protocols() {
        assert_eq!(SUPPORTED_PROTOCOLS.len(), 1);
        assert_eq!(SUPPORTED_PROTOCOLS[0].version.raw(), 10);
        assert_eq!(SUPPORTED_PROTOCOLS[0].max_type as i32, 3);
    }
}
