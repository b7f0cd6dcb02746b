//! Error types for the protocol layer.
//!
//! Three things can go wrong when turning bytes into a packet: a field
//! is malformed, the packet exists but cannot be decoded in the
//! requested direction, or the id is not registered at all. Only the
//! first one says anything about the sender; the other two are usually
//! version skew and the connection should carry on.

use sanwire_bitstream::BitstreamError;

use crate::Direction;

/// Errors that can occur while decoding a packet.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProtocolError {
    /// A field could not be read. The whole packet must be discarded.
    ///
    /// `#[from]` lets `?` lift any [`BitstreamError`] into this variant,
    /// so packet readers can use the bitstream methods directly.
    #[error("malformed field: {0}")]
    MalformedField(#[from] BitstreamError),

    /// The packet is registered but only as encode-only in this direction.
    #[error("{name} (id {id}) cannot be decoded {direction}")]
    UnsupportedDirection {
        id: u8,
        name: &'static str,
        direction: Direction,
    },

    /// No schema is registered for this id in this direction.
    #[error("unknown packet id {id} {direction}")]
    UnknownPacketId { id: u8, direction: Direction },

    /// A typed decode found a different leading id than the type expects.
    #[error("expected packet id {expected}, found {found}")]
    IdMismatch { expected: u8, found: u8 },
}

impl ProtocolError {
    /// Returns `true` if the connection may keep processing packets.
    ///
    /// Malformed input is the only failure attributable to the peer.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::MalformedField(_))
    }
}

/// Shorthand for results produced by packet decoding.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
