//! Unified error type for the Sanwire meta-crate.

use sanwire_bitstream::BitstreamError;
use sanwire_protocol::ProtocolError;

/// Top-level error that wraps the per-crate errors.
///
/// `#[from]` on each variant lets `?` convert sub-crate errors, so code
/// built on the [`Codec`](crate::Codec) only matches on this one type.
#[derive(Debug, thiserror::Error)]
pub enum SanwireError {
    /// A packet could not be decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A raw bitstream read failed outside of a packet decode.
    #[error(transparent)]
    Bitstream(#[from] BitstreamError),

    /// The codec configuration could not be parsed.
    #[error("invalid codec config: {0}")]
    Config(String),
}

impl SanwireError {
    /// Returns `true` if the connection that produced this error may keep
    /// sending packets.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Protocol(e) => e.is_recoverable(),
            Self::Bitstream(_) | Self::Config(_) => false,
        }
    }
}

/// Shorthand for results returned by the meta-crate.
pub type SanwireResult<T> = Result<T, SanwireError>;
