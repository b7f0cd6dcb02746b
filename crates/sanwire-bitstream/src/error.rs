//! Error types for the bitstream layer.
//!
//! Writing never fails, so every variant here describes a failed read.
//! The `kind` carried by each variant names the value the reader was
//! trying to produce, which is usually enough to locate the bad field.

use crate::ValueKind;

/// Errors that can occur while reading from a [`BitReader`](crate::BitReader).
///
/// Any of these means the buffer is unusable: the reader has already
/// consumed part of it, and callers must discard the whole packet.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BitstreamError {
    /// Fewer bits remain than the value needs.
    #[error("truncated {kind}: needed {needed} bits, {available} available")]
    Truncated {
        kind: ValueKind,
        needed: usize,
        available: usize,
    },

    /// A length prefix declares more data than the decode limits allow.
    #[error("{kind} declares length {declared}, limit is {max}")]
    LengthOutOfRange {
        kind: ValueKind,
        declared: usize,
        max: usize,
    },

    /// The bits are present but do not form a valid value of this kind.
    #[error("invalid {kind}: {reason}")]
    InvalidEncoding {
        kind: ValueKind,
        reason: &'static str,
    },
}

impl BitstreamError {
    /// The kind of value whose read failed.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Truncated { kind, .. }
            | Self::LengthOutOfRange { kind, .. }
            | Self::InvalidEncoding { kind, .. } => *kind,
        }
    }
}

/// Shorthand for results produced by bitstream reads.
pub type BitstreamResult<T> = Result<T, BitstreamError>;
