//! Decode limits and network selection.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{DEFAULT_STRING_TABLE, StringTable, same_table};

// ---------------------------------------------------------------------------
// DecodeLimits
// ---------------------------------------------------------------------------

/// Plausibility bounds applied while reading untrusted input.
///
/// A length prefix is attacker-controlled, so the reader refuses to
/// allocate for any string longer than `max_string_len` bytes even when
/// the buffer would technically hold it.
///
/// `strings` is the table compressed-string fields are read with. It is
/// not serialized; `None` makes every such field fail with
/// [`BitstreamError::InvalidEncoding`](crate::BitstreamError::InvalidEncoding).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeLimits {
    /// Largest dynamic or decompressed string accepted, in bytes.
    pub max_string_len: usize,

    #[serde(skip, default = "default_strings")]
    pub strings: Option<StringTable>,
}

fn default_strings() -> Option<StringTable> {
    Some(DEFAULT_STRING_TABLE)
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_string_len: 4096,
            strings: default_strings(),
        }
    }
}

impl PartialEq for DecodeLimits {
    fn eq(&self, other: &Self) -> bool {
        let tables_match = match (self.strings, other.strings) {
            (Some(a), Some(b)) => same_table(a, b),
            (None, None) => true,
            _ => false,
        };
        self.max_string_len == other.max_string_len && tables_match
    }
}

impl Eq for DecodeLimits {}

impl DecodeLimits {
    /// Hard ceiling for `max_string_len`.
    pub const MAX_STRING_LEN_CEILING: usize = 1 << 20;

    /// Clamp out-of-range values so the limits are safe to use.
    ///
    /// `max_string_len` is clamped to `1..=MAX_STRING_LEN_CEILING`.
    pub fn validated(mut self) -> Self {
        let clamped = self.max_string_len.clamp(1, Self::MAX_STRING_LEN_CEILING);
        if clamped != self.max_string_len {
            warn!(
                requested = self.max_string_len,
                clamped, "max_string_len out of range, clamping"
            );
            self.max_string_len = clamped;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// The network a stream is framed for.
///
/// Sync packets re-derive their identifier from the writer's network on
/// every encode, so one struct can be framed per transport. Only the
/// legacy network exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Network {
    #[default]
    Legacy,
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
        }
    }
}

// ---------------------------------------------------------------------------
// Framing
// ---------------------------------------------------------------------------

/// How an outgoing stream is framed: the network and the table that
/// compressed-string fields are written with.
///
/// A bare [`Network`] converts into a framing with the default table.
#[derive(Debug, Clone, Copy)]
pub struct Framing {
    pub network: Network,
    pub strings: StringTable,
}

impl Framing {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            strings: DEFAULT_STRING_TABLE,
        }
    }

    pub fn with_strings(mut self, strings: StringTable) -> Self {
        self.strings = strings;
        self
    }
}

impl Default for Framing {
    fn default() -> Self {
        Self::new(Network::default())
    }
}

impl From<Network> for Framing {
    fn from(network: Network) -> Self {
        Self::new(network)
    }
}
