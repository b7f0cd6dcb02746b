//! Codec configuration.

use sanwire_bitstream::{
    DEFAULT_STRING_TABLE, DecodeLimits, Framing, Network, StringTable, same_table,
};
use serde::{Deserialize, Serialize};

#[cfg(feature = "json")]
use crate::SanwireError;

/// Settings for a [`Codec`](crate::Codec).
///
/// Decode plausibility limits and the network come from JSON. The
/// compressed-string table is code, not data, and is supplied with
/// [`with_strings`](Self::with_strings); pool sizes and bit widths are
/// part of the wire contract and not configurable at all.
///
/// ```json
/// { "limits": { "max_string_len": 1024 }, "network": "Legacy" }
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Bounds applied to attacker-controlled length prefixes, and the
    /// table inbound compressed strings are read with.
    pub limits: DecodeLimits,

    /// Network that outgoing packets are framed for.
    pub network: Network,

    /// Table outbound compressed strings are written with.
    #[serde(skip, default = "default_strings")]
    pub strings: StringTable,
}

fn default_strings() -> StringTable {
    DEFAULT_STRING_TABLE
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            limits: DecodeLimits::default(),
            network: Network::default(),
            strings: default_strings(),
        }
    }
}

impl PartialEq for CodecConfig {
    fn eq(&self, other: &Self) -> bool {
        self.limits == other.limits
            && self.network == other.network
            && same_table(self.strings, other.strings)
    }
}

impl Eq for CodecConfig {}

impl CodecConfig {
    /// Uses `table` for compressed strings in both directions.
    pub fn with_strings(mut self, table: StringTable) -> Self {
        self.strings = table;
        self.limits.strings = Some(table);
        self
    }

    /// Refuses inbound compressed strings. Outbound ones still use
    /// [`strings`](Self::strings).
    pub fn without_inbound_strings(mut self) -> Self {
        self.limits.strings = None;
        self
    }

    /// How outgoing packets are framed.
    pub fn framing(&self) -> Framing {
        Framing::new(self.network).with_strings(self.strings)
    }

    /// Clamp out-of-range values so the config is safe to use.
    ///
    /// Called automatically by [`Codec::new`](crate::Codec::new).
    pub fn validated(mut self) -> Self {
        self.limits = self.limits.validated();
        self
    }

    /// Parses a config from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// [`SanwireError::Config`] if the input is not a valid config.
    #[cfg(feature = "json")]
    pub fn from_json(input: &str) -> Result<Self, SanwireError> {
        serde_json::from_str(input).map_err(|e| SanwireError::Config(e.to_string()))
    }
}
