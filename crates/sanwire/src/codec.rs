//! The `Codec` facade.
//!
//! A [`Codec`] bundles the legacy [`Registry`] with a validated
//! [`CodecConfig`]. It holds no interior mutability: build one at
//! startup, wrap it in an `Arc`, and share it across every connection
//! task.
//!
//! ```rust
//! use sanwire::prelude::*;
//!
//! let codec = Codec::new(CodecConfig::default());
//! let bytes = codec.encode::<ToServer, _>(&OnPlayerExitVehicle { vehicle_id: 12 });
//! let (descriptor, message) = codec.decode(Direction::ClientToServer, &bytes)?;
//! assert_eq!(descriptor.id, 154);
//! assert_eq!(message.name(), "OnPlayerExitVehicle");
//! # Ok::<(), sanwire::SanwireError>(())
//! ```

use sanwire_protocol::{
    Direction, Message, PacketDescriptor, Readable, Registry, Side, Writable, WritableWith,
    decode_packet, encode_packet, encode_packet_with,
};
use tracing::info;

use crate::{CodecConfig, SanwireResult};

/// Encoder and decoder for one network.
#[derive(Debug, Clone)]
pub struct Codec {
    registry: Registry,
    config: CodecConfig,
}

impl Codec {
    /// Builds a codec over the full legacy packet catalogue.
    ///
    /// The config is passed through [`CodecConfig::validated`] first.
    pub fn new(config: CodecConfig) -> Self {
        Self::with_registry(Registry::legacy(), config)
    }

    /// Builds a codec over a custom registry.
    pub fn with_registry(registry: Registry, config: CodecConfig) -> Self {
        let config = config.validated();
        info!(
            network = %config.network,
            packets = registry.len(),
            max_string_len = config.limits.max_string_len,
            strings = config.strings.name(),
            strings_version = config.strings.version(),
            inbound_strings = config.limits.strings.is_some(),
            "codec ready"
        );
        Self { registry, config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Decodes a buffer of unknown type travelling in `direction`.
    ///
    /// # Errors
    /// [`SanwireError::Protocol`](crate::SanwireError::Protocol) for
    /// unknown ids, write-only packets and malformed input. Use
    /// [`SanwireError::is_recoverable`](crate::SanwireError::is_recoverable)
    /// to decide whether to drop the connection.
    pub fn decode(&self, direction: Direction, buf: &[u8]) -> SanwireResult<(PacketDescriptor, Message)> {
        Ok(self.registry.decode(direction, buf, self.config.limits)?)
    }

    /// Decodes a buffer known to hold a `P` travelling in direction `D`.
    pub fn decode_as<D: Side, P: Readable<D>>(&self, buf: &[u8]) -> SanwireResult<P> {
        Ok(decode_packet::<D, P>(buf, self.config.limits)?)
    }

    /// Encodes `packet` for direction `D`, id included.
    pub fn encode<D: Side, P: Writable<D>>(&self, packet: &P) -> Vec<u8> {
        encode_packet::<D, P>(packet, self.config.framing())
    }

    /// Encodes `packet` for direction `D`, borrowing `table` for the call.
    pub fn encode_with<D, T, P>(&self, packet: &P, table: &T) -> Vec<u8>
    where
        D: Side,
        T: ?Sized,
        P: WritableWith<D, T>,
    {
        encode_packet_with::<D, T, P>(packet, table, self.config.framing())
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SanwireError;
    use sanwire_bitstream::{DecodeLimits, NetString};
    use sanwire_protocol::{
        CreateObject, ObjectMaterial, ObjectMaterials, OnPlayerExitedMenu, PlayerHideMenu,
        PlayerRequestCommandMessage, ProtocolError, ToClient, ToServer,
    };

    #[test]
    fn test_codec_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Codec>();
    }

    #[test]
    fn test_new_validates_config() {
        let codec = Codec::new(CodecConfig {
            limits: DecodeLimits {
                max_string_len: 0,
                ..DecodeLimits::default()
            },
            ..CodecConfig::default()
        });
        assert_eq!(codec.config().limits.max_string_len, 1);
    }

    #[test]
    fn test_decode_as_typed() {
        let codec = Codec::default();
        let cmd = PlayerRequestCommandMessage {
            message: NetString::from("/help"),
        };
        let bytes = codec.encode::<ToServer, _>(&cmd);
        let back: PlayerRequestCommandMessage = codec.decode_as::<ToServer, _>(&bytes).unwrap();
        assert_eq!(back, cmd);
    }

    #[test]
    fn test_decode_as_wrong_type() {
        let codec = Codec::default();
        let bytes = codec.encode::<ToServer, _>(&OnPlayerExitedMenu);
        let err = codec
            .decode_as::<ToServer, PlayerRequestCommandMessage>(&bytes)
            .unwrap_err();
        assert!(matches!(
            err,
            SanwireError::Protocol(ProtocolError::IdMismatch {
                expected: 50,
                found: 140
            })
        ));
    }

    #[test]
    fn test_encode_with_material_table() {
        let codec = Codec::default();
        let mut materials = ObjectMaterials::new();
        materials.set(
            0,
            ObjectMaterial::Default {
                model: 19341,
                txd: NetString::from("egg_texts"),
                texture: NetString::from("easter_egg01"),
                colour: Default::default(),
            },
        );
        let object = CreateObject {
            object_id: 1,
            model: 19341,
            ..CreateObject::default()
        };
        let plain = codec.encode_with::<ToClient, _, _>(&object, &ObjectMaterials::new());
        let textured = codec.encode_with::<ToClient, _, _>(&object, &materials);
        assert_eq!(plain[0], 44);
        assert!(textured.len() > plain.len());
    }

    #[test]
    fn test_custom_registry() {
        let mut registry = Registry::new();
        registry.register_write_only::<ToClient, PlayerHideMenu>();
        let codec = Codec::with_registry(registry, CodecConfig::default());

        let bytes = codec.encode::<ToClient, _>(&PlayerHideMenu { menu_id: 2 });
        let err = codec.decode(Direction::ServerToClient, &bytes).unwrap_err();
        assert!(matches!(
            err,
            SanwireError::Protocol(ProtocolError::UnsupportedDirection { id: 78, .. })
        ));
        assert!(err.is_recoverable());
    }
}
