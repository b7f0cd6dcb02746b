//! # Sanwire
//!
//! Bit-exact wire codec for a legacy multiplayer game protocol.
//!
//! Sanwire turns in-memory game messages (player movement, vehicle
//! state, chat, objects, UI widgets) into the compact bit-packed form the
//! legacy client expects, and parses what that client sends back into
//! typed structs. It does not open sockets or own any game state.
//!
//! The work is split across three crates, all re-exported here:
//!
//! - [`sanwire_bitstream`]: bit cursors and the value codec.
//! - [`sanwire_protocol`]: packet types, directions, and the registry.
//! - this crate: the [`Codec`] facade, [`CodecConfig`], and a unified
//!   [`SanwireError`].
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use sanwire::prelude::*;
//!
//! let codec = Arc::new(Codec::new(CodecConfig::default()));
//!
//! // Inbound: bytes of unknown type.
//! let buf = codec.encode::<ToServer, _>(&OnPlayerEnterVehicle { vehicle_id: 3, passenger: 0 });
//! match codec.decode(Direction::ClientToServer, &buf) {
//!     Ok((_, Message::OnPlayerEnterVehicle(enter))) => assert_eq!(enter.vehicle_id, 3),
//!     Ok((descriptor, other)) => println!("{descriptor}: {}", other.name()),
//!     Err(e) if e.is_recoverable() => {}
//!     Err(e) => panic!("drop the connection: {e}"),
//! }
//!
//! // Outbound: typed packets.
//! let bytes = codec.encode::<ToClient, _>(&EnterVehicle { player_id: 0, vehicle_id: 3, passenger: 0 });
//! assert_eq!(bytes[0], 26);
//! ```

mod codec;
mod config;
mod error;

pub use codec::Codec;
pub use config::CodecConfig;
pub use error::{SanwireError, SanwireResult};

pub use sanwire_bitstream;
pub use sanwire_protocol;

/// Convenience re-exports for common usage.
///
/// ```rust
/// use sanwire::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Codec, CodecConfig, SanwireError, SanwireResult};

    pub use sanwire_bitstream::{
        BitReader, BitWriter, DecodeLimits, Framing, HealthArmour, NetString, Network, Quat,
        RunLength, StringCompression, StringTable, Vec2, Vec3, Vec4,
    };
    pub use sanwire_protocol::{
        AttachmentTable, Colour, Direction, MaterialTable, Message, Packet, PacketDescriptor,
        Readable, Registry, Side, SurfTarget, TextDrawId, TextLabelId, ToClient, ToServer,
        VehicleAux, WeaponKeys, Writable, WritableWith, ZoomWeaponState,
    };

    pub use sanwire_protocol::rpc::*;
    pub use sanwire_protocol::sync::*;
}
