//! Runtime packet lookup keyed by `(id, direction)`.
//!
//! Typed code uses [`decode_packet`](crate::decode_packet) directly. A
//! connection handler holding raw bytes goes through the [`Registry`]
//! instead: it reads the leading id, finds the schema registered for that
//! id *in the buffer's direction*, and runs its decoder.
//!
//! Ids are only unique per direction. Id 26 is `OnPlayerEnterVehicle`
//! coming in and `EnterVehicle` going out, so a lookup by id alone would
//! be ambiguous.

use std::collections::HashMap;
use std::fmt;

use sanwire_bitstream::{BitReader, DecodeLimits};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::message::Message;
use crate::rpc::*;
use crate::sync::*;
use crate::{Channel, Direction, Packet, ProtocolError, ProtocolResult, Readable, Side, ToClient, ToServer};

type DecodeFn = fn(&mut BitReader<'_>) -> ProtocolResult<Message>;

// ---------------------------------------------------------------------------
// Descriptor and schema
// ---------------------------------------------------------------------------

/// Identifies a packet on the wire: its id and the way it travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PacketDescriptor {
    pub id: u8,
    pub direction: Direction,
}

impl PacketDescriptor {
    pub fn new(id: u8, direction: Direction) -> Self {
        Self { id, direction }
    }
}

impl fmt::Display for PacketDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} ({})", self.id, self.direction)
    }
}

/// What the registry knows about one packet in one direction.
#[derive(Clone)]
pub struct Schema {
    pub name: &'static str,
    pub channel: Channel,
    pub descriptor: PacketDescriptor,
    decode: Option<DecodeFn>,
}

impl Schema {
    /// Returns `true` if buffers of this schema can be decoded.
    pub fn is_readable(&self) -> bool {
        self.decode.is_some()
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("channel", &self.channel)
            .field("descriptor", &self.descriptor)
            .field("readable", &self.is_readable())
            .finish()
    }
}

fn decode_into<D, P>(bs: &mut BitReader<'_>) -> ProtocolResult<Message>
where
    D: Side,
    P: Readable<D> + Into<Message>,
{
    P::read(bs).map(Into::into)
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Maps `(id, direction)` to a [`Schema`].
///
/// Built once and shared; lookups and decodes take `&self`.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    schemas: HashMap<PacketDescriptor, Schema>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `P` as decodable when travelling in direction `D`.
    pub fn register_readable<D, P>(&mut self) -> &mut Self
    where
        D: Side,
        P: Readable<D> + Into<Message>,
    {
        self.insert::<P>(D::DIRECTION, Some(decode_into::<D, P>))
    }

    /// Registers `P` in direction `D` without a decoder.
    ///
    /// Decoding such a buffer fails with
    /// [`ProtocolError::UnsupportedDirection`].
    pub fn register_write_only<D: Side, P: Packet>(&mut self) -> &mut Self {
        self.insert::<P>(D::DIRECTION, None)
    }

    fn insert<P: Packet>(&mut self, direction: Direction, decode: Option<DecodeFn>) -> &mut Self {
        let descriptor = PacketDescriptor::new(P::ID, direction);
        let schema = Schema {
            name: P::NAME,
            channel: P::CHANNEL,
            descriptor,
            decode,
        };
        if let Some(previous) = self.schemas.insert(descriptor, schema) {
            warn!(%descriptor, replaced = previous.name, by = P::NAME, "duplicate packet registration");
            debug_assert!(false, "{descriptor} registered twice");
        }
        self
    }

    /// The schema registered for `descriptor`, if any.
    pub fn schema(&self, descriptor: PacketDescriptor) -> Option<&Schema> {
        self.schemas.get(&descriptor)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// All registered schemas, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }

    /// Decodes a buffer travelling in `direction`.
    ///
    /// # Errors
    /// - [`ProtocolError::MalformedField`] if the id byte or any field is
    ///   short or invalid.
    /// - [`ProtocolError::UnknownPacketId`] if nothing is registered for
    ///   the id in this direction.
    /// - [`ProtocolError::UnsupportedDirection`] if the packet is
    ///   registered but write-only in this direction.
    pub fn decode(
        &self,
        direction: Direction,
        buf: &[u8],
        limits: DecodeLimits,
    ) -> ProtocolResult<(PacketDescriptor, Message)> {
        let mut bs = BitReader::with_limits(buf, limits);
        let id = bs.read_u8()?;
        let descriptor = PacketDescriptor::new(id, direction);

        let Some(schema) = self.schemas.get(&descriptor) else {
            debug!(%descriptor, bytes = buf.len(), "unknown packet id");
            return Err(ProtocolError::UnknownPacketId { id, direction });
        };
        let Some(decode) = schema.decode else {
            debug!(%descriptor, packet = schema.name, "packet is not decodable in this direction");
            return Err(ProtocolError::UnsupportedDirection {
                id,
                name: schema.name,
                direction,
            });
        };

        match decode(&mut bs) {
            Ok(message) => {
                trace!(%descriptor, packet = schema.name, bytes = buf.len(), "decoded");
                Ok((descriptor, message))
            }
            Err(e) => {
                debug!(%descriptor, packet = schema.name, error = %e, "rejected packet");
                Err(e)
            }
        }
    }

    /// The full legacy packet catalogue.
    pub fn legacy() -> Self {
        let mut registry = Self::new();

        macro_rules! readable {
            ($side:ty => $($packet:ty),* $(,)?) => {
                $(registry.register_readable::<$side, $packet>();)*
            };
        }
        macro_rules! write_only {
            ($side:ty => $($packet:ty),* $(,)?) => {
                $(registry.register_write_only::<$side, $packet>();)*
            };
        }

        // client -> server
        readable!(ToServer =>
            PlayerConnect,
            PlayerRequestClass,
            PlayerRequestSpawn,
            PlayerSpawn,
            PlayerRequestChatMessage,
            PlayerRequestCommandMessage,
            OnPlayerDeath,
            OnPlayerRequestScoresAndPings,
            OnPlayerGiveTakeDamage,
            OnPlayerInteriorChange,
            OnPlayerEnterVehicle,
            OnPlayerExitVehicle,
            OnPlayerSelectObject,
            OnPlayerEditObject,
            OnPlayerEditAttachedObject,
            OnPlayerPickUpPickup,
            OnPlayerSelectTextDraw,
            OnPlayerSelectedMenuRow,
            OnPlayerExitedMenu,
            PlayerFootSync,
            PlayerVehicleSync,
            PlayerAimSync,
            PlayerBulletSync,
            PlayerStatsSync,
        );

        // server -> client
        readable!(ToClient =>
            PlayerJoin,
            PlayerQuit,
            PlayerInit,
            PlayerRequestClassResponse,
            PlayerRequestSpawnResponse,
            GivePlayerWeapon,
            SetPlayerArmedWeapon,
            SendClientMessage,
            PlayerChatMessage,
            EnterVehicle,
            ExitVehicle,
            PlayerFootSync,
            PlayerVehicleSync,
            PlayerAimSync,
            PlayerBulletSync,
        );
        write_only!(ToClient =>
            // connection
            SetSpawnInfo,
            ForcePlayerClassSelection,
            SendPlayerScoresAndPings,
            // player
            PlayerStreamIn,
            PlayerStreamOut,
            PlayerCommandMessage,
            PlayerDeath,
            SendDeathMessage,
            ResetPlayerWeapons,
            SetPlayerAmmo,
            SetPlayerName,
            SetPlayerColor,
            SetPlayerTeam,
            SetPlayerFightingStyle,
            SetPlayerSkillLevel,
            SetPlayerSkin,
            SetPlayerPosition,
            SetPlayerPositionFindZ,
            SetPlayerFacingAngle,
            SetPlayerVelocity,
            SetPlayerHealth,
            SetPlayerArmour,
            SetPlayerSpecialAction,
            SetPlayerDrunkLevel,
            SetPlayerWantedLevel,
            SetPlayerInterior,
            ApplyPlayerAnimation,
            ClearPlayerAnimations,
            TogglePlayerControllable,
            TogglePlayerSpectating,
            GivePlayerMoney,
            ResetPlayerMoney,
            SetPlayerShopName,
            // vehicles
            StreamInVehicle,
            StreamOutVehicle,
            // objects
            CreateObject,
            DestroyObject,
            SetPlayerObjectMaterial,
            MoveObject,
            StopObject,
            SetObjectPosition,
            SetObjectRotation,
            AttachObjectToPlayer,
            SetPlayerAttachedObject,
            PlayerBeginObjectSelect,
            PlayerCancelObjectEdit,
            PlayerBeginObjectEdit,
            PlayerBeginAttachedObjectEdit,
            // ui
            PlayerShowTextLabel,
            PlayerHideTextLabel,
            PlayerShowTextDraw,
            PlayerHideTextDraw,
            PlayerTextDrawSetString,
            PlayerBeginTextDrawSelect,
            PlayerInitMenu,
            PlayerShowMenu,
            PlayerHideMenu,
            ToggleWidescreen,
            // world
            SetCheckpoint,
            DisableCheckpoint,
            SetRaceCheckpoint,
            DisableRaceCheckpoint,
            SetPlayerWeather,
            SetWorldBounds,
            SetPlayerTime,
            TogglePlayerClock,
            RemoveBuildingForPlayer,
            CreateExplosion,
            SetPlayerCameraPosition,
            SetPlayerCameraLookAt,
            SetPlayerCameraBehindPlayer,
            PlayerPlaySound,
            PlayAudioStreamForPlayer,
            StopAudioStreamForPlayer,
            PlayerCreatePickup,
            PlayerDestroyPickup,
        );

        registry
    }
}
