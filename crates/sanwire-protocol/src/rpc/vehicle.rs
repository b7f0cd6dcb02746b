//! Vehicle streaming and seat changes.
//!
//! Ids 26 and 154 are the textbook direction collision: inbound they mean
//! "I am entering/leaving", outbound they mean "player X is
//! entering/leaving vehicle Y" and carry the extra player id.

use sanwire_bitstream::{BitReader, BitWriter, Vec3};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::packet::impl_packet;
use crate::{ProtocolResult, Readable, ToClient, ToServer, Writable};

/// Number of component slots on a vehicle.
pub const VEHICLE_COMPONENT_SLOTS: usize = 14;

/// Component model ids start here; the wire carries the offset from it.
pub const COMPONENT_MODEL_BASE: u32 = 999;

/// Server → client: create a vehicle on the client.
///
/// `mods` holds component model ids (0 for an empty slot). Each is sent as
/// one byte relative to [`COMPONENT_MODEL_BASE`]; ids that do not fit
/// that byte are sent as an empty slot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StreamInVehicle {
    pub vehicle_id: u16,
    pub model: u32,
    pub position: Vec3,
    pub angle: f32,
    pub colour1: u8,
    pub colour2: u8,
    pub health: f32,
    pub interior: u8,
    pub door_damage: u32,
    pub panel_damage: u32,
    pub light_damage: u8,
    pub tyre_damage: u8,
    pub siren: u8,
    pub mods: [u32; VEHICLE_COMPONENT_SLOTS],
    pub paintjob: u8,
    pub body_colour1: i32,
    pub body_colour2: i32,
}
impl_packet!(StreamInVehicle, 164);

impl Writable<ToClient> for StreamInVehicle {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.vehicle_id);
        bs.write_u32(self.model);
        bs.write_vec3(self.position);
        bs.write_f32(self.angle);
        bs.write_u8(self.colour1);
        bs.write_u8(self.colour2);
        bs.write_f32(self.health);
        bs.write_u8(self.interior);
        bs.write_u32(self.door_damage);
        bs.write_u32(self.panel_damage);
        bs.write_u8(self.light_damage);
        bs.write_u8(self.tyre_damage);
        bs.write_u8(self.siren);
        for &component in &self.mods {
            bs.write_u8(component_offset(component));
        }
        bs.write_u8(self.paintjob);
        bs.write_i32(self.body_colour1);
        bs.write_i32(self.body_colour2);
    }
}

fn component_offset(component: u32) -> u8 {
    if component == 0 {
        return 0;
    }
    let offset = component
        .checked_sub(COMPONENT_MODEL_BASE)
        .and_then(|offset| u8::try_from(offset).ok());
    if offset.is_none() {
        trace!(component, "component id out of range, sending empty slot");
    }
    offset.unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StreamOutVehicle {
    pub vehicle_id: u16,
}
impl_packet!(StreamOutVehicle, 165);

impl Writable<ToClient> for StreamOutVehicle {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.vehicle_id);
    }
}

// ---------------------------------------------------------------------------
// Entering
// ---------------------------------------------------------------------------

/// Client → server: the player started entering a vehicle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OnPlayerEnterVehicle {
    pub vehicle_id: u16,
    pub passenger: u8,
}
impl_packet!(OnPlayerEnterVehicle, 26);

impl Readable<ToServer> for OnPlayerEnterVehicle {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            vehicle_id: bs.read_u16()?,
            passenger: bs.read_u8()?,
        })
    }
}

impl Writable<ToServer> for OnPlayerEnterVehicle {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.vehicle_id);
        bs.write_u8(self.passenger);
    }
}

/// Server → client: another player started entering a vehicle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnterVehicle {
    pub player_id: u16,
    pub vehicle_id: u16,
    pub passenger: u8,
}
impl_packet!(EnterVehicle, 26);

impl Writable<ToClient> for EnterVehicle {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.player_id);
        bs.write_u16(self.vehicle_id);
        bs.write_u8(self.passenger);
    }
}

impl Readable<ToClient> for EnterVehicle {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            player_id: bs.read_u16()?,
            vehicle_id: bs.read_u16()?,
            passenger: bs.read_u8()?,
        })
    }
}

// ---------------------------------------------------------------------------
// Exiting
// ---------------------------------------------------------------------------

/// Client → server: the player started leaving a vehicle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OnPlayerExitVehicle {
    pub vehicle_id: u16,
}
impl_packet!(OnPlayerExitVehicle, 154);

impl Readable<ToServer> for OnPlayerExitVehicle {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            vehicle_id: bs.read_u16()?,
        })
    }
}

impl Writable<ToServer> for OnPlayerExitVehicle {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.vehicle_id);
    }
}

/// Server → client: another player started leaving a vehicle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExitVehicle {
    pub player_id: u16,
    pub vehicle_id: u16,
}
impl_packet!(ExitVehicle, 154);

impl Writable<ToClient> for ExitVehicle {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.player_id);
        bs.write_u16(self.vehicle_id);
    }
}

impl Readable<ToClient> for ExitVehicle {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            player_id: bs.read_u16()?,
            vehicle_id: bs.read_u16()?,
        })
    }
}
