//! Driver sync.

use sanwire_bitstream::{BitReader, BitWriter, HealthArmour, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::{read_raw_health_armour, read_raw_quat, write_raw_health_armour, write_raw_quat};
use crate::packet::impl_packet;
use crate::{Packet, ProtocolResult, Readable, ToClient, ToServer, Writable};

/// A driver's vehicle state.
///
/// `weapon_keys` and `aux` are raw union words; see
/// [`WeaponKeys`](crate::WeaponKeys) and [`VehicleAux`](crate::VehicleAux).
/// A `trailer_id` of 0 means no trailer.
///
/// In the broadcast form the vehicle health is truncated to a `u16`, and
/// `aux` and `trailer_id` are preceded by presence bits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerVehicleSync {
    pub player_id: u16,
    pub vehicle_id: u16,
    pub left_right: u16,
    pub up_down: u16,
    pub keys: u16,
    pub rotation: Quat,
    pub position: Vec3,
    pub velocity: Vec3,
    pub vehicle_health: f32,
    pub health_armour: HealthArmour,
    pub weapon_keys: u8,
    pub siren: bool,
    pub landing_gear: bool,
    pub trailer_id: u16,
    pub aux: u32,
}
impl_packet!(PlayerVehicleSync, 200, Sync);

impl Default for PlayerVehicleSync {
    fn default() -> Self {
        Self {
            player_id: 0,
            vehicle_id: 0,
            left_right: 0,
            up_down: 0,
            keys: 0,
            rotation: Quat::IDENTITY,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            vehicle_health: 1000.0,
            health_armour: HealthArmour::default(),
            weapon_keys: 0,
            siren: false,
            landing_gear: false,
            trailer_id: 0,
            aux: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Report: client → server
// ---------------------------------------------------------------------------

impl Readable<ToServer> for PlayerVehicleSync {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            player_id: 0,
            vehicle_id: bs.read_u16()?,
            left_right: bs.read_u16()?,
            up_down: bs.read_u16()?,
            keys: bs.read_u16()?,
            rotation: read_raw_quat(bs)?,
            position: bs.read_vec3()?,
            velocity: bs.read_vec3()?,
            vehicle_health: bs.read_f32()?,
            health_armour: read_raw_health_armour(bs)?,
            weapon_keys: bs.read_u8()?,
            siren: bs.read_u8()? != 0,
            landing_gear: bs.read_u8()? != 0,
            trailer_id: bs.read_u16()?,
            aux: bs.read_u32()?,
        })
    }
}

impl Writable<ToServer> for PlayerVehicleSync {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(Self::id_for(bs.network()));
        bs.write_u16(self.vehicle_id);
        bs.write_u16(self.left_right);
        bs.write_u16(self.up_down);
        bs.write_u16(self.keys);
        write_raw_quat(bs, self.rotation);
        bs.write_vec3(self.position);
        bs.write_vec3(self.velocity);
        bs.write_f32(self.vehicle_health);
        write_raw_health_armour(bs, self.health_armour);
        bs.write_u8(self.weapon_keys);
        bs.write_u8(u8::from(self.siren));
        bs.write_u8(u8::from(self.landing_gear));
        bs.write_u16(self.trailer_id);
        bs.write_u32(self.aux);
    }
}

// ---------------------------------------------------------------------------
// Broadcast: server → client
// ---------------------------------------------------------------------------

impl Writable<ToClient> for PlayerVehicleSync {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(Self::id_for(bs.network()));
        bs.write_u16(self.player_id);
        bs.write_u16(self.vehicle_id);
        bs.write_u16(self.left_right);
        bs.write_u16(self.up_down);
        bs.write_u16(self.keys);
        bs.write_compressed_quat(self.rotation);
        bs.write_vec3(self.position);
        bs.write_vec3_sync(self.velocity);
        bs.write_u16(self.vehicle_health.clamp(0.0, f32::from(u16::MAX)) as u16);
        bs.write_health_armour(self.health_armour);
        bs.write_u8(self.weapon_keys);
        bs.write_bit(self.siren);
        bs.write_bit(self.landing_gear);

        bs.write_bit(self.aux != 0);
        if self.aux != 0 {
            bs.write_u32(self.aux);
        }
        bs.write_bit(self.trailer_id != 0);
        if self.trailer_id != 0 {
            bs.write_u16(self.trailer_id);
        }
    }
}

impl Readable<ToClient> for PlayerVehicleSync {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        let player_id = bs.read_u16()?;
        let vehicle_id = bs.read_u16()?;
        let left_right = bs.read_u16()?;
        let up_down = bs.read_u16()?;
        let keys = bs.read_u16()?;
        let rotation = bs.read_compressed_quat()?;
        let position = bs.read_vec3()?;
        let velocity = bs.read_vec3_sync()?;
        let vehicle_health = f32::from(bs.read_u16()?);
        let health_armour = bs.read_health_armour()?;
        let weapon_keys = bs.read_u8()?;
        let siren = bs.read_bit()?;
        let landing_gear = bs.read_bit()?;
        let aux = if bs.read_bit()? { bs.read_u32()? } else { 0 };
        let trailer_id = if bs.read_bit()? { bs.read_u16()? } else { 0 };
        Ok(Self {
            player_id,
            vehicle_id,
            left_right,
            up_down,
            keys,
            rotation,
            position,
            velocity,
            vehicle_health,
            health_armour,
            weapon_keys,
            siren,
            landing_gear,
            trailer_id,
            aux,
        })
    }
}
