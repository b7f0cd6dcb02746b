//! On-foot sync.

use sanwire_bitstream::{BitReader, BitWriter, HealthArmour, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::{read_raw_health_armour, read_raw_quat, write_raw_health_armour, write_raw_quat};
use crate::packet::impl_packet;
use crate::types::SurfTarget;
use crate::{Packet, ProtocolResult, Readable, ToClient, ToServer, Writable};

/// A player's on-foot state.
///
/// `weapon` is the raw byte; see [`WeaponKeys`](crate::WeaponKeys) for
/// its two halves. `player_id` is not part of the report form and reads
/// back as 0 there.
///
/// Broadcast presence bits guard `left_right`, `up_down`, the surfing
/// block, and the animation pair. An absent field decodes as zero, or
/// [`SurfTarget::None`] with a zero offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerFootSync {
    pub player_id: u16,
    pub left_right: u16,
    pub up_down: u16,
    pub keys: u16,
    pub position: Vec3,
    pub rotation: Quat,
    pub health_armour: HealthArmour,
    pub weapon: u8,
    pub special_action: u8,
    pub velocity: Vec3,
    pub surfing: SurfTarget,
    pub surfing_offset: Vec3,
    pub animation_id: u16,
    pub animation_flags: u16,
}
impl_packet!(PlayerFootSync, 207, Sync);

impl Default for PlayerFootSync {
    fn default() -> Self {
        Self {
            player_id: 0,
            left_right: 0,
            up_down: 0,
            keys: 0,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            health_armour: HealthArmour::default(),
            weapon: 0,
            special_action: 0,
            velocity: Vec3::ZERO,
            surfing: SurfTarget::None,
            surfing_offset: Vec3::ZERO,
            animation_id: 0,
            animation_flags: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Report: client → server
// ---------------------------------------------------------------------------

impl Readable<ToServer> for PlayerFootSync {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        let left_right = bs.read_u16()?;
        let up_down = bs.read_u16()?;
        let keys = bs.read_u16()?;
        let position = bs.read_vec3()?;
        let rotation = read_raw_quat(bs)?;
        let health_armour = read_raw_health_armour(bs)?;
        let weapon = bs.read_u8()?;
        let special_action = bs.read_u8()?;
        let velocity = bs.read_vec3()?;
        let surfing_offset = bs.read_vec3()?;
        let surfing = SurfTarget::from_wire(bs.read_u16()?);
        Ok(Self {
            player_id: 0,
            left_right,
            up_down,
            keys,
            position,
            rotation,
            health_armour,
            weapon,
            special_action,
            velocity,
            surfing,
            surfing_offset,
            animation_id: bs.read_u16()?,
            animation_flags: bs.read_u16()?,
        })
    }
}

impl Writable<ToServer> for PlayerFootSync {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(Self::id_for(bs.network()));
        bs.write_u16(self.left_right);
        bs.write_u16(self.up_down);
        bs.write_u16(self.keys);
        bs.write_vec3(self.position);
        write_raw_quat(bs, self.rotation);
        write_raw_health_armour(bs, self.health_armour);
        bs.write_u8(self.weapon);
        bs.write_u8(self.special_action);
        bs.write_vec3(self.velocity);
        bs.write_vec3(self.surfing_offset);
        bs.write_u16(self.surfing.to_wire());
        bs.write_u16(self.animation_id);
        bs.write_u16(self.animation_flags);
    }
}

// ---------------------------------------------------------------------------
// Broadcast: server → client
// ---------------------------------------------------------------------------

impl Writable<ToClient> for PlayerFootSync {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(Self::id_for(bs.network()));
        bs.write_u16(self.player_id);

        bs.write_bit(self.left_right != 0);
        if self.left_right != 0 {
            bs.write_u16(self.left_right);
        }
        bs.write_bit(self.up_down != 0);
        if self.up_down != 0 {
            bs.write_u16(self.up_down);
        }

        bs.write_u16(self.keys);
        bs.write_vec3(self.position);
        bs.write_compressed_quat(self.rotation);
        bs.write_health_armour(self.health_armour);
        bs.write_u8(self.weapon);
        bs.write_u8(self.special_action);
        bs.write_vec3_sync(self.velocity);

        bs.write_bit(!self.surfing.is_none());
        if !self.surfing.is_none() {
            bs.write_u16(self.surfing.to_wire());
            bs.write_vec3(self.surfing_offset);
        }

        bs.write_bit(self.animation_id != 0);
        if self.animation_id != 0 {
            bs.write_u16(self.animation_id);
            bs.write_u16(self.animation_flags);
        }
    }
}

impl Readable<ToClient> for PlayerFootSync {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        let player_id = bs.read_u16()?;
        let left_right = if bs.read_bit()? { bs.read_u16()? } else { 0 };
        let up_down = if bs.read_bit()? { bs.read_u16()? } else { 0 };
        let keys = bs.read_u16()?;
        let position = bs.read_vec3()?;
        let rotation = bs.read_compressed_quat()?;
        let health_armour = bs.read_health_armour()?;
        let weapon = bs.read_u8()?;
        let special_action = bs.read_u8()?;
        let velocity = bs.read_vec3_sync()?;

        let (surfing, surfing_offset) = if bs.read_bit()? {
            let target = SurfTarget::from_wire(bs.read_u16()?);
            (target, bs.read_vec3()?)
        } else {
            (SurfTarget::None, Vec3::ZERO)
        };

        let (animation_id, animation_flags) = if bs.read_bit()? {
            (bs.read_u16()?, bs.read_u16()?)
        } else {
            (0, 0)
        };

        Ok(Self {
            player_id,
            left_right,
            up_down,
            keys,
            position,
            rotation,
            health_armour,
            weapon,
            special_action,
            velocity,
            surfing,
            surfing_offset,
            animation_id,
            animation_flags,
        })
    }
}
