//! Aim sync.
//!
//! Report and broadcast share one layout; the broadcast adds the player id.

use sanwire_bitstream::{BitReader, BitWriter, Vec3};
use serde::{Deserialize, Serialize};

use crate::packet::impl_packet;
use crate::{Packet, ProtocolResult, Readable, ToClient, ToServer, Writable};

/// Where a player's camera is pointing.
///
/// `zoom_weapon_state` is raw; see [`ZoomWeaponState`](crate::ZoomWeaponState).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerAimSync {
    pub player_id: u16,
    pub cam_mode: u8,
    pub cam_front: Vec3,
    pub cam_position: Vec3,
    pub aim_z: f32,
    pub zoom_weapon_state: u8,
    pub aspect_ratio: u8,
}
impl_packet!(PlayerAimSync, 203, Sync);

impl PlayerAimSync {
    fn write_body(&self, bs: &mut BitWriter) {
        bs.write_u8(self.cam_mode);
        bs.write_vec3(self.cam_front);
        bs.write_vec3(self.cam_position);
        bs.write_f32(self.aim_z);
        bs.write_u8(self.zoom_weapon_state);
        bs.write_u8(self.aspect_ratio);
    }

    fn read_body(player_id: u16, bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            player_id,
            cam_mode: bs.read_u8()?,
            cam_front: bs.read_vec3()?,
            cam_position: bs.read_vec3()?,
            aim_z: bs.read_f32()?,
            zoom_weapon_state: bs.read_u8()?,
            aspect_ratio: bs.read_u8()?,
        })
    }
}

impl Readable<ToServer> for PlayerAimSync {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Self::read_body(0, bs)
    }
}

impl Writable<ToServer> for PlayerAimSync {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(Self::id_for(bs.network()));
        self.write_body(bs);
    }
}

impl Readable<ToClient> for PlayerAimSync {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        let player_id = bs.read_u16()?;
        Self::read_body(player_id, bs)
    }
}

impl Writable<ToClient> for PlayerAimSync {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(Self::id_for(bs.network()));
        bs.write_u16(self.player_id);
        self.write_body(bs);
    }
}
