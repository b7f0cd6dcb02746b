//! Bullet sync.

use sanwire_bitstream::{BitReader, BitWriter, Vec3};
use serde::{Deserialize, Serialize};

use crate::packet::impl_packet;
use crate::{Packet, ProtocolResult, Readable, ToClient, ToServer, Writable};

/// One fired shot and what it hit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerBulletSync {
    pub player_id: u16,
    pub hit_type: u8,
    pub hit_id: u16,
    pub origin: Vec3,
    pub hit_position: Vec3,
    pub offset: Vec3,
    pub weapon_id: u8,
}
impl_packet!(PlayerBulletSync, 206, Sync);

impl PlayerBulletSync {
    fn write_body(&self, bs: &mut BitWriter) {
        bs.write_u8(self.hit_type);
        bs.write_u16(self.hit_id);
        bs.write_vec3(self.origin);
        bs.write_vec3(self.hit_position);
        bs.write_vec3(self.offset);
        bs.write_u8(self.weapon_id);
    }

    fn read_body(player_id: u16, bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            player_id,
            hit_type: bs.read_u8()?,
            hit_id: bs.read_u16()?,
            origin: bs.read_vec3()?,
            hit_position: bs.read_vec3()?,
            offset: bs.read_vec3()?,
            weapon_id: bs.read_u8()?,
        })
    }
}

impl Readable<ToServer> for PlayerBulletSync {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Self::read_body(0, bs)
    }
}

impl Writable<ToServer> for PlayerBulletSync {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(Self::id_for(bs.network()));
        self.write_body(bs);
    }
}

impl Readable<ToClient> for PlayerBulletSync {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        let player_id = bs.read_u16()?;
        Self::read_body(player_id, bs)
    }
}

impl Writable<ToClient> for PlayerBulletSync {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(Self::id_for(bs.network()));
        bs.write_u16(self.player_id);
        self.write_body(bs);
    }
}
