//! Stats sync. Client → server only.

use sanwire_bitstream::{BitReader, BitWriter};
use serde::{Deserialize, Serialize};

use crate::packet::impl_packet;
use crate::{Packet, ProtocolResult, Readable, ToServer, Writable};

/// The client's view of its money and drunk level.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerStatsSync {
    pub money: i32,
    pub drunk_level: i32,
}
impl_packet!(PlayerStatsSync, 205, Sync);

impl Readable<ToServer> for PlayerStatsSync {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            money: bs.read_i32()?,
            drunk_level: bs.read_i32()?,
        })
    }
}

impl Writable<ToServer> for PlayerStatsSync {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(Self::id_for(bs.network()));
        bs.write_i32(self.money);
        bs.write_i32(self.drunk_level);
    }
}
