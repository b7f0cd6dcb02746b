//! Connection, class selection, and spawning.
//!
//! These RPCs run once per session or once per life: the join handshake,
//! the server's init blob, class selection, and the spawn request/response
//! pairs. Several ids are reused across directions (128, 129, 155), which
//! is why every impl below names its side explicitly.

use sanwire_bitstream::{BitReader, BitWriter, NetString, Vec3, Width};
use serde::{Deserialize, Serialize};

use crate::packet::impl_packet;
use crate::types::Colour;
use crate::{ProtocolResult, Readable, ToClient, ToServer, Writable};

/// Number of vehicle model slots in [`PlayerInit`].
pub const VEHICLE_MODEL_COUNT: usize = 212;

// ---------------------------------------------------------------------------
// Handshake
// ---------------------------------------------------------------------------

/// Client → server: the first RPC after the transport handshake.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerConnect {
    pub version_number: u32,
    pub modded: u8,
    pub name: NetString,
    pub challenge_response: u32,
    pub key: NetString,
    pub version_string: NetString,
}
impl_packet!(PlayerConnect, 25);

impl Readable<ToServer> for PlayerConnect {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            version_number: bs.read_u32()?,
            modded: bs.read_u8()?,
            name: bs.read_dynamic_str(Width::U8)?,
            challenge_response: bs.read_u32()?,
            key: bs.read_dynamic_str(Width::U8)?,
            version_string: bs.read_dynamic_str(Width::U8)?,
        })
    }
}

impl Writable<ToServer> for PlayerConnect {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u32(self.version_number);
        bs.write_u8(self.modded);
        bs.write_dynamic_str(self.name.as_bytes(), Width::U8);
        bs.write_u32(self.challenge_response);
        bs.write_dynamic_str(self.key.as_bytes(), Width::U8);
        bs.write_dynamic_str(self.version_string.as_bytes(), Width::U8);
    }
}

/// Server → client: another player joined.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerJoin {
    pub player_id: u16,
    pub colour: Colour,
    pub is_npc: bool,
    pub name: NetString,
}
impl_packet!(PlayerJoin, 137);

impl Writable<ToClient> for PlayerJoin {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.player_id);
        bs.write_u32(self.colour.rgba());
        bs.write_u8(u8::from(self.is_npc));
        bs.write_dynamic_str(self.name.as_bytes(), Width::U8);
    }
}

impl Readable<ToClient> for PlayerJoin {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            player_id: bs.read_u16()?,
            colour: Colour::from_rgba(bs.read_u32()?),
            is_npc: bs.read_u8()? != 0,
            name: bs.read_dynamic_str(Width::U8)?,
        })
    }
}

/// Server → client: a player left.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerQuit {
    pub player_id: u16,
    pub reason: u8,
}
impl_packet!(PlayerQuit, 138);

impl Writable<ToClient> for PlayerQuit {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.player_id);
        bs.write_u8(self.reason);
    }
}

impl Readable<ToClient> for PlayerQuit {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            player_id: bs.read_u16()?,
            reason: bs.read_u8()?,
        })
    }
}

/// Server → client: world settings sent once after a successful connect.
///
/// `vehicle_models` always occupies [`VEHICLE_MODEL_COUNT`] bytes on the
/// wire. Shorter input is zero-padded and longer input truncated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerInit {
    pub enable_zone_names: bool,
    pub use_player_ped_anims: bool,
    pub allow_interior_weapons: bool,
    pub use_limit_global_chat_radius: bool,
    pub limit_global_chat_radius: f32,
    pub enable_stunt_bonus: bool,
    pub name_tag_draw_distance: f32,
    pub disable_interior_enter_exits: bool,
    pub disable_name_tag_los: bool,
    pub manual_vehicle_engine_and_lights: bool,
    pub spawn_info_count: u32,
    pub player_id: u16,
    pub show_name_tags: bool,
    pub show_player_markers: u32,
    pub world_time: u8,
    pub weather: u8,
    pub gravity: f32,
    pub lan_mode: bool,
    pub death_drop_amount: u32,
    pub instagib: bool,
    pub on_foot_rate: u32,
    pub in_car_rate: u32,
    pub weapon_rate: u32,
    pub multiplier: u32,
    pub lag_compensation: u32,
    pub server_name: NetString,
    pub vehicle_models: Vec<u8>,
}
impl_packet!(PlayerInit, 139);

impl Writable<ToClient> for PlayerInit {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_bit(self.enable_zone_names);
        bs.write_bit(self.use_player_ped_anims);
        bs.write_bit(self.allow_interior_weapons);
        bs.write_bit(self.use_limit_global_chat_radius);
        bs.write_f32(self.limit_global_chat_radius);
        bs.write_bit(self.enable_stunt_bonus);
        bs.write_f32(self.name_tag_draw_distance);
        bs.write_bit(self.disable_interior_enter_exits);
        bs.write_bit(self.disable_name_tag_los);
        bs.write_bit(self.manual_vehicle_engine_and_lights);
        bs.write_u32(self.spawn_info_count);
        bs.write_u16(self.player_id);
        bs.write_bit(self.show_name_tags);
        bs.write_u32(self.show_player_markers);
        bs.write_u8(self.world_time);
        bs.write_u8(self.weather);
        bs.write_f32(self.gravity);
        bs.write_bit(self.lan_mode);
        bs.write_u32(self.death_drop_amount);
        bs.write_bit(self.instagib);
        bs.write_u32(self.on_foot_rate);
        bs.write_u32(self.in_car_rate);
        bs.write_u32(self.weapon_rate);
        bs.write_u32(self.multiplier);
        bs.write_u32(self.lag_compensation);
        bs.write_dynamic_str(self.server_name.as_bytes(), Width::U8);

        let mut models = [0u8; VEHICLE_MODEL_COUNT];
        let n = self.vehicle_models.len().min(VEHICLE_MODEL_COUNT);
        models[..n].copy_from_slice(&self.vehicle_models[..n]);
        bs.write_u8_array(&models);
    }
}

impl Readable<ToClient> for PlayerInit {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            enable_zone_names: bs.read_bit()?,
            use_player_ped_anims: bs.read_bit()?,
            allow_interior_weapons: bs.read_bit()?,
            use_limit_global_chat_radius: bs.read_bit()?,
            limit_global_chat_radius: bs.read_f32()?,
            enable_stunt_bonus: bs.read_bit()?,
            name_tag_draw_distance: bs.read_f32()?,
            disable_interior_enter_exits: bs.read_bit()?,
            disable_name_tag_los: bs.read_bit()?,
            manual_vehicle_engine_and_lights: bs.read_bit()?,
            spawn_info_count: bs.read_u32()?,
            player_id: bs.read_u16()?,
            show_name_tags: bs.read_bit()?,
            show_player_markers: bs.read_u32()?,
            world_time: bs.read_u8()?,
            weather: bs.read_u8()?,
            gravity: bs.read_f32()?,
            lan_mode: bs.read_bit()?,
            death_drop_amount: bs.read_u32()?,
            instagib: bs.read_bit()?,
            on_foot_rate: bs.read_u32()?,
            in_car_rate: bs.read_u32()?,
            weapon_rate: bs.read_u32()?,
            multiplier: bs.read_u32()?,
            lag_compensation: bs.read_u32()?,
            server_name: bs.read_dynamic_str(Width::U8)?,
            vehicle_models: bs.read_u8_array::<VEHICLE_MODEL_COUNT>()?.to_vec(),
        })
    }
}

// ---------------------------------------------------------------------------
// Class selection
// ---------------------------------------------------------------------------

/// Client → server: the player scrolled to a class.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerRequestClass {
    pub class_id: u16,
}
impl_packet!(PlayerRequestClass, 128);

impl Readable<ToServer> for PlayerRequestClass {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            class_id: bs.read_u16()?,
        })
    }
}

impl Writable<ToServer> for PlayerRequestClass {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.class_id);
    }
}

/// Server → client: the class the player is looking at.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerRequestClassResponse {
    pub selectable: u8,
    pub team: u8,
    pub model: u32,
    pub unknown: u8,
    pub spawn: Vec3,
    pub z_angle: f32,
    pub weapons: [u32; 3],
    pub ammo: [u32; 3],
}
impl_packet!(PlayerRequestClassResponse, 128);

impl Writable<ToClient> for PlayerRequestClassResponse {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(self.selectable);
        bs.write_u8(self.team);
        bs.write_u32(self.model);
        bs.write_u8(self.unknown);
        bs.write_vec3(self.spawn);
        bs.write_f32(self.z_angle);
        bs.write_u32_array(&self.weapons);
        bs.write_u32_array(&self.ammo);
    }
}

impl Readable<ToClient> for PlayerRequestClassResponse {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            selectable: bs.read_u8()?,
            team: bs.read_u8()?,
            model: bs.read_u32()?,
            unknown: bs.read_u8()?,
            spawn: bs.read_vec3()?,
            z_angle: bs.read_f32()?,
            weapons: bs.read_u32_array()?,
            ammo: bs.read_u32_array()?,
        })
    }
}

/// Server → client: where and how the player will spawn.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetSpawnInfo {
    pub team: u8,
    pub model: u32,
    pub unknown: u8,
    pub spawn: Vec3,
    pub z_angle: f32,
    pub weapons: [u8; 3],
    pub ammo: [u32; 3],
}
impl_packet!(SetSpawnInfo, 68);

impl Writable<ToClient> for SetSpawnInfo {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(self.team);
        bs.write_u32(self.model);
        bs.write_u8(self.unknown);
        bs.write_vec3(self.spawn);
        bs.write_f32(self.z_angle);
        bs.write_u8_array(&self.weapons);
        bs.write_u32_array(&self.ammo);
    }
}

/// Server → client: send the player back to class selection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForcePlayerClassSelection;
impl_packet!(ForcePlayerClassSelection, 74);

impl Writable<ToClient> for ForcePlayerClassSelection {
    fn write(&self, _bs: &mut BitWriter) {}
}

// ---------------------------------------------------------------------------
// Spawning
// ---------------------------------------------------------------------------

/// Client → server: the player pressed spawn.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerRequestSpawn;
impl_packet!(PlayerRequestSpawn, 129);

impl Readable<ToServer> for PlayerRequestSpawn {
    fn read(_bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self)
    }
}

impl Writable<ToServer> for PlayerRequestSpawn {
    fn write(&self, _bs: &mut BitWriter) {}
}

/// Server → client: whether the spawn request was granted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerRequestSpawnResponse {
    pub allow: u32,
}
impl_packet!(PlayerRequestSpawnResponse, 129);

impl Writable<ToClient> for PlayerRequestSpawnResponse {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u32(self.allow);
    }
}

impl Readable<ToClient> for PlayerRequestSpawnResponse {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            allow: bs.read_u32()?,
        })
    }
}

/// Client → server: the player has spawned.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerSpawn;
impl_packet!(PlayerSpawn, 52);

impl Readable<ToServer> for PlayerSpawn {
    fn read(_bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self)
    }
}

impl Writable<ToServer> for PlayerSpawn {
    fn write(&self, _bs: &mut BitWriter) {}
}

// ---------------------------------------------------------------------------
// Scoreboard
// ---------------------------------------------------------------------------

/// Client → server: the scoreboard was opened.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OnPlayerRequestScoresAndPings;
impl_packet!(OnPlayerRequestScoresAndPings, 155);

impl Readable<ToServer> for OnPlayerRequestScoresAndPings {
    fn read(_bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self)
    }
}

impl Writable<ToServer> for OnPlayerRequestScoresAndPings {
    fn write(&self, _bs: &mut BitWriter) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player_id: u16,
    pub score: i32,
    pub ping: u32,
}

/// Server → client: scoreboard rows, written back to back with no count.
///
/// A single entry is byte-identical to the legacy one-player layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SendPlayerScoresAndPings {
    pub entries: Vec<ScoreEntry>,
}
impl_packet!(SendPlayerScoresAndPings, 155);

impl Writable<ToClient> for SendPlayerScoresAndPings {
    fn write(&self, bs: &mut BitWriter) {
        for entry in &self.entries {
            bs.write_u16(entry.player_id);
            bs.write_i32(entry.score);
            bs.write_u32(entry.ping);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Direction, Packet, Side, decode_packet, encode_packet};
    use sanwire_bitstream::{DecodeLimits, Network};

    fn init() -> PlayerInit {
        PlayerInit {
            enable_zone_names: true,
            limit_global_chat_radius: 200.0,
            name_tag_draw_distance: 70.0,
            spawn_info_count: 3,
            player_id: 12,
            show_name_tags: true,
            show_player_markers: 1,
            world_time: 12,
            weather: 10,
            gravity: 0.008,
            on_foot_rate: 30,
            in_car_rate: 30,
            weapon_rate: 30,
            multiplier: 10,
            lag_compensation: 1,
            server_name: NetString::from("sanwire test server"),
            vehicle_models: vec![1; VEHICLE_MODEL_COUNT],
            ..PlayerInit::default()
        }
    }

    // =====================================================================
    // Round trips
    // =====================================================================

    #[test]
    fn test_player_connect_round_trip() {
        let connect = PlayerConnect {
            version_number: 4057,
            modded: 1,
            name: NetString::from("Carl"),
            challenge_response: 0xDEAD_BEEF,
            key: NetString::from("ABCDEF0123"),
            version_string: NetString::from("0.3.7-R2"),
        };
        let bytes = encode_packet::<ToServer, _>(&connect, Network::Legacy);
        let decoded: PlayerConnect =
            decode_packet::<ToServer, _>(&bytes, DecodeLimits::default()).unwrap();
        assert_eq!(decoded, connect);
    }

    #[test]
    fn test_player_init_round_trip() {
        let bytes = encode_packet::<ToClient, _>(&init(), Network::Legacy);
        let decoded: PlayerInit =
            decode_packet::<ToClient, _>(&bytes, DecodeLimits::default()).unwrap();
        assert_eq!(decoded, init());
    }

    #[test]
    fn test_player_init_pads_short_model_list() {
        let mut packet = init();
        packet.vehicle_models = vec![7, 8];
        let bytes = encode_packet::<ToClient, _>(&packet, Network::Legacy);
        let decoded: PlayerInit =
            decode_packet::<ToClient, _>(&bytes, DecodeLimits::default()).unwrap();
        assert_eq!(decoded.vehicle_models.len(), VEHICLE_MODEL_COUNT);
        assert_eq!(&decoded.vehicle_models[..3], &[7, 8, 0]);
    }

    #[test]
    fn test_class_response_round_trip() {
        let response = PlayerRequestClassResponse {
            selectable: 1,
            team: 255,
            model: 105,
            unknown: 0,
            spawn: Vec3::new(2495.0, -1687.0, 13.5),
            z_angle: 0.5,
            weapons: [24, 31, 0],
            ammo: [50, 300, 0],
        };
        let bytes = encode_packet::<ToClient, _>(&response, Network::Legacy);
        assert_eq!(bytes.len(), 1 + 1 + 1 + 4 + 1 + 12 + 4 + 12 + 12);
        let decoded: PlayerRequestClassResponse =
            decode_packet::<ToClient, _>(&bytes, DecodeLimits::default()).unwrap();
        assert_eq!(decoded, response);
    }

    // =====================================================================
    // Layout
    // =====================================================================

    #[test]
    fn test_request_spawn_is_id_only() {
        assert_eq!(encode_packet::<ToServer, _>(&PlayerRequestSpawn, Network::Legacy), vec![129]);
    }

    #[test]
    fn test_scores_entries_are_concatenated() {
        let entry = ScoreEntry {
            player_id: 1,
            score: -5,
            ping: 80,
        };
        let one = encode_packet::<ToClient, _>(
            &SendPlayerScoresAndPings {
                entries: vec![entry],
            },
            Network::Legacy,
        );
        assert_eq!(one.len(), 1 + 2 + 4 + 4);
        let two = encode_packet::<ToClient, _>(
            &SendPlayerScoresAndPings {
                entries: vec![entry, entry],
            },
            Network::Legacy,
        );
        assert_eq!(&two[1..11], &two[11..21]);
    }

    #[test]
    fn test_shared_ids_are_distinct_types() {
        assert_eq!(PlayerRequestClass::ID, PlayerRequestClassResponse::ID);
        assert_ne!(PlayerRequestClass::NAME, PlayerRequestClassResponse::NAME);
        assert_eq!(ToClient::DIRECTION, Direction::ServerToClient);
    }
}
