//! Environment, camera, checkpoints, pickups, and audio.

use sanwire_bitstream::{BitReader, BitWriter, NetString, Vec3, Vec4, Width};
use serde::{Deserialize, Serialize};

use crate::packet::impl_packet;
use crate::{ProtocolResult, Readable, ToClient, ToServer, Writable};

// ---------------------------------------------------------------------------
// Checkpoints
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetCheckpoint {
    pub position: Vec3,
    pub size: f32,
}
impl_packet!(SetCheckpoint, 107);

impl Writable<ToClient> for SetCheckpoint {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_vec3(self.position);
        bs.write_f32(self.size);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DisableCheckpoint;
impl_packet!(DisableCheckpoint, 37);

impl Writable<ToClient> for DisableCheckpoint {
    fn write(&self, _bs: &mut BitWriter) {}
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetRaceCheckpoint {
    pub kind: u8,
    pub position: Vec3,
    pub next_position: Vec3,
    pub size: f32,
}
impl_packet!(SetRaceCheckpoint, 38);

impl Writable<ToClient> for SetRaceCheckpoint {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(self.kind);
        bs.write_vec3(self.position);
        bs.write_vec3(self.next_position);
        bs.write_f32(self.size);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DisableRaceCheckpoint;
impl_packet!(DisableRaceCheckpoint, 39);

impl Writable<ToClient> for DisableRaceCheckpoint {
    fn write(&self, _bs: &mut BitWriter) {}
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerWeather {
    pub weather: u8,
}
impl_packet!(SetPlayerWeather, 152);

impl Writable<ToClient> for SetPlayerWeather {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(self.weather);
    }
}

/// Server → client: confine the player to a rectangle.
///
/// `bounds` is `(max_x, min_x, max_y, min_y)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetWorldBounds {
    pub bounds: Vec4,
}
impl_packet!(SetWorldBounds, 17);

impl Writable<ToClient> for SetWorldBounds {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_vec4(self.bounds);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerTime {
    pub hour: u8,
    pub minute: u8,
}
impl_packet!(SetPlayerTime, 29);

impl Writable<ToClient> for SetPlayerTime {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(self.hour);
        bs.write_u8(self.minute);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TogglePlayerClock {
    pub enable: bool,
}
impl_packet!(TogglePlayerClock, 30);

impl Writable<ToClient> for TogglePlayerClock {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(u8::from(self.enable));
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RemoveBuildingForPlayer {
    pub model: u32,
    pub position: Vec3,
    pub radius: f32,
}
impl_packet!(RemoveBuildingForPlayer, 43);

impl Writable<ToClient> for RemoveBuildingForPlayer {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u32(self.model);
        bs.write_vec3(self.position);
        bs.write_f32(self.radius);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreateExplosion {
    pub position: Vec3,
    pub kind: u16,
    pub radius: f32,
}
impl_packet!(CreateExplosion, 79);

impl Writable<ToClient> for CreateExplosion {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_vec3(self.position);
        bs.write_u16(self.kind);
        bs.write_f32(self.radius);
    }
}

// ---------------------------------------------------------------------------
// Camera
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerCameraPosition {
    pub position: Vec3,
}
impl_packet!(SetPlayerCameraPosition, 157);

impl Writable<ToClient> for SetPlayerCameraPosition {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_vec3(self.position);
    }
}

/// Server → client: point the camera at a position.
///
/// The legacy client takes no cut style here; only the target is sent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerCameraLookAt {
    pub position: Vec3,
}
impl_packet!(SetPlayerCameraLookAt, 158);

impl Writable<ToClient> for SetPlayerCameraLookAt {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_vec3(self.position);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerCameraBehindPlayer;
impl_packet!(SetPlayerCameraBehindPlayer, 162);

impl Writable<ToClient> for SetPlayerCameraBehindPlayer {
    fn write(&self, _bs: &mut BitWriter) {}
}

// ---------------------------------------------------------------------------
// Audio
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerPlaySound {
    pub sound_id: u32,
    pub position: Vec3,
}
impl_packet!(PlayerPlaySound, 16);

impl Writable<ToClient> for PlayerPlaySound {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u32(self.sound_id);
        bs.write_vec3(self.position);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayAudioStreamForPlayer {
    pub url: NetString,
    pub position: Vec3,
    pub distance: f32,
    pub use_position: bool,
}
impl_packet!(PlayAudioStreamForPlayer, 41);

impl Writable<ToClient> for PlayAudioStreamForPlayer {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_dynamic_str(self.url.as_bytes(), Width::U8);
        bs.write_vec3(self.position);
        bs.write_f32(self.distance);
        bs.write_u8(u8::from(self.use_position));
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StopAudioStreamForPlayer;
impl_packet!(StopAudioStreamForPlayer, 42);

impl Writable<ToClient> for StopAudioStreamForPlayer {
    fn write(&self, _bs: &mut BitWriter) {}
}

// ---------------------------------------------------------------------------
// Pickups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerCreatePickup {
    pub pickup_id: i32,
    pub model: i32,
    pub kind: i32,
    pub position: Vec3,
}
impl_packet!(PlayerCreatePickup, 95);

impl Writable<ToClient> for PlayerCreatePickup {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_i32(self.pickup_id);
        bs.write_i32(self.model);
        bs.write_i32(self.kind);
        bs.write_vec3(self.position);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerDestroyPickup {
    pub pickup_id: i32,
}
impl_packet!(PlayerDestroyPickup, 63);

impl Writable<ToClient> for PlayerDestroyPickup {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_i32(self.pickup_id);
    }
}

/// Client → server: the player walked into a pickup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OnPlayerPickUpPickup {
    pub pickup_id: i32,
}
impl_packet!(OnPlayerPickUpPickup, 131);

impl Readable<ToServer> for OnPlayerPickUpPickup {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            pickup_id: bs.read_i32()?,
        })
    }
}

impl Writable<ToServer> for OnPlayerPickUpPickup {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_i32(self.pickup_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode_packet, encode_packet};
    use sanwire_bitstream::{DecodeLimits, Network};

    #[test]
    fn test_empty_rpcs_are_id_only() {
        assert_eq!(encode_packet::<ToClient, _>(&DisableCheckpoint, Network::Legacy), vec![37]);
        assert_eq!(
            encode_packet::<ToClient, _>(&SetPlayerCameraBehindPlayer, Network::Legacy),
            vec![162]
        );
    }

    #[test]
    fn test_camera_look_at_carries_only_target() {
        let bytes = encode_packet::<ToClient, _>(
            &SetPlayerCameraLookAt {
                position: Vec3::new(1.0, 2.0, 3.0),
            },
            Network::Legacy,
        );
        assert_eq!(bytes.len(), 1 + 12);
    }

    #[test]
    fn test_pickup_round_trip() {
        let pickup = OnPlayerPickUpPickup { pickup_id: -1 };
        let bytes = encode_packet::<ToServer, _>(&pickup, Network::Legacy);
        assert_eq!(bytes, vec![131, 0xFF, 0xFF, 0xFF, 0xFF]);
        let decoded: OnPlayerPickUpPickup =
            decode_packet::<ToServer, _>(&bytes, DecodeLimits::default()).unwrap();
        assert_eq!(decoded, pickup);
    }

    #[test]
    fn test_race_checkpoint_layout() {
        let cp = SetRaceCheckpoint {
            kind: 1,
            position: Vec3::ONE,
            next_position: Vec3::ZERO,
            size: 5.0,
        };
        let bytes = encode_packet::<ToClient, _>(&cp, Network::Legacy);
        assert_eq!(bytes.len(), 1 + 1 + 12 + 12 + 4);
        assert_eq!(bytes[1], 1);
        assert_eq!(&bytes[2..6], &1.0f32.to_le_bytes());
    }
}
