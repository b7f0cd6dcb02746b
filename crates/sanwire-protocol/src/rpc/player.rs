//! Player state, chat, weapons, and damage.

use sanwire_bitstream::{BitReader, BitWriter, NetString, Vec3, Width};
use serde::{Deserialize, Serialize};

use crate::packet::impl_packet;
use crate::types::Colour;
use crate::{ProtocolResult, Readable, ToClient, ToServer, Writable};

/// Number of weapon skill entries in [`PlayerStreamIn`].
pub const WEAPON_SKILL_COUNT: usize = 11;

/// Length of the fixed shop name field.
pub const SHOP_NAME_LENGTH: usize = 0x20;

// ---------------------------------------------------------------------------
// Streaming
// ---------------------------------------------------------------------------

/// Server → client: a player entered the receiver's stream radius.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerStreamIn {
    pub player_id: u16,
    pub team: u8,
    pub skin: u32,
    pub position: Vec3,
    pub angle: f32,
    pub colour: Colour,
    pub fighting_style: u8,
    pub skill_levels: [u16; WEAPON_SKILL_COUNT],
}
impl_packet!(PlayerStreamIn, 32);

impl Writable<ToClient> for PlayerStreamIn {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.player_id);
        bs.write_u8(self.team);
        bs.write_u32(self.skin);
        bs.write_vec3(self.position);
        bs.write_f32(self.angle);
        bs.write_u32(self.colour.rgba());
        bs.write_u8(self.fighting_style);
        bs.write_u16_array(&self.skill_levels);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerStreamOut {
    pub player_id: u16,
}
impl_packet!(PlayerStreamOut, 163);

impl Writable<ToClient> for PlayerStreamOut {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.player_id);
    }
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// Server → client: a coloured system line in the chat box.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SendClientMessage {
    pub colour: Colour,
    pub message: NetString,
}
impl_packet!(SendClientMessage, 93);

impl Writable<ToClient> for SendClientMessage {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u32(self.colour.rgba());
        bs.write_dynamic_str(self.message.as_bytes(), Width::U32);
    }
}

impl Readable<ToClient> for SendClientMessage {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            colour: Colour::from_rgba(bs.read_u32()?),
            message: bs.read_dynamic_str(Width::U32)?,
        })
    }
}

/// Client → server: the player typed a chat line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerRequestChatMessage {
    pub message: NetString,
}
impl_packet!(PlayerRequestChatMessage, 101);

impl Readable<ToServer> for PlayerRequestChatMessage {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            message: bs.read_dynamic_str(Width::U8)?,
        })
    }
}

impl Writable<ToServer> for PlayerRequestChatMessage {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_dynamic_str(self.message.as_bytes(), Width::U8);
    }
}

/// Server → client: a chat line attributed to a player.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerChatMessage {
    pub player_id: u16,
    pub message: NetString,
}
impl_packet!(PlayerChatMessage, 101);

impl Writable<ToClient> for PlayerChatMessage {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.player_id);
        bs.write_dynamic_str(self.message.as_bytes(), Width::U8);
    }
}

impl Readable<ToClient> for PlayerChatMessage {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            player_id: bs.read_u16()?,
            message: bs.read_dynamic_str(Width::U8)?,
        })
    }
}

/// Client → server: the player typed a `/command`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerRequestCommandMessage {
    pub message: NetString,
}
impl_packet!(PlayerRequestCommandMessage, 50);

impl Readable<ToServer> for PlayerRequestCommandMessage {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            message: bs.read_dynamic_str(Width::U32)?,
        })
    }
}

impl Writable<ToServer> for PlayerRequestCommandMessage {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_dynamic_str(self.message.as_bytes(), Width::U32);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerCommandMessage {
    pub message: NetString,
}
impl_packet!(PlayerCommandMessage, 50);

impl Writable<ToClient> for PlayerCommandMessage {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_dynamic_str(self.message.as_bytes(), Width::U32);
    }
}

// ---------------------------------------------------------------------------
// Death and damage
// ---------------------------------------------------------------------------

/// Client → server: the player died.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OnPlayerDeath {
    pub reason: u8,
    pub killer_id: u16,
}
impl_packet!(OnPlayerDeath, 53);

impl Readable<ToServer> for OnPlayerDeath {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            reason: bs.read_u8()?,
            killer_id: bs.read_u16()?,
        })
    }
}

impl Writable<ToServer> for OnPlayerDeath {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(self.reason);
        bs.write_u16(self.killer_id);
    }
}

/// Server → client: a player died (plays the death animation).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerDeath {
    pub player_id: u16,
}
impl_packet!(PlayerDeath, 166);

impl Writable<ToClient> for PlayerDeath {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.player_id);
    }
}

/// Server → client: a kill feed entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SendDeathMessage {
    pub killer_id: u16,
    pub player_id: u16,
    pub reason: u8,
}
impl_packet!(SendDeathMessage, 55);

impl Writable<ToClient> for SendDeathMessage {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.killer_id);
        bs.write_u16(self.player_id);
        bs.write_u8(self.reason);
    }
}

/// Client → server: the player dealt or took damage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OnPlayerGiveTakeDamage {
    pub taking: bool,
    pub player_id: u16,
    pub damage: f32,
    pub weapon_id: u32,
    pub body_part: u32,
}
impl_packet!(OnPlayerGiveTakeDamage, 115);

impl Readable<ToServer> for OnPlayerGiveTakeDamage {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            taking: bs.read_bit()?,
            player_id: bs.read_u16()?,
            damage: bs.read_f32()?,
            weapon_id: bs.read_u32()?,
            body_part: bs.read_u32()?,
        })
    }
}

impl Writable<ToServer> for OnPlayerGiveTakeDamage {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_bit(self.taking);
        bs.write_u16(self.player_id);
        bs.write_f32(self.damage);
        bs.write_u32(self.weapon_id);
        bs.write_u32(self.body_part);
    }
}

// ---------------------------------------------------------------------------
// Weapons
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GivePlayerWeapon {
    pub weapon: u32,
    pub ammo: u32,
}
impl_packet!(GivePlayerWeapon, 22);

impl Writable<ToClient> for GivePlayerWeapon {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u32(self.weapon);
        bs.write_u32(self.ammo);
    }
}

impl Readable<ToClient> for GivePlayerWeapon {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            weapon: bs.read_u32()?,
            ammo: bs.read_u32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResetPlayerWeapons;
impl_packet!(ResetPlayerWeapons, 21);

impl Writable<ToClient> for ResetPlayerWeapons {
    fn write(&self, _bs: &mut BitWriter) {}
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerArmedWeapon {
    pub weapon: u32,
}
impl_packet!(SetPlayerArmedWeapon, 67);

impl Writable<ToClient> for SetPlayerArmedWeapon {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u32(self.weapon);
    }
}

impl Readable<ToClient> for SetPlayerArmedWeapon {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            weapon: bs.read_u32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerAmmo {
    pub weapon: u8,
    pub ammo: u16,
}
impl_packet!(SetPlayerAmmo, 145);

impl Writable<ToClient> for SetPlayerAmmo {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(self.weapon);
        bs.write_u16(self.ammo);
    }
}

// ---------------------------------------------------------------------------
// Identity and appearance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerName {
    pub player_id: u16,
    pub name: NetString,
    pub success: u8,
}
impl_packet!(SetPlayerName, 11);

impl Writable<ToClient> for SetPlayerName {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.player_id);
        bs.write_dynamic_str(self.name.as_bytes(), Width::U8);
        bs.write_u8(self.success);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerColor {
    pub player_id: u16,
    pub colour: Colour,
}
impl_packet!(SetPlayerColor, 72);

impl Writable<ToClient> for SetPlayerColor {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.player_id);
        bs.write_u32(self.colour.rgba());
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerTeam {
    pub player_id: u16,
    pub team: u8,
}
impl_packet!(SetPlayerTeam, 69);

impl Writable<ToClient> for SetPlayerTeam {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.player_id);
        bs.write_u8(self.team);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerFightingStyle {
    pub player_id: u16,
    pub style: u8,
}
impl_packet!(SetPlayerFightingStyle, 89);

impl Writable<ToClient> for SetPlayerFightingStyle {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.player_id);
        bs.write_u8(self.style);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerSkillLevel {
    pub player_id: u16,
    pub skill_type: u32,
    pub skill_level: u16,
}
impl_packet!(SetPlayerSkillLevel, 34);

impl Writable<ToClient> for SetPlayerSkillLevel {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.player_id);
        bs.write_u32(self.skill_type);
        bs.write_u16(self.skill_level);
    }
}

/// Server → client: change a player's skin.
///
/// Unlike most RPCs the player id is a full 32-bit word here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerSkin {
    pub player_id: u16,
    pub skin: u32,
}
impl_packet!(SetPlayerSkin, 153);

impl Writable<ToClient> for SetPlayerSkin {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u32(u32::from(self.player_id));
        bs.write_u32(self.skin);
    }
}

// ---------------------------------------------------------------------------
// Body state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerPosition {
    pub position: Vec3,
}
impl_packet!(SetPlayerPosition, 12);

impl Writable<ToClient> for SetPlayerPosition {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_vec3(self.position);
    }
}

/// Like [`SetPlayerPosition`], but the client snaps to ground height.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerPositionFindZ {
    pub position: Vec3,
}
impl_packet!(SetPlayerPositionFindZ, 13);

impl Writable<ToClient> for SetPlayerPositionFindZ {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_vec3(self.position);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerFacingAngle {
    pub angle: f32,
}
impl_packet!(SetPlayerFacingAngle, 19);

impl Writable<ToClient> for SetPlayerFacingAngle {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_f32(self.angle);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerVelocity {
    pub velocity: Vec3,
}
impl_packet!(SetPlayerVelocity, 90);

impl Writable<ToClient> for SetPlayerVelocity {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_vec3(self.velocity);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerHealth {
    pub health: f32,
}
impl_packet!(SetPlayerHealth, 14);

impl Writable<ToClient> for SetPlayerHealth {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_f32(self.health);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerArmour {
    pub armour: f32,
}
impl_packet!(SetPlayerArmour, 66);

impl Writable<ToClient> for SetPlayerArmour {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_f32(self.armour);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerSpecialAction {
    pub action: u8,
}
impl_packet!(SetPlayerSpecialAction, 88);

impl Writable<ToClient> for SetPlayerSpecialAction {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(self.action);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerDrunkLevel {
    pub level: i32,
}
impl_packet!(SetPlayerDrunkLevel, 35);

impl Writable<ToClient> for SetPlayerDrunkLevel {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_i32(self.level);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerWantedLevel {
    pub level: u8,
}
impl_packet!(SetPlayerWantedLevel, 133);

impl Writable<ToClient> for SetPlayerWantedLevel {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(self.level);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerInterior {
    pub interior: u8,
}
impl_packet!(SetPlayerInterior, 156);

impl Writable<ToClient> for SetPlayerInterior {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(self.interior);
    }
}

/// Client → server: the player walked through an interior marker.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OnPlayerInteriorChange {
    pub interior: u8,
}
impl_packet!(OnPlayerInteriorChange, 118);

impl Readable<ToServer> for OnPlayerInteriorChange {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            interior: bs.read_u8()?,
        })
    }
}

impl Writable<ToServer> for OnPlayerInteriorChange {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(self.interior);
    }
}

// ---------------------------------------------------------------------------
// Animation and control
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApplyPlayerAnimation {
    pub player_id: u16,
    pub library: NetString,
    pub name: NetString,
    pub delta: f32,
    pub looping: bool,
    pub lock_x: bool,
    pub lock_y: bool,
    pub freeze: bool,
    pub time: u32,
}
impl_packet!(ApplyPlayerAnimation, 86);

impl Writable<ToClient> for ApplyPlayerAnimation {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.player_id);
        bs.write_dynamic_str(self.library.as_bytes(), Width::U8);
        bs.write_dynamic_str(self.name.as_bytes(), Width::U8);
        bs.write_f32(self.delta);
        bs.write_bit(self.looping);
        bs.write_bit(self.lock_x);
        bs.write_bit(self.lock_y);
        bs.write_bit(self.freeze);
        bs.write_u32(self.time);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClearPlayerAnimations {
    pub player_id: u16,
}
impl_packet!(ClearPlayerAnimations, 87);

impl Writable<ToClient> for ClearPlayerAnimations {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.player_id);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TogglePlayerControllable {
    pub enable: bool,
}
impl_packet!(TogglePlayerControllable, 15);

impl Writable<ToClient> for TogglePlayerControllable {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(u8::from(self.enable));
    }
}

/// Server → client: enter or leave spectator mode.
///
/// The flag is a full 32-bit word on the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TogglePlayerSpectating {
    pub enable: bool,
}
impl_packet!(TogglePlayerSpectating, 124);

impl Writable<ToClient> for TogglePlayerSpectating {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u32(u32::from(self.enable));
    }
}

// ---------------------------------------------------------------------------
// Money and shops
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GivePlayerMoney {
    pub money: i32,
}
impl_packet!(GivePlayerMoney, 18);

impl Writable<ToClient> for GivePlayerMoney {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_i32(self.money);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResetPlayerMoney;
impl_packet!(ResetPlayerMoney, 20);

impl Writable<ToClient> for ResetPlayerMoney {
    fn write(&self, _bs: &mut BitWriter) {}
}

/// Server → client: load a shop interior script.
///
/// The name is sent as exactly [`SHOP_NAME_LENGTH`] bytes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerShopName {
    pub name: NetString,
}
impl_packet!(SetPlayerShopName, 33);

impl Writable<ToClient> for SetPlayerShopName {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_fixed_str(self.name.as_bytes(), SHOP_NAME_LENGTH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode_packet, encode_packet};
    use sanwire_bitstream::{DecodeLimits, Network};

    // =====================================================================
    // Round trips
    // =====================================================================

    #[test]
    fn test_damage_report_round_trip() {
        let damage = OnPlayerGiveTakeDamage {
            taking: true,
            player_id: 7,
            damage: 46.2,
            weapon_id: 24,
            body_part: 9,
        };
        let bytes = encode_packet::<ToServer, _>(&damage, Network::Legacy);
        let decoded: OnPlayerGiveTakeDamage =
            decode_packet::<ToServer, _>(&bytes, DecodeLimits::default()).unwrap();
        assert_eq!(decoded, damage);
    }

    #[test]
    fn test_client_message_round_trip() {
        let msg = SendClientMessage {
            colour: Colour::new(0xFF, 0xCC, 0x00, 0xFF),
            message: NetString::from("Welcome to the server"),
        };
        let bytes = encode_packet::<ToClient, _>(&msg, Network::Legacy);
        assert_eq!(bytes.len(), 1 + 4 + 4 + msg.message.len());
        let decoded: SendClientMessage =
            decode_packet::<ToClient, _>(&bytes, DecodeLimits::default()).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_chat_ids_match_across_directions() {
        let request = PlayerRequestChatMessage {
            message: NetString::from("hi"),
        };
        let broadcast = PlayerChatMessage {
            player_id: 3,
            message: NetString::from("hi"),
        };
        let inbound = encode_packet::<ToServer, _>(&request, Network::Legacy);
        let outbound = encode_packet::<ToClient, _>(&broadcast, Network::Legacy);
        assert_eq!(inbound[0], outbound[0]);
        assert_eq!(inbound.len() + 2, outbound.len());
    }

    // =====================================================================
    // Layout
    // =====================================================================

    #[test]
    fn test_shop_name_is_fixed_width() {
        let long = SetPlayerShopName {
            name: NetString::from("x".repeat(50)),
        };
        let short = SetPlayerShopName {
            name: NetString::from("FDPIZA"),
        };
        let long_bytes = encode_packet::<ToClient, _>(&long, Network::Legacy);
        let short_bytes = encode_packet::<ToClient, _>(&short, Network::Legacy);
        assert_eq!(long_bytes.len(), 1 + SHOP_NAME_LENGTH);
        assert_eq!(short_bytes.len(), 1 + SHOP_NAME_LENGTH);
        assert_eq!(&short_bytes[1..8], b"FDPIZA\0");
    }

    #[test]
    fn test_skin_player_id_is_32_bits() {
        let bytes = encode_packet::<ToClient, _>(
            &SetPlayerSkin {
                player_id: 5,
                skin: 0,
            },
            Network::Legacy,
        );
        assert_eq!(bytes, vec![153, 5, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_animation_flags_are_packed_bits() {
        let anim = ApplyPlayerAnimation {
            player_id: 1,
            library: NetString::from("PED"),
            name: NetString::from("WALK"),
            delta: 4.1,
            looping: true,
            freeze: true,
            ..ApplyPlayerAnimation::default()
        };
        let bytes = encode_packet::<ToClient, _>(&anim, Network::Legacy);
        // id, player, 1+3, 1+4, f32, 4 bits, u32 spanning a partial byte
        assert_eq!(bytes.len(), 1 + 2 + 4 + 5 + 4 + 5);
    }

    #[test]
    fn test_truncated_death_report_is_malformed() {
        let err = decode_packet::<ToServer, OnPlayerDeath>(&[53, 2, 7], DecodeLimits::default())
            .unwrap_err();
        assert!(!err.is_recoverable());
    }
}
