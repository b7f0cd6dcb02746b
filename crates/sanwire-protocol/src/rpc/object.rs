//! Objects, materials, player attachments, and edit mode.
//!
//! Material and attachment data live in side tables owned by the object
//! and player pools. The packets here carry only ids and borrow the
//! table when they are encoded:
//!
//! ```ignore
//! let bytes = encode_packet_with::<ToClient, _, _>(&create, &materials, network);
//! ```

use sanwire_bitstream::{BitReader, BitWriter, Vec3};
use serde::{Deserialize, Serialize};

use crate::packet::impl_packet;
use crate::tables::{AttachmentSlot, AttachmentTable, MaterialTable, ObjectMaterial};
use crate::types::{INVALID_OBJECT_ID, INVALID_VEHICLE_ID};
use crate::{ProtocolResult, Readable, ToClient, ToServer, Writable, WritableWith};

// ---------------------------------------------------------------------------
// Creation and removal
// ---------------------------------------------------------------------------

/// What a created object is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttachedTo {
    Vehicle(u16),
    Object(u16),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectAttachment {
    pub target: AttachedTo,
    pub offset: Vec3,
    pub rotation: Vec3,
    pub sync_rotation: bool,
}

/// Server → client: create an object, with its material overrides.
///
/// Encoded with a [`MaterialTable`]. Only slots that are both marked in
/// use and populated are sent, and the leading count always equals the
/// number of slot records that follow.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreateObject {
    pub object_id: u16,
    pub model: i32,
    pub position: Vec3,
    pub rotation: Vec3,
    pub draw_distance: f32,
    pub camera_collision: bool,
    pub attachment: Option<ObjectAttachment>,
}
impl_packet!(CreateObject, 44);

impl<T: MaterialTable + ?Sized> WritableWith<ToClient, T> for CreateObject {
    fn write_with(&self, bs: &mut BitWriter, table: &T) {
        bs.write_u16(self.object_id);
        bs.write_i32(self.model);
        bs.write_vec3(self.position);
        bs.write_vec3(self.rotation);
        bs.write_f32(self.draw_distance);
        bs.write_u8(u8::from(self.camera_collision));

        let (vehicle, object) = match self.attachment.as_ref().map(|a| a.target) {
            Some(AttachedTo::Vehicle(id)) => (id, INVALID_OBJECT_ID),
            Some(AttachedTo::Object(id)) => (INVALID_VEHICLE_ID, id),
            None => (INVALID_VEHICLE_ID, INVALID_OBJECT_ID),
        };
        bs.write_u16(vehicle);
        bs.write_u16(object);
        if let Some(attachment) = &self.attachment {
            bs.write_vec3(attachment.offset);
            bs.write_vec3(attachment.rotation);
            bs.write_u8(u8::from(attachment.sync_rotation));
        }

        let used: Vec<(usize, &ObjectMaterial)> = table
            .materials_in_use()
            .iter()
            .filter_map(|slot| table.material(slot).map(|m| (slot, m)))
            .collect();
        bs.write_u8(used.len() as u8);
        for (slot, material) in used {
            material.write_slot(bs, slot as u8);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DestroyObject {
    pub object_id: u16,
}
impl_packet!(DestroyObject, 47);

impl Writable<ToClient> for DestroyObject {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.object_id);
    }
}

/// Server → client: replace one material slot on an existing object.
///
/// Encoded with the single [`ObjectMaterial`] record for `slot`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerObjectMaterial {
    pub object_id: u16,
    pub slot: u8,
}
impl_packet!(SetPlayerObjectMaterial, 84);

impl WritableWith<ToClient, ObjectMaterial> for SetPlayerObjectMaterial {
    fn write_with(&self, bs: &mut BitWriter, material: &ObjectMaterial) {
        bs.write_u16(self.object_id);
        material.write_slot(bs, self.slot);
    }
}

// ---------------------------------------------------------------------------
// Movement
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MoveObject {
    pub object_id: u16,
    pub current_position: Vec3,
    pub target_position: Vec3,
    pub speed: f32,
    pub target_rotation: Vec3,
}
impl_packet!(MoveObject, 99);

impl Writable<ToClient> for MoveObject {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.object_id);
        bs.write_vec3(self.current_position);
        bs.write_vec3(self.target_position);
        bs.write_f32(self.speed);
        bs.write_vec3(self.target_rotation);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StopObject {
    pub object_id: u16,
}
impl_packet!(StopObject, 122);

impl Writable<ToClient> for StopObject {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.object_id);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetObjectPosition {
    pub object_id: u16,
    pub position: Vec3,
}
impl_packet!(SetObjectPosition, 45);

impl Writable<ToClient> for SetObjectPosition {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.object_id);
        bs.write_vec3(self.position);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetObjectRotation {
    pub object_id: u16,
    pub rotation: Vec3,
}
impl_packet!(SetObjectRotation, 46);

impl Writable<ToClient> for SetObjectRotation {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.object_id);
        bs.write_vec3(self.rotation);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AttachObjectToPlayer {
    pub object_id: u16,
    pub player_id: u16,
    pub offset: Vec3,
    pub rotation: Vec3,
}
impl_packet!(AttachObjectToPlayer, 75);

impl Writable<ToClient> for AttachObjectToPlayer {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.object_id);
        bs.write_u16(self.player_id);
        bs.write_vec3(self.offset);
        bs.write_vec3(self.rotation);
    }
}

// ---------------------------------------------------------------------------
// Player attachments
// ---------------------------------------------------------------------------

/// Server → client: set or clear one of a player's attachment slots.
///
/// Encoded with an [`AttachmentTable`]. When `create` is set the slot
/// data comes from the table; an empty slot is sent as a removal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetPlayerAttachedObject {
    pub player_id: u16,
    pub index: u32,
    pub create: bool,
}
impl_packet!(SetPlayerAttachedObject, 113);

impl<T: AttachmentTable + ?Sized> WritableWith<ToClient, T> for SetPlayerAttachedObject {
    fn write_with(&self, bs: &mut BitWriter, table: &T) {
        bs.write_u16(self.player_id);
        bs.write_u32(self.index);
        let slot = if self.create {
            table.slot(self.index as usize)
        } else {
            None
        };
        bs.write_bit(slot.is_some());
        if let Some(slot) = slot {
            slot.write(bs);
        }
    }
}

// ---------------------------------------------------------------------------
// Selection and editing
// ---------------------------------------------------------------------------

/// Server → client: enter object selection mode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerBeginObjectSelect;
impl_packet!(PlayerBeginObjectSelect, 27);

impl Writable<ToClient> for PlayerBeginObjectSelect {
    fn write(&self, _bs: &mut BitWriter) {}
}

/// Client → server: the player clicked an object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OnPlayerSelectObject {
    pub select_type: u32,
    pub object_id: u16,
    pub model: u32,
    pub position: Vec3,
}
impl_packet!(OnPlayerSelectObject, 27);

impl Readable<ToServer> for OnPlayerSelectObject {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            select_type: bs.read_u32()?,
            object_id: bs.read_u16()?,
            model: bs.read_u32()?,
            position: bs.read_vec3()?,
        })
    }
}

impl Writable<ToServer> for OnPlayerSelectObject {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u32(self.select_type);
        bs.write_u16(self.object_id);
        bs.write_u32(self.model);
        bs.write_vec3(self.position);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerCancelObjectEdit;
impl_packet!(PlayerCancelObjectEdit, 28);

impl Writable<ToClient> for PlayerCancelObjectEdit {
    fn write(&self, _bs: &mut BitWriter) {}
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerBeginObjectEdit {
    pub player_object: bool,
    pub object_id: u16,
}
impl_packet!(PlayerBeginObjectEdit, 117);

impl Writable<ToClient> for PlayerBeginObjectEdit {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_bit(self.player_object);
        bs.write_u16(self.object_id);
    }
}

/// Client → server: progress or result of an object edit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OnPlayerEditObject {
    pub player_object: bool,
    pub object_id: u16,
    pub response: u32,
    pub offset: Vec3,
    pub rotation: Vec3,
}
impl_packet!(OnPlayerEditObject, 117);

impl Readable<ToServer> for OnPlayerEditObject {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            player_object: bs.read_bit()?,
            object_id: bs.read_u16()?,
            response: bs.read_u32()?,
            offset: bs.read_vec3()?,
            rotation: bs.read_vec3()?,
        })
    }
}

impl Writable<ToServer> for OnPlayerEditObject {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_bit(self.player_object);
        bs.write_u16(self.object_id);
        bs.write_u32(self.response);
        bs.write_vec3(self.offset);
        bs.write_vec3(self.rotation);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerBeginAttachedObjectEdit {
    pub index: u32,
}
impl_packet!(PlayerBeginAttachedObjectEdit, 116);

impl Writable<ToClient> for PlayerBeginAttachedObjectEdit {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u32(self.index);
    }
}

/// Client → server: the edited attachment slot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OnPlayerEditAttachedObject {
    pub response: u32,
    pub index: u32,
    pub slot: AttachmentSlot,
}
impl_packet!(OnPlayerEditAttachedObject, 116);

impl Readable<ToServer> for OnPlayerEditAttachedObject {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            response: bs.read_u32()?,
            index: bs.read_u32()?,
            slot: AttachmentSlot::read(bs)?,
        })
    }
}

impl Writable<ToServer> for OnPlayerEditAttachedObject {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u32(self.response);
        bs.write_u32(self.index);
        self.slot.write(bs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{ObjectMaterials, PlayerAttachments, SlotMask};
    use crate::types::Colour;
    use crate::{decode_packet, encode_packet, encode_packet_with};
    use sanwire_bitstream::{DecodeLimits, NetString, Network};

    fn default_material(model: u16) -> ObjectMaterial {
        ObjectMaterial::Default {
            model,
            txd: NetString::from("none"),
            texture: NetString::from("none"),
            colour: Colour::WHITE,
        }
    }

    fn plain_object() -> CreateObject {
        CreateObject {
            object_id: 3,
            model: 1337,
            draw_distance: 300.0,
            ..CreateObject::default()
        }
    }

    /// A table whose mask claims more slots than it can serve.
    struct LyingTable(ObjectMaterials);

    impl MaterialTable for LyingTable {
        fn materials_in_use(&self) -> SlotMask {
            SlotMask::from_bits(0xFFFF)
        }

        fn material(&self, slot: usize) -> Option<&ObjectMaterial> {
            self.0.material(slot)
        }
    }

    // =====================================================================
    // CreateObject
    // =====================================================================

    #[test]
    fn test_create_object_without_materials() {
        let bytes = encode_packet_with::<ToClient, _, _>(
            &plain_object(),
            &ObjectMaterials::new(),
            Network::Legacy,
        );
        // id, object, model, pos, rot, distance, collision, 2 attach ids, count
        assert_eq!(bytes.len(), 1 + 2 + 4 + 12 + 12 + 4 + 1 + 4 + 1);
        assert_eq!(&bytes[36..40], &[0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(bytes[40], 0);
    }

    #[test]
    fn test_create_object_sends_every_used_slot() {
        let mut materials = ObjectMaterials::new();
        materials.set(1, default_material(100));
        materials.set(14, default_material(200));
        let bytes = encode_packet_with::<ToClient, _, _>(&plain_object(), &materials, Network::Legacy);
        assert_eq!(bytes[40], 2);
        assert_eq!(&bytes[41..43], &[1, 1]);
        let second = 43 + 2 + 5 + 5 + 4;
        assert_eq!(&bytes[second..second + 2], &[1, 14]);
    }

    #[test]
    fn test_create_object_count_matches_records() {
        let mut inner = ObjectMaterials::new();
        inner.set(2, default_material(5));
        let table = LyingTable(inner);
        let bytes = encode_packet_with::<ToClient, _, _>(&plain_object(), &table, Network::Legacy);
        assert_eq!(bytes[40], 1);
        assert_eq!(bytes.len(), 41 + 2 + 2 + 5 + 5 + 4);
    }

    #[test]
    fn test_create_object_attachment_block() {
        let mut object = plain_object();
        object.attachment = Some(ObjectAttachment {
            target: AttachedTo::Object(12),
            offset: Vec3::Z,
            rotation: Vec3::ZERO,
            sync_rotation: true,
        });
        let bytes = encode_packet_with::<ToClient, _, _>(&object, &ObjectMaterials::new(), Network::Legacy);
        assert_eq!(&bytes[36..40], &[0xFF, 0xFF, 12, 0]);
        assert_eq!(bytes.len(), 41 + 12 + 12 + 1);
        assert_eq!(bytes[40 + 24], 1);
    }

    // =====================================================================
    // Attachments
    // =====================================================================

    #[test]
    fn test_attached_object_empty_slot_is_removal() {
        let packet = SetPlayerAttachedObject {
            player_id: 1,
            index: 4,
            create: true,
        };
        let bytes =
            encode_packet_with::<ToClient, _, _>(&packet, &PlayerAttachments::new(), Network::Legacy);
        assert_eq!(bytes, vec![113, 1, 0, 4, 0, 0, 0, 0]);
    }

    #[test]
    fn test_attached_object_writes_slot() {
        let mut attachments = PlayerAttachments::new();
        attachments.set(4, AttachmentSlot::default());
        let packet = SetPlayerAttachedObject {
            player_id: 1,
            index: 4,
            create: true,
        };
        let bytes = encode_packet_with::<ToClient, _, _>(&packet, &attachments, Network::Legacy);
        // header bits: 8 + 16 + 32 + 1, then 4 + 4 + 36 + 8 bytes of slot
        assert_eq!(bytes.len(), (57 + 52 * 8 + 7) / 8);
    }

    #[test]
    fn test_edit_attached_object_round_trip() {
        let edit = OnPlayerEditAttachedObject {
            response: 1,
            index: 2,
            slot: AttachmentSlot {
                model: 19_006,
                bone: 2,
                colour1: Colour::new(0xAA, 0, 0, 0xFF),
                ..AttachmentSlot::default()
            },
        };
        let bytes = encode_packet::<ToServer, _>(&edit, Network::Legacy);
        let decoded: OnPlayerEditAttachedObject =
            decode_packet::<ToServer, _>(&bytes, DecodeLimits::default()).unwrap();
        assert_eq!(decoded, edit);
    }

    #[test]
    fn test_single_material_layout() {
        let packet = SetPlayerObjectMaterial {
            object_id: 0x0102,
            slot: 3,
        };
        let bytes = encode_packet_with::<ToClient, _, _>(&packet, &default_material(9), Network::Legacy);
        assert_eq!(&bytes[..6], &[84, 0x02, 0x01, 1, 3, 9]);
    }
}
