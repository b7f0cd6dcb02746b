//! Side tables borrowed at encode time.
//!
//! Object materials and player attachment slots are owned by the entity
//! pools, not by packets. Packets that need them implement
//! [`WritableWith`](crate::WritableWith) and receive the table as a
//! borrowed argument for the duration of one encode call.

use sanwire_bitstream::{BitReader, BitWriter, BitstreamResult, NetString, Vec3, Width};
use serde::{Deserialize, Serialize};

use crate::types::{Colour, MAX_ATTACHED_OBJECT_SLOTS, MAX_OBJECT_MATERIAL_SLOTS};

// ---------------------------------------------------------------------------
// SlotMask
// ---------------------------------------------------------------------------

/// Bit set over the sixteen object material slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotMask(u16);

impl SlotMask {
    pub const EMPTY: Self = Self(0);

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Marks `slot` as in use. Slots past the last one are ignored.
    pub fn set(&mut self, slot: usize) {
        if slot < MAX_OBJECT_MATERIAL_SLOTS {
            self.0 |= 1 << slot;
        }
    }

    pub fn clear(&mut self, slot: usize) {
        if slot < MAX_OBJECT_MATERIAL_SLOTS {
            self.0 &= !(1 << slot);
        }
    }

    pub fn contains(self, slot: usize) -> bool {
        slot < MAX_OBJECT_MATERIAL_SLOTS && self.0 & (1 << slot) != 0
    }

    pub fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Set slots in ascending order.
    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..MAX_OBJECT_MATERIAL_SLOTS).filter(move |&slot| self.contains(slot))
    }
}

// ---------------------------------------------------------------------------
// Object materials
// ---------------------------------------------------------------------------

/// One material override on an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectMaterial {
    /// Retexture from a texture dictionary.
    Default {
        model: u16,
        txd: NetString,
        texture: NetString,
        colour: Colour,
    },
    /// Render text onto the surface.
    Text {
        text: NetString,
        material_size: u8,
        font: NetString,
        font_size: u8,
        bold: bool,
        font_colour: Colour,
        background_colour: Colour,
        alignment: u8,
    },
}

impl ObjectMaterial {
    /// The type byte that precedes the slot index on the wire.
    pub fn wire_type(&self) -> u8 {
        match self {
            Self::Default { .. } => 1,
            Self::Text { .. } => 2,
        }
    }

    /// Writes `type`, `slot`, then the type-specific body.
    pub(crate) fn write_slot(&self, bs: &mut BitWriter, slot: u8) {
        bs.write_u8(self.wire_type());
        bs.write_u8(slot);
        match self {
            Self::Default {
                model,
                txd,
                texture,
                colour,
            } => {
                bs.write_u16(*model);
                bs.write_dynamic_str(txd.as_bytes(), Width::U8);
                bs.write_dynamic_str(texture.as_bytes(), Width::U8);
                bs.write_u32(colour.argb());
            }
            Self::Text {
                text,
                material_size,
                font,
                font_size,
                bold,
                font_colour,
                background_colour,
                alignment,
            } => {
                bs.write_u8(*material_size);
                bs.write_dynamic_str(font.as_bytes(), Width::U8);
                bs.write_u8(*font_size);
                bs.write_u8(u8::from(*bold));
                bs.write_u32(font_colour.argb());
                bs.write_u32(background_colour.argb());
                bs.write_u8(*alignment);
                bs.write_compressed_str(text.as_bytes());
            }
        }
    }
}

/// Read access to one object's material slots.
pub trait MaterialTable {
    fn materials_in_use(&self) -> SlotMask;
    fn material(&self, slot: usize) -> Option<&ObjectMaterial>;
}

/// A plain material table holding every slot inline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectMaterials {
    slots: [Option<ObjectMaterial>; MAX_OBJECT_MATERIAL_SLOTS],
}

impl ObjectMaterials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `material` in `slot`. Returns `false` if `slot` is out of range.
    pub fn set(&mut self, slot: usize, material: ObjectMaterial) -> bool {
        match self.slots.get_mut(slot) {
            Some(entry) => {
                *entry = Some(material);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, slot: usize) -> Option<ObjectMaterial> {
        self.slots.get_mut(slot).and_then(Option::take)
    }
}

impl MaterialTable for ObjectMaterials {
    fn materials_in_use(&self) -> SlotMask {
        let mut mask = SlotMask::EMPTY;
        for (slot, entry) in self.slots.iter().enumerate() {
            if entry.is_some() {
                mask.set(slot);
            }
        }
        mask
    }

    fn material(&self, slot: usize) -> Option<&ObjectMaterial> {
        self.slots.get(slot)?.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Attachment slots
// ---------------------------------------------------------------------------

/// An object attached to a player bone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentSlot {
    pub model: u32,
    pub bone: u32,
    pub offset: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub colour1: Colour,
    pub colour2: Colour,
}

impl Default for AttachmentSlot {
    fn default() -> Self {
        Self {
            model: 0,
            bone: 0,
            offset: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            colour1: Colour::default(),
            colour2: Colour::default(),
        }
    }
}

impl AttachmentSlot {
    pub(crate) fn write(&self, bs: &mut BitWriter) {
        bs.write_u32(self.model);
        bs.write_u32(self.bone);
        bs.write_vec3(self.offset);
        bs.write_vec3(self.rotation);
        bs.write_vec3(self.scale);
        bs.write_u32(self.colour1.argb());
        bs.write_u32(self.colour2.argb());
    }

    pub(crate) fn read(bs: &mut BitReader<'_>) -> BitstreamResult<Self> {
        Ok(Self {
            model: bs.read_u32()?,
            bone: bs.read_u32()?,
            offset: bs.read_vec3()?,
            rotation: bs.read_vec3()?,
            scale: bs.read_vec3()?,
            colour1: Colour::from_argb(bs.read_u32()?),
            colour2: Colour::from_argb(bs.read_u32()?),
        })
    }
}

/// Read access to one player's attachment slots.
pub trait AttachmentTable {
    fn slot(&self, index: usize) -> Option<&AttachmentSlot>;
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerAttachments {
    slots: [Option<AttachmentSlot>; MAX_ATTACHED_OBJECT_SLOTS],
}

impl PlayerAttachments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `slot` at `index`. Returns `false` if `index` is out of range.
    pub fn set(&mut self, index: usize, slot: AttachmentSlot) -> bool {
        match self.slots.get_mut(index) {
            Some(entry) => {
                *entry = Some(slot);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<AttachmentSlot> {
        self.slots.get_mut(index).and_then(Option::take)
    }
}

impl AttachmentTable for PlayerAttachments {
    fn slot(&self, index: usize) -> Option<&AttachmentSlot> {
        self.slots.get(index)?.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanwire_bitstream::Network;

    fn text_material(text: &str) -> ObjectMaterial {
        ObjectMaterial::Text {
            text: NetString::from(text),
            material_size: 90,
            font: NetString::from("Arial"),
            font_size: 24,
            bold: true,
            font_colour: Colour::WHITE,
            background_colour: Colour::new(0, 0, 0, 0xFF),
            alignment: 1,
        }
    }

    // =====================================================================
    // SlotMask
    // =====================================================================

    #[test]
    fn test_slot_mask_set_and_iter() {
        let mut mask = SlotMask::EMPTY;
        mask.set(0);
        mask.set(5);
        mask.set(15);
        mask.set(16);
        assert_eq!(mask.count(), 3);
        assert!(mask.contains(5));
        assert!(!mask.contains(16));
        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![0, 5, 15]);
        mask.clear(5);
        assert_eq!(mask.bits(), 0x8001);
    }

    // =====================================================================
    // Tables
    // =====================================================================

    #[test]
    fn test_material_table_mask_tracks_slots() {
        let mut materials = ObjectMaterials::new();
        assert!(materials.set(3, text_material("hi")));
        assert!(materials.set(12, text_material("there")));
        assert!(!materials.set(16, text_material("nope")));
        assert_eq!(materials.materials_in_use().iter().collect::<Vec<_>>(), vec![3, 12]);
        assert!(materials.remove(3).is_some());
        assert!(materials.material(3).is_none());
        assert_eq!(materials.materials_in_use().count(), 1);
    }

    #[test]
    fn test_attachment_table_bounds() {
        let mut attachments = PlayerAttachments::new();
        assert!(attachments.set(9, AttachmentSlot::default()));
        assert!(!attachments.set(10, AttachmentSlot::default()));
        assert!(attachments.slot(9).is_some());
        assert!(attachments.slot(10).is_none());
    }

    // =====================================================================
    // Wire layout
    // =====================================================================

    #[test]
    fn test_default_material_layout() {
        let material = ObjectMaterial::Default {
            model: 19_341,
            txd: NetString::from("ab"),
            texture: NetString::from("c"),
            colour: Colour::new(0x11, 0x22, 0x33, 0x44),
        };
        let mut bs = BitWriter::new(Network::Legacy);
        material.write_slot(&mut bs, 7);
        let [lo, hi] = 19_341u16.to_le_bytes();
        assert_eq!(
            bs.into_bytes(),
            vec![1, 7, lo, hi, 2, b'a', b'b', 1, b'c', 0x33, 0x22, 0x11, 0x44]
        );
    }

    #[test]
    fn test_attachment_slot_round_trip() {
        let slot = AttachmentSlot {
            model: 18_645,
            bone: 2,
            offset: Vec3::new(0.1, 0.0, -0.05),
            rotation: Vec3::new(0.0, 90.0, 0.0),
            scale: Vec3::splat(1.2),
            colour1: Colour::new(1, 2, 3, 4),
            colour2: Colour::WHITE,
        };
        let mut bs = BitWriter::new(Network::Legacy);
        slot.write(&mut bs);
        let bytes = bs.into_bytes();
        let mut r = BitReader::new(&bytes);
        assert_eq!(AttachmentSlot::read(&mut r).unwrap(), slot);
        assert!(r.is_exhausted());
    }
}
