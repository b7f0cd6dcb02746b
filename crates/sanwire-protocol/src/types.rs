//! Shared wire types: colours, pool sizes, and split id spaces.
//!
//! Several packets address entities from two pools through one 16-bit id.
//! The lower pool occupies `[0, boundary)`, the upper pool the range
//! after it. The boundaries are fixed by the legacy client and are part
//! of the schema, not configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Pool sizes and sentinels
// ---------------------------------------------------------------------------

pub const VEHICLE_POOL_SIZE: u16 = 2000;
pub const OBJECT_POOL_SIZE: u16 = 1000;
pub const TEXT_LABEL_POOL_SIZE: u16 = 1024;
pub const GLOBAL_TEXTDRAW_POOL_SIZE: u16 = 2048;

pub const INVALID_PLAYER_ID: u16 = 0xFFFF;
pub const INVALID_VEHICLE_ID: u16 = 0xFFFF;
pub const INVALID_OBJECT_ID: u16 = 0xFFFF;
pub const INVALID_TEXTDRAW_ID: u16 = 0xFFFF;
pub const INVALID_TEXT_LABEL_ID: u16 = 0xFFFF;

pub const MAX_OBJECT_MATERIAL_SLOTS: usize = 16;
pub const MAX_ATTACHED_OBJECT_SLOTS: usize = 10;
pub const MAX_MENU_ITEMS: usize = 12;
pub const MAX_MENU_TEXT_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Colour
// ---------------------------------------------------------------------------

/// An 8-bit-per-channel colour.
///
/// Different packets pack the channels in different orders, so the
/// colour is stored unpacked and converted at the field site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    pub const WHITE: Self = Self::new(0xFF, 0xFF, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgba(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }

    pub const fn argb(self) -> u32 {
        u32::from_be_bytes([self.a, self.r, self.g, self.b])
    }

    pub const fn abgr(self) -> u32 {
        u32::from_be_bytes([self.a, self.b, self.g, self.r])
    }

    pub const fn from_rgba(word: u32) -> Self {
        let [r, g, b, a] = word.to_be_bytes();
        Self { r, g, b, a }
    }

    pub const fn from_argb(word: u32) -> Self {
        let [a, r, g, b] = word.to_be_bytes();
        Self { r, g, b, a }
    }

    pub const fn from_abgr(word: u32) -> Self {
        let [a, b, g, r] = word.to_be_bytes();
        Self { r, g, b, a }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.rgba())
    }
}

// ---------------------------------------------------------------------------
// SplitIdSpace
// ---------------------------------------------------------------------------

/// Which half of a split id space an id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdSlot {
    Lower(u16),
    Upper(u16),
}

/// One 16-bit id space shared by two pools.
///
/// Ids below `boundary` belong to the lower pool as-is. The next
/// `upper_len` ids belong to the upper pool, offset by `boundary`.
/// Anything beyond resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitIdSpace {
    pub boundary: u16,
    pub upper_len: u16,
}

impl SplitIdSpace {
    pub const fn new(boundary: u16, upper_len: u16) -> Self {
        Self {
            boundary,
            upper_len,
        }
    }

    pub fn resolve(self, wire: u16) -> Option<IdSlot> {
        if wire < self.boundary {
            Some(IdSlot::Lower(wire))
        } else if u32::from(wire) < u32::from(self.boundary) + u32::from(self.upper_len) {
            Some(IdSlot::Upper(wire - self.boundary))
        } else {
            None
        }
    }

    /// The wire id for `slot`, or `None` if the id is outside its pool.
    pub fn join(self, slot: IdSlot) -> Option<u16> {
        match slot {
            IdSlot::Lower(id) if id < self.boundary => Some(id),
            IdSlot::Upper(id) if id < self.upper_len => self.boundary.checked_add(id),
            _ => None,
        }
    }
}

/// Surfing subjects: vehicles below the boundary, objects after it.
pub const SURFING_ID_SPACE: SplitIdSpace = SplitIdSpace::new(VEHICLE_POOL_SIZE, OBJECT_POOL_SIZE);

/// Text labels: global labels below the boundary, per-player after it.
pub const TEXT_LABEL_ID_SPACE: SplitIdSpace =
    SplitIdSpace::new(TEXT_LABEL_POOL_SIZE, u16::MAX - TEXT_LABEL_POOL_SIZE);

/// Text draws: global draws below the boundary, per-player after it.
/// `0xFFFF` is reserved as the invalid id.
pub const TEXTDRAW_ID_SPACE: SplitIdSpace =
    SplitIdSpace::new(GLOBAL_TEXTDRAW_POOL_SIZE, INVALID_TEXTDRAW_ID - GLOBAL_TEXTDRAW_POOL_SIZE);

// ---------------------------------------------------------------------------
// Typed ids over split spaces
// ---------------------------------------------------------------------------

/// What a player is standing on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SurfTarget {
    #[default]
    None,
    Vehicle(u16),
    Object(u16),
}

impl SurfTarget {
    pub fn from_wire(wire: u16) -> Self {
        match SURFING_ID_SPACE.resolve(wire) {
            Some(IdSlot::Lower(id)) => Self::Vehicle(id),
            Some(IdSlot::Upper(id)) => Self::Object(id),
            None => Self::None,
        }
    }

    /// The shared wire id.
    ///
    /// `None` and ids outside their pool encode as [`INVALID_VEHICLE_ID`].
    pub fn to_wire(self) -> u16 {
        let slot = match self {
            Self::None => return INVALID_VEHICLE_ID,
            Self::Vehicle(id) => IdSlot::Lower(id),
            Self::Object(id) => IdSlot::Upper(id),
        };
        SURFING_ID_SPACE.join(slot).unwrap_or(INVALID_VEHICLE_ID)
    }

    pub fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

/// A text label, global or owned by one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextLabelId {
    Global(u16),
    PerPlayer(u16),
}

impl TextLabelId {
    /// Ids outside their pool encode as [`INVALID_TEXT_LABEL_ID`].
    pub fn to_wire(self) -> u16 {
        let slot = match self {
            Self::Global(id) => IdSlot::Lower(id),
            Self::PerPlayer(id) => IdSlot::Upper(id),
        };
        TEXT_LABEL_ID_SPACE.join(slot).unwrap_or(INVALID_TEXT_LABEL_ID)
    }

    pub fn from_wire(wire: u16) -> Option<Self> {
        match TEXT_LABEL_ID_SPACE.resolve(wire)? {
            IdSlot::Lower(id) => Some(Self::Global(id)),
            IdSlot::Upper(id) => Some(Self::PerPlayer(id)),
        }
    }
}

/// A text draw, global or owned by one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextDrawId {
    Global(u16),
    PerPlayer(u16),
}

impl TextDrawId {
    /// Ids outside their pool encode as [`INVALID_TEXTDRAW_ID`].
    pub fn to_wire(self) -> u16 {
        let slot = match self {
            Self::Global(id) => IdSlot::Lower(id),
            Self::PerPlayer(id) => IdSlot::Upper(id),
        };
        TEXTDRAW_ID_SPACE.join(slot).unwrap_or(INVALID_TEXTDRAW_ID)
    }

    /// `None` for [`INVALID_TEXTDRAW_ID`].
    pub fn from_wire(wire: u16) -> Option<Self> {
        match TEXTDRAW_ID_SPACE.resolve(wire)? {
            IdSlot::Lower(id) => Some(Self::Global(id)),
            IdSlot::Upper(id) => Some(Self::PerPlayer(id)),
        }
    }
}
