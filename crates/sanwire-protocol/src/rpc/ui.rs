//! Text labels, text draws, menus, and other screen widgets.

use sanwire_bitstream::{BitReader, BitWriter, NetString, Vec2, Vec3, Width};
use serde::{Deserialize, Serialize};

use crate::packet::impl_packet;
use crate::types::{
    Colour, INVALID_TEXTDRAW_ID, MAX_MENU_ITEMS, MAX_MENU_TEXT_LENGTH, TextDrawId, TextLabelId,
};
use crate::{ProtocolResult, Readable, ToClient, ToServer, Writable};

// ---------------------------------------------------------------------------
// 3D text labels
// ---------------------------------------------------------------------------

/// Server → client: show a 3D text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerShowTextLabel {
    pub label: TextLabelId,
    pub colour: Colour,
    pub position: Vec3,
    pub draw_distance: f32,
    pub line_of_sight: bool,
    pub attached_player: u16,
    pub attached_vehicle: u16,
    pub text: NetString,
}
impl_packet!(PlayerShowTextLabel, 36);

impl Writable<ToClient> for PlayerShowTextLabel {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.label.to_wire());
        bs.write_u32(self.colour.rgba());
        bs.write_vec3(self.position);
        bs.write_f32(self.draw_distance);
        bs.write_u8(u8::from(self.line_of_sight));
        bs.write_u16(self.attached_player);
        bs.write_u16(self.attached_vehicle);
        bs.write_compressed_str(self.text.as_bytes());
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerHideTextLabel {
    pub label: TextLabelId,
}
impl_packet!(PlayerHideTextLabel, 58);

impl Writable<ToClient> for PlayerHideTextLabel {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.label.to_wire());
    }
}

// ---------------------------------------------------------------------------
// Text draws
// ---------------------------------------------------------------------------

/// Server → client: show a 2D text draw.
///
/// Colours are packed ABGR. `use_box`, `alignment`, and `proportional`
/// share one flags byte at bits 0, 1, and 4.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerShowTextDraw {
    pub text_draw: TextDrawId,
    pub use_box: bool,
    pub alignment: bool,
    pub proportional: bool,
    pub letter_size: Vec2,
    pub letter_colour: Colour,
    pub text_size: Vec2,
    pub box_colour: Colour,
    pub shadow: u8,
    pub outline: u8,
    pub back_colour: Colour,
    pub style: u8,
    pub selectable: bool,
    pub position: Vec2,
    pub model: u16,
    pub rotation: Vec3,
    pub zoom: f32,
    pub colour1: i16,
    pub colour2: i16,
    pub text: NetString,
}
impl_packet!(PlayerShowTextDraw, 134);

impl PlayerShowTextDraw {
    pub fn flags(&self) -> u8 {
        u8::from(self.use_box) | u8::from(self.alignment) << 1 | u8::from(self.proportional) << 4
    }
}

impl Writable<ToClient> for PlayerShowTextDraw {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.text_draw.to_wire());
        bs.write_u8(self.flags());
        bs.write_vec2(self.letter_size);
        bs.write_u32(self.letter_colour.abgr());
        bs.write_vec2(self.text_size);
        bs.write_u32(self.box_colour.abgr());
        bs.write_u8(self.shadow);
        bs.write_u8(self.outline);
        bs.write_u32(self.back_colour.abgr());
        bs.write_u8(self.style);
        bs.write_u8(u8::from(self.selectable));
        bs.write_vec2(self.position);
        bs.write_u16(self.model);
        bs.write_vec3(self.rotation);
        bs.write_f32(self.zoom);
        bs.write_i16(self.colour1);
        bs.write_i16(self.colour2);
        bs.write_dynamic_str(self.text.as_bytes(), Width::U16);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerHideTextDraw {
    pub text_draw: TextDrawId,
}
impl_packet!(PlayerHideTextDraw, 135);

impl Writable<ToClient> for PlayerHideTextDraw {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.text_draw.to_wire());
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerTextDrawSetString {
    pub text_draw: TextDrawId,
    pub text: NetString,
}
impl_packet!(PlayerTextDrawSetString, 105);

impl Writable<ToClient> for PlayerTextDrawSetString {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.text_draw.to_wire());
        bs.write_dynamic_str(self.text.as_bytes(), Width::U16);
    }
}

/// Server → client: toggle text draw selection with a hover colour.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerBeginTextDrawSelect {
    pub enable: bool,
    pub colour: Colour,
}
impl_packet!(PlayerBeginTextDrawSelect, 83);

impl Writable<ToClient> for PlayerBeginTextDrawSelect {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_bit(self.enable);
        bs.write_u32(self.colour.rgba());
    }
}

/// Client → server: the player clicked a text draw, or cancelled.
///
/// `None` means selection was cancelled (wire id `0xFFFF`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OnPlayerSelectTextDraw {
    pub text_draw: Option<TextDrawId>,
}
impl_packet!(OnPlayerSelectTextDraw, 83);

impl Readable<ToServer> for OnPlayerSelectTextDraw {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            text_draw: TextDrawId::from_wire(bs.read_u16()?),
        })
    }
}

impl Writable<ToServer> for OnPlayerSelectTextDraw {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u16(self.text_draw.map_or(INVALID_TEXTDRAW_ID, TextDrawId::to_wire));
    }
}

// ---------------------------------------------------------------------------
// Menus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MenuColumn {
    pub header: NetString,
    pub items: Vec<NetString>,
}

impl MenuColumn {
    /// Header, item count, then each item, all text fixed-width.
    /// Items past [`MAX_MENU_ITEMS`] are dropped.
    fn write(&self, bs: &mut BitWriter) {
        bs.write_fixed_str(self.header.as_bytes(), MAX_MENU_TEXT_LENGTH);
        let count = self.items.len().min(MAX_MENU_ITEMS);
        bs.write_u8(count as u8);
        for item in &self.items[..count] {
            bs.write_fixed_str(item.as_bytes(), MAX_MENU_TEXT_LENGTH);
        }
    }
}

/// Server → client: define a menu.
///
/// The second column width and data are only sent when `second` is set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerInitMenu {
    pub menu_id: u8,
    pub title: NetString,
    pub position: Vec2,
    pub first_width: f32,
    pub second_width: f32,
    pub enabled: bool,
    pub row_enabled: [bool; MAX_MENU_ITEMS],
    pub first: MenuColumn,
    pub second: Option<MenuColumn>,
}
impl_packet!(PlayerInitMenu, 76);

impl Writable<ToClient> for PlayerInitMenu {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(self.menu_id);
        bs.write_u32(u32::from(self.second.is_some()));
        bs.write_fixed_str(self.title.as_bytes(), MAX_MENU_TEXT_LENGTH);
        bs.write_vec2(self.position);
        bs.write_f32(self.first_width);
        if self.second.is_some() {
            bs.write_f32(self.second_width);
        }
        bs.write_u32(u32::from(self.enabled));
        for &row in &self.row_enabled {
            bs.write_u32(u32::from(row));
        }
        self.first.write(bs);
        if let Some(second) = &self.second {
            second.write(bs);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerShowMenu {
    pub menu_id: u8,
}
impl_packet!(PlayerShowMenu, 77);

impl Writable<ToClient> for PlayerShowMenu {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(self.menu_id);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerHideMenu {
    pub menu_id: u8,
}
impl_packet!(PlayerHideMenu, 78);

impl Writable<ToClient> for PlayerHideMenu {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(self.menu_id);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OnPlayerSelectedMenuRow {
    pub row: u8,
}
impl_packet!(OnPlayerSelectedMenuRow, 132);

impl Readable<ToServer> for OnPlayerSelectedMenuRow {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self { row: bs.read_u8()? })
    }
}

impl Writable<ToServer> for OnPlayerSelectedMenuRow {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_u8(self.row);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OnPlayerExitedMenu;
impl_packet!(OnPlayerExitedMenu, 140);

impl Readable<ToServer> for OnPlayerExitedMenu {
    fn read(_bs: &mut BitReader<'_>) -> ProtocolResult<Self> {
        Ok(Self)
    }
}

impl Writable<ToServer> for OnPlayerExitedMenu {
    fn write(&self, _bs: &mut BitWriter) {}
}

// ---------------------------------------------------------------------------
// Misc
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ToggleWidescreen {
    pub enable: bool,
}
impl_packet!(ToggleWidescreen, 111);

impl Writable<ToClient> for ToggleWidescreen {
    fn write(&self, bs: &mut BitWriter) {
        bs.write_bit(self.enable);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GLOBAL_TEXTDRAW_POOL_SIZE, INVALID_TEXT_LABEL_ID, TEXT_LABEL_POOL_SIZE};
    use crate::{decode_packet, encode_packet};
    use sanwire_bitstream::{BitstreamResult, DecodeLimits, Framing, Network, StringCompression};

    fn text_draw(id: TextDrawId) -> PlayerShowTextDraw {
        PlayerShowTextDraw {
            text_draw: id,
            use_box: true,
            alignment: false,
            proportional: true,
            letter_size: Vec2::new(0.5, 1.0),
            letter_colour: Colour::WHITE,
            text_size: Vec2::new(640.0, 480.0),
            box_colour: Colour::new(0, 0, 0, 0x80),
            shadow: 1,
            outline: 0,
            back_colour: Colour::new(0, 0, 0, 0xFF),
            style: 1,
            selectable: false,
            position: Vec2::new(320.0, 10.0),
            model: 0,
            rotation: Vec3::ZERO,
            zoom: 1.0,
            colour1: -1,
            colour2: -1,
            text: NetString::from("~r~hello"),
        }
    }

    // =====================================================================
    // Id spaces on the wire
    // =====================================================================

    #[test]
    fn test_per_player_label_id_is_offset() {
        let bytes = encode_packet::<ToClient, _>(
            &PlayerHideTextLabel {
                label: TextLabelId::PerPlayer(2),
            },
            Network::Legacy,
        );
        assert_eq!(bytes[1..], (TEXT_LABEL_POOL_SIZE + 2).to_le_bytes());
    }

    #[test]
    fn test_out_of_pool_label_id_is_invalid_on_wire() {
        let bytes = encode_packet::<ToClient, _>(
            &PlayerHideTextLabel {
                label: TextLabelId::Global(TEXT_LABEL_POOL_SIZE + 5),
            },
            Network::Legacy,
        );
        assert_eq!(bytes[1..], INVALID_TEXT_LABEL_ID.to_le_bytes());
    }

    #[test]
    fn test_text_label_uses_framing_table() {
        #[derive(Debug)]
        struct Raw;

        impl StringCompression for Raw {
            fn name(&self) -> &'static str {
                "raw"
            }

            fn version(&self) -> u32 {
                1
            }

            fn compress(&self, input: &[u8], bs: &mut BitWriter) {
                bs.write_bytes(input);
            }

            fn decompress(&self, bs: &mut BitReader<'_>, _max_len: usize) -> BitstreamResult<Vec<u8>> {
                bs.read_bytes(bs.remaining_bits() / 8)
            }
        }
        static RAW: Raw = Raw;

        let label = PlayerShowTextLabel {
            label: TextLabelId::Global(1),
            colour: Colour::WHITE,
            position: Vec3::ZERO,
            draw_distance: 20.0,
            line_of_sight: false,
            attached_player: 0xFFFF,
            attached_vehicle: 0xFFFF,
            text: NetString::from("Los Santos"),
        };
        let default = encode_packet::<ToClient, _>(&label, Network::Legacy);
        let raw = encode_packet::<ToClient, _>(&label, Framing::new(Network::Legacy).with_strings(&RAW));
        assert!(raw.ends_with(b"Los Santos"));
        assert_ne!(default, raw);
        // Everything before the text is unaffected by the table.
        let head = 1 + 2 + 4 + 12 + 4 + 1 + 2 + 2;
        assert_eq!(default[..head], raw[..head]);
    }

    #[test]
    fn test_text_draw_flags_and_id() {
        let draw = text_draw(TextDrawId::PerPlayer(1));
        assert_eq!(draw.flags(), 0b1_0001);
        let bytes = encode_packet::<ToClient, _>(&draw, Network::Legacy);
        assert_eq!(bytes[1..3], (GLOBAL_TEXTDRAW_POOL_SIZE + 1).to_le_bytes());
        assert_eq!(bytes[3], 0b1_0001);
        assert_eq!(&bytes[bytes.len() - 8..], b"~r~hello");
    }

    #[test]
    fn test_select_text_draw_cancel() {
        let decoded: OnPlayerSelectTextDraw =
            decode_packet::<ToServer, _>(&[83, 0xFF, 0xFF], DecodeLimits::default()).unwrap();
        assert_eq!(decoded.text_draw, None);
    }

    #[test]
    fn test_select_text_draw_round_trip() {
        for id in [TextDrawId::Global(0), TextDrawId::PerPlayer(255)] {
            let packet = OnPlayerSelectTextDraw {
                text_draw: Some(id),
            };
            let bytes = encode_packet::<ToServer, _>(&packet, Network::Legacy);
            let decoded: OnPlayerSelectTextDraw =
                decode_packet::<ToServer, _>(&bytes, DecodeLimits::default()).unwrap();
            assert_eq!(decoded, packet);
        }
    }

    // =====================================================================
    // Menus
    // =====================================================================

    fn menu(second: Option<MenuColumn>) -> PlayerInitMenu {
        PlayerInitMenu {
            menu_id: 1,
            title: NetString::from("Weapons"),
            first_width: 200.0,
            second_width: 100.0,
            enabled: true,
            row_enabled: [true; MAX_MENU_ITEMS],
            first: MenuColumn {
                header: NetString::from("Item"),
                items: vec![NetString::from("Deagle"), NetString::from("M4")],
            },
            second,
            ..PlayerInitMenu::default()
        }
    }

    #[test]
    fn test_single_column_menu_layout() {
        let bytes = encode_packet::<ToClient, _>(&menu(None), Network::Legacy);
        let header = 1 + 1 + 4 + 32 + 8 + 4 + 4 + 4 * MAX_MENU_ITEMS;
        assert_eq!(bytes.len(), header + 32 + 1 + 2 * 32);
    }

    #[test]
    fn test_two_column_menu_adds_width_and_column() {
        let second = MenuColumn {
            header: NetString::from("Price"),
            items: vec![NetString::from("$500")],
        };
        let one = encode_packet::<ToClient, _>(&menu(None), Network::Legacy);
        let two = encode_packet::<ToClient, _>(&menu(Some(second)), Network::Legacy);
        assert_eq!(two.len(), one.len() + 4 + 32 + 1 + 32);
        assert_eq!(&two[2..6], &[1, 0, 0, 0]);
    }

    #[test]
    fn test_menu_items_are_capped() {
        let mut packet = menu(None);
        packet.first.items = vec![NetString::from("x"); 20];
        let bytes = encode_packet::<ToClient, _>(&packet, Network::Legacy);
        let count_at = 1 + 1 + 4 + 32 + 8 + 4 + 4 + 4 * MAX_MENU_ITEMS + 32;
        assert_eq!(bytes[count_at] as usize, MAX_MENU_ITEMS);
        assert_eq!(bytes.len(), count_at + 1 + MAX_MENU_ITEMS * 32);
    }
}
