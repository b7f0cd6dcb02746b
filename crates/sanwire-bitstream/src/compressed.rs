//! Compressed encodings used by the sync packets.
//!
//! Three encodings trade precision for bits:
//!
//! | kind | wire size | precision |
//! |---|---|---|
//! | sync vector | 32 bits, or 80 when non-zero | ~1/32767 of the magnitude |
//! | quaternion | 4 bits + 48 bits | ~1/65535 per packed component |
//! | health + armour | 16 bits | ~0.4 points |
//!
//! The layouts are fixed by the legacy client. Loss is part of the
//! format and must not be corrected on either side.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::{BitReader, BitWriter, BitstreamResult, ValueKind};

// ---------------------------------------------------------------------------
// Sync vector
// ---------------------------------------------------------------------------

const UNIT_BIAS: f32 = 32767.5;

fn bias_unit(c: f32) -> u16 {
    ((c.clamp(-1.0, 1.0) + 1.0) * UNIT_BIAS) as u16
}

fn unbias_unit(q: u16) -> f32 {
    f32::from(q) / UNIT_BIAS - 1.0
}

impl BitWriter {
    /// Magnitude as a float, then the unit direction as three biased
    /// `u16`s. The direction is omitted for a zero vector.
    pub fn write_vec3_sync(&mut self, v: Vec3) {
        let magnitude = v.length();
        self.write_f32(magnitude);
        if magnitude > 0.0 {
            let unit = v / magnitude;
            self.write_u16(bias_unit(unit.x));
            self.write_u16(bias_unit(unit.y));
            self.write_u16(bias_unit(unit.z));
        }
    }

    /// Sign bits for w, x, y, z followed by `|x|`, `|y|`, `|z|` scaled to
    /// `u16`. The reader rebuilds `|w|` from the unit-length constraint.
    pub fn write_compressed_quat(&mut self, q: Quat) {
        self.write_bit(q.w < 0.0);
        self.write_bit(q.x < 0.0);
        self.write_bit(q.y < 0.0);
        self.write_bit(q.z < 0.0);
        self.write_u16(quantize_abs(q.x));
        self.write_u16(quantize_abs(q.y));
        self.write_u16(quantize_abs(q.z));
    }

    pub fn write_health_armour(&mut self, value: HealthArmour) {
        self.write_u16(value.pack());
    }
}

impl BitReader<'_> {
    pub fn read_vec3_sync(&mut self) -> BitstreamResult<Vec3> {
        self.ensure(ValueKind::Vec3Sync, 32)?;
        let magnitude = self.read_f32()?;
        if magnitude.is_nan() || magnitude <= 0.0 {
            return Ok(Vec3::ZERO);
        }
        self.ensure(ValueKind::Vec3Sync, 48)?;
        let unit = Vec3::new(
            unbias_unit(self.read_u16()?),
            unbias_unit(self.read_u16()?),
            unbias_unit(self.read_u16()?),
        );
        Ok(unit * magnitude)
    }

    pub fn read_compressed_quat(&mut self) -> BitstreamResult<Quat> {
        self.ensure(ValueKind::CompressedQuat, 52)?;
        let w_neg = self.read_bit()?;
        let x_neg = self.read_bit()?;
        let y_neg = self.read_bit()?;
        let z_neg = self.read_bit()?;
        let x = apply_sign(dequantize(self.read_u16()?), x_neg);
        let y = apply_sign(dequantize(self.read_u16()?), y_neg);
        let z = apply_sign(dequantize(self.read_u16()?), z_neg);
        let w = (1.0 - x * x - y * y - z * z).max(0.0).sqrt();
        Ok(Quat::from_xyzw(x, y, z, apply_sign(w, w_neg)))
    }

    pub fn read_health_armour(&mut self) -> BitstreamResult<HealthArmour> {
        self.ensure(ValueKind::CompressedHealthArmour, 16)?;
        Ok(HealthArmour::unpack(self.read_u16()?))
    }
}

// ---------------------------------------------------------------------------
// Quaternion helpers
// ---------------------------------------------------------------------------

fn quantize_abs(c: f32) -> u16 {
    (c.abs().min(1.0) * 65535.0) as u16
}

fn dequantize(q: u16) -> f32 {
    f32::from(q) / 65535.0
}

fn apply_sign(v: f32, negative: bool) -> f32 {
    if negative { -v } else { v }
}

// ---------------------------------------------------------------------------
// HealthArmour
// ---------------------------------------------------------------------------

/// A player's health and armour as carried by sync broadcasts.
///
/// Each value is clamped to `0..=100` and scaled to one byte
/// (`round(v * 2.55)`); health is the low byte of the 16-bit word and
/// armour the high byte. Decoding divides by 2.55, so a round trip is
/// only accurate to about 0.4 points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HealthArmour {
    pub health: f32,
    pub armour: f32,
}

impl HealthArmour {
    const SCALE: f32 = 2.55;

    pub fn new(health: f32, armour: f32) -> Self {
        Self { health, armour }
    }

    fn quantize(v: f32) -> u8 {
        (v.clamp(0.0, 100.0) * Self::SCALE).round() as u8
    }

    /// The 16-bit wire word.
    pub fn pack(self) -> u16 {
        u16::from(Self::quantize(self.health)) | (u16::from(Self::quantize(self.armour)) << 8)
    }

    pub fn unpack(word: u16) -> Self {
        let [health, armour] = word.to_le_bytes();
        Self {
            health: f32::from(health) / Self::SCALE,
            armour: f32::from(armour) / Self::SCALE,
        }
    }
}
