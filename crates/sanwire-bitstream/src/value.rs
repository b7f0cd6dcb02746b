//! The closed value model.
//!
//! Every field of every packet is one of the kinds below. There is no
//! in-band type tag on the wire: the kind used to read a field must be
//! the kind that was used to write it, so each schema names its kinds
//! explicitly and every dispatch here is an exhaustive `match`.

use std::fmt;

use glam::{Quat, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::{BitReader, BitWriter, BitstreamResult, HealthArmour, NetString};

// ---------------------------------------------------------------------------
// Width
// ---------------------------------------------------------------------------

/// Bit width of a length prefix or array element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Width {
    U8,
    U16,
    U32,
}

impl Width {
    pub const fn bits(self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::U16 => 16,
            Self::U32 => 32,
        }
    }

    /// Largest length a prefix of this width can express.
    pub const fn max_len(self) -> usize {
        match self {
            Self::U8 => u8::MAX as usize,
            Self::U16 => u16::MAX as usize,
            Self::U32 => u32::MAX as usize,
        }
    }
}

// ---------------------------------------------------------------------------
// ValueKind
// ---------------------------------------------------------------------------

/// The kind of a wire value, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Bit,
    UInt8,
    UInt16,
    UInt32,
    Int16,
    Int32,
    Float32,
    Vec2,
    Vec3,
    /// Magnitude plus biased unit direction; see [`BitWriter::write_vec3_sync`].
    Vec3Sync,
    Vec4,
    CompressedQuat,
    CompressedHealthArmour,
    /// Exactly `n` bytes, NUL padded.
    FixedLengthString(usize),
    /// Length prefix of the given width, then the bytes.
    DynamicLengthString(Width),
    FixedLengthByteArray(usize),
    /// `n` elements of the given width.
    FixedLengthArray(Width, usize),
    CompressedString,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bit => write!(f, "Bit"),
            Self::UInt8 => write!(f, "UInt8"),
            Self::UInt16 => write!(f, "UInt16"),
            Self::UInt32 => write!(f, "UInt32"),
            Self::Int16 => write!(f, "Int16"),
            Self::Int32 => write!(f, "Int32"),
            Self::Float32 => write!(f, "Float32"),
            Self::Vec2 => write!(f, "Vec2"),
            Self::Vec3 => write!(f, "Vec3"),
            Self::Vec3Sync => write!(f, "Vec3Sync"),
            Self::Vec4 => write!(f, "Vec4"),
            Self::CompressedQuat => write!(f, "CompressedQuat"),
            Self::CompressedHealthArmour => write!(f, "CompressedHealthArmour"),
            Self::FixedLengthString(n) => write!(f, "FixedLengthString({n})"),
            Self::DynamicLengthString(w) => write!(f, "DynamicLengthString({})", w.bits()),
            Self::FixedLengthByteArray(n) => write!(f, "FixedLengthByteArray({n})"),
            Self::FixedLengthArray(w, n) => write!(f, "FixedLengthArray({}, {n})", w.bits()),
            Self::CompressedString => write!(f, "CompressedString"),
        }
    }
}

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// Elements of a [`Value::FixedLengthArray`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementArray {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl ElementArray {
    pub fn width(&self) -> Width {
        match self {
            Self::U8(_) => Width::U8,
            Self::U16(_) => Width::U16,
            Self::U32(_) => Width::U32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::U16(v) => v.len(),
            Self::U32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A typed wire value.
///
/// `FixedLengthString` carries its slot size; `DynamicLengthString`
/// carries its prefix width. Array lengths are the lengths of the
/// payload vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Bit(bool),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    Int16(i16),
    Int32(i32),
    Float32(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec3Sync(Vec3),
    Vec4(Vec4),
    CompressedQuat(Quat),
    CompressedHealthArmour(HealthArmour),
    FixedLengthString(usize, NetString),
    DynamicLengthString(Width, NetString),
    FixedLengthByteArray(Vec<u8>),
    FixedLengthArray(ElementArray),
    CompressedString(NetString),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bit(_) => ValueKind::Bit,
            Self::UInt8(_) => ValueKind::UInt8,
            Self::UInt16(_) => ValueKind::UInt16,
            Self::UInt32(_) => ValueKind::UInt32,
            Self::Int16(_) => ValueKind::Int16,
            Self::Int32(_) => ValueKind::Int32,
            Self::Float32(_) => ValueKind::Float32,
            Self::Vec2(_) => ValueKind::Vec2,
            Self::Vec3(_) => ValueKind::Vec3,
            Self::Vec3Sync(_) => ValueKind::Vec3Sync,
            Self::Vec4(_) => ValueKind::Vec4,
            Self::CompressedQuat(_) => ValueKind::CompressedQuat,
            Self::CompressedHealthArmour(_) => ValueKind::CompressedHealthArmour,
            Self::FixedLengthString(n, _) => ValueKind::FixedLengthString(*n),
            Self::DynamicLengthString(w, _) => ValueKind::DynamicLengthString(*w),
            Self::FixedLengthByteArray(v) => ValueKind::FixedLengthByteArray(v.len()),
            Self::FixedLengthArray(a) => ValueKind::FixedLengthArray(a.width(), a.len()),
            Self::CompressedString(_) => ValueKind::CompressedString,
        }
    }
}

impl BitWriter {
    /// Writes any value using its kind's encoding.
    pub fn write_value(&mut self, value: &Value) {
        match value {
            Value::Bit(b) => self.write_bit(*b),
            Value::UInt8(v) => self.write_u8(*v),
            Value::UInt16(v) => self.write_u16(*v),
            Value::UInt32(v) => self.write_u32(*v),
            Value::Int16(v) => self.write_i16(*v),
            Value::Int32(v) => self.write_i32(*v),
            Value::Float32(v) => self.write_f32(*v),
            Value::Vec2(v) => self.write_vec2(*v),
            Value::Vec3(v) => self.write_vec3(*v),
            Value::Vec3Sync(v) => self.write_vec3_sync(*v),
            Value::Vec4(v) => self.write_vec4(*v),
            Value::CompressedQuat(q) => self.write_compressed_quat(*q),
            Value::CompressedHealthArmour(ha) => self.write_health_armour(*ha),
            Value::FixedLengthString(n, s) => self.write_fixed_str(s.as_bytes(), *n),
            Value::DynamicLengthString(w, s) => self.write_dynamic_str(s.as_bytes(), *w),
            Value::FixedLengthByteArray(bytes) => self.write_bytes(bytes),
            Value::FixedLengthArray(ElementArray::U8(v)) => self.write_bytes(v),
            Value::FixedLengthArray(ElementArray::U16(v)) => {
                v.iter().for_each(|&e| self.write_u16(e));
            }
            Value::FixedLengthArray(ElementArray::U32(v)) => {
                v.iter().for_each(|&e| self.write_u32(e));
            }
            Value::CompressedString(s) => self.write_compressed_str(s.as_bytes()),
        }
    }
}

impl BitReader<'_> {
    /// Reads a value of `kind`.
    pub fn read_value(&mut self, kind: ValueKind) -> BitstreamResult<Value> {
        Ok(match kind {
            ValueKind::Bit => Value::Bit(self.read_bit()?),
            ValueKind::UInt8 => Value::UInt8(self.read_u8()?),
            ValueKind::UInt16 => Value::UInt16(self.read_u16()?),
            ValueKind::UInt32 => Value::UInt32(self.read_u32()?),
            ValueKind::Int16 => Value::Int16(self.read_i16()?),
            ValueKind::Int32 => Value::Int32(self.read_i32()?),
            ValueKind::Float32 => Value::Float32(self.read_f32()?),
            ValueKind::Vec2 => Value::Vec2(self.read_vec2()?),
            ValueKind::Vec3 => Value::Vec3(self.read_vec3()?),
            ValueKind::Vec3Sync => Value::Vec3Sync(self.read_vec3_sync()?),
            ValueKind::Vec4 => Value::Vec4(self.read_vec4()?),
            ValueKind::CompressedQuat => Value::CompressedQuat(self.read_compressed_quat()?),
            ValueKind::CompressedHealthArmour => {
                Value::CompressedHealthArmour(self.read_health_armour()?)
            }
            ValueKind::FixedLengthString(n) => Value::FixedLengthString(n, self.read_fixed_str(n)?),
            ValueKind::DynamicLengthString(w) => {
                Value::DynamicLengthString(w, self.read_dynamic_str(w)?)
            }
            ValueKind::FixedLengthByteArray(n) => {
                Value::FixedLengthByteArray(self.read_bytes_as(kind, n)?)
            }
            ValueKind::FixedLengthArray(width, n) => {
                self.ensure(kind, n * width.bits() as usize)?;
                let elements = match width {
                    Width::U8 => ElementArray::U8(self.read_bytes_as(kind, n)?),
                    Width::U16 => ElementArray::U16(
                        (0..n).map(|_| self.read_u16()).collect::<BitstreamResult<_>>()?,
                    ),
                    Width::U32 => ElementArray::U32(
                        (0..n).map(|_| self.read_u32()).collect::<BitstreamResult<_>>()?,
                    ),
                };
                Value::FixedLengthArray(elements)
            }
            ValueKind::CompressedString => Value::CompressedString(self.read_compressed_str()?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Network;

    fn sample_values() -> Vec<Value> {
        vec![
            Value::Bit(true),
            Value::UInt8(200),
            Value::UInt16(65_000),
            Value::UInt32(4_000_000_000),
            Value::Int16(-300),
            Value::Int32(-70_000),
            Value::Float32(0.25),
            Value::Vec2(Vec2::new(320.0, 240.0)),
            Value::Vec3(Vec3::new(2495.0, -1687.0, 13.5)),
            Value::Vec4(Vec4::new(1.0, 2.0, 3.0, 4.0)),
            Value::FixedLengthString(8, NetString::from("Binco")),
            Value::DynamicLengthString(Width::U16, NetString::from("~k~~PED_FIREWEAPON~")),
            Value::FixedLengthByteArray(vec![9, 8, 7]),
            Value::FixedLengthArray(ElementArray::U16(vec![1, 2, 3])),
            Value::FixedLengthArray(ElementArray::U32(vec![0xFFFF_FFFF])),
            Value::CompressedString(NetString::from("zzzz top")),
        ]
    }

    #[test]
    fn test_exact_kinds_round_trip_through_value_model() {
        let values = sample_values();
        let mut bs = BitWriter::new(Network::Legacy);
        for v in &values {
            bs.write_value(v);
        }
        let bytes = bs.into_bytes();
        let mut r = BitReader::new(&bytes);
        for v in &values {
            assert_eq!(&r.read_value(v.kind()).unwrap(), v);
        }
        assert!(r.is_exhausted());
    }

    #[test]
    fn test_lossy_kinds_keep_their_kind() {
        let values = [
            Value::Vec3Sync(Vec3::new(0.0, 1.0, 0.0)),
            Value::CompressedQuat(Quat::IDENTITY),
            Value::CompressedHealthArmour(HealthArmour::new(100.0, 0.0)),
        ];
        let mut bs = BitWriter::new(Network::Legacy);
        for v in &values {
            bs.write_value(v);
        }
        let bytes = bs.into_bytes();
        let mut r = BitReader::new(&bytes);
        for v in &values {
            assert_eq!(r.read_value(v.kind()).unwrap().kind(), v.kind());
        }
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ValueKind::DynamicLengthString(Width::U32).to_string(), "DynamicLengthString(32)");
        assert_eq!(ValueKind::FixedLengthArray(Width::U16, 11).to_string(), "FixedLengthArray(16, 11)");
        assert_eq!(ValueKind::FixedLengthString(32).to_string(), "FixedLengthString(32)");
    }

    #[test]
    fn test_width_limits() {
        assert_eq!(Width::U8.max_len(), 255);
        assert_eq!(Width::U16.bits(), 16);
    }

    #[test]
    fn test_array_kind_reports_length_and_width() {
        let v = Value::FixedLengthArray(ElementArray::U8(vec![0; 212]));
        assert_eq!(v.kind(), ValueKind::FixedLengthArray(Width::U8, 212));
    }
}
