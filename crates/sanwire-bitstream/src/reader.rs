//! The read cursor.

use glam::{Vec2, Vec3, Vec4};

use crate::{BitstreamError, BitstreamResult, DecodeLimits, NetString, ValueKind, Width};

/// A read cursor over a borrowed byte buffer.
///
/// Every read checks the remaining length first and fails closed with a
/// [`BitstreamError`]. Reads are not transactional: after the first
/// failure the cursor position is meaningless and the reader must be
/// dropped along with the packet it was decoding.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    buf: &'a [u8],
    pos: usize,
    limits: DecodeLimits,
}

impl<'a> BitReader<'a> {
    /// Creates a reader with default [`DecodeLimits`].
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_limits(buf, DecodeLimits::default())
    }

    pub fn with_limits(buf: &'a [u8], limits: DecodeLimits) -> Self {
        Self {
            buf,
            pos: 0,
            limits,
        }
    }

    pub fn limits(&self) -> DecodeLimits {
        self.limits
    }

    /// Bits consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining_bits(&self) -> usize {
        self.buf.len() * 8 - self.pos
    }

    /// True once every whole byte has been consumed.
    ///
    /// Trailing padding bits in the final byte do not count.
    pub fn is_exhausted(&self) -> bool {
        self.remaining_bits() < 8
    }

    pub(crate) fn ensure(&self, kind: ValueKind, needed: usize) -> BitstreamResult<()> {
        let available = self.remaining_bits();
        if needed > available {
            return Err(BitstreamError::Truncated {
                kind,
                needed,
                available,
            });
        }
        Ok(())
    }

    /// Reads one bit without a length check. Callers must `ensure` first.
    fn take_bit(&mut self) -> bool {
        let bit = (self.buf[self.pos / 8] >> (self.pos % 8)) & 1 == 1;
        self.pos += 1;
        bit
    }

    /// Reads `count` bits, least significant first, reporting `kind` on
    /// failure.
    pub(crate) fn read_bits_as(&mut self, kind: ValueKind, count: u32) -> BitstreamResult<u64> {
        debug_assert!(count <= 64, "cannot read {count} bits into a u64");
        self.ensure(kind, count as usize)?;
        if self.pos % 8 == 0 && count % 8 == 0 {
            let start = self.pos / 8;
            let len = (count / 8) as usize;
            let mut bytes = [0u8; 8];
            bytes[..len].copy_from_slice(&self.buf[start..start + len]);
            self.pos += count as usize;
            return Ok(u64::from_le_bytes(bytes));
        }
        let mut value = 0u64;
        for i in 0..count {
            if self.take_bit() {
                value |= 1 << i;
            }
        }
        Ok(value)
    }

    // -----------------------------------------------------------------------
    // Bits and integers
    // -----------------------------------------------------------------------

    pub fn read_bit(&mut self) -> BitstreamResult<bool> {
        self.ensure(ValueKind::Bit, 1)?;
        Ok(self.take_bit())
    }

    pub fn read_u8(&mut self) -> BitstreamResult<u8> {
        Ok(self.read_bits_as(ValueKind::UInt8, 8)? as u8)
    }

    pub fn read_u16(&mut self) -> BitstreamResult<u16> {
        Ok(self.read_bits_as(ValueKind::UInt16, 16)? as u16)
    }

    pub fn read_u32(&mut self) -> BitstreamResult<u32> {
        Ok(self.read_bits_as(ValueKind::UInt32, 32)? as u32)
    }

    pub fn read_i16(&mut self) -> BitstreamResult<i16> {
        Ok(self.read_bits_as(ValueKind::Int16, 16)? as u16 as i16)
    }

    pub fn read_i32(&mut self) -> BitstreamResult<i32> {
        Ok(self.read_bits_as(ValueKind::Int32, 32)? as u32 as i32)
    }

    pub fn read_f32(&mut self) -> BitstreamResult<f32> {
        let bits = self.read_bits_as(ValueKind::Float32, 32)? as u32;
        Ok(f32::from_bits(bits))
    }

    // -----------------------------------------------------------------------
    // Vectors
    // -----------------------------------------------------------------------

    pub fn read_vec2(&mut self) -> BitstreamResult<Vec2> {
        self.ensure(ValueKind::Vec2, 64)?;
        Ok(Vec2::new(self.read_f32()?, self.read_f32()?))
    }

    pub fn read_vec3(&mut self) -> BitstreamResult<Vec3> {
        self.ensure(ValueKind::Vec3, 96)?;
        Ok(Vec3::new(self.read_f32()?, self.read_f32()?, self.read_f32()?))
    }

    pub fn read_vec4(&mut self) -> BitstreamResult<Vec4> {
        self.ensure(ValueKind::Vec4, 128)?;
        Ok(Vec4::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    // -----------------------------------------------------------------------
    // Bytes and strings
    // -----------------------------------------------------------------------

    pub(crate) fn read_bytes_as(&mut self, kind: ValueKind, len: usize) -> BitstreamResult<Vec<u8>> {
        self.ensure(kind, len * 8)?;
        if self.pos % 8 == 0 {
            let start = self.pos / 8;
            self.pos += len * 8;
            return Ok(self.buf[start..start + len].to_vec());
        }
        let mut out = Vec::with_capacity(len);
        for _ in 0..len {
            let mut byte = 0u8;
            for i in 0..8 {
                if self.take_bit() {
                    byte |= 1 << i;
                }
            }
            out.push(byte);
        }
        Ok(out)
    }

    /// Exactly `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> BitstreamResult<Vec<u8>> {
        self.read_bytes_as(ValueKind::FixedLengthByteArray(len), len)
    }

    /// Exactly `len` bytes with trailing NUL padding stripped.
    ///
    /// Every trailing `\0` is treated as padding, so a payload that
    /// itself ends in NUL bytes comes back shorter than it was written.
    /// Fields where that matters should use [`read_bytes`](Self::read_bytes).
    pub fn read_fixed_str(&mut self, len: usize) -> BitstreamResult<NetString> {
        let mut bytes = self.read_bytes_as(ValueKind::FixedLengthString(len), len)?;
        while bytes.last() == Some(&0) {
            bytes.pop();
        }
        Ok(NetString::from(bytes))
    }

    /// A `width`-bit length prefix followed by that many bytes.
    ///
    /// Fails with [`BitstreamError::LengthOutOfRange`] if the declared
    /// length exceeds the reader's `max_string_len`.
    pub fn read_dynamic_str(&mut self, width: Width) -> BitstreamResult<NetString> {
        let kind = ValueKind::DynamicLengthString(width);
        let declared = self.read_bits_as(kind, width.bits())? as usize;
        let max = self.limits.max_string_len;
        if declared > max {
            return Err(BitstreamError::LengthOutOfRange {
                kind,
                declared,
                max,
            });
        }
        Ok(NetString::from(self.read_bytes_as(kind, declared)?))
    }

    // -----------------------------------------------------------------------
    // Fixed-length arrays
    // -----------------------------------------------------------------------

    pub fn read_u8_array<const N: usize>(&mut self) -> BitstreamResult<[u8; N]> {
        self.ensure(ValueKind::FixedLengthArray(Width::U8, N), N * 8)?;
        let mut out = [0u8; N];
        for slot in &mut out {
            *slot = self.read_u8()?;
        }
        Ok(out)
    }

    pub fn read_u16_array<const N: usize>(&mut self) -> BitstreamResult<[u16; N]> {
        self.ensure(ValueKind::FixedLengthArray(Width::U16, N), N * 16)?;
        let mut out = [0u16; N];
        for slot in &mut out {
            *slot = self.read_u16()?;
        }
        Ok(out)
    }

    pub fn read_u32_array<const N: usize>(&mut self) -> BitstreamResult<[u32; N]> {
        self.ensure(ValueKind::FixedLengthArray(Width::U32, N), N * 32)?;
        let mut out = [0u32; N];
        for slot in &mut out {
            *slot = self.read_u32()?;
        }
        Ok(out)
    }
}
