//! The write cursor.

use glam::{Vec2, Vec3, Vec4};
use tracing::trace;

use crate::{Framing, Network, StringTable, ValueKind, Width};

/// A growable bit buffer with a write cursor.
///
/// Writes never fail: the buffer grows as needed and values that cannot
/// be represented exactly (a string longer than its slot, a length that
/// overflows its prefix) are truncated deterministically. A writer is
/// owned by exactly one packet encode.
///
/// ```rust
/// use sanwire_bitstream::{BitWriter, Network};
///
/// let mut bs = BitWriter::new(Network::Legacy);
/// bs.write_u8(207);
/// bs.write_u16(0x1234);
/// assert_eq!(bs.as_bytes(), &[207, 0x34, 0x12]);
/// ```
#[derive(Debug, Clone)]
pub struct BitWriter {
    /// Always exactly `ceil(bits / 8)` bytes; unused high bits are zero.
    buf: Vec<u8>,
    bits: usize,
    framing: Framing,
}

impl BitWriter {
    /// Creates an empty writer framed for `network` with the default
    /// string table.
    pub fn new(network: Network) -> Self {
        Self::with_capacity(network, 0)
    }

    /// Creates an empty writer with room for `bytes` bytes.
    pub fn with_capacity(network: Network, bytes: usize) -> Self {
        Self::framed_with_capacity(Framing::new(network), bytes)
    }

    pub fn framed(framing: Framing) -> Self {
        Self::framed_with_capacity(framing, 0)
    }

    pub fn framed_with_capacity(framing: Framing, bytes: usize) -> Self {
        Self {
            buf: Vec::with_capacity(bytes),
            bits: 0,
            framing,
        }
    }

    /// The network this stream is framed for.
    pub fn network(&self) -> Network {
        self.framing.network
    }

    /// The table compressed-string fields are written with.
    pub fn strings(&self) -> StringTable {
        self.framing.strings
    }

    /// Number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.bits
    }

    /// Number of bytes the written bits occupy (the last one may be partial).
    pub fn byte_len(&self) -> usize {
        self.buf.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn is_aligned(&self) -> bool {
        self.bits % 8 == 0
    }

    // -----------------------------------------------------------------------
    // Bits and integers
    // -----------------------------------------------------------------------

    pub fn write_bit(&mut self, bit: bool) {
        let byte = self.bits / 8;
        if byte == self.buf.len() {
            self.buf.push(0);
        }
        if bit {
            self.buf[byte] |= 1 << (self.bits % 8);
        }
        self.bits += 1;
    }

    /// Writes the low `count` bits of `value`, least significant first.
    pub fn write_bits(&mut self, value: u64, count: u32) {
        debug_assert!(count <= 64, "cannot write {count} bits from a u64");
        if self.is_aligned() && count % 8 == 0 {
            let bytes = value.to_le_bytes();
            self.buf.extend_from_slice(&bytes[..(count / 8) as usize]);
            self.bits += count as usize;
            return;
        }
        for i in 0..count {
            self.write_bit((value >> i) & 1 == 1);
        }
    }

    pub fn write_u8(&mut self, value: u8) {
        self.write_bits(u64::from(value), 8);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.write_bits(u64::from(value), 16);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.write_bits(u64::from(value), 32);
    }

    pub fn write_i16(&mut self, value: i16) {
        self.write_u16(value as u16);
    }

    pub fn write_i32(&mut self, value: i32) {
        self.write_u32(value as u32);
    }

    /// IEEE-754 bits as a `u32`.
    pub fn write_f32(&mut self, value: f32) {
        self.write_u32(value.to_bits());
    }

    // -----------------------------------------------------------------------
    // Vectors
    // -----------------------------------------------------------------------

    pub fn write_vec2(&mut self, v: Vec2) {
        self.write_f32(v.x);
        self.write_f32(v.y);
    }

    pub fn write_vec3(&mut self, v: Vec3) {
        self.write_f32(v.x);
        self.write_f32(v.y);
        self.write_f32(v.z);
    }

    pub fn write_vec4(&mut self, v: Vec4) {
        self.write_f32(v.x);
        self.write_f32(v.y);
        self.write_f32(v.z);
        self.write_f32(v.w);
    }

    // -----------------------------------------------------------------------
    // Bytes and strings
    // -----------------------------------------------------------------------

    /// Raw bytes, no length prefix.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        if self.is_aligned() {
            self.buf.extend_from_slice(bytes);
            self.bits += bytes.len() * 8;
        } else {
            for &b in bytes {
                self.write_u8(b);
            }
        }
    }

    /// Exactly `len` bytes: `bytes` truncated or right-padded with NUL.
    pub fn write_fixed_str(&mut self, bytes: &[u8], len: usize) {
        let used = bytes.len().min(len);
        self.write_bytes(&bytes[..used]);
        for _ in used..len {
            self.write_u8(0);
        }
    }

    /// A `width`-bit length prefix followed by the bytes.
    ///
    /// Strings longer than the prefix can express are truncated to the
    /// prefix maximum (255 bytes for an 8-bit prefix).
    pub fn write_dynamic_str(&mut self, bytes: &[u8], width: Width) {
        let len = bytes.len().min(width.max_len());
        if len < bytes.len() {
            trace!(
                kind = %ValueKind::DynamicLengthString(width),
                len = bytes.len(),
                kept = len,
                "string truncated to prefix maximum"
            );
        }
        self.write_bits(len as u64, width.bits());
        self.write_bytes(&bytes[..len]);
    }

    // -----------------------------------------------------------------------
    // Fixed-length arrays
    // -----------------------------------------------------------------------

    pub fn write_u8_array<const N: usize>(&mut self, values: &[u8; N]) {
        self.write_bytes(values);
    }

    pub fn write_u16_array<const N: usize>(&mut self, values: &[u16; N]) {
        for &v in values {
            self.write_u16(v);
        }
    }

    pub fn write_u32_array<const N: usize>(&mut self, values: &[u32; N]) {
        for &v in values {
            self.write_u32(v);
        }
    }
}
