//! Bit-level I/O for Sanwire.
//!
//! This crate is the bottom layer of the codec. It knows nothing about
//! packets; it only knows how to put typed values into a bit buffer and
//! take them back out:
//!
//! - **Cursors** ([`BitWriter`], [`BitReader`]) — a growable write cursor
//!   that never fails and a read cursor over a borrowed buffer that fails
//!   closed on short or implausible input.
//! - **Value model** ([`Value`], [`ValueKind`]) — the closed set of wire
//!   kinds, from single bits to compressed quaternions.
//! - **Compressed encodings** ([`HealthArmour`], the magnitude-scaled
//!   sync vector and the 3-component quaternion).
//! - **String tables** ([`StringCompression`]) — the pluggable, versioned
//!   table behind compressed-string fields, with [`RunLength`] as the
//!   bundled default.
//! - **Errors** ([`BitstreamError`]) — what can go wrong while reading.
//!
//! # Bit order
//!
//! Bits are packed least-significant-bit first within each byte, and
//! multi-byte integers are little-endian. When the cursor is byte aligned
//! an integer therefore lands on the wire exactly as `to_le_bytes()`.
//!
//! ```text
//! write_bit(1); write_bit(0); write_bit(1); write_u8(0xFF)
//!
//! byte 0: 1 1 1 1 1 1 0 1    (bit 0 is the rightmost)
//! byte 1: 0 0 0 0 0 1 1 1
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod compressed;
mod error;
mod limits;
mod reader;
mod string;
mod string_table;
mod value;
mod writer;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use compressed::HealthArmour;
pub use error::{BitstreamError, BitstreamResult};
pub use limits::{DecodeLimits, Framing, Network};
pub use reader::BitReader;
pub use string::NetString;
pub use string_table::{
    DEFAULT_STRING_TABLE, RunLength, StringCompression, StringTable, same_table,
};
pub use value::{ElementArray, Value, ValueKind, Width};
pub use writer::BitWriter;

// The math types used by vector and quaternion kinds. Re-exported so
// downstream crates agree on one glam version.
pub use glam::{Quat, Vec2, Vec3, Vec4};
