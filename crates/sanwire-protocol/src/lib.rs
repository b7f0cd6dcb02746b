//! Packet layer for Sanwire.
//!
//! This crate turns typed game messages into bit buffers and back, on top
//! of [`sanwire_bitstream`]:
//!
//! - **Traits** ([`Packet`], [`Readable`], [`Writable`], [`WritableWith`])
//!   and the direction markers [`ToServer`] / [`ToClient`]. A packet type
//!   only implements the directions it can actually travel in.
//! - **Packets** ([`rpc`], [`sync`]) — the full legacy catalogue: one-shot
//!   RPCs and the high-frequency sync packets.
//! - **Registry** ([`Registry`], [`Message`]) — runtime lookup by
//!   `(id, direction)` for buffers whose type is not known statically.
//! - **Side tables** ([`MaterialTable`], [`AttachmentTable`]) — state
//!   owned elsewhere and borrowed by a single encode call.
//! - **Errors** ([`ProtocolError`]).
//!
//! # Architecture
//!
//! ```text
//! bytes ─► BitReader ─► Registry (id, direction) ─► Readable::read ─► Message
//! packet ─► Writable::write ─► BitWriter ─► bytes
//! ```
//!
//! Nothing here keeps state between calls. Connection handling, entity
//! pools and game rules live elsewhere.

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod adapters;
mod error;
mod message;
mod packet;
mod registry;
mod tables;
mod types;

pub mod rpc;
pub mod sync;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use adapters::{VehicleAux, WeaponKeys, ZoomWeaponState};
pub use error::{ProtocolError, ProtocolResult};
pub use message::Message;
pub use packet::{
    Channel, Direction, Packet, Readable, Side, ToClient, ToServer, Writable, WritableWith,
    decode_packet, encode_packet, encode_packet_with,
};
pub use registry::{PacketDescriptor, Registry, Schema};
pub use tables::{
    AttachmentSlot, AttachmentTable, MaterialTable, ObjectMaterial, ObjectMaterials,
    PlayerAttachments, SlotMask,
};
pub use types::*;

pub use rpc::*;
pub use sync::*;
