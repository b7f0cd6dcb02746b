//! Packet traits, directions, and the typed encode/decode entry points.
//!
//! A packet type is a plain struct. What it can do is expressed through
//! traits parametrized by a direction marker:
//!
//! - [`Readable<D>`]: can be decoded when travelling in direction `D`.
//! - [`Writable<D>`]: can be encoded for direction `D`.
//! - [`WritableWith<D, T>`]: can be encoded for `D` given a borrowed
//!   side table `T` (materials, attachment slots).
//!
//! Most RPCs implement one direction only, so asking for the other is a
//! compile error. The runtime [`Registry`](crate::Registry) keeps the
//! same information for buffers whose type is not known statically.
//!
//! ```text
//!           ToServer                      ToClient
//! client ──────────────► server ──────────────────► client
//!   OnPlayerEnterVehicle (26)        EnterVehicle (26)
//! ```

use std::fmt;

use sanwire_bitstream::{BitReader, BitWriter, DecodeLimits, Framing, Network};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{ProtocolError, ProtocolResult};

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Which way a packet travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    ClientToServer,
    ServerToClient,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientToServer => write!(f, "client -> server"),
            Self::ServerToClient => write!(f, "server -> client"),
        }
    }
}

/// Type-level direction marker.
///
/// Implemented only by [`ToServer`] and [`ToClient`].
pub trait Side: sealed::Sealed + Send + Sync + 'static {
    const DIRECTION: Direction;
}

/// Client → server.
#[derive(Debug, Clone, Copy)]
pub struct ToServer;

/// Server → client.
#[derive(Debug, Clone, Copy)]
pub struct ToClient;

impl Side for ToServer {
    const DIRECTION: Direction = Direction::ClientToServer;
}

impl Side for ToClient {
    const DIRECTION: Direction = Direction::ServerToClient;
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::ToServer {}
    impl Sealed for super::ToClient {}
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// How a packet's identifier is framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// One-shot message. The encoder stamps the registered id before the body.
    Rpc,
    /// High-frequency state. The packet writes its own id, derived from the
    /// writer's network.
    Sync,
}

// ---------------------------------------------------------------------------
// Packet traits
// ---------------------------------------------------------------------------

/// Identity shared by every packet type.
pub trait Packet {
    /// Wire id on the legacy network.
    const ID: u8;
    /// Type name, for logs and errors.
    const NAME: &'static str;
    const CHANNEL: Channel;

    /// The id to stamp when framing for `network`.
    fn id_for(_network: Network) -> u8 {
        Self::ID
    }
}

/// A packet that can be decoded when travelling in direction `D`.
///
/// `read` starts after the leading id byte and returns a fresh value, so
/// a failed decode never leaves a half-populated struct behind.
pub trait Readable<D: Side>: Packet + Sized {
    fn read(bs: &mut BitReader<'_>) -> ProtocolResult<Self>;
}

/// A packet that can be encoded for direction `D`.
///
/// Encoding never fails. RPC bodies start after the id the encoder
/// stamps; sync packets write their own id first.
pub trait Writable<D: Side>: Packet {
    fn write(&self, bs: &mut BitWriter);
}

/// A packet whose encoding consults an externally owned table.
///
/// The table is borrowed for the duration of one call only.
pub trait WritableWith<D: Side, T: ?Sized>: Packet {
    fn write_with(&self, bs: &mut BitWriter, table: &T);
}

/// Implements [`Packet`] for a type.
///
/// ```ignore
/// impl_packet!(PlayerQuit, 138);            // RPC
/// impl_packet!(PlayerFootSync, 207, Sync);  // sync packet
/// ```
macro_rules! impl_packet {
    ($ty:ident, $id:expr) => {
        impl $crate::Packet for $ty {
            const ID: u8 = $id;
            const NAME: &'static str = stringify!($ty);
            const CHANNEL: $crate::Channel = $crate::Channel::Rpc;
        }
    };
    ($ty:ident, $id:expr, $channel:ident) => {
        impl $crate::Packet for $ty {
            const ID: u8 = $id;
            const NAME: &'static str = stringify!($ty);
            const CHANNEL: $crate::Channel = $crate::Channel::$channel;
        }
    };
}
pub(crate) use impl_packet;

// ---------------------------------------------------------------------------
// Typed entry points
// ---------------------------------------------------------------------------

fn begin<P: Packet>(framing: Framing) -> BitWriter {
    let mut bs = BitWriter::framed_with_capacity(framing, 32);
    if P::CHANNEL == Channel::Rpc {
        bs.write_u8(P::id_for(framing.network));
    }
    bs
}

/// Encodes `packet` for direction `D`, id included.
///
/// `framing` is a [`Network`] for the default string table, or a
/// [`Framing`] carrying a specific one.
pub fn encode_packet<D: Side, P: Writable<D>>(packet: &P, framing: impl Into<Framing>) -> Vec<u8> {
    let mut bs = begin::<P>(framing.into());
    packet.write(&mut bs);
    trace!(packet = P::NAME, direction = %D::DIRECTION, bytes = bs.byte_len(), "encoded");
    bs.into_bytes()
}

/// Encodes `packet` for direction `D`, consulting `table`.
pub fn encode_packet_with<D, T, P>(packet: &P, table: &T, framing: impl Into<Framing>) -> Vec<u8>
where
    D: Side,
    T: ?Sized,
    P: WritableWith<D, T>,
{
    let mut bs = begin::<P>(framing.into());
    packet.write_with(&mut bs, table);
    trace!(packet = P::NAME, direction = %D::DIRECTION, bytes = bs.byte_len(), "encoded");
    bs.into_bytes()
}

/// Decodes a buffer known to hold a `P` travelling in direction `D`.
///
/// # Errors
/// [`ProtocolError::IdMismatch`] if the leading id is not `P`'s, or
/// [`ProtocolError::MalformedField`] if any field is short or invalid.
pub fn decode_packet<D: Side, P: Readable<D>>(buf: &[u8], limits: DecodeLimits) -> ProtocolResult<P> {
    let mut bs = BitReader::with_limits(buf, limits);
    let found = bs.read_u8()?;
    if found != P::ID {
        return Err(ProtocolError::IdMismatch {
            expected: P::ID,
            found,
        });
    }
    P::read(&mut bs)
}
