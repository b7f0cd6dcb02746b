//! One-shot RPC packets, grouped by what they touch.
//!
//! Every type here is an ordered field list. The encoder stamps the id,
//! so `write` and `read` only deal with the body. Which direction a type
//! may travel in is spelled out by its `Readable`/`Writable` impls:
//!
//! - client → server requests implement both traits for [`ToServer`](crate::ToServer),
//!   so test clients and proxies can produce them too;
//! - server → client commands implement `Writable<ToClient>`, plus
//!   `Readable<ToClient>` where a client-side decoder is useful.

pub mod connection;
pub mod object;
pub mod player;
pub mod ui;
pub mod vehicle;
pub mod world;

pub use connection::*;
pub use object::*;
pub use player::*;
pub use ui::*;
pub use vehicle::*;
pub use world::*;
