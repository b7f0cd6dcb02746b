//! The decoded-packet enum.
//!
//! When a buffer arrives the caller does not know its type yet. The
//! [`Registry`](crate::Registry) looks the id up and hands back a
//! [`Message`]: one variant per packet type that can be decoded in at
//! least one direction. Write-only packets never come out of a decoder,
//! so they have no variant.
//!
//! ```ignore
//! match registry.decode(Direction::ClientToServer, &buf, limits)? {
//!     (_, Message::PlayerFootSync(sync)) => relay(sync),
//!     (_, Message::PlayerRequestChatMessage(chat)) => broadcast(chat),
//!     (descriptor, other) => debug!(%descriptor, packet = other.name(), "ignored"),
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::Packet;
use crate::rpc::*;
use crate::sync::*;

macro_rules! messages {
    ($($ty:ident),* $(,)?) => {
        /// A packet decoded from a buffer whose type was not known statically.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[non_exhaustive]
        pub enum Message {
            $($ty($ty),)*
        }

        impl Message {
            /// The packet type's name.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$ty(_) => <$ty as Packet>::NAME,)*
                }
            }

            /// The packet's legacy wire id.
            pub fn id(&self) -> u8 {
                match self {
                    $(Self::$ty(_) => <$ty as Packet>::ID,)*
                }
            }
        }

        $(
            impl From<$ty> for Message {
                fn from(packet: $ty) -> Self {
                    Self::$ty(packet)
                }
            }
        )*
    };
}

messages! {
    // Connection
    PlayerConnect,
    PlayerJoin,
    PlayerQuit,
    PlayerInit,
    PlayerRequestClass,
    PlayerRequestClassResponse,
    PlayerRequestSpawn,
    PlayerRequestSpawnResponse,
    PlayerSpawn,
    OnPlayerRequestScoresAndPings,

    // Player
    SendClientMessage,
    PlayerRequestChatMessage,
    PlayerChatMessage,
    PlayerRequestCommandMessage,
    OnPlayerDeath,
    OnPlayerGiveTakeDamage,
    OnPlayerInteriorChange,
    GivePlayerWeapon,
    SetPlayerArmedWeapon,

    // Vehicles
    OnPlayerEnterVehicle,
    EnterVehicle,
    OnPlayerExitVehicle,
    ExitVehicle,

    // Objects
    OnPlayerSelectObject,
    OnPlayerEditObject,
    OnPlayerEditAttachedObject,

    // UI and world
    OnPlayerSelectTextDraw,
    OnPlayerSelectedMenuRow,
    OnPlayerExitedMenu,
    OnPlayerPickUpPickup,

    // Sync
    PlayerFootSync,
    PlayerVehicleSync,
    PlayerAimSync,
    PlayerBulletSync,
    PlayerStatsSync,
}
