//! High-frequency sync packets.
//!
//! Each sync type travels both ways in two different shapes:
//!
//! - **report** (client → server): the raw layout the client produces.
//!   No subject id, full-width quaternion, raw health/armour bytes, no
//!   presence bits.
//! - **broadcast** (server → client): the relayed layout. It starts with
//!   the subject player id and uses the compressed encodings, with
//!   presence bits in front of optional fields.
//!
//! Unlike RPCs, a sync packet writes its own id as the first byte,
//! derived from the writer's network on every encode.

use sanwire_bitstream::{BitReader, BitWriter, BitstreamResult, HealthArmour, Quat, Vec4};

mod aim;
mod bullet;
mod foot;
mod stats;
mod vehicle;

pub use aim::PlayerAimSync;
pub use bullet::PlayerBulletSync;
pub use foot::PlayerFootSync;
pub use stats::PlayerStatsSync;
pub use vehicle::PlayerVehicleSync;

/// Quaternion as four floats in `(w, x, y, z)` order.
fn write_raw_quat(bs: &mut BitWriter, q: Quat) {
    bs.write_vec4(Vec4::new(q.w, q.x, q.y, q.z));
}

fn read_raw_quat(bs: &mut BitReader<'_>) -> BitstreamResult<Quat> {
    let v = bs.read_vec4()?;
    Ok(Quat::from_xyzw(v.y, v.z, v.w, v.x))
}

/// Health then armour, one unscaled byte each.
fn write_raw_health_armour(bs: &mut BitWriter, value: HealthArmour) {
    bs.write_u8(value.health.clamp(0.0, 255.0) as u8);
    bs.write_u8(value.armour.clamp(0.0, 255.0) as u8);
}

fn read_raw_health_armour(bs: &mut BitReader<'_>) -> BitstreamResult<HealthArmour> {
    let health = bs.read_u8()?;
    let armour = bs.read_u8()?;
    Ok(HealthArmour::new(f32::from(health), f32::from(armour)))
}
