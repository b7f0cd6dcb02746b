use std::sync::Arc;

use sanwire::prelude::*;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Simulated client
// ---------------------------------------------------------------------------

/// A few movement reports and one packet the server does not know.
fn client_traffic(codec: &Codec) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    for step in 0..3u8 {
        let t = f32::from(step);
        let report = PlayerFootSync {
            up_down: if step == 1 { 0xFF80 } else { 0 },
            position: Vec3::new(2495.0 + t, -1687.0, 13.5),
            rotation: Quat::from_rotation_z(0.3 * t),
            health_armour: HealthArmour::new(100.0 - 10.0 * t, 50.0),
            weapon: WeaponKeys::new(24, 0).weapon(),
            velocity: Vec3::new(0.2, 0.0, 0.0),
            surfing: if step == 2 {
                SurfTarget::Vehicle(411)
            } else {
                SurfTarget::None
            },
            ..PlayerFootSync::default()
        };
        out.push(codec.encode::<ToServer, _>(&report));
    }

    let hydra = PlayerVehicleSync {
        vehicle_id: 520,
        position: Vec3::new(-1200.0, 40.0, 300.0),
        velocity: Vec3::new(0.8, 0.1, 0.0),
        health_armour: HealthArmour::new(75.0, 0.0),
        aux: VehicleAux::from_hydra_thrust_angle(5000).0,
        ..PlayerVehicleSync::default()
    };
    out.push(codec.encode::<ToServer, _>(&hydra));

    out.push(vec![250, 1, 2, 3]);
    out
}

// ---------------------------------------------------------------------------
// Relay
// ---------------------------------------------------------------------------

/// Turns one client report into the broadcast other players receive.
///
/// Returns `Ok(None)` for packets that are decoded but not relayed.
fn relay(codec: &Codec, sender: u16, buf: &[u8]) -> SanwireResult<Option<Vec<u8>>> {
    let (descriptor, msg) = codec.decode(Direction::ClientToServer, buf)?;
    if let Ok(json) = serde_json::to_string(&msg) {
        debug!(%descriptor, %json, "report");
    }

    let out = match msg {
        Message::PlayerFootSync(mut sync) => {
            sync.player_id = sender;
            codec.encode::<ToClient, _>(&sync)
        }
        Message::PlayerVehicleSync(mut sync) => {
            sync.player_id = sender;
            codec.encode::<ToClient, _>(&sync)
        }
        other => {
            debug!(packet = other.name(), "not relayed");
            return Ok(None);
        }
    };
    info!(
        %descriptor,
        report_bytes = buf.len(),
        broadcast_bytes = out.len(),
        "relayed"
    );
    Ok(Some(out))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let codec = Arc::new(Codec::new(CodecConfig::default()));
    let (to_relay, mut inbox) = mpsc::channel::<Vec<u8>>(16);
    let (to_observer, mut outbox) = mpsc::channel::<Vec<u8>>(16);

    let relay_codec = Arc::clone(&codec);
    let relay_task = tokio::spawn(async move {
        while let Some(buf) = inbox.recv().await {
            match relay(&relay_codec, 3, &buf) {
                Ok(Some(out)) => {
                    if to_observer.send(out).await.is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) if e.is_recoverable() => warn!(error = %e, "skipping packet"),
                Err(e) => {
                    warn!(error = %e, "malformed report, dropping sender");
                    break;
                }
            }
        }
    });

    let observer_codec = Arc::clone(&codec);
    let observer_task = tokio::spawn(async move {
        while let Some(buf) = outbox.recv().await {
            match observer_codec.decode(Direction::ServerToClient, &buf) {
                Ok((_, Message::PlayerFootSync(sync))) => info!(
                    player = sync.player_id,
                    x = sync.position.x,
                    health = sync.health_armour.health,
                    surfing = ?sync.surfing,
                    "observer: foot"
                ),
                Ok((_, Message::PlayerVehicleSync(sync))) => info!(
                    player = sync.player_id,
                    vehicle = sync.vehicle_id,
                    thrust = VehicleAux(sync.aux).hydra_thrust_angle(),
                    "observer: vehicle"
                ),
                Ok((descriptor, other)) => info!(%descriptor, packet = other.name(), "observer"),
                Err(e) => warn!(error = %e, "observer could not decode broadcast"),
            }
        }
    });

    for buf in client_traffic(&codec) {
        to_relay.send(buf).await?;
    }
    drop(to_relay);

    relay_task.await?;
    observer_task.await?;
    Ok(())
}
