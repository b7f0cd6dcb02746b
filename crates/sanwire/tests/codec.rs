//! Integration tests for the `Codec` facade: sharing, configuration, and a
//! full relay of a movement update.

use std::sync::Arc;

use sanwire::prelude::*;

// =========================================================================
// Helpers
// =========================================================================

fn foot_report(seed: u16) -> PlayerFootSync {
    let f = f32::from(seed);
    PlayerFootSync {
        keys: seed,
        position: Vec3::new(f, -f, 10.0),
        rotation: Quat::from_rotation_z(f * 0.01),
        health_armour: HealthArmour::new(100.0, f32::from(seed % 100)),
        weapon: WeaponKeys::new((seed % 46) as u8, 0).weapon(),
        velocity: Vec3::new(0.1, 0.0, 0.0),
        ..PlayerFootSync::default()
    }
}

// =========================================================================
// Concurrency
// =========================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_codec_across_tasks() {
    let codec = Arc::new(Codec::default());

    let mut handles = Vec::new();
    for task in 0..16u16 {
        let codec = Arc::clone(&codec);
        handles.push(tokio::spawn(async move {
            for i in 0..50u16 {
                let report = foot_report(task * 100 + i);
                let bytes = codec.encode::<ToServer, _>(&report);
                let (descriptor, msg) = codec.decode(Direction::ClientToServer, &bytes)?;
                assert_eq!(descriptor.id, 207);
                assert_eq!(msg, Message::PlayerFootSync(report));
            }
            Ok::<_, SanwireError>(())
        }));
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_parallel_encodes_are_identical() {
    let codec = Arc::new(Codec::default());
    let sync = PlayerFootSync {
        player_id: 5,
        ..foot_report(42)
    };
    let expected = codec.encode::<ToClient, _>(&sync);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let codec = Arc::clone(&codec);
        let sync = sync.clone();
        handles.push(tokio::spawn(async move { codec.encode::<ToClient, _>(&sync) }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), expected);
    }
}

// =========================================================================
// Configuration
// =========================================================================

#[test]
fn test_json_config_limits_apply() {
    let config = CodecConfig::from_json(r#"{ "limits": { "max_string_len": 8 } }"#).unwrap();
    let codec = Codec::new(config);

    let short = codec.encode::<ToServer, _>(&PlayerRequestChatMessage {
        message: NetString::from("hi"),
    });
    assert!(codec.decode(Direction::ClientToServer, &short).is_ok());

    let long = codec.encode::<ToServer, _>(&PlayerRequestChatMessage {
        message: NetString::from("this is far too long"),
    });
    let err = codec.decode(Direction::ClientToServer, &long).unwrap_err();
    assert!(!err.is_recoverable());
}

#[test]
fn test_config_serializes_round_trip() {
    let config = CodecConfig {
        limits: DecodeLimits {
            max_string_len: 512,
            ..DecodeLimits::default()
        },
        network: Network::Legacy,
        ..CodecConfig::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(CodecConfig::from_json(&json).unwrap(), config);
}

/// Writes the text raw behind a u16 length.
#[derive(Debug)]
struct Plain;

impl StringCompression for Plain {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn version(&self) -> u32 {
        3
    }

    fn compress(&self, input: &[u8], bs: &mut BitWriter) {
        bs.write_u16(input.len() as u16);
        bs.write_bytes(input);
    }

    fn decompress(
        &self,
        bs: &mut BitReader<'_>,
        _max_len: usize,
    ) -> sanwire::sanwire_bitstream::BitstreamResult<Vec<u8>> {
        let len = usize::from(bs.read_u16()?);
        bs.read_bytes(len)
    }
}

static PLAIN: Plain = Plain;

#[test]
fn test_configured_string_table_is_used_for_encoding() {
    let label = PlayerShowTextLabel {
        label: TextLabelId::Global(3),
        colour: Colour::WHITE,
        position: Vec3::new(1.0, 2.0, 3.0),
        draw_distance: 30.0,
        line_of_sight: true,
        attached_player: 0xFFFF,
        attached_vehicle: 0xFFFF,
        text: NetString::from("Pay 'n' Spray"),
    };
    let codec = Codec::new(CodecConfig::default().with_strings(&PLAIN));
    let bytes = codec.encode::<ToClient, _>(&label);

    let mut tail = Vec::from(13u16.to_le_bytes());
    tail.extend_from_slice(b"Pay 'n' Spray");
    assert!(bytes.ends_with(&tail));
    assert_ne!(bytes, Codec::default().encode::<ToClient, _>(&label));
}

// =========================================================================
// Relay
// =========================================================================

#[test]
fn test_relay_report_as_broadcast() {
    let codec = Codec::default();
    let report = PlayerFootSync {
        left_right: 0,
        up_down: 0xFF80,
        animation_id: 1189,
        animation_flags: 4356,
        surfing: SurfTarget::Vehicle(411),
        surfing_offset: Vec3::new(0.5, 0.0, 1.0),
        ..foot_report(7)
    };
    let inbound = codec.encode::<ToServer, _>(&report);

    let Message::PlayerFootSync(mut sync) = codec.decode(Direction::ClientToServer, &inbound).unwrap().1 else {
        panic!("expected a foot sync");
    };
    sync.player_id = 12;
    let outbound = codec.encode::<ToClient, _>(&sync);

    let relayed: PlayerFootSync = codec.decode_as::<ToClient, _>(&outbound).unwrap();
    assert_eq!(relayed.player_id, 12);
    assert_eq!(relayed.left_right, 0);
    assert_eq!(relayed.up_down, 0xFF80);
    assert_eq!(relayed.animation_id, 1189);
    assert_eq!(relayed.surfing, SurfTarget::Vehicle(411));
    assert!(relayed.position.abs_diff_eq(report.position, 1e-6));
    assert!((relayed.health_armour.armour - report.health_armour.armour).abs() < 0.5);
}
