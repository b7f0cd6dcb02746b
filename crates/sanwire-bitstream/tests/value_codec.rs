//! Integration tests for the value codec: randomized mixed streams and
//! fail-closed behaviour on every truncation point.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sanwire_bitstream::*;

// =========================================================================
// Helpers
// =========================================================================

fn random_exact_value(rng: &mut StdRng) -> Value {
    match rng.random_range(0..12) {
        0 => Value::Bit(rng.random()),
        1 => Value::UInt8(rng.random()),
        2 => Value::UInt16(rng.random()),
        3 => Value::UInt32(rng.random()),
        4 => Value::Int16(rng.random()),
        5 => Value::Int32(rng.random()),
        6 => Value::Float32(rng.random_range(-1.0e6..1.0e6)),
        7 => Value::Vec3(Vec3::new(rng.random(), rng.random(), rng.random())),
        8 => {
            let len = rng.random_range(0..40);
            let text: Vec<u8> = (0..len).map(|_| rng.random_range(b'a'..=b'z')).collect();
            Value::DynamicLengthString(Width::U8, NetString::from(text))
        }
        9 => {
            let len = rng.random_range(0..24);
            let text: Vec<u8> = (0..len).map(|_| rng.random_range(b'A'..=b'Z')).collect();
            Value::FixedLengthString(24, NetString::from(text))
        }
        10 => {
            let len = rng.random_range(0..60);
            let text: Vec<u8> = (0..len).map(|_| rng.random_range(b'0'..=b'3')).collect();
            Value::CompressedString(NetString::from(text))
        }
        _ => Value::FixedLengthArray(ElementArray::U16(
            (0..4).map(|_| rng.random()).collect(),
        )),
    }
}

fn encode(values: &[Value]) -> Vec<u8> {
    let mut bs = BitWriter::new(Network::Legacy);
    for v in values {
        bs.write_value(v);
    }
    bs.into_bytes()
}

// =========================================================================
// Round trips
// =========================================================================

#[test]
fn test_random_mixed_streams_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x5A17);
    for _ in 0..100 {
        let count = rng.random_range(1..20);
        let values: Vec<Value> = (0..count).map(|_| random_exact_value(&mut rng)).collect();
        let bytes = encode(&values);
        let mut r = BitReader::new(&bytes);
        for v in &values {
            assert_eq!(&r.read_value(v.kind()).unwrap(), v);
        }
        assert!(r.is_exhausted());
    }
}

// =========================================================================
// Fail closed
// =========================================================================

#[test]
fn test_every_truncation_point_fails() {
    let values = vec![
        Value::UInt16(7),
        Value::Bit(true),
        Value::DynamicLengthString(Width::U8, NetString::from("Johnson")),
        Value::Vec3Sync(Vec3::new(0.3, 0.0, -0.1)),
        Value::CompressedQuat(Quat::from_rotation_z(1.2)),
        Value::CompressedString(NetString::from("okay")),
        Value::UInt32(99),
    ];
    let bytes = encode(&values);
    for cut in 0..bytes.len() {
        let mut r = BitReader::new(&bytes[..cut]);
        let failed = values.iter().any(|v| r.read_value(v.kind()).is_err());
        assert!(failed, "buffer cut at {cut} bytes decoded fully");
    }
}

#[test]
fn test_lying_length_prefix_is_rejected() {
    let mut bs = BitWriter::new(Network::Legacy);
    bs.write_u16(60_000);
    let bytes = bs.into_bytes();
    let mut r = BitReader::new(&bytes);
    assert!(matches!(
        r.read_dynamic_str(Width::U16),
        Err(BitstreamError::LengthOutOfRange { declared: 60_000, .. })
    ));
}
