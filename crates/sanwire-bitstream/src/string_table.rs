//! Pluggable compression for compressed-string fields.
//!
//! The legacy client compresses these strings with a frequency table of
//! its own. That table is an external, versioned artefact, so this module
//! only defines the seam: a [`StringCompression`] encodes and decodes the
//! whole field, length prefix included. Writers carry one through
//! [`Framing`](crate::Framing); readers take one from
//! [`DecodeLimits::strings`](crate::DecodeLimits::strings) and refuse the
//! field with [`BitstreamError::InvalidEncoding`] when none is set.
//!
//! [`RunLength`] is the bundled default. It is **not** the legacy client's
//! format: servers talking to real clients supply the client's table.
//!
//! # Run-length format (version 1)
//!
//! The text is split into runs of one repeated byte, each emitted as a
//! `(run length, byte)` pair with the run length in `1..=255`, behind a
//! 32-bit byte-length prefix:
//!
//! ```text
//! "aaab" → [3, 'a', 1, 'b'] → u32 4, 3, 'a', 1, 'b'
//! ```
//!
//! Decoding rejects an odd number of pair bytes, zero-length runs, and
//! any expansion longer than the reader's `max_string_len`.

use std::fmt;

use crate::{BitReader, BitWriter, BitstreamError, BitstreamResult, ValueKind};

const KIND: ValueKind = ValueKind::CompressedString;

/// A versioned compression table for compressed-string fields.
///
/// Implementations must be deterministic, and `decompress` must never
/// produce more than `max_len` bytes.
pub trait StringCompression: fmt::Debug + Send + Sync {
    /// Short name of the table, used in logs and config comparison.
    fn name(&self) -> &'static str;

    fn version(&self) -> u32;

    /// Writes `input` as one compressed-string field.
    fn compress(&self, input: &[u8], bs: &mut BitWriter);

    /// Reads one compressed-string field.
    fn decompress(&self, bs: &mut BitReader<'_>, max_len: usize) -> BitstreamResult<Vec<u8>>;
}

/// A table that lives for the whole program.
///
/// Tables loaded at runtime can be leaked once at startup with
/// [`Box::leak`].
pub type StringTable = &'static dyn StringCompression;

/// The table used when none is configured.
pub const DEFAULT_STRING_TABLE: StringTable = &RunLength;

/// Whether two tables are the same name and version.
pub fn same_table(a: StringTable, b: StringTable) -> bool {
    a.name() == b.name() && a.version() == b.version()
}

// ---------------------------------------------------------------------------
// Run-length
// ---------------------------------------------------------------------------

/// Byte-wise run-length compression, format version 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunLength;

impl RunLength {
    pub const VERSION: u32 = 1;
}

impl StringCompression for RunLength {
    fn name(&self) -> &'static str {
        "run-length"
    }

    fn version(&self) -> u32 {
        Self::VERSION
    }

    fn compress(&self, input: &[u8], bs: &mut BitWriter) {
        let encoded = compress_runs(input);
        bs.write_u32(encoded.len() as u32);
        bs.write_bytes(&encoded);
    }

    fn decompress(&self, bs: &mut BitReader<'_>, max_len: usize) -> BitstreamResult<Vec<u8>> {
        let declared = bs.read_bits_as(KIND, 32)? as usize;
        // Every pair expands to at least one byte.
        let max_encoded = max_len.saturating_mul(2);
        if declared > max_encoded {
            return Err(BitstreamError::LengthOutOfRange {
                kind: KIND,
                declared,
                max: max_encoded,
            });
        }
        let encoded = bs.read_bytes_as(KIND, declared)?;
        expand_runs(&encoded, max_len)
    }
}

fn compress_runs(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len().min(64) * 2);
    let mut iter = input.iter().copied().peekable();
    while let Some(byte) = iter.next() {
        let mut run: u8 = 1;
        while run < u8::MAX && iter.peek() == Some(&byte) {
            iter.next();
            run += 1;
        }
        out.push(run);
        out.push(byte);
    }
    out
}

fn expand_runs(encoded: &[u8], max_len: usize) -> BitstreamResult<Vec<u8>> {
    if encoded.len() % 2 != 0 {
        return Err(BitstreamError::InvalidEncoding {
            kind: KIND,
            reason: "odd number of run-length bytes",
        });
    }
    let mut out = Vec::new();
    for pair in encoded.chunks_exact(2) {
        let (run, byte) = (usize::from(pair[0]), pair[1]);
        if run == 0 {
            return Err(BitstreamError::InvalidEncoding {
                kind: KIND,
                reason: "zero-length run",
            });
        }
        let declared = out.len() + run;
        if declared > max_len {
            return Err(BitstreamError::LengthOutOfRange {
                kind: KIND,
                declared,
                max: max_len,
            });
        }
        out.resize(declared, byte);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Cursor entry points
// ---------------------------------------------------------------------------

impl BitWriter {
    /// Writes a compressed-string field with the writer's table.
    pub fn write_compressed_str(&mut self, bytes: &[u8]) {
        let strings = self.strings();
        strings.compress(bytes, self);
    }
}

impl BitReader<'_> {
    /// Reads a compressed-string field with the table in the reader's
    /// limits.
    ///
    /// # Errors
    /// [`BitstreamError::InvalidEncoding`] if no table is configured, or
    /// whatever the table reports for bad input.
    pub fn read_compressed_str(&mut self) -> BitstreamResult<crate::NetString> {
        let limits = self.limits();
        let Some(strings) = limits.strings else {
            return Err(BitstreamError::InvalidEncoding {
                kind: KIND,
                reason: "no string compression table configured",
            });
        };
        let bytes = strings.decompress(self, limits.max_string_len)?;
        if bytes.len() > limits.max_string_len {
            return Err(BitstreamError::LengthOutOfRange {
                kind: KIND,
                declared: bytes.len(),
                max: limits.max_string_len,
            });
        }
        Ok(bytes.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DecodeLimits, Framing, Network};

    fn written(f: impl FnOnce(&mut BitWriter)) -> Vec<u8> {
        let mut bs = BitWriter::new(Network::Legacy);
        f(&mut bs);
        bs.into_bytes()
    }

    /// Stores the text raw behind a u8 length, with no size check.
    #[derive(Debug)]
    struct Verbatim;

    impl StringCompression for Verbatim {
        fn name(&self) -> &'static str {
            "verbatim"
        }

        fn version(&self) -> u32 {
            7
        }

        fn compress(&self, input: &[u8], bs: &mut BitWriter) {
            bs.write_u8(input.len() as u8);
            bs.write_bytes(input);
        }

        fn decompress(&self, bs: &mut BitReader<'_>, _max_len: usize) -> BitstreamResult<Vec<u8>> {
            let len = usize::from(bs.read_u8()?);
            bs.read_bytes(len)
        }
    }

    static VERBATIM: Verbatim = Verbatim;

    // =====================================================================
    // Run-length
    // =====================================================================

    #[test]
    fn test_compress_collapses_runs() {
        assert_eq!(compress_runs(b"aaab"), vec![3, b'a', 1, b'b']);
        assert!(compress_runs(b"").is_empty());
    }

    #[test]
    fn test_long_run_splits_at_255() {
        let input = vec![b'-'; 300];
        let encoded = compress_runs(&input);
        assert_eq!(encoded, vec![255, b'-', 45, b'-']);
        assert_eq!(expand_runs(&encoded, 1000).unwrap(), input);
    }

    #[test]
    fn test_odd_stream_is_invalid() {
        assert!(matches!(
            expand_runs(&[2, b'a', 1], 100),
            Err(BitstreamError::InvalidEncoding { .. })
        ));
    }

    #[test]
    fn test_zero_run_is_invalid() {
        assert!(matches!(
            expand_runs(&[0, b'a'], 100),
            Err(BitstreamError::InvalidEncoding { reason: "zero-length run", .. })
        ));
    }

    #[test]
    fn test_expansion_over_limit_is_rejected() {
        assert!(matches!(
            expand_runs(&[200, b'a', 200, b'b'], 300),
            Err(BitstreamError::LengthOutOfRange { declared: 400, max: 300, .. })
        ));
    }

    #[test]
    fn test_stream_round_trip_unaligned() {
        let text = b"Welcome to {FFFF00}Grove Street!!!";
        let bytes = written(|bs| {
            bs.write_bit(true);
            bs.write_compressed_str(text);
        });

        let mut r = BitReader::new(&bytes);
        assert!(r.read_bit().unwrap());
        assert_eq!(r.read_compressed_str().unwrap().as_bytes(), text);
    }

    #[test]
    fn test_declared_length_over_limit_is_rejected_before_reading() {
        let bytes = written(|bs| bs.write_u32(1_000));
        let limits = DecodeLimits {
            max_string_len: 16,
            ..DecodeLimits::default()
        };
        let err = BitReader::with_limits(&bytes, limits)
            .read_compressed_str()
            .unwrap_err();
        assert_eq!(
            err,
            BitstreamError::LengthOutOfRange {
                kind: ValueKind::CompressedString,
                declared: 1_000,
                max: 32,
            }
        );
    }

    // =====================================================================
    // Table selection
    // =====================================================================

    #[test]
    fn test_default_table_is_run_length() {
        assert!(same_table(DEFAULT_STRING_TABLE, &RunLength));
        assert!(!same_table(DEFAULT_STRING_TABLE, &VERBATIM));
        assert_eq!(DEFAULT_STRING_TABLE.version(), RunLength::VERSION);
    }

    #[test]
    fn test_reader_without_table_refuses_field() {
        let bytes = written(|bs| bs.write_compressed_str(b"hello"));
        let limits = DecodeLimits {
            strings: None,
            ..DecodeLimits::default()
        };
        let err = BitReader::with_limits(&bytes, limits)
            .read_compressed_str()
            .unwrap_err();
        assert_eq!(
            err,
            BitstreamError::InvalidEncoding {
                kind: ValueKind::CompressedString,
                reason: "no string compression table configured",
            }
        );
    }

    #[test]
    fn test_supplied_table_is_used_both_ways() {
        let framing = Framing::new(Network::Legacy).with_strings(&VERBATIM);
        let mut bs = BitWriter::framed(framing);
        bs.write_compressed_str(b"hi");
        let bytes = bs.into_bytes();
        assert_eq!(bytes, vec![2, b'h', b'i']);

        let limits = DecodeLimits {
            strings: Some(&VERBATIM),
            ..DecodeLimits::default()
        };
        assert_eq!(
            BitReader::with_limits(&bytes, limits).read_compressed_str().unwrap(),
            "hi"
        );
    }

    #[test]
    fn test_mismatched_table_misreads_text() {
        let bytes = written(|bs| bs.write_compressed_str(b"aaaa"));
        let limits = DecodeLimits {
            strings: Some(&VERBATIM),
            ..DecodeLimits::default()
        };
        // The field carries no table tag.
        let text = BitReader::with_limits(&bytes, limits)
            .read_compressed_str()
            .unwrap();
        assert_ne!(text.as_bytes(), b"aaaa");
    }

    #[test]
    fn test_oversized_table_output_is_rejected() {
        let bytes = written(|bs| VERBATIM.compress(b"abcdefgh", bs));
        let limits = DecodeLimits {
            max_string_len: 4,
            strings: Some(&VERBATIM),
        };
        assert!(matches!(
            BitReader::with_limits(&bytes, limits).read_compressed_str(),
            Err(BitstreamError::LengthOutOfRange { declared: 8, max: 4, .. })
        ));
    }
}
