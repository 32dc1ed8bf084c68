// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/ancilla

//! Payload envelope construction and parsing.
//!
//! The envelope wraps the secret before (optional) encryption and
//! embedding:
//!
//! ```text
//! [4 bytes] filename length n (big-endian u32, 0..=255)
//! [n bytes] filename (UTF-8)
//! [4 bytes] data length m (big-endian u32, 0..=10 MiB)
//! [m bytes] secret data
//! ```
//!
//! The parser reads from the head of a buffer that is usually longer than
//! the envelope (extraction pulls every available carrier bit), so the
//! length fields double as the wrong-key detector: garbage lengths fail
//! the sanity bounds long before 10 MiB of noise gets returned as a file.

use crate::stego::error::StegoError;

/// Fixed overhead: two u32 length fields.
pub const ENVELOPE_OVERHEAD: usize = 8;

/// Maximum filename length in bytes.
pub const MAX_FILENAME_LEN: usize = 255;

/// Maximum secret data length in bytes.
pub const MAX_DATA_LEN: usize = 10 * 1024 * 1024;

/// Build an envelope around a filename and secret bytes.
///
/// # Errors
/// [`StegoError::InvalidEnvelope`] if the filename exceeds 255 bytes,
/// [`StegoError::CapacityExceeded`] if the data exceeds 10 MiB.
pub fn build_envelope(filename: &str, data: &[u8]) -> Result<Vec<u8>, StegoError> {
    let name = filename.as_bytes();
    if name.len() > MAX_FILENAME_LEN {
        return Err(StegoError::InvalidEnvelope);
    }
    if data.len() > MAX_DATA_LEN {
        return Err(StegoError::CapacityExceeded {
            need: data.len(),
            have: MAX_DATA_LEN,
        });
    }

    let mut envelope = Vec::with_capacity(ENVELOPE_OVERHEAD + name.len() + data.len());
    envelope.extend_from_slice(&(name.len() as u32).to_be_bytes());
    envelope.extend_from_slice(name);
    envelope.extend_from_slice(&(data.len() as u32).to_be_bytes());
    envelope.extend_from_slice(data);
    Ok(envelope)
}

/// Parse an envelope from the head of `buf`, which may carry trailing
/// noise past the envelope end.
///
/// Returns `(data, filename)`.
///
/// # Errors
/// - [`StegoError::Truncated`] if `buf` ends before a declared field does.
/// - [`StegoError::InvalidEnvelope`] if a length field fails its sanity
///   bound or the filename bytes are not UTF-8.
pub fn parse_envelope(buf: &[u8]) -> Result<(Vec<u8>, String), StegoError> {
    if buf.len() < ENVELOPE_OVERHEAD {
        return Err(StegoError::Truncated);
    }

    let name_len = u32::from_be_bytes(buf[0..4].try_into().unwrap()) as usize;
    if name_len > MAX_FILENAME_LEN {
        return Err(StegoError::InvalidEnvelope);
    }
    if buf.len() < ENVELOPE_OVERHEAD + name_len {
        return Err(StegoError::Truncated);
    }

    let filename = std::str::from_utf8(&buf[4..4 + name_len])
        .map_err(|_| StegoError::InvalidEnvelope)?
        .to_string();

    let data_len =
        u32::from_be_bytes(buf[4 + name_len..8 + name_len].try_into().unwrap()) as usize;
    if data_len > MAX_DATA_LEN {
        return Err(StegoError::InvalidEnvelope);
    }

    let data_start = ENVELOPE_OVERHEAD + name_len;
    if buf.len() < data_start + data_len {
        return Err(StegoError::Truncated);
    }

    Ok((buf[data_start..data_start + data_len].to_vec(), filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_parse_roundtrip() {
        let envelope = build_envelope("note.txt", b"hello world").unwrap();
        assert_eq!(envelope.len(), 8 + 8 + 11);
        let (data, filename) = parse_envelope(&envelope).unwrap();
        assert_eq!(filename, "note.txt");
        assert_eq!(data, b"hello world");
    }

    #[test]
    fn trailing_noise_ignored() {
        let mut buf = build_envelope("a.bin", &[1, 2, 3]).unwrap();
        buf.extend_from_slice(&[0xFF; 64]);
        let (data, filename) = parse_envelope(&buf).unwrap();
        assert_eq!(filename, "a.bin");
        assert_eq!(data, vec![1, 2, 3]);
    }

    #[test]
    fn empty_filename_and_data() {
        let envelope = build_envelope("", &[]).unwrap();
        assert_eq!(envelope.len(), ENVELOPE_OVERHEAD);
        let (data, filename) = parse_envelope(&envelope).unwrap();
        assert!(filename.is_empty());
        assert!(data.is_empty());
    }

    #[test]
    fn lengths_are_big_endian() {
        let envelope = build_envelope("ab", &[0u8; 300]).unwrap();
        assert_eq!(&envelope[0..4], &[0, 0, 0, 2]);
        assert_eq!(&envelope[6..10], &[0, 0, 1, 44]); // 300 = 0x012C
    }

    #[test]
    fn filename_over_255_rejected() {
        let long = "x".repeat(256);
        assert!(matches!(
            build_envelope(&long, b"data"),
            Err(StegoError::InvalidEnvelope)
        ));
    }

    #[test]
    fn garbage_filename_length_rejected() {
        let mut buf = vec![0xFFu8; 64]; // filename length way over 255
        buf[0] = 0x12;
        assert!(matches!(
            parse_envelope(&buf),
            Err(StegoError::InvalidEnvelope)
        ));
    }

    #[test]
    fn short_buffer_truncated() {
        assert!(matches!(parse_envelope(&[0u8; 7]), Err(StegoError::Truncated)));
    }

    #[test]
    fn missing_data_truncated() {
        let mut envelope = build_envelope("f.bin", &[0u8; 100]).unwrap();
        envelope.truncate(envelope.len() - 1);
        assert!(matches!(
            parse_envelope(&envelope),
            Err(StegoError::Truncated)
        ));
    }

    #[test]
    fn non_utf8_filename_rejected() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&2u32.to_be_bytes());
        buf.extend_from_slice(&[0xC3, 0x28]); // invalid UTF-8 pair
        buf.extend_from_slice(&0u32.to_be_bytes());
        assert!(matches!(
            parse_envelope(&buf),
            Err(StegoError::InvalidEnvelope)
        ));
    }

    #[test]
    fn data_length_over_limit_rejected() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.extend_from_slice(&(11 * 1024 * 1024u32).to_be_bytes());
        assert!(matches!(
            parse_envelope(&buf),
            Err(StegoError::InvalidEnvelope)
        ));
    }
}
