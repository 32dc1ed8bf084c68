// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/ancilla

//! Embed and extract pipelines.
//!
//! Embedding:
//! 1. Wrap the secret in the length-prefixed envelope; encrypt it when
//!    configured.
//! 2. Parse the carrier MP3 and concatenate every frame's safe view into
//!    one carrier byte vector.
//! 3. Generate carrier positions (sequential, or a key-seeded permutation
//!    prefix) and pack the payload bits into the low `lsb_bits` of each
//!    selected byte.
//! 4. Scatter the carrier vector back into the frames and re-emit the
//!    container. Headers, side-info and main data come out untouched.
//!
//! Extraction is the inverse, except that it reads the low bits of the
//! *entire* safe view up front: with an enciphered envelope the payload
//! length is unknown until after decryption, and prefix-stable positions
//! make the all-at-once read equivalent to growing the request on demand.

use log::debug;

use crate::mp3::{FrameRegions, Mp3File};
use crate::stego::bits::{bits_to_bytes, bytes_to_bits};
use crate::stego::capacity::capacity_from_safe;
use crate::stego::envelope::{self, ENVELOPE_OVERHEAD};
use crate::stego::error::StegoError;
use crate::stego::permute::generate_positions;
use crate::stego::vigenere::ExtendedVigenere;
use crate::stego::StegoConfig;

/// A secret recovered from a stego MP3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSecret {
    /// The recovered secret bytes.
    pub data: Vec<u8>,
    /// The filename stored alongside the secret at embed time.
    pub filename: String,
}

/// Per-frame region analysis for the whole carrier.
///
/// Frames that cannot be analyzed get empty regions: they contribute no
/// safe bytes and pass through unmodified. Embed and extract apply this
/// identical rule, which is what keeps their carrier views aligned.
fn analyze_frames(mp3: &Mp3File) -> Vec<FrameRegions> {
    mp3.frames()
        .iter()
        .map(|frame| {
            FrameRegions::analyze(&frame.header, &frame.data)
                .unwrap_or_else(|_| FrameRegions::empty())
        })
        .collect()
}

/// Concatenate the safe views of all frames into one carrier vector.
fn collect_carrier(regions: &[FrameRegions]) -> Vec<u8> {
    let total: usize = regions.iter().map(FrameRegions::safe_len).sum();
    let mut carrier = Vec::with_capacity(total);
    for r in regions {
        carrier.extend_from_slice(&r.safe_bytes());
    }
    carrier
}

/// Embed a secret into a carrier MP3, returning the stego MP3 bytes.
///
/// The output has the same byte length as the input; only ancillary and
/// padding bytes inside frame bodies differ.
///
/// # Errors
/// - [`StegoError::InvalidKey`] / [`StegoError::InvalidLsbBits`] on bad config.
/// - [`StegoError::MalformedMp3`] if the carrier cannot be parsed.
/// - [`StegoError::NoSafeCapacity`] if no frame yields safe bytes.
/// - [`StegoError::CapacityExceeded`] if the payload does not fit.
pub fn embed(mp3_bytes: &[u8], secret: &[u8], config: &StegoConfig) -> Result<Vec<u8>, StegoError> {
    config.validate()?;

    let mut payload = envelope::build_envelope(&config.secret_filename, secret)?;
    if config.use_encryption {
        payload = ExtendedVigenere::new(config.key()).encrypt(&payload);
    }

    let mut mp3 = Mp3File::from_bytes(mp3_bytes)?;
    let regions = analyze_frames(&mp3);
    let mut carrier = collect_carrier(&regions);
    if carrier.is_empty() {
        return Err(StegoError::NoSafeCapacity);
    }

    let capacity = capacity_from_safe(carrier.len(), config.lsb_bits)?;
    if payload.len() > capacity {
        return Err(StegoError::CapacityExceeded {
            need: payload.len(),
            have: capacity,
        });
    }

    let lsb_bits = usize::from(config.lsb_bits);
    let need_bytes = (payload.len() * 8).div_ceil(lsb_bits);
    if need_bytes > carrier.len() {
        return Err(StegoError::CapacityExceeded {
            need: need_bytes,
            have: carrier.len(),
        });
    }

    let positions = generate_positions(
        carrier.len(),
        need_bytes,
        config.key(),
        config.use_random_start,
    );

    // Pack successive payload bits into the low `lsb_bits` of each selected
    // carrier byte; the first bit of a group lands in the value's low bit.
    let payload_bits = bytes_to_bits(&payload);
    let mask = low_bits_mask(config.lsb_bits);
    let mut bit_index = 0usize;
    for &pos in &positions {
        if bit_index >= payload_bits.len() {
            break;
        }
        let mut value = 0u8;
        for j in 0..lsb_bits {
            if bit_index >= payload_bits.len() {
                break;
            }
            value |= payload_bits[bit_index] << j;
            bit_index += 1;
        }
        carrier[pos] = (carrier[pos] & !mask) | (value & mask);
    }

    // Scatter the modified carrier back into the frames.
    let mut offset = 0usize;
    for (frame, frame_regions) in mp3.frames_mut().iter_mut().zip(&regions) {
        let len = frame_regions.safe_len();
        if len == 0 {
            continue;
        }
        frame.data = frame_regions.reconstruct(&carrier[offset..offset + len]);
        offset += len;
    }

    debug!(
        "embedded {} payload bytes into {} of {} carrier bytes ({} bits/byte)",
        payload.len(),
        need_bytes,
        carrier.len(),
        lsb_bits
    );

    Ok(mp3.to_bytes())
}

/// Extract a secret from a stego MP3 produced by [`embed`] with the same
/// configuration.
///
/// # Errors
/// - [`StegoError::InvalidKey`] / [`StegoError::InvalidLsbBits`] on bad config.
/// - [`StegoError::MalformedMp3`] if the carrier cannot be parsed.
/// - [`StegoError::NoSafeCapacity`] if no frame yields safe bytes.
/// - [`StegoError::InvalidEnvelope`] / [`StegoError::Truncated`] when the
///   decoded envelope is garbage, the usual symptom of a wrong key or
///   mismatched parameters.
pub fn extract(mp3_bytes: &[u8], config: &StegoConfig) -> Result<ExtractedSecret, StegoError> {
    config.validate()?;

    let mp3 = Mp3File::from_bytes(mp3_bytes)?;
    let regions = analyze_frames(&mp3);
    let carrier = collect_carrier(&regions);
    if carrier.is_empty() {
        return Err(StegoError::NoSafeCapacity);
    }

    // Full position sequence over the whole carrier, read in one pass.
    let positions = generate_positions(
        carrier.len(),
        carrier.len(),
        config.key(),
        config.use_random_start,
    );

    let lsb_bits = usize::from(config.lsb_bits);
    let mask = low_bits_mask(config.lsb_bits);
    let mut bits = Vec::with_capacity(positions.len() * lsb_bits);
    for &pos in &positions {
        let value = carrier[pos] & mask;
        for j in 0..lsb_bits {
            bits.push((value >> j) & 1);
        }
    }

    let mut buf = bits_to_bytes(&bits);
    if buf.len() < ENVELOPE_OVERHEAD {
        return Err(StegoError::Truncated);
    }
    if config.use_encryption {
        buf = ExtendedVigenere::new(config.key()).decrypt(&buf);
    }

    let (data, filename) = envelope::parse_envelope(&buf)?;

    debug!(
        "extracted {} secret bytes from {} carrier bytes",
        data.len(),
        carrier.len()
    );

    Ok(ExtractedSecret { data, filename })
}

/// Mask selecting the low `lsb_bits` of a byte.
fn low_bits_mask(lsb_bits: u8) -> u8 {
    debug_assert!((1..=4).contains(&lsb_bits));
    (1u8 << lsb_bits) - 1
}
