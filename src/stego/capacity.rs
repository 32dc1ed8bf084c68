// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/ancilla

//! Embedding capacity estimation.
//!
//! Capacity is the number of payload bytes that fit the carrier's safe
//! view at a given LSB depth, minus the envelope's fixed length-field
//! overhead. Frames whose region analysis fails contribute nothing, the
//! same rule the embed and extract paths apply.

use log::warn;

use crate::mp3::{FrameRegions, Mp3File};
use crate::stego::envelope::ENVELOPE_OVERHEAD;
use crate::stego::error::StegoError;
use crate::stego::StegoConfig;

/// Parse a carrier and report its usable payload capacity in bytes for the
/// given configuration.
///
/// # Errors
/// Config validation, MP3 parse and [`StegoError::NoSafeCapacity`] failures,
/// as for [`embed`](crate::embed).
pub fn capacity(mp3_bytes: &[u8], config: &StegoConfig) -> Result<usize, StegoError> {
    config.validate()?;
    let mp3 = Mp3File::from_bytes(mp3_bytes)?;
    estimate_capacity(&mp3, config.lsb_bits)
}

/// Usable payload capacity in bytes for a parsed carrier.
///
/// Returns `floor(total_safe_bytes * lsb_bits / 8) - 8`.
///
/// # Errors
/// [`StegoError::NoSafeCapacity`] if the carrier has no safe bytes at all,
/// or too few to hold even the envelope length fields.
pub fn estimate_capacity(mp3: &Mp3File, lsb_bits: u8) -> Result<usize, StegoError> {
    let mut total_safe = 0usize;
    let mut skipped = 0usize;

    for frame in mp3.frames() {
        match FrameRegions::analyze(&frame.header, &frame.data) {
            Ok(regions) => total_safe += regions.safe_len(),
            Err(_) => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!("capacity estimate skipped {skipped} unanalyzable frames");
    }

    capacity_from_safe(total_safe, lsb_bits)
}

/// Capacity formula over a known safe-byte total.
pub(crate) fn capacity_from_safe(total_safe: usize, lsb_bits: u8) -> Result<usize, StegoError> {
    if total_safe == 0 {
        return Err(StegoError::NoSafeCapacity);
    }

    let capacity = total_safe * usize::from(lsb_bits) / 8;
    if capacity < ENVELOPE_OVERHEAD {
        return Err(StegoError::NoSafeCapacity);
    }
    Ok(capacity - ENVELOPE_OVERHEAD)
}
