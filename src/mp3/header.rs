// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/ancilla

//! MP3 frame header decoding.
//!
//! Decodes the 4-byte frame header (11-bit sync, version, layer, bitrate
//! index, sample-rate index, padding, channel mode) and computes the frame
//! length with the MPEG-1 Layer III tables.

use super::error::{Mp3Error, Result};

/// Sync mask: the 11 high bits of the header must all be set.
pub const SYNC_MASK: u32 = 0xFFE0_0000;

/// Version ID value for MPEG-1.
pub const VERSION_MPEG1: u8 = 3;

/// Channel-mode value for single channel (mono).
pub const CHANNEL_MONO: u8 = 3;

/// MPEG-1 Layer III bitrates in kbit/s, indexed by the 4-bit bitrate field.
/// Index 0 is `free` and index 15 is `reserved`; both are rejected.
const BITRATES_V1_L3: [u32; 16] = [
    0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 0,
];

/// MPEG-1 sample rates in Hz, indexed by the 2-bit sample-rate field.
/// Index 3 is `reserved` and is rejected.
const SAMPLE_RATES_V1: [u32; 4] = [44100, 48000, 32000, 0];

/// Decoded MP3 frame header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    /// Raw 2-bit version ID (3 = MPEG-1, 2 = MPEG-2, 0 = MPEG-2.5).
    pub version_id: u8,
    /// Raw 2-bit layer index (1 = Layer III).
    pub layer: u8,
    /// True when the header announces a CRC-16 after it.
    pub crc_protected: bool,
    /// Bitrate in bit/s.
    pub bitrate: u32,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Padding bit: one extra byte appended to the frame.
    pub padding: bool,
    /// Raw 2-bit channel mode (3 = mono).
    pub channel_mode: u8,
    /// Total frame length in bytes, header included.
    pub frame_len: usize,
}

impl FrameHeader {
    /// Decode a 4-byte frame header. The caller has already verified the
    /// sync word with [`has_sync`].
    pub fn decode(bytes: [u8; 4]) -> Result<Self> {
        let header = u32::from_be_bytes(bytes);
        debug_assert!(has_sync(header));

        let version_id = ((header >> 19) & 0x3) as u8;
        let layer = ((header >> 17) & 0x3) as u8;
        let crc_protected = (header >> 16) & 0x1 == 0;
        let bitrate_index = ((header >> 12) & 0xF) as u8;
        let sample_rate_index = ((header >> 10) & 0x3) as u8;
        let padding = (header >> 9) & 0x1 == 1;
        let channel_mode = ((header >> 6) & 0x3) as u8;

        let bitrate = BITRATES_V1_L3[bitrate_index as usize] * 1000;
        if bitrate == 0 {
            return Err(Mp3Error::ReservedBitrate(bitrate_index));
        }
        let sample_rate = SAMPLE_RATES_V1[sample_rate_index as usize];
        if sample_rate == 0 {
            return Err(Mp3Error::ReservedSampleRate(sample_rate_index));
        }

        let frame_len = (144 * bitrate / sample_rate) as usize + usize::from(padding);

        Ok(Self {
            version_id,
            layer,
            crc_protected,
            bitrate,
            sample_rate,
            padding,
            channel_mode,
            frame_len,
        })
    }

    /// True for MPEG-1 streams (the common case; MPEG-2 halves side-info).
    pub fn is_mpeg1(&self) -> bool {
        self.version_id == VERSION_MPEG1
    }

    /// True for single-channel streams.
    pub fn is_mono(&self) -> bool {
        self.channel_mode == CHANNEL_MONO
    }
}

/// Check the 11-bit frame sync in a big-endian header word.
pub fn has_sync(header: u32) -> bool {
    header & SYNC_MASK == SYNC_MASK
}
