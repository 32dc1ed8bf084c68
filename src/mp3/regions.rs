// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/ancilla

//! Per-frame region analysis.
//!
//! A Layer III frame body splits into four regions:
//!
//! ```text
//! [side_info][main_data][ancillary_data][padding]
//! ```
//!
//! Side-info and main-data carry the coded audio and must never change.
//! Ancillary data and the trailing run of zero bytes are ignored by
//! decoders, so they form the "safe to modify" view used for embedding.
//!
//! The classification is a heuristic, not a full decoder: `main_data` is
//! sized from the summed `part2_3_length` fields, and any zero byte run at
//! the end of the frame counts as padding even if a decoder would treat it
//! as ancillary content. Correctness only requires that embedding and
//! extraction classify the identical bytes identically.

use super::bitio::BitReader;
use super::error::{Mp3Error, Result};
use super::header::FrameHeader;

/// Bytes reserved at the end of a frame for the ancillary/padding region,
/// clipping `main_data` when the side-info would claim more.
pub const ANCILLARY_RESERVE: usize = 20;

/// Per-granule, per-channel side-info fields needed to size main data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GranuleChannel {
    /// Bits of Huffman-coded data (part2 + part3) for this granule/channel.
    pub part2_3_length: u32,
    pub big_values: u32,
    pub global_gain: u32,
}

/// A frame body decomposed into its four regions.
///
/// Region boundaries are fixed at analysis time; [`FrameRegions::reconstruct`]
/// re-emits a body of the original length with a replacement safe view.
#[derive(Debug, Clone, Default)]
pub struct FrameRegions {
    side_info: Vec<u8>,
    main_data: Vec<u8>,
    ancillary: Vec<u8>,
    padding: Vec<u8>,
}

impl FrameRegions {
    /// Analyze a frame body into regions.
    pub fn analyze(header: &FrameHeader, data: &[u8]) -> Result<Self> {
        if data.len() < 4 {
            return Err(Mp3Error::FrameTooShort);
        }

        let side_info_size = side_info_size(header);
        if side_info_size >= data.len() {
            // Degenerate frame: everything is side-info, nothing is safe.
            return Ok(Self {
                side_info: data.to_vec(),
                ..Self::default()
            });
        }

        let side_info = &data[..side_info_size];
        let rest = &data[side_info_size..];

        let granules = parse_side_info(header, side_info)?;
        let main_bits: u32 = granules.iter().map(|g| g.part2_3_length).sum();
        let mut main_bytes = (main_bits as usize).div_ceil(8);

        // Clip so the frame always keeps room for an ancillary/padding
        // region, even when the side-info claims more.
        let max_main = rest.len().checked_sub(ANCILLARY_RESERVE).unwrap_or(rest.len());
        main_bytes = main_bytes.min(max_main);

        let main_data = &rest[..main_bytes];
        let tail = &rest[main_bytes..];

        // The maximal trailing run of zero bytes is padding; everything
        // before it is ancillary data.
        let padding_start = tail
            .iter()
            .rposition(|&b| b != 0x00)
            .map_or(0, |i| i + 1);

        Ok(Self {
            side_info: side_info.to_vec(),
            main_data: main_data.to_vec(),
            ancillary: tail[..padding_start].to_vec(),
            padding: tail[padding_start..].to_vec(),
        })
    }

    /// Empty regions for a frame that could not be analyzed: nothing is
    /// safe and the frame passes through unmodified.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The "safe to modify" view: ancillary data followed by padding.
    pub fn safe_bytes(&self) -> Vec<u8> {
        let mut safe = Vec::with_capacity(self.safe_len());
        safe.extend_from_slice(&self.ancillary);
        safe.extend_from_slice(&self.padding);
        safe
    }

    /// Length of the safe view.
    pub fn safe_len(&self) -> usize {
        self.ancillary.len() + self.padding.len()
    }

    /// Length of the immutable prefix (side-info + main data).
    pub fn protected_len(&self) -> usize {
        self.side_info.len() + self.main_data.len()
    }

    /// Re-emit the frame body with a replacement safe view.
    ///
    /// The result always has the original body length: a shorter `safe` is
    /// zero-padded back to the region size, a longer one is truncated.
    pub fn reconstruct(&self, safe: &[u8]) -> Vec<u8> {
        let region_len = self.safe_len();
        let mut body =
            Vec::with_capacity(self.side_info.len() + self.main_data.len() + region_len);
        body.extend_from_slice(&self.side_info);
        body.extend_from_slice(&self.main_data);
        if safe.len() <= region_len {
            body.extend_from_slice(safe);
            body.resize(body.len() + region_len - safe.len(), 0x00);
        } else {
            body.extend_from_slice(&safe[..region_len]);
        }
        body
    }
}

/// Side-info size in bytes for a frame header.
pub fn side_info_size(header: &FrameHeader) -> usize {
    if header.is_mpeg1() {
        if header.is_mono() {
            17
        } else {
            32
        }
    } else if header.is_mono() {
        9
    } else {
        17
    }
}

/// Parse the side-info fields that size the main-data region.
///
/// Reads `part2_3_length`, `big_values` and `global_gain` consecutively for
/// each granule/channel; the remaining granule fields are not needed for
/// region sizing and are not skipped over.
pub fn parse_side_info(header: &FrameHeader, side_info: &[u8]) -> Result<Vec<GranuleChannel>> {
    let mut br = BitReader::new(side_info);

    // main_data_begin
    br.skip_bits(if header.is_mpeg1() { 9 } else { 8 })?;

    // private bits
    let private_bits = match (header.is_mpeg1(), header.is_mono()) {
        (true, true) => 5,
        (true, false) => 3,
        (false, true) => 1,
        (false, false) => 2,
    };
    br.skip_bits(private_bits)?;

    let granules = if header.is_mpeg1() { 2 } else { 1 };
    let channels = if header.is_mono() { 1 } else { 2 };

    let mut result = Vec::with_capacity(granules * channels);
    for _ in 0..granules {
        for _ in 0..channels {
            let part2_3_length = br.read_bits(12)?;
            let big_values = br.read_bits(9)?;
            let global_gain = br.read_bits(8)?;
            result.push(GranuleChannel {
                part2_3_length,
                big_values,
                global_gain,
            });
        }
    }
    Ok(result)
}
