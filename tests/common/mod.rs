// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/ancilla

//! Synthetic MPEG-1 Layer III carriers for integration tests.
//!
//! All frames are 128 kbit/s, 44.1 kHz, stereo, no padding bit: 417 bytes
//! each, 32 bytes of side-info. The four `part2_3_length` side-info fields
//! control how much of the body counts as main data; the rest is the safe
//! ancillary/padding region the engine may rewrite.

#![allow(dead_code)]

/// Total frame length in bytes, header included.
pub const FRAME_LEN: usize = 417;

/// Side-info length for MPEG-1 stereo.
pub const SIDE_INFO_LEN: usize = 32;

/// Frame header: sync, MPEG-1, Layer III, no CRC, 128 kbit/s, 44.1 kHz,
/// stereo.
pub const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x00];

/// Pack an MPEG-1 stereo side-info block whose four `part2_3_length`
/// fields all carry `p23`; every other field is zero.
pub fn side_info(p23: u32) -> [u8; SIDE_INFO_LEN] {
    let mut bits = Vec::new();
    let mut push = |value: u32, n: usize| {
        for i in (0..n).rev() {
            bits.push(((value >> i) & 1) as u8);
        }
    };
    push(0, 9); // main_data_begin
    push(0, 3); // private bits
    for _ in 0..4 {
        push(p23, 12);
        push(0, 9); // big_values
        push(0, 8); // global_gain
    }
    let mut out = [0u8; SIDE_INFO_LEN];
    for (i, bit) in bits.iter().enumerate() {
        out[i / 8] |= bit << (7 - i % 8);
    }
    out
}

/// One frame with the given `part2_3_length` and body filler byte.
///
/// With `p23 = 0` and `fill = 0` the whole 381-byte tail is safe padding;
/// a nonzero `fill` makes it safe ancillary data instead.
pub fn frame(p23: u32, fill: u8) -> Vec<u8> {
    let mut frame = vec![fill; FRAME_LEN];
    frame[..4].copy_from_slice(&FRAME_HEADER);
    frame[4..4 + SIDE_INFO_LEN].copy_from_slice(&side_info(p23));
    frame
}

/// A carrier of `n` frames with zeroed bodies (381 safe bytes per frame).
pub fn carrier(n: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(n * FRAME_LEN);
    for _ in 0..n {
        data.extend_from_slice(&frame(0, 0));
    }
    data
}

/// A carrier of `n` frames preceded by an ID3v2 block of `tag_len` bytes.
pub fn carrier_with_id3v2(n: usize, tag_len: usize) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&[b'I', b'D', b'3', 3, 0, 0]);
    data.extend_from_slice(&syncsafe(tag_len));
    data.extend((0..tag_len).map(|i| (i % 251) as u8));
    data.extend_from_slice(&carrier(n));
    data
}

/// Append an ID3v1 trailer titled `title` to `data`.
pub fn append_id3v1(data: &mut Vec<u8>, title: &[u8]) {
    let mut tag = [0u8; 128];
    tag[..3].copy_from_slice(b"TAG");
    tag[3..3 + title.len()].copy_from_slice(title);
    data.extend_from_slice(&tag);
}

fn syncsafe(size: usize) -> [u8; 4] {
    [
        ((size >> 21) & 0x7F) as u8,
        ((size >> 14) & 0x7F) as u8,
        ((size >> 7) & 0x7F) as u8,
        (size & 0x7F) as u8,
    ]
}
