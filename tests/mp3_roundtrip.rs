// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/ancilla

//! MP3 container round-trip tests verifying byte-for-byte parse/re-emit
//! fidelity.

mod common;

use ancilla::Mp3File;

#[test]
fn roundtrip_bare_frames() {
    let data = common::carrier(8);
    let mp3 = Mp3File::from_bytes(&data).unwrap();
    assert_eq!(mp3.frames().len(), 8);
    assert_eq!(mp3.to_bytes(), data, "bare frame round-trip failed");
}

#[test]
fn roundtrip_with_id3v2() {
    let data = common::carrier_with_id3v2(4, 500);
    let mp3 = Mp3File::from_bytes(&data).unwrap();
    let (header, payload) = mp3.id3v2().unwrap();
    assert_eq!(header.size, 500);
    assert_eq!(payload.len(), 500);
    assert_eq!(mp3.to_bytes(), data, "ID3v2 round-trip failed");
}

#[test]
fn roundtrip_with_id3v1() {
    let mut data = common::carrier(4);
    common::append_id3v1(&mut data, b"Roundtrip");
    let mp3 = Mp3File::from_bytes(&data).unwrap();
    assert_eq!(mp3.id3v1().unwrap().title(), "Roundtrip");
    assert_eq!(mp3.to_bytes(), data, "ID3v1 round-trip failed");
}

#[test]
fn roundtrip_with_both_tags() {
    let mut data = common::carrier_with_id3v2(4, 64);
    common::append_id3v1(&mut data, b"Both");
    let mp3 = Mp3File::from_bytes(&data).unwrap();
    assert!(mp3.id3v2().is_some());
    assert!(mp3.id3v1().is_some());
    assert_eq!(mp3.frames().len(), 4);
    assert_eq!(mp3.to_bytes(), data, "combined tag round-trip failed");
}

#[test]
fn resync_finds_frames_after_garbage() {
    let mut data = vec![0x12, 0x34, 0x56, 0x78, 0x9A];
    data.extend_from_slice(&common::carrier(3));
    let mp3 = Mp3File::from_bytes(&data).unwrap();
    assert_eq!(mp3.frames().len(), 3);
}

#[test]
fn frame_headers_and_lengths_decoded() {
    let data = common::carrier(2);
    let mp3 = Mp3File::from_bytes(&data).unwrap();
    for frame in mp3.frames() {
        assert_eq!(frame.header_bytes, common::FRAME_HEADER);
        assert_eq!(frame.header.bitrate, 128_000);
        assert_eq!(frame.header.sample_rate, 44_100);
        assert_eq!(frame.header.frame_len, common::FRAME_LEN);
        assert_eq!(frame.data.len(), common::FRAME_LEN - 4);
    }
}

#[test]
fn padded_frames_roundtrip() {
    // Padding bit set: 418-byte frames.
    let mut data = Vec::new();
    for _ in 0..3 {
        let mut frame = vec![0u8; 418];
        frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x92, 0x00]);
        data.extend_from_slice(&frame);
    }
    let mp3 = Mp3File::from_bytes(&data).unwrap();
    assert_eq!(mp3.frames().len(), 3);
    for frame in mp3.frames() {
        assert!(frame.header.padding);
        assert_eq!(frame.header.frame_len, 418);
    }
    assert_eq!(mp3.to_bytes(), data, "padded frame round-trip failed");
}

#[test]
fn varied_frame_bodies_roundtrip() {
    let mut data = Vec::new();
    data.extend_from_slice(&common::frame(561, 0x00));
    data.extend_from_slice(&common::frame(0, 0xA5));
    data.extend_from_slice(&common::frame(4095, 0x17));
    let mp3 = Mp3File::from_bytes(&data).unwrap();
    assert_eq!(mp3.frames().len(), 3);
    assert_eq!(mp3.to_bytes(), data, "varied body round-trip failed");
}
