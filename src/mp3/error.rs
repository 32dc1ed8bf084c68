// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/ancilla

//! Error types for MP3 container parsing and re-emission.

use std::fmt;

/// Errors that can occur while parsing an MP3 byte stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mp3Error {
    /// Input data ended inside a structure (ID3 block, frame payload).
    UnexpectedEof,
    /// Bitrate index is `free` (0) or `reserved` (15).
    ReservedBitrate(u8),
    /// Sample-rate index is `reserved` (3).
    ReservedSampleRate(u8),
    /// Frame data is too short to hold side information.
    FrameTooShort,
    /// No decodable frame was found in the stream.
    NoFrames,
}

impl fmt::Display for Mp3Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => write!(f, "unexpected end of MP3 data"),
            Self::ReservedBitrate(idx) => write!(f, "unsupported bitrate index: {idx}"),
            Self::ReservedSampleRate(idx) => write!(f, "unsupported sample-rate index: {idx}"),
            Self::FrameTooShort => write!(f, "frame data too short"),
            Self::NoFrames => write!(f, "no MP3 frames found"),
        }
    }
}

impl std::error::Error for Mp3Error {}

pub type Result<T> = std::result::Result<T, Mp3Error>;
