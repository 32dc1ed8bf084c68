// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/ancilla

//! Error types for the steganography pipeline.
//!
//! [`StegoError`] covers all failure modes from MP3 parsing through
//! position generation and envelope extraction.

use core::fmt;

use crate::mp3::Mp3Error;

/// Errors that can occur during embedding or extraction.
#[derive(Debug)]
pub enum StegoError {
    /// The key is empty or longer than 256 bytes.
    InvalidKey,
    /// The LSB depth is outside 1..=4.
    InvalidLsbBits(u8),
    /// The carrier could not be parsed as an MP3 stream.
    MalformedMp3(Mp3Error),
    /// The carrier has no ancillary/padding bytes to write into.
    NoSafeCapacity,
    /// The payload does not fit the carrier's capacity.
    CapacityExceeded {
        /// Bytes required.
        need: usize,
        /// Bytes available.
        have: usize,
    },
    /// Extracted envelope lengths fail the sanity bounds (wrong key or
    /// parameters, or not a stego file).
    InvalidEnvelope,
    /// The extracted buffer ends before the envelope does.
    Truncated,
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKey => write!(f, "key must be 1..=256 bytes"),
            Self::InvalidLsbBits(n) => write!(f, "lsb_bits must be 1..=4, got {n}"),
            Self::MalformedMp3(e) => write!(f, "malformed MP3: {e}"),
            Self::NoSafeCapacity => write!(f, "no safe ancillary data found in MP3 frames"),
            Self::CapacityExceeded { need, have } => {
                write!(f, "secret too large: need {need} bytes, capacity {have} bytes")
            }
            Self::InvalidEnvelope => write!(f, "invalid payload envelope (wrong key?)"),
            Self::Truncated => write!(f, "extracted data is truncated (wrong key?)"),
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedMp3(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Mp3Error> for StegoError {
    fn from(e: Mp3Error) -> Self {
        Self::MalformedMp3(e)
    }
}
