// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/ancilla

//! MP3 container codec (zero external dependencies beyond the `log` facade).
//!
//! Decomposes an MP3 byte stream into an optional opaque ID3v2 block, an
//! ordered list of MPEG-1 Layer III frames, and an optional ID3v1 trailer,
//! then re-emits the stream byte-for-byte (modulo whatever the caller
//! changed inside frame bodies). Frame headers are kept verbatim; the frame
//! body is the unit the steganography layer mutates.
//!
//! Supports:
//! - ID3v2 blocks (preserved opaquely, syncsafe size)
//! - ID3v1 trailers (preserved verbatim)
//! - byte-granularity resync on garbage between frames
//!
//! Does NOT support:
//! - free-format bitrate (index 0): rejected at parse time
//! - reserved bitrate/sample-rate table entries: rejected at parse time

pub mod bitio;
pub mod error;
pub mod header;
pub mod id3;
pub mod regions;

use log::debug;

pub use error::{Mp3Error, Result};
pub use header::FrameHeader;
pub use id3::{Id3v1Tag, Id3v2Header};
pub use regions::FrameRegions;

use id3::{ID3V1_LEN, ID3V2_HEADER_LEN};

/// One MP3 frame: its verbatim 4-byte header plus the frame body.
#[derive(Debug, Clone)]
pub struct Mp3Frame {
    /// Decoded header fields.
    pub header: FrameHeader,
    /// The original header bytes, re-emitted untouched.
    pub header_bytes: [u8; 4],
    /// Frame body (`frame_len - 4` bytes). Only region-analyzed safe bytes
    /// may be rewritten.
    pub data: Vec<u8>,
}

/// A parsed MP3 stream.
///
/// Created with [`Mp3File::from_bytes`]; after mutating frame bodies, call
/// [`Mp3File::to_bytes`] to re-emit the container.
#[derive(Debug, Clone)]
pub struct Mp3File {
    id3v2: Option<(Id3v2Header, Vec<u8>)>,
    frames: Vec<Mp3Frame>,
    id3v1: Option<Id3v1Tag>,
}

impl Mp3File {
    /// Parse an MP3 byte stream.
    ///
    /// Resynchronizes byte-by-byte when the sync word is missing, but once
    /// a sync is found the header is trusted: reserved bitrate/sample-rate
    /// entries and truncated frame bodies fail the parse.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut pos = 0usize;

        let id3v2 = match Self::read_id3v2(data)? {
            Some((header, payload)) => {
                pos = ID3V2_HEADER_LEN + header.size;
                Some((header, payload))
            }
            None => None,
        };

        let mut frames = Vec::new();
        let mut id3v1 = None;
        let mut skipped = 0usize;

        while pos + 4 <= data.len() {
            // The ID3v1 trailer occupies exactly the last 128 bytes.
            if data.len() - pos == ID3V1_LEN && &data[pos..pos + 3] == b"TAG" {
                let raw: [u8; ID3V1_LEN] = data[pos..pos + ID3V1_LEN].try_into().unwrap();
                id3v1 = Id3v1Tag::from_bytes(raw);
                break;
            }

            let header_bytes: [u8; 4] = data[pos..pos + 4].try_into().unwrap();
            if !header::has_sync(u32::from_be_bytes(header_bytes)) {
                pos += 1;
                skipped += 1;
                continue;
            }

            let header = FrameHeader::decode(header_bytes)?;
            let end = pos + header.frame_len;
            if end > data.len() {
                return Err(Mp3Error::UnexpectedEof);
            }

            frames.push(Mp3Frame {
                header,
                header_bytes,
                data: data[pos + 4..end].to_vec(),
            });
            pos = end;
        }

        if frames.is_empty() {
            return Err(Mp3Error::NoFrames);
        }

        debug!(
            "parsed mp3: {} frames, id3v2: {}, id3v1: {}, resync skipped {} bytes",
            frames.len(),
            id3v2.is_some(),
            id3v1.is_some(),
            skipped
        );

        Ok(Self {
            id3v2,
            frames,
            id3v1,
        })
    }

    /// Probe for an ID3v2 block at the stream start.
    fn read_id3v2(data: &[u8]) -> Result<Option<(Id3v2Header, Vec<u8>)>> {
        if data.len() < ID3V2_HEADER_LEN {
            return Ok(None);
        }
        let probe: [u8; ID3V2_HEADER_LEN] = data[..ID3V2_HEADER_LEN].try_into().unwrap();
        let Some(header) = Id3v2Header::decode(&probe) else {
            return Ok(None);
        };
        let end = ID3V2_HEADER_LEN + header.size;
        if data.len() < end {
            return Err(Mp3Error::UnexpectedEof);
        }
        let payload = data[ID3V2_HEADER_LEN..end].to_vec();
        Ok(Some((header, payload)))
    }

    /// Re-emit the container: ID3v2 block, frames, ID3v1 trailer, in order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();

        if let Some((header, payload)) = &self.id3v2 {
            out.extend_from_slice(&header.encode());
            out.extend_from_slice(payload);
        }

        for frame in &self.frames {
            out.extend_from_slice(&frame.header_bytes);
            out.extend_from_slice(&frame.data);
        }

        if let Some(tag) = &self.id3v1 {
            out.extend_from_slice(tag.as_bytes());
        }

        out
    }

    /// The parsed frames, in stream order.
    pub fn frames(&self) -> &[Mp3Frame] {
        &self.frames
    }

    /// Mutable access to the frames, for rewriting safe regions.
    pub fn frames_mut(&mut self) -> &mut [Mp3Frame] {
        &mut self.frames
    }

    /// The ID3v2 header and opaque payload, when present.
    pub fn id3v2(&self) -> Option<(&Id3v2Header, &[u8])> {
        self.id3v2.as_ref().map(|(h, p)| (h, p.as_slice()))
    }

    /// The ID3v1 trailer, when present.
    pub fn id3v1(&self) -> Option<&Id3v1Tag> {
        self.id3v1.as_ref()
    }
}
