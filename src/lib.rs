// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/ancilla

//! # ancilla
//!
//! Steganography engine for hiding a secret file inside an MP3. The
//! carrier stays a playable MP3 of identical length: frame headers,
//! side-info, the Huffman-coded audio and any ID3 tags are preserved
//! byte-for-byte, and the payload lives in the ancillary/padding bytes at
//! the tail of each frame, `lsb_bits` low bits per byte.
//!
//! The `mp3` module is a std-only container codec giving region-level
//! access to frame bodies. The `stego` module carries the embedding layer:
//! extended Vigenère payload encipherment, a key-seeded position
//! permutation (MD5 seed, pinned ChaCha20 generator) and the LSB codec.
//!
//! The payload is fragile by construction: re-encoding, resampling or any
//! other transformation that touches the chosen carrier bytes destroys it.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use ancilla::{embed, extract, StegoConfig};
//!
//! let carrier = std::fs::read("song.mp3").unwrap();
//! let mut config = StegoConfig::new("passphrase", 2);
//! config.use_encryption = true;
//! config.use_random_start = true;
//! config.secret_filename = "note.txt".into();
//!
//! let stego = embed(&carrier, b"hello world", &config).unwrap();
//! let secret = extract(&stego, &config).unwrap();
//! assert_eq!(secret.data, b"hello world");
//! assert_eq!(secret.filename, "note.txt");
//! ```

pub mod mp3;
pub mod stego;

pub use mp3::{FrameHeader, FrameRegions, Mp3Error, Mp3File};
pub use stego::{capacity, embed, extract, ExtractedSecret, StegoConfig, StegoError};
pub use stego::{MAX_DATA_LEN, MAX_FILENAME_LEN, MAX_KEY_LEN, MAX_LSB_BITS, MIN_LSB_BITS};
