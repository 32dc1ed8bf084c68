// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/ancilla

//! Steganographic embedding and extraction over MP3 ancillary bytes.
//!
//! The payload travels in a length-prefixed envelope, optionally
//! enciphered with an extended Vigenère over the key, scattered across the
//! carrier's safe bytes either sequentially or via a key-seeded
//! permutation, `lsb_bits` payload bits per carrier byte.
//!
//! Everything is deterministic per configuration: the same key and options
//! always select the same carrier positions, which is what lets
//! [`extract`](crate::extract) undo [`embed`](crate::embed).

pub mod bits;
pub mod capacity;
pub mod envelope;
pub mod error;
pub mod permute;
mod pipeline;
pub mod vigenere;

use zeroize::Zeroizing;

pub use capacity::{capacity, estimate_capacity};
pub use envelope::{MAX_DATA_LEN, MAX_FILENAME_LEN};
pub use error::StegoError;
pub use pipeline::{embed, extract, ExtractedSecret};

/// Maximum key length in bytes.
pub const MAX_KEY_LEN: usize = 256;

/// Minimum LSB depth.
pub const MIN_LSB_BITS: u8 = 1;

/// Maximum LSB depth. Higher depths raise capacity by rewriting more of
/// each safe byte; 4 still leaves the high nibble intact.
pub const MAX_LSB_BITS: u8 = 4;

/// Configuration for one embed or extract operation.
///
/// Extraction must use the same `key`, `use_encryption`,
/// `use_random_start` and `lsb_bits` the secret was embedded with.
/// `secret_filename` only matters on embed; it comes back from
/// [`extract`](crate::extract).
#[derive(Clone)]
pub struct StegoConfig {
    /// Key bytes: seed the position permutation and key the cipher.
    key: Zeroizing<Vec<u8>>,
    /// Encipher the payload envelope before embedding.
    pub use_encryption: bool,
    /// Scatter positions via the key-seeded permutation instead of
    /// embedding sequentially from index 0.
    pub use_random_start: bool,
    /// Payload bits per carrier byte (1..=4).
    pub lsb_bits: u8,
    /// Filename stored in the envelope (embed only, <= 255 bytes UTF-8).
    pub secret_filename: String,
}

impl StegoConfig {
    /// Create a configuration with encryption and scattering disabled.
    pub fn new(key: impl Into<Vec<u8>>, lsb_bits: u8) -> Self {
        Self {
            key: Zeroizing::new(key.into()),
            use_encryption: false,
            use_random_start: false,
            lsb_bits,
            secret_filename: String::new(),
        }
    }

    /// The raw key bytes.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Validate key length and LSB depth.
    ///
    /// # Errors
    /// - [`StegoError::InvalidKey`] if the key is empty or longer than 256 bytes.
    /// - [`StegoError::InvalidLsbBits`] if `lsb_bits` is outside 1..=4.
    pub fn validate(&self) -> Result<(), StegoError> {
        if self.key.is_empty() || self.key.len() > MAX_KEY_LEN {
            return Err(StegoError::InvalidKey);
        }
        if !(MIN_LSB_BITS..=MAX_LSB_BITS).contains(&self.lsb_bits) {
            return Err(StegoError::InvalidLsbBits(self.lsb_bits));
        }
        Ok(())
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn valid_config() {
        for lsb_bits in 1..=4 {
            assert!(StegoConfig::new(&b"key"[..], lsb_bits).validate().is_ok());
        }
    }

    #[test]
    fn empty_key_rejected() {
        let config = StegoConfig::new(Vec::new(), 1);
        assert!(matches!(config.validate(), Err(StegoError::InvalidKey)));
    }

    #[test]
    fn oversized_key_rejected() {
        let config = StegoConfig::new(vec![0u8; 257], 1);
        assert!(matches!(config.validate(), Err(StegoError::InvalidKey)));
    }

    #[test]
    fn max_len_key_accepted() {
        let config = StegoConfig::new(vec![0u8; 256], 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn lsb_bits_bounds() {
        assert!(matches!(
            StegoConfig::new(&b"key"[..], 0).validate(),
            Err(StegoError::InvalidLsbBits(0))
        ));
        assert!(matches!(
            StegoConfig::new(&b"key"[..], 5).validate(),
            Err(StegoError::InvalidLsbBits(5))
        ));
    }
}
