// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/ancilla

//! Extended Vigenère stream cipher.
//!
//! Byte-wise Vigenère over the full 0–255 alphabet:
//! `c[i] = p[i] + key[i mod |key|] (mod 256)`. Length-preserving, all byte
//! values legal. This is an obfuscation layer, not authenticated
//! encryption; the envelope's length sanity checks are the only wrong-key
//! detector.

use zeroize::Zeroizing;

/// Extended Vigenère cipher keyed with raw bytes.
pub struct ExtendedVigenere {
    key: Zeroizing<Vec<u8>>,
}

impl ExtendedVigenere {
    pub fn new(key: &[u8]) -> Self {
        Self {
            key: Zeroizing::new(key.to_vec()),
        }
    }

    /// Encrypt: add the repeating key, mod 256. An empty key is identity.
    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        if self.key.is_empty() {
            return plaintext.to_vec();
        }
        plaintext
            .iter()
            .zip(self.key.iter().cycle())
            .map(|(&p, &k)| p.wrapping_add(k))
            .collect()
    }

    /// Decrypt: subtract the repeating key, mod 256.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Vec<u8> {
        if self.key.is_empty() {
            return ciphertext.to_vec();
        }
        ciphertext
            .iter()
            .zip(self.key.iter().cycle())
            .map(|(&c, &k)| c.wrapping_sub(k))
            .collect()
    }
}
