// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/ancilla

//! Carrier position selection.
//!
//! Maps the linear payload bitstream onto carrier byte positions: either a
//! sequential prefix `[0, need)` or, with scattering enabled, the prefix of
//! a key-seeded permutation of the whole carrier. Encoder and decoder must
//! produce the identical sequence, so the generator is pinned: a ChaCha20
//! PRNG seeded with the big-endian u64 taken from the first 8 bytes of
//! `MD5(key)`.
//!
//! # Cross-platform portability
//!
//! Draws use `u32` ranges (not `usize`) so native 64-bit and WASM 32-bit
//! builds consume identical amounts of PRNG entropy per step and produce
//! identical permutations. Carriers are far below the 4 GiB this caps.
//!
//! # Prefix stability
//!
//! Both branches are prefix-stable: asking for `n1 <= n2` positions yields
//! the same first `n1` entries. In scatter mode this holds because the full
//! permutation is materialized (fresh reseed per call, rejection sampling
//! over unseen positions) before slicing the prefix.

use md5::{Digest, Md5};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Derive the PRNG seed from the key: big-endian u64 over `MD5(key)[0..8]`.
pub fn derive_seed(key: &[u8]) -> u64 {
    let digest = Md5::digest(key);
    u64::from_be_bytes(digest[..8].try_into().unwrap())
}

/// Generate the first `need` carrier positions over a carrier of
/// `carrier_len` bytes.
///
/// Returns `min(need, carrier_len)` distinct positions in `[0, carrier_len)`.
pub fn generate_positions(
    carrier_len: usize,
    need: usize,
    key: &[u8],
    random_start: bool,
) -> Vec<usize> {
    if random_start {
        permuted_prefix(carrier_len, need, key)
    } else {
        (0..need.min(carrier_len)).collect()
    }
}

/// Prefix of the key-seeded permutation of `[0, carrier_len)`.
fn permuted_prefix(carrier_len: usize, need: usize, key: &[u8]) -> Vec<usize> {
    if carrier_len == 0 {
        return Vec::new();
    }

    let mut rng = ChaCha20Rng::seed_from_u64(derive_seed(key));
    let mut seen = vec![false; carrier_len];
    let mut order = Vec::with_capacity(carrier_len);

    // Rejection sampling: draw until every position has been accepted once.
    // Near full coverage this approaches O(n log n) draws, acceptable for
    // the tens of kilobytes of safe bytes a typical carrier yields.
    while order.len() < carrier_len {
        let pos = rng.gen_range(0..carrier_len as u32) as usize;
        if !seen[pos] {
            seen[pos] = true;
            order.push(pos);
        }
    }

    order.truncate(need.min(carrier_len));
    order
}
