// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigUint;
use zeroize::Zeroizing;

use super::BLOCK_MARKER;
use crate::error::{Error, Result};

/// Builds the block integer `0xFF || chunk`, read big-endian.
pub fn marked_block(chunk: &[u8]) -> BigUint {
    let mut block = Zeroizing::new(Vec::with_capacity(chunk.len() + 1));
    block.push(BLOCK_MARKER);
    block.extend_from_slice(chunk);
    BigUint::from_bytes_be(&block)
}

/// Recovers the payload from a decrypted block integer.
///
/// The minimal big-endian form of `m` must start with the marker and fit in
/// `block_size` bytes; anything else means the ciphertext was corrupted or
/// encrypted under another key.
pub fn unmarked_payload(m: &BigUint, block_size: usize) -> Result<Vec<u8>> {
    let bytes = Zeroizing::new(m.to_bytes_be());

    if bytes.len() > block_size {
        return Err(Error::InvalidCiphertext(format!(
            "decrypted block of {} bytes exceeds {block_size}",
            bytes.len()
        )));
    }

    match bytes.split_first() {
        Some((&BLOCK_MARKER, payload)) => Ok(payload.to_vec()),
        _ => Err(Error::InvalidCiphertext("missing block marker".into())),
    }
}
