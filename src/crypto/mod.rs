// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Block cipher built on the key pair.
//!
//! Plaintext is cut into chunks of at most `block_size - 1` bytes. Each chunk
//! is prefixed with [`BLOCK_MARKER`], read as a big-endian integer `m` and
//! encrypted to `c = m^n mod n`, emitted as one hexadecimal line. Decryption
//! computes `m = c^d mod pq`, checks the marker and drops it.
//!
//! Encryption sizes blocks from `n` and decryption from `pq`; for any key
//! pair the decryption block is at least as large as the encryption block.

mod decrypt;
mod encrypt;
mod util;

pub use decrypt::Decryptor;
pub use encrypt::Encryptor;

use crate::ciphertext::Ciphertext;
use crate::error::Result;

use num_bigint_dig::BigUint;

/// Leading byte of every plaintext block.
///
/// Keeps the block integer's most significant byte non-zero, so leading zero
/// bytes of the payload survive the integer round trip.
pub const BLOCK_MARKER: u8 = 0xFF;

/// Encryption block size in bytes for modulus `n`: `⌊(|n|/2 - 1) / 8⌋`.
///
/// The block includes the marker byte.
pub fn encrypt_block_size(n: &BigUint) -> usize {
    (n.bits() / 2).saturating_sub(1) / 8
}

/// Decryption block size in bytes for modulus `pq`: `⌊(|pq| - 1) / 8⌋`.
pub fn decrypt_block_size(pq: &BigUint) -> usize {
    pq.bits().saturating_sub(1) / 8
}

/// How the decryptor treats a ciphertext line that is not hexadecimal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DecryptMode {
    /// The line ends the ciphertext stream; it and everything after it is
    /// ignored.
    #[default]
    Lenient,
    /// The line is reported as [`Error::InvalidCiphertext`](crate::Error::InvalidCiphertext).
    Strict,
}

/// Encrypts a single plaintext block.
pub trait Encrypt {
    /// Encrypt one chunk of at most `block_size - 1` bytes.
    ///
    /// For arbitrary-length data, use [`EncryptBytes::encrypt_bytes`].
    fn encrypt<P: AsRef<[u8]>>(&self, chunk: P) -> Result<Ciphertext>;
}

/// Encrypts arbitrary-length data by splitting it into blocks.
pub trait EncryptBytes {
    /// Encrypt arbitrary-length input and return the ciphertext text, one
    /// lowercase hexadecimal line per block.
    fn encrypt_bytes<P: AsRef<[u8]>>(&self, data: P) -> Result<Vec<u8>>;
}

/// Decrypts a single ciphertext block into its payload bytes.
pub trait Decrypt {
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Vec<u8>>;
}

/// Decrypts ciphertext text produced by [`EncryptBytes`].
pub trait DecryptBytes {
    /// Decrypt every line of `text` and return the concatenated payloads.
    fn decrypt_bytes<T: AsRef<[u8]>>(&self, text: T) -> Result<Vec<u8>>;
}

/// Stateful interface for incremental processing.
///
/// Implementations accept input in chunks via [`update`](Stream::update)
/// and return whatever output is already complete. [`finalize`](Stream::finalize)
/// flushes the remaining state and consumes the instance.
///
/// The concatenated output does not depend on how the input was split.
pub trait Stream {
    /// Process the next chunk of input.
    fn update<D: AsRef<[u8]>>(&mut self, data: D) -> Result<Vec<u8>>;

    /// Process buffered input and return the remaining output.
    fn finalize(self) -> Result<Vec<u8>>;
}
