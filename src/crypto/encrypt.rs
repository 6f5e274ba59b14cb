// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Encrypt, EncryptBytes, Stream, encrypt_block_size, util};
use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::keypair::PublicKey;
use crate::numtheory::pow_mod;

use zeroize::{Zeroize, ZeroizeOnDrop};

impl Encrypt for PublicKey {
    fn encrypt<P: AsRef<[u8]>>(&self, chunk: P) -> Result<Ciphertext> {
        let chunk = chunk.as_ref();
        let max = self.payload_size()?;
        if chunk.len() > max {
            return Err(Error::PlaintextTooLarge { max });
        }

        // c = m^n mod n
        let m = util::marked_block(chunk);
        let c = pow_mod(&m, &self.n, &self.n);

        Ok(Ciphertext::new(c))
    }
}

impl EncryptBytes for PublicKey {
    fn encrypt_bytes<P: AsRef<[u8]>>(&self, data: P) -> Result<Vec<u8>> {
        let mut encryptor = self.encryptor()?;
        let mut output = encryptor.update(data)?;
        output.extend(encryptor.finalize()?);
        Ok(output)
    }
}

/// Streaming encryption context.
///
/// Buffers plaintext until a full chunk of `block_size - 1` bytes is
/// available and emits one ciphertext line per chunk. The buffered plaintext
/// is zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Encryptor<'a> {
    #[zeroize(skip)]
    pub_key: &'a PublicKey,

    /// Plaintext not yet forming a full chunk.
    buffer: Vec<u8>,

    /// Payload bytes per block, excluding the marker.
    payload_size: usize,

    /// Number of blocks emitted so far.
    blocks: usize,
}

impl<'a> Encryptor<'a> {
    pub(crate) fn new(pub_key: &'a PublicKey) -> Result<Self> {
        let payload_size = pub_key.payload_size()?;
        log::debug!(
            "encrypting with {}-bit modulus, {payload_size} payload bytes per block",
            pub_key.bit_length()
        );

        Ok(Self {
            pub_key,
            buffer: Vec::with_capacity(payload_size),
            payload_size,
            blocks: 0,
        })
    }

    /// Number of ciphertext lines produced so far.
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    fn encrypt_chunk(&mut self, chunk: &[u8], output: &mut Vec<u8>) -> Result<()> {
        let ciphertext = self.pub_key.encrypt(chunk)?;
        output.extend_from_slice(ciphertext.to_hex().as_bytes());
        output.push(b'\n');

        log::trace!("encrypted block {} ({} payload bytes)", self.blocks, chunk.len());
        self.blocks += 1;
        Ok(())
    }
}

impl<'a> PublicKey {
    /// Encryption block size in bytes, including the marker byte.
    pub fn block_size(&self) -> usize {
        encrypt_block_size(&self.n)
    }

    /// Create a streaming encryptor for this key.
    ///
    /// Fails with [`Error::ModulusTooSmall`] if a block cannot carry at least
    /// one payload byte.
    pub fn encryptor(&'a self) -> Result<Encryptor<'a>> {
        Encryptor::new(self)
    }

    fn payload_size(&self) -> Result<usize> {
        match self.block_size() {
            0 | 1 => Err(Error::ModulusTooSmall {
                bits: self.bit_length(),
            }),
            size => Ok(size - 1),
        }
    }
}

impl<'a> Stream for Encryptor<'a> {
    fn update<D: AsRef<[u8]>>(&mut self, data: D) -> Result<Vec<u8>> {
        let mut data = data.as_ref();
        let mut output = Vec::new();

        // top up a partially filled chunk first
        if !self.buffer.is_empty() {
            let take = (self.payload_size - self.buffer.len()).min(data.len());
            self.buffer.extend_from_slice(&data[..take]);
            data = &data[take..];

            if self.buffer.len() < self.payload_size {
                return Ok(output);
            }
            let mut chunk = std::mem::take(&mut self.buffer);
            let result = self.encrypt_chunk(&chunk, &mut output);
            chunk.zeroize();
            result?;
        }

        let mut chunks = data.chunks_exact(self.payload_size);
        for chunk in &mut chunks {
            self.encrypt_chunk(chunk, &mut output)?;
        }
        self.buffer.extend_from_slice(chunks.remainder());

        Ok(output)
    }

    fn finalize(mut self) -> Result<Vec<u8>> {
        let mut output = Vec::new();

        if !self.buffer.is_empty() {
            let mut chunk = std::mem::take(&mut self.buffer);
            let result = self.encrypt_chunk(&chunk, &mut output);
            chunk.zeroize();
            result?;
        }

        log::debug!("encryption finished after {} blocks", self.blocks);
        Ok(output)
    }
}
