// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Decrypt, DecryptBytes, DecryptMode, Stream, decrypt_block_size, util};
use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::keypair::PrivateKey;
use crate::numtheory::pow_mod;
use crate::util::trim_ascii_whitespace;

use zeroize::{Zeroize, ZeroizeOnDrop};

impl Decrypt for PrivateKey {
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Vec<u8>> {
        let block_size = self.checked_block_size()?;

        // m = c^d mod pq
        let m = pow_mod(ciphertext.value(), &self.d, &self.pq);

        util::unmarked_payload(&m, block_size)
    }
}

impl DecryptBytes for PrivateKey {
    fn decrypt_bytes<T: AsRef<[u8]>>(&self, text: T) -> Result<Vec<u8>> {
        let mut decryptor = self.decryptor()?;
        let mut output = decryptor.update(text)?;
        output.extend(decryptor.finalize()?);
        Ok(output)
    }
}

/// Internal state of the streaming decryptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecryptorState {
    /// Reading ciphertext lines.
    Reading,
    /// An unparsable line ended the stream; further input is ignored.
    Ended,
}

/// Room for whitespace around a ciphertext line.
const LINE_PADDING: usize = 64;

/// Incremental (streaming) decryption context.
///
/// Accepts ciphertext text in arbitrary pieces, decrypts every complete line
/// and returns the recovered payload bytes. Surrounding whitespace is ignored
/// and blank lines are skipped. A final line without a newline is handled by
/// [`finalize`](Stream::finalize).
///
/// A ciphertext is smaller than `n < pq²`, so a line longer than twice the
/// hex width of `pq` (plus padding) is malformed and is not buffered further.
#[allow(missing_debug_implementations)]
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Decryptor<'a> {
    #[zeroize(skip)]
    priv_key: &'a PrivateKey,

    /// Ciphertext text not yet terminated by a newline.
    buffer: Vec<u8>,

    #[zeroize(skip)]
    mode: DecryptMode,

    #[zeroize(skip)]
    state: DecryptorState,

    block_size: usize,

    /// Longest line accepted, in bytes.
    max_line: usize,

    /// Number of blocks decrypted so far.
    blocks: usize,
}

impl<'a> Decryptor<'a> {
    pub(crate) fn new(priv_key: &'a PrivateKey, mode: DecryptMode) -> Result<Self> {
        let block_size = priv_key.checked_block_size()?;
        let max_line = 2 * priv_key.pq.bits().div_ceil(4) + LINE_PADDING;
        log::debug!(
            "decrypting with {}-bit modulus, block size {block_size} bytes ({mode:?})",
            priv_key.pq.bits()
        );

        Ok(Self {
            priv_key,
            buffer: Vec::new(),
            mode,
            state: DecryptorState::Reading,
            block_size,
            max_line,
            blocks: 0,
        })
    }

    /// Number of ciphertext lines decrypted so far.
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    /// Decrypt one line (terminator already removed) into `output`.
    fn process_line(&mut self, line: &[u8], output: &mut Vec<u8>) -> Result<()> {
        if line.len() > self.max_line {
            return self.reject_line("line too long");
        }
        let line = trim_ascii_whitespace(line);
        if line.is_empty() {
            return Ok(());
        }

        let Ok(ciphertext) = Ciphertext::from_hex(line) else {
            return self.reject_line("not hexadecimal");
        };

        let m = pow_mod(ciphertext.value(), &self.priv_key.d, &self.priv_key.pq);
        let payload = util::unmarked_payload(&m, self.block_size)?;
        output.extend_from_slice(&payload);

        log::trace!("decrypted block {} ({} payload bytes)", self.blocks, payload.len());
        self.blocks += 1;
        Ok(())
    }

    /// Apply the mode's policy to a malformed line.
    fn reject_line(&mut self, reason: &str) -> Result<()> {
        match self.mode {
            DecryptMode::Strict => Err(Error::InvalidCiphertext(format!(
                "line after block {}: {reason}",
                self.blocks
            ))),
            DecryptMode::Lenient => {
                log::warn!(
                    "ciphertext line after block {} is malformed ({reason}); treating it as end of stream",
                    self.blocks
                );
                self.state = DecryptorState::Ended;
                Ok(())
            }
        }
    }

    fn process_buffer(&mut self, output: &mut Vec<u8>) -> Result<()> {
        let mut start = 0;
        while self.state == DecryptorState::Reading {
            let Some(offset) = self.buffer[start..].iter().position(|&b| b == b'\n') else {
                break;
            };
            let line = self.buffer[start..start + offset].to_vec();
            start += offset + 1;
            self.process_line(&line, output)?;
        }

        if self.state == DecryptorState::Reading && self.buffer.len() - start > self.max_line {
            self.reject_line("line too long")?;
        }

        if self.state == DecryptorState::Ended {
            self.buffer.zeroize();
        } else {
            self.buffer.drain(..start);
        }
        Ok(())
    }
}

impl<'a> Stream for Decryptor<'a> {
    fn update<D: AsRef<[u8]>>(&mut self, data: D) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        if self.state == DecryptorState::Ended {
            return Ok(output);
        }

        self.buffer.extend_from_slice(data.as_ref());
        self.process_buffer(&mut output)?;
        Ok(output)
    }

    fn finalize(mut self) -> Result<Vec<u8>> {
        let mut output = Vec::new();

        if self.state == DecryptorState::Reading && !self.buffer.is_empty() {
            let line = std::mem::take(&mut self.buffer);
            self.process_line(&line, &mut output)?;
        }

        log::debug!("decryption finished after {} blocks", self.blocks);
        Ok(output)
    }
}

impl<'a> PrivateKey {
    /// Decryption block size in bytes, derived from `pq`.
    pub fn block_size(&self) -> usize {
        decrypt_block_size(&self.pq)
    }

    /// Create a streaming decryptor that treats an unparsable line as the
    /// end of the ciphertext.
    pub fn decryptor(&'a self) -> Result<Decryptor<'a>> {
        Decryptor::new(self, DecryptMode::default())
    }

    /// Create a streaming decryptor with an explicit parse-failure policy.
    pub fn decryptor_with_mode(&'a self, mode: DecryptMode) -> Result<Decryptor<'a>> {
        Decryptor::new(self, mode)
    }

    fn checked_block_size(&self) -> Result<usize> {
        match self.block_size() {
            0 | 1 => Err(Error::ModulusTooSmall {
                bits: self.pq.bits(),
            }),
            size => Ok(size),
        }
    }
}
