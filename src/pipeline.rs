// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reader/writer entry points for key generation, encryption and decryption.
//!
//! Each operation takes already opened streams; choosing files and handling
//! command line arguments is left to the caller.

use std::io::{ErrorKind, Read, Write};

use crate::crypto::{DecryptMode, Stream};
use crate::error::Result;
use crate::keyfile;
use crate::keypair::{KeyPair, KeyPairBuilder, PrivateKey, PublicKey};

/// Conventional file name for the public key.
pub const DEFAULT_PUBLIC_KEY_FILE: &str = "ss.pub";

/// Conventional file name for the private key.
pub const DEFAULT_PRIVATE_KEY_FILE: &str = "ss.priv";

/// Default modulus size for generated keys.
pub const DEFAULT_BIT_LENGTH: usize = KeyPairBuilder::DEFAULT_BIT_LENGTH;

/// Default Miller-Rabin rounds for generated keys.
pub const DEFAULT_ITERATIONS: usize = KeyPairBuilder::DEFAULT_ITERATIONS;

const READ_BUFFER_SIZE: usize = 8 * 1024;

/// Generate a key pair and write its public and private halves.
///
/// The generated pair is returned so callers can keep using it.
pub fn generate_keys<P, S>(builder: KeyPairBuilder, public_out: &mut P, private_out: &mut S) -> Result<KeyPair>
where
    P: Write + ?Sized,
    S: Write + ?Sized,
{
    let keypair = builder.build()?;

    keyfile::write_public(keypair.public_key(), public_out)?;
    public_out.flush()?;
    keyfile::write_private(keypair.private_key(), private_out)?;
    private_out.flush()?;

    log::info!(
        "wrote {}-bit key pair for {}",
        keypair.public_key().bit_length(),
        keypair.public_key().owner()
    );
    Ok(keypair)
}

/// Encrypt everything read from `input` and write the ciphertext lines to
/// `output`.
pub fn encrypt<R, W>(input: &mut R, output: &mut W, key: &PublicKey) -> Result<()>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut encryptor = key.encryptor()?;
    copy_through(input, output, |chunk| encryptor.update(chunk))?;
    output.write_all(&encryptor.finalize()?)?;
    output.flush()?;
    Ok(())
}

/// Decrypt ciphertext lines read from `input` and write the plaintext to
/// `output`. A line that is not hexadecimal ends the ciphertext.
pub fn decrypt<R, W>(input: &mut R, output: &mut W, key: &PrivateKey) -> Result<()>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    decrypt_with_mode(input, output, key, DecryptMode::default())
}

/// Like [`decrypt`], with an explicit policy for lines that are not
/// hexadecimal.
pub fn decrypt_with_mode<R, W>(input: &mut R, output: &mut W, key: &PrivateKey, mode: DecryptMode) -> Result<()>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut decryptor = key.decryptor_with_mode(mode)?;
    copy_through(input, output, |chunk| decryptor.update(chunk))?;
    output.write_all(&decryptor.finalize()?)?;
    output.flush()?;
    Ok(())
}

/// Feed `input` through `step` until end of input, writing each result.
fn copy_through<R, W, F>(input: &mut R, output: &mut W, mut step: F) -> Result<()>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
    F: FnMut(&[u8]) -> Result<Vec<u8>>,
{
    let mut buf = zeroize::Zeroizing::new(vec![0u8; READ_BUFFER_SIZE]);
    loop {
        let read = match input.read(&mut buf) {
            Ok(0) => return Ok(()),
            Ok(read) => read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        output.write_all(&step(&buf[..read])?)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use num_bigint_dig::BigUint;

    fn known_keypair() -> KeyPair {
        KeyPair::from_primes(BigUint::from(65521u32), BigUint::from(4_294_967_291u64), "alice")
            .unwrap()
    }

    /// Reader that yields one byte per call and reports an interruption
    /// before every byte.
    struct Trickle<'a> {
        data: &'a [u8],
        interrupt: bool,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(ErrorKind::Interrupted.into());
            }
            match self.data.split_first() {
                Some((&b, rest)) if !buf.is_empty() => {
                    buf[0] = b;
                    self.data = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    #[test]
    fn encrypt_known_answer() {
        let keypair = known_keypair();
        let mut out = Vec::new();
        encrypt(&mut &b"ABCDE"[..], &mut out, keypair.public_key()).unwrap();
        assert_eq!(out, b"737e7a471a606eb2\n325ba4e1ccd21bae\n4000b252c4064733\n");
    }

    #[test]
    fn survives_interrupted_reads() {
        let keypair = known_keypair();
        let mut input = Trickle {
            data: b"ABCDE",
            interrupt: false,
        };
        let mut out = Vec::new();
        encrypt(&mut input, &mut out, keypair.public_key()).unwrap();
        assert_eq!(out, b"737e7a471a606eb2\n325ba4e1ccd21bae\n4000b252c4064733\n");
    }

    #[test]
    fn decrypt_modes() {
        let keypair = known_keypair();
        let text = b"737e7a471a606eb2\nnope\n325ba4e1ccd21bae\n";

        let mut out = Vec::new();
        decrypt(&mut &text[..], &mut out, keypair.private_key()).unwrap();
        assert_eq!(out, b"AB");

        let mut out = Vec::new();
        let result = decrypt_with_mode(&mut &text[..], &mut out, keypair.private_key(), DecryptMode::Strict);
        assert!(matches!(result, Err(Error::InvalidCiphertext(_))));
    }

    #[test]
    fn generate_writes_both_keys() {
        let builder = KeyPairBuilder::new().bit_length(64).iterations(10).seed(7).owner("carol");
        let (mut public, mut private) = (Vec::new(), Vec::new());

        let keypair = generate_keys(builder, &mut public, &mut private).unwrap();

        let read_back = keyfile::read_public(&mut public.as_slice()).unwrap();
        assert_eq!(&read_back, keypair.public_key());
        assert_eq!(read_back.owner(), "carol");
        let read_back = keyfile::read_private(&mut private.as_slice()).unwrap();
        assert!(&read_back == keypair.private_key());
    }
}
