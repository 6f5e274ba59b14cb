// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text encoding of key material.
//!
//! Public key: `n` in lowercase hex, then the owner identifier.
//! Private key: `pq` in lowercase hex, then `d` in lowercase hex.
//! Every line is newline-terminated.
//!
//! Reading is strict: a missing line or a field that is not plain
//! hexadecimal is an error, never a zero key.

use std::io::{BufRead, Write};

use num_bigint_dig::BigUint;
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::keypair::{PrivateKey, PublicKey};
use crate::util;

/// Write `key` as two lines: `n` and the owner.
pub fn write_public<W: Write + ?Sized>(key: &PublicKey, out: &mut W) -> Result<()> {
    writeln!(out, "{}", util::to_hex(key.n()))?;
    writeln!(out, "{}", key.owner())?;
    Ok(())
}

/// Read a public key written by [`write_public`].
pub fn read_public<R: BufRead + ?Sized>(input: &mut R) -> Result<PublicKey> {
    let n = read_line(input, "modulus n")?;
    let n = parse_field(&n, "modulus n")?;
    let owner = read_line(input, "owner")?;

    PublicKey::new(n, owner.as_str())
}

/// Write `key` as two lines: `pq` and `d`.
pub fn write_private<W: Write + ?Sized>(key: &PrivateKey, out: &mut W) -> Result<()> {
    let pq = Zeroizing::new(util::to_hex(key.pq()));
    let d = Zeroizing::new(util::to_hex(key.d()));
    writeln!(out, "{}", pq.as_str())?;
    writeln!(out, "{}", d.as_str())?;
    Ok(())
}

/// Read a private key written by [`write_private`].
pub fn read_private<R: BufRead + ?Sized>(input: &mut R) -> Result<PrivateKey> {
    let pq = read_line(input, "modulus pq")?;
    let pq = parse_field(&pq, "modulus pq")?;
    let d = read_line(input, "exponent d")?;
    let d = parse_field(&d, "exponent d")?;

    PrivateKey::new(pq, d)
}

/// Encode a public key into its text form.
pub fn encode_public(key: &PublicKey) -> String {
    format!("{}\n{}\n", util::to_hex(key.n()), key.owner())
}

/// Encode a private key into its text form.
pub fn encode_private(key: &PrivateKey) -> Zeroizing<String> {
    Zeroizing::new(format!("{}\n{}\n", util::to_hex(key.pq()), util::to_hex(key.d())))
}

/// Decode a public key from its text form.
pub fn decode_public(text: &str) -> Result<PublicKey> {
    read_public(&mut text.as_bytes())
}

/// Decode a private key from its text form.
pub fn decode_private(text: &str) -> Result<PrivateKey> {
    read_private(&mut text.as_bytes())
}

/// Read one line, without its terminator. End of input is an error.
fn read_line<R: BufRead + ?Sized>(input: &mut R, field: &str) -> Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::new());
    if input.read_line(&mut line)? == 0 {
        return Err(Error::MalformedKey(format!("missing {field}")));
    }

    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(line)
}

fn parse_field(text: &str, field: &str) -> Result<BigUint> {
    util::parse_hex(text).ok_or_else(|| Error::MalformedKey(format!("{field} is not hexadecimal")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn public_key() -> PublicKey {
        PublicKey::new(BigUint::from(0xffe2_00dc_0095_fb9bu64), "alice").unwrap()
    }

    fn private_key() -> PrivateKey {
        PrivateKey::new(BigUint::from(0xfff0_fffb_004bu64), BigUint::from(0xa9d_a51b_f363u64)).unwrap()
    }

    #[test]
    fn public_key_layout() {
        let mut out = Vec::new();
        write_public(&public_key(), &mut out).unwrap();
        assert_eq!(out, b"ffe200dc0095fb9b\nalice\n");
        assert_eq!(encode_public(&public_key()).as_bytes(), out.as_slice());
    }

    #[test]
    fn private_key_layout() {
        let mut out = Vec::new();
        write_private(&private_key(), &mut out).unwrap();
        assert_eq!(out, b"fff0fffb004b\na9da51bf363\n");
        assert_eq!(encode_private(&private_key()).as_bytes(), out.as_slice());
    }

    #[test]
    fn reads_back_written_keys() {
        let public = decode_public(&encode_public(&public_key())).unwrap();
        assert_eq!(public, public_key());

        let private = decode_private(&encode_private(&private_key())).unwrap();
        assert!(private == private_key());
    }

    #[test]
    fn accepts_crlf_and_uppercase() {
        let public = decode_public("FFE200DC0095FB9B\r\nalice\r\n").unwrap();
        assert_eq!(public, public_key());
    }

    #[test]
    fn accepts_missing_final_newline() {
        let private = decode_private("fff0fffb004b\na9da51bf363").unwrap();
        assert_eq!(private.d(), private_key().d());
    }

    #[test]
    fn rejects_truncated_public_key() {
        assert!(matches!(decode_public(""), Err(Error::MalformedKey(_))));
        assert!(matches!(decode_public("ffe200dc0095fb9b\n"), Err(Error::MalformedKey(_))));
    }

    #[test]
    fn rejects_truncated_private_key() {
        assert!(matches!(decode_private(""), Err(Error::MalformedKey(_))));
        assert!(matches!(decode_private("fff0fffb004b\n"), Err(Error::MalformedKey(_))));
    }

    #[test]
    fn rejects_bad_hex() {
        assert!(matches!(decode_public("xyz\nalice\n"), Err(Error::MalformedKey(_))));
        assert!(matches!(decode_public("\nalice\n"), Err(Error::MalformedKey(_))));
        assert!(matches!(decode_private("fff0\n0xa9\n"), Err(Error::MalformedKey(_))));
        assert!(matches!(decode_private("fff0 \na9\n"), Err(Error::MalformedKey(_))));
    }

    #[test]
    fn rejects_zero_components() {
        assert!(matches!(decode_public("0\nalice\n"), Err(Error::InvalidPublicKey)));
        assert!(matches!(decode_private("0\na9\n"), Err(Error::InvalidPrivateKey)));
    }

    #[test]
    fn reads_consecutive_keys_from_one_stream() {
        let text = format!("{}{}", encode_public(&public_key()), encode_private(&private_key()).as_str());
        let mut input = text.as_bytes();

        let public = read_public(&mut input).unwrap();
        let private = read_private(&mut input).unwrap();

        assert_eq!(public.owner(), "alice");
        assert_eq!(private.pq(), private_key().pq());
    }
}
