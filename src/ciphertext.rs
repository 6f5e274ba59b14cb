// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use num_bigint_dig::BigUint;

use crate::error::{Error, Result};
use crate::util;

/// One encrypted block, `c = m^n mod n`.
///
/// On the wire a ciphertext is a single line of lowercase hexadecimal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    value: BigUint,
}

impl Ciphertext {
    pub fn new(value: BigUint) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Lowercase hexadecimal form, without the trailing newline.
    pub fn to_hex(&self) -> String {
        util::to_hex(&self.value)
    }

    /// Parse one ciphertext line. A single trailing `\n` or `\r\n` is allowed.
    pub fn from_hex<T: AsRef<[u8]>>(line: T) -> Result<Self> {
        let line = line.as_ref();
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        let line = line.strip_suffix(b"\r").unwrap_or(line);

        util::parse_hex(line)
            .map(Self::new)
            .ok_or_else(|| Error::InvalidCiphertext("not a hexadecimal line".into()))
    }
}

impl Deref for Ciphertext {
    type Target = BigUint;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl From<BigUint> for Ciphertext {
    fn from(value: BigUint) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Ciphertext {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}
