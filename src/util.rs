// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigUint;

/// Parses a non-empty run of hexadecimal digits.
///
/// Unlike `BigUint::parse_bytes`, this rejects signs, separators and
/// surrounding whitespace.
pub(crate) fn parse_hex<T: AsRef<[u8]>>(text: T) -> Option<BigUint> {
    let text = text.as_ref();
    if text.is_empty() || !text.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    BigUint::parse_bytes(text, 16)
}

/// Strips leading and trailing ASCII whitespace.
pub(crate) fn trim_ascii_whitespace(text: &[u8]) -> &[u8] {
    let start = text.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(text.len());
    let end = text.iter().rposition(|b| !b.is_ascii_whitespace()).map_or(start, |i| i + 1);
    &text[start..end]
}

/// Lowercase hexadecimal without prefix.
#[inline]
pub(crate) fn to_hex(value: &BigUint) -> String {
    value.to_str_radix(16)
}
