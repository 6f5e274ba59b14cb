// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigUint;
use num_traits::One;
use rand::Rng;

use crate::error::{Error, Result};
use crate::numtheory::{self, Prime};

/// Generates the public half of a key: primes `p`, `q` and `n = p²q`.
///
/// `|p|` is drawn uniformly from `[total_bits/5, 2·total_bits/5)` and
/// `|q| = total_bits - 2|p|`, so that `|n| ≈ 2|p| + |q|` lands near
/// `total_bits`. Both primes are requested one bit wider than their share.
pub fn make_public<R: Rng + ?Sized>(
    total_bits: usize,
    iterations: usize,
    rng: &mut R,
) -> Result<(Prime, Prime, BigUint)> {
    let low = total_bits / 5;
    let high = 2 * total_bits / 5;
    if low >= high {
        return Err(Error::InvalidKeySize {
            min: super::MIN_BIT_LENGTH,
            actual: total_bits,
        });
    }

    let p_bits = rng.gen_range(low..high);
    let q_bits = total_bits - 2 * p_bits;

    let p = numtheory::make_prime(p_bits + 1, iterations, rng)?;
    let q = numtheory::make_prime(q_bits + 1, iterations, rng)?;

    let n = p.value() * p.value() * q.value();
    Ok((p, q, n))
}

/// Derives the private exponent `d` and the modulus `pq` from the primes.
///
/// `d` is the inverse of `n = p²q` modulo `λ(pq) = (p-1)(q-1) / gcd(p-1, q-1)`.
pub fn make_private(p: &BigUint, q: &BigUint) -> Result<(BigUint, BigUint)> {
    let one = BigUint::one();
    if *p <= one || *q <= one {
        return Err(Error::InvalidPrivateKey);
    }

    let lambda = carmichael_lambda(p, q);
    let n = p * p * q;
    let d = numtheory::mod_inverse(&n, &lambda)?;
    let pq = p * q;

    Ok((d, pq))
}

/// `λ(pq) = (p-1)(q-1) / gcd(p-1, q-1)`; both inputs must exceed 1.
pub(crate) fn carmichael_lambda(p: &BigUint, q: &BigUint) -> BigUint {
    let p_minus_1 = p - BigUint::one();
    let q_minus_1 = q - BigUint::one();
    numtheory::lcm(&p_minus_1, &q_minus_1)
}

/// Owner identifier taken from the environment (`USER`, then `USERNAME`).
pub fn default_owner() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}
