// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Number-theoretic primitives the cryptosystem is built on.
//!
//! Everything here operates on [`BigUint`] values and never mutates its
//! inputs. Functions that need randomness take the generator explicitly.
//!
//! None of these routines are constant-time.

use std::ops::Deref;

use num_bigint_dig::{BigInt, BigUint, RandBigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::Rng;

use crate::error::{Error, Result};

/// Candidate draws allowed per requested bit before [`make_prime`] gives up.
///
/// A random `b`-bit draw is prime with probability about `1 / (b ln 2)` and
/// has its top bit set half of the time, so this leaves a wide margin.
pub const MAX_ATTEMPTS_PER_BIT: usize = 1000;

/// A probabilistically verified prime together with the bit length it was
/// requested at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prime {
    value: BigUint,
    min_bits: usize,
}

impl Prime {
    #[inline]
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Minimum bit length requested when the prime was generated.
    #[inline]
    pub fn min_bits(&self) -> usize {
        self.min_bits
    }

    pub fn into_inner(self) -> BigUint {
        self.value
    }
}

impl Deref for Prime {
    type Target = BigUint;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

/// Computes `base^exponent mod modulus` by right-to-left binary exponentiation.
///
/// # Panics
/// Panics if `modulus` is zero.
pub fn pow_mod(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    assert!(!modulus.is_zero(), "pow_mod requires a non-zero modulus");

    let mut v = BigUint::one() % modulus;
    let mut p = base % modulus;
    let mut e = exponent.clone();

    while !e.is_zero() {
        if e.is_odd() {
            v = (&v * &p) % modulus;
        }
        p = (&p * &p) % modulus;
        e >>= 1usize;
    }

    v
}

/// Miller-Rabin probabilistic primality test.
///
/// Small inputs (`0..=3` and even numbers) are answered exactly. For the rest,
/// each of the `iterations` rounds draws a witness uniformly from `[2, n-2]`;
/// a composite survives all rounds with probability at most `4^-iterations`.
/// With zero rounds every odd `n > 3` is reported prime.
pub fn is_prime<R: Rng + ?Sized>(n: &BigUint, iterations: usize, rng: &mut R) -> bool {
    let two = BigUint::from(2u32);
    let three = BigUint::from(3u32);

    if n.is_even() && *n > two {
        return false;
    }
    if n.is_zero() || n.is_one() {
        return false;
    }
    if *n == two || *n == three {
        return true;
    }

    let n_minus_1 = n - BigUint::one();

    // n - 1 = 2^s · r with r odd
    let mut r = n_minus_1.clone();
    let mut s = 0usize;
    while r.is_even() {
        r >>= 1usize;
        s += 1;
    }

    for _ in 0..iterations {
        let a = rng.gen_biguint_range(&two, &n_minus_1);
        let mut y = pow_mod(&a, &r, n);

        if !y.is_one() && y != n_minus_1 {
            let mut j = 1;
            while j < s && y != n_minus_1 {
                y = pow_mod(&y, &two, n);
                if y.is_one() {
                    return false;
                }
                j += 1;
            }
            if y != n_minus_1 {
                return false;
            }
        }
    }

    true
}

/// Generates a prime of at least `bits` bits.
///
/// Gives up after `MAX_ATTEMPTS_PER_BIT * bits` candidates.
pub fn make_prime<R: Rng + ?Sized>(bits: usize, iterations: usize, rng: &mut R) -> Result<Prime> {
    make_prime_bounded(bits, iterations, MAX_ATTEMPTS_PER_BIT.saturating_mul(bits), rng)
}

/// Generates a prime of at least `bits` bits, drawing at most `max_attempts`
/// uniform `bits`-bit candidates.
///
/// A candidate is accepted once it passes [`is_prime`] and its bit length
/// reaches `bits`; draws with leading zero bits are rejected.
pub fn make_prime_bounded<R: Rng + ?Sized>(
    bits: usize,
    iterations: usize,
    max_attempts: usize,
    rng: &mut R,
) -> Result<Prime> {
    if bits < 2 {
        return Err(Error::InvalidPrimeSize(bits));
    }
    if iterations == 0 {
        return Err(Error::InvalidIterations);
    }

    for _ in 0..max_attempts {
        let candidate = rng.gen_biguint(bits);
        if candidate.bits() >= bits && is_prime(&candidate, iterations, rng) {
            return Ok(Prime {
                value: candidate,
                min_bits: bits,
            });
        }
    }

    log::debug!("gave up on a {bits}-bit prime after {max_attempts} candidates");
    Err(Error::PrimeGenerationFailed {
        bits,
        attempts: max_attempts,
    })
}

/// Greatest common divisor by the Euclidean algorithm.
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    let mut a = a.clone();
    let mut b = b.clone();

    while !b.is_zero() {
        let t = b.clone();
        b = &a % &b;
        a = t;
    }

    a
}

/// Least common multiple; zero if either input is zero.
pub fn lcm(a: &BigUint, b: &BigUint) -> BigUint {
    if a.is_zero() || b.is_zero() {
        return BigUint::zero();
    }
    (a * b) / gcd(a, b)
}

/// Computes `t` with `a·t ≡ 1 (mod n)` by the extended Euclidean algorithm.
///
/// The result lies in `[0, n)`. Returns [`Error::NoModularInverse`] when
/// `gcd(a, n) != 1` or `n` is zero.
pub fn mod_inverse(a: &BigUint, n: &BigUint) -> Result<BigUint> {
    if n.is_zero() {
        return Err(Error::NoModularInverse);
    }

    let modulus = BigInt::from_biguint(Sign::Plus, n.clone());

    let mut r = modulus.clone();
    let mut r_next = BigInt::from_biguint(Sign::Plus, a.clone());
    let mut t = BigInt::zero();
    let mut t_next = BigInt::one();

    while !r_next.is_zero() {
        // both remainders are non-negative, so truncating division is floor division
        let q = &r / &r_next;

        let r_new = &r - &q * &r_next;
        r = std::mem::replace(&mut r_next, r_new);

        let t_new = &t - &q * &t_next;
        t = std::mem::replace(&mut t_next, t_new);
    }

    if r > BigInt::one() {
        return Err(Error::NoModularInverse);
    }
    if t.sign() == Sign::Minus {
        t += &modulus;
    }

    t.to_biguint().ok_or(Error::NoModularInverse)
}
