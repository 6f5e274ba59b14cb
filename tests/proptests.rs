// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property-based tests.

use num_bigint_dig::BigUint;
use num_traits::{One, Zero};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use schmidt_samoa::numtheory::{gcd, is_prime, lcm, mod_inverse, pow_mod};
use schmidt_samoa::{DecryptBytes, EncryptBytes, KeyPair, KeyPairBuilder, Stream};

prop_compose! {
    // Small keys keep the cases fast; never use these sizes for real data.
    fn key_params()(seed in any::<u64>(), bits in 96usize..=192) -> (u64, usize) {
        (seed, bits)
    }
}

fn build_keypair((seed, bits): (u64, usize)) -> KeyPair {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    KeyPairBuilder::new()
        .bit_length(bits)
        .iterations(12)
        .owner("proptest")
        .build_with_rng(&mut rng)
        .unwrap()
}

fn naive_pow_mod(base: u64, exponent: u32, modulus: u64) -> u64 {
    let modulus = modulus as u128;
    let mut v = 1 % modulus;
    for _ in 0..exponent {
        v = v * base as u128 % modulus;
    }
    v as u64
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn bytes_roundtrip(params in key_params(), msg in proptest::collection::vec(any::<u8>(), 0..300)) {
        let keypair = build_keypair(params);
        let text = keypair.public_key().encrypt_bytes(&msg).unwrap();
        let plain = keypair.private_key().decrypt_bytes(&text).unwrap();
        prop_assert_eq!(plain, msg);
    }

    #[test]
    fn ciphertext_is_lowercase_hex_lines(params in key_params(), msg in proptest::collection::vec(any::<u8>(), 1..100)) {
        let keypair = build_keypair(params);
        let text = keypair.encrypt_bytes(&msg).unwrap();
        let payload = keypair.public_key().block_size() - 1;

        prop_assert_eq!(text.last(), Some(&b'\n'));
        let lines: Vec<&[u8]> = text.split(|&b| b == b'\n').filter(|l| !l.is_empty()).collect();
        prop_assert_eq!(lines.len(), msg.len().div_ceil(payload));
        for line in lines {
            prop_assert!(line.iter().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
        }
    }

    #[test]
    fn streaming_split_does_not_matter(
        params in key_params(),
        msg in proptest::collection::vec(any::<u8>(), 0..200),
        split in 1usize..17,
    ) {
        let keypair = build_keypair(params);
        let whole = keypair.encrypt_bytes(&msg).unwrap();

        let mut encryptor = keypair.encryptor().unwrap();
        let mut pieces = Vec::new();
        for chunk in msg.chunks(split) {
            pieces.extend(encryptor.update(chunk).unwrap());
        }
        pieces.extend(encryptor.finalize().unwrap());
        prop_assert_eq!(&pieces, &whole);

        let mut decryptor = keypair.decryptor().unwrap();
        let mut plain = Vec::new();
        for chunk in whole.chunks(split) {
            plain.extend(decryptor.update(chunk).unwrap());
        }
        plain.extend(decryptor.finalize().unwrap());
        prop_assert_eq!(plain, msg);
    }

    #[test]
    fn pow_mod_matches_naive(base in any::<u64>(), exponent in 0u32..200, modulus in 1u64..) {
        let expected = naive_pow_mod(base, exponent, modulus);
        let actual = pow_mod(&BigUint::from(base), &BigUint::from(exponent), &BigUint::from(modulus));
        prop_assert_eq!(actual, BigUint::from(expected));
    }

    #[test]
    fn gcd_and_lcm(a in 1u64.., b in 1u64..) {
        let (a, b) = (BigUint::from(a), BigUint::from(b));
        let g = gcd(&a, &b);
        let l = lcm(&a, &b);

        prop_assert!((&a % &g).is_zero());
        prop_assert!((&b % &g).is_zero());
        prop_assert_eq!(&g * &l, &a * &b);
    }

    #[test]
    fn mod_inverse_when_coprime(a in 1u64.., n in 2u64..) {
        let (a, n) = (BigUint::from(a), BigUint::from(n));
        match mod_inverse(&a, &n) {
            Ok(t) => {
                prop_assert!(t < n);
                prop_assert!(((&a * &t) % &n).is_one());
            }
            Err(_) => {
                prop_assert!(!gcd(&a, &n).is_one());
            }
        }
    }

    #[test]
    fn is_prime_agrees_with_trial_division(n in 0u32..50_000, seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let expected = n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0);
        prop_assert_eq!(is_prime(&BigUint::from(n), 20, &mut rng), expected);
    }
}
