// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod util;

pub use util::{default_owner, make_private, make_public};

use crate::ciphertext::Ciphertext;
use crate::crypto::{Decryptor, Encryptor};
use crate::error::{Error, Result};
use crate::random::RandomState;
use crate::{Decrypt, DecryptBytes, Encrypt, EncryptBytes};

use num_bigint_dig::BigUint;
use num_traits::Zero;
use rand::Rng;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Smallest modulus size accepted by [`KeyPairBuilder`].
///
/// Below this the encryption block cannot hold the marker byte plus one
/// payload byte.
pub const MIN_BIT_LENGTH: usize = 40;

/// Public half of a key: the modulus `n = p²q` and the owner's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) n: BigUint,
    pub(crate) owner: String,
}

impl PublicKey {
    /// Construct a public key.
    ///
    /// The modulus must be non-zero and the owner must fit on a single line.
    pub fn new(n: BigUint, owner: impl Into<String>) -> Result<Self> {
        let owner = owner.into();
        if n.is_zero() || owner.contains(['\n', '\r']) {
            return Err(Error::InvalidPublicKey);
        }

        Ok(Self { n, owner })
    }

    /// Return the public modulus `n`.
    #[inline]
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Return the owner identifier stored alongside the modulus.
    #[inline]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Bit length of `n`.
    #[inline]
    pub fn bit_length(&self) -> usize {
        self.n.bits()
    }
}

/// Secret key material: the modulus `pq` and the private exponent `d`.
///
/// Both values are zeroized on drop.
#[allow(missing_debug_implementations)]
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct PrivateKey {
    pub(crate) pq: BigUint,
    pub(crate) d: BigUint,
}

impl PrivateKey {
    /// Construct a private key. Both components must be non-zero.
    pub fn new(pq: BigUint, d: BigUint) -> Result<Self> {
        if pq.is_zero() || d.is_zero() {
            return Err(Error::InvalidPrivateKey);
        }

        Ok(Self { pq, d })
    }

    /// Return the decryption modulus `pq`.
    #[inline]
    pub fn pq(&self) -> &BigUint {
        &self.pq
    }

    /// Return the private exponent `d`.
    #[inline]
    pub fn d(&self) -> &BigUint {
        &self.d
    }
}

/// A freshly generated key: both halves plus the primes they came from.
///
/// Secret material is zeroized when dropped.
#[allow(missing_debug_implementations)]
#[derive(PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct KeyPair {
    #[zeroize(skip)]
    public: PublicKey,
    secret: PrivateKey,
    p: BigUint,
    q: BigUint,
}

impl<'a> KeyPair {
    /// Generate a key pair with default parameters (256-bit modulus, 50
    /// Miller-Rabin iterations, time-based seed).
    pub fn generate() -> Result<Self> {
        KeyPairBuilder::new().build()
    }

    /// Generate a key pair with a custom modulus size.
    pub fn generate_with_size(bit_length: usize) -> Result<Self> {
        KeyPairBuilder::new().bit_length(bit_length).build()
    }

    /// Assemble a key pair from two known primes.
    ///
    /// The primes are not re-tested; they must be distinct and greater than 1.
    pub fn from_primes(p: BigUint, q: BigUint, owner: impl Into<String>) -> Result<Self> {
        if p == q {
            return Err(Error::KeyGenerationFailed("Primes must be distinct".into()));
        }

        let (d, pq) = make_private(&p, &q)?;
        let n = &p * &p * &q;

        let public = PublicKey::new(n, owner)?;
        let secret = PrivateKey::new(pq, d)?;

        Ok(Self {
            public,
            secret,
            p,
            q,
        })
    }

    /// Return the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Return the private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.secret
    }

    /// Return the prime `p` (squared in the public modulus).
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Return the prime `q`.
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// Create a streaming encryptor bound to this public key.
    pub fn encryptor(&'a self) -> Result<Encryptor<'a>> {
        self.public.encryptor()
    }

    /// Create a streaming decryptor bound to this private key.
    pub fn decryptor(&'a self) -> Result<Decryptor<'a>> {
        self.secret.decryptor()
    }
}

impl Encrypt for KeyPair {
    fn encrypt<P: AsRef<[u8]>>(&self, chunk: P) -> Result<Ciphertext> {
        self.public.encrypt(chunk)
    }
}

impl EncryptBytes for KeyPair {
    fn encrypt_bytes<P: AsRef<[u8]>>(&self, data: P) -> Result<Vec<u8>> {
        self.public.encrypt_bytes(data)
    }
}

impl Decrypt for KeyPair {
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Vec<u8>> {
        self.secret.decrypt(ciphertext)
    }
}

impl DecryptBytes for KeyPair {
    fn decrypt_bytes<T: AsRef<[u8]>>(&self, text: T) -> Result<Vec<u8>> {
        self.secret.decrypt_bytes(text)
    }
}

/// Builder for generating key pairs with configurable parameters.
#[derive(Debug, Clone)]
pub struct KeyPairBuilder {
    bit_length: usize,
    iterations: usize,
    seed: Option<u64>,
    owner: Option<String>,
}

impl KeyPairBuilder {
    /// Default target bit length of `n`.
    pub const DEFAULT_BIT_LENGTH: usize = 256;

    /// Default number of Miller-Rabin rounds per prime candidate.
    pub const DEFAULT_ITERATIONS: usize = 50;

    /// Create a builder with default parameters.
    pub fn new() -> Self {
        Self {
            bit_length: Self::DEFAULT_BIT_LENGTH,
            iterations: Self::DEFAULT_ITERATIONS,
            seed: None,
            owner: None,
        }
    }

    /// Set the desired modulus bit length.
    pub fn bit_length(mut self, bits: usize) -> Self {
        self.bit_length = bits;
        self
    }

    /// Set the Miller-Rabin iteration count used when testing primes.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Seed the generator. Without a seed the current time is used.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the owner identifier stored in the public key.
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Generate the key pair from a [`RandomState`] built from the configured
    /// seed.
    pub fn build(self) -> Result<KeyPair> {
        let mut state = self.seed.map_or_else(RandomState::from_time, RandomState::new);
        self.build_with_rng(&mut state)
    }

    /// Generate the key pair drawing randomness from `rng`. The configured
    /// seed is ignored.
    pub fn build_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> Result<KeyPair> {
        if self.bit_length < MIN_BIT_LENGTH {
            return Err(Error::InvalidKeySize {
                min: MIN_BIT_LENGTH,
                actual: self.bit_length,
            });
        }
        if self.iterations == 0 {
            return Err(Error::InvalidIterations);
        }

        let (p, q, _) = make_public(self.bit_length, self.iterations, rng)?;
        let owner = self.owner.unwrap_or_else(default_owner);

        let keypair = KeyPair::from_primes(p.into_inner(), q.into_inner(), owner)?;

        log::debug!(
            "generated key for {}: p {} bits, q {} bits, n {} bits, pq {} bits, d {} bits",
            keypair.public.owner,
            keypair.p.bits(),
            keypair.q.bits(),
            keypair.public.n.bits(),
            keypair.secret.pq.bits(),
            keypair.secret.d.bits(),
        );

        Ok(keypair)
    }
}

impl Default for KeyPairBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    fn exponent_matches(p: &BigUint, q: &BigUint, d: &BigUint) -> bool {
        let n = p * p * q;
        let lambda = util::carmichael_lambda(p, q);
        ((d * &n) % &lambda).is_one()
    }

    fn known_keypair() -> KeyPair {
        KeyPair::from_primes(
            BigUint::from(65521u32),
            BigUint::from(4_294_967_291u64),
            "alice",
        )
        .unwrap()
    }

    #[test]
    fn key_invariants_hold() {
        let keypair = KeyPairBuilder::new().bit_length(128).iterations(20).seed(3).build().unwrap();
        let (p, q) = (keypair.p(), keypair.q());

        assert_ne!(p, q);
        assert_eq!(keypair.public_key().n(), &(p * p * q));
        assert_eq!(keypair.private_key().pq(), &(p * q));
        assert!(exponent_matches(p, q, keypair.private_key().d()));
    }

    #[test]
    fn same_seed_same_keys() {
        let builder = KeyPairBuilder::new().bit_length(96).iterations(10).seed(99).owner("bob");
        let a = builder.clone().build().unwrap();
        let b = builder.build().unwrap();

        assert!(a == b);
    }

    #[test]
    fn different_seeds_different_keys() {
        let a = KeyPairBuilder::new().bit_length(96).seed(1).owner("bob").build().unwrap();
        let b = KeyPairBuilder::new().bit_length(96).seed(2).owner("bob").build().unwrap();

        assert_ne!(a.public_key(), b.public_key());
    }

    #[test]
    fn default_builder_parameters() {
        let builder = KeyPairBuilder::default();
        assert_eq!(builder.bit_length, 256);
        assert_eq!(builder.iterations, 50);
        assert!(builder.seed.is_none());
        assert!(builder.owner.is_none());
    }

    #[test]
    fn rejects_small_modulus() {
        let result = KeyPairBuilder::new().bit_length(16).seed(1).build();
        assert!(matches!(result, Err(Error::InvalidKeySize { min: 40, actual: 16 })));
    }

    #[test]
    fn rejects_zero_iterations() {
        let result = KeyPairBuilder::new().iterations(0).seed(1).build();
        assert!(matches!(result, Err(Error::InvalidIterations)));
    }

    #[test]
    fn owner_defaults_to_environment() {
        let keypair = KeyPairBuilder::new().bit_length(64).seed(5).build().unwrap();
        assert_eq!(keypair.public_key().owner(), default_owner());
    }

    #[test]
    fn from_primes_known_values() {
        let keypair = known_keypair();

        assert_eq!(keypair.public_key().n(), &BigUint::from(0xffe2_00dc_0095_fb9bu64));
        assert_eq!(keypair.public_key().bit_length(), 64);
        assert_eq!(keypair.public_key().owner(), "alice");
        assert_eq!(keypair.private_key().pq(), &BigUint::from(0xfff0_fffb_004bu64));
        assert_eq!(keypair.private_key().d(), &BigUint::from(0xa9d_a51b_f363u64));
    }

    #[test]
    fn from_primes_rejects_equal_primes() {
        let p = BigUint::from(65521u32);
        let result = KeyPair::from_primes(p.clone(), p, "alice");
        assert!(matches!(result, Err(Error::KeyGenerationFailed(_))));
    }

    #[test]
    fn public_key_rejects_zero_modulus() {
        assert!(matches!(
            PublicKey::new(BigUint::zero(), "alice"),
            Err(Error::InvalidPublicKey)
        ));
    }

    #[test]
    fn public_key_rejects_multiline_owner() {
        assert!(matches!(
            PublicKey::new(BigUint::from(15u32), "alice\nmallory"),
            Err(Error::InvalidPublicKey)
        ));
    }

    #[test]
    fn private_key_rejects_zero_components() {
        let one = BigUint::one();
        assert!(matches!(
            PrivateKey::new(BigUint::zero(), one.clone()),
            Err(Error::InvalidPrivateKey)
        ));
        assert!(matches!(
            PrivateKey::new(one, BigUint::zero()),
            Err(Error::InvalidPrivateKey)
        ));
    }
}
