// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seeded generator state shared by prime generation and key sizing.
//!
//! A [`RandomState`] is created once per key generation run and passed by
//! mutable reference to everything that consumes randomness. Two states built
//! from the same seed yield the same sequence of draws, so key generation is
//! reproducible for a fixed seed. Uniform big-integer draws come from
//! `num_bigint_dig::RandBigInt` and machine-integer draws from `rand::Rng`,
//! both available on any [`RngCore`].
//!
//! The state is not `Sync`-shared: concurrent users must either wrap it in
//! their own lock or build one independently seeded state per worker.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Deterministic pseudo-random generator seeded from a 64-bit value.
#[derive(Clone)]
pub struct RandomState {
    seed: u64,
    rng: ChaCha20Rng,
}

impl RandomState {
    /// Initialize the generator from `seed`.
    pub fn new(seed: u64) -> Self {
        log::debug!("initializing random state (seed = {seed})");
        Self {
            seed,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Initialize the generator from the current wall-clock time in seconds.
    pub fn from_time() -> Self {
        Self::new(time_seed())
    }

    /// The seed this state was created with.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RngCore for RandomState {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

impl CryptoRng for RandomState {}

/// Seconds since the Unix epoch, or zero if the clock is before it.
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
