// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Errors that can occur during key generation, key parsing or block processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid key size: must be at least {min} bits, got {actual}")]
    InvalidKeySize { min: usize, actual: usize },

    #[error("Miller-Rabin iteration count must be at least 1")]
    InvalidIterations,

    #[error("Prime size must be at least 2 bits, got {0}")]
    InvalidPrimeSize(usize),

    #[error("Unable to generate a {bits}-bit prime after {attempts} attempts")]
    PrimeGenerationFailed { bits: usize, attempts: usize },

    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    #[error("Modular inverse does not exist")]
    NoModularInverse,

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Invalid private key")]
    InvalidPrivateKey,

    #[error("Malformed key: {0}")]
    MalformedKey(String),

    #[error("Modulus of {bits} bits is too small to carry a payload byte")]
    ModulusTooSmall { bits: usize },

    #[error("Plaintext exceeds the block payload of {max} bytes")]
    PlaintextTooLarge { max: usize },

    #[error("Ciphertext is invalid or corrupted: {0}")]
    InvalidCiphertext(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
