// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Schmidt-Samoa Cryptosystem
//!
//! Deterministic public-key encryption whose security rests on the hardness
//! of factoring n = p²q.
//!
//! Reference: Schmidt-Samoa, *A New Rabin-type Trapdoor Permutation
//! Equivalent to Factoring* (2005).
//!
//! - public key: `n = p²q` plus an owner identifier
//! - private key: `pq` and `d = n⁻¹ mod lcm(p-1, q-1)`
//! - encryption: `c = m^n mod n`
//! - decryption: `m = c^d mod pq`
//!
//! Arbitrary byte streams are cut into blocks, each prefixed with a `0xFF`
//! marker byte, and written as one lowercase hexadecimal line per block.
//!
//! ## Security
//!
//! This is textbook encryption: deterministic, unpadded and not constant
//! time. The private key is zeroized on drop via the `zeroize` crate.
//!
//! ## Example
//!
//! ```rust,no_run
//! use schmidt_samoa::{DecryptBytes, EncryptBytes, KeyPairBuilder};
//!
//! let keypair = KeyPairBuilder::new().bit_length(512).owner("alice").build().expect("key generation failed");
//! let message = "hello world";
//!
//! let ciphertext = keypair.public_key().encrypt_bytes(message).expect("encryption failed");
//! let decrypted = keypair.private_key().decrypt_bytes(&ciphertext).expect("decryption failed");
//! assert_eq!(message.as_bytes(), decrypted);
//! ```

mod ciphertext;
mod crypto;
mod error;
pub mod keyfile;
mod keypair;
pub mod numtheory;
pub mod pipeline;
mod random;
mod util;

pub use ciphertext::*;
pub use crypto::*;
pub use error::*;
pub use keypair::*;
pub use random::*;
