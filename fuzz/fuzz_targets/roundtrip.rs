#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

use schmidt_samoa::{Decrypt, DecryptBytes, Encrypt, EncryptBytes, KeyPair, KeyPairBuilder, Stream};

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    // Small fixed-seed key; fine for fuzzing, useless for real data.
    let keypair = KEYPAIR.get_or_init(|| {
        KeyPairBuilder::new().bit_length(128).iterations(20).seed(1).owner("fuzz").build().unwrap()
    });
    let public = keypair.public_key();
    let payload = public.block_size() - 1;

    // Single block
    let chunk = &data[..data.len().min(payload)];
    let ciphertext = public.encrypt(chunk).unwrap();
    assert_eq!(keypair.decrypt(&ciphertext).unwrap(), chunk);

    // Whole input
    let text = public.encrypt_bytes(data).unwrap();
    assert_eq!(keypair.decrypt_bytes(&text).unwrap(), data);

    // Streaming, split by the first byte
    let split = data.first().map_or(1, |&b| usize::from(b % 16) + 1);
    let mut encryptor = public.encryptor().unwrap();
    let mut streamed = Vec::new();
    for piece in data.chunks(split) {
        streamed.extend(encryptor.update(piece).unwrap());
    }
    streamed.extend(encryptor.finalize().unwrap());
    assert_eq!(streamed, text, "split {split}");
});
