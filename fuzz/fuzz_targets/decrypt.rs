#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

use schmidt_samoa::{DecryptMode, KeyPair, KeyPairBuilder, Stream};

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let keypair = KEYPAIR.get_or_init(|| {
        KeyPairBuilder::new().bit_length(128).iterations(20).seed(2).owner("fuzz").build().unwrap()
    });
    let private = keypair.private_key();

    // Arbitrary text must yield bytes or an error, never a panic.
    for mode in [DecryptMode::Lenient, DecryptMode::Strict] {
        let mut decryptor = private.decryptor_with_mode(mode).unwrap();
        if decryptor.update(data).is_ok() {
            let _ = decryptor.finalize();
        }
    }
});
