#![no_main]

use libfuzzer_sys::fuzz_target;

use schmidt_samoa::keyfile;

fuzz_target!(|data: &[u8]| {
    if let Ok(key) = keyfile::read_public(&mut &data[..]) {
        let text = keyfile::encode_public(&key);
        assert_eq!(keyfile::decode_public(&text).unwrap(), key);
    }

    if let Ok(key) = keyfile::read_private(&mut &data[..]) {
        let text = keyfile::encode_private(&key);
        assert!(keyfile::decode_private(&text).unwrap() == key);
    }
});
