#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate microsalt;

use microsalt::{scalarmult, scalarmult_base};

/// Check that X25519 key agreement works for arbitrary 32-byte secrets
/// `a` and `b`: `a * (b * B) == b * (a * B)`.
fuzz_target!(|data: &[u8]| {
    if data.len() != 64 {
        return;
    }
    let mut a = [0u8; 32];
    let mut b = [0u8; 32];
    a.copy_from_slice(&data[0..32]);
    b.copy_from_slice(&data[32..64]);

    let a_public = scalarmult_base(&a);
    let b_public = scalarmult_base(&b);

    assert_eq!(scalarmult(&a, &b_public), scalarmult(&b, &a_public));
});
