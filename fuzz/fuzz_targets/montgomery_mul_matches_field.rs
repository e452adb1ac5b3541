#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate microsalt;

use microsalt::bigint::U256;
use microsalt::field::FieldElement;
use microsalt::montgomery_reduction::MontgomeryConstants256;

/// Check that REDC multiplication mod 2^255 - 19 agrees with the field
/// engine for fuzzer-chosen residues.
fuzz_target!(|data: &[u8]| {
    if data.len() != 64 {
        return;
    }
    let mut a_bytes = [0u8; 32];
    let mut b_bytes = [0u8; 32];
    a_bytes.copy_from_slice(&data[0..32]);
    b_bytes.copy_from_slice(&data[32..64]);

    // Canonical residues in [0, p).
    let a = FieldElement::from_bytes(&a_bytes);
    let b = FieldElement::from_bytes(&b_bytes);

    let constants = MontgomeryConstants256::curve25519();
    let a_mont = constants.to_montgomery(&U256::from_bytes(&a.to_bytes()));
    let b_mont = constants.to_montgomery(&U256::from_bytes(&b.to_bytes()));
    let product = constants.from_montgomery(&constants.montgomery_mul(&a_mont, &b_mont));

    assert_eq!(product.to_bytes(), (&a * &b).to_bytes());
});
