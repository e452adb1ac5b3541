// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to microsalt, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

//! Various constants, such as the X25519 basepoint and the Salsa20 sigma.

use crate::bigint::{U128, U256};
use crate::field::FieldElement;
use crate::montgomery::MontgomeryPoint;

/// The X25519 basepoint, in `MontgomeryPoint` format.
///
/// This is the little-endian encoding of \\(u = 9\\).
pub const X25519_BASEPOINT: MontgomeryPoint = MontgomeryPoint([
    0x09, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
]);

/// \\((A + 2) / 4\\) for Curve25519's Montgomery coefficient \\(A = 486662\\).
pub const APLUS2_OVER_FOUR: FieldElement =
    FieldElement::from_limbs([121666, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

/// The Salsa20 constant `"expand 32-byte k"`, as ASCII bytes.
pub const SALSA20_SIGMA_BYTES: [u8; 16] = *b"expand 32-byte k";

/// The Salsa20 constant `"expand 32-byte k"`, as little-endian words.
pub const SALSA20_SIGMA: U128 = U128::from_words([0x61707865, 0x3320646e, 0x79622d32, 0x6b206574]);

/// The field prime \\(p = 2\^{255} - 19\\).
pub const CURVE25519_PRIME: U256 = U256::from_words([
    0xffffffed, 0xffffffff, 0xffffffff, 0xffffffff, 0xffffffff, 0xffffffff, 0xffffffff, 0x7fffffff,
]);
