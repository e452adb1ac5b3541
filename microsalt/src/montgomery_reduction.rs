// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to microsalt, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

//! Montgomery reduction (REDC) for an arbitrary odd 256-bit modulus.
//!
//! With \\(R = 2\^{256}\\), [`MontgomeryConstants256::reduce`] maps a
//! 512-bit accumulator \\(T < pR\\) to \\(T R\^{-1} \bmod p\\).  Values
//! are moved in and out of the Montgomery domain with
//! [`to_montgomery`](MontgomeryConstants256::to_montgomery) and
//! [`from_montgomery`](MontgomeryConstants256::from_montgomery), and
//! [`montgomery_mul`](MontgomeryConstants256::montgomery_mul) multiplies
//! inside it.
//!
//! X25519 does not use this module: the field engine reduces mod
//! \\(2\^{255} - 19\\) more cheaply using the special form of the prime.
//! It is here for callers that need a generic 256-bit modulus, and is
//! compiled only with the `montgomery_reduction` feature.
//!
//! Reduction runs in time independent of the accumulator.  Deriving
//! constants with [`MontgomeryConstants256::new`] treats the modulus as
//! public.

use log::debug;

use subtle::{Choice, ConditionallySelectable};

use crate::bigint::{adc, mac, U256, U512};
use crate::constants::CURVE25519_PRIME;
use crate::errors::{Error, InternalError};

/// Constants for Montgomery reduction modulo one odd 256-bit prime.
///
/// Derived once per modulus and read-only afterwards.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MontgomeryConstants256 {
    /// \\(R\^2 \bmod p\\), with \\(R = 2\^{256}\\).
    pub k_square: U256,
    /// The modulus \\(p\\).
    pub prime: U256,
    /// \\(-p\^{-1} \bmod 2\^{32}\\).
    pub m0_inverse: u32,
}

/// Compute \\(-x\^{-1} \bmod 2\^{32}\\) for odd `x`.
///
/// Newton iteration: each step doubles the number of correct low bits,
/// starting from the one bit that is right for any odd `x`.
fn neg_inverse_mod_2_32(x: u32) -> u32 {
    let mut inv: u32 = 1;
    for _ in 0..5 {
        inv = inv.wrapping_mul(2u32.wrapping_sub(x.wrapping_mul(inv)));
    }
    inv.wrapping_neg()
}

/// Subtract `p` from the 257-bit value `carry * 2^256 + value` when the
/// result stays non-negative.
fn conditional_subtract(value: &U256, carry: u32, p: &U256) -> U256 {
    let (difference, borrow) = value.sub_with_borrow(p);
    let use_difference = Choice::from(carry as u8) | !Choice::from(borrow as u8);
    U256::conditional_select(value, &difference, use_difference)
}

fn bit_length(value: &U256) -> usize {
    for (i, word) in value.as_words().iter().enumerate().rev() {
        if *word != 0 {
            return 32 * i + 32 - word.leading_zeros() as usize;
        }
    }
    0
}

impl MontgomeryConstants256 {
    /// Derive the constants for `prime`.
    ///
    /// # Errors
    ///
    /// The modulus must be odd: an even (or zero) `prime` has no inverse
    /// mod \\(2\^{32}\\).
    pub fn new(prime: &U256) -> Result<MontgomeryConstants256, Error> {
        if prime.as_words()[0] & 1 == 0 {
            return Err(Error(InternalError::EvenModulus));
        }

        // 1 mod p, then double 512 times: 2^512 = R^2 mod p.
        let one = U256::from_words([1, 0, 0, 0, 0, 0, 0, 0]);
        let mut k_square = conditional_subtract(&one, 0, prime);
        for _ in 0..512 {
            let (doubled, carry) = k_square.add_with_carry(&k_square);
            k_square = conditional_subtract(&doubled, carry, prime);
        }

        let constants = MontgomeryConstants256 {
            k_square,
            prime: *prime,
            m0_inverse: neg_inverse_mod_2_32(prime.as_words()[0]),
        };
        debug!(
            "derived Montgomery constants for a {}-bit modulus",
            bit_length(prime)
        );
        Ok(constants)
    }

    /// The constants for \\(p = 2\^{255} - 19\\).
    pub const fn curve25519() -> MontgomeryConstants256 {
        MontgomeryConstants256 {
            // 2^256 = 38 mod p, so R^2 = 38^2 = 1444.
            k_square: U256::from_words([1444, 0, 0, 0, 0, 0, 0, 0]),
            prime: CURVE25519_PRIME,
            m0_inverse: 0x286bca1b,
        }
    }

    /// Run the eight REDC passes over `acc` in place.
    ///
    /// Afterwards the high half of `acc`, plus \\(2\^{256}\\) times the
    /// returned carry, is congruent to \\(T R\^{-1} \bmod p\\).  For
    /// \\(T < pR\\) it lies in \\([0, 2p)\\) and the carry is zero.  The
    /// low half is zero.
    pub fn partial_reduce(&self, acc: &mut U512) -> u32 {
        let p = self.prime.as_words();
        let t = acc.as_words_mut();
        let mut top = 0u32;

        for i in 0..8 {
            let m = t[i].wrapping_mul(self.m0_inverse);
            let mut carry = 0u32;
            for j in 0..8 {
                (t[i + j], carry) = mac(t[i + j], m, p[j], carry);
            }
            for word in t[i + 8..].iter_mut() {
                (*word, carry) = adc(*word, 0, carry);
            }
            top += carry;
        }

        top
    }

    /// Compute \\(T R\^{-1} \bmod p\\) for an accumulator \\(T < pR\\).
    ///
    /// The accumulator is consumed as scratch space.
    pub fn reduce(&self, acc: &mut U512) -> U256 {
        let carry = self.partial_reduce(acc);
        conditional_subtract(&acc.high(), carry, &self.prime)
    }

    /// Map `a` into the Montgomery domain: \\(a R \bmod p\\).
    pub fn to_montgomery(&self, a: &U256) -> U256 {
        let mut acc = a.mul_wide(&self.k_square);
        self.reduce(&mut acc)
    }

    /// Map `a` out of the Montgomery domain: \\(a R\^{-1} \bmod p\\).
    pub fn from_montgomery(&self, a: &U256) -> U256 {
        let mut acc = U512::from_halves(a, &U256::ZERO);
        self.reduce(&mut acc)
    }

    /// Multiply two values in the Montgomery domain.  At least one operand
    /// must be less than \\(p\\).
    pub fn montgomery_mul(&self, a: &U256, b: &U256) -> U256 {
        let mut acc = a.mul_wide(b);
        self.reduce(&mut acc)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::field::FieldElement;

    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    fn small(v: u32) -> U256 {
        U256::from_words([v, 0, 0, 0, 0, 0, 0, 0])
    }

    fn random_field_bytes(rng: &mut StdRng) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        FieldElement::from_bytes(&bytes).to_bytes()
    }

    #[test]
    fn derived_constants_match_curve25519() {
        let derived = MontgomeryConstants256::new(&CURVE25519_PRIME).unwrap();
        assert_eq!(derived, MontgomeryConstants256::curve25519());
    }

    #[test]
    fn m0_inverse_is_negated_inverse() {
        let c = MontgomeryConstants256::curve25519();
        let p0 = c.prime.as_words()[0];
        assert_eq!(p0.wrapping_mul(c.m0_inverse), u32::MAX);
    }

    #[test]
    fn even_modulus_is_rejected() {
        assert!(MontgomeryConstants256::new(&small(96)).is_err());
        assert!(MontgomeryConstants256::new(&U256::ZERO).is_err());
    }

    #[test]
    fn small_modulus_arithmetic() {
        let c = MontgomeryConstants256::new(&small(97)).unwrap();
        let five = c.to_montgomery(&small(5));
        let seven = c.to_montgomery(&small(7));
        assert_eq!(c.from_montgomery(&c.montgomery_mul(&five, &seven)), small(35));

        let eleven = c.to_montgomery(&small(11));
        let thirteen = c.to_montgomery(&small(13));
        assert_eq!(
            c.from_montgomery(&c.montgomery_mul(&eleven, &thirteen)),
            small(143 % 97)
        );
    }

    #[test]
    fn round_trip_through_montgomery_domain() {
        let c = MontgomeryConstants256::curve25519();
        let mut rng = StdRng::seed_from_u64(0x4ed0c);
        for _ in 0..64 {
            let a = U256::from_bytes(&random_field_bytes(&mut rng));
            assert_eq!(c.from_montgomery(&c.to_montgomery(&a)), a);
        }
    }

    #[test]
    fn montgomery_mul_agrees_with_field_mul() {
        let c = MontgomeryConstants256::curve25519();
        let mut rng = StdRng::seed_from_u64(25519);
        for _ in 0..64 {
            let a_bytes = random_field_bytes(&mut rng);
            let b_bytes = random_field_bytes(&mut rng);

            let a = c.to_montgomery(&U256::from_bytes(&a_bytes));
            let b = c.to_montgomery(&U256::from_bytes(&b_bytes));
            let product = c.from_montgomery(&c.montgomery_mul(&a, &b));

            let expected =
                &FieldElement::from_bytes(&a_bytes) * &FieldElement::from_bytes(&b_bytes);
            assert_eq!(product.to_bytes(), expected.to_bytes());
        }
    }

    #[test]
    fn partial_reduce_clears_low_half() {
        let c = MontgomeryConstants256::curve25519();
        let mut rng = StdRng::seed_from_u64(1);
        let a = U256::from_bytes(&random_field_bytes(&mut rng));
        let b = U256::from_bytes(&random_field_bytes(&mut rng));
        let mut acc = a.mul_wide(&b);
        let carry = c.partial_reduce(&mut acc);
        assert_eq!(carry, 0);
        assert_eq!(acc.low(), U256::ZERO);
    }

    #[test]
    fn reduce_of_p_times_r_minus_one() {
        // T = (p - 1) * (p - 1) is the largest product of two residues.
        let c = MontgomeryConstants256::curve25519();
        let (p_minus_one, _) = c.prime.sub_with_borrow(&small(1));
        let mut acc = p_minus_one.mul_wide(&p_minus_one);
        let reduced = c.reduce(&mut acc);
        let (_, borrow) = reduced.sub_with_borrow(&c.prime);
        assert_eq!(borrow, 1);
    }
}
