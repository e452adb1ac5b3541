// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to microsalt, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

//! Fixed-width little-endian values.
//!
//! [`U128`], [`U256`] and [`U512`] are the currency of the rest of the
//! crate: nonces and Salsa20 constants are `U128`s, keys and field encodings
//! are `U256`s, and a Salsa20 block (or a double-width product) is a
//! `U512`.  Each one can be read as bytes or as 32-bit words, and both views
//! always agree under little-endian packing.
//!
//! The small amount of multi-precision arithmetic needed by
//! [`montgomery_reduction`](crate::montgomery_reduction) lives here too.
//! All of it runs in time independent of the operand values.

use core::fmt::Debug;

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

define_fixed_width_value!(U128, 128, "A 128-bit value, viewable as 16 bytes or 4 words.");
define_fixed_width_value!(U256, 256, "A 256-bit value, viewable as 32 bytes or 8 words.");
define_fixed_width_value!(U512, 512, "A 512-bit value, viewable as 64 bytes or 16 words.");

/// Compute `a + b*c + carry`, returning `(low, high)` words.
#[inline(always)]
pub(crate) const fn mac(a: u32, b: u32, c: u32, carry: u32) -> (u32, u32) {
    let t = (a as u64) + (b as u64) * (c as u64) + (carry as u64);
    (t as u32, (t >> 32) as u32)
}

/// Compute `a + b + carry`, returning `(sum, carry_out)` with `carry_out` in `{0, 1}`.
#[inline(always)]
pub(crate) const fn adc(a: u32, b: u32, carry: u32) -> (u32, u32) {
    let t = (a as u64) + (b as u64) + (carry as u64);
    (t as u32, (t >> 32) as u32)
}

/// Compute `a - b - borrow`, returning `(difference, borrow_out)` with
/// `borrow_out` in `{0, 1}`.
#[inline(always)]
pub(crate) const fn sbb(a: u32, b: u32, borrow: u32) -> (u32, u32) {
    let t = (a as u64).wrapping_sub((b as u64) + (borrow as u64));
    (t as u32, ((t >> 63) as u32) & 1)
}

impl U256 {
    /// Compute `self + other`, returning the sum mod 2^256 and the carry out.
    pub fn add_with_carry(&self, other: &U256) -> (U256, u32) {
        let mut out = U256::ZERO;
        let mut carry = 0u32;
        for (i, word) in out.as_words_mut().iter_mut().enumerate() {
            (*word, carry) = adc(self.as_words()[i], other.as_words()[i], carry);
        }
        (out, carry)
    }

    /// Compute `self - other`, returning the difference mod 2^256 and the
    /// borrow out.
    pub fn sub_with_borrow(&self, other: &U256) -> (U256, u32) {
        let mut out = U256::ZERO;
        let mut borrow = 0u32;
        for (i, word) in out.as_words_mut().iter_mut().enumerate() {
            (*word, borrow) = sbb(self.as_words()[i], other.as_words()[i], borrow);
        }
        (out, borrow)
    }

    /// Schoolbook product of two 256-bit values.
    pub fn mul_wide(&self, other: &U256) -> U512 {
        let a = self.as_words();
        let b = other.as_words();
        let mut t = [0u32; 16];
        for i in 0..8 {
            let mut carry = 0u32;
            for j in 0..8 {
                (t[i + j], carry) = mac(t[i + j], a[i], b[j], carry);
            }
            t[i + 8] = carry;
        }
        U512::from_words(t)
    }

    /// Return bit `i` of this value, for `i < 256`.
    #[inline]
    pub fn bit(&self, i: usize) -> u8 {
        ((self.as_words()[i / 32] >> (i % 32)) & 1) as u8
    }
}

impl U512 {
    /// Build a 512-bit value from its low and high halves.
    pub fn from_halves(low: &U256, high: &U256) -> U512 {
        let mut words = [0u32; 16];
        words[..8].copy_from_slice(low.as_words());
        words[8..].copy_from_slice(high.as_words());
        U512::from_words(words)
    }

    /// The low 256 bits.
    pub fn low(&self) -> U256 {
        let mut words = [0u32; 8];
        words.copy_from_slice(&self.as_words()[..8]);
        U256::from_words(words)
    }

    /// The high 256 bits.
    pub fn high(&self) -> U256 {
        let mut words = [0u32; 8];
        words.copy_from_slice(&self.as_words()[8..]);
        U256::from_words(words)
    }
}
