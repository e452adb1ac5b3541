// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to microsalt, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

//! Field arithmetic modulo \\(p = 2\^{255} - 19\\), using \\(32\\)-bit
//! limbs with \\(64\\)-bit products.
//!
//! This is the ref10 representation: ten signed limbs in radix
//! \\(2\^{25.5}\\), which leaves enough headroom that sums and differences
//! of reduced elements can be fed straight into a multiplication without
//! carrying first.

use core::fmt::Debug;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Sub, SubAssign};

use subtle::Choice;
use subtle::ConditionallySelectable;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// A `FieldElement2625` represents an element of the field
/// \\( \mathbb Z / (2\^{255} - 19)\\).
///
/// An element \\(t\\) with limbs \\(t_0, \ldots, t_9\\) represents the
/// integer
/// $$
/// t_0 + 2\^{26} t_1 + 2\^{51} t_2 + 2\^{77} t_3 + 2\^{102} t_4
///     + 2\^{128} t_5 + 2\^{153} t_6 + 2\^{179} t_7 + 2\^{204} t_8
///     + 2\^{230} t_9.
/// $$
///
/// Limbs are signed and may be left unreduced between operations.  The
/// output of `mul`, `square`, `mul_121666` and `from_bytes` has
/// \\(|t_i|\\) bounded by \\(1.01 \cdot 2\^{25}\\) for even \\(i\\) and
/// \\(1.01 \cdot 2\^{24}\\) for odd \\(i\\); a single addition or
/// subtraction of two such elements is a valid multiplication input.
///
/// # Note
///
/// The `microsalt::field` module provides a type alias
/// `microsalt::field::FieldElement` to this type, and adds inversion on
/// top of it.
#[derive(Copy, Clone)]
pub struct FieldElement2625(pub(crate) [i32; 10]);

impl Debug for FieldElement2625 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FieldElement2625({:?})", &self.0[..])
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for FieldElement2625 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<'b> AddAssign<&'b FieldElement2625> for FieldElement2625 {
    fn add_assign(&mut self, rhs: &'b FieldElement2625) {
        for i in 0..10 {
            self.0[i] += rhs.0[i];
        }
    }
}

impl<'a, 'b> Add<&'b FieldElement2625> for &'a FieldElement2625 {
    type Output = FieldElement2625;
    fn add(self, rhs: &'b FieldElement2625) -> FieldElement2625 {
        let mut output = *self;
        output += rhs;
        output
    }
}

impl<'b> SubAssign<&'b FieldElement2625> for FieldElement2625 {
    fn sub_assign(&mut self, rhs: &'b FieldElement2625) {
        for i in 0..10 {
            self.0[i] -= rhs.0[i];
        }
    }
}

impl<'a, 'b> Sub<&'b FieldElement2625> for &'a FieldElement2625 {
    type Output = FieldElement2625;
    fn sub(self, rhs: &'b FieldElement2625) -> FieldElement2625 {
        let mut output = *self;
        output -= rhs;
        output
    }
}

impl<'b> MulAssign<&'b FieldElement2625> for FieldElement2625 {
    fn mul_assign(&mut self, rhs: &'b FieldElement2625) {
        let result = (self as &FieldElement2625) * rhs;
        self.0 = result.0;
    }
}

impl<'a, 'b> Mul<&'b FieldElement2625> for &'a FieldElement2625 {
    type Output = FieldElement2625;

    #[rustfmt::skip] // keep alignment of h[*] calculations
    fn mul(self, rhs: &'b FieldElement2625) -> FieldElement2625 {
        // Schoolbook multiplication.  Wrapped-around terms pick up a
        // factor of 19 (2^255 = 19 mod p), and odd-times-odd limb products
        // pick up a factor of 2 from the half-bit radix offset.
        let f0 = self.0[0] as i64;
        let f1 = self.0[1] as i64;
        let f2 = self.0[2] as i64;
        let f3 = self.0[3] as i64;
        let f4 = self.0[4] as i64;
        let f5 = self.0[5] as i64;
        let f6 = self.0[6] as i64;
        let f7 = self.0[7] as i64;
        let f8 = self.0[8] as i64;
        let f9 = self.0[9] as i64;

        let f1_2 = 2 * f1;
        let f3_2 = 2 * f3;
        let f5_2 = 2 * f5;
        let f7_2 = 2 * f7;
        let f9_2 = 2 * f9;

        let g0 = rhs.0[0] as i64;
        let g1 = rhs.0[1] as i64;
        let g2 = rhs.0[2] as i64;
        let g3 = rhs.0[3] as i64;
        let g4 = rhs.0[4] as i64;
        let g5 = rhs.0[5] as i64;
        let g6 = rhs.0[6] as i64;
        let g7 = rhs.0[7] as i64;
        let g8 = rhs.0[8] as i64;
        let g9 = rhs.0[9] as i64;

        let g1_19 = 19 * g1;
        let g2_19 = 19 * g2;
        let g3_19 = 19 * g3;
        let g4_19 = 19 * g4;
        let g5_19 = 19 * g5;
        let g6_19 = 19 * g6;
        let g7_19 = 19 * g7;
        let g8_19 = 19 * g8;
        let g9_19 = 19 * g9;

        let h0 = f0*g0 + f1_2*g9_19 + f2*g8_19 + f3_2*g7_19 + f4*g6_19 + f5_2*g5_19 + f6*g4_19 + f7_2*g3_19 + f8*g2_19 + f9_2*g1_19;
        let h1 = f0*g1 +   f1*g0    + f2*g9_19 +   f3*g8_19 + f4*g7_19 +   f5*g6_19 + f6*g5_19 +   f7*g4_19 + f8*g3_19 +   f9*g2_19;
        let h2 = f0*g2 + f1_2*g1    + f2*g0    + f3_2*g9_19 + f4*g8_19 + f5_2*g7_19 + f6*g6_19 + f7_2*g5_19 + f8*g4_19 + f9_2*g3_19;
        let h3 = f0*g3 +   f1*g2    + f2*g1    +   f3*g0    + f4*g9_19 +   f5*g8_19 + f6*g7_19 +   f7*g6_19 + f8*g5_19 +   f9*g4_19;
        let h4 = f0*g4 + f1_2*g3    + f2*g2    + f3_2*g1    + f4*g0    + f5_2*g9_19 + f6*g8_19 + f7_2*g7_19 + f8*g6_19 + f9_2*g5_19;
        let h5 = f0*g5 +   f1*g4    + f2*g3    +   f3*g2    + f4*g1    +   f5*g0    + f6*g9_19 +   f7*g8_19 + f8*g7_19 +   f9*g6_19;
        let h6 = f0*g6 + f1_2*g5    + f2*g4    + f3_2*g3    + f4*g2    + f5_2*g1    + f6*g0    + f7_2*g9_19 + f8*g8_19 + f9_2*g7_19;
        let h7 = f0*g7 +   f1*g6    + f2*g5    +   f3*g4    + f4*g3    +   f5*g2    + f6*g1    +   f7*g0    + f8*g9_19 +   f9*g8_19;
        let h8 = f0*g8 + f1_2*g7    + f2*g6    + f3_2*g5    + f4*g4    + f5_2*g3    + f6*g2    + f7_2*g1    + f8*g0    + f9_2*g9_19;
        let h9 = f0*g9 +   f1*g8    + f2*g7    +   f3*g6    + f4*g5    +   f5*g4    + f6*g3    +   f7*g2    + f8*g1    +   f9*g0;

        FieldElement2625::reduce([h0, h1, h2, h3, h4, h5, h6, h7, h8, h9])
    }
}

define_add_variants!(LHS = FieldElement2625, RHS = FieldElement2625, Output = FieldElement2625);
define_sub_variants!(LHS = FieldElement2625, RHS = FieldElement2625, Output = FieldElement2625);
define_mul_variants!(LHS = FieldElement2625, RHS = FieldElement2625, Output = FieldElement2625);

impl ConditionallySelectable for FieldElement2625 {
    fn conditional_select(
        a: &FieldElement2625,
        b: &FieldElement2625,
        choice: Choice,
    ) -> FieldElement2625 {
        FieldElement2625([
            i32::conditional_select(&a.0[0], &b.0[0], choice),
            i32::conditional_select(&a.0[1], &b.0[1], choice),
            i32::conditional_select(&a.0[2], &b.0[2], choice),
            i32::conditional_select(&a.0[3], &b.0[3], choice),
            i32::conditional_select(&a.0[4], &b.0[4], choice),
            i32::conditional_select(&a.0[5], &b.0[5], choice),
            i32::conditional_select(&a.0[6], &b.0[6], choice),
            i32::conditional_select(&a.0[7], &b.0[7], choice),
            i32::conditional_select(&a.0[8], &b.0[8], choice),
            i32::conditional_select(&a.0[9], &b.0[9], choice),
        ])
    }

    fn conditional_swap(a: &mut FieldElement2625, b: &mut FieldElement2625, choice: Choice) {
        for i in 0..10 {
            i32::conditional_swap(&mut a.0[i], &mut b.0[i], choice);
        }
    }

    fn conditional_assign(&mut self, other: &FieldElement2625, choice: Choice) {
        for i in 0..10 {
            self.0[i].conditional_assign(&other.0[i], choice);
        }
    }
}

#[inline]
fn load3(input: &[u8]) -> i64 {
    (input[0] as i64) | ((input[1] as i64) << 8) | ((input[2] as i64) << 16)
}

#[inline]
fn load4(input: &[u8]) -> i64 {
    (input[0] as i64)
        | ((input[1] as i64) << 8)
        | ((input[2] as i64) << 16)
        | ((input[3] as i64) << 24)
}

impl FieldElement2625 {
    /// The additive identity.
    pub const ZERO: FieldElement2625 = FieldElement2625([0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    /// The multiplicative identity.
    pub const ONE: FieldElement2625 = FieldElement2625([1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

    /// Construct an element directly from its limbs.
    pub(crate) const fn from_limbs(limbs: [i32; 10]) -> FieldElement2625 {
        FieldElement2625(limbs)
    }

    /// Carry-propagate 64-bit limb accumulators into a weakly reduced element.
    ///
    /// # Preconditions
    ///
    /// * \\(|h_0|\\) and \\(|h_1|\\) up to about \\(2\^{59}\\), the bound
    ///   left by a full product.
    ///
    /// # Postconditions
    ///
    /// * \\(|h_i|\\) bounded by \\(1.01 \cdot 2\^{25}\\) (even \\(i\\)) or
    ///   \\(1.01 \cdot 2\^{24}\\) (odd \\(i\\)).
    fn reduce(mut h: [i64; 10]) -> FieldElement2625 {
        let mut c = [0i64; 10];

        // Two interleaved carry chains, 0..4 and 4..9, so the dependency
        // depth stays short.
        c[0] = (h[0] + (1 << 25)) >> 26;
        h[1] += c[0];
        h[0] -= c[0] << 26;
        c[4] = (h[4] + (1 << 25)) >> 26;
        h[5] += c[4];
        h[4] -= c[4] << 26;

        c[1] = (h[1] + (1 << 24)) >> 25;
        h[2] += c[1];
        h[1] -= c[1] << 25;
        c[5] = (h[5] + (1 << 24)) >> 25;
        h[6] += c[5];
        h[5] -= c[5] << 25;

        c[2] = (h[2] + (1 << 25)) >> 26;
        h[3] += c[2];
        h[2] -= c[2] << 26;
        c[6] = (h[6] + (1 << 25)) >> 26;
        h[7] += c[6];
        h[6] -= c[6] << 26;

        c[3] = (h[3] + (1 << 24)) >> 25;
        h[4] += c[3];
        h[3] -= c[3] << 25;
        c[7] = (h[7] + (1 << 24)) >> 25;
        h[8] += c[7];
        h[7] -= c[7] << 25;

        c[4] = (h[4] + (1 << 25)) >> 26;
        h[5] += c[4];
        h[4] -= c[4] << 26;
        c[8] = (h[8] + (1 << 25)) >> 26;
        h[9] += c[8];
        h[8] -= c[8] << 26;

        // 2^255 = 19 mod p
        c[9] = (h[9] + (1 << 24)) >> 25;
        h[0] += c[9] * 19;
        h[9] -= c[9] << 25;

        c[0] = (h[0] + (1 << 25)) >> 26;
        h[1] += c[0];
        h[0] -= c[0] << 26;

        // Every limb now fits in an i32.
        FieldElement2625([
            h[0] as i32,
            h[1] as i32,
            h[2] as i32,
            h[3] as i32,
            h[4] as i32,
            h[5] as i32,
            h[6] as i32,
            h[7] as i32,
            h[8] as i32,
            h[9] as i32,
        ])
    }

    /// Load a `FieldElement2625` from the low 255 bits of a 256-bit
    /// input.
    ///
    /// # Warning
    ///
    /// This function does not check that the input used the canonical
    /// representative.  It masks the high bit, but it will happily
    /// decode 2^255 - 18 to 1.
    #[rustfmt::skip] // keep alignment of h[*] calculations
    pub fn from_bytes(data: &[u8; 32]) -> FieldElement2625 {
        let mut h = [0i64; 10];
        h[0] =  load4(&data[ 0..]);
        h[1] =  load3(&data[ 4..]) << 6;
        h[2] =  load3(&data[ 7..]) << 5;
        h[3] =  load3(&data[10..]) << 3;
        h[4] =  load3(&data[13..]) << 2;
        h[5] =  load4(&data[16..]);
        h[6] =  load3(&data[20..]) << 7;
        h[7] =  load3(&data[23..]) << 5;
        h[8] =  load3(&data[26..]) << 4;
        h[9] = (load3(&data[29..]) & 0x7fffff) << 2;

        FieldElement2625::reduce(h)
    }

    /// Force the canonical representative in \\([0, p)\\).
    ///
    /// Accepts any limbs a chain of a few unreduced additions can produce:
    /// the element is first weakly reduced, then the quotient
    /// \\(q = \lfloor h / p \rfloor \in \\{0, 1\\}\\) is computed without
    /// branching and \\(qp\\) is subtracted.
    pub fn reduce_completely(&mut self) {
        let mut h = FieldElement2625::reduce(self.0.map(|limb| limb as i64)).0;

        // q = floor((h + 19 * 2^-25 * h9 + 2^-1) / 2^255), computed by
        // rippling the rounding carry through every limb.
        let mut q: i32 = (19 * h[9] + (1 << 24)) >> 25;
        q = (h[0] + q) >> 26;
        q = (h[1] + q) >> 25;
        q = (h[2] + q) >> 26;
        q = (h[3] + q) >> 25;
        q = (h[4] + q) >> 26;
        q = (h[5] + q) >> 25;
        q = (h[6] + q) >> 26;
        q = (h[7] + q) >> 25;
        q = (h[8] + q) >> 26;
        q = (h[9] + q) >> 25;

        // h - qp = h + 19q - 2^255 q; the 2^255 q term falls off the top
        // carry below.
        h[0] += 19 * q;

        let mut carry = [0i32; 10];
        carry[0] = h[0] >> 26;
        h[1] += carry[0];
        h[0] -= carry[0] << 26;
        carry[1] = h[1] >> 25;
        h[2] += carry[1];
        h[1] -= carry[1] << 25;
        carry[2] = h[2] >> 26;
        h[3] += carry[2];
        h[2] -= carry[2] << 26;
        carry[3] = h[3] >> 25;
        h[4] += carry[3];
        h[3] -= carry[3] << 25;
        carry[4] = h[4] >> 26;
        h[5] += carry[4];
        h[4] -= carry[4] << 26;
        carry[5] = h[5] >> 25;
        h[6] += carry[5];
        h[5] -= carry[5] << 25;
        carry[6] = h[6] >> 26;
        h[7] += carry[6];
        h[6] -= carry[6] << 26;
        carry[7] = h[7] >> 25;
        h[8] += carry[7];
        h[7] -= carry[7] << 25;
        carry[8] = h[8] >> 26;
        h[9] += carry[8];
        h[8] -= carry[8] << 26;
        carry[9] = h[9] >> 25;
        h[9] -= carry[9] << 25;

        self.0 = h;
    }

    /// Serialize this `FieldElement2625` to a 32-byte array.  The
    /// encoding is canonical.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut t = *self;
        t.reduce_completely();
        let h = t.0;

        let mut s = [0u8; 32];
        s[0] = h[0] as u8;
        s[1] = (h[0] >> 8) as u8;
        s[2] = (h[0] >> 16) as u8;
        s[3] = ((h[0] >> 24) | (h[1] << 2)) as u8;
        s[4] = (h[1] >> 6) as u8;
        s[5] = (h[1] >> 14) as u8;
        s[6] = ((h[1] >> 22) | (h[2] << 3)) as u8;
        s[7] = (h[2] >> 5) as u8;
        s[8] = (h[2] >> 13) as u8;
        s[9] = ((h[2] >> 21) | (h[3] << 5)) as u8;
        s[10] = (h[3] >> 3) as u8;
        s[11] = (h[3] >> 11) as u8;
        s[12] = ((h[3] >> 19) | (h[4] << 6)) as u8;
        s[13] = (h[4] >> 2) as u8;
        s[14] = (h[4] >> 10) as u8;
        s[15] = (h[4] >> 18) as u8;
        s[16] = h[5] as u8;
        s[17] = (h[5] >> 8) as u8;
        s[18] = (h[5] >> 16) as u8;
        s[19] = ((h[5] >> 24) | (h[6] << 1)) as u8;
        s[20] = (h[6] >> 7) as u8;
        s[21] = (h[6] >> 15) as u8;
        s[22] = ((h[6] >> 23) | (h[7] << 3)) as u8;
        s[23] = (h[7] >> 5) as u8;
        s[24] = (h[7] >> 13) as u8;
        s[25] = ((h[7] >> 21) | (h[8] << 4)) as u8;
        s[26] = (h[8] >> 4) as u8;
        s[27] = (h[8] >> 12) as u8;
        s[28] = ((h[8] >> 20) | (h[9] << 6)) as u8;
        s[29] = (h[9] >> 2) as u8;
        s[30] = (h[9] >> 10) as u8;
        s[31] = (h[9] >> 18) as u8;

        // High bit should be zero.
        debug_assert!((s[31] & 0b1000_0000u8) == 0u8);

        s
    }

    #[rustfmt::skip] // keep alignment of h[*] calculations
    fn square_inner(&self) -> [i64; 10] {
        let f0    = self.0[0] as i64;
        let f1    = self.0[1] as i64;
        let f2    = self.0[2] as i64;
        let f3    = self.0[3] as i64;
        let f4    = self.0[4] as i64;
        let f5    = self.0[5] as i64;
        let f6    = self.0[6] as i64;
        let f7    = self.0[7] as i64;
        let f8    = self.0[8] as i64;
        let f9    = self.0[9] as i64;
        let f0_2  = 2 * f0;
        let f1_2  = 2 * f1;
        let f2_2  = 2 * f2;
        let f3_2  = 2 * f3;
        let f4_2  = 2 * f4;
        let f5_2  = 2 * f5;
        let f6_2  = 2 * f6;
        let f7_2  = 2 * f7;
        let f5_38 = 38 * f5;
        let f6_19 = 19 * f6;
        let f7_38 = 38 * f7;
        let f8_19 = 19 * f8;
        let f9_38 = 38 * f9;

        let mut h = [0i64; 10];
        h[0] =   f0*f0 + f1_2*f9_38 + f2_2*f8_19 + f3_2*f7_38 + f4_2*f6_19 + f5*f5_38;
        h[1] = f0_2*f1 +   f2*f9_38 + f3_2*f8_19 +   f4*f7_38 + f5_2*f6_19;
        h[2] = f0_2*f2 + f1_2*f1    + f3_2*f9_38 + f4_2*f8_19 + f5_2*f7_38 + f6*f6_19;
        h[3] = f0_2*f3 + f1_2*f2    +   f4*f9_38 + f5_2*f8_19 +   f6*f7_38;
        h[4] = f0_2*f4 + f1_2*f3_2  +   f2*f2    + f5_2*f9_38 + f6_2*f8_19 + f7*f7_38;
        h[5] = f0_2*f5 + f1_2*f4    + f2_2*f3    +   f6*f9_38 + f7_2*f8_19;
        h[6] = f0_2*f6 + f1_2*f5_2  + f2_2*f4    + f3_2*f3    + f7_2*f9_38 + f8*f8_19;
        h[7] = f0_2*f7 + f1_2*f6    + f2_2*f5    + f3_2*f4    +   f8*f9_38;
        h[8] = f0_2*f8 + f1_2*f7_2  + f2_2*f6    + f3_2*f5_2  +   f4*f4    + f9*f9_38;
        h[9] = f0_2*f9 + f1_2*f8    + f2_2*f7    + f3_2*f6    + f4_2*f5;

        h
    }

    /// Compute `self^2`.
    pub fn square(&self) -> FieldElement2625 {
        FieldElement2625::reduce(self.square_inner())
    }

    /// Compute `self^(2^k)` by squaring `k` times, for `k > 0`.
    pub fn pow2k(&self, k: u32) -> FieldElement2625 {
        debug_assert!(k > 0);
        let mut z = self.square();
        for _ in 1..k {
            z = z.square();
        }
        z
    }

    /// Multiply by the ladder constant \\((A + 2) / 4 = 121666\\), which is
    /// [`APLUS2_OVER_FOUR`](crate::constants::APLUS2_OVER_FOUR).
    ///
    /// Cheaper than a general multiplication: each limb is scaled once and
    /// the products are carried in a single pass.
    pub fn mul_121666(&self) -> FieldElement2625 {
        let mut h = [0i64; 10];
        for (hi, fi) in h.iter_mut().zip(self.0.iter()) {
            *hi = (*fi as i64) * 121666;
        }
        FieldElement2625::reduce(h)
    }
}
