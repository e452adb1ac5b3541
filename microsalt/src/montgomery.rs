// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to microsalt, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

//! Scalar multiplication on the Montgomery form of Curve25519.
//!
//! We use variables \\( u, v \\) for the Montgomery curve, so that
//! “Montgomery \\(u\\)” here corresponds to “Montgomery \\(x\\)” in
//! RFC 7748.
//!
//! Montgomery arithmetic works not on the curve itself, but on the
//! \\(u\\)-line, which discards sign information and unifies the curve
//! and its quadratic twist.  See [_Montgomery curves and their
//! arithmetic_][costello-smith] by Costello and Smith for more details.
//!
//! The `MontgomeryPoint` struct contains the affine \\(u\\)-coordinate
//! \\(u\_0(P)\\) of a point \\(P\\) on either the curve or the twist.
//! Scalar multiplication runs the Montgomery ladder over all 255 bits of
//! a clamped scalar, so both the branch pattern and the memory access
//! pattern are the same for every scalar.
//!
//! Every 32-byte string is accepted as a point: there is no validation,
//! and the result of a multiplication is always a 32-byte string.
//!
//! [costello-smith]: https://eprint.iacr.org/2017/212.pdf

#![allow(non_snake_case)]

use core::hash::{Hash, Hasher};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::constants::X25519_BASEPOINT;
use crate::errors::{Error, InternalError};
use crate::field::FieldElement;

/// Holds the \\(u\\)-coordinate of a point on the Montgomery form of
/// Curve25519 or its twist.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MontgomeryPoint(pub [u8; 32]);

/// Equality of `MontgomeryPoint`s is defined mod p.
impl ConstantTimeEq for MontgomeryPoint {
    fn ct_eq(&self, other: &MontgomeryPoint) -> Choice {
        let self_fe = FieldElement::from_bytes(&self.0);
        let other_fe = FieldElement::from_bytes(&other.0);

        self_fe.ct_eq(&other_fe)
    }
}

impl PartialEq for MontgomeryPoint {
    fn eq(&self, other: &MontgomeryPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for MontgomeryPoint {}

// Equal MontgomeryPoints must hash to the same value. So we have to get them into a canonical
// encoding first
impl Hash for MontgomeryPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Do a round trip through a `FieldElement`. `to_bytes` is guaranteed to give a
        // canonical encoding.
        let canonical_bytes = FieldElement::from_bytes(&self.0).to_bytes();
        canonical_bytes.hash(state);
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for MontgomeryPoint {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl TryFrom<&[u8]> for MontgomeryPoint {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<MontgomeryPoint, Error> {
        let array: [u8; 32] = bytes.try_into().map_err(|_| {
            Error(InternalError::BytesLengthError {
                name: "MontgomeryPoint",
                length: 32,
            })
        })?;
        Ok(MontgomeryPoint(array))
    }
}

impl From<[u8; 32]> for MontgomeryPoint {
    fn from(bytes: [u8; 32]) -> MontgomeryPoint {
        MontgomeryPoint(bytes)
    }
}

impl MontgomeryPoint {
    /// The \\(u\\)-coordinate \\(0\\), the image of the identity and of the
    /// point of order two.
    pub const IDENTITY: MontgomeryPoint = MontgomeryPoint([0u8; 32]);

    /// Multiply this point by `clamp_integer(bytes)`.
    ///
    /// For a description of clamping, see [`clamp_integer`].
    pub fn mul_clamped(self, bytes: [u8; 32]) -> MontgomeryPoint {
        let scalar = clamp_integer(bytes);
        LadderState::new(&scalar, &self).run()
    }

    /// Multiply the basepoint by `clamp_integer(bytes)`.
    ///
    /// For a description of clamping, see [`clamp_integer`].
    pub fn mul_base_clamped(bytes: [u8; 32]) -> MontgomeryPoint {
        X25519_BASEPOINT.mul_clamped(bytes)
    }

    /// View this `MontgomeryPoint` as an array of bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert this `MontgomeryPoint` to an array of bytes.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Determine, in constant time, whether this point's \\(u\\)-coordinate
    /// is zero mod p.
    pub fn is_identity(&self) -> bool {
        self.ct_eq(&MontgomeryPoint::IDENTITY).into()
    }
}

/// A `ProjectivePoint` holds a point on the projective line
/// \\( \mathbb P(\mathbb F\_p) \\), which we identify with the Kummer
/// line of the Montgomery curve.
#[derive(Copy, Clone, Debug)]
struct ProjectivePoint {
    U: FieldElement,
    W: FieldElement,
}

impl ProjectivePoint {
    /// The point at infinity, \\((1 : 0)\\).
    const IDENTITY: ProjectivePoint = ProjectivePoint {
        U: FieldElement::ONE,
        W: FieldElement::ZERO,
    };

    /// Dehomogenize this point to affine coordinates.
    ///
    /// # Return
    ///
    /// * \\( u = U / W \\) if \\( W \neq 0 \\);
    /// * \\( 0 \\) if \\( W \eq 0 \\);
    fn as_affine(&self) -> MontgomeryPoint {
        let w_inv = self.W.invert();
        let u = &self.U * &w_inv;
        MontgomeryPoint(u.to_bytes())
    }
}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(
        a: &ProjectivePoint,
        b: &ProjectivePoint,
        choice: Choice,
    ) -> ProjectivePoint {
        ProjectivePoint {
            U: FieldElement::conditional_select(&a.U, &b.U, choice),
            W: FieldElement::conditional_select(&a.W, &b.W, choice),
        }
    }

    fn conditional_swap(a: &mut ProjectivePoint, b: &mut ProjectivePoint, choice: Choice) {
        FieldElement::conditional_swap(&mut a.U, &mut b.U, choice);
        FieldElement::conditional_swap(&mut a.W, &mut b.W, choice);
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for ProjectivePoint {
    fn zeroize(&mut self) {
        self.U.zeroize();
        self.W.zeroize();
    }
}

/// Perform the double-and-add step of the Montgomery ladder.
///
/// Given projective points
/// \\( (U\_P : W\_P) = u(P) \\),
/// \\( (U\_Q : W\_Q) = u(Q) \\),
/// and the affine difference
/// \\(      u\_{P-Q} = u(P-Q) \\), set
/// $$
///     (U\_P : W\_P) \gets u(\[2\]P)
/// $$
/// and
/// $$
///     (U\_Q : W\_Q) \gets u(P + Q).
/// $$
#[rustfmt::skip] // keep alignment of explanatory comments
fn differential_add_and_double(
    P: &mut ProjectivePoint,
    Q: &mut ProjectivePoint,
    affine_PmQ: &FieldElement,
) {
    let t0 = &P.U + &P.W;
    let t1 = &P.U - &P.W;
    let t2 = &Q.U + &Q.W;
    let t3 = &Q.U - &Q.W;

    let t4 = t0.square();   // (U_P + W_P)^2 = U_P^2 + 2 U_P W_P + W_P^2
    let t5 = t1.square();   // (U_P - W_P)^2 = U_P^2 - 2 U_P W_P + W_P^2

    let t6 = &t4 - &t5;     // 4 U_P W_P

    let t7 = &t0 * &t3;     // (U_P + W_P) (U_Q - W_Q) = U_P U_Q + W_P U_Q - U_P W_Q - W_P W_Q
    let t8 = &t1 * &t2;     // (U_P - W_P) (U_Q + W_Q) = U_P U_Q - W_P U_Q + U_P W_Q - W_P W_Q

    let t9  = &t7 + &t8;    // 2 (U_P U_Q - W_P W_Q)
    let t10 = &t7 - &t8;    // 2 (W_P U_Q - U_P W_Q)

    let t11 =  t9.square(); // 4 (U_P U_Q - W_P W_Q)^2
    let t12 = t10.square(); // 4 (W_P U_Q - U_P W_Q)^2

    let t13 = t6.mul_121666(); // t6 * APLUS2_OVER_FOUR = (A + 2) U_P W_P

    let t14 = &t4 * &t5;    // ((U_P + W_P)(U_P - W_P))^2 = (U_P^2 - W_P^2)^2
    let t15 = &t13 + &t5;   // (U_P - W_P)^2 + (A + 2) U_P W_P

    let t16 = &t6 * &t15;   // 4 (U_P W_P) ((U_P - W_P)^2 + (A + 2) U_P W_P)

    let t17 = affine_PmQ * &t12; // U_D * 4 (W_P U_Q - U_P W_Q)^2
    let t18 = t11;               // W_D * 4 (U_P U_Q - W_P W_Q)^2

    P.U = t14;  // U_{P'} = (U_P + W_P)^2 (U_P - W_P)^2
    P.W = t16;  // W_{P'} = (4 U_P W_P) ((U_P - W_P)^2 + ((A + 2)/4) 4 U_P W_P)
    Q.U = t18;  // U_{Q'} = W_D * 4 (U_P U_Q - W_P W_Q)^2
    Q.W = t17;  // W_{Q'} = U_D * 4 (W_P U_Q - U_P W_Q)^2
}

/// The working registers of one Montgomery ladder run.
///
/// Created at the start of a scalar multiplication and dropped (and, with
/// the `zeroize` feature, wiped) at its end.
struct LadderState {
    /// Affine \\(u\\)-coordinate of the input point.
    x0: FieldElement,
    /// The accumulator, \\([k]P\\) for the bits processed so far.
    p: ProjectivePoint,
    /// \\([k + 1]P\\).
    q: ProjectivePoint,
    /// The clamped scalar.
    scalar: [u8; 32],
    /// The bit processed by the previous step.
    previous_bit: u8,
}

impl LadderState {
    /// Index of the first bit processed: bit 255 of a clamped scalar is
    /// always zero.
    const TOP_BIT: usize = 254;

    fn new(clamped_scalar: &[u8; 32], point: &MontgomeryPoint) -> LadderState {
        let x0 = FieldElement::from_bytes(&point.0);
        LadderState {
            x0,
            p: ProjectivePoint::IDENTITY,
            q: ProjectivePoint {
                U: x0,
                W: FieldElement::ONE,
            },
            scalar: *clamped_scalar,
            previous_bit: 0,
        }
    }

    /// Process bit `i` of the scalar.
    ///
    /// The points are swapped only when the current bit differs from the
    /// previous one; the swap itself is masked, so its cost does not depend
    /// on the outcome.
    fn step(&mut self, i: usize) {
        let bit = (self.scalar[i >> 3] >> (i & 7)) & 1;
        let swap = Choice::from(bit ^ self.previous_bit);
        ProjectivePoint::conditional_swap(&mut self.p, &mut self.q, swap);
        differential_add_and_double(&mut self.p, &mut self.q, &self.x0);
        self.previous_bit = bit;
    }

    /// Run every step from bit 254 down to bit 0, undo the last pending
    /// swap and return the affine result.
    fn run(mut self) -> MontgomeryPoint {
        for i in (0..=Self::TOP_BIT).rev() {
            self.step(i);
        }
        ProjectivePoint::conditional_swap(
            &mut self.p,
            &mut self.q,
            Choice::from(self.previous_bit),
        );
        self.p.as_affine()
    }
}

#[cfg(feature = "zeroize")]
impl Drop for LadderState {
    fn drop(&mut self) {
        self.x0.zeroize();
        self.p.zeroize();
        self.q.zeroize();
        self.scalar.zeroize();
        self.previous_bit.zeroize();
    }
}

/// _Clamps_ the given little-endian representation of a 32-byte integer.
///
/// Clamping clears the three least significant bits (making the integer a
/// multiple of the cofactor 8), clears bit 255 and sets bit 254.  It is
/// idempotent, and depends only on the bits it overwrites.
#[must_use]
pub const fn clamp_integer(mut bytes: [u8; 32]) -> [u8; 32] {
    bytes[0] &= 0b1111_1000;
    bytes[31] &= 0b0111_1111;
    bytes[31] |= 0b0100_0000;
    bytes
}

/// The X25519 function: multiply the point with \\(u\\)-coordinate `point`
/// by the clamped `scalar`, returning the encoded \\(u\\)-coordinate of
/// the result.
///
/// Total over all inputs: any 32 bytes are a valid scalar and a valid
/// point.
pub fn scalarmult(scalar: &[u8; 32], point: &[u8; 32]) -> [u8; 32] {
    MontgomeryPoint(*point).mul_clamped(*scalar).to_bytes()
}

/// Multiply the X25519 basepoint \\(u = 9\\) by the clamped `scalar`.
///
/// This is the public key for the secret `scalar`.
pub fn scalarmult_base(scalar: &[u8; 32]) -> [u8; 32] {
    MontgomeryPoint::mul_base_clamped(*scalar).to_bytes()
}
