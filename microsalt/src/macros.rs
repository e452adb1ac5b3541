// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to microsalt, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

//! Internal macros.

/// Define borrow and non-borrow variants of `Add`.
macro_rules! define_add_variants {
    (LHS = $lhs:ty, RHS = $rhs:ty, Output = $out:ty) => {
        impl<'b> Add<&'b $rhs> for $lhs {
            type Output = $out;
            fn add(self, rhs: &'b $rhs) -> $out {
                &self + rhs
            }
        }

        impl<'a> Add<$rhs> for &'a $lhs {
            type Output = $out;
            fn add(self, rhs: $rhs) -> $out {
                self + &rhs
            }
        }

        impl Add<$rhs> for $lhs {
            type Output = $out;
            fn add(self, rhs: $rhs) -> $out {
                &self + &rhs
            }
        }
    };
}

/// Define borrow and non-borrow variants of `Sub`.
macro_rules! define_sub_variants {
    (LHS = $lhs:ty, RHS = $rhs:ty, Output = $out:ty) => {
        impl<'b> Sub<&'b $rhs> for $lhs {
            type Output = $out;
            fn sub(self, rhs: &'b $rhs) -> $out {
                &self - rhs
            }
        }

        impl<'a> Sub<$rhs> for &'a $lhs {
            type Output = $out;
            fn sub(self, rhs: $rhs) -> $out {
                self - &rhs
            }
        }

        impl Sub<$rhs> for $lhs {
            type Output = $out;
            fn sub(self, rhs: $rhs) -> $out {
                &self - &rhs
            }
        }
    };
}

/// Define borrow and non-borrow variants of `Mul`.
macro_rules! define_mul_variants {
    (LHS = $lhs:ty, RHS = $rhs:ty, Output = $out:ty) => {
        impl<'b> Mul<&'b $rhs> for $lhs {
            type Output = $out;
            fn mul(self, rhs: &'b $rhs) -> $out {
                &self * rhs
            }
        }

        impl<'a> Mul<$rhs> for &'a $lhs {
            type Output = $out;
            fn mul(self, rhs: $rhs) -> $out {
                self * &rhs
            }
        }

        impl Mul<$rhs> for $lhs {
            type Output = $out;
            fn mul(self, rhs: $rhs) -> $out {
                &self * &rhs
            }
        }
    };
}

/// Define a fixed-width little-endian value type of `$bits` bits.
///
/// The value owns a single `[u32; $bits / 32]` buffer.  The byte view is
/// derived from it by little-endian packing, so the two views can never
/// disagree.
macro_rules! define_fixed_width_value {
    ($name:ident, $bits:literal, $doc:literal) => {
        #[doc = $doc]
        #[derive(Copy, Clone, Default)]
        pub struct $name {
            words: [u32; $bits / 32],
        }

        impl $name {
            /// Width of this value in bits.
            pub const BITS: usize = $bits;

            /// Length of the byte view.
            pub const BYTES: usize = $bits / 8;

            /// Length of the word view.
            pub const WORDS: usize = $bits / 32;

            /// The all-zero value.
            pub const ZERO: $name = $name {
                words: [0u32; $bits / 32],
            };

            /// Construct a value from its little-endian word sequence.
            pub const fn from_words(words: [u32; $bits / 32]) -> $name {
                $name { words }
            }

            /// Construct a value from its little-endian byte sequence.
            pub fn from_bytes(bytes: &[u8; $bits / 8]) -> $name {
                let mut words = [0u32; $bits / 32];
                for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
                    *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                }
                $name { words }
            }

            /// Pack this value into its little-endian byte sequence.
            pub fn to_bytes(&self) -> [u8; $bits / 8] {
                let mut bytes = [0u8; $bits / 8];
                for (chunk, word) in bytes.chunks_exact_mut(4).zip(self.words.iter()) {
                    chunk.copy_from_slice(&word.to_le_bytes());
                }
                bytes
            }

            /// View this value as little-endian 32-bit words.
            pub const fn as_words(&self) -> &[u32; $bits / 32] {
                &self.words
            }

            /// Mutably view this value as little-endian 32-bit words.
            pub fn as_words_mut(&mut self) -> &mut [u32; $bits / 32] {
                &mut self.words
            }

            /// Read byte `i` of the little-endian byte view.
            ///
            /// # Panics
            ///
            /// If `i` is not less than `Self::BYTES`.
            #[inline]
            pub fn byte(&self, i: usize) -> u8 {
                (self.words[i / 4] >> (8 * (i % 4))) as u8
            }

            /// Overwrite byte `i` of the little-endian byte view.
            ///
            /// # Panics
            ///
            /// If `i` is not less than `Self::BYTES`.
            #[inline]
            pub fn set_byte(&mut self, i: usize, value: u8) {
                let shift = 8 * (i % 4);
                let word = &mut self.words[i / 4];
                *word = (*word & !(0xff << shift)) | ((value as u32) << shift);
            }
        }

        impl From<[u8; $bits / 8]> for $name {
            fn from(bytes: [u8; $bits / 8]) -> $name {
                $name::from_bytes(&bytes)
            }
        }

        impl From<&[u8; $bits / 8]> for $name {
            fn from(bytes: &[u8; $bits / 8]) -> $name {
                $name::from_bytes(bytes)
            }
        }

        impl ConstantTimeEq for $name {
            fn ct_eq(&self, other: &$name) -> Choice {
                self.words[..].ct_eq(&other.words[..])
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &$name) -> bool {
                self.ct_eq(other).into()
            }
        }

        impl Eq for $name {}

        impl ConditionallySelectable for $name {
            fn conditional_select(a: &$name, b: &$name, choice: Choice) -> $name {
                let mut words = [0u32; $bits / 32];
                for (i, word) in words.iter_mut().enumerate() {
                    *word = u32::conditional_select(&a.words[i], &b.words[i], choice);
                }
                $name { words }
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}(0x", stringify!($name))?;
                for word in self.words.iter().rev() {
                    write!(f, "{:08x}", word)?;
                }
                write!(f, ")")
            }
        }

        #[cfg(feature = "zeroize")]
        impl Zeroize for $name {
            fn zeroize(&mut self) {
                self.words.zeroize();
            }
        }
    };
}
