// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to microsalt, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

//! The Salsa20 permutation, the Salsa20 core hash and HSalsa20.
//!
//! All three work on a 16-word state laid out as
//!
//! ```text
//! c0 k0 k1 k2
//! k3 c1 i0 i1
//! i2 i3 c2 k4
//! k5 k6 k7 c3
//! ```
//!
//! where `c` is a 16-byte constant (normally `"expand 32-byte k"`), `k`
//! a 32-byte key and `i` a 16-byte input (nonce and block counter).  Each
//! round is made of additions, fixed rotations and XORs, so the
//! instruction trace is the same for every key.

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::bigint::{U128, U256, U512};

/// Number of rounds; applied as ten double rounds.
const ROUNDS: usize = 20;

#[inline(always)]
fn quarter_round(x: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    x[b] ^= x[a].wrapping_add(x[d]).rotate_left(7);
    x[c] ^= x[b].wrapping_add(x[a]).rotate_left(9);
    x[d] ^= x[c].wrapping_add(x[b]).rotate_left(13);
    x[a] ^= x[d].wrapping_add(x[c]).rotate_left(18);
}

/// Apply the 20-round Salsa20 permutation to `state` in place.
///
/// There is no feed-forward: this is the building block of both
/// [`salsa20_transform`] and [`hsalsa20`].
pub fn hsalsa20_block(state: &mut [u32; 16]) {
    for _ in 0..ROUNDS / 2 {
        // column round
        quarter_round(state, 0, 4, 8, 12);
        quarter_round(state, 5, 9, 13, 1);
        quarter_round(state, 10, 14, 2, 6);
        quarter_round(state, 15, 3, 7, 11);
        // row round
        quarter_round(state, 0, 1, 2, 3);
        quarter_round(state, 5, 6, 7, 4);
        quarter_round(state, 10, 11, 8, 9);
        quarter_round(state, 15, 12, 13, 14);
    }
}

/// The Salsa20 core hash: permute `state` and add the original state back
/// word by word.
pub fn salsa20_transform(state: &mut [u32; 16]) {
    let mut x = *state;
    hsalsa20_block(&mut x);
    for (s, p) in state.iter_mut().zip(x.iter()) {
        *s = s.wrapping_add(*p);
    }
    #[cfg(feature = "zeroize")]
    x.zeroize();
}

/// Lay out constant, key and input words as a Salsa20 state.
#[rustfmt::skip]
fn initial_state(input: &U128, key: &U256, constant: &U128) -> [u32; 16] {
    let c = constant.as_words();
    let k = key.as_words();
    let i = input.as_words();
    [
        c[0], k[0], k[1], k[2],
        k[3], c[1], i[0], i[1],
        i[2], i[3], c[2], k[4],
        k[5], k[6], k[7], c[3],
    ]
}

/// Compute one 64-byte Salsa20 block from word-aligned inputs.
pub fn core_salsa20_aligned(input: &U128, key: &U256, constant: &U128) -> U512 {
    let mut state = initial_state(input, key, constant);
    salsa20_transform(&mut state);
    let block = U512::from_words(state);
    #[cfg(feature = "zeroize")]
    state.zeroize();
    block
}

/// Compute one 64-byte Salsa20 block.
///
/// `input` holds the 8-byte nonce followed by the 8-byte little-endian
/// block counter.
#[cfg_attr(not(feature = "zeroize"), allow(unused_mut))]
pub fn core_salsa20(input: &[u8; 16], key: &[u8; 32], constant: &[u8; 16]) -> [u8; 64] {
    let mut key = U256::from_bytes(key);
    let mut block =
        core_salsa20_aligned(&U128::from_bytes(input), &key, &U128::from_bytes(constant));
    let bytes = block.to_bytes();
    #[cfg(feature = "zeroize")]
    {
        key.zeroize();
        block.zeroize();
    }
    bytes
}

/// Derive a 256-bit subkey from word-aligned inputs.
///
/// Runs the permutation without feed-forward and keeps the diagonal
/// (words 0, 5, 10, 15) followed by the input words (6, 7, 8, 9).
pub fn hsalsa20_aligned(nonce: &U128, key: &U256, constant: &U128) -> U256 {
    let mut x = initial_state(nonce, key, constant);
    hsalsa20_block(&mut x);
    let subkey = U256::from_words([x[0], x[5], x[10], x[15], x[6], x[7], x[8], x[9]]);
    #[cfg(feature = "zeroize")]
    x.zeroize();
    subkey
}

/// Derive a 32-byte subkey from a 32-byte key, a 16-byte nonce and a
/// 16-byte constant.
///
/// XSalsa20 feeds the first 16 bytes of its 24-byte nonce through here.
#[cfg_attr(not(feature = "zeroize"), allow(unused_mut))]
pub fn hsalsa20(nonce: &[u8; 16], key: &[u8; 32], constant: &[u8; 16]) -> [u8; 32] {
    let mut key = U256::from_bytes(key);
    let mut subkey =
        hsalsa20_aligned(&U128::from_bytes(nonce), &key, &U128::from_bytes(constant));
    let bytes = subkey.to_bytes();
    #[cfg(feature = "zeroize")]
    {
        key.zeroize();
        subkey.zeroize();
    }
    bytes
}
