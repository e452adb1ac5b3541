// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to microsalt, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

//! Salsa20 and XSalsa20 keystreams.
//!
//! The keystream is the concatenation of [`core_salsa20`] blocks over the
//! input `nonce || counter`, where `counter` is a 64-bit little-endian
//! block index starting at zero.  The last block is truncated to the
//! requested length.
//!
//! XSalsa20 first derives a subkey with [`hsalsa20`] from the first 16
//! bytes of its 24-byte nonce, then runs Salsa20 under that subkey with the
//! remaining 8 bytes as nonce.
//!
//! The one-shot functions take the whole message at once.
//! [`Salsa20Chunked`] produces the same bytes for a message handed over in
//! fragments of any size.
//!
//! Reusing a (key, nonce) pair for two messages reveals their XOR.
//! Nothing here can detect that.
//!
//! [`core_salsa20`]: crate::salsa20::core_salsa20
//! [`hsalsa20`]: crate::salsa20::hsalsa20

use core::cmp;

use log::trace;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::bigint::{U128, U256, U512};
use crate::constants::SALSA20_SIGMA;
use crate::errors::{Error, InternalError};
use crate::salsa20::{core_salsa20_aligned, hsalsa20_aligned};

/// Length of a Salsa20 or XSalsa20 key.
pub const KEY_BYTES: usize = 32;

/// Length of a Salsa20 nonce.
pub const SALSA20_NONCE_BYTES: usize = 8;

/// Length of an XSalsa20 nonce.
pub const XSALSA20_NONCE_BYTES: usize = 24;

/// Length of one keystream block.
pub const BLOCK_BYTES: usize = 64;

/// Build the initial core input: the nonce followed by a zero counter.
fn initial_input(nonce: &[u8; SALSA20_NONCE_BYTES]) -> U128 {
    let mut bytes = [0u8; 16];
    bytes[..SALSA20_NONCE_BYTES].copy_from_slice(nonce);
    U128::from_bytes(&bytes)
}

/// Advance the 64-bit block counter held in words 2 and 3 of `input`.
///
/// The carry runs across all eight counter bytes.
fn increment_counter(input: &mut U128) {
    let words = input.as_words_mut();
    let counter = ((words[3] as u64) << 32 | words[2] as u64).wrapping_add(1);
    words[2] = counter as u32;
    words[3] = (counter >> 32) as u32;
}

/// Derive the XSalsa20 subkey and inner nonce from a 24-byte nonce.
#[cfg_attr(not(feature = "zeroize"), allow(unused_mut))]
fn xsalsa20_setup(nonce: &[u8; XSALSA20_NONCE_BYTES], key: &[u8; KEY_BYTES]) -> (U256, [u8; 8]) {
    let mut prefix = [0u8; 16];
    prefix.copy_from_slice(&nonce[..16]);
    let mut suffix = [0u8; SALSA20_NONCE_BYTES];
    suffix.copy_from_slice(&nonce[16..]);

    let mut key = U256::from_bytes(key);
    let subkey = hsalsa20_aligned(&U128::from_bytes(&prefix), &key, &SALSA20_SIGMA);
    #[cfg(feature = "zeroize")]
    key.zeroize();

    (subkey, suffix)
}

/// XOR `buf` with the keystream that starts at block `input`, advancing the
/// counter past every block used.
#[cfg_attr(not(feature = "zeroize"), allow(unused_mut))]
fn apply_keystream(buf: &mut [u8], input: &mut U128, key: &U256) {
    for chunk in buf.chunks_mut(BLOCK_BYTES) {
        let mut block = core_salsa20_aligned(input, key, &SALSA20_SIGMA).to_bytes();
        for (b, k) in chunk.iter_mut().zip(block.iter()) {
            *b ^= k;
        }
        increment_counter(input);
        #[cfg(feature = "zeroize")]
        block.zeroize();
    }
}

fn check_lengths(out: &[u8], msg: &[u8]) -> Result<(), Error> {
    if out.len() != msg.len() {
        return Err(Error(InternalError::LengthMismatch {
            input: msg.len(),
            output: out.len(),
        }));
    }
    Ok(())
}

fn salsa20_with_key(out: &mut [u8], nonce: &[u8; SALSA20_NONCE_BYTES], key: &U256) {
    let mut input = initial_input(nonce);
    out.fill(0);
    apply_keystream(out, &mut input, key);
}

/// Fill `out` with Salsa20 keystream for `nonce` and `key`.
#[cfg_attr(not(feature = "zeroize"), allow(unused_mut))]
pub fn salsa20(out: &mut [u8], nonce: &[u8; SALSA20_NONCE_BYTES], key: &[u8; KEY_BYTES]) {
    let mut key = U256::from_bytes(key);
    salsa20_with_key(out, nonce, &key);
    #[cfg(feature = "zeroize")]
    key.zeroize();
}

/// Encrypt (or decrypt) `msg` into `out` with Salsa20.
///
/// # Errors
///
/// `out` and `msg` must have the same length.
#[cfg_attr(not(feature = "zeroize"), allow(unused_mut))]
pub fn salsa20_xor(
    out: &mut [u8],
    msg: &[u8],
    nonce: &[u8; SALSA20_NONCE_BYTES],
    key: &[u8; KEY_BYTES],
) -> Result<(), Error> {
    check_lengths(out, msg)?;
    out.copy_from_slice(msg);
    let mut key = U256::from_bytes(key);
    let mut input = initial_input(nonce);
    apply_keystream(out, &mut input, &key);
    #[cfg(feature = "zeroize")]
    key.zeroize();
    Ok(())
}

/// Fill `out` with XSalsa20 keystream for `nonce` and `key`.
#[cfg_attr(not(feature = "zeroize"), allow(unused_mut))]
pub fn xsalsa20(out: &mut [u8], nonce: &[u8; XSALSA20_NONCE_BYTES], key: &[u8; KEY_BYTES]) {
    let (mut subkey, inner_nonce) = xsalsa20_setup(nonce, key);
    salsa20_with_key(out, &inner_nonce, &subkey);
    #[cfg(feature = "zeroize")]
    subkey.zeroize();
}

/// Encrypt (or decrypt) `msg` into `out` with XSalsa20.
///
/// # Errors
///
/// `out` and `msg` must have the same length.
#[cfg_attr(not(feature = "zeroize"), allow(unused_mut))]
pub fn xsalsa20_xor(
    out: &mut [u8],
    msg: &[u8],
    nonce: &[u8; XSALSA20_NONCE_BYTES],
    key: &[u8; KEY_BYTES],
) -> Result<(), Error> {
    check_lengths(out, msg)?;
    out.copy_from_slice(msg);
    let (mut subkey, inner_nonce) = xsalsa20_setup(nonce, key);
    let mut input = initial_input(&inner_nonce);
    apply_keystream(out, &mut input, &subkey);
    #[cfg(feature = "zeroize")]
    subkey.zeroize();
    Ok(())
}

/// A Salsa20 (or XSalsa20) session that encrypts a message in fragments.
///
/// Feeding fragments `m1, m2, ...` through [`xor`](Salsa20Chunked::xor)
/// yields exactly the bytes [`salsa20_xor`] would give for
/// `m1 || m2 || ...`.  The unused tail of the last keystream block is kept
/// between calls and consumed before a new block is generated.
///
/// A session is bound to one (key, nonce) pair.  It is wiped on drop when
/// the `zeroize` feature is enabled.
pub struct Salsa20Chunked {
    /// Nonce and the counter of the next block to generate.
    input: U128,
    key: U256,
    /// The most recently generated keystream block.
    block: U512,
    /// Number of unused bytes at the end of `block`.
    bytes_left: usize,
}

impl Salsa20Chunked {
    /// Start a Salsa20 session.
    pub fn new(nonce: &[u8; SALSA20_NONCE_BYTES], key: &[u8; KEY_BYTES]) -> Salsa20Chunked {
        trace!("starting chunked salsa20 session");
        Salsa20Chunked {
            input: initial_input(nonce),
            key: U256::from_bytes(key),
            block: U512::ZERO,
            bytes_left: 0,
        }
    }

    /// Start an XSalsa20 session.
    pub fn new_xsalsa20(
        nonce: &[u8; XSALSA20_NONCE_BYTES],
        key: &[u8; KEY_BYTES],
    ) -> Salsa20Chunked {
        trace!("starting chunked xsalsa20 session");
        let (key, inner_nonce) = xsalsa20_setup(nonce, key);
        Salsa20Chunked {
            input: initial_input(&inner_nonce),
            key,
            block: U512::ZERO,
            bytes_left: 0,
        }
    }

    /// Encrypt (or decrypt) the next fragment `msg` into `out`.
    ///
    /// # Errors
    ///
    /// `out` and `msg` must have the same length.  On error the session is
    /// left untouched.
    pub fn xor(&mut self, out: &mut [u8], msg: &[u8]) -> Result<(), Error> {
        check_lengths(out, msg)?;
        out.copy_from_slice(msg);
        self.apply_keystream(out);
        Ok(())
    }

    /// Encrypt (or decrypt) the next fragment in place.
    pub fn apply_keystream(&mut self, buf: &mut [u8]) {
        let carried = cmp::min(self.bytes_left, buf.len());
        let (head, rest) = buf.split_at_mut(carried);
        if carried > 0 {
            trace!("using {} buffered keystream bytes", carried);
        }
        let offset = BLOCK_BYTES - self.bytes_left;
        for (i, b) in head.iter_mut().enumerate() {
            *b ^= self.block.byte(offset + i);
        }
        self.bytes_left -= carried;

        for chunk in rest.chunks_mut(BLOCK_BYTES) {
            self.block = core_salsa20_aligned(&self.input, &self.key, &SALSA20_SIGMA);
            increment_counter(&mut self.input);
            for (i, b) in chunk.iter_mut().enumerate() {
                *b ^= self.block.byte(i);
            }
            self.bytes_left = BLOCK_BYTES - chunk.len();
        }
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for Salsa20Chunked {
    fn zeroize(&mut self) {
        self.input.zeroize();
        self.key.zeroize();
        self.block.zeroize();
        self.bytes_left.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl Drop for Salsa20Chunked {
    fn drop(&mut self) {
        self.zeroize();
    }
}
