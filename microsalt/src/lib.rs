// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to microsalt, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

//! # microsalt
//!
//! Curve25519 Diffie-Hellman (X25519) and the Salsa20 / XSalsa20 stream
//! ciphers, written for microcontrollers: no heap, no tables indexed by
//! secret data, and a fixed instruction trace for every secret input.
//!
//! ```
//! use microsalt::{scalarmult, scalarmult_base};
//!
//! let alice = [0x11u8; 32];
//! let bob = [0x22u8; 32];
//!
//! let alice_public = scalarmult_base(&alice);
//! let bob_public = scalarmult_base(&bob);
//!
//! assert_eq!(scalarmult(&alice, &bob_public), scalarmult(&bob, &alice_public));
//! ```
//!
//! ```
//! use microsalt::stream::{xsalsa20_xor, Salsa20Chunked};
//!
//! let key = [7u8; 32];
//! let nonce = [9u8; 24];
//! let message = *b"attack at dawn, bring snacks";
//!
//! let mut ciphertext = [0u8; 28];
//! xsalsa20_xor(&mut ciphertext, &message, &nonce, &key).unwrap();
//!
//! // The same ciphertext, produced a few bytes at a time.
//! let mut chunked = Salsa20Chunked::new_xsalsa20(&nonce, &key);
//! let mut pieces = [0u8; 28];
//! chunked.xor(&mut pieces[..5], &message[..5]).unwrap();
//! chunked.xor(&mut pieces[5..], &message[5..]).unwrap();
//! assert_eq!(ciphertext, pieces);
//! ```

//------------------------------------------------------------------------
// External dependencies:
//------------------------------------------------------------------------

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

// Internal macros. Must come first!
#[macro_use]
pub(crate) mod macros;

//------------------------------------------------------------------------
// microsalt public modules
//------------------------------------------------------------------------

// 128-, 256- and 512-bit little-endian values with byte and word views
pub mod bigint;

// Finite field arithmetic mod p = 2^255 - 19
pub mod field;

// Arithmetic backends live here
pub mod backend;

// Useful constants, like the X25519 basepoint and the Salsa20 sigma
pub mod constants;

// X25519 over the Montgomery form of Curve25519
pub mod montgomery;

// Generic 256-bit Montgomery reduction (REDC)
#[cfg(feature = "montgomery_reduction")]
pub mod montgomery_reduction;

// The Salsa20 permutation, core hash and HSalsa20
pub mod salsa20;

// Salsa20 / XSalsa20 keystreams, one-shot and chunked
pub mod stream;

//------------------------------------------------------------------------
// microsalt internal modules
//------------------------------------------------------------------------

mod errors;

pub use crate::errors::Error;
pub use crate::montgomery::{clamp_integer, scalarmult, scalarmult_base, MontgomeryPoint};
