// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to microsalt, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

//! Arithmetic backends.
//!
//! Only a serial backend exists: microsalt targets 32-bit cores that can
//! multiply two 32-bit operands into a 64-bit product, so the field engine
//! uses 32-bit limbs with 64-bit accumulators everywhere.  The generic
//! [`field`](crate::field) layer is written against
//! `backend::serial::u32::field::FieldElement2625` through a type alias.

pub mod serial;
