// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to microsalt, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

//! Errors which may occur when handing buffers to microsalt.
//!
//! The arithmetic and the ciphers themselves cannot fail.  Every error
//! here reports a caller bug: a buffer of the wrong length, or a modulus
//! Montgomery reduction cannot work with.

// rustc seems to think the typenames in match statements (e.g. in
// Display) should be snake cased, for some reason.
#![allow(non_snake_case)]

use core::fmt;
use core::fmt::Display;

/// Internal errors.  Most application-level developers will likely not
/// need to pay any attention to these.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) enum InternalError {
    /// An error in the length of bytes handed to a constructor.
    ///
    /// To use this, pass a string specifying the `name` of the type which is
    /// returning the error, and the `length` in bytes which its constructor
    /// expects.
    BytesLengthError { name: &'static str, length: usize },
    /// An XOR routine was given an output buffer whose length differs from
    /// its input.
    LengthMismatch { input: usize, output: usize },
    /// Montgomery constants were requested for an even modulus.
    EvenModulus,
}

impl Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            InternalError::BytesLengthError { name: n, length: l } => {
                write!(f, "{} must be {} bytes in length", n, l)
            }
            InternalError::LengthMismatch { input, output } => write!(
                f,
                "output buffer is {} bytes but the message is {} bytes",
                output, input
            ),
            InternalError::EvenModulus => {
                write!(f, "Montgomery reduction requires an odd modulus")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InternalError {}

/// Errors which may occur when calling into microsalt with malformed
/// buffers.
///
/// This error may arise due to:
///
/// * Being given bytes with a length different to what was expected.
///
/// * Passing an output buffer whose length differs from the message to a
///   stream cipher.
///
/// * Asking for Montgomery constants of an even modulus.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct Error(pub(crate) InternalError);

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Error {
        Error(err)
    }
}
