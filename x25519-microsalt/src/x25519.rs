// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to x25519-microsalt, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

//! Typed X25519 key agreement for devices.
//!
//! `microsalt` never draws randomness.  This module is where a random
//! source enters: secrets are filled from any caller-supplied
//! [`CryptoRng`], which on a board is usually a wrapper around the
//! hardware RNG peripheral.
//!
//! Two kinds of secret are offered.  An [`EphemeralSecret`] is drawn for
//! one session and consumed by the agreement.  A [`StaticSecret`] is the
//! long-term key a device is provisioned with at manufacture; it is
//! loaded from bytes and can be used for any number of agreements.
//!
//! Scalars are stored exactly as drawn or provisioned.  Clamping happens
//! inside the ladder at every use, so a stored key round-trips unchanged.

use microsalt::{scalarmult, scalarmult_base, MontgomeryPoint};

use rand_core::CryptoRng;
#[cfg(feature = "os_rng")]
use rand_core::TryRngCore;

#[cfg(feature = "zeroize")]
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The 32 scalar bytes behind both secret kinds.
#[derive(Clone)]
#[cfg_attr(feature = "zeroize", derive(Zeroize, ZeroizeOnDrop))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
struct SecretScalar([u8; 32]);

impl SecretScalar {
    /// Fill a fresh scalar from `rng`, taking exactly 32 bytes.
    fn from_rng<R: CryptoRng + ?Sized>(rng: &mut R) -> SecretScalar {
        let mut scalar = SecretScalar([0u8; 32]);
        rng.fill_bytes(&mut scalar.0);
        scalar
    }

    #[cfg(feature = "os_rng")]
    fn from_os_rng() -> SecretScalar {
        SecretScalar::from_rng(&mut rand_core::OsRng.unwrap_err())
    }

    fn public_key(&self) -> PublicKey {
        PublicKey(MontgomeryPoint(scalarmult_base(&self.0)))
    }

    fn agree(&self, their_public: &PublicKey) -> SharedSecret {
        SharedSecret(MontgomeryPoint(scalarmult(&self.0, their_public.as_bytes())))
    }
}

/// A peer's public key: the \\(u\\)-coordinate of scalar · basepoint.
///
/// Any 32 bytes are accepted.  Equality is decided mod \\(p\\), so a
/// non-canonical encoding compares equal to its reduced form.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PublicKey(MontgomeryPoint);

impl PublicKey {
    /// Wrap a public key received over the wire.
    pub const fn from_bytes(bytes: [u8; 32]) -> PublicKey {
        PublicKey(MontgomeryPoint(bytes))
    }

    /// The bytes to put on the wire.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// Borrow the wire bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = microsalt::Error;

    /// Read a public key out of a received frame.  The slice must be
    /// exactly 32 bytes long.
    fn try_from(bytes: &[u8]) -> Result<PublicKey, microsalt::Error> {
        MontgomeryPoint::try_from(bytes).map(PublicKey)
    }
}

/// A one-session secret.
///
/// [`diffie_hellman`](EphemeralSecret::diffie_hellman) takes `self` by
/// value and there is no way to read the bytes back out, so each
/// ephemeral secret yields exactly one [`SharedSecret`].
pub struct EphemeralSecret(SecretScalar);

impl EphemeralSecret {
    /// Draw a new secret from `rng`.
    pub fn random_from_rng<R: CryptoRng + ?Sized>(rng: &mut R) -> EphemeralSecret {
        EphemeralSecret(SecretScalar::from_rng(rng))
    }

    /// Draw a new secret from the operating system's RNG.
    #[cfg(feature = "os_rng")]
    pub fn random() -> EphemeralSecret {
        EphemeralSecret(SecretScalar::from_os_rng())
    }

    /// The public key to send to the peer.
    pub fn public_key(&self) -> PublicKey {
        self.0.public_key()
    }

    /// Agree on a shared secret with `their_public`, using up this secret.
    pub fn diffie_hellman(self, their_public: &PublicKey) -> SharedSecret {
        self.0.agree(their_public)
    }
}

impl From<&EphemeralSecret> for PublicKey {
    fn from(secret: &EphemeralSecret) -> PublicKey {
        secret.public_key()
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for EphemeralSecret {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

// The inner scalar wipes itself when dropped.
#[cfg(feature = "zeroize")]
impl ZeroizeOnDrop for EphemeralSecret {}

/// A long-term secret, such as a key provisioned into device flash.
///
/// It can be stored with [`to_bytes`](StaticSecret::to_bytes), restored
/// with [`from_bytes`](StaticSecret::from_bytes), and used for any number
/// of agreements.  Use an [`EphemeralSecret`] for anything that does not
/// need to outlive a session.
#[cfg(feature = "static_secrets")]
#[derive(Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct StaticSecret(SecretScalar);

#[cfg(feature = "static_secrets")]
impl StaticSecret {
    /// Load a provisioned key.  The bytes are kept unclamped.
    pub fn from_bytes(bytes: [u8; 32]) -> StaticSecret {
        StaticSecret(SecretScalar(bytes))
    }

    /// Generate a key to provision, drawing 32 bytes from `rng`.
    pub fn random_from_rng<R: CryptoRng + ?Sized>(rng: &mut R) -> StaticSecret {
        StaticSecret(SecretScalar::from_rng(rng))
    }

    /// Generate a key from the operating system's RNG.
    #[cfg(feature = "os_rng")]
    pub fn random() -> StaticSecret {
        StaticSecret(SecretScalar::from_os_rng())
    }

    /// The device's public key, for publishing at provisioning time.
    pub fn public_key(&self) -> PublicKey {
        self.0.public_key()
    }

    /// Agree on a shared secret with `their_public`.  The key stays
    /// usable afterwards.
    pub fn diffie_hellman(&self, their_public: &PublicKey) -> SharedSecret {
        self.0.agree(their_public)
    }

    /// Copy the key out for storage.  The caller owns wiping the copy.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0 .0
    }

    /// Borrow the key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0 .0
    }
}

#[cfg(feature = "static_secrets")]
impl From<&StaticSecret> for PublicKey {
    fn from(secret: &StaticSecret) -> PublicKey {
        secret.public_key()
    }
}

#[cfg(all(feature = "static_secrets", feature = "zeroize"))]
impl Zeroize for StaticSecret {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(all(feature = "static_secrets", feature = "zeroize"))]
impl ZeroizeOnDrop for StaticSecret {}

/// The raw output of an agreement.
///
/// This is a curve coordinate, not a uniformly random key.  Pass it
/// through a key derivation step (NaCl uses HSalsa20 with a zero input)
/// before keying a cipher with it.
#[cfg_attr(feature = "zeroize", derive(Zeroize, ZeroizeOnDrop))]
pub struct SharedSecret(MontgomeryPoint);

impl SharedSecret {
    /// Copy the secret out.  The caller owns wiping the copy.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// Borrow the secret bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Check, in constant time, that the peer's key contributed to the
    /// result.
    ///
    /// A public key of small order (zero, or its alias \\(p\\), among
    /// others) forces the result to zero whatever our secret is.  Session
    /// protocols where both sides must contribute should refuse such a
    /// result; see
    /// [RFC 7748, section 6.1](https://tools.ietf.org/html/rfc7748#section-6.1).
    #[must_use]
    pub fn was_contributory(&self) -> bool {
        !self.0.is_identity()
    }

    /// Keep the secret only if it was contributory.
    ///
    /// The check itself runs in constant time; only the outcome, which a
    /// peer who sent the bad key already knows, decides the branch.
    pub fn contributory(self) -> Option<SharedSecret> {
        if self.was_contributory() {
            Some(self)
        } else {
            None
        }
    }
}

/// X25519 on raw bytes: clamp `k`, mask the top bit of `u`, and return
/// the \\(u\\)-coordinate of \\([k]u\\).
///
/// Pass [`X25519_BASEPOINT_BYTES`] as `u` to derive a public key.
///
/// # Example
#[cfg_attr(feature = "static_secrets", doc = "```")]
#[cfg_attr(not(feature = "static_secrets"), doc = "```ignore")]
/// use x25519_microsalt::{x25519, PublicKey, StaticSecret, X25519_BASEPOINT_BYTES};
///
/// // A device key written to flash during provisioning.
/// let provisioned = [0x3au8; 32];
/// let device = StaticSecret::from_bytes(provisioned);
///
/// assert_eq!(
///     x25519(provisioned, X25519_BASEPOINT_BYTES),
///     device.public_key().to_bytes()
/// );
///
/// let gateway = PublicKey::from_bytes(x25519([0xc5u8; 32], X25519_BASEPOINT_BYTES));
/// assert_eq!(
///     x25519(provisioned, gateway.to_bytes()),
///     device.diffie_hellman(&gateway).to_bytes()
/// );
/// ```
pub fn x25519(k: [u8; 32], u: [u8; 32]) -> [u8; 32] {
    scalarmult(&k, &u)
}

/// The encoding of \\(u = 9\\).
pub const X25519_BASEPOINT_BYTES: [u8; 32] = microsalt::constants::X25519_BASEPOINT.to_bytes();

#[cfg(test)]
mod test {
    use super::*;

    use rand_core::RngCore;

    /// Hands out 0, 1, 2, ... so tests can see which bytes were drawn.
    struct CountingRng(u8);

    impl RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            let mut bytes = [0u8; 4];
            self.fill_bytes(&mut bytes);
            u32::from_le_bytes(bytes)
        }

        fn next_u64(&mut self) -> u64 {
            let mut bytes = [0u8; 8];
            self.fill_bytes(&mut bytes);
            u64::from_le_bytes(bytes)
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            for b in dst {
                *b = self.0;
                self.0 = self.0.wrapping_add(1);
            }
        }
    }

    impl CryptoRng for CountingRng {}

    fn counting_bytes(start: u8) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = start.wrapping_add(i as u8);
        }
        bytes
    }

    #[test]
    fn secrets_take_exactly_32_bytes_from_rng() {
        let mut rng = CountingRng(0);

        let ephemeral = EphemeralSecret::random_from_rng(&mut rng);
        assert_eq!(ephemeral.0 .0, counting_bytes(0));
        assert_eq!(rng.0, 32);

        let unsized_rng: &mut dyn CryptoRng = &mut rng;
        let next = EphemeralSecret::random_from_rng(unsized_rng);
        assert_eq!(next.0 .0, counting_bytes(32));
    }

    #[test]
    fn drawn_bytes_are_stored_unclamped() {
        let mut rng = CountingRng(0xf0);
        let secret = EphemeralSecret::random_from_rng(&mut rng);
        // Clamping would turn the last byte into 0x4f.
        assert_eq!(secret.0 .0[31], 0x0f);
        assert_eq!(
            secret.public_key().to_bytes(),
            x25519(counting_bytes(0xf0), X25519_BASEPOINT_BYTES)
        );
    }

    #[cfg(feature = "static_secrets")]
    #[test]
    fn provisioned_key_is_reusable() {
        let device = StaticSecret::from_bytes(counting_bytes(7));
        let mut rng = CountingRng(100);
        for _ in 0..3 {
            let peer = EphemeralSecret::random_from_rng(&mut rng);
            let peer_public = peer.public_key();
            let device_shared = device.diffie_hellman(&peer_public);
            let peer_shared = peer.diffie_hellman(&device.public_key());
            assert_eq!(device_shared.as_bytes(), peer_shared.as_bytes());
        }
        assert_eq!(device.to_bytes(), counting_bytes(7));
    }

    #[test]
    fn public_key_from_slice() {
        let frame = [7u8; 40];
        let key = PublicKey::try_from(&frame[..32]).unwrap();
        assert_eq!(key, PublicKey::from_bytes([7u8; 32]));
        assert!(PublicKey::try_from(&frame[..31]).is_err());
        assert!(PublicKey::try_from(&frame[..33]).is_err());
    }

    #[test]
    fn basepoint_bytes() {
        let mut expected = [0u8; 32];
        expected[0] = 9;
        assert_eq!(X25519_BASEPOINT_BYTES, expected);
    }

    #[test]
    fn small_order_keys_are_refused() {
        // u = p is a non-canonical encoding of 0.
        let mut p = [0xffu8; 32];
        p[0] = 0xed;
        p[31] = 0x7f;
        assert_eq!(PublicKey::from_bytes(p), PublicKey::from_bytes([0u8; 32]));

        for bad in [[0u8; 32], p] {
            let secret = EphemeralSecret::random_from_rng(&mut CountingRng(0x42));
            let shared = secret.diffie_hellman(&PublicKey::from_bytes(bad));
            assert!(!shared.was_contributory());
            assert_eq!(shared.to_bytes(), [0u8; 32]);
            assert!(shared.contributory().is_none());
        }
    }

    #[test]
    fn contributory_keeps_good_secret() {
        let alice = EphemeralSecret::random_from_rng(&mut CountingRng(1));
        let bob = EphemeralSecret::random_from_rng(&mut CountingRng(2));
        let bob_public = bob.public_key();
        let expected = bob.diffie_hellman(&alice.public_key()).to_bytes();

        let shared = alice.diffie_hellman(&bob_public).contributory();
        assert_eq!(shared.map(|s| s.to_bytes()), Some(expected));
    }

    #[cfg(all(feature = "zeroize", feature = "static_secrets"))]
    #[test]
    fn zeroize_clears_secrets() {
        let mut device = StaticSecret::from_bytes([0x55u8; 32]);
        device.zeroize();
        assert_eq!(device.to_bytes(), [0u8; 32]);

        let mut shared = device.diffie_hellman(&PublicKey::from_bytes(X25519_BASEPOINT_BYTES));
        shared.zeroize();
        assert_eq!(shared.to_bytes(), [0u8; 32]);
    }
}
