use hex_literal::hex;

use rand::rngs::StdRng;
use rand::SeedableRng;

use x25519_microsalt::*;

const ALICE_SECRET: [u8; 32] =
    hex!("77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a");
const ALICE_PUBLIC: [u8; 32] =
    hex!("8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a");
const BOB_SECRET: [u8; 32] =
    hex!("5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb");
const BOB_PUBLIC: [u8; 32] =
    hex!("de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f");
const SHARED: [u8; 32] = hex!("4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742");

#[test]
fn byte_basepoint_matches_typed_public_key() {
    let secret = EphemeralSecret::random_from_rng(&mut StdRng::seed_from_u64(1));
    let expected = PublicKey::from(&secret);

    let mut rng = StdRng::seed_from_u64(1);
    let mut bytes = [0u8; 32];
    rand::RngCore::fill_bytes(&mut rng, &mut bytes);
    assert_eq!(x25519(bytes, X25519_BASEPOINT_BYTES), expected.to_bytes());
}

#[test]
#[cfg(feature = "static_secrets")]
fn rfc7748_static_secrets() {
    let alice = StaticSecret::from_bytes(ALICE_SECRET);
    let bob = StaticSecret::from_bytes(BOB_SECRET);

    assert_eq!(PublicKey::from(&alice).to_bytes(), ALICE_PUBLIC);
    assert_eq!(PublicKey::from(&bob).to_bytes(), BOB_PUBLIC);

    let alice_shared = alice.diffie_hellman(&PublicKey::from_bytes(BOB_PUBLIC));
    let bob_shared = bob.diffie_hellman(&PublicKey::from_bytes(ALICE_PUBLIC));
    assert_eq!(alice_shared.to_bytes(), SHARED);
    assert_eq!(bob_shared.to_bytes(), SHARED);
    assert!(alice_shared.was_contributory());

    // A static secret can be used again.
    assert_eq!(
        alice.diffie_hellman(&PublicKey::from_bytes(BOB_PUBLIC)).as_bytes(),
        &SHARED
    );
}

#[test]
fn rfc7748_bare_function() {
    assert_eq!(x25519(ALICE_SECRET, X25519_BASEPOINT_BYTES), ALICE_PUBLIC);
    assert_eq!(x25519(ALICE_SECRET, BOB_PUBLIC), SHARED);
    assert_eq!(x25519(BOB_SECRET, ALICE_PUBLIC), SHARED);
}

/// RFC 7748 section 5.2, first vector.
#[test]
fn rfc7748_scalar_mult_vector() {
    let scalar = hex!("a546e36bf0527c9d3b16154b82465edd62144c0ac1fc5a18506a2244ba449ac4");
    let input = hex!("e6db6867583030db3594c1a424b15f7c726624ec26b3353b10a903a6d0ab1c4c");
    let expected = hex!("c3da55379de9c6908e94ea4df28d084f32eccf03491c71f754b4075577a28552");
    assert_eq!(x25519(scalar, input), expected);
}

#[test]
fn ephemeral_agreement() {
    let mut rng = StdRng::seed_from_u64(0xec0);
    for _ in 0..16 {
        let alice = EphemeralSecret::random_from_rng(&mut rng);
        let bob = EphemeralSecret::random_from_rng(&mut rng);
        let alice_public = PublicKey::from(&alice);
        let bob_public = PublicKey::from(&bob);

        let alice_shared = alice.diffie_hellman(&bob_public);
        let bob_shared = bob.diffie_hellman(&alice_public);
        assert_eq!(alice_shared.as_bytes(), bob_shared.as_bytes());
        assert!(alice_shared.was_contributory());
    }
}

#[test]
#[cfg(feature = "static_secrets")]
fn static_secret_round_trips_through_bytes() {
    let secret = StaticSecret::random_from_rng(&mut StdRng::seed_from_u64(9));
    let restored = StaticSecret::from_bytes(secret.to_bytes());
    assert_eq!(secret.as_bytes(), restored.as_bytes());
    assert_eq!(PublicKey::from(&secret), PublicKey::from(&restored));
}

#[test]
fn public_key_slice_length_is_checked() {
    assert!(PublicKey::try_from(&ALICE_PUBLIC[..]).is_ok());
    assert!(PublicKey::try_from(&ALICE_PUBLIC[..16]).is_err());
}

#[test]
#[cfg(all(feature = "os_rng", feature = "static_secrets"))]
fn os_rng_secrets_agree() {
    let alice = EphemeralSecret::random();
    let bob = StaticSecret::random();
    let alice_public = PublicKey::from(&alice);
    let bob_public = PublicKey::from(&bob);
    assert_eq!(
        alice.diffie_hellman(&bob_public).to_bytes(),
        bob.diffie_hellman(&alice_public).to_bytes()
    );
}

#[test]
#[cfg(feature = "static_secrets")]
fn provisioned_device_agrees_with_ephemeral_gateway() {
    // The device key is fixed at provisioning; its public half is known
    // to the gateway in advance.
    let device = StaticSecret::from_bytes(BOB_SECRET);
    let device_public = PublicKey::from_bytes(BOB_PUBLIC);
    assert_eq!(device.public_key(), device_public);

    let mut rng = StdRng::seed_from_u64(0x5e55);
    for _ in 0..4 {
        let gateway = EphemeralSecret::random_from_rng(&mut rng);
        let gateway_public = gateway.public_key();

        let on_gateway = gateway.diffie_hellman(&device_public).contributory().unwrap();
        let on_device = device.diffie_hellman(&gateway_public).contributory().unwrap();
        assert_eq!(on_gateway.as_bytes(), on_device.as_bytes());
    }
}

#[test]
#[cfg(feature = "static_secrets")]
fn device_refuses_low_order_peer() {
    let device = StaticSecret::from_bytes(ALICE_SECRET);
    // u = 1 has order 4, so the clamped scalar sends it to zero.
    let mut one = [0u8; 32];
    one[0] = 1;
    for low_order in [[0u8; 32], one] {
        let shared = device.diffie_hellman(&PublicKey::from_bytes(low_order));
        assert!(shared.contributory().is_none());
    }
}
