//! Salsa20 and XSalsa20 keystream tests against the NaCl vectors.

use hex_literal::hex;

use microsalt::salsa20::core_salsa20;
use microsalt::stream::{salsa20, salsa20_xor, xsalsa20, xsalsa20_xor, Salsa20Chunked};

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

const FIRSTKEY: [u8; 32] = hex!("1b27556473e985d462cd51197a9a46c76009549eac6474f206c4ee0844f68389");
const SECONDKEY: [u8; 32] = hex!("dc908dda0b9344a953629b733820778880f3ceb421bb61b91cbd4c3e66256ce4");
const NONCE: [u8; 24] = hex!("69696ee955b62b73cd62bda875fc73d68219e0036b7a0b37");

const MESSAGE: [u8; 131] = hex!(
    "be075fc53c81f2d5cf141316ebeb0c7b5228c52a4c62cbd44b66849b64244ffc"
    "e5ecbaaf33bd751a1ac728d45e6c61296cdc3c01233561f41db66cce314adb31"
    "0e3be8250c46f06dceea3a7fa1348057e2f6556ad6b1318a024a838f21af1fde"
    "048977eb48f59ffd4924ca1c60902e52f0a089bc76897040e082f93776384864"
    "5e0705"
);
const CIPHERTEXT: [u8; 131] = hex!(
    "8e993b9f48681273c29650ba32fc76ce48332ea7164d96a4476fb8c531a1186a"
    "c0dfc17c98dce87b4da7f011ec48c97271d2c20f9b928fe2270d6fb863d51738"
    "b48eeee314a7cc8ab932164548e526ae90224368517acfeabd6bb3732bc0e9da"
    "99832b61ca01b6de56244a9e88d5f9b37973f622a43d14a6599b1f654cb45a74"
    "e355a5"
);
const STREAM_PREFIX: [u8; 32] =
    hex!("eea6a7251c1e72916d11c2cb214d3c252539121d8e234e652d651fa4c8cff880");

#[test]
fn zero_key_zero_nonce() {
    let mut stream = [0xffu8; 64];
    salsa20(&mut stream, &[0u8; 8], &[0u8; 32]);
    assert_eq!(
        stream,
        hex!(
            "9a97f65b9b4c721b960a672145fca8d4e32e67f9111ea979ce9c4826806aeee6"
            "3de9c0da2bd7f91ebcb2639bf989c6251b29bf38d39a9bdce7c55f4b2ac12a39"
        )
    );
}

#[test]
fn xsalsa20_keystream_prefix() {
    let mut stream = [0u8; 32];
    xsalsa20(&mut stream, &NONCE, &FIRSTKEY);
    assert_eq!(stream, STREAM_PREFIX);
}

#[test]
fn xsalsa20_is_salsa20_under_the_subkey() {
    let mut inner_nonce = [0u8; 8];
    inner_nonce.copy_from_slice(&NONCE[16..]);

    let mut direct = [0u8; 200];
    salsa20(&mut direct, &inner_nonce, &SECONDKEY);
    let mut extended = [0u8; 200];
    xsalsa20(&mut extended, &NONCE, &FIRSTKEY);
    assert_eq!(direct[..], extended[..]);
}

/// The secretbox vector from NaCl: the message is XORed with the
/// keystream after its first 32 bytes.
#[test]
fn xsalsa20_secretbox_ciphertext() {
    let mut padded = [0u8; 32 + 131];
    padded[32..].copy_from_slice(&MESSAGE);
    let mut out = [0u8; 32 + 131];
    xsalsa20_xor(&mut out, &padded, &NONCE, &FIRSTKEY).unwrap();
    assert_eq!(out[..32], STREAM_PREFIX);
    assert_eq!(out[32..], CIPHERTEXT);
}

#[test]
fn stream_is_its_own_inverse() {
    let mut rng = StdRng::seed_from_u64(20);
    for len in [0usize, 1, 63, 64, 65, 300] {
        let mut key = [0u8; 32];
        let mut nonce = [0u8; 24];
        rng.fill_bytes(&mut key);
        rng.fill_bytes(&mut nonce);
        let mut msg = vec![0u8; len];
        rng.fill_bytes(&mut msg);

        let mut ct = vec![0u8; len];
        xsalsa20_xor(&mut ct, &msg, &nonce, &key).unwrap();
        let mut pt = vec![0u8; len];
        xsalsa20_xor(&mut pt, &ct, &nonce, &key).unwrap();
        assert_eq!(pt, msg);

        let short_nonce: [u8; 8] = nonce[..8].try_into().unwrap();
        salsa20_xor(&mut ct, &msg, &short_nonce, &key).unwrap();
        salsa20_xor(&mut pt, &ct, &short_nonce, &key).unwrap();
        assert_eq!(pt, msg);
    }
}

#[test]
fn keystream_blocks_follow_the_counter() {
    let nonce = [0x5au8; 8];
    let mut stream = [0u8; 3 * 64];
    salsa20(&mut stream, &nonce, &FIRSTKEY);
    for (counter, block) in stream.chunks(64).enumerate() {
        let mut input = [0u8; 16];
        input[..8].copy_from_slice(&nonce);
        input[8..].copy_from_slice(&(counter as u64).to_le_bytes());
        assert_eq!(block, core_salsa20(&input, &FIRSTKEY, b"expand 32-byte k"));
    }
}

#[test]
fn chunked_secretbox_ciphertext() {
    let mut padded = [0u8; 32 + 131];
    padded[32..].copy_from_slice(&MESSAGE);
    let mut out = [0u8; 32 + 131];

    let mut chunked = Salsa20Chunked::new_xsalsa20(&NONCE, &FIRSTKEY);
    let mut start = 0;
    for len in [1usize, 31, 7, 64, 0, 60] {
        let end = start + len;
        chunked.xor(&mut out[start..end], &padded[start..end]).unwrap();
        start = end;
    }
    assert_eq!(start, padded.len());
    assert_eq!(out[..32], STREAM_PREFIX);
    assert_eq!(out[32..], CIPHERTEXT);
}

#[test]
fn chunked_matches_one_shot_for_random_splits() {
    let mut rng = StdRng::seed_from_u64(0xc4a4c);
    for _ in 0..64 {
        let mut key = [0u8; 32];
        let mut nonce = [0u8; 8];
        rng.fill_bytes(&mut key);
        rng.fill_bytes(&mut nonce);
        let len = rng.random_range(0..600);
        let mut msg = vec![0u8; len];
        rng.fill_bytes(&mut msg);

        let mut expected = vec![0u8; len];
        salsa20_xor(&mut expected, &msg, &nonce, &key).unwrap();

        let mut chunked = Salsa20Chunked::new(&nonce, &key);
        let mut actual = vec![0u8; len];
        let mut start = 0;
        while start < len {
            let end = (start + rng.random_range(0..=130)).min(len);
            chunked.xor(&mut actual[start..end], &msg[start..end]).unwrap();
            start = end;
        }
        assert_eq!(actual, expected);
    }
}

#[test]
fn chunked_in_place_matches_one_shot() {
    let key = [0x17u8; 32];
    let nonce = [0x71u8; 24];
    let mut expected = [0u8; 250];
    xsalsa20(&mut expected, &nonce, &key);

    let mut chunked = Salsa20Chunked::new_xsalsa20(&nonce, &key);
    let mut buf = [0u8; 250];
    for piece in buf.chunks_mut(33) {
        chunked.apply_keystream(piece);
    }
    assert_eq!(buf, expected);
}

#[test]
fn mismatched_lengths_are_rejected() {
    let mut out = [0u8; 16];
    assert!(salsa20_xor(&mut out, &[0u8; 17], &[0u8; 8], &[0u8; 32]).is_err());
    assert!(xsalsa20_xor(&mut out, &[0u8; 15], &[0u8; 24], &[0u8; 32]).is_err());
}
