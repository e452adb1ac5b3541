#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate microsalt;

use microsalt::stream::{xsalsa20_xor, Salsa20Chunked};

/// Check that feeding a message through a chunked session, split at
/// fuzzer-chosen points, gives the one-shot ciphertext.
///
/// Input layout: 32-byte key, 24-byte nonce, one byte giving the number
/// of split points, that many split bytes, then the message.
fuzz_target!(|data: &[u8]| {
    if data.len() < 57 {
        return;
    }
    let mut key = [0u8; 32];
    let mut nonce = [0u8; 24];
    key.copy_from_slice(&data[0..32]);
    nonce.copy_from_slice(&data[32..56]);

    let splits = data[56] as usize;
    if data.len() < 57 + splits {
        return;
    }
    let split_sizes = &data[57..57 + splits];
    let msg = &data[57 + splits..];

    let mut expected = vec![0u8; msg.len()];
    xsalsa20_xor(&mut expected, msg, &nonce, &key).unwrap();

    let mut chunked = Salsa20Chunked::new_xsalsa20(&nonce, &key);
    let mut actual = vec![0u8; msg.len()];
    let mut start = 0;
    for size in split_sizes {
        let end = (start + *size as usize).min(msg.len());
        chunked.xor(&mut actual[start..end], &msg[start..end]).unwrap();
        start = end;
    }
    chunked.xor(&mut actual[start..], &msg[start..]).unwrap();

    assert_eq!(actual, expected);
});
