//! Validate the streaming engine against the `sha2` crate.
//!
//! Both implementations hash the same bytes independently; any difference
//! means our padding or compression is wrong.

use proptest::prelude::*;
use rpsha_hash::{sha256, sha256_hex, Sha256, DIGEST_HEX_LEN};
use sha2::Digest;

fn reference(data: &[u8]) -> [u8; 32] {
    sha2::Sha256::digest(data).into()
}

#[test]
fn test_every_length_up_to_three_blocks() {
    let data: Vec<u8> = (0..=192u32).map(|i| (i * 7 + 3) as u8).collect();
    for len in 0..=data.len() {
        assert_eq!(
            sha256(&data[..len]),
            reference(&data[..len]),
            "mismatch for input len {}",
            len
        );
    }
}

#[test]
fn test_utf8_strings_hash_as_bytes() {
    let text = "sha-256 über alles ✓";
    let mut hasher = Sha256::new();
    hasher.update_str(text);
    assert_eq!(hasher.digest(), reference(text.as_bytes()));
}

#[test]
fn test_byte_at_a_time() {
    let data = b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";
    let mut hasher = Sha256::new();
    for byte in data.iter() {
        hasher.update(std::slice::from_ref(byte));
    }
    assert_eq!(
        hasher.digest_hex(),
        "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1"
    );
}

proptest! {
    #[test]
    fn prop_matches_reference(data in proptest::collection::vec(any::<u8>(), 0..600)) {
        prop_assert_eq!(sha256(&data), reference(&data));
    }

    #[test]
    fn prop_two_part_split_is_invisible(
        a in proptest::collection::vec(any::<u8>(), 0..200),
        b in proptest::collection::vec(any::<u8>(), 0..200),
    ) {
        let mut hasher = Sha256::new();
        hasher.update(&a);
        hasher.update(&b);

        let joined = [a.as_slice(), b.as_slice()].concat();
        prop_assert_eq!(hasher.digest(), sha256(&joined));
    }

    #[test]
    fn prop_digest_does_not_disturb_stream(
        a in proptest::collection::vec(any::<u8>(), 0..200),
        b in proptest::collection::vec(any::<u8>(), 0..200),
    ) {
        let mut hasher = Sha256::new();
        hasher.update(&a);
        let first = hasher.digest();
        prop_assert_eq!(first, hasher.digest());

        hasher.update(&b);
        let joined = [a.as_slice(), b.as_slice()].concat();
        prop_assert_eq!(hasher.digest(), reference(&joined));
    }

    #[test]
    fn prop_hex_is_fixed_width_lowercase(data in proptest::collection::vec(any::<u8>(), 0..300)) {
        let hex = sha256_hex(&data);
        prop_assert_eq!(hex.len(), DIGEST_HEX_LEN);
        prop_assert!(hex.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
    }
}
