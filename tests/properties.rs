//! Property tests: round-trip, tamper detection.

mod common;

use cert_envelope::{decrypt, encrypt, DecryptError, Envelope, EnvelopeCipher, TAG_BYTES};
use common::ALICE;
use proptest::prelude::*;

proptest! {
    // RSA work dominates each case; keep the count modest.
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn roundtrip_any_plaintext(plaintext in proptest::collection::vec(any::<u8>(), 0..2048)) {
        let envelope = encrypt(&plaintext, &ALICE.cert).unwrap();
        let pt = decrypt(&envelope, &ALICE.key, &ALICE.cert).unwrap();
        prop_assert_eq!(pt, plaintext);
    }

    #[test]
    fn two_encryptions_differ(plaintext in proptest::collection::vec(any::<u8>(), 0..256)) {
        let a = encrypt(&plaintext, &ALICE.cert).unwrap();
        let b = encrypt(&plaintext, &ALICE.cert).unwrap();
        prop_assert_ne!(a.wrapped_key(), b.wrapped_key());
        prop_assert_ne!(a.nonce(), b.nonce());
    }

    #[test]
    fn any_bit_flip_in_payload_or_tag_is_detected(
        plaintext in proptest::collection::vec(any::<u8>(), 1..512),
        pick in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let bytes = encrypt(&plaintext, &ALICE.cert).unwrap().to_bytes();

        // Only the ciphertext and tag regions: the trailing len + 16 bytes
        let region = plaintext.len() + TAG_BYTES;
        let offset = bytes.len() - region + pick.index(region);

        let mut tampered = bytes.clone();
        tampered[offset] ^= 1 << bit;

        let envelope = Envelope::from_bytes(&tampered).unwrap();
        prop_assert_eq!(
            EnvelopeCipher::new().decrypt(&envelope, &ALICE.key, &ALICE.cert),
            Err(DecryptError::Authentication)
        );
    }
}
