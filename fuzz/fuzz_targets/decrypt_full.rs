#![no_main]

use cert_envelope::rsa::{RsaPrivateKey, RsaPublicKey};
use cert_envelope::{Certificate, EnvelopeCipher, PrivateKey};
use libfuzzer_sys::fuzz_target;
use once_cell::sync::Lazy;
use rand_core::OsRng;

static KEYPAIR: Lazy<(Certificate, PrivateKey)> = Lazy::new(|| {
    let sk = RsaPrivateKey::new(&mut OsRng, 2048).expect("RSA keygen");
    let cert = Certificate::new("fuzz", RsaPublicKey::from(&sk));
    (cert, PrivateKey::new(sk))
});

fuzz_target!(|data: &[u8]| {
    let (cert, key) = &*KEYPAIR;
    let _ = EnvelopeCipher::new().decrypt_bytes(data, key, cert);
});
