//! Shared key-pair fixtures. RSA key generation is slow, so each identity is
//! generated once per test binary.

#![allow(dead_code)]

use cert_envelope::rsa::{RsaPrivateKey, RsaPublicKey};
use cert_envelope::{Certificate, PrivateKey};
use once_cell::sync::Lazy;

pub const TEST_DATA: &[u8] = b"Test Data to Sign";

pub struct Identity {
    pub cert: Certificate,
    pub key: PrivateKey,
}

pub fn issue_cert(name: &str, bits: usize) -> Identity {
    let sk = RsaPrivateKey::new(&mut rand::thread_rng(), bits).expect("RSA keygen");
    let cert = Certificate::new(name, RsaPublicKey::from(&sk));
    Identity {
        cert,
        key: PrivateKey::new(sk),
    }
}

pub static ALICE: Lazy<Identity> = Lazy::new(|| issue_cert("alice", 2048));
pub static BOB: Lazy<Identity> = Lazy::new(|| issue_cert("bob", 2048));
