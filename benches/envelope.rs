//! Envelope throughput: AES-256-GCM vs ChaCha20-Poly1305 over RSA-2048 wrap.
//!
//! Run with: `cargo bench --bench envelope`
//!
//! Small payloads are dominated by the RSA operation (decrypt far more than
//! encrypt); large payloads converge on the symmetric cipher's throughput.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::OsRng;

use cert_envelope::rsa::{RsaPrivateKey, RsaPublicKey};
use cert_envelope::{Certificate, CipherAlgorithm, EnvelopeCipher, PrivateKey};

/// Payload sizes to benchmark.
const PAYLOAD_SIZES: &[usize] = &[64, 1024, 65_536, 1_048_576];

const SUITES: &[(&str, CipherAlgorithm)] = &[
    ("aes256gcm", CipherAlgorithm::Aes256Gcm),
    ("chacha20poly1305", CipherAlgorithm::ChaCha20Poly1305),
];

fn fixture() -> (Certificate, PrivateKey) {
    let sk = RsaPrivateKey::new(&mut OsRng, 2048).expect("RSA keygen");
    let cert = Certificate::new("bench", RsaPublicKey::from(&sk));
    (cert, PrivateKey::new(sk))
}

fn bench_encrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("encrypt");
    let (cert, _key) = fixture();

    for &size in PAYLOAD_SIZES {
        let plaintext = vec![0x42u8; size];
        group.throughput(Throughput::Bytes(size as u64));

        for &(name, alg) in SUITES {
            let engine = EnvelopeCipher::new().with_cipher(alg);
            group.bench_with_input(BenchmarkId::new(name, size), &plaintext, |b, pt| {
                b.iter(|| engine.encrypt(pt, &cert).unwrap());
            });
        }
    }

    group.finish();
}

fn bench_decrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrypt");
    let (cert, key) = fixture();

    for &size in PAYLOAD_SIZES {
        let plaintext = vec![0x42u8; size];
        group.throughput(Throughput::Bytes(size as u64));

        for &(name, alg) in SUITES {
            let engine = EnvelopeCipher::new().with_cipher(alg);
            let envelope = engine.encrypt(&plaintext, &cert).unwrap();
            group.bench_with_input(BenchmarkId::new(name, size), &envelope, |b, env| {
                b.iter(|| engine.decrypt(env, &key, &cert).unwrap());
            });
        }
    }

    group.finish();
}

fn bench_rejections(c: &mut Criterion) {
    let mut group = c.benchmark_group("reject");
    let (cert, key) = fixture();
    let (_, other_key) = fixture();
    let engine = EnvelopeCipher::new();

    let bytes = engine.encrypt(&[0x42u8; 1024], &cert).unwrap().to_bytes();
    let mut tampered = bytes.clone();
    let last = tampered.len() - 1;
    tampered[last] ^= 0x01;

    group.bench_function("tampered", |b| {
        b.iter(|| engine.decrypt_bytes(&tampered, &key, &cert).unwrap_err());
    });
    group.bench_function("key_mismatch", |b| {
        b.iter(|| engine.decrypt_bytes(&bytes, &other_key, &cert).unwrap_err());
    });
    group.bench_function("bad_version", |b| {
        let mut bad = bytes.clone();
        bad[0] = 0xFF;
        b.iter(|| engine.decrypt_bytes(&bad, &key, &cert).unwrap_err());
    });

    group.finish();
}

criterion_group!(benches, bench_encrypt, bench_decrypt, bench_rejections);
criterion_main!(benches);
