//! # cert-envelope
//!
//! Envelope encryption addressed to a certificate.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cert_envelope::{Certificate, EncryptedDocument, PrivateKey};
//!
//! # fn demo(cert_pem: &str, key_pem: &str) -> Result<(), Box<dyn std::error::Error>> {
//! let cert = Certificate::from_public_key_pem("agent-1", cert_pem)?;
//! let key = PrivateKey::from_pkcs8_pem(key_pem)?;
//!
//! let doc = EncryptedDocument::new("Test Data to Sign", &cert)?;
//! let stored = doc.encrypted_data();
//!
//! let doc = EncryptedDocument::from_encrypted_data(&stored)?;
//! assert_eq!(doc.decrypted_data(&key, &cert)?, b"Test Data to Sign");
//! # Ok(())
//! # }
//! ```
//!
//! ## Properties
//!
//! - **Hybrid**: fresh 256-bit content key per document, RSA-OAEP-SHA256 wrap
//! - **Authenticated**: AES-256-GCM (or ChaCha20-Poly1305); header is bound as AAD
//! - **Typed errors**: key mismatch, unwrap failure and tampering are distinct
//! - **Stable wire format**: versioned, self-describing, optional PEM armour
//!
//! ## What's NOT Provided
//!
//! - Certificate issuance or chain validation
//! - Key generation or storage
//! - Signing
//! - Streaming encryption

#![deny(unsafe_code)]

mod aead;
mod armor;
mod cert;
mod document;
mod envelope;
mod error;
mod wrap;

// Wire module is public for inspection tooling and fuzzing
// but should not be considered stable API
#[doc(hidden)]
pub mod wire;

pub use aead::{CipherAlgorithm, Nonce, SymmetricKey, KEY_BYTES, NONCE_BYTES, TAG_BYTES};
pub use cert::{Certificate, Fingerprint, PrivateKey};
pub use document::{inspect, EncodingFormat, EncryptedDocument, EnvelopeInfo};
pub use envelope::{decrypt, encrypt, Envelope, EnvelopeCipher};
pub use error::{CertificateError, DecryptError, EncryptError, FormatError};
pub use wrap::{KeyWrapAlgorithm, DEFAULT_MIN_KEY_BITS, MAX_KEY_BITS};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wire format version.
pub const PROTOCOL_VERSION: u8 = wire::PROTOCOL_VERSION;

/// Re-exported so callers can build key handles without a direct `rsa` dependency.
pub use rsa;
