//! Error types for envelope encryption.
//!
//! Encrypt-side and decrypt-side failures are separate types so a caller can
//! never confuse "could not produce an envelope" with "envelope rejected".

use thiserror::Error;

/// Failure while producing an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncryptError {
    /// The certificate's public key cannot be used with the key-wrap algorithm.
    #[error("unsupported certificate ({bits}-bit key): {reason}")]
    UnsupportedCertificate { bits: usize, reason: &'static str },

    /// The operating system random source failed.
    #[error("random source unavailable")]
    Random,

    /// The payload exceeds what the cipher can process under one nonce.
    #[error("payload rejected by cipher")]
    Cipher,
}

/// Failure while opening an envelope.
///
/// No variant ever carries plaintext, partial or otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecryptError {
    /// Unknown version or algorithm id, or broken framing.
    #[error("unsupported envelope format: {0}")]
    UnsupportedFormat(#[from] FormatError),

    /// The private key does not belong to the supplied certificate.
    #[error("private key does not correspond to certificate")]
    KeyMismatch,

    /// The key-wrap primitive rejected the wrapped key.
    #[error("failed to unwrap content key")]
    Unwrap,

    /// Tag verification failed: tampered envelope or wrong content key.
    #[error("authentication failed")]
    Authentication,
}

/// Detail for [`DecryptError::UnsupportedFormat`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unknown version 0x{0:02X}")]
    UnknownVersion(u8),

    #[error("unknown key-wrap algorithm 0x{0:02X}")]
    UnknownKeyWrapAlgorithm(u8),

    #[error("unknown cipher algorithm 0x{0:02X}")]
    UnknownCipherAlgorithm(u8),

    #[error("reserved flags set: 0x{0:02X}")]
    ReservedFlags(u8),

    #[error("envelope truncated")]
    Truncated,

    #[error("{0} trailing bytes after tag")]
    TrailingBytes(usize),

    #[error("armor: {0}")]
    Armor(String),
}

/// Failure while building a [`Certificate`](crate::Certificate) or
/// [`PrivateKey`](crate::PrivateKey) handle from encoded key material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CertificateError {
    #[error("invalid public key: {0}")]
    PublicKey(String),

    #[error("invalid private key: {0}")]
    PrivateKey(String),
}
