//! Encrypted document facade and envelope inspection.
//!
//! `EncryptedDocument` is the shape most callers want: hand it data and a
//! certificate, store `encrypted_data()`, and later hand the stored bytes
//! plus the key pair back to get the data out.

use core::fmt;

use crate::cert::{Certificate, PrivateKey};
use crate::envelope::{parse_any, Envelope, EnvelopeCipher};
use crate::error::{DecryptError, EncryptError};

/// Rendering of the encrypted document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EncodingFormat {
    /// Raw wire bytes.
    #[default]
    Binary,
    /// Base64 between `-----BEGIN CERT ENVELOPE-----` markers.
    Pem,
}

/// A document encrypted for one certificate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedDocument {
    envelope: Envelope,
}

impl EncryptedDocument {
    /// Encrypt `data` for `cert` with the default suite.
    pub fn new(data: impl AsRef<[u8]>, cert: &Certificate) -> Result<Self, EncryptError> {
        Self::with_cipher(&EnvelopeCipher::new(), data, cert)
    }

    pub fn with_cipher(
        engine: &EnvelopeCipher,
        data: impl AsRef<[u8]>,
        cert: &Certificate,
    ) -> Result<Self, EncryptError> {
        let envelope = engine.encrypt(data.as_ref(), cert)?;
        Ok(Self { envelope })
    }

    /// Load previously stored encrypted data, binary or PEM.
    pub fn from_encrypted_data(data: impl AsRef<[u8]>) -> Result<Self, DecryptError> {
        let envelope = parse_any(data.as_ref())?;
        Ok(Self { envelope })
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Binary envelope bytes.
    pub fn encrypted_data(&self) -> Vec<u8> {
        self.envelope.to_bytes()
    }

    pub fn encrypted_data_as(&self, format: EncodingFormat) -> Vec<u8> {
        match format {
            EncodingFormat::Binary => self.envelope.to_bytes(),
            EncodingFormat::Pem => self.envelope.to_pem().into_bytes(),
        }
    }

    /// Decrypt with the recipient's key pair.
    pub fn decrypted_data(&self, key: &PrivateKey, cert: &Certificate) -> Result<Vec<u8>, DecryptError> {
        EnvelopeCipher::new().decrypt(&self.envelope, key, cert)
    }
}

impl From<Envelope> for EncryptedDocument {
    fn from(envelope: Envelope) -> Self {
        Self { envelope }
    }
}

// ---------------------------------------------------------------------------
// Inspection utilities (for ops/debugging)
// ---------------------------------------------------------------------------

/// Envelope metadata (extracted without decryption).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeInfo {
    /// Format version (currently 0x01)
    pub version: u8,
    pub key_wrap: &'static str,
    pub cipher: &'static str,
    /// Wrapped key length; equals the recipient's modulus size in bytes
    pub wrapped_key_bytes: usize,
    /// Plaintext length (ciphertext is the same length)
    pub plaintext_bytes: usize,
    /// Total binary envelope length
    pub total_bytes: usize,
}

impl fmt::Display for EnvelopeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "envelope v{} | {} + {} | {} bytes ({} plaintext, {}-byte wrapped key)",
            self.version,
            self.key_wrap,
            self.cipher,
            self.total_bytes,
            self.plaintext_bytes,
            self.wrapped_key_bytes
        )
    }
}

/// Inspect envelope metadata without decrypting. Accepts binary or PEM.
///
/// Reveals nothing secret: every reported field is stored in the clear.
pub fn inspect(data: &[u8]) -> Result<EnvelopeInfo, DecryptError> {
    let envelope = parse_any(data)?;
    Ok(EnvelopeInfo {
        version: envelope.version(),
        key_wrap: envelope.key_wrap_algorithm().name(),
        cipher: envelope.cipher_algorithm().name(),
        wrapped_key_bytes: envelope.wrapped_key().len(),
        plaintext_bytes: envelope.ciphertext().len(),
        total_bytes: envelope.encoded_len(),
    })
}
