//! Envelope codec: per-message content key, key wrap, payload encryption.
//!
//! encrypt:
//!   key, nonce    <- OS CSPRNG
//!   wrapped_key   = wrap(cert.public_key, key)
//!   ct, tag       = AEAD(key, nonce, plaintext, aad = header || wrapped_key)
//!
//! decrypt:
//!   parse + version/suite check -> key/cert correspondence -> unwrap -> AEAD open
//!
//! Content keys are held in [`SymmetricKey`] and erased when dropped, on
//! every return path.

use crate::aead::{self, CipherAlgorithm, Nonce, SymmetricKey, TAG_BYTES};
use crate::armor;
use crate::cert::{Certificate, PrivateKey};
use crate::error::{DecryptError, EncryptError};
use crate::wire::{self, PROTOCOL_VERSION};
use crate::wrap::{KeyWrapAlgorithm, DEFAULT_MIN_KEY_BITS};

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// An encrypted document. Self-describing and immutable.
///
/// Only envelopes with a supported version and algorithm ids can be
/// constructed, so holding an `Envelope` means the format checks passed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    key_wrap: KeyWrapAlgorithm,
    cipher: CipherAlgorithm,
    wrapped_key: Vec<u8>,
    nonce: Nonce,
    ciphertext: Vec<u8>,
    tag: [u8; TAG_BYTES],
}

impl Envelope {
    pub fn version(&self) -> u8 {
        PROTOCOL_VERSION
    }

    pub fn key_wrap_algorithm(&self) -> KeyWrapAlgorithm {
        self.key_wrap
    }

    pub fn cipher_algorithm(&self) -> CipherAlgorithm {
        self.cipher
    }

    pub fn wrapped_key(&self) -> &[u8] {
        &self.wrapped_key
    }

    pub fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    pub fn tag(&self) -> &[u8; TAG_BYTES] {
        &self.tag
    }

    /// Serialized length in bytes.
    pub fn encoded_len(&self) -> usize {
        wire::MIN_ENVELOPE_BYTES + self.wrapped_key.len() + self.ciphertext.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        wire::encode_wire(
            self.key_wrap,
            self.cipher,
            &self.wrapped_key,
            self.nonce.as_bytes(),
            &self.ciphertext,
            &self.tag,
        )
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, DecryptError> {
        let parts = wire::decode_wire(data)?;
        Ok(Self {
            key_wrap: parts.key_wrap,
            cipher: parts.cipher,
            wrapped_key: parts.wrapped_key.to_vec(),
            nonce: Nonce::from_bytes(*parts.nonce),
            ciphertext: parts.ciphertext.to_vec(),
            tag: *parts.tag,
        })
    }

    pub fn to_pem(&self) -> String {
        armor::armor_encode(&self.to_bytes())
    }

    pub fn from_pem(s: &str) -> Result<Self, DecryptError> {
        let bytes = armor::armor_decode(s)?;
        Self::from_bytes(&bytes)
    }

    fn associated_data(&self) -> Vec<u8> {
        wire::associated_data(self.key_wrap, self.cipher, &self.wrapped_key)
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Envelope encryption engine.
///
/// Stateless: holds only the suite used for new envelopes. Decryption
/// accepts any supported suite recorded in the envelope.
///
/// ```no_run
/// use cert_envelope::{Certificate, EnvelopeCipher, PrivateKey};
/// # fn demo(cert: &Certificate, key: &PrivateKey) -> Result<(), Box<dyn std::error::Error>> {
/// let engine = EnvelopeCipher::new();
/// let envelope = engine.encrypt(b"Test Data to Sign", cert)?;
/// let plaintext = engine.decrypt(&envelope, key, cert)?;
/// assert_eq!(plaintext, b"Test Data to Sign");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnvelopeCipher {
    key_wrap: KeyWrapAlgorithm,
    cipher: CipherAlgorithm,
    min_key_bits: usize,
}

impl Default for EnvelopeCipher {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvelopeCipher {
    /// RSA-OAEP-SHA256 + AES-256-GCM, 2048-bit minimum modulus.
    pub fn new() -> Self {
        Self {
            key_wrap: KeyWrapAlgorithm::RsaOaepSha256,
            cipher: CipherAlgorithm::Aes256Gcm,
            min_key_bits: DEFAULT_MIN_KEY_BITS,
        }
    }

    pub fn with_cipher(mut self, cipher: CipherAlgorithm) -> Self {
        self.cipher = cipher;
        self
    }

    /// Smallest certificate modulus accepted by [`encrypt`](Self::encrypt).
    pub fn with_min_key_bits(mut self, bits: usize) -> Self {
        self.min_key_bits = bits;
        self
    }

    pub fn key_wrap(&self) -> KeyWrapAlgorithm {
        self.key_wrap
    }

    pub fn cipher(&self) -> CipherAlgorithm {
        self.cipher
    }

    pub fn min_key_bits(&self) -> usize {
        self.min_key_bits
    }

    /// Encrypt `plaintext` for the holder of `cert`'s private key.
    ///
    /// Every call draws a fresh content key and nonce, so identical inputs
    /// produce different envelopes.
    pub fn encrypt(&self, plaintext: &[u8], cert: &Certificate) -> Result<Envelope, EncryptError> {
        tracing::debug!(
            identity = cert.identity(),
            key_wrap = %self.key_wrap,
            cipher = %self.cipher,
            plaintext_len = plaintext.len(),
            "sealing envelope"
        );

        if let Err(e) = self.key_wrap.check_certificate(cert, self.min_key_bits) {
            tracing::debug!(identity = cert.identity(), error = %e, "certificate rejected");
            return Err(e);
        }

        let key = SymmetricKey::generate()?;
        let nonce = Nonce::generate()?;

        let wrapped_key = self.key_wrap.wrap_key(cert, &key)?;
        let aad = wire::associated_data(self.key_wrap, self.cipher, &wrapped_key);
        let (ciphertext, tag) = aead::seal(self.cipher, &key, &nonce, plaintext, &aad)?;
        drop(key);

        Ok(Envelope {
            key_wrap: self.key_wrap,
            cipher: self.cipher,
            wrapped_key,
            nonce,
            ciphertext,
            tag,
        })
    }

    /// Decrypt `envelope` with `key`, which must belong to `cert`.
    pub fn decrypt(
        &self,
        envelope: &Envelope,
        key: &PrivateKey,
        cert: &Certificate,
    ) -> Result<Vec<u8>, DecryptError> {
        tracing::debug!(
            identity = cert.identity(),
            key_wrap = %envelope.key_wrap,
            cipher = %envelope.cipher,
            ciphertext_len = envelope.ciphertext.len(),
            "opening envelope"
        );

        if !key.corresponds_to(cert) {
            tracing::warn!(
                identity = cert.identity(),
                "private key does not correspond to certificate"
            );
            return Err(DecryptError::KeyMismatch);
        }

        let content_key = envelope
            .key_wrap
            .unwrap_key(key, &envelope.wrapped_key)
            .map_err(|e| {
                tracing::debug!(identity = cert.identity(), "content key unwrap failed");
                e
            })?;

        let aad = envelope.associated_data();
        let plaintext = aead::open(
            envelope.cipher,
            &content_key,
            &envelope.nonce,
            &envelope.ciphertext,
            &envelope.tag,
            &aad,
        )
        .map_err(|e| {
            tracing::debug!(identity = cert.identity(), "envelope authentication failed");
            e
        })?;
        drop(content_key);

        Ok(plaintext)
    }

    /// Parse and decrypt a serialized envelope (binary or PEM).
    ///
    /// Format errors are reported before any key is touched.
    pub fn decrypt_bytes(
        &self,
        data: &[u8],
        key: &PrivateKey,
        cert: &Certificate,
    ) -> Result<Vec<u8>, DecryptError> {
        let envelope = parse_any(data)?;
        self.decrypt(&envelope, key, cert)
    }
}

/// Parse binary or armoured envelope bytes.
pub(crate) fn parse_any(data: &[u8]) -> Result<Envelope, DecryptError> {
    if armor::is_armored(data) {
        let text = core::str::from_utf8(data)
            .map_err(|_| crate::error::FormatError::Armor("armour is not UTF-8".into()))?;
        Envelope::from_pem(text)
    } else {
        Envelope::from_bytes(data)
    }
}

/// Encrypt with the default suite. See [`EnvelopeCipher::encrypt`].
pub fn encrypt(plaintext: &[u8], cert: &Certificate) -> Result<Envelope, EncryptError> {
    EnvelopeCipher::new().encrypt(plaintext, cert)
}

/// Decrypt an envelope. See [`EnvelopeCipher::decrypt`].
pub fn decrypt(
    envelope: &Envelope,
    key: &PrivateKey,
    cert: &Certificate,
) -> Result<Vec<u8>, DecryptError> {
    EnvelopeCipher::new().decrypt(envelope, key, cert)
}
