//! Key wrap: RSA-OAEP (SHA-256, MGF1-SHA-256, empty label)
//!
//! The content key is encrypted directly under the certificate's RSA public
//! key. The wrapped key is exactly one modulus long:
//!
//!   wrapped_key = RSA-OAEP-SHA256(cert.public_key, content_key[32])   (k bytes)

use core::fmt;

use rand_core::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::Oaep;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::aead::SymmetricKey;
use crate::cert::{Certificate, PrivateKey};
use crate::error::{DecryptError, EncryptError};
use crate::wire::WRAP_RSA_OAEP_SHA256;

/// Smallest modulus accepted by default.
pub const DEFAULT_MIN_KEY_BITS: usize = 2048;

/// Largest modulus accepted. Keeps the wrapped key within the u16 length field.
pub const MAX_KEY_BITS: usize = 16384;

/// Asymmetric algorithm used to wrap the content key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyWrapAlgorithm {
    #[default]
    RsaOaepSha256,
}

impl KeyWrapAlgorithm {
    /// On-wire identifier.
    pub const fn id(self) -> u8 {
        match self {
            Self::RsaOaepSha256 => WRAP_RSA_OAEP_SHA256,
        }
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            WRAP_RSA_OAEP_SHA256 => Some(Self::RsaOaepSha256),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::RsaOaepSha256 => "RSA-OAEP-SHA256",
        }
    }

    /// Reject certificates whose key this algorithm cannot use.
    pub fn check_certificate(self, cert: &Certificate, min_bits: usize) -> Result<(), EncryptError> {
        match self {
            Self::RsaOaepSha256 => RsaOaepSha256Wrap::check_certificate(cert, min_bits),
        }
    }

    pub fn wrap_key(self, cert: &Certificate, key: &SymmetricKey) -> Result<Vec<u8>, EncryptError> {
        match self {
            Self::RsaOaepSha256 => RsaOaepSha256Wrap::wrap_key(cert, key),
        }
    }

    pub fn unwrap_key(self, sk: &PrivateKey, wrapped: &[u8]) -> Result<SymmetricKey, DecryptError> {
        match self {
            Self::RsaOaepSha256 => RsaOaepSha256Wrap::unwrap_key(sk, wrapped),
        }
    }
}

impl fmt::Display for KeyWrapAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Key-wrap provider trait + RSA-OAEP implementation
// ---------------------------------------------------------------------------

/// Internal seam for key-wrap primitives. A new primitive needs an impl here,
/// a [`KeyWrapAlgorithm`] variant and an on-wire id.
pub(crate) trait KeyWrap {
    fn check_certificate(cert: &Certificate, min_bits: usize) -> Result<(), EncryptError>;
    /// Returns the wrapped key bytes.
    fn wrap_key(cert: &Certificate, key: &SymmetricKey) -> Result<Vec<u8>, EncryptError>;
    /// Returns the recovered content key.
    fn unwrap_key(sk: &PrivateKey, wrapped: &[u8]) -> Result<SymmetricKey, DecryptError>;
}

/// RSA-OAEP with SHA-256 for both the label hash and MGF1.
pub(crate) struct RsaOaepSha256Wrap;

impl KeyWrap for RsaOaepSha256Wrap {
    fn check_certificate(cert: &Certificate, min_bits: usize) -> Result<(), EncryptError> {
        let bits = cert.key_bits();
        if bits < min_bits {
            return Err(EncryptError::UnsupportedCertificate {
                bits,
                reason: "RSA modulus below configured minimum",
            });
        }
        if bits > MAX_KEY_BITS {
            return Err(EncryptError::UnsupportedCertificate {
                bits,
                reason: "RSA modulus above supported maximum",
            });
        }
        Ok(())
    }

    fn wrap_key(cert: &Certificate, key: &SymmetricKey) -> Result<Vec<u8>, EncryptError> {
        // OAEP can only fail here if the modulus is too short for the padding
        cert.public_key()
            .encrypt(&mut OsRng, Oaep::new::<Sha256>(), key.as_bytes())
            .map_err(|_| EncryptError::UnsupportedCertificate {
                bits: cert.key_bits(),
                reason: "RSA modulus too small for OAEP-SHA256",
            })
    }

    fn unwrap_key(sk: &PrivateKey, wrapped: &[u8]) -> Result<SymmetricKey, DecryptError> {
        let rsa = sk.rsa();
        if wrapped.len() != rsa.size() {
            return Err(DecryptError::Unwrap);
        }

        let raw = Zeroizing::new(
            rsa.decrypt_blinded(&mut OsRng, Oaep::new::<Sha256>(), wrapped)
                .map_err(|_| DecryptError::Unwrap)?,
        );
        SymmetricKey::from_slice(&raw).ok_or(DecryptError::Unwrap)
    }
}
