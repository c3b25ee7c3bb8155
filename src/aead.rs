//! Symmetric cipher engine: AES-256-GCM or ChaCha20-Poly1305, detached tag.
//!
//! Content keys live in [`SymmetricKey`], which zeroizes on drop. The cipher
//! instances built from it (AES round keys, GHASH key, ChaCha20 state) are
//! wiped on drop through the cipher crates' `zeroize` features. Stale copies
//! left on the stack or by the allocator are outside our control.

use core::fmt;

use aes_gcm::aead::{AeadInPlace, KeyInit, Nonce as AeadNonce, Tag};
use aes_gcm::Aes256Gcm;
use chacha20poly1305::ChaCha20Poly1305;
use getrandom::getrandom;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{DecryptError, EncryptError};
use crate::wire::{CIPHER_AES256GCM, CIPHER_CHACHA20POLY1305};

/// Content key size (both suites use 256-bit keys).
pub const KEY_BYTES: usize = 32;
/// Nonce size (both suites use 96-bit nonces).
pub const NONCE_BYTES: usize = 12;
/// Authentication tag size.
pub const TAG_BYTES: usize = 16;

// ---------------------------------------------------------------------------
// Algorithm identifiers
// ---------------------------------------------------------------------------

/// Authenticated cipher used for the envelope payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CipherAlgorithm {
    #[default]
    Aes256Gcm,
    ChaCha20Poly1305,
}

impl CipherAlgorithm {
    /// On-wire identifier.
    pub const fn id(self) -> u8 {
        match self {
            Self::Aes256Gcm => CIPHER_AES256GCM,
            Self::ChaCha20Poly1305 => CIPHER_CHACHA20POLY1305,
        }
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            CIPHER_AES256GCM => Some(Self::Aes256Gcm),
            CIPHER_CHACHA20POLY1305 => Some(Self::ChaCha20Poly1305),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Aes256Gcm => "AES-256-GCM",
            Self::ChaCha20Poly1305 => "ChaCha20-Poly1305",
        }
    }
}

impl fmt::Display for CipherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Key and nonce
// ---------------------------------------------------------------------------

/// One-time content key. Erased when dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_BYTES]);

impl SymmetricKey {
    /// Fresh key from the OS random source.
    pub fn generate() -> Result<Self, EncryptError> {
        let mut key = Self([0u8; KEY_BYTES]);
        getrandom(&mut key.0).map_err(|_| EncryptError::Random)?;
        Ok(key)
    }

    /// Copy key bytes out of an unwrapped buffer. `None` on wrong length.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != KEY_BYTES {
            return None;
        }
        let mut key = Self([0u8; KEY_BYTES]);
        key.0.copy_from_slice(bytes);
        Some(key)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_BYTES] {
        &self.0
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey([REDACTED])")
    }
}

/// Per-envelope nonce. Not secret.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Nonce([u8; NONCE_BYTES]);

impl Nonce {
    /// Fresh random nonce. Used during encryption only.
    pub fn generate() -> Result<Self, EncryptError> {
        let mut n = [0u8; NONCE_BYTES];
        getrandom(&mut n).map_err(|_| EncryptError::Random)?;
        Ok(Self(n))
    }

    pub const fn from_bytes(bytes: [u8; NONCE_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; NONCE_BYTES] {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Seal / open
// ---------------------------------------------------------------------------

/// Encrypt `plaintext`, returning `(ciphertext, tag)`.
///
/// The ciphertext has the same length as the plaintext. `aad` is
/// authenticated but not encrypted.
pub fn seal(
    alg: CipherAlgorithm,
    key: &SymmetricKey,
    nonce: &Nonce,
    plaintext: &[u8],
    aad: &[u8],
) -> Result<(Vec<u8>, [u8; TAG_BYTES]), EncryptError> {
    let mut buf = plaintext.to_vec();
    let sealed = match alg {
        CipherAlgorithm::Aes256Gcm => seal_in_place::<Aes256Gcm>(key, nonce, aad, &mut buf),
        CipherAlgorithm::ChaCha20Poly1305 => {
            seal_in_place::<ChaCha20Poly1305>(key, nonce, aad, &mut buf)
        }
    };
    match sealed {
        Ok(tag) => Ok((buf, tag)),
        Err(e) => {
            // buf may still hold plaintext
            buf.zeroize();
            Err(e)
        }
    }
}

/// Verify `tag` and decrypt `ciphertext`.
///
/// Nothing is returned unless the tag verifies; on failure the working
/// buffer is wiped before the error is reported.
pub fn open(
    alg: CipherAlgorithm,
    key: &SymmetricKey,
    nonce: &Nonce,
    ciphertext: &[u8],
    tag: &[u8; TAG_BYTES],
    aad: &[u8],
) -> Result<Vec<u8>, DecryptError> {
    let mut buf = ciphertext.to_vec();
    let opened = match alg {
        CipherAlgorithm::Aes256Gcm => open_in_place::<Aes256Gcm>(key, nonce, aad, &mut buf, tag),
        CipherAlgorithm::ChaCha20Poly1305 => {
            open_in_place::<ChaCha20Poly1305>(key, nonce, aad, &mut buf, tag)
        }
    };
    match opened {
        Ok(()) => Ok(buf),
        Err(e) => {
            buf.zeroize();
            Err(e)
        }
    }
}

fn seal_in_place<C: AeadInPlace + KeyInit>(
    key: &SymmetricKey,
    nonce: &Nonce,
    aad: &[u8],
    buf: &mut Vec<u8>,
) -> Result<[u8; TAG_BYTES], EncryptError> {
    let cipher = C::new_from_slice(key.as_bytes()).map_err(|_| EncryptError::Cipher)?;
    let n = AeadNonce::<C>::from_slice(nonce.as_bytes());
    let tag = cipher
        .encrypt_in_place_detached(n, aad, buf)
        .map_err(|_| EncryptError::Cipher)?;

    let mut out = [0u8; TAG_BYTES];
    out.copy_from_slice(tag.as_slice());
    Ok(out)
}

fn open_in_place<C: AeadInPlace + KeyInit>(
    key: &SymmetricKey,
    nonce: &Nonce,
    aad: &[u8],
    buf: &mut Vec<u8>,
    tag: &[u8; TAG_BYTES],
) -> Result<(), DecryptError> {
    let cipher = C::new_from_slice(key.as_bytes()).map_err(|_| DecryptError::Authentication)?;
    let n = AeadNonce::<C>::from_slice(nonce.as_bytes());
    let t = Tag::<C>::from_slice(tag);
    cipher
        .decrypt_in_place_detached(n, aad, buf, t)
        .map_err(|_| DecryptError::Authentication)
}
