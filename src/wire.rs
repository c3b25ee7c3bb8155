//! Wire format (v1)
//!
//! Format (v1), integers big-endian:
//!   version[1] || key_wrap_alg[1] || cipher_alg[1] || flags[1] || wrapped_key_len[2]
//!   || wrapped_key[wrapped_key_len] || nonce[12] || ciphertext_len[8]
//!   || ciphertext[ciphertext_len] || tag[16]
//!
//! AEAD associated data = header[6] || wrapped_key

use crate::aead::{CipherAlgorithm, NONCE_BYTES, TAG_BYTES};
use crate::error::FormatError;
use crate::wrap::KeyWrapAlgorithm;

/// Version byte for v1
pub const PROTOCOL_VERSION: u8 = 0x01;

/// Key-wrap identifiers (on-wire)
pub const WRAP_RSA_OAEP_SHA256: u8 = 0xC1;

/// Cipher identifiers (on-wire)
pub const CIPHER_AES256GCM: u8 = 0xB1;
pub const CIPHER_CHACHA20POLY1305: u8 = 0xB2;

/// Flags (reserved for future use)
pub const FLAGS_V1: u8 = 0x00;

/// Header size: version + key_wrap_alg + cipher_alg + flags + wrapped_key_len(u16)
pub const HEADER_BYTES: usize = 1 + 1 + 1 + 1 + 2; // 6

/// Ciphertext length prefix (u64).
pub const CIPHERTEXT_LEN_BYTES: usize = 8;

/// Smallest structurally valid envelope: empty wrapped key and empty payload.
pub const MIN_ENVELOPE_BYTES: usize = HEADER_BYTES + NONCE_BYTES + CIPHERTEXT_LEN_BYTES + TAG_BYTES; // 42

/// Borrowed view of a parsed envelope.
#[derive(Debug, Clone, Copy)]
pub struct WireComponents<'a> {
    pub version: u8,
    pub key_wrap: KeyWrapAlgorithm,
    pub cipher: CipherAlgorithm,
    pub flags: u8,
    pub wrapped_key: &'a [u8],
    pub nonce: &'a [u8; NONCE_BYTES],
    pub ciphertext: &'a [u8],
    pub tag: &'a [u8; TAG_BYTES],
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], FormatError> {
        if self.data.len() - self.pos < n {
            return Err(FormatError::Truncated);
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, FormatError> {
        Ok(self.take(1)?[0])
    }

    fn array<const N: usize>(&mut self) -> Result<&'a [u8; N], FormatError> {
        self.take(N)?.try_into().map_err(|_| FormatError::Truncated)
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

/// Parse an envelope. Version and algorithm ids are checked first, before
/// any length field is trusted.
pub fn decode_wire(data: &[u8]) -> Result<WireComponents<'_>, FormatError> {
    let mut r = Reader::new(data);

    let version = r.u8()?;
    if version != PROTOCOL_VERSION {
        return Err(FormatError::UnknownVersion(version));
    }

    let wrap_id = r.u8()?;
    let key_wrap =
        KeyWrapAlgorithm::from_id(wrap_id).ok_or(FormatError::UnknownKeyWrapAlgorithm(wrap_id))?;

    let cipher_id = r.u8()?;
    let cipher =
        CipherAlgorithm::from_id(cipher_id).ok_or(FormatError::UnknownCipherAlgorithm(cipher_id))?;

    let flags = r.u8()?;
    if flags != FLAGS_V1 {
        return Err(FormatError::ReservedFlags(flags));
    }

    let wrapped_len = u16::from_be_bytes(*r.array::<2>()?) as usize;
    let wrapped_key = r.take(wrapped_len)?;
    let nonce = r.array::<NONCE_BYTES>()?;

    let ct_len = u64::from_be_bytes(*r.array::<CIPHERTEXT_LEN_BYTES>()?);
    let ct_len = usize::try_from(ct_len).map_err(|_| FormatError::Truncated)?;
    let ciphertext = r.take(ct_len)?;
    let tag = r.array::<TAG_BYTES>()?;

    if r.remaining() != 0 {
        return Err(FormatError::TrailingBytes(r.remaining()));
    }

    Ok(WireComponents {
        version,
        key_wrap,
        cipher,
        flags,
        wrapped_key,
        nonce,
        ciphertext,
        tag,
    })
}

/// Fixed header bytes for the given suite and wrapped-key length.
///
/// The wrapped key never exceeds one RSA modulus (at most 2048 bytes), so
/// the length always fits the u16 field.
pub fn encode_header(
    key_wrap: KeyWrapAlgorithm,
    cipher: CipherAlgorithm,
    wrapped_key_len: usize,
) -> [u8; HEADER_BYTES] {
    debug_assert!(wrapped_key_len <= u16::MAX as usize);
    let len = (wrapped_key_len as u16).to_be_bytes();
    [
        PROTOCOL_VERSION,
        key_wrap.id(),
        cipher.id(),
        FLAGS_V1,
        len[0],
        len[1],
    ]
}

/// Associated data bound into the AEAD: header || wrapped_key.
pub fn associated_data(
    key_wrap: KeyWrapAlgorithm,
    cipher: CipherAlgorithm,
    wrapped_key: &[u8],
) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_BYTES + wrapped_key.len());
    out.extend_from_slice(&encode_header(key_wrap, cipher, wrapped_key.len()));
    out.extend_from_slice(wrapped_key);
    out
}

pub fn encode_wire(
    key_wrap: KeyWrapAlgorithm,
    cipher: CipherAlgorithm,
    wrapped_key: &[u8],
    nonce: &[u8; NONCE_BYTES],
    ciphertext: &[u8],
    tag: &[u8; TAG_BYTES],
) -> Vec<u8> {
    let mut out =
        Vec::with_capacity(MIN_ENVELOPE_BYTES + wrapped_key.len() + ciphertext.len());

    out.extend_from_slice(&encode_header(key_wrap, cipher, wrapped_key.len()));
    out.extend_from_slice(wrapped_key);
    out.extend_from_slice(nonce);
    out.extend_from_slice(&(ciphertext.len() as u64).to_be_bytes());
    out.extend_from_slice(ciphertext);
    out.extend_from_slice(tag);

    out
}
