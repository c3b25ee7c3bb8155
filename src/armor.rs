//! PEM-style armour for envelopes.
//!
//! Format:
//! ```text
//! -----BEGIN CERT ENVELOPE-----
//! AcGxAAEA...
//! (base64, 64 columns)
//! -----END CERT ENVELOPE-----
//! ```

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::error::FormatError;

pub const ARMOR_LABEL: &str = "CERT ENVELOPE";

const LINE_WIDTH: usize = 64;

fn begin_line() -> String {
    format!("-----BEGIN {ARMOR_LABEL}-----")
}

fn end_line() -> String {
    format!("-----END {ARMOR_LABEL}-----")
}

/// Encode envelope bytes as armoured text.
pub fn armor_encode(payload: &[u8]) -> String {
    let b64 = BASE64.encode(payload);
    let mut out = String::with_capacity(b64.len() + b64.len() / LINE_WIDTH + 64);

    out.push_str(&begin_line());
    out.push('\n');

    let mut rest = b64.as_str();
    while !rest.is_empty() {
        let (line, tail) = rest.split_at(rest.len().min(LINE_WIDTH));
        out.push_str(line);
        out.push('\n');
        rest = tail;
    }

    out.push_str(&end_line());
    out.push('\n');
    out
}

/// Decode armoured text back to envelope bytes.
///
/// Text before the BEGIN line and after the END line is ignored.
pub fn armor_decode(s: &str) -> Result<Vec<u8>, FormatError> {
    let begin = begin_line();
    let end = end_line();
    let lines: Vec<&str> = s.lines().map(str::trim_end).collect();

    let begin_idx = lines
        .iter()
        .position(|l| *l == begin)
        .ok_or_else(|| FormatError::Armor("missing BEGIN line".into()))?;
    let end_idx = lines[begin_idx + 1..]
        .iter()
        .position(|l| *l == end)
        .map(|i| begin_idx + 1 + i)
        .ok_or_else(|| FormatError::Armor("missing END line".into()))?;

    let body: String = lines[begin_idx + 1..end_idx]
        .iter()
        .flat_map(|l| l.chars())
        .filter(|c| !c.is_whitespace())
        .collect();

    BASE64
        .decode(body)
        .map_err(|e| FormatError::Armor(format!("invalid base64: {e}")))
}

/// True if `data` looks like armoured text rather than a binary envelope.
pub fn is_armored(data: &[u8]) -> bool {
    let trimmed = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .map_or(&data[..0], |i| &data[i..]);
    trimmed.starts_with(b"-----BEGIN ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn armor_roundtrip() {
        let payload: Vec<u8> = (0..=255u8).collect();
        let armored = armor_encode(&payload);

        assert!(armored.starts_with("-----BEGIN CERT ENVELOPE-----\n"));
        assert!(armored.ends_with("-----END CERT ENVELOPE-----\n"));
        assert!(armored.lines().all(|l| l.len() <= LINE_WIDTH || l.starts_with("-----")));
        assert_eq!(armor_decode(&armored).unwrap(), payload);
    }

    #[test]
    fn tolerates_crlf_and_surrounding_text() {
        let armored = armor_encode(b"hello").replace('\n', "\r\n");
        let wrapped = format!("preamble\r\n{armored}trailer\r\n");
        assert_eq!(armor_decode(&wrapped).unwrap(), b"hello");
        assert!(is_armored(format!("  \n{armored}").as_bytes()));
    }

    #[test]
    fn rejects_bad_armor() {
        assert!(matches!(armor_decode("no markers"), Err(FormatError::Armor(_))));
        assert!(matches!(
            armor_decode("-----BEGIN CERT ENVELOPE-----\nAAAA\n"),
            Err(FormatError::Armor(_))
        ));
        assert!(matches!(
            armor_decode("-----BEGIN CERT ENVELOPE-----\n!!!!\n-----END CERT ENVELOPE-----\n"),
            Err(FormatError::Armor(_))
        ));
        assert!(!is_armored(&[0x01, 0xC1, 0xB1]));
    }
}
