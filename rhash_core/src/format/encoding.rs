//! Byte-to-text encoders used by the digest formatter

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

const BASE32_LOWER: &[u8; 32] = b"abcdefghijklmnopqrstuvwxyz234567";
const BASE32_UPPER: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

pub(crate) fn hex_encode(bytes: &[u8], uppercase: bool) -> String {
    if uppercase {
        hex::encode_upper(bytes)
    } else {
        hex::encode(bytes)
    }
}

/// RFC 4648 base32 without padding
pub(crate) fn base32_encode(bytes: &[u8], uppercase: bool) -> String {
    let alphabet = if uppercase { BASE32_UPPER } else { BASE32_LOWER };
    let mut out = String::with_capacity(bytes.len().div_ceil(5) * 8);

    let mut buffer: u16 = 0;
    let mut bits = 0u32;
    for &byte in bytes {
        buffer = (buffer << 8) | u16::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(alphabet[usize::from((buffer >> bits) & 0x1f)] as char);
        }
        buffer &= (1 << bits) - 1;
    }
    if bits > 0 {
        out.push(alphabet[usize::from((buffer << (5 - bits)) & 0x1f)] as char);
    }
    out
}

/// Standard alphabet with padding
pub(crate) fn base64_encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Percent-encode everything outside the RFC 3986 unreserved set
pub fn url_encode(text: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut out = String::with_capacity(text.len());
    for &byte in text.as_bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(byte as char);
        } else {
            out.push('%');
            out.push(HEX[usize::from(byte >> 4)] as char);
            out.push(HEX[usize::from(byte & 0x0f)] as char);
        }
    }
    out
}
