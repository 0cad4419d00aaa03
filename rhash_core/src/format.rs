//! Text rendering of digests
//!
//! Print flags use the same bit values as librhash's `RHPR_*` constants so
//! that values passed through the C interface keep their meaning.

use crate::hashing::Digest;
use std::ops::{BitOr, BitOrAssign};

pub(crate) mod encoding;
pub(crate) mod magnet;

pub use encoding::url_encode;

/// Output encoding of a digest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Binary digest bytes
    Raw,
    Hex,
    /// RFC 4648 alphabet, unpadded
    Base32,
    Base64,
}

/// Rendering options for [`print_digest`] and magnet links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PrintFlags(u32);

impl PrintFlags {
    /// Algorithm's default encoding
    pub const DEFAULT: PrintFlags = PrintFlags(0);
    pub const RAW: PrintFlags = PrintFlags(1);
    pub const HEX: PrintFlags = PrintFlags(2);
    pub const BASE32: PrintFlags = PrintFlags(3);
    pub const BASE64: PrintFlags = PrintFlags(4);
    pub const UPPERCASE: PrintFlags = PrintFlags(0x08);
    /// Reverse the digest byte order before encoding
    pub const REVERSE: PrintFlags = PrintFlags(0x10);
    pub const NO_MAGNET: PrintFlags = PrintFlags(0x20);
    /// Include the message length (`xl=`) in magnet links
    pub const FILESIZE: PrintFlags = PrintFlags(0x40);
    /// Percent-encode the rendered text
    pub const URLENCODE: PrintFlags = PrintFlags(0x80);

    const ENCODING_MASK: u32 = 0x07;

    /// Build from raw bits; bits without a meaning are kept but ignored
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True when every modifier bit of `other` is set
    pub const fn contains(self, other: PrintFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Explicitly requested encoding, `None` for the algorithm default
    pub fn encoding(self) -> Option<Encoding> {
        match self.0 & Self::ENCODING_MASK {
            1 => Some(Encoding::Raw),
            2 => Some(Encoding::Hex),
            3 => Some(Encoding::Base32),
            4 => Some(Encoding::Base64),
            _ => None,
        }
    }

    /// Replace the encoding bits
    pub fn with_encoding(self, encoding: Option<Encoding>) -> Self {
        let bits = match encoding {
            None => 0,
            Some(Encoding::Raw) => 1,
            Some(Encoding::Hex) => 2,
            Some(Encoding::Base32) => 3,
            Some(Encoding::Base64) => 4,
        };
        Self((self.0 & !Self::ENCODING_MASK) | bits)
    }

    pub fn uppercase(self) -> bool {
        self.contains(Self::UPPERCASE)
    }
}

impl BitOr for PrintFlags {
    type Output = PrintFlags;

    fn bitor(self, rhs: PrintFlags) -> PrintFlags {
        PrintFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for PrintFlags {
    fn bitor_assign(&mut self, rhs: PrintFlags) {
        self.0 |= rhs.0;
    }
}

/// Encoding actually used for `digest` under `flags`
pub fn effective_encoding(digest: &Digest, flags: PrintFlags) -> Encoding {
    flags.encoding().unwrap_or(if digest.algorithm().descriptor().base32_default {
        Encoding::Base32
    } else {
        Encoding::Hex
    })
}

/// Render a digest as bytes
///
/// `Raw` returns the (possibly reversed) binary digest; every other encoding
/// returns ASCII text.
pub fn print_digest(digest: &Digest, flags: PrintFlags) -> Vec<u8> {
    let mut bytes = digest.as_bytes().to_vec();
    if flags.contains(PrintFlags::REVERSE) {
        bytes.reverse();
    }

    let uppercase = flags.uppercase();
    let text = match effective_encoding(digest, flags) {
        Encoding::Raw => return bytes,
        Encoding::Hex => encoding::hex_encode(&bytes, uppercase),
        Encoding::Base32 => encoding::base32_encode(&bytes, uppercase),
        Encoding::Base64 => encoding::base64_encode(&bytes),
    };

    if flags.contains(PrintFlags::URLENCODE) {
        url_encode(&text).into_bytes()
    } else {
        text.into_bytes()
    }
}

/// Render a digest as text; a raw request falls back to hex
pub fn print_digest_text(digest: &Digest, flags: PrintFlags) -> String {
    let flags = match flags.encoding() {
        Some(Encoding::Raw) => flags.with_encoding(Some(Encoding::Hex)),
        _ => flags,
    };
    // Every non-raw encoding is ASCII
    String::from_utf8_lossy(&print_digest(digest, flags)).into_owned()
}
