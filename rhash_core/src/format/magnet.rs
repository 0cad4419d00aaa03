//! Magnet link rendering

use super::{PrintFlags, encoding, print_digest_text};
use crate::error::ValidationError;
use crate::hashing::{AlgorithmSet, HashContext};
use crate::{Error, Result};
use std::fmt::Write;

/// Validate raw filename bytes and borrow them as text
pub(crate) fn filename_from_bytes(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|err| {
        Error::Validation(ValidationError::invalid_filename(format!(
            "filename is not valid UTF-8 at byte {}",
            err.valid_up_to()
        )))
    })
}

/// Build `magnet:?[xl=..&][dn=..&]xt=urn:<name>:<digest>[&xt=..]`
///
/// `mask` selects digests of the context; an empty mask selects all of them.
/// Every digest is written in its algorithm's default encoding, so only the
/// `UPPERCASE` and `FILESIZE` flags have an effect here.
pub(crate) fn print_magnet(
    context: &HashContext,
    filename: Option<&str>,
    mask: AlgorithmSet,
    flags: PrintFlags,
) -> Result<String> {
    let available = context.algorithms();
    let selected = if mask.is_empty() { available } else { mask };
    if !available.is_superset(selected) {
        let missing = selected.bits() & !available.bits();
        return Err(Error::unknown_algorithm(1 << missing.trailing_zeros()));
    }
    let digests = context.digests()?;

    let mut link = String::from("magnet:?");
    if flags.contains(PrintFlags::FILESIZE) {
        // Writing into a String cannot fail
        let _ = write!(link, "xl={}&", context.message_length());
    }
    if let Some(name) = filename {
        link.push_str("dn=");
        link.push_str(&encoding::url_encode(name));
        link.push('&');
    }

    let text_flags = if flags.uppercase() {
        PrintFlags::UPPERCASE
    } else {
        PrintFlags::DEFAULT
    };
    let mut first = true;
    for digest in digests.iter().filter(|d| selected.contains(d.algorithm())) {
        if !first {
            link.push('&');
        }
        first = false;
        let _ = write!(
            link,
            "xt=urn:{}:{}",
            digest.algorithm().descriptor().magnet_name,
            print_digest_text(digest, text_flags)
        );
    }
    Ok(link)
}
