//! Text decoding for HTML of unknown provenance.

use std::borrow::Cow;

/// How far into a document to look for a `<meta charset>` declaration.
const SNIFF_WINDOW: usize = 1024;

/// Decode bytes to a string, handling various encodings.
///
/// 1. UTF-8 (a BOM is stripped)
/// 2. The hint encoding, if given and known to `encoding_rs`
/// 3. Windows-1252, which accepts any byte sequence
///
/// Borrows the input when it is valid UTF-8 without a BOM.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        log::debug!("input is not UTF-8, decoding as {}", encoding.name());
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    log::debug!("input is not UTF-8, falling back to windows-1252");
    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// The charset named by a `charset=` declaration near the start of an HTML
/// document (`<meta charset="...">` or the `http-equiv` form).
pub fn sniff_charset(bytes: &[u8]) -> Option<&str> {
    let window = &bytes[..bytes.len().min(SNIFF_WINDOW)];
    let start = window
        .windows(8)
        .position(|w| w.eq_ignore_ascii_case(b"charset="))?
        + 8;

    let rest = &window[start..];
    let rest = rest
        .strip_prefix(b"\"")
        .or_else(|| rest.strip_prefix(b"'"))
        .unwrap_or(rest);
    let end = rest
        .iter()
        .position(|&b| matches!(b, b'"' | b'\'' | b';' | b'>' | b'/') || b.is_ascii_whitespace())
        .unwrap_or(rest.len());

    std::str::from_utf8(&rest[..end])
        .ok()
        .filter(|name| !name.is_empty())
}
