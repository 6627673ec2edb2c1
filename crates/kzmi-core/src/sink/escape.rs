//! Undo double-escaped `\u` sequences in serialized JSON.
//!
//! Upstream strings sometimes carry an already-escaped code point such as the
//! six characters `\u00e9`. Serializing escapes that backslash, producing
//! `\\u00e9` in the text.
//! Consumers expect a single escape, so `\\uXXXX` is folded back into
//! `\uXXXX`. Every other escape is copied through untouched.

/// Length of an escaped escape: `\\uXXXX`.
const ESCAPED_LEN: usize = 7;

/// Restores `\\uXXXX` (escaped backslash + `u` + 4 hex digits) to `\uXXXX`.
///
/// Surrogates are only folded as a complete high + low pair; a lone half
/// would make the output undecodable, so it stays escaped.
pub fn unescape_unicode(json: &str) -> String {
    let bytes = json.as_bytes();
    let mut out = String::with_capacity(json.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }
        let units = match escaped_code_unit(bytes, i) {
            Some(0xD800..=0xDBFF)
                if matches!(
                    escaped_code_unit(bytes, i + ESCAPED_LEN),
                    Some(0xDC00..=0xDFFF)
                ) =>
            {
                2
            }
            Some(0xD800..=0xDFFF) | None => 0,
            Some(_) => 1,
        };
        if units == 0 {
            // Every backslash in valid JSON text starts a two-byte-or-longer escape.
            i += 2;
            continue;
        }
        for _ in 0..units {
            out.push_str(&json[copied..i]);
            copied = i + 1; // drop the escaping backslash
            i += ESCAPED_LEN;
        }
    }
    out.push_str(&json[copied..]);
    out
}

/// UTF-16 code unit of a `\\uXXXX` sequence starting at `i`.
fn escaped_code_unit(bytes: &[u8], i: usize) -> Option<u16> {
    let esc = bytes.get(i..i + ESCAPED_LEN)?;
    if &esc[..3] != br"\\u" || !esc[3..].iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let hex = std::str::from_utf8(&esc[3..]).ok()?;
    u16::from_str_radix(hex, 16).ok()
}
