//! Text conventions of generated search tables.
//!
//! Keys are stored in an id-safe form: letters are lowercased, ASCII
//! alphanumerics are kept, every other ASCII byte is written as `_` followed
//! by two lowercase hex digits (`value_type` becomes `value_5ftype`).
//! Non-ASCII characters are kept as they are, lowercased. Descriptions
//! carry HTML entities (`&amp;`, `&lt;`, `&gt;`) for characters of C++
//! signatures and must be stored verbatim; [`unescape_entities`] is only for
//! display.

use std::borrow::Cow;

/// Encode a plain symbol name into its search key form.
pub fn encode_key(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    for ch in lowered.chars() {
        if !ch.is_ascii() || ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            out.push(ch);
        } else {
            out.push_str(&format!("_{:02x}", ch as u32));
        }
    }
    out
}

/// Decode a search key back into the symbol text it was generated from.
///
/// Malformed escapes are kept literally rather than rejected.
pub fn decode_key(key: &str) -> Cow<'_, str> {
    if !key.contains('_') {
        return Cow::Borrowed(key);
    }

    let bytes = key.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'_' && i + 2 < bytes.len() {
            if let Some(decoded) = hex_pair(bytes[i + 1], bytes[i + 2]) {
                out.push(decoded);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    Cow::Owned(String::from_utf8_lossy(&out).into_owned())
}

fn hex_pair(hi: u8, lo: u8) -> Option<u8> {
    let hi = (hi as char).to_digit(16)?;
    let lo = (lo as char).to_digit(16)?;
    Some((hi * 16 + lo) as u8)
}

/// Replace HTML entities with the characters they stand for.
///
/// Unknown entities are left untouched.
pub fn unescape_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match tail
            .find(';')
            .and_then(|end| decode_entity(&tail[1..end]).map(|ch| (ch, end)))
        {
            Some((ch, end)) => {
                out.push(ch);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let numeric = name.strip_prefix('#')?;
            let code = match numeric.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => numeric.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}
