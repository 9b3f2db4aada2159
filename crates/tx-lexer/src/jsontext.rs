//! Character classification and escape/unescape helpers shared by the lexer,
//! the DOM, and the tools crate.

use tx_core::{bom::is_noncharacter, WString};

/// A character that may appear literally inside a JSON string without being
/// backslash-escaped.
pub fn is_unescaped(c: u32) -> bool {
    if is_noncharacter(c) {
        return false;
    }
    c == 0x20 || c == 0x21 || (0x23..=0x5B).contains(&c) || c >= 0x5D
}

/// The short escape character for one of the special cases (`"` `\` `/` `b`
/// `f` `n` `r` `t`), if `c` has one.
pub fn short_escape_letter(c: u16) -> Option<char> {
    match c {
        0x22 => Some('"'),
        0x5C => Some('\\'),
        0x2F => Some('/'),
        0x08 => Some('b'),
        0x0C => Some('f'),
        0x0A => Some('n'),
        0x0D => Some('r'),
        0x09 => Some('t'),
        _ => None,
    }
}

/// Appends the escaped form of `c` (without surrounding quotes) to `out`.
/// Prefers the short form; falls back to `\uXXXX` (four uppercase hex
/// digits), rewriting a noncharacter to `U+FFFD` first.
pub fn push_escaped(out: &mut Vec<u16>, c: u16) {
    let c = if is_noncharacter(c as u32) { tx_core::bom::REPLACEMENT_CHARACTER } else { c };
    if is_unescaped(c as u32) {
        out.push(c);
        return;
    }
    out.push(b'\\' as u16);
    if let Some(letter) = short_escape_letter(c) {
        out.push(letter as u16);
    } else {
        out.push(b'u' as u16);
        for hex in format!("{:04X}", c).encode_utf16() {
            out.push(hex);
        }
    }
}

pub fn to_escaped(ws: &WString) -> WString {
    let mut out = Vec::with_capacity(ws.len());
    for &c in ws.as_slice() {
        push_escaped(&mut out, c);
    }
    WString::from_vec(out)
}

/// Limited unescape pass used when a caller hands the DOM raw text containing
/// escape sequences directly (bypassing the lexer, which already unescapes
/// as it scans): only `\uXXXX` is recognised. Any other backslash sequence is
/// left as-is.
pub fn to_unescaped(ws: &WString) -> WString {
    let src = ws.as_slice();
    let mut out = Vec::with_capacity(src.len());
    let mut i = 0;
    while i < src.len() {
        if src[i] == b'\\' as u16 && i + 1 < src.len() && src[i + 1] == b'u' as u16 && i + 5 < src.len() {
            let hex: Option<String> = String::from_utf16(&src[i + 2..i + 6]).ok();
            if let Some(hex) = hex {
                if let Ok(value) = u16::from_str_radix(&hex, 16) {
                    out.push(value);
                    i += 6;
                    continue;
                }
            }
        }
        out.push(src[i]);
        i += 1;
    }
    WString::from_vec(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_escapes_are_preferred_over_numeric() {
        let mut out = Vec::new();
        push_escaped(&mut out, '\n' as u16);
        assert_eq!(out, vec!['\\' as u16, 'n' as u16]);
    }

    #[test]
    fn unknown_control_char_uses_numeric_escape() {
        let mut out = Vec::new();
        push_escaped(&mut out, 0x01);
        assert_eq!(out, "\\u0001".encode_utf16().collect::<Vec<_>>());
    }

    #[test]
    fn to_unescaped_only_understands_u_escapes() {
        let ws = WString::from_str("a\\u0041b");
        assert_eq!(to_unescaped(&ws), WString::from_str("aAb"));
    }

    #[test]
    fn to_unescaped_leaves_other_escapes_literal() {
        let ws = WString::from_str("a\\nb");
        assert_eq!(to_unescaped(&ws), WString::from_str("a\\nb"));
    }
}
