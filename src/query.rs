//! Query string read/write for the viewer parameter.
//!
//! Minimal percent-decoding and key-value handling without external
//! dependencies. Other parameters are preserved in their original order and
//! encoding; only the named parameter is touched.
//!
//! ```
//! use zengallery::query;
//!
//! let q = query::with_param("?lang=fr", "img", "photos/harbour 1.jpg");
//! assert_eq!(q, "lang=fr&img=photos%2Fharbour%201.jpg");
//! assert_eq!(query::get(&q, "img").as_deref(), Some("photos/harbour 1.jpg"));
//! assert_eq!(query::without_param(&q, "img"), "lang=fr");
//! ```

use alloc::string::String;
use alloc::vec::Vec;

/// Decoded value of the first `name` parameter, if any.
pub fn get(query: &str, name: &str) -> Option<String> {
    split_query(query)
        .map(split_pair)
        .find(|(key, _)| percent_decode(key) == name)
        .map(|(_, value)| percent_decode(value))
}

/// `query` with `name` set to `value`. The first existing occurrence is
/// replaced in place, later duplicates dropped; otherwise the pair is
/// appended. The result has no leading `?`.
pub fn with_param(query: &str, name: &str, value: &str) -> String {
    let encoded = pair(name, value);
    let mut parts: Vec<String> = Vec::new();
    let mut replaced = false;
    for raw in split_query(query) {
        let (key, _) = split_pair(raw);
        if percent_decode(key) == name {
            if !replaced {
                parts.push(encoded.clone());
                replaced = true;
            }
        } else {
            parts.push(String::from(raw));
        }
    }
    if !replaced {
        parts.push(encoded);
    }
    parts.join("&")
}

/// `query` with every `name` parameter removed. No leading `?`.
pub fn without_param(query: &str, name: &str) -> String {
    split_query(query)
        .filter(|raw| percent_decode(split_pair(raw).0) != name)
        .collect::<Vec<_>>()
        .join("&")
}

fn pair(name: &str, value: &str) -> String {
    let mut out = percent_encode(name);
    out.push('=');
    out.push_str(&percent_encode(value));
    out
}

// ---- Tokenizer ----

/// Split query string on '&'.
fn split_query(query: &str) -> impl Iterator<Item = &str> {
    // Strip leading '?' if present (caller may or may not have stripped it)
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').filter(|s| !s.is_empty())
}

/// Split a single "key=value" pair on the first '='.
fn split_pair(pair: &str) -> (&str, &str) {
    pair.split_once('=').unwrap_or((pair, ""))
}

/// Percent-decode a URL component as UTF-8. Also handles '+' as space.
/// Malformed escapes are kept literally; invalid UTF-8 becomes U+FFFD.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn percent_encode(s: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(s.len());
    for &b in s.as_bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            out.push(b as char);
        } else {
            out.push('%');
            out.push(HEX[(b >> 4) as usize] as char);
            out.push(HEX[(b & 0x0F) as usize] as char);
        }
    }
    out
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_basic() {
        assert_eq!(get("img=a.jpg", "img").as_deref(), Some("a.jpg"));
        assert_eq!(get("?lang=en&img=b.jpg", "img").as_deref(), Some("b.jpg"));
        assert_eq!(get("lang=en", "img"), None);
        assert_eq!(get("", "img"), None);
    }

    #[test]
    fn get_first_of_duplicates() {
        assert_eq!(get("img=a&img=b", "img").as_deref(), Some("a"));
    }

    #[test]
    fn get_key_without_value() {
        assert_eq!(get("img", "img").as_deref(), Some(""));
        assert_eq!(get("img=", "img").as_deref(), Some(""));
    }

    #[test]
    fn decode_escapes_and_plus() {
        assert_eq!(percent_decode("a%2Fb+c"), "a/b c");
        assert_eq!(percent_decode("caf%C3%A9"), "café");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
        assert_eq!(percent_decode("%4"), "%4");
        assert_eq!(percent_decode("%41"), "A");
    }

    #[test]
    fn decode_invalid_utf8_is_lossy() {
        assert_eq!(percent_decode("%FF"), "\u{FFFD}");
    }

    #[test]
    fn encode_reserved() {
        assert_eq!(percent_encode("a b/c?d&e=f"), "a%20b%2Fc%3Fd%26e%3Df");
        assert_eq!(percent_encode("café"), "caf%C3%A9");
        assert_eq!(percent_encode("A-z_0.9~"), "A-z_0.9~");
    }

    #[test]
    fn with_param_appends_or_replaces() {
        assert_eq!(with_param("", "img", "a"), "img=a");
        assert_eq!(with_param("?lang=en", "img", "a"), "lang=en&img=a");
        assert_eq!(with_param("img=a&lang=en", "img", "b"), "img=b&lang=en");
        assert_eq!(with_param("img=a&x=1&img=c", "img", "b"), "img=b&x=1");
    }

    #[test]
    fn with_param_preserves_other_encoding() {
        assert_eq!(with_param("q=a%20b&img=x", "img", "y"), "q=a%20b&img=y");
    }

    #[test]
    fn without_param_removes_all() {
        assert_eq!(without_param("img=a", "img"), "");
        assert_eq!(without_param("?a=1&img=x&b=2&img=y", "img"), "a=1&b=2");
        assert_eq!(without_param("a=1", "img"), "a=1");
    }

    #[test]
    fn round_trips_awkward_values() {
        for value in ["a&b", "x=y", "100%", "spaces and+plus", "ünï/cødé"] {
            let q = with_param("keep=1", "img", value);
            assert_eq!(get(&q, "img").as_deref(), Some(value), "{q}");
            assert_eq!(get(&q, "keep").as_deref(), Some("1"));
        }
    }
}
