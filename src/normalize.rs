//! Raw request-path canonicalization.
//!
//! Applied to a path before it is split into segments and handed to
//! [`Router::route`](crate::Router::route). Both passes are skipped
//! entirely when their trigger characters are absent, so the common
//! case borrows.

use std::borrow::Cow;

/// Characters that are safe to decode from their percent-encoded form.
///
/// Encoded slashes and the other reserved delimiters stay encoded so
/// that decoding can not change how a path splits into segments.
pub(crate) fn is_decodable(byte: u8) -> bool {
    matches!(byte,
        b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9'
        | b'_' | b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*'
        | b'+' | b',' | b';' | b'=' | b':' | b'@' | b'-' | b'.' | b'~')
}

/// Canonicalizes a raw request path.
///
/// Percent-encoded triples get uppercase hex digits, triples encoding
/// an unreserved character are decoded, and `.` / `..` segments are
/// resolved. Idempotent: `normalize(normalize(p)) == normalize(p)`.
pub fn normalize(path: &str) -> Cow<'_, str> {
    let mut path = if path.contains('%') {
        Cow::Owned(decode_unreserved(path))
    } else {
        Cow::Borrowed(path)
    };

    if path.contains("/.") || path.starts_with('.') {
        path = Cow::Owned(resolve_dots(&path));
    }

    path
}

fn decode_unreserved(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut rest = path;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        let hex = tail
            .as_bytes()
            .get(1..3)
            .filter(|h| h.iter().all(u8::is_ascii_hexdigit));

        match hex {
            Some(h) => {
                let value = (hex_val(h[0]) << 4) | hex_val(h[1]);
                if is_decodable(value) {
                    out.push(value as char);
                } else {
                    out.push('%');
                    out.push(h[0].to_ascii_uppercase() as char);
                    out.push(h[1].to_ascii_uppercase() as char);
                }
                rest = &tail[3..];
            }
            None => {
                out.push('%');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn hex_val(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        _ => b - b'A' + 10,
    }
}

fn resolve_dots(path: &str) -> String {
    let lead = path.starts_with('/');
    let body = if lead { &path[1..] } else { path };

    let mut segments: Vec<&str> = Vec::new();
    let mut dangling = false;

    for segment in body.split('/') {
        match segment {
            "." => dangling = true,
            ".." => {
                segments.pop();
                dangling = true;
            }
            _ => {
                segments.push(segment);
                dangling = false;
            }
        }
    }

    if dangling {
        segments.push("");
    }

    let mut out = String::with_capacity(path.len());
    if lead {
        out.push('/');
    }
    out.push_str(&segments.join("/"));
    out
}
