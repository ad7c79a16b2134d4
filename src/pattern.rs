//! Route-pattern analysis.
//!
//! Turns a pattern string such as `/users/{id}/files/{path*}` into the
//! segment descriptors the trie stores, the parameter names in binding
//! order, and a structural fingerprint that identifies the pattern's
//! shape independently of parameter names.

use crate::normalize::is_decodable;
use crate::router::RouterError;

use regex::{Regex, RegexBuilder};

/// How many request segments a wildcard consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Exactly `n` segments, all bound to the same parameter name.
    Fixed(usize),
    /// Every remaining segment, at least one.
    Unbounded,
}

/// One fragment of a mixed segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MixedPart {
    Literal(Box<str>),
    Param { allow_empty: bool },
}

/// A matchable descriptor for one path segment of a pattern.
///
/// Parameter names are not part of the descriptor: they live in
/// [`PathAnalysis::params`] in binding order, so that two patterns with
/// the same shape produce identical descriptor sequences.
#[derive(Debug, Clone)]
pub enum Segment {
    /// Exact text, case-folded at analysis time when matching is
    /// case-insensitive.
    Literal(Box<str>),
    /// Binds one request segment to one parameter name.
    Param { allow_empty: bool },
    /// Consumes one or more trailing request segments.
    Wildcard(Bound),
    /// Literal text and parameters sharing one segment, matched by an
    /// anchored pattern compiled once here.
    Mixed { parts: Vec<MixedPart>, regex: Regex },
}

impl Segment {
    pub(crate) fn is_trailing_optional(&self) -> bool {
        matches!(self, Segment::Param { allow_empty: true })
    }
}

/// The analyzed form of one route pattern.
#[derive(Debug)]
pub struct PathAnalysis {
    pub segments: Vec<Segment>,
    /// Parameter names in binding order. A name repeats only for a
    /// fixed-count wildcard, once per consumed segment.
    pub params: Vec<Box<str>>,
    /// `/`-joined shape tokens: literal text, `?` per parameter, `#`
    /// for an unbounded wildcard.
    pub fingerprint: String,
}

#[derive(Clone, Copy)]
enum Token<'a> {
    Literal(&'a str),
    Param { name: &'a str, modifier: Modifier },
}

#[derive(Clone, Copy)]
enum Modifier {
    None,
    Optional,
    Wildcard(Option<usize>),
}

fn invalid(reason: &'static str) -> RouterError {
    RouterError::InvalidPattern { reason }
}

/// Analyzes a route pattern into matchable descriptors.
///
/// Fails with [`RouterError::InvalidPattern`] when the pattern violates
/// the grammar and [`RouterError::ParamNameConflict`] when a parameter
/// name is reused outside fixed-count wildcard repetition.
pub fn analyze(pattern: &str, case_sensitive: bool) -> Result<PathAnalysis, RouterError> {
    if !pattern.starts_with('/') {
        return Err(invalid("pattern must start with '/'"));
    }
    check_encoding(pattern)?;

    let raw: Vec<&str> = pattern[1..].split('/').collect();

    let mut segments: Vec<Segment> = Vec::with_capacity(raw.len());
    let mut params: Vec<Box<str>> = Vec::new();
    let mut tokens: Vec<String> = Vec::new();

    for (pos, &seg) in raw.iter().enumerate() {
        let last = pos + 1 == raw.len();

        if !seg.contains('{') {
            if seg.contains('}') {
                return Err(invalid("unmatched '}' in segment"));
            }
            let text = fold(seg, case_sensitive);
            tokens.push(text.clone());
            segments.push(Segment::Literal(text.into()));
            continue;
        }

        let parts = tokenize(seg)?;

        if let [Token::Param { name, modifier }] = parts[..] {
            match modifier {
                Modifier::Wildcard(Some(count)) => {
                    declare(&mut params, name, count)?;
                    for _ in 0..count {
                        tokens.push("?".to_owned());
                    }
                    segments.push(Segment::Wildcard(Bound::Fixed(count)));
                }
                Modifier::Wildcard(None) => {
                    if !last {
                        return Err(invalid("unbounded wildcard must be the final segment"));
                    }
                    declare(&mut params, name, 1)?;
                    tokens.push("#".to_owned());
                    segments.push(Segment::Wildcard(Bound::Unbounded));
                }
                Modifier::Optional => {
                    declare(&mut params, name, 1)?;
                    tokens.push("?".to_owned());
                    segments.push(Segment::Param { allow_empty: true });
                }
                Modifier::None => {
                    declare(&mut params, name, 1)?;
                    tokens.push("?".to_owned());
                    segments.push(Segment::Param { allow_empty: false });
                }
            }
            continue;
        }

        segments.push(mixed(&parts, &mut params, &mut tokens, case_sensitive)?);
    }

    let fingerprint = {
        let mut f = String::with_capacity(pattern.len());
        for token in &tokens {
            f.push('/');
            f.push_str(token);
        }
        f
    };

    Ok(PathAnalysis {
        segments,
        params,
        fingerprint,
    })
}

fn mixed(
    parts: &[Token<'_>],
    params: &mut Vec<Box<str>>,
    tokens: &mut Vec<String>,
    case_sensitive: bool,
) -> Result<Segment, RouterError> {
    let mut source = String::from("^");
    let mut token = String::new();
    let mut out: Vec<MixedPart> = Vec::with_capacity(parts.len());

    for part in parts {
        match *part {
            Token::Literal(text) => {
                let text = fold(text, case_sensitive);
                source.push_str(&regex::escape(&text));
                token.push_str(&text);
                out.push(MixedPart::Literal(text.into()));
            }
            Token::Param { name, modifier } => {
                let allow_empty = match modifier {
                    Modifier::None => false,
                    Modifier::Optional => true,
                    Modifier::Wildcard(_) => {
                        return Err(invalid("wildcard cannot share a segment with literal text"));
                    }
                };
                declare(params, name, 1)?;
                source.push_str(if allow_empty { "(.*)" } else { "(.+)" });
                token.push('?');
                out.push(MixedPart::Param { allow_empty });
            }
        }
    }

    source.push('$');
    let regex = RegexBuilder::new(&source)
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|_| invalid("segment pattern failed to compile"))?;

    tokens.push(token);
    Ok(Segment::Mixed { parts: out, regex })
}

fn tokenize(segment: &str) -> Result<Vec<Token<'_>>, RouterError> {
    let mut parts = Vec::new();
    let mut rest = segment;
    let mut prev_was_param = false;

    while !rest.is_empty() {
        match rest.find('{') {
            None => {
                if rest.contains('}') {
                    return Err(invalid("unmatched '}' in segment"));
                }
                parts.push(Token::Literal(rest));
                break;
            }
            Some(0) => {
                let close = rest.find('}').ok_or_else(|| invalid("unmatched '{' in segment"))?;
                if prev_was_param {
                    return Err(invalid("parameters must be separated by literal text"));
                }
                parts.push(parse_param(&rest[1..close])?);
                prev_was_param = true;
                rest = &rest[close + 1..];
            }
            Some(at) => {
                let literal = &rest[..at];
                if literal.contains('}') {
                    return Err(invalid("unmatched '}' in segment"));
                }
                parts.push(Token::Literal(literal));
                prev_was_param = false;
                rest = &rest[at..];
            }
        }
    }

    Ok(parts)
}

fn parse_param(inner: &str) -> Result<Token<'_>, RouterError> {
    let (name, modifier) = if let Some(name) = inner.strip_suffix('?') {
        (name, Modifier::Optional)
    } else if let Some(star) = inner.find('*') {
        let count = &inner[star + 1..];
        let count = if count.is_empty() {
            None
        } else {
            match count.parse::<usize>() {
                Ok(n) if n >= 1 => Some(n),
                _ => return Err(invalid("wildcard count must be a positive integer")),
            }
        };
        (&inner[..star], Modifier::Wildcard(count))
    } else {
        (inner, Modifier::None)
    };

    if name.is_empty() {
        return Err(invalid("parameter name cannot be empty"));
    }
    if !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        return Err(invalid("parameter name must contain only word characters"));
    }

    Ok(Token::Param { name, modifier })
}

fn declare(params: &mut Vec<Box<str>>, name: &str, count: usize) -> Result<(), RouterError> {
    if params.iter().any(|p| &**p == name) {
        return Err(RouterError::ParamNameConflict {
            name: name.to_owned(),
        });
    }
    for _ in 0..count {
        params.push(name.into());
    }
    Ok(())
}

// Percent-encoded characters from the decodable set never survive
// normalization, so a pattern holding one could never match.
fn check_encoding(pattern: &str) -> Result<(), RouterError> {
    let bytes = pattern.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'%' {
            continue;
        }
        if let Some(hex) = bytes.get(i + 1..i + 3) {
            if hex.iter().all(u8::is_ascii_hexdigit) {
                let value = (hex_val(hex[0]) << 4) | hex_val(hex[1]);
                if is_decodable(value) {
                    return Err(invalid(
                        "unreserved characters must appear literally, not percent-encoded",
                    ));
                }
            }
        }
    }
    Ok(())
}

fn hex_val(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        _ => b - b'A' + 10,
    }
}

fn fold(text: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        text.to_owned()
    } else {
        text.to_lowercase()
    }
}
