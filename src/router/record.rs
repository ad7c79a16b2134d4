use crate::pattern::{Bound, Segment};

use std::cmp::Ordering;

use smallvec::SmallVec;

/// The immutable result of analyzing and registering one route
/// pattern. Shared between the trie, the sorted listing, and the id
/// index via `Arc`.
#[derive(Debug)]
pub(crate) struct Record<T> {
    pub(crate) path: Box<str>,
    pub(crate) handle: T,
    pub(crate) segments: Vec<Segment>,
    pub(crate) params: Vec<Box<str>>,
    pub(crate) fingerprint: String,
    pub(crate) case_sensitive: bool,
}

enum Key<'a> {
    Literal(&'a str),
    Dynamic,
    Wildcard,
}

fn keys(segments: &[Segment]) -> SmallVec<[Key<'_>; 8]> {
    let mut out = SmallVec::new();
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push(Key::Literal(text)),
            Segment::Param { .. } | Segment::Mixed { .. } => out.push(Key::Dynamic),
            Segment::Wildcard(Bound::Fixed(n)) => {
                for _ in 0..*n {
                    out.push(Key::Dynamic);
                }
            }
            Segment::Wildcard(Bound::Unbounded) => out.push(Key::Wildcard),
        }
    }
    out
}

/// Listing order: shorter patterns first, then segment by segment with
/// literals before anything else and wildcards after anything else.
/// Governs enumeration only; lookup priority lives in the trie.
pub(crate) fn compare<T>(a: &Record<T>, b: &Record<T>) -> Ordering {
    let ka = keys(&a.segments);
    let kb = keys(&b.segments);

    match ka.len().cmp(&kb.len()) {
        Ordering::Equal => {}
        other => return other,
    }

    for (x, y) in ka.iter().zip(kb.iter()) {
        let decisive = match (x, y) {
            (Key::Literal(x), Key::Literal(y)) => x.cmp(y),
            (Key::Literal(_), _) => Ordering::Less,
            (_, Key::Literal(_)) => Ordering::Greater,
            (Key::Wildcard, Key::Wildcard) => Ordering::Equal,
            (Key::Wildcard, _) => Ordering::Greater,
            (_, Key::Wildcard) => Ordering::Less,
            _ => Ordering::Equal,
        };
        if decisive != Ordering::Equal {
            return decisive;
        }
    }

    Ordering::Equal
}
