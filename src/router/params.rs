use std::ops::Deref;
use std::str::FromStr;

use smallvec::SmallVec;

/// Decoded path parameters of a matched route.
///
/// Entries keep left-to-right binding order, one per distinct
/// parameter name; segments consumed by a fixed-count wildcard are
/// joined with `/` into a single value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    buf: SmallVec<[(Box<str>, String); 4]>,
}

impl Params {
    pub(crate) fn new() -> Self {
        Self {
            buf: SmallVec::new(),
        }
    }

    pub(crate) fn push(&mut self, name: Box<str>, value: String) {
        self.buf.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.buf
            .iter()
            .find_map(|(k, v)| if name == &**k { Some(v.as_str()) } else { None })
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Option<Result<T, T::Err>> {
        self.get(name).map(T::from_str)
    }

    /// Values in binding order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.buf.iter().map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Deref for Params {
    type Target = [(Box<str>, String)];

    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}
