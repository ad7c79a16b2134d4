use super::record::Record;
use super::{DecodeFn, Dispatch, MethodMap, MethodTable, Params, RouteMatch, Router};

use smallvec::SmallVec;

impl<T> Router<T> {
    /// Resolves a request to a handle. Total over all inputs: the
    /// result is a match or a documented fallback, never an error.
    ///
    /// Resolution order, first success wins:
    /// 1. the hostname's virtual-host table for `method`
    /// 2. the default table for `method`
    /// 3. for `HEAD`: the virtual-host then default `GET` tables
    /// 4. for `OPTIONS`: the registered options special
    /// 5. the virtual-host then default catch-all (`*`) tables
    /// 6. the not-found special, or a generic not-found
    ///
    /// `path` is expected to be canonicalized already (see
    /// [`normalize`](crate::normalize)); it is split on `/` with the
    /// root path producing a single empty segment.
    pub fn route<'s>(&'s self, method: &str, path: &str, hostname: Option<&str>) -> Dispatch<'s, T> {
        let method = method.to_ascii_uppercase();
        let segments: SmallVec<[&str; 8]> = trim_first_slash(path).split('/').collect();

        let vhost = match (hostname, &self.vhosts) {
            (Some(host), Some(vhosts)) => vhosts.get(host.to_lowercase().as_str()),
            _ => None,
        };

        if let Some(found) = self.attempt(vhost, &method, path, &segments) {
            return found;
        }
        if let Some(found) = self.attempt(Some(&self.methods), &method, path, &segments) {
            return found;
        }

        if method == "HEAD" {
            if let Some(found) = self.attempt(vhost, "GET", path, &segments) {
                return found;
            }
            if let Some(found) = self.attempt(Some(&self.methods), "GET", path, &segments) {
                return found;
            }
        }

        if method == "OPTIONS" {
            if let Some(handle) = &self.specials.options {
                return Dispatch::Options(handle);
            }
        }

        if let Some(found) = self.attempt(vhost, "*", path, &segments) {
            return found;
        }
        if let Some(found) = self.attempt(Some(&self.methods), "*", path, &segments) {
            return found;
        }

        Dispatch::NotFound(self.specials.not_found.as_ref())
    }

    fn attempt<'s>(
        &'s self,
        methods: Option<&'s MethodMap<T>>,
        method: &str,
        path: &str,
        segments: &[&str],
    ) -> Option<Dispatch<'s, T>> {
        let table = methods?.get(method)?;
        self.lookup_in(table, path, segments)
    }

    fn lookup_in<'s>(
        &'s self,
        table: &'s MethodTable<T>,
        path: &str,
        segments: &[&str],
    ) -> Option<Dispatch<'s, T>> {
        let (record, captures) = table
            .trie
            .lookup(path, segments, self.options.case_sensitive)?;

        let found = match rebuild_params(record, &captures, self.options.decode) {
            Some(params) => Dispatch::Route(RouteMatch {
                route: &record.handle,
                params,
            }),
            // The only place decoding errors surface.
            None => Dispatch::BadRequest(self.specials.bad_request.as_ref()),
        };
        Some(found)
    }
}

/// Decodes raw captures against the record's parameter names.
///
/// A run of consecutive slots sharing one name comes from a
/// fixed-count wildcard; its decoded values are joined with `/` and
/// emitted once. A short match from an omitted trailing optional
/// parameter simply leaves the final name unused.
fn rebuild_params<T>(record: &Record<T>, captures: &[&str], decode: DecodeFn) -> Option<Params> {
    let mut params = Params::new();

    let mut i = 0;
    while i < captures.len() {
        let name = &record.params[i];
        let mut j = i + 1;
        while j < captures.len() && record.params[j] == *name {
            j += 1;
        }

        let mut value = String::new();
        for (k, raw) in captures[i..j].iter().enumerate() {
            let decoded = decode(raw)?;
            if k > 0 {
                value.push('/');
            }
            value.push_str(&decoded);
        }

        params.push(name.clone(), value);
        i = j;
    }

    Some(params)
}

#[inline]
fn trim_first_slash(s: &str) -> &str {
    if s.starts_with('/') {
        &s[1..]
    } else {
        s
    }
}
