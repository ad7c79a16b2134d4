mod dispatch;
mod error;
mod params;
mod record;
mod trie;

pub use self::error::RouterError;
pub use self::params::Params;

use self::record::Record;
use self::trie::Trie;
use crate::pattern;

use std::collections::HashMap;
use std::sync::Arc;

/// Decode collaborator applied to captured parameter values. `None`
/// signals a decode failure, which surfaces as a bad-request dispatch
/// outcome. Literal matching never goes through this.
pub type DecodeFn = fn(&str) -> Option<String>;

/// Settings threaded through analysis, trie storage, and dispatch.
#[derive(Debug, Clone, Copy)]
pub struct RouterOptions {
    /// Governs literal comparison, mixed-pattern matching, and folding
    /// of literal text at registration time. Defaults to `true`.
    pub case_sensitive: bool,
    pub decode: DecodeFn,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            decode: default_decode,
        }
    }
}

/// Strict percent-decoding: a `%` not followed by two hex digits is a
/// failure rather than a pass-through, as is invalid UTF-8.
fn default_decode(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'%' {
            let hex = bytes.get(i + 1..i + 3)?;
            if !hex.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
        }
    }
    percent_encoding::percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}

/// One of the three built-in fallback kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialKind {
    BadRequest,
    NotFound,
    Options,
}

/// Registration input for one route.
#[derive(Debug, Clone, Copy)]
pub struct RouteConfig<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub vhost: Option<&'a str>,
    pub id: Option<&'a str>,
}

impl<'a> RouteConfig<'a> {
    pub fn new(method: &'a str, path: &'a str) -> Self {
        Self {
            method,
            path,
            vhost: None,
            id: None,
        }
    }

    pub fn vhost(mut self, host: &'a str) -> Self {
        self.vhost = Some(host);
        self
    }

    pub fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }
}

/// A successful dispatch.
#[derive(Debug)]
pub struct RouteMatch<'r, T> {
    pub route: &'r T,
    pub params: Params,
}

/// The total outcome of [`Router::route`]: a match or one of the
/// documented fallback signals, never an error.
#[derive(Debug)]
pub enum Dispatch<'r, T> {
    Route(RouteMatch<'r, T>),
    /// The registered options special, for `OPTIONS` requests with no
    /// directly matching route.
    Options(&'r T),
    /// A captured value failed decoding. Carries the bad-request
    /// special handle when one is registered.
    BadRequest(Option<&'r T>),
    /// The fallback chain was exhausted. Carries the not-found special
    /// handle when one is registered.
    NotFound(Option<&'r T>),
}

impl<'r, T> Dispatch<'r, T> {
    /// The matched route, discarding fallback outcomes.
    pub fn ok(self) -> Option<RouteMatch<'r, T>> {
        match self {
            Dispatch::Route(found) => Some(found),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct MethodTable<T> {
    sorted: Vec<Arc<Record<T>>>,
    trie: Trie<T>,
}

impl<T> MethodTable<T> {
    fn new() -> Self {
        Self {
            sorted: Vec::new(),
            trie: Trie::new(),
        }
    }

    fn insert(&mut self, record: Arc<Record<T>>) {
        self.trie.add(&record.segments, &record);
        let at = self
            .sorted
            .partition_point(|r| record::compare(r, &record) != std::cmp::Ordering::Greater);
        self.sorted.insert(at, record);
    }
}

type MethodMap<T> = HashMap<Box<str>, MethodTable<T>>;

#[derive(Debug)]
struct Specials<T> {
    bad_request: Option<T>,
    not_found: Option<T>,
    options: Option<T>,
}

/// Per-method, per-virtual-host route tables with a fallback chain.
///
/// Append-only: populate during a registration phase, then treat as
/// read-only. Lookups never mutate, so a populated router can be
/// shared freely across concurrent readers.
#[derive(Debug)]
pub struct Router<T> {
    methods: MethodMap<T>,
    vhosts: Option<HashMap<Box<str>, MethodMap<T>>>,
    ids: HashMap<Box<str>, Arc<Record<T>>>,
    specials: Specials<T>,
    options: RouterOptions,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    pub fn new() -> Self {
        Self::with_options(RouterOptions::default())
    }

    pub fn with_options(options: RouterOptions) -> Self {
        Self {
            methods: HashMap::new(),
            vhosts: None,
            ids: HashMap::new(),
            specials: Specials {
                bad_request: None,
                not_found: None,
                options: None,
            },
            options,
        }
    }

    /// Registers a route, panicking on an invalid pattern or conflict.
    pub fn add(&mut self, config: RouteConfig<'_>, handle: T) -> &mut Self {
        if let Err(e) = self.try_add(config, handle) {
            panic!("{}: pattern = {:?}", e, config.path);
        }
        self
    }

    pub fn try_add(&mut self, config: RouteConfig<'_>, handle: T) -> Result<&mut Self, RouterError> {
        let analysis = pattern::analyze(config.path, self.options.case_sensitive)?;
        self.try_add_analyzed(config, analysis, handle)
    }

    /// [`try_add`](Router::try_add) with the analysis already done,
    /// for callers that inspect a pattern before registering it.
    pub fn try_add_analyzed(
        &mut self,
        config: RouteConfig<'_>,
        analysis: pattern::PathAnalysis,
        handle: T,
    ) -> Result<&mut Self, RouterError> {
        if let Some(id) = config.id {
            // Checked before any structural mutation: a rejected add
            // leaves earlier registrations intact.
            if self.ids.contains_key(id) {
                return Err(RouterError::RouteIdConflict { id: id.to_owned() });
            }
        }

        let record = Arc::new(Record {
            path: config.path.into(),
            handle,
            segments: analysis.segments,
            params: analysis.params,
            fingerprint: analysis.fingerprint,
            case_sensitive: self.options.case_sensitive,
        });

        if let Some(id) = config.id {
            self.ids.insert(id.into(), Arc::clone(&record));
        }

        let method = config.method.to_ascii_uppercase().into_boxed_str();
        let methods = match config.vhost {
            Some(host) => self
                .vhosts
                .get_or_insert_with(HashMap::new)
                .entry(host.to_lowercase().into_boxed_str())
                .or_insert_with(HashMap::new),
            None => &mut self.methods,
        };
        methods
            .entry(method)
            .or_insert_with(MethodTable::new)
            .insert(record);

        Ok(self)
    }

    /// Registers a fallback handle. A later registration for the same
    /// kind replaces the earlier one.
    pub fn special(&mut self, kind: SpecialKind, handle: T) -> &mut Self {
        match kind {
            SpecialKind::BadRequest => self.specials.bad_request = Some(handle),
            SpecialKind::NotFound => self.specials.not_found = Some(handle),
            SpecialKind::Options => self.specials.options = Some(handle),
        }
        self
    }

    /// The route registered under `id`, if any.
    pub fn lookup_id(&self, id: &str) -> Option<&T> {
        self.ids.get(id).map(|record| &record.handle)
    }

    /// Flattens the sorted listings into one sequence of route
    /// handles, for enumeration and diagnostics only. With a host
    /// filter, that host's tables come first; the default tables
    /// always follow. Order within a table is the listing comparator's.
    pub fn table(&self, host: Option<&str>) -> Vec<&T> {
        let mut out = Vec::new();

        if let Some(vhosts) = &self.vhosts {
            match host {
                Some(h) => {
                    if let Some(methods) = vhosts.get(h.to_lowercase().as_str()) {
                        collect(methods, &mut out);
                    }
                }
                None => {
                    let mut hosts: Vec<&str> = vhosts.keys().map(|k| &**k).collect();
                    hosts.sort_unstable();
                    for h in hosts {
                        collect(&vhosts[h], &mut out);
                    }
                }
            }
        }

        collect(&self.methods, &mut out);
        out
    }
}

fn collect<'s, T>(methods: &'s MethodMap<T>, out: &mut Vec<&'s T>) {
    let mut keys: Vec<&str> = methods.keys().map(|k| &**k).collect();
    keys.sort_unstable();
    for key in keys {
        for record in &methods[key].sorted {
            out.push(&record.handle);
        }
    }
}
