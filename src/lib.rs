//! courier-router
//!
//! Resolves a request's method, path, and optional host into a
//! registered handle, extracting named path parameters along the way.
//!
//! ```
//! use courier_router::{RouteConfig, Router};
//!
//! let mut router: Router<usize> = Router::new();
//! router
//!     .add(RouteConfig::new("GET", "/users/{id}"), 1)
//!     .add(RouteConfig::new("GET", "/files/{path*}"), 2);
//!
//! let found = router.route("GET", "/users/42", None).ok().unwrap();
//! assert_eq!(*found.route, 1);
//! assert_eq!(found.params.get("id"), Some("42"));
//! ```
//!
//! Registration is single-writer: finish all `add`/`special` calls
//! before sharing the router with concurrent readers. After that every
//! operation is read-only.

#![deny(unsafe_code)]

mod normalize;
mod pattern;
mod router;

#[cfg(feature = "http-method")]
mod http_method;

pub use crate::normalize::normalize;
pub use crate::pattern::{analyze, Bound, MixedPart, PathAnalysis, Segment};
pub use crate::router::{
    DecodeFn, Dispatch, Params, RouteConfig, RouteMatch, Router, RouterError, RouterOptions,
    SpecialKind,
};

#[cfg(feature = "http-method")]
pub use crate::http_method::Method;
