use crate::router::{Dispatch, Router};

pub use http::Method;

impl<T> Router<T> {
    /// [`route`](Router::route) with a typed method.
    pub fn route_request<'s>(
        &'s self,
        method: &Method,
        path: &str,
        hostname: Option<&str>,
    ) -> Dispatch<'s, T> {
        self.route(method.as_str(), path, hostname)
    }
}

/// Builds a [`Router`] from a method/pattern table. `*` registers a
/// route under the catch-all method.
///
/// ```
/// use courier_router::routes;
///
/// let router = routes! {
///     GET "/users/{id}" => 1,
///     POST "/users" => 2,
///     * "/files/{path*}" => 3,
/// };
/// assert!(router.route("GET", "/users/42", None).ok().is_some());
/// ```
#[macro_export]
macro_rules! routes {
    {$($method:tt $pattern:expr => $data:expr),+ $(,)?} => {{
        let mut __router = $crate::Router::new();
        $($crate::routes!(@entry __router, $method, $pattern, $data);)+
        __router
    }};

    {@entry $router:expr, *, $pattern:expr, $data:expr} => {
        $router.add($crate::RouteConfig::new("*", $pattern), $data)
    };
    {@entry $router:expr, GET, $pattern:expr, $data:expr} => {
        $router.add($crate::RouteConfig::new("GET", $pattern), $data)
    };
    {@entry $router:expr, POST, $pattern:expr, $data:expr} => {
        $router.add($crate::RouteConfig::new("POST", $pattern), $data)
    };
    {@entry $router:expr, PUT, $pattern:expr, $data:expr} => {
        $router.add($crate::RouteConfig::new("PUT", $pattern), $data)
    };
    {@entry $router:expr, DELETE, $pattern:expr, $data:expr} => {
        $router.add($crate::RouteConfig::new("DELETE", $pattern), $data)
    };
    {@entry $router:expr, HEAD, $pattern:expr, $data:expr} => {
        $router.add($crate::RouteConfig::new("HEAD", $pattern), $data)
    };
    {@entry $router:expr, OPTIONS, $pattern:expr, $data:expr} => {
        $router.add($crate::RouteConfig::new("OPTIONS", $pattern), $data)
    };
    {@entry $router:expr, PATCH, $pattern:expr, $data:expr} => {
        $router.add($crate::RouteConfig::new("PATCH", $pattern), $data)
    };
}
