use courier_router::{Dispatch, Params, RouteConfig, Router, RouterError, RouterOptions, SpecialKind};

fn ok<'r>(d: Dispatch<'r, usize>) -> (usize, Params) {
    match d {
        Dispatch::Route(found) => (*found.route, found.params),
        other => panic!("expected a match, got {:?}", other),
    }
}

#[test]
fn router_common() {
    let mut router: Router<usize> = Router::new();
    router
        .add(RouteConfig::new("GET", "/"), 0)
        .add(RouteConfig::new("GET", "/explore"), 1)
        .add(RouteConfig::new("GET", "/user/{user_id}/post/{post_id}"), 2)
        .add(RouteConfig::new("GET", "/user/{user_id}/profile"), 3)
        .add(RouteConfig::new("GET", "/user/{user_id}/file/{path*}"), 4)
        .add(RouteConfig::new("GET", "/archive/{p*2}"), 5)
        .add(RouteConfig::new("GET", "/report.{ext}"), 6);

    let cases: &[(_, _, &[(&str, &str)])] = &[
        ("/", 0, &[]),
        ("/explore", 1, &[]),
        (
            "/user/asd/post/123",
            2,
            &[("user_id", "asd"), ("post_id", "123")],
        ),
        ("/user/asd/profile", 3, &[("user_id", "asd")]),
        (
            "/user/asd/file/home/asd/.bashrc",
            4,
            &[("user_id", "asd"), ("path", "home/asd/.bashrc")],
        ),
        ("/archive/2020/07", 5, &[("p", "2020/07")]),
        ("/report.csv", 6, &[("ext", "csv")]),
    ];

    for &(path, data, params) in cases {
        let (found, p) = ok(router.route("GET", path, None));
        assert_eq!(found, data, "path = {:?}", path);
        let got: Vec<(&str, &str)> = p.iter().map(|(k, v)| (&**k, v.as_str())).collect();
        assert_eq!(&got, params, "path = {:?}", path);
    }
}

#[test]
fn param_array_preserves_order() {
    let mut router: Router<usize> = Router::new();
    router.add(RouteConfig::new("GET", "/a/{id}"), 1);

    let (_, params) = ok(router.route("GET", "/a/42", None));
    assert_eq!(params.get("id"), Some("42"));
    assert_eq!(params.values().collect::<Vec<_>>(), vec!["42"]);
}

#[test]
fn fixed_count_wildcard_is_exact() {
    let mut router: Router<usize> = Router::new();
    router.add(RouteConfig::new("GET", "/seg/{p*2}"), 1);

    assert!(router.route("GET", "/seg/a", None).ok().is_none());
    assert!(router.route("GET", "/seg/a/b/c", None).ok().is_none());

    let (_, params) = ok(router.route("GET", "/seg/a/b", None));
    assert_eq!(params.get("p"), Some("a/b"));
    assert_eq!(params.len(), 1);
}

#[test]
fn trailing_optional_param() {
    let mut router: Router<usize> = Router::new();
    router.add(RouteConfig::new("GET", "/a/{p?}"), 1);

    // Omitted entirely: no binding for `p`.
    let (found, params) = ok(router.route("GET", "/a", None));
    assert_eq!(found, 1);
    assert_eq!(params.get("p"), None);

    // Present but empty: binds the empty string.
    let (_, params) = ok(router.route("GET", "/a/", None));
    assert_eq!(params.get("p"), Some(""));

    let (_, params) = ok(router.route("GET", "/a/x", None));
    assert_eq!(params.get("p"), Some("x"));
}

#[test]
fn priority_and_backtracking() {
    let mut router: Router<usize> = Router::new();
    router
        .add(RouteConfig::new("GET", "/users/{id}"), 1)
        .add(RouteConfig::new("GET", "/users/me"), 2)
        .add(RouteConfig::new("GET", "/users/{rest*}"), 3)
        .add(RouteConfig::new("GET", "/x/y"), 4)
        .add(RouteConfig::new("GET", "/{p}/z"), 5);

    assert_eq!(ok(router.route("GET", "/users/me", None)).0, 2);
    assert_eq!(ok(router.route("GET", "/users/42", None)).0, 1);
    assert_eq!(ok(router.route("GET", "/users/a/b", None)).0, 3);

    // The literal branch under /x dead-ends for /x/z; the search must
    // back out and take the parameter branch.
    let (found, params) = ok(router.route("GET", "/x/z", None));
    assert_eq!(found, 5);
    assert_eq!(params.get("p"), Some("x"));
}

#[test]
fn captured_values_are_decoded() {
    let mut router: Router<usize> = Router::new();
    router.add(RouteConfig::new("GET", "/file/{name}"), 1);

    let (_, params) = ok(router.route("GET", "/file/a%20b", None));
    assert_eq!(params.get("name"), Some("a b"));
}

#[test]
fn decode_failure_is_bad_request() {
    let mut router: Router<usize> = Router::new();
    router.add(RouteConfig::new("GET", "/file/{name}"), 1);

    match router.route("GET", "/file/%zz", None) {
        Dispatch::BadRequest(None) => {}
        other => panic!("expected generic bad request, got {:?}", other),
    }

    router.special(SpecialKind::BadRequest, 400);
    match router.route("GET", "/file/%zz", None) {
        Dispatch::BadRequest(Some(&400)) => {}
        other => panic!("expected bad request special, got {:?}", other),
    }
}

#[test]
fn not_found_fallbacks() {
    let mut router: Router<usize> = Router::new();
    router.add(RouteConfig::new("GET", "/a"), 1);

    match router.route("GET", "/missing", None) {
        Dispatch::NotFound(None) => {}
        other => panic!("expected generic not found, got {:?}", other),
    }

    router.special(SpecialKind::NotFound, 404);
    match router.route("GET", "/missing", None) {
        Dispatch::NotFound(Some(&404)) => {}
        other => panic!("expected not found special, got {:?}", other),
    }
}

#[test]
fn head_falls_back_to_get() {
    let mut router: Router<usize> = Router::new();
    router
        .add(RouteConfig::new("GET", "/page"), 1)
        .add(RouteConfig::new("HEAD", "/probe"), 2);

    assert_eq!(ok(router.route("HEAD", "/probe", None)).0, 2);
    assert_eq!(ok(router.route("HEAD", "/page", None)).0, 1);
}

#[test]
fn options_special() {
    let mut router: Router<usize> = Router::new();
    router.add(RouteConfig::new("GET", "/a"), 1);

    assert!(router.route("OPTIONS", "/a", None).ok().is_none());

    router.special(SpecialKind::Options, 99);
    match router.route("OPTIONS", "/a", None) {
        Dispatch::Options(&99) => {}
        other => panic!("expected options special, got {:?}", other),
    }
}

#[test]
fn catch_all_method() {
    let mut router: Router<usize> = Router::new();
    router
        .add(RouteConfig::new("GET", "/a"), 1)
        .add(RouteConfig::new("*", "/a"), 2);

    assert_eq!(ok(router.route("GET", "/a", None)).0, 1);
    assert_eq!(ok(router.route("DELETE", "/a", None)).0, 2);
}

#[test]
fn virtual_hosts_shadow_the_default_table() {
    let mut router: Router<usize> = Router::new();
    router
        .add(RouteConfig::new("GET", "/a"), 1)
        .add(RouteConfig::new("GET", "/a").vhost("Special.example.com"), 2);

    assert_eq!(ok(router.route("GET", "/a", None)).0, 1);
    assert_eq!(
        ok(router.route("GET", "/a", Some("special.example.com"))).0,
        2
    );
    assert_eq!(ok(router.route("GET", "/a", Some("other.example.com"))).0, 1);
}

#[test]
fn vhost_only_routes_fall_through_for_other_hosts() {
    let mut router: Router<usize> = Router::new();
    router.add(RouteConfig::new("GET", "/only").vhost("a.example.com"), 1);

    assert_eq!(ok(router.route("GET", "/only", Some("a.example.com"))).0, 1);
    assert!(router.route("GET", "/only", None).ok().is_none());
    assert!(router
        .route("GET", "/only", Some("b.example.com"))
        .ok()
        .is_none());
}

#[test]
fn methods_fold_case() {
    let mut router: Router<usize> = Router::new();
    router.add(RouteConfig::new("get", "/a"), 1);
    assert_eq!(ok(router.route("GET", "/a", None)).0, 1);
    assert_eq!(ok(router.route("get", "/a", None)).0, 1);
}

#[test]
fn case_insensitive_literals() {
    let options = RouterOptions {
        case_sensitive: false,
        ..RouterOptions::default()
    };
    let mut router: Router<usize> = Router::with_options(options);
    router
        .add(RouteConfig::new("GET", "/Foo"), 1)
        .add(RouteConfig::new("GET", "/Bar.{ext}"), 2);

    assert_eq!(ok(router.route("GET", "/foo", None)).0, 1);
    assert_eq!(ok(router.route("GET", "/FOO", None)).0, 1);
    assert_eq!(ok(router.route("GET", "/bar.TXT", None)).1.get("ext"), Some("TXT"));
}

#[test]
fn route_id_conflict_keeps_first() {
    let mut router: Router<usize> = Router::new();
    assert!(router
        .try_add(RouteConfig::new("GET", "/a").id("home"), 1)
        .is_ok());
    match router.try_add(RouteConfig::new("GET", "/b").id("home"), 2) {
        Err(RouterError::RouteIdConflict { id }) => assert_eq!(id, "home"),
        other => panic!("expected id conflict, got {:?}", other.map(|_| ())),
    }

    assert_eq!(router.lookup_id("home"), Some(&1));
    assert_eq!(ok(router.route("GET", "/a", None)).0, 1);
    assert!(router.route("GET", "/b", None).ok().is_none());
}

#[test]
fn invalid_patterns_are_rejected() {
    let mut router: Router<usize> = Router::new();
    assert!(matches!(
        router.try_add(RouteConfig::new("GET", "no-slash"), 1),
        Err(RouterError::InvalidPattern { .. })
    ));
    assert!(matches!(
        router.try_add(RouteConfig::new("GET", "/{id}/{id}"), 1),
        Err(RouterError::ParamNameConflict { .. })
    ));
}

#[test]
fn table_lists_sorted_routes() {
    let mut router: Router<usize> = Router::new();
    router
        .add(RouteConfig::new("GET", "/files/{path*}"), 3)
        .add(RouteConfig::new("GET", "/a/{id}"), 2)
        .add(RouteConfig::new("GET", "/a/a"), 1)
        .add(RouteConfig::new("GET", "/z"), 0)
        .add(RouteConfig::new("GET", "/only").vhost("a.example.com"), 9);

    // Shorter first, then literals before params before wildcards;
    // vhost tables precede the default table.
    assert_eq!(router.table(None), vec![&9, &0, &1, &2, &3]);
    assert_eq!(router.table(Some("a.example.com")), vec![&9, &0, &1, &2, &3]);
    assert_eq!(router.table(Some("other.example.com")), vec![&0, &1, &2, &3]);
}

#[cfg(feature = "http-method")]
#[test]
fn routes_macro_and_typed_methods() {
    use courier_router::{routes, Method};

    let router = routes! {
        GET "/u/{uid}/p/{pid}" => 1,
        POST "/u/{uid}/p" => 2,
        * "/misc/{rest*}" => 3,
    };

    let found = router
        .route_request(&Method::GET, "/u/asd/p/qwe", None)
        .ok()
        .unwrap();
    assert_eq!(*found.route, 1);
    assert_eq!(found.params.get("uid"), Some("asd"));
    assert_eq!(found.params.get("pid"), Some("qwe"));

    assert_eq!(
        *router
            .route_request(&Method::POST, "/u/asd/p", None)
            .ok()
            .unwrap()
            .route,
        2
    );
    assert_eq!(
        *router
            .route_request(&Method::PUT, "/misc/a/b", None)
            .ok()
            .unwrap()
            .route,
        3
    );
}
