use courier_router::normalize;

use proptest::prelude::*;

#[test]
fn normalize_cases() {
    let cases: &[(&str, &str)] = &[
        ("/", "/"),
        ("/a/b/c", "/a/b/c"),
        ("/%41", "/A"),
        ("/a%7eb", "/a~b"),
        ("/a%2fb", "/a%2Fb"),
        ("/a%2Fb%3f", "/a%2Fb%3F"),
        ("/a%zz", "/a%zz"),
        ("/a/./b", "/a/b"),
        ("/a/../b", "/b"),
        ("/a/b/..", "/a/"),
        ("/a/.", "/a/"),
        ("/./a", "/a"),
        ("/../a", "/a"),
        ("/%2E%2E/a", "/a"),
        ("/home/.bashrc", "/home/.bashrc"),
    ];

    for &(input, expected) in cases {
        assert_eq!(normalize(input), expected, "input = {:?}", input);
    }
}

#[test]
fn normalized_path_then_route() {
    use courier_router::{RouteConfig, Router};

    let mut router: Router<usize> = Router::new();
    router.add(RouteConfig::new("GET", "/docs/{name}"), 1);

    let path = normalize("/docs/./guide%7E1");
    let found = router.route("GET", &path, None).ok().unwrap();
    assert_eq!(*found.route, 1);
    assert_eq!(found.params.get("name"), Some("guide~1"));
}

proptest! {
    #[test]
    fn normalize_is_idempotent(path in "(/[a-zA-Z0-9.%~-]{0,6}){0,5}") {
        let once = normalize(&path).into_owned();
        let twice = normalize(&once).into_owned();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalize_is_idempotent_for_arbitrary_ascii(path in "[ -~]{0,24}") {
        let once = normalize(&path).into_owned();
        let twice = normalize(&once).into_owned();
        prop_assert_eq!(once, twice);
    }
}
