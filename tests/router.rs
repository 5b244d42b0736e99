//! Black-box coverage of the example router's eight end-to-end scenarios,
//! exercised the way a consumer of the library would: through the public
//! `viaduct::demo` API only.

#![cfg(feature = "demo")]

use viaduct::demo::{router, Route, User};
use viaduct::request::RawHttpRequest;
use viaduct::{Parser, Printer};

fn request(method: &str, path: &str, query: &str, body: &[u8]) -> viaduct::request::Request {
    RawHttpRequest {
        method: Some(method.into()),
        path: path.into(),
        query: query.into(),
        headers: Vec::new(),
        body: body.to_vec(),
    }
    .into_request()
}

#[test]
fn resolves_home() {
    let mut req = request("GET", "/", "ga=1", b"");
    assert_eq!(router().parse(&mut req).unwrap(), Route::Home);
}

#[test]
fn resolves_episode_by_id() {
    let mut req = request("GET", "/episodes/1", "", b"");
    assert_eq!(router().parse(&mut req).unwrap(), Route::Episode(1));
}

#[test]
fn resolves_episodes_with_paging_params() {
    let mut req = request("GET", "/episodes", "limit=10&offset=20", b"");
    assert_eq!(
        router().parse(&mut req).unwrap(),
        Route::Episodes { limit: Some(10), offset: Some(20) }
    );
}

#[test]
fn resolves_episodes_with_no_paging_params() {
    let mut req = request("GET", "/episodes", "", b"");
    assert_eq!(
        router().parse(&mut req).unwrap(),
        Route::Episodes { limit: None, offset: None }
    );
}

#[test]
fn resolves_search_with_decoded_query() {
    let mut req = request("GET", "/search", "q=point%20free", b"");
    assert_eq!(router().parse(&mut req).unwrap(), Route::Search("point free".into()));
}

#[test]
fn resolves_sign_up_from_json_body() {
    let mut req = request("POST", "/sign-up", "", br#"{"email":"a@b","password":"p"}"#);
    assert_eq!(
        router().parse(&mut req).unwrap(),
        Route::SignUp(User { email: "a@b".into(), password: "p".into() })
    );
}

#[test]
fn unmatched_request_fails_every_branch() {
    let mut req = request("DELETE", "/episodes/1", "", b"");
    assert!(router().parse(&mut req).is_err());
}

#[test]
fn every_route_round_trips_through_print_then_parse() {
    let r = router();
    let routes = [
        Route::Home,
        Route::Episode(7),
        Route::Episodes { limit: Some(5), offset: None },
        Route::Search("rust".into()),
        Route::SignUp(User { email: "x@y".into(), password: "z".into() }),
    ];
    for route in routes {
        let mut printed = r.print(route.clone()).unwrap();
        assert_eq!(r.parse(&mut printed).unwrap(), route);
    }
}
