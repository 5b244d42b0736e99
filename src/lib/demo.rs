//! The example router spec §8 exercises: a `Route` enum, a `User` body
//! shape, a JSON leaf parser, and the `router()` combinator tree that ties
//! the request-slice parsers in [`crate::route`] together.
//!
//! This module is the collaborator-defined "example route set" spec §1
//! calls out of scope for the core algebra; it exists to give the core
//! something concrete to compose and to host the end-to-end scenarios.

use core::marker::PhantomData;

use alloc::{string::String, vec::Vec};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    combinators::ParserExt,
    core::{Conversion, Parser, Printer},
    error::{ParseError, ParseErrorKind, PrintError, PrintErrorKind},
    parsers::{Rest, StartsWith, UInteger},
    request::Request,
    route::{Body, Method, PathComponent, PathEnd, QueryItem},
};

/// The five example routes from spec §8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Episodes { limit: Option<u32>, offset: Option<u32> },
    Episode(u32),
    Search(String),
    SignUp(User),
}

/// The sign-up request body, deserialized from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub password: String,
}

/// Deserializes/serializes a single concrete JSON value to and from a raw
/// byte body. Grounded on the same "one leaf per concrete value shape" idea
/// as the other primitive leaves, with `serde_json` standing in for the
/// teacher's generic `JsonValue` tree since the target here is one known
/// struct (spec §6's example, `User`) rather than an arbitrary document.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(PhantomData<T>);

impl<T> Json<T> {
    pub fn new() -> Self {
        Json(PhantomData)
    }
}

impl<T: DeserializeOwned> Parser for Json<T> {
    type Input = Vec<u8>;
    type Output = T;

    fn parse(&self, input: &mut Vec<u8>) -> Result<T, ParseError> {
        let value = serde_json::from_slice(input.as_slice()).map_err(|e| {
            // serde_json reports line/column, not a raw byte offset; column
            // is a reasonable stand-in for the single-line bodies this
            // leaf is meant for.
            ParseError::new(ParseErrorKind::UnexpectedInput, "a valid JSON body", e.column())
        })?;
        input.clear();
        Ok(value)
    }
}

impl<T: Serialize> Printer for Json<T> {
    fn print(&self, output: T) -> Result<Vec<u8>, PrintError> {
        serde_json::to_vec(&output).map_err(|_| PrintError::new(PrintErrorKind::UnprintableBranch))
    }
}

/// Case-path conversions, one per [`Route`] variant, matching spec §4.3's
/// "variant constructors/extractors are the canonical printer-safe
/// conversion". `unapply` only needs to be *correct* for its own variant;
/// for any other variant it returns an arbitrary value of the right shape,
/// trusting [`crate::combinators::OrElse`]'s round-trip check to reject the
/// mismatch and fall through to the next branch.
struct HomeCase;

impl Conversion<(), Route> for HomeCase {
    fn apply(&self, _a: ()) -> Route {
        Route::Home
    }

    fn unapply(&self, _b: Route) {}
}

struct EpisodeCase;

impl Conversion<u32, Route> for EpisodeCase {
    fn apply(&self, id: u32) -> Route {
        Route::Episode(id)
    }

    fn unapply(&self, route: Route) -> u32 {
        match route {
            Route::Episode(id) => id,
            _ => 0,
        }
    }
}

struct EpisodesCase;

impl Conversion<(Option<u32>, Option<u32>), Route> for EpisodesCase {
    fn apply(&self, (limit, offset): (Option<u32>, Option<u32>)) -> Route {
        Route::Episodes { limit, offset }
    }

    fn unapply(&self, route: Route) -> (Option<u32>, Option<u32>) {
        match route {
            Route::Episodes { limit, offset } => (limit, offset),
            _ => (None, None),
        }
    }
}

struct SearchCase;

impl Conversion<String, Route> for SearchCase {
    fn apply(&self, q: String) -> Route {
        Route::Search(q)
    }

    fn unapply(&self, route: Route) -> String {
        match route {
            Route::Search(q) => q,
            _ => String::new(),
        }
    }
}

struct SignUpCase;

impl Conversion<User, Route> for SignUpCase {
    fn apply(&self, user: User) -> Route {
        Route::SignUp(user)
    }

    fn unapply(&self, route: Route) -> User {
        match route {
            Route::SignUp(user) => user,
            _ => User::default(),
        }
    }
}

/// The example router: `home ∪ episodes ∪ episode ∪ search ∪ signUp` (spec
/// §8), as a single printable parser over [`Request`].
///
/// Each branch sequences its request-slice parsers with `right`/`skip`/
/// `take` so `()`-typed components never reach the branch's own `Output` —
/// spec §4.3's pair-flattening rule applied explicitly at each call site
/// rather than through a generated tuple type (see DESIGN.md).
pub fn router() -> impl Printer<Input = Request, Output = Route> {
    let home = Method::new("GET").skip(PathEnd).convert(HomeCase);

    let episode = Method::new("GET")
        .right(PathComponent::new(StartsWith::new(String::from("episodes"))))
        .right(PathComponent::new(UInteger::<String, u32>::new()))
        .skip(PathEnd)
        .convert(EpisodeCase);

    let episodes = Method::new("GET")
        .right(PathComponent::new(StartsWith::new(String::from("episodes"))))
        .right(PathEnd)
        .right(QueryItem::new("limit", UInteger::<String, u32>::new()).optional())
        .take(QueryItem::new("offset", UInteger::<String, u32>::new()).optional())
        .convert(EpisodesCase);

    let search = Method::new("GET")
        .right(PathComponent::new(StartsWith::new(String::from("search"))))
        .right(PathEnd)
        .right(QueryItem::new("q", Rest::<String>::new()))
        .convert(SearchCase);

    let sign_up = Method::new("POST")
        .right(PathComponent::new(StartsWith::new(String::from("sign-up"))))
        .right(PathEnd)
        .right(Body::new(Json::<User>::new()))
        .convert(SignUpCase);

    crate::route!(home, episode, episodes, search, sign_up)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RawHttpRequest;

    fn request(method: &str, path: &str, query: &str, body: &[u8]) -> Request {
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
    fn home_route() {
        let r = router();
        let mut req = request("GET", "/", "ga=1", b"");
        assert_eq!(r.parse(&mut req).unwrap(), Route::Home);
    }

    #[test]
    fn episode_route() {
        let r = router();
        let mut req = request("GET", "/episodes/1", "ga=1", b"");
        assert_eq!(r.parse(&mut req).unwrap(), Route::Episode(1));
    }

    #[test]
    fn episodes_route_with_limit() {
        let r = router();
        let mut req = request("GET", "/episodes", "limit=10", b"");
        assert_eq!(
            r.parse(&mut req).unwrap(),
            Route::Episodes { limit: Some(10), offset: None }
        );
    }

    #[test]
    fn episodes_route_with_no_params() {
        let r = router();
        let mut req = request("GET", "/episodes", "", b"");
        assert_eq!(
            r.parse(&mut req).unwrap(),
            Route::Episodes { limit: None, offset: None }
        );
    }

    #[test]
    fn search_route() {
        let r = router();
        let mut req = request("GET", "/search", "q=point%20free&ga=1", b"");
        assert_eq!(r.parse(&mut req).unwrap(), Route::Search("point free".into()));
    }

    #[test]
    fn sign_up_route() {
        let r = router();
        let mut req = request("POST", "/sign-up", "", br#"{"email":"a@b","password":"p"}"#);
        assert_eq!(
            r.parse(&mut req).unwrap(),
            Route::SignUp(User { email: "a@b".into(), password: "p".into() })
        );
    }

    #[test]
    fn search_with_empty_query_round_trips() {
        let r = router();
        let route = Route::Search(String::new());
        let printed = r.print(route.clone()).unwrap();
        let mut cursor = printed;
        assert_eq!(r.parse(&mut cursor).unwrap(), route);
    }

    #[test]
    fn episodes_with_equal_limit_and_offset_round_trips() {
        let r = router();
        let route = Route::Episodes { limit: Some(10), offset: Some(10) };
        let printed = r.print(route.clone()).unwrap();
        let mut cursor = printed;
        assert_eq!(r.parse(&mut cursor).unwrap(), route);
    }
}
