//! The compound routing input (spec §3) and its boundary to a concrete HTTP
//! request (spec §6b).
//!
//! `Request` plays the same role here that `EagerRequest` plays in
//! `other_examples`' teepee fragment — a plain struct with method, headers
//! and body fields, read eagerly rather than streamed — except every field
//! here is also a parse *target*: route parsers consume and clear pieces of
//! it rather than just reading it.

use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};

use crate::input::{Appendable, Consumable, Position};

/// The compound input that request-slice parsers project onto and consume
/// from (spec §3).
///
/// Order within `path`/`query`/`headers` is preserved; `query`/`headers`
/// entries are looked up by name but kept as an ordered list rather than a
/// map, since printing needs to reproduce an ordering and duplicate names
/// are legal in both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// Absent means "the caller didn't specify a method"; [`crate::route::Method`]
    /// treats this as `GET` when reading, per spec §4.4.
    pub method: Option<String>,
    /// Path segments, in order, with no leading/trailing empty segments.
    pub path: Vec<String>,
    /// `(name, value)` pairs, in order.
    pub query: Vec<(String, String)>,
    /// `(name, value)` pairs, in order, names compared case-insensitively
    /// but stored as received.
    pub headers: Vec<(String, String)>,
    /// Raw body bytes, unmodified.
    pub body: Vec<u8>,
}

impl Request {
    /// An all-empty `Request`, equal to [`Appendable::identity`].
    pub fn new() -> Self {
        Request::default()
    }
}

/// `Request` has no single "is this empty" reading that would make it
/// useful as a [`crate::input::Sliceable`] sequence — it's a handful of
/// independent slices, not one linear cursor — so it implements
/// [`Consumable`] (trivially: empty iff every field is) and [`Appendable`]
/// only, matching spec §3's "Request is Appendable... used only for printer
/// composition".
impl Consumable for Request {
    fn is_empty(&self) -> bool {
        self.method.is_none()
            && self.path.is_empty()
            && self.query.is_empty()
            && self.headers.is_empty()
            && self.body.is_empty()
    }
}

impl Appendable for Request {
    fn identity() -> Self {
        Request::default()
    }

    /// Left-biased on `method` (first non-absent of `self`, `other` wins);
    /// list concatenation, `self` first, everywhere else (spec §3, §9's
    /// "Request Appendable with left-biased method" design note).
    fn append(self, other: Self) -> Self {
        let mut path = self.path;
        path.extend(other.path);
        let mut query = self.query;
        query.extend(other.query);
        let mut headers = self.headers;
        headers.extend(other.headers);
        let mut body = self.body;
        body.extend(other.body);

        Request {
            method: self.method.or(other.method),
            path,
            query,
            headers,
            body,
        }
    }
}

/// `Request` has no linear cursor to measure a consumed prefix of, so it
/// never contributes to a propagated error's position — see [`Position`].
impl Position for Request {
    fn consumed_len(_before: &Self, _after: &Self) -> usize {
        0
    }
}

/// A minimal concrete HTTP request, the collaborator-defined boundary type
/// spec §6b maps to/from [`Request`]. Integration adapters for a real HTTP
/// server would convert their own request type through this shape instead
/// of depending on it directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawHttpRequest {
    /// `None` when the caller did not specify a method.
    pub method: Option<String>,
    /// The request's URL path, e.g. `"/episodes/1"`.
    pub path: String,
    /// The raw (still percent-encoded) query string, without the leading `?`.
    pub query: String,
    /// `(name, value)` header pairs, as received.
    pub headers: Vec<(String, String)>,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl RawHttpRequest {
    /// Apply spec §6b's mapping rules to produce the [`Request`] the router
    /// operates over.
    pub fn into_request(self) -> Request {
        tracing::debug!(
            method = self.method.as_deref(),
            path = %self.path,
            query = %self.query,
            body_len = self.body.len(),
            "adapting raw HTTP request"
        );

        let path = self
            .path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| segment.to_string())
            .collect();

        let query = self
            .query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let mut parts = pair.splitn(2, '=');
                let name = parts.next().unwrap_or("");
                let value = parts.next().unwrap_or("");
                (percent_decode(name), percent_decode(value))
            })
            .collect();

        Request {
            method: self.method.map(|m| m.to_ascii_uppercase()),
            path,
            query,
            headers: self.headers,
            body: self.body,
        }
    }
}

fn percent_decode(s: &str) -> String {
    match percent_encoding::percent_decode_str(s).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => {
            tracing::warn!(raw = s, "percent-decoded component is not valid UTF-8, using lossy fallback");
            percent_encoding::percent_decode_str(s).decode_utf8_lossy().into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_all_empty() {
        let r = Request::identity();
        assert!(r.is_empty());
    }

    #[test]
    fn append_is_left_biased_on_method() {
        let a = Request { method: Some("GET".to_string()), ..Request::new() };
        let b = Request { method: Some("POST".to_string()), ..Request::new() };
        assert_eq!(a.clone().append(b.clone()).method, Some("GET".to_string()));
        assert_eq!(Request::new().append(b).method, Some("POST".to_string()));
    }

    #[test]
    fn append_concatenates_lists_self_first() {
        let a = Request { path: vec!["a".to_string()], ..Request::new() };
        let b = Request { path: vec!["b".to_string()], ..Request::new() };
        assert_eq!(a.append(b).path, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn raw_request_splits_path_on_slash_dropping_empties() {
        let raw = RawHttpRequest { path: "/episodes/1/".to_string(), ..Default::default() };
        assert_eq!(
            raw.into_request().path,
            vec!["episodes".to_string(), "1".to_string()]
        );
    }

    #[test]
    fn raw_request_decodes_query_and_defaults_missing_value_to_empty() {
        let raw = RawHttpRequest {
            query: "q=point%20free&ga".to_string(),
            ..Default::default()
        };
        let req = raw.into_request();
        assert_eq!(req.query, vec![
            ("q".to_string(), "point free".to_string()),
            ("ga".to_string(), "".to_string()),
        ]);
    }

    #[test]
    fn raw_request_uppercases_method() {
        let raw = RawHttpRequest { method: Some("get".to_string()), ..Default::default() };
        assert_eq!(raw.into_request().method, Some("GET".to_string()));
    }

    #[test]
    fn raw_request_absent_method_stays_none() {
        let raw = RawHttpRequest::default();
        assert_eq!(raw.into_request().method, None);
    }
}
