//! Request-slice parsers (spec §4.4): one combinator per field of
//! [`Request`], each projecting the compound input onto its own slice and
//! clearing that slice on success. Failure in one never disturbs the
//! others (spec §4.4's "observable side effects are confined to the
//! projected slice").

use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};

use crate::{
    core::{Parser, Printer},
    error::{ParseError, ParseErrorKind, PrintError},
    input::Appendable,
    request::Request,
};

/// Matches the request's method against `name`, case-insensitively,
/// defaulting an absent method to `GET` (spec §4.4, §4.5). On success, the
/// method field is cleared so a later `Method` parser can't re-match it.
///
/// ### Example
/// ```
/// use viaduct::core::{print, Parser};
/// use viaduct::request::Request;
/// use viaduct::route::Method;
///
/// let p = Method::new("GET");
/// let mut req = Request::new();
/// assert_eq!(p.parse(&mut req), Ok(()));
/// assert_eq!(req.method, None, "method is consumed on a successful match");
///
/// let printed = print(&p, ()).unwrap();
/// assert_eq!(printed.method.as_deref(), Some("GET"));
/// ```
#[derive(Debug, Clone)]
pub struct Method {
    name: String,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Method { name: name.into() }
    }
}

impl Parser for Method {
    type Input = Request;
    type Output = ();

    fn parse(&self, input: &mut Request) -> Result<(), ParseError> {
        let current = input.method.as_deref().unwrap_or("GET");
        if current.eq_ignore_ascii_case(&self.name) {
            input.method = None;
            Ok(())
        } else {
            Err(ParseError::new(
                ParseErrorKind::UnexpectedInput,
                self.name.clone(),
                0,
            ))
        }
    }
}

impl Printer for Method {
    fn print(&self, _output: ()) -> Result<Request, PrintError> {
        Ok(Request { method: Some(self.name.clone()), ..Request::identity() })
    }
}

/// Runs `p` over the first path segment, requiring it consume the segment
/// in full; on success the segment is removed from `path` (spec §4.4,
/// §9's open question on segment splitting: the core never itself splits a
/// segment further).
///
/// ### Example
/// ```
/// use viaduct::core::Parser;
/// use viaduct::request::Request;
/// use viaduct::route::PathComponent;
/// use viaduct::parsers::UInteger;
///
/// let p = PathComponent::new(UInteger::<String, u32>::new());
/// let mut req = Request { path: vec!["1".to_string()], ..Request::new() };
/// let out = p.parse(&mut req).unwrap();
/// assert_eq!(out, 1u32);
/// assert!(req.path.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct PathComponent<P> {
    inner: P,
}

impl<P> PathComponent<P> {
    pub fn new(inner: P) -> Self {
        PathComponent { inner }
    }
}

impl<P> Parser for PathComponent<P>
where
    P: Parser<Input = String>,
{
    type Input = Request;
    type Output = P::Output;

    fn parse(&self, input: &mut Request) -> Result<P::Output, ParseError> {
        let Some(first) = input.path.first().cloned() else {
            return Err(ParseError::new(
                ParseErrorKind::EmptyInput,
                "a path segment",
                0,
            ));
        };
        let original_len = first.len();
        let mut segment = first;
        let out = self.inner.parse(&mut segment)?;
        if !segment.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedInput,
                "the entire path segment",
                original_len - segment.len(),
            ));
        }
        input.path.remove(0);
        Ok(out)
    }
}

impl<P> Printer for PathComponent<P>
where
    P: Printer<Input = String>,
{
    fn print(&self, output: P::Output) -> Result<Request, PrintError> {
        let segment = self.inner.print(output)?;
        let path = if segment.is_empty() { vec![] } else { vec![segment] };
        Ok(Request { path, ..Request::identity() })
    }
}

/// Succeeds, consuming nothing, iff `path` is empty (spec §4.4).
///
/// ### Example
/// ```
/// use viaduct::core::{print, Parser};
/// use viaduct::request::Request;
/// use viaduct::route::PathEnd;
///
/// assert!(PathEnd.parse(&mut Request::new()).is_ok());
/// let mut with_path = Request { path: vec!["x".to_string()], ..Request::new() };
/// assert!(PathEnd.parse(&mut with_path).is_err());
/// assert_eq!(print(&PathEnd, ()).unwrap(), Request::new());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PathEnd;

impl Parser for PathEnd {
    type Input = Request;
    type Output = ();

    fn parse(&self, input: &mut Request) -> Result<(), ParseError> {
        if input.path.is_empty() {
            Ok(())
        } else {
            Err(ParseError::new(ParseErrorKind::UnexpectedInput, "end of path", 0))
        }
    }
}

impl Printer for PathEnd {
    fn print(&self, _output: ()) -> Result<Request, PrintError> {
        Ok(Request::identity())
    }
}

/// Runs `p` over the value of the first `query` entry named `name`,
/// requiring it consume the value in full; on success that entry is
/// removed (spec §4.4).
///
/// ### Example
/// ```
/// use viaduct::core::Parser;
/// use viaduct::request::Request;
/// use viaduct::route::QueryItem;
/// use viaduct::parsers::UInteger;
///
/// let p = QueryItem::new("limit", UInteger::<String, u32>::new());
/// let mut req = Request { query: vec![("limit".to_string(), "10".to_string())], ..Request::new() };
/// assert_eq!(p.parse(&mut req).unwrap(), 10u32);
/// assert!(req.query.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct QueryItem<P> {
    name: String,
    inner: P,
}

impl<P> QueryItem<P> {
    pub fn new(name: impl Into<String>, inner: P) -> Self {
        QueryItem { name: name.into(), inner }
    }
}

impl<P> Parser for QueryItem<P>
where
    P: Parser<Input = String>,
{
    type Input = Request;
    type Output = P::Output;

    fn parse(&self, input: &mut Request) -> Result<P::Output, ParseError> {
        let Some(position) = input.query.iter().position(|(name, _)| *name == self.name) else {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedInput,
                self.name.clone(),
                0,
            ));
        };
        let mut value = input.query[position].1.clone();
        let original_len = value.len();
        let out = self.inner.parse(&mut value)?;
        if !value.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedInput,
                "the entire query value",
                original_len - value.len(),
            ));
        }
        input.query.remove(position);
        Ok(out)
    }
}

impl<P> Printer for QueryItem<P>
where
    P: Printer<Input = String>,
{
    fn print(&self, output: P::Output) -> Result<Request, PrintError> {
        let value = self.inner.print(output)?;
        Ok(Request {
            query: vec![(self.name.clone(), value)],
            ..Request::identity()
        })
    }
}

/// Runs `p` over the entire body buffer, requiring it consume all of it;
/// on success the body is emptied (spec §4.4).
///
/// ### Example
/// ```
/// use viaduct::core::Parser;
/// use viaduct::request::Request;
/// use viaduct::route::Body;
/// use viaduct::parsers::Rest;
///
/// let p = Body::new(Rest::<Vec<u8>>::new());
/// let mut req = Request { body: b"hello".to_vec(), ..Request::new() };
/// assert_eq!(p.parse(&mut req).unwrap(), b"hello".to_vec());
/// assert!(req.body.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Body<P> {
    inner: P,
}

impl<P> Body<P> {
    pub fn new(inner: P) -> Self {
        Body { inner }
    }
}

impl<P> Parser for Body<P>
where
    P: Parser<Input = Vec<u8>>,
{
    type Input = Request;
    type Output = P::Output;

    fn parse(&self, input: &mut Request) -> Result<P::Output, ParseError> {
        let mut body = input.body.clone();
        let original_len = body.len();
        let out = self.inner.parse(&mut body)?;
        if !body.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedInput,
                "the entire body",
                original_len - body.len(),
            ));
        }
        input.body.clear();
        Ok(out)
    }
}

impl<P> Printer for Body<P>
where
    P: Printer<Input = Vec<u8>>,
{
    fn print(&self, output: P::Output) -> Result<Request, PrintError> {
        let body = self.inner.print(output)?;
        Ok(Request { body, ..Request::identity() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::print;
    use crate::parsers::{Rest, StartsWith, UInteger};

    #[test]
    fn method_defaults_absent_to_get() {
        let p = Method::new("GET");
        let mut req = Request::new();
        assert!(p.parse(&mut req).is_ok());
    }

    #[test]
    fn method_matches_case_insensitively_and_consumes() {
        let p = Method::new("GET");
        let mut req = Request { method: Some("get".to_string()), ..Request::new() };
        assert!(p.parse(&mut req).is_ok());
        assert_eq!(req.method, None);
    }

    #[test]
    fn method_rolls_back_on_mismatch() {
        let p = Method::new("POST");
        let mut req = Request { method: Some("GET".to_string()), ..Request::new() };
        let snapshot = req.clone();
        assert!(p.parse(&mut req).is_err());
        assert_eq!(req, snapshot);
    }

    #[test]
    fn path_component_requires_full_segment_consumption() {
        let p = PathComponent::new(StartsWith::new("ep".to_string()));
        let mut req = Request { path: vec!["episodes".to_string()], ..Request::new() };
        assert!(p.parse(&mut req).is_err());
        assert_eq!(req.path, vec!["episodes".to_string()], "roll-back invariant violated");
    }

    #[test]
    fn path_end_succeeds_only_when_empty() {
        assert!(PathEnd.parse(&mut Request::new()).is_ok());
        let mut with_path = Request { path: vec!["x".to_string()], ..Request::new() };
        assert!(PathEnd.parse(&mut with_path).is_err());
    }

    #[test]
    fn query_item_removes_first_match_only() {
        let p = QueryItem::new("q", Rest::<String>::new());
        let mut req = Request {
            query: vec![
                ("q".to_string(), "a".to_string()),
                ("q".to_string(), "b".to_string()),
            ],
            ..Request::new()
        };
        assert_eq!(p.parse(&mut req).unwrap(), "a");
        assert_eq!(req.query, vec![("q".to_string(), "b".to_string())]);
    }

    #[test]
    fn query_item_round_trips() {
        let p = QueryItem::new("limit", UInteger::<String, u32>::new());
        let printed = print(&p, 10u32).unwrap();
        assert_eq!(printed.query, vec![("limit".to_string(), "10".to_string())]);
        let mut cursor = printed;
        assert_eq!(p.parse(&mut cursor).unwrap(), 10u32);
    }

    #[test]
    fn body_requires_full_consumption_and_clears_on_success() {
        let p = Body::new(Rest::<Vec<u8>>::new());
        let mut req = Request { body: b"hi".to_vec(), ..Request::new() };
        assert_eq!(p.parse(&mut req).unwrap(), b"hi".to_vec());
        assert!(req.body.is_empty());
    }
}
