//! Structural combinators (spec §4.3): `skip`, `take`, `map`, `convert`,
//! `or_else`, `optional`, and the [`ParserExt`] extension trait that makes
//! them read as method chains.
//!
//! Mirrors the teacher's `combinators.rs` in spirit (free function per
//! combinator, doc comment with a runnable example, an extension trait as
//! the ergonomic front door) but re-hosts each combinator as a named
//! struct so it can carry a conditional [`Printer`] impl alongside its
//! [`Parser`] impl (see DESIGN.md).

use core::marker::PhantomData;

use crate::{
    core::{Conversion, Parser, Printer},
    error::ParseError,
    input::{Appendable, Position},
};

/// `p.skip(q)`: parse `p` then `q` in sequence, keep `p`'s output, discard
/// `q`'s.
///
/// Printer concatenates `p.print(out)` and `q.print(())`, `p` first, via
/// [`Appendable::append`].
///
/// ### Example
/// ```
/// use viaduct::core::{parse, print};
/// use viaduct::combinators::ParserExt;
/// use viaduct::parsers::StartsWith;
///
/// let p = StartsWith::new("GET ".to_string()).skip(StartsWith::new(";".to_string()));
/// let input = "GET ;".to_string();
/// assert_eq!(parse(&p, input).unwrap().0, ());
/// assert_eq!(print(&p, ()).unwrap(), "GET ;");
/// ```
#[derive(Debug, Clone)]
pub struct Skip<P, Q> {
    p: P,
    q: Q,
}

impl<P, Q> Skip<P, Q> {
    pub fn new(p: P, q: Q) -> Self {
        Skip { p, q }
    }
}

impl<P, Q> Parser for Skip<P, Q>
where
    P: Parser,
    Q: Parser<Input = P::Input>,
    P::Input: Position + Clone,
{
    type Input = P::Input;
    type Output = P::Output;

    fn parse(&self, input: &mut Self::Input) -> Result<Self::Output, ParseError> {
        let snapshot = input.clone();
        match self.p.parse(input) {
            Ok(out) => {
                let after_p = input.clone();
                match self.q.parse(input) {
                    Ok(_) => Ok(out),
                    Err(mut e) => {
                        e.at += Position::consumed_len(&snapshot, &after_p);
                        *input = snapshot;
                        Err(e)
                    }
                }
            }
            Err(e) => {
                *input = snapshot;
                Err(e)
            }
        }
    }
}

impl<P, Q> Printer for Skip<P, Q>
where
    P: Printer,
    Q: Printer<Input = P::Input, Output = ()>,
    P::Input: Clone + Appendable,
{
    fn print(&self, output: Self::Output) -> Result<Self::Input, crate::error::PrintError> {
        let a = self.p.print(output)?;
        let b = self.q.print(())?;
        Ok(a.append(b))
    }
}

/// `p.take(q)`: parse `p` then `q` in sequence, keeping both outputs as a
/// pair. Chain further `take`/`skip`/`right` calls for wider sequences;
/// spec §4.3's pair-flattening rule ("`()`-typed elements are skipped, all
/// others take") is realized by picking `skip`/`take`/[`right`](Right) per
/// element rather than by a generated N-ary tuple.
///
/// ### Example
/// ```
/// use viaduct::core::{parse, print};
/// use viaduct::combinators::ParserExt;
/// use viaduct::parsers::{Item, Rest};
///
/// let p = Item::<String>::new().take(Rest::<String>::new());
/// let (out, rest) = parse(&p, "abc".to_string()).unwrap();
/// assert_eq!(out, ('a', "bc".to_string()));
/// assert_eq!(rest, "");
/// ```
#[derive(Debug, Clone)]
pub struct Take<P, Q> {
    p: P,
    q: Q,
}

impl<P, Q> Take<P, Q> {
    pub fn new(p: P, q: Q) -> Self {
        Take { p, q }
    }
}

impl<P, Q> Parser for Take<P, Q>
where
    P: Parser,
    Q: Parser<Input = P::Input>,
    P::Input: Position + Clone,
{
    type Input = P::Input;
    type Output = (P::Output, Q::Output);

    fn parse(&self, input: &mut Self::Input) -> Result<Self::Output, ParseError> {
        let snapshot = input.clone();
        match self.p.parse(input) {
            Ok(a) => {
                let after_p = input.clone();
                match self.q.parse(input) {
                    Ok(b) => Ok((a, b)),
                    Err(mut e) => {
                        e.at += Position::consumed_len(&snapshot, &after_p);
                        *input = snapshot;
                        Err(e)
                    }
                }
            }
            Err(e) => {
                *input = snapshot;
                Err(e)
            }
        }
    }
}

impl<P, Q> Printer for Take<P, Q>
where
    P: Printer,
    Q: Printer<Input = P::Input>,
    P::Input: Clone + Appendable,
{
    fn print(&self, output: Self::Output) -> Result<Self::Input, crate::error::PrintError> {
        let (a, b) = output;
        let pa = self.p.print(a)?;
        let pb = self.q.print(b)?;
        Ok(pa.append(pb))
    }
}

/// `p.right(q)`: parse `p` then `q` in sequence, discard `p`'s output, keep
/// `q`'s. The mirror image of [`Skip`] — grounded on the teacher's `right`
/// combinator, which keeps the second parser's result and drops the first's.
///
/// Printer needs `P::Output: Default` to reconstruct a value to feed `p`'s
/// printer, since printing `q`'s output alone carries no information about
/// what `p` produced; this is sound for the projections this crate actually
/// builds with `right` (each discarded side is `()`, whose only value is
/// its own default).
///
/// ### Example
/// ```
/// use viaduct::core::{parse, print};
/// use viaduct::combinators::ParserExt;
/// use viaduct::parsers::{StartsWith, UInteger};
///
/// let p = StartsWith::new("id=".to_string()).right(UInteger::<String, u32>::new());
/// assert_eq!(parse(&p, "id=9".to_string()).unwrap().0, 9u32);
/// assert_eq!(print(&p, 9u32).unwrap(), "id=9");
/// ```
#[derive(Debug, Clone)]
pub struct Right<P, Q> {
    p: P,
    q: Q,
}

impl<P, Q> Right<P, Q> {
    pub fn new(p: P, q: Q) -> Self {
        Right { p, q }
    }
}

impl<P, Q> Parser for Right<P, Q>
where
    P: Parser,
    Q: Parser<Input = P::Input>,
    P::Input: Position + Clone,
{
    type Input = P::Input;
    type Output = Q::Output;

    fn parse(&self, input: &mut Self::Input) -> Result<Self::Output, ParseError> {
        let snapshot = input.clone();
        match self.p.parse(input) {
            Ok(_) => {
                let after_p = input.clone();
                match self.q.parse(input) {
                    Ok(out) => Ok(out),
                    Err(mut e) => {
                        e.at += Position::consumed_len(&snapshot, &after_p);
                        *input = snapshot;
                        Err(e)
                    }
                }
            }
            Err(e) => {
                *input = snapshot;
                Err(e)
            }
        }
    }
}

impl<P, Q> Printer for Right<P, Q>
where
    P: Printer,
    P::Output: Default,
    Q: Printer<Input = P::Input>,
    P::Input: Clone + Appendable,
{
    fn print(&self, output: Self::Output) -> Result<Self::Input, crate::error::PrintError> {
        let a = self.p.print(P::Output::default())?;
        let b = self.q.print(output)?;
        Ok(a.append(b))
    }
}

/// `p.map(f)`: transform `p`'s output with a one-way function `f`.
///
/// Parser-only: `f` has no inverse, so `Map` never implements [`Printer`].
/// Use [`Convert`] when `f` is an isomorphism and a printer is needed (spec
/// §4.3).
#[derive(Clone)]
pub struct Map<P, F, O2> {
    p: P,
    f: F,
    _marker: PhantomData<fn() -> O2>,
}

impl<P, F, O2> Map<P, F, O2> {
    pub fn new(p: P, f: F) -> Self {
        Map { p, f, _marker: PhantomData }
    }
}

impl<P, F, O2> Parser for Map<P, F, O2>
where
    P: Parser,
    F: Fn(P::Output) -> O2,
{
    type Input = P::Input;
    type Output = O2;

    fn parse(&self, input: &mut Self::Input) -> Result<O2, ParseError> {
        self.p.parse(input).map(&self.f)
    }
}

/// `p.convert(c)`: transform `p`'s output through an isomorphism `c`
/// ([`Conversion`]), staying printable.
///
/// ### Example
/// ```
/// use viaduct::core::{parse, print, Conversion};
/// use viaduct::combinators::ParserExt;
/// use viaduct::parsers::UInteger;
///
/// struct EvenDoubled;
/// impl Conversion<u32, u32> for EvenDoubled {
///     fn apply(&self, a: u32) -> u32 { a * 2 }
///     fn unapply(&self, b: u32) -> u32 { b / 2 }
/// }
///
/// let p = UInteger::<String, u32>::new().convert(EvenDoubled);
/// assert_eq!(parse(&p, "21".to_string()).unwrap().0, 42);
/// assert_eq!(print(&p, 42).unwrap(), "21");
/// ```
#[derive(Clone)]
pub struct Convert<P, C, O2> {
    p: P,
    c: C,
    _marker: PhantomData<fn() -> O2>,
}

impl<P, C, O2> Convert<P, C, O2> {
    pub fn new(p: P, c: C) -> Self {
        Convert { p, c, _marker: PhantomData }
    }
}

impl<P, C, O2> Parser for Convert<P, C, O2>
where
    P: Parser,
    C: Conversion<P::Output, O2>,
{
    type Input = P::Input;
    type Output = O2;

    fn parse(&self, input: &mut Self::Input) -> Result<O2, ParseError> {
        self.p.parse(input).map(|a| self.c.apply(a))
    }
}

impl<P, C, O2> Printer for Convert<P, C, O2>
where
    P: Printer,
    C: Conversion<P::Output, O2>,
{
    fn print(&self, output: O2) -> Result<Self::Input, crate::error::PrintError> {
        self.p.print(self.c.unapply(output))
    }
}

/// `p.or_else(q)`: try `p`; if it fails (input rolled back), try `q`. Both
/// must share an `Output` type.
///
/// Printer tries `p.print(out)` first, re-parses the result, and falls
/// through to `q.print(out)` unless that re-parse yields `out` back (spec
/// §4.3, §7) — the only combinator whose printer needs its own `parse`
/// capability.
///
/// ### Example
/// ```
/// use viaduct::core::parse;
/// use viaduct::combinators::ParserExt;
/// use viaduct::parsers::StartsWith;
///
/// let p = StartsWith::new("GET".to_string()).or_else(StartsWith::new("POST".to_string()));
/// assert_eq!(parse(&p, "POST /x".to_string()).unwrap().1, " /x");
/// ```
#[derive(Debug, Clone)]
pub struct OrElse<P, Q> {
    p: P,
    q: Q,
}

impl<P, Q> OrElse<P, Q> {
    pub fn new(p: P, q: Q) -> Self {
        OrElse { p, q }
    }
}

impl<P, Q> Parser for OrElse<P, Q>
where
    P: Parser,
    Q: Parser<Input = P::Input, Output = P::Output>,
    P::Input: Clone,
{
    type Input = P::Input;
    type Output = P::Output;

    fn parse(&self, input: &mut Self::Input) -> Result<Self::Output, ParseError> {
        let snapshot = input.clone();
        match self.p.parse(input) {
            Ok(out) => Ok(out),
            Err(_) => {
                *input = snapshot;
                self.q.parse(input)
            }
        }
    }
}

impl<P, Q> Printer for OrElse<P, Q>
where
    P: Printer,
    Q: Printer<Input = P::Input, Output = P::Output>,
    P::Output: Clone + PartialEq,
    P::Input: Clone,
{
    fn print(&self, output: Self::Output) -> Result<Self::Input, crate::error::PrintError> {
        if let Ok(candidate) = self.p.print(output.clone()) {
            let mut cursor = candidate.clone();
            let round_trips = self
                .p
                .parse(&mut cursor)
                .map(|reparsed| reparsed == output)
                .unwrap_or(false);
            if round_trips {
                return Ok(candidate);
            }
        }
        self.q.print(output)
    }
}

/// `Optional(p)`: attempts `p`; on failure, succeeds with `None` and leaves
/// the input untouched (never itself fails).
///
/// ### Example
/// ```
/// use viaduct::core::{parse, print};
/// use viaduct::combinators::Optional;
/// use viaduct::parsers::StartsWith;
///
/// let p = Optional::new(StartsWith::new("GET".to_string()));
/// assert_eq!(parse(&p, "GET /x".to_string()).unwrap().0, Some(()));
/// assert_eq!(parse(&p, "POST /x".to_string()).unwrap().0, None);
/// assert_eq!(print(&p, None).unwrap(), "");
/// ```
#[derive(Debug, Clone)]
pub struct Optional<P> {
    p: P,
}

impl<P> Optional<P> {
    pub fn new(p: P) -> Self {
        Optional { p }
    }
}

impl<P> Parser for Optional<P>
where
    P: Parser,
    P::Input: Clone,
{
    type Input = P::Input;
    type Output = Option<P::Output>;

    fn parse(&self, input: &mut Self::Input) -> Result<Self::Output, ParseError> {
        let snapshot = input.clone();
        match self.p.parse(input) {
            Ok(out) => Ok(Some(out)),
            Err(_) => {
                *input = snapshot;
                Ok(None)
            }
        }
    }
}

impl<P> Printer for Optional<P>
where
    P: Printer,
    P::Input: Appendable,
{
    fn print(&self, output: Self::Output) -> Result<Self::Input, crate::error::PrintError> {
        match output {
            Some(x) => self.p.print(x),
            None => Ok(P::Input::identity()),
        }
    }
}

/// Method-chain front door over the free-standing combinator structs,
/// mirroring the teacher's `ParserExt`.
pub trait ParserExt: Parser + Sized {
    /// See [`Skip`].
    fn skip<Q>(self, q: Q) -> Skip<Self, Q>
    where
        Q: Parser<Input = Self::Input>,
    {
        Skip::new(self, q)
    }

    /// See [`Take`].
    fn take<Q>(self, q: Q) -> Take<Self, Q>
    where
        Q: Parser<Input = Self::Input>,
    {
        Take::new(self, q)
    }

    /// See [`Right`].
    fn right<Q>(self, q: Q) -> Right<Self, Q>
    where
        Q: Parser<Input = Self::Input>,
    {
        Right::new(self, q)
    }

    /// See [`Map`].
    fn map<F, O2>(self, f: F) -> Map<Self, F, O2>
    where
        F: Fn(Self::Output) -> O2,
    {
        Map::new(self, f)
    }

    /// See [`Convert`].
    fn convert<C, O2>(self, c: C) -> Convert<Self, C, O2>
    where
        C: Conversion<Self::Output, O2>,
    {
        Convert::new(self, c)
    }

    /// See [`OrElse`].
    fn or_else<Q>(self, q: Q) -> OrElse<Self, Q>
    where
        Q: Parser<Input = Self::Input, Output = Self::Output>,
    {
        OrElse::new(self, q)
    }

    /// See [`Optional`].
    fn optional(self) -> Optional<Self> {
        Optional::new(self)
    }
}

impl<P: Parser> ParserExt for P {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{parse, print};
    use crate::parsers::{Item, Rest, StartsWith, UInteger};

    #[cfg(feature = "alloc")]
    use alloc::string::ToString;

    #[test]
    fn skip_keeps_first_output_and_rolls_back() {
        let p = StartsWith::new("a".to_string()).skip(StartsWith::new("b".to_string()));
        let input = "ac".to_string();
        let mut cursor = input.clone();
        assert!(p.parse(&mut cursor).is_err());
        assert_eq!(cursor, input);
        assert_eq!(print(&p, ()).unwrap(), "ab");
    }

    #[test]
    fn take_pairs_outputs() {
        let p = Item::<String>::new().take(Rest::<String>::new());
        let (out, rest) = parse(&p, "abc".to_string()).unwrap();
        assert_eq!(out, ('a', "bc".to_string()));
        assert_eq!(rest, "");
    }

    #[test]
    fn take_round_trips() {
        let p = Item::<String>::new().take(Rest::<String>::new());
        let printed = print(&p, ('a', "bc".to_string())).unwrap();
        assert_eq!(printed, "abc");
    }

    #[test]
    fn or_else_tries_second_branch_on_first_failure() {
        let p = StartsWith::new("GET".to_string()).or_else(StartsWith::new("POST".to_string()));
        let (out, rest) = parse(&p, "POST /x".to_string()).unwrap();
        assert_eq!(out, ());
        assert_eq!(rest, " /x");
    }

    #[test]
    fn or_else_prints_first_branch_when_it_round_trips() {
        let p = StartsWith::new("GET".to_string()).or_else(StartsWith::new("POST".to_string()));
        assert_eq!(print(&p, ()).unwrap(), "GET");
    }

    #[test]
    fn optional_never_fails_and_prints_identity_for_none() {
        let p = Optional::new(UInteger::<String, u32>::new());
        assert_eq!(parse(&p, "abc".to_string()).unwrap().0, None);
        assert_eq!(parse(&p, "12abc".to_string()).unwrap().0, Some(12));
        assert_eq!(print(&p, None).unwrap(), "");
        assert_eq!(print(&p, Some(12)).unwrap(), "12");
    }

    #[test]
    fn map_is_parser_only() {
        let p = UInteger::<String, u32>::new().map(|n| n + 1);
        assert_eq!(parse(&p, "9".to_string()).unwrap().0, 10);
    }
}
