//! The `Parser`/`Printer` contract (spec §4.1) and the `Conversion`
//! capability that lets `map` stay printable (spec §4.3, §6c, §9).

use crate::error::{ParseError, ParseErrorKind, PrintError};
use crate::input::Consumable;

/// A value that consumes a prefix of a typed input and yields a typed
/// output or fails.
///
/// Parser values are immutable descriptions built once and reused freely
/// (spec §3 "Lifecycles") — `parse` takes `&self`, never `self`.
///
/// ### Roll-back invariant
/// If `parse` returns `Err`, `input` must be left exactly as it was passed
/// in. If it returns `Ok`, `input` must be advanced past exactly the
/// consumed prefix, with the remainder left for subsequent parsers.
pub trait Parser {
    /// The input type this parser consumes a prefix of.
    type Input;
    /// The value produced on success.
    type Output;

    /// Inspect and possibly consume a prefix of `input`.
    fn parse(&self, input: &mut Self::Input) -> Result<Self::Output, ParseError>;
}

/// A [`Parser`] that can also run backwards: map an output back to a
/// minimal input that would re-parse to it.
///
/// "Minimal" means: the returned input is the [`Appendable`](crate::input::Appendable)
/// identity everywhere the output did not constrain it (spec §4.1).
pub trait Printer: Parser {
    /// Construct an input value that, if fed to [`Parser::parse`], would
    /// yield `output`.
    fn print(&self, output: Self::Output) -> Result<Self::Input, PrintError>;
}

/// A pair of mutually-inverse functions, used by `map` to stay printable.
///
/// A one-way `Fn(A) -> B` can build a [`Parser`] but not a [`Printer`] —
/// only a `Conversion` (an isomorphism on the relevant domain) lets the
/// combinator run backwards, since `unapply` is exactly what a printer
/// needs to turn the mapped output back into the wrapped parser's output.
/// Case-path style conversions (construct/extract a variant of a sum type)
/// are the canonical printer-safe instance (spec §4.3, §6c).
pub trait Conversion<A, B> {
    /// Forward direction: produce `B` from `A`.
    fn apply(&self, a: A) -> B;
    /// Backward direction: recover the `A` that `apply` would have
    /// produced `b` from. Must satisfy `unapply(apply(a)) == a` for every
    /// `a` in the parser's image (spec §6c).
    fn unapply(&self, b: B) -> A;
}

/// Convenience entry point: run `p` against `input`, returning the output
/// alongside what's left of the input.
///
/// This does not require exhaustive consumption; callers that need the
/// whole input consumed should use [`parse_exhaustive`] instead.
pub fn parse<P: Parser>(p: &P, mut input: P::Input) -> Result<(P::Output, P::Input), ParseError> {
    let output = p.parse(&mut input)?;
    Ok((output, input))
}

/// Convenience entry point: print `output` through `p`.
pub fn print<P: Printer>(p: &P, output: P::Output) -> Result<P::Input, PrintError> {
    p.print(output)
}

/// Like [`parse`], but fails with [`ParseErrorKind::UnconsumedRemainder`]
/// if anything is left over once `p` succeeds — the root-level "exhaustive
/// consumption" check [`parse`]'s doc comment tells callers to perform
/// themselves.
///
/// ### Example
/// ```
/// use viaduct::core::parse_exhaustive;
/// use viaduct::parsers::StartsWith;
///
/// let p = StartsWith::new("GET".to_string());
/// assert!(parse_exhaustive(&p, "GET".to_string()).is_ok());
/// assert!(parse_exhaustive(&p, "GET /x".to_string()).is_err());
/// ```
pub fn parse_exhaustive<P>(p: &P, input: P::Input) -> Result<P::Output, ParseError>
where
    P: Parser,
    P::Input: Consumable,
{
    let (output, remainder) = parse(p, input)?;
    if remainder.is_empty() {
        Ok(output)
    } else {
        Err(ParseError::new(ParseErrorKind::UnconsumedRemainder, "end of input", 0))
    }
}
