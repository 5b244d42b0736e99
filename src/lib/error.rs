//! Error types for both directions of the parser/printer algebra.
//!
//! Parsing and printing fail for structurally different reasons (see
//! spec §7), so they get distinct error types rather than a single shared
//! one threaded through with an extra discriminant.

#[cfg(feature = "alloc")]
use alloc::string::String;

/// An error produced by [`Parser::parse`](crate::core::Parser::parse).
///
/// Carries a human-readable expectation and the input position the failure
/// occurred at; it is deliberately not a stack of alternatives or a full
/// trace — propagation policy is "fail and roll back", not "collect and
/// recover" (spec §7).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected} at position {at}")]
pub struct ParseError {
    /// What the parser expected to find.
    #[cfg(feature = "alloc")]
    pub expected: String,
    #[cfg(not(feature = "alloc"))]
    pub expected: &'static str,
    /// Offset into the original input where the failure occurred.
    pub at: usize,
    /// The coarse-grained category of the failure.
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Build a `ParseError` for a named expectation at the given position.
    #[cfg(feature = "alloc")]
    pub fn new(kind: ParseErrorKind, expected: impl Into<String>, at: usize) -> Self {
        ParseError { expected: expected.into(), at, kind }
    }

    #[cfg(not(feature = "alloc"))]
    pub fn new(kind: ParseErrorKind, expected: &'static str, at: usize) -> Self {
        ParseError { expected, at, kind }
    }
}

/// Coarse category of a [`ParseError`], per spec §7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The input did not match what was expected at this position.
    UnexpectedInput,
    /// A literal match ([`crate::parsers::StartsWith`]) failed.
    ExpectedLiteral,
    /// A parser that requires at least one element found none.
    EmptyInput,
    /// A numeric leaf's accumulated value exceeded its target width.
    Overflow,
    /// A root-level parse completed but input remained and exhaustive
    /// consumption was requested.
    UnconsumedRemainder,
}

/// An error produced by [`Printer::print`](crate::core::Printer::print).
///
/// Print errors carry only a `kind` (spec §6d); there is no input position
/// to point at since printing starts from a value, not a cursor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct PrintError {
    pub kind: PrintErrorKind,
}

impl PrintError {
    pub fn new(kind: PrintErrorKind) -> Self {
        PrintError { kind }
    }
}

/// Coarse category of a [`PrintError`], per spec §7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PrintErrorKind {
    /// A `map` whose function was not a [`Conversion`](crate::core::Conversion)
    /// was used somewhere in a printer pipeline (spec §7/§4.3).
    #[error("unprintable branch: a one-way map was used where a printer is required")]
    UnprintableBranch,
    /// An `orElse`'s chosen branch printed an input that did not re-parse
    /// back to the same output, and no remaining branch did either.
    #[error("round-trip failed: printed output does not re-parse to the original value")]
    RoundTripFailed,
}
