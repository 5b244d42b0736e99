//! `viaduct` is a small algebra of composable parsers whose members are
//! simultaneously *printers*: every successful parse of an input into a
//! structured value can be run backwards to reconstruct an equivalent
//! input from that value.
//!
//! The headline use is bidirectional HTTP routing (see [`request`] and
//! [`route`], behind the `http` feature): turning a request into a typed
//! [`demo::Route`] and serialising a route back into a request. The core
//! algebra in [`core`], [`parsers`] and [`combinators`] is domain-agnostic
//! and has no notion of HTTP.
//!
//! ### Laws
//!
//! For a [`Printer`] `p` and output `o` in `p`'s image,
//! `p.parse(&mut p.print(o).unwrap()).unwrap() == o` with the input left
//! empty: printing then parsing is the identity. See the crate's test
//! suites for the full set of invariants this crate is expected to uphold.
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod combinators;
pub mod core;
pub mod error;
pub mod input;
mod macros;
pub mod parsers;

#[cfg(feature = "http")]
pub mod request;

#[cfg(feature = "http")]
pub mod route;

#[cfg(feature = "demo")]
pub mod demo;

pub use crate::core::{parse, print, Conversion, Parser, Printer};
pub use crate::error::{ParseError, ParseErrorKind, PrintError, PrintErrorKind};
