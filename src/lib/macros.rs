//! Declarative macros backing the structural combinators.
//!
//! The teacher's `macros.rs` folds an n-ary `or`/`left`/`right` call down to
//! repeated 2-ary applications with a `variadic!` macro. [`route!`] below
//! does the same thing for alternation. Sequencing has no such macro here:
//! spec §4.3's pair-flattening rule ("the output type is the tuple of all
//! non-`()` outputs ... a bare `A` when only one remains") is realized by
//! composing the 2-ary `skip`/`take`/`right` combinators directly at each
//! call site, not by a generated N-ary tuple type — a generic `Flatten`
//! trait mapping `((A,B),C)` down to `(A,B,C)` while also dropping `()`
//! members would need both `impl Flatten for ()` and a blanket
//! `impl<T> Flatten for T`, which stable Rust's coherence rules reject as
//! overlapping.

/// Fold any number of same-`Output` parsers into nested [`OrElse`]s,
/// left to right, the way the teacher's `or!` folds n-ary alternation down
/// to repeated 2-ary calls.
///
/// ### Example
/// ```
/// use viaduct::core::parse;
/// use viaduct::route;
/// use viaduct::parsers::StartsWith;
///
/// let p = route!(
///     StartsWith::new("GET".to_string()),
///     StartsWith::new("POST".to_string()),
///     StartsWith::new("PUT".to_string()),
/// );
/// assert_eq!(parse(&p, "PUT /x".to_string()).unwrap().1, " /x");
/// ```
///
/// [`OrElse`]: crate::combinators::OrElse
#[macro_export]
macro_rules! route {
    ($e:expr $(,)?) => {
        $e
    };
    ($e:expr, $($rest:expr),+ $(,)?) => {
        $crate::combinators::ParserExt::or_else($e, $crate::route!($($rest),+))
    };
}

#[cfg(test)]
mod tests {
    use crate::core::parse;
    use crate::parsers::StartsWith;

    #[cfg(feature = "alloc")]
    use alloc::string::ToString;

    #[test]
    fn route_macro_folds_alternation_left_to_right() {
        let p = crate::route!(
            StartsWith::new("GET".to_string()),
            StartsWith::new("POST".to_string()),
            StartsWith::new("PUT".to_string()),
        );
        assert_eq!(parse(&p, "PUT /x".to_string()).unwrap().1, " /x");
    }
}
