//! # Cursor and Grammar Contract
//!
//! Every grammar is a pure function from a [`Cursor`] to either a value plus
//! the advanced cursor, or a [`Failure`] describing where and why it stopped.

use std::fmt;

/// A position inside an immutable input string.
///
/// Positions are byte offsets and always sit on a `char` boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor<'a> {
    source: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// The whole input this cursor walks over.
    #[must_use]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Byte offset into [`Self::source`].
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Unconsumed part of the input.
    #[must_use]
    pub fn remaining(&self) -> &'a str {
        &self.source[self.position..]
    }

    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Next character without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Character just before the cursor, if any.
    #[must_use]
    pub fn previous(&self) -> Option<char> {
        self.source[..self.position].chars().next_back()
    }

    /// Consumes one character.
    #[must_use]
    pub fn next_char(&self) -> Option<(char, Self)> {
        let c = self.peek()?;
        Some((c, self.advance(c.len_utf8())))
    }

    /// Moves forward by `bytes`, clamped to the end of the input.
    #[must_use]
    pub fn advance(&self, bytes: usize) -> Self {
        Self {
            source: self.source,
            position: (self.position + bytes).min(self.source.len()),
        }
    }

    /// Text between this cursor and a later one.
    #[must_use]
    pub fn slice_to(&self, later: &Cursor<'a>) -> &'a str {
        &self.source[self.position..later.position.max(self.position)]
    }

    /// Fails at this position.
    #[must_use]
    pub fn fail(&self, message: &'static str, expected: &'static str) -> Failure {
        Failure::new(self.position, message, expected)
    }
}

/// Why a grammar did not match.
///
/// Failures are ordinary values; alternation merges them so the failure that
/// got furthest into the input is the one reported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {position} (expected {})", .expected.join(" | "))]
pub struct Failure {
    /// Byte offset where matching stopped.
    pub position: usize,
    /// Short description of the mismatch.
    pub message: &'static str,
    /// Names of the tokens that would have been accepted here.
    pub expected: Vec<&'static str>,
}

impl Failure {
    #[must_use]
    pub fn new(position: usize, message: &'static str, expected: &'static str) -> Self {
        Self {
            position,
            message,
            expected: vec![expected],
        }
    }

    /// Combines two failures of competing alternatives.
    #[must_use]
    pub fn merge(self, other: Failure) -> Failure {
        match self.position.cmp(&other.position) {
            std::cmp::Ordering::Greater => self,
            std::cmp::Ordering::Less => other,
            std::cmp::Ordering::Equal => {
                let mut expected = self.expected;
                for item in other.expected {
                    if !expected.contains(&item) {
                        expected.push(item);
                    }
                }
                Failure {
                    position: self.position,
                    message: self.message,
                    expected,
                }
            }
        }
    }
}

/// Outcome of running a grammar: the advanced cursor and the value, or a failure.
pub type Parsed<'a, T> = Result<(Cursor<'a>, T), Failure>;

/// A parser over a [`Cursor`].
///
/// Implementations must not consume input on failure; the cursor they
/// receive is a value, so a failed attempt simply returns an error and the
/// caller keeps its own copy.
pub trait Grammar {
    type Output;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output>;

    /// Runs the grammar from the start of `source`.
    fn parse_str<'a>(&self, source: &'a str) -> Parsed<'a, Self::Output> {
        self.parse(Cursor::new(source))
    }

    /// Runs the grammar and keeps only the value.
    fn value_of(&self, source: &str) -> Option<Self::Output> {
        self.parse(Cursor::new(source)).ok().map(|(_, value)| value)
    }
}

impl<G: Grammar + ?Sized> Grammar for &G {
    type Output = G::Output;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        (**self).parse(input)
    }
}

impl<G: Grammar + ?Sized> Grammar for Box<G> {
    type Output = G::Output;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        (**self).parse(input)
    }
}

impl<G: Grammar + ?Sized> Grammar for std::sync::Arc<G> {
    type Output = G::Output;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        (**self).parse(input)
    }
}

/// Type-erased grammar, shareable across threads.
pub type BoxedGrammar<T> = Box<dyn Grammar<Output = T> + Send + Sync>;

/// Grammar backed by a plain function.
#[derive(Clone, Copy)]
pub struct FromFn<F> {
    func: F,
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FromFn")
    }
}

impl<T, F> Grammar for FromFn<F>
where
    F: for<'a> Fn(Cursor<'a>) -> Parsed<'a, T>,
{
    type Output = T;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        (self.func)(input)
    }
}

/// Constructor for [`FromFn`].
pub fn from_fn<T, F>(func: F) -> FromFn<F>
where
    F: for<'a> Fn(Cursor<'a>) -> Parsed<'a, T>,
{
    FromFn { func }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_walks_multibyte_text() {
        let cursor = Cursor::new("é-x");
        let (c, next) = cursor.next_char().unwrap();
        assert_eq!(c, 'é');
        assert_eq!(next.position(), 2);
        assert_eq!(next.remaining(), "-x");
        assert_eq!(next.previous(), Some('é'));
        assert_eq!(cursor.slice_to(&next), "é");
    }

    #[test]
    fn advance_is_clamped() {
        let cursor = Cursor::new("ab").advance(10);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn merge_prefers_furthest_failure() {
        let near = Failure::new(1, "unexpected input", "digit");
        let far = Failure::new(4, "unexpected input", "letter");
        assert_eq!(near.clone().merge(far.clone()), far);

        let other = Failure::new(1, "unexpected input", "dash");
        let merged = near.merge(other);
        assert_eq!(merged.expected, vec!["digit", "dash"]);
        assert!(merged.to_string().contains("digit | dash"));
    }

    #[test]
    fn from_fn_wraps_functions() {
        fn first<'a>(input: Cursor<'a>) -> Parsed<'a, char> {
            input
                .next_char()
                .map(|(c, rest)| (rest, c))
                .ok_or_else(|| input.fail("unexpected end of input", "any character"))
        }

        let grammar = from_fn(first);
        assert_eq!(grammar.value_of("xy"), Some('x'));
        assert!(grammar.parse_str("").is_err());
    }
}
