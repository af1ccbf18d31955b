//! # Combinators
//!
//! Generic building blocks layered over [`Grammar`]. Each combinator is a
//! small struct with a constructor function, plus a chaining method on
//! [`GrammarExt`] where that reads better.

use super::cursor::{BoxedGrammar, Cursor, Grammar, Parsed};

/// Transforms the value of a successful parse.
#[derive(Debug, Clone, Copy)]
pub struct Map<G, F> {
    grammar: G,
    func: F,
}

impl<G, F, T> Grammar for Map<G, F>
where
    G: Grammar,
    F: Fn(G::Output) -> T,
{
    type Output = T;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        self.grammar
            .parse(input)
            .map(|(rest, value)| (rest, (self.func)(value)))
    }
}

/// Transforms the value, failing when the function rejects it.
#[derive(Debug, Clone, Copy)]
pub struct TryMap<G, F> {
    grammar: G,
    func: F,
    expected: &'static str,
}

impl<G, F, T> Grammar for TryMap<G, F>
where
    G: Grammar,
    F: Fn(G::Output) -> Option<T>,
{
    type Output = T;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let (rest, value) = self.grammar.parse(input)?;
        (self.func)(value)
            .map(|mapped| (rest, mapped))
            .ok_or_else(|| input.fail("value rejected", self.expected))
    }
}

/// Ordered choice: the first alternative that succeeds wins.
#[derive(Debug, Clone, Copy)]
pub struct Or<A, B> {
    first: A,
    second: B,
}

impl<A, B, T> Grammar for Or<A, B>
where
    A: Grammar<Output = T>,
    B: Grammar<Output = T>,
{
    type Output = T;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        match self.first.parse(input) {
            Ok(ok) => Ok(ok),
            Err(first) => self.second.parse(input).map_err(|second| first.merge(second)),
        }
    }
}

/// Ordered choice over a list of boxed alternatives of the same type.
pub struct Choice<T> {
    alternatives: Vec<BoxedGrammar<T>>,
}

impl<T> Grammar for Choice<T> {
    type Output = T;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let mut failure = input.fail("no alternative matched", "alternative");
        for alternative in &self.alternatives {
            match alternative.parse(input) {
                Ok(ok) => return Ok(ok),
                Err(err) => failure = failure.merge(err),
            }
        }
        Err(failure)
    }
}

/// Constructor for [`Choice`]; alternatives are tried in the given order.
pub fn choice<T>(alternatives: Vec<BoxedGrammar<T>>) -> Choice<T> {
    Choice { alternatives }
}

/// Boolean OR over grammars with unrelated output types.
///
/// Succeeds (consuming what the winning side consumed) when either side does.
#[derive(Debug, Clone, Copy)]
pub struct EitherMatches<A, B> {
    first: A,
    second: B,
}

impl<A: Grammar, B: Grammar> Grammar for EitherMatches<A, B> {
    type Output = ();

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        match self.first.parse(input) {
            Ok((rest, _)) => Ok((rest, ())),
            Err(first) => self
                .second
                .parse(input)
                .map(|(rest, _)| (rest, ()))
                .map_err(|second| first.merge(second)),
        }
    }
}

pub fn either_matches<A: Grammar, B: Grammar>(first: A, second: B) -> EitherMatches<A, B> {
    EitherMatches { first, second }
}

/// Runs two grammars in sequence and keeps both values.
#[derive(Debug, Clone, Copy)]
pub struct Then<A, B> {
    first: A,
    second: B,
}

impl<A: Grammar, B: Grammar> Grammar for Then<A, B> {
    type Output = (A::Output, B::Output);

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let (rest, a) = self.first.parse(input)?;
        let (rest, b) = self.second.parse(rest)?;
        Ok((rest, (a, b)))
    }
}

/// Runs two grammars in sequence and keeps the second value.
#[derive(Debug, Clone, Copy)]
pub struct Preceded<P, G> {
    prefix: P,
    grammar: G,
}

impl<P: Grammar, G: Grammar> Grammar for Preceded<P, G> {
    type Output = G::Output;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let (rest, _) = self.prefix.parse(input)?;
        self.grammar.parse(rest)
    }
}

pub fn preceded<P: Grammar, G: Grammar>(prefix: P, grammar: G) -> Preceded<P, G> {
    Preceded { prefix, grammar }
}

/// Runs two grammars in sequence and keeps the first value.
#[derive(Debug, Clone, Copy)]
pub struct Terminated<G, S> {
    grammar: G,
    suffix: S,
}

impl<G: Grammar, S: Grammar> Grammar for Terminated<G, S> {
    type Output = G::Output;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let (rest, value) = self.grammar.parse(input)?;
        let (rest, _) = self.suffix.parse(rest)?;
        Ok((rest, value))
    }
}

/// Turns failure into an explicit empty value. Never fails; consumes input
/// only when the wrapped grammar succeeds.
#[derive(Debug, Clone, Copy)]
pub struct OptionalMaybe<G> {
    grammar: G,
}

impl<G: Grammar> Grammar for OptionalMaybe<G> {
    type Output = Option<G::Output>;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        match self.grammar.parse(input) {
            Ok((rest, value)) => Ok((rest, Some(value))),
            Err(_) => Ok((input, None)),
        }
    }
}

pub fn optional<G: Grammar>(grammar: G) -> OptionalMaybe<G> {
    OptionalMaybe { grammar }
}

/// Zero or more repetitions.
#[derive(Debug, Clone, Copy)]
pub struct Many<G> {
    grammar: G,
    min: usize,
}

impl<G: Grammar> Grammar for Many<G> {
    type Output = Vec<G::Output>;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let mut values = Vec::new();
        let mut cursor = input;
        loop {
            match self.grammar.parse(cursor) {
                // zero-width matches would loop forever
                Ok((rest, _)) if rest.position() == cursor.position() => break,
                Ok((rest, value)) => {
                    values.push(value);
                    cursor = rest;
                }
                Err(err) if values.len() < self.min => return Err(err),
                Err(_) => break,
            }
        }
        if values.len() < self.min {
            return Err(cursor.fail("too few repetitions", "repetition"));
        }
        Ok((cursor, values))
    }
}

pub fn many<G: Grammar>(grammar: G) -> Many<G> {
    Many { grammar, min: 0 }
}

pub fn many1<G: Grammar>(grammar: G) -> Many<G> {
    Many { grammar, min: 1 }
}

/// Lookahead: runs the grammar and, on success, returns its value without
/// moving the cursor.
#[derive(Debug, Clone, Copy)]
pub struct ResetInput<G> {
    grammar: G,
}

impl<G: Grammar> Grammar for ResetInput<G> {
    type Output = G::Output;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        self.grammar.parse(input).map(|(_, value)| (input, value))
    }
}

pub fn reset_input<G: Grammar>(grammar: G) -> ResetInput<G> {
    ResetInput { grammar }
}

/// Negative lookahead: succeeds, consuming nothing, only if the grammar fails.
#[derive(Debug, Clone, Copy)]
pub struct Not<G> {
    grammar: G,
    expected: &'static str,
}

impl<G: Grammar> Grammar for Not<G> {
    type Output = ();

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        match self.grammar.parse(input) {
            Ok(_) => Err(input.fail("unexpected match", self.expected)),
            Err(_) => Ok((input, ())),
        }
    }
}

pub fn not<G: Grammar>(grammar: G, expected: &'static str) -> Not<G> {
    Not { grammar, expected }
}

/// Skips characters until the grammar matches, then applies it.
///
/// Fails only when the grammar matches nowhere between the cursor and the
/// end of the input.
#[derive(Debug, Clone, Copy)]
pub struct ScanFor<G> {
    grammar: G,
}

impl<G: Grammar> Grammar for ScanFor<G> {
    type Output = G::Output;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let mut cursor = input;
        loop {
            if let Ok(ok) = self.grammar.parse(cursor) {
                return Ok(ok);
            }
            match cursor.next_char() {
                Some((_, rest)) => cursor = rest,
                None => return Err(input.fail("never found", "scanned token")),
            }
        }
    }
}

pub fn scan_for<G: Grammar>(grammar: G) -> ScanFor<G> {
    ScanFor { grammar }
}

/// Captures the text up to, not including, the first position where the
/// grammar would match. The matched token itself is left unconsumed.
#[derive(Debug, Clone, Copy)]
pub struct LineUpTo<G> {
    grammar: G,
}

impl<G: Grammar> Grammar for LineUpTo<G> {
    type Output = String;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let mut cursor = input;
        loop {
            if self.grammar.parse(cursor).is_ok() {
                return Ok((cursor, input.slice_to(&cursor).to_string()));
            }
            match cursor.next_char() {
                Some((_, rest)) => cursor = rest,
                None => return Err(input.fail("terminator never found", "terminator")),
            }
        }
    }
}

pub fn line_up_to<G: Grammar>(grammar: G) -> LineUpTo<G> {
    LineUpTo { grammar }
}

/// Removes every non-overlapping match of the grammar from the rest of the
/// input. The surviving fragments are trimmed and joined with single spaces.
/// Consumes all remaining input; never fails.
#[derive(Debug, Clone, Copy)]
pub struct Filter<G> {
    grammar: G,
}

impl<G: Grammar> Grammar for Filter<G> {
    type Output = String;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let mut fragments = Vec::new();
        let mut fragment_start = input;
        let mut cursor = input;
        while !cursor.is_at_end() {
            match self.grammar.parse(cursor) {
                Ok((rest, _)) if rest.position() > cursor.position() => {
                    fragments.push(fragment_start.slice_to(&cursor));
                    fragment_start = rest;
                    cursor = rest;
                }
                _ => match cursor.next_char() {
                    Some((_, rest)) => cursor = rest,
                    None => break,
                },
            }
        }
        fragments.push(fragment_start.slice_to(&cursor));

        let joined = fragments
            .iter()
            .map(|fragment| fragment.trim())
            .filter(|fragment| !fragment.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Ok((cursor, joined))
    }
}

pub fn filter<G: Grammar>(grammar: G) -> Filter<G> {
    Filter { grammar }
}

/// Matches only the rightmost occurrence of the grammar: succeeds at the
/// cursor when no further occurrence starts anywhere after it.
#[derive(Debug, Clone, Copy)]
pub struct Last<G> {
    grammar: G,
}

impl<G: Grammar> Grammar for Last<G> {
    type Output = G::Output;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let matched = self.grammar.parse(input)?;
        let mut cursor = input;
        while let Some((_, rest)) = cursor.next_char() {
            if self.grammar.parse(rest).is_ok() {
                return Err(input.fail("later occurrence exists", "last occurrence"));
            }
            cursor = rest;
        }
        Ok(matched)
    }
}

pub fn last<G: Grammar>(grammar: G) -> Last<G> {
    Last { grammar }
}

/// Runs a grammar and returns the text it consumed instead of its value.
#[derive(Debug, Clone, Copy)]
pub struct Recognize<G> {
    grammar: G,
}

impl<G: Grammar> Grammar for Recognize<G> {
    type Output = String;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let (rest, _) = self.grammar.parse(input)?;
        Ok((rest, input.slice_to(&rest).to_string()))
    }
}

pub fn recognize<G: Grammar>(grammar: G) -> Recognize<G> {
    Recognize { grammar }
}

/// Chaining methods available on every [`Grammar`].
pub trait GrammarExt: Grammar + Sized {
    fn map<F, T>(self, func: F) -> Map<Self, F>
    where
        F: Fn(Self::Output) -> T,
    {
        Map {
            grammar: self,
            func,
        }
    }

    fn try_map<F, T>(self, expected: &'static str, func: F) -> TryMap<Self, F>
    where
        F: Fn(Self::Output) -> Option<T>,
    {
        TryMap {
            grammar: self,
            func,
            expected,
        }
    }

    fn or<B>(self, other: B) -> Or<Self, B>
    where
        B: Grammar<Output = Self::Output>,
    {
        Or {
            first: self,
            second: other,
        }
    }

    fn then<B: Grammar>(self, other: B) -> Then<Self, B> {
        Then {
            first: self,
            second: other,
        }
    }

    /// Runs `other` after `self` and keeps only `self`'s value.
    fn skip<B: Grammar>(self, other: B) -> Terminated<Self, B> {
        Terminated {
            grammar: self,
            suffix: other,
        }
    }

    fn optional(self) -> OptionalMaybe<Self> {
        optional(self)
    }

    fn reset_input(self) -> ResetInput<Self> {
        reset_input(self)
    }

    fn to_value<T: Clone>(self, value: T) -> Map<Self, Box<dyn Fn(Self::Output) -> T + Send + Sync>>
    where
        T: Send + Sync + 'static,
    {
        Map {
            grammar: self,
            func: Box::new(move |_| value.clone()),
        }
    }

    fn boxed(self) -> BoxedGrammar<Self::Output>
    where
        Self: Send + Sync + 'static,
    {
        Box::new(self)
    }
}

impl<G: Grammar> GrammarExt for G {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::chars::{dash_separator_token, digit, keyword, literal, number, whitespace};

    #[test]
    fn optional_never_fails() {
        let grammar = optional(number());
        assert_eq!(grammar.value_of("12"), Some(Some(12)));
        let (rest, value) = grammar.parse_str("x").unwrap();
        assert_eq!(value, None);
        assert_eq!(rest.position(), 0);
    }

    #[test]
    fn or_is_ordered() {
        let grammar = keyword("OP").or(keyword("OPENING"));
        let (rest, value) = grammar.parse_str("OPENING").unwrap();
        assert_eq!(value, "OP");
        assert_eq!(rest.remaining(), "ENING");

        let grammar = keyword("OPENING").or(keyword("OP"));
        assert_eq!(grammar.value_of("OPENING"), Some("OPENING"));
    }

    #[test]
    fn or_reports_both_expectations() {
        let err = literal("a").or(literal("b")).parse_str("c").unwrap_err();
        assert_eq!(err.expected, vec!["a", "b"]);
    }

    #[test]
    fn choice_tries_in_order() {
        let grammar = choice(vec![
            literal("NC").to_value(1).boxed(),
            literal("NCOP").to_value(2).boxed(),
        ]);
        assert_eq!(grammar.value_of("NCOP"), Some(1));
        assert!(grammar.parse_str("OP").is_err());
    }

    #[test]
    fn either_matches_mixed_types() {
        let grammar = either_matches(number(), keyword("vol"));
        assert!(grammar.parse_str("12").is_ok());
        assert!(grammar.parse_str("Vol").is_ok());
        assert!(grammar.parse_str("x").is_err());
    }

    #[test]
    fn scan_for_skips_noise() {
        let (rest, value) = scan_for(number()).parse_str("Series 24 end").unwrap();
        assert_eq!(value, 24);
        assert_eq!(rest.remaining(), " end");
        assert!(scan_for(number()).parse_str("no digits").is_err());
    }

    #[test]
    fn line_up_to_leaves_terminator() {
        let (rest, text) = line_up_to(dash_separator_token())
            .parse_str("Kekkai Sensen - 01")
            .unwrap();
        assert_eq!(text, "Kekkai Sensen");
        assert_eq!(rest.remaining(), " - 01");
        assert!(line_up_to(literal("[")).parse_str("abc").is_err());
    }

    #[test]
    fn filter_removes_matches() {
        let value = filter(dash_separator_token()).value_of("Series - 01 - Title");
        assert_eq!(value.as_deref(), Some("Series 01 Title"));

        let value = filter(many1(digit())).value_of("  2 Title ");
        assert_eq!(value.as_deref(), Some("Title"));

        assert_eq!(filter(digit()).value_of("").as_deref(), Some(""));
    }

    #[test]
    fn reset_input_keeps_position() {
        let (rest, value) = reset_input(number()).parse_str("42x").unwrap();
        assert_eq!(value, 42);
        assert_eq!(rest.position(), 0);
    }

    #[test]
    fn not_is_negative_lookahead() {
        assert!(not(number(), "non-number").parse_str("x").is_ok());
        assert!(not(number(), "non-number").parse_str("1").is_err());
    }

    #[test]
    fn last_prefers_rightmost_match() {
        let token = preceded(whitespace(), number());
        let (rest, value) = scan_for(last(token)).parse_str("Show 1080 - 07").unwrap();
        assert_eq!(value, 7);
        assert!(rest.is_at_end());
    }

    #[test]
    fn last_fails_when_later_match_exists() {
        let token = preceded(whitespace(), number());
        assert!(last(token).parse_str(" 1 2").is_err());
    }

    #[test]
    fn many_collects_repetitions() {
        assert_eq!(many(digit()).value_of("12a"), Some(vec!['1', '2']));
        assert_eq!(many(digit()).value_of("a"), Some(vec![]));
        assert!(many1(digit()).parse_str("a").is_err());
    }

    #[test]
    fn try_map_rejects() {
        let even = number().try_map("even number", |n| (n % 2 == 0).then_some(n));
        assert_eq!(even.value_of("4"), Some(4));
        assert!(even.parse_str("3").is_err());
    }

    #[test]
    fn recognize_returns_text() {
        let grammar = recognize(keyword("ep").then(number()));
        assert_eq!(grammar.value_of("EP3 rest").as_deref(), Some("EP3"));
    }
}
