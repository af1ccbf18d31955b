//! Atomic grammars: single characters, literal tokens and numbers.
//!
//! Each of these recognizes exactly one token and fails without consuming
//! input otherwise.

use super::cursor::{Cursor, Grammar, Parsed};

/// Matches one character out of a fixed set.
#[derive(Debug, Clone, Copy)]
pub struct CharIn {
    chars: &'static [char],
    expected: &'static str,
}

impl Grammar for CharIn {
    type Output = char;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        match input.next_char() {
            Some((c, rest)) if self.chars.contains(&c) => Ok((rest, c)),
            Some(_) => Err(input.fail("unexpected character", self.expected)),
            None => Err(input.fail("unexpected end of input", self.expected)),
        }
    }
}

/// Matches one character satisfying a predicate.
#[derive(Debug, Clone, Copy)]
pub struct CharWhere {
    predicate: fn(char) -> bool,
    expected: &'static str,
}

impl Grammar for CharWhere {
    type Output = char;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        match input.next_char() {
            Some((c, rest)) if (self.predicate)(c) => Ok((rest, c)),
            Some(_) => Err(input.fail("unexpected character", self.expected)),
            None => Err(input.fail("unexpected end of input", self.expected)),
        }
    }
}

pub fn dash() -> CharIn {
    CharIn {
        chars: &['-'],
        expected: "'-'",
    }
}

pub fn dot() -> CharIn {
    CharIn {
        chars: &['.'],
        expected: "'.'",
    }
}

pub fn underscore() -> CharIn {
    CharIn {
        chars: &['_'],
        expected: "'_'",
    }
}

pub fn open_bracket() -> CharIn {
    CharIn {
        chars: &['['],
        expected: "'['",
    }
}

pub fn close_bracket() -> CharIn {
    CharIn {
        chars: &[']'],
        expected: "']'",
    }
}

pub fn open_paren() -> CharIn {
    CharIn {
        chars: &['('],
        expected: "'('",
    }
}

pub fn close_paren() -> CharIn {
    CharIn {
        chars: &[')'],
        expected: "')'",
    }
}

/// `[` or `(`.
pub fn open_tag_delimiter() -> CharIn {
    CharIn {
        chars: &['[', '('],
        expected: "opening tag delimiter",
    }
}

/// `]` or `)`.
pub fn closed_tag_delimiter() -> CharIn {
    CharIn {
        chars: &[']', ')'],
        expected: "closing tag delimiter",
    }
}

/// Any of `[`, `(`, `]`, `)`.
pub fn tag_delimiter() -> CharIn {
    CharIn {
        chars: &['[', '(', ']', ')'],
        expected: "tag delimiter",
    }
}

/// `-` or `~` between the two ends of an episode range.
pub fn range_separator() -> CharIn {
    CharIn {
        chars: &['-', '~'],
        expected: "range separator",
    }
}

/// Upper-case roman numeral digit used in movie numbering.
pub fn roman_digit() -> CharIn {
    CharIn {
        chars: &['I', 'V', 'X'],
        expected: "roman numeral",
    }
}

/// A single whitespace character.
pub fn whitespace() -> CharWhere {
    CharWhere {
        predicate: char::is_whitespace,
        expected: "whitespace",
    }
}

/// Punctuation or whitespace: anything that is neither a letter nor a digit.
pub fn non_alphanumeric() -> CharWhere {
    CharWhere {
        predicate: |c| !c.is_alphanumeric(),
        expected: "separator",
    }
}

pub fn digit() -> CharWhere {
    CharWhere {
        predicate: |c| c.is_ascii_digit(),
        expected: "digit",
    }
}

/// Zero or more whitespace characters; never fails.
#[derive(Debug, Clone, Copy)]
pub struct Whitespaces;

impl Grammar for Whitespaces {
    type Output = ();

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let remaining = input.remaining();
        let skipped = remaining.len() - remaining.trim_start().len();
        Ok((input.advance(skipped), ()))
    }
}

pub fn whitespaces() -> Whitespaces {
    Whitespaces
}

/// Whitespace, dash, whitespace (`" - "`), exactly one whitespace character
/// on each side.
#[derive(Debug, Clone, Copy)]
pub struct DashSeparatorToken;

impl Grammar for DashSeparatorToken {
    type Output = ();

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let mismatch = |_| input.fail("unexpected character", "dash separator");
        let (rest, _) = whitespace().parse(input).map_err(mismatch)?;
        let (rest, _) = dash().parse(rest).map_err(mismatch)?;
        let (rest, _) = whitespace().parse(rest).map_err(mismatch)?;
        Ok((rest, ()))
    }
}

pub fn dash_separator_token() -> DashSeparatorToken {
    DashSeparatorToken
}

/// Consumes everything that is left. Always succeeds.
#[derive(Debug, Clone, Copy)]
pub struct Line;

impl Grammar for Line {
    type Output = String;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let text = input.remaining().to_string();
        Ok((input.advance(text.len()), text))
    }
}

pub fn line() -> Line {
    Line
}

/// Succeeds only at the end of the input.
#[derive(Debug, Clone, Copy)]
pub struct EndOfInput;

impl Grammar for EndOfInput {
    type Output = ();

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        if input.is_at_end() {
            Ok((input, ()))
        } else {
            Err(input.fail("trailing input", "end of input"))
        }
    }
}

pub fn end_of_input() -> EndOfInput {
    EndOfInput
}

/// A fixed token, optionally compared ASCII case-insensitively.
#[derive(Debug, Clone, Copy)]
pub struct Literal {
    token: &'static str,
    ignore_case: bool,
}

impl Grammar for Literal {
    type Output = &'static str;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let remaining = input.remaining();
        let len = self.token.len();
        let matched = remaining.get(..len).is_some_and(|head| {
            if self.ignore_case {
                head.eq_ignore_ascii_case(self.token)
            } else {
                head == self.token
            }
        });
        if matched {
            Ok((input.advance(len), self.token))
        } else {
            Err(input.fail("token mismatch", self.token))
        }
    }
}

/// Case-sensitive literal.
pub fn literal(token: &'static str) -> Literal {
    Literal {
        token,
        ignore_case: false,
    }
}

/// ASCII case-insensitive literal.
pub fn keyword(token: &'static str) -> Literal {
    Literal {
        token,
        ignore_case: true,
    }
}

/// An unsigned decimal number of one to `max_digits` digits.
///
/// Fails if more digits follow, so `12345` is never read as `1234`.
#[derive(Debug, Clone, Copy)]
pub struct Number {
    max_digits: usize,
}

impl Grammar for Number {
    type Output = u32;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let remaining = input.remaining();
        let len = remaining
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if len == 0 {
            return Err(input.fail("unexpected character", "number"));
        }
        if len > self.max_digits {
            return Err(input.fail("number too long", "number"));
        }
        let value = remaining[..len]
            .parse()
            .map_err(|_| input.fail("invalid number", "number"))?;
        Ok((input.advance(len), value))
    }
}

/// Numbers of up to four digits, the width used for episode and volume counts.
pub fn number() -> Number {
    Number { max_digits: 4 }
}

/// Zero-width check that the previous character is not alphanumeric.
#[derive(Debug, Clone, Copy)]
pub struct WordStart;

impl Grammar for WordStart {
    type Output = ();

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        match input.previous() {
            Some(c) if c.is_alphanumeric() => Err(input.fail("inside a word", "word boundary")),
            _ => Ok((input, ())),
        }
    }
}

pub fn word_start() -> WordStart {
    WordStart
}

/// Zero-width check that the next character is not a letter.
#[derive(Debug, Clone, Copy)]
pub struct NoLetterFollows;

impl Grammar for NoLetterFollows {
    type Output = ();

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        match input.peek() {
            Some(c) if c.is_alphabetic() => Err(input.fail("letter follows", "token boundary")),
            _ => Ok((input, ())),
        }
    }
}

pub fn no_letter_follows() -> NoLetterFollows {
    NoLetterFollows
}

/// Zero-width check that the next character is not alphanumeric.
#[derive(Debug, Clone, Copy)]
pub struct WordEnd;

impl Grammar for WordEnd {
    type Output = ();

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        match input.peek() {
            Some(c) if c.is_alphanumeric() => Err(input.fail("inside a word", "word boundary")),
            _ => Ok((input, ())),
        }
    }
}

pub fn word_end() -> WordEnd {
    WordEnd
}
