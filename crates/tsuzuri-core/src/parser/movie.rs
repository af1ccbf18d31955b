//! Numbered movies in three notations: `Series #3`, `Series EP3` and
//! `Series III - Subtitle`.

use crate::grammar::chars::{
    dash_separator_token, keyword, literal, number, roman_digit, whitespaces, word_end, word_start,
};
use crate::grammar::combinators::{line_up_to, many1, optional, preceded, recognize};
use crate::grammar::{Cursor, Grammar, GrammarExt, Parsed};
use crate::types::{Movie, ParsedEntity};

use super::common::{consume_all, header_then_tail, series_name, CommonHeader, SharedGrammar};

const ROMAN_ONES: [&str; 10] = ["", "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX"];

/// Value of an upper-case roman numeral up to 39 (`XXXIX`), using
/// subtractive notation. Non-canonical spellings such as `IIII` or `VX` are
/// rejected.
#[must_use]
pub fn roman_value(numeral: &str) -> Option<u32> {
    let tens = numeral.bytes().take_while(|&b| b == b'X').count();
    if tens > 3 {
        return None;
    }
    let ones = ROMAN_ONES.iter().position(|&spelling| spelling == &numeral[tens..])?;
    let value = u32::try_from(tens * 10 + ones).ok()?;
    (value > 0).then_some(value)
}

/// A roman numeral word made of `I`, `V` and `X`.
pub fn roman_numeral() -> impl Grammar<Output = u32> + Copy {
    recognize(many1(roman_digit())).try_map("roman numeral", |numeral| roman_value(&numeral))
}

/// `#<n>`, `EP<n>` or a roman numeral, as a whole word.
pub fn movie_number() -> impl Grammar<Output = u32> + Copy {
    preceded(
        word_start(),
        preceded(literal("#"), number())
            .or(preceded(keyword("EP"), number()))
            .or(roman_numeral()),
    )
    .skip(word_end())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieMatch {
    pub series: Option<String>,
    pub number: u32,
    pub subtitle: Option<String>,
}

/// Series up to the movie number, the number, then an optional
/// dash-separated subtitle.
#[derive(Debug, Clone, Copy)]
pub struct MovieTail;

impl Grammar for MovieTail {
    type Output = MovieMatch;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let (at, series) = line_up_to(movie_number()).parse(input)?;
        let (rest, number) = movie_number().parse(at)?;
        let (rest, _) = optional(dash_separator_token()).parse(rest)?;
        let (rest, _) = whitespaces().parse(rest)?;

        let subtitle = rest.remaining().trim_start_matches('-').trim();
        Ok((
            consume_all(rest),
            MovieMatch {
                series: series_name(&series),
                number,
                subtitle: (!subtitle.is_empty()).then(|| subtitle.to_string()),
            },
        ))
    }
}

/// Entity grammar for [`Movie`].
pub struct MovieGrammar {
    header: SharedGrammar<CommonHeader>,
}

impl MovieGrammar {
    #[must_use]
    pub fn new(header: SharedGrammar<CommonHeader>) -> Self {
        Self { header }
    }
}

impl Grammar for MovieGrammar {
    type Output = ParsedEntity;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let (common, found) = header_then_tail(&self.header, &MovieTail, input, "movie number")?;
        let entity = Movie {
            header: common.into_header(found.series),
            number: found.number,
            subtitle: found.subtitle,
        };
        Ok((consume_all(input), ParsedEntity::Movie(entity)))
    }
}
