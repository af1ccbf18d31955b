//! Opening and ending theme videos: `Series NCOP1`, `Series - ED 2`,
//! `Series Opening`.

use crate::grammar::chars::{keyword, no_letter_follows, number, whitespaces, word_start};
use crate::grammar::combinators::{line_up_to, optional, preceded};
use crate::grammar::{Cursor, Grammar, GrammarExt, Parsed};
use crate::types::{OpeningEnding, ParsedEntity, Segment};

use super::common::{consume_all, header_then_tail, series_name, CommonHeader, SharedGrammar};

/// `CREDITLESS`, `NONCREDIT`, `NON-CREDIT` or `NC`.
pub fn creditless_prefix() -> impl Grammar<Output = &'static str> + Copy {
    keyword("CREDITLESS")
        .or(keyword("NONCREDIT"))
        .or(keyword("NON-CREDIT"))
        .or(keyword("NC"))
}

/// `OPENING`/`OP` or `ENDING`/`ED`.
pub fn segment_token() -> impl Grammar<Output = Segment> + Copy {
    keyword("OPENING")
        .or(keyword("OP"))
        .map(|_| Segment::Opening)
        .or(keyword("ENDING").or(keyword("ED")).map(|_| Segment::Ending))
}

/// What the segment token carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentToken {
    pub segment: Segment,
    pub sequence: Option<u32>,
    pub no_credits: bool,
}

/// One OP/ED token at a word start: optional creditless prefix, the segment
/// keyword and an optional sequence number.
///
/// A bare `Opening` or `Ending` word, with neither prefix nor number, must end
/// the title or be followed by a dash; otherwise it is an ordinary word of the
/// title ("The Never Ending Story").
#[derive(Debug, Clone, Copy)]
pub struct OpeningEndingToken;

impl Grammar for OpeningEndingToken {
    type Output = SegmentToken;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let (rest, _) = word_start().parse(input)?;
        let (rest, prefix) = optional(creditless_prefix()).parse(rest)?;
        let (rest, _) = whitespaces().parse(rest)?;
        let (after_word, segment) = segment_token().parse(rest)?;
        let spelled_out = rest.slice_to(&after_word).len() > 2;
        let (rest, _) = no_letter_follows().parse(after_word)?;
        let (rest, sequence) = optional(preceded(whitespaces(), number())).parse(rest)?;

        if spelled_out && prefix.is_none() && sequence.is_none() {
            let tail = rest.remaining().trim_start();
            if !(tail.is_empty() || tail.starts_with('-')) {
                return Err(rest.fail("word inside title", "end of title or dash"));
            }
        }

        Ok((
            rest,
            SegmentToken {
                segment,
                sequence,
                no_credits: prefix.is_some(),
            },
        ))
    }
}

/// Series text up to the first OP/ED token, then the token.
#[derive(Debug, Clone, Copy)]
pub struct OpeningEndingTail;

impl Grammar for OpeningEndingTail {
    type Output = (String, SegmentToken);

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let (rest, (series, token)) = line_up_to(OpeningEndingToken)
            .then(OpeningEndingToken)
            .parse(input)?;
        let series =
            series_name(&series).ok_or_else(|| input.fail("missing series", "series name"))?;
        Ok((rest, (series, token)))
    }
}

/// Entity grammar for [`OpeningEnding`].
pub struct OpeningEndingGrammar {
    header: SharedGrammar<CommonHeader>,
}

impl OpeningEndingGrammar {
    #[must_use]
    pub fn new(header: SharedGrammar<CommonHeader>) -> Self {
        Self { header }
    }
}

impl Grammar for OpeningEndingGrammar {
    type Output = ParsedEntity;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let (common, (series, token)) =
            header_then_tail(&self.header, &OpeningEndingTail, input, "opening or ending token")?;
        let entity = OpeningEnding {
            header: common.into_header(Some(series)),
            segment: token.segment,
            sequence: token.sequence,
            no_credits: token.no_credits,
        };
        Ok((consume_all(input), ParsedEntity::OpeningEnding(entity)))
    }
}
