//! Batch directories: `Series 01-12`, `Series Vol 2`, `Series - 01 ~ 26`.
//!
//! Only names without a media extension are directories. The series runs
//! up to the first range or volume; both are then looked up independently
//! from that point, and anything else is ignored.

use crate::grammar::chars::{
    dash_separator_token, keyword, no_letter_follows, non_alphanumeric, number, range_separator,
    whitespace, whitespaces, word_end, word_start,
};
use crate::grammar::combinators::{
    either_matches, line_up_to, many, not, optional, preceded, reset_input, scan_for,
};
use crate::grammar::{trailing_extension, Cursor, Grammar, GrammarExt, Parsed};
use crate::types::{Directory, EpisodeRange, ParsedEntity};

use super::common::{consume_all, header_then_tail, series_name, CommonHeader, SharedGrammar};

/// `<n> - <n>` or `<n> ~ <n>`, spaces optional.
pub fn episode_range() -> impl Grammar<Output = EpisodeRange> + Copy {
    preceded(word_start(), number())
        .skip(whitespaces())
        .skip(range_separator())
        .skip(whitespaces())
        .then(number())
        .skip(word_end())
        .map(|(start, end)| EpisodeRange { start, end })
}

/// `VOLUME`/`VOL`, separators, then the volume number: `Vol 2`, `Volume.03`.
pub fn volume_number() -> impl Grammar<Output = u32> + Copy {
    preceded(
        preceded(word_start(), keyword("VOLUME").or(keyword("VOL")))
            .skip(no_letter_follows())
            .skip(many(non_alphanumeric())),
        number(),
    )
    .skip(word_end())
}

/// Where the series name stops: a range or volume led by a dash separator
/// or whitespace.
fn series_terminator() -> impl Grammar<Output = ()> + Copy {
    preceded(
        either_matches(dash_separator_token(), whitespace()),
        either_matches(episode_range(), volume_number()),
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryMatch {
    pub series: String,
    pub volume: Option<u32>,
    pub episodes: Option<EpisodeRange>,
}

/// Series, then volume and range scanned from where the series stopped.
/// Fails on a blank series.
#[derive(Debug, Clone, Copy)]
pub struct DirectoryTail;

impl Grammar for DirectoryTail {
    type Output = DirectoryMatch;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let (at, series) = line_up_to(series_terminator())
            .parse(input)
            .unwrap_or_else(|_| (consume_all(input), input.remaining().to_string()));
        let series =
            series_name(&series).ok_or_else(|| input.fail("missing series", "series name"))?;

        let (_, volume) = optional(reset_input(scan_for(volume_number()))).parse(at)?;
        let (_, episodes) = optional(reset_input(scan_for(episode_range()))).parse(at)?;

        Ok((
            consume_all(at),
            DirectoryMatch {
                series,
                volume,
                episodes,
            },
        ))
    }
}

/// Entity grammar for [`Directory`].
pub struct DirectoryGrammar {
    header: SharedGrammar<CommonHeader>,
}

impl DirectoryGrammar {
    #[must_use]
    pub fn new(header: SharedGrammar<CommonHeader>) -> Self {
        Self { header }
    }
}

impl Grammar for DirectoryGrammar {
    type Output = ParsedEntity;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        not(trailing_extension(), "name without media extension").parse(input)?;
        let (common, found) =
            header_then_tail(&self.header, &DirectoryTail, input, "directory series")?;
        let entity = Directory {
            header: common.into_header(Some(found.series)),
            volume: found.volume,
            episodes: found.episodes,
        };
        Ok((consume_all(input), ParsedEntity::Directory(entity)))
    }
}
