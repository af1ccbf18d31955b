//! OVA, ONA and OAD releases: `Series OVA 2 - Title`, `Series - ONA - 03`.

use crate::grammar::chars::{
    dash_separator_token, keyword, no_letter_follows, whitespace, word_start,
};
use crate::grammar::combinators::{either_matches, filter, line_up_to, preceded};
use crate::grammar::{Cursor, Grammar, GrammarExt, Parsed};
use crate::types::{OriginalAnimation, ParsedEntity, ReleaseType};

use super::common::{
    consume_all, header_then_tail, non_blank, series_name, CommonHeader, SharedGrammar,
};
use super::episode::episode_number;

/// `OVA`, `ONA` or `OAD`, not followed by a letter.
pub fn release_token() -> impl Grammar<Output = ReleaseType> + Copy {
    keyword("OVA")
        .map(|_| ReleaseType::Ova)
        .or(keyword("ONA").map(|_| ReleaseType::Ona))
        .or(keyword("OAD").map(|_| ReleaseType::Oad))
        .skip(no_letter_follows())
}

/// A release token led by a dash separator or a single whitespace.
fn separated_release_token() -> impl Grammar<Output = ReleaseType> + Copy {
    preceded(either_matches(dash_separator_token(), whitespace()), release_token())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalAnimationMatch {
    pub series: Option<String>,
    pub release: ReleaseType,
    pub episode: Option<u32>,
    pub title: Option<String>,
}

/// Splits what follows the release token into an episode number and a
/// title. Dash separators are dropped first; the first word-start episode
/// number is taken out and whatever text is left becomes the title.
#[must_use]
pub fn episode_and_title(rest: &str) -> (Option<u32>, Option<String>) {
    let cleaned = filter(dash_separator_token()).value_of(rest).unwrap_or_default();
    let cleaned = cleaned.trim_matches(|c: char| c.is_whitespace() || c == '-');

    let number = preceded(word_start(), episode_number());
    match line_up_to(number).then(number).parse_str(cleaned) {
        Ok((after, (before, (episode, _)))) => {
            let title = format!("{} {}", before.trim(), after.remaining().trim());
            (Some(episode), non_blank(&title))
        }
        Err(_) => (None, non_blank(cleaned)),
    }
}

/// Series, release token, then the optional episode and title.
#[derive(Debug, Clone, Copy)]
pub struct OriginalAnimationTail;

impl Grammar for OriginalAnimationTail {
    type Output = OriginalAnimationMatch;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let (at, series) = line_up_to(separated_release_token()).parse(input)?;
        let (rest, release) = separated_release_token().parse(at)?;
        let (episode, title) = episode_and_title(rest.remaining());
        Ok((
            consume_all(rest),
            OriginalAnimationMatch {
                series: series_name(&series),
                release,
                episode,
                title,
            },
        ))
    }
}

/// Entity grammar for [`OriginalAnimation`].
pub struct OriginalAnimationGrammar {
    header: SharedGrammar<CommonHeader>,
}

impl OriginalAnimationGrammar {
    #[must_use]
    pub fn new(header: SharedGrammar<CommonHeader>) -> Self {
        Self { header }
    }
}

impl Grammar for OriginalAnimationGrammar {
    type Output = ParsedEntity;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let (common, found) =
            header_then_tail(&self.header, &OriginalAnimationTail, input, "OVA, ONA or OAD token")?;
        let entity = OriginalAnimation {
            header: common.into_header(found.series),
            release: found.release,
            episode: found.episode,
            title: found.title,
        };
        Ok((consume_all(input), ParsedEntity::OriginalAnimation(entity)))
    }
}
