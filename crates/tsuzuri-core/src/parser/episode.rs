//! Regular episodes: `Series - 07`, `Series 1084`, `Series - 07v2`.

use crate::grammar::chars::{keyword, number, whitespace, word_end};
use crate::grammar::combinators::{last, line_up_to, optional, preceded};
use crate::grammar::{Cursor, Grammar, GrammarExt, Parsed};
use crate::types::{Episode, ParsedEntity};

use super::common::{
    consume_all, header_then_tail, is_trivial, series_name, CommonHeader, SharedGrammar,
};

/// An episode number with an optional `v<N>` revision, ending at a word
/// boundary: `07`, `07v2`. `1080p` is not one.
pub fn episode_number() -> impl Grammar<Output = (u32, Option<u32>)> + Copy {
    number()
        .then(optional(preceded(keyword("v"), number())))
        .skip(word_end())
}

/// Whitespace-led episode number.
pub fn episode_token() -> impl Grammar<Output = (u32, Option<u32>)> + Copy {
    preceded(whitespace(), episode_number())
}

/// What the episode tail extracted from the main content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeMatch {
    pub series: Option<String>,
    pub number: u32,
    pub version: Option<u32>,
}

/// Series up to the last episode token, then the token. Fails when text
/// other than dashes and whitespace follows it.
#[derive(Debug, Clone, Copy)]
pub struct EpisodeTail;

impl Grammar for EpisodeTail {
    type Output = EpisodeMatch;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let (at, series) = line_up_to(last(episode_token())).parse(input)?;
        let (rest, (number, version)) = episode_token().parse(at)?;
        if !is_trivial(rest.remaining()) {
            return Err(rest.fail("text after episode number", "end of title"));
        }
        Ok((
            consume_all(rest),
            EpisodeMatch {
                series: series_name(&series),
                number,
                version,
            },
        ))
    }
}

/// Entity grammar for [`Episode`].
pub struct EpisodeGrammar {
    header: SharedGrammar<CommonHeader>,
}

impl EpisodeGrammar {
    #[must_use]
    pub fn new(header: SharedGrammar<CommonHeader>) -> Self {
        Self { header }
    }
}

impl Grammar for EpisodeGrammar {
    type Output = ParsedEntity;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let (common, found) =
            header_then_tail(&self.header, &EpisodeTail, input, "episode number")?;
        let entity = Episode {
            header: common.into_header(found.series),
            number: found.number,
            version: found.version,
        };
        Ok((consume_all(input), ParsedEntity::Episode(entity)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::MetadataClassifier;
    use crate::parser::common::{shared_header, GrammarContext};

    fn tail(input: &str) -> Option<EpisodeMatch> {
        EpisodeTail.value_of(input)
    }

    #[test]
    fn episode_number_with_version() {
        assert_eq!(episode_number().value_of("07"), Some((7, None)));
        assert_eq!(episode_number().value_of("07v2"), Some((7, Some(2))));
        assert_eq!(episode_number().value_of("07V3 "), Some((7, Some(3))));
        assert!(episode_number().parse_str("1080p").is_err());
        assert!(episode_number().parse_str("12345").is_err());
    }

    #[test]
    fn dash_separated_episode() {
        let found = tail("Kekkai Sensen - 01").unwrap();
        assert_eq!(found.series.as_deref(), Some("Kekkai Sensen"));
        assert_eq!(found.number, 1);
        assert_eq!(found.version, None);
    }

    #[test]
    fn last_number_wins() {
        let found = tail("Mob Psycho 100 - 12v2").unwrap();
        assert_eq!(found.series.as_deref(), Some("Mob Psycho 100"));
        assert_eq!(found.number, 12);
        assert_eq!(found.version, Some(2));

        let found = tail("One Piece 1084").unwrap();
        assert_eq!(found.series.as_deref(), Some("One Piece"));
        assert_eq!(found.number, 1084);
    }

    #[test]
    fn trailing_text_rejects() {
        assert!(tail("Series 2 The Movie").is_none());
        assert!(tail("Series #3").is_none());
        assert!(tail("Series EP3").is_none());
        assert!(tail("Series").is_none());
    }

    #[test]
    fn trailing_dash_is_trivial() {
        let found = tail("Series - 05 -").unwrap();
        assert_eq!(found.number, 5);
    }

    #[test]
    fn full_entity_from_name() {
        let header = shared_header(&GrammarContext::default(), MetadataClassifier::new().unwrap());
        let entity = EpisodeGrammar::new(header)
            .value_of("[Commie] Teekyuu - 38 [76ADB77A].mkv")
            .unwrap();
        let ParsedEntity::Episode(episode) = entity else {
            panic!("expected episode");
        };
        assert_eq!(episode.header.group.as_deref(), Some("Commie"));
        assert_eq!(episode.header.series.as_deref(), Some("Teekyuu"));
        assert_eq!(episode.number, 38);
        assert_eq!(
            episode.header.metadata.as_ref().and_then(|m| m.crc32.as_deref()),
            Some("76ADB77A")
        );
    }
}
