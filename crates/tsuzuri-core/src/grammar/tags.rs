//! # Tag & Content Grammars
//!
//! Fansub names wrap metadata in `[...]` and `(...)` groups at the front,
//! middle and end of the name. These grammars pull those groups out, find
//! the untagged "main content" between them, and normalize raw names before
//! any of that happens.

use super::chars::{
    closed_tag_delimiter, dot, end_of_input, open_tag_delimiter, whitespaces, Line,
};
use super::combinators::{
    line_up_to, many, many1, optional, preceded, scan_for, GrammarExt,
};
use super::cursor::{Cursor, Grammar, Parsed};

/// Media container extensions recognized at the end of a file name.
pub const MEDIA_EXTENSIONS: &[&str] = &["avi", "mkv", "mp4", "m2ts", "ogm", "ts", "webm", "wmv"];

/// Returns `true` if `ext` (without the dot) is a known media container.
#[must_use]
pub fn is_media_extension(ext: &str) -> bool {
    MEDIA_EXTENSIONS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(ext))
}

/// Content strictly between one opening and the next closing delimiter,
/// trimmed. Delimiter kinds need not pair up: `[720p)` is accepted.
#[derive(Debug, Clone, Copy)]
pub struct MetaTagContent;

impl Grammar for MetaTagContent {
    type Output = String;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let (body, _) = open_tag_delimiter().parse(input)?;
        let (close, content) = line_up_to(closed_tag_delimiter())
            .parse(body)
            .map_err(|_| body.fail("unclosed tag", "closing tag delimiter"))?;
        let (rest, _) = closed_tag_delimiter().parse(close)?;
        Ok((rest, content.trim().to_string()))
    }
}

pub fn meta_tag_content() -> MetaTagContent {
    MetaTagContent
}

/// One or more adjacent tags, optionally separated by whitespace.
pub fn meta_tag_group() -> impl Grammar<Output = Vec<String>> + Copy {
    many1(preceded(whitespaces(), meta_tag_content()))
}

/// Like [`meta_tag_group`] but also accepts zero tags.
pub fn all_tags() -> impl Grammar<Output = Vec<String>> + Copy {
    many(preceded(whitespaces(), meta_tag_content()))
}

/// Every tag in the input, wherever it appears, in left-to-right order.
/// Never fails.
#[derive(Debug, Clone, Copy)]
pub struct CollectTags;

impl Grammar for CollectTags {
    type Output = Vec<String>;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let group = scan_for(meta_tag_group());
        let mut tags = Vec::new();
        let mut cursor = input;
        while let Ok((rest, found)) = group.parse(cursor) {
            tags.extend(found);
            cursor = rest;
        }
        Ok((cursor, tags))
    }
}

pub fn collect_tags() -> CollectTags {
    CollectTags
}

/// A recognized media extension at the very end of the input, returned with
/// its dot and original casing (`".mkv"`).
#[derive(Debug, Clone, Copy)]
pub struct MediaExtension;

impl Grammar for MediaExtension {
    type Output = String;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let (after_dot, _) = dot().parse(input)?;
        let ext = after_dot.remaining();
        if ext.is_empty() || !is_media_extension(ext) {
            return Err(after_dot.fail("unknown extension", "media extension"));
        }
        let (rest, _) = Line.parse(after_dot)?;
        end_of_input().parse(rest)?;
        Ok((rest, format!(".{ext}")))
    }
}

pub fn media_extension() -> MediaExtension {
    MediaExtension
}

/// The media extension anywhere ahead, found by scanning.
pub fn trailing_extension() -> impl Grammar<Output = String> + Copy {
    scan_for(media_extension())
}

/// The untagged body of a name: skips a leading tag group if present, then
/// takes everything up to the next tag, the media extension or the end.
///
/// `"[Group] Series - 01 [720p].mkv"` yields `"Series - 01"`.
#[derive(Debug, Clone, Copy)]
pub struct MainContent;

impl Grammar for MainContent {
    type Output = String;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let (body, _) = optional(all_tags()).skip(whitespaces()).parse(input)?;
        let stop = open_tag_delimiter()
            .map(|_| ())
            .or(media_extension().map(|_| ()))
            .or(end_of_input());
        let (rest, content) = line_up_to(stop).parse(body)?;
        Ok((rest, content.trim().to_string()))
    }
}

pub fn main_content() -> MainContent {
    MainContent
}

/// Normalizes a raw name: underscores become spaces, and dots become spaces
/// except for the dot of a trailing media extension, which is kept verbatim.
///
/// If the last dot is the first or last character, all dots are removed
/// instead. Applying this twice gives the same result as applying it once.
#[must_use]
pub fn clean_input_string(raw: &str) -> String {
    let text = raw.replace('_', " ");
    let Some(last_dot) = text.rfind('.') else {
        return text;
    };

    if last_dot == 0 || last_dot == text.len() - 1 {
        return text.replace('.', "");
    }

    let (stem, ext) = text.split_at(last_dot);
    if is_media_extension(&ext[1..]) {
        format!("{}{ext}", stem.replace('.', " "))
    } else {
        text.replace('.', " ")
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn tag_content_is_trimmed() {
        assert_eq!(
            meta_tag_content().value_of("[ HorribleSubs ]").as_deref(),
            Some("HorribleSubs")
        );
        assert_eq!(meta_tag_content().value_of("(720p)").as_deref(), Some("720p"));
        assert!(meta_tag_content().parse_str("[unclosed").is_err());
        assert!(meta_tag_content().parse_str("plain").is_err());
    }

    #[test]
    fn crossed_delimiters_are_accepted() {
        assert_eq!(meta_tag_content().value_of("[720p)").as_deref(), Some("720p"));
        assert_eq!(meta_tag_content().value_of("(BD]").as_deref(), Some("BD"));
    }

    #[test]
    fn tag_group_stops_at_text() {
        let (rest, tags) = meta_tag_group().parse_str("[A] [B](C) text [D]").unwrap();
        assert_eq!(tags, vec!["A", "B", "C"]);
        assert_eq!(rest.remaining(), " text [D]");
        assert!(meta_tag_group().parse_str("text").is_err());
        assert_eq!(all_tags().value_of("text"), Some(vec![]));
    }

    #[test]
    fn collect_tags_finds_front_middle_end() {
        let tags = collect_tags()
            .value_of("[Coalgirls] Cross Ange (BD) 01-03 [1280x720][FLAC]")
            .unwrap();
        assert_eq!(tags, vec!["Coalgirls", "BD", "1280x720", "FLAC"]);
    }

    #[test]
    fn collect_tags_keeps_duplicates() {
        let tags = collect_tags().value_of("[A] x [A]").unwrap();
        assert_eq!(tags, vec!["A", "A"]);
        assert_eq!(collect_tags().value_of("no tags"), Some(vec![]));
    }

    #[test]
    fn main_content_strips_tags_and_extension() {
        let cases = [
            ("[HorribleSubs] Working!!! - 07 [720p].mkv", "Working!!! - 07"),
            ("[Coalgirls] Cross Ange 01-03 (1280x720 Blu-ray FLAC)", "Cross Ange 01-03"),
            ("Series - 01.mkv", "Series - 01"),
            ("[A][B] Title", "Title"),
            ("Title only", "Title only"),
        ];
        for (input, expected) in cases {
            assert_eq!(main_content().value_of(input).as_deref(), Some(expected), "{input}");
        }
    }

    #[test]
    fn media_extension_keeps_casing() {
        assert_eq!(media_extension().value_of(".MKV").as_deref(), Some(".MKV"));
        assert!(media_extension().parse_str(".txt").is_err());
        assert!(media_extension().parse_str(".mkv ").is_err());
        assert!(media_extension().parse_str(".").is_err());
        assert_eq!(trailing_extension().value_of("Show - 01.mp4").as_deref(), Some(".mp4"));
        assert!(trailing_extension().parse_str("Show - 01").is_err());
    }

    #[test]
    fn clean_input_string_cases() {
        assert_eq!(clean_input_string("One.Piece.1084.mkv"), "One Piece 1084.mkv");
        assert_eq!(
            clean_input_string("[Coalgirls]_Cross_Ange_01-03_(1280x720_Blu-ray_FLAC)"),
            "[Coalgirls] Cross Ange 01-03 (1280x720 Blu-ray FLAC)"
        );
        assert_eq!(clean_input_string("Show.S01.Release"), "Show S01 Release");
        assert_eq!(clean_input_string("Show.Name."), "ShowName");
        assert_eq!(clean_input_string(".hidden"), "hidden");
        assert_eq!(clean_input_string("Show.Name.MKV"), "Show Name.MKV");
        assert_eq!(clean_input_string("plain"), "plain");
    }

    proptest! {
        #[test]
        fn clean_input_string_is_idempotent(raw in "[a-zA-Z0-9 ._\\-\\[\\]()]{0,40}") {
            let once = clean_input_string(&raw);
            prop_assert_eq!(clean_input_string(&once), once);
        }

        #[test]
        fn clean_input_string_preserves_extension(
            stem in "[a-zA-Z0-9 ._\\-]{0,30}",
            ext in prop::sample::select(MEDIA_EXTENSIONS.to_vec()),
            upper in any::<bool>(),
        ) {
            let ext = if upper { ext.to_uppercase() } else { ext.to_string() };
            let raw = format!("x{stem}.{ext}");
            let cleaned = clean_input_string(&raw);
            let suffix = format!(".{ext}");
            prop_assert!(cleaned.ends_with(&suffix));
            prop_assert_eq!(cleaned.matches('.').count(), 1);
        }

        #[test]
        fn collect_tags_round_trips(
            contents in prop::collection::vec("[a-zA-Z0-9]{1,8}( [a-zA-Z0-9]{1,8})?", 1..6),
            fillers in prop::collection::vec("[a-zA-Z0-9 ]{0,8}", 6),
            parens in prop::collection::vec(any::<bool>(), 6),
        ) {
            let mut input = String::new();
            for (i, content) in contents.iter().enumerate() {
                input.push_str(&fillers[i]);
                let (open, close) = if parens[i] { ('(', ')') } else { ('[', ']') };
                input.push(open);
                input.push(' ');
                input.push_str(content);
                input.push(close);
            }
            let tags = collect_tags().value_of(&input).unwrap();
            prop_assert_eq!(tags, contents);
        }
    }
}
