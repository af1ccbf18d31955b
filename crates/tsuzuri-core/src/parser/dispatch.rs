//! # Entity Dispatch
//!
//! Cleans a raw name once, then tries the entity grammars in priority order
//! and returns the first that matches. Names without a media extension are
//! tried as directories first; files go through OP/ED, OVA/ONA/OAD, episode
//! and movie in that order.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::classify::MetadataClassifier;
use crate::error::{Result, TsuzuriError};
use crate::grammar::{
    clean_input_string, trailing_extension, BoxedGrammar, Grammar, MemoCache, Profiler,
};
use crate::types::{EntityKind, ParsedEntity};

use super::common::{shared_header, GrammarContext};
use super::directory::DirectoryGrammar;
use super::episode::EpisodeGrammar;
use super::movie::MovieGrammar;
use super::opening_ending::OpeningEndingGrammar;
use super::original_animation::OriginalAnimationGrammar;

/// Configuration for the parser.
#[derive(Clone)]
pub struct ParserConfig {
    /// Cache header grammar results per (grammar, input, position)
    pub memoize: bool,
    /// Try names without a media extension as directories first
    pub detect_directories: bool,
    /// Receives (grammar name, elapsed time) for every profiled grammar run
    pub profiler: Option<Profiler>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            memoize: true,
            detect_directories: true,
            profiler: None,
        }
    }
}

impl ParserConfig {
    /// Create a new parser configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable memoization.
    pub fn with_memoize(mut self, enabled: bool) -> Self {
        self.memoize = enabled;
        self
    }

    /// Enable or disable the directory grammar.
    pub fn with_directories(mut self, enabled: bool) -> Self {
        self.detect_directories = enabled;
        self
    }

    /// Install a profiling hook.
    pub fn with_profiler(mut self, profiler: Profiler) -> Self {
        self.profiler = Some(profiler);
        self
    }
}

impl fmt::Debug for ParserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserConfig")
            .field("memoize", &self.memoize)
            .field("detect_directories", &self.detect_directories)
            .field("profiler", &self.profiler.is_some())
            .finish()
    }
}

/// Parses fansub file and directory names into [`ParsedEntity`] values.
///
/// The parser owns its memo cache; grammars are built once in
/// [`FansubParser::new`] and shared by every call, so one parser can serve
/// many threads. Memoized results only live for the call that produced them.
pub struct FansubParser {
    config: ParserConfig,
    cache: Arc<MemoCache>,
    directory: BoxedGrammar<ParsedEntity>,
    files: Vec<(EntityKind, BoxedGrammar<ParsedEntity>)>,
}

impl FansubParser {
    /// Builds every grammar for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `TsuzuriError::RegexError` if a classifier pattern fails to
    /// compile.
    pub fn new(config: ParserConfig) -> Result<Self> {
        let cache = Arc::new(MemoCache::new());
        let context = GrammarContext::new(
            config.memoize.then(|| cache.clone()),
            config.profiler.clone(),
        );
        let header = shared_header(&context, MetadataClassifier::new()?);

        let directory = context.profile(DirectoryGrammar::new(header.clone()), "directory");
        let files = vec![
            (
                EntityKind::OpeningEnding,
                context.profile(OpeningEndingGrammar::new(header.clone()), "opening_ending"),
            ),
            (
                EntityKind::OriginalAnimation,
                context.profile(
                    OriginalAnimationGrammar::new(header.clone()),
                    "original_animation",
                ),
            ),
            (
                EntityKind::Episode,
                context.profile(EpisodeGrammar::new(header.clone()), "episode"),
            ),
            (EntityKind::Movie, context.profile(MovieGrammar::new(header), "movie")),
        ];

        Ok(Self {
            config,
            cache,
            directory,
            files,
        })
    }

    /// Create a new parser with default configuration.
    pub fn default_parser() -> Result<Self> {
        Self::new(ParserConfig::default())
    }

    /// Parses a name; `None` for blank input or when no grammar matches.
    ///
    /// # Examples
    /// ```
    /// use tsuzuri_core::{FansubParser, ParsedEntity};
    ///
    /// let parser = FansubParser::default_parser().unwrap();
    /// let entity = parser.parse("[HorribleSubs] Working!!! - 07 [720p].mkv").unwrap();
    ///
    /// assert_eq!(entity.series(), Some("Working!!!"));
    /// assert!(matches!(entity, ParsedEntity::Episode(ref e) if e.number == 7));
    /// ```
    pub fn parse(&self, input: &str) -> Option<ParsedEntity> {
        self.try_parse(input).ok()
    }

    /// Like [`Self::parse`], but says why nothing was produced.
    ///
    /// # Errors
    ///
    /// Returns `TsuzuriError::EmptyInput` for blank input and
    /// `TsuzuriError::Unrecognized` when no entity grammar matched.
    pub fn try_parse(&self, input: &str) -> Result<ParsedEntity> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(TsuzuriError::EmptyInput);
        }

        let cleaned = clean_input_string(trimmed);
        let found = self.dispatch(trimmed, &cleaned);
        // memoized results only serve the grammars of this call
        self.cache.evict(&cleaned);

        found.ok_or_else(|| TsuzuriError::Unrecognized {
            input: trimmed.to_string(),
        })
    }

    /// Tries every entity grammar in priority order on a cleaned name.
    fn dispatch(&self, input: &str, cleaned: &str) -> Option<ParsedEntity> {
        let is_file = trailing_extension().parse_str(cleaned).is_ok();
        trace!(input = %input, cleaned = %cleaned, is_file, "dispatching");

        if !is_file && self.config.detect_directories {
            if let Ok((_, entity)) = self.directory.parse_str(cleaned) {
                debug!(input = %input, kind = ?EntityKind::Directory, "entity matched");
                return Some(entity);
            }
        }

        for (kind, grammar) in &self.files {
            trace!(kind = ?kind, "trying entity grammar");
            if let Ok((_, entity)) = grammar.parse_str(cleaned) {
                debug!(input = %input, kind = ?kind, "entity matched");
                return Some(entity);
            }
        }

        debug!(input = %input, "no entity grammar matched");
        None
    }

    /// Parses many names, keeping input order.
    pub fn parse_batch<'a, I>(&self, inputs: I) -> Vec<Option<ParsedEntity>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        inputs.into_iter().map(|input| self.parse(input)).collect()
    }

    /// Drops every memoized result.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Number of memoized results currently held. Calls in flight on other
    /// threads are the only source of entries between calls.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Get the parser configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }
}

impl fmt::Debug for FansubParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FansubParser")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// Convenience function to parse a name with default settings.
pub fn parse(input: &str) -> Option<ParsedEntity> {
    FansubParser::default_parser().ok()?.parse(input)
}
