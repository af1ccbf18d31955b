//! # Common Header
//!
//! Every entity grammar starts by re-deriving the same header fields from
//! the start of the name: tags and the metadata classified from them, the
//! release group, the media extension and the untagged main content. All of
//! it is lookahead, so the cursor is handed back where it came from.

use std::fmt;
use std::sync::Arc;

use crate::classify::{group_name, MetadataClassifier};
use crate::grammar::combinators::optional;
use crate::grammar::{
    collect_tags, main_content, memoize, profiled, trailing_extension, BoxedGrammar, Cursor,
    Grammar, GrammarExt, MemoCache, Parsed, Profiler,
};
use crate::types::{EntityHeader, MediaMetadata};

/// Grammar shared between several owners.
pub type SharedGrammar<T> = Arc<dyn Grammar<Output = T> + Send + Sync>;

/// Decides how named grammars are wrapped: memoized against a shared cache,
/// timed by a profiler, both or neither.
#[derive(Clone, Default)]
pub struct GrammarContext {
    cache: Option<Arc<MemoCache>>,
    profiler: Option<Profiler>,
}

impl GrammarContext {
    #[must_use]
    pub fn new(cache: Option<Arc<MemoCache>>, profiler: Option<Profiler>) -> Self {
        Self { cache, profiler }
    }

    /// Memoizes (when a cache is present) and profiles a grammar.
    pub fn wrap<G>(&self, grammar: G, name: &'static str) -> BoxedGrammar<G::Output>
    where
        G: Grammar + Send + Sync + 'static,
        G::Output: Clone + Send + Sync + 'static,
    {
        match &self.cache {
            Some(cache) => {
                let cached = memoize(grammar, name, cache.clone());
                profiled(cached, name, self.profiler.clone()).boxed()
            }
            None => self.profile(grammar, name),
        }
    }

    /// Profiles a grammar without memoizing it.
    pub fn profile<G>(&self, grammar: G, name: &'static str) -> BoxedGrammar<G::Output>
    where
        G: Grammar + Send + Sync + 'static,
    {
        profiled(grammar, name, self.profiler.clone()).boxed()
    }
}

impl fmt::Debug for GrammarContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrammarContext")
            .field("memoize", &self.cache.is_some())
            .field("profiler", &self.profiler.is_some())
            .finish()
    }
}

/// Header fields common to every entity, plus the main content the entity
/// tails work on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonHeader {
    pub group: Option<String>,
    pub metadata: Option<MediaMetadata>,
    pub extension: Option<String>,
    pub main_content: String,
}

impl CommonHeader {
    /// Completes the header with the series name the entity grammar found.
    #[must_use]
    pub fn into_header(self, series: Option<String>) -> EntityHeader {
        EntityHeader {
            group: self.group,
            series,
            metadata: self.metadata,
            extension: self.extension,
        }
    }
}

/// Derives a [`CommonHeader`] at the cursor without consuming anything.
pub struct HeaderGrammar {
    tags: BoxedGrammar<Vec<String>>,
    extension: BoxedGrammar<Option<String>>,
    content: BoxedGrammar<String>,
    classifier: MetadataClassifier,
}

impl HeaderGrammar {
    #[must_use]
    pub fn new(context: &GrammarContext, classifier: MetadataClassifier) -> Self {
        Self {
            tags: context.wrap(collect_tags(), "collect_tags"),
            extension: context.wrap(optional(trailing_extension()), "extension"),
            content: context.wrap(main_content(), "main_content"),
            classifier,
        }
    }
}

impl Grammar for HeaderGrammar {
    type Output = CommonHeader;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let (_, tags) = self.tags.parse(input)?;
        let (_, extension) = self.extension.parse(input)?;
        let (_, main_content) = self.content.parse(input)?;

        let metadata = self.classifier.classify(&tags);
        let group = group_name(&metadata.unused_tags);
        let metadata = (!metadata.is_empty()).then_some(metadata);

        Ok((
            input,
            CommonHeader {
                group,
                metadata,
                extension,
                main_content,
            },
        ))
    }
}

impl fmt::Debug for HeaderGrammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderGrammar").finish_non_exhaustive()
    }
}

/// Builds the shared header grammar, memoized as a whole under `"header"`.
#[must_use]
pub fn shared_header(
    context: &GrammarContext,
    classifier: MetadataClassifier,
) -> SharedGrammar<CommonHeader> {
    Arc::from(context.wrap(HeaderGrammar::new(context, classifier), "header"))
}

/// Trims separators off a candidate series name; blank names become `None`.
#[must_use]
pub fn series_name(text: &str) -> Option<String> {
    let trimmed = text.trim_matches(|c: char| c.is_whitespace() || c == '-' || c == '_');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Blank text becomes `None`, anything else is trimmed.
#[must_use]
pub fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// `true` if nothing but whitespace and dashes is left.
#[must_use]
pub fn is_trivial(text: &str) -> bool {
    text.chars().all(|c| c.is_whitespace() || c == '-')
}

/// Cursor past the end of the input; entity grammars own the whole name.
#[must_use]
pub fn consume_all(input: Cursor<'_>) -> Cursor<'_> {
    input.advance(input.remaining().len())
}

/// Runs the shared header and then a tail grammar over its main content.
///
/// The tail's own cursor positions refer to the main content, so its
/// failures are reported at the start of the name instead.
pub fn header_then_tail<'a, T, G>(
    header: &SharedGrammar<CommonHeader>,
    tail: &G,
    input: Cursor<'a>,
    expected: &'static str,
) -> Result<(CommonHeader, T), crate::grammar::Failure>
where
    G: Grammar<Output = T>,
{
    let (_, common) = header.parse(input)?;
    let value = tail
        .value_of(&common.main_content)
        .ok_or_else(|| input.fail("entity tail did not match", expected))?;
    Ok((common, value))
}
