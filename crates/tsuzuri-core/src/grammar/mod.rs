//! # Grammar Layer
//!
//! A small parser-combinator toolkit tuned for file names: character
//! grammars at the bottom, generic combinators above them, and the tag and
//! content grammars that every entity grammar builds on.

pub mod chars;
pub mod combinators;
pub mod cursor;
pub mod memo;
pub mod tags;

pub use combinators::GrammarExt;
pub use cursor::{from_fn, BoxedGrammar, Cursor, Failure, Grammar, Parsed};
pub use memo::{memoize, profiled, MemoCache, Memoize, Profiled, Profiler};
pub use tags::{
    all_tags, clean_input_string, collect_tags, is_media_extension, main_content,
    media_extension, meta_tag_content, meta_tag_group, trailing_extension, MEDIA_EXTENSIONS,
};
