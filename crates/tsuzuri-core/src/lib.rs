//! # Tsuzuri Core
//!
//! Parses fansub file and directory names into structured entities:
//! release group, series, episode/volume/movie numbers, OP/ED and OVA
//! markers, and technical tags such as resolution, codecs and checksums.
//!
//! Parsing is built from a small grammar-combinator layer ([`grammar`]);
//! the tags found in a name are typed by the [`classify`] module, and the
//! entity grammars in [`parser`] are tried in priority order.
//!
//! ## Quick Start
//!
//! ```rust
//! use tsuzuri_core::{FansubParser, ParsedEntity};
//!
//! let parser = FansubParser::default_parser().unwrap();
//! let entity = parser.parse("[Commie] Teekyuu - 38 [76ADB77A].mkv").unwrap();
//!
//! assert_eq!(entity.series(), Some("Teekyuu"));
//! assert_eq!(entity.group(), Some("Commie"));
//! assert!(matches!(entity, ParsedEntity::Episode(ref e) if e.number == 38));
//! ```
pub mod classify;
pub mod error;
pub mod grammar;
pub mod parser;
pub mod types;

// Re-export primary API
pub use classify::MetadataClassifier;
pub use error::{Result, TsuzuriError};
pub use grammar::{Cursor, Failure, Grammar, GrammarExt, MemoCache, Profiler};
pub use parser::{parse, FansubParser, ParserConfig};
pub use types::{
    AudioCodec, Directory, EntityHeader, EntityKind, Episode, EpisodeRange, MediaMetadata, Movie,
    OpeningEnding, OriginalAnimation, ParsedEntity, PixelBitDepth, ReleaseType, Resolution,
    Segment, VideoCodec, VideoMedia, VideoMode,
};
