pub mod entity;
pub mod metadata;
pub mod quality;

pub use entity::{
    Directory, EntityHeader, EntityKind, Episode, EpisodeRange, Movie, OpeningEnding,
    OriginalAnimation, ParsedEntity, ReleaseType, Segment,
};
pub use metadata::MediaMetadata;
pub use quality::{AudioCodec, PixelBitDepth, Resolution, VideoCodec, VideoMedia, VideoMode};
