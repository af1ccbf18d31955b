//! # Metadata Tag Classifier
//!
//! Turns the free-text tags collected from a name into a [`MediaMetadata`]
//! record. Every tag is tried against all seven categories independently;
//! a tag counts as used if it filled or matched any of them. The tags that
//! matched nothing are handed on for release-group inference.

pub mod tables;

use chrono::NaiveDate;
use regex::Regex;
use tracing::trace;

use crate::error::Result;
use crate::types::{MediaMetadata, Resolution};

use self::tables::{lookup, AUDIO_CODECS, PIXEL_BIT_DEPTHS, VIDEO_CODECS, VIDEO_MEDIA, VIDEO_MODES};

/// Date layouts a bracketed release date may use. Dots have already been
/// turned into spaces by input cleaning, so the spaced forms matter most.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y.%m.%d",
    "%Y/%m/%d",
    "%Y %m %d",
    "%Y%m%d",
    "%d.%m.%Y",
    "%d %m %Y",
];

/// Classifies tags into typed metadata using the static tables in
/// [`tables`] plus two regexes for checksums and frame sizes.
#[derive(Debug, Clone)]
pub struct MetadataClassifier {
    re_crc32: Regex,
    re_resolution: Regex,
}

impl MetadataClassifier {
    /// Compiles the classifier's patterns.
    ///
    /// # Errors
    ///
    /// Returns `TsuzuriError::RegexError` if a pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_crc32: Regex::new(r"\b([0-9A-Fa-f]{8})\b")?,
            re_resolution: Regex::new(r"(?i)(\D*)(\d{3,4})\s?x\s?(\d{3,4})(\D*)")?,
        })
    }

    /// Classifies every tag. The returned record is empty (see
    /// [`MediaMetadata::is_empty`]) when no tag matched any category; all
    /// tags then end up in `unused_tags`.
    #[must_use]
    pub fn classify(&self, tags: &[String]) -> MediaMetadata {
        let mut metadata = MediaMetadata::default();

        for tag in tags {
            let mut used = false;

            if let Some(codec) = lookup(AUDIO_CODECS, tag) {
                metadata.audio_codec.get_or_insert(codec);
                used = true;
            }
            if let Some(crc) = self.crc32(tag) {
                metadata.crc32.get_or_insert(crc);
                used = true;
            }
            if let Some(depth) = lookup(PIXEL_BIT_DEPTHS, tag) {
                metadata.pixel_bit_depth.get_or_insert(depth);
                used = true;
            }
            if let Some(resolution) = self.resolution(tag) {
                metadata.resolution.get_or_insert(resolution);
                used = true;
            }
            if let Some(codec) = lookup(VIDEO_CODECS, tag) {
                metadata.video_codec.get_or_insert(codec);
                used = true;
            }
            if let Some(media) = lookup(VIDEO_MEDIA, tag) {
                metadata.video_media.get_or_insert(media);
                used = true;
            }
            if let Some(mode) = lookup(VIDEO_MODES, tag) {
                metadata.video_mode.get_or_insert(mode);
                used = true;
            }

            trace!(tag = %tag, used, "classified tag");
            if !used {
                metadata.unused_tags.push(tag.clone());
            }
        }

        metadata
    }

    /// Like [`Self::classify`], but `None` when nothing matched.
    #[must_use]
    pub fn metadata(&self, tags: &[String]) -> Option<MediaMetadata> {
        let metadata = self.classify(tags);
        (!metadata.is_empty()).then_some(metadata)
    }

    /// Upper-cased CRC32 checksum, if the tag carries one.
    #[must_use]
    pub fn crc32(&self, tag: &str) -> Option<String> {
        self.re_crc32
            .captures(tag)
            .map(|caps| caps[1].to_ascii_uppercase())
    }

    /// Width x height pair, if the tag carries one.
    #[must_use]
    pub fn resolution(&self, tag: &str) -> Option<Resolution> {
        let caps = self.re_resolution.captures(tag)?;
        let width = caps[2].parse().ok()?;
        let height = caps[3].parse().ok()?;
        Some(Resolution::new(width, height))
    }
}

/// Picks the release group out of the unclassified tags: the first one that
/// does not read as a date.
#[must_use]
pub fn group_name(unused_tags: &[String]) -> Option<String> {
    unused_tags
        .iter()
        .map(|tag| tag.trim())
        .find(|tag| !tag.is_empty() && !is_date(tag))
        .map(str::to_string)
}

/// `true` for release dates such as `2015-01-31` and bare years like `2015`.
#[must_use]
pub fn is_date(tag: &str) -> bool {
    if tag.len() == 4 && tag.bytes().all(|b| b.is_ascii_digit()) {
        return tag
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
            .is_some();
    }
    DATE_FORMATS
        .iter()
        .any(|format| NaiveDate::parse_from_str(tag, format).is_ok())
}
