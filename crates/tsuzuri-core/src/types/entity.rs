use std::fmt;

use serde::{Deserialize, Serialize};

use super::metadata::MediaMetadata;

/// Fields every entity kind carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityHeader {
    /// Release group, e.g. `"HorribleSubs"`.
    pub group: Option<String>,
    /// Series title as written in the name.
    pub series: Option<String>,
    pub metadata: Option<MediaMetadata>,
    /// Media extension with its dot, e.g. `".mkv"`. Always `None` for directories.
    pub extension: Option<String>,
}

/// A regular numbered episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub header: EntityHeader,
    pub number: u32,
    /// Release revision from a `v2`-style suffix.
    pub version: Option<u32>,
}

/// A numbered movie, e.g. `"Series #3"`, `"Series EP3"` or `"Series III"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub header: EntityHeader,
    pub number: u32,
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    Opening,
    Ending,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opening => write!(f, "OP"),
            Self::Ending => write!(f, "ED"),
        }
    }
}

/// An opening or ending theme video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningEnding {
    pub header: EntityHeader,
    pub segment: Segment,
    pub sequence: Option<u32>,
    /// Creditless (`NC`) release.
    pub no_credits: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReleaseType {
    /// Original video animation
    Ova,
    /// Original net animation
    Ona,
    /// Original animation DVD
    Oad,
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ova => write!(f, "OVA"),
            Self::Ona => write!(f, "ONA"),
            Self::Oad => write!(f, "OAD"),
        }
    }
}

/// An OVA, ONA or OAD release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginalAnimation {
    pub header: EntityHeader,
    pub release: ReleaseType,
    pub episode: Option<u32>,
    pub title: Option<String>,
}

/// Inclusive episode range, e.g. `01-12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EpisodeRange {
    pub start: u32,
    pub end: u32,
}

impl fmt::Display for EpisodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.start, self.end)
    }
}

/// A batch directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    pub header: EntityHeader,
    pub volume: Option<u32>,
    pub episodes: Option<EpisodeRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Episode,
    Movie,
    OpeningEnding,
    OriginalAnimation,
    Directory,
}

/// The structured result of parsing one name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ParsedEntity {
    Episode(Episode),
    Movie(Movie),
    OpeningEnding(OpeningEnding),
    OriginalAnimation(OriginalAnimation),
    Directory(Directory),
}

impl ParsedEntity {
    #[must_use]
    pub fn header(&self) -> &EntityHeader {
        match self {
            Self::Episode(e) => &e.header,
            Self::Movie(m) => &m.header,
            Self::OpeningEnding(o) => &o.header,
            Self::OriginalAnimation(o) => &o.header,
            Self::Directory(d) => &d.header,
        }
    }

    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Episode(_) => EntityKind::Episode,
            Self::Movie(_) => EntityKind::Movie,
            Self::OpeningEnding(_) => EntityKind::OpeningEnding,
            Self::OriginalAnimation(_) => EntityKind::OriginalAnimation,
            Self::Directory(_) => EntityKind::Directory,
        }
    }

    #[must_use]
    pub fn series(&self) -> Option<&str> {
        self.header().series.as_deref()
    }

    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.header().group.as_deref()
    }

    #[must_use]
    pub fn metadata(&self) -> Option<&MediaMetadata> {
        self.header().metadata.as_ref()
    }
}

/// Appends the header fields; `separate` says whether a field was already written.
fn write_header(f: &mut fmt::Formatter<'_>, header: &EntityHeader, separate: bool) -> fmt::Result {
    let mut fields = Vec::new();
    if let Some(ref group) = header.group {
        fields.push(format!("group={group:?}"));
    }
    if let Some(ref series) = header.series {
        fields.push(format!("series={series:?}"));
    }
    if let Some(ref metadata) = header.metadata {
        fields.push(format!("metadata={metadata}"));
    }
    if let Some(ref ext) = header.extension {
        fields.push(format!("ext={ext}"));
    }
    if fields.is_empty() {
        return Ok(());
    }
    if separate {
        f.write_str(", ")?;
    }
    f.write_str(&fields.join(", "))
}

impl fmt::Display for ParsedEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Episode(e) => {
                write!(f, "Episode(number={}", e.number)?;
                if let Some(version) = e.version {
                    write!(f, ", version={version}")?;
                }
                write_header(f, &e.header, true)?;
            }
            Self::Movie(m) => {
                write!(f, "Movie(number={}", m.number)?;
                if let Some(ref subtitle) = m.subtitle {
                    write!(f, ", subtitle={subtitle:?}")?;
                }
                write_header(f, &m.header, true)?;
            }
            Self::OpeningEnding(o) => {
                write!(f, "OpeningEnding(segment={}", o.segment)?;
                if let Some(sequence) = o.sequence {
                    write!(f, ", sequence={sequence}")?;
                }
                if o.no_credits {
                    write!(f, ", creditless")?;
                }
                write_header(f, &o.header, true)?;
            }
            Self::OriginalAnimation(o) => {
                write!(f, "OriginalAnimation(release={}", o.release)?;
                if let Some(episode) = o.episode {
                    write!(f, ", episode={episode}")?;
                }
                if let Some(ref title) = o.title {
                    write!(f, ", title={title:?}")?;
                }
                write_header(f, &o.header, true)?;
            }
            Self::Directory(d) => {
                write!(f, "Directory(")?;
                let mut first = true;
                if let Some(volume) = d.volume {
                    write!(f, "volume={volume}")?;
                    first = false;
                }
                if let Some(range) = d.episodes {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "episodes={range}")?;
                    first = false;
                }
                write_header(f, &d.header, !first)?;
            }
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::quality::VideoMode;

    fn header() -> EntityHeader {
        EntityHeader {
            group: Some("Commie".into()),
            series: Some("Teekyuu".into()),
            metadata: Some(MediaMetadata {
                crc32: Some("76ADB77A".into()),
                ..MediaMetadata::default()
            }),
            extension: Some(".mkv".into()),
        }
    }

    #[test]
    fn accessors_reach_header() {
        let entity = ParsedEntity::Episode(Episode {
            header: header(),
            number: 38,
            version: None,
        });
        assert_eq!(entity.kind(), EntityKind::Episode);
        assert_eq!(entity.series(), Some("Teekyuu"));
        assert_eq!(entity.group(), Some("Commie"));
        assert_eq!(entity.metadata().and_then(|m| m.crc32.as_deref()), Some("76ADB77A"));
    }

    #[test]
    fn display_is_readable() {
        let entity = ParsedEntity::Episode(Episode {
            header: header(),
            number: 38,
            version: Some(2),
        });
        let text = entity.to_string();
        assert!(text.starts_with("Episode(number=38, version=2"));
        assert!(text.contains("series=\"Teekyuu\""));
        assert!(text.ends_with(')'));

        let dir = ParsedEntity::Directory(Directory {
            header: EntityHeader::default(),
            volume: None,
            episodes: Some(EpisodeRange { start: 1, end: 3 }),
        });
        assert_eq!(dir.to_string(), "Directory(episodes=01-03)");

        let bare = ParsedEntity::Directory(Directory {
            header: EntityHeader {
                series: Some("Cross Ange".into()),
                ..EntityHeader::default()
            },
            volume: None,
            episodes: None,
        });
        assert_eq!(bare.to_string(), "Directory(series=\"Cross Ange\")");
    }

    #[test]
    fn equality_is_by_value() {
        let a = OpeningEnding {
            header: header(),
            segment: Segment::Opening,
            sequence: Some(1),
            no_credits: true,
        };
        let mut b = a.clone();
        assert_eq!(a, b);
        b.no_credits = false;
        assert_ne!(a, b);
    }

    #[test]
    fn parsed_entity_serialization_roundtrip() {
        let mut h = header();
        if let Some(ref mut metadata) = h.metadata {
            metadata.video_mode = Some(VideoMode::P720);
        }
        let entity = ParsedEntity::OriginalAnimation(OriginalAnimation {
            header: h,
            release: ReleaseType::Ova,
            episode: Some(2),
            title: Some("Beach Episode".into()),
        });

        let json = serde_json::to_string(&entity).unwrap();
        assert!(json.contains(r#""kind":"OriginalAnimation""#));
        let back: ParsedEntity = serde_json::from_str(&json).unwrap();
        assert_eq!(entity, back);
    }
}
