use std::fmt;

use serde::{Deserialize, Serialize};

use super::quality::{AudioCodec, PixelBitDepth, Resolution, VideoCodec, VideoMedia, VideoMode};

/// Technical attributes classified from a name's tags.
///
/// Built once per parse from the collected tags; each field holds the first
/// tag that matched its category. Tags that matched nothing are kept in
/// `unused_tags` for group and series inference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaMetadata {
    pub audio_codec: Option<AudioCodec>,

    /// Upper-cased 8-hex-digit checksum.
    pub crc32: Option<String>,

    pub pixel_bit_depth: Option<PixelBitDepth>,

    pub resolution: Option<Resolution>,

    pub video_codec: Option<VideoCodec>,

    pub video_media: Option<VideoMedia>,

    pub video_mode: Option<VideoMode>,

    /// Tags in input order that matched none of the categories.
    pub unused_tags: Vec<String>,
}

impl MediaMetadata {
    /// Returns `true` if no category was filled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.audio_codec.is_none()
            && self.crc32.is_none()
            && self.pixel_bit_depth.is_none()
            && self.resolution.is_none()
            && self.video_codec.is_none()
            && self.video_media.is_none()
            && self.video_mode.is_none()
    }
}

impl fmt::Display for MediaMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(mode) = self.video_mode {
            parts.push(mode.to_string());
        }
        if let Some(res) = self.resolution {
            parts.push(res.to_string());
        }
        if let Some(codec) = self.video_codec {
            parts.push(codec.to_string());
        }
        if let Some(depth) = self.pixel_bit_depth {
            parts.push(depth.to_string());
        }
        if let Some(media) = self.video_media {
            parts.push(media.to_string());
        }
        if let Some(audio) = self.audio_codec {
            parts.push(audio.to_string());
        }
        if let Some(ref crc) = self.crc32 {
            parts.push(crc.clone());
        }
        write!(f, "[{}]", parts.join(", "))
    }
}
