use std::fmt;

use serde::{Deserialize, Serialize};

/// Scan mode / line count of the video stream, as written in tags like `720p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VideoMode {
    /// 480p Standard Definition
    P480,
    /// 576p PAL Standard Definition
    P576,
    /// 720p High Definition
    P720,
    /// 1080i interlaced Full HD
    I1080,
    /// 1080p Full HD
    P1080,
    /// 1440p Quad HD
    P1440,
    /// 2160p Ultra HD, 4K
    P2160,
}

impl fmt::Display for VideoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::P480 => write!(f, "480p"),
            Self::P576 => write!(f, "576p"),
            Self::P720 => write!(f, "720p"),
            Self::I1080 => write!(f, "1080i"),
            Self::P1080 => write!(f, "1080p"),
            Self::P1440 => write!(f, "1440p"),
            Self::P2160 => write!(f, "2160p"),
        }
    }
}

/// Video codec named in a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoCodec {
    /// H.264 / AVC / x264
    Avc,
    /// H.265 / HEVC / x265
    Hevc,
    Av1,
    Vp9,
    Xvid,
    DivX,
    Wmv,
}

impl fmt::Display for VideoCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Avc => write!(f, "H.264"),
            Self::Hevc => write!(f, "HEVC"),
            Self::Av1 => write!(f, "AV1"),
            Self::Vp9 => write!(f, "VP9"),
            Self::Xvid => write!(f, "XviD"),
            Self::DivX => write!(f, "DivX"),
            Self::Wmv => write!(f, "WMV"),
        }
    }
}

/// Audio codec named in a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCodec {
    Aac,
    Ac3,
    Dts,
    Eaac,
    Flac,
    Mp3,
    Opus,
    TrueHd,
    Vorbis,
}

impl fmt::Display for AudioCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aac => write!(f, "AAC"),
            Self::Ac3 => write!(f, "AC3"),
            Self::Dts => write!(f, "DTS"),
            Self::Eaac => write!(f, "E-AAC+"),
            Self::Flac => write!(f, "FLAC"),
            Self::Mp3 => write!(f, "MP3"),
            Self::Opus => write!(f, "Opus"),
            Self::TrueHd => write!(f, "TrueHD"),
            Self::Vorbis => write!(f, "Vorbis"),
        }
    }
}

/// Source medium the video was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoMedia {
    BluRay,
    Dvd,
    Tv,
    Web,
    LaserDisc,
    Vhs,
}

impl fmt::Display for VideoMedia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BluRay => write!(f, "Blu-ray"),
            Self::Dvd => write!(f, "DVD"),
            Self::Tv => write!(f, "TV"),
            Self::Web => write!(f, "WEB"),
            Self::LaserDisc => write!(f, "LaserDisc"),
            Self::Vhs => write!(f, "VHS"),
        }
    }
}

/// Bits per color channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PixelBitDepth {
    Eight,
    Ten,
    Twelve,
}

impl PixelBitDepth {
    #[must_use]
    pub fn bits(self) -> u8 {
        match self {
            Self::Eight => 8,
            Self::Ten => 10,
            Self::Twelve => 12,
        }
    }
}

impl fmt::Display for PixelBitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bit", self.bits())
    }
}

/// Frame size in pixels, from tags like `1280x720`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_mode_ordering() {
        assert!(VideoMode::P2160 > VideoMode::P1080);
        assert!(VideoMode::P1080 > VideoMode::I1080);
        assert!(VideoMode::P720 > VideoMode::P480);
    }

    #[test]
    fn display_strings() {
        assert_eq!(VideoMode::P720.to_string(), "720p");
        assert_eq!(VideoMode::I1080.to_string(), "1080i");
        assert_eq!(VideoCodec::Hevc.to_string(), "HEVC");
        assert_eq!(AudioCodec::Eaac.to_string(), "E-AAC+");
        assert_eq!(VideoMedia::BluRay.to_string(), "Blu-ray");
        assert_eq!(PixelBitDepth::Ten.to_string(), "10bit");
        assert_eq!(Resolution::new(1280, 720).to_string(), "1280x720");
    }

    #[test]
    fn quality_enum_serialization_roundtrip() {
        let mode = VideoMode::P1080;
        let json = serde_json::to_string(&mode).unwrap();
        let back: VideoMode = serde_json::from_str(&json).unwrap();
        assert_eq!(mode, back);

        let res = Resolution::new(1920, 1080);
        let json = serde_json::to_string(&res).unwrap();
        assert_eq!(json, r#"{"width":1920,"height":1080}"#);
        let back: Resolution = serde_json::from_str(&json).unwrap();
        assert_eq!(res, back);
    }
}
