//! Known tag spellings per metadata category.
//!
//! Tables are scanned in order and the first entry found in a tag wins, so
//! longer spellings come before shorter ones that share a prefix
//! (`10bits` before `10bit`, `BDRip` before `BD`).

use crate::types::{AudioCodec, PixelBitDepth, VideoCodec, VideoMedia, VideoMode};

pub type TagTable<T> = &'static [(&'static str, T)];

pub const AUDIO_CODECS: TagTable<AudioCodec> = &[
    ("E-AAC+", AudioCodec::Eaac),
    ("EAAC", AudioCodec::Eaac),
    ("AAC", AudioCodec::Aac),
    ("AC-3", AudioCodec::Ac3),
    ("AC3", AudioCodec::Ac3),
    ("DTS-HD", AudioCodec::Dts),
    ("DTS", AudioCodec::Dts),
    ("FLAC", AudioCodec::Flac),
    ("MP3", AudioCodec::Mp3),
    ("Opus", AudioCodec::Opus),
    ("TrueHD", AudioCodec::TrueHd),
    ("Vorbis", AudioCodec::Vorbis),
    ("OGG", AudioCodec::Vorbis),
];

pub const PIXEL_BIT_DEPTHS: TagTable<PixelBitDepth> = &[
    ("Hi10P", PixelBitDepth::Ten),
    ("Hi10", PixelBitDepth::Ten),
    ("10bits", PixelBitDepth::Ten),
    ("10bit", PixelBitDepth::Ten),
    ("10-bit", PixelBitDepth::Ten),
    ("12bits", PixelBitDepth::Twelve),
    ("12bit", PixelBitDepth::Twelve),
    ("12-bit", PixelBitDepth::Twelve),
    ("8bits", PixelBitDepth::Eight),
    ("8bit", PixelBitDepth::Eight),
    ("8-bit", PixelBitDepth::Eight),
];

pub const VIDEO_CODECS: TagTable<VideoCodec> = &[
    ("H264", VideoCodec::Avc),
    ("H 264", VideoCodec::Avc),
    ("x264", VideoCodec::Avc),
    ("AVC", VideoCodec::Avc),
    ("H265", VideoCodec::Hevc),
    ("H 265", VideoCodec::Hevc),
    ("x265", VideoCodec::Hevc),
    ("HEVC", VideoCodec::Hevc),
    ("AV1", VideoCodec::Av1),
    ("VP9", VideoCodec::Vp9),
    ("XviD", VideoCodec::Xvid),
    ("DivX", VideoCodec::DivX),
    ("WMV", VideoCodec::Wmv),
];

pub const VIDEO_MEDIA: TagTable<VideoMedia> = &[
    ("Blu-ray", VideoMedia::BluRay),
    ("BluRay", VideoMedia::BluRay),
    ("BDRip", VideoMedia::BluRay),
    ("BDMV", VideoMedia::BluRay),
    ("BD", VideoMedia::BluRay),
    ("DVDRip", VideoMedia::Dvd),
    ("DVD", VideoMedia::Dvd),
    ("HDTV", VideoMedia::Tv),
    ("TVRip", VideoMedia::Tv),
    ("TV", VideoMedia::Tv),
    ("WEB-DL", VideoMedia::Web),
    ("WEBRip", VideoMedia::Web),
    ("WEB", VideoMedia::Web),
    ("LaserDisc", VideoMedia::LaserDisc),
    ("LD", VideoMedia::LaserDisc),
    ("VHS", VideoMedia::Vhs),
];

pub const VIDEO_MODES: TagTable<VideoMode> = &[
    ("2160p", VideoMode::P2160),
    ("4K", VideoMode::P2160),
    ("1440p", VideoMode::P1440),
    ("1080p", VideoMode::P1080),
    ("1080i", VideoMode::I1080),
    ("720p", VideoMode::P720),
    ("576p", VideoMode::P576),
    ("480p", VideoMode::P480),
];

/// `true` if `needle` occurs in `haystack` (ASCII case-insensitive) with no
/// alphanumeric character directly before or after it.
#[must_use]
pub fn contains_bounded(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let hay = haystack.to_ascii_lowercase();
    let needle = needle.to_ascii_lowercase();
    hay.match_indices(&needle).any(|(start, found)| {
        let before = hay[..start].chars().next_back();
        let after = hay[start + found.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Looks a tag up in a table: the tag is split on whitespace and the first
/// table entry bounded inside any piece wins. Spellings that contain a space
/// (`H 264`, what input cleaning leaves of `H.264`) are matched against the
/// whole tag instead.
#[must_use]
pub fn lookup<T: Copy>(table: TagTable<T>, tag: &str) -> Option<T> {
    table.iter().find_map(|&(spelling, value)| {
        let found = if spelling.contains(' ') {
            contains_bounded(tag, spelling)
        } else {
            tag.split_whitespace()
                .any(|piece| contains_bounded(piece, spelling))
        };
        found.then_some(value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_matching() {
        assert!(contains_bounded("x264-10bit", "x264"));
        assert!(contains_bounded("x264-10bit", "10BIT"));
        assert!(!contains_bounded("BDRip", "BD"));
        assert!(!contains_bounded("HDTV", "TV"));
        assert!(!contains_bounded("AACx2", "AAC"));
        assert!(!contains_bounded("anything", ""));
    }

    #[test]
    fn table_order_prefers_longer_spellings() {
        assert_eq!(lookup(PIXEL_BIT_DEPTHS, "10bits"), Some(PixelBitDepth::Ten));
        assert_eq!(lookup(VIDEO_MEDIA, "BDRip"), Some(VideoMedia::BluRay));
        assert_eq!(lookup(VIDEO_MEDIA, "HDTV"), Some(VideoMedia::Tv));
        assert_eq!(lookup(AUDIO_CODECS, "E-AAC+"), Some(AudioCodec::Eaac));
    }

    #[test]
    fn lookup_splits_on_whitespace() {
        assert_eq!(lookup(VIDEO_MODES, "BD 1080p FLAC"), Some(VideoMode::P1080));
        assert_eq!(lookup(AUDIO_CODECS, "BD 1080p FLAC"), Some(AudioCodec::Flac));
        assert_eq!(lookup(VIDEO_CODECS, "Coalgirls"), None);
    }

    #[test]
    fn cleaned_dotted_codecs() {
        assert_eq!(lookup(VIDEO_CODECS, "H 264"), Some(VideoCodec::Avc));
        assert_eq!(lookup(VIDEO_CODECS, "BD h 265 FLAC"), Some(VideoCodec::Hevc));
        assert_eq!(lookup(VIDEO_CODECS, "CH 2640"), None);
        assert_eq!(lookup(VIDEO_CODECS, "264"), None);
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(lookup(VIDEO_CODECS, "hevc"), Some(VideoCodec::Hevc));
        assert_eq!(lookup(VIDEO_MODES, "720P"), Some(VideoMode::P720));
    }
}
