//! Transcript retrieval for YouTube videos.
//!
//! Handles parsing a video id out of the various YouTube URL shapes and
//! fetching ordered caption segments from the video's timedtext track.

mod youtube;

pub use youtube::YoutubeTranscriptSource;

use crate::error::{OppsumError, Result};
use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;

/// One timed caption segment as delivered by the transcript service.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    /// Caption text for this segment.
    pub text: String,
    /// Offset from the start of the video, in seconds.
    pub start_seconds: f64,
    /// How long the segment stays on screen, in seconds.
    pub duration_seconds: f64,
}

/// Trait for transcript retrieval services.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the ordered caption segments for a video id.
    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptSegment>>;
}

fn video_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Matches watch URLs (v=), shorts, and youtu.be short links.
    RE.get_or_init(|| {
        Regex::new(r"(?:v=|/shorts/|youtu\.be/)([A-Za-z0-9_-]{6,})").expect("Invalid regex")
    })
}

/// Extract a video id from a YouTube URL.
///
/// Recognizes `watch?v=ID`, `/shorts/ID`, and `youtu.be/ID` forms with an id
/// of at least 6 characters. Fails before any network call is made.
pub fn extract_video_id(link: &str) -> Result<String> {
    video_id_regex()
        .captures(link.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| OppsumError::InvalidLink(link.to_string()))
}

/// Flatten ordered segments into a single cleaned text blob.
///
/// Segments are joined in delivery order, internal newlines are replaced by
/// single spaces, and each segment is followed by exactly one trailing space.
pub fn flatten_segments(segments: &[TranscriptSegment]) -> String {
    let mut text = String::new();
    for segment in segments {
        text.push_str(&segment.text.replace('\n', " "));
        text.push(' ');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str, start: f64) -> TranscriptSegment {
        TranscriptSegment {
            text: text.to_string(),
            start_seconds: start,
            duration_seconds: 2.0,
        }
    }

    #[test]
    fn test_extract_video_id() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/abc123XYZ_-").unwrap(),
            "abc123XYZ_-"
        );
        // Extra query parameters after the id are not part of the capture
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_extract_video_id_invalid() {
        assert!(matches!(
            extract_video_id("https://example.com/video"),
            Err(OppsumError::InvalidLink(_))
        ));
        assert!(extract_video_id("").is_err());
        // Too short to be a video id
        assert!(extract_video_id("https://youtu.be/abc").is_err());
    }

    #[test]
    fn test_flatten_segments_preserves_order() {
        let segments = vec![segment("first", 0.0), segment("second", 2.0), segment("third", 4.0)];
        assert_eq!(flatten_segments(&segments), "first second third ");
    }

    #[test]
    fn test_flatten_segments_replaces_newlines() {
        let segments = vec![segment("line one\nline two", 0.0)];
        assert_eq!(flatten_segments(&segments), "line one line two ");
    }

    #[test]
    fn test_flatten_segments_empty() {
        assert_eq!(flatten_segments(&[]), "");
    }
}
