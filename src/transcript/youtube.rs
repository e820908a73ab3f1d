//! YouTube transcript source implementation.
//!
//! YouTube does not expose a public captions API, so the transcript is
//! scraped the same way a browser obtains it: fetch the watch page, pull the
//! caption track list out of the embedded player response, then download and
//! parse the timedtext XML for the chosen track.

use super::{TranscriptSegment, TranscriptSource};
use crate::error::{OppsumError, Result};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use tracing::{debug, instrument};

const WATCH_URL: &str = "https://www.youtube.com/watch";

/// One caption track entry from the player response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    #[serde(default)]
    language_code: Option<String>,
    /// "asr" marks auto-generated tracks.
    #[serde(default)]
    kind: Option<String>,
}

/// Transcript source backed by YouTube's timedtext captions.
pub struct YoutubeTranscriptSource {
    client: reqwest::Client,
}

impl YoutubeTranscriptSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for YoutubeTranscriptSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptSource {
    #[instrument(skip(self))]
    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptSegment>> {
        let page = self
            .client
            .get(WATCH_URL)
            .query(&[("v", video_id)])
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let tracks = parse_caption_tracks(&page)?;
        let track = pick_track(&tracks)
            .ok_or_else(|| OppsumError::TranscriptUnavailable(video_id.to_string()))?;

        debug!(
            language = track.language_code.as_deref().unwrap_or("unknown"),
            "Fetching timedtext track"
        );

        let xml = self
            .client
            .get(&track.base_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let segments = parse_timedtext(&xml);
        if segments.is_empty() {
            return Err(OppsumError::TranscriptUnavailable(video_id.to_string()));
        }

        Ok(segments)
    }
}

const CAPTION_TRACKS_KEY: &str = "\"captionTracks\":";

/// Extract the caption track list from the watch page HTML.
///
/// The track list is embedded in ytInitialPlayerResponse on the watch page.
/// A page without any `captionTracks` entry means captions are disabled or
/// the video is private/missing. Track objects may themselves contain arrays
/// (newer player responses render track names as `"runs":[...]`), so the
/// array is sliced by bracket balance rather than a lazy pattern.
fn parse_caption_tracks(page: &str) -> Result<Vec<CaptionTrack>> {
    let Some(index) = page.find(CAPTION_TRACKS_KEY) else {
        return Ok(Vec::new());
    };
    let json = balanced_array(&page[index + CAPTION_TRACKS_KEY.len()..])
        .ok_or_else(|| OppsumError::Transcript("Unterminated caption track JSON".to_string()))?;
    let tracks: Vec<CaptionTrack> = serde_json::from_str(json)
        .map_err(|e| OppsumError::Transcript(format!("Unexpected caption track JSON: {}", e)))?;
    Ok(tracks)
}

/// Slice the balanced `[...]` array at the start of the input.
///
/// Tracks bracket depth while skipping string literals and their escapes, so
/// brackets inside track names do not end the slice early.
fn balanced_array(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&b'[') {
        return None;
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    // ASCII boundary, safe to slice
                    return Some(&s[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Choose the track to download: a manually-authored English track first,
/// then any English track, then whatever comes first.
fn pick_track(tracks: &[CaptionTrack]) -> Option<&CaptionTrack> {
    let is_english = |t: &&CaptionTrack| {
        t.language_code
            .as_deref()
            .is_some_and(|code| code.starts_with("en"))
    };

    tracks
        .iter()
        .filter(is_english)
        .find(|t| t.kind.as_deref() != Some("asr"))
        .or_else(|| tracks.iter().find(is_english))
        .or_else(|| tracks.first())
}

fn timedtext_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<text start="([\d.]+)" dur="([\d.]+)"[^>]*>(.*?)</text>"#)
            .expect("Invalid regex")
    })
}

/// Parse timedtext XML into ordered segments.
///
/// Events with empty text are skipped; entity-encoded text is decoded.
fn parse_timedtext(xml: &str) -> Vec<TranscriptSegment> {
    timedtext_regex()
        .captures_iter(xml)
        .filter_map(|caps| {
            let start_seconds: f64 = caps[1].parse().ok()?;
            let duration_seconds: f64 = caps[2].parse().ok()?;
            let text = decode_entities(&caps[3]);
            if text.trim().is_empty() {
                return None;
            }
            Some(TranscriptSegment {
                text,
                start_seconds,
                duration_seconds,
            })
        })
        .collect()
}

/// Decode the HTML entities YouTube uses in timedtext payloads.
///
/// `&amp;` is decoded first because the XML double-escapes nested entities
/// (e.g. `&amp;#39;`).
fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}
