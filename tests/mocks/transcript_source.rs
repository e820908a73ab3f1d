use async_trait::async_trait;
use oppsum::transcript::{TranscriptSegment, TranscriptSource};
use oppsum::{OppsumError, Result};
use std::sync::{Arc, Mutex};

/// Transcript source that returns fixed segments or a scripted failure.
pub struct MockTranscriptSource {
    segments: Vec<TranscriptSegment>,
    unavailable: bool,
    pub fetched_ids: Arc<Mutex<Vec<String>>>,
}

impl MockTranscriptSource {
    pub fn new(texts: &[&str]) -> Self {
        let segments = texts
            .iter()
            .enumerate()
            .map(|(i, text)| TranscriptSegment {
                text: text.to_string(),
                start_seconds: i as f64 * 2.0,
                duration_seconds: 2.0,
            })
            .collect();
        Self {
            segments,
            unavailable: false,
            fetched_ids: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            segments: Vec::new(),
            unavailable: true,
            fetched_ids: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl TranscriptSource for MockTranscriptSource {
    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptSegment>> {
        self.fetched_ids.lock().unwrap().push(video_id.to_string());
        if self.unavailable {
            return Err(OppsumError::TranscriptUnavailable(video_id.to_string()));
        }
        Ok(self.segments.clone())
    }
}
