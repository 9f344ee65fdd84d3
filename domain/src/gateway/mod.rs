//! Gateways to external APIs.

use crate::error::Error;
use async_trait::async_trait;
use entity::priority::Priority;
use serde::{Deserialize, Serialize};

pub mod openai;

/// Abstraction for speech-to-text transcription services.
///
/// Implementations fetch the recording at `audio_url` and return the full
/// transcript text. This trait enables provider swapping and test doubles.
#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    /// Transcribe the audio file at a publicly accessible (or pre-signed) URL.
    async fn transcribe_audio(&self, audio_url: &str) -> Result<String, Error>;
}

/// Abstraction for LLM-backed meeting analysis.
#[async_trait]
pub trait SummarizationProvider: Send + Sync {
    /// Produce a summary and extracted action items from a transcript.
    async fn generate_summary(&self, transcript: &str) -> Result<MeetingAnalysis, Error>;
}

/// Structured analysis produced from a meeting transcript.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MeetingAnalysis {
    /// Concise summary of the meeting
    pub summary: String,
    /// Action items extracted from the transcript
    #[serde(default, rename = "actionItems")]
    pub action_items: Vec<ExtractedActionItem>,
}

/// A single action item extracted by the summarization model.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExtractedActionItem {
    /// Clear description of the task
    pub description: String,
    /// Person responsible, when one was named in the transcript
    #[serde(default)]
    pub assignee: Option<String>,
    /// Priority classification: "low", "medium" or "high"
    #[serde(default)]
    pub priority: Priority,
}
