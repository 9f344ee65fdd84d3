//! OpenAI API client for transcription and summarization.
//!
//! This module provides an HTTP client for the OpenAI API: the Whisper
//! endpoint turns a meeting recording into a transcript, and the chat
//! completions endpoint turns the transcript into a structured analysis.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind, InternalErrorKind};
use crate::gateway::{MeetingAnalysis, SummarizationProvider, TranscriptionProvider};
use async_trait::async_trait;
use log::*;
use serde::{Deserialize, Serialize};

const TRANSCRIPTION_MODEL: &str = "whisper-1";
const SUMMARIZATION_MODEL: &str = "gpt-4-turbo-preview";

const SUMMARIZATION_SYSTEM_PROMPT: &str = "You are an expert meeting assistant. Analyze the \
meeting transcript and produce a concise summary along with concrete action items.";

/// Request body for the chat completions endpoint
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

/// Response from the chat completions endpoint
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Response from the audio transcriptions endpoint
#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// OpenAI API client
pub struct OpenAiClient {
    /// Client carrying the Bearer auth header for API calls
    client: reqwest::Client,
    /// Plain client used to download audio files, without the auth header
    download_client: reqwest::Client,
    base_url: String,
}

impl OpenAiClient {
    /// Create a new OpenAI client with the given API key and base URL
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, Error> {
        let mut headers = reqwest::header::HeaderMap::new();

        let mut header_value =
            reqwest::header::HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                warn!("Failed to create auth header: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                        "Invalid API key format".to_string(),
                    )),
                }
            })?;
        header_value.set_sensitive(true);
        headers.insert("authorization", header_value);

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .build()?;

        let download_client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            download_client,
            base_url: base_url.to_string(),
        })
    }

    /// Download the audio file to be transcribed
    async fn fetch_audio(&self, audio_url: &str) -> Result<Vec<u8>, Error> {
        let response = self
            .download_client
            .get(audio_url)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to fetch audio file: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
                }
            })?;

        if response.status().is_success() {
            let bytes = response.bytes().await.map_err(|e| {
                warn!("Failed to read audio file body: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
                }
            })?;
            Ok(bytes.to_vec())
        } else {
            error!("Audio file fetch returned status: {}", response.status());
            Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Other(format!(
                    "Audio file fetch returned status {}",
                    response.status()
                ))),
            })
        }
    }

    /// Transcribe the audio at `audio_url` with the Whisper model
    pub async fn transcribe(&self, audio_url: &str) -> Result<String, Error> {
        let audio_bytes = self.fetch_audio(audio_url).await?;
        let url = format!("{}/audio/transcriptions", self.base_url);

        debug!("Transcribing audio file ({} bytes)", audio_bytes.len());

        let file_part = reqwest::multipart::Part::bytes(audio_bytes)
            .file_name("audio.mp3")
            .mime_str("audio/mpeg")
            .map_err(|e| {
                warn!("Failed to build multipart audio part: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                        "Failed to build multipart request".to_string(),
                    )),
                }
            })?;

        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("model", TRANSCRIPTION_MODEL);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to call the transcription endpoint: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
                }
            })?;

        if response.status().is_success() {
            let transcription: TranscriptionResponse = response.json().await.map_err(|e| {
                warn!("Failed to parse transcription response: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Other(
                        "Invalid response from the transcription endpoint".to_string(),
                    )),
                }
            })?;
            info!(
                "Transcription completed ({} characters)",
                transcription.text.len()
            );
            Ok(transcription.text)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            error!("OpenAI transcription API: {}", error_text);
            Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Other(error_text)),
            })
        }
    }

    /// Generate a structured meeting analysis from a transcript
    pub async fn summarize(&self, transcript: &str) -> Result<MeetingAnalysis, Error> {
        let url = format!("{}/chat/completions", self.base_url);

        let prompt = format!(
            r#"Analyze this meeting transcript and produce:

1. A concise summary of the key points and decisions (2-4 paragraphs).
2. A list of action items mentioned or implied in the discussion.

Return a JSON object with exactly this structure:
{{
  "summary": "The meeting summary text",
  "actionItems": [
    {{
      "description": "Clear description of the task",
      "assignee": "Person responsible (or null if not named)",
      "priority": "low" | "medium" | "high"
    }}
  ]
}}

Return ONLY valid JSON, no markdown or explanation.

Transcript:
{transcript}"#
        );

        let request = ChatCompletionRequest {
            model: SUMMARIZATION_MODEL.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SUMMARIZATION_SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        debug!("Requesting meeting analysis from {}", SUMMARIZATION_MODEL);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to call the chat completions endpoint: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
                }
            })?;

        if response.status().is_success() {
            let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
                warn!("Failed to parse chat completions response: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Other(
                        "Invalid response from the chat completions endpoint".to_string(),
                    )),
                }
            })?;

            let content = completion
                .choices
                .first()
                .map(|choice| choice.message.content.as_str())
                .unwrap_or_default();

            // The model is instructed to respond with a JSON object matching
            // MeetingAnalysis exactly.
            serde_json::from_str(content).map_err(|e| {
                warn!(
                    "Failed to parse meeting analysis: {:?}, content: {}",
                    e, content
                );
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Other(
                        "Invalid JSON from the summarization model".to_string(),
                    )),
                }
            })
        } else {
            let error_text = response.text().await.unwrap_or_default();
            error!("OpenAI chat completions API: {}", error_text);
            Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Other(error_text)),
            })
        }
    }
}

#[async_trait]
impl TranscriptionProvider for OpenAiClient {
    async fn transcribe_audio(&self, audio_url: &str) -> Result<String, Error> {
        self.transcribe(audio_url).await
    }
}

#[async_trait]
impl SummarizationProvider for OpenAiClient {
    async fn generate_summary(&self, transcript: &str) -> Result<MeetingAnalysis, Error> {
        self.summarize(transcript).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::priority::Priority;

    #[tokio::test]
    async fn transcribe_returns_transcript_text() -> Result<(), Error> {
        let mut server = mockito::Server::new_async().await;

        let audio_mock = server
            .mock("GET", "/recordings/standup.mp3")
            .with_status(200)
            .with_header("content-type", "audio/mpeg")
            .with_body(vec![0u8; 64])
            .create_async()
            .await;

        let transcription_mock = server
            .mock("POST", "/audio/transcriptions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"text": "We agreed to ship on Friday."}"#)
            .create_async()
            .await;

        let client = OpenAiClient::new("test-key", &server.url())?;
        let audio_url = format!("{}/recordings/standup.mp3", server.url());
        let transcript = client.transcribe(&audio_url).await?;

        assert_eq!(transcript, "We agreed to ship on Friday.");
        audio_mock.assert_async().await;
        transcription_mock.assert_async().await;

        Ok(())
    }

    #[tokio::test]
    async fn transcribe_surfaces_api_errors() -> Result<(), Error> {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("GET", "/recordings/standup.mp3")
            .with_status(200)
            .with_body(vec![0u8; 64])
            .create_async()
            .await;

        server
            .mock("POST", "/audio/transcriptions")
            .with_status(500)
            .with_body("server error")
            .create_async()
            .await;

        let client = OpenAiClient::new("test-key", &server.url())?;
        let audio_url = format!("{}/recordings/standup.mp3", server.url());
        let result = client.transcribe(&audio_url).await;

        assert!(matches!(
            result.unwrap_err().error_kind,
            DomainErrorKind::External(_)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn summarize_parses_meeting_analysis() -> Result<(), Error> {
        let mut server = mockito::Server::new_async().await;

        let analysis_json = r#"{\"summary\": \"Planning sync.\", \"actionItems\": [{\"description\": \"Draft the rollout plan\", \"assignee\": \"Priya\", \"priority\": \"high\"}]}"#;
        let body = format!(r#"{{"choices": [{{"message": {{"content": "{analysis_json}"}}}}]}}"#);

        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client = OpenAiClient::new("test-key", &server.url())?;
        let analysis = client.summarize("transcript text").await?;

        assert_eq!(analysis.summary, "Planning sync.");
        assert_eq!(analysis.action_items.len(), 1);
        assert_eq!(analysis.action_items[0].description, "Draft the rollout plan");
        assert_eq!(analysis.action_items[0].assignee.as_deref(), Some("Priya"));
        assert_eq!(analysis.action_items[0].priority, Priority::High);

        Ok(())
    }

    #[tokio::test]
    async fn summarize_accepts_analysis_without_action_items() -> Result<(), Error> {
        let mut server = mockito::Server::new_async().await;

        let analysis_json = r#"{\"summary\": \"Nothing actionable discussed.\"}"#;
        let body = format!(r#"{{"choices": [{{"message": {{"content": "{analysis_json}"}}}}]}}"#);

        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client = OpenAiClient::new("test-key", &server.url())?;
        let analysis = client.summarize("transcript text").await?;

        assert_eq!(analysis.summary, "Nothing actionable discussed.");
        assert!(analysis.action_items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn summarize_rejects_invalid_model_output() -> Result<(), Error> {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": [{"message": {"content": "not json at all"}}]}"#)
            .create_async()
            .await;

        let client = OpenAiClient::new("test-key", &server.url())?;
        let result = client.summarize("transcript text").await;

        assert!(matches!(
            result.unwrap_err().error_kind,
            DomainErrorKind::External(ExternalErrorKind::Other(_))
        ));

        Ok(())
    }
}
