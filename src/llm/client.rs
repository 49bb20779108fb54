// Gemini generateContent client with search grounding.
//
// One analysis is one request: build the prompt for the tab, POST it with
// the google_search tool enabled, pull the reply text and grounding
// sources out of the response, and parse the text into the tab's result
// shape. Nothing is streamed and nothing is retried; a failure is
// reported once and the user resubmits by hand.

use reqwest::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::analysis::parse::{self, ParseError};
use crate::analysis::types::{GroundingSource, TabResult};
use crate::config::Config;
use crate::llm::prompt;
use crate::protocol::{AnalysisTab, FetchEvent};

/// Default API endpoint base. Config can point this at a different host,
/// which the tests use to talk to a local mock server.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure modes of one analysis fetch.
///
/// The display strings double as the text shown in the error banner, so
/// they are written for the user rather than for a log file.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Gemini API key not configured")]
    Disabled,
    #[error("Network error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{message}")]
    Api { status: StatusCode, message: String },
    #[error("An error occurred while fetching data from Gemini.")]
    EmptyReply,
    #[error("Failed to parse AI response data.")]
    Parse(#[from] ParseError),
}

// ---------------------------------------------------------------------------
// Gemini client
// ---------------------------------------------------------------------------

/// Text and grounding sources extracted from one generateContent response.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateReply {
    pub text: String,
    pub sources: Vec<GroundingSource>,
}

/// Client for the Gemini generateContent endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        GeminiClient {
            http: reqwest::Client::new(),
            api_key,
            model,
            base_url: GEMINI_API_BASE.to_string(),
        }
    }

    /// Point the client at a different API base URL.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Send one grounded generateContent request and extract the reply.
    ///
    /// The request enables the google_search tool so the model can consult
    /// live results and return citation metadata alongside its text.
    pub async fn generate_grounded(&self, prompt: &str) -> Result<GenerateReply, FetchError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "tools": [{ "google_search": {} }],
        });

        debug!(model = %self.model, prompt_chars = prompt.len(), "Sending generateContent request");
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            let message = extract_api_error(&body_text)
                .unwrap_or_else(|| format!("Gemini API returned status {status}"));
            warn!(%status, "generateContent request failed: {}", message);
            return Err(FetchError::Api { status, message });
        }

        let value: Value = response.json().await?;
        let text = extract_reply_text(&value).ok_or(FetchError::EmptyReply)?;
        let sources = extract_sources(&value);
        debug!(
            reply_chars = text.len(),
            source_count = sources.len(),
            "generateContent reply received"
        );
        Ok(GenerateReply { text, sources })
    }
}

// ---------------------------------------------------------------------------
// Active/disabled wrapper
// ---------------------------------------------------------------------------

/// Wrapper that is either an active Gemini client or disabled because no
/// API key was configured. A disabled client fails every analysis with a
/// clear message instead of attempting requests.
#[derive(Debug, Clone)]
pub enum LlmClient {
    Active(GeminiClient),
    Disabled,
}

impl LlmClient {
    /// Build from config: active when a non-empty API key is present.
    pub fn from_config(config: &Config) -> Self {
        match &config.credentials.gemini_api_key {
            Some(key) if !key.is_empty() => {
                let mut client = GeminiClient::new(key.clone(), config.api.model.clone());
                if let Some(base) = &config.api.base_url {
                    client = client.with_base_url(base.clone());
                }
                LlmClient::Active(client)
            }
            _ => LlmClient::Disabled,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, LlmClient::Active(_))
    }

    /// Run one analysis end to end and report the outcome over `tx`.
    ///
    /// Builds the prompt for `tab`, performs the grounded call, parses the
    /// reply into the tab's result shape, and sends exactly one
    /// `FetchEvent` tagged with `generation` so the controller can discard
    /// it if a newer request has since been issued.
    pub async fn run_analysis(
        &self,
        tab: AnalysisTab,
        input: String,
        tx: mpsc::Sender<FetchEvent>,
        generation: u64,
    ) {
        let event = match self.analyze(tab, &input).await {
            Ok((result, sources)) => {
                info!(tab = tab.slug(), generation, "Analysis fetch completed");
                FetchEvent::Completed {
                    tab,
                    generation,
                    result: Box::new(result),
                    sources,
                }
            }
            Err(e) => {
                warn!(tab = tab.slug(), generation, "Analysis fetch failed: {}", e);
                FetchEvent::Failed {
                    tab,
                    generation,
                    message: e.to_string(),
                }
            }
        };
        if tx.send(event).await.is_err() {
            debug!("Fetch event receiver dropped before delivery");
        }
    }

    async fn analyze(
        &self,
        tab: AnalysisTab,
        input: &str,
    ) -> Result<(TabResult, Vec<GroundingSource>), FetchError> {
        let client = match self {
            LlmClient::Active(client) => client,
            LlmClient::Disabled => return Err(FetchError::Disabled),
        };
        let prompt = prompt::build_prompt(tab, input);
        let reply = client.generate_grounded(&prompt).await?;
        let result = parse::parse_reply(tab, &reply.text)?;
        Ok((result, reply.sources))
    }
}

// ---------------------------------------------------------------------------
// Response extraction helpers
// ---------------------------------------------------------------------------

/// Concatenate the text parts of the first candidate. Returns None when
/// there is no candidate or the joined text is empty.
pub(crate) fn extract_reply_text(value: &Value) -> Option<String> {
    let parts = value
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn grounding_chunks(value: &Value) -> Option<&Vec<Value>> {
    value
        .get("candidates")?
        .get(0)?
        .get("groundingMetadata")?
        .get("groundingChunks")?
        .as_array()
}

/// Collect (uri, title) pairs from the grounding metadata.
///
/// Only chunks carrying a web citation are kept; a missing title falls
/// back to the URI. Absent or malformed metadata yields an empty list,
/// never an error.
pub(crate) fn extract_sources(value: &Value) -> Vec<GroundingSource> {
    let Some(chunks) = grounding_chunks(value) else {
        return Vec::new();
    };
    chunks
        .iter()
        .filter_map(|chunk| chunk.get("web"))
        .map(|web| {
            let uri = web
                .get("uri")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let title = match web.get("title").and_then(Value::as_str) {
                Some(title) if !title.is_empty() => title.to_string(),
                _ => uri.clone(),
            };
            GroundingSource { uri, title }
        })
        .collect()
}

/// Pull the message out of a Gemini error body, if present.
pub(crate) fn extract_api_error(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let message = value.get("error")?.get("message")?.as_str()?;
    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
