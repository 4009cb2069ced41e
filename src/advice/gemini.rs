use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{AdviceGenerator, AdviceRequest};
use crate::config::AdviceSettings;
use crate::error::AdviceError;

const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Read the API key from the environment, loading `.env` first if present.
pub fn api_key_from_env() -> Result<String, AdviceError> {
    // Best-effort .env load; ignore if missing
    let _ = dotenvy::dotenv();

    match std::env::var(API_KEY_VAR) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(AdviceError::MissingApiKey),
    }
}

/// generateContent request body
#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// generateContent response, reduced to the fields we read
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Client for the Gemini generateContent REST endpoint
pub struct GeminiClient {
    agent: ureq::Agent,
    api_key: String,
    url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, settings: &AdviceSettings) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build();

        Self {
            agent,
            api_key,
            url: generate_content_url(&settings.endpoint, &settings.model),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl AdviceGenerator for GeminiClient {
    fn generate(&self, request: &AdviceRequest) -> Result<String, AdviceError> {
        tracing::info!("[advice] Requesting coaching plan from {}", self.url);

        let prompt = request.prompt();
        let body = GenerateContentRequest {
            contents: [Content {
                parts: [RequestPart { text: &prompt }],
            }],
        };

        let response = match self
            .agent
            .post(&self.url)
            .set("x-goog-api-key", &self.api_key)
            .set("Content-Type", "application/json")
            .send_json(&body)
        {
            Ok(resp) => resp,
            Err(ureq::Error::Status(status, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                tracing::error!("[advice] Service returned status {}", status);
                return Err(AdviceError::Status { status, body });
            }
            Err(e) => {
                tracing::error!("[advice] Network error: {}", e);
                return Err(AdviceError::Network(e.to_string()));
            }
        };

        let parsed: GenerateContentResponse = response
            .into_json()
            .map_err(|e| AdviceError::MalformedResponse(e.to_string()))?;

        extract_text(parsed)
    }
}

fn generate_content_url(endpoint: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        endpoint.trim_end_matches('/'),
        model
    )
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String, AdviceError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| AdviceError::MalformedResponse("no candidates".to_string()))?;

    let text: String = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.trim().is_empty() {
        return Err(AdviceError::MalformedResponse(
            "candidate has no text".to_string(),
        ));
    }

    Ok(text)
}
