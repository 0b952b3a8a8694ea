//! Gemini generateContent client with structured output

use std::time::Instant;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use super::common::map_auth_error;
use crate::config::Config;
use crate::enhancer::templates::response_schema;
use crate::error::FailureKind;
use crate::http_logger::{self, Outcome, RequestRecord, ResponseRecord, Transcript};

/// generateContent request body
#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
}

/// generateContent response envelope; only the first text part is read
#[derive(Debug, Deserialize)]
struct GenerateResponse {
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
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

pub(crate) fn build_gemini_url(base_url: &str, model: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    let base_url = base_url.strip_suffix("/v1beta").unwrap_or(base_url);
    format!("{}/v1beta/models/{}:generateContent", base_url, model)
}

/// Call the Gemini generateContent endpoint with a structured-output schema.
/// Returns the raw JSON text of the first candidate.
pub async fn call_gemini_endpoint(
    client: &Client,
    config: &Config,
    prompt: &str,
) -> Result<String, FailureKind> {
    let payload = GenerateRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: response_schema(),
        },
    };

    let url = build_gemini_url(&config.base_url, &config.model);
    let request_id = Uuid::new_v4().to_string();
    let request_record = http_logger::is_enabled().then(|| {
        RequestRecord::generation(
            &url,
            &request_id,
            &config.api_key,
            serde_json::to_string(&payload).ok(),
        )
    });

    let start_time = Instant::now();
    info!("Calling Gemini API: {}", url);

    let sent = client
        .post(&url)
        .header("Content-Type", "application/json")
        .header("x-goog-api-key", &config.api_key)
        .header("x-request-id", &request_id)
        .json(&payload)
        .send()
        .await;

    let elapsed_ms = start_time.elapsed().as_millis() as u64;
    info!("Gemini API call completed in {}ms", elapsed_ms);

    let resp = match sent {
        Ok(resp) => resp,
        Err(e) => {
            let reason = e.to_string();
            if let Some(request) = &request_record {
                http_logger::record(
                    &config.data_dir,
                    &Transcript {
                        request,
                        outcome: Outcome::Failed(&reason),
                        elapsed_ms,
                    },
                );
            }
            return Err(FailureKind::Network(reason));
        }
    };

    let status = resp.status();
    let mut response_record = request_record
        .as_ref()
        .map(|_| ResponseRecord::from_response(&resp));
    let body = resp.text().await;

    if let (Some(request), Some(response)) = (&request_record, response_record.as_mut()) {
        response.body = Some(body.as_ref().cloned().unwrap_or_default());
        http_logger::record(
            &config.data_dir,
            &Transcript {
                request,
                outcome: Outcome::Response(&*response),
                elapsed_ms,
            },
        );
    }

    let body_text =
        body.map_err(|e| FailureKind::Network(format!("failed to read response body: {}", e)))?;

    if let Some(kind) = map_auth_error(status.as_u16()) {
        return Err(kind);
    }

    if !status.is_success() {
        return Err(FailureKind::Service {
            status: status.as_u16(),
            body: body_text,
        });
    }

    let api_response: GenerateResponse = serde_json::from_str(&body_text).map_err(|e| {
        FailureKind::Schema(format!("failed to parse Gemini envelope: {}", e))
    })?;

    let text = api_response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .filter(|t| !t.trim().is_empty())
        .ok_or(FailureKind::EmptyResponse)?;

    debug!("Gemini returned {} bytes of structured text", text.len());
    Ok(text)
}
