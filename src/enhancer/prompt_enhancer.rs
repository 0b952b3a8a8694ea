//! Prompt Enhancer - turns (text, style, intensity) into a structured result
//!
//! One outbound call per enhancement, no retry, no caching. Every failure is
//! reported as an [`EnhanceError`] whose message is the same generic text.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{EnhanceError, FailureKind};
use crate::service::{call_gemini_endpoint, parse_enhancement_result, render_enhance_request};
use crate::style::StyleDefinition;

use super::{EnhancementResult, Intensity};

/// Prompt Enhancer
pub struct PromptEnhancer {
    config: Arc<Config>,
    client: Client,
}

impl PromptEnhancer {
    /// Create a new PromptEnhancer
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { config, client })
    }

    /// Enhance `input` in the given style and intensity.
    ///
    /// The caller rejects blank input before calling. The returned
    /// `original` is always `input`.
    pub async fn enhance(
        &self,
        input: &str,
        style: &StyleDefinition,
        intensity: Intensity,
    ) -> std::result::Result<EnhancementResult, EnhanceError> {
        info!(
            "Enhancing {} chars with style '{}' at intensity {}",
            input.len(),
            style.id,
            intensity
        );

        match self.try_enhance(input, style, intensity).await {
            Ok(result) => {
                info!("Enhancement complete");
                Ok(result)
            }
            Err(kind) => {
                error!("Gemini API Error: {}", kind);
                Err(EnhanceError::from(kind))
            }
        }
    }

    async fn try_enhance(
        &self,
        input: &str,
        style: &StyleDefinition,
        intensity: Intensity,
    ) -> std::result::Result<EnhancementResult, FailureKind> {
        if !self.config.has_credential() {
            return Err(FailureKind::MissingCredential);
        }

        let prompt = render_enhance_request(style, intensity, input)
            .map_err(|e| FailureKind::RequestBuild(e.to_string()))?;

        let text = call_gemini_endpoint(&self.client, &self.config, &prompt).await?;
        let mut result = parse_enhancement_result(&text)?;

        if result.original != input {
            debug!("Service rewrote the original text; keeping the submitted input");
            result.original = input.to_string();
        }

        Ok(result)
    }
}
