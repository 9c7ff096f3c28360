//! Google Gemini client.
//!
//! - POST {endpoint}/v1beta/models/{model}:generateContent
//!
//! The key travels in the `x-goog-api-key` header, never in the URL, so it
//! cannot leak through logged request URLs.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, HttpError, ProviderError, ProviderErrorKind, make_snippet},
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Thin client for one Gemini model.
#[derive(Debug)]
pub struct GeminiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `InvalidProvider` if `cfg.provider` is not Gemini
    /// - [`AiLlmError::Provider`] with `MissingApiKey` if `cfg.api_key` is `None`
    /// - [`AiLlmError::Provider`] with `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.provider != LlmProvider::Gemini {
            return Err(
                ProviderError::new(LlmProvider::Gemini, ProviderErrorKind::InvalidProvider).into(),
            );
        }

        let api_key = cfg.api_key.clone().ok_or_else(|| {
            ProviderError::new(LlmProvider::Gemini, ProviderErrorKind::MissingApiKey)
        })?;

        let endpoint = cfg.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ProviderError::new(
                LlmProvider::Gemini,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let mut headers = header::HeaderMap::new();
        let mut key = header::HeaderValue::from_str(&api_key).map_err(|e| {
            ProviderError::new(
                LlmProvider::Gemini,
                ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
            )
        })?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let url_generate = format!(
            "{}/v1beta/models/{}:generateContent",
            endpoint.trim_end_matches('/'),
            cfg.model
        );

        debug!(model = %cfg.model, timeout_secs = ?cfg.timeout_secs, "GeminiService initialized");

        Ok(Self {
            client,
            cfg,
            url_generate,
        })
    }

    /// Single-turn, non-streaming generation.
    ///
    /// `system`, when given, is sent as `systemInstruction`. The reply is the
    /// concatenation of every text part of the first candidate.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client/network failures
    /// - [`AiLlmError::Provider`] with `Decode` if the JSON cannot be parsed
    /// - [`AiLlmError::Provider`] with `EmptyChoices` if no text came back
    #[instrument(name = "gemini_generate", skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        let started = Instant::now();
        let body = GenerateContentRequest::from_cfg(&self.cfg, prompt, system);

        debug!(prompt_len = prompt.len(), "POST {}", self.url_generate);

        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let snippet = make_snippet(&resp.text().await.unwrap_or_default());

            error!(
                %status,
                %url,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "Gemini generateContent returned non-success status"
            );

            return Err(ProviderError::new(
                LlmProvider::Gemini,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let out: GenerateContentResponse = resp.json().await.map_err(|e| {
            error!(error = %e, "failed to decode generateContent response");
            ProviderError::new(
                LlmProvider::Gemini,
                ProviderErrorKind::Decode(format!(
                    "serde error: {e}; expected `candidates[0].content.parts`"
                )),
            )
        })?;

        let text: String = out
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(
                ProviderError::new(LlmProvider::Gemini, ProviderErrorKind::EmptyChoices).into(),
            );
        }

        info!(
            latency_ms = started.elapsed().as_millis(),
            chars = text.len(),
            "generateContent completed"
        );
        Ok(text)
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_cfg(cfg: &LlmModelConfig, prompt: &'a str, system: Option<&'a str>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![PartIn { text: prompt }],
            }],
            system_instruction: system.map(|s| Content {
                role: None,
                parts: vec![PartIn { text: s }],
            }),
            generation_config: GenerationConfig {
                temperature: cfg.temperature,
                top_p: cfg.top_p,
                max_output_tokens: cfg.max_tokens,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<PartIn<'a>>,
}

#[derive(Debug, Serialize)]
struct PartIn<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentOut>,
}

#[derive(Debug, Deserialize)]
struct ContentOut {
    #[serde(default)]
    parts: Vec<PartOut>,
}

#[derive(Debug, Deserialize)]
struct PartOut {
    text: Option<String>,
}
