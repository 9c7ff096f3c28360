//! OpenAI chat completions client.
//!
//! Minimal, non-streaming client around the OpenAI REST API:
//! - POST {endpoint}/v1/chat/completions
//!
//! Constructor validation:
//! - `cfg.provider` must be `LlmProvider::OpenAI`
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://
//!
//! Errors are normalized via unified error types in `error_handler`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, HttpError, ProviderError, ProviderErrorKind, make_snippet},
};

/// Thin client for the OpenAI chat completions API.
///
/// Constructed from a complete [`LlmModelConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` (default headers, optional timeout).
#[derive(Debug)]
pub struct OpenAiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_chat: String,
}

impl OpenAiService {
    /// Creates a new [`OpenAiService`] from the given config.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `InvalidProvider` if `cfg.provider` is not OpenAI
    /// - [`AiLlmError::Provider`] with `MissingApiKey` if `cfg.api_key` is `None`
    /// - [`AiLlmError::Provider`] with `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        // 1) Provider must be OpenAI.
        if cfg.provider != LlmProvider::OpenAI {
            return Err(
                ProviderError::new(LlmProvider::OpenAI, ProviderErrorKind::InvalidProvider).into(),
            );
        }

        // 2) API key must be present.
        let api_key = cfg.api_key.clone().ok_or_else(|| {
            ProviderError::new(LlmProvider::OpenAI, ProviderErrorKind::MissingApiKey)
        })?;

        // 3) Endpoint must use http/https.
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                LlmProvider::OpenAI,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        // 4) HTTP client: default headers, timeout only when configured.
        let mut headers = header::HeaderMap::new();
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
            ProviderError::new(
                LlmProvider::OpenAI,
                ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
            )
        })?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let base = endpoint.trim_end_matches('/');
        let url_chat = format!("{base}/v1/chat/completions");

        debug!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = ?cfg.timeout_secs,
            "OpenAiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
        })
    }

    /// Performs a **non-streaming** chat completion request (`/v1/chat/completions`).
    ///
    /// Messages: an optional system message, then the user `prompt`.
    /// Mapped options from config: `model`, `temperature`, `top_p`, `max_tokens`.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client/network failures
    /// - [`AiLlmError::Provider`] with `Decode` if the JSON cannot be parsed
    /// - [`AiLlmError::Provider`] with `EmptyChoices` if no choices are returned
    #[instrument(name = "openai_generate", skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        let started = Instant::now();
        let body = ChatCompletionRequest::from_cfg(&self.cfg, prompt, system);

        debug!(
            prompt_len = prompt.len(),
            has_system = system.is_some(),
            "POST {}", self.url_chat
        );

        let resp = self.client.post(&self.url_chat).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_chat.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "OpenAI /v1/chat/completions returned non-success status"
            );

            return Err(ProviderError::new(
                LlmProvider::OpenAI,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let out: ChatCompletionResponse = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                error!(
                    error = %e,
                    latency_ms = started.elapsed().as_millis(),
                    "failed to decode /v1/chat/completions response"
                );
                return Err(ProviderError::new(
                    LlmProvider::OpenAI,
                    ProviderErrorKind::Decode(format!(
                        "serde error: {e}; expected `choices[0].message.content`"
                    )),
                )
                .into());
            }
        };

        let content = out
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .ok_or_else(|| {
                ProviderError::new(LlmProvider::OpenAI, ProviderErrorKind::EmptyChoices)
            })?;

        info!(
            latency_ms = started.elapsed().as_millis(),
            chars = content.len(),
            "chat completion completed"
        );

        Ok(content)
    }
}

/* ===========================================================================
HTTP payloads & options
======================================================================== */

/// Minimal request body for `/v1/chat/completions` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl<'a> ChatCompletionRequest<'a> {
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str, system: Option<&'a str>) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(sys) = system {
            messages.push(ChatMessage {
                role: "system",
                content: sys,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        Self {
            model: &cfg.model,
            messages,
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            max_tokens: cfg.max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::post};
    use serde_json::{Value, json};

    use super::*;
    use crate::services::test_server;

    fn cfg(endpoint: &str) -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::OpenAI,
            model: "gpt-4.1".into(),
            endpoint: endpoint.into(),
            api_key: Some("sk-test".into()),
            max_tokens: None,
            temperature: Some(0.3),
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn constructor_validates_config() {
        let mut c = cfg("https://api.openai.com");
        c.api_key = None;
        assert!(matches!(
            OpenAiService::new(c),
            Err(AiLlmError::Provider(ProviderError { kind: ProviderErrorKind::MissingApiKey, .. }))
        ));

        assert!(matches!(
            OpenAiService::new(cfg("ftp://nope")),
            Err(AiLlmError::Provider(ProviderError { kind: ProviderErrorKind::InvalidEndpoint(_), .. }))
        ));

        let mut c = cfg("https://api.openai.com");
        c.provider = LlmProvider::Gemini;
        assert!(OpenAiService::new(c).is_err());
    }

    #[tokio::test]
    async fn sends_bearer_and_messages() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let auth = headers["authorization"].to_str().unwrap().to_string();
                let echo = format!(
                    "{auth}|{}|{}|{}|{}",
                    body["model"].as_str().unwrap(),
                    body["messages"][0]["role"].as_str().unwrap(),
                    body["messages"][1]["content"].as_str().unwrap(),
                    body["temperature"]
                );
                Json(json!({"choices": [{"message": {"content": echo}}]}))
            }),
        );
        let base = test_server::spawn(app).await;

        let svc = OpenAiService::new(cfg(&base)).unwrap();
        let out = svc.generate("convert 5 km", Some("be precise")).await.unwrap();
        assert_eq!(out, "Bearer sk-test|gpt-4.1|system|convert 5 km|0.3");
    }

    #[tokio::test]
    async fn non_success_status_keeps_snippet() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::UNAUTHORIZED, "invalid api key") }),
        );
        let base = test_server::spawn(app).await;

        let err = OpenAiService::new(cfg(&base))
            .unwrap()
            .generate("hi", None)
            .await
            .unwrap_err();
        match err {
            AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::HttpStatus(http),
                ..
            }) => {
                assert_eq!(http.status, reqwest::StatusCode::UNAUTHORIZED);
                assert_eq!(http.snippet, "invalid api key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({"choices": []})) }),
        );
        let base = test_server::spawn(app).await;

        let err = OpenAiService::new(cfg(&base))
            .unwrap()
            .generate("hi", None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Provider(ProviderError { kind: ProviderErrorKind::EmptyChoices, .. })
        ));
    }
}
