// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! OpenAI-compatible chat-completions client.
//!
//! The schedule is requested through a forced tool call whose parameters
//! are the shared output schema. Providers that ignore tool calling and
//! answer in plain content are tolerated; the content is parsed as JSON.

use async_trait::async_trait;
use reqwest::StatusCode;
use runway::PromptPayload;
use runway_domain::UntrustedSchedule;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

use crate::collaborator::{GenerationCollaborator, GenerationOutput};
use crate::error::CollaboratorError;

/// Longest upstream error body kept in an error message.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Connection settings for the generation service.
///
/// The API key is always injected by the caller; there is no default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Base URL, e.g. `https://api.openai.com/v1`.
    pub endpoint: String,
    /// Bearer token.
    pub api_key: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
}

/// Calls an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct HttpGenerationClient {
    client: reqwest::Client,
    config: GenerationConfig,
}

impl HttpGenerationClient {
    /// Creates a client with the given settings.
    ///
    /// # Errors
    ///
    /// Returns `CollaboratorError::Transport` if the HTTP client cannot be built.
    pub fn new(config: GenerationConfig) -> Result<Self, CollaboratorError> {
        let client: reqwest::Client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CollaboratorError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        )
    }

    fn request_body(&self, prompt: &PromptPayload) -> Value {
        json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": prompt.system_prompt },
                { "role": "user", "content": prompt.user_prompt }
            ],
            "tools": [{
                "type": "function",
                "function": {
                    "name": prompt.tool_name,
                    "description": prompt.tool_description,
                    "parameters": prompt.output_schema
                }
            }],
            "tool_choice": {
                "type": "function",
                "function": { "name": prompt.tool_name }
            }
        })
    }

    fn transport_error(&self, err: &reqwest::Error) -> CollaboratorError {
        if err.is_timeout() {
            CollaboratorError::Timeout {
                seconds: self.config.timeout.as_secs(),
            }
        } else {
            CollaboratorError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl GenerationCollaborator for HttpGenerationClient {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate_schedule(
        &self,
        prompt: &PromptPayload,
    ) -> Result<GenerationOutput, CollaboratorError> {
        debug!(model = %self.config.model, tool = %prompt.tool_name, "Requesting schedule");

        let response: reqwest::Response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status: StatusCode = response.status();
        if !status.is_success() {
            let body: String = response.text().await.unwrap_or_default();
            let message: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            warn!(status = status.as_u16(), "Generation service returned an error");
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => CollaboratorError::RateLimited(message),
                StatusCode::PAYMENT_REQUIRED => CollaboratorError::QuotaExhausted(message),
                _ => CollaboratorError::Upstream {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CollaboratorError::Malformed(format!("response is not JSON: {e}")))?;

        let tokens_used: Option<u32> = body["usage"]["total_tokens"]
            .as_u64()
            .and_then(|tokens| u32::try_from(tokens).ok());
        let raw: Value = extract_payload(&body, &prompt.tool_name)?;

        debug!(tokens_used = ?tokens_used, "Schedule payload received");
        Ok(GenerationOutput {
            raw: UntrustedSchedule::new(raw),
            tokens_used,
        })
    }
}

/// Pulls the schedule payload out of a chat-completions envelope.
///
/// Prefers the arguments of the named tool call, then any tool call, then
/// the message content.
fn extract_payload(body: &Value, tool_name: &str) -> Result<Value, CollaboratorError> {
    let message: &Value = &body["choices"][0]["message"];
    if message.is_null() {
        return Err(CollaboratorError::Malformed(String::from(
            "response has no choices",
        )));
    }

    if let Some(calls) = message["tool_calls"].as_array().filter(|calls| !calls.is_empty()) {
        let call: &Value = calls
            .iter()
            .find(|call| call["function"]["name"] == tool_name)
            .unwrap_or(&calls[0]);
        return match &call["function"]["arguments"] {
            Value::String(arguments) => serde_json::from_str(arguments).map_err(|e| {
                CollaboratorError::Malformed(format!("tool arguments are not JSON: {e}"))
            }),
            Value::Object(_) => Ok(call["function"]["arguments"].clone()),
            _ => Err(CollaboratorError::Malformed(String::from(
                "tool call has no arguments",
            ))),
        };
    }

    match message["content"].as_str() {
        Some(content) => serde_json::from_str(strip_code_fence(content)).map_err(|e| {
            CollaboratorError::Malformed(format!("message content is not JSON: {e}"))
        }),
        None => Err(CollaboratorError::Malformed(String::from(
            "response contains neither a tool call nor content",
        ))),
    }
}

fn strip_code_fence(content: &str) -> &str {
    content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}
