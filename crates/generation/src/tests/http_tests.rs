// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CollaboratorError, GenerationCollaborator, GenerationOutput, HttpGenerationClient};
use runway::SCHEDULE_TOOL_NAME;
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{create_schedule_payload, create_test_client, create_test_prompt};

fn tool_call_response(arguments: &str) -> Value {
    json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": { "name": SCHEDULE_TOOL_NAME, "arguments": arguments }
                }]
            }
        }],
        "usage": { "prompt_tokens": 600, "completion_tokens": 250, "total_tokens": 850 }
    })
}

async fn client_for(server: &MockServer) -> HttpGenerationClient {
    create_test_client(&server.uri(), Duration::from_secs(5))
}

#[tokio::test]
async fn test_generate_schedule_reads_tool_call_arguments() {
    let server: MockServer = MockServer::start().await;
    let payload: Value = create_schedule_payload();
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "tool_choice": { "type": "function", "function": { "name": SCHEDULE_TOOL_NAME } }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(tool_call_response(&payload.to_string())),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client: HttpGenerationClient = client_for(&server).await;
    let output: GenerationOutput = client
        .generate_schedule(&create_test_prompt())
        .await
        .unwrap();

    assert_eq!(output.raw.as_value(), &payload);
    assert_eq!(output.tokens_used, Some(850));
    assert_eq!(client.model(), "test-model");
}

#[tokio::test]
async fn test_generate_schedule_falls_back_to_fenced_content() {
    let server: MockServer = MockServer::start().await;
    let payload: Value = create_schedule_payload();
    let content: String = format!("```json\n{payload}\n```");
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        })))
        .mount(&server)
        .await;

    let output: GenerationOutput = client_for(&server)
        .await
        .generate_schedule(&create_test_prompt())
        .await
        .unwrap();

    assert_eq!(output.raw.as_value(), &payload);
    assert_eq!(output.tokens_used, None);
}

#[tokio::test]
async fn test_generate_schedule_maps_rate_limit() {
    let server: MockServer = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let result: Result<GenerationOutput, CollaboratorError> = client_for(&server)
        .await
        .generate_schedule(&create_test_prompt())
        .await;

    assert_eq!(
        result,
        Err(CollaboratorError::RateLimited(String::from("slow down")))
    );
    assert_eq!(result.unwrap_err().kind(), "rate_limit");
}

#[tokio::test]
async fn test_generate_schedule_maps_payment_required() {
    let server: MockServer = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(402).set_body_string("no credits"))
        .mount(&server)
        .await;

    let result: Result<GenerationOutput, CollaboratorError> = client_for(&server)
        .await
        .generate_schedule(&create_test_prompt())
        .await;

    assert!(matches!(result, Err(CollaboratorError::QuotaExhausted(_))));
}

#[tokio::test]
async fn test_generate_schedule_maps_server_error() {
    let server: MockServer = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let result: Result<GenerationOutput, CollaboratorError> = client_for(&server)
        .await
        .generate_schedule(&create_test_prompt())
        .await;

    assert_eq!(
        result,
        Err(CollaboratorError::Upstream {
            status: 503,
            message: String::from("overloaded"),
        })
    );
}

#[tokio::test]
async fn test_generate_schedule_rejects_unparseable_arguments() {
    let server: MockServer = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(tool_call_response("{\"slots\": [")),
        )
        .mount(&server)
        .await;

    let result: Result<GenerationOutput, CollaboratorError> = client_for(&server)
        .await
        .generate_schedule(&create_test_prompt())
        .await;

    assert!(matches!(result, Err(CollaboratorError::Malformed(_))));
}

#[tokio::test]
async fn test_generate_schedule_rejects_empty_choices() {
    let server: MockServer = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let result: Result<GenerationOutput, CollaboratorError> = client_for(&server)
        .await
        .generate_schedule(&create_test_prompt())
        .await;

    assert!(matches!(result, Err(CollaboratorError::Malformed(_))));
}

#[tokio::test]
async fn test_generate_schedule_times_out() {
    let server: MockServer = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(tool_call_response("{}"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client: HttpGenerationClient =
        create_test_client(&server.uri(), Duration::from_millis(200));
    let result: Result<GenerationOutput, CollaboratorError> =
        client.generate_schedule(&create_test_prompt()).await;

    assert!(matches!(result, Err(CollaboratorError::Timeout { .. })));
}
