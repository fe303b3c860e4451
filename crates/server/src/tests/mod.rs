// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use runway::PromptPayload;
use runway_domain::UntrustedSchedule;
use runway_generation::{CollaboratorError, GenerationOutput};
use tower::ServiceExt;

/// Collaborator that always gives the same answer.
struct FixedCollaborator {
    answer: Result<Value, CollaboratorError>,
}

#[async_trait]
impl GenerationCollaborator for FixedCollaborator {
    fn model(&self) -> &str {
        "fixed-model"
    }

    async fn generate_schedule(
        &self,
        _prompt: &PromptPayload,
    ) -> Result<GenerationOutput, CollaboratorError> {
        self.answer.clone().map(|payload| GenerationOutput {
            raw: UntrustedSchedule::new(payload),
            tokens_used: Some(640),
        })
    }
}

fn create_valid_payload() -> Value {
    json!({
        "scheduleName": "Spring Showcase",
        "slots": [
            { "designerName": "Luis", "slotStart": "19:30", "slotEnd": "19:45", "looksCount": 6, "backstageTime": "19:00" },
            { "designerName": "Ana", "slotStart": "19:00", "slotEnd": "19:20", "looksCount": 8, "backstageTime": "18:30" }
        ],
        "transitions": [
            { "fromDesigner": "Ana", "toDesigner": "Luis", "durationMinutes": 10 }
        ],
        "backstageCalls": [
            { "designer": "Ana", "callTime": "18:30" },
            { "designer": "Luis", "callTime": "19:00" }
        ]
    })
}

/// Helper to create test app state with in-memory persistence.
fn create_test_app_state(answer: Result<Value, CollaboratorError>) -> AppState {
    let persistence: Arc<Mutex<Persistence>> = Arc::new(Mutex::new(
        Persistence::new_in_memory().expect("Failed to create in-memory persistence"),
    ));
    let collaborator: Arc<dyn GenerationCollaborator> = Arc::new(FixedCollaborator { answer });
    let generator: ScheduleGenerator = ScheduleGenerator::new(
        Arc::clone(&persistence),
        collaborator,
        PipelineConfig::default(),
    );
    AppState {
        persistence,
        generator,
    }
}

fn create_generate_body(event_id: &str) -> Value {
    json!({
        "event_id": event_id,
        "designers": [
            { "name": "Ana", "looks_count": 8 },
            { "name": "Luis", "looks_count": 6 }
        ],
        "buffer_time": 5
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (HttpStatusCode, Value) {
    let request: Request<Body> = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map_or_else(Body::empty, |value| Body::from(value.to_string())))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status: HttpStatusCode = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create_event(app: &Router, event_id: &str) -> HttpStatusCode {
    let (status, _) = send(
        app,
        "POST",
        "/events",
        Some(json!({ "event_id": event_id, "title": "Spring Showcase", "start_time": "19:00" })),
    )
    .await;
    status
}

#[tokio::test]
async fn test_create_event_then_duplicate_conflicts() {
    let app: Router = build_router(create_test_app_state(Ok(create_valid_payload())));

    assert_eq!(create_event(&app, "evt-1").await, HttpStatusCode::OK);
    let (status, body) = send(
        &app,
        "POST",
        "/events",
        Some(json!({ "event_id": "evt-1", "title": "Again" })),
    )
    .await;

    assert_eq!(status, HttpStatusCode::CONFLICT);
    assert_eq!(body["kind"], json!("duplicate"));
}

#[tokio::test]
async fn test_generate_schedule_success() {
    let app: Router = build_router(create_test_app_state(Ok(create_valid_payload())));
    create_event(&app, "evt-1").await;

    let (status, body) = send(
        &app,
        "POST",
        "/schedules/generate",
        Some(create_generate_body("evt-1")),
    )
    .await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["schedule"]["totalDurationMinutes"], json!(45));
    assert_eq!(body["schedule"]["slots"][0]["designerName"], json!("Ana"));
    assert_eq!(body["schedule"]["status"], json!("draft"));
    assert!(body["schedule_id"].as_i64().unwrap() > 0);

    let schedule_uri: String = format!("/schedules/{}", body["schedule_id"]);
    let (status, stored) = send(&app, "GET", &schedule_uri, None).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(stored["event_id"], json!("evt-1"));
}

#[tokio::test]
async fn test_generate_rate_limited_returns_429() {
    let app: Router = build_router(create_test_app_state(Err(CollaboratorError::RateLimited(
        String::from("slow down"),
    ))));
    create_event(&app, "evt-1").await;

    let (status, body) = send(
        &app,
        "POST",
        "/schedules/generate",
        Some(create_generate_body("evt-1")),
    )
    .await;

    assert_eq!(status, HttpStatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], json!("rate_limit"));
    assert!(body["message"].is_string());

    let (_, logs) = send(&app, "GET", "/operation_logs?event_id=evt-1", None).await;
    assert_eq!(logs["entries"].as_array().unwrap().len(), 1);
    assert_eq!(logs["entries"][0]["success"], json!(false));
}

#[tokio::test]
async fn test_generate_credits_exhausted_returns_402() {
    let app: Router = build_router(create_test_app_state(Err(
        CollaboratorError::QuotaExhausted(String::from("no credits")),
    )));
    create_event(&app, "evt-1").await;

    let (status, body) = send(
        &app,
        "POST",
        "/schedules/generate",
        Some(create_generate_body("evt-1")),
    )
    .await;

    assert_eq!(status, HttpStatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["error"], json!("credits_exhausted"));
}

#[tokio::test]
async fn test_generate_validation_failure_returns_500_with_kind() {
    let app: Router = build_router(create_test_app_state(Ok(create_valid_payload())));
    create_event(&app, "evt-1").await;

    let (status, body) = send(
        &app,
        "POST",
        "/schedules/generate",
        Some(json!({ "event_id": "evt-1", "designers": [] })),
    )
    .await;

    assert_eq!(status, HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], json!("validation_error"));
    assert_eq!(body["details"]["field"], json!("designers"));
}

#[tokio::test]
async fn test_generate_rejected_schedule_reports_invariant() {
    let mut payload: Value = create_valid_payload();
    payload["transitions"][0]["durationMinutes"] = json!(2);
    let app: Router = build_router(create_test_app_state(Ok(payload)));
    create_event(&app, "evt-1").await;

    let (status, body) = send(
        &app,
        "POST",
        "/schedules/generate",
        Some(create_generate_body("evt-1")),
    )
    .await;

    assert_eq!(status, HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], json!("schedule_rejected"));
    assert_eq!(body["details"]["invariant"], json!("insufficient_buffer"));
    assert_eq!(body["details"]["index"], json!(0));
}

#[tokio::test]
async fn test_generate_unknown_event_returns_500_event_not_found() {
    let app: Router = build_router(create_test_app_state(Ok(create_valid_payload())));

    let (status, body) = send(
        &app,
        "POST",
        "/schedules/generate",
        Some(create_generate_body("evt-missing")),
    )
    .await;

    assert_eq!(status, HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], json!("event_not_found"));
}

#[tokio::test]
async fn test_get_missing_schedule_returns_404() {
    let app: Router = build_router(create_test_app_state(Ok(create_valid_payload())));

    let (status, body) = send(&app, "GET", "/schedules/99", None).await;

    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    assert_eq!(body["kind"], json!("not_found"));
}

#[tokio::test]
async fn test_status_transition_enforces_lifecycle() {
    let app: Router = build_router(create_test_app_state(Ok(create_valid_payload())));
    create_event(&app, "evt-1").await;
    let (_, generated) = send(
        &app,
        "POST",
        "/schedules/generate",
        Some(create_generate_body("evt-1")),
    )
    .await;
    let status_uri: String = format!("/schedules/{}/status", generated["schedule_id"]);

    let (status, body) = send(
        &app,
        "POST",
        &status_uri,
        Some(json!({ "status": "archived" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["previous_status"], json!("draft"));
    assert_eq!(body["status"], json!("archived"));

    let (status, body) = send(
        &app,
        "POST",
        &status_uri,
        Some(json!({ "status": "approved" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["rule"], json!("schedule_status_lifecycle"));
}

#[tokio::test]
async fn test_list_event_schedules() {
    let app: Router = build_router(create_test_app_state(Ok(create_valid_payload())));
    create_event(&app, "evt-1").await;
    for _ in 0..2 {
        send(
            &app,
            "POST",
            "/schedules/generate",
            Some(create_generate_body("evt-1")),
        )
        .await;
    }

    let (status, body) = send(&app, "GET", "/events/evt-1/schedules", None).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["schedules"].as_array().unwrap().len(), 2);

    let (status, _) = send(&app, "GET", "/events/evt-2/schedules", None).await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_generate_mistyped_body_is_validation_error_and_logged() {
    let app: Router = build_router(create_test_app_state(Ok(create_valid_payload())));
    create_event(&app, "evt-1").await;

    let (status, body) = send(
        &app,
        "POST",
        "/schedules/generate",
        Some(json!({ "event_id": "evt-1", "designers": [{ "name": "Ana", "looks_count": 8.5 }] })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], json!("validation_error"));
    assert_eq!(body["details"]["field"], json!("designers[0].looks_count"));

    let (status, body) = send(
        &app,
        "POST",
        "/schedules/generate",
        Some(json!({ "designers": "Ana", "buffer_time": "five" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], json!("validation_error"));
    assert_eq!(body["details"]["field"], json!("designers"));

    let (_, logs) = send(&app, "GET", "/operation_logs", None).await;
    let entries: &Vec<Value> = logs["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|entry| entry["success"] == json!(false)));
    assert_eq!(entries[0]["event_id"], Value::Null);
    assert_eq!(entries[1]["event_id"], json!("evt-1"));
}

#[tokio::test]
async fn test_generate_non_json_body_is_validation_error() {
    let app: Router = build_router(create_test_app_state(Ok(create_valid_payload())));

    let request: Request<Body> = Request::builder()
        .method("POST")
        .uri("/schedules/generate")
        .header("content-type", "text/plain")
        .body(Body::from("designers=Ana"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["kind"], json!("validation_error"));
    assert_eq!(body["details"]["field"], json!("body"));

    let (_, logs) = send(&app, "GET", "/operation_logs", None).await;
    assert_eq!(logs["entries"].as_array().unwrap().len(), 1);
}
