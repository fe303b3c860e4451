// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use runway_api::{
    ApiError, CreateEventRequest, EventInfo, GenerateScheduleResponse,
    ListOperationLogsResponse, ListSchedulesResponse, PipelineConfig, ScheduleGenerator,
    ScheduleInfo, TransitionScheduleStatusRequest, TransitionScheduleStatusResponse,
};
use runway_domain::{DEFAULT_MIN_BACKSTAGE_LEAD_MINUTES, NormalizeOptions};
use runway_generation::{GenerationCollaborator, GenerationConfig, HttpGenerationClient};
use runway_persistence::Persistence;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Runway Server - HTTP server for runway schedule generation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "RUNWAY_DATABASE")]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, env = "RUNWAY_PORT", default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(long, env = "RUNWAY_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Base URL of the OpenAI-compatible generation service
    #[arg(
        long,
        env = "RUNWAY_GENERATION_ENDPOINT",
        default_value = "https://api.openai.com/v1"
    )]
    generation_endpoint: String,

    /// API key for the generation service
    #[arg(long, env = "RUNWAY_GENERATION_API_KEY", hide_env_values = true)]
    generation_api_key: String,

    /// Model identifier sent to the generation service
    #[arg(long, env = "RUNWAY_GENERATION_MODEL", default_value = "gpt-4o-mini")]
    generation_model: String,

    /// Upper bound, in seconds, on a single generation call
    #[arg(long, env = "RUNWAY_COLLABORATOR_TIMEOUT_SECS", default_value_t = 45)]
    collaborator_timeout_secs: u64,

    /// Minimum minutes between a model's backstage time and their slot
    #[arg(
        long,
        env = "RUNWAY_MIN_BACKSTAGE_LEAD_MINUTES",
        default_value_t = DEFAULT_MIN_BACKSTAGE_LEAD_MINUTES
    )]
    min_backstage_lead_minutes: u32,
}

/// Application state shared across handlers.
///
/// The persistence layer is wrapped in a Mutex; the generator holds a
/// clone of the same handle.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for events, schedules and operation logs.
    persistence: Arc<Mutex<Persistence>>,
    /// Runs the generation pipeline.
    generator: ScheduleGenerator,
}

/// Query parameters for GET `/operation_logs`.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct OperationLogsQuery {
    /// Restricts the listing to one event.
    event_id: Option<String>,
}

/// Error body returned by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
struct ErrorResponse {
    /// The error message, or the error kind for rate limit and credit errors.
    error: String,
    /// Human-readable message accompanying a kind in `error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    /// Machine-readable error kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    /// Structured detail, such as the violated invariant.
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

/// HTTP error type that can be converted into an Axum response.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The response body.
    body: ErrorResponse,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl HttpError {
    /// Builds the error body for `err` with an explicit status.
    fn with_status(status: StatusCode, err: &ApiError) -> Self {
        Self {
            status,
            body: ErrorResponse {
                error: err.to_string(),
                message: None,
                kind: Some(err.kind().to_string()),
                details: error_details(err),
            },
        }
    }

    /// Maps a generation failure.
    ///
    /// Rate limiting and credit exhaustion keep their own statuses so
    /// callers can tell "try again later" from "contact support"; every
    /// other failure is a 500 carrying its kind.
    fn from_generation_error(err: &ApiError) -> Self {
        match err {
            ApiError::RateLimited { message } => Self {
                status: StatusCode::TOO_MANY_REQUESTS,
                body: ErrorResponse {
                    error: err.kind().to_string(),
                    message: Some(message.clone()),
                    kind: None,
                    details: None,
                },
            },
            ApiError::CreditsExhausted { message } => Self {
                status: StatusCode::PAYMENT_REQUIRED,
                body: ErrorResponse {
                    error: err.kind().to_string(),
                    message: Some(message.clone()),
                    kind: None,
                    details: None,
                },
            },
            _ => Self::with_status(StatusCode::INTERNAL_SERVER_ERROR, err),
        }
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::EventNotFound { .. } | ApiError::ResourceNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            ApiError::DuplicateResource { .. } => StatusCode::CONFLICT,
            ApiError::DomainRuleViolation { .. } | ApiError::ScheduleRejected { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::CreditsExhausted { .. } => StatusCode::PAYMENT_REQUIRED,
            ApiError::CollaboratorTimeout { .. }
            | ApiError::CollaboratorFailed { .. }
            | ApiError::StorageUnavailable { .. }
            | ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(kind = err.kind(), error = %err, "Request failed");
        }
        Self::with_status(status, &err)
    }
}

fn error_details(err: &ApiError) -> Option<Value> {
    match err {
        ApiError::ScheduleRejected {
            invariant, index, ..
        } => Some(json!({ "invariant": invariant, "index": index })),
        ApiError::InvalidInput { field, .. } => Some(json!({ "field": field })),
        ApiError::DomainRuleViolation { rule, .. } => Some(json!({ "rule": rule })),
        _ => None,
    }
}

/// Handler for POST `/events` endpoint.
async fn handle_create_event(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<Json<EventInfo>, HttpError> {
    info!(event_id = %req.event_id, "Handling create_event request");

    let mut persistence = app_state.persistence.lock().await;
    let event: EventInfo = runway_api::create_event(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(event))
}

/// Handler for GET `/events/{event_id}/schedules` endpoint.
async fn handle_list_event_schedules(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<ListSchedulesResponse>, HttpError> {
    info!(event_id = %event_id, "Handling list_event_schedules request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListSchedulesResponse =
        runway_api::list_event_schedules(&mut persistence, &event_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/schedules/generate` endpoint.
///
/// Runs the full generation pipeline. The body is handed over undecoded so
/// that a malformed request is rejected, reported and logged by the pipeline
/// like any other invalid input. The persistence lock is taken by the
/// generator only around store calls.
async fn handle_generate_schedule(
    AxumState(app_state): AxumState<AppState>,
    body: Bytes,
) -> Result<Json<GenerateScheduleResponse>, HttpError> {
    info!(bytes = body.len(), "Handling generate_schedule request");

    let response: GenerateScheduleResponse = app_state
        .generator
        .generate_from_json(&body)
        .await
        .map_err(|err| HttpError::from_generation_error(&err))?;

    Ok(Json(response))
}

/// Handler for GET `/schedules/{schedule_id}` endpoint.
async fn handle_get_schedule(
    AxumState(app_state): AxumState<AppState>,
    Path(schedule_id): Path<i64>,
) -> Result<Json<ScheduleInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let schedule: ScheduleInfo = runway_api::get_schedule(&mut persistence, schedule_id)?;
    drop(persistence);

    Ok(Json(schedule))
}

/// Handler for POST `/schedules/{schedule_id}/status` endpoint.
async fn handle_transition_schedule_status(
    AxumState(app_state): AxumState<AppState>,
    Path(schedule_id): Path<i64>,
    Json(req): Json<TransitionScheduleStatusRequest>,
) -> Result<Json<TransitionScheduleStatusResponse>, HttpError> {
    info!(
        schedule_id,
        status = %req.status,
        "Handling transition_schedule_status request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: TransitionScheduleStatusResponse =
        runway_api::transition_schedule_status(&mut persistence, schedule_id, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/operation_logs` endpoint.
async fn handle_list_operation_logs(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<OperationLogsQuery>,
) -> Result<Json<ListOperationLogsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListOperationLogsResponse =
        runway_api::list_operation_logs(&mut persistence, query.event_id.as_deref())?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/events", post(handle_create_event))
        .route(
            "/events/{event_id}/schedules",
            get(handle_list_event_schedules),
        )
        .route("/schedules/generate", post(handle_generate_schedule))
        .route("/schedules/{schedule_id}", get(handle_get_schedule))
        .route(
            "/schedules/{schedule_id}/status",
            post(handle_transition_schedule_status),
        )
        .route("/operation_logs", get(handle_list_operation_logs))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Runway Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    let persistence: Arc<Mutex<Persistence>> = Arc::new(Mutex::new(persistence));

    let collaborator: Arc<dyn GenerationCollaborator> =
        Arc::new(HttpGenerationClient::new(GenerationConfig {
            endpoint: args.generation_endpoint.clone(),
            api_key: args.generation_api_key.clone(),
            model: args.generation_model.clone(),
            timeout: Duration::from_secs(args.collaborator_timeout_secs),
        })?);
    info!(
        endpoint = %args.generation_endpoint,
        model = %args.generation_model,
        timeout_secs = args.collaborator_timeout_secs,
        "Configured generation collaborator"
    );

    let generator: ScheduleGenerator = ScheduleGenerator::new(
        Arc::clone(&persistence),
        collaborator,
        PipelineConfig {
            collaborator_timeout: Duration::from_secs(args.collaborator_timeout_secs),
            normalize: NormalizeOptions {
                min_backstage_lead_minutes: args.min_backstage_lead_minutes,
            },
        },
    );

    let app_state: AppState = AppState {
        persistence,
        generator,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
