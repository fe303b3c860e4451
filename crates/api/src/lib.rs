// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for runway schedule generation.
//!
//! Owns the request/response contract and the explicit translation of
//! domain, collaborator and persistence errors into `ApiError`. Transport
//! concerns (HTTP status codes, routing) belong to the server.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod pipeline;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_collaborator_error, translate_core_error, translate_domain_error,
    translate_persistence_error, translate_schedule_error, translate_validation_error,
};
pub use handlers::{
    create_event, get_schedule, list_event_schedules, list_operation_logs,
    transition_schedule_status,
};
pub use pipeline::{DEFAULT_COLLABORATOR_TIMEOUT, PipelineConfig, ScheduleGenerator};
pub use request_response::{
    CreateEventRequest, DesignerEntry, EventInfo, GenerateScheduleRequest,
    GenerateScheduleResponse, ListOperationLogsResponse, ListSchedulesResponse, OperationLogInfo,
    ScheduleInfo, TransitionScheduleStatusRequest, TransitionScheduleStatusResponse,
};

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
