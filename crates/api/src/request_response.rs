// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use runway_audit::{OperationLogEntry, RecordedOperation};
use runway_domain::{
    DesignerInput, RequestWarning, Schedule, ScheduleRequest, ScheduleStatus, WallClockTime,
};
use runway_persistence::{EventData, StoredSchedule};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// A designer entry as submitted in a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DesignerEntry {
    /// The designer's display name.
    #[serde(default)]
    pub name: Option<String>,
    /// The requested number of looks.
    #[serde(default)]
    pub looks_count: i64,
}

/// API request to generate a runway schedule.
///
/// Nothing here is trusted; fields are optional so that a missing value is
/// reported by validation rather than by the JSON decoder.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerateScheduleRequest {
    /// The event the schedule is for.
    #[serde(default)]
    pub event_id: Option<String>,
    /// Designers in running order preference.
    #[serde(default)]
    pub designers: Vec<DesignerEntry>,
    /// Minimum minutes between consecutive slots.
    #[serde(default)]
    pub buffer_time: Option<i64>,
}

impl GenerateScheduleRequest {
    /// Decodes a raw request body.
    ///
    /// Unlike a plain serde decode, a type error is reported against the
    /// offending field (`designers[1].looks_count`) so the caller can fix it.
    /// Absent and `null` fields decode to their defaults and are left for
    /// validation to judge.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if the body is not JSON, is not an
    /// object, or carries a field of the wrong type.
    pub fn from_json(body: &[u8]) -> Result<Self, ApiError> {
        let value: Value = serde_json::from_slice(body).map_err(|e| ApiError::InvalidInput {
            field: String::from("body"),
            message: format!("Request body is not valid JSON: {e}"),
        })?;
        let object: &Map<String, Value> = value.as_object().ok_or_else(|| ApiError::InvalidInput {
            field: String::from("body"),
            message: String::from("Request body must be a JSON object"),
        })?;

        let event_id: Option<String> = decode_field(object, "event_id", "event_id")?;
        let entries: Vec<Value> = decode_field(object, "designers", "designers")?;
        let buffer_time: Option<i64> = decode_field(object, "buffer_time", "buffer_time")?;

        let mut designers: Vec<DesignerEntry> = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let entry: &Map<String, Value> =
                entry.as_object().ok_or_else(|| ApiError::InvalidInput {
                    field: format!("designers[{index}]"),
                    message: format!("Designer entry {index} must be an object"),
                })?;
            designers.push(DesignerEntry {
                name: decode_field(entry, "name", &format!("designers[{index}].name"))?,
                looks_count: decode_field(
                    entry,
                    "looks_count",
                    &format!("designers[{index}].looks_count"),
                )?,
            });
        }

        Ok(Self {
            event_id,
            designers,
            buffer_time,
        })
    }

    /// The event identifier a raw body names, if it can be read at all.
    ///
    /// Used to attribute a log entry to an event even when the rest of the
    /// body fails to decode.
    #[must_use]
    pub fn event_id_of(body: &[u8]) -> Option<String> {
        let value: Value = serde_json::from_slice(body).ok()?;
        value
            .get("event_id")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// Converts this DTO into the domain's unvalidated request.
    #[must_use]
    pub fn to_schedule_request(&self) -> ScheduleRequest {
        ScheduleRequest {
            event_id: self.event_id.clone(),
            designers: self
                .designers
                .iter()
                .map(|entry| DesignerInput {
                    name: entry.name.clone(),
                    looks_count: entry.looks_count,
                })
                .collect(),
            buffer_minutes: self.buffer_time,
        }
    }
}

fn decode_field<T: DeserializeOwned + Default>(
    object: &Map<String, Value>,
    key: &str,
    field: &str,
) -> Result<T, ApiError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => T::deserialize(value).map_err(|e| ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Invalid value for {field}: {e}"),
        }),
    }
}

/// API response for a successful schedule generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateScheduleResponse {
    /// Always `true`.
    pub success: bool,
    /// Identifier of the persisted draft.
    pub schedule_id: i64,
    /// The event the schedule belongs to.
    pub event_id: String,
    /// The normalized schedule.
    pub schedule: Schedule,
    /// Non-fatal observations made while validating the request.
    pub warnings: Vec<RequestWarning>,
}

/// API request to create an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    /// Caller-chosen event identifier.
    pub event_id: String,
    /// The event title.
    pub title: String,
    /// Show start time as `HH:MM`.
    #[serde(default)]
    pub start_time: Option<String>,
    /// Where the show takes place.
    #[serde(default)]
    pub venue: Option<String>,
}

/// Event information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    /// The event identifier.
    pub event_id: String,
    /// The event title.
    pub title: String,
    /// Show start time, if set.
    pub start_time: Option<WallClockTime>,
    /// Venue, if set.
    pub venue: Option<String>,
    /// When the event was created (RFC 3339).
    pub created_at: String,
}

impl From<EventData> for EventInfo {
    fn from(event: EventData) -> Self {
        Self {
            event_id: event.event_id.value().to_string(),
            title: event.title,
            start_time: event.start_time,
            venue: event.venue,
            created_at: event.created_at,
        }
    }
}

/// A persisted schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleInfo {
    /// The schedule identifier.
    pub schedule_id: i64,
    /// The event the schedule belongs to.
    pub event_id: String,
    /// When the schedule was persisted (RFC 3339).
    pub created_at: String,
    /// The schedule itself.
    pub schedule: Schedule,
}

impl From<StoredSchedule> for ScheduleInfo {
    fn from(stored: StoredSchedule) -> Self {
        Self {
            schedule_id: stored.schedule_id,
            event_id: stored.event_id.value().to_string(),
            created_at: stored.created_at,
            schedule: stored.schedule,
        }
    }
}

/// API response listing an event's schedules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSchedulesResponse {
    /// The event.
    pub event_id: String,
    /// Schedules, newest first.
    pub schedules: Vec<ScheduleInfo>,
}

/// API request to move a schedule through its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionScheduleStatusRequest {
    /// Target status: `approved` or `archived`.
    pub status: String,
}

/// API response for a successful status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionScheduleStatusResponse {
    /// The schedule.
    pub schedule_id: i64,
    /// Status before the transition.
    pub previous_status: ScheduleStatus,
    /// Status after the transition.
    pub status: ScheduleStatus,
    /// A success message.
    pub message: String,
}

/// One operation log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationLogInfo {
    /// The log entry identifier.
    pub log_id: i64,
    /// When the entry was written (RFC 3339).
    pub created_at: String,
    /// The agent that performed the operation.
    pub agent_type: String,
    /// The event, if known.
    pub event_id: Option<String>,
    /// The operation performed.
    pub operation: String,
    /// The model identifier.
    pub model: String,
    /// Whether the operation succeeded.
    pub success: bool,
    /// The failure reason, if any.
    pub error_message: Option<String>,
    /// Wall time in milliseconds.
    pub latency_ms: u64,
    /// Token cost, if reported.
    pub tokens_used: Option<u32>,
    /// Outcome summary.
    pub output_data: Option<Value>,
}

impl From<RecordedOperation> for OperationLogInfo {
    fn from(recorded: RecordedOperation) -> Self {
        let entry: OperationLogEntry = recorded.entry;
        Self {
            log_id: recorded.log_id,
            created_at: recorded.created_at,
            agent_type: entry.agent_type,
            event_id: entry.event_id.map(|id| id.value().to_string()),
            operation: entry.operation,
            model: entry.model,
            success: entry.success,
            error_message: entry.error_message,
            latency_ms: entry.latency_ms,
            tokens_used: entry.tokens_used,
            output_data: entry.output_data,
        }
    }
}

/// API response listing operation log entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOperationLogsResponse {
    /// Entries, newest first.
    pub entries: Vec<OperationLogInfo>,
}
