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

//! Operation log records.
//!
//! Every schedule-generation invocation produces exactly one
//! `OperationLogEntry`, whether it succeeded or failed. Entries are
//! append-only once written.

use runway_domain::EventId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Agent type recorded for every runway timing operation.
pub const AGENT_TYPE: &str = "runway_timing";

/// Operation name recorded for schedule generation.
pub const OPERATION_GENERATE_SCHEDULE: &str = "generate_schedule";

/// A compact description of how an invocation ended.
///
/// Serialized into the `output_data` column of the operation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeSummary {
    /// The terminal pipeline stage.
    pub final_stage: String,
    /// Every pipeline stage visited, in order.
    pub stages: Vec<String>,
    /// Machine-readable error kind, for failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    /// Persisted schedule identifier, for successes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_id: Option<i64>,
    /// Number of designer slots, for successes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_count: Option<usize>,
    /// Recomputed show length, for successes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_duration_minutes: Option<u32>,
}

impl OutcomeSummary {
    /// Creates a summary from the stages an invocation passed through.
    ///
    /// # Arguments
    ///
    /// * `stages` - Stage names in visit order; the last one is the final stage
    #[must_use]
    pub fn new(stages: Vec<String>) -> Self {
        Self {
            final_stage: stages.last().cloned().unwrap_or_default(),
            stages,
            error_kind: None,
            schedule_id: None,
            slot_count: None,
            total_duration_minutes: None,
        }
    }

    /// Records the error kind of a failed invocation.
    #[must_use]
    pub fn with_error_kind(mut self, kind: &str) -> Self {
        self.error_kind = Some(kind.to_string());
        self
    }

    /// Records the persisted schedule of a successful invocation.
    #[must_use]
    pub fn with_schedule(
        mut self,
        schedule_id: i64,
        slot_count: usize,
        total_duration_minutes: u32,
    ) -> Self {
        self.schedule_id = Some(schedule_id);
        self.slot_count = Some(slot_count);
        self.total_duration_minutes = Some(total_duration_minutes);
        self
    }

    /// Converts the summary to the JSON stored alongside the log entry.
    #[must_use]
    pub fn to_value(&self) -> Option<Value> {
        serde_json::to_value(self).ok()
    }
}

/// One entry in the agent operation log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationLogEntry {
    /// Always `AGENT_TYPE` for entries written by this system.
    pub agent_type: String,
    /// The event, if the request got far enough to name one.
    pub event_id: Option<EventId>,
    /// The operation performed.
    pub operation: String,
    /// Model identifier reported by the collaborator.
    pub model: String,
    /// Whether the invocation produced a persisted schedule.
    pub success: bool,
    /// Human-readable failure reason.
    pub error_message: Option<String>,
    /// Wall time for the whole invocation.
    pub latency_ms: u64,
    /// Token cost, if the collaborator reported one.
    pub tokens_used: Option<u32>,
    /// Structured outcome summary.
    pub output_data: Option<Value>,
}

impl OperationLogEntry {
    /// Creates an entry for a successful schedule generation.
    #[must_use]
    pub fn succeeded(
        event_id: EventId,
        model: &str,
        latency_ms: u64,
        tokens_used: Option<u32>,
        summary: &OutcomeSummary,
    ) -> Self {
        Self {
            agent_type: AGENT_TYPE.to_string(),
            event_id: Some(event_id),
            operation: OPERATION_GENERATE_SCHEDULE.to_string(),
            model: model.to_string(),
            success: true,
            error_message: None,
            latency_ms,
            tokens_used,
            output_data: summary.to_value(),
        }
    }

    /// Creates an entry for a failed schedule generation.
    ///
    /// `event_id` is `None` when the request failed before an event
    /// identifier could be read.
    #[must_use]
    pub fn failed(
        event_id: Option<EventId>,
        model: &str,
        error_message: &str,
        latency_ms: u64,
        tokens_used: Option<u32>,
        summary: &OutcomeSummary,
    ) -> Self {
        Self {
            agent_type: AGENT_TYPE.to_string(),
            event_id,
            operation: OPERATION_GENERATE_SCHEDULE.to_string(),
            model: model.to_string(),
            success: false,
            error_message: Some(error_message.to_string()),
            latency_ms,
            tokens_used,
            output_data: summary.to_value(),
        }
    }
}

/// A log entry as read back from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedOperation {
    /// Storage identifier.
    pub log_id: i64,
    /// RFC 3339 timestamp assigned on write.
    pub created_at: String,
    /// The stored entry.
    pub entry: OperationLogEntry,
}
