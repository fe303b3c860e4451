// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use runway_audit::OperationLogEntry;
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::agent_operation_logs;
use crate::error::PersistenceError;
use crate::mutations::now_timestamp;

/// Appends an entry to the operation log.
///
/// # Errors
///
/// Returns an error if the entry cannot be serialized or written.
pub fn insert_operation_log(
    conn: &mut SqliteConnection,
    entry: &OperationLogEntry,
) -> Result<i64, PersistenceError> {
    let output_data: Option<String> = entry
        .output_data
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;
    // Saturate rather than fail: a log write must not be lost to an absurd latency.
    let latency_ms: i64 = entry.latency_ms.to_i64().unwrap_or(i64::MAX);
    let tokens_used: Option<i32> = entry
        .tokens_used
        .map(|tokens| tokens.to_i32().unwrap_or(i32::MAX));
    let created_at: String = now_timestamp()?;

    diesel::insert_into(agent_operation_logs::table)
        .values((
            agent_operation_logs::agent_type.eq(&entry.agent_type),
            agent_operation_logs::event_id.eq(entry.event_id.as_ref().map(|id| id.value())),
            agent_operation_logs::operation.eq(&entry.operation),
            agent_operation_logs::model.eq(&entry.model),
            agent_operation_logs::success.eq(i32::from(entry.success)),
            agent_operation_logs::error_message.eq(entry.error_message.as_deref()),
            agent_operation_logs::latency_ms.eq(latency_ms),
            agent_operation_logs::tokens_used.eq(tokens_used),
            agent_operation_logs::output_data.eq(output_data.as_deref()),
            agent_operation_logs::created_at.eq(&created_at),
        ))
        .execute(conn)?;

    let log_id: i64 = conn.get_last_insert_rowid()?;
    debug!(log_id, success = entry.success, "Operation log entry written");
    Ok(log_id)
}
