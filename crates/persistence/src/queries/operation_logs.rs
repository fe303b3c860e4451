// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use runway_audit::{OperationLogEntry, RecordedOperation};
use runway_domain::EventId;
use serde_json::Value;
use tracing::debug;

use crate::diesel_schema::agent_operation_logs;
use crate::error::PersistenceError;

/// Diesel Queryable struct for operation log rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = agent_operation_logs)]
struct OperationLogRow {
    log_id: i64,
    agent_type: String,
    event_id: Option<String>,
    operation: String,
    model: String,
    success: i32,
    error_message: Option<String>,
    latency_ms: i64,
    tokens_used: Option<i32>,
    output_data: Option<String>,
    created_at: String,
}

impl TryFrom<OperationLogRow> for RecordedOperation {
    type Error = PersistenceError;

    fn try_from(row: OperationLogRow) -> Result<Self, Self::Error> {
        let output_data: Option<Value> = row
            .output_data
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;

        Ok(Self {
            log_id: row.log_id,
            created_at: row.created_at,
            entry: OperationLogEntry {
                agent_type: row.agent_type,
                event_id: row.event_id.as_deref().map(EventId::new),
                operation: row.operation,
                model: row.model,
                success: row.success != 0,
                error_message: row.error_message,
                latency_ms: row.latency_ms.to_u64().unwrap_or_default(),
                tokens_used: row.tokens_used.and_then(|tokens| tokens.to_u32()),
                output_data,
            },
        })
    }
}

/// Lists operation log entries, newest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - Restrict to one event; `None` lists every entry
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_operation_logs(
    conn: &mut SqliteConnection,
    event_id: Option<&EventId>,
) -> Result<Vec<RecordedOperation>, PersistenceError> {
    debug!(event_id = ?event_id.map(EventId::value), "Listing operation logs");

    let mut query = agent_operation_logs::table
        .select(OperationLogRow::as_select())
        .order(agent_operation_logs::log_id.desc())
        .into_boxed();
    if let Some(event_id) = event_id {
        query = query.filter(agent_operation_logs::event_id.eq(event_id.value()));
    }

    let rows: Vec<OperationLogRow> = query.load(conn)?;
    rows.into_iter().map(RecordedOperation::try_from).collect()
}
