// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use runway_domain::{EventId, Schedule, ScheduleStatus};
use std::str::FromStr;
use tracing::debug;

use crate::data_models::StoredSchedule;
use crate::diesel_schema::runway_schedules;
use crate::error::PersistenceError;

/// Diesel Queryable struct for schedule rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = runway_schedules)]
struct ScheduleRow {
    schedule_id: i64,
    event_id: String,
    schedule_name: String,
    total_duration_minutes: i32,
    designers: String,
    transitions: String,
    backstage_calls: String,
    ai_optimization_score: Option<i32>,
    ai_reasoning: Option<String>,
    status: String,
    created_at: String,
}

impl TryFrom<ScheduleRow> for StoredSchedule {
    type Error = PersistenceError;

    fn try_from(row: ScheduleRow) -> Result<Self, Self::Error> {
        let corrupt = |what: &str| {
            PersistenceError::CorruptRecord(format!("schedule {}: {what}", row.schedule_id))
        };

        let total_duration_minutes: u32 = row
            .total_duration_minutes
            .to_u32()
            .ok_or_else(|| corrupt("negative total duration"))?;
        let optimization_score: Option<u8> = match row.ai_optimization_score {
            Some(score) => Some(score.to_u8().ok_or_else(|| corrupt("score out of range"))?),
            None => None,
        };
        let status: ScheduleStatus =
            ScheduleStatus::from_str(&row.status).map_err(|e| corrupt(&e.to_string()))?;

        Ok(Self {
            schedule_id: row.schedule_id,
            event_id: EventId::new(&row.event_id),
            created_at: row.created_at,
            schedule: Schedule {
                schedule_name: row.schedule_name,
                total_duration_minutes,
                slots: serde_json::from_str(&row.designers)?,
                transitions: serde_json::from_str(&row.transitions)?,
                backstage_calls: serde_json::from_str(&row.backstage_calls)?,
                optimization_score,
                reasoning: row.ai_reasoning,
                status,
            },
        })
    }
}

/// Retrieves a schedule by identifier.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
/// Returns `Ok(None)` if the schedule does not exist.
pub fn get_schedule(
    conn: &mut SqliteConnection,
    schedule_id: i64,
) -> Result<Option<StoredSchedule>, PersistenceError> {
    debug!(schedule_id, "Looking up schedule");

    runway_schedules::table
        .filter(runway_schedules::schedule_id.eq(schedule_id))
        .select(ScheduleRow::as_select())
        .first(conn)
        .optional()?
        .map(StoredSchedule::try_from)
        .transpose()
}

/// Lists every schedule for an event, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_schedules_for_event(
    conn: &mut SqliteConnection,
    event_id: &EventId,
) -> Result<Vec<StoredSchedule>, PersistenceError> {
    debug!(event_id = %event_id, "Listing schedules");

    let rows: Vec<ScheduleRow> = runway_schedules::table
        .filter(runway_schedules::event_id.eq(event_id.value()))
        .order(runway_schedules::schedule_id.desc())
        .select(ScheduleRow::as_select())
        .load(conn)?;

    rows.into_iter().map(StoredSchedule::try_from).collect()
}
