// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use runway_domain::{EventId, Schedule, ScheduleStatus};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{events, runway_schedules};
use crate::error::PersistenceError;
use crate::mutations::now_timestamp;

/// Inserts a normalized schedule as a draft.
///
/// The schedule's own status is ignored: every new schedule starts as
/// `draft`. The event must already exist.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event the schedule belongs to
/// * `schedule` - The normalized schedule
///
/// # Errors
///
/// Returns `PersistenceError::EventNotFound` if the event does not exist,
/// or a database/serialization error if the insert fails.
pub fn insert_schedule(
    conn: &mut SqliteConnection,
    event_id: &EventId,
    schedule: &Schedule,
) -> Result<i64, PersistenceError> {
    let designers_json: String = serde_json::to_string(&schedule.slots)?;
    let transitions_json: String = serde_json::to_string(&schedule.transitions)?;
    let backstage_calls_json: String = serde_json::to_string(&schedule.backstage_calls)?;
    let total_duration_minutes: i32 =
        schedule.total_duration_minutes.to_i32().ok_or_else(|| {
            PersistenceError::SerializationError(format!(
                "total duration {} does not fit the column",
                schedule.total_duration_minutes
            ))
        })?;
    let score: Option<i32> = schedule.optimization_score.map(i32::from);
    let created_at: String = now_timestamp()?;

    conn.transaction::<i64, PersistenceError, _>(|conn| {
        let event_exists: bool = diesel::select(diesel::dsl::exists(
            events::table.filter(events::event_id.eq(event_id.value())),
        ))
        .get_result(conn)?;
        if !event_exists {
            return Err(PersistenceError::EventNotFound(event_id.value().to_string()));
        }

        diesel::insert_into(runway_schedules::table)
            .values((
                runway_schedules::event_id.eq(event_id.value()),
                runway_schedules::schedule_name.eq(&schedule.schedule_name),
                runway_schedules::total_duration_minutes.eq(total_duration_minutes),
                runway_schedules::designers.eq(&designers_json),
                runway_schedules::transitions.eq(&transitions_json),
                runway_schedules::backstage_calls.eq(&backstage_calls_json),
                runway_schedules::ai_optimization_score.eq(score),
                runway_schedules::ai_reasoning.eq(schedule.reasoning.as_deref()),
                runway_schedules::status.eq(ScheduleStatus::Draft.as_str()),
                runway_schedules::created_at.eq(&created_at),
            ))
            .execute(conn)?;

        let schedule_id: i64 = conn.get_last_insert_rowid()?;
        info!(
            schedule_id,
            event_id = %event_id,
            slots = schedule.slots.len(),
            "Schedule persisted as draft"
        );
        Ok(schedule_id)
    })
}

/// Sets the status of an existing schedule.
///
/// Lifecycle rules are enforced by the caller; this only writes.
///
/// # Errors
///
/// Returns `PersistenceError::ScheduleNotFound` if no row was updated.
pub fn update_schedule_status(
    conn: &mut SqliteConnection,
    schedule_id: i64,
    status: ScheduleStatus,
) -> Result<(), PersistenceError> {
    debug!(schedule_id, status = %status, "Updating schedule status");

    let updated: usize = diesel::update(runway_schedules::table)
        .filter(runway_schedules::schedule_id.eq(schedule_id))
        .set(runway_schedules::status.eq(status.as_str()))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::ScheduleNotFound(schedule_id));
    }
    Ok(())
}
