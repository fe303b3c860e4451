// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use runway_domain::{EventId, WallClockTime};
use tracing::debug;

use crate::data_models::EventData;
use crate::diesel_schema::events;
use crate::error::PersistenceError;

/// Diesel Queryable struct for event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = events)]
struct EventRow {
    event_id: String,
    title: String,
    start_time: Option<String>,
    venue: Option<String>,
    created_at: String,
}

/// Retrieves an event by identifier.
///
/// # Errors
///
/// Returns an error if the query fails or the stored start time is not a
/// valid wall-clock time. Returns `Ok(None)` if the event does not exist.
pub fn get_event(
    conn: &mut SqliteConnection,
    event_id: &EventId,
) -> Result<Option<EventData>, PersistenceError> {
    debug!(event_id = %event_id, "Looking up event");

    let row: Option<EventRow> = events::table
        .filter(events::event_id.eq(event_id.value()))
        .select(EventRow::as_select())
        .first(conn)
        .optional()?;

    row.map(|row| -> Result<EventData, PersistenceError> {
        let start_time: Option<WallClockTime> = row
            .start_time
            .as_deref()
            .map(WallClockTime::parse)
            .transpose()
            .map_err(|e| PersistenceError::CorruptRecord(e.to_string()))?;
        Ok(EventData {
            event_id: EventId::new(&row.event_id),
            title: row.title,
            start_time,
            venue: row.venue,
            created_at: row.created_at,
        })
    })
    .transpose()
}
