// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use tracing::info;

use crate::data_models::{EventData, NewEvent};
use crate::diesel_schema::events;
use crate::error::PersistenceError;
use crate::mutations::now_timestamp;

/// Creates a new event.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event` - The event to create
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateEvent` if the identifier is taken, or
/// a database error if the insert fails.
pub fn create_event(
    conn: &mut SqliteConnection,
    event: &NewEvent,
) -> Result<EventData, PersistenceError> {
    let created_at: String = now_timestamp()?;
    let start_time: Option<String> = event.start_time.map(|time| time.to_string());

    let result: Result<usize, diesel::result::Error> = diesel::insert_into(events::table)
        .values((
            events::event_id.eq(event.event_id.value()),
            events::title.eq(&event.title),
            events::start_time.eq(start_time.as_deref()),
            events::venue.eq(event.venue.as_deref()),
            events::created_at.eq(&created_at),
        ))
        .execute(conn);

    match result {
        Ok(_) => {
            info!(event_id = %event.event_id, "Event created");
            Ok(EventData {
                event_id: event.event_id.clone(),
                title: event.title.clone(),
                start_time: event.start_time,
                venue: event.venue.clone(),
                created_at,
            })
        }
        Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => Err(
            PersistenceError::DuplicateEvent(event.event_id.value().to_string()),
        ),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
