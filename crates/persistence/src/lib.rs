// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for runway timing.
//!
//! Stores events, normalized schedules and the agent operation log in
//! `SQLite` through Diesel. Migrations are embedded and applied when a
//! `Persistence` is constructed.
//!
//! ## Tables
//!
//! - `events`: shows that schedules can be generated for
//! - `runway_schedules`: normalized schedules, always inserted as `draft`
//! - `agent_operation_logs`: one row per generation attempt, success or failure
//!
//! ## Testing
//!
//! Tests use `Persistence::new_in_memory()`, which gives every caller its
//! own shared-cache in-memory database.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use runway_audit::{OperationLogEntry, RecordedOperation};
use runway_domain::{EventId, Schedule, ScheduleStatus};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{EventData, NewEvent, StoredSchedule};
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Persistence adapter for events, schedules and operation logs.
///
/// Holds a single connection; callers that share it across tasks wrap it
/// in a mutex.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a persistence adapter over a fresh in-memory database.
    ///
    /// Each call receives a uniquely named shared-cache database, so
    /// instances never see each other's rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:runway_memdb_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a persistence adapter over a file-based database.
    ///
    /// The file is created if it does not exist and switched to WAL mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates an event.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateEvent` if the identifier is taken.
    pub fn create_event(&mut self, event: &NewEvent) -> Result<EventData, PersistenceError> {
        mutations::create_event(&mut self.conn, event)
    }

    /// Looks up an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_event(&mut self, event_id: &EventId) -> Result<Option<EventData>, PersistenceError> {
        queries::get_event(&mut self.conn, event_id)
    }

    /// Persists a normalized schedule as a draft and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EventNotFound` if the event does not exist,
    /// or another error if the write cannot complete.
    pub fn persist_schedule(
        &mut self,
        event_id: &EventId,
        schedule: &Schedule,
    ) -> Result<i64, PersistenceError> {
        mutations::insert_schedule(&mut self.conn, event_id, schedule)
    }

    /// Looks up a schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded.
    pub fn get_schedule(
        &mut self,
        schedule_id: i64,
    ) -> Result<Option<StoredSchedule>, PersistenceError> {
        queries::get_schedule(&mut self.conn, schedule_id)
    }

    /// Lists an event's schedules, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list_schedules_for_event(
        &mut self,
        event_id: &EventId,
    ) -> Result<Vec<StoredSchedule>, PersistenceError> {
        queries::list_schedules_for_event(&mut self.conn, event_id)
    }

    /// Overwrites a schedule's status.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ScheduleNotFound` if the schedule does not exist.
    pub fn update_schedule_status(
        &mut self,
        schedule_id: i64,
        status: ScheduleStatus,
    ) -> Result<(), PersistenceError> {
        mutations::update_schedule_status(&mut self.conn, schedule_id, status)
    }

    /// Appends an operation log entry and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be written.
    pub fn log_operation(&mut self, entry: &OperationLogEntry) -> Result<i64, PersistenceError> {
        mutations::insert_operation_log(&mut self.conn, entry)
    }

    /// Lists operation log entries, newest first, optionally for one event.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list_operation_logs(
        &mut self,
        event_id: Option<&EventId>,
    ) -> Result<Vec<RecordedOperation>, PersistenceError> {
        queries::list_operation_logs(&mut self.conn, event_id)
    }
}
