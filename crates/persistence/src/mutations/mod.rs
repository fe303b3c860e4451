// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `events`: event creation
//! - `schedules`: schedule inserts and status updates
//! - `operation_logs`: append-only operation log writes

pub mod events;
pub mod operation_logs;
pub mod schedules;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::PersistenceError;

pub use events::create_event;
pub use operation_logs::insert_operation_log;
pub use schedules::{insert_schedule, update_schedule_status};

/// Returns the current UTC time as an RFC 3339 string for `created_at` columns.
pub(crate) fn now_timestamp() -> Result<String, PersistenceError> {
    Ok(OffsetDateTime::now_utc().format(&Rfc3339)?)
}
