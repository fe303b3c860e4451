// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! List queries return newest rows first.

pub mod events;
pub mod operation_logs;
pub mod schedules;

pub use events::get_event;
pub use operation_logs::list_operation_logs;
pub use schedules::{get_schedule, list_schedules_for_event};
