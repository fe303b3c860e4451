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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod normalize;
pub mod schema;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::{DomainError, ScheduleError, ValidationError};
pub use normalize::{DEFAULT_SCHEDULE_NAME, NormalizeOptions, UntrustedSchedule, normalize};
pub use types::{
    BackstageCall, DEFAULT_BUFFER_MINUTES, DEFAULT_MIN_BACKSTAGE_LEAD_MINUTES, Designer,
    DesignerInput, DesignerSlot, EventId, MAX_BUFFER_MINUTES, MIN_BUFFER_MINUTES, RequestWarning,
    Schedule, ScheduleRequest, ScheduleStatus, Transition, ValidatedRequest, WallClockTime,
};
pub use validation::validate_request;
