// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use runway_domain::{EventId, Schedule, WallClockTime};
use serde::{Deserialize, Serialize};

/// Fields supplied when creating an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub event_id: EventId,
    pub title: String,
    pub start_time: Option<WallClockTime>,
    pub venue: Option<String>,
}

/// A stored event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventData {
    pub event_id: EventId,
    pub title: String,
    pub start_time: Option<WallClockTime>,
    pub venue: Option<String>,
    pub created_at: String,
}

/// A stored schedule together with its storage metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSchedule {
    pub schedule_id: i64,
    pub event_id: EventId,
    pub created_at: String,
    pub schedule: Schedule,
}
