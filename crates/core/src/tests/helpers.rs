// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::EventContext;
use runway_domain::{Designer, EventId, ValidatedRequest, WallClockTime};

pub fn create_test_request() -> ValidatedRequest {
    ValidatedRequest {
        event_id: EventId::new("evt-spring-26"),
        designers: vec![Designer::new("Ana", 8), Designer::new("Luis", 6)],
        buffer_minutes: 5,
        warnings: Vec::new(),
    }
}

pub fn create_test_context() -> EventContext {
    EventContext::new(
        "Spring Showcase",
        WallClockTime::from_hm(19, 0),
        Some("Pier 17"),
    )
}
