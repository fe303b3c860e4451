// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod validation;

use crate::{Designer, EventId, ValidatedRequest};
use serde_json::{Value, json};

/// Ana (8 looks) then Luis (6 looks) with a 5 minute buffer.
pub fn create_test_request() -> ValidatedRequest {
    ValidatedRequest {
        event_id: EventId::new("evt-spring-26"),
        designers: vec![Designer::new("Ana", 8), Designer::new("Luis", 6)],
        buffer_minutes: 5,
        warnings: Vec::new(),
    }
}

/// A response that satisfies every invariant for `create_test_request`.
pub fn create_valid_response() -> Value {
    json!({
        "scheduleName": "Spring Showcase",
        "totalDurationMinutes": 999,
        "slots": [
            {
                "designerName": "Ana",
                "slotStart": "19:00",
                "slotEnd": "19:20",
                "looksCount": 8,
                "backstageTime": "18:30"
            },
            {
                "designerName": "Luis",
                "slotStart": "19:30",
                "slotEnd": "19:45",
                "looksCount": 6,
                "backstageTime": "19:00"
            }
        ],
        "transitions": [
            { "fromDesigner": "Ana", "toDesigner": "Luis", "durationMinutes": 10 }
        ],
        "backstageCalls": [
            { "designer": "Ana", "callTime": "18:30", "notes": "Hair and makeup" },
            { "designer": "Luis", "callTime": "19:00" }
        ],
        "optimizationScore": 87,
        "reasoning": "Shorter collection closes the show."
    })
}
