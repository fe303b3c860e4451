// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod http_tests;

use crate::{GenerationConfig, HttpGenerationClient};
use runway::{EventContext, PromptPayload, build_prompt};
use runway_domain::{Designer, EventId, ValidatedRequest};
use serde_json::{Value, json};
use std::time::Duration;

pub fn create_test_prompt() -> PromptPayload {
    let request: ValidatedRequest = ValidatedRequest {
        event_id: EventId::new("evt-1"),
        designers: vec![Designer::new("Ana", 8), Designer::new("Luis", 6)],
        buffer_minutes: 5,
        warnings: Vec::new(),
    };
    build_prompt(
        &request,
        &EventContext::new("Spring Showcase", None, None),
        15,
    )
}

pub fn create_test_client(endpoint: &str, timeout: Duration) -> HttpGenerationClient {
    HttpGenerationClient::new(GenerationConfig {
        endpoint: format!("{endpoint}/v1"),
        api_key: String::from("test-key"),
        model: String::from("test-model"),
        timeout,
    })
    .unwrap()
}

pub fn create_schedule_payload() -> Value {
    json!({
        "slots": [
            { "designerName": "Ana", "slotStart": "19:00", "slotEnd": "19:20", "looksCount": 8, "backstageTime": "18:30" }
        ],
        "transitions": [],
        "backstageCalls": [{ "designer": "Ana", "callTime": "18:30" }]
    })
}
