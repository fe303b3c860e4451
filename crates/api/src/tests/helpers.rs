// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use async_trait::async_trait;
use runway::PromptPayload;
use runway_domain::{
    Designer, EventId, NormalizeOptions, Schedule, UntrustedSchedule, ValidatedRequest,
    WallClockTime, normalize,
};
use runway_generation::{CollaboratorError, GenerationCollaborator, GenerationOutput};
use runway_persistence::{NewEvent, Persistence};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::{DesignerEntry, GenerateScheduleRequest, PipelineConfig, ScheduleGenerator};

pub const TEST_EVENT_ID: &str = "evt-1";
pub const TEST_MODEL: &str = "mock-model";

/// Side effect run while the collaborator is "thinking".
type CallHook = Box<dyn Fn() + Send + Sync>;

/// A collaborator that replays a scripted answer and counts its calls.
pub struct MockCollaborator {
    answer: Result<Value, CollaboratorError>,
    tokens_used: Option<u32>,
    delay: Option<Duration>,
    on_call: Option<CallHook>,
    calls: AtomicUsize,
}

impl MockCollaborator {
    pub fn returning(payload: Value) -> Self {
        Self {
            answer: Ok(payload),
            tokens_used: Some(850),
            delay: None,
            on_call: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(err: CollaboratorError) -> Self {
        Self {
            answer: Err(err),
            tokens_used: None,
            delay: None,
            on_call: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_call = Some(Box::new(hook));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationCollaborator for MockCollaborator {
    fn model(&self) -> &str {
        TEST_MODEL
    }

    async fn generate_schedule(
        &self,
        _prompt: &PromptPayload,
    ) -> Result<GenerationOutput, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(hook) = &self.on_call {
            hook();
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.answer.clone().map(|payload| GenerationOutput {
            raw: UntrustedSchedule::new(payload),
            tokens_used: self.tokens_used,
        })
    }
}

pub fn create_test_event(event_id: &str) -> NewEvent {
    NewEvent {
        event_id: EventId::new(event_id),
        title: String::from("Spring Showcase"),
        start_time: WallClockTime::from_hm(19, 0),
        venue: Some(String::from("Pier 59")),
    }
}

/// Creates in-memory persistence with `TEST_EVENT_ID` already present.
pub fn create_seeded_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .create_event(&create_test_event(TEST_EVENT_ID))
        .unwrap();
    persistence
}

pub fn create_test_request() -> GenerateScheduleRequest {
    GenerateScheduleRequest {
        event_id: Some(String::from(TEST_EVENT_ID)),
        designers: vec![
            DesignerEntry {
                name: Some(String::from("Ana")),
                looks_count: 8,
            },
            DesignerEntry {
                name: Some(String::from("Luis")),
                looks_count: 6,
            },
        ],
        buffer_time: Some(5),
    }
}

pub fn create_valid_payload() -> Value {
    json!({
        "scheduleName": "Spring Showcase",
        "totalDurationMinutes": 120,
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
        "optimizationScore": 91.6,
        "reasoning": "Larger collection opens the show."
    })
}

/// Normalizes `create_valid_payload` for tests that need a stored schedule.
pub fn create_test_schedule() -> Schedule {
    let request: ValidatedRequest = ValidatedRequest {
        event_id: EventId::new(TEST_EVENT_ID),
        designers: vec![Designer::new("Ana", 8), Designer::new("Luis", 6)],
        buffer_minutes: 5,
        warnings: Vec::new(),
    };
    normalize(
        &UntrustedSchedule::new(create_valid_payload()),
        &request,
        &NormalizeOptions::default(),
    )
    .unwrap()
}

pub fn create_test_generator(
    persistence: &Arc<Mutex<Persistence>>,
    collaborator: &Arc<MockCollaborator>,
) -> ScheduleGenerator {
    let collaborator: Arc<dyn GenerationCollaborator> = collaborator.clone();
    ScheduleGenerator::new(
        Arc::clone(persistence),
        collaborator,
        PipelineConfig {
            collaborator_timeout: Duration::from_millis(200),
            normalize: NormalizeOptions::default(),
        },
    )
}
