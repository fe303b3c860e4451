// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod schedule_tests;

use crate::{NewEvent, Persistence};
use runway_domain::{
    BackstageCall, DesignerSlot, EventId, Schedule, ScheduleStatus, Transition, WallClockTime,
};

pub fn time(value: &str) -> WallClockTime {
    WallClockTime::parse(value).unwrap()
}

pub fn create_test_event(event_id: &str) -> NewEvent {
    NewEvent {
        event_id: EventId::new(event_id),
        title: String::from("Spring Showcase"),
        start_time: Some(time("19:00")),
        venue: Some(String::from("Pier 17")),
    }
}

pub fn create_test_schedule() -> Schedule {
    Schedule {
        schedule_name: String::from("Spring Showcase"),
        total_duration_minutes: 45,
        slots: vec![
            DesignerSlot {
                designer_name: String::from("Ana"),
                slot_start: time("19:00"),
                slot_end: time("19:20"),
                looks_count: 8,
                backstage_time: time("18:30"),
            },
            DesignerSlot {
                designer_name: String::from("Luis"),
                slot_start: time("19:30"),
                slot_end: time("19:45"),
                looks_count: 6,
                backstage_time: time("19:00"),
            },
        ],
        transitions: vec![Transition {
            from_designer: String::from("Ana"),
            to_designer: String::from("Luis"),
            duration_minutes: 10,
        }],
        backstage_calls: vec![
            BackstageCall {
                designer: String::from("Ana"),
                call_time: time("18:30"),
                notes: String::new(),
            },
            BackstageCall {
                designer: String::from("Luis"),
                call_time: time("19:00"),
                notes: String::from("Shoes first"),
            },
        ],
        optimization_score: Some(87),
        reasoning: Some(String::from("Shorter collection closes the show.")),
        status: ScheduleStatus::Draft,
    }
}

/// In-memory persistence with one event, `evt-1`, already created.
pub fn create_seeded_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .create_event(&create_test_event("evt-1"))
        .unwrap();
    persistence
}
