// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PersistenceError;
use crate::{Persistence, StoredSchedule};
use runway_domain::{EventId, Schedule, ScheduleStatus};

use super::{create_seeded_persistence, create_test_schedule};

#[test]
fn test_persist_and_get_schedule() {
    let mut persistence: Persistence = create_seeded_persistence();
    let schedule: Schedule = create_test_schedule();

    let schedule_id: i64 = persistence
        .persist_schedule(&EventId::new("evt-1"), &schedule)
        .unwrap();
    let stored: StoredSchedule = persistence.get_schedule(schedule_id).unwrap().unwrap();

    assert_eq!(stored.schedule_id, schedule_id);
    assert_eq!(stored.event_id.value(), "evt-1");
    assert_eq!(stored.schedule, schedule);
}

#[test]
fn test_persist_schedule_always_writes_draft() {
    let mut persistence: Persistence = create_seeded_persistence();
    let mut schedule: Schedule = create_test_schedule();
    schedule.status = ScheduleStatus::Approved;

    let schedule_id: i64 = persistence
        .persist_schedule(&EventId::new("evt-1"), &schedule)
        .unwrap();
    let stored: StoredSchedule = persistence.get_schedule(schedule_id).unwrap().unwrap();

    assert_eq!(stored.schedule.status, ScheduleStatus::Draft);
}

#[test]
fn test_persist_schedule_without_score_or_reasoning() {
    let mut persistence: Persistence = create_seeded_persistence();
    let mut schedule: Schedule = create_test_schedule();
    schedule.optimization_score = None;
    schedule.reasoning = None;

    let schedule_id: i64 = persistence
        .persist_schedule(&EventId::new("evt-1"), &schedule)
        .unwrap();
    let stored: StoredSchedule = persistence.get_schedule(schedule_id).unwrap().unwrap();

    assert_eq!(stored.schedule.optimization_score, None);
    assert_eq!(stored.schedule.reasoning, None);
}

#[test]
fn test_persist_schedule_rejects_unknown_event() {
    let mut persistence: Persistence = create_seeded_persistence();

    let result: Result<i64, PersistenceError> =
        persistence.persist_schedule(&EventId::new("evt-unknown"), &create_test_schedule());
    assert_eq!(
        result,
        Err(PersistenceError::EventNotFound(String::from("evt-unknown")))
    );
}

#[test]
fn test_list_schedules_for_event_newest_first() {
    let mut persistence: Persistence = create_seeded_persistence();
    let event_id: EventId = EventId::new("evt-1");

    let first: i64 = persistence
        .persist_schedule(&event_id, &create_test_schedule())
        .unwrap();
    let second: i64 = persistence
        .persist_schedule(&event_id, &create_test_schedule())
        .unwrap();

    let schedules: Vec<StoredSchedule> = persistence.list_schedules_for_event(&event_id).unwrap();
    let ids: Vec<i64> = schedules.iter().map(|stored| stored.schedule_id).collect();
    assert_eq!(ids, vec![second, first]);
}

#[test]
fn test_update_schedule_status() {
    let mut persistence: Persistence = create_seeded_persistence();
    let schedule_id: i64 = persistence
        .persist_schedule(&EventId::new("evt-1"), &create_test_schedule())
        .unwrap();

    persistence
        .update_schedule_status(schedule_id, ScheduleStatus::Approved)
        .unwrap();
    let stored: StoredSchedule = persistence.get_schedule(schedule_id).unwrap().unwrap();

    assert_eq!(stored.schedule.status, ScheduleStatus::Approved);
}

#[test]
fn test_update_status_of_unknown_schedule() {
    let mut persistence: Persistence = create_seeded_persistence();

    let result: Result<(), PersistenceError> =
        persistence.update_schedule_status(999, ScheduleStatus::Archived);
    assert_eq!(result, Err(PersistenceError::ScheduleNotFound(999)));
}

#[test]
fn test_get_unknown_schedule_returns_none() {
    let mut persistence: Persistence = create_seeded_persistence();

    assert!(persistence.get_schedule(42).unwrap().is_none());
}
