// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for events, stored schedules and the operation log.
//!
//! Schedule generation lives in `pipeline`; everything here is a short,
//! synchronous call against an already-locked `Persistence`.

use runway_audit::RecordedOperation;
use runway_domain::{DomainError, EventId, ScheduleStatus, WallClockTime};
use runway_persistence::{EventData, NewEvent, Persistence, StoredSchedule};
use tracing::info;

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    CreateEventRequest, EventInfo, ListOperationLogsResponse, ListSchedulesResponse,
    OperationLogInfo, ScheduleInfo, TransitionScheduleStatusRequest,
    TransitionScheduleStatusResponse,
};

/// Creates an event that schedules can be generated for.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The event to create
///
/// # Errors
///
/// Returns an error if:
/// - The event identifier or title is blank
/// - The start time is not a valid `HH:MM` value
/// - An event with the same identifier already exists
pub fn create_event(
    persistence: &mut Persistence,
    request: &CreateEventRequest,
) -> Result<EventInfo, ApiError> {
    let event_id: EventId = EventId::new(&request.event_id);
    if event_id.value().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("event_id"),
            message: String::from("Event identifier cannot be empty"),
        });
    }

    let title: &str = request.title.trim();
    if title.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("title"),
            message: String::from("Event title cannot be empty"),
        });
    }

    let start_time: Option<WallClockTime> = request
        .start_time
        .as_deref()
        .map(WallClockTime::parse)
        .transpose()
        .map_err(translate_domain_error)?;

    let venue: Option<String> = request
        .venue
        .as_deref()
        .map(str::trim)
        .filter(|venue| !venue.is_empty())
        .map(str::to_string);

    let new_event: NewEvent = NewEvent {
        event_id,
        title: title.to_string(),
        start_time,
        venue,
    };

    let created: EventData = persistence
        .create_event(&new_event)
        .map_err(translate_persistence_error)?;

    info!(event_id = %created.event_id, "Created event");
    Ok(EventInfo::from(created))
}

/// Reads one persisted schedule.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the schedule does not exist.
pub fn get_schedule(
    persistence: &mut Persistence,
    schedule_id: i64,
) -> Result<ScheduleInfo, ApiError> {
    load_schedule(persistence, schedule_id).map(ScheduleInfo::from)
}

/// Lists an event's schedules, newest first.
///
/// # Errors
///
/// Returns `ApiError::EventNotFound` if the event does not exist.
pub fn list_event_schedules(
    persistence: &mut Persistence,
    event_id: &str,
) -> Result<ListSchedulesResponse, ApiError> {
    let event_id: EventId = EventId::new(event_id);
    if persistence
        .get_event(&event_id)
        .map_err(translate_persistence_error)?
        .is_none()
    {
        return Err(ApiError::EventNotFound {
            event_id: event_id.value().to_string(),
        });
    }

    let schedules: Vec<ScheduleInfo> = persistence
        .list_schedules_for_event(&event_id)
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(ScheduleInfo::from)
        .collect();

    Ok(ListSchedulesResponse {
        event_id: event_id.value().to_string(),
        schedules,
    })
}

/// Moves a schedule through its review lifecycle.
///
/// Allowed transitions are `draft → approved`, `draft → archived` and
/// `approved → archived`.
///
/// # Errors
///
/// Returns an error if:
/// - The target status is not recognised
/// - The schedule does not exist
/// - The lifecycle does not allow the transition
pub fn transition_schedule_status(
    persistence: &mut Persistence,
    schedule_id: i64,
    request: &TransitionScheduleStatusRequest,
) -> Result<TransitionScheduleStatusResponse, ApiError> {
    let target: ScheduleStatus = request
        .status
        .trim()
        .parse()
        .map_err(translate_domain_error)?;

    let stored: StoredSchedule = load_schedule(persistence, schedule_id)?;
    let current: ScheduleStatus = stored.schedule.status;

    if !current.can_transition_to(target) {
        return Err(translate_domain_error(
            DomainError::InvalidStatusTransition {
                from: current,
                to: target,
            },
        ));
    }

    persistence
        .update_schedule_status(schedule_id, target)
        .map_err(translate_persistence_error)?;

    info!(
        schedule_id,
        from = %current,
        to = %target,
        "Transitioned schedule status"
    );

    Ok(TransitionScheduleStatusResponse {
        schedule_id,
        previous_status: current,
        status: target,
        message: format!("Schedule {schedule_id} is now {target}"),
    })
}

/// Lists operation log entries, newest first.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `event_id` - Restricts the listing to one event when given
///
/// # Errors
///
/// Returns an error if the log cannot be read.
pub fn list_operation_logs(
    persistence: &mut Persistence,
    event_id: Option<&str>,
) -> Result<ListOperationLogsResponse, ApiError> {
    let filter: Option<EventId> = event_id
        .map(EventId::new)
        .filter(|id| !id.value().is_empty());

    let recorded: Vec<RecordedOperation> = persistence
        .list_operation_logs(filter.as_ref())
        .map_err(translate_persistence_error)?;

    Ok(ListOperationLogsResponse {
        entries: recorded.into_iter().map(OperationLogInfo::from).collect(),
    })
}

fn load_schedule(
    persistence: &mut Persistence,
    schedule_id: i64,
) -> Result<StoredSchedule, ApiError> {
    persistence
        .get_schedule(schedule_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Schedule"),
            message: format!("Schedule {schedule_id} does not exist"),
        })
}
