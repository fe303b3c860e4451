// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule normalization.
//!
//! Turns the loosely-typed payload returned by the generation collaborator
//! into a `Schedule`, or explains precisely which invariant it violates.
//!
//! ## Invariants
//!
//! - Exactly one slot per requested designer occurrence, no extras
//! - Each slot's looks count matches the requested count
//! - Slots are sorted by start; no two share a start time
//! - `slot[i].slot_end + buffer <= slot[i + 1].slot_start`
//! - Every backstage time precedes its slot start by the minimum lead
//! - `transitions.len() == slots.len() - 1`, each bridging consecutive slots,
//!   each at least the buffer long and fitting inside the gap it bridges
//! - One backstage call per designer occurrence, strictly before the slot
//!
//! Ordering is derived from slot start times; the order of the raw arrays is
//! never trusted. The total duration is always recomputed from the slots.
//! Nothing is partially accepted: the first violated invariant rejects the
//! whole response.

use crate::error::ScheduleError;
use crate::schema;
use crate::types::{
    BackstageCall, DEFAULT_MIN_BACKSTAGE_LEAD_MINUTES, DesignerSlot, Schedule, ScheduleStatus,
    Transition, ValidatedRequest, WallClockTime,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Title used when the collaborator does not name the schedule.
pub const DEFAULT_SCHEDULE_NAME: &str = "Runway Schedule";

/// A collaborator payload that has not been normalized.
///
/// Holding one of these says nothing about its shape. The only way to get
/// a typed `Schedule` out of it is `normalize`.
#[derive(Debug, Clone, PartialEq)]
pub struct UntrustedSchedule(Value);

impl UntrustedSchedule {
    /// Wraps a raw JSON payload.
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the raw payload.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for UntrustedSchedule {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Tunables for the normalizer that are not part of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Minimum minutes between a slot's backstage time and its start.
    /// Values below 1 are treated as 1.
    pub min_backstage_lead_minutes: u32,
}

impl NormalizeOptions {
    const fn required_lead(&self) -> u32 {
        if self.min_backstage_lead_minutes == 0 {
            1
        } else {
            self.min_backstage_lead_minutes
        }
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            min_backstage_lead_minutes: DEFAULT_MIN_BACKSTAGE_LEAD_MINUTES,
        }
    }
}

/// A parsed slot together with its position in the raw response.
#[derive(Debug, Clone)]
struct IndexedSlot {
    raw_index: usize,
    slot: DesignerSlot,
}

/// Normalizes a collaborator response against the request that produced it.
///
/// # Arguments
///
/// * `raw` - The untrusted collaborator payload
/// * `request` - The validated request the payload answers
/// * `options` - Normalizer tunables
///
/// # Returns
///
/// A draft `Schedule` with slots sorted by start time, transitions in slot
/// order, backstage calls in call order, and a recomputed total duration.
///
/// # Errors
///
/// Returns the first `ScheduleError` encountered, in this order: response
/// shape, slot fields, designer bijection, looks counts, slot ordering and
/// buffer, backstage lead, transitions, backstage calls.
pub fn normalize(
    raw: &UntrustedSchedule,
    request: &ValidatedRequest,
    options: &NormalizeOptions,
) -> Result<Schedule, ScheduleError> {
    let root: &Map<String, Value> =
        raw.as_value()
            .as_object()
            .ok_or_else(|| ScheduleError::MalformedResponse {
                reason: format!("expected a JSON object, got {}", json_kind(raw.as_value())),
            })?;

    let raw_slots: &Vec<Value> = required_array(root, schema::schedule::SLOTS)?;
    let raw_transitions: &Vec<Value> = required_array(root, schema::schedule::TRANSITIONS)?;
    let raw_calls: &Vec<Value> = required_array(root, schema::schedule::BACKSTAGE_CALLS)?;

    let mut slots: Vec<IndexedSlot> = raw_slots
        .iter()
        .enumerate()
        .map(|(index, value)| {
            parse_slot(value)
                .map(|slot| IndexedSlot {
                    raw_index: index,
                    slot,
                })
                .map_err(|reason| ScheduleError::InvalidSlot { index, reason })
        })
        .collect::<Result<_, _>>()?;

    check_designer_bijection(request, &slots)?;
    check_looks_counts(request, &slots)?;

    // Stable sort keeps raw order among equal starts so the tie is reported
    // against the slots the caller actually sent.
    slots.sort_by_key(|indexed| indexed.slot.slot_start);
    check_slot_spacing(&slots, request.buffer_minutes)?;
    check_backstage_lead(&slots, options.required_lead())?;

    let transitions: Vec<Transition> =
        normalize_transitions(raw_transitions, &slots, request.buffer_minutes)?;
    let backstage_calls: Vec<BackstageCall> = normalize_backstage_calls(raw_calls, request, &slots)?;

    let sorted: Vec<DesignerSlot> = slots.into_iter().map(|indexed| indexed.slot).collect();
    let total_duration_minutes: u32 = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => {
            u32::try_from(first.slot_start.minutes_until(last.slot_end)).unwrap_or(0)
        }
        _ => 0,
    };

    Ok(Schedule {
        schedule_name: optional_text(root, schema::schedule::SCHEDULE_NAME)
            .unwrap_or_else(|| DEFAULT_SCHEDULE_NAME.to_string()),
        total_duration_minutes,
        slots: sorted,
        transitions,
        backstage_calls,
        optimization_score: root
            .get(schema::schedule::OPTIMIZATION_SCORE)
            .and_then(clamp_score),
        reasoning: optional_text(root, schema::schedule::REASONING),
        status: ScheduleStatus::Draft,
    })
}

fn required_array<'a>(
    root: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a Vec<Value>, ScheduleError> {
    match root.get(field) {
        None | Some(Value::Null) => Err(ScheduleError::MalformedResponse {
            reason: format!("missing required field '{field}'"),
        }),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(ScheduleError::MalformedResponse {
            reason: format!("field '{field}' must be an array, got {}", json_kind(other)),
        }),
    }
}

fn parse_slot(value: &Value) -> Result<DesignerSlot, String> {
    let object: &Map<String, Value> = value
        .as_object()
        .ok_or_else(|| format!("expected an object, got {}", json_kind(value)))?;

    let designer_name: String = required_text(object, schema::slot::DESIGNER_NAME)?;
    let slot_start: WallClockTime = required_time(object, schema::slot::SLOT_START)?;
    let slot_end: WallClockTime = required_time(object, schema::slot::SLOT_END)?;
    let backstage_time: WallClockTime = required_time(object, schema::slot::BACKSTAGE_TIME)?;
    let looks_count: u32 = required_positive(object, schema::slot::LOOKS_COUNT)?;

    if slot_end <= slot_start {
        return Err(format!(
            "'{}' ({slot_end}) must be after '{}' ({slot_start})",
            schema::slot::SLOT_END,
            schema::slot::SLOT_START
        ));
    }

    Ok(DesignerSlot {
        designer_name,
        slot_start,
        slot_end,
        looks_count,
        backstage_time,
    })
}

fn parse_transition(value: &Value) -> Result<Transition, String> {
    let object: &Map<String, Value> = value
        .as_object()
        .ok_or_else(|| format!("expected an object, got {}", json_kind(value)))?;

    let from_designer: String = required_text(object, schema::transition::FROM_DESIGNER)?;
    let to_designer: String = required_text(object, schema::transition::TO_DESIGNER)?;
    let raw_duration: i64 = required_integer(object, schema::transition::DURATION_MINUTES)?;
    let duration_minutes: u32 = u32::try_from(raw_duration).map_err(|_| {
        format!(
            "'{}' must not be negative, got {raw_duration}",
            schema::transition::DURATION_MINUTES
        )
    })?;

    Ok(Transition {
        from_designer,
        to_designer,
        duration_minutes,
    })
}

fn parse_backstage_call(value: &Value) -> Result<BackstageCall, String> {
    let object: &Map<String, Value> = value
        .as_object()
        .ok_or_else(|| format!("expected an object, got {}", json_kind(value)))?;

    let designer: String = required_text(object, schema::backstage_call::DESIGNER)?;
    let call_time: WallClockTime = required_time(object, schema::backstage_call::CALL_TIME)?;
    let notes: String = match object.get(schema::backstage_call::NOTES) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.trim().to_string(),
        Some(other) => {
            return Err(format!(
                "'{}' must be a string, got {}",
                schema::backstage_call::NOTES,
                json_kind(other)
            ));
        }
    };

    Ok(BackstageCall {
        designer,
        call_time,
        notes,
    })
}

/// Compares the multiset of slot designers with the multiset of requested designers.
fn check_designer_bijection(
    request: &ValidatedRequest,
    slots: &[IndexedSlot],
) -> Result<(), ScheduleError> {
    let mut remaining: BTreeMap<&str, usize> = BTreeMap::new();
    for designer in &request.designers {
        *remaining.entry(designer.name.as_str()).or_insert(0) += 1;
    }

    let mut extra: Vec<String> = Vec::new();
    for indexed in slots {
        match remaining.get_mut(indexed.slot.designer_name.as_str()) {
            Some(count) if *count > 0 => *count -= 1,
            _ => extra.push(indexed.slot.designer_name.clone()),
        }
    }

    // Walk the request in order so missing names come back in lineup order.
    let mut missing: Vec<String> = Vec::new();
    for designer in &request.designers {
        if let Some(count) = remaining.get_mut(designer.name.as_str()) {
            if *count > 0 {
                *count -= 1;
                missing.push(designer.name.clone());
            }
        }
    }

    if missing.is_empty() && extra.is_empty() {
        Ok(())
    } else {
        Err(ScheduleError::DesignerMismatch { missing, extra })
    }
}

fn check_looks_counts(request: &ValidatedRequest, slots: &[IndexedSlot]) -> Result<(), ScheduleError> {
    let mut requested: BTreeMap<&str, Vec<u32>> = BTreeMap::new();
    for designer in &request.designers {
        requested
            .entry(designer.name.as_str())
            .or_default()
            .push(designer.looks_count);
    }

    let mut scheduled: BTreeMap<&str, Vec<u32>> = BTreeMap::new();
    for indexed in slots {
        scheduled
            .entry(indexed.slot.designer_name.as_str())
            .or_default()
            .push(indexed.slot.looks_count);
    }

    for designer in &request.designers {
        let name: &str = designer.name.as_str();
        let mut expected: Vec<u32> = requested.get(name).cloned().unwrap_or_default();
        let mut actual: Vec<u32> = scheduled.get(name).cloned().unwrap_or_default();
        expected.sort_unstable();
        actual.sort_unstable();

        if let Some((want, got)) = expected
            .iter()
            .zip(actual.iter())
            .find(|(want, got)| want != got)
        {
            return Err(ScheduleError::LooksCountMismatch {
                designer: name.to_string(),
                expected: *want,
                actual: *got,
            });
        }
    }

    Ok(())
}

/// Requires sorted slots to be strictly increasing and separated by at least the buffer.
fn check_slot_spacing(sorted: &[IndexedSlot], buffer_minutes: u32) -> Result<(), ScheduleError> {
    for pair in sorted.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        let gap: i32 = current.slot.slot_end.minutes_until(next.slot.slot_start);

        // A runway is single-stream: equal starts are never valid.
        if current.slot.slot_start == next.slot.slot_start
            || gap < i32::try_from(buffer_minutes).unwrap_or(i32::MAX)
        {
            return Err(ScheduleError::OverlappingSlots {
                first: current.raw_index,
                second: next.raw_index,
                first_designer: current.slot.designer_name.clone(),
                second_designer: next.slot.designer_name.clone(),
            });
        }
    }
    Ok(())
}

fn check_backstage_lead(sorted: &[IndexedSlot], required: u32) -> Result<(), ScheduleError> {
    for indexed in sorted {
        let lead: i32 = indexed
            .slot
            .backstage_time
            .minutes_until(indexed.slot.slot_start);
        if lead < i32::try_from(required).unwrap_or(i32::MAX) {
            return Err(ScheduleError::InsufficientBackstageLead {
                designer: indexed.slot.designer_name.clone(),
                lead_minutes: lead,
                required,
            });
        }
    }
    Ok(())
}

fn normalize_transitions(
    raw: &[Value],
    sorted: &[IndexedSlot],
    buffer_minutes: u32,
) -> Result<Vec<Transition>, ScheduleError> {
    let expected: usize = sorted.len().saturating_sub(1);
    if raw.len() != expected {
        return Err(ScheduleError::TransitionCountMismatch {
            expected,
            actual: raw.len(),
        });
    }

    let mut transitions: Vec<Transition> = Vec::with_capacity(expected);
    for (index, (value, pair)) in raw.iter().zip(sorted.windows(2)).enumerate() {
        let transition: Transition = parse_transition(value)
            .map_err(|reason| ScheduleError::InvalidTransition { index, reason })?;
        let (current, next) = (&pair[0].slot, &pair[1].slot);

        if transition.from_designer != current.designer_name
            || transition.to_designer != next.designer_name
        {
            return Err(ScheduleError::TransitionMismatch {
                index,
                expected_from: current.designer_name.clone(),
                expected_to: next.designer_name.clone(),
            });
        }

        if transition.duration_minutes < buffer_minutes {
            return Err(ScheduleError::InsufficientBuffer {
                index,
                duration_minutes: transition.duration_minutes,
                required: buffer_minutes,
            });
        }

        let gap: i32 = current.slot_end.minutes_until(next.slot_start);
        if i64::from(transition.duration_minutes) > i64::from(gap) {
            return Err(ScheduleError::TransitionExceedsGap {
                index,
                duration_minutes: transition.duration_minutes,
                gap_minutes: gap,
            });
        }

        transitions.push(transition);
    }

    Ok(transitions)
}

fn normalize_backstage_calls(
    raw: &[Value],
    request: &ValidatedRequest,
    sorted: &[IndexedSlot],
) -> Result<Vec<BackstageCall>, ScheduleError> {
    let mut calls: Vec<BackstageCall> = Vec::with_capacity(raw.len());
    for (index, value) in raw.iter().enumerate() {
        let call: BackstageCall = parse_backstage_call(value)
            .map_err(|reason| ScheduleError::InvalidBackstageCall { index, reason })?;
        if !request
            .designers
            .iter()
            .any(|designer| designer.name == call.designer)
        {
            return Err(ScheduleError::UnknownBackstageCall {
                designer: call.designer,
            });
        }
        calls.push(call);
    }
    calls.sort_by_key(|call| call.call_time);

    let mut checked: Vec<&str> = Vec::new();
    for designer in &request.designers {
        let name: &str = designer.name.as_str();
        if checked.contains(&name) {
            continue;
        }
        checked.push(name);

        // Both sequences are chronological, so the n-th call belongs to the n-th slot.
        let designer_calls: Vec<&BackstageCall> =
            calls.iter().filter(|call| call.designer == name).collect();
        let designer_slots: Vec<&DesignerSlot> = sorted
            .iter()
            .map(|indexed| &indexed.slot)
            .filter(|slot| slot.designer_name == name)
            .collect();

        if designer_calls.len() < designer_slots.len() {
            return Err(ScheduleError::MissingBackstageCall {
                designer: name.to_string(),
            });
        }
        if designer_calls.len() > designer_slots.len() {
            return Err(ScheduleError::DuplicateBackstageCall {
                designer: name.to_string(),
            });
        }
        if designer_calls
            .iter()
            .zip(designer_slots.iter())
            .any(|(call, slot)| call.call_time >= slot.slot_start)
        {
            return Err(ScheduleError::LateBackstageCall {
                designer: name.to_string(),
            });
        }
    }

    Ok(calls)
}

fn required_text(object: &Map<String, Value>, field: &str) -> Result<String, String> {
    match object.get(field) {
        None | Some(Value::Null) => Err(format!("missing required field '{field}'")),
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        Some(Value::String(_)) => Err(format!("'{field}' must not be blank")),
        Some(other) => Err(format!("'{field}' must be a string, got {}", json_kind(other))),
    }
}

fn required_time(object: &Map<String, Value>, field: &str) -> Result<WallClockTime, String> {
    let text: String = required_text(object, field)?;
    WallClockTime::parse(&text).map_err(|_| format!("'{field}' must be HH:MM, got '{text}'"))
}

fn required_integer(object: &Map<String, Value>, field: &str) -> Result<i64, String> {
    match object.get(field) {
        None | Some(Value::Null) => Err(format!("missing required field '{field}'")),
        Some(value) => as_integer(value)
            .ok_or_else(|| format!("'{field}' must be an integer, got {}", json_kind(value))),
    }
}

fn required_positive(object: &Map<String, Value>, field: &str) -> Result<u32, String> {
    let raw: i64 = required_integer(object, field)?;
    u32::try_from(raw)
        .ok()
        .filter(|count| *count > 0)
        .ok_or_else(|| format!("'{field}' must be a positive integer, got {raw}"))
}

fn optional_text(object: &Map<String, Value>, field: &str) -> Option<String> {
    object
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Accepts JSON integers and floats with no fractional part.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(integer) = value.as_i64() {
        return Some(integer);
    }
    value
        .as_f64()
        .filter(|float| float.fract() == 0.0 && float.abs() <= i64::MAX as f64)
        .map(|float| float as i64)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_score(value: &Value) -> Option<u8> {
    value
        .as_f64()
        .filter(|score| score.is_finite())
        .map(|score| score.round().clamp(0.0, 100.0) as u8)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
