// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::ScheduleStatus;

/// Errors raised while constructing or transitioning domain values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A wall-clock time is not a valid `HH:MM` value.
    InvalidWallClockTime {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
    /// A schedule status string is not recognised.
    InvalidScheduleStatus(String),
    /// The requested status change is not part of the schedule lifecycle.
    InvalidStatusTransition {
        /// Current status.
        from: ScheduleStatus,
        /// Requested status.
        to: ScheduleStatus,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidWallClockTime { value, reason } => {
                write!(f, "Invalid wall-clock time '{value}': {reason}")
            }
            Self::InvalidScheduleStatus(status) => {
                write!(
                    f,
                    "Invalid schedule status '{status}'. Must be draft, approved or archived"
                )
            }
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Cannot move a schedule from '{from}' to '{to}'")
            }
        }
    }
}

impl std::error::Error for DomainError {}

/// Reasons a schedule request is rejected before any collaborator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The event identifier is absent or blank.
    MissingEventId,
    /// No usable designer entries remain after dropping blank names and
    /// non-positive look counts.
    EmptyDesignerList,
    /// The requested buffer lies outside the permitted range.
    BufferOutOfRange {
        /// The submitted buffer.
        buffer_minutes: i64,
        /// Inclusive lower bound.
        min: u32,
        /// Inclusive upper bound.
        max: u32,
    },
}

impl ValidationError {
    /// Returns the request field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingEventId => "event_id",
            Self::EmptyDesignerList => "designers",
            Self::BufferOutOfRange { .. } => "buffer_time",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEventId => write!(f, "An event identifier is required"),
            Self::EmptyDesignerList => write!(
                f,
                "At least one designer with a name and a positive looks count is required"
            ),
            Self::BufferOutOfRange {
                buffer_minutes,
                min,
                max,
            } => write!(
                f,
                "Buffer time {buffer_minutes} is out of range. Must be between {min} and {max} minutes"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Reasons a collaborator response is rejected by the normalizer.
///
/// Every variant names the violated invariant and, where one exists, the
/// position of the offending element in the raw response arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// The response is not an object or lacks a required top-level sequence.
    MalformedResponse {
        /// What was wrong with the shape.
        reason: String,
    },
    /// A slot is missing a field or carries a value of the wrong type.
    InvalidSlot {
        /// Index in the raw `slots` array.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },
    /// Slot designers are not in bijection with the requested designers.
    DesignerMismatch {
        /// Requested designers that have no slot.
        missing: Vec<String>,
        /// Slot designers that were never requested (or appear too often).
        extra: Vec<String>,
    },
    /// A slot's looks count differs from the requested count.
    LooksCountMismatch {
        /// The designer.
        designer: String,
        /// Requested looks.
        expected: u32,
        /// Looks in the slot.
        actual: u32,
    },
    /// Two slots overlap, share a start time, or leave less than the buffer between them.
    OverlappingSlots {
        /// Raw index of the earlier slot.
        first: usize,
        /// Raw index of the later slot.
        second: usize,
        /// Designer of the earlier slot.
        first_designer: String,
        /// Designer of the later slot.
        second_designer: String,
    },
    /// A designer's backstage time is too close to (or after) the slot start.
    InsufficientBackstageLead {
        /// The designer.
        designer: String,
        /// Minutes between backstage time and slot start.
        lead_minutes: i32,
        /// Required minimum.
        required: u32,
    },
    /// The number of transitions is not `slots - 1`.
    TransitionCountMismatch {
        /// Expected count.
        expected: usize,
        /// Count in the response.
        actual: usize,
    },
    /// A transition is missing a field or carries a value of the wrong type.
    InvalidTransition {
        /// Index in the raw `transitions` array.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },
    /// A transition does not bridge the consecutive slots at its position.
    TransitionMismatch {
        /// Index in the raw `transitions` array.
        index: usize,
        /// Designer of the slot it should leave.
        expected_from: String,
        /// Designer of the slot it should enter.
        expected_to: String,
    },
    /// A transition is shorter than the requested buffer.
    InsufficientBuffer {
        /// Index in the raw `transitions` array.
        index: usize,
        /// Transition length.
        duration_minutes: u32,
        /// Requested buffer.
        required: u32,
    },
    /// A transition is longer than the gap between the slots it bridges.
    TransitionExceedsGap {
        /// Index in the raw `transitions` array.
        index: usize,
        /// Transition length.
        duration_minutes: u32,
        /// Minutes between the two slots.
        gap_minutes: i32,
    },
    /// A backstage call is missing a field or carries a value of the wrong type.
    InvalidBackstageCall {
        /// Index in the raw `backstageCalls` array.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },
    /// A requested designer has no backstage call.
    MissingBackstageCall {
        /// The designer.
        designer: String,
    },
    /// A designer has more backstage calls than slots.
    DuplicateBackstageCall {
        /// The designer.
        designer: String,
    },
    /// A backstage call names a designer that was never requested.
    UnknownBackstageCall {
        /// The name in the call.
        designer: String,
    },
    /// A backstage call is not strictly before the designer's slot.
    LateBackstageCall {
        /// The designer.
        designer: String,
    },
}

impl ScheduleError {
    /// Returns a stable identifier for the violated invariant.
    #[must_use]
    pub const fn invariant(&self) -> &'static str {
        match self {
            Self::MalformedResponse { .. } => "malformed_response",
            Self::InvalidSlot { .. } => "invalid_slot",
            Self::DesignerMismatch { .. } => "designer_mismatch",
            Self::LooksCountMismatch { .. } => "looks_count_mismatch",
            Self::OverlappingSlots { .. } => "overlapping_slots",
            Self::InsufficientBackstageLead { .. } => "insufficient_backstage_lead",
            Self::TransitionCountMismatch { .. } => "transition_count_mismatch",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::TransitionMismatch { .. } => "transition_mismatch",
            Self::InsufficientBuffer { .. } => "insufficient_buffer",
            Self::TransitionExceedsGap { .. } => "transition_exceeds_gap",
            Self::InvalidBackstageCall { .. } => "invalid_backstage_call",
            Self::MissingBackstageCall { .. } => "missing_backstage_call",
            Self::DuplicateBackstageCall { .. } => "duplicate_backstage_call",
            Self::UnknownBackstageCall { .. } => "unknown_backstage_call",
            Self::LateBackstageCall { .. } => "late_backstage_call",
        }
    }

    /// Returns the raw array index of the offending element, if the
    /// invariant is tied to one.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::InvalidSlot { index, .. }
            | Self::InvalidTransition { index, .. }
            | Self::TransitionMismatch { index, .. }
            | Self::InsufficientBuffer { index, .. }
            | Self::TransitionExceedsGap { index, .. }
            | Self::InvalidBackstageCall { index, .. } => Some(*index),
            Self::OverlappingSlots { second, .. } => Some(*second),
            _ => None,
        }
    }
}

impl std::fmt::Display for ScheduleError {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedResponse { reason } => {
                write!(f, "Malformed schedule response: {reason}")
            }
            Self::InvalidSlot { index, reason } => write!(f, "Invalid slot {index}: {reason}"),
            Self::DesignerMismatch { missing, extra } => write!(
                f,
                "Designer mismatch: missing [{}], extra [{}]",
                missing.join(", "),
                extra.join(", ")
            ),
            Self::LooksCountMismatch {
                designer,
                expected,
                actual,
            } => write!(
                f,
                "Designer '{designer}' was scheduled with {actual} looks but requested {expected}"
            ),
            Self::OverlappingSlots {
                first,
                second,
                first_designer,
                second_designer,
            } => write!(
                f,
                "Slots {first} ('{first_designer}') and {second} ('{second_designer}') overlap or leave less than the buffer between them"
            ),
            Self::InsufficientBackstageLead {
                designer,
                lead_minutes,
                required,
            } => write!(
                f,
                "Backstage time for '{designer}' is {lead_minutes} minutes before the slot; at least {required} required"
            ),
            Self::TransitionCountMismatch { expected, actual } => write!(
                f,
                "Expected {expected} transitions but the response contains {actual}"
            ),
            Self::InvalidTransition { index, reason } => {
                write!(f, "Invalid transition {index}: {reason}")
            }
            Self::TransitionMismatch {
                index,
                expected_from,
                expected_to,
            } => write!(
                f,
                "Transition {index} must go from '{expected_from}' to '{expected_to}'"
            ),
            Self::InsufficientBuffer {
                index,
                duration_minutes,
                required,
            } => write!(
                f,
                "Transition {index} lasts {duration_minutes} minutes; the buffer requires at least {required}"
            ),
            Self::TransitionExceedsGap {
                index,
                duration_minutes,
                gap_minutes,
            } => write!(
                f,
                "Transition {index} lasts {duration_minutes} minutes but only {gap_minutes} minutes separate its slots"
            ),
            Self::InvalidBackstageCall { index, reason } => {
                write!(f, "Invalid backstage call {index}: {reason}")
            }
            Self::MissingBackstageCall { designer } => {
                write!(f, "No backstage call for designer '{designer}'")
            }
            Self::DuplicateBackstageCall { designer } => {
                write!(f, "Designer '{designer}' has more backstage calls than slots")
            }
            Self::UnknownBackstageCall { designer } => write!(
                f,
                "Backstage call for '{designer}', who is not in the requested lineup"
            ),
            Self::LateBackstageCall { designer } => write!(
                f,
                "Backstage call for '{designer}' is not before their slot starts"
            ),
        }
    }
}

impl std::error::Error for ScheduleError {}
