// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use time::macros::format_description;

/// Buffer applied between consecutive designer slots when the request omits one.
pub const DEFAULT_BUFFER_MINUTES: u32 = 5;
/// Smallest buffer a request may ask for.
pub const MIN_BUFFER_MINUTES: u32 = 1;
/// Largest buffer a request may ask for.
pub const MAX_BUFFER_MINUTES: u32 = 15;
/// Default minimum gap between a designer's backstage time and their slot start.
pub const DEFAULT_MIN_BACKSTAGE_LEAD_MINUTES: u32 = 15;

/// Identifies the event a schedule belongs to.
///
/// Event identifiers are opaque to this system; they are only trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId {
    value: String,
}

impl EventId {
    /// Creates a new `EventId` from a raw identifier, trimming surrounding whitespace.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_string(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Serialize for EventId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        Ok(Self::new(&raw))
    }
}

/// A wall-clock time of day with minute precision (`HH:MM`, 24-hour).
///
/// A runway show is confined to a single calendar day, so times are
/// compared as minutes since midnight and never wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WallClockTime {
    minutes: u16,
}

impl WallClockTime {
    /// Parses a strict, zero-padded `HH:MM` string.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWallClockTime` if the value is not a
    /// valid 24-hour `HH:MM` time.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let parsed: time::Time = time::Time::parse(value.trim(), format_description!("[hour]:[minute]"))
            .map_err(|e| DomainError::InvalidWallClockTime {
                value: value.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            minutes: u16::from(parsed.hour()) * 60 + u16::from(parsed.minute()),
        })
    }

    /// Builds a time from an hour and minute pair.
    ///
    /// Returns `None` if either component is out of range.
    #[must_use]
    pub const fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour >= 24 || minute >= 60 {
            return None;
        }
        Some(Self {
            minutes: hour as u16 * 60 + minute as u16,
        })
    }

    /// Returns the number of minutes since midnight.
    #[must_use]
    pub const fn minutes_since_midnight(&self) -> u16 {
        self.minutes
    }

    /// Returns the signed number of minutes from `self` until `later`.
    ///
    /// Negative when `later` is actually earlier in the day.
    #[must_use]
    pub const fn minutes_until(&self, later: Self) -> i32 {
        later.minutes as i32 - self.minutes as i32
    }
}

impl std::fmt::Display for WallClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes / 60, self.minutes % 60)
    }
}

impl FromStr for WallClockTime {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for WallClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for WallClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A designer entry exactly as submitted by the caller.
///
/// Nothing about this type is trusted; see `validate_request`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DesignerInput {
    /// The designer's display name, possibly blank or absent.
    pub name: Option<String>,
    /// The requested number of looks, possibly zero or negative.
    pub looks_count: i64,
}

impl DesignerInput {
    /// Creates a new `DesignerInput`.
    #[must_use]
    pub fn new(name: &str, looks_count: i64) -> Self {
        Self {
            name: Some(name.to_string()),
            looks_count,
        }
    }
}

/// An unvalidated request for a runway schedule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduleRequest {
    /// The event the schedule is for.
    pub event_id: Option<String>,
    /// Designers in the order the caller listed them.
    pub designers: Vec<DesignerInput>,
    /// Requested buffer between slots; defaults to `DEFAULT_BUFFER_MINUTES`.
    pub buffer_minutes: Option<i64>,
}

/// A designer that survived request validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Designer {
    /// The trimmed designer name.
    pub name: String,
    /// The number of looks, always positive.
    pub looks_count: u32,
}

impl Designer {
    /// Creates a new `Designer`.
    #[must_use]
    pub fn new(name: &str, looks_count: u32) -> Self {
        Self {
            name: name.to_string(),
            looks_count,
        }
    }
}

/// A non-fatal observation made while validating a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestWarning {
    /// A designer name appears more than once.
    DuplicateDesignerName {
        /// The repeated name.
        name: String,
        /// How many times it appears.
        occurrences: usize,
    },
    /// A designer entry was dropped because its name was blank.
    BlankDesignerName {
        /// Position of the entry in the submitted list.
        index: usize,
    },
    /// A designer entry was dropped because its looks count was not positive.
    NonPositiveLooksCount {
        /// Position of the entry in the submitted list.
        index: usize,
        /// The submitted count.
        looks_count: i64,
    },
}

impl std::fmt::Display for RequestWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateDesignerName { name, occurrences } => {
                write!(f, "Designer '{name}' appears {occurrences} times")
            }
            Self::BlankDesignerName { index } => {
                write!(f, "Designer entry {index} has a blank name and was ignored")
            }
            Self::NonPositiveLooksCount { index, looks_count } => {
                write!(
                    f,
                    "Designer entry {index} has looks count {looks_count} and was ignored"
                )
            }
        }
    }
}

/// A request that passed validation and may be sent to the generation collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    /// The event the schedule is for.
    pub event_id: EventId,
    /// Designers in request order. Never empty.
    pub designers: Vec<Designer>,
    /// Minimum transition time between consecutive slots, within `[1, 15]`.
    pub buffer_minutes: u32,
    /// Observations that did not block validation.
    pub warnings: Vec<RequestWarning>,
}

impl ValidatedRequest {
    /// Returns the total number of looks across all designers.
    #[must_use]
    pub fn total_looks(&self) -> u64 {
        self.designers
            .iter()
            .map(|designer| u64::from(designer.looks_count))
            .sum()
    }
}

/// A reserved, non-overlapping window in the show for one designer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignerSlot {
    /// The designer walking in this slot.
    pub designer_name: String,
    /// When the first look walks.
    pub slot_start: WallClockTime,
    /// When the last look clears the runway. Strictly after `slot_start`.
    pub slot_end: WallClockTime,
    /// Number of looks shown in the slot.
    pub looks_count: u32,
    /// When the designer's models are due backstage.
    pub backstage_time: WallClockTime,
}

impl DesignerSlot {
    /// Returns the length of the slot in minutes.
    #[must_use]
    pub const fn duration_minutes(&self) -> i32 {
        self.slot_start.minutes_until(self.slot_end)
    }
}

/// Changeover time between two consecutive designer slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    /// The designer leaving the runway.
    pub from_designer: String,
    /// The designer coming on next.
    pub to_designer: String,
    /// Length of the changeover.
    pub duration_minutes: u32,
}

/// The time a designer and their models must report backstage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackstageCall {
    /// The designer being called.
    pub designer: String,
    /// Call time; always before the designer's slot.
    pub call_time: WallClockTime,
    /// Free text for the stage manager.
    pub notes: String,
}

/// Lifecycle of a persisted schedule.
///
/// Schedules are always created as drafts; approval and archival are
/// performed by an operator after review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    /// Generated and persisted, not yet reviewed.
    #[default]
    Draft,
    /// Reviewed and accepted for the show.
    Approved,
    /// Retired. Terminal.
    Archived,
}

impl ScheduleStatus {
    /// Converts this status to its persisted string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Approved => "approved",
            Self::Archived => "archived",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - `draft` → `approved`
    /// - `draft` → `archived`
    /// - `approved` → `archived`
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Approved | Self::Archived) | (Self::Approved, Self::Archived)
        )
    }
}

impl FromStr for ScheduleStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "approved" => Ok(Self::Approved),
            "archived" => Ok(Self::Archived),
            _ => Err(DomainError::InvalidScheduleStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A runway schedule that satisfied every normalization invariant.
///
/// The only way to obtain one from collaborator output is `normalize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Human-readable schedule title.
    pub schedule_name: String,
    /// `last.slot_end - first.slot_start`, always recomputed.
    pub total_duration_minutes: u32,
    /// One slot per requested designer, sorted by start time.
    pub slots: Vec<DesignerSlot>,
    /// Exactly `slots.len() - 1` changeovers, bridging consecutive slots.
    pub transitions: Vec<Transition>,
    /// One call per requested designer.
    pub backstage_calls: Vec<BackstageCall>,
    /// Advisory score in `[0, 100]`, if the collaborator supplied one.
    pub optimization_score: Option<u8>,
    /// Free-text reasoning from the collaborator.
    pub reasoning: Option<String>,
    /// Lifecycle status.
    pub status: ScheduleStatus,
}

impl Schedule {
    /// Returns the start of the first slot.
    #[must_use]
    pub fn show_start(&self) -> Option<WallClockTime> {
        self.slots.first().map(|slot| slot.slot_start)
    }

    /// Returns the end of the last slot.
    #[must_use]
    pub fn show_end(&self) -> Option<WallClockTime> {
        self.slots.last().map(|slot| slot.slot_end)
    }
}
