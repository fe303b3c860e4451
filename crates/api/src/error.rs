// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use runway::CoreError;
use runway_domain::{DomainError, ScheduleError, ValidationError};
use runway_generation::CollaboratorError;
use runway_persistence::PersistenceError;
use tracing::error;

/// API-level errors.
///
/// These are distinct from domain, collaborator and persistence errors and
/// represent the API contract. Every variant maps to one stable `kind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The referenced event does not exist.
    EventNotFound {
        /// The event identifier that was looked up.
        event_id: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A resource with the same identity already exists.
    DuplicateResource {
        /// The type of resource.
        resource_type: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// The collaborator's schedule failed normalization.
    ScheduleRejected {
        /// Stable identifier of the violated invariant.
        invariant: String,
        /// Position of the offending element in the raw response, if any.
        index: Option<usize>,
        /// A human-readable description of the violation.
        message: String,
    },
    /// The generation service is throttling requests.
    RateLimited {
        /// Message for the caller.
        message: String,
    },
    /// The generation service account has no credits left.
    CreditsExhausted {
        /// Message for the caller.
        message: String,
    },
    /// The generation service did not answer in time.
    CollaboratorTimeout {
        /// Message for the caller.
        message: String,
    },
    /// The generation service failed in any other way.
    CollaboratorFailed {
        /// Message for the caller.
        message: String,
    },
    /// The store could not complete the operation.
    StorageUnavailable {
        /// A description of the storage failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns the machine-readable error kind reported to callers.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "validation_error",
            Self::EventNotFound { .. } => "event_not_found",
            Self::ResourceNotFound { .. } => "not_found",
            Self::DuplicateResource { .. } => "duplicate",
            Self::DomainRuleViolation { .. } => "rule_violation",
            Self::ScheduleRejected { .. } => "schedule_rejected",
            Self::RateLimited { .. } => "rate_limit",
            Self::CreditsExhausted { .. } => "credits_exhausted",
            Self::CollaboratorTimeout { .. } => "collaborator_timeout",
            Self::CollaboratorFailed { .. } => "collaborator_error",
            Self::StorageUnavailable { .. } => "storage_unavailable",
            Self::Internal { .. } => "internal",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::EventNotFound { event_id } => write!(f, "Event '{event_id}' does not exist"),
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::DuplicateResource {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} already exists: {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::ScheduleRejected {
                invariant, message, ..
            } => {
                write!(f, "Schedule rejected ({invariant}): {message}")
            }
            Self::RateLimited { message }
            | Self::CreditsExhausted { message }
            | Self::CollaboratorTimeout { message }
            | Self::CollaboratorFailed { message } => write!(f, "{message}"),
            Self::StorageUnavailable { message } => write!(f, "Storage unavailable: {message}"),
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a request validation error into an API error.
///
/// The offending field is carried through so callers can correct it.
#[must_use]
pub fn translate_validation_error(err: ValidationError) -> ApiError {
    ApiError::InvalidInput {
        field: err.field().to_string(),
        message: err.to_string(),
    }
}

/// Translates a normalization failure into an API error.
///
/// The violated invariant and raw index are preserved; a rejected schedule
/// is never reported generically.
#[must_use]
pub fn translate_schedule_error(err: ScheduleError) -> ApiError {
    ApiError::ScheduleRejected {
        invariant: err.invariant().to_string(),
        index: err.index(),
        message: err.to_string(),
    }
}

/// Translates a collaborator failure into an API error.
#[must_use]
pub fn translate_collaborator_error(err: CollaboratorError) -> ApiError {
    match err {
        CollaboratorError::RateLimited(_) => ApiError::RateLimited {
            message: String::from("Rate limit exceeded. Please try again later."),
        },
        CollaboratorError::QuotaExhausted(_) => ApiError::CreditsExhausted {
            message: String::from("Generation credits exhausted. Please contact support."),
        },
        CollaboratorError::Timeout { .. } => ApiError::CollaboratorTimeout {
            message: err.to_string(),
        },
        CollaboratorError::Malformed(_)
        | CollaboratorError::Upstream { .. }
        | CollaboratorError::Transport(_) => ApiError::CollaboratorFailed {
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Lookups that miss become not-found errors; everything else is a storage
/// failure and is logged here.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::EventNotFound(event_id) => ApiError::EventNotFound { event_id },
        PersistenceError::DuplicateEvent(event_id) => ApiError::DuplicateResource {
            resource_type: String::from("Event"),
            message: format!("Event '{event_id}' already exists"),
        },
        PersistenceError::ScheduleNotFound(schedule_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Schedule"),
            message: format!("Schedule {schedule_id} does not exist"),
        },
        other => {
            error!(error = %other, "Persistence error");
            ApiError::StorageUnavailable {
                message: other.to_string(),
            }
        }
    }
}

/// Translates a domain error into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidWallClockTime { .. } => ApiError::InvalidInput {
            field: String::from("start_time"),
            message: err.to_string(),
        },
        DomainError::InvalidScheduleStatus(_) => ApiError::InvalidInput {
            field: String::from("status"),
            message: err.to_string(),
        },
        DomainError::InvalidStatusTransition { .. } => ApiError::DomainRuleViolation {
            rule: String::from("schedule_status_lifecycle"),
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
///
/// Core errors only arise from pipeline bugs, so they are always internal.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    error!(error = %err, "Pipeline state machine violation");
    ApiError::Internal {
        message: err.to_string(),
    }
}
