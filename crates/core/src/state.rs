// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use serde::Serialize;

/// A stage of a single schedule-generation request.
///
/// ```text
/// Received -> Validating -> Validated | Rejected
/// Validated -> Prompting | Rejected
/// Prompting -> CallingCollaborator -> ResponseReceived | CollaboratorError
/// ResponseReceived -> Normalizing -> Accepted | NormalizationFailed
/// Accepted -> Persisting -> Persisted | StorageFailed
/// ```
///
/// `Validated -> Rejected` covers a request whose event does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Received,
    Validating,
    Validated,
    Rejected,
    Prompting,
    CallingCollaborator,
    ResponseReceived,
    CollaboratorError,
    Normalizing,
    Accepted,
    NormalizationFailed,
    Persisting,
    Persisted,
    StorageFailed,
}

impl PipelineStage {
    /// Returns the stable string form used in logs and operation records.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Validating => "validating",
            Self::Validated => "validated",
            Self::Rejected => "rejected",
            Self::Prompting => "prompting",
            Self::CallingCollaborator => "calling_collaborator",
            Self::ResponseReceived => "response_received",
            Self::CollaboratorError => "collaborator_error",
            Self::Normalizing => "normalizing",
            Self::Accepted => "accepted",
            Self::NormalizationFailed => "normalization_failed",
            Self::Persisting => "persisting",
            Self::Persisted => "persisted",
            Self::StorageFailed => "storage_failed",
        }
    }

    /// Returns `true` if no further stage may follow this one.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Rejected
                | Self::CollaboratorError
                | Self::NormalizationFailed
                | Self::StorageFailed
                | Self::Persisted
        )
    }

    /// Checks whether the state machine allows moving to `next`.
    #[must_use]
    pub const fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Received, Self::Validating)
                | (Self::Validating, Self::Validated | Self::Rejected)
                | (Self::Validated, Self::Prompting | Self::Rejected)
                | (Self::Prompting, Self::CallingCollaborator)
                | (
                    Self::CallingCollaborator,
                    Self::ResponseReceived | Self::CollaboratorError
                )
                | (Self::ResponseReceived, Self::Normalizing)
                | (Self::Normalizing, Self::Accepted | Self::NormalizationFailed)
                | (Self::Accepted, Self::Persisting)
                | (Self::Persisting, Self::Persisted | Self::StorageFailed)
        )
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The trace of stages one request has passed through.
///
/// A run always starts at `Received`. Stages only ever append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineRun {
    stages: Vec<PipelineStage>,
}

impl PipelineRun {
    /// Starts a new run in the `Received` stage.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stages: vec![PipelineStage::Received],
        }
    }

    /// Returns the current stage.
    #[must_use]
    pub fn current(&self) -> PipelineStage {
        self.stages
            .last()
            .copied()
            .unwrap_or(PipelineStage::Received)
    }

    /// Returns every stage visited so far, in order.
    #[must_use]
    pub fn stages(&self) -> &[PipelineStage] {
        &self.stages
    }

    /// Moves the run to `next`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidStageTransition` if the state machine does
    /// not allow the move. The run is left unchanged.
    pub fn advance(&mut self, next: PipelineStage) -> Result<(), CoreError> {
        let current: PipelineStage = self.current();
        if !current.can_transition_to(next) {
            return Err(CoreError::InvalidStageTransition {
                from: current,
                to: next,
            });
        }
        self.stages.push(next);
        Ok(())
    }
}

impl Default for PipelineRun {
    fn default() -> Self {
        Self::new()
    }
}
