// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CoreError, PipelineRun, PipelineStage};

fn advance_all(run: &mut PipelineRun, stages: &[PipelineStage]) {
    for stage in stages {
        run.advance(*stage).unwrap();
    }
}

#[test]
fn test_run_starts_received() {
    let run: PipelineRun = PipelineRun::new();
    assert_eq!(run.current(), PipelineStage::Received);
    assert_eq!(run.stages(), &[PipelineStage::Received]);
    assert!(!run.current().is_terminal());
}

#[test]
fn test_run_follows_happy_path_to_persisted() {
    let mut run: PipelineRun = PipelineRun::new();
    advance_all(
        &mut run,
        &[
            PipelineStage::Validating,
            PipelineStage::Validated,
            PipelineStage::Prompting,
            PipelineStage::CallingCollaborator,
            PipelineStage::ResponseReceived,
            PipelineStage::Normalizing,
            PipelineStage::Accepted,
            PipelineStage::Persisting,
            PipelineStage::Persisted,
        ],
    );

    assert!(run.current().is_terminal());
    assert_eq!(run.stages().len(), 10);
}

#[test]
fn test_run_rejects_unknown_event_after_validation() {
    let mut run: PipelineRun = PipelineRun::new();
    advance_all(
        &mut run,
        &[
            PipelineStage::Validating,
            PipelineStage::Validated,
            PipelineStage::Rejected,
        ],
    );
    assert!(run.current().is_terminal());
}

#[test]
fn test_run_rejects_skipped_stage() {
    let mut run: PipelineRun = PipelineRun::new();
    let result: Result<(), CoreError> = run.advance(PipelineStage::CallingCollaborator);

    assert_eq!(
        result,
        Err(CoreError::InvalidStageTransition {
            from: PipelineStage::Received,
            to: PipelineStage::CallingCollaborator,
        })
    );
    assert_eq!(run.current(), PipelineStage::Received);
}

#[test]
fn test_terminal_stages_allow_nothing_further() {
    let terminal: [PipelineStage; 5] = [
        PipelineStage::Rejected,
        PipelineStage::CollaboratorError,
        PipelineStage::NormalizationFailed,
        PipelineStage::StorageFailed,
        PipelineStage::Persisted,
    ];
    for stage in terminal {
        assert!(stage.is_terminal());
        assert!(!stage.can_transition_to(PipelineStage::Received));
        assert!(!stage.can_transition_to(PipelineStage::Persisting));
    }
}

#[test]
fn test_stage_serializes_as_snake_case() {
    let value: serde_json::Value =
        serde_json::to_value(PipelineStage::CallingCollaborator).unwrap();
    assert_eq!(value, "calling_collaborator");
    assert_eq!(
        PipelineStage::NormalizationFailed.to_string(),
        "normalization_failed"
    );
}
