// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::PipelineStage;

/// Errors raised by the pipeline state machine.
///
/// These indicate a programming error in the caller, not bad input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The pipeline attempted a stage change the state machine does not allow.
    InvalidStageTransition {
        /// The stage the pipeline was in.
        from: PipelineStage,
        /// The stage it attempted to enter.
        to: PipelineStage,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStageTransition { from, to } => {
                write!(f, "Invalid pipeline transition from '{from}' to '{to}'")
            }
        }
    }
}

impl std::error::Error for CoreError {}
