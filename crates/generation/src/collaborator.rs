// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use async_trait::async_trait;
use runway::PromptPayload;
use runway_domain::UntrustedSchedule;

use crate::error::CollaboratorError;

/// What a successful collaborator call returns.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutput {
    /// The schedule payload, not yet normalized.
    pub raw: UntrustedSchedule,
    /// Token cost reported by the service, if any.
    pub tokens_used: Option<u32>,
}

/// Produces a raw schedule from a prompt.
///
/// Implementations must not retry on their own and must not interpret the
/// payload beyond extracting it from the transport envelope.
#[async_trait]
pub trait GenerationCollaborator: Send + Sync {
    /// Identifier of the model behind this collaborator, recorded in the operation log.
    fn model(&self) -> &str;

    /// Asks the collaborator for a schedule.
    ///
    /// # Errors
    ///
    /// Returns a `CollaboratorError` describing why no payload was obtained.
    async fn generate_schedule(
        &self,
        prompt: &PromptPayload,
    ) -> Result<GenerationOutput, CollaboratorError>;
}
