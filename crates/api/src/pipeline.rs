// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The schedule generation pipeline.
//!
//! One invocation runs validate → resolve event → prompt → collaborator →
//! normalize → persist, recording every stage in a `PipelineRun`. Whatever
//! the outcome, exactly one operation log entry is written afterwards. A
//! failure to write that entry is logged and otherwise ignored.

use runway::{EventContext, PipelineRun, PipelineStage, PromptPayload, build_prompt};
use runway_audit::{OperationLogEntry, OutcomeSummary};
use runway_domain::{
    EventId, NormalizeOptions, Schedule, ValidatedRequest, normalize, validate_request,
};
use runway_generation::{CollaboratorError, GenerationCollaborator, GenerationOutput};
use runway_persistence::{EventData, Persistence};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{
    ApiError, translate_collaborator_error, translate_core_error, translate_persistence_error,
    translate_schedule_error, translate_validation_error,
};
use crate::request_response::{GenerateScheduleRequest, GenerateScheduleResponse};

/// Default bound on a single collaborator call.
pub const DEFAULT_COLLABORATOR_TIMEOUT: Duration = Duration::from_secs(45);

/// Tunables for the generation pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Upper bound on the collaborator call.
    pub collaborator_timeout: Duration,
    /// Normalizer settings; the backstage lead also shapes the prompt.
    pub normalize: NormalizeOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            collaborator_timeout: DEFAULT_COLLABORATOR_TIMEOUT,
            normalize: NormalizeOptions::default(),
        }
    }
}

/// Runs schedule generation requests.
///
/// The persistence lock is held only around individual store calls, never
/// across the collaborator call.
#[derive(Clone)]
pub struct ScheduleGenerator {
    persistence: Arc<Mutex<Persistence>>,
    collaborator: Arc<dyn GenerationCollaborator>,
    config: PipelineConfig,
}

/// What one invocation produced, besides its result.
struct RunTrace {
    run: PipelineRun,
    event_id: Option<EventId>,
    tokens_used: Option<u32>,
}

impl ScheduleGenerator {
    /// Creates a generator.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The shared store
    /// * `collaborator` - The generation collaborator
    /// * `config` - Pipeline tunables
    #[must_use]
    pub fn new(
        persistence: Arc<Mutex<Persistence>>,
        collaborator: Arc<dyn GenerationCollaborator>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            persistence,
            collaborator,
            config,
        }
    }

    /// Returns the collaborator's model identifier.
    #[must_use]
    pub fn model(&self) -> &str {
        self.collaborator.model()
    }

    /// Generates, normalizes and persists a draft schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request fails validation (no collaborator call is made)
    /// - The event does not exist (no collaborator call is made)
    /// - The collaborator fails, times out, or is rate limited
    /// - The collaborator's schedule violates a normalization invariant
    /// - The schedule cannot be stored
    pub async fn generate(
        &self,
        request: &GenerateScheduleRequest,
    ) -> Result<GenerateScheduleResponse, ApiError> {
        self.execute(Ok(request.clone()), request.event_id.as_deref())
            .await
    }

    /// Like [`Self::generate`], but starting from the raw request body.
    ///
    /// A body that cannot be decoded is rejected at validation and still
    /// produces an operation log entry.
    ///
    /// # Errors
    ///
    /// As for [`Self::generate`], plus `ApiError::InvalidInput` for a body
    /// that is not a well-typed request.
    pub async fn generate_from_json(
        &self,
        body: &[u8],
    ) -> Result<GenerateScheduleResponse, ApiError> {
        let event_id: Option<String> = GenerateScheduleRequest::event_id_of(body);
        self.execute(GenerateScheduleRequest::from_json(body), event_id.as_deref())
            .await
    }

    async fn execute(
        &self,
        decoded: Result<GenerateScheduleRequest, ApiError>,
        requested_event_id: Option<&str>,
    ) -> Result<GenerateScheduleResponse, ApiError> {
        let started: Instant = Instant::now();
        let mut trace: RunTrace = RunTrace {
            run: PipelineRun::new(),
            event_id: requested_event_id
                .map(EventId::new)
                .filter(|id| !id.value().is_empty()),
            tokens_used: None,
        };

        let outcome: Result<GenerateScheduleResponse, ApiError> =
            self.run(decoded, &mut trace).await;
        if !trace.run.current().is_terminal() {
            warn!(stage = %trace.run.current(), "Pipeline stopped outside a terminal stage");
        }

        let latency_ms: u64 = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.record(&trace, &outcome, latency_ms).await;

        match &outcome {
            Ok(response) => info!(
                event_id = %response.event_id,
                schedule_id = response.schedule_id,
                latency_ms,
                "Generated runway schedule"
            ),
            Err(err) => warn!(
                kind = err.kind(),
                stage = %trace.run.current(),
                latency_ms,
                error = %err,
                "Schedule generation failed"
            ),
        }

        outcome
    }

    async fn run(
        &self,
        decoded: Result<GenerateScheduleRequest, ApiError>,
        trace: &mut RunTrace,
    ) -> Result<GenerateScheduleResponse, ApiError> {
        let run: &mut PipelineRun = &mut trace.run;

        enter(run, PipelineStage::Validating)?;
        let request: GenerateScheduleRequest = match decoded {
            Ok(request) => request,
            Err(err) => return Err(fail(run, PipelineStage::Rejected, err)),
        };
        let validated: ValidatedRequest = match validate_request(&request.to_schedule_request()) {
            Ok(validated) => validated,
            Err(err) => {
                return Err(fail(run, PipelineStage::Rejected, translate_validation_error(err)));
            }
        };
        enter(run, PipelineStage::Validated)?;

        let event: EventData = match self.find_event(&validated.event_id).await {
            Ok(event) => event,
            Err(err) => return Err(fail(run, PipelineStage::Rejected, err)),
        };

        enter(run, PipelineStage::Prompting)?;
        let context: EventContext =
            EventContext::new(&event.title, event.start_time, event.venue.as_deref());
        let prompt: PromptPayload = build_prompt(
            &validated,
            &context,
            self.config.normalize.min_backstage_lead_minutes.max(1),
        );

        enter(run, PipelineStage::CallingCollaborator)?;
        debug!(event_id = %validated.event_id, model = self.model(), "Calling collaborator");
        let output: GenerationOutput = match self.call_collaborator(&prompt).await {
            Ok(output) => output,
            Err(err) => {
                return Err(fail(
                    run,
                    PipelineStage::CollaboratorError,
                    translate_collaborator_error(err),
                ));
            }
        };
        trace.tokens_used = output.tokens_used;
        enter(run, PipelineStage::ResponseReceived)?;

        enter(run, PipelineStage::Normalizing)?;
        let schedule: Schedule =
            match normalize(&output.raw, &validated, &self.config.normalize) {
                Ok(schedule) => schedule,
                Err(err) => {
                    return Err(fail(
                        run,
                        PipelineStage::NormalizationFailed,
                        translate_schedule_error(err),
                    ));
                }
            };
        enter(run, PipelineStage::Accepted)?;

        enter(run, PipelineStage::Persisting)?;
        let stored: Result<i64, ApiError> = self
            .persistence
            .lock()
            .await
            .persist_schedule(&validated.event_id, &schedule)
            .map_err(translate_persistence_error);
        let schedule_id: i64 = match stored {
            Ok(schedule_id) => schedule_id,
            Err(err) => return Err(fail(run, PipelineStage::StorageFailed, err)),
        };
        enter(run, PipelineStage::Persisted)?;

        Ok(GenerateScheduleResponse {
            success: true,
            schedule_id,
            event_id: validated.event_id.value().to_string(),
            schedule,
            warnings: validated.warnings,
        })
    }

    async fn find_event(&self, event_id: &EventId) -> Result<EventData, ApiError> {
        self.persistence
            .lock()
            .await
            .get_event(event_id)
            .map_err(translate_persistence_error)?
            .ok_or_else(|| ApiError::EventNotFound {
                event_id: event_id.value().to_string(),
            })
    }

    async fn call_collaborator(
        &self,
        prompt: &PromptPayload,
    ) -> Result<GenerationOutput, CollaboratorError> {
        let timeout: Duration = self.config.collaborator_timeout;
        tokio::time::timeout(timeout, self.collaborator.generate_schedule(prompt))
            .await
            .unwrap_or(Err(CollaboratorError::Timeout {
                seconds: timeout.as_secs(),
            }))
    }

    async fn record(
        &self,
        trace: &RunTrace,
        outcome: &Result<GenerateScheduleResponse, ApiError>,
        latency_ms: u64,
    ) {
        let stages: Vec<String> = trace
            .run
            .stages()
            .iter()
            .map(|stage| stage.as_str().to_string())
            .collect();
        let summary: OutcomeSummary = OutcomeSummary::new(stages);

        let entry: OperationLogEntry = match outcome {
            Ok(response) => OperationLogEntry::succeeded(
                EventId::new(&response.event_id),
                self.model(),
                latency_ms,
                trace.tokens_used,
                &summary.with_schedule(
                    response.schedule_id,
                    response.schedule.slots.len(),
                    response.schedule.total_duration_minutes,
                ),
            ),
            Err(err) => OperationLogEntry::failed(
                trace.event_id.clone(),
                self.model(),
                &err.to_string(),
                latency_ms,
                trace.tokens_used,
                &summary.with_error_kind(err.kind()),
            ),
        };

        if let Err(err) = self.persistence.lock().await.log_operation(&entry) {
            warn!(error = %err, "Failed to write operation log entry");
        }
    }
}

fn enter(run: &mut PipelineRun, stage: PipelineStage) -> Result<(), ApiError> {
    run.advance(stage).map_err(translate_core_error)
}

/// Moves `run` into a terminal failure stage and returns the error to report.
fn fail(run: &mut PipelineRun, stage: PipelineStage, err: ApiError) -> ApiError {
    match run.advance(stage) {
        Ok(()) => err,
        Err(core_err) => translate_core_error(core_err),
    }
}
