use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared::{
    catalog::{self, ValidatedCall},
    domain::{Effect, ImagePayload, Outcome, SubmissionId},
    error::ValidationError,
};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::{
    remote::{RemoteError, RemoteEffectClient},
    session::SubmissionSession,
};

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("a submission is already in progress")]
    AlreadyInProgress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionEvent {
    /// Duplicate submit while another attempt was in flight.
    Ignored {
        submission_id: SubmissionId,
        at: DateTime<Utc>,
    },
    /// Validation failed; nothing was sent.
    Rejected {
        submission_id: SubmissionId,
        outcome: Outcome,
        at: DateTime<Utc>,
    },
    Started {
        submission_id: SubmissionId,
        effect: Effect,
        at: DateTime<Utc>,
    },
    Finished {
        submission_id: SubmissionId,
        effect: Effect,
        outcome: Outcome,
        at: DateTime<Utc>,
    },
}

/// Validates the session's selection, dispatches exactly one remote call and
/// records the outcome. At most one attempt per session runs at a time.
pub struct SubmissionOrchestrator {
    client: Arc<dyn RemoteEffectClient>,
    events: broadcast::Sender<SubmissionEvent>,
}

impl SubmissionOrchestrator {
    pub fn new(client: Arc<dyn RemoteEffectClient>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { client, events }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SubmissionEvent> {
        self.events.subscribe()
    }

    pub async fn submit(&self, session: &SubmissionSession) -> Result<Outcome, SubmitError> {
        let submission_id = SubmissionId::new();

        if session.is_in_flight() {
            debug!(%submission_id, "ignoring submit while another is in flight");
            self.emit(SubmissionEvent::Ignored {
                submission_id,
                at: Utc::now(),
            });
            return Err(SubmitError::AlreadyInProgress);
        }

        let snapshot = session.snapshot().await;
        let validated = catalog::validate(
            snapshot.effect,
            &snapshot.parameters,
            snapshot.image.as_deref(),
        )
        .and_then(|call| {
            snapshot
                .image
                .map(|image| (call, image))
                .ok_or(ValidationError::MissingImage)
        });
        let (call, image) = match validated {
            Ok(validated) => validated,
            Err(err) => {
                info!(%submission_id, error = %err, "submission rejected by validation");
                let outcome = Outcome::failure(err.kind(), err.user_title(), err.user_message());
                session.record_outcome(outcome.clone()).await;
                self.emit(SubmissionEvent::Rejected {
                    submission_id,
                    outcome: outcome.clone(),
                    at: Utc::now(),
                });
                return Ok(outcome);
            }
        };

        let Some(in_flight) = session.try_begin() else {
            debug!(%submission_id, "lost the in-flight race; ignoring submit");
            self.emit(SubmissionEvent::Ignored {
                submission_id,
                at: Utc::now(),
            });
            return Err(SubmitError::AlreadyInProgress);
        };

        let effect = call.effect();
        info!(
            %submission_id,
            %effect,
            filename = %image.filename,
            bytes = image.len(),
            "submitting image"
        );
        self.emit(SubmissionEvent::Started {
            submission_id,
            effect,
            at: Utc::now(),
        });

        let outcome = match self.dispatch(call, &image).await {
            Ok(output_reference) => {
                info!(%submission_id, %effect, %output_reference, "effect applied");
                Outcome::success(output_reference)
            }
            Err(err) => {
                warn!(%submission_id, %effect, error = %err, "effect submission failed");
                err.into_outcome()
            }
        };

        session.record_outcome(outcome.clone()).await;
        drop(in_flight);

        self.emit(SubmissionEvent::Finished {
            submission_id,
            effect,
            outcome: outcome.clone(),
            at: Utc::now(),
        });
        Ok(outcome)
    }

    async fn dispatch(
        &self,
        call: ValidatedCall,
        image: &ImagePayload,
    ) -> Result<String, RemoteError> {
        match call {
            ValidatedCall::Downscale => self.client.downscale(image).await,
            ValidatedCall::Upscale => self.client.upscale(image).await,
            ValidatedCall::Denoise => self.client.denoise(image).await,
            ValidatedCall::Blur { radius } => self.client.blur(image, radius).await,
        }
    }

    fn emit(&self, event: SubmissionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}
