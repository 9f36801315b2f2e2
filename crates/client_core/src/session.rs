//! Session-scoped submission state shared between the orchestrator and UI readers.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use shared::domain::{Effect, EffectParameters, ImagePayload, Outcome};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
pub struct SubmissionSnapshot {
    pub effect: Option<Effect>,
    pub parameters: EffectParameters,
    pub image: Option<Arc<ImagePayload>>,
}

/// One instance per selection screen visit. Only the orchestrator writes the
/// in-flight flag and the last outcome.
#[derive(Debug, Default)]
pub struct SubmissionSession {
    selection: RwLock<SubmissionSnapshot>,
    in_flight: AtomicBool,
    last_outcome: RwLock<Option<Outcome>>,
}

impl SubmissionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn select_effect(&self, effect: Effect) {
        self.selection.write().await.effect = Some(effect);
    }

    pub async fn clear_effect(&self) {
        self.selection.write().await.effect = None;
    }

    pub async fn set_radius(&self, radius: Option<i64>) {
        self.selection.write().await.parameters.radius = radius;
    }

    pub async fn select_image(&self, image: ImagePayload) {
        self.selection.write().await.image = Some(Arc::new(image));
    }

    pub async fn clear_image(&self) {
        self.selection.write().await.image = None;
    }

    /// Drops the selection and last outcome; leaves an in-flight attempt alone.
    pub async fn reset(&self) {
        *self.selection.write().await = SubmissionSnapshot::default();
        *self.last_outcome.write().await = None;
    }

    pub async fn snapshot(&self) -> SubmissionSnapshot {
        self.selection.read().await.clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome.read().await.clone()
    }

    pub(crate) async fn record_outcome(&self, outcome: Outcome) {
        *self.last_outcome.write().await = Some(outcome);
    }

    /// Claims the in-flight flag, or `None` if another attempt holds it.
    pub(crate) fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard {
                flag: &self.in_flight,
            })
    }
}

/// Clears the in-flight flag when dropped, including when the submit future is.
pub(crate) struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
