use crate::core::view::{ErrorBanner, ResultsView};
use crate::domain::model::{ProfileRequest, ResponseEnvelope};
use crate::domain::ports::RecommendationSource;
use crate::utils::error::{AppError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Default bound on one submission round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Busy,
    Succeeded,
    Failed(String),
}

/// Receives every state transition; the CLI uses it for the busy indicator.
pub trait StateObserver: Send + Sync {
    fn on_state(&self, state: &SubmissionState);
}

#[derive(Debug)]
pub enum SubmissionOutcome {
    Rendered(ResultsView),
    Failed { banner: ErrorBanner, error: AppError },
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Rendered(_))
    }
}

/// Aborts the submission currently in flight. Cancelling while idle is a no-op.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    notify: Arc<Notify>,
    in_flight: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Returns whether a request was in flight to cancel.
    pub fn cancel(&self) -> bool {
        let active = self.in_flight.load(Ordering::SeqCst);
        if active {
            self.notify.notify_waiters();
        }
        active
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Drives one profile submission at a time: idle, busy, then success or
/// error, then idle again on every path.
pub struct SubmissionController<R: RecommendationSource> {
    source: R,
    timeout: Option<Duration>,
    cancel: CancelHandle,
    state: SubmissionState,
    observers: Vec<Arc<dyn StateObserver>>,
}

impl<R: RecommendationSource> SubmissionController<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            timeout: Some(DEFAULT_TIMEOUT),
            cancel: CancelHandle::default(),
            state: SubmissionState::Idle,
            observers: Vec::new(),
        }
    }

    /// `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn StateObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state == SubmissionState::Busy
    }

    /// `&mut self` keeps a second submission from starting while one is in flight.
    pub async fn submit(&mut self, profile: &ProfileRequest) -> SubmissionOutcome {
        self.transition(SubmissionState::Busy);
        tracing::info!("🚀 Submitting profile for recommendations");

        let outcome = match self.round_trip(profile).await {
            Ok(envelope) => {
                self.transition(SubmissionState::Succeeded);
                SubmissionOutcome::Rendered(ResultsView::from_envelope(&envelope))
            }
            Err(error) => {
                let message = error.user_friendly_message();
                tracing::warn!("❌ Submission failed: {}", error);
                self.transition(SubmissionState::Failed(message.clone()));
                SubmissionOutcome::Failed {
                    banner: ErrorBanner::new(message),
                    error,
                }
            }
        };

        self.transition(SubmissionState::Idle);
        outcome
    }

    async fn round_trip(&self, profile: &ProfileRequest) -> Result<ResponseEnvelope> {
        let cancelled = self.cancel.notify.notified();
        let request = self.source.recommend(profile);
        self.cancel.in_flight.store(true, Ordering::SeqCst);

        let result = match self.timeout {
            Some(limit) => tokio::select! {
                result = tokio::time::timeout(limit, request) => match result {
                    Ok(inner) => inner,
                    Err(_) => Err(AppError::Timeout { seconds: limit.as_secs() }),
                },
                _ = cancelled => Err(AppError::Cancelled),
            },
            None => tokio::select! {
                result = request => result,
                _ = cancelled => Err(AppError::Cancelled),
            },
        };

        self.cancel.in_flight.store(false, Ordering::SeqCst);
        result
    }

    fn transition(&mut self, state: SubmissionState) {
        tracing::debug!("Submission state: {:?} -> {:?}", self.state, state);
        for observer in &self.observers {
            observer.on_state(&state);
        }
        self.state = state;
    }
}
