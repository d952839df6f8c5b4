//! Client for an asynchronous virtual try-on image generation api.
//!
//! One creation call submits the job. When the service answers with a
//! fetch handle instead of an image, a polling session drives the handle
//! at a fixed cadence under a hard deadline, and the terminal states are
//! reconciled into a single caller-visible outcome.

#[macro_use]
extern crate lazy_static;

use std::sync::Arc;

use tokio::sync::Mutex;

pub mod app;
pub mod jobs;
pub mod sessions;

pub use app::config::TryOnConfig;
pub use app::errors::TryOnError;
pub use jobs::dtos::create_tryon_job_dto::CreateTryonJobDto;
pub use jobs::enums::{cloth_type::ClothType, submission_result::SubmissionResult};
pub use jobs::models::tryon_image::TryOnImage;
pub use jobs::service::run_tryon_job;
pub use sessions::enums::{
    poll_outcome::PollOutcome, session_outcome::SessionOutcome, session_phase::SessionPhase,
};
pub use sessions::models::job_session::JobSession;
pub use sessions::service::{PollConfig, StatusProbe};

/// Shared client state: the injectable configuration and the slot holding
/// the one active polling session.
///
/// Starting a new session cancels the previous one before the new timers
/// exist, so a stale session can never mutate anything once a newer
/// submission has begun.
pub struct TryOnState {
    pub config: TryOnConfig,
    session: Mutex<Option<JobSession>>,
}

impl TryOnState {
    pub fn new(config: TryOnConfig) -> Self {
        Self {
            config,
            session: Mutex::new(None),
        }
    }

    pub fn from_env() -> Result<Self, envy::Error> {
        Ok(Self::new(TryOnConfig::from_env()?))
    }

    /// Replace the active session: cancel the previous one's timers, then
    /// spawn a new polling session for `fetch_url`.
    pub async fn begin_session(&self, fetch_url: &str, probe: Arc<dyn StatusProbe>) -> JobSession {
        let mut slot = self.session.lock().await;

        if let Some(previous) = slot.take() {
            tracing::info!(session_id = %previous.id(), "canceling previous poll session");
            previous.cancel();
        }

        let session = sessions::service::spawn_poll_session(fetch_url, probe, &self.config.poll);
        *slot = Some(session.clone());

        session
    }

    /// The session currently occupying the slot, if any.
    pub async fn current_session(&self) -> Option<JobSession> {
        self.session.lock().await.clone()
    }

    /// Drop and cancel the active session, returning the state to idle.
    pub async fn reset(&self) {
        let mut slot = self.session.lock().await;

        if let Some(previous) = slot.take() {
            previous.cancel();
        }
    }
}

impl Default for TryOnState {
    fn default() -> Self {
        Self::new(TryOnConfig::default())
    }
}
