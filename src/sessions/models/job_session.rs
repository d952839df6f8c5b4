use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::sessions::enums::{session_outcome::SessionOutcome, session_phase::SessionPhase};

/// Handle over one in-flight polling session.
///
/// Clones share the same underlying session: the cancellation token, the
/// elapsed-time side channel, and the terminal outcome. The session's
/// timers live in a detached task; dropping a handle does not stop them,
/// canceling does.
#[derive(Debug, Clone)]
pub struct JobSession {
    id: String,
    fetch_url: String,
    cancel: CancellationToken,
    elapsed: watch::Receiver<u64>,
    outcome: watch::Receiver<Option<SessionOutcome>>,
}

impl JobSession {
    pub(crate) fn new(
        fetch_url: &str,
        cancel: CancellationToken,
        elapsed: watch::Receiver<u64>,
        outcome: watch::Receiver<Option<SessionOutcome>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            fetch_url: fetch_url.to_string(),
            cancel,
            elapsed,
            outcome,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fetch_url(&self) -> &str {
        &self.fetch_url
    }

    /// Progress units counted so far, for display only. One unit per
    /// configured progress interval.
    pub fn elapsed_secs(&self) -> u64 {
        *self.elapsed.borrow()
    }

    pub fn phase(&self) -> SessionPhase {
        match &*self.outcome.borrow() {
            None => SessionPhase::Polling,
            Some(SessionOutcome::Succeeded(_)) => SessionPhase::Succeeded,
            Some(SessionOutcome::TimedOut) => SessionPhase::TimedOut,
            Some(SessionOutcome::Failed(_)) => SessionPhase::Failed,
        }
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome.borrow().clone()
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.borrow().is_some()
    }

    /// Stop the session's timers. No outcome is recorded after this.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the session to reach a terminal state. Returns `None` if
    /// the session was canceled before reaching one.
    pub async fn await_outcome(&self) -> Option<SessionOutcome> {
        let mut outcome = self.outcome.clone();

        loop {
            if let Some(terminal) = outcome.borrow_and_update().clone() {
                return Some(terminal);
            }

            if outcome.changed().await.is_err() {
                // Sender gone; pick up an outcome sent just before it dropped.
                return outcome.borrow().clone();
            }
        }
    }
}
