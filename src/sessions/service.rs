//! Polling loop for pending try-on jobs.
//!
//! A session created from a fetch handle polls the status endpoint at a
//! fixed cadence until it observes success, a transport failure, or the
//! deadline. The loop is driven entirely by tokio timers, so tests run it
//! against the paused clock.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::header;
use serde_json::json;
use tokio::{
    sync::watch,
    time::{self, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use super::{
    enums::{poll_outcome::PollOutcome, session_outcome::SessionOutcome},
    models::job_session::JobSession,
    structs::tryon_fetch_response::TryonFetchResponse,
};

/// Timing of one polling session.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Cadence at which the status endpoint is polled.
    pub tick_interval: Duration,
    /// Absolute timeout, measured from session start, independent of the
    /// tick cadence.
    pub deadline: Duration,
    /// Cadence of the observational elapsed-time counter.
    pub progress_interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(14000),
            deadline: Duration::from_millis(30000),
            progress_interval: Duration::from_millis(1000),
        }
    }
}

/// One poll against the status endpoint. The production implementation
/// posts the credential to the fetch handle; tests substitute scripted
/// probes.
#[async_trait]
pub trait StatusProbe: Send + Sync {
    async fn poll_status(&self) -> PollOutcome;
}

/// Probe backed by the fetch-handle url returned by the creation endpoint.
pub struct FetchStatusProbe {
    fetch_url: String,
    key: String,
}

impl FetchStatusProbe {
    pub fn new(fetch_url: &str, key: &str) -> Self {
        Self {
            fetch_url: fetch_url.to_string(),
            key: key.to_string(),
        }
    }
}

#[async_trait]
impl StatusProbe for FetchStatusProbe {
    async fn poll_status(&self) -> PollOutcome {
        let mut headers = header::HeaderMap::new();
        headers.insert("Content-Type", "application/json".parse().unwrap());

        let client = reqwest::Client::new();
        let result = client
            .post(&self.fetch_url)
            .headers(headers)
            .json(&json!({ "key": self.key }))
            .send()
            .await;

        match result {
            Ok(res) => match res.text().await {
                Ok(text) => classify_fetch_response(&text),
                Err(e) => {
                    tracing::warn!("poll_status (1): {:?}", e);
                    PollOutcome::TransportError("Failed to read the fetch response.".to_string())
                }
            },
            Err(e) => {
                tracing::warn!("poll_status (2): {:?}", e);
                PollOutcome::TransportError("Failed to reach the fetch endpoint.".to_string())
            }
        }
    }
}

/// Classify one status response. Anything parseable that is not a success
/// carrying an output url counts as still pending; only an unreadable
/// body is a transport error.
pub fn classify_fetch_response(text: &str) -> PollOutcome {
    match serde_json::from_str::<TryonFetchResponse>(text) {
        Ok(response) => match (response.is_success(), response.output_url()) {
            (true, Some(url)) => PollOutcome::Success(url),
            _ => PollOutcome::StillPending,
        },
        Err(_) => {
            tracing::warn!("classify_fetch_response: {:?}", text);
            PollOutcome::TransportError("Failed to parse the fetch response.".to_string())
        }
    }
}

/// Start polling a fetch handle on a detached task and hand back the
/// session handle.
pub fn spawn_poll_session(
    fetch_url: &str,
    probe: Arc<dyn StatusProbe>,
    config: &PollConfig,
) -> JobSession {
    let cancel = CancellationToken::new();
    let (elapsed_tx, elapsed_rx) = watch::channel(0u64);
    let (outcome_tx, outcome_rx) = watch::channel(None);

    let session = JobSession::new(fetch_url, cancel.clone(), elapsed_rx, outcome_rx);
    let session_id = session.id().to_string();
    let config = config.clone();

    tokio::spawn(async move {
        tracing::debug!(session_id = %session_id, "poll session started");
        run_poll_loop(probe, config, cancel, elapsed_tx, outcome_tx, &session_id).await;
    });

    session
}

/// The session state machine.
///
/// Exactly one terminal outcome is written per session; returning drops
/// the tick, deadline, and progress timers together, so nothing fires
/// after a terminal transition. The select is biased: cancellation beats
/// the deadline, the deadline beats a simultaneous tick, and the progress
/// counter never outranks either. A success recorded by an earlier tick
/// has already ended the loop by the time the deadline could fire.
async fn run_poll_loop(
    probe: Arc<dyn StatusProbe>,
    config: PollConfig,
    cancel: CancellationToken,
    elapsed_tx: watch::Sender<u64>,
    outcome_tx: watch::Sender<Option<SessionOutcome>>,
    session_id: &str,
) {
    let started = Instant::now();

    let deadline = time::sleep(config.deadline);
    tokio::pin!(deadline);

    let mut ticker = time::interval_at(started + config.tick_interval, config.tick_interval);
    // One request per tick; a slow response delays the next tick instead
    // of overlapping it.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut progress = time::interval_at(
        started + config.progress_interval,
        config.progress_interval,
    );

    let mut elapsed_units: u64 = 0;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(session_id = %session_id, "poll session canceled");
                return;
            }
            _ = &mut deadline => {
                tracing::debug!(session_id = %session_id, "poll session timed out");
                let _ = outcome_tx.send(Some(SessionOutcome::TimedOut));
                return;
            }
            _ = ticker.tick() => {
                // The deadline keeps authority over a request in flight.
                let outcome = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        tracing::debug!(session_id = %session_id, "poll session canceled");
                        return;
                    }
                    _ = &mut deadline => {
                        tracing::debug!(session_id = %session_id, "poll session timed out");
                        let _ = outcome_tx.send(Some(SessionOutcome::TimedOut));
                        return;
                    }
                    outcome = probe.poll_status() => outcome,
                };

                match outcome {
                    PollOutcome::Success(output_url) => {
                        tracing::debug!(session_id = %session_id, "poll session succeeded");
                        let _ = outcome_tx.send(Some(SessionOutcome::Succeeded(output_url)));
                        return;
                    }
                    PollOutcome::StillPending => {
                        tracing::debug!(session_id = %session_id, elapsed_units, "still pending");
                    }
                    PollOutcome::TransportError(message) => {
                        tracing::error!(session_id = %session_id, %message, "poll session failed");
                        let _ = outcome_tx.send(Some(SessionOutcome::Failed(message)));
                        return;
                    }
                }
            }
            _ = progress.tick() => {
                elapsed_units += 1;
                let _ = elapsed_tx.send(elapsed_units);
            }
        }
    }
}
