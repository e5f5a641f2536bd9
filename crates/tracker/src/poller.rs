//! The polling engine that drives sessions to a terminal state.
//!
//! One Tokio task per session runs a strictly sequential loop: fetch,
//! apply, publish, sleep. Sequencing is what delivers the interesting
//! guarantees: at most one fetch in flight, results applied in issue
//! order, snapshots published once per applied fetch.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use mentorscope_core::ProgressEstimator;

use crate::session::{SessionState, StopCause, TrackerSession};
use crate::source::AnalysisSource;

/// Delay between consecutive status fetches. Part of the pacing contract
/// with the Job Service.
pub const POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// How long [`TrackerHandle::shutdown`] waits for the loop task to exit.
/// Long enough for one in-flight fetch to resolve and be discarded.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Spawns polling sessions over an [`AnalysisSource`].
pub struct StatusPoller<S> {
    source: Arc<S>,
    interval: Duration,
}

impl<S: AnalysisSource + 'static> StatusPoller<S> {
    /// Poller with the contract cadence of one fetch per 3 seconds.
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            interval: POLL_INTERVAL,
        }
    }

    /// Override the fetch cadence. Tests run millisecond intervals.
    pub fn with_interval(source: Arc<S>, interval: Duration) -> Self {
        Self { source, interval }
    }

    /// Begin tracking one analysis job.
    ///
    /// The first fetch is dispatched immediately; afterwards one fetch
    /// runs per interval until a terminal status, a fetch error, or
    /// cancellation. Sessions are independent: each gets its own task,
    /// estimator, and snapshot channel.
    pub fn start(&self, analysis_id: &str) -> Result<TrackerHandle, TrackError> {
        self.start_session(analysis_id, ProgressEstimator::new())
    }

    /// [`StatusPoller::start`] with a fixed estimator seed, so the
    /// synthesized progress sequence is reproducible.
    pub fn start_seeded(&self, analysis_id: &str, seed: u64) -> Result<TrackerHandle, TrackError> {
        self.start_session(analysis_id, ProgressEstimator::with_seed(seed))
    }

    fn start_session(
        &self,
        analysis_id: &str,
        estimator: ProgressEstimator,
    ) -> Result<TrackerHandle, TrackError> {
        let analysis_id = analysis_id.trim();
        if analysis_id.is_empty() {
            return Err(TrackError::EmptyAnalysisId);
        }
        let analysis_id = analysis_id.to_string();

        let (tx, rx) = watch::channel(TrackerSession::new(analysis_id.clone()));
        let cancel = CancellationToken::new();

        let source = Arc::clone(&self.source);
        let interval = self.interval;
        let task_cancel = cancel.clone();
        let id = analysis_id.clone();
        let task = tokio::spawn(async move {
            tracing::debug!(analysis_id = %id, "Polling session started");
            run_poll_loop(source.as_ref(), &id, interval, estimator, &tx, &task_cancel).await;
            tracing::debug!(analysis_id = %id, "Polling session exited");
        });

        Ok(TrackerHandle {
            analysis_id,
            rx,
            cancel,
            task,
        })
    }
}

// ---------------------------------------------------------------------------
// Session handle
// ---------------------------------------------------------------------------

/// Live handle to one polling session.
///
/// Dropping the handle cancels the session; nothing keeps polling for an
/// observer that went away.
pub struct TrackerHandle {
    analysis_id: String,
    rx: watch::Receiver<TrackerSession>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl TrackerHandle {
    pub fn analysis_id(&self) -> &str {
        &self.analysis_id
    }

    /// Latest published session snapshot.
    pub fn snapshot(&self) -> TrackerSession {
        self.rx.borrow().clone()
    }

    /// Watch receiver over session snapshots. Publications follow apply
    /// order; a reader always observes the newest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<TrackerSession> {
        self.rx.clone()
    }

    /// True while polls are still scheduled and the session has not been
    /// cancelled.
    pub fn is_active(&self) -> bool {
        !self.cancel.is_cancelled() && self.rx.borrow().is_active()
    }

    /// True once [`TrackerHandle::cancel`] has taken effect.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stop the session. Idempotent.
    ///
    /// An in-flight fetch is left to finish; its result is discarded and
    /// the exposed session is never written again. The frozen snapshot
    /// keeps whatever was last published.
    pub fn cancel(&self) {
        if !self.cancel.is_cancelled() {
            tracing::debug!(analysis_id = %self.analysis_id, "Polling session cancelled");
        }
        self.cancel.cancel();
    }

    /// Wait until the loop stops (terminal status, fetch error, or
    /// cancellation) and return the final snapshot.
    pub async fn wait_until_stopped(&mut self) -> TrackerSession {
        loop {
            if self.cancel.is_cancelled() || !self.rx.borrow().is_active() {
                return self.rx.borrow().clone();
            }
            tokio::select! {
                _ = self.cancel.cancelled() => return self.rx.borrow().clone(),
                changed = self.rx.changed() => {
                    // A closed channel means the loop task exited.
                    if changed.is_err() {
                        return self.rx.borrow().clone();
                    }
                }
            }
        }
    }

    /// Cancel the session and wait for its task to exit, bounded by
    /// [`SHUTDOWN_TIMEOUT`].
    pub async fn shutdown(mut self) -> TrackerSession {
        self.cancel.cancel();
        let _ = tokio::time::timeout(SHUTDOWN_TIMEOUT, &mut self.task).await;
        self.rx.borrow().clone()
    }
}

impl Drop for TrackerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// ---------------------------------------------------------------------------
// Poll loop
// ---------------------------------------------------------------------------

/// One session's poll loop.
///
/// The cancellation token is checked after every fetch resolves and
/// before every sleep; once it fires, no state is published again. A
/// fetch is never hard-cancelled — a concurrent `cancel()` lets it
/// finish and discards the result.
async fn run_poll_loop<S: AnalysisSource + ?Sized>(
    source: &S,
    analysis_id: &str,
    interval: Duration,
    mut estimator: ProgressEstimator,
    tx: &watch::Sender<TrackerSession>,
    cancel: &CancellationToken,
) {
    let mut session = TrackerSession::new(analysis_id.to_string());

    loop {
        if cancel.is_cancelled() {
            return;
        }

        let outcome = source.fetch_analysis(analysis_id).await;
        if cancel.is_cancelled() {
            return;
        }

        match outcome {
            Ok(record) => {
                let status = record.status.clone();
                if let Err(anomaly) = record.state() {
                    tracing::warn!(
                        analysis_id = %analysis_id,
                        status = %status,
                        anomaly = %anomaly,
                        "Record fields contradict reported status",
                    );
                }

                session.progress = estimator.observe(&status);
                session.latest = Some(record);
                session.state = if status.is_terminal() {
                    tracing::info!(
                        analysis_id = %analysis_id,
                        status = %status,
                        polls = session.poll_count,
                        "Analysis reached terminal status",
                    );
                    SessionState::Stopped(StopCause::Terminal)
                } else {
                    session.poll_count += 1;
                    SessionState::Polling
                };
            }
            Err(error) => {
                // One failed fetch stops the session; retrying is the
                // caller's decision via a fresh session.
                tracing::warn!(
                    analysis_id = %analysis_id,
                    error = %error,
                    "Status fetch failed, stopping session",
                );
                session.last_error = Some(error);
                session.state = SessionState::Stopped(StopCause::FetchError);
            }
        }

        let stopped = !session.is_active();
        tx.send_replace(session.clone());
        if stopped {
            return;
        }

        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(interval) => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from starting a polling session.
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    /// `start` requires a non-empty analysis id.
    #[error("Analysis id must not be empty")]
    EmptyAnalysisId,
}
