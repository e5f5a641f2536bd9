//! Follow a tracker session and print one line per applied poll.

use std::io::{self, Write};

use mentorscope_core::analysis::AnalysisStatus;
use mentorscope_tracker::{TrackerHandle, TrackerSession};

use crate::render;

/// Print a progress line for every counted poll until the session
/// stops, then return the final snapshot.
///
/// Lines are keyed off `poll_count`; when the watch channel conflates
/// snapshots the newest one is printed and skipped intermediates are
/// dropped rather than replayed. A completed terminal snapshot gets a
/// closing full-bar line; a failed or errored stop prints nothing here
/// and is reported by the caller.
pub async fn follow(handle: &TrackerHandle, out: &mut dyn Write) -> io::Result<TrackerSession> {
    let mut rx = handle.subscribe();
    let mut printed_polls = 0;

    loop {
        let session = rx.borrow_and_update().clone();
        if session.poll_count > printed_polls {
            writeln!(out, "{}", render::progress_line(&session))?;
            printed_polls = session.poll_count;
        }
        if !session.is_active() {
            if session.latest_status() == Some(&AnalysisStatus::Completed) {
                writeln!(out, "{}", render::completion_line(&session))?;
            }
            return Ok(session);
        }
        if rx.changed().await.is_err() {
            // Publisher gone without a stop transition (session cancelled).
            return Ok(rx.borrow().clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::Utc;

    use mentorscope_core::analysis::{AnalysisRecord, AnalysisStatus, Insights, Scores};
    use mentorscope_core::progress::COMPLETED_PERCENT;
    use mentorscope_tracker::{AnalysisSource, SessionState, SourceError, StatusPoller, StopCause};

    struct ScriptedSource {
        statuses: Mutex<VecDeque<&'static str>>,
    }

    impl ScriptedSource {
        fn new(statuses: &[&'static str]) -> Arc<Self> {
            Arc::new(Self {
                statuses: Mutex::new(statuses.iter().copied().collect()),
            })
        }
    }

    #[async_trait]
    impl AnalysisSource for ScriptedSource {
        async fn fetch_analysis(&self, analysis_id: &str) -> Result<AnalysisRecord, SourceError> {
            let status = self
                .statuses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| SourceError::Transport("script exhausted".to_string()))?;

            let status = AnalysisStatus::from(status.to_string());
            let completed = status == AnalysisStatus::Completed;
            Ok(AnalysisRecord {
                id: analysis_id.to_string(),
                mentor_id: "m1".to_string(),
                mentor_name: "Dana".to_string(),
                subject: "Ownership".to_string(),
                video_filename: "lesson.mp4".to_string(),
                video_duration: None,
                status,
                scores: completed.then(|| Scores {
                    engagement: 80.0,
                    communication: 80.0,
                    technical_depth: 80.0,
                    clarity: 80.0,
                    interaction: 80.0,
                    overall: 80.0,
                }),
                insights: completed.then(|| Insights {
                    strengths: vec![],
                    improvements: vec![],
                    recommendations: vec![],
                    key_highlights: None,
                }),
                transcript: None,
                audio_features: None,
                visual_features: None,
                nlp_analysis: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
                completed_at: None,
                error: None,
            })
        }
    }

    #[tokio::test]
    async fn follow_prints_progress_lines_then_a_completion_line() {
        let source = ScriptedSource::new(&["pending", "processing", "completed"]);
        let poller = StatusPoller::with_interval(source, Duration::from_millis(20));
        let handle = poller.start_seeded("a1b2c3", 7).unwrap();

        let mut out = Vec::new();
        let session = follow(&handle, &mut out).await.unwrap();

        assert_eq!(session.state, SessionState::Stopped(StopCause::Terminal));
        assert_eq!(session.poll_count, 2);
        assert_eq!(session.progress.percent, COMPLETED_PERCENT);

        let printed = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = printed.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "[  0%] Uploading video (poll 1)");
        assert!(lines[1].ends_with("(poll 2)"));
        assert_eq!(lines[2], "[100%] Analysis Complete!");
    }

    #[tokio::test]
    async fn follow_snaps_to_completion_on_an_instantly_terminal_job() {
        let source = ScriptedSource::new(&["completed"]);
        let poller = StatusPoller::with_interval(source, Duration::from_millis(20));
        let handle = poller.start("a1b2c3").unwrap();

        let mut out = Vec::new();
        let session = follow(&handle, &mut out).await.unwrap();

        assert_eq!(session.poll_count, 0);
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed, "[100%] Analysis Complete!\n");
    }

    #[tokio::test]
    async fn follow_leaves_failure_reporting_to_the_caller() {
        let source = ScriptedSource::new(&["pending", "failed"]);
        let poller = StatusPoller::with_interval(source, Duration::from_millis(20));
        let handle = poller.start("a1b2c3").unwrap();

        let mut out = Vec::new();
        let session = follow(&handle, &mut out).await.unwrap();

        assert_eq!(session.state, SessionState::Stopped(StopCause::Terminal));
        assert_eq!(
            session.latest_status(),
            Some(&AnalysisStatus::Failed)
        );
        // The pending poll printed one line; the failed stop added none.
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed, "[  0%] Uploading video (poll 1)\n");
    }

    #[tokio::test]
    async fn follow_prints_nothing_when_first_fetch_fails() {
        let source = ScriptedSource::new(&[]);
        let poller = StatusPoller::with_interval(source, Duration::from_millis(20));
        let handle = poller.start("a1b2c3").unwrap();

        let mut out = Vec::new();
        let session = follow(&handle, &mut out).await.unwrap();

        assert_eq!(session.state, SessionState::Stopped(StopCause::FetchError));
        assert!(session.last_error.is_some());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn follow_returns_current_snapshot_when_session_is_cancelled() {
        let source = ScriptedSource::new(&["pending", "processing", "processing", "processing"]);
        let poller = StatusPoller::with_interval(source, Duration::from_millis(20));
        let handle = poller.start("a1b2c3").unwrap();

        tokio::time::sleep(Duration::from_millis(30)).await;
        handle.cancel();

        let mut out = Vec::new();
        let session = follow(&handle, &mut out).await.unwrap();

        // The loop exits without a stop transition; whatever was applied
        // before the cancel is what gets reported.
        assert!(session.poll_count >= 1);
        assert!(!handle.is_active());
    }
}
