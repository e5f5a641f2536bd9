//! Plain-text rendering of analyses, progress, and mentor aggregates.
//!
//! Every function returns a string without a trailing newline; callers
//! pick the output stream.

use mentorscope_client::HealthStatus;
use mentorscope_core::analysis::{AnalysisRecord, Insights, Scores};
use mentorscope_core::mentor::{MentorDetail, MentorSummary, RankedMentor};
use mentorscope_tracker::TrackerSession;

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// One line per applied poll, e.g. `[ 42%] Transcribing speech (poll 3)`.
pub fn progress_line(session: &TrackerSession) -> String {
    format!(
        "[{:>3}%] {} (poll {})",
        session.progress.rounded_percent(),
        session.progress.phase_label(),
        session.poll_count,
    )
}

/// Closing line once a watched analysis completes; the phase label gives
/// way to a completion notice under the full bar.
pub fn completion_line(session: &TrackerSession) -> String {
    format!("[{:>3}%] Analysis Complete!", session.progress.rounded_percent())
}

// ---------------------------------------------------------------------------
// Analyses
// ---------------------------------------------------------------------------

/// Multi-line score and insight report for a completed analysis.
pub fn score_report(scores: &Scores, insights: &Insights) -> String {
    let mut lines = vec![
        format!("Overall score: {:.1}", scores.overall),
        format!("  Engagement:      {:.1}", scores.engagement),
        format!("  Communication:   {:.1}", scores.communication),
        format!("  Technical depth: {:.1}", scores.technical_depth),
        format!("  Clarity:         {:.1}", scores.clarity),
        format!("  Interaction:     {:.1}", scores.interaction),
    ];

    push_section(&mut lines, "Strengths:", &insights.strengths);
    push_section(&mut lines, "Improvements:", &insights.improvements);
    push_section(&mut lines, "Recommendations:", &insights.recommendations);

    if let Some(highlights) = &insights.key_highlights {
        lines.push(format!("Highlights: {highlights}"));
    }

    lines.join("\n")
}

fn push_section(lines: &mut Vec<String>, header: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(header.to_string());
    lines.extend(items.iter().map(|item| format!("  - {item}")));
}

/// Field-per-line view of one record, rendered from whatever is present.
pub fn record_summary(record: &AnalysisRecord) -> String {
    let mut lines = vec![
        format!("Analysis {}", record.id),
        format!("  Mentor:  {} ({})", record.mentor_name, record.mentor_id),
        format!("  Subject: {}", record.subject),
        match record.video_duration {
            Some(seconds) => format!("  Video:   {} ({seconds:.1}s)", record.video_filename),
            None => format!("  Video:   {}", record.video_filename),
        },
        format!("  Status:  {}", record.status.as_str()),
        format!("  Created: {}", record.created_at),
        format!("  Updated: {}", record.updated_at),
    ];

    if let Some(completed_at) = record.completed_at {
        lines.push(format!("  Ended:   {completed_at}"));
    }
    if let Some(error) = &record.error {
        lines.push(format!("  Error:   {error}"));
    }

    lines.join("\n")
}

/// One line per record for `list` output.
pub fn listing_row(record: &AnalysisRecord) -> String {
    format!(
        "{}  {:<10}  {}  {} / {}",
        record.id,
        record.status.as_str(),
        record.created_at,
        record.mentor_name,
        record.subject,
    )
}

/// Failure indicator for a terminally failed analysis.
pub fn failure_line(record: &AnalysisRecord) -> String {
    format!(
        "analysis {} failed: {}",
        record.id,
        record.error.as_deref().unwrap_or("no error reported"),
    )
}

// ---------------------------------------------------------------------------
// Mentors
// ---------------------------------------------------------------------------

/// One line per mentor for `mentors` output.
pub fn mentor_row(mentor: &MentorSummary) -> String {
    let base = format!(
        "{}  {}  avg {:.1} over {} sessions",
        mentor.id, mentor.mentor_name, mentor.average_score, mentor.total_sessions,
    );
    match mentor.last_session {
        Some(last) => format!("{base}, last {last}"),
        None => base,
    }
}

/// One leaderboard line for `top` output.
pub fn leaderboard_row(row: &RankedMentor) -> String {
    format!(
        "#{:<3} {}  avg {:.1} over {} sessions  ({})",
        row.rank, row.mentor_name, row.average_score, row.total_sessions, row.id,
    )
}

/// Multi-line rollup for one mentor, recent sessions included.
pub fn mentor_detail_block(detail: &MentorDetail) -> String {
    let mut lines = vec![
        format!("Mentor {} ({})", detail.mentor_name, detail.mentor_id),
        format!(
            "  Sessions: {} total, {} completed",
            detail.total_sessions, detail.completed_sessions,
        ),
        format!(
            "  Scores:   avg {:.1}, high {:.1}, low {:.1}",
            detail.average_score, detail.highest_score, detail.lowest_score,
        ),
    ];

    if !detail.recent_analyses.is_empty() {
        lines.push("  Recent:".to_string());
        lines.extend(
            detail
                .recent_analyses
                .iter()
                .map(|record| format!("    {}", listing_row(record))),
        );
    }

    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// Render one probe result, e.g. `service: healthy (mentor-analysis-api)`.
pub fn health_line(label: &str, health: &HealthStatus) -> String {
    let detail = health.service.as_deref().or(health.database.as_deref());
    match detail {
        Some(detail) => format!("{label}: {} ({detail})", health.status),
        None => format!("{label}: {}", health.status),
    }
}
