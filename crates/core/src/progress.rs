//! Display progress estimation for analysis polling.
//!
//! The Job Service reports only a coarse lifecycle status, so the client
//! synthesizes a smooth progress readout: a percentage and a pipeline
//! phase that advance a bounded amount per poll and never move backwards.
//! The numbers are a UX heuristic, not a measurement; the only hard
//! signals remain the terminal statuses.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::analysis::AnalysisStatus;

// ---------------------------------------------------------------------------
// Phase list
// ---------------------------------------------------------------------------

/// Number of display phases in [`ANALYSIS_PHASES`].
pub const PHASE_COUNT: usize = 7;

/// Ordered pipeline phases shown while an analysis is running.
///
/// Fixed at compile time; `step_index` in [`ProgressView`] always indexes
/// into this list.
pub const ANALYSIS_PHASES: [&str; PHASE_COUNT] = [
    "Uploading video",
    "Extracting audio",
    "Transcribing speech",
    "Analyzing visuals",
    "Processing NLP",
    "Calculating scores",
    "Generating insights",
];

// ---------------------------------------------------------------------------
// Progress constants
// ---------------------------------------------------------------------------

/// Ceiling for the synthesized percentage while the analysis is still
/// running. The final stretch is released only by a confirmed
/// `completed` status.
pub const PROCESSING_PERCENT_CEILING: f64 = 90.0;

/// Upper bound of the random percentage increment applied per
/// processing poll.
pub const MAX_PERCENT_STEP_PER_POLL: f64 = 10.0;

/// Percentage reported once the analysis has completed.
pub const COMPLETED_PERCENT: f64 = 100.0;

// ---------------------------------------------------------------------------
// Progress view
// ---------------------------------------------------------------------------

/// Snapshot of synthesized display progress.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ProgressView {
    /// Synthesized completion percentage in `[0, 100]`.
    pub percent: f64,
    /// Index into [`ANALYSIS_PHASES`].
    pub step_index: usize,
}

impl ProgressView {
    /// Starting view; also the answer for a session that never observed
    /// anything.
    pub const INITIAL: ProgressView = ProgressView {
        percent: 0.0,
        step_index: 0,
    };

    /// Percentage rounded for display.
    pub fn rounded_percent(&self) -> u8 {
        self.percent.round() as u8
    }

    /// Label of the current pipeline phase.
    pub fn phase_label(&self) -> &'static str {
        ANALYSIS_PHASES[self.step_index.min(PHASE_COUNT - 1)]
    }
}

impl Default for ProgressView {
    fn default() -> Self {
        Self::INITIAL
    }
}

// ---------------------------------------------------------------------------
// Estimator
// ---------------------------------------------------------------------------

/// Folds observed poll statuses into a monotone [`ProgressView`].
///
/// One estimator per tracker session. Rules per observation:
///
/// - `pending` holds `{0, 0}`.
/// - `processing` bumps the percentage by a random amount in
///   `[0, MAX_PERCENT_STEP_PER_POLL]`, clamped to
///   [`PROCESSING_PERCENT_CEILING`]; the phase holds on the first
///   processing poll, then advances one step per poll until the last
///   phase.
/// - `completed` snaps to `{100, PHASE_COUNT - 1}`, including when it is
///   the first status ever observed.
/// - `failed` freezes the view where it was.
/// - unrecognized statuses hold the view; polling continues but no phase
///   is animated for a state we cannot interpret.
///
/// Percentage and phase never decrease for the lifetime of one estimator.
#[derive(Debug)]
pub struct ProgressEstimator {
    view: ProgressView,
    processing_polls: u32,
    rng: StdRng,
}

impl ProgressEstimator {
    /// Estimator with entropy-seeded jitter.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_rng(&mut rand::rng()))
    }

    /// Estimator with a fixed seed, for deterministic sequences.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            view: ProgressView::INITIAL,
            processing_polls: 0,
            rng,
        }
    }

    /// Current view. A fresh estimator answers `{0, 0}`; asking is never
    /// an error.
    pub fn view(&self) -> ProgressView {
        self.view
    }

    /// Fold one applied poll observation into the view and return it.
    pub fn observe(&mut self, status: &AnalysisStatus) -> ProgressView {
        match status {
            AnalysisStatus::Pending => {}
            AnalysisStatus::Processing => {
                self.processing_polls += 1;
                if self.processing_polls > 1 && self.view.step_index < PHASE_COUNT - 1 {
                    self.view.step_index += 1;
                }
                let increment = self.rng.random_range(0.0..=MAX_PERCENT_STEP_PER_POLL);
                let bumped = (self.view.percent + increment).min(PROCESSING_PERCENT_CEILING);
                // max keeps the view monotone even if a bump lands below
                // an earlier value.
                self.view.percent = self.view.percent.max(bumped);
            }
            AnalysisStatus::Completed => {
                self.view.percent = COMPLETED_PERCENT;
                self.view.step_index = PHASE_COUNT - 1;
            }
            AnalysisStatus::Failed => {}
            AnalysisStatus::Other(_) => {}
        }
        self.view
    }
}

impl Default for ProgressEstimator {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn processing_estimator(polls: u32) -> ProgressEstimator {
        let mut est = ProgressEstimator::with_seed(7);
        for _ in 0..polls {
            est.observe(&AnalysisStatus::Processing);
        }
        est
    }

    // -- initial view --

    #[test]
    fn fresh_estimator_answers_initial_view() {
        let est = ProgressEstimator::with_seed(1);
        assert_eq!(est.view(), ProgressView::INITIAL);
        assert_eq!(est.view().rounded_percent(), 0);
        assert_eq!(est.view().step_index, 0);
    }

    #[test]
    fn initial_phase_is_first_in_list() {
        assert_eq!(ProgressView::INITIAL.phase_label(), ANALYSIS_PHASES[0]);
    }

    #[test]
    fn phase_list_matches_declared_count() {
        assert_eq!(ANALYSIS_PHASES.len(), PHASE_COUNT);
    }

    // -- pending --

    #[test]
    fn pending_holds_zero() {
        let mut est = ProgressEstimator::with_seed(2);
        for _ in 0..5 {
            let view = est.observe(&AnalysisStatus::Pending);
            assert_eq!(view, ProgressView::INITIAL);
        }
    }

    // -- processing --

    #[test]
    fn first_processing_poll_keeps_step_zero() {
        let mut est = ProgressEstimator::with_seed(3);
        let view = est.observe(&AnalysisStatus::Processing);
        assert_eq!(view.step_index, 0);
        assert!(view.percent >= 0.0);
        assert!(view.percent <= MAX_PERCENT_STEP_PER_POLL);
    }

    #[test]
    fn processing_advances_one_step_per_poll_after_first() {
        let mut est = ProgressEstimator::with_seed(4);
        est.observe(&AnalysisStatus::Pending);
        for expected_step in [0usize, 1, 2, 3] {
            let view = est.observe(&AnalysisStatus::Processing);
            assert_eq!(view.step_index, expected_step);
        }
    }

    #[test]
    fn step_index_holds_at_last_phase() {
        let est = processing_estimator(40);
        assert_eq!(est.view().step_index, PHASE_COUNT - 1);
    }

    #[test]
    fn percent_never_exceeds_ceiling_while_processing() {
        let mut est = ProgressEstimator::with_seed(5);
        for _ in 0..200 {
            let view = est.observe(&AnalysisStatus::Processing);
            assert!(view.percent <= PROCESSING_PERCENT_CEILING);
        }
        // Long runs saturate at the ceiling exactly.
        assert_eq!(est.view().percent, PROCESSING_PERCENT_CEILING);
    }

    #[test]
    fn percent_increment_is_bounded_per_poll() {
        let mut est = ProgressEstimator::with_seed(6);
        let mut previous = est.view().percent;
        for _ in 0..50 {
            let view = est.observe(&AnalysisStatus::Processing);
            assert!(view.percent - previous <= MAX_PERCENT_STEP_PER_POLL);
            previous = view.percent;
        }
    }

    #[test]
    fn view_is_monotone_across_mixed_statuses() {
        let sequence = [
            AnalysisStatus::Pending,
            AnalysisStatus::Pending,
            AnalysisStatus::Processing,
            AnalysisStatus::Other("revalidating".to_string()),
            AnalysisStatus::Processing,
            AnalysisStatus::Processing,
            AnalysisStatus::Completed,
        ];
        let mut est = ProgressEstimator::with_seed(8);
        let mut previous = est.view();
        for status in &sequence {
            let view = est.observe(status);
            assert!(view.percent >= previous.percent);
            assert!(view.step_index >= previous.step_index);
            previous = view;
        }
    }

    // -- completed --

    #[test]
    fn completed_snaps_to_full() {
        let mut est = processing_estimator(3);
        let view = est.observe(&AnalysisStatus::Completed);
        assert_eq!(view.percent, COMPLETED_PERCENT);
        assert_eq!(view.step_index, PHASE_COUNT - 1);
        assert_eq!(view.phase_label(), ANALYSIS_PHASES[PHASE_COUNT - 1]);
    }

    #[test]
    fn completed_on_first_poll_snaps_immediately() {
        let mut est = ProgressEstimator::with_seed(9);
        let view = est.observe(&AnalysisStatus::Completed);
        assert_eq!(view.percent, COMPLETED_PERCENT);
        assert_eq!(view.step_index, PHASE_COUNT - 1);
    }

    // -- failed --

    #[test]
    fn failed_freezes_view() {
        let mut est = processing_estimator(4);
        let before = est.view();
        assert_eq!(est.observe(&AnalysisStatus::Failed), before);
        assert_eq!(est.observe(&AnalysisStatus::Failed), before);
    }

    #[test]
    fn failed_on_first_poll_freezes_initial_view() {
        let mut est = ProgressEstimator::with_seed(10);
        assert_eq!(est.observe(&AnalysisStatus::Failed), ProgressView::INITIAL);
    }

    // -- unknown statuses --

    #[test]
    fn unknown_status_holds_view() {
        let mut est = processing_estimator(2);
        let before = est.view();
        let view = est.observe(&AnalysisStatus::Other("cooling_down".to_string()));
        assert_eq!(view, before);
    }

    // -- determinism --

    #[test]
    fn seeded_estimators_agree() {
        let mut a = ProgressEstimator::with_seed(42);
        let mut b = ProgressEstimator::with_seed(42);
        for _ in 0..20 {
            assert_eq!(
                a.observe(&AnalysisStatus::Processing),
                b.observe(&AnalysisStatus::Processing)
            );
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = ProgressEstimator::with_seed(1);
        let mut b = ProgressEstimator::with_seed(2);
        let paths_equal = (0..10).all(|_| {
            a.observe(&AnalysisStatus::Processing) == b.observe(&AnalysisStatus::Processing)
        });
        assert!(!paths_equal);
    }

    // -- display helpers --

    #[test]
    fn rounded_percent_rounds_half_up() {
        let view = ProgressView {
            percent: 41.5,
            step_index: 0,
        };
        assert_eq!(view.rounded_percent(), 42);
    }

    #[test]
    fn phase_label_clamps_out_of_range_index() {
        let view = ProgressView {
            percent: 100.0,
            step_index: PHASE_COUNT + 3,
        };
        assert_eq!(view.phase_label(), ANALYSIS_PHASES[PHASE_COUNT - 1]);
    }
}
