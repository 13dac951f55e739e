//! Candidate progress display for long tiling runs

use crate::algorithm::tiler::{TilingObserver, TilingOutcome};
use crate::io::configuration::{PROGRESS_BAR_WIDTH, PROGRESS_UPDATE_INTERVAL};
use crate::spatial::tiles::Tile;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress bar over candidate evaluation
///
/// Redraws are batched so very fine grids are not slowed by terminal output.
pub struct ProgressManager {
    bar: ProgressBar,
    accepted: usize,
    last_drawn: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Progress bar drawn to stderr
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new(0))
    }

    /// Progress bar that tracks state without drawing
    pub fn hidden() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_draw_target(ProgressDrawTarget::hidden());
        Self::with_bar(bar)
    }

    fn with_bar(bar: ProgressBar) -> Self {
        bar.set_style(Self::candidate_style());
        Self {
            bar,
            accepted: 0,
            last_drawn: 0,
        }
    }

    /// Candidates evaluated so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Total candidates expected
    pub fn length(&self) -> Option<u64> {
        self.bar.length()
    }

    /// Tiles accepted so far
    pub const fn accepted(&self) -> usize {
        self.accepted
    }

    /// Whether the bar has been closed
    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }

    fn candidate_style() -> ProgressStyle {
        let template = format!(
            "[{{elapsed_precise}}] Candidates: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        );
        ProgressStyle::default_bar()
            .template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏ ")
    }
}

impl TilingObserver for ProgressManager {
    fn started(&mut self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
        self.accepted = 0;
        self.last_drawn = 0;
    }

    fn candidate_evaluated(&mut self, evaluated: usize, accepted: Option<&Tile>) {
        if accepted.is_some() {
            self.accepted += 1;
        }
        if evaluated - self.last_drawn >= PROGRESS_UPDATE_INTERVAL {
            self.last_drawn = evaluated;
            self.bar.set_position(evaluated as u64);
            self.bar.set_message(format!("{} new", self.accepted));
        }
    }

    fn finished(&mut self, outcome: &TilingOutcome) {
        self.bar.set_position(outcome.candidates as u64);
        self.bar.finish_with_message(format!(
            "{} new, {} already covered",
            outcome.tiles.len(),
            outcome.discarded
        ));
    }
}
