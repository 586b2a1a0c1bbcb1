//! Progress bar over collapsed cells during a generation run

use crate::algorithm::executor::{Completion, GenerationReport};
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let bar = format!("{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}");
    let template = format!("[{{elapsed_precise}}] {{msg}} [{bar}] {{pos}}/{{len}}");
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks how many cells of the grid have been collapsed
pub struct GenerationProgress {
    bar: ProgressBar,
}

impl GenerationProgress {
    /// Create a visible progress bar over `total_cells`
    pub fn new(total_cells: usize) -> Self {
        let bar = ProgressBar::new(total_cells as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_message("collapsing");
        Self { bar }
    }

    /// Create a progress tracker that draws nothing
    pub fn hidden(total_cells: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total_cells as u64);
        Self { bar }
    }

    /// Report the number of collapsed cells, presets included
    pub fn set_collapsed(&self, collapsed: usize) {
        self.bar.set_position(collapsed as u64);
    }

    /// Current position of the bar
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Total cells tracked
    pub fn length(&self) -> Option<u64> {
        self.bar.length()
    }

    /// Close the bar with a message describing the outcome
    pub fn finish(&self, report: &GenerationReport) {
        self.bar.set_position(report.collapsed as u64);
        let message = completion_message(&report.completion);
        self.bar.finish_with_message(message);
    }
}

/// Short human-readable description of a completion state
pub fn completion_message(completion: &Completion) -> String {
    match completion {
        Completion::Complete => "complete".to_string(),
        Completion::Contradiction { row, col } => {
            format!("contradiction at ({row}, {col})")
        }
        Completion::IterationLimit { iterations } => {
            format!("stopped after {iterations} iterations")
        }
    }
}
