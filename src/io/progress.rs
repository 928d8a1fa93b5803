//! Terminal progress display for a generation run

use std::sync::LazyLock;

use indicatif::{ProgressBar, ProgressStyle};

use crate::algorithm::executor::StepObserver;
use crate::algorithm::propagation::StepOutcome;
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use crate::io::error::Result;
use crate::spatial::grid::Grid;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} cells {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Shows resolved cells against the grid size, plus the step count
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a bar for a grid of `total` cells, labelled with `name`
    pub fn new(name: &str, total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_prefix(name.to_string());
        Self { bar }
    }

    /// Clear the bar, leaving a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Current bar position (resolved cells)
    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl StepObserver for ProgressReporter {
    fn on_step(&mut self, grid: &Grid<'_>, step: usize, _outcome: StepOutcome) -> Result<()> {
        self.bar.set_position(grid.resolved_count() as u64);
        self.bar.set_message(format!("(step {step})"));
        Ok(())
    }
}
