//! Spinner feedback on stderr while a commit is read and analyzed

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";
const TICK_INTERVAL: Duration = Duration::from_millis(80);

/// Workflow stage shown next to the spinner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ReadingCommit,
    AnalyzingManifests,
}

impl Stage {
    pub fn message(&self) -> &'static str {
        match self {
            Stage::ReadingCommit => "Reading latest commit...",
            Stage::AnalyzingManifests => "Analyzing manifests...",
        }
    }
}

/// Stage spinner, silent when disabled (quiet mode or tests)
pub struct Progress {
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// Replace any running spinner with one for `stage`
    pub fn enter(&mut self, stage: Stage) {
        self.clear();
        if !self.enabled {
            return;
        }

        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        let style = ProgressStyle::default_spinner().tick_chars(TICK_CHARS);
        match style.clone().template("{spinner:.cyan} {msg}") {
            Ok(templated) => bar.set_style(templated),
            Err(_) => bar.set_style(style),
        }
        bar.set_message(stage.message());
        bar.enable_steady_tick(TICK_INTERVAL);
        self.bar = Some(bar);
    }

    /// Remove the spinner line
    pub fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    pub fn is_active(&self) -> bool {
        self.bar.is_some()
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_never_draws() {
        let mut progress = Progress::new(false);
        progress.enter(Stage::ReadingCommit);
        assert!(!progress.is_active());
        progress.clear();
    }

    #[test]
    fn test_enter_replaces_stage() {
        let mut progress = Progress::new(true);
        progress.enter(Stage::ReadingCommit);
        assert!(progress.is_active());
        progress.enter(Stage::AnalyzingManifests);
        assert!(progress.is_active());
        progress.clear();
        assert!(!progress.is_active());
    }

    #[test]
    fn test_stage_messages() {
        assert_eq!(Stage::ReadingCommit.message(), "Reading latest commit...");
        assert_eq!(Stage::AnalyzingManifests.message(), "Analyzing manifests...");
    }
}
