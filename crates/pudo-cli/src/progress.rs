//! Terminal progress bar for the join loop.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use pudo_core::{JoinObserver, JoinStats};

const TEMPLATE: &str =
    "{spinner:.green} matching vendors [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}, eta {eta})";

/// [`JoinObserver`] that drives an `indicatif` progress bar on stderr.
pub struct ProgressObserver {
    bar: ProgressBar,
}

impl ProgressObserver {
    /// A visible bar.
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr()),
        }
    }

    /// A bar that never draws.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl JoinObserver for ProgressObserver {
    fn on_start(&mut self, total: usize) {
        let style = ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        self.bar.set_style(style);
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
    }

    fn on_record(&mut self, processed: usize, _matched: bool) {
        self.bar.set_position(processed as u64);
    }

    fn on_finish(&mut self, _stats: &JoinStats) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_bar_tracks_position() {
        let mut observer = ProgressObserver::hidden();
        observer.on_start(3);
        observer.on_record(1, true);
        observer.on_record(2, false);
        assert_eq!(observer.position(), 2);
        observer.on_finish(&JoinStats::default());
    }
}
