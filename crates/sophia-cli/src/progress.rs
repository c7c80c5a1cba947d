//! Spinners for AI round-trips and a bar for bulk indexing.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::ui;

const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg} ({elapsed})";
const BAR_TEMPLATE: &str = "{bar:30.green/white} {pos}/{len} {wide_msg}";

/// A progress indicator that does nothing when progress output is disabled.
pub struct Progress(Option<ProgressBar>);

impl Progress {
    /// Spinner shown while waiting on one request.
    #[must_use]
    pub fn spinner(message: impl Into<String>) -> Self {
        Self::build(|| {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template(SPINNER_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar.enable_steady_tick(Duration::from_millis(80));
            bar
        })
        .with_message(message)
    }

    /// Bar over `total` items.
    #[must_use]
    pub fn bar(total: usize, message: impl Into<String>) -> Self {
        Self::build(|| {
            let bar = ProgressBar::new(u64::try_from(total).unwrap_or(u64::MAX));
            bar.set_style(
                ProgressStyle::with_template(BAR_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=> "),
            );
            bar
        })
        .with_message(message)
    }

    fn build(make: impl FnOnce() -> ProgressBar) -> Self {
        if !ui::prefs().progress {
            return Self(None);
        }
        let bar = make();
        bar.set_draw_target(ProgressDrawTarget::stderr());
        Self(Some(bar))
    }

    fn with_message(self, message: impl Into<String>) -> Self {
        if let Some(bar) = &self.0 {
            bar.set_message(message.into());
        }
        self
    }

    /// Move the bar to `position` and show what was just processed.
    pub fn advance(&self, position: usize, message: impl Into<String>) {
        if let Some(bar) = &self.0 {
            bar.set_position(u64::try_from(position).unwrap_or(u64::MAX));
            bar.set_message(message.into());
        }
    }

    pub fn finish(&self, message: impl Into<String>) {
        if let Some(bar) = &self.0 {
            bar.finish_with_message(message.into());
        }
    }

    pub fn clear(&self) {
        if let Some(bar) = &self.0 {
            bar.finish_and_clear();
        }
    }
}
