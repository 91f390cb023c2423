//! Progress reporting: a spinner for open-ended listings and a count bar for per-video work.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TICK: Duration = Duration::from_millis(100);

fn count_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.green} {msg} {pos}/{len} [{bar:.cyan/blue}] {percent:>3}%  \
         elapsed: {elapsed_precise}  eta: {eta_precise}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("█▉▊▋▌▍▎▏  ")
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg} {pos}  elapsed: {elapsed_precise}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// A small wrapper around `indicatif` bars that can be switched off entirely.
/// - `ProgressScope::spinner(..)` when the total is unknown (video listing)
/// - `ProgressScope::count(..)` when it is (one tick per video)
pub struct ProgressScope {
    pb: ProgressBar,
}

impl ProgressScope {
    pub fn spinner<T: Into<String>>(label: T, enabled: bool) -> Self {
        let pb = if enabled { ProgressBar::new_spinner() } else { ProgressBar::hidden() };
        pb.set_style(spinner_style());
        pb.set_message(label.into());
        if enabled {
            pb.enable_steady_tick(TICK);
        }
        Self { pb }
    }

    pub fn count<T: Into<String>>(label: T, total: u64, enabled: bool) -> Self {
        let pb = if enabled { ProgressBar::new(total) } else { ProgressBar::hidden() };
        pb.set_style(count_style());
        pb.set_message(label.into());
        if enabled {
            pb.enable_steady_tick(TICK);
        }
        Self { pb }
    }

    #[inline]
    pub fn inc(&self, delta: u64) {
        self.pb.inc(delta);
    }

    pub fn set_message<T: Into<String>>(&self, msg: T) {
        self.pb.set_message(msg.into());
    }

    pub fn finish<T: Into<String>>(&self, msg: T) {
        self.pb.finish_with_message(msg.into());
    }
}
