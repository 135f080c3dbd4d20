//! Live status line adapter using indicatif.

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};
use vigil_core::{DisplayRenderer, DisplayUpdate, SessionSummary};

/// Terminal status line for a monitoring session.
pub struct StatusLine {
    bar: Option<IndicatifBar>,
    quiet: bool,
}

impl StatusLine {
    /// Creates a new status line.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, suppress all output
    /// * `show_bar` - If true, show the live spinner line; otherwise only print alerts
    #[must_use]
    pub fn new(quiet: bool, show_bar: bool) -> Self {
        if quiet {
            return Self {
                bar: None,
                quiet: true,
            };
        }

        let bar = if show_bar {
            let bar = IndicatifBar::new_spinner();

            if let Ok(style) =
                ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")
            {
                bar.set_style(style);
            }

            Some(bar)
        } else {
            None
        };

        Self { bar, quiet }
    }

    /// Creates a status line that never prints.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            bar: None,
            quiet: true,
        }
    }

    /// Prints the end-of-session summary line.
    pub fn finish(&self, summary: &SessionSummary) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(format!(
                "Done: {} ticks, {} alerts, peak score {}",
                summary.ticks, summary.alerts, summary.peak_score
            ));
        }
    }
}

impl DisplayRenderer for StatusLine {
    fn render(&self, update: &DisplayUpdate) {
        if self.quiet {
            return;
        }

        if let Some(bar) = &self.bar {
            let state = if update.signal_lost {
                "no face".to_string()
            } else {
                update.eye_state.to_string()
            };
            let fatigue = if update.fatigued {
                "  FATIGUE! TAKE A BREAK"
            } else {
                ""
            };
            bar.set_message(format!("state: {state}  score: {}{fatigue}", update.score));
            if update.decision.is_fire() {
                bar.println("DROWSINESS DETECTED!");
            }
            bar.tick();
        } else if update.decision.is_fire() {
            eprintln!("DROWSINESS DETECTED! score: {}", update.score);
        }
    }
}
