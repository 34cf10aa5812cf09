//! Terminal presentation: colored status lines and stage spinners.
//!
//! Pure presentation, no pipeline logic. Debug mode trades the spinner
//! animation for plain per-stage detail lines so diagnostic output is not
//! clobbered by redraws.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", ""];

/// Handles user-facing terminal output for a pipeline run.
#[derive(Debug, Clone)]
pub struct OutputManager {
    debug: bool,
}

impl OutputManager {
    /// Creates an output manager; `debug` enables verbose per-stage detail.
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    /// Whether verbose diagnostic output is enabled.
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Starts a stage spinner. Hidden in debug mode, where the message is
    /// printed as a plain line instead.
    pub fn spinner(&self, message: &str) -> ProgressBar {
        if self.debug {
            self.detail(message);
            return ProgressBar::hidden();
        }

        let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(SPINNER_FRAMES);
        let spinner = ProgressBar::new_spinner()
            .with_style(style)
            .with_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }

    /// Prints a success line with a check mark.
    pub fn success(&self, message: &str) {
        println!("{} {}", "✔".green(), message);
    }

    /// Prints a failure line with a cross mark.
    pub fn failure(&self, message: &str) {
        println!("{}", format!("✘ {message}").red());
    }

    /// Prints an indented, dimmed detail line.
    pub fn detail(&self, message: &str) {
        println!("  {}", message.dimmed());
    }

    /// Prints a detail line only when debug mode is on.
    pub fn debug_detail(&self, message: &str) {
        if self.debug {
            self.detail(message);
        }
    }
}
