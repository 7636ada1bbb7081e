// Terminal side of a run: the password prompt and the spinner that shows
// which folder is being processed. Trace lines are printed through the
// spinner so the two never interleave on the same terminal row.

use crate::report::{TraceSink, Verbosity};
use anyhow::{Context, Result};
use dialoguer::Password;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Ask for the (app) password when none was supplied. The input is hidden.
pub fn prompt_password(user: &str) -> Result<String> {
    Password::new()
        .with_prompt(format!("Password for {user}"))
        .interact()
        .context("Failed to read password")
}

/// `TraceSink` printing above an `indicatif` spinner.
pub struct SpinnerSink {
    spinner: ProgressBar,
}

impl SpinnerSink {
    /// Quiet runs get a hidden spinner; lines are never sent to it anyway.
    pub fn new(verbosity: Verbosity) -> Self {
        let spinner = if verbosity == Verbosity::Quiet {
            ProgressBar::hidden()
        } else {
            let spinner = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
                spinner.set_style(style);
            }
            spinner.enable_steady_tick(Duration::from_millis(120));
            spinner
        };
        SpinnerSink { spinner }
    }

    /// Remove the spinner before the summary is printed.
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl TraceSink for SpinnerSink {
    fn line(&mut self, line: &str) {
        self.spinner.println(line);
    }

    fn status(&mut self, status: &str) {
        self.spinner.set_message(status.to_string());
    }
}
