//! Checklist evaluation.
//!
//! Every check runs, in order, regardless of earlier failures. Each one gets
//! a spinner while it runs and its message lines are printed underneath once
//! it finishes. Only failing checks carry messages.

use std::time::{Duration, Instant};

use super::{Check, CheckResult};
use crate::ui::UserInterface;

/// A check's title together with what it reported.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub title: String,
    pub result: CheckResult,
}

/// Result of running a checklist.
#[derive(Debug)]
pub struct RunReport {
    /// Outcomes in checklist order.
    pub outcomes: Vec<CheckOutcome>,
    /// Total duration.
    pub duration: Duration,
}

impl RunReport {
    /// Whether every check passed.
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.passed)
    }

    /// Titles of the failed checks, in checklist order.
    pub fn failed_titles(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter(|o| !o.result.passed)
            .map(|o| o.title.clone())
            .collect()
    }

    /// Number of checks that ran.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }
}

/// Evaluate every check and report progress through `ui`.
pub fn run_checks(checks: &[Box<dyn Check + '_>], ui: &mut dyn UserInterface) -> RunReport {
    let start = Instant::now();
    let mut outcomes = Vec::with_capacity(checks.len());

    for check in checks {
        let title = check.title();
        tracing::debug!("Running check: {}", title);

        let mut spinner = ui.start_spinner(&title);
        let result = check.evaluate();
        if result.passed {
            spinner.finish_success(&title);
        } else {
            spinner.finish_error(&title);
        }

        if let Some(message) = &result.message {
            for line in message.lines() {
                ui.detail(line);
            }
        }

        tracing::debug!(
            "Check '{}' {}",
            title,
            if result.passed { "passed" } else { "failed" }
        );
        outcomes.push(CheckOutcome { title, result });
    }

    RunReport {
        outcomes,
        duration: start.elapsed(),
    }
}
