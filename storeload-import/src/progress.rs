//! Import progress reporting.

use crate::report::{RunReport, Stage};

/// Trait for receiving import progress updates.
pub trait ImportProgress {
    /// Called when a stage starts.
    fn on_stage(&self, stage: Stage);

    /// Called when the run is complete.
    fn on_complete(&self, report: &RunReport);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_stage(&self, _stage: Stage) {}
    fn on_complete(&self, _report: &RunReport) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_stage(&self, stage: Stage) {
        log::info!("importing {}", stage.as_str());
    }

    fn on_complete(&self, report: &RunReport) {
        for stage in &report.stages {
            log::info!(
                "  {}: {} inserted, {} updated, {} skipped",
                stage.stage.as_str(),
                stage.inserted,
                stage.updated,
                stage.skipped
            );
        }
        if !report.auto_created_users.is_empty() {
            log::warn!(
                "auto-created {} placeholder account(s): {}",
                report.auto_created_users.len(),
                report.auto_created_users.join(", ")
            );
        }
    }
}
