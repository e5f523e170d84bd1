//! Structured reporting for an import run.
//!
//! Every stage reports inserted/updated/skipped counts plus one failure
//! tuple (entity type, natural key, reason) per skipped record. Nothing
//! is skipped silently.

use rusqlite::Connection;
use storeload_db::operations::{ImportLogEntry, insert_import_log};

use crate::error::ImportError;

/// The entity stages, in dependency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Users,
    Products,
    Reviews,
    Addresses,
    Orders,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Products => "products",
            Self::Reviews => "reviews",
            Self::Addresses => "addresses",
            Self::Orders => "orders",
        }
    }
}

/// One skipped record: what it was, which record, and why.
#[derive(Debug, Clone)]
pub struct RecordFailure {
    pub entity: &'static str,
    pub key: String,
    pub reason: String,
}

/// Counts and failures for one stage.
#[derive(Debug)]
pub struct StageReport {
    pub stage: Stage,
    pub inserted: u64,
    pub updated: u64,
    pub skipped: u64,
    pub failures: Vec<RecordFailure>,
}

impl StageReport {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            inserted: 0,
            updated: 0,
            skipped: 0,
            failures: Vec::new(),
        }
    }

    /// Record a skipped record with its reason. Also logs a warning.
    pub fn skip(&mut self, entity: &'static str, key: impl Into<String>, reason: impl ToString) {
        let key = key.into();
        let reason = reason.to_string();
        log::warn!("skipping {entity} '{key}': {reason}");
        self.skipped += 1;
        self.failures.push(RecordFailure {
            entity,
            key,
            reason,
        });
    }
}

/// The full run summary across all stages.
#[derive(Debug, Default)]
pub struct RunReport {
    pub stages: Vec<StageReport>,
    /// Placeholder accounts created during reference resolution.
    /// Trust-sensitive: these carry derived emails and a default
    /// credential and need operator review.
    pub auto_created_users: Vec<String>,
}

impl RunReport {
    pub fn stage(&self, stage: Stage) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.stage == stage)
    }

    pub fn inserted(&self) -> u64 {
        self.stages.iter().map(|s| s.inserted).sum()
    }

    pub fn updated(&self) -> u64 {
        self.stages.iter().map(|s| s.updated).sum()
    }

    pub fn skipped(&self) -> u64 {
        self.stages.iter().map(|s| s.skipped).sum()
    }

    pub fn failure_count(&self) -> u64 {
        self.stages.iter().map(|s| s.failures.len() as u64).sum()
    }
}

/// Persist a run's totals to the import log. Returns the generated id.
pub fn log_import(
    conn: &Connection,
    source_name: &str,
    report: &RunReport,
) -> Result<i64, ImportError> {
    let entry = ImportLogEntry {
        source_name: source_name.to_string(),
        imported_at: chrono::Utc::now().to_rfc3339(),
        records_inserted: report.inserted() as i64,
        records_updated: report.updated() as i64,
        records_skipped: report.skipped() as i64,
        failures: report.failure_count() as i64,
    };
    let id = insert_import_log(conn, &entry)?;
    Ok(id)
}
