use storeload_db::OperationError;
use storeload_docs::DocError;
use thiserror::Error;

/// Errors that abort an import run.
///
/// Per-record problems (malformed records, out-of-range values, missing
/// references, rolled-back units) never surface here; they are recorded
/// in the run report and the run continues. What remains is document I/O
/// and store-level failure.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Document error: {0}")]
    Doc(#[from] DocError),
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}
