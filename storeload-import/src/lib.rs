//! Import catalog export documents into the store database.
//!
//! This crate owns all ETL logic: validating raw export records into typed
//! entities, resolving human-readable references to surrogate ids, applying
//! upserts keyed on natural keys, and sequencing the entity stages in
//! dependency order with per-unit transactions.

pub mod addresses;
pub mod error;
pub mod orchestrator;
pub mod orders;
pub mod password;
pub mod products;
pub mod progress;
pub mod report;
pub mod resolve;
pub mod reviews;
pub mod users;
pub mod validate;

pub use error::ImportError;
pub use orchestrator::{ImportOptions, run_import, run_import_from_dir};
pub use password::{hash_existing_passwords, hash_password, is_hashed};
pub use progress::{ImportProgress, LogProgress, SilentProgress};
pub use report::{RecordFailure, RunReport, Stage, StageReport, log_import};
pub use resolve::{PlaceholderPolicy, ProductIndex, resolve_or_create_user, resolve_product,
    resolve_user};
