//! Raw source documents for the store catalog importer.
//!
//! This crate owns everything that happens before records become typed
//! entities: reading the JSON export files, repairing quote damage in
//! individual records, recovering parseable fragments from damaged
//! documents, and collapsing duplicate product records.

pub mod dedupe;
pub mod documents;
pub mod error;
pub mod records;
pub mod repair;

pub use dedupe::{DedupeOutcome, dedupe_products};
pub use documents::{
    DocumentSet, ParseFailure, ParsedRecords, load_document_set, parse_products_document,
};
pub use error::DocError;
pub use records::{
    RawAddress, RawOrder, RawOrderItem, RawPayment, RawProduct, RawReview, RawSpecGroup,
    RawSpecItem, RawUser,
};
pub use repair::{collapse_url_quotes, repair_record, strip_stray_quotes};
