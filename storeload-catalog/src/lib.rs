//! Typed entity records for the store catalog.
//!
//! These are the validated shapes the rest of the pipeline works with.
//! Raw export records (`storeload-docs`) are converted into these through
//! a single validation step in `storeload-import`; nothing downstream of
//! that step touches untyped data.

pub mod types;

pub use types::{
    Address, Order, OrderItem, Payment, Product, ProductRef, Review, ReviewerRef, SpecAttribute,
    SpecGroup, User,
};
