//! SQLite persistence layer for the store catalog.
//!
//! Provides schema creation, write operations, and read queries backed by
//! SQLite (via rusqlite with the bundled feature). All writes are
//! parameterized; upserts are keyed on natural keys (product title, user
//! username).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    ImportLogEntry, OperationError, UpsertOutcome, find_product_id_by_title,
    find_user_id_by_username, insert_address, insert_import_log, insert_order, insert_order_item,
    insert_payment, insert_user, product_exists, replace_product_details, replace_product_images,
    set_user_password, upsert_product, upsert_review, upsert_user,
};
pub use queries::{
    AddressRow, OrderItemRow, OrderRow, PaymentRow, ProductRow, ReviewRow, SpecRow, StoreStats,
    UserRow, addresses_for_user, find_shipping_address, get_product_by_title,
    get_user_by_username, list_user_credentials, order_items, orders_for_user, payment_for_order,
    product_details, product_images, reviews_for_product, store_stats,
};
pub use schema::{open_database, open_memory};
