//! Write operations for all store entity types.
//!
//! Products and users upsert by natural key (title, username); an update
//! only touches fields the incoming record actually specifies. Addresses
//! and orders are insert-only. Order children (items, payment) are plain
//! inserts — the importer wraps them in the order's transaction.

use rusqlite::{Connection, params};
use storeload_catalog::types::{Address, Payment, Product, User};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with key '{key}'")]
    NotFound { entity_type: String, key: String },
}

/// Row id plus whether the upsert created a new row.
#[derive(Debug, Clone, Copy)]
pub struct UpsertOutcome {
    pub id: i64,
    pub created: bool,
}

// ── Product Operations ──────────────────────────────────────────────────────

/// Insert a product or update the existing row keyed by title.
///
/// On update, fields the record leaves as `None` keep their stored value.
pub fn upsert_product(conn: &Connection, product: &Product) -> Result<UpsertOutcome, OperationError> {
    match find_product_id_by_title(conn, &product.title)? {
        Some(id) => {
            conn.execute(
                "UPDATE Products SET
                     price = ?2,
                     stock = COALESCE(?3, stock),
                     description = COALESCE(?4, description),
                     brand = COALESCE(?5, brand),
                     thumbnail = COALESCE(?6, thumbnail),
                     category = COALESCE(?7, category),
                     sku = COALESCE(?8, sku),
                     warranty_information = COALESCE(?9, warranty_information),
                     shipping_information = COALESCE(?10, shipping_information),
                     availability_status = COALESCE(?11, availability_status),
                     return_policy = COALESCE(?12, return_policy),
                     minimum_order_quantity = COALESCE(?13, minimum_order_quantity),
                     discount_percentage = COALESCE(?14, discount_percentage),
                     featured = COALESCE(?15, featured),
                     featured_order = COALESCE(?16, featured_order),
                     updated_at = datetime('now')
                 WHERE id = ?1",
                params![
                    id,
                    product.price,
                    product.stock,
                    product.description,
                    product.brand,
                    product.thumbnail,
                    product.category,
                    product.sku,
                    product.warranty_information,
                    product.shipping_information,
                    product.availability_status,
                    product.return_policy,
                    product.minimum_order_quantity,
                    product.discount_percentage,
                    product.featured,
                    product.featured_order,
                ],
            )?;
            Ok(UpsertOutcome { id, created: false })
        }
        None => {
            conn.execute(
                "INSERT INTO Products (title, price, stock, description, brand, thumbnail,
                     category, sku, warranty_information, shipping_information,
                     availability_status, return_policy, minimum_order_quantity,
                     discount_percentage, featured, featured_order)
                 VALUES (?1, ?2, COALESCE(?3, 0), ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                     COALESCE(?13, 1), COALESCE(?14, 0), COALESCE(?15, 0), ?16)",
                params![
                    product.title,
                    product.price,
                    product.stock,
                    product.description,
                    product.brand,
                    product.thumbnail,
                    product.category,
                    product.sku,
                    product.warranty_information,
                    product.shipping_information,
                    product.availability_status,
                    product.return_policy,
                    product.minimum_order_quantity,
                    product.discount_percentage,
                    product.featured,
                    product.featured_order,
                ],
            )?;
            Ok(UpsertOutcome {
                id: conn.last_insert_rowid(),
                created: true,
            })
        }
    }
}

/// Find a product's surrogate id by title (exact match).
pub fn find_product_id_by_title(
    conn: &Connection,
    title: &str,
) -> Result<Option<i64>, OperationError> {
    let mut stmt = conn.prepare("SELECT id FROM Products WHERE title = ?1 LIMIT 1")?;
    let result = stmt.query_row(params![title], |row| row.get::<_, i64>(0));
    match result {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Check whether a product row exists.
pub fn product_exists(conn: &Connection, id: i64) -> Result<bool, OperationError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM Products WHERE id = ?1)",
        params![id],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Clear and re-insert a product's image URLs, preserving source order.
pub fn replace_product_images(
    conn: &Connection,
    product_id: i64,
    urls: &[String],
) -> Result<(), OperationError> {
    conn.execute(
        "DELETE FROM ProductImages WHERE product_id = ?1",
        params![product_id],
    )?;
    for (position, url) in urls.iter().enumerate() {
        conn.execute(
            "INSERT INTO ProductImages (product_id, position, url) VALUES (?1, ?2, ?3)",
            params![product_id, position as i64, url],
        )?;
    }
    Ok(())
}

/// Clear and re-insert a product's specification attributes.
///
/// Attribute order within a category follows source insertion order.
pub fn replace_product_details(
    conn: &Connection,
    product_id: i64,
    groups: &[storeload_catalog::types::SpecGroup],
) -> Result<(), OperationError> {
    conn.execute(
        "DELETE FROM ProductDetails WHERE product_id = ?1",
        params![product_id],
    )?;
    let mut position = 0i64;
    for group in groups {
        for attr in &group.attributes {
            conn.execute(
                "INSERT INTO ProductDetails (product_id, category, label, value, position)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![product_id, group.category, attr.label, attr.value, position],
            )?;
            position += 1;
        }
    }
    Ok(())
}

// ── User Operations ─────────────────────────────────────────────────────────

/// Insert a user row. `password` must already be hashed.
pub fn insert_user(
    conn: &Connection,
    user: &User,
    auto_created: bool,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO Users (username, email, password, first_name, last_name, gender,
             image, is_admin, auto_created)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, COALESCE(?8, 0), ?9)",
        params![
            user.username,
            user.email,
            user.password,
            user.first_name,
            user.last_name,
            user.gender,
            user.image,
            user.is_admin,
            auto_created,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert a user or update the existing row keyed by username.
///
/// A stored password that is already hashed is never replaced; the
/// incoming value only lands when the stored one is still clear text.
/// An update also clears the auto-created flag, since a full record now
/// backs the account.
pub fn upsert_user(conn: &Connection, user: &User) -> Result<UpsertOutcome, OperationError> {
    match find_user_id_by_username(conn, &user.username)? {
        Some(id) => {
            conn.execute(
                "UPDATE Users SET
                     email = ?2,
                     password = CASE WHEN password LIKE '$argon2%' THEN password ELSE ?3 END,
                     first_name = COALESCE(?4, first_name),
                     last_name = COALESCE(?5, last_name),
                     gender = COALESCE(?6, gender),
                     image = COALESCE(?7, image),
                     is_admin = COALESCE(?8, is_admin),
                     auto_created = 0,
                     updated_at = datetime('now')
                 WHERE id = ?1",
                params![
                    id,
                    user.email,
                    user.password,
                    user.first_name,
                    user.last_name,
                    user.gender,
                    user.image,
                    user.is_admin,
                ],
            )?;
            Ok(UpsertOutcome { id, created: false })
        }
        None => {
            let id = insert_user(conn, user, false)?;
            Ok(UpsertOutcome { id, created: true })
        }
    }
}

/// Find a user's surrogate id by username (exact match).
pub fn find_user_id_by_username(
    conn: &Connection,
    username: &str,
) -> Result<Option<i64>, OperationError> {
    let mut stmt = conn.prepare("SELECT id FROM Users WHERE username = ?1 LIMIT 1")?;
    let result = stmt.query_row(params![username], |row| row.get::<_, i64>(0));
    match result {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Overwrite a user's stored password value.
pub fn set_user_password(conn: &Connection, id: i64, password: &str) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE Users SET password = ?2, updated_at = datetime('now') WHERE id = ?1",
        params![id, password],
    )?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: "user".to_string(),
            key: id.to_string(),
        });
    }
    Ok(())
}

// ── Review Operations ───────────────────────────────────────────────────────

/// Insert or update a review.
///
/// Reviews with a resolved account upsert on the (product, user)
/// composite key; free-text reviewers have no natural key and insert.
pub fn upsert_review(
    conn: &Connection,
    product_id: i64,
    user_id: Option<i64>,
    reviewer_name: Option<&str>,
    rating: i64,
    comment: Option<&str>,
) -> Result<UpsertOutcome, OperationError> {
    if let Some(user_id) = user_id {
        let existing: Option<i64> = {
            let mut stmt = conn.prepare(
                "SELECT id FROM ProductReviews WHERE product_id = ?1 AND user_id = ?2 LIMIT 1",
            )?;
            match stmt.query_row(params![product_id, user_id], |row| row.get(0)) {
                Ok(id) => Some(id),
                Err(rusqlite::Error::QueryReturnedNoRows) => None,
                Err(e) => return Err(e.into()),
            }
        };
        if let Some(id) = existing {
            conn.execute(
                "UPDATE ProductReviews SET rating = ?2, comment = COALESCE(?3, comment)
                 WHERE id = ?1",
                params![id, rating, comment],
            )?;
            return Ok(UpsertOutcome { id, created: false });
        }
    }
    conn.execute(
        "INSERT INTO ProductReviews (product_id, user_id, reviewer_name, rating, comment)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![product_id, user_id, reviewer_name, rating, comment],
    )?;
    Ok(UpsertOutcome {
        id: conn.last_insert_rowid(),
        created: true,
    })
}

// ── Address Operations ──────────────────────────────────────────────────────

/// Insert an address. Returns the generated id.
///
/// Inserting a default address demotes the user's previous default, so at
/// most one default exists per user.
pub fn insert_address(
    conn: &Connection,
    user_id: i64,
    address: &Address,
) -> Result<i64, OperationError> {
    if address.is_default {
        conn.execute(
            "UPDATE UserAddresses SET is_default = 0 WHERE user_id = ?1 AND is_default = 1",
            params![user_id],
        )?;
    }
    conn.execute(
        "INSERT INTO UserAddresses (user_id, name, phone, address, is_default, address_type, company)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            user_id,
            address.name,
            address.phone,
            address.address,
            address.is_default,
            address.address_type,
            address.company,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── Order Operations ────────────────────────────────────────────────────────

/// Insert an order row. Returns the generated id.
pub fn insert_order(conn: &Connection, user_id: i64, address_id: i64) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO Orders (user_id, address_id) VALUES (?1, ?2)",
        params![user_id, address_id],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert a line item for an order.
pub fn insert_order_item(
    conn: &Connection,
    order_id: i64,
    product_id: i64,
    quantity: i64,
    unit_price: f64,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO OrderItems (order_id, product_id, quantity, unit_price)
         VALUES (?1, ?2, ?3, ?4)",
        params![order_id, product_id, quantity, unit_price],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert the payment for an order. `amount` is the resolved amount.
pub fn insert_payment(
    conn: &Connection,
    order_id: i64,
    amount: f64,
    payment: &Payment,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO Payments (order_id, amount, method, status, transaction_id, paid_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            order_id,
            amount,
            payment.method,
            payment.status,
            payment.transaction_id,
            payment.paid_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── Import Log Operations ───────────────────────────────────────────────────

/// Log entry for one import run.
#[derive(Debug, Clone)]
pub struct ImportLogEntry {
    pub source_name: String,
    pub imported_at: String,
    pub records_inserted: i64,
    pub records_updated: i64,
    pub records_skipped: i64,
    pub failures: i64,
}

/// Insert an import log entry. Returns the generated id.
pub fn insert_import_log(conn: &Connection, log: &ImportLogEntry) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO import_log (source_name, imported_at, records_inserted,
             records_updated, records_skipped, failures)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            log.source_name,
            log.imported_at,
            log.records_inserted,
            log.records_updated,
            log.records_skipped,
            log.failures,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
