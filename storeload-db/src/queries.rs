//! Read queries for the store database.
//!
//! Provides lookups by natural key, per-entity listings, and row counts.

use rusqlite::{Connection, params};

use crate::operations::OperationError;

// ── Row Types ───────────────────────────────────────────────────────────────

/// A product row as stored.
#[derive(Debug, Clone)]
pub struct ProductRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    pub brand: Option<String>,
    pub thumbnail: Option<String>,
    pub category: Option<String>,
    pub sku: Option<String>,
    pub warranty_information: Option<String>,
    pub shipping_information: Option<String>,
    pub availability_status: Option<String>,
    pub return_policy: Option<String>,
    pub minimum_order_quantity: i64,
    pub discount_percentage: f64,
    pub featured: bool,
    pub featured_order: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

/// A user row as stored.
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub image: Option<String>,
    pub is_admin: bool,
    pub auto_created: bool,
}

/// A specification attribute row, ordered by position.
#[derive(Debug, Clone)]
pub struct SpecRow {
    pub category: String,
    pub label: String,
    pub value: String,
    pub position: i64,
}

/// A review row as stored.
#[derive(Debug, Clone)]
pub struct ReviewRow {
    pub id: i64,
    pub product_id: i64,
    pub user_id: Option<i64>,
    pub reviewer_name: Option<String>,
    pub rating: i64,
    pub comment: Option<String>,
}

/// An address row as stored.
#[derive(Debug, Clone)]
pub struct AddressRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub address: String,
    pub is_default: bool,
    pub address_type: Option<String>,
    pub company: Option<String>,
}

/// An order row as stored.
#[derive(Debug, Clone)]
pub struct OrderRow {
    pub id: i64,
    pub user_id: i64,
    pub address_id: i64,
    pub created_at: String,
}

/// An order line item row as stored.
#[derive(Debug, Clone)]
pub struct OrderItemRow {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
}

/// A payment row as stored.
#[derive(Debug, Clone)]
pub struct PaymentRow {
    pub id: i64,
    pub order_id: i64,
    pub amount: f64,
    pub method: String,
    pub status: String,
    pub transaction_id: Option<String>,
    pub paid_at: Option<String>,
}

// ── Product Lookups ─────────────────────────────────────────────────────────

/// Fetch a full product row by title.
pub fn get_product_by_title(
    conn: &Connection,
    title: &str,
) -> Result<Option<ProductRow>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, description, price, stock, brand, thumbnail, category, sku,
                warranty_information, shipping_information, availability_status,
                return_policy, minimum_order_quantity, discount_percentage,
                featured, featured_order, created_at, updated_at
         FROM Products WHERE title = ?1",
    )?;
    let result = stmt.query_row(params![title], row_to_product);
    match result {
        Ok(p) => Ok(Some(p)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// A product's image URLs in stored order.
pub fn product_images(conn: &Connection, product_id: i64) -> Result<Vec<String>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT url FROM ProductImages WHERE product_id = ?1 ORDER BY position",
    )?;
    let rows = stmt.query_map(params![product_id], |row| row.get(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// A product's specification attributes in stored order.
pub fn product_details(conn: &Connection, product_id: i64) -> Result<Vec<SpecRow>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT category, label, value, position
         FROM ProductDetails WHERE product_id = ?1 ORDER BY position",
    )?;
    let rows = stmt.query_map(params![product_id], |row| {
        Ok(SpecRow {
            category: row.get(0)?,
            label: row.get(1)?,
            value: row.get(2)?,
            position: row.get(3)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── User Lookups ────────────────────────────────────────────────────────────

/// Fetch a full user row by username.
pub fn get_user_by_username(
    conn: &Connection,
    username: &str,
) -> Result<Option<UserRow>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, username, email, password, first_name, last_name, gender, image,
                is_admin, auto_created
         FROM Users WHERE username = ?1",
    )?;
    let result = stmt.query_row(params![username], row_to_user);
    match result {
        Ok(u) => Ok(Some(u)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All stored (id, password) pairs, for the password-hash maintenance pass.
pub fn list_user_credentials(conn: &Connection) -> Result<Vec<(i64, String)>, OperationError> {
    let mut stmt = conn.prepare("SELECT id, password FROM Users ORDER BY id")?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Review Lookups ──────────────────────────────────────────────────────────

/// All reviews for a product.
pub fn reviews_for_product(
    conn: &Connection,
    product_id: i64,
) -> Result<Vec<ReviewRow>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, product_id, user_id, reviewer_name, rating, comment
         FROM ProductReviews WHERE product_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![product_id], |row| {
        Ok(ReviewRow {
            id: row.get(0)?,
            product_id: row.get(1)?,
            user_id: row.get(2)?,
            reviewer_name: row.get(3)?,
            rating: row.get(4)?,
            comment: row.get(5)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Address Lookups ─────────────────────────────────────────────────────────

/// All addresses for a user.
pub fn addresses_for_user(
    conn: &Connection,
    user_id: i64,
) -> Result<Vec<AddressRow>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, phone, address, is_default, address_type, company
         FROM UserAddresses WHERE user_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![user_id], |row| {
        Ok(AddressRow {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            phone: row.get(3)?,
            address: row.get(4)?,
            is_default: row.get(5)?,
            address_type: row.get(6)?,
            company: row.get(7)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// The address an order for this user ships to: the default address,
/// falling back to the earliest one.
pub fn find_shipping_address(
    conn: &Connection,
    user_id: i64,
) -> Result<Option<i64>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id FROM UserAddresses WHERE user_id = ?1
         ORDER BY is_default DESC, id ASC LIMIT 1",
    )?;
    let result = stmt.query_row(params![user_id], |row| row.get::<_, i64>(0));
    match result {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Order Lookups ───────────────────────────────────────────────────────────

/// All orders for a user.
pub fn orders_for_user(conn: &Connection, user_id: i64) -> Result<Vec<OrderRow>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, address_id, created_at FROM Orders WHERE user_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![user_id], |row| {
        Ok(OrderRow {
            id: row.get(0)?,
            user_id: row.get(1)?,
            address_id: row.get(2)?,
            created_at: row.get(3)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Line items of an order.
pub fn order_items(conn: &Connection, order_id: i64) -> Result<Vec<OrderItemRow>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, order_id, product_id, quantity, unit_price
         FROM OrderItems WHERE order_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![order_id], |row| {
        Ok(OrderItemRow {
            id: row.get(0)?,
            order_id: row.get(1)?,
            product_id: row.get(2)?,
            quantity: row.get(3)?,
            unit_price: row.get(4)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// The payment attached to an order.
pub fn payment_for_order(
    conn: &Connection,
    order_id: i64,
) -> Result<Option<PaymentRow>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, order_id, amount, method, status, transaction_id, paid_at
         FROM Payments WHERE order_id = ?1",
    )?;
    let result = stmt.query_row(params![order_id], |row| {
        Ok(PaymentRow {
            id: row.get(0)?,
            order_id: row.get(1)?,
            amount: row.get(2)?,
            method: row.get(3)?,
            status: row.get(4)?,
            transaction_id: row.get(5)?,
            paid_at: row.get(6)?,
        })
    });
    match result {
        Ok(p) => Ok(Some(p)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Store Statistics ────────────────────────────────────────────────────────

/// Row counts per table, for post-run verification.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub products: i64,
    pub users: i64,
    pub reviews: i64,
    pub addresses: i64,
    pub orders: i64,
    pub order_items: i64,
    pub payments: i64,
}

/// Count rows in every entity table.
pub fn store_stats(conn: &Connection) -> Result<StoreStats, OperationError> {
    let count = |table: &str| -> Result<i64, rusqlite::Error> {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
    };
    Ok(StoreStats {
        products: count("Products")?,
        users: count("Users")?,
        reviews: count("ProductReviews")?,
        addresses: count("UserAddresses")?,
        orders: count("Orders")?,
        order_items: count("OrderItems")?,
        payments: count("Payments")?,
    })
}

// ── Row Mappers ─────────────────────────────────────────────────────────────

fn row_to_product(row: &rusqlite::Row<'_>) -> Result<ProductRow, rusqlite::Error> {
    Ok(ProductRow {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        stock: row.get(4)?,
        brand: row.get(5)?,
        thumbnail: row.get(6)?,
        category: row.get(7)?,
        sku: row.get(8)?,
        warranty_information: row.get(9)?,
        shipping_information: row.get(10)?,
        availability_status: row.get(11)?,
        return_policy: row.get(12)?,
        minimum_order_quantity: row.get(13)?,
        discount_percentage: row.get(14)?,
        featured: row.get(15)?,
        featured_order: row.get(16)?,
        created_at: row.get(17)?,
        updated_at: row.get(18)?,
    })
}

fn row_to_user(row: &rusqlite::Row<'_>) -> Result<UserRow, rusqlite::Error> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
        first_name: row.get(4)?,
        last_name: row.get(5)?,
        gender: row.get(6)?,
        image: row.get(7)?,
        is_admin: row.get(8)?,
        auto_created: row.get(9)?,
    })
}
