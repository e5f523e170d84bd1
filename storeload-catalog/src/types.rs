//! Data model types for the store catalog.
//!
//! These types represent the persistent schema: products with their
//! specification attributes, users, reviews, addresses, and orders with
//! their line items and payment.

use serde::{Deserialize, Serialize};

// ── Product ─────────────────────────────────────────────────────────────────

/// A validated product record. The natural key is `title`.
///
/// Optional fields stay `None` when the source record omits them; an
/// update keyed on title leaves such fields untouched in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Ordinal id assigned during dedup, when the record came through it.
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: Option<i64>,
    pub brand: Option<String>,
    pub thumbnail: Option<String>,
    /// Image URLs in source order.
    pub images: Vec<String>,
    pub category: Option<String>,
    pub sku: Option<String>,
    pub warranty_information: Option<String>,
    pub shipping_information: Option<String>,
    pub availability_status: Option<String>,
    pub return_policy: Option<String>,
    pub minimum_order_quantity: Option<i64>,
    pub discount_percentage: Option<f64>,
    pub featured: Option<bool>,
    pub featured_order: Option<i64>,
}

/// One category of specification attributes for a product.
///
/// Category order is irrelevant; attribute order within a category is
/// the source insertion order and is preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecGroup {
    pub category: String,
    pub attributes: Vec<SpecAttribute>,
}

/// A single label/value specification attribute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecAttribute {
    pub label: String,
    pub value: String,
}

// ── User ────────────────────────────────────────────────────────────────────

/// A validated user record. The natural key is `username`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
    /// Hashed before it reaches the store; never stored in clear.
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub image: Option<String>,
    pub is_admin: Option<bool>,
}

// ── Review ──────────────────────────────────────────────────────────────────

/// A validated review, scoped to one product.
#[derive(Debug, Clone)]
pub struct Review {
    pub reviewer: ReviewerRef,
    /// 1–5 inclusive.
    pub rating: i64,
    pub comment: Option<String>,
}

/// How a review identifies its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewerRef {
    /// An account reference; a placeholder account is created if absent.
    Username(String),
    /// A name that references an account only when one already exists;
    /// otherwise it is stored as free-text display name.
    Name(String),
}

impl ReviewerRef {
    /// The human-readable key used in reports.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Username(s) | Self::Name(s) => s,
        }
    }
}

// ── Address ─────────────────────────────────────────────────────────────────

/// A validated address record, owned by one user.
#[derive(Debug, Clone)]
pub struct Address {
    pub username: String,
    /// Recipient name.
    pub name: String,
    pub phone: Option<String>,
    pub address: String,
    pub is_default: bool,
    pub address_type: Option<String>,
    pub company: Option<String>,
}

// ── Order ───────────────────────────────────────────────────────────────────

/// A validated order: one user, one or more items, exactly one payment.
#[derive(Debug, Clone)]
pub struct Order {
    pub username: String,
    pub items: Vec<OrderItem>,
    pub payment: Payment,
}

/// A line item within an order.
#[derive(Debug, Clone)]
pub struct OrderItem {
    pub product: ProductRef,
    /// Always ≥ 1.
    pub quantity: i64,
    /// Unit price snapshot; the product's current price when the source
    /// omits it.
    pub price: Option<f64>,
}

/// How an order item references its product.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductRef {
    /// Ordinal id from the deduplicated product document.
    Id(i64),
    Title(String),
}

impl ProductRef {
    pub fn describe(&self) -> String {
        match self {
            Self::Id(id) => format!("product id {id}"),
            Self::Title(title) => format!("product '{title}'"),
        }
    }
}

/// The payment attached to an order.
#[derive(Debug, Clone)]
pub struct Payment {
    /// Defaults to the sum of quantity × unit price over the items.
    pub amount: Option<f64>,
    pub method: String,
    pub status: String,
    pub transaction_id: Option<String>,
    pub paid_at: Option<String>,
}
