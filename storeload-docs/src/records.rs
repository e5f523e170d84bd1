//! Raw record types as they appear in the export documents.
//!
//! Every field is optional here: the exports are loosely formed, and
//! required-field enforcement happens in one validation step downstream,
//! not during deserialization. A record missing its title still parses;
//! it is rejected later with a reason instead of poisoning the batch.

use serde::Deserialize;

// ── Products ────────────────────────────────────────────────────────────────

/// A product record from `products.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub warranty_information: Option<String>,
    #[serde(default)]
    pub shipping_information: Option<String>,
    #[serde(default)]
    pub availability_status: Option<String>,
    #[serde(default)]
    pub return_policy: Option<String>,
    #[serde(default)]
    pub minimum_order_quantity: Option<i64>,
    #[serde(default)]
    pub discount_percentage: Option<f64>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub featured_order: Option<i64>,
}

/// One category group from the specification-attribute document.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSpecGroup {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub items: Vec<RawSpecItem>,
}

/// A single label/value attribute within a category group.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSpecItem {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

// ── Reviews ─────────────────────────────────────────────────────────────────

/// A review record from `product_reviews.json`.
///
/// The export is inconsistent about reviewer identity: `username` names an
/// account, while `user` may be either a username or a bare display name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReview {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub comment: Option<String>,
}

// ── Users ───────────────────────────────────────────────────────────────────

/// A user record from `users.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_admin: Option<bool>,
}

// ── Addresses ───────────────────────────────────────────────────────────────

/// An address record from `user_addresses.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAddress {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, rename = "default")]
    pub is_default: Option<bool>,
    #[serde(default)]
    pub address_type: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

// ── Orders ──────────────────────────────────────────────────────────────────

/// An order record from `orders.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrder {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub items: Vec<RawOrderItem>,
    #[serde(default)]
    pub payment: Option<RawPayment>,
}

/// A line item within an order. Products are referenced either by the
/// ordinal id assigned during dedup or by title.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrderItem {
    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub price: Option<f64>,
}

/// The payment embedded in an order record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPayment {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub paid_at: Option<String>,
}
