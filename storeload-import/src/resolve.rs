//! Resolution of human-readable references to surrogate ids.
//!
//! Source documents reference products by title or dedup ordinal and
//! users by username; the store knows them by generated row ids. The
//! resolver bridges the two, optionally creating placeholder accounts
//! for reviewers without one.

use std::collections::HashMap;

use rusqlite::Connection;
use storeload_catalog::types::{ProductRef, User};
use storeload_db::operations::{
    OperationError, find_product_id_by_title, find_user_id_by_username, insert_user,
    product_exists,
};

use crate::error::ImportError;
use crate::password::hash_password;

/// Policy for placeholder accounts created during reference resolution.
///
/// These accounts exist only to satisfy a foreign key; they get a derived
/// email and a hashed default credential, and are flagged in the store
/// and the run report for operator review.
#[derive(Debug, Clone)]
pub struct PlaceholderPolicy {
    /// Domain for the derived email: `<username>@<email_domain>`.
    pub email_domain: String,
    /// Clear-text default credential; hashed before storage.
    pub password: String,
}

impl Default for PlaceholderPolicy {
    fn default() -> Self {
        Self {
            email_domain: "example.com".to_string(),
            password: "defaultpassword".to_string(),
        }
    }
}

/// Resolve a product title to its surrogate id.
pub fn resolve_product(conn: &Connection, title: &str) -> Result<Option<i64>, OperationError> {
    find_product_id_by_title(conn, title)
}

/// Resolve a username to its surrogate id.
pub fn resolve_user(conn: &Connection, username: &str) -> Result<Option<i64>, OperationError> {
    find_user_id_by_username(conn, username)
}

/// Resolve a username, creating a placeholder account when absent.
///
/// Returns the id and whether the account was created this call.
pub fn resolve_or_create_user(
    conn: &Connection,
    username: &str,
    policy: &PlaceholderPolicy,
) -> Result<(i64, bool), ImportError> {
    if let Some(id) = find_user_id_by_username(conn, username)? {
        return Ok((id, false));
    }

    let user = User {
        username: username.to_string(),
        email: format!("{username}@{}", policy.email_domain),
        password: hash_password(&policy.password)?,
        first_name: None,
        last_name: None,
        gender: None,
        image: None,
        is_admin: Some(false),
    };
    let id = insert_user(conn, &user, true)?;
    log::warn!("auto-created placeholder account '{username}' (needs operator review)");
    Ok((id, true))
}

/// Maps dedup ordinals from the product document to stored row ids.
///
/// Built during the products stage; order items referencing products by
/// ordinal resolve through it. An ordinal unknown to this run falls back
/// to a direct row-id check, which covers orders importing against a
/// store loaded in an earlier run.
#[derive(Debug, Default)]
pub struct ProductIndex {
    by_ordinal: HashMap<i64, i64>,
}

impl ProductIndex {
    pub fn insert(&mut self, ordinal: i64, id: i64) {
        self.by_ordinal.insert(ordinal, id);
    }

    /// Resolve an order item's product reference to a stored row id.
    pub fn resolve(
        &self,
        conn: &Connection,
        product: &ProductRef,
    ) -> Result<Option<i64>, OperationError> {
        match product {
            ProductRef::Id(ordinal) => {
                if let Some(&id) = self.by_ordinal.get(ordinal) {
                    return Ok(Some(id));
                }
                if product_exists(conn, *ordinal)? {
                    Ok(Some(*ordinal))
                } else {
                    Ok(None)
                }
            }
            ProductRef::Title(title) => find_product_id_by_title(conn, title),
        }
    }
}
