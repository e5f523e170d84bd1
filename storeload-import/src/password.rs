//! Password hashing for imported accounts.
//!
//! Passwords are write-once-hashed: a clear-text value coming out of the
//! export is hashed with Argon2id before it reaches the store, and a value
//! that is already a PHC hash is never hashed again.

use argon2::Argon2;
use argon2::password_hash::{PasswordHasher, SaltString, rand_core::OsRng};
use rusqlite::Connection;
use storeload_db::operations::set_user_password;
use storeload_db::queries::list_user_credentials;

use crate::error::ImportError;

/// PHC-format prefix of an Argon2 hash.
pub const HASH_PREFIX: &str = "$argon2";

/// Whether a stored password value is already hashed.
pub fn is_hashed(value: &str) -> bool {
    value.starts_with(HASH_PREFIX)
}

/// Hash a clear-text password using Argon2id with a fresh salt.
pub fn hash_password(password: &str) -> Result<String, ImportError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ImportError::PasswordHash(e.to_string()))
}

/// Hash every stored password that is still clear text.
///
/// Returns the number of rows hashed. Already-hashed rows are left
/// untouched, so running this twice changes nothing the second time.
pub fn hash_existing_passwords(conn: &Connection) -> Result<u64, ImportError> {
    let mut hashed = 0u64;
    for (id, password) in list_user_credentials(conn)? {
        if is_hashed(&password) {
            continue;
        }
        set_user_password(conn, id, &hash_password(&password)?)?;
        hashed += 1;
    }
    if hashed > 0 {
        log::info!("hashed {hashed} stored password(s)");
    }
    Ok(hashed)
}
