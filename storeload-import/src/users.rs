//! Users stage: upsert accounts keyed by username.

use rusqlite::Connection;
use storeload_db::operations::upsert_user;
use storeload_docs::records::RawUser;

use crate::error::ImportError;
use crate::password::{hash_password, is_hashed};
use crate::report::StageReport;
use crate::validate::validate_user;

/// Import user records. Clear-text passwords are hashed on the way in;
/// already-hashed values pass through untouched.
pub fn import_users(
    conn: &Connection,
    records: &[RawUser],
    report: &mut StageReport,
) -> Result<(), ImportError> {
    for raw in records {
        let key = raw.username.clone().unwrap_or_else(|| "<missing username>".to_string());

        let mut user = match validate_user(raw) {
            Ok(user) => user,
            Err(e) => {
                report.skip("user", key, e);
                continue;
            }
        };

        if !is_hashed(&user.password) {
            user.password = match hash_password(&user.password) {
                Ok(hash) => hash,
                Err(e) => {
                    report.skip("user", key, e);
                    continue;
                }
            };
        }

        // Unique-email collisions from a different username land here and
        // skip the record rather than the stage.
        match upsert_user(conn, &user) {
            Ok(outcome) if outcome.created => report.inserted += 1,
            Ok(_) => report.updated += 1,
            Err(e) => report.skip("user", user.username.clone(), e),
        }
    }
    Ok(())
}
