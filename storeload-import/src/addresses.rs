//! Addresses stage: insert address records for existing users.
//!
//! Addresses have no natural key and are insert-only. Each insert is one
//! unit: a default address also demotes the user's previous default, and
//! both writes commit or roll back together.

use rusqlite::Connection;
use storeload_db::operations::insert_address;
use storeload_docs::records::RawAddress;

use crate::error::ImportError;
use crate::report::StageReport;
use crate::resolve::resolve_user;
use crate::validate::validate_address;

/// Import address records. The referenced user must already exist.
pub fn import_addresses(
    conn: &Connection,
    records: &[RawAddress],
    report: &mut StageReport,
) -> Result<(), ImportError> {
    for raw in records {
        let key = raw.username.clone().unwrap_or_else(|| "<missing username>".to_string());

        let address = match validate_address(raw) {
            Ok(address) => address,
            Err(e) => {
                report.skip("address", key, e);
                continue;
            }
        };

        let Some(user_id) = resolve_user(conn, &address.username)? else {
            report.skip("address", address.username.clone(), "no matching user");
            continue;
        };

        let tx = conn.unchecked_transaction()?;
        match insert_address(&tx, user_id, &address) {
            Ok(_) => match tx.commit() {
                Ok(()) => report.inserted += 1,
                Err(e) => report.skip("address", address.username.clone(), e),
            },
            Err(e) => report.skip("address", address.username.clone(), e),
        }
    }
    Ok(())
}
