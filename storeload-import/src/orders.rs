//! Orders stage: insert each order with its items and payment as one unit.
//!
//! Every product reference is pre-validated before the unit's transaction
//! opens; an order with any unresolvable reference is skipped whole, and
//! no item or payment rows are written for it. A failed unit never blocks
//! the remaining orders.

use rusqlite::{Connection, params};
use storeload_catalog::types::{OrderItem, Payment};
use storeload_db::operations::{
    OperationError, insert_order, insert_order_item, insert_payment,
};
use storeload_db::queries::find_shipping_address;
use storeload_docs::records::RawOrder;

use crate::error::ImportError;
use crate::report::StageReport;
use crate::resolve::{ProductIndex, resolve_user};
use crate::validate::validate_order;

/// Import order records. Users and products must already exist; the
/// shipping address is the user's default address (or their first one).
pub fn import_orders(
    conn: &Connection,
    records: &[RawOrder],
    index: &ProductIndex,
    report: &mut StageReport,
) -> Result<(), ImportError> {
    for (i, raw) in records.iter().enumerate() {
        let key = format!(
            "{}[{i}]",
            raw.username.as_deref().unwrap_or("<missing username>")
        );

        let order = match validate_order(raw) {
            Ok(order) => order,
            Err(e) => {
                report.skip("order", key, e);
                continue;
            }
        };

        let Some(user_id) = resolve_user(conn, &order.username)? else {
            report.skip("order", key, "no matching user");
            continue;
        };
        let Some(address_id) = find_shipping_address(conn, user_id)? else {
            report.skip("order", key, "user has no addresses");
            continue;
        };

        // Pre-validate every product reference before opening the unit.
        let mut items = Vec::with_capacity(order.items.len());
        let mut unresolved = None;
        for item in &order.items {
            match index.resolve(conn, &item.product)? {
                Some(product_id) => items.push((product_id, item)),
                None => {
                    unresolved = Some(item.product.describe());
                    break;
                }
            }
        }
        if let Some(what) = unresolved {
            report.skip("order", key, format!("{what} not found"));
            continue;
        }

        let tx = conn.unchecked_transaction()?;
        match write_order(&tx, user_id, address_id, &items, &order.payment) {
            Ok(_) => match tx.commit() {
                Ok(()) => report.inserted += 1,
                Err(e) => report.skip("order", key, e),
            },
            // Dropping the transaction rolls back the whole unit.
            Err(e) => report.skip("order", key, e),
        }
    }
    Ok(())
}

fn write_order(
    conn: &Connection,
    user_id: i64,
    address_id: i64,
    items: &[(i64, &OrderItem)],
    payment: &Payment,
) -> Result<i64, OperationError> {
    let order_id = insert_order(conn, user_id, address_id)?;

    let mut total = 0.0f64;
    for (product_id, item) in items {
        // Unit-price snapshot: the source value, else the current price.
        let unit_price = match item.price {
            Some(price) => price,
            None => conn.query_row(
                "SELECT price FROM Products WHERE id = ?1",
                params![product_id],
                |row| row.get(0),
            )?,
        };
        insert_order_item(conn, order_id, *product_id, item.quantity, unit_price)?;
        total += unit_price * item.quantity as f64;
    }

    let amount = payment.amount.unwrap_or(total);
    insert_payment(conn, order_id, amount, payment)?;

    Ok(order_id)
}
