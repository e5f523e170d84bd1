//! Products stage: upsert products and merge specification attributes.
//!
//! Each product plus its image list is one unit inside one transaction.
//! The specification-attribute document is merged afterwards by title
//! lookup, so attributes also attach to products loaded in earlier runs.

use std::collections::BTreeMap;

use rusqlite::Connection;
use storeload_catalog::types::Product;
use storeload_db::operations::{
    OperationError, UpsertOutcome, replace_product_details, replace_product_images,
    upsert_product,
};
use storeload_docs::records::{RawProduct, RawSpecGroup};

use crate::error::ImportError;
use crate::report::StageReport;
use crate::resolve::{ProductIndex, resolve_product};
use crate::validate::{validate_product, validate_spec_groups};

/// Import deduplicated product records.
///
/// Returns the ordinal→row-id index used by later stages to resolve
/// product references.
pub fn import_products(
    conn: &Connection,
    records: &[RawProduct],
    report: &mut StageReport,
) -> Result<ProductIndex, ImportError> {
    let mut index = ProductIndex::default();

    for raw in records {
        let key = raw.title.clone().unwrap_or_else(|| "<untitled>".to_string());

        let product = match validate_product(raw) {
            Ok(product) => product,
            Err(e) => {
                report.skip("product", key, e);
                continue;
            }
        };

        let tx = conn.unchecked_transaction()?;
        match write_product(&tx, &product) {
            Ok(outcome) => match tx.commit() {
                Ok(()) => {
                    if let Some(ordinal) = product.id {
                        index.insert(ordinal, outcome.id);
                    }
                    if outcome.created {
                        report.inserted += 1;
                    } else {
                        report.updated += 1;
                    }
                }
                Err(e) => report.skip("product", product.title.clone(), e),
            },
            // Dropping the transaction rolls the unit back.
            Err(e) => report.skip("product", product.title.clone(), e),
        }
    }

    Ok(index)
}

fn write_product(conn: &Connection, product: &Product) -> Result<UpsertOutcome, OperationError> {
    let outcome = upsert_product(conn, product)?;
    if !product.images.is_empty() {
        replace_product_images(conn, outcome.id, &product.images)?;
    }
    Ok(outcome)
}

/// Merge the specification-attribute document into existing products by
/// title lookup. Titles without a matching product are skipped with a
/// warning; each merge replaces the product's attribute set in one
/// transaction.
pub fn merge_details(
    conn: &Connection,
    details: &BTreeMap<String, Vec<RawSpecGroup>>,
    report: &mut StageReport,
) -> Result<(), ImportError> {
    for (title, raw_groups) in details {
        let Some(product_id) = resolve_product(conn, title)? else {
            report.skip("product_details", title.clone(), "no matching product");
            continue;
        };

        let groups = validate_spec_groups(raw_groups);
        let tx = conn.unchecked_transaction()?;
        match replace_product_details(&tx, product_id, &groups) {
            Ok(()) => {
                if let Err(e) = tx.commit() {
                    report.skip("product_details", title.clone(), e);
                }
            }
            Err(e) => report.skip("product_details", title.clone(), e),
        }
    }
    Ok(())
}
