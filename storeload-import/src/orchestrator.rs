//! The import run: stages in dependency order over one store handle.
//!
//! Users come first, then products (with their specification attributes),
//! then everything that references them. A record failing in one stage
//! never blocks later stages or later records in the same stage; committed
//! units stay committed even when a later unit fails.

use std::path::Path;

use rusqlite::Connection;
use storeload_docs::dedupe::dedupe_products;
use storeload_docs::documents::{DocumentSet, ParseFailure, load_document_set};

use crate::error::ImportError;
use crate::progress::ImportProgress;
use crate::report::{RunReport, Stage, StageReport, log_import};
use crate::resolve::PlaceholderPolicy;
use crate::{addresses, orders, products, reviews, users};

/// Options for an import run.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Name recorded in the import log.
    pub source_name: String,
    pub placeholder: PlaceholderPolicy,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            source_name: "catalog-export".to_string(),
            placeholder: PlaceholderPolicy::default(),
        }
    }
}

/// Load the export documents from a directory and run the import.
pub fn run_import_from_dir(
    conn: &Connection,
    dir: &Path,
    options: &ImportOptions,
    progress: Option<&dyn ImportProgress>,
) -> Result<RunReport, ImportError> {
    let docs = load_document_set(dir)?;
    run_import(conn, &docs, options, progress)
}

/// Run the full import over an already-loaded document set.
pub fn run_import(
    conn: &Connection,
    docs: &DocumentSet,
    options: &ImportOptions,
    progress: Option<&dyn ImportProgress>,
) -> Result<RunReport, ImportError> {
    let mut run = RunReport::default();

    // Users
    stage_start(progress, Stage::Users);
    let mut stage = StageReport::new(Stage::Users);
    seed_parse_failures(&mut stage, "user", &docs.users.failures);
    users::import_users(conn, &docs.users.records, &mut stage)?;
    run.stages.push(stage);

    // Products + specification attributes
    stage_start(progress, Stage::Products);
    let mut stage = StageReport::new(Stage::Products);
    seed_parse_failures(&mut stage, "product", &docs.products.failures);
    let deduped = dedupe_products(docs.products.records.clone());
    for title in &deduped.duplicates {
        stage.skip("product", title.clone(), "duplicate title; first occurrence kept");
    }
    for _ in 0..deduped.untitled {
        stage.skip("product", "<untitled>", "missing required field 'title'");
    }
    let index = products::import_products(conn, &deduped.products, &mut stage)?;
    products::merge_details(conn, &docs.details, &mut stage)?;
    run.stages.push(stage);

    // Reviews
    stage_start(progress, Stage::Reviews);
    let mut stage = StageReport::new(Stage::Reviews);
    reviews::import_reviews(
        conn,
        &docs.reviews,
        &options.placeholder,
        &mut stage,
        &mut run.auto_created_users,
    )?;
    run.stages.push(stage);

    // Addresses
    stage_start(progress, Stage::Addresses);
    let mut stage = StageReport::new(Stage::Addresses);
    seed_parse_failures(&mut stage, "address", &docs.addresses.failures);
    addresses::import_addresses(conn, &docs.addresses.records, &mut stage)?;
    run.stages.push(stage);

    // Orders (payments are part of each order unit)
    stage_start(progress, Stage::Orders);
    let mut stage = StageReport::new(Stage::Orders);
    seed_parse_failures(&mut stage, "order", &docs.orders.failures);
    orders::import_orders(conn, &docs.orders.records, &index, &mut stage)?;
    run.stages.push(stage);

    log_import(conn, &options.source_name, &run)?;

    if let Some(p) = progress {
        p.on_complete(&run);
    }
    Ok(run)
}

fn stage_start(progress: Option<&dyn ImportProgress>, stage: Stage) {
    if let Some(p) = progress {
        p.on_stage(stage);
    }
}

fn seed_parse_failures(stage: &mut StageReport, entity: &'static str, failures: &[ParseFailure]) {
    for failure in failures {
        stage.skip(entity, failure.key.clone(), &failure.reason);
    }
}
