//! End-to-end runs over a directory of export documents.

use std::path::Path;

use storeload_db::{
    get_product_by_title, get_user_by_username, open_memory, product_details, product_images,
    reviews_for_product, store_stats,
};
use storeload_import::{ImportOptions, Stage, run_import_from_dir};

fn write_fixtures(dir: &Path) {
    let write = |name: &str, body: &str| std::fs::write(dir.join(name), body).unwrap();

    // The products export carries the usual damage: doubled quotes around
    // URLs, stray quotes around plain values, a duplicated record, and
    // one record that is beyond repair.
    write(
        "products.json",
        r#"{"products": [
            {"title": "Galaxy X", "price": 999.99, "stock": 25, "brand": "\"Samsung\"",
             "thumbnail": ""https://cdn.example.com/x.png"",
             "images": [""https://cdn.example.com/1.png"", ""https://cdn.example.com/2.png""],
             "discountPercentage": 10.0, "minimumOrderQuantity": 1},
            {"title": "Galaxy X", "price": 1.0},
            {"title": "Pixel Z", "price": 799.0, "stock": 5, "brand": "Google"},
            {"title": "Junk", "price": }
        ]}"#,
    );
    write(
        "product_details.json",
        r#"{
            "Galaxy X": [
                {"category": "Display", "items": [
                    {"label": "Size", "value": "6.1 inch"},
                    {"label": "Type", "value": "OLED"}
                ]}
            ],
            "Unknown Phone": [
                {"category": "Display", "items": [{"label": "Size", "value": "5 inch"}]}
            ]
        }"#,
    );
    write(
        "product_reviews.json",
        r#"{
            "Galaxy X": [
                {"username": "ghost", "rating": 5, "comment": "love it"},
                {"user": "kim", "rating": 4, "comment": "solid"},
                {"user": "Drive-by", "rating": 3},
                {"user": "kim", "rating": 9}
            ],
            "Unknown Phone": [
                {"user": "kim", "rating": 5}
            ]
        }"#,
    );
    write(
        "users.json",
        r#"{"users": [
            {"username": "kim", "email": "kim@example.com", "password": "hunter2",
             "firstName": "Kim", "isAdmin": false},
            {"username": "lee", "email": "lee@example.com", "password": "swordfish"},
            {"username": "broken"}
        ]}"#,
    );
    write(
        "user_addresses.json",
        r#"{"user_addresses": [
            {"username": "kim", "name": "Kim", "phone": "555-0100",
             "address": "1 Main St", "default": true},
            {"username": "lee", "name": "Lee", "address": "2 Side St"},
            {"username": "nobody", "name": "Nobody", "address": "3 Ghost Rd"}
        ]}"#,
    );
    write(
        "orders.json",
        r#"{"orders": [
            {"username": "kim",
             "items": [{"productId": 1, "quantity": 2, "price": 950.0}],
             "payment": {"amount": 1900.0, "method": "card", "status": "paid",
                         "transactionId": "tx-1"}},
            {"username": "kim",
             "items": [{"productId": 99, "quantity": 1}],
             "payment": {"method": "card", "status": "paid"}},
            {"username": "lee",
             "items": [{"product": "Pixel Z", "quantity": 1}],
             "payment": {"method": "cod", "status": "pending"}}
        ]}"#,
    );
}

#[test]
fn a_full_run_loads_every_stage() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let conn = open_memory().unwrap();

    let report =
        run_import_from_dir(&conn, dir.path(), &ImportOptions::default(), None).unwrap();

    let users = report.stage(Stage::Users).unwrap();
    assert_eq!(users.inserted, 2);
    assert_eq!(users.skipped, 1); // "broken" has no email/password

    let products = report.stage(Stage::Products).unwrap();
    assert_eq!(products.inserted, 2);
    // One unparseable fragment, one duplicate title, one unknown title
    // in the specification document.
    assert_eq!(products.skipped, 3);

    let reviews = report.stage(Stage::Reviews).unwrap();
    assert_eq!(reviews.inserted, 3);
    assert_eq!(reviews.skipped, 2); // rating 9, unknown product

    let addresses = report.stage(Stage::Addresses).unwrap();
    assert_eq!(addresses.inserted, 2);
    assert_eq!(addresses.skipped, 1); // unknown user

    let orders = report.stage(Stage::Orders).unwrap();
    assert_eq!(orders.inserted, 2);
    assert_eq!(orders.skipped, 1); // product ordinal 99 does not exist

    // The placeholder reviewer account is flagged for operator review.
    assert_eq!(report.auto_created_users, vec!["ghost".to_string()]);
    let ghost = get_user_by_username(&conn, "ghost").unwrap().unwrap();
    assert!(ghost.auto_created);

    let stats = store_stats(&conn).unwrap();
    assert_eq!(stats.products, 2);
    assert_eq!(stats.users, 3); // kim, lee, ghost
    assert_eq!(stats.reviews, 3);
    assert_eq!(stats.addresses, 2);
    assert_eq!(stats.orders, 2);
    assert_eq!(stats.order_items, 2);
    assert_eq!(stats.payments, 2);
}

#[test]
fn repair_and_dedup_shape_the_stored_product() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let conn = open_memory().unwrap();

    run_import_from_dir(&conn, dir.path(), &ImportOptions::default(), None).unwrap();

    let galaxy = get_product_by_title(&conn, "Galaxy X").unwrap().unwrap();
    // First occurrence wins over the price-1.0 duplicate.
    assert_eq!(galaxy.price, 999.99);
    assert_eq!(galaxy.brand.as_deref(), Some("Samsung"));
    assert_eq!(
        galaxy.thumbnail.as_deref(),
        Some("https://cdn.example.com/x.png")
    );

    let images = product_images(&conn, galaxy.id).unwrap();
    assert_eq!(
        images,
        vec![
            "https://cdn.example.com/1.png".to_string(),
            "https://cdn.example.com/2.png".to_string(),
        ]
    );

    let specs = product_details(&conn, galaxy.id).unwrap();
    assert_eq!(specs.len(), 2);
    assert_eq!(specs[0].label, "Size");
    assert_eq!(specs[1].label, "Type");
}

#[test]
fn reviewer_identity_follows_the_resolver_policy() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let conn = open_memory().unwrap();

    run_import_from_dir(&conn, dir.path(), &ImportOptions::default(), None).unwrap();

    let galaxy = get_product_by_title(&conn, "Galaxy X").unwrap().unwrap();
    let reviews = reviews_for_product(&conn, galaxy.id).unwrap();
    assert_eq!(reviews.len(), 3);

    let kim = get_user_by_username(&conn, "kim").unwrap().unwrap();
    let ghost = get_user_by_username(&conn, "ghost").unwrap().unwrap();

    // `username` created a placeholder account; `user` matching an
    // existing account resolved to it; the unmatched `user` stayed a
    // free-text display name.
    assert!(reviews.iter().any(|r| r.user_id == Some(ghost.id)));
    assert!(reviews.iter().any(|r| r.user_id == Some(kim.id)));
    assert!(reviews
        .iter()
        .any(|r| r.user_id.is_none() && r.reviewer_name.as_deref() == Some("Drive-by")));
}

#[test]
fn rerunning_the_import_is_idempotent_for_upserted_entities() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let conn = open_memory().unwrap();

    run_import_from_dir(&conn, dir.path(), &ImportOptions::default(), None).unwrap();
    let kim_hash = get_user_by_username(&conn, "kim").unwrap().unwrap().password;

    let report =
        run_import_from_dir(&conn, dir.path(), &ImportOptions::default(), None).unwrap();

    let products = report.stage(Stage::Products).unwrap();
    assert_eq!(products.inserted, 0);
    assert_eq!(products.updated, 2);

    let users = report.stage(Stage::Users).unwrap();
    assert_eq!(users.inserted, 0);
    assert_eq!(users.updated, 2);

    // No duplicate natural keys, and the placeholder is not re-created.
    let stats = store_stats(&conn).unwrap();
    assert_eq!(stats.products, 2);
    assert_eq!(stats.users, 3);
    assert!(report.auto_created_users.is_empty());

    // The stored hash survived the second run untouched.
    let rerun_hash = get_user_by_username(&conn, "kim").unwrap().unwrap().password;
    assert_eq!(kim_hash, rerun_hash);

    // Account-keyed reviews upserted in place; the free-text review has
    // no natural key and inserted again.
    let galaxy = get_product_by_title(&conn, "Galaxy X").unwrap().unwrap();
    let reviews = reviews_for_product(&conn, galaxy.id).unwrap();
    assert_eq!(reviews.iter().filter(|r| r.user_id.is_some()).count(), 2);
    assert_eq!(reviews.iter().filter(|r| r.user_id.is_none()).count(), 2);
}

#[test]
fn every_run_is_recorded_in_the_import_log() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let conn = open_memory().unwrap();

    run_import_from_dir(&conn, dir.path(), &ImportOptions::default(), None).unwrap();
    run_import_from_dir(&conn, dir.path(), &ImportOptions::default(), None).unwrap();

    let runs: i64 = conn
        .query_row("SELECT COUNT(*) FROM import_log", [], |row| row.get(0))
        .unwrap();
    assert_eq!(runs, 2);

    let (inserted, skipped): (i64, i64) = conn
        .query_row(
            "SELECT records_inserted, records_skipped FROM import_log ORDER BY id LIMIT 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert!(inserted > 0);
    assert!(skipped > 0);
}
