use storeload_docs::dedupe::dedupe_products;
use storeload_docs::records::RawProduct;

fn product(title: &str, price: f64) -> RawProduct {
    RawProduct {
        title: Some(title.to_string()),
        price: Some(price),
        ..RawProduct::default()
    }
}

#[test]
fn first_occurrence_wins() {
    let records = vec![
        product("Galaxy X", 999.99),
        product("Pixel Z", 799.0),
        product("Galaxy X", 1.0),
    ];

    let outcome = dedupe_products(records);

    assert_eq!(outcome.products.len(), 2);
    assert_eq!(outcome.duplicates, vec!["Galaxy X".to_string()]);
    // The first record's price survives, not the later one's.
    assert_eq!(outcome.products[0].price, Some(999.99));
}

#[test]
fn ordinals_are_dense_and_first_seen_ordered() {
    let records = vec![
        RawProduct {
            id: Some(42),
            ..product("Galaxy X", 999.99)
        },
        product("Pixel Z", 799.0),
        product("Galaxy X", 999.99),
        product("Xperia Q", 649.0),
    ];

    let outcome = dedupe_products(records);

    let ids: Vec<Option<i64>> = outcome.products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
    let titles: Vec<&str> = outcome
        .products
        .iter()
        .filter_map(|p| p.title.as_deref())
        .collect();
    assert_eq!(titles, vec!["Galaxy X", "Pixel Z", "Xperia Q"]);
}

#[test]
fn dedupe_is_idempotent() {
    let records = vec![
        product("Galaxy X", 999.99),
        product("Galaxy X", 1.0),
        product("Pixel Z", 799.0),
    ];

    let first = dedupe_products(records);
    let second = dedupe_products(first.products.clone());

    assert_eq!(second.duplicates.len(), 0);
    assert_eq!(second.untitled, 0);
    assert_eq!(second.products.len(), first.products.len());
    for (a, b) in first.products.iter().zip(&second.products) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.title, b.title);
    }
}

#[test]
fn untitled_records_are_dropped_and_counted() {
    let records = vec![
        product("Galaxy X", 999.99),
        RawProduct {
            price: Some(5.0),
            ..RawProduct::default()
        },
    ];

    let outcome = dedupe_products(records);

    assert_eq!(outcome.products.len(), 1);
    assert_eq!(outcome.untitled, 1);
}
