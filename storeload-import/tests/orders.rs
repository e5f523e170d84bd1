use storeload_catalog::types::{Address, Product, User};
use storeload_db::{
    insert_address, insert_order, insert_order_item, insert_user, open_memory, order_items,
    orders_for_user, payment_for_order, store_stats, upsert_product,
};
use storeload_docs::records::{RawOrder, RawOrderItem, RawPayment};
use storeload_import::orders::import_orders;
use storeload_import::report::{Stage, StageReport};
use storeload_import::resolve::ProductIndex;

fn sample_product(title: &str, price: f64) -> Product {
    Product {
        id: None,
        title: title.to_string(),
        description: None,
        price,
        stock: Some(10),
        brand: None,
        thumbnail: None,
        images: vec![],
        category: None,
        sku: None,
        warranty_information: None,
        shipping_information: None,
        availability_status: None,
        return_policy: None,
        minimum_order_quantity: None,
        discount_percentage: None,
        featured: None,
        featured_order: None,
    }
}

fn sample_user(username: &str) -> User {
    User {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
        first_name: None,
        last_name: None,
        gender: None,
        image: None,
        is_admin: None,
    }
}

fn sample_address() -> Address {
    Address {
        username: "kim".to_string(),
        name: "Kim".to_string(),
        phone: None,
        address: "1 Main St".to_string(),
        is_default: true,
        address_type: None,
        company: None,
    }
}

fn raw_order(username: &str, items: Vec<RawOrderItem>) -> RawOrder {
    RawOrder {
        username: Some(username.to_string()),
        items,
        payment: Some(RawPayment {
            amount: None,
            method: Some("card".to_string()),
            status: Some("paid".to_string()),
            transaction_id: None,
            paid_at: None,
        }),
    }
}

fn item_by_id(product_id: i64, quantity: i64) -> RawOrderItem {
    RawOrderItem {
        product_id: Some(product_id),
        product: None,
        quantity: Some(quantity),
        price: None,
    }
}

/// Store with one user (with an address) and one product, plus the
/// ordinal index a products stage would have produced.
fn setup() -> (rusqlite::Connection, i64, ProductIndex) {
    let conn = open_memory().unwrap();
    let product = upsert_product(&conn, &sample_product("Galaxy X", 999.99)).unwrap();
    let user_id = insert_user(&conn, &sample_user("kim"), false).unwrap();
    insert_address(&conn, user_id, &sample_address()).unwrap();

    let mut index = ProductIndex::default();
    index.insert(1, product.id);
    (conn, user_id, index)
}

#[test]
fn an_order_with_a_missing_product_is_skipped_whole() {
    let (conn, user_id, index) = setup();
    let mut report = StageReport::new(Stage::Orders);

    let records = [
        raw_order("kim", vec![item_by_id(1, 2)]),
        // Ordinal 999 maps to nothing; the whole unit must be skipped.
        raw_order("kim", vec![item_by_id(1, 1), item_by_id(999, 1)]),
        raw_order("kim", vec![item_by_id(1, 1)]),
    ];
    import_orders(&conn, &records, &index, &mut report).unwrap();

    assert_eq!(report.inserted, 2);
    assert_eq!(report.skipped, 1);
    assert!(report.failures[0].reason.contains("not found"));

    // No partial rows for the skipped unit; the good orders are intact.
    let stats = store_stats(&conn).unwrap();
    assert_eq!(stats.orders, 2);
    assert_eq!(stats.order_items, 3);
    assert_eq!(stats.payments, 2);
    assert_eq!(orders_for_user(&conn, user_id).unwrap().len(), 2);
}

#[test]
fn a_store_failure_mid_unit_rolls_the_unit_back() {
    let (conn, _user_id, mut index) = setup();
    // An index entry pointing at a row that does not exist gets past
    // pre-validation and fails on the foreign key inside the unit.
    index.insert(2, 9999);
    let mut report = StageReport::new(Stage::Orders);

    let records = [
        raw_order("kim", vec![item_by_id(2, 1)]),
        raw_order("kim", vec![item_by_id(1, 1)]),
    ];
    import_orders(&conn, &records, &index, &mut report).unwrap();

    assert_eq!(report.inserted, 1);
    assert_eq!(report.skipped, 1);

    // The failed unit left nothing behind — not even its order row.
    let stats = store_stats(&conn).unwrap();
    assert_eq!(stats.orders, 1);
    assert_eq!(stats.order_items, 1);
    assert_eq!(stats.payments, 1);
}

#[test]
fn orders_resolve_products_by_title_too() {
    let (conn, user_id, index) = setup();
    let mut report = StageReport::new(Stage::Orders);

    let records = [raw_order(
        "kim",
        vec![RawOrderItem {
            product_id: None,
            product: Some("Galaxy X".to_string()),
            quantity: Some(3),
            price: None,
        }],
    )];
    import_orders(&conn, &records, &index, &mut report).unwrap();

    assert_eq!(report.inserted, 1);
    let order = &orders_for_user(&conn, user_id).unwrap()[0];
    let items = order_items(&conn, order.id).unwrap();
    assert_eq!(items[0].quantity, 3);
    // No source price: the current product price is snapshotted.
    assert_eq!(items[0].unit_price, 999.99);

    // No source amount: the payment defaults to the item sum.
    let payment = payment_for_order(&conn, order.id).unwrap().unwrap();
    assert_eq!(payment.amount, 3.0 * 999.99);
}

#[test]
fn unknown_users_and_missing_addresses_skip_the_order() {
    let (conn, _user_id, index) = setup();
    // lee exists but has no address book.
    insert_user(&conn, &sample_user("lee"), false).unwrap();
    let mut report = StageReport::new(Stage::Orders);

    let records = [
        raw_order("nobody", vec![item_by_id(1, 1)]),
        raw_order("lee", vec![item_by_id(1, 1)]),
    ];
    import_orders(&conn, &records, &index, &mut report).unwrap();

    assert_eq!(report.inserted, 0);
    assert_eq!(report.skipped, 2);
    assert!(report.failures[0].reason.contains("no matching user"));
    assert!(report.failures[1].reason.contains("no addresses"));
}

#[test]
fn committed_units_survive_a_later_failure() {
    let (conn, _user_id, mut index) = setup();
    index.insert(2, 9999);
    let mut report = StageReport::new(Stage::Orders);

    // The good order commits before the bad one fails.
    let records = [
        raw_order("kim", vec![item_by_id(1, 1)]),
        raw_order("kim", vec![item_by_id(2, 1)]),
    ];
    import_orders(&conn, &records, &index, &mut report).unwrap();

    let stats = store_stats(&conn).unwrap();
    assert_eq!(stats.orders, 1);
}

#[test]
fn a_dropped_transaction_rolls_back_raw_writes() {
    let (conn, user_id, _index) = setup();

    {
        let tx = conn.unchecked_transaction().unwrap();
        let order_id = insert_order(&tx, user_id, 1).unwrap();
        // Violating the product foreign key aborts the unit.
        let result = insert_order_item(&tx, order_id, 9999, 1, 1.0);
        assert!(result.is_err());
        // tx dropped here without commit
    }

    let stats = store_stats(&conn).unwrap();
    assert_eq!(stats.orders, 0);
    assert_eq!(stats.order_items, 0);
}
