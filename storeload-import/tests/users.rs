use storeload_catalog::types::User;
use storeload_db::{get_user_by_username, insert_user, open_memory};
use storeload_docs::records::RawUser;
use storeload_import::report::{Stage, StageReport};
use storeload_import::resolve::{PlaceholderPolicy, resolve_or_create_user};
use storeload_import::users::import_users;
use storeload_import::{hash_existing_passwords, is_hashed};

fn raw_user(username: &str, password: &str) -> RawUser {
    RawUser {
        username: Some(username.to_string()),
        email: Some(format!("{username}@example.com")),
        password: Some(password.to_string()),
        ..RawUser::default()
    }
}

#[test]
fn clear_text_passwords_are_hashed_on_import() {
    let conn = open_memory().unwrap();
    let mut report = StageReport::new(Stage::Users);

    import_users(&conn, &[raw_user("kim", "hunter2")], &mut report).unwrap();

    assert_eq!(report.inserted, 1);
    let stored = get_user_by_username(&conn, "kim").unwrap().unwrap();
    assert!(is_hashed(&stored.password));
    assert_ne!(stored.password, "hunter2");
}

#[test]
fn reimporting_does_not_rehash() {
    let conn = open_memory().unwrap();
    let records = [raw_user("kim", "hunter2")];

    let mut report = StageReport::new(Stage::Users);
    import_users(&conn, &records, &mut report).unwrap();
    let first_hash = get_user_by_username(&conn, "kim").unwrap().unwrap().password;

    let mut report = StageReport::new(Stage::Users);
    import_users(&conn, &records, &mut report).unwrap();
    assert_eq!(report.updated, 1);

    let second_hash = get_user_by_username(&conn, "kim").unwrap().unwrap().password;
    assert_eq!(first_hash, second_hash);
}

#[test]
fn missing_required_fields_skip_the_record() {
    let conn = open_memory().unwrap();
    let mut report = StageReport::new(Stage::Users);

    let records = [
        raw_user("kim", "hunter2"),
        RawUser {
            username: Some("lee".to_string()),
            ..RawUser::default()
        },
    ];
    import_users(&conn, &records, &mut report).unwrap();

    assert_eq!(report.inserted, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failures[0].entity, "user");
    assert_eq!(report.failures[0].key, "lee");
}

#[test]
fn duplicate_email_skips_the_record_not_the_stage() {
    let conn = open_memory().unwrap();
    let mut report = StageReport::new(Stage::Users);

    let records = [
        raw_user("kim", "hunter2"),
        RawUser {
            email: Some("kim@example.com".to_string()),
            ..raw_user("imposter", "pw")
        },
        raw_user("lee", "pw"),
    ];
    import_users(&conn, &records, &mut report).unwrap();

    assert_eq!(report.inserted, 2);
    assert_eq!(report.skipped, 1);
    assert!(get_user_by_username(&conn, "lee").unwrap().is_some());
}

#[test]
fn hash_existing_passwords_hashes_each_row_once() {
    let conn = open_memory().unwrap();
    let user = User {
        username: "legacy".to_string(),
        email: "legacy@example.com".to_string(),
        password: "plaintext".to_string(),
        first_name: None,
        last_name: None,
        gender: None,
        image: None,
        is_admin: None,
    };
    insert_user(&conn, &user, false).unwrap();

    assert_eq!(hash_existing_passwords(&conn).unwrap(), 1);
    let first = get_user_by_username(&conn, "legacy").unwrap().unwrap().password;
    assert!(is_hashed(&first));

    // The second pass finds nothing left to hash.
    assert_eq!(hash_existing_passwords(&conn).unwrap(), 0);
    let second = get_user_by_username(&conn, "legacy").unwrap().unwrap().password;
    assert_eq!(first, second);
}

#[test]
fn placeholder_accounts_are_flagged_and_hashed() {
    let conn = open_memory().unwrap();
    let policy = PlaceholderPolicy::default();

    let (id, created) = resolve_or_create_user(&conn, "ghost", &policy).unwrap();
    assert!(created);
    assert!(id > 0);

    let stored = get_user_by_username(&conn, "ghost").unwrap().unwrap();
    assert!(stored.auto_created);
    assert_eq!(stored.email, "ghost@example.com");
    assert!(is_hashed(&stored.password));

    // Resolving again reuses the account.
    let (again, created) = resolve_or_create_user(&conn, "ghost", &policy).unwrap();
    assert!(!created);
    assert_eq!(again, id);
}
