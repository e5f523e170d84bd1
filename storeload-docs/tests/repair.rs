use serde_json::json;
use storeload_docs::repair::{collapse_url_quotes, repair_record, strip_stray_quotes};

#[test]
fn collapses_doubled_url_quotes() {
    let input = r#""thumbnail": ""https://x/y.png"""#;
    let fixed = collapse_url_quotes(input);
    assert_eq!(fixed, r#""thumbnail": "https://x/y.png""#);
}

#[test]
fn collapses_tripled_url_quotes() {
    let input = r#""thumbnail": """https://x/y.png""""#;
    let fixed = collapse_url_quotes(input);
    assert_eq!(fixed, r#""thumbnail": "https://x/y.png""#);
}

#[test]
fn leaves_well_formed_urls_alone() {
    let input = r#""thumbnail": "https://x/y.png""#;
    assert_eq!(collapse_url_quotes(input), input);
}

#[test]
fn collapses_urls_inside_arrays() {
    let input = r#""images": [""https://a/1.png"", ""https://a/2.png""]"#;
    let fixed = collapse_url_quotes(input);
    assert_eq!(fixed, r#""images": ["https://a/1.png", "https://a/2.png"]"#);
}

#[test]
fn strips_stray_quote_pair() {
    assert_eq!(strip_stray_quotes("\"Samsung\""), "Samsung");
}

#[test]
fn leaves_plain_values_alone() {
    assert_eq!(strip_stray_quotes("Samsung"), "Samsung");
    assert_eq!(strip_stray_quotes(""), "");
}

#[test]
fn repair_record_fixes_plain_fields_only() {
    let mut record = json!({
        "title": "\"Galaxy X\"",
        "brand": "\"Samsung\"",
        "thumbnail": "https://cdn.example.com/galaxy.png",
        "price": 999.99,
    });
    repair_record(&mut record);

    assert_eq!(record["title"], "Galaxy X");
    assert_eq!(record["brand"], "Samsung");
    // URL fields are repaired at the text level, not here.
    assert_eq!(record["thumbnail"], "https://cdn.example.com/galaxy.png");
    assert_eq!(record["price"], 999.99);
}

#[test]
fn repair_record_ignores_non_objects() {
    let mut value = json!(["\"a\"", "\"b\""]);
    repair_record(&mut value);
    assert_eq!(value, json!(["\"a\"", "\"b\""]));
}
