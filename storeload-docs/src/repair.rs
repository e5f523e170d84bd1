//! Quote repair for damaged export records.
//!
//! The product export suffers from two kinds of quote damage: URL values
//! wrapped in doubled quotes (`""https://...""`), which breaks JSON syntax
//! and must be fixed before parsing, and plain string values that kept a
//! stray quote pair from a previous export step (`"\"Samsung\""`), which
//! parse fine but carry the quotes into the value. Both repairs operate on
//! individual scalar values; well-formed values pass through unchanged.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

/// Fields whose values are URLs (or URL lists) and get the text-level
/// collapse instead of the post-parse quote strip.
const URL_FIELDS: [&str; 2] = ["thumbnail", "images"];

fn url_quote_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#""{2,}(https?://[^"]+)"{2,}"#).expect("hard-coded pattern compiles")
    })
}

/// Collapse runs of doubled quotes around `http(s)://` URLs to a single
/// quote pair.
///
/// `"""https://x/y.png"""` becomes `"https://x/y.png"`; a properly quoted
/// URL is left alone. This runs on raw document text, before parsing.
pub fn collapse_url_quotes(text: &str) -> Cow<'_, str> {
    url_quote_re().replace_all(text, "\"$1\"")
}

/// Strip one stray leading and trailing quote character from a parsed
/// string value. `"Samsung"` (quotes in the value) becomes `Samsung`.
pub fn strip_stray_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

/// Repair the scalar string fields of a parsed record in place.
///
/// URL fields were already fixed at the text level; every other string
/// field gets the stray-quote strip. Non-string values and structural
/// JSON are untouched.
pub fn repair_record(record: &mut Value) {
    let Value::Object(fields) = record else {
        return;
    };

    for (key, value) in fields.iter_mut() {
        if URL_FIELDS.contains(&key.as_str()) {
            continue;
        }
        if let Value::String(s) = value {
            let stripped = strip_stray_quotes(s);
            if stripped.len() != s.len() {
                let fixed = stripped.to_string();
                *s = fixed;
            }
        }
    }
}
