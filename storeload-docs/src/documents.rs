//! Loading for the six export document families.
//!
//! Expected directory layout:
//! ```text
//! source_dir/
//!   products.json          {"products": [...]}
//!   product_details.json   {"<title>": [{category, items: [...]}]}
//!   product_reviews.json   {"<title>": [{user|username, rating, comment}]}
//!   users.json             {"users": [...]}
//!   user_addresses.json    {"user_addresses": [...]}
//!   orders.json            {"orders": [...]}
//! ```
//!
//! A missing file yields an empty collection. Records are deserialized
//! one at a time so a single damaged record is skipped and reported
//! without losing the rest of its document.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DocError;
use crate::records::{RawAddress, RawOrder, RawProduct, RawReview, RawSpecGroup, RawUser};
use crate::repair::{collapse_url_quotes, repair_record};

pub const PRODUCTS_FILE: &str = "products.json";
pub const PRODUCT_DETAILS_FILE: &str = "product_details.json";
pub const PRODUCT_REVIEWS_FILE: &str = "product_reviews.json";
pub const USERS_FILE: &str = "users.json";
pub const USER_ADDRESSES_FILE: &str = "user_addresses.json";
pub const ORDERS_FILE: &str = "orders.json";

/// A record that could not be recovered, with the reason it was dropped.
#[derive(Debug, Clone)]
pub struct ParseFailure {
    pub key: String,
    pub reason: String,
}

/// Records recovered from one document, plus the ones that were not.
#[derive(Debug)]
pub struct ParsedRecords<T> {
    pub records: Vec<T>,
    pub failures: Vec<ParseFailure>,
}

impl<T> Default for ParsedRecords<T> {
    fn default() -> Self {
        ParsedRecords {
            records: Vec::new(),
            failures: Vec::new(),
        }
    }
}

/// Everything loaded from a source directory.
#[derive(Debug, Default)]
pub struct DocumentSet {
    pub users: ParsedRecords<RawUser>,
    pub products: ParsedRecords<RawProduct>,
    /// Specification attributes keyed by product title.
    pub details: BTreeMap<String, Vec<RawSpecGroup>>,
    /// Reviews keyed by product title.
    pub reviews: BTreeMap<String, Vec<RawReview>>,
    pub addresses: ParsedRecords<RawAddress>,
    pub orders: ParsedRecords<RawOrder>,
}

#[derive(Deserialize)]
struct UsersDoc {
    #[serde(default)]
    users: Vec<Value>,
}

#[derive(Deserialize)]
struct AddressesDoc {
    #[serde(default)]
    user_addresses: Vec<Value>,
}

#[derive(Deserialize)]
struct OrdersDoc {
    #[serde(default)]
    orders: Vec<Value>,
}

/// Load all six document families from a source directory.
pub fn load_document_set(dir: &Path) -> Result<DocumentSet, DocError> {
    if !dir.is_dir() {
        return Err(DocError::DirNotFound(dir.display().to_string()));
    }

    let mut set = DocumentSet::default();

    if let Some(text) = read_optional(&dir.join(PRODUCTS_FILE))? {
        set.products = parse_products_document(&text);
    }
    if let Some(text) = read_optional(&dir.join(USERS_FILE))? {
        let doc: UsersDoc =
            serde_json::from_str(&text).map_err(|e| DocError::parse(&dir.join(USERS_FILE), e))?;
        set.users = split_records(doc.users, "user");
    }
    if let Some(text) = read_optional(&dir.join(USER_ADDRESSES_FILE))? {
        let doc: AddressesDoc = serde_json::from_str(&text)
            .map_err(|e| DocError::parse(&dir.join(USER_ADDRESSES_FILE), e))?;
        set.addresses = split_records(doc.user_addresses, "address");
    }
    if let Some(text) = read_optional(&dir.join(ORDERS_FILE))? {
        let doc: OrdersDoc =
            serde_json::from_str(&text).map_err(|e| DocError::parse(&dir.join(ORDERS_FILE), e))?;
        set.orders = split_records(doc.orders, "order");
    }
    if let Some(text) = read_optional(&dir.join(PRODUCT_DETAILS_FILE))? {
        set.details = serde_json::from_str(&text)
            .map_err(|e| DocError::parse(&dir.join(PRODUCT_DETAILS_FILE), e))?;
    }
    if let Some(text) = read_optional(&dir.join(PRODUCT_REVIEWS_FILE))? {
        set.reviews = serde_json::from_str(&text)
            .map_err(|e| DocError::parse(&dir.join(PRODUCT_REVIEWS_FILE), e))?;
    }

    Ok(set)
}

/// Parse the products document, recovering what can be recovered.
///
/// The whole document is tried first (after the text-level URL repair).
/// If it does not parse as JSON, individual `{...}` fragments are pulled
/// out of the products array and parsed independently; fragments that
/// still fail are reported and skipped.
pub fn parse_products_document(text: &str) -> ParsedRecords<RawProduct> {
    #[derive(Deserialize)]
    struct ProductsDoc {
        #[serde(default)]
        products: Vec<Value>,
    }

    let repaired = collapse_url_quotes(text);

    match serde_json::from_str::<ProductsDoc>(&repaired) {
        Ok(doc) => split_records(doc.products, "product"),
        Err(e) => {
            log::warn!("products document is not valid JSON ({e}); recovering fragments");
            let mut out = ParsedRecords::default();
            for (i, fragment) in product_fragments(&repaired).enumerate() {
                match serde_json::from_str::<Value>(fragment) {
                    Ok(mut value) => {
                        repair_record(&mut value);
                        match serde_json::from_value::<RawProduct>(value) {
                            Ok(product) => out.records.push(product),
                            Err(e) => fail(&mut out.failures, "product", i, e),
                        }
                    }
                    Err(e) => fail(&mut out.failures, "product", i, e),
                }
            }
            out
        }
    }
}

/// Iterate over flat `{...}` object fragments inside the products array.
fn product_fragments(text: &str) -> impl Iterator<Item = &str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\{[^{}]*\}").expect("hard-coded pattern compiles"));

    let start = text
        .find("\"products\"")
        .map(|i| i + "\"products\"".len())
        .unwrap_or(0);
    let end = text.rfind(']').unwrap_or(text.len());
    let slice = text.get(start..end).unwrap_or("");
    re.find_iter(slice).map(|m| m.as_str())
}

/// Deserialize each element independently, repairing string fields first.
fn split_records<T: DeserializeOwned>(values: Vec<Value>, label: &str) -> ParsedRecords<T> {
    let mut out = ParsedRecords::default();
    for (i, mut value) in values.into_iter().enumerate() {
        repair_record(&mut value);
        match serde_json::from_value(value) {
            Ok(record) => out.records.push(record),
            Err(e) => fail(&mut out.failures, label, i, e),
        }
    }
    out
}

fn fail(failures: &mut Vec<ParseFailure>, label: &str, index: usize, e: serde_json::Error) {
    log::warn!("skipping malformed {label} record [{index}]: {e}");
    failures.push(ParseFailure {
        key: format!("{label}[{index}]"),
        reason: e.to_string(),
    });
}

fn read_optional(path: &Path) -> Result<Option<String>, DocError> {
    if !path.exists() {
        return Ok(None);
    }
    std::fs::read_to_string(path)
        .map(Some)
        .map_err(|e| DocError::io(path, e))
}
