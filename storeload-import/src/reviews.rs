//! Reviews stage: attach reviews to products, resolving reviewer identity.

use std::collections::BTreeMap;

use rusqlite::Connection;
use storeload_catalog::types::ReviewerRef;
use storeload_db::operations::upsert_review;
use storeload_docs::records::RawReview;

use crate::error::ImportError;
use crate::report::StageReport;
use crate::resolve::{PlaceholderPolicy, resolve_or_create_user, resolve_product, resolve_user};
use crate::validate::validate_review;

/// Import reviews grouped by product title.
///
/// A title with no matching product skips its reviews with a warning.
/// Reviewer identity follows the resolver policy: `username` always
/// references an account (placeholder-created when missing), `user`
/// references one only when it already exists.
pub fn import_reviews(
    conn: &Connection,
    reviews: &BTreeMap<String, Vec<RawReview>>,
    policy: &PlaceholderPolicy,
    report: &mut StageReport,
    auto_created: &mut Vec<String>,
) -> Result<(), ImportError> {
    for (title, records) in reviews {
        let Some(product_id) = resolve_product(conn, title)? else {
            for _ in records {
                report.skip("review", title.clone(), "no matching product");
            }
            continue;
        };

        for raw in records {
            let review = match validate_review(raw) {
                Ok(review) => review,
                Err(e) => {
                    let who = raw.username.as_deref().or(raw.user.as_deref()).unwrap_or("?");
                    report.skip("review", format!("{title}: {who}"), e);
                    continue;
                }
            };
            let key = format!("{title}: {}", review.reviewer.as_str());

            let (user_id, reviewer_name) = match &review.reviewer {
                ReviewerRef::Username(username) => {
                    match resolve_or_create_user(conn, username, policy) {
                        Ok((id, created)) => {
                            if created {
                                auto_created.push(username.clone());
                            }
                            (Some(id), None)
                        }
                        Err(e) => {
                            report.skip("review", key, e);
                            continue;
                        }
                    }
                }
                ReviewerRef::Name(name) => match resolve_user(conn, name)? {
                    Some(id) => (Some(id), None),
                    None => (None, Some(name.clone())),
                },
            };

            match upsert_review(
                conn,
                product_id,
                user_id,
                reviewer_name.as_deref(),
                review.rating,
                review.comment.as_deref(),
            ) {
                Ok(outcome) if outcome.created => report.inserted += 1,
                Ok(_) => report.updated += 1,
                Err(e) => report.skip("review", key, e),
            }
        }
    }
    Ok(())
}
