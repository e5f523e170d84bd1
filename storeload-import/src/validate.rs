//! The single raw-to-typed validation step.
//!
//! Raw export records are all-optional; these functions enforce required
//! fields and value ranges and produce the typed records everything
//! downstream works with. A failed record is skipped with its reason;
//! validation never aborts a batch.

use storeload_catalog::types::{
    Address, Order, OrderItem, Payment, Product, ProductRef, Review, ReviewerRef, SpecAttribute,
    SpecGroup, User,
};
use storeload_docs::records::{
    RawAddress, RawOrder, RawProduct, RawReview, RawSpecGroup, RawUser,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("field '{field}' out of range: {value}")]
    OutOfRange { field: &'static str, value: String },
}

fn require<T>(value: Option<T>, field: &'static str) -> Result<T, ValidateError> {
    value.ok_or(ValidateError::MissingField(field))
}

fn require_text(value: &Option<String>, field: &'static str) -> Result<String, ValidateError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s.clone()),
        _ => Err(ValidateError::MissingField(field)),
    }
}

fn check_range(
    ok: bool,
    field: &'static str,
    value: impl ToString,
) -> Result<(), ValidateError> {
    if ok {
        Ok(())
    } else {
        Err(ValidateError::OutOfRange {
            field,
            value: value.to_string(),
        })
    }
}

/// Validate a product record.
pub fn validate_product(raw: &RawProduct) -> Result<Product, ValidateError> {
    let title = require_text(&raw.title, "title")?;
    let price = require(raw.price, "price")?;
    check_range(price >= 0.0, "price", price)?;

    if let Some(stock) = raw.stock {
        check_range(stock >= 0, "stock", stock)?;
    }

    if let Some(discount) = raw.discount_percentage {
        check_range((0.0..=100.0).contains(&discount), "discountPercentage", discount)?;
    }
    if let Some(moq) = raw.minimum_order_quantity {
        check_range(moq >= 1, "minimumOrderQuantity", moq)?;
    }

    Ok(Product {
        id: raw.id,
        title,
        description: raw.description.clone(),
        price,
        stock: raw.stock,
        brand: raw.brand.clone(),
        thumbnail: raw.thumbnail.clone(),
        images: raw.images.clone(),
        category: raw.category.clone(),
        sku: raw.sku.clone(),
        warranty_information: raw.warranty_information.clone(),
        shipping_information: raw.shipping_information.clone(),
        availability_status: raw.availability_status.clone(),
        return_policy: raw.return_policy.clone(),
        minimum_order_quantity: raw.minimum_order_quantity,
        discount_percentage: raw.discount_percentage,
        featured: raw.featured,
        featured_order: raw.featured_order,
    })
}

/// Validate a user record. The password is still whatever the source
/// carried; hashing happens in the users stage.
pub fn validate_user(raw: &RawUser) -> Result<User, ValidateError> {
    Ok(User {
        username: require_text(&raw.username, "username")?,
        email: require_text(&raw.email, "email")?,
        password: require_text(&raw.password, "password")?,
        first_name: raw.first_name.clone(),
        last_name: raw.last_name.clone(),
        gender: raw.gender.clone(),
        image: raw.image.clone(),
        is_admin: raw.is_admin,
    })
}

/// Validate a review record and pick the reviewer-identity policy branch:
/// `username` always references an account; `user` references an account
/// only when one exists and is otherwise a display name.
pub fn validate_review(raw: &RawReview) -> Result<Review, ValidateError> {
    let reviewer = if let Ok(username) = require_text(&raw.username, "username") {
        ReviewerRef::Username(username)
    } else {
        ReviewerRef::Name(require_text(&raw.user, "user")?)
    };

    let rating = require(raw.rating, "rating")?;
    check_range((1..=5).contains(&rating), "rating", rating)?;

    Ok(Review {
        reviewer,
        rating,
        comment: raw.comment.clone(),
    })
}

/// Validate an address record.
pub fn validate_address(raw: &RawAddress) -> Result<Address, ValidateError> {
    Ok(Address {
        username: require_text(&raw.username, "username")?,
        name: require_text(&raw.name, "name")?,
        phone: raw.phone.clone(),
        address: require_text(&raw.address, "address")?,
        is_default: raw.is_default.unwrap_or(false),
        address_type: raw.address_type.clone(),
        company: raw.company.clone(),
    })
}

/// Validate an order record with its items and payment.
pub fn validate_order(raw: &RawOrder) -> Result<Order, ValidateError> {
    let username = require_text(&raw.username, "username")?;

    if raw.items.is_empty() {
        return Err(ValidateError::MissingField("items"));
    }
    let mut items = Vec::with_capacity(raw.items.len());
    for item in &raw.items {
        let product = match (item.product_id, &item.product) {
            (Some(id), _) => ProductRef::Id(id),
            (None, Some(title)) if !title.trim().is_empty() => ProductRef::Title(title.clone()),
            _ => return Err(ValidateError::MissingField("productId")),
        };
        let quantity = item.quantity.unwrap_or(1);
        check_range(quantity >= 1, "quantity", quantity)?;
        if let Some(price) = item.price {
            check_range(price >= 0.0, "price", price)?;
        }
        items.push(OrderItem {
            product,
            quantity,
            price: item.price,
        });
    }

    let raw_payment = raw.payment.as_ref().ok_or(ValidateError::MissingField("payment"))?;
    if let Some(amount) = raw_payment.amount {
        check_range(amount >= 0.0, "amount", amount)?;
    }
    let payment = Payment {
        amount: raw_payment.amount,
        method: require_text(&raw_payment.method, "method")?,
        status: require_text(&raw_payment.status, "status")?,
        transaction_id: raw_payment.transaction_id.clone(),
        paid_at: raw_payment.paid_at.clone(),
    };

    Ok(Order {
        username,
        items,
        payment,
    })
}

/// Convert raw specification groups, dropping incomplete entries.
///
/// Attribute order within each category is preserved; an entry missing
/// its category or label carries no information and is logged and dropped.
pub fn validate_spec_groups(raw: &[RawSpecGroup]) -> Vec<SpecGroup> {
    let mut groups = Vec::with_capacity(raw.len());
    for group in raw {
        let Some(category) = group.category.as_deref().filter(|c| !c.trim().is_empty()) else {
            log::warn!("dropping specification group without category");
            continue;
        };
        let mut attributes = Vec::with_capacity(group.items.len());
        for item in &group.items {
            match (&item.label, &item.value) {
                (Some(label), Some(value)) if !label.trim().is_empty() => {
                    attributes.push(SpecAttribute {
                        label: label.clone(),
                        value: value.clone(),
                    });
                }
                _ => log::warn!("dropping incomplete attribute in '{category}'"),
            }
        }
        groups.push(SpecGroup {
            category: category.to_string(),
            attributes,
        });
    }
    groups
}
