//! Form-level validation mirrored from the server.
//!
//! These checks run before a request is dispatched; anything that passes
//! here can still be rejected by the server, which stays the source of
//! truth.

use chrono::NaiveDate;
use thiserror::Error;

use crate::{
    category::Category,
    transaction::{TransactionKind, TransactionUpsert},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("date cannot be in the future")]
    FutureDate,
    #[error("category name must be between 2 and 50 characters")]
    NameLength,
    #[error("category kind does not match transaction kind")]
    KindMismatch,
    #[error("default categories cannot change kind")]
    DefaultKindImmutable,
    #[error("default categories cannot be deleted")]
    DefaultUndeletable,
    #[error("{0} is required")]
    Missing(&'static str),
}

/// Validates a transaction create/update form.
///
/// `category` is the category the form currently references, if any; its
/// kind must match the transaction kind.
pub fn validate_transaction(
    payload: &TransactionUpsert,
    category: Option<&Category>,
    today: NaiveDate,
) -> Result<(), FormError> {
    if payload.amount_minor <= 0 {
        return Err(FormError::NonPositiveAmount);
    }
    if payload.date > today {
        return Err(FormError::FutureDate);
    }
    if let Some(category) = category
        && category.kind != payload.kind
    {
        return Err(FormError::KindMismatch);
    }
    Ok(())
}

/// Validates a category name (2..=50 characters, non-blank).
pub fn validate_category_name(name: &str) -> Result<(), FormError> {
    let len = name.trim().chars().count();
    if !(2..=50).contains(&len) {
        return Err(FormError::NameLength);
    }
    Ok(())
}

/// Validates a category edit against the existing entity.
///
/// The name may always change; the kind is immutable once the category is
/// a system default.
pub fn validate_category_update(
    existing: &Category,
    new_name: &str,
    new_kind: TransactionKind,
) -> Result<(), FormError> {
    validate_category_name(new_name)?;
    if existing.is_default && new_kind != existing.kind {
        return Err(FormError::DefaultKindImmutable);
    }
    Ok(())
}

/// Default categories cannot be deleted.
pub fn validate_category_delete(existing: &Category) -> Result<(), FormError> {
    if existing.is_default {
        return Err(FormError::DefaultUndeletable);
    }
    Ok(())
}

/// Rejects empty required text fields.
pub fn require(field: &'static str, value: &str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        return Err(FormError::Missing(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn category(kind: TransactionKind, is_default: bool) -> Category {
        Category {
            id: Uuid::new_v4(),
            name: "Groceries".to_string(),
            kind,
            is_default,
        }
    }

    fn upsert(kind: TransactionKind, amount_minor: i64, date: NaiveDate) -> TransactionUpsert {
        TransactionUpsert {
            kind,
            amount_minor,
            category_id: None,
            date,
            note: None,
        }
    }

    #[test]
    fn rejects_future_date() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let tomorrow = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let payload = upsert(TransactionKind::Expense, 1000, tomorrow);
        assert_eq!(
            validate_transaction(&payload, None, today),
            Err(FormError::FutureDate)
        );
    }

    #[test]
    fn rejects_kind_mismatch() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let payload = upsert(TransactionKind::Expense, 1000, today);
        let income_category = category(TransactionKind::Income, false);
        assert_eq!(
            validate_transaction(&payload, Some(&income_category), today),
            Err(FormError::KindMismatch)
        );
    }

    #[test]
    fn rejects_zero_amount() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let payload = upsert(TransactionKind::Income, 0, today);
        assert_eq!(
            validate_transaction(&payload, None, today),
            Err(FormError::NonPositiveAmount)
        );
    }

    #[test]
    fn default_category_kind_is_immutable() {
        let existing = category(TransactionKind::Expense, true);
        assert_eq!(
            validate_category_update(&existing, "Food", TransactionKind::Income),
            Err(FormError::DefaultKindImmutable)
        );
        assert!(validate_category_update(&existing, "Food", TransactionKind::Expense).is_ok());
    }

    #[test]
    fn default_category_cannot_be_deleted() {
        let existing = category(TransactionKind::Expense, true);
        assert_eq!(
            validate_category_delete(&existing),
            Err(FormError::DefaultUndeletable)
        );
    }

    #[test]
    fn name_length_bounds() {
        assert_eq!(validate_category_name("a"), Err(FormError::NameLength));
        assert!(validate_category_name("ab").is_ok());
        assert_eq!(
            validate_category_name(&"x".repeat(51)),
            Err(FormError::NameLength)
        );
    }
}
