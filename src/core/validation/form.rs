//! Invoice form schema
//!
//! The schema is fixed: `customerId`, `amount` and `status` are read from the
//! form; the identifier comes from the store and the date from the clock.

use super::validators::{self, FieldValidator};
use crate::core::error::{FieldValidationError, ValidationError};
use crate::core::model::{InvoiceChanges, InvoiceStatus, NewInvoice, to_minor_units};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Form-encoded key/value input, read as strings before coercion
pub type FormPayload = HashMap<String, String>;

pub const FIELD_CUSTOMER_ID: &str = "customerId";
pub const FIELD_AMOUNT: &str = "amount";
pub const FIELD_STATUS: &str = "status";

const STATUS_VALUES: &[&str] = &["pending", "paid"];

/// Invoice fields after validation and coercion
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceForm {
    pub customer_id: String,
    /// Amount in minor units (`round(amount * 100)`)
    pub amount: i64,
    pub status: InvoiceStatus,
}

impl InvoiceForm {
    /// Validate a payload against the invoice schema
    ///
    /// Every field is checked; all failures are returned together.
    pub fn parse(payload: &FormPayload) -> Result<Self, ValidationError> {
        let mut errors = Vec::new();

        for (field, rules) in schema() {
            let value = payload.get(field).map(String::as_str);
            // First failing rule per field wins
            if let Some(message) = rules.iter().find_map(|rule| rule(field, value).err()) {
                errors.push(FieldValidationError {
                    field: field.to_string(),
                    message,
                });
            }
        }

        // Every rule passed, but the minor-unit amount may still overflow
        let amount = match payload
            .get(FIELD_AMOUNT)
            .and_then(|raw| validators::coerce_number(raw))
            .map(to_minor_units)
        {
            Some(Some(cents)) => Some(cents),
            Some(None) => {
                errors.push(FieldValidationError {
                    field: FIELD_AMOUNT.to_string(),
                    message: format!("'{}' is too large", FIELD_AMOUNT),
                });
                None
            }
            None => None,
        };

        let status = payload
            .get(FIELD_STATUS)
            .and_then(|s| s.parse::<InvoiceStatus>().ok());

        match (errors.is_empty(), amount, status) {
            (true, Some(amount), Some(status)) => Ok(InvoiceForm {
                customer_id: payload
                    .get(FIELD_CUSTOMER_ID)
                    .map(|s| s.trim().to_string())
                    .unwrap_or_default(),
                amount,
                status,
            }),
            _ => Err(ValidationError::from_fields(errors)),
        }
    }

    /// Attach the system-assigned creation date
    pub fn into_new_invoice(self, date: NaiveDate) -> NewInvoice {
        NewInvoice {
            customer_id: self.customer_id,
            amount: self.amount,
            status: self.status,
            date,
        }
    }

    pub fn into_changes(self) -> InvoiceChanges {
        InvoiceChanges {
            customer_id: self.customer_id,
            amount: self.amount,
            status: self.status,
        }
    }
}

fn schema() -> Vec<(&'static str, Vec<FieldValidator>)> {
    vec![
        (
            FIELD_CUSTOMER_ID,
            vec![Box::new(validators::required()) as FieldValidator],
        ),
        (
            FIELD_AMOUNT,
            vec![
                Box::new(validators::required()) as FieldValidator,
                Box::new(validators::numeric()),
                Box::new(validators::non_negative()),
            ],
        ),
        (
            FIELD_STATUS,
            vec![Box::new(validators::in_list(STATUS_VALUES)) as FieldValidator],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(pairs: &[(&str, &str)]) -> FormPayload {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_valid_payload_is_coerced() {
        let form = InvoiceForm::parse(&payload(&[
            ("customerId", "cust-1"),
            ("amount", "157.95"),
            ("status", "pending"),
        ]))
        .expect("valid");

        assert_eq!(form.customer_id, "cust-1");
        assert_eq!(form.amount, 15795);
        assert_eq!(form.status, InvoiceStatus::Pending);
    }

    #[test]
    fn test_amount_rounds_to_nearest_minor_unit() {
        let form = InvoiceForm::parse(&payload(&[
            ("customerId", "c"),
            ("amount", "0.129"),
            ("status", "paid"),
        ]))
        .unwrap();
        assert_eq!(form.amount, 13);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err = InvoiceForm::parse(&payload(&[
            ("customerId", "c"),
            ("amount", "10"),
            ("status", "overdue"),
        ]))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["status"]);
    }

    #[test]
    fn test_non_numeric_amount_is_rejected() {
        let err = InvoiceForm::parse(&payload(&[
            ("customerId", "c"),
            ("amount", "ten"),
            ("status", "paid"),
        ]))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["amount"]);
    }

    #[test]
    fn test_every_failing_field_is_reported() {
        let err = InvoiceForm::parse(&payload(&[("amount", "-4")])).unwrap_err();
        assert_eq!(err.fields(), vec!["customerId", "amount", "status"]);
        assert!(matches!(err, ValidationError::FieldErrors(_)));
    }

    #[test]
    fn test_huge_amount_is_rejected() {
        let err = InvoiceForm::parse(&payload(&[
            ("customerId", "c"),
            ("amount", "1e30"),
            ("status", "paid"),
        ]))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["amount"]);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let form = InvoiceForm::parse(&payload(&[
            ("customerId", "c"),
            ("amount", "1"),
            ("status", "paid"),
            ("id", "should-not-matter"),
            ("date", "1999-01-01"),
        ]))
        .unwrap();
        assert_eq!(form.amount, 100);
    }

    #[test]
    fn test_into_new_invoice_keeps_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let form = InvoiceForm {
            customer_id: "c".into(),
            amount: 500,
            status: InvoiceStatus::Paid,
        };
        let invoice = form.clone().into_new_invoice(date);
        assert_eq!(invoice.date, date);
        assert_eq!(invoice.amount, 500);
        assert_eq!(form.into_changes().customer_id, "c");
    }
}
