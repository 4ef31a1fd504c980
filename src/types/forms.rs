//! Raw form submissions and their validation into write-ready values.
//!
//! Validation runs in two steps: coercion of the raw strings (presence of the
//! status, decimal parsing of the amount, enum membership) followed by the
//! declarative `validator` rules on the coerced values. All messages from both
//! steps end up in one [`FieldErrors`].

use crate::db::models::{InvoiceStatus, NewInvoice};
use crate::types::action_state::FieldErrors;
use axum::body::Bytes;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub const MSG_AMOUNT_NAN: &str = "Expected number, received nan";
pub const MSG_AMOUNT_TOO_LARGE: &str = "Please enter an amount of at most $100,000,000,000.";
pub const MSG_SELECT_STATUS: &str = "Please select an invoice status.";
pub const MSG_ADD_IMAGE: &str = "Please add an image";

/// Error key of the customer select, as named in the submitted form.
pub const CUSTOMER_ID_FIELD: &str = "customerId";

/// Largest storable invoice amount, in cents. Keeps per-customer sums inside `i64`.
pub const MAX_AMOUNT_CENTS: i64 = 10_000_000_000_000;

/// Urlencoded invoice form as submitted.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InvoiceForm {
    #[serde(rename = "customerId", default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Validate)]
struct InvoiceFields {
    #[validate(
        required(message = "Please select a customer."),
        length(min = 1, message = "Please select a customer.")
    )]
    customer_id: Option<String>,
    /// Cents; anything that rounds to zero is not a positive amount.
    #[validate(range(min = 1, message = "Please enter an amount greater than $0."))]
    amount: Option<i64>,
}

impl InvoiceForm {
    pub fn validate(&self) -> Result<NewInvoice, FieldErrors> {
        let mut errors = FieldErrors::default();

        let amount = match coerce_number(self.amount.as_deref()) {
            Some(v) if v * 100.0 > MAX_AMOUNT_CENTS as f64 => {
                errors.add("amount", MSG_AMOUNT_TOO_LARGE);
                None
            }
            Some(v) => Some(to_cents(v)),
            None => {
                errors.add("amount", MSG_AMOUNT_NAN);
                None
            }
        };

        let status = match self.status.as_deref() {
            None => {
                errors.add("status", MSG_SELECT_STATUS);
                None
            }
            Some(raw) => match raw.parse::<InvoiceStatus>() {
                Ok(status) => Some(status),
                Err(()) => {
                    errors.add(
                        "status",
                        format!(
                            "Invalid enum value. Expected 'pending' | 'paid', received '{raw}'"
                        ),
                    );
                    None
                }
            },
        };

        let fields = InvoiceFields {
            customer_id: self.customer_id.as_deref().map(str::trim).map(str::to_string),
            amount,
        };
        if let Err(e) = fields.validate() {
            errors.merge_validation(&e);
            errors.rename("customer_id", CUSTOMER_ID_FIELD);
        }

        match (fields.customer_id, amount, status) {
            (Some(customer_id), Some(amount), Some(status)) if errors.is_empty() => {
                Ok(NewInvoice {
                    customer_id,
                    amount,
                    status,
                })
            }
            _ => Err(errors),
        }
    }
}

/// `None` -> 0, blank -> 0, otherwise a finite decimal. `None` result means "not a number".
fn coerce_number(raw: Option<&str>) -> Option<f64> {
    let Some(raw) = raw.map(str::trim) else {
        return Some(0.0);
    };
    if raw.is_empty() {
        return Some(0.0);
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Decimal currency units to integer cents. Saturates outside the `i64` range.
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// An uploaded file part.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Multipart customer form as submitted.
#[derive(Debug, Clone, Default)]
pub struct CustomerForm {
    /// `name_customer` field.
    pub name: Option<String>,
    pub email: Option<String>,
    /// `file` field; parts with an empty file name are dropped when parsing.
    pub file: Option<UploadedFile>,
}

#[derive(Debug, Validate)]
struct CustomerFields {
    #[validate(
        required(message = "Please add a customer."),
        length(min = 1, message = "Please add a customer.")
    )]
    name: Option<String>,
    #[validate(
        required(message = "Please enter a valid email."),
        email(message = "Invalid email"),
        custom(function = "dotted_domain", message = "Invalid email")
    )]
    email: Option<String>,
}

/// The `email` rule accepts bare hosts; a mail domain also needs a dot and a
/// TLD of at least two letters. Values without `@` are left to `email`.
fn dotted_domain(email: &str) -> Result<(), ValidationError> {
    let Some((_, domain)) = email.rsplit_once('@') else {
        return Ok(());
    };
    let labels: Vec<&str> = domain.split('.').collect();
    let tld = labels.last().copied().unwrap_or_default();
    let ok = labels.len() >= 2
        && labels.iter().all(|label| !label.is_empty())
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic());
    if ok {
        Ok(())
    } else {
        Err(ValidationError::new("email_domain"))
    }
}

/// Customer fields that passed validation; the image is handled by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidCustomer {
    pub name: String,
    pub email: String,
}

impl CustomerForm {
    /// `require_image` is set for creation, where a customer cannot exist without a picture.
    pub fn validate(&self, require_image: bool) -> Result<ValidCustomer, FieldErrors> {
        let mut errors = FieldErrors::default();

        let fields = CustomerFields {
            name: self.name.as_deref().map(str::trim).map(str::to_string),
            email: self.email.as_deref().map(str::trim).map(str::to_string),
        };
        if let Err(e) = fields.validate() {
            errors.merge_validation(&e);
        }
        if require_image && self.file.is_none() {
            errors.add("image", MSG_ADD_IMAGE);
        }

        match (fields.name, fields.email) {
            (Some(name), Some(email)) if errors.is_empty() => Ok(ValidCustomer { name, email }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice(customer: Option<&str>, amount: Option<&str>, status: Option<&str>) -> InvoiceForm {
        InvoiceForm {
            customer_id: customer.map(String::from),
            amount: amount.map(String::from),
            status: status.map(String::from),
        }
    }

    fn customer(name: Option<&str>, email: Option<&str>, with_file: bool) -> CustomerForm {
        CustomerForm {
            name: name.map(String::from),
            email: email.map(String::from),
            file: with_file.then(|| UploadedFile {
                file_name: "ada.png".to_string(),
                content_type: Some("image/png".to_string()),
                bytes: Bytes::from_static(b"\x89PNG"),
            }),
        }
    }

    #[test]
    fn valid_invoice_is_converted_to_cents() {
        let parsed = invoice(Some("c1"), Some("12.34"), Some("paid"))
            .validate()
            .unwrap();
        assert_eq!(parsed.customer_id, "c1");
        assert_eq!(parsed.amount, 1234);
        assert_eq!(parsed.status, InvoiceStatus::Paid);
    }

    #[test]
    fn cents_conversion_rounds_float_noise() {
        assert_eq!(to_cents(0.29), 29);
        assert_eq!(to_cents(19.99), 1999);
        assert_eq!(to_cents(250.0), 25000);
    }

    const AMOUNT_POSITIVE: &str = "Please enter an amount greater than $0.";

    #[test]
    fn non_positive_amounts_are_rejected() {
        for raw in ["0", "-5", "", "0.00", "0.001", "-1e30"] {
            let errors = invoice(Some("c1"), Some(raw), Some("pending"))
                .validate()
                .unwrap_err();
            assert_eq!(
                errors.get("amount"),
                Some(&[AMOUNT_POSITIVE.to_string()][..]),
                "amount {raw:?}"
            );
        }
    }

    #[test]
    fn amounts_beyond_the_cap_are_rejected() {
        for raw in ["1e30", "100000000000.01"] {
            let errors = invoice(Some("c1"), Some(raw), Some("paid"))
                .validate()
                .unwrap_err();
            assert_eq!(
                errors.get("amount"),
                Some(&[MSG_AMOUNT_TOO_LARGE.to_string()][..]),
                "amount {raw:?}"
            );
        }

        let parsed = invoice(Some("c1"), Some("100000000000"), Some("paid"))
            .validate()
            .unwrap();
        assert_eq!(parsed.amount, MAX_AMOUNT_CENTS);
    }

    #[test]
    fn non_numeric_amount_reports_nan() {
        for raw in ["abc", "NaN", "inf"] {
            let errors = invoice(Some("c1"), Some(raw), Some("pending"))
                .validate()
                .unwrap_err();
            assert_eq!(errors.get("amount"), Some(&[MSG_AMOUNT_NAN.to_string()][..]));
        }
    }

    #[test]
    fn missing_invoice_fields_each_get_a_message() {
        let errors = invoice(None, None, None).validate().unwrap_err();
        assert_eq!(
            errors.get("customerId"),
            Some(&["Please select a customer.".to_string()][..])
        );
        assert!(!errors.contains("customer_id"));
        assert_eq!(errors.get("amount"), Some(&[AMOUNT_POSITIVE.to_string()][..]));
        assert_eq!(errors.get("status"), Some(&[MSG_SELECT_STATUS.to_string()][..]));
    }

    #[test]
    fn unknown_status_names_the_received_value() {
        let errors = invoice(Some("c1"), Some("10"), Some("overdue"))
            .validate()
            .unwrap_err();
        let msgs = errors.get("status").unwrap();
        assert!(msgs[0].contains("received 'overdue'"));
        assert!(!errors.contains("amount"));
    }

    #[test]
    fn customer_email_must_look_like_an_email() {
        for raw in ["not-an-email", "ada@localhost", "ada@example.c"] {
            let errors = customer(Some("Ada"), Some(raw), true)
                .validate(true)
                .unwrap_err();
            assert_eq!(
                errors.get("email"),
                Some(&["Invalid email".to_string()][..]),
                "email {raw:?}"
            );
            assert!(!errors.contains("name"));
        }

        assert!(
            customer(Some("Ada"), Some("ada.king@mail.example.org"), true)
                .validate(true)
                .is_ok()
        );
    }

    #[test]
    fn customer_presence_rules() {
        let errors = customer(Some("   "), None, false).validate(true).unwrap_err();
        assert_eq!(errors.get("name"), Some(&["Please add a customer.".to_string()][..]));
        assert_eq!(
            errors.get("email"),
            Some(&["Please enter a valid email.".to_string()][..])
        );
        assert_eq!(errors.get("image"), Some(&[MSG_ADD_IMAGE.to_string()][..]));
    }

    #[test]
    fn image_is_optional_on_update() {
        let parsed = customer(Some(" Ada "), Some("ada@example.com"), false)
            .validate(false)
            .unwrap();
        assert_eq!(
            parsed,
            ValidCustomer {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            }
        );
    }
}
