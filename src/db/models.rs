use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 2] = [InvoiceStatus::Pending, InvoiceStatus::Paid];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Invoice {
    pub id: String,
    pub customer_id: String,
    /// Cents.
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: String,
}

/// Invoice joined with its customer, as shown on the invoices listing.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InvoiceListRow {
    pub id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Customer with aggregated invoice totals, as shown on the customers listing.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CustomerListRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: i64,
    pub total_paid: i64,
}

/// Entry of the customer `<select>` on the invoice form.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CustomerChoice {
    pub id: String,
    pub name: String,
}

/// Validated customer fields, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Validated invoice fields, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
}

/// Formats cents as a dollar amount, e.g. `12345` -> `$123.45`.
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}
