//! Server-rendered pages: listing tables and the customer/invoice forms.

use crate::db::models::{
    Customer, CustomerChoice, CustomerListRow, Invoice, InvoiceListRow, InvoiceStatus,
    format_currency,
};
use crate::error::DeskError;
use crate::types::action_state::ActionState;
use crate::types::forms::{CustomerForm, InvoiceForm};
use serde::Serialize;
use std::sync::Arc;
use tera::{Context, Tera};

const TEMPLATES: [(&str, &str); 5] = [
    ("layout.html", include_str!("../../templates/layout.html")),
    (
        "customers/list.html",
        include_str!("../../templates/customers/list.html"),
    ),
    (
        "customers/form.html",
        include_str!("../../templates/customers/form.html"),
    ),
    (
        "invoices/list.html",
        include_str!("../../templates/invoices/list.html"),
    ),
    (
        "invoices/form.html",
        include_str!("../../templates/invoices/form.html"),
    ),
];

/// Values shown in the customer form fields.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerFields {
    pub name: String,
    pub email: String,
    pub image_url: Option<String>,
}

impl From<&Customer> for CustomerFields {
    fn from(c: &Customer) -> Self {
        Self {
            name: c.name.clone(),
            email: c.email.clone(),
            image_url: Some(c.image_url.clone()),
        }
    }
}

impl From<&CustomerForm> for CustomerFields {
    fn from(f: &CustomerForm) -> Self {
        Self {
            name: f.name.clone().unwrap_or_default(),
            email: f.email.clone().unwrap_or_default(),
            image_url: None,
        }
    }
}

/// Values shown in the invoice form fields.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InvoiceFields {
    pub customer_id: String,
    pub amount: String,
    pub status: String,
}

impl From<&Invoice> for InvoiceFields {
    fn from(i: &Invoice) -> Self {
        Self {
            customer_id: i.customer_id.clone(),
            amount: format!("{}.{:02}", i.amount / 100, i.amount % 100),
            status: i.status.to_string(),
        }
    }
}

impl From<&InvoiceForm> for InvoiceFields {
    fn from(f: &InvoiceForm) -> Self {
        Self {
            customer_id: f.customer_id.clone().unwrap_or_default(),
            amount: f.amount.clone().unwrap_or_default(),
            status: f.status.clone().unwrap_or_default(),
        }
    }
}

/// Whether a form creates a new row or edits the row with the given id.
#[derive(Debug, Clone, Copy)]
pub enum FormMode<'a> {
    Create,
    Edit(&'a str),
}

#[derive(Serialize)]
struct CustomerFormPage<'a> {
    id: Option<&'a str>,
    submit_label: &'static str,
    #[serde(flatten)]
    fields: &'a CustomerFields,
    state: &'a ActionState,
}

#[derive(Serialize)]
struct InvoiceFormPage<'a> {
    id: Option<&'a str>,
    submit_label: &'static str,
    customers: &'a [CustomerChoice],
    statuses: [&'static str; 2],
    #[serde(flatten)]
    fields: &'a InvoiceFields,
    state: &'a ActionState,
}

#[derive(Serialize)]
struct CustomerRowView<'a> {
    id: &'a str,
    name: &'a str,
    email: &'a str,
    image_url: &'a str,
    total_invoices: i64,
    total_pending: String,
    total_paid: String,
}

#[derive(Serialize)]
struct InvoiceRowView<'a> {
    id: &'a str,
    name: &'a str,
    email: &'a str,
    image_url: &'a str,
    amount: String,
    date: &'a str,
    status: InvoiceStatus,
}

#[derive(Clone)]
pub struct Views {
    tera: Arc<Tera>,
}

impl Views {
    pub fn new() -> Result<Self, DeskError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    pub fn customer_form(
        &self,
        mode: FormMode<'_>,
        fields: &CustomerFields,
        state: &ActionState,
    ) -> Result<String, DeskError> {
        let (id, submit_label) = match mode {
            FormMode::Create => (None, "Create Customer"),
            FormMode::Edit(id) => (Some(id), "Edit Customer"),
        };
        let page = CustomerFormPage {
            id,
            submit_label,
            fields,
            state,
        };
        self.render("customers/form.html", &page)
    }

    pub fn invoice_form(
        &self,
        mode: FormMode<'_>,
        customers: &[CustomerChoice],
        fields: &InvoiceFields,
        state: &ActionState,
    ) -> Result<String, DeskError> {
        let (id, submit_label) = match mode {
            FormMode::Create => (None, "Create Invoice"),
            FormMode::Edit(id) => (Some(id), "Edit Invoice"),
        };
        let page = InvoiceFormPage {
            id,
            submit_label,
            customers,
            statuses: InvoiceStatus::ALL.map(|s| s.as_str()),
            fields,
            state,
        };
        self.render("invoices/form.html", &page)
    }

    pub fn customers_page(&self, rows: &[CustomerListRow]) -> Result<String, DeskError> {
        let customers: Vec<CustomerRowView<'_>> = rows
            .iter()
            .map(|r| CustomerRowView {
                id: &r.id,
                name: &r.name,
                email: &r.email,
                image_url: &r.image_url,
                total_invoices: r.total_invoices,
                total_pending: format_currency(r.total_pending),
                total_paid: format_currency(r.total_paid),
            })
            .collect();
        let mut ctx = Context::new();
        ctx.insert("customers", &customers);
        Ok(self.tera.render("customers/list.html", &ctx)?)
    }

    pub fn invoices_page(&self, rows: &[InvoiceListRow]) -> Result<String, DeskError> {
        let invoices: Vec<InvoiceRowView<'_>> = rows
            .iter()
            .map(|r| InvoiceRowView {
                id: &r.id,
                name: &r.name,
                email: &r.email,
                image_url: &r.image_url,
                amount: format_currency(r.amount),
                date: &r.date,
                status: r.status,
            })
            .collect();
        let mut ctx = Context::new();
        ctx.insert("invoices", &invoices);
        Ok(self.tera.render("invoices/list.html", &ctx)?)
    }

    fn render<T: Serialize>(&self, template: &str, page: &T) -> Result<String, DeskError> {
        let ctx = Context::from_serialize(page)?;
        Ok(self.tera.render(template, &ctx)?)
    }
}
