//! Form actions: validate a submission, perform a single write, invalidate the
//! listing pages, then redirect. Failures come back as an
//! [`ActionState`] for the form to re-render; nothing here returns `Err`.

use crate::config::{CUSTOMERS_ROUTE, INVOICES_ROUTE};
use crate::db::models::NewCustomer;
use crate::db::sqlite::DeskStorage;
use crate::error::DeskError;
use crate::service::image_store::ImageStore;
use crate::service::render_cache::RenderCacheHandle;
use crate::types::action_state::ActionState;
use crate::types::forms::{CustomerForm, InvoiceForm};
use serde::Serialize;
use tracing::{error, info, warn};

/// Result of a create/update submission.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// Written; go to this listing route.
    Redirect(&'static str),
    /// Validation failed; nothing was written.
    Invalid(ActionState),
    /// The write failed; the state carries the generic message.
    Failed(ActionState),
}

/// Result of a delete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionMessage {
    #[serde(skip)]
    pub ok: bool,
    pub message: String,
}

#[derive(Clone)]
pub struct DeskActions {
    storage: DeskStorage,
    images: ImageStore,
    cache: RenderCacheHandle,
}

impl DeskActions {
    pub fn new(storage: DeskStorage, images: ImageStore, cache: RenderCacheHandle) -> Self {
        Self {
            storage,
            images,
            cache,
        }
    }

    pub fn storage(&self) -> &DeskStorage {
        &self.storage
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    pub fn cache(&self) -> &RenderCacheHandle {
        &self.cache
    }

    // --- invoices ---

    pub async fn create_invoice(&self, form: &InvoiceForm) -> ActionOutcome {
        let invoice = match form.validate() {
            Ok(v) => v,
            Err(errors) => {
                warn!(fields = ?errors, "create invoice rejected");
                return ActionOutcome::Invalid(ActionState::invalid(
                    errors,
                    "Missing Fields. Failed to Create Invoice.",
                ));
            }
        };
        let date = chrono::Utc::now().format("%Y-%m-%d").to_string();

        match self.storage.insert_invoice(&invoice, &date).await {
            Ok(id) => info!(id = %id, amount = invoice.amount, "invoice created"),
            Err(e) => {
                error!(error = %e, "create invoice failed");
                return ActionOutcome::Failed(ActionState::failed(
                    "Database Error: Failed to Create Invoice.",
                ));
            }
        }

        self.revalidate_listings().await;
        ActionOutcome::Redirect(INVOICES_ROUTE)
    }

    pub async fn update_invoice(&self, id: &str, form: &InvoiceForm) -> ActionOutcome {
        let invoice = match form.validate() {
            Ok(v) => v,
            Err(errors) => {
                warn!(id, fields = ?errors, "update invoice rejected");
                return ActionOutcome::Invalid(ActionState::invalid(
                    errors,
                    "Missing Fields. Failed to Update Invoice.",
                ));
            }
        };

        if let Err(e) = self.storage.update_invoice(id, &invoice).await {
            error!(id, error = %e, "update invoice failed");
            return ActionOutcome::Failed(ActionState::failed(
                "Database Error: Failed to Update Invoice.",
            ));
        }
        info!(id, amount = invoice.amount, "invoice updated");

        self.revalidate_listings().await;
        ActionOutcome::Redirect(INVOICES_ROUTE)
    }

    pub async fn delete_invoice(&self, id: &str) -> ActionMessage {
        if let Err(e) = self.storage.delete_invoice(id).await {
            error!(id, error = %e, "delete invoice failed");
            return ActionMessage {
                ok: false,
                message: "Database Error: Failed to Delete Invoice".to_string(),
            };
        }
        info!(id, "invoice deleted");

        self.revalidate_listings().await;
        ActionMessage {
            ok: true,
            message: "Deleted Invoice".to_string(),
        }
    }

    // --- customers ---

    pub async fn create_customer(&self, form: &CustomerForm) -> ActionOutcome {
        let fields = match form.validate(true) {
            Ok(v) => v,
            Err(errors) => {
                warn!(fields = ?errors, "create customer rejected");
                return ActionOutcome::Invalid(ActionState::invalid(
                    errors,
                    "Missing Fields. Failed to Create Customer.",
                ));
            }
        };
        let Some(file) = form.file.as_ref() else {
            return ActionOutcome::Failed(ActionState::failed(
                "Upload Error: Failed to Create Customer.",
            ));
        };

        let image_url = match self.images.save(file).await {
            Ok(url) => url,
            Err(e) => {
                error!(file = %file.file_name, error = %e, "storing customer image failed");
                return ActionOutcome::Failed(ActionState::failed(
                    "Upload Error: Failed to Create Customer.",
                ));
            }
        };

        let customer = NewCustomer {
            name: fields.name,
            email: fields.email,
            image_url,
        };
        match self.storage.insert_customer(&customer).await {
            Ok(id) => info!(id = %id, image_url = %customer.image_url, "customer created"),
            Err(e) => {
                // the image stays on disk
                error!(error = %e, "create customer failed");
                return ActionOutcome::Failed(ActionState::failed(
                    "Database Error: Failed to Create Customer.",
                ));
            }
        }

        self.revalidate_listings().await;
        ActionOutcome::Redirect(CUSTOMERS_ROUTE)
    }

    pub async fn update_customer(&self, id: &str, form: &CustomerForm) -> ActionOutcome {
        let fields = match form.validate(false) {
            Ok(v) => v,
            Err(errors) => {
                warn!(id, fields = ?errors, "update customer rejected");
                return ActionOutcome::Invalid(ActionState::invalid(
                    errors,
                    "Missing Fields. Failed to Update Customer.",
                ));
            }
        };

        let image_url = match &form.file {
            Some(file) => match self.images.save(file).await {
                Ok(url) => url,
                Err(e) => {
                    error!(id, file = %file.file_name, error = %e, "storing customer image failed");
                    return ActionOutcome::Failed(ActionState::failed(
                        "Upload Error: Failed to Update Customer.",
                    ));
                }
            },
            None => match self.existing_image_url(id).await {
                Ok(url) => url,
                Err(e) => {
                    error!(id, error = %e, "reading current customer failed");
                    return ActionOutcome::Failed(ActionState::failed(
                        "Database Error: Failed to Update Customer.",
                    ));
                }
            },
        };

        let customer = NewCustomer {
            name: fields.name,
            email: fields.email,
            image_url,
        };
        if let Err(e) = self.storage.update_customer(id, &customer).await {
            error!(id, error = %e, "update customer failed");
            return ActionOutcome::Failed(ActionState::failed(
                "Database Error: Failed to Update Customer.",
            ));
        }
        info!(id, image_url = %customer.image_url, "customer updated");

        self.revalidate_listings().await;
        ActionOutcome::Redirect(CUSTOMERS_ROUTE)
    }

    pub async fn delete_customer(&self, id: &str) -> ActionMessage {
        if let Err(e) = self.storage.delete_customer(id).await {
            error!(id, error = %e, "delete customer failed");
            return ActionMessage {
                ok: false,
                message: "Database Error: Failed to Delete Customer".to_string(),
            };
        }
        info!(id, "customer deleted");

        self.revalidate_listings().await;
        ActionMessage {
            ok: true,
            message: "Deleted Customer".to_string(),
        }
    }

    async fn existing_image_url(&self, id: &str) -> Result<String, DeskError> {
        self.storage
            .fetch_customer_by_id(id)
            .await?
            .map(|c| c.image_url)
            .ok_or_else(|| DeskError::not_found("Customer", id))
    }

    /// Both listings join across entities (invoice totals per customer, customer
    /// names per invoice), so any write drops both. The write already happened;
    /// a dead cache only means a stale page.
    async fn revalidate_listings(&self) {
        for route in [CUSTOMERS_ROUTE, INVOICES_ROUTE] {
            if let Err(e) = self.cache.revalidate_path(route).await {
                error!(route, error = %e, "listing revalidation failed");
            }
        }
    }
}
