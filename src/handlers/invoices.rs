use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use super::{cached_listing, message_response, settle};
use crate::config::INVOICES_ROUTE;
use crate::error::DeskError;
use crate::router::DeskState;
use crate::types::{ActionState, InvoiceForm};
use crate::views::{FormMode, InvoiceFields};

/// GET /dashboard/invoices
pub async fn list(State(state): State<DeskState>) -> Result<Html<String>, DeskError> {
    cached_listing(&state, INVOICES_ROUTE, async {
        let rows = state.actions.storage().list_invoices().await?;
        state.views.invoices_page(&rows)
    })
    .await
}

/// GET /dashboard/invoices/create
pub async fn create_form(State(state): State<DeskState>) -> Result<Html<String>, DeskError> {
    let customers = state.actions.storage().customer_choices().await?;
    let html = state.views.invoice_form(
        FormMode::Create,
        &customers,
        &InvoiceFields::default(),
        &ActionState::default(),
    )?;
    Ok(Html(html))
}

/// POST /dashboard/invoices/create
pub async fn create(
    State(state): State<DeskState>,
    Form(form): Form<InvoiceForm>,
) -> Result<Response, DeskError> {
    let outcome = state.actions.create_invoice(&form).await;
    match settle(outcome) {
        Ok(redirect) => Ok(redirect),
        Err((status, action_state)) => {
            rerender(&state, FormMode::Create, &form, status, &action_state).await
        }
    }
}

/// GET /dashboard/invoices/{id}/edit
pub async fn edit_form(
    State(state): State<DeskState>,
    Path(id): Path<String>,
) -> Result<Html<String>, DeskError> {
    let storage = state.actions.storage();
    let invoice = storage
        .fetch_invoice_by_id(&id)
        .await?
        .ok_or_else(|| DeskError::not_found("Invoice", &id))?;
    let customers = storage.customer_choices().await?;
    let html = state.views.invoice_form(
        FormMode::Edit(&id),
        &customers,
        &(&invoice).into(),
        &ActionState::default(),
    )?;
    Ok(Html(html))
}

/// POST /dashboard/invoices/{id}/edit
pub async fn update(
    State(state): State<DeskState>,
    Path(id): Path<String>,
    Form(form): Form<InvoiceForm>,
) -> Result<Response, DeskError> {
    let outcome = state.actions.update_invoice(&id, &form).await;
    match settle(outcome) {
        Ok(redirect) => Ok(redirect),
        Err((status, action_state)) => {
            rerender(&state, FormMode::Edit(&id), &form, status, &action_state).await
        }
    }
}

/// POST /dashboard/invoices/{id}/delete
pub async fn delete(State(state): State<DeskState>, Path(id): Path<String>) -> Response {
    message_response(state.actions.delete_invoice(&id).await)
}

async fn rerender(
    state: &DeskState,
    mode: FormMode<'_>,
    form: &InvoiceForm,
    status: StatusCode,
    action_state: &ActionState,
) -> Result<Response, DeskError> {
    let customers = state.actions.storage().customer_choices().await?;
    let html = state
        .views
        .invoice_form(mode, &customers, &form.into(), action_state)?;
    Ok((status, Html(html)).into_response())
}
