use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};

use super::{cached_listing, message_response, settle};
use crate::config::CUSTOMERS_ROUTE;
use crate::error::DeskError;
use crate::middleware::CustomerSubmission;
use crate::router::DeskState;
use crate::types::ActionState;
use crate::views::{CustomerFields, FormMode};

/// GET /dashboard/customers
pub async fn list(State(state): State<DeskState>) -> Result<Html<String>, DeskError> {
    cached_listing(&state, CUSTOMERS_ROUTE, async {
        let rows = state.actions.storage().list_customers().await?;
        state.views.customers_page(&rows)
    })
    .await
}

/// GET /dashboard/customers/create
pub async fn create_form(State(state): State<DeskState>) -> Result<Html<String>, DeskError> {
    let html = state.views.customer_form(
        FormMode::Create,
        &CustomerFields::default(),
        &ActionState::default(),
    )?;
    Ok(Html(html))
}

/// POST /dashboard/customers/create
pub async fn create(
    State(state): State<DeskState>,
    CustomerSubmission(form): CustomerSubmission,
) -> Result<Response, DeskError> {
    let outcome = state.actions.create_customer(&form).await;
    match settle(outcome) {
        Ok(redirect) => Ok(redirect),
        Err((status, action_state)) => {
            let html =
                state
                    .views
                    .customer_form(FormMode::Create, &(&form).into(), &action_state)?;
            Ok((status, Html(html)).into_response())
        }
    }
}

/// GET /dashboard/customers/{id}/edit
pub async fn edit_form(
    State(state): State<DeskState>,
    Path(id): Path<String>,
) -> Result<Html<String>, DeskError> {
    let customer = state
        .actions
        .storage()
        .fetch_customer_by_id(&id)
        .await?
        .ok_or_else(|| DeskError::not_found("Customer", &id))?;
    let html = state.views.customer_form(
        FormMode::Edit(&id),
        &(&customer).into(),
        &ActionState::default(),
    )?;
    Ok(Html(html))
}

/// POST /dashboard/customers/{id}/edit
pub async fn update(
    State(state): State<DeskState>,
    Path(id): Path<String>,
    CustomerSubmission(form): CustomerSubmission,
) -> Result<Response, DeskError> {
    let outcome = state.actions.update_customer(&id, &form).await;
    match settle(outcome) {
        Ok(redirect) => Ok(redirect),
        Err((status, action_state)) => {
            // submitted values, with the preview of the image still on record
            let mut fields = CustomerFields::from(&form);
            fields.image_url = state
                .actions
                .storage()
                .fetch_customer_by_id(&id)
                .await
                .ok()
                .flatten()
                .map(|c| c.image_url);
            let html = state
                .views
                .customer_form(FormMode::Edit(&id), &fields, &action_state)?;
            Ok((status, Html(html)).into_response())
        }
    }
}

/// POST /dashboard/customers/{id}/delete
pub async fn delete(State(state): State<DeskState>, Path(id): Path<String>) -> Response {
    message_response(state.actions.delete_customer(&id).await)
}
