pub mod customers;
pub mod invoices;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use crate::error::DeskError;
use crate::router::DeskState;
use crate::service::ActionOutcome;
use crate::service::actions::ActionMessage;
use crate::types::ActionState;

/// Serve the cached rendering of a listing route; `render` is only awaited on a miss.
async fn cached_listing(
    state: &DeskState,
    route: &'static str,
    render: impl Future<Output = Result<String, DeskError>>,
) -> Result<Html<String>, DeskError> {
    let cache = state.actions.cache();
    let page = cache.get(route).await?;
    if let Some(html) = page.html {
        return Ok(Html(html.to_string()));
    }

    let html = render.await?;
    cache.put(route, page.generation, Arc::from(html.as_str()));
    Ok(Html(html))
}

/// Redirect on success; otherwise the status and state to re-render the form with.
fn settle(outcome: ActionOutcome) -> Result<Response, (StatusCode, ActionState)> {
    match outcome {
        ActionOutcome::Redirect(route) => Ok(Redirect::to(route).into_response()),
        ActionOutcome::Invalid(state) => Err((StatusCode::UNPROCESSABLE_ENTITY, state)),
        ActionOutcome::Failed(state) => Err((StatusCode::INTERNAL_SERVER_ERROR, state)),
    }
}

fn message_response(msg: ActionMessage) -> Response {
    let status = if msg.ok {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, axum::Json(msg)).into_response()
}

pub async fn index() -> Redirect {
    Redirect::to(crate::config::INVOICES_ROUTE)
}
