use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::path::PathBuf;
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer};

use crate::config::{CUSTOMERS_ROUTE, CUSTOMER_IMAGE_DIR, INVOICES_ROUTE};
use crate::handlers::{self, customers, invoices};
use crate::service::DeskActions;
use crate::views::Views;

#[derive(Clone)]
pub struct DeskState {
    pub actions: DeskActions,
    pub views: Views,
    pub body_limit: usize,
}

impl DeskState {
    pub fn new(actions: DeskActions, views: Views, body_limit: usize) -> Self {
        Self {
            actions,
            views,
            body_limit,
        }
    }

    fn image_dir(&self) -> PathBuf {
        self.actions.images().dir().to_path_buf()
    }
}

pub fn desk_router(state: DeskState) -> Router {
    let body_limit = state.body_limit;
    let images = ServeDir::new(state.image_dir());

    let customer_routes = Router::new()
        .route("/", get(customers::list))
        .route("/create", get(customers::create_form).post(customers::create))
        .route("/{id}/edit", get(customers::edit_form).post(customers::update))
        .route("/{id}/delete", post(customers::delete));

    let invoice_routes = Router::new()
        .route("/", get(invoices::list))
        .route("/create", get(invoices::create_form).post(invoices::create))
        .route("/{id}/edit", get(invoices::edit_form).post(invoices::update))
        .route("/{id}/delete", post(invoices::delete));

    Router::new()
        .route("/", get(handlers::index))
        .nest(CUSTOMERS_ROUTE, customer_routes)
        .nest(INVOICES_ROUTE, invoice_routes)
        .nest_service(&format!("/{CUSTOMER_IMAGE_DIR}"), images)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
