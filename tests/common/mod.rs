#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use invoice_desk::service::{DeskActions, ImageStore, render_cache};
use invoice_desk::views::Views;
use invoice_desk::{DeskState, desk_router};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

pub const BOUNDARY: &str = "desk-test-boundary";

pub struct TestApp {
    pub app: Router,
    pub state: DeskState,
    pub root: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

impl TestApp {
    pub async fn spawn(tag: &str, body_limit: usize) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let root = std::env::temp_dir().join(format!(
            "invoice-desk-{tag}-{}-{nanos}",
            std::process::id()
        ));
        std::fs::create_dir_all(&root).expect("create temp root");

        let database_url = format!("sqlite:{}", root.join("desk.sqlite").display());
        let storage = invoice_desk::db::connect(&database_url)
            .await
            .expect("open sqlite");
        let images = ImageStore::new(root.join("public").join("customers"));
        let cache = render_cache::spawn().await.expect("spawn render cache");
        let actions = DeskActions::new(storage, images, cache);
        let state = DeskState::new(actions, Views::new().expect("templates"), body_limit);
        let app = desk_router(state.clone());

        Self { app, state, root }
    }

    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(req).await.expect("request failed")
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/x-www-form-urlencoded")
                .header("content-length", body.len())
                .body(Body::from(body.to_string()))
                .expect("failed to build request"),
        )
        .await
    }

    pub async fn post_multipart(&self, uri: &str, body: Vec<u8>) -> Response<Body> {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .header("content-length", body.len())
                .body(Body::from(body))
                .expect("failed to build request"),
        )
        .await
    }

    pub async fn count(&self, table: &str) -> i64 {
        let row: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(self.state.actions.storage().pool())
            .await
            .expect("count rows");
        row.0
    }

    /// Creates a customer through the form and returns its id.
    pub async fn seed_customer(&self, name: &str, email: &str, file_name: &str) -> String {
        let body = customer_body(
            &[("name_customer", name), ("email", email)],
            Some((file_name, b"fake image bytes")),
        );
        let resp = self
            .post_multipart("/dashboard/customers/create", body)
            .await;
        assert_eq!(resp.status(), 303, "seeding customer {email}");
        let row: (String,) = sqlx::query_as("SELECT id FROM customers WHERE email = ?")
            .bind(email)
            .fetch_one(self.state.actions.storage().pool())
            .await
            .expect("seeded customer");
        row.0
    }
}

/// Multipart body with text fields and an optional `file` part.
pub fn customer_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn body_string(resp: Response<Body>) -> String {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(body.to_vec()).expect("response body was not utf-8")
}
