//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: reads and single-statement writes for customers and invoices

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Customer, Invoice, InvoiceStatus, NewCustomer, NewInvoice};
pub use schema::SQLITE_INIT;
pub use sqlite::{DeskStorage, SqlitePool, connect};
