//! SQL DDL for initializing the customer and invoice tables.
//! SQLite-first design; ids are UUID v4 strings generated by the application.

/// SQLite schema with:
/// - `customers.image_url` holding the public path of the uploaded image
/// - `invoices.amount` in integer cents
/// - `invoices.status` restricted to `pending` / `paid`
/// - `invoices.customer_id` referencing `customers(id)` (enforced, sqlx turns on `foreign_keys`)
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS customers (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    image_url TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS invoices (
    id TEXT PRIMARY KEY NOT NULL,
    customer_id TEXT NOT NULL REFERENCES customers(id),
    amount INTEGER NOT NULL CHECK (amount > 0),
    status TEXT NOT NULL CHECK (status IN ('pending', 'paid')),
    date TEXT NOT NULL -- YYYY-MM-DD
);

CREATE INDEX IF NOT EXISTS idx_invoices_customer_id ON invoices(customer_id);
"#;
