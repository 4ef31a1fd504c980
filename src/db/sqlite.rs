use crate::db::models::{
    Customer, CustomerChoice, CustomerListRow, Invoice, InvoiceListRow, NewCustomer, NewInvoice,
};
use crate::db::schema::SQLITE_INIT;
use crate::error::DeskError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

pub type SqlitePool = Pool<Sqlite>;

/// Open (creating if needed) the database at `database_url` and apply the schema.
pub async fn connect(database_url: &str) -> Result<DeskStorage, DeskError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
    let storage = DeskStorage::new(pool);
    storage.init_schema().await?;
    info!(database_url, "database ready");
    Ok(storage)
}

#[derive(Clone)]
pub struct DeskStorage {
    pool: SqlitePool,
}

impl DeskStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), DeskError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    // --- customers ---

    /// Insert a customer row. Returns the generated id.
    pub async fn insert_customer(&self, customer: &NewCustomer) -> Result<String, DeskError> {
        let id = Uuid::new_v4().to_string();
        sqlx::query("INSERT INTO customers (id, name, email, image_url) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(&customer.image_url)
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    pub async fn update_customer(&self, id: &str, customer: &NewCustomer) -> Result<(), DeskError> {
        let result =
            sqlx::query("UPDATE customers SET name = ?, email = ?, image_url = ? WHERE id = ?")
                .bind(&customer.name)
                .bind(&customer.email)
                .bind(&customer.image_url)
                .bind(id)
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(DeskError::not_found("Customer", id));
        }
        Ok(())
    }

    pub async fn delete_customer(&self, id: &str) -> Result<(), DeskError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DeskError::not_found("Customer", id));
        }
        Ok(())
    }

    pub async fn fetch_customer_by_id(&self, id: &str) -> Result<Option<Customer>, DeskError> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, name, email, image_url FROM customers WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(customer)
    }

    /// All customers with invoice totals, ordered by name.
    pub async fn list_customers(&self) -> Result<Vec<CustomerListRow>, DeskError> {
        let rows = sqlx::query_as::<_, CustomerListRow>(
            r#"SELECT c.id, c.name, c.email, c.image_url,
                   COUNT(i.id) AS total_invoices,
                   COALESCE(SUM(CASE WHEN i.status = 'pending' THEN i.amount ELSE 0 END), 0) AS total_pending,
                   COALESCE(SUM(CASE WHEN i.status = 'paid' THEN i.amount ELSE 0 END), 0) AS total_paid
               FROM customers c
               LEFT JOIN invoices i ON i.customer_id = c.id
               GROUP BY c.id, c.name, c.email, c.image_url
               ORDER BY c.name ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn customer_choices(&self) -> Result<Vec<CustomerChoice>, DeskError> {
        let rows =
            sqlx::query_as::<_, CustomerChoice>("SELECT id, name FROM customers ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    // --- invoices ---

    /// Insert an invoice row dated `date` (`YYYY-MM-DD`). Returns the generated id.
    pub async fn insert_invoice(&self, invoice: &NewInvoice, date: &str) -> Result<String, DeskError> {
        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO invoices (id, customer_id, amount, status, date) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&invoice.customer_id)
        .bind(invoice.amount)
        .bind(invoice.status)
        .bind(date)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    /// Update customer, amount and status; the creation date is left as is.
    pub async fn update_invoice(&self, id: &str, invoice: &NewInvoice) -> Result<(), DeskError> {
        let result = sqlx::query(
            "UPDATE invoices SET customer_id = ?, amount = ?, status = ? WHERE id = ?",
        )
        .bind(&invoice.customer_id)
        .bind(invoice.amount)
        .bind(invoice.status)
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(DeskError::not_found("Invoice", id));
        }
        Ok(())
    }

    pub async fn delete_invoice(&self, id: &str) -> Result<(), DeskError> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DeskError::not_found("Invoice", id));
        }
        Ok(())
    }

    pub async fn fetch_invoice_by_id(&self, id: &str) -> Result<Option<Invoice>, DeskError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            "SELECT id, customer_id, amount, status, date FROM invoices WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(invoice)
    }

    /// All invoices joined with their customer, newest first.
    pub async fn list_invoices(&self) -> Result<Vec<InvoiceListRow>, DeskError> {
        let rows = sqlx::query_as::<_, InvoiceListRow>(
            r#"SELECT i.id, i.amount, i.status, i.date, c.name, c.email, c.image_url
               FROM invoices i
               JOIN customers c ON c.id = i.customer_id
               ORDER BY i.date DESC, c.name ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
