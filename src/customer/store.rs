//! SQLite-backed record store for customers.
//!
//! Every write runs inside its own transaction. An early return drops the
//! uncommitted transaction, which rolls it back; a refused write surfaces as
//! [`CustomerError::Rejected`]; a failing pool or read surfaces as
//! [`CustomerError::Database`].

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::error::ErrorKind;
use sqlx::{QueryBuilder, Sqlite};
use tracing::{debug, error, info};

use super::errors::CustomerError;
use super::filter::CustomerFilter;
use super::model::{Customer, CustomerData};

const COLUMNS: &str = "id, first_name, last_name, email, phone_number, address, suspended";

/// Cloneable handle to the customer table.
#[derive(Clone, Debug)]
pub struct CustomerStore {
    pool: SqlitePool,
}

impl CustomerStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool for `url`.
    ///
    /// An in-memory database lives only as long as its connection, so
    /// `:memory:` URLs get exactly one connection that is never recycled.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let options: SqliteConnectOptions = url.parse()?;
        let pool = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(max_connections)
                .connect_with(options)
                .await?
        };
        info!(url, "connected to customer database");
        Ok(Self::new(pool))
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }

    /// Inserts a new, active customer and returns it with its assigned id.
    pub async fn create(&self, data: &CustomerData) -> Result<Customer, CustomerError> {
        info!("Creating {} {}", data.first_name, data.last_name);
        let mut tx = self.pool.begin().await?;

        let customer = sqlx::query_as::<_, Customer>(&format!(
            "INSERT INTO customers (first_name, last_name, email, phone_number, address, suspended) \
             VALUES (?, ?, ?, ?, ?, FALSE) RETURNING {COLUMNS}"
        ))
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.phone_number)
        .bind(&data.address)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| rejected("creating", e))?;

        tx.commit().await.map_err(|e| rejected("creating", e))?;
        Ok(customer)
    }

    pub async fn find(&self, id: i64) -> Result<Option<Customer>, CustomerError> {
        debug!("Processing lookup for id {id} ...");
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {COLUMNS} FROM customers WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(customer)
    }

    /// Replaces the editable fields of customer `id`. `suspended` changes only
    /// when `data` carries it. Returns `None` if no such customer exists.
    pub async fn update(&self, id: i64, data: &CustomerData) -> Result<Option<Customer>, CustomerError> {
        info!("Updating {} {}", data.first_name, data.last_name);
        let mut tx = self.pool.begin().await?;

        let customer = sqlx::query_as::<_, Customer>(&format!(
            "UPDATE customers SET first_name = ?, last_name = ?, email = ?, phone_number = ?, \
             address = ?, suspended = COALESCE(?, suspended) WHERE id = ? RETURNING {COLUMNS}"
        ))
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.phone_number)
        .bind(&data.address)
        .bind(data.suspended)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| rejected("updating", e))?;

        tx.commit().await.map_err(|e| rejected("updating", e))?;
        Ok(customer)
    }

    /// Flips only the `suspended` flag. Setting the current value again is a
    /// no-op that still returns the record.
    pub async fn set_suspended(&self, id: i64, suspended: bool) -> Result<Option<Customer>, CustomerError> {
        debug!(id, suspended, "setting suspended flag");
        let mut tx = self.pool.begin().await?;

        let customer = sqlx::query_as::<_, Customer>(&format!(
            "UPDATE customers SET suspended = ? WHERE id = ? RETURNING {COLUMNS}"
        ))
        .bind(suspended)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| rejected("updating", e))?;

        tx.commit().await.map_err(|e| rejected("updating", e))?;
        Ok(customer)
    }

    /// Removes customer `id`. Returns whether a row existed.
    pub async fn delete(&self, id: i64) -> Result<bool, CustomerError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| rejected("deleting", e))?;

        tx.commit().await.map_err(|e| rejected("deleting", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Every customer matching `filter`, ordered by id.
    ///
    /// SQL narrows by the exact-match columns; the case-insensitive
    /// predicates are applied to the fetched rows.
    pub async fn list(&self, filter: &CustomerFilter) -> Result<Vec<Customer>, CustomerError> {
        let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM customers"));
        filter.push_where(&mut query);
        query.push(" ORDER BY id");

        let mut customers = query.build_query_as::<Customer>().fetch_all(&self.pool).await?;
        customers.retain(|customer| filter.matches(customer));
        debug!(count = customers.len(), "listed customers");
        Ok(customers)
    }

    #[cfg(test)]
    pub(crate) async fn all(&self) -> Result<Vec<Customer>, CustomerError> {
        self.list(&CustomerFilter::default()).await
    }
}

fn rejected(action: &str, e: sqlx::Error) -> CustomerError {
    error!("Error {action} record: {e}");
    let reason = match e.as_database_error().map(|db| db.kind()) {
        Some(ErrorKind::CheckViolation) => "field exceeds maximum length",
        Some(ErrorKind::NotNullViolation) => "required field is missing",
        Some(ErrorKind::UniqueViolation) => "record conflicts with an existing customer",
        _ => "record could not be saved",
    };
    CustomerError::Rejected { reason, source: e }
}
