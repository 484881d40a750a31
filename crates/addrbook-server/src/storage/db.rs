//! SQLite database layer (embedded, no external dependencies)

use crate::storage::search::{CustomerQuery, CUSTOMER_COLUMNS};
use addrbook_types::{
    Address, AddressUpdate, Customer, CustomerSearch, CustomerSummary, CustomerUpdate,
    NewCustomer,
};
use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const ADDRESS_COLUMNS: &str = "AddressID AS id, CustomerID AS customer_id, \
     AddressLine AS address_line, City AS city, State AS state, PinCode AS pin_code";

/// Store client. Owns the connection pool for the lifetime of the process.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let shown = redact_url(database_url);
        tracing::info!("Opening SQLite database at: {}", shown);

        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {}", shown))?
            .create_if_missing(true)
            .foreign_keys(true);

        // Create parent directory if needed
        if let Some(parent) = database_file(database_url)
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
        {
            tracing::info!("Creating parent directory: {}", parent.display());
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to SQLite database at: {}", shown))?;

        tracing::info!("SQLite connection established, creating tables...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to initialize tables")?;

        tracing::info!("Tables initialized");

        Ok(Self { pool })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS Customers (
                CustomerID TEXT PRIMARY KEY NOT NULL,
                FirstName TEXT NOT NULL,
                LastName TEXT NOT NULL,
                PhoneNumber TEXT NOT NULL,
                City TEXT NOT NULL,
                State TEXT NOT NULL,
                PinCode TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS Addresses (
                AddressID TEXT PRIMARY KEY NOT NULL,
                CustomerID TEXT REFERENCES Customers(CustomerID),
                AddressLine TEXT NOT NULL,
                City TEXT NOT NULL,
                State TEXT NOT NULL,
                PinCode TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Round-trips a trivial statement; used by the health check.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    /// Waits for checked-out connections to return, then closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // Customer operations
    pub async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer> {
        let id = uuid::Uuid::new_v4().to_string();

        let row: CustomerRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO Customers (CustomerID, FirstName, LastName, PhoneNumber, City, State, PinCode)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING {}
            "#,
            CUSTOMER_COLUMNS
        ))
        .bind(&id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.phone_number)
        .bind(&customer.city)
        .bind(&customer.state)
        .bind(&customer.pin_code)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    pub async fn get_customer(&self, id: &str) -> Result<Option<Customer>> {
        let row: Option<CustomerRow> = sqlx::query_as(&format!(
            "SELECT {} FROM Customers WHERE CustomerID = ?1",
            CUSTOMER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into()))
    }

    /// Updates the name and phone columns. `None` when no row has this id.
    pub async fn update_customer(
        &self,
        id: &str,
        update: &CustomerUpdate,
    ) -> Result<Option<Customer>> {
        let row: Option<CustomerRow> = sqlx::query_as(&format!(
            r#"
            UPDATE Customers SET FirstName = ?1, LastName = ?2, PhoneNumber = ?3
            WHERE CustomerID = ?4
            RETURNING {}
            "#,
            CUSTOMER_COLUMNS
        ))
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.phone_number)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into()))
    }

    /// Returns the number of rows removed. Addresses are not cascaded; a
    /// customer that still owns addresses fails the foreign-key check.
    pub async fn delete_customer(&self, id: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM Customers WHERE CustomerID = ?1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn search_customers(&self, search: &CustomerSearch) -> Result<Vec<Customer>> {
        let query = CustomerQuery::search(search);
        tracing::debug!("Searching customers: {}", query.sql());

        let mut statement = sqlx::query_as::<_, CustomerRow>(query.sql());
        for param in query.params() {
            statement = statement.bind(param);
        }

        let rows = statement.fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Customers owning exactly one address. The left join keeps customers
    /// with no addresses in the grouping with a count of zero.
    pub async fn customers_with_one_address(&self) -> Result<Vec<CustomerSummary>> {
        let rows: Vec<CustomerSummaryRow> = sqlx::query_as(
            r#"
            SELECT c.CustomerID AS id, c.FirstName AS first_name, c.LastName AS last_name
            FROM Customers c
            LEFT JOIN Addresses a ON c.CustomerID = a.CustomerID
            GROUP BY c.CustomerID, c.FirstName, c.LastName
            HAVING COUNT(a.AddressID) = 1
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    // Address operations
    pub async fn list_addresses(&self, customer_id: &str) -> Result<Vec<Address>> {
        let rows: Vec<AddressRow> = sqlx::query_as(&format!(
            "SELECT {} FROM Addresses WHERE CustomerID = ?1",
            ADDRESS_COLUMNS
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// `None` when no row has this id.
    pub async fn update_address(
        &self,
        id: &str,
        update: &AddressUpdate,
    ) -> Result<Option<Address>> {
        let row: Option<AddressRow> = sqlx::query_as(&format!(
            r#"
            UPDATE Addresses SET AddressLine = ?1, City = ?2, State = ?3, PinCode = ?4
            WHERE AddressID = ?5
            RETURNING {}
            "#,
            ADDRESS_COLUMNS
        ))
        .bind(&update.address_line)
        .bind(&update.city)
        .bind(&update.state)
        .bind(&update.pin_code)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into()))
    }

    /// Seeds an address row. The HTTP surface has no address-create route.
    #[cfg(test)]
    pub async fn insert_address(
        &self,
        customer_id: Option<&str>,
        address_line: &str,
        city: &str,
        state: &str,
        pin_code: &str,
    ) -> Result<Address> {
        let id = uuid::Uuid::new_v4().to_string();

        let row: AddressRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO Addresses (AddressID, CustomerID, AddressLine, City, State, PinCode)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING {}
            "#,
            ADDRESS_COLUMNS
        ))
        .bind(&id)
        .bind(customer_id)
        .bind(address_line)
        .bind(city)
        .bind(state)
        .bind(pin_code)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }
}

/// Connection string safe for logs: any `user:password@` part is masked.
pub(crate) fn redact_url(database_url: &str) -> String {
    let Some((scheme, rest)) = database_url.split_once("://") else {
        return database_url.to_string();
    };
    let authority_end = rest.find('/').unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{}://***{}", scheme, &rest[at..]),
        None => database_url.to_string(),
    }
}

/// On-disk location named by a `sqlite:` URL; `None` for in-memory databases.
fn database_file(database_url: &str) -> Option<PathBuf> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);

    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }
    Some(PathBuf::from(path))
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: String,
    first_name: String,
    last_name: String,
    phone_number: String,
    city: String,
    state: String,
    pin_code: String,
}

impl From<CustomerRow> for Customer {
    fn from(r: CustomerRow) -> Self {
        Customer {
            id: r.id,
            first_name: r.first_name,
            last_name: r.last_name,
            phone_number: r.phone_number,
            city: r.city,
            state: r.state,
            pin_code: r.pin_code,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CustomerSummaryRow {
    id: String,
    first_name: String,
    last_name: String,
}

impl From<CustomerSummaryRow> for CustomerSummary {
    fn from(r: CustomerSummaryRow) -> Self {
        CustomerSummary {
            id: r.id,
            first_name: r.first_name,
            last_name: r.last_name,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AddressRow {
    id: String,
    customer_id: Option<String>,
    address_line: String,
    city: String,
    state: String,
    pin_code: String,
}

impl From<AddressRow> for Address {
    fn from(r: AddressRow) -> Self {
        Address {
            id: r.id,
            customer_id: r.customer_id,
            address_line: r.address_line,
            city: r.city,
            state: r.state,
            pin_code: r.pin_code,
        }
    }
}
