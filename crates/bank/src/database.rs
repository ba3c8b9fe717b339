use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlPoolOptions};
use sqlx::{MySql, MySqlPool, Transaction};
use tracing::info;

use crate::config::ConnectionSettings;
use crate::errors::AppError;
use crate::models::{Credential, Customer, CustomerId};

const CREATE_CUSTOMERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS Customers (
        CustomerID varchar(255) NOT NULL,
        FirstName varchar(255),
        LastName varchar(255),
        Balance int,
        OverdraftBalance int,
        PRIMARY KEY (CustomerID)
    )
"#;

const CREATE_PASSWORDS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS Passwords (
        CustomerID varchar(255) NOT NULL,
        Password varchar(255),
        PRIMARY KEY (CustomerID),
        FOREIGN KEY (CustomerID) REFERENCES Customers (CustomerID)
    )
"#;

const CREATE_OVERDRAFT_LOGS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS OverdraftLogs (
        CustomerID varchar(255),
        Timestamp DATETIME,
        DepositAmt int,
        OldOverBalance int,
        NewOverBalance int
    )
"#;

/// MySQL's limit on database name length.
const MAX_DATABASE_NAME_LEN: usize = 64;

/// Handle to the bank's MySQL server.
///
/// Holds exactly one connection for its whole lifetime. The connection is
/// released by [`Database::close`], or when the handle is dropped.
pub struct Database {
    pool: MySqlPool,
}

impl Database {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Connects with the bank database selected.
    pub async fn connect(settings: &ConnectionSettings) -> Result<Self, AppError> {
        info!(
            "Connecting to {}@{}:{}/{}",
            settings.user, settings.host, settings.port, settings.database
        );
        Self::connect_with(settings.database_options()).await
    }

    /// Connects to the server without selecting a database.
    pub async fn connect_server(settings: &ConnectionSettings) -> Result<Self, AppError> {
        info!("Connecting to {}@{}:{}", settings.user, settings.host, settings.port);
        Self::connect_with(settings.server_options()).await
    }

    /// Connects with explicit options, e.g. parsed from a `mysql://` URL.
    pub async fn connect_with(options: MySqlConnectOptions) -> Result<Self, AppError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Ok(Self::new(pool))
    }

    pub async fn create_database(&self, name: &str) -> Result<(), AppError> {
        let quoted = quote_database_name(name)?;
        sqlx::query(&format!("CREATE DATABASE {quoted}"))
            .execute(&self.pool)
            .await?;

        info!("Created database {name}");
        Ok(())
    }

    /// Drops the database and everything in it. No existence check.
    pub async fn drop_database(&self, name: &str) -> Result<(), AppError> {
        let quoted = quote_database_name(name)?;
        sqlx::query(&format!("DROP DATABASE {quoted}"))
            .execute(&self.pool)
            .await?;

        info!("Dropped database {name}");
        Ok(())
    }

    /// Creates the Customers, Passwords and OverdraftLogs tables if absent.
    pub async fn create_tables(&self) -> Result<(), AppError> {
        // Passwords references Customers, so order matters.
        for ddl in [
            CREATE_CUSTOMERS_TABLE,
            CREATE_PASSWORDS_TABLE,
            CREATE_OVERDRAFT_LOGS_TABLE,
        ] {
            sqlx::query(ddl).execute(&self.pool).await?;
        }

        info!("Bank tables ready");
        Ok(())
    }

    /// Every identifier currently in the Customers table.
    pub async fn customer_ids(&self) -> Result<Vec<CustomerId>, AppError> {
        let ids = sqlx::query_scalar::<_, CustomerId>("SELECT CustomerID FROM Customers")
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    pub async fn get_customer(&self, id: &CustomerId) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as(
            r#"
            SELECT CustomerID, FirstName, LastName, Balance, OverdraftBalance
            FROM Customers
            WHERE CustomerID = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    pub async fn get_credential(&self, id: &CustomerId) -> Result<Option<Credential>, AppError> {
        let credential = sqlx::query_as(
            r#"
            SELECT CustomerID, Password
            FROM Passwords
            WHERE CustomerID = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credential)
    }

    pub async fn count_customers(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM Customers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_credentials(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM Passwords")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Starts a transaction on the handle's connection.
    ///
    /// The connection stays checked out until the transaction is committed or
    /// dropped; dropping without commit rolls back.
    pub async fn begin(&self) -> Result<Transaction<'static, MySql>, AppError> {
        Ok(self.pool.begin().await?)
    }

    pub async fn insert_customer(
        conn: &mut MySqlConnection,
        customer: &Customer,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO Customers (CustomerID, FirstName, LastName, Balance, OverdraftBalance)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(customer.balance)
        .bind(customer.overdraft_balance)
        .execute(conn)
        .await?;

        Ok(())
    }

    pub async fn insert_credential(
        conn: &mut MySqlConnection,
        credential: &Credential,
    ) -> Result<(), AppError> {
        sqlx::query("INSERT INTO Passwords (CustomerID, Password) VALUES (?, ?)")
            .bind(&credential.customer_id)
            .bind(&credential.password)
            .execute(conn)
            .await?;

        Ok(())
    }

    /// Releases the connection.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

/// Validates a database name and wraps it in backticks for use in DDL.
///
/// Database names cannot be bound as parameters, so only plain identifier
/// characters are accepted.
pub fn quote_database_name(name: &str) -> Result<String, AppError> {
    if name.is_empty() || name.len() > MAX_DATABASE_NAME_LEN {
        return Err(AppError::InvalidInput(format!(
            "database name must be 1..={MAX_DATABASE_NAME_LEN} characters, got {}",
            name.len()
        )));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
    {
        return Err(AppError::InvalidInput(format!(
            "database name {name:?} may only contain ASCII letters, digits, '_' and '$'"
        )));
    }

    Ok(format!("`{name}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_plain_name() {
        assert_eq!(quote_database_name("testudo_bank").unwrap(), "`testudo_bank`");
    }

    #[test]
    fn test_reject_injection() {
        let err = quote_database_name("bank`; DROP DATABASE mysql; --").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_reject_empty_and_overlong() {
        assert!(quote_database_name("").is_err());
        assert!(quote_database_name(&"a".repeat(65)).is_err());
        assert!(quote_database_name(&"a".repeat(64)).is_ok());
    }
}
