use std::{future::Future, ops::Deref, time::Duration};

use sqlx::{
    postgres::{PgConnectOptions, PgRow},
    FromRow, PgPool,
};
use thiserror::Error;
use tracing::warn;

/// SQLSTATE raised by Postgres for a unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE raised by Postgres for a foreign key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Failures surfaced by the data access layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A unique constraint rejected the write. Contains the constraint name if
    /// Postgres reported one.
    #[error("unique constraint violated: {0}")]
    Conflict(String),

    /// A foreign key points at a row that does not exist.
    #[error("referenced row does not exist: {0}")]
    MissingReference(String),

    /// The statement did not complete before the configured deadline.
    #[error("database call exceeded its deadline")]
    Timeout,

    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StorageError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_error) = &error {
            let constraint = db_error.constraint().unwrap_or_default().to_owned();

            match db_error.code().as_deref() {
                Some(UNIQUE_VIOLATION) => return Self::Conflict(constraint),
                Some(FOREIGN_KEY_VIOLATION) => return Self::MissingReference(constraint),
                _ => (),
            }
        }

        Self::Database(error)
    }
}

/// Where to find the application database.
#[derive(Clone, Debug)]
pub struct DatabaseOptions {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
}

impl DatabaseOptions {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}

/// A handle to the process-wide connection pool.
///
/// Every repository call made through [`PostgresConnection::within_deadline`]
/// is bounded by the configured query timeout.
#[derive(Clone)]
pub struct PostgresConnection {
    pool: PgPool,
    query_timeout: Duration,
}

impl PostgresConnection {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// Run a database future, failing with [`StorageError::Timeout`] if it
    /// does not resolve in time.
    pub async fn within_deadline<T, F>(&self, query: F) -> Result<T, StorageError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(result) => result.map_err(StorageError::from),
            Err(_) => {
                warn!(timeout = ?self.query_timeout, "Database call timed out.");

                Err(StorageError::Timeout)
            }
        }
    }
}

impl Deref for PostgresConnection {
    type Target = PgPool;

    fn deref(&self) -> &Self::Target {
        &self.pool
    }
}

/// Decode a set of rows, skipping any row that cannot be mapped.
///
/// A malformed row never aborts the whole listing. Each skipped row is logged
/// so the bad data can be found.
pub fn decode_rows<T>(rows: &[PgRow]) -> Vec<T>
where
    T: for<'r> FromRow<'r, PgRow>,
{
    keep_decoded(rows.iter().map(T::from_row))
}

fn keep_decoded<T>(results: impl IntoIterator<Item = Result<T, sqlx::Error>>) -> Vec<T> {
    results
        .into_iter()
        .filter_map(|result| match result {
            Ok(decoded) => Some(decoded),
            Err(error) => {
                warn!(
                    ?error,
                    model = std::any::type_name::<T>(),
                    "Skipping row that failed to decode."
                );

                None
            }
        })
        .collect()
}
