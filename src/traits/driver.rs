use async_trait::async_trait;

use crate::error::Result;
use crate::types::{RawQueryResult, SqlValue};

/// Executes statements produced by the statement builders.
///
/// Drivers are responsible for:
/// - Connecting to the database
/// - Converting SqlValue arguments to native types
/// - Returning every result value as text, with `None` for NULL
#[async_trait]
pub trait DatabaseDriver: Send + Sync {
    /// Execute a SQL statement with the given arguments.
    /// Arguments bind to PostgreSQL-style placeholders ($1, $2, etc.)
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<RawQueryResult>;

    /// Execute an INSERT / UPDATE / DELETE and return the number of rows affected.
    async fn execute_dml(&self, sql: &str, params: &[SqlValue]) -> Result<u64>;
}
