use std::sync::Arc;

use crate::builders::Select;
use crate::error::Result;
use crate::traits::DatabaseDriver;
use crate::types::{QueryResult, Row, SqlValue};

/// Runs statements against the client's driver.
pub struct Querier {
    driver: Arc<dyn DatabaseDriver>,
}

impl Querier {
    pub(crate) fn new(driver: Arc<dyn DatabaseDriver>) -> Self {
        Self { driver }
    }

    /// Start building a SELECT from data mappers.
    pub fn select(&self) -> Select {
        Select::new(Arc::clone(&self.driver))
    }

    /// Execute a statement, typically the `(sql, args)` pair returned by
    /// the statement builders.
    pub async fn query(&self, sql: &str, args: &[SqlValue]) -> Result<QueryResult> {
        let raw = self.driver.execute(sql, args).await?;
        Ok(QueryResult::from_raw(raw))
    }

    /// Execute an INSERT / UPDATE / DELETE, returning the rows affected.
    pub async fn execute(&self, sql: &str, args: &[SqlValue]) -> Result<u64> {
        self.driver.execute_dml(sql, args).await
    }

    /// Execute a statement that must return exactly one row.
    pub async fn query_one(&self, sql: &str, args: &[SqlValue]) -> Result<Row> {
        self.query(sql, args).await?.single_row()
    }
}
