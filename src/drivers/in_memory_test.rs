use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::DatabaseDriver;
use crate::types::{RawQueryResult, SqlValue};

/// A statement seen by the [`InMemoryTestDriver`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedStatement {
    pub sql: String,
    pub args: Vec<SqlValue>,
}

/// An in-memory driver for testing statement building and row scanning.
///
/// Records every statement it is asked to execute and answers with
/// queued responses in FIFO order, falling back to a default response.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use pgrs_orm::drivers::{InMemoryTestDriver, InMemoryTestResponseBuilder};
///
/// let driver = Arc::new(
///     InMemoryTestDriver::new().with_response(
///         InMemoryTestResponseBuilder::new()
///             .columns(&["id", "name"])
///             .row(&["1", "john appleseed"])
///             .build(),
///     ),
/// );
/// ```
pub struct InMemoryTestDriver {
    responses: Mutex<VecDeque<RawQueryResult>>,
    statements: Mutex<Vec<RecordedStatement>>,
    rows_affected: Mutex<VecDeque<u64>>,
    default_response: RawQueryResult,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryTestDriver {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            statements: Mutex::new(Vec::new()),
            rows_affected: Mutex::new(VecDeque::new()),
            default_response: RawQueryResult::empty(),
        }
    }

    /// Queue a response for the next statement.
    pub fn with_response(self, response: RawQueryResult) -> Self {
        lock(&self.responses).push_back(response);
        self
    }

    /// Queue several responses, returned in order.
    pub fn with_responses(self, responses: impl IntoIterator<Item = RawQueryResult>) -> Self {
        lock(&self.responses).extend(responses);
        self
    }

    /// Queue a rows-affected count for the next DML statement.
    /// DML statements report 0 once the queue is drained.
    pub fn with_rows_affected(self, count: u64) -> Self {
        lock(&self.rows_affected).push_back(count);
        self
    }

    /// Response used once the queue is drained.
    pub fn with_default_response(mut self, response: RawQueryResult) -> Self {
        self.default_response = response;
        self
    }

    pub fn statements(&self) -> Vec<RecordedStatement> {
        lock(&self.statements).clone()
    }

    pub fn last_statement(&self) -> Option<RecordedStatement> {
        lock(&self.statements).last().cloned()
    }

    pub fn clear_statements(&self) {
        lock(&self.statements).clear();
    }

    /// Assert that the last statement matches the expected SQL and arguments.
    pub fn assert_last_statement(&self, expected_sql: &str, expected_args: &[SqlValue]) {
        let last = self.last_statement().expect("no statements were executed");
        assert_eq!(
            last.sql, expected_sql,
            "SQL mismatch.\nExpected: {}\nActual: {}",
            expected_sql, last.sql
        );
        assert_eq!(
            last.args, expected_args,
            "Argument mismatch.\nExpected: {:?}\nActual: {:?}",
            expected_args, last.args
        );
    }

    pub fn assert_statement_count(&self, expected: usize) {
        let actual = lock(&self.statements).len();
        assert_eq!(
            actual, expected,
            "Statement count mismatch. Expected: {}, Actual: {}",
            expected, actual
        );
    }

    fn record(&self, sql: &str, params: &[SqlValue]) {
        tracing::debug!(sql, args = params.len(), "recording statement");
        lock(&self.statements).push(RecordedStatement {
            sql: sql.to_string(),
            args: params.to_vec(),
        });
    }
}

impl Default for InMemoryTestDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseDriver for InMemoryTestDriver {
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<RawQueryResult> {
        self.record(sql, params);

        let response = lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| self.default_response.clone());
        Ok(response)
    }

    async fn execute_dml(&self, sql: &str, params: &[SqlValue]) -> Result<u64> {
        self.record(sql, params);
        Ok(lock(&self.rows_affected).pop_front().unwrap_or(0))
    }
}

/// Builds [`RawQueryResult`]s for the test driver.
pub struct InMemoryTestResponseBuilder {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl InMemoryTestResponseBuilder {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.columns = cols.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Add a row with no NULLs.
    pub fn row(mut self, values: &[&str]) -> Self {
        self.rows
            .push(values.iter().map(|s| Some(s.to_string())).collect());
        self
    }

    /// Add a row where `None` is NULL.
    pub fn row_with_nulls(mut self, values: &[Option<&str>]) -> Self {
        self.rows
            .push(values.iter().map(|v| v.map(str::to_string)).collect());
        self
    }

    pub fn build(self) -> RawQueryResult {
        RawQueryResult::new(self.columns, self.rows)
    }
}

impl Default for InMemoryTestResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}
