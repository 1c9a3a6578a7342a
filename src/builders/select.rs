use std::sync::Arc;

use super::statement::{build_where, order_by};
use crate::clauses::Where;
use crate::error::{OrmError, Result};
use crate::mapper::DataMapper;
use crate::traits::DatabaseDriver;
use crate::types::{QueryResult, SqlValue};

/// Entry point for building a SELECT query from data mappers.
/// Must call `.columns()` to proceed.
pub struct Select {
    driver: Arc<dyn DatabaseDriver>,
}

impl Select {
    pub(crate) fn new(driver: Arc<dyn DatabaseDriver>) -> Self {
        Self { driver }
    }

    /// Select the mapped columns of `mapper`.
    pub fn columns<T>(self, mapper: &DataMapper<T>) -> SelectWithColumns {
        SelectWithColumns {
            driver: self.driver,
            columns: Vec::new(),
        }
        .columns(mapper)
    }
}

/// SELECT builder after columns have been specified.
/// Must call `.from()` to proceed.
pub struct SelectWithColumns {
    driver: Arc<dyn DatabaseDriver>,
    columns: Vec<String>,
}

impl SelectWithColumns {
    /// Append the mapped columns of another mapper, for joined rows.
    ///
    /// Scan the resulting rows with the slots of the same mappers, in the
    /// same order.
    pub fn columns<T>(mut self, mapper: &DataMapper<T>) -> Self {
        let columns = mapper.columns();
        if !columns.is_empty() {
            self.columns.push(columns);
        }
        self
    }

    pub fn from<T>(self, mapper: &DataMapper<T>) -> SelectWithTable {
        SelectWithTable {
            driver: self.driver,
            columns: self.columns,
            table: mapper.select_name(),
            joins: Vec::new(),
            wheres: Vec::new(),
            order: Vec::new(),
            limit: None,
        }
    }
}

/// SELECT builder after the table has been specified.
pub struct SelectWithTable {
    driver: Arc<dyn DatabaseDriver>,
    columns: Vec<String>,
    table: String,
    joins: Vec<String>,
    wheres: Vec<Where>,
    order: Vec<String>,
    limit: Option<u64>,
}

impl SelectWithTable {
    /// `JOIN <table> <alias> ON (<on>)`
    pub fn join<T>(mut self, mapper: &DataMapper<T>, on: &str) -> Self {
        self.joins.push(format!("JOIN {} ON ({})", mapper.select_name(), on));
        self
    }

    /// Add a predicate; predicates are combined with AND.
    pub fn where_(mut self, clause: Where) -> Self {
        self.wheres.push(clause);
        self
    }

    pub fn order_by(mut self, column: impl Into<String>) -> Self {
        self.order.push(column.into());
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Build the SQL statement and its arguments.
    ///
    /// Fails with [`OrmError::EmptySelect`] when none of the mappers passed
    /// to `.columns()` maps a column.
    pub fn build_sql(&self) -> Result<(String, Vec<SqlValue>)> {
        if self.columns.is_empty() {
            return Err(OrmError::EmptySelect {
                table: self.table.clone(),
            });
        }

        let mut sql = format!("SELECT {} FROM {}", self.columns.join(", "), self.table);
        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }

        let (sql, params) = if self.wheres.is_empty() {
            (sql, Vec::new())
        } else {
            build_where(&sql, &self.wheres, Vec::new())
        };

        let order: Vec<&str> = self.order.iter().map(String::as_str).collect();
        let mut sql = order_by(&sql, &order);

        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ");
            sql.push_str(&limit.to_string());
        }

        Ok((sql, params))
    }

    pub async fn execute(self) -> Result<QueryResult> {
        let (sql, params) = self.build_sql()?;
        let raw = self.driver.execute(&sql, &params).await?;
        Ok(QueryResult::from_raw(raw))
    }
}
