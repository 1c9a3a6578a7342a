use async_trait::async_trait;
use bytes::BytesMut;
use tokio_postgres::types::{to_sql_checked, IsNull, ToSql, Type};
use tokio_postgres::{Client, NoTls};

use crate::error::{OrmError, Result};
use crate::traits::DatabaseDriver;
use crate::types::{RawQueryResult, SqlValue};

/// PostgreSQL driver implementation using tokio-postgres.
pub struct TokioPostgresDriver {
    client: Client,
}

impl TokioPostgresDriver {
    /// Connect to a PostgreSQL database.
    pub async fn connect(connection_string: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(connection_string, NoTls)
            .await
            .map_err(|e| OrmError::ConnectionFailed(e.to_string()))?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "postgres connection error");
            }
        });

        Ok(Self { client })
    }
}

#[async_trait]
impl DatabaseDriver for TokioPostgresDriver {
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<RawQueryResult> {
        tracing::debug!(sql, args = params.len(), "executing statement");

        let converted = convert_params(params);
        let param_refs = param_refs(&converted);

        let rows = self
            .client
            .query(sql, &param_refs)
            .await
            .map_err(|e| OrmError::QueryFailed(e.to_string()))?;

        let columns: Vec<String> = rows
            .first()
            .map(|row| row.columns().iter().map(|c| c.name().to_string()).collect())
            .unwrap_or_default();

        let result_rows = rows
            .iter()
            .map(|row| {
                row.columns()
                    .iter()
                    .enumerate()
                    .map(|(i, col)| column_text(row, i, col.type_()))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RawQueryResult::new(columns, result_rows))
    }

    async fn execute_dml(&self, sql: &str, params: &[SqlValue]) -> Result<u64> {
        tracing::debug!(sql, args = params.len(), "executing dml statement");

        let converted = convert_params(params);
        let param_refs = param_refs(&converted);

        self.client
            .execute(sql, &param_refs)
            .await
            .map_err(|e| OrmError::QueryFailed(e.to_string()))
    }
}

/// A NULL argument that binds to a placeholder of any type.
#[derive(Debug)]
struct Null;

impl ToSql for Null {
    fn to_sql(
        &self,
        _ty: &Type,
        _out: &mut BytesMut,
    ) -> std::result::Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        Ok(IsNull::Yes)
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

fn convert_params(params: &[SqlValue]) -> Vec<Box<dyn ToSql + Sync + Send>> {
    params.iter().map(sql_value_to_tosql).collect()
}

fn param_refs(converted: &[Box<dyn ToSql + Sync + Send>]) -> Vec<&(dyn ToSql + Sync)> {
    converted
        .iter()
        .map(|b| b.as_ref() as &(dyn ToSql + Sync))
        .collect()
}

fn sql_value_to_tosql(value: &SqlValue) -> Box<dyn ToSql + Sync + Send> {
    match value {
        SqlValue::Null => Box::new(Null),
        SqlValue::Text(s) => Box::new(s.clone()),
        SqlValue::Int32(i) => Box::new(*i),
        SqlValue::Int64(i) => Box::new(*i),
        SqlValue::Float64(f) => Box::new(*f),
        SqlValue::Bool(b) => Box::new(*b),
    }
}

/// Reads column `index` as text, `None` for NULL.
fn column_text(row: &tokio_postgres::Row, index: usize, ty: &Type) -> Result<Option<String>> {
    fn text<T: ToString>(value: Option<T>) -> Option<String> {
        value.map(|v| v.to_string())
    }

    let value = if *ty == Type::INT2 {
        row.try_get::<_, Option<i16>>(index).map(text)
    } else if *ty == Type::INT4 {
        row.try_get::<_, Option<i32>>(index).map(text)
    } else if *ty == Type::INT8 {
        row.try_get::<_, Option<i64>>(index).map(text)
    } else if *ty == Type::FLOAT4 {
        row.try_get::<_, Option<f32>>(index).map(text)
    } else if *ty == Type::FLOAT8 {
        row.try_get::<_, Option<f64>>(index).map(text)
    } else if *ty == Type::BOOL {
        row.try_get::<_, Option<bool>>(index).map(text)
    } else {
        row.try_get::<_, Option<String>>(index)
    };

    value.map_err(|e| {
        OrmError::QueryFailed(format!(
            "unsupported value in column {} ({}): {}",
            index + 1,
            ty,
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_binds_to_any_placeholder_type() {
        let null = sql_value_to_tosql(&SqlValue::from(None::<i32>));
        for ty in [Type::INT4, Type::INT8, Type::TEXT, Type::BOOL, Type::FLOAT8] {
            let mut buf = BytesMut::new();
            let is_null = null.to_sql_checked(&ty, &mut buf).unwrap();
            assert!(matches!(is_null, IsNull::Yes), "{} rejected NULL", ty);
            assert!(buf.is_empty());
        }
    }

    #[test]
    fn test_values_keep_their_type_check() {
        let mut buf = BytesMut::new();
        let id = sql_value_to_tosql(&SqlValue::Int32(1));
        assert!(matches!(
            id.to_sql_checked(&Type::INT4, &mut buf),
            Ok(IsNull::No)
        ));

        let mut buf = BytesMut::new();
        assert!(id.to_sql_checked(&Type::TEXT, &mut buf).is_err());
    }
}
