//! Pure functions layering WHERE / SET / ORDER BY clauses onto a base
//! statement.
//!
//! Placeholders continue from the length of the argument list passed in,
//! so an UPDATE's SET arguments can be threaded into the WHERE clause that
//! follows it:
//!
//! ```
//! use pgrs_orm::builders::{build_update, build_where};
//! use pgrs_orm::{Set, SqlValue, Where};
//!
//! let (sql, args) = build_update("UPDATE users", &[Set::eq("name", "john")]);
//! let (sql, args) = build_where(&sql, &[Where::eq("id", 1)], args);
//!
//! assert_eq!(sql, "UPDATE users SET name = $1 WHERE id = $2");
//! assert_eq!(args, vec![SqlValue::from("john"), SqlValue::from(1)]);
//! ```

use crate::clauses::{Set, Where};
use crate::types::SqlValue;

/// Renders each `(column, arg)` pair, appending arguments to `args`.
fn render<'a>(
    descriptors: impl Iterator<Item = (&'a str, Option<&'a SqlValue>)>,
    args: &mut Vec<SqlValue>,
) -> Vec<String> {
    descriptors
        .map(|(column, arg)| match arg {
            Some(value) => {
                args.push(value.clone());
                format!("{} = ${}", column, args.len())
            }
            None => column.to_string(),
        })
        .collect()
}

/// Appends `WHERE <predicates>` joined with `AND`.
///
/// Numbering starts at `args.len() + 1`. An empty predicate list still
/// appends the `WHERE` keyword.
pub fn build_where(stmt: &str, wheres: &[Where], args: Vec<SqlValue>) -> (String, Vec<SqlValue>) {
    let mut args = args;
    args.reserve(wheres.len());

    let fragments = render(
        wheres.iter().map(|w| (w.column.as_str(), w.arg.as_ref())),
        &mut args,
    );
    let sql = format!("{} WHERE {}", stmt, fragments.join(" AND "));

    tracing::trace!(sql = %sql, args = args.len(), "built WHERE clause");
    (sql, args)
}

/// Appends `SET <assignments>` joined with commas, numbering from `$1`.
pub fn build_update(stmt: &str, sets: &[Set]) -> (String, Vec<SqlValue>) {
    let mut args = Vec::with_capacity(sets.len());

    let fragments = render(
        sets.iter().map(|s| (s.column.as_str(), s.arg.as_ref())),
        &mut args,
    );
    let sql = format!("{} SET {}", stmt, fragments.join(", "));

    tracing::trace!(sql = %sql, args = args.len(), "built SET clause");
    (sql, args)
}

/// Appends `ORDER BY <columns>`, or returns `stmt` unchanged when empty.
pub fn order_by(stmt: &str, columns: &[&str]) -> String {
    if columns.is_empty() {
        return stmt.to_string();
    }

    format!("{} ORDER BY {}", stmt, columns.join(", "))
}
