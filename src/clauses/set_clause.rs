use super::where_clause::single_argument;
use crate::error::Result;
use crate::types::SqlValue;

/// A single UPDATE assignment.
///
/// Renders as `column = $N`, or as the raw text when no argument is given
/// (e.g. `updated_at = now()`).
#[derive(Debug, Clone, PartialEq)]
pub struct Set {
    pub(crate) column: String,
    pub(crate) arg: Option<SqlValue>,
}

impl Set {
    pub fn eq<V: Into<SqlValue>>(column: impl Into<String>, value: V) -> Self {
        Self {
            column: column.into(),
            arg: Some(value.into()),
        }
    }

    pub fn raw(expr: impl Into<String>) -> Self {
        Self {
            column: expr.into(),
            arg: None,
        }
    }

    /// Same one-argument rule as [`Where::new`](super::Where::new).
    pub fn new<I>(column: impl Into<String>, args: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<SqlValue>,
    {
        let arg = single_argument("Set", args)?;
        Ok(Self {
            column: column.into(),
            arg,
        })
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn arg(&self) -> Option<&SqlValue> {
        self.arg.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrmError;

    #[test]
    fn test_set_rejects_two_arguments() {
        assert!(matches!(
            Set::new("name", ["a", "b"]),
            Err(OrmError::TooManyArguments {
                descriptor: "Set",
                count: 2
            })
        ));
    }

    #[test]
    fn test_set_single_argument() {
        let set = Set::new("name", [Some("john")]).unwrap();
        assert_eq!(set.arg(), Some(&SqlValue::Text("john".to_string())));

        let set = Set::new("nickname", [None::<String>]).unwrap();
        assert_eq!(set.arg(), Some(&SqlValue::Null));
    }
}
