use crate::error::{OrmError, Result};
use crate::types::SqlValue;

/// A single WHERE predicate.
///
/// With an argument it renders as `column = $N`; without one the column
/// text is used verbatim, which allows raw expressions such as `1 = 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Where {
    pub(crate) column: String,
    pub(crate) arg: Option<SqlValue>,
}

impl Where {
    /// Creates an equality predicate: column = value
    pub fn eq<V: Into<SqlValue>>(column: impl Into<String>, value: V) -> Self {
        Self {
            column: column.into(),
            arg: Some(value.into()),
        }
    }

    /// Creates a raw predicate that consumes no placeholder.
    pub fn raw(expr: impl Into<String>) -> Self {
        Self {
            column: expr.into(),
            arg: None,
        }
    }

    /// Creates a predicate from a list of zero or one arguments.
    ///
    /// More than one argument is a construction error.
    pub fn new<I>(column: impl Into<String>, args: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<SqlValue>,
    {
        let arg = single_argument("Where", args)?;
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

/// Collects at most one argument for a predicate or assignment.
pub(crate) fn single_argument<I>(descriptor: &'static str, args: I) -> Result<Option<SqlValue>>
where
    I: IntoIterator,
    I::Item: Into<SqlValue>,
{
    let mut args: Vec<SqlValue> = args.into_iter().map(Into::into).collect();
    match args.len() {
        0 => Ok(None),
        1 => Ok(args.pop()),
        count => Err(OrmError::TooManyArguments { descriptor, count }),
    }
}
