use std::marker::PhantomData;

use crate::error::{OrmError, Result};
use crate::traits::{Record, Slot};

/// Tag value that explicitly excludes a field from the mapping.
pub const EXCLUDED: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
struct MappedField {
    position: usize,
    column: &'static str,
}

/// Binds a record type to the columns of one table.
///
/// Built once per (record type, tag key), then shared. The column list
/// returned by [`columns`](Self::columns) and the slots returned by
/// [`slots`](Self::slots) come from the same stored field list, so a
/// SELECT built from one always lines up with a scan into the other.
///
/// # Example
/// ```
/// use pgrs_orm::{impl_record, DataMapper};
///
/// #[derive(Default)]
/// struct User {
///     id: i32,
///     name: String,
/// }
///
/// impl_record!(User { id: "sql" = "id"; name: "sql" = "name" });
///
/// let users = DataMapper::<User>::new("users", "u", "sql");
/// assert_eq!(users.columns(), "u.id, u.name");
/// assert_eq!(users.select_name(), "users u");
/// ```
#[derive(Debug)]
pub struct DataMapper<T> {
    table_name: String,
    table_alias: String,
    fields: Vec<MappedField>,
    field_count: usize,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> DataMapper<T> {
    /// Builds the mapping from the tags of `T` under `tag`.
    ///
    /// A field is mapped when its tag is present, non-empty and not `"-"`.
    pub fn new(name: impl Into<String>, alias: impl Into<String>, tag: &str) -> Self {
        let defs = T::fields();
        let fields: Vec<MappedField> = defs
            .iter()
            .enumerate()
            .filter_map(|(position, def)| match def.tag(tag) {
                Some(column) if !column.is_empty() && column != EXCLUDED => {
                    Some(MappedField { position, column })
                }
                _ => None,
            })
            .collect();

        let mapper = Self {
            table_name: name.into(),
            table_alias: alias.into(),
            fields,
            field_count: defs.len(),
            _record: PhantomData,
        };

        tracing::debug!(
            record = T::record_name(),
            table = %mapper.table_name,
            alias = %mapper.table_alias,
            tag,
            columns = ?mapper.column_names(),
            "built data mapper"
        );

        mapper
    }

    /// Returns the slots of the mapped fields of `record`, in column order.
    pub fn slots<'a>(&self, record: &'a mut T) -> Result<Vec<&'a mut dyn Slot>> {
        let all = record.slots();
        if all.len() != self.field_count {
            return Err(OrmError::MappingMismatch {
                record: T::record_name(),
                expected: self.field_count,
                actual: all.len(),
            });
        }

        let mut wanted = self.fields.iter().map(|f| f.position).peekable();
        let slots = all
            .into_iter()
            .enumerate()
            .filter_map(|(position, slot)| {
                if wanted.peek() == Some(&position) {
                    wanted.next();
                    Some(slot)
                } else {
                    None
                }
            })
            .collect();

        Ok(slots)
    }
}

impl<T> DataMapper<T> {
    /// `"<table> <alias>"`, for a FROM or JOIN clause.
    pub fn select_name(&self) -> String {
        format!("{} {}", self.table_name, self.table_alias)
    }

    pub fn table(&self) -> &str {
        &self.table_name
    }

    pub fn alias(&self) -> &str {
        &self.table_alias
    }

    /// Qualifies `col` with the table alias.
    pub fn column_alias(&self, col: &str) -> String {
        format!("{}.{}", self.table_alias, col)
    }

    /// The alias-qualified column list, comma separated.
    pub fn columns(&self) -> String {
        self.fields
            .iter()
            .map(|f| self.column_alias(f.column))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The unqualified column names, in mapping order.
    pub fn column_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.column).collect()
    }
}
