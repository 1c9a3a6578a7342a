use super::Slot;

/// Static description of one record field: its name and its tags.
///
/// Tags are `(key, value)` pairs, e.g. `("sql", "user_id")`. The key
/// selects which naming a [`DataMapper`](crate::mapper::DataMapper) uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub tags: &'static [(&'static str, &'static str)],
}

impl FieldDef {
    pub const fn new(name: &'static str, tags: &'static [(&'static str, &'static str)]) -> Self {
        Self { name, tags }
    }

    /// Returns the tag value registered under `key`, if any.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| *value)
    }
}

/// A plain data record that can be bound to table columns.
///
/// `fields()` and `slots()` must list the same fields in the same
/// (declaration) order. Implementations are usually written with
/// [`impl_record!`](crate::impl_record).
pub trait Record {
    /// Every field of the record, in declaration order.
    fn fields() -> &'static [FieldDef];

    /// One writable slot per field, in the order of `fields()`.
    fn slots(&mut self) -> Vec<&mut dyn Slot>;

    /// Name used in logs and errors.
    fn record_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Implements [`Record`] for a struct from a field list with tags.
///
/// Fields without tags stay part of the record (they count towards its
/// shape) but are never mapped to a column.
///
/// ```
/// use pgrs_orm::impl_record;
///
/// #[derive(Debug, Default)]
/// struct Book {
///     id: i32,
///     title: Option<String>,
///     user_id: i32,
///     cached: bool,
/// }
///
/// impl_record!(Book {
///     id: "sql" = "id";
///     title: "sql" = "title";
///     user_id: "sql" = "user_id", "json" = "userId";
///     cached;
/// });
/// ```
#[macro_export]
macro_rules! impl_record {
    ($ty:ty { $($field:ident $(: $($key:literal = $value:literal),+)?);* $(;)? }) => {
        impl $crate::traits::Record for $ty {
            fn fields() -> &'static [$crate::traits::FieldDef] {
                const FIELDS: &[$crate::traits::FieldDef] = &[
                    $(
                        $crate::traits::FieldDef::new(
                            stringify!($field),
                            &[$($(($key, $value)),+)?],
                        ),
                    )*
                ];
                FIELDS
            }

            fn slots(&mut self) -> Vec<&mut dyn $crate::traits::Slot> {
                vec![$(&mut self.$field as &mut dyn $crate::traits::Slot),*]
            }
        }
    };
}
