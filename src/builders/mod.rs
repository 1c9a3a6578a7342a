mod select;
mod statement;

pub use select::{Select, SelectWithColumns, SelectWithTable};
pub use statement::{build_update, build_where, order_by};
