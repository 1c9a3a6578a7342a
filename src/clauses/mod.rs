mod set_clause;
mod where_clause;

pub use set_clause::Set;
pub use where_clause::Where;
