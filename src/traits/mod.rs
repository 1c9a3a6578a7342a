mod driver;
mod record;
mod slot;

pub use driver::DatabaseDriver;
pub use record::{FieldDef, Record};
pub use slot::{Slot, SlotError};
