mod in_memory_test;
mod tokio_postgres;

pub use self::in_memory_test::{InMemoryTestDriver, InMemoryTestResponseBuilder, RecordedStatement};
pub use self::tokio_postgres::TokioPostgresDriver;
