//! pgrs-orm - binds plain record types to table columns and layers
//! parameterized WHERE / SET / ORDER BY clauses onto SQL statements.
//!
//! # Example
//! ```ignore
//! use pgrs_orm::{impl_record, build_where, DataMapper, OrmClient, Where};
//!
//! #[derive(Debug, Default)]
//! struct User {
//!     id: i32,
//!     name: String,
//! }
//!
//! impl_record!(User { id: "sql" = "id"; name: "sql" = "name" });
//!
//! let users = DataMapper::<User>::new("users", "u", "sql");
//!
//! let client = OrmClient::connect("postgres://localhost/library").await?;
//! let querier = client.querier();
//!
//! let base = format!("SELECT {} FROM {}", users.columns(), users.select_name());
//! let (sql, args) = build_where(&base, &[Where::eq("u.id", 1)], Vec::new());
//!
//! let mut user = User::default();
//! querier.query_one(&sql, &args).await?.scan(users.slots(&mut user)?)?;
//! ```

pub mod builders;
pub mod clauses;
pub mod config;
pub mod drivers;
pub mod error;
pub mod mapper;
pub mod querier;
pub mod traits;
pub mod types;

mod client;

pub use builders::{build_update, build_where, order_by};
pub use clauses::{Set, Where};
pub use client::OrmClient;
pub use config::ConnectionConfig;
pub use error::{OrmError, Result};
pub use mapper::DataMapper;
pub use querier::Querier;
pub use traits::{DatabaseDriver, FieldDef, Record, Slot, SlotError};
pub use types::{QueryResult, RawQueryResult, Row, SqlValue};
