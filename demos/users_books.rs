//! Maps `users` and `books` rows into plain structs.
//!
//! Run with: cargo run --example users_books
//!
//! Reads DB_HOST, DB_PORT, DB_USER, DB_PASS and DB_NAME from the environment
//! or a `.env` file. Expects:
//!
//! ```sql
//! create table users (
//!     id int generated always as identity,
//!     name text not null,
//!     primary key (id),
//!     unique (name)
//! );
//!
//! create table books (
//!     id int generated always as identity,
//!     title text,
//!     user_id int not null,
//!     primary key (id),
//!     foreign key (user_id) references users(id)
//! );
//!
//! insert into users(name) values ('john appleseed');
//! insert into books(title, user_id) values ('the meaning of life', 1);
//! ```

use std::sync::LazyLock;

use pgrs_orm::{
    build_update, build_where, impl_record, ConnectionConfig, DataMapper, OrmClient, OrmError,
    Set, Where,
};

#[derive(Debug, Default)]
struct User {
    id: i32,
    name: String,
}

impl_record!(User {
    id: "sql" = "id";
    name: "sql" = "name";
});

#[derive(Debug, Default)]
struct Book {
    id: i32,
    title: Option<String>,
    user_id: i32,
}

impl_record!(Book {
    id: "sql" = "id";
    title: "sql" = "title";
    user_id: "sql" = "user_id";
});

static USERS: LazyLock<DataMapper<User>> = LazyLock::new(|| DataMapper::new("users", "u", "sql"));
static BOOKS: LazyLock<DataMapper<Book>> = LazyLock::new(|| DataMapper::new("books", "b", "sql"));

#[tokio::main]
async fn main() -> Result<(), OrmError> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let config = ConnectionConfig::from_env()?;
    let client = OrmClient::connect_with(&config).await?;
    let querier = client.querier();

    // Single table.
    let base = format!("SELECT {} FROM {}", USERS.columns(), USERS.select_name());
    let (sql, args) = build_where(&base, &[Where::eq(USERS.column_alias("id"), 1)], Vec::new());
    println!("stmt: {}", sql);

    let mut user = User::default();
    querier
        .query_one(&sql, &args)
        .await?
        .scan(USERS.slots(&mut user)?)?;
    println!("user: {:?}", user);

    // Joined rows scan into both records, in mapper order.
    let row = querier
        .select()
        .columns(&USERS)
        .columns(&BOOKS)
        .from(&USERS)
        .join(&BOOKS, "b.user_id = u.id")
        .where_(Where::eq("u.id", 1))
        .execute()
        .await?
        .single_row()?;

    let mut user = User::default();
    let mut book = Book::default();
    let mut slots = USERS.slots(&mut user)?;
    slots.extend(BOOKS.slots(&mut book)?);
    row.scan(slots)?;
    println!("user: {:?}", user);
    println!("book: {:?}", book);

    // SET arguments come first, WHERE numbering continues after them.
    let (sql, args) = build_update("UPDATE users", &[Set::eq("name", "john appleseed")]);
    let (sql, args) = build_where(&sql, &[Where::eq("id", 1), Where::raw("1 = 1")], args);
    println!("stmt: {}", sql);
    println!("args: {:?}", args);

    let affected = querier.execute(&sql, &args).await?;
    println!("rows affected: {}", affected);

    Ok(())
}
