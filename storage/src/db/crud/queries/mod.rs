pub mod audio_file;
pub mod booking;
pub mod container;
pub mod event;
pub mod generic;
pub mod registration;
pub mod song;

/// Parse a query (string) into a `surrealdb::sql::Query`
///
/// This is primarily used to validate the syntax of queries before they are executed
#[must_use]
pub fn parse_query(query: impl AsRef<str>) -> surrealdb::sql::Query {
    surrealdb::syn::parse(query.as_ref()).unwrap()
}
