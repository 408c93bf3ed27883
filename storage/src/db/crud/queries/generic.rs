use surrealdb::opt::IntoQuery;

use super::parse_query;

/// Query to read all records of a table whose `field` equals `$param`.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM table WHERE field = $param
/// ```
///
/// # Example
///
/// ```ignore
/// # use pretty_assertions::assert_eq;
/// use recital_storage::db::crud::queries::generic::read_by_field;
/// use surrealdb::opt::IntoQuery;
///
/// // Example: read all the songs of a container
/// let statement = read_by_field("song", "container_key", "key");
/// assert_eq!(
///     statement.into_query().unwrap(),
///     "SELECT * FROM song WHERE container_key = $key".into_query().unwrap()
/// );
/// ```
#[must_use]
pub fn read_by_field(table: &str, field: &str, param: &str) -> impl IntoQuery {
    parse_query(format!("SELECT * FROM {table} WHERE {field} = ${param}"))
}

/// Query to read the first record of a table whose `field` equals `$param`.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM table WHERE field = $param LIMIT 1
/// ```
///
/// # Example
///
/// ```ignore
/// # use pretty_assertions::assert_eq;
/// use recital_storage::db::crud::queries::generic::read_one_by_field;
/// use surrealdb::opt::IntoQuery;
///
/// // Example: look a booking up by its legacy identifier
/// let statement = read_one_by_field("booking", "simplybook_id", "id");
/// assert_eq!(
///     statement.into_query().unwrap(),
///     "SELECT * FROM booking WHERE simplybook_id = $id LIMIT 1".into_query().unwrap()
/// );
/// ```
#[must_use]
pub fn read_one_by_field(table: &str, field: &str, param: &str) -> impl IntoQuery {
    parse_query(format!(
        "SELECT * FROM {table} WHERE {field} = ${param} LIMIT 1"
    ))
}
