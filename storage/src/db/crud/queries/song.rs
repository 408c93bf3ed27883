use surrealdb::opt::IntoQuery;

use super::generic::read_by_field;
use crate::db::schemas::song::TABLE_NAME;

/// Query to read every song of an event via the legacy text key.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM song WHERE event_key = $key
/// ```
#[must_use]
#[inline]
pub fn read_for_event_key() -> impl IntoQuery {
    read_by_field(TABLE_NAME, "event_key", "key")
}

/// Query to read every song of an event via the normalized record link.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM song WHERE event_link = $event
/// ```
#[must_use]
#[inline]
pub fn read_for_event_link() -> impl IntoQuery {
    read_by_field(TABLE_NAME, "event_link", "event")
}

/// Query to read every song of a container via the legacy text key.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM song WHERE container_key = $key
/// ```
#[must_use]
#[inline]
pub fn read_for_container_key() -> impl IntoQuery {
    read_by_field(TABLE_NAME, "container_key", "key")
}

/// Query to read every song of a container via the normalized record
/// link.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM song WHERE container_link = $container
/// ```
#[must_use]
#[inline]
pub fn read_for_container_link() -> impl IntoQuery {
    read_by_field(TABLE_NAME, "container_link", "container")
}
