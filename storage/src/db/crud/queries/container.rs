use surrealdb::opt::IntoQuery;

use super::{generic::read_by_field, parse_query};
use crate::db::schemas::container::TABLE_NAME;

/// Query to read every container of an event via the legacy text key.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM container WHERE event_key = $key
/// ```
#[must_use]
#[inline]
pub fn read_for_event_key() -> impl IntoQuery {
    read_by_field(TABLE_NAME, "event_key", "key")
}

/// Query to read every container of an event via the normalized record
/// link.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM container WHERE event_link = $event
/// ```
#[must_use]
#[inline]
pub fn read_for_event_link() -> impl IntoQuery {
    read_by_field(TABLE_NAME, "event_link", "event")
}

/// Query to read the default (catch-all) container of an event.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM container WHERE event_key = $key AND is_default = true LIMIT 1
/// ```
#[must_use]
pub fn read_default_for_event() -> impl IntoQuery {
    parse_query(format!(
        "SELECT * FROM {TABLE_NAME} WHERE event_key = $key AND is_default = true LIMIT 1"
    ))
}
