use surrealdb::opt::IntoQuery;

use super::generic::read_one_by_field;
use crate::db::schemas::event::TABLE_NAME;

/// Query to read an event by its legacy numeric identifier.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM event WHERE legacy_id = $legacy_id LIMIT 1
/// ```
#[must_use]
#[inline]
pub fn read_by_legacy_id() -> impl IntoQuery {
    read_one_by_field(TABLE_NAME, "legacy_id", "legacy_id")
}

/// Query to read the event linked to a booking.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM event WHERE booking = $booking LIMIT 1
/// ```
#[must_use]
#[inline]
pub fn read_by_booking() -> impl IntoQuery {
    read_one_by_field(TABLE_NAME, "booking", "booking")
}

#[cfg(test)]
mod query_validation_tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_read_by_legacy_id() {
        let statement = read_by_legacy_id();
        assert_eq!(
            statement.into_query().unwrap(),
            "SELECT * FROM event WHERE legacy_id = $legacy_id LIMIT 1"
                .into_query()
                .unwrap()
        );
    }

    #[test]
    fn test_read_by_booking() {
        let statement = read_by_booking();
        assert_eq!(
            statement.into_query().unwrap(),
            "SELECT * FROM event WHERE booking = $booking LIMIT 1"
                .into_query()
                .unwrap()
        );
    }
}
