use surrealdb::opt::IntoQuery;

use super::generic::read_by_field;
use crate::db::schemas::registration::TABLE_NAME;

/// Query to read every registration of a container via the legacy text
/// key.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM registration WHERE container_key = $key
/// ```
#[must_use]
#[inline]
pub fn read_for_container_key() -> impl IntoQuery {
    read_by_field(TABLE_NAME, "container_key", "key")
}

/// Query to read every registration of a container via the normalized
/// record link.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM registration WHERE container_link = $container
/// ```
#[must_use]
#[inline]
pub fn read_for_container_link() -> impl IntoQuery {
    read_by_field(TABLE_NAME, "container_link", "container")
}

#[cfg(test)]
mod query_validation_tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_read_for_container_key() {
        let statement = read_for_container_key();
        assert_eq!(
            statement.into_query().unwrap(),
            "SELECT * FROM registration WHERE container_key = $key"
                .into_query()
                .unwrap()
        );
    }

    #[test]
    fn test_read_for_container_link() {
        let statement = read_for_container_link();
        assert_eq!(
            statement.into_query().unwrap(),
            "SELECT * FROM registration WHERE container_link = $container"
                .into_query()
                .unwrap()
        );
    }
}
