use surrealdb::opt::IntoQuery;

use super::generic::read_by_field;
use crate::db::schemas::audio_file::TABLE_NAME;

/// Query to read every audio file of an event via the legacy text key.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM audio_file WHERE event_key = $key
/// ```
#[must_use]
#[inline]
pub fn read_for_event_key() -> impl IntoQuery {
    read_by_field(TABLE_NAME, "event_key", "key")
}

/// Query to read every audio file of an event via the normalized record
/// link.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM audio_file WHERE event_link = $event
/// ```
#[must_use]
#[inline]
pub fn read_for_event_link() -> impl IntoQuery {
    read_by_field(TABLE_NAME, "event_link", "event")
}

/// Query to read every audio file attached to a song via the legacy
/// text key.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM audio_file WHERE song_key = $key
/// ```
#[must_use]
#[inline]
pub fn read_for_song_key() -> impl IntoQuery {
    read_by_field(TABLE_NAME, "song_key", "key")
}

/// Query to read every audio file attached to a song via the normalized
/// record link.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM audio_file WHERE song_link = $song
/// ```
#[must_use]
#[inline]
pub fn read_for_song_link() -> impl IntoQuery {
    read_by_field(TABLE_NAME, "song_link", "song")
}

/// Query to read every audio file attached directly to a container via
/// the legacy text key.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM audio_file WHERE container_key = $key
/// ```
#[must_use]
#[inline]
pub fn read_for_container_key() -> impl IntoQuery {
    read_by_field(TABLE_NAME, "container_key", "key")
}

/// Query to read every audio file attached directly to a container via
/// the normalized record link.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM audio_file WHERE container_link = $container
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
    fn test_read_for_event_key() {
        let statement = read_for_event_key();
        assert_eq!(
            statement.into_query().unwrap(),
            "SELECT * FROM audio_file WHERE event_key = $key"
                .into_query()
                .unwrap()
        );
    }

    #[test]
    fn test_read_for_event_link() {
        let statement = read_for_event_link();
        assert_eq!(
            statement.into_query().unwrap(),
            "SELECT * FROM audio_file WHERE event_link = $event"
                .into_query()
                .unwrap()
        );
    }

    #[test]
    fn test_read_for_song_key() {
        let statement = read_for_song_key();
        assert_eq!(
            statement.into_query().unwrap(),
            "SELECT * FROM audio_file WHERE song_key = $key"
                .into_query()
                .unwrap()
        );
    }

    #[test]
    fn test_read_for_song_link() {
        let statement = read_for_song_link();
        assert_eq!(
            statement.into_query().unwrap(),
            "SELECT * FROM audio_file WHERE song_link = $song"
                .into_query()
                .unwrap()
        );
    }

    #[test]
    fn test_read_for_container_key() {
        let statement = read_for_container_key();
        assert_eq!(
            statement.into_query().unwrap(),
            "SELECT * FROM audio_file WHERE container_key = $key"
                .into_query()
                .unwrap()
        );
    }

    #[test]
    fn test_read_for_container_link() {
        let statement = read_for_container_link();
        assert_eq!(
            statement.into_query().unwrap(),
            "SELECT * FROM audio_file WHERE container_link = $container"
                .into_query()
                .unwrap()
        );
    }
}
