#![allow(clippy::module_name_repetitions)]

pub mod audio_file;
pub mod booking;
pub mod container;
pub mod event;
pub mod registration;
pub mod song;

/// The plain-text foreign key for a record, as stored on child records
/// in the legacy flat schema.
///
/// This is the raw record key without the table prefix; it is what both
/// schema representations agree on, so it is the authoritative form of
/// containment.
#[must_use]
pub fn text_key(id: &surrealdb::sql::Thing) -> String {
    id.id.to_raw()
}
