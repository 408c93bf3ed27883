//! CRUD operations for the record tables.
//!
//! All containment-carrying reads and writes go through mode-aware
//! functions: the public entry points read the process-wide
//! [`crate::db::SchemaMode`], and each has a `*_with_mode` sibling taking
//! the mode explicitly so both representations stay testable in one
//! process.

pub mod audio_file;
pub mod booking;
pub mod container;
pub mod event;
pub mod queries;
pub mod registration;
pub mod song;

use std::collections::HashSet;

use surrealdb::sql::Thing;

/// Merge two overlapping query results, keeping the first occurrence of
/// each record identity.
///
/// Normalized-mode reads union a link-based query with a text-key query
/// because some records predate the link fields; any record reachable
/// both ways must appear exactly once.
pub(crate) fn merge_unique<T>(
    first: Vec<T>,
    second: Vec<T>,
    id_of: impl Fn(&T) -> &Thing,
) -> Vec<T> {
    let mut seen: HashSet<Thing> = HashSet::new();
    first
        .into_iter()
        .chain(second)
        .filter(|record| seen.insert(id_of(record).clone()))
        .collect()
}
