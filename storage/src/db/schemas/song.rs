#![allow(clippy::module_name_repetitions)]
//----------------------------------------------------------------------------------------- std lib
use std::sync::Arc;
//--------------------------------------------------------------------------------- other libraries
use serde::{Deserialize, Serialize};
use surrealdb::sql::{Id, Thing};
use surrealqlx::Table;
//----------------------------------------------------------------------------------- local modules
use super::container::ContainerId;
use super::event::EventId;

pub type SongId = Thing;

pub const TABLE_NAME: &str = "song";

/// A song performed at an event, owned by exactly one container.
///
/// Containment is stored twice during the schema migration: the text
/// keys are authoritative, the record links are the normalized
/// representation and may be absent on records that predate it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Table)]
#[Table("song")]
pub struct Song {
    /// The unique identifier for this [`Song`].
    #[field(dt = "record")]
    pub id: SongId,
    /// Title of the [`Song`].
    #[field(dt = "string")]
    #[index()]
    pub title: Arc<str>,
    /// Artist of the [`Song`], if known.
    #[field(dt = "option<string>")]
    #[serde(default)]
    pub artist: Option<Arc<str>>,
    /// Free-form staff notes.
    #[field(dt = "option<string>")]
    #[serde(default)]
    pub notes: Option<Arc<str>>,
    /// Text key of the owning [`super::container::Container`]
    /// (authoritative).
    #[field(dt = "string")]
    #[index()]
    pub container_key: String,
    /// Text key of the owning [`super::event::Event`] (authoritative).
    #[field(dt = "string")]
    #[index()]
    pub event_key: String,
    /// Record link to the owning container (normalized schema only).
    #[field(dt = "option<record<container>>")]
    #[serde(default)]
    pub container_link: Option<ContainerId>,
    /// Record link to the owning event (normalized schema only).
    #[field(dt = "option<record<event>>")]
    #[serde(default)]
    pub event_link: Option<EventId>,
    /// Per-event ordinal, in the order songs were entered.
    #[field(dt = "option<int>")]
    #[serde(default)]
    pub order: Option<u32>,
    /// Position in the event-wide printed/deliverable album sequence.
    #[field(dt = "option<int>")]
    #[serde(default)]
    pub album_order: Option<u32>,
}

impl Song {
    #[must_use]
    pub fn generate_id() -> SongId {
        Thing::from((TABLE_NAME, Id::ulid()))
    }
}

#[derive(Debug, Default, Serialize, Clone)]
pub struct SongChangeSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Arc<str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<Option<Arc<str>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<Arc<str>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_link: Option<Option<ContainerId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Option<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_order: Option<Option<u32>>,
}
