#![allow(clippy::module_name_repetitions)]
//----------------------------------------------------------------------------------------- std lib
use std::sync::Arc;
//--------------------------------------------------------------------------------- other libraries
use serde::{Deserialize, Serialize};
use surrealdb::sql::{Id, Thing};
use surrealqlx::Table;
//----------------------------------------------------------------------------------- local modules
use super::event::EventId;
use crate::util::slugify;

pub type ContainerId = Thing;

pub const TABLE_NAME: &str = "container";

/// Display name of the per-event catch-all container that receives
/// migrated songs and registrations and can never be deleted.
pub const DEFAULT_CONTAINER_NAME: &str = "All Children";

/// What kind of thing a [`Container`] is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// A single school class.
    #[default]
    Regular,
    /// Multiple classes sharing songs.
    Group,
    /// A choir collection visible to all parents regardless of class.
    Choir,
    /// A teacher-song collection visible to all parents regardless of class.
    TeacherSong,
}

impl ContainerKind {
    /// Collections (and the kinds behaving like them) have no child count.
    #[must_use]
    pub const fn is_collection(self) -> bool {
        matches!(self, Self::Choir | Self::TeacherSong)
    }
}

/// Anything a song can belong to: a class, a multi-class group, or a
/// cross-class collection.
///
/// Classes and collections use a record key derived deterministically
/// from (school, date, name), so re-creating one is idempotent. Groups
/// use a randomly generated key scoped to the event.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Table)]
#[Table("container")]
pub struct Container {
    /// The unique identifier for this [`Container`].
    #[field(dt = "record")]
    pub id: ContainerId,
    /// Display name of this [`Container`].
    #[field(dt = "string")]
    #[index()]
    pub name: Arc<str>,
    /// What kind of container this is.
    #[field(dt = "string")]
    #[serde(default)]
    pub kind: ContainerKind,
    /// Text key of the owning [`super::event::Event`] (authoritative).
    #[field(dt = "string")]
    #[index()]
    pub event_key: String,
    /// Record link to the owning event (normalized schema only).
    #[field(dt = "option<record<event>>")]
    #[serde(default)]
    pub event_link: Option<EventId>,
    /// How many children are in this class. Only present on
    /// [`ContainerKind::Regular`] containers.
    #[field(dt = "option<int>")]
    #[serde(default)]
    pub child_count: Option<u32>,
    /// Member containers. Only present on [`ContainerKind::Group`]
    /// containers, which must reference at least two members.
    #[field(dt = "option<array<record<container>>>")]
    #[serde(default)]
    pub members: Option<Vec<ContainerId>>,
    /// Whether this is the event's catch-all default container.
    /// Exactly one container per event has this set.
    #[field(dt = "bool")]
    #[serde(default)]
    pub is_default: bool,
    /// Position hint for printed album layout; maintained as the minimum
    /// album order among this container's songs.
    #[field(dt = "option<int>")]
    #[serde(default)]
    pub display_order: Option<u32>,
}

impl Container {
    /// Generate a random id, used for groups.
    #[must_use]
    pub fn generate_id() -> ContainerId {
        Thing::from((TABLE_NAME, Id::ulid()))
    }

    /// Derive the deterministic id for a class or collection container.
    ///
    /// The same (school, date, name) always derives the same id, which
    /// is what makes `create` idempotent for these kinds.
    #[must_use]
    pub fn derive_id(school: &str, date: &str, name: &str) -> ContainerId {
        let key = format!("{}-{}-{}", slugify(school), slugify(date), slugify(name));
        Thing::from((TABLE_NAME, Id::String(key)))
    }
}

#[derive(Debug, Default, Serialize, Clone)]
pub struct ContainerChangeSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Arc<str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_count: Option<Option<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<ContainerId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<Option<u32>>,
}
