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

pub type RegistrationId = Thing;

pub const TABLE_NAME: &str = "registration";

/// A parent's enrollment of a child into a container.
///
/// Registrations are created by the parent-facing layer; this crate
/// counts them and moves them when a container is deleted, but does not
/// otherwise mutate them.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Table)]
#[Table("registration")]
pub struct Registration {
    /// The unique identifier for this [`Registration`].
    #[field(dt = "record")]
    pub id: RegistrationId,
    /// Name of the enrolled child.
    #[field(dt = "string")]
    pub child_name: Arc<str>,
    /// Email address of the enrolling parent.
    #[field(dt = "string")]
    #[index()]
    pub parent_email: Arc<str>,
    /// Text key of the [`super::container::Container`] the child is
    /// enrolled in (authoritative).
    #[field(dt = "string")]
    #[index()]
    pub container_key: String,
    /// Text key of the owning [`super::event::Event`] (authoritative).
    #[field(dt = "string")]
    #[index()]
    pub event_key: String,
    /// Record link to the container (normalized schema only).
    #[field(dt = "option<record<container>>")]
    #[serde(default)]
    pub container_link: Option<ContainerId>,
    /// Record link to the owning event (normalized schema only).
    #[field(dt = "option<record<event>>")]
    #[serde(default)]
    pub event_link: Option<EventId>,
}

impl Registration {
    #[must_use]
    pub fn generate_id() -> RegistrationId {
        Thing::from((TABLE_NAME, Id::ulid()))
    }
}

#[derive(Debug, Default, Serialize, Clone)]
pub struct RegistrationChangeSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_link: Option<Option<ContainerId>>,
}
