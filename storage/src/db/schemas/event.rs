#![allow(clippy::module_name_repetitions)]
//----------------------------------------------------------------------------------------- std lib
use std::sync::Arc;
//--------------------------------------------------------------------------------- other libraries
use serde::{Deserialize, Serialize};
use surrealdb::sql::{Id, Thing};
use surrealqlx::Table;
//----------------------------------------------------------------------------------- local modules
use super::booking::BookingId;

pub type EventId = Thing;

pub const TABLE_NAME: &str = "event";

/// A school music event.
///
/// Created by the external booking intake process and mutated by staff
/// (date/status changes); never deleted by this crate.
///
/// The record id is the canonical event identifier. The optional
/// `legacy_id` is an older booking-system identifier some events are
/// still only reachable by.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Table)]
#[Table("event")]
pub struct Event {
    /// The unique identifier for this [`Event`]; its key is the
    /// canonical event identifier.
    #[field(dt = "record")]
    pub id: EventId,
    /// Name of the school this event is for.
    #[field(dt = "string")]
    #[index()]
    pub school: Arc<str>,
    /// ISO date (`YYYY-MM-DD`) the event takes place on.
    #[field(dt = "string")]
    pub date: Arc<str>,
    /// Where this event is in its lifecycle.
    #[field(dt = "string")]
    #[serde(default)]
    pub status: EventStatus,
    /// Legacy numeric booking identifier, if this event was minted by
    /// the old booking system.
    #[field(dt = "option<int>")]
    #[index()]
    #[serde(default)]
    pub legacy_id: Option<i64>,
    /// Link to the [`super::booking::Booking`] this event was created
    /// from, if any.
    #[field(dt = "option<record<booking>>")]
    #[serde(default)]
    pub booking: Option<BookingId>,
}

impl Event {
    #[must_use]
    pub fn generate_id() -> EventId {
        Thing::from((TABLE_NAME, Id::ulid()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Planned,
    Recorded,
    Delivered,
    Cancelled,
}

#[derive(Debug, Default, Serialize, Clone)]
pub struct EventChangeSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Arc<str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<Option<BookingId>>,
}
