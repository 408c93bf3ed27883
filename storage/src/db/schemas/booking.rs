#![allow(clippy::module_name_repetitions)]
//----------------------------------------------------------------------------------------- std lib
use std::sync::Arc;
//--------------------------------------------------------------------------------- other libraries
use serde::{Deserialize, Serialize};
use surrealdb::sql::{Id, Thing};
use surrealqlx::Table;

pub type BookingId = Thing;

pub const TABLE_NAME: &str = "booking";

/// An external booking record (school, contact, schedule).
///
/// Bookings are owned by the intake system; this crate reads them to
/// resolve event identities and only ever writes the contact fields
/// (a cascade-write when staff correct contact details).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Table)]
#[Table("booking")]
pub struct Booking {
    /// The unique identifier for this [`Booking`].
    #[field(dt = "record")]
    pub id: BookingId,
    /// Name of the school that made the booking.
    #[field(dt = "string")]
    #[index()]
    pub school: Arc<str>,
    /// ISO date (`YYYY-MM-DD`) the booking was made for.
    #[field(dt = "string")]
    pub date: Arc<str>,
    /// Name of the booking contact.
    #[field(dt = "string")]
    pub contact_name: Arc<str>,
    /// Email address of the booking contact.
    #[field(dt = "string")]
    pub contact_email: Arc<str>,
    /// Email address of the teacher running the event, if known.
    #[field(dt = "option<string>")]
    #[index()]
    #[serde(default)]
    pub teacher_email: Option<Arc<str>>,
    /// The identifier the legacy booking system (SimplyBook) minted for
    /// this booking, if it came from there.
    #[field(dt = "option<int>")]
    #[index(unique)]
    #[serde(default)]
    pub simplybook_id: Option<i64>,
}

impl Booking {
    #[must_use]
    pub fn generate_id() -> BookingId {
        Thing::from((TABLE_NAME, Id::ulid()))
    }
}

#[derive(Debug, Default, Serialize, Clone)]
pub struct BookingChangeSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<Arc<str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<Arc<str>>,
}
