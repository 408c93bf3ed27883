//! Event identity resolution.
//!
//! Two independent systems historically minted identifiers for the same
//! event: the canonical record key, and a numeric identifier from the
//! legacy booking system. Both must keep working indefinitely, so
//! resolution tries an ordered list of strategies and returns the first
//! hit. Adding a new identifier scheme means adding a strategy here;
//! call sites never change.

use std::sync::Arc;

use log::debug;
use surrealdb::{
    sql::{Id, Thing},
    Connection, Surreal,
};
use tracing::instrument;

use recital_storage::db::schemas::{
    booking::Booking,
    event::{self, Event, EventId},
};

use crate::errors::Error;

/// A resolved event identity: the canonical identifier plus the backing
/// record, so downstream operations never re-resolve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedEvent {
    /// The canonical event identifier.
    pub id: EventId,
    /// The backing event record.
    pub event: Event,
}

/// An identifier scheme an event can be looked up by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Strategy {
    /// Direct lookup by the canonical record identifier.
    Canonical,
    /// Purely numeric identifiers are legacy booking-system identifiers:
    /// try the event's stored legacy id, then follow the booking that
    /// minted the identifier to its linked event.
    LegacyBooking,
}

/// The strategies tried, in order.
const STRATEGIES: &[Strategy] = &[Strategy::Canonical, Strategy::LegacyBooking];

async fn try_strategy<C: Connection>(
    db: &Surreal<C>,
    strategy: Strategy,
    identifier: &str,
) -> Result<Option<Event>, Error> {
    match strategy {
        Strategy::Canonical => {
            let id = Thing::from((event::TABLE_NAME, Id::String(identifier.to_owned())));
            Ok(Event::read(db, id).await?)
        }
        Strategy::LegacyBooking => {
            let Ok(legacy_id) = identifier.parse::<i64>() else {
                return Ok(None);
            };

            if let Some(found) = Event::read_by_legacy_id(db, legacy_id).await? {
                return Ok(Some(found));
            }

            let Some(booking) = Booking::read_by_simplybook_id(db, legacy_id).await? else {
                return Ok(None);
            };
            Ok(Event::read_by_booking(db, booking.id).await?)
        }
    }
}

/// Resolve an event from any identifier it is known by.
///
/// Read-only; tries each strategy in [`STRATEGIES`] order and returns
/// the first hit.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if no strategy resolves the identifier,
/// and propagates backing-store errors unwrapped.
#[instrument(skip(db))]
pub async fn resolve_event<C: Connection>(
    db: &Surreal<C>,
    identifier: &str,
) -> Result<ResolvedEvent, Error> {
    for strategy in STRATEGIES {
        if let Some(found) = try_strategy(db, *strategy, identifier).await? {
            debug!("Resolved event {identifier} via {strategy:?}");
            return Ok(ResolvedEvent {
                id: found.id.clone(),
                event: found,
            });
        }
    }

    Err(Error::NotFound)
}

/// Resolve an event on behalf of a teacher, checking that one of the
/// teacher's bookings is the booking this event was created from.
///
/// # Errors
///
/// Returns [`Error::Ownership`] if the event has no booking or none of
/// the teacher's bookings match, in addition to everything
/// [`resolve_event`] returns.
#[instrument(skip(db))]
pub async fn resolve_event_for_teacher<C: Connection>(
    db: &Surreal<C>,
    identifier: &str,
    teacher_email: &str,
) -> Result<ResolvedEvent, Error> {
    let resolved = resolve_event(db, identifier).await?;

    let Some(booking) = &resolved.event.booking else {
        return Err(Error::Ownership);
    };

    let owned = Booking::read_for_teacher_email(db, Arc::from(teacher_email)).await?;
    if owned.iter().any(|b| &b.id == booking) {
        Ok(resolved)
    } else {
        Err(Error::Ownership)
    }
}
