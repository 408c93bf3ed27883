//! CRUD operations for the event table
use surrealdb::{Connection, Surreal};
use tracing::instrument;

use crate::{
    db::schemas::{
        booking::BookingId,
        event::{Event, EventChangeSet, EventId, TABLE_NAME},
    },
    errors::Error,
};

use super::queries::event::{read_by_booking, read_by_legacy_id};

impl Event {
    #[instrument]
    pub async fn create<C: Connection>(db: &Surreal<C>, event: Self) -> Result<Option<Self>, Error> {
        Ok(db
            .create((TABLE_NAME, event.id.id.to_raw()))
            .content(event)
            .await?)
    }

    #[instrument]
    pub async fn read<C: Connection>(db: &Surreal<C>, id: EventId) -> Result<Option<Self>, Error> {
        Ok(db.select((TABLE_NAME, id.id.to_raw())).await?)
    }

    #[instrument]
    pub async fn read_all<C: Connection>(db: &Surreal<C>) -> Result<Vec<Self>, Error> {
        Ok(db.select(TABLE_NAME).await?)
    }

    /// Look an event up by the numeric identifier the legacy booking
    /// system minted for it.
    #[instrument]
    pub async fn read_by_legacy_id<C: Connection>(
        db: &Surreal<C>,
        legacy_id: i64,
    ) -> Result<Option<Self>, Error> {
        Ok(db
            .query(read_by_legacy_id())
            .bind(("legacy_id", legacy_id))
            .await?
            .take(0)?)
    }

    /// Look up the event linked to a booking, if one exists yet.
    #[instrument]
    pub async fn read_by_booking<C: Connection>(
        db: &Surreal<C>,
        booking: BookingId,
    ) -> Result<Option<Self>, Error> {
        Ok(db
            .query(read_by_booking())
            .bind(("booking", booking))
            .await?
            .take(0)?)
    }

    #[instrument]
    pub async fn update<C: Connection>(
        db: &Surreal<C>,
        id: EventId,
        changes: EventChangeSet,
    ) -> Result<Option<Self>, Error> {
        Ok(db
            .update((TABLE_NAME, id.id.to_raw()))
            .merge(changes)
            .await?)
    }
}
