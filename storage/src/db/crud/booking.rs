//! CRUD operations for the booking table
//!
//! Bookings are owned by the external intake system; this crate reads
//! them for identity resolution and only writes the contact fields.
use std::sync::Arc;

use surrealdb::{Connection, Surreal};
use tracing::instrument;

use crate::{
    db::schemas::booking::{Booking, BookingChangeSet, BookingId, TABLE_NAME},
    errors::Error,
};

use super::queries::booking::{read_by_simplybook_id, read_for_teacher_email};

impl Booking {
    #[instrument]
    pub async fn create<C: Connection>(
        db: &Surreal<C>,
        booking: Self,
    ) -> Result<Option<Self>, Error> {
        Ok(db
            .create((TABLE_NAME, booking.id.id.to_raw()))
            .content(booking)
            .await?)
    }

    #[instrument]
    pub async fn read<C: Connection>(
        db: &Surreal<C>,
        id: BookingId,
    ) -> Result<Option<Self>, Error> {
        Ok(db.select((TABLE_NAME, id.id.to_raw())).await?)
    }

    /// Look a booking up by the identifier the legacy booking system
    /// (SimplyBook) minted for it.
    #[instrument]
    pub async fn read_by_simplybook_id<C: Connection>(
        db: &Surreal<C>,
        simplybook_id: i64,
    ) -> Result<Option<Self>, Error> {
        Ok(db
            .query(read_by_simplybook_id())
            .bind(("simplybook_id", simplybook_id))
            .await?
            .take(0)?)
    }

    /// Read every booking owned by the given teacher email.
    #[instrument]
    pub async fn read_for_teacher_email<C: Connection>(
        db: &Surreal<C>,
        email: Arc<str>,
    ) -> Result<Vec<Self>, Error> {
        Ok(db
            .query(read_for_teacher_email())
            .bind(("email", email))
            .await?
            .take(0)?)
    }

    /// Cascade-write of the contact fields; the only mutation this crate
    /// ever performs on a booking.
    #[instrument]
    pub async fn update_contact<C: Connection>(
        db: &Surreal<C>,
        id: BookingId,
        changes: BookingChangeSet,
    ) -> Result<Option<Self>, Error> {
        Ok(db
            .update((TABLE_NAME, id.id.to_raw()))
            .merge(changes)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::init_test_database,
        test_utils::{arb_booking, ulid},
    };

    use anyhow::{anyhow, Result};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn test_create(ulid: String) -> Result<()> {
        let db = init_test_database().await?;
        let booking = arb_booking(&ulid, None);
        let result = Booking::create(&db, booking.clone()).await?;
        assert_eq!(result, Some(booking));
        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_read_by_simplybook_id(ulid: String) -> Result<()> {
        let db = init_test_database().await?;
        let booking = arb_booking(&ulid, Some(31337));
        Booking::create(&db, booking.clone()).await?;

        let result = Booking::read_by_simplybook_id(&db, 31337).await?;
        assert_eq!(result, Some(booking));

        let result = Booking::read_by_simplybook_id(&db, 1).await?;
        assert_eq!(result, None);
        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_read_for_teacher_email(ulid: String) -> Result<()> {
        let db = init_test_database().await?;
        let booking = arb_booking(&ulid, None);
        Booking::create(&db, booking.clone()).await?;

        let email = booking
            .teacher_email
            .clone()
            .ok_or_else(|| anyhow!("fixture booking has no teacher email"))?;
        let result = Booking::read_for_teacher_email(&db, email).await?;
        assert_eq!(result, vec![booking]);

        let result = Booking::read_for_teacher_email(&db, "nobody@example.com".into()).await?;
        assert_eq!(result, vec![]);
        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_contact(ulid: String) -> Result<()> {
        let db = init_test_database().await?;
        let booking = arb_booking(&ulid, None);
        Booking::create(&db, booking.clone()).await?;

        let changes = BookingChangeSet {
            contact_name: Some("New Contact".into()),
            contact_email: Some("new.contact@example.com".into()),
        };
        Booking::update_contact(&db, booking.id.clone(), changes).await?;

        let read = Booking::read(&db, booking.id.clone())
            .await?
            .ok_or_else(|| anyhow!("Booking not found"))?;
        assert_eq!(read.contact_name, "New Contact".into());
        assert_eq!(read.contact_email, "new.contact@example.com".into());
        // the rest of the booking is untouched
        assert_eq!(read.school, booking.school);
        assert_eq!(read.teacher_email, booking.teacher_email);
        Ok(())
    }
}
