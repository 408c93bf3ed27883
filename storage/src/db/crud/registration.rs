//! CRUD operations for the registration table
//!
//! Registrations are created by the parent-facing layer. This crate
//! counts them, and moves them when their container is deleted, but
//! never mutates them otherwise.
use surrealdb::{Connection, Surreal};
use tracing::instrument;

use crate::{
    db::{
        schema_mode,
        schemas::{
            container::Container,
            registration::{Registration, RegistrationChangeSet, RegistrationId, TABLE_NAME},
            text_key,
        },
        SchemaMode,
    },
    errors::Error,
};

use super::{
    container::resolve_event_link,
    merge_unique,
    queries::registration::{read_for_container_key, read_for_container_link},
    song::resolve_container_link,
};

impl Registration {
    pub async fn create<C: Connection>(
        db: &Surreal<C>,
        registration: Self,
    ) -> Result<Option<Self>, Error> {
        Self::create_with_mode(db, schema_mode(), registration).await
    }

    /// Create a registration, populating the containment representation
    /// the given schema mode calls for.
    #[instrument]
    pub async fn create_with_mode<C: Connection>(
        db: &Surreal<C>,
        mode: SchemaMode,
        mut registration: Self,
    ) -> Result<Option<Self>, Error> {
        match mode {
            SchemaMode::Legacy => {
                registration.container_link = None;
                registration.event_link = None;
            }
            SchemaMode::Normalized => {
                registration.container_link =
                    resolve_container_link(db, &registration.container_key, &registration.id)
                        .await?;
                registration.event_link =
                    resolve_event_link(db, &registration.event_key, &registration.id).await?;
            }
        }

        Ok(db
            .create((TABLE_NAME, registration.id.id.to_raw()))
            .content(registration)
            .await?)
    }

    #[instrument]
    pub async fn read<C: Connection>(
        db: &Surreal<C>,
        id: RegistrationId,
    ) -> Result<Option<Self>, Error> {
        Ok(db.select((TABLE_NAME, id.id.to_raw())).await?)
    }

    pub async fn read_for_container<C: Connection>(
        db: &Surreal<C>,
        container: &Container,
    ) -> Result<Vec<Self>, Error> {
        Self::read_for_container_with_mode(db, schema_mode(), container).await
    }

    /// Read every registration of one container.
    #[instrument]
    pub async fn read_for_container_with_mode<C: Connection>(
        db: &Surreal<C>,
        mode: SchemaMode,
        container: &Container,
    ) -> Result<Vec<Self>, Error> {
        let keyed: Vec<Self> = db
            .query(read_for_container_key())
            .bind(("key", text_key(&container.id)))
            .await?
            .take(0)?;

        match mode {
            SchemaMode::Legacy => Ok(keyed),
            SchemaMode::Normalized => {
                let linked: Vec<Self> = db
                    .query(read_for_container_link())
                    .bind(("container", container.id.clone()))
                    .await?
                    .take(0)?;
                Ok(merge_unique(linked, keyed, |r| &r.id))
            }
        }
    }

    pub async fn repoint_to_container<C: Connection>(
        db: &Surreal<C>,
        id: RegistrationId,
        target: &Container,
    ) -> Result<(), Error> {
        Self::repoint_to_container_with_mode(db, schema_mode(), id, target).await
    }

    /// Re-point a registration at another container. Idempotent, like
    /// [`crate::db::schemas::song::Song::repoint_to_container`].
    #[instrument]
    pub async fn repoint_to_container_with_mode<C: Connection>(
        db: &Surreal<C>,
        mode: SchemaMode,
        id: RegistrationId,
        target: &Container,
    ) -> Result<(), Error> {
        let changes = RegistrationChangeSet {
            container_key: Some(text_key(&target.id)),
            container_link: match mode {
                SchemaMode::Legacy => None,
                SchemaMode::Normalized => Some(Some(target.id.clone())),
            },
        };

        let updated: Option<Self> = db
            .update((TABLE_NAME, id.id.to_raw()))
            .merge(changes)
            .await?;
        updated.map(|_| ()).ok_or(Error::NotFound)
    }
}
