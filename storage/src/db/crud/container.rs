//! CRUD operations for the container table
use log::warn;
use surrealdb::{Connection, Surreal};
use tracing::instrument;

use crate::{
    db::{
        schema_mode,
        schemas::{
            container::{
                Container, ContainerChangeSet, ContainerId, ContainerKind,
                DEFAULT_CONTAINER_NAME, TABLE_NAME,
            },
            event::Event,
            text_key,
        },
        SchemaMode,
    },
    errors::Error,
};

use super::{
    merge_unique,
    queries::container::{read_default_for_event, read_for_event_key, read_for_event_link},
};

impl Container {
    pub async fn create<C: Connection>(
        db: &Surreal<C>,
        container: Self,
    ) -> Result<Option<Self>, Error> {
        Self::create_with_mode(db, schema_mode(), container).await
    }

    /// Create a container, populating the containment representation the
    /// given schema mode calls for.
    ///
    /// In normalized mode the event link is written alongside the text
    /// key; if the link target cannot be read the write degrades to the
    /// text key alone (the key is authoritative, the link is an
    /// optimization).
    #[instrument]
    pub async fn create_with_mode<C: Connection>(
        db: &Surreal<C>,
        mode: SchemaMode,
        mut container: Self,
    ) -> Result<Option<Self>, Error> {
        container.event_link = match mode {
            SchemaMode::Legacy => None,
            SchemaMode::Normalized => {
                resolve_event_link(db, &container.event_key, &container.id).await?
            }
        };

        Ok(db
            .create((TABLE_NAME, container.id.id.to_raw()))
            .content(container)
            .await?)
    }

    #[instrument]
    pub async fn read<C: Connection>(
        db: &Surreal<C>,
        id: ContainerId,
    ) -> Result<Option<Self>, Error> {
        Ok(db.select((TABLE_NAME, id.id.to_raw())).await?)
    }

    #[instrument]
    pub async fn read_all<C: Connection>(db: &Surreal<C>) -> Result<Vec<Self>, Error> {
        Ok(db.select(TABLE_NAME).await?)
    }

    pub async fn read_for_event<C: Connection>(
        db: &Surreal<C>,
        event: &Event,
    ) -> Result<Vec<Self>, Error> {
        Self::read_for_event_with_mode(db, schema_mode(), event).await
    }

    /// Read every container of an event.
    ///
    /// Normalized mode unions the link query with the text-key query and
    /// deduplicates, because some records predate the link field.
    #[instrument]
    pub async fn read_for_event_with_mode<C: Connection>(
        db: &Surreal<C>,
        mode: SchemaMode,
        event: &Event,
    ) -> Result<Vec<Self>, Error> {
        let keyed: Vec<Self> = db
            .query(read_for_event_key())
            .bind(("key", text_key(&event.id)))
            .await?
            .take(0)?;

        match mode {
            SchemaMode::Legacy => Ok(keyed),
            SchemaMode::Normalized => {
                let linked: Vec<Self> = db
                    .query(read_for_event_link())
                    .bind(("event", event.id.clone()))
                    .await?
                    .take(0)?;
                Ok(merge_unique(linked, keyed, |c| &c.id))
            }
        }
    }

    /// Read the default (catch-all) container of an event, if it has
    /// been created yet.
    #[instrument]
    pub async fn read_default_for_event<C: Connection>(
        db: &Surreal<C>,
        event_key: String,
    ) -> Result<Option<Self>, Error> {
        Ok(db
            .query(read_default_for_event())
            .bind(("key", event_key))
            .await?
            .take(0)?)
    }

    pub async fn read_or_create_default<C: Connection>(
        db: &Surreal<C>,
        event: &Event,
    ) -> Result<Self, Error> {
        Self::read_or_create_default_with_mode(db, schema_mode(), event).await
    }

    /// Resolve the event's default container, creating it lazily on
    /// first need.
    ///
    /// The result is never cached in process memory; the backing store
    /// is the only source of truth, so every caller resolves it fresh.
    #[instrument]
    pub async fn read_or_create_default_with_mode<C: Connection>(
        db: &Surreal<C>,
        mode: SchemaMode,
        event: &Event,
    ) -> Result<Self, Error> {
        if let Some(existing) = Self::read_default_for_event(db, text_key(&event.id)).await? {
            return Ok(existing);
        }

        let container = Self {
            id: Self::derive_id(&event.school, &event.date, DEFAULT_CONTAINER_NAME),
            name: DEFAULT_CONTAINER_NAME.into(),
            kind: ContainerKind::Regular,
            event_key: text_key(&event.id),
            event_link: None,
            child_count: None,
            members: None,
            is_default: true,
            display_order: None,
        };

        Self::create_with_mode(db, mode, container)
            .await?
            .ok_or(Error::NotCreated)
    }

    #[instrument]
    pub async fn update<C: Connection>(
        db: &Surreal<C>,
        id: ContainerId,
        changes: ContainerChangeSet,
    ) -> Result<Option<Self>, Error> {
        Ok(db
            .update((TABLE_NAME, id.id.to_raw()))
            .merge(changes)
            .await?)
    }

    #[instrument]
    pub async fn delete<C: Connection>(
        db: &Surreal<C>,
        id: ContainerId,
    ) -> Result<Option<Self>, Error> {
        Ok(db.delete((TABLE_NAME, id.id.to_raw())).await?)
    }
}

/// Resolve the record link for an event text key, degrading to `None`
/// (with a warning) when the link target does not exist.
pub(crate) async fn resolve_event_link<C: Connection>(
    db: &Surreal<C>,
    event_key: &str,
    writer: &surrealdb::sql::Thing,
) -> Result<Option<surrealdb::sql::Thing>, Error> {
    let event_id = surrealdb::sql::Thing::from((
        crate::db::schemas::event::TABLE_NAME,
        surrealdb::sql::Id::String(event_key.to_owned()),
    ));

    if Event::read(db, event_id.clone()).await?.is_some() {
        Ok(Some(event_id))
    } else {
        warn!("Event {event_key} not found while writing {writer}; keeping text key only");
        Ok(None)
    }
}
