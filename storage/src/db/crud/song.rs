//! CRUD operations for the song table
use log::warn;
use surrealdb::sql::{Id, Thing};
use surrealdb::{Connection, Surreal};
use tracing::instrument;

use crate::{
    db::{
        schema_mode,
        schemas::{
            container::{self, Container},
            event::Event,
            song::{Song, SongChangeSet, SongId, TABLE_NAME},
            text_key,
        },
        SchemaMode,
    },
    errors::Error,
};

use super::{
    container::resolve_event_link,
    merge_unique,
    queries::song::{
        read_for_container_key, read_for_container_link, read_for_event_key, read_for_event_link,
    },
};

impl Song {
    pub async fn create<C: Connection>(db: &Surreal<C>, song: Self) -> Result<Option<Self>, Error> {
        Self::create_with_mode(db, schema_mode(), song).await
    }

    /// Create a song, populating the containment representation the
    /// given schema mode calls for.
    ///
    /// In normalized mode both record links are written alongside the
    /// text keys, so legacy readers keep working during the migration.
    /// A link whose target cannot be read is dropped with a warning and
    /// the write proceeds on the text key alone.
    #[instrument]
    pub async fn create_with_mode<C: Connection>(
        db: &Surreal<C>,
        mode: SchemaMode,
        mut song: Self,
    ) -> Result<Option<Self>, Error> {
        match mode {
            SchemaMode::Legacy => {
                song.container_link = None;
                song.event_link = None;
            }
            SchemaMode::Normalized => {
                song.container_link = resolve_container_link(db, &song.container_key, &song.id).await?;
                song.event_link = resolve_event_link(db, &song.event_key, &song.id).await?;
            }
        }

        Ok(db
            .create((TABLE_NAME, song.id.id.to_raw()))
            .content(song)
            .await?)
    }

    #[instrument]
    pub async fn read<C: Connection>(db: &Surreal<C>, id: SongId) -> Result<Option<Self>, Error> {
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

    /// Read every song of an event, across all its containers.
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
                Ok(merge_unique(linked, keyed, |s| &s.id))
            }
        }
    }

    pub async fn read_for_container<C: Connection>(
        db: &Surreal<C>,
        container: &Container,
    ) -> Result<Vec<Self>, Error> {
        Self::read_for_container_with_mode(db, schema_mode(), container).await
    }

    /// Read every song of one container.
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
                Ok(merge_unique(linked, keyed, |s| &s.id))
            }
        }
    }

    #[instrument]
    pub async fn update<C: Connection>(
        db: &Surreal<C>,
        id: SongId,
        changes: SongChangeSet,
    ) -> Result<Option<Self>, Error> {
        Ok(db
            .update((TABLE_NAME, id.id.to_raw()))
            .merge(changes)
            .await?)
    }

    #[instrument]
    pub async fn delete<C: Connection>(db: &Surreal<C>, id: SongId) -> Result<Option<Self>, Error> {
        Ok(db.delete((TABLE_NAME, id.id.to_raw())).await?)
    }

    pub async fn repoint_to_container<C: Connection>(
        db: &Surreal<C>,
        id: SongId,
        target: &Container,
    ) -> Result<(), Error> {
        Self::repoint_to_container_with_mode(db, schema_mode(), id, target).await
    }

    /// Re-point a song's containment at another container.
    ///
    /// Idempotent: re-pointing a song at the container it already
    /// belongs to is a no-op, which is what makes the deletion
    /// migration safe to retry mid-way.
    #[instrument]
    pub async fn repoint_to_container_with_mode<C: Connection>(
        db: &Surreal<C>,
        mode: SchemaMode,
        id: SongId,
        target: &Container,
    ) -> Result<(), Error> {
        let changes = SongChangeSet {
            container_key: Some(text_key(&target.id)),
            container_link: match mode {
                SchemaMode::Legacy => None,
                SchemaMode::Normalized => Some(Some(target.id.clone())),
            },
            ..Default::default()
        };

        let updated: Option<Self> = db
            .update((TABLE_NAME, id.id.to_raw()))
            .merge(changes)
            .await?;
        updated.map(|_| ()).ok_or(Error::NotFound)
    }
}

/// Resolve the record link for a container text key, degrading to
/// `None` (with a warning) when the link target does not exist.
pub(crate) async fn resolve_container_link<C: Connection>(
    db: &Surreal<C>,
    container_key: &str,
    writer: &Thing,
) -> Result<Option<Thing>, Error> {
    let container_id = Thing::from((
        container::TABLE_NAME,
        Id::String(container_key.to_owned()),
    ));

    if Container::read(db, container_id.clone()).await?.is_some() {
        Ok(Some(container_id))
    } else {
        warn!("Container {container_key} not found while writing {writer}; keeping text key only");
        Ok(None)
    }
}
