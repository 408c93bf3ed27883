//! CRUD operations for the audio_file table
//!
//! The bytes live in object storage and transcoding happens in an
//! external service; only the metadata lives here.
use log::warn;
use surrealdb::sql::{Id, Thing};
use surrealdb::{Connection, Surreal};
use tracing::instrument;

use crate::{
    db::{
        schema_mode,
        schemas::{
            audio_file::{AudioFile, AudioFileChangeSet, AudioFileId, TABLE_NAME},
            container::Container,
            event::Event,
            song::{self, Song},
            text_key,
        },
        SchemaMode,
    },
    errors::Error,
};

use super::{
    container::resolve_event_link,
    merge_unique,
    queries::audio_file::{
        read_for_container_key, read_for_container_link, read_for_event_key, read_for_event_link,
        read_for_song_key, read_for_song_link,
    },
    song::resolve_container_link,
};

impl AudioFile {
    pub async fn create<C: Connection>(db: &Surreal<C>, file: Self) -> Result<Option<Self>, Error> {
        Self::create_with_mode(db, schema_mode(), file).await
    }

    /// Create an audio file record, populating the containment
    /// representation the given schema mode calls for.
    #[instrument]
    pub async fn create_with_mode<C: Connection>(
        db: &Surreal<C>,
        mode: SchemaMode,
        mut file: Self,
    ) -> Result<Option<Self>, Error> {
        match mode {
            SchemaMode::Legacy => {
                file.song_link = None;
                file.container_link = None;
                file.event_link = None;
            }
            SchemaMode::Normalized => {
                file.song_link = match &file.song_key {
                    Some(key) => resolve_song_link(db, key, &file.id).await?,
                    None => None,
                };
                file.container_link = match &file.container_key {
                    Some(key) => resolve_container_link(db, key, &file.id).await?,
                    None => None,
                };
                file.event_link = resolve_event_link(db, &file.event_key, &file.id).await?;
            }
        }

        Ok(db
            .create((TABLE_NAME, file.id.id.to_raw()))
            .content(file)
            .await?)
    }

    #[instrument]
    pub async fn read<C: Connection>(
        db: &Surreal<C>,
        id: AudioFileId,
    ) -> Result<Option<Self>, Error> {
        Ok(db.select((TABLE_NAME, id.id.to_raw())).await?)
    }

    pub async fn read_for_event<C: Connection>(
        db: &Surreal<C>,
        event: &Event,
    ) -> Result<Vec<Self>, Error> {
        Self::read_for_event_with_mode(db, schema_mode(), event).await
    }

    /// Read every audio file of an event.
    ///
    /// Normalized mode unions the link-based and text-key-based queries
    /// and deduplicates by record identity, because some records predate
    /// the link field.
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
                Ok(merge_unique(linked, keyed, |f| &f.id))
            }
        }
    }

    pub async fn read_for_song<C: Connection>(
        db: &Surreal<C>,
        song: &Song,
    ) -> Result<Vec<Self>, Error> {
        Self::read_for_song_with_mode(db, schema_mode(), song).await
    }

    /// Read every audio file attached to a song.
    #[instrument]
    pub async fn read_for_song_with_mode<C: Connection>(
        db: &Surreal<C>,
        mode: SchemaMode,
        song: &Song,
    ) -> Result<Vec<Self>, Error> {
        let keyed: Vec<Self> = db
            .query(read_for_song_key())
            .bind(("key", text_key(&song.id)))
            .await?
            .take(0)?;

        match mode {
            SchemaMode::Legacy => Ok(keyed),
            SchemaMode::Normalized => {
                let linked: Vec<Self> = db
                    .query(read_for_song_link())
                    .bind(("song", song.id.clone()))
                    .await?
                    .take(0)?;
                Ok(merge_unique(linked, keyed, |f| &f.id))
            }
        }
    }

    pub async fn read_for_container<C: Connection>(
        db: &Surreal<C>,
        container: &Container,
    ) -> Result<Vec<Self>, Error> {
        Self::read_for_container_with_mode(db, schema_mode(), container).await
    }

    /// Read every audio file attached directly to a container (group
    /// recordings).
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
                Ok(merge_unique(linked, keyed, |f| &f.id))
            }
        }
    }

    #[instrument]
    pub async fn update<C: Connection>(
        db: &Surreal<C>,
        id: AudioFileId,
        changes: AudioFileChangeSet,
    ) -> Result<Option<Self>, Error> {
        Ok(db
            .update((TABLE_NAME, id.id.to_raw()))
            .merge(changes)
            .await?)
    }

    #[instrument]
    pub async fn delete<C: Connection>(
        db: &Surreal<C>,
        id: AudioFileId,
    ) -> Result<Option<Self>, Error> {
        Ok(db.delete((TABLE_NAME, id.id.to_raw())).await?)
    }
}

/// Resolve the record link for a song text key, degrading to `None`
/// (with a warning) when the link target does not exist.
async fn resolve_song_link<C: Connection>(
    db: &Surreal<C>,
    song_key: &str,
    writer: &Thing,
) -> Result<Option<Thing>, Error> {
    let song_id = Thing::from((song::TABLE_NAME, Id::String(song_key.to_owned())));

    if Song::read(db, song_id.clone()).await?.is_some() {
        Ok(Some(song_id))
    } else {
        warn!("Song {song_key} not found while writing {writer}; keeping text key only");
        Ok(None)
    }
}
