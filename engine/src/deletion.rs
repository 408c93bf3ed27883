//! Container deletion with data migration.
//!
//! Deleting a container that still holds songs or registrations first
//! migrates that data to the event's default catch-all container, and
//! only with explicit confirmation. The backing store offers no
//! transactions, so the migration is a sequence of individually
//! idempotent sub-writes: an interruption leaves the container with
//! fewer attachments and the whole request safe to retry, never a
//! corrupt state.

use log::info;
use surrealdb::{
    sql::{Id, Thing},
    Connection, Surreal,
};
use tracing::instrument;

use recital_storage::db::schemas::{
    audio_file::AudioFile,
    container::{Container, ContainerId, ContainerKind},
    event::{self, Event},
    registration::Registration,
    song::Song,
};

use crate::errors::Error;

/// What a confirmed deletion did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeletionOutcome {
    /// The deleted container.
    pub deleted: ContainerId,
    /// The default container the attached data was moved to, if any
    /// data was attached.
    pub migrated_to: Option<ContainerId>,
    pub migrated_songs: usize,
    pub migrated_registrations: usize,
    /// Group recordings removed along with a group container.
    pub removed_audio_files: usize,
}

/// Delete a container, migrating any attached data to the event's
/// default container first.
///
/// A container with no attached data is deleted outright. A container
/// with attached data blocks with [`Error::DataAttached`] until the
/// caller re-invokes with `confirm_move`; the blocked call performs no
/// mutation.
///
/// # Errors
///
/// Returns [`Error::Forbidden`] for the default container,
/// [`Error::NotFound`] if the container or its event does not exist,
/// and [`Error::DataAttached`] when data is attached and `confirm_move`
/// is unset.
#[instrument(skip(db))]
pub async fn delete_container<C: Connection>(
    db: &Surreal<C>,
    id: ContainerId,
    confirm_move: bool,
) -> Result<DeletionOutcome, Error> {
    let container = Container::read(db, id.clone()).await?.ok_or(Error::NotFound)?;
    if container.is_default {
        return Err(Error::Forbidden);
    }

    let songs = Song::read_for_container(db, &container).await?;
    let registrations = Registration::read_for_container(db, &container).await?;
    // Only groups carry recordings of their own; class audio hangs off
    // the songs, which move with the songs.
    let audio_files = if container.kind == ContainerKind::Group {
        AudioFile::read_for_container(db, &container).await?
    } else {
        Vec::new()
    };

    if songs.is_empty() && registrations.is_empty() && audio_files.is_empty() {
        Container::delete(db, id.clone()).await?;
        info!("Deleted empty container {id}");
        return Ok(DeletionOutcome {
            deleted: id,
            migrated_to: None,
            migrated_songs: 0,
            migrated_registrations: 0,
            removed_audio_files: 0,
        });
    }

    if !confirm_move {
        return Err(Error::DataAttached {
            song_count: songs.len(),
            registration_count: registrations.len(),
            audio_file_count: audio_files.len(),
        });
    }

    let event_id = Thing::from((
        event::TABLE_NAME,
        Id::String(container.event_key.clone()),
    ));
    let owner = Event::read(db, event_id).await?.ok_or(Error::NotFound)?;
    // Resolved fresh on every call; the store is the only source of
    // truth for which container is the default.
    let fallback = Container::read_or_create_default(db, &owner).await?;

    for song in &songs {
        Song::repoint_to_container(db, song.id.clone(), &fallback).await?;
    }
    for registration in &registrations {
        Registration::repoint_to_container(db, registration.id.clone(), &fallback).await?;
    }
    for file in &audio_files {
        AudioFile::delete(db, file.id.clone()).await?;
    }

    Container::delete(db, id.clone()).await?;
    info!(
        "Deleted container {id}, moved {} song(s) and {} registration(s) to {}",
        songs.len(),
        registrations.len(),
        fallback.id
    );

    Ok(DeletionOutcome {
        deleted: id,
        migrated_to: Some(fallback.id),
        migrated_songs: songs.len(),
        migrated_registrations: registrations.len(),
        removed_audio_files: audio_files.len(),
    })
}
