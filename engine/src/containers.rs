//! Container lifecycle: classes, groups, and cross-class collections.
//!
//! Every operation here takes an already-resolved event (see
//! [`crate::resolver`]) and confines its side effects to the record
//! store; there is no direct external I/O.

use std::sync::Arc;

use log::warn;
use surrealdb::{Connection, Surreal};
use tracing::instrument;

use recital_storage::db::schemas::{
    audio_file::AudioFile,
    container::{Container, ContainerChangeSet, ContainerId, ContainerKind, DEFAULT_CONTAINER_NAME},
    registration::Registration,
    song::Song,
    text_key,
};

use crate::{errors::Error, resolver::ResolvedEvent};

/// A container plus the best-effort counts shown in event listings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerSummary {
    pub container: Container,
    /// How many songs the container holds. Display-only; degrades to
    /// zero if the count cannot be read.
    pub song_count: usize,
    /// How many registrations the container holds. Display-only;
    /// degrades to zero if the count cannot be read.
    pub registration_count: usize,
}

/// Everything a container holds: its songs and every audio file
/// attached to the container or one of its songs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerContents {
    pub container: Container,
    pub songs: Vec<Song>,
    pub audio_files: Vec<AudioFile>,
}

/// The updatable surface of a container: rename and/or child-count.
/// Kind and event ownership never change after creation.
#[derive(Clone, Debug, Default)]
pub struct ContainerUpdate {
    pub name: Option<Arc<str>>,
    pub child_count: Option<Option<u32>>,
}

/// Create a class container.
///
/// The identifier is derived deterministically from (school, date,
/// name), so creating the same class twice is a no-op success that
/// returns the existing container.
///
/// # Errors
///
/// Returns [`Error::Validation`] if the name collides with the event's
/// default container, or an existing container of another kind already
/// holds the name.
#[instrument(skip(db))]
pub async fn create_class<C: Connection>(
    db: &Surreal<C>,
    event: &ResolvedEvent,
    name: &str,
    child_count: Option<u32>,
) -> Result<Container, Error> {
    create_derived(db, event, name, ContainerKind::Regular, child_count).await
}

/// Create a cross-class collection (choir or teacher-song) container.
///
/// Identical to [`create_class`] but tagged with the collection kind
/// and carrying no child-count.
///
/// # Errors
///
/// Returns [`Error::Validation`] if `kind` is not a collection kind or
/// the name collides with the event's default container.
#[instrument(skip(db))]
pub async fn create_collection<C: Connection>(
    db: &Surreal<C>,
    event: &ResolvedEvent,
    name: &str,
    kind: ContainerKind,
) -> Result<Container, Error> {
    if !kind.is_collection() {
        return Err(Error::Validation(format!(
            "{kind:?} is not a collection kind"
        )));
    }
    create_derived(db, event, name, kind, None).await
}

async fn create_derived<C: Connection>(
    db: &Surreal<C>,
    event: &ResolvedEvent,
    name: &str,
    kind: ContainerKind,
    child_count: Option<u32>,
) -> Result<Container, Error> {
    let id = Container::derive_id(&event.event.school, &event.event.date, name);

    // The default container's derived id must stay free even before the
    // default itself is created, otherwise read_or_create_default can
    // never claim it.
    let reserved =
        Container::derive_id(&event.event.school, &event.event.date, DEFAULT_CONTAINER_NAME);
    if id == reserved {
        return Err(Error::Validation(format!(
            "Name {name:?} is reserved for the event's default container"
        )));
    }

    if let Some(existing) = Container::read(db, id.clone()).await? {
        if existing.kind != kind {
            return Err(Error::Validation(format!(
                "Container {name:?} already exists with kind {:?}",
                existing.kind
            )));
        }
        return Ok(existing);
    }

    let container = Container {
        id,
        name: name.into(),
        kind,
        event_key: text_key(&event.id),
        event_link: None,
        child_count,
        members: None,
        is_default: false,
        display_order: None,
    };

    Container::create(db, container)
        .await?
        .ok_or(recital_storage::errors::Error::NotCreated.into())
}

/// Create a group: multiple classes of one event sharing songs.
///
/// # Errors
///
/// Returns [`Error::Validation`] if fewer than two members are given,
/// or any member does not exist, or any member belongs to another
/// event.
#[instrument(skip(db))]
pub async fn create_group<C: Connection>(
    db: &Surreal<C>,
    event: &ResolvedEvent,
    name: &str,
    members: Vec<ContainerId>,
) -> Result<Container, Error> {
    if members.len() < 2 {
        return Err(Error::Validation(format!(
            "A group needs at least two member containers, got {}",
            members.len()
        )));
    }

    let event_key = text_key(&event.id);
    for member_id in &members {
        let Some(member) = Container::read(db, member_id.clone()).await? else {
            return Err(Error::Validation(format!(
                "Member container {member_id} does not exist"
            )));
        };
        if member.event_key != event_key {
            return Err(Error::Validation(format!(
                "Member container {member_id} belongs to another event"
            )));
        }
    }

    let container = Container {
        id: Container::generate_id(),
        name: name.into(),
        kind: ContainerKind::Group,
        event_key,
        event_link: None,
        child_count: None,
        members: Some(members),
        is_default: false,
        display_order: None,
    };

    Container::create(db, container)
        .await?
        .ok_or(recital_storage::errors::Error::NotCreated.into())
}

/// Rename a container and/or update its child-count.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the container does not exist.
#[instrument(skip(db))]
pub async fn update_container<C: Connection>(
    db: &Surreal<C>,
    id: ContainerId,
    update: ContainerUpdate,
) -> Result<Container, Error> {
    let changes = ContainerChangeSet {
        name: update.name,
        child_count: update.child_count,
        ..Default::default()
    };

    Container::update(db, id, changes)
        .await?
        .ok_or(Error::NotFound)
}

/// List every container of an event with its song and registration
/// counts.
///
/// The counts are display-only: if one cannot be read it degrades to
/// zero with a warning rather than failing the whole listing.
#[instrument(skip(db))]
pub async fn list_containers_for_event<C: Connection>(
    db: &Surreal<C>,
    event: &ResolvedEvent,
) -> Result<Vec<ContainerSummary>, Error> {
    let containers = Container::read_for_event(db, &event.event).await?;

    let mut summaries = Vec::with_capacity(containers.len());
    for container in containers {
        let song_count = match Song::read_for_container(db, &container).await {
            Ok(songs) => songs.len(),
            Err(e) => {
                warn!("Could not count songs of {}: {e}", container.id);
                0
            }
        };
        let registration_count = match Registration::read_for_container(db, &container).await {
            Ok(registrations) => registrations.len(),
            Err(e) => {
                warn!("Could not count registrations of {}: {e}", container.id);
                0
            }
        };
        summaries.push(ContainerSummary {
            container,
            song_count,
            registration_count,
        });
    }

    Ok(summaries)
}

/// Read a container together with its songs and audio files (both the
/// files attached directly to the container and those attached to its
/// songs).
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the container does not exist.
#[instrument(skip(db))]
pub async fn songs_and_audio_for_container<C: Connection>(
    db: &Surreal<C>,
    id: ContainerId,
) -> Result<ContainerContents, Error> {
    let container = Container::read(db, id).await?.ok_or(Error::NotFound)?;
    let songs = Song::read_for_container(db, &container).await?;

    let mut audio_files = AudioFile::read_for_container(db, &container).await?;
    for song in &songs {
        audio_files.extend(AudioFile::read_for_song(db, song).await?);
    }

    Ok(ContainerContents {
        container,
        songs,
        audio_files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use pretty_assertions::assert_eq;
    use recital_storage::{
        db::{init_test_database, schemas::event::Event},
        test_utils::{arb_audio_file, arb_class, arb_event, arb_registration, arb_song, ulid},
    };
    use rstest::rstest;
    use surrealdb::{engine::local::Db, Surreal};

    async fn resolved_event(db: &Surreal<Db>, ulid: &str) -> Result<ResolvedEvent> {
        let event = Event::create(db, arb_event(ulid))
            .await?
            .ok_or_else(|| anyhow!("Event not created"))?;
        Ok(ResolvedEvent {
            id: event.id.clone(),
            event,
        })
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_class_twice_is_a_noop_success(ulid: String) -> Result<()> {
        let db = init_test_database().await?;
        let event = resolved_event(&db, &ulid).await?;

        let first = create_class(&db, &event, "Year 3 Blue", Some(28)).await?;
        let second = create_class(&db, &event, "Year 3 Blue", Some(28)).await?;

        assert_eq!(first.id, second.id);
        assert_eq!(first, second);
        assert_eq!(Container::read_for_event(&db, &event.event).await?.len(), 1);
        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_class_rejects_default_name(ulid: String) -> Result<()> {
        let db = init_test_database().await?;
        let event = resolved_event(&db, &ulid).await?;
        Container::read_or_create_default(&db, &event.event).await?;

        let result = create_class(&db, &event, "All Children", None).await;

        assert!(matches!(result, Err(Error::Validation(_))));
        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_class_rejects_default_name_before_default_exists(
        ulid: String,
    ) -> Result<()> {
        let db = init_test_database().await?;
        let event = resolved_event(&db, &ulid).await?;

        // No default container yet: the reserved name must still be
        // refused, or its derived id would be taken by a non-default
        // record and read_or_create_default could never succeed.
        let result = create_class(&db, &event, "All Children", None).await;
        assert!(matches!(result, Err(Error::Validation(_))));

        let default = Container::read_or_create_default(&db, &event.event).await?;
        assert!(default.is_default);
        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_rejects_name_reuse_across_kinds(ulid: String) -> Result<()> {
        let db = init_test_database().await?;
        let event = resolved_event(&db, &ulid).await?;

        let choir = create_collection(&db, &event, "School Choir", ContainerKind::Choir).await?;
        assert_eq!(choir.kind, ContainerKind::Choir);

        let as_class = create_class(&db, &event, "School Choir", None).await;
        assert!(matches!(as_class, Err(Error::Validation(_))));

        let as_teacher_song =
            create_collection(&db, &event, "School Choir", ContainerKind::TeacherSong).await;
        assert!(matches!(as_teacher_song, Err(Error::Validation(_))));
        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_collection_rejects_non_collection_kind(ulid: String) -> Result<()> {
        let db = init_test_database().await?;
        let event = resolved_event(&db, &ulid).await?;

        let choir = create_collection(&db, &event, "School Choir", ContainerKind::Choir).await?;
        assert_eq!(choir.kind, ContainerKind::Choir);
        assert_eq!(choir.child_count, None);

        let result = create_collection(&db, &event, "Nope", ContainerKind::Regular).await;
        assert!(matches!(result, Err(Error::Validation(_))));
        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_group_needs_two_members_of_same_event(ulid: String) -> Result<()> {
        let db = init_test_database().await?;
        let event = resolved_event(&db, &ulid).await?;
        let other = resolved_event(&db, &format!("{ulid}-other")).await?;

        let a = create_class(&db, &event, "Year 1", None).await?;
        let b = create_class(&db, &event, "Year 2", None).await?;
        let foreign = create_class(&db, &other, "Year 1", None).await?;

        let too_few = create_group(&db, &event, "Infants", vec![a.id.clone()]).await;
        assert!(matches!(too_few, Err(Error::Validation(_))));

        let cross_event =
            create_group(&db, &event, "Infants", vec![a.id.clone(), foreign.id]).await;
        assert!(matches!(cross_event, Err(Error::Validation(_))));

        let group = create_group(&db, &event, "Infants", vec![a.id.clone(), b.id.clone()]).await?;
        assert_eq!(group.kind, ContainerKind::Group);
        assert_eq!(group.members, Some(vec![a.id, b.id]));
        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_container_renames_and_recounts(ulid: String) -> Result<()> {
        let db = init_test_database().await?;
        let event = resolved_event(&db, &ulid).await?;
        let class = create_class(&db, &event, "Year 3 Blue", Some(28)).await?;

        let updated = update_container(
            &db,
            class.id.clone(),
            ContainerUpdate {
                name: Some("Year 3 Cobalt".into()),
                child_count: Some(Some(30)),
            },
        )
        .await?;

        assert_eq!(updated.name.as_ref(), "Year 3 Cobalt");
        assert_eq!(updated.child_count, Some(30));
        assert_eq!(updated.kind, class.kind);
        assert_eq!(updated.event_key, class.event_key);
        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_list_containers_counts_songs_and_registrations(ulid: String) -> Result<()> {
        let db = init_test_database().await?;
        let event = resolved_event(&db, &ulid).await?;
        let class = create_class(&db, &event, "Year 3 Blue", None).await?;
        Song::create(&db, arb_song(&event.event, &class, "Twinkle Twinkle")).await?;
        Song::create(&db, arb_song(&event.event, &class, "Frère Jacques")).await?;
        Registration::create(&db, arb_registration(&event.event, &class, &ulid)).await?;

        let summaries = list_containers_for_event(&db, &event).await?;

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].song_count, 2);
        assert_eq!(summaries[0].registration_count, 1);
        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_container_contents_include_song_audio(ulid: String) -> Result<()> {
        let db = init_test_database().await?;
        let event = resolved_event(&db, &ulid).await?;
        let class = create_class(&db, &event, "Year 3 Blue", None).await?;
        let song = Song::create(&db, arb_song(&event.event, &class, "Twinkle Twinkle"))
            .await?
            .ok_or_else(|| anyhow!("Song not created"))?;
        AudioFile::create(&db, arb_audio_file(&event.event, Some(&song), None, &ulid)).await?;
        AudioFile::create(
            &db,
            arb_audio_file(&event.event, None, Some(&class), &format!("{ulid}-c")),
        )
        .await?;

        let contents = songs_and_audio_for_container(&db, class.id).await?;

        assert_eq!(contents.songs.len(), 1);
        assert_eq!(contents.audio_files.len(), 2);
        Ok(())
    }
}
