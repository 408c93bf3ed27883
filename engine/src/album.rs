//! Event-wide album ordering.
//!
//! The printed/delivered album sequences every song of an event across
//! all its containers. Reads normalize the stored `album_order` values
//! to a dense `1..N` sequence on the fly; writes persist the submitted
//! ordering and keep each container's `display_order` at the minimum
//! album position of its songs, so printed layouts can sort containers
//! by first appearance.

use std::collections::HashMap;
use std::sync::Arc;

use log::warn;
use surrealdb::{Connection, Surreal};
use tracing::instrument;

use recital_storage::db::schemas::{
    container::{Container, ContainerChangeSet, ContainerId, ContainerKind},
    song::{Song, SongChangeSet, SongId},
    text_key,
};

use crate::{errors::Error, resolver::ResolvedEvent};

/// One row of the event-wide album listing: a song joined with its
/// container's display name and kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlbumTrack {
    pub song_id: SongId,
    pub title: Arc<str>,
    pub artist: Option<Arc<str>>,
    /// Dense `1..N` position within the event's album.
    pub album_order: u32,
    pub container_id: ContainerId,
    pub container_name: Arc<str>,
    pub container_kind: ContainerKind,
}

/// One submitted track of an [`update_album_order`] request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackUpdate {
    pub song_id: SongId,
    /// The new album position.
    pub album_order: u32,
    /// A new title for the song, if renamed alongside the reorder.
    pub title: Option<Arc<str>>,
    /// A new display name for the song's container, if renamed
    /// alongside the reorder.
    pub container_name: Option<Arc<str>>,
}

/// The event's album listing: every song of every container, sorted by
/// album order and renumbered to a dense `1..N` sequence.
///
/// The renumbering is a read-time normalization only; nothing is
/// persisted. Songs without an album order sort after those with one,
/// in entry order.
#[instrument(skip(db))]
pub async fn album_tracks<C: Connection>(
    db: &Surreal<C>,
    event: &ResolvedEvent,
) -> Result<Vec<AlbumTrack>, Error> {
    let mut songs = Song::read_for_event(db, &event.event).await?;
    let containers = Container::read_for_event(db, &event.event).await?;
    let by_key: HashMap<String, &Container> = containers
        .iter()
        .map(|c| (text_key(&c.id), c))
        .collect();

    // stable: unordered songs keep their entry order at the tail
    songs.sort_by_key(|s| (s.album_order.is_none(), s.album_order, s.order));

    let mut tracks = Vec::with_capacity(songs.len());
    for song in songs {
        let Some(container) = by_key.get(&song.container_key) else {
            warn!(
                "Song {} references missing container {}; omitting from album",
                song.id, song.container_key
            );
            continue;
        };
        tracks.push(AlbumTrack {
            song_id: song.id,
            title: song.title,
            artist: song.artist,
            album_order: u32::try_from(tracks.len()).unwrap_or(u32::MAX) + 1,
            container_id: container.id.clone(),
            container_name: container.name.clone(),
            container_kind: container.kind,
        });
    }

    Ok(tracks)
}

/// Apply a submitted album ordering.
///
/// Writes each track's new `album_order` (and title, if given), renames
/// each distinct container a new display name was given for, then
/// recomputes every container's `display_order` as the minimum album
/// order among its songs. Groups are excluded from `display_order`
/// bookkeeping; they have no independent print position.
///
/// No rollback is attempted on partial failure: every per-track and
/// per-container write is independent and idempotent under retry.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if a submitted song does not belong to
/// the event.
#[instrument(skip(db))]
pub async fn update_album_order<C: Connection>(
    db: &Surreal<C>,
    event: &ResolvedEvent,
    updates: Vec<TrackUpdate>,
) -> Result<(), Error> {
    let known: HashMap<SongId, String> = Song::read_for_event(db, &event.event)
        .await?
        .into_iter()
        .map(|s| (s.id, s.container_key))
        .collect();

    let mut renames: HashMap<String, Arc<str>> = HashMap::new();
    for update in updates {
        let Some(container_key) = known.get(&update.song_id) else {
            return Err(Error::NotFound);
        };
        if let Some(name) = update.container_name {
            renames.insert(container_key.clone(), name);
        }

        let changes = SongChangeSet {
            title: update.title,
            album_order: Some(Some(update.album_order)),
            ..Default::default()
        };
        Song::update(db, update.song_id, changes)
            .await?
            .ok_or(Error::NotFound)?;
    }

    let songs = Song::read_for_event(db, &event.event).await?;
    for container in Container::read_for_event(db, &event.event).await? {
        let key = text_key(&container.id);
        let mut changes = ContainerChangeSet::default();

        if let Some(name) = renames.get(&key) {
            if *name != container.name {
                changes.name = Some(name.clone());
            }
        }

        if container.kind != ContainerKind::Group {
            let first_position = songs
                .iter()
                .filter(|s| s.container_key == key)
                .filter_map(|s| s.album_order)
                .min();
            if first_position != container.display_order {
                changes.display_order = Some(first_position);
            }
        }

        if changes.name.is_some() || changes.display_order.is_some() {
            Container::update(db, container.id, changes).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use pretty_assertions::assert_eq;
    use recital_storage::{
        db::{init_test_database, schemas::event::Event},
        test_utils::{arb_class, arb_event, arb_group, arb_song, ulid},
    };
    use rstest::rstest;
    use surrealdb::engine::local::Db;

    async fn fixture_event(db: &Surreal<Db>, ulid: &str) -> Result<ResolvedEvent> {
        let event = Event::create(db, arb_event(ulid))
            .await?
            .ok_or_else(|| anyhow!("Event not created"))?;
        Ok(ResolvedEvent {
            id: event.id.clone(),
            event,
        })
    }

    async fn fixture_song(
        db: &Surreal<Db>,
        event: &ResolvedEvent,
        container: &Container,
        title: &str,
        album_order: Option<u32>,
    ) -> Result<Song> {
        let mut song = arb_song(&event.event, container, title);
        song.album_order = album_order;
        Song::create(db, song)
            .await?
            .ok_or_else(|| anyhow!("Song not created"))
    }

    #[rstest]
    #[tokio::test]
    async fn test_album_tracks_are_densely_numbered(ulid: String) -> Result<()> {
        let db = init_test_database().await?;
        let event = fixture_event(&db, &ulid).await?;
        let class = Container::create(&db, arb_class(&event.event, "Year 3 Blue"))
            .await?
            .ok_or_else(|| anyhow!("Container not created"))?;
        // gappy stored orders, plus one song with none at all
        fixture_song(&db, &event, &class, "Third", Some(9)).await?;
        fixture_song(&db, &event, &class, "First", Some(2)).await?;
        fixture_song(&db, &event, &class, "Last", None).await?;
        fixture_song(&db, &event, &class, "Second", Some(5)).await?;

        let tracks = album_tracks(&db, &event).await?;

        let titles: Vec<&str> = tracks.iter().map(|t| t.title.as_ref()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third", "Last"]);
        let orders: Vec<u32> = tracks.iter().map(|t| t.album_order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);
        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_reorder_permutation_stays_dense(ulid: String) -> Result<()> {
        let db = init_test_database().await?;
        let event = fixture_event(&db, &ulid).await?;
        let blue = Container::create(&db, arb_class(&event.event, "Year 3 Blue"))
            .await?
            .ok_or_else(|| anyhow!("Container not created"))?;
        let red = Container::create(&db, arb_class(&event.event, "Year 4 Red"))
            .await?
            .ok_or_else(|| anyhow!("Container not created"))?;
        let a = fixture_song(&db, &event, &blue, "A", Some(1)).await?;
        let b = fixture_song(&db, &event, &red, "B", Some(2)).await?;
        let c = fixture_song(&db, &event, &blue, "C", Some(3)).await?;

        let permutation = vec![
            TrackUpdate {
                song_id: c.id,
                album_order: 1,
                title: None,
                container_name: None,
            },
            TrackUpdate {
                song_id: a.id,
                album_order: 2,
                title: None,
                container_name: None,
            },
            TrackUpdate {
                song_id: b.id,
                album_order: 3,
                title: None,
                container_name: None,
            },
        ];
        update_album_order(&db, &event, permutation).await?;

        let tracks = album_tracks(&db, &event).await?;
        let titles: Vec<&str> = tracks.iter().map(|t| t.title.as_ref()).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
        let orders: Vec<u32> = tracks.iter().map(|t| t.album_order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_reorder_propagates_renames_and_display_order(ulid: String) -> Result<()> {
        let db = init_test_database().await?;
        let event = fixture_event(&db, &ulid).await?;
        let blue = Container::create(&db, arb_class(&event.event, "Year 3 Blue"))
            .await?
            .ok_or_else(|| anyhow!("Container not created"))?;
        let red = Container::create(&db, arb_class(&event.event, "Year 4 Red"))
            .await?
            .ok_or_else(|| anyhow!("Container not created"))?;
        let a = fixture_song(&db, &event, &red, "A", None).await?;
        let b = fixture_song(&db, &event, &blue, "B", None).await?;
        let c = fixture_song(&db, &event, &red, "C", None).await?;

        update_album_order(
            &db,
            &event,
            vec![
                TrackUpdate {
                    song_id: a.id.clone(),
                    album_order: 1,
                    title: Some("A (reprise)".into()),
                    container_name: Some("Year 4 Crimson".into()),
                },
                TrackUpdate {
                    song_id: b.id,
                    album_order: 2,
                    title: None,
                    container_name: None,
                },
                TrackUpdate {
                    song_id: c.id,
                    album_order: 3,
                    title: None,
                    container_name: None,
                },
            ],
        )
        .await?;

        let renamed_song = Song::read(&db, a.id)
            .await?
            .ok_or_else(|| anyhow!("Song not found"))?;
        assert_eq!(renamed_song.title.as_ref(), "A (reprise)");

        let renamed = Container::read(&db, red.id)
            .await?
            .ok_or_else(|| anyhow!("Container not found"))?;
        assert_eq!(renamed.name.as_ref(), "Year 4 Crimson");
        assert_eq!(renamed.display_order, Some(1));

        let other = Container::read(&db, blue.id)
            .await?
            .ok_or_else(|| anyhow!("Container not found"))?;
        assert_eq!(other.display_order, Some(2));
        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_groups_are_excluded_from_display_order(ulid: String) -> Result<()> {
        let db = init_test_database().await?;
        let event = fixture_event(&db, &ulid).await?;
        let a = Container::create(&db, arb_class(&event.event, "Year 1"))
            .await?
            .ok_or_else(|| anyhow!("Container not created"))?;
        let b = Container::create(&db, arb_class(&event.event, "Year 2"))
            .await?
            .ok_or_else(|| anyhow!("Container not created"))?;
        let group = Container::create(&db, arb_group(&event.event, "Infants", vec![&a, &b]))
            .await?
            .ok_or_else(|| anyhow!("Container not created"))?;
        let song = fixture_song(&db, &event, &group, "Together", None).await?;

        update_album_order(
            &db,
            &event,
            vec![TrackUpdate {
                song_id: song.id,
                album_order: 1,
                title: None,
                container_name: None,
            }],
        )
        .await?;

        let group = Container::read(&db, group.id)
            .await?
            .ok_or_else(|| anyhow!("Container not found"))?;
        assert_eq!(group.display_order, None);
        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_reorder_rejects_songs_of_other_events(ulid: String) -> Result<()> {
        let db = init_test_database().await?;
        let event = fixture_event(&db, &ulid).await?;
        let other = fixture_event(&db, &format!("{ulid}-other")).await?;
        let foreign_class = Container::create(&db, arb_class(&other.event, "Year 1"))
            .await?
            .ok_or_else(|| anyhow!("Container not created"))?;
        let foreign = fixture_song(&db, &other, &foreign_class, "Elsewhere", None).await?;

        let result = update_album_order(
            &db,
            &event,
            vec![TrackUpdate {
                song_id: foreign.id,
                album_order: 1,
                title: None,
                container_name: None,
            }],
        )
        .await;

        assert!(matches!(result, Err(Error::NotFound)));
        Ok(())
    }
}
