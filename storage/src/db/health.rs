//! this module holds the implementations of functions needed for the health check of the database

use surrealdb::sql::{Id, Thing};
use surrealdb::{Connection, Surreal};
use tracing::instrument;

use crate::{
    db::schemas::{
        container::{self, Container},
        event::{self, Event},
        song::Song,
    },
    errors::Error,
};

/// Count the number of events in the database
#[instrument]
pub async fn count_events<C: Connection>(db: &Surreal<C>) -> Result<usize, Error> {
    Ok(Event::read_all(db).await?.len())
}

/// Count the number of containers in the database
#[instrument]
pub async fn count_containers<C: Connection>(db: &Surreal<C>) -> Result<usize, Error> {
    Ok(Container::read_all(db).await?.len())
}

/// Count the number of songs in the database
#[instrument]
pub async fn count_songs<C: Connection>(db: &Surreal<C>) -> Result<usize, Error> {
    Ok(Song::read_all(db).await?.len())
}

/// Count songs whose container text key no longer resolves to a
/// container record.
///
/// The deletion engine keeps this at zero; a nonzero count means a
/// migration was interrupted before its final retry.
#[instrument]
pub async fn count_orphaned_songs<C: Connection>(db: &Surreal<C>) -> Result<usize, Error> {
    let mut orphans = 0;
    for song in Song::read_all(db).await? {
        let container_id = Thing::from((
            container::TABLE_NAME,
            Id::String(song.container_key.clone()),
        ));
        if Container::read(db, container_id).await?.is_none() {
            orphans += 1;
        }
    }
    Ok(orphans)
}

/// Count containers whose event text key no longer resolves to an
/// event record.
#[instrument]
pub async fn count_orphaned_containers<C: Connection>(db: &Surreal<C>) -> Result<usize, Error> {
    let mut orphans = 0;
    for container in Container::read_all(db).await? {
        let event_id = Thing::from((event::TABLE_NAME, Id::String(container.event_key.clone())));
        if Event::read(db, event_id).await?.is_none() {
            orphans += 1;
        }
    }
    Ok(orphans)
}
