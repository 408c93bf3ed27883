pub mod crud;
pub mod health;
pub mod schemas;

use std::path::PathBuf;

use log::info;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use surrealdb::engine::local::{Db, Mem, SurrealKv};
use surrealdb::Surreal;
use surrealqlx::register_tables;

use schemas::{
    audio_file::AudioFile, booking::Booking, container::Container, event::Event,
    registration::Registration, song::Song,
};

/// Which representation of containment the backing store is in.
///
/// The store is being migrated from a flat schema (containment expressed
/// only through plain text keys) to a normalized schema (containment
/// additionally expressed through record links). The mode is chosen once
/// at process startup and read on every storage call; it is never changed
/// at runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaMode {
    /// Containment is expressed via plain text foreign keys only.
    #[default]
    Legacy,
    /// Containment is additionally expressed via typed record links.
    /// Writes populate both representations so legacy readers keep
    /// working during the migration; reads union both and deduplicate.
    Normalized,
}

static SCHEMA_MODE: OnceCell<SchemaMode> = OnceCell::new();

/// Select the process-wide schema mode.
///
/// The first call wins; later calls are ignored.
pub fn set_schema_mode(mode: SchemaMode) {
    if SCHEMA_MODE.set(mode).is_ok() {
        info!("Schema mode set to {mode:?}");
    }
}

/// The process-wide schema mode, defaulting to [`SchemaMode::Legacy`]
/// if [`set_schema_mode`] was never called.
pub fn schema_mode() -> SchemaMode {
    *SCHEMA_MODE.get_or_init(SchemaMode::default)
}

/// Open (or create) the events database at the given path and register
/// the table schemas.
///
/// # Errors
///
/// This function will return an error if the database cannot be opened
/// or the table definitions cannot be applied.
pub async fn init_database(path: PathBuf) -> surrealdb::Result<Surreal<Db>> {
    let db = Surreal::new::<SurrealKv>(path).await?;
    db.use_ns("recital").await?;
    db.use_db("events").await?;

    register_tables!(
        &db,
        Event,
        Booking,
        Container,
        Song,
        AudioFile,
        Registration
    )?;
    info!("Connected to events database");

    Ok(db)
}

/// Create a fresh in-memory database for tests.
///
/// # Errors
///
/// This function will return an error if the database cannot be started
/// or the table definitions cannot be applied.
pub async fn init_test_database() -> surrealdb::Result<Surreal<Db>> {
    let db = Surreal::new::<Mem>(()).await?;
    db.use_ns("test").await?;
    db.use_db("test").await?;

    register_tables!(
        &db,
        Event,
        Booking,
        Container,
        Song,
        AudioFile,
        Registration
    )?;

    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mode_is_set_once() {
        set_schema_mode(SchemaMode::Legacy);
        assert_eq!(schema_mode(), SchemaMode::Legacy);

        // a second call must not override the first
        set_schema_mode(SchemaMode::Normalized);
        assert_eq!(schema_mode(), SchemaMode::Legacy);
    }

    #[tokio::test]
    async fn test_init_test_database() {
        let db = init_test_database().await;
        assert!(db.is_ok());
    }

    #[tokio::test]
    async fn test_init_database_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let db = init_database(dir.path().join("events.db")).await;
        assert!(db.is_ok());
    }
}
