#![allow(clippy::module_name_repetitions)]
//----------------------------------------------------------------------------------------- std lib
use std::sync::Arc;
//--------------------------------------------------------------------------------- other libraries
use serde::{Deserialize, Serialize};
use surrealdb::sql::{Duration, Id, Thing};
use surrealqlx::Table;
//----------------------------------------------------------------------------------- local modules
use super::container::ContainerId;
use super::event::EventId;
use super::song::SongId;

pub type AudioFileId = Thing;

pub const TABLE_NAME: &str = "audio_file";

/// What stage of the production pipeline an audio file belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioKind {
    /// As uploaded, before transcoding.
    #[default]
    Raw,
    /// Low-quality preview for parents.
    Preview,
    /// The deliverable master.
    Final,
}

/// Whether the external transcoding service has finished with a file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioStatus {
    #[default]
    Pending,
    Ready,
}

/// Metadata about one stored audio file.
///
/// The bytes themselves live in object storage under `storage_key`;
/// transcoding is done by an external collaborator. This crate only
/// tracks the metadata. A file is attached to a song, or directly to a
/// container (group recordings), never both.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Table)]
#[Table("audio_file")]
pub struct AudioFile {
    /// The unique identifier for this [`AudioFile`].
    #[field(dt = "record")]
    pub id: AudioFileId,
    /// Pipeline stage of this file.
    #[field(dt = "string")]
    #[serde(default)]
    pub kind: AudioKind,
    /// Transcoding status of this file.
    #[field(dt = "string")]
    #[serde(default)]
    pub status: AudioStatus,
    /// Whether a teacher has approved this recording.
    #[field(dt = "bool")]
    #[serde(default)]
    pub approved: bool,
    /// Object-storage key where the bytes live.
    #[field(dt = "string")]
    #[index(unique)]
    pub storage_key: Arc<str>,
    /// Duration of the audio, once known.
    #[field(dt = "option<duration>")]
    #[serde(default)]
    pub duration: Option<Duration>,
    /// Text key of the owning [`super::song::Song`], if song-attached.
    #[field(dt = "option<string>")]
    #[index()]
    #[serde(default)]
    pub song_key: Option<String>,
    /// Text key of the owning [`super::container::Container`], if
    /// container-attached.
    #[field(dt = "option<string>")]
    #[index()]
    #[serde(default)]
    pub container_key: Option<String>,
    /// Text key of the owning [`super::event::Event`] (authoritative).
    #[field(dt = "string")]
    #[index()]
    pub event_key: String,
    /// Record link to the owning song (normalized schema only).
    #[field(dt = "option<record<song>>")]
    #[serde(default)]
    pub song_link: Option<SongId>,
    /// Record link to the owning container (normalized schema only).
    #[field(dt = "option<record<container>>")]
    #[serde(default)]
    pub container_link: Option<ContainerId>,
    /// Record link to the owning event (normalized schema only).
    #[field(dt = "option<record<event>>")]
    #[serde(default)]
    pub event_link: Option<EventId>,
}

impl AudioFile {
    #[must_use]
    pub fn generate_id() -> AudioFileId {
        Thing::from((TABLE_NAME, Id::ulid()))
    }
}

#[derive(Debug, Default, Serialize, Clone)]
pub struct AudioFileChangeSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AudioStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Option<Duration>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_key: Option<Arc<str>>,
}
