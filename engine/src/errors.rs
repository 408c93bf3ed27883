//! Error taxonomy for the service layer.
//!
//! `NotFound`, `Validation`, `Forbidden`, and `Ownership` are terminal
//! and surfaced to the caller verbatim. [`Error::DataAttached`] is a
//! recoverable signal: callers present the counts to a human and
//! re-invoke with confirmation. Backing-store errors propagate
//! unwrapped through [`Error::Storage`].

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Storage(#[from] recital_storage::errors::Error),
    #[error("Event, container, or song not found")]
    NotFound,
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("The default container cannot be deleted")]
    Forbidden,
    #[error("Container has attached data: {song_count} song(s), {registration_count} registration(s), {audio_file_count} audio file(s); confirm the move to proceed")]
    DataAttached {
        song_count: usize,
        registration_count: usize,
        audio_file_count: usize,
    },
    #[error("Caller does not have access to this event")]
    Ownership,
}
