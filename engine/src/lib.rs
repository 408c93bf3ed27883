//! Service layer for school music events.
//!
//! Everything here is a short-lived, stateless request handler over the
//! record store in [`recital_storage`]: resolve an event identity
//! ([`resolver`]), manage its containers ([`containers`]), delete a
//! container after migrating its data ([`deletion`]), and maintain the
//! event-wide album ordering ([`album`]).
//!
//! No operation retries internally and none holds state between calls;
//! multi-step mutations are composed of idempotent sub-writes so
//! caller-level retry is always safe.

pub mod album;
pub mod config;
pub mod containers;
pub mod deletion;
pub mod errors;
pub mod logger;
pub mod resolver;
