//! Shared fixtures for the crud and engine tests.

use rstest::fixture;
use surrealdb::sql::Id;

use crate::db::schemas::{
    audio_file::{AudioFile, AudioKind, AudioStatus},
    booking::Booking,
    container::{Container, ContainerKind},
    event::{Event, EventStatus},
    registration::Registration,
    song::Song,
    text_key,
};

/// A fresh ulid per test, to keep derived container ids from colliding
/// across tests sharing one database.
#[fixture]
pub fn ulid() -> String {
    Id::ulid().to_raw()
}

#[must_use]
pub fn arb_event(ulid: &str) -> Event {
    Event {
        id: Event::generate_id(),
        school: format!("School {ulid}").into(),
        date: "2026-03-14".into(),
        status: EventStatus::Planned,
        legacy_id: None,
        booking: None,
    }
}

#[must_use]
pub fn arb_booking(ulid: &str, simplybook_id: Option<i64>) -> Booking {
    Booking {
        id: Booking::generate_id(),
        school: format!("School {ulid}").into(),
        date: "2026-03-14".into(),
        contact_name: format!("Contact {ulid}").into(),
        contact_email: format!("contact-{ulid}@example.com").into(),
        teacher_email: Some(format!("teacher-{ulid}@example.com").into()),
        simplybook_id,
    }
}

/// A regular (class) container with a derived id.
#[must_use]
pub fn arb_class(event: &Event, name: &str) -> Container {
    Container {
        id: Container::derive_id(&event.school, &event.date, name),
        name: name.into(),
        kind: ContainerKind::Regular,
        event_key: text_key(&event.id),
        event_link: None,
        child_count: Some(24),
        members: None,
        is_default: false,
        display_order: None,
    }
}

/// A group container over the given members, with a random id.
#[must_use]
pub fn arb_group(event: &Event, name: &str, members: Vec<&Container>) -> Container {
    Container {
        id: Container::generate_id(),
        name: name.into(),
        kind: ContainerKind::Group,
        event_key: text_key(&event.id),
        event_link: None,
        child_count: None,
        members: Some(members.into_iter().map(|m| m.id.clone()).collect()),
        is_default: false,
        display_order: None,
    }
}

#[must_use]
pub fn arb_song(event: &Event, container: &Container, title: &str) -> Song {
    Song {
        id: Song::generate_id(),
        title: title.into(),
        artist: None,
        notes: None,
        container_key: text_key(&container.id),
        event_key: text_key(&event.id),
        container_link: None,
        event_link: None,
        order: None,
        album_order: None,
    }
}

#[must_use]
pub fn arb_registration(event: &Event, container: &Container, ulid: &str) -> Registration {
    Registration {
        id: Registration::generate_id(),
        child_name: format!("Child {ulid}").into(),
        parent_email: format!("parent-{ulid}@example.com").into(),
        container_key: text_key(&container.id),
        event_key: text_key(&event.id),
        container_link: None,
        event_link: None,
    }
}

/// An audio file attached to a song, or directly to a container when
/// `song` is `None`.
#[must_use]
pub fn arb_audio_file(
    event: &Event,
    song: Option<&Song>,
    container: Option<&Container>,
    ulid: &str,
) -> AudioFile {
    AudioFile {
        id: AudioFile::generate_id(),
        kind: AudioKind::Raw,
        status: AudioStatus::Pending,
        approved: false,
        storage_key: format!("uploads/{ulid}.wav").into(),
        duration: None,
        song_key: song.map(|s| text_key(&s.id)),
        container_key: container.map(|c| text_key(&c.id)),
        event_key: text_key(&event.id),
        song_link: None,
        container_link: None,
        event_link: None,
    }
}
