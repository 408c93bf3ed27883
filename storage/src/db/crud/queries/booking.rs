use surrealdb::opt::IntoQuery;

use super::generic::{read_by_field, read_one_by_field};
use crate::db::schemas::booking::TABLE_NAME;

/// Query to read a booking by the identifier the legacy booking system
/// minted for it.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM booking WHERE simplybook_id = $simplybook_id LIMIT 1
/// ```
#[must_use]
#[inline]
pub fn read_by_simplybook_id() -> impl IntoQuery {
    read_one_by_field(TABLE_NAME, "simplybook_id", "simplybook_id")
}

/// Query to read every booking owned by a teacher email.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM booking WHERE teacher_email = $email
/// ```
#[must_use]
#[inline]
pub fn read_for_teacher_email() -> impl IntoQuery {
    read_by_field(TABLE_NAME, "teacher_email", "email")
}
