//! Common type definitions.
//!
//! All entity IDs are UUIDs (v4, generated server-side at creation) wrapped in type aliases:
//!
//! - [`StudentId`]: Student identifier
//! - [`CourseId`]: Course identifier
//! - [`EnrollmentId`]: Enrollment identifier

use uuid::Uuid;

// Type aliases for IDs
pub type StudentId = Uuid;
pub type CourseId = Uuid;
pub type EnrollmentId = Uuid;

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}

/// Parse an identifier received as free text (query string or JSON body).
///
/// Identifiers are only ever minted by this service, so text that is not a UUID cannot refer to
/// any stored row.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
