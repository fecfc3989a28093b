//! API request/response models.
//!
//! Request bodies use `Option` for every field so that presence can be checked field by field
//! (see [`crate::api::validation`]). Responses convert from the database models with `From`.

pub mod courses;
pub mod enrollments;
pub mod responses;
pub mod students;
