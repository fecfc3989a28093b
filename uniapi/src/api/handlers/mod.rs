//! HTTP request handlers, one module per resource.
//!
//! Every handler follows the same shape: read the query string and/or JSON body, check that all
//! required fields are present, make at most one call to the
//! [`UniversityStore`](crate::db::store::UniversityStore), and map the outcome to a status code
//! and JSON envelope. Failures are returned as [`crate::errors::Error`].

pub mod courses;
pub mod enrollments;
pub mod students;
