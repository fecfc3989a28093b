//! Database record models matching table schemas.
//!
//! Each model struct matches a table created by the migrations in `migrations/` and derives
//! `sqlx::FromRow`. Database models are distinct from the API models in
//! [`crate::api::models`], which convert from them with `From`.
//!
//! - [`students`]: `students` rows and the enrolled-student projection
//! - [`courses`]: `courses` rows plus create/update requests
//! - [`enrollments`]: `enrollments` rows

pub mod courses;
pub mod enrollments;
pub mod students;
