//! Repository implementations for database access.
//!
//! Each repository wraps a borrowed `PgConnection`, binds every value as a statement parameter,
//! and returns models from [`crate::db::models`]:
//!
//! - [`Students`]: student rows and the enrolled-student semi-join
//! - [`Courses`]: course rows, the optional teacher filter, full-field updates
//! - [`Enrollments`]: enrollment rows
//!
//! ```ignore
//! use uniapi::db::handlers::Students;
//!
//! let mut conn = pool.acquire().await?;
//! let students = Students::new(&mut conn).list().await?;
//! ```

pub mod courses;
pub mod enrollments;
pub mod students;

pub use courses::Courses;
pub use enrollments::Enrollments;
pub use students::Students;
