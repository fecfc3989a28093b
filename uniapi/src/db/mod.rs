//! Database layer.
//!
//! - [`models`]: row types and create/update requests
//! - [`handlers`]: per-table repositories over a Postgres connection
//! - [`store`]: the [`UniversityStore`](store::UniversityStore) trait and its Postgres implementation
//! - [`memory`]: an in-process implementation of the same trait
//! - [`errors`]: [`DbError`](errors::DbError), the classified failure type shared by both stores
//!
//! The schema lives in `migrations/` and is applied at startup through [`crate::migrator`].

pub mod errors;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod store;
