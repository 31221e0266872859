//! Video metadata persistence
//!
//! [`VideoRepository`] is the seam the API depends on. [`PgVideoRepository`] stores
//! records in PostgreSQL; [`InMemoryVideoRepository`] keeps them in a map for tests and
//! local tooling.

pub mod memory;
pub mod postgres;
pub mod repository;

pub use memory::InMemoryVideoRepository;
pub use postgres::{create_pool, run_migrations, PgVideoRepository};
pub use repository::VideoRepository;
