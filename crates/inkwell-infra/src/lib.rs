//! # Inkwell Infrastructure
//!
//! Concrete implementations of the repository ports defined in `inkwell-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL storage via SeaORM; without it only
//!   the in-memory store is built

pub mod database;
pub mod memory;

pub use database::{DatabaseConfig, DatabaseConnections};
pub use memory::InMemoryStore;

#[cfg(feature = "postgres")]
pub use database::{
    PostgresCategoryRepository, PostgresPageRepository, PostgresPostRepository,
    PostgresSiteSetupRepository, PostgresTagRepository, PostgresUserRepository,
};
