//! # entag-db
//!
//! PostgreSQL storage layer for entag.
//!
//! This crate provides:
//! - Connection pool management
//! - Idempotent schema bootstrap for the tag tables
//! - [`PgTagRepository`], the tag reconciler maintaining the tag registry,
//!   the entity-tag join table, and the per-tag frequency counter
//!
//! ## Example
//!
//! ```rust,ignore
//! use entag_core::{RequestContext, TagRepository};
//! use entag_db::{create_pool, ensure_schema, PgTagRepository};
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool("postgres://localhost/entag").await?;
//!     ensure_schema(&pool).await?;
//!
//!     let repo = PgTagRepository::new(pool);
//!     let ctx = RequestContext::new(tenant_id, user_id);
//!
//!     // Entity saved: its tag attribute changed from "a, b" to "b, c".
//!     let delta = repo
//!         .reconcile(&ctx, entity_id, "post", "a, b", "b, c")
//!         .await?;
//!     assert_eq!(delta.added, vec!["c"]);
//!     Ok(())
//! }
//! ```

pub mod pool;
pub mod schema;
pub mod tags;

// Test fixtures for integration tests
// Note: Always compiled so integration tests (in tests/) can use DEFAULT_TEST_DATABASE_URL
pub mod test_fixtures;

// Re-export core types
pub use entag_core::*;

pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use schema::{ensure_schema, SCHEMA_STATEMENTS};
pub use tags::PgTagRepository;
