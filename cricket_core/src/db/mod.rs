//! PostgreSQL access: pool construction and `cricket_matches` operations.

pub mod matches;
pub mod pool;

pub use matches::{ensure_schema, upsert_matches, DEFAULT_PAGE_SIZE};
pub use pool::{create_pool, DbPoolConfig};
