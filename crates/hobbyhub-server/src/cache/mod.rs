//! Login cache.
//!
//! ```text
//! login → cache (user:<name>) → credential store
//! ```
//!
//! The backend is either an in-process map (single instance) or Redis
//! (shared between instances). Entries expire after `cache.user_ttl_secs`.

pub mod backend;
pub mod user;

pub use backend::{CacheBackend, CacheError, CacheStats, CachedEntry};
pub use user::{UserSnapshot, cache_key};
