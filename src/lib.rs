//! Gache - An in-process get-or-fill cache
//!
//! Provides lazily-populated key/value groups with per-group TTL expiration
//! and fill-on-miss callbacks, plus a registry of named groups.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{Cache, FillFn, Group};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
