//! Cache Module
//!
//! Provides get-or-fill groups with lazy TTL expiration and a registry of
//! named groups.

mod entry;
mod fill;
mod group;
mod registry;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub(crate) use entry::CacheEntry;
pub use fill::FillFn;
pub use group::Group;
pub use registry::Cache;
