//! Error types for the cache
//!
//! Provides unified error handling using thiserror. Misses are not errors:
//! lookups report them as `None`.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for group registry operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A group with this name is already registered
    #[error("Group already exists: {0}")]
    AlreadyExists(String),

    /// No group with this name is registered
    #[error("Group not found: {0}")]
    NotFound(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_group() {
        assert_eq!(
            CacheError::AlreadyExists("users".to_string()).to_string(),
            "Group already exists: users"
        );
        assert_eq!(
            CacheError::NotFound("sessions".to_string()).to_string(),
            "Group not found: sessions"
        );
    }
}
