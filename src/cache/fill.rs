//! Fill Function Module
//!
//! The callback a group invokes on a miss to compute a value on demand.

use std::fmt;
use std::sync::Arc;

use tracing::warn;

/// Shared fill callback: `Some(value)` is a hit, `None` a definitive miss.
pub struct FillFn<V>(Arc<dyn Fn(&str) -> Option<V> + Send + Sync>);

impl<V> FillFn<V> {
    /// Wraps an infallible loader.
    pub fn new<F>(fill: F) -> Self
    where
        F: Fn(&str) -> Option<V> + Send + Sync + 'static,
    {
        Self(Arc::new(fill))
    }

    /// Wraps a loader that can fail.
    ///
    /// A failure is logged and reported to the group as a miss, so the entry
    /// is dropped and the next lookup calls the loader again.
    pub fn fallible<F>(fill: F) -> Self
    where
        F: Fn(&str) -> anyhow::Result<Option<V>> + Send + Sync + 'static,
        V: 'static,
    {
        Self::new(move |key| match fill(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "fill function failed, treating as miss");
                None
            }
        })
    }

    /// Runs the loader for `key`.
    pub fn call(&self, key: &str) -> Option<V> {
        (self.0)(key)
    }
}

impl<V> Clone for FillFn<V> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<V> fmt::Debug for FillFn<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FillFn(..)")
    }
}
