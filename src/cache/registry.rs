//! Cache Registry Module
//!
//! A registry of named groups that also acts as the default, unnamed group.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::cache::{FillFn, Group};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Cache ==
/// Registry of named groups plus a default group.
///
/// The registry lock guards only the name-to-group map. It is always released
/// before a group is used, so registry operations never wait on group work
/// and a slow fill function in one group cannot block group lookups.
#[derive(Debug)]
pub struct Cache<V> {
    /// Default, unnamed partition
    default: Group<V>,
    /// Named partitions
    groups: RwLock<HashMap<String, Arc<Group<V>>>>,
}

impl<V: Clone> Cache<V> {
    // == Constructor ==
    /// Creates a cache whose default group uses `expiration` and `fill`.
    ///
    /// # Arguments
    /// * `expiration` - TTL for the default group, zero = never expires
    /// * `fill` - Optional loader for the default group
    pub fn new(expiration: Duration, fill: Option<FillFn<V>>) -> Self {
        Self {
            default: Group::new(expiration, fill),
            groups: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a cache from configuration.
    pub fn from_config(config: &CacheConfig, fill: Option<FillFn<V>>) -> Self {
        Self::new(config.default_ttl(), fill)
    }

    // == Named Groups ==
    /// Registers a new, empty group.
    ///
    /// Fails with `AlreadyExists` if the name is taken.
    pub fn new_group(
        &self,
        name: impl Into<String>,
        expiration: Duration,
        fill: Option<FillFn<V>>,
    ) -> Result<()> {
        let name = name.into();
        let mut groups = self.groups.write();

        match groups.entry(name) {
            Entry::Occupied(occupied) => {
                warn!(group = %occupied.key(), "group already exists");
                Err(CacheError::AlreadyExists(occupied.key().clone()))
            }
            Entry::Vacant(vacant) => {
                info!(group = %vacant.key(), ?expiration, "group created");
                vacant.insert(Arc::new(Group::new(expiration, fill)));
                Ok(())
            }
        }
    }

    /// Retrieves a value from a named group, filling it on a miss.
    ///
    /// An unknown group is reported as a miss.
    pub fn get_group_val(&self, gname: &str, vkey: &str) -> Option<V> {
        self.group(gname)?.get(vkey)
    }

    /// Stores a value in a named group.
    ///
    /// Fails with `NotFound` if the group is not registered.
    pub fn set_group_val(&self, gname: &str, vkey: impl Into<String>, val: V) -> Result<()> {
        match self.group(gname) {
            Some(group) => {
                group.set(vkey, val);
                Ok(())
            }
            None => {
                warn!(group = gname, "set on unknown group");
                Err(CacheError::NotFound(gname.to_string()))
            }
        }
    }

    // == Default Group ==
    /// Retrieves a value from the default group.
    pub fn get(&self, key: &str) -> Option<V> {
        self.default.get(key)
    }

    /// Stores a value in the default group.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.default.set(key, value);
    }
}

impl<V> Cache<V> {
    /// Looks up a named group.
    ///
    /// The returned handle stays usable after the group is deleted.
    pub fn group(&self, name: &str) -> Option<Arc<Group<V>>> {
        self.groups.read().get(name).cloned()
    }

    /// Unregisters a named group. Deleting an unknown group is a no-op.
    pub fn del_group(&self, name: &str) {
        if self.groups.write().remove(name).is_some() {
            info!(group = name, "group deleted");
        }
    }

    /// Removes a value from a named group. An unknown group is a no-op.
    pub fn del_group_val(&self, gname: &str, vkey: &str) {
        if let Some(group) = self.group(gname) {
            group.del(vkey);
        }
    }

    /// Returns the registered group names, sorted.
    pub fn group_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.groups.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the default group.
    pub fn default_group(&self) -> &Group<V> {
        &self.default
    }

    /// Removes a value from the default group.
    pub fn del(&self, key: &str) {
        self.default.del(key);
    }

    /// Replaces the default group's TTL policy.
    pub fn set_expiration(&self, expiration: Duration) {
        self.default.set_expiration(expiration);
    }

    /// Replaces the default group's fill function.
    pub fn set_fill_fn(&self, fill: Option<FillFn<V>>) {
        self.default.set_fill_fn(fill);
    }
}
