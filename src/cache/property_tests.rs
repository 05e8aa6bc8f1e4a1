//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check group and registry behavior over generated inputs.

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{Cache, FillFn, Group};
use crate::error::CacheError;

// == Strategies ==
/// Generates cache keys, including the empty key
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{0,32}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,64}"
}

fn group_name_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,12}"
}

/// Generates a sequence of group operations for testing
#[derive(Debug, Clone)]
enum GroupOp {
    Set { key: String, value: String },
    Get { key: String },
    Del { key: String },
}

fn group_op_strategy() -> impl Strategy<Value = GroupOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| GroupOp::Set { key, value }),
        key_strategy().prop_map(|key| GroupOp::Get { key }),
        key_strategy().prop_map(|key| GroupOp::Del { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // A never-expiring group without a fill function behaves like a plain map.
    #[test]
    fn prop_group_matches_map_model(ops in prop::collection::vec(group_op_strategy(), 1..60)) {
        let group = Group::new(Duration::ZERO, None);
        let mut model: HashMap<String, String> = HashMap::new();

        for op in ops {
            match op {
                GroupOp::Set { key, value } => {
                    group.set(key.clone(), value.clone());
                    model.insert(key, value);
                }
                GroupOp::Get { key } => {
                    prop_assert_eq!(group.get(&key), model.get(&key).cloned());
                }
                GroupOp::Del { key } => {
                    group.del(&key);
                    model.remove(&key);
                }
            }
        }

        prop_assert_eq!(group.len(), model.len());
    }

    // The last write for a key is the one read back.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let group = Group::new(Duration::from_secs(300), None);

        group.set(key.clone(), value1);
        group.set(key.clone(), value2.clone());

        prop_assert_eq!(group.get(&key), Some(value2));
        prop_assert_eq!(group.len(), 1);
    }

    // A fill function is consulted at most once per key while values are live.
    #[test]
    fn prop_fill_called_once_per_key(keys in prop::collection::vec(key_strategy(), 1..30)) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let group = Group::new(
            Duration::ZERO,
            Some(FillFn::new(move |key: &str| {
                counter.fetch_add(1, Ordering::SeqCst);
                Some(format!("filled:{}", key))
            })),
        );

        for key in &keys {
            prop_assert_eq!(group.get(key), Some(format!("filled:{}", key)));
        }

        let distinct: std::collections::HashSet<&String> = keys.iter().collect();
        prop_assert_eq!(calls.load(Ordering::SeqCst), distinct.len());
        prop_assert_eq!(group.len(), distinct.len());
    }

    // Values written to one named group are invisible in another and in the default group.
    #[test]
    fn prop_group_isolation(
        g1 in group_name_strategy(),
        g2 in group_name_strategy(),
        key in key_strategy(),
        value in value_strategy()
    ) {
        prop_assume!(g1 != g2);
        let cache = Cache::new(Duration::ZERO, None);
        cache.new_group(g1.clone(), Duration::ZERO, None).unwrap();
        cache.new_group(g2.clone(), Duration::ZERO, None).unwrap();

        cache.set_group_val(&g1, key.clone(), value.clone()).unwrap();

        prop_assert_eq!(cache.get_group_val(&g1, &key), Some(value));
        prop_assert_eq!(cache.get_group_val(&g2, &key), None);
        prop_assert_eq!(cache.get(&key), None);
    }

    // Registering a name twice always fails, whatever the second group's settings.
    #[test]
    fn prop_duplicate_group_rejected(name in group_name_strategy(), ttl_ms in 0u64..10_000) {
        let cache: Cache<String> = Cache::new(Duration::ZERO, None);

        prop_assert!(cache.new_group(name.clone(), Duration::ZERO, None).is_ok());
        prop_assert_eq!(
            cache.new_group(name.clone(), Duration::from_millis(ttl_ms), None),
            Err(CacheError::AlreadyExists(name.clone()))
        );
        prop_assert_eq!(cache.group_names(), vec![name]);
    }
}

// Separate proptest block with fewer cases for time-sensitive TTL tests
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // After the TTL elapses, a group without a fill function forgets the entry.
    #[test]
    fn prop_ttl_expiration_behavior(key in key_strategy(), value in value_strategy()) {
        let group = Group::new(Duration::from_millis(30), None);

        group.set(key.clone(), value.clone());
        prop_assert_eq!(group.get(&key), Some(value));

        std::thread::sleep(Duration::from_millis(50));

        prop_assert_eq!(group.get(&key), None);
        prop_assert!(group.is_empty());
    }
}
