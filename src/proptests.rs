//! Property-based tests for `SyncMap` using proptest
//!
//! Random operation sequences are replayed against a plain `HashMap`, which
//! serves as the model for what the concurrent map should contain.

#[cfg(test)]
mod model_properties {
    use crate::SyncMap;
    use proptest::prelude::*;
    use std::collections::HashMap;

    #[derive(Debug, Clone)]
    enum Op {
        Set(u8, i32),
        Delete(u8),
        Swap(u8, i32),
        GetOrInsert(u8, i32),
        Remove(u8),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (any::<u8>(), any::<i32>()).prop_map(|(k, v)| Op::Set(k, v)),
            any::<u8>().prop_map(Op::Delete),
            (any::<u8>(), any::<i32>()).prop_map(|(k, v)| Op::Swap(k, v)),
            (any::<u8>(), any::<i32>()).prop_map(|(k, v)| Op::GetOrInsert(k, v)),
            any::<u8>().prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn test_matches_hashmap_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
            let map = SyncMap::<u8, i32>::new();
            let mut model = HashMap::new();

            for op in ops {
                match op {
                    Op::Set(k, v) => {
                        map.set(k, v);
                        model.insert(k, v);
                    }
                    Op::Delete(k) => {
                        map.delete(&k);
                        model.remove(&k);
                    }
                    Op::Swap(k, v) => {
                        prop_assert_eq!(map.swap(k, v), model.insert(k, v));
                    }
                    Op::GetOrInsert(k, v) => {
                        let expected = match model.get(&k) {
                            Some(existing) => (*existing, true),
                            None => {
                                model.insert(k, v);
                                (v, false)
                            }
                        };
                        prop_assert_eq!(map.get_or_insert(k, v), expected);
                    }
                    Op::Remove(k) => {
                        prop_assert_eq!(map.remove(&k), model.remove(&k));
                    }
                }
            }

            prop_assert_eq!(map.len(), model.len());
            for k in 0..=u8::MAX {
                prop_assert_eq!(map.get(&k), model.get(&k).copied());
            }
            prop_assert_eq!(map.to_map(), model);
        }

        #[test]
        fn test_range_stops_after_first_false(
            entries in prop::collection::hash_map(any::<u16>(), any::<u16>(), 1..300),
            stop_after in 1usize..10
        ) {
            let map: SyncMap<u16, u16> = entries.clone().into();
            let mut visited = 0;

            map.range(|_, _| {
                visited += 1;
                visited < stop_after
            });

            prop_assert_eq!(visited, stop_after.min(entries.len()));
        }

        #[test]
        fn test_snapshot_is_independent(
            entries in prop::collection::hash_map(any::<u8>(), any::<u32>(), 0..64),
            overwrite in any::<u32>()
        ) {
            let map: SyncMap<u8, u32> = entries.clone().into();
            let mut snapshot = map.to_map();
            prop_assert_eq!(&snapshot, &entries);

            for key in entries.keys() {
                map.set(*key, overwrite);
            }
            map.set(0, overwrite);
            prop_assert_eq!(&snapshot, &entries);

            snapshot.clear();
            for (key, _) in &entries {
                prop_assert!(map.contains_key(key));
            }
        }
    }
}
