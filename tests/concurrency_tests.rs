use generic_sync_map::SyncMap;
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_disjoint_writers_then_full_range() {
    let num_threads = 8;
    let ops_per_thread = 2_000;

    for _run in 0..5 {
        let map = Arc::new(SyncMap::<usize, usize>::new());
        let barrier = Arc::new(Barrier::new(num_threads + 1));

        let handles: Vec<_> = (0..num_threads)
            .map(|thread_id| {
                let map = Arc::clone(&map);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    for i in 0..ops_per_thread {
                        let key = thread_id * ops_per_thread + i;
                        map.set(key, key * 2);
                        // every third key is deleted again
                        if i % 3 == 0 {
                            map.delete(&key);
                        }
                    }
                    barrier.wait();
                })
            })
            .collect();

        barrier.wait();
        for handle in handles {
            handle.join().unwrap();
        }

        let expected: HashSet<usize> = (0..num_threads)
            .flat_map(|t| (0..ops_per_thread).filter(|i| i % 3 != 0).map(move |i| t * ops_per_thread + i))
            .collect();

        let mut seen = HashSet::new();
        map.range(|key, value| {
            assert_eq!(*value, key * 2);
            assert!(seen.insert(*key), "duplicate key {}", key);
            true
        });

        assert_eq!(seen, expected);
        assert_eq!(map.len(), expected.len());
    }
}

#[test]
fn test_range_during_concurrent_writes() {
    let map = Arc::new(SyncMap::<u32, u32>::new());
    for i in 0..1_000 {
        map.set(i, i);
    }

    let writer = {
        let map = Arc::clone(&map);
        thread::spawn(move || {
            for i in 0..1_000 {
                map.delete(&i);
                map.set(i + 1_000, i);
            }
        })
    };

    // Whatever interleaving happens, no key shows up twice and values are intact
    for _ in 0..20 {
        let mut seen = HashSet::new();
        map.range(|key, value| {
            assert!(seen.insert(*key));
            assert_eq!(*key % 1_000, *value);
            true
        });
    }

    writer.join().unwrap();

    let snapshot = map.to_map();
    assert_eq!(snapshot.len(), 1_000);
    assert!(snapshot.keys().all(|k| *k >= 1_000));
}

#[test]
fn test_write_then_read_across_threads() {
    let map = Arc::new(SyncMap::<String, u64>::new());

    let writer = {
        let map = Arc::clone(&map);
        thread::spawn(move || {
            for i in 0..500u64 {
                map.set(format!("key-{}", i), i);
            }
        })
    };
    writer.join().unwrap();

    // join establishes happens-before, so every write is visible
    for i in 0..500u64 {
        assert_eq!(map.get(format!("key-{}", i).as_str()), Some(i));
    }
}

#[test]
fn test_get_or_insert_has_a_single_winner() {
    let map = Arc::new(SyncMap::<&'static str, usize>::new());
    let barrier = Arc::new(Barrier::new(16));

    let handles: Vec<_> = (0..16)
        .map(|id| {
            let map = Arc::clone(&map);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                map.get_or_insert("leader", id)
            })
        })
        .collect();

    let results: Vec<(usize, bool)> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let winners = results.iter().filter(|(_, loaded)| !loaded).count();
    assert_eq!(winners, 1);

    let leader = map.get("leader").unwrap();
    assert!(results.iter().all(|(value, _)| *value == leader));
}

#[test]
fn test_with_mut_increments_are_atomic() {
    let map = Arc::new(SyncMap::<&'static str, u64>::new());
    map.set("counter", 0);

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                for _ in 0..100 {
                    map.with_mut("counter", |n| *n += 1);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(map.get("counter"), Some(1_000)); // 10 threads * 100 increments
}

#[test]
fn test_cloned_handles_across_threads() {
    let map = SyncMap::<u32, u32>::new();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let handle = map.clone();
            thread::spawn(move || {
                for i in 0..250 {
                    handle.set(t * 250 + i, t);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(map.len(), 1_000);
    assert_eq!(map.get(&999), Some(3));
}
