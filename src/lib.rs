//! # generic-sync-map
//!
//! A thread-safe concurrent map with statically typed keys and values.
//!
//! `generic-sync-map` provides [`SyncMap`], a map that any number of threads can
//! read and write at the same time without wrapping it in a lock of their own.
//! The key and value types are generic parameters, so every value that goes in
//! comes back out as the same type with no runtime checks or downcasts.
//!
//! ## Key Features
//!
//! - **Type-safe**: Keys and values are fixed by the map's type parameters
//! - **Thread-safe**: Built on a sharded concurrent map behind an `Arc`
//! - **No aliasing**: Lookups, iteration and snapshots hand out copies
//! - **Reentrant iteration**: `range` visitors may modify the map they walk
//!
//! The crate also ships [`ternary::choose`], an eager single-expression
//! conditional.
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use generic_sync_map::SyncMap;
//!
//! let store = SyncMap::<String, i32>::new();
//!
//! store.set("number".to_string(), 42);
//! store.set("other".to_string(), 7);
//!
//! assert_eq!(store.get("number"), Some(42));
//!
//! // Missing keys are not errors
//! assert_eq!(store.get("missing"), None);
//!
//! store.delete("other");
//! store.delete("other"); // still fine
//! assert_eq!(store.len(), 1);
//! ```
//!
//! ### Iterating and Taking Snapshots
//!
//! ```rust
//! use generic_sync_map::SyncMap;
//!
//! let prices = SyncMap::<&str, u32>::new();
//! prices.set("apple", 3);
//! prices.set("pear", 4);
//! prices.set("plum", 2);
//!
//! // Stop as soon as one cheap item turns up
//! let mut cheap = None;
//! prices.range(|name, price| {
//!     if *price < 3 {
//!         cheap = Some(*name);
//!         return false;
//!     }
//!     true
//! });
//! assert_eq!(cheap, Some("plum"));
//!
//! // A snapshot is a private HashMap copy
//! let snapshot = prices.to_map();
//! prices.set("apple", 10);
//! assert_eq!(snapshot["apple"], 3);
//! ```
//!
//! ### Sharing Between Threads
//!
//! ```rust
//! use generic_sync_map::SyncMap;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let seen = Arc::new(SyncMap::<u32, String>::new());
//!
//! let writers: Vec<_> = (0..4)
//!     .map(|id| {
//!         let seen = Arc::clone(&seen);
//!         thread::spawn(move || {
//!             for i in 0..100 {
//!                 seen.set(id * 100 + i, format!("writer {}", id));
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for writer in writers {
//!     writer.join().unwrap();
//! }
//!
//! assert_eq!(seen.len(), 400);
//! assert_eq!(seen.get(&250), Some("writer 2".to_string()));
//! ```
//!
//! ### Configuration
//!
//! ```rust
//! use generic_sync_map::{MapError, SyncMap, SyncMapConfig};
//!
//! let map: SyncMap<u64, Vec<u8>> = SyncMapConfig::new()
//!     .capacity(4096)
//!     .shard_amount(32)
//!     .build()?;
//! assert!(map.is_empty());
//!
//! match SyncMapConfig::new().shard_amount(3).build::<u64, u64>() {
//!     Err(MapError::InvalidShardAmount(n)) => println!("{} shards is not allowed", n),
//!     Ok(_) => unreachable!(),
//! }
//! # Ok::<(), MapError>(())
//! ```

mod config;
mod error;
mod map;
#[cfg(test)]
mod proptests;
pub mod ternary;

pub use config::SyncMapConfig;
pub use error::MapError;
pub use map::{Iter, SyncMap};
