use crate::error::MapError;
use crate::map::SyncMap;
use dashmap::DashMap;
use std::hash::Hash;
use tracing::{debug, warn};

/// Construction settings for a [`SyncMap`]
///
/// Fields left unset fall back to the defaults of the underlying map.
///
/// # Examples
///
/// ```
/// use generic_sync_map::{MapError, SyncMap, SyncMapConfig};
///
/// let sessions: SyncMap<u64, String> = SyncMapConfig::new()
///     .capacity(1024)
///     .shard_amount(16)
///     .build()?;
/// assert!(sessions.is_empty());
///
/// let rejected = SyncMapConfig::new().shard_amount(12).build::<u64, String>();
/// assert_eq!(rejected.unwrap_err(), MapError::InvalidShardAmount(12));
/// # Ok::<(), MapError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncMapConfig {
    capacity: usize,
    shard_amount: Option<usize>,
}

impl SyncMapConfig {
    /// Creates a config with every setting at its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sizes the map for at least `capacity` entries
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets how many independently locked shards back the map
    ///
    /// Must be a power of two greater than one.
    pub fn shard_amount(mut self, shard_amount: usize) -> Self {
        self.shard_amount = Some(shard_amount);
        self
    }

    /// Checks the settings without building anything
    ///
    /// # Errors
    ///
    /// Returns `MapError::InvalidShardAmount` if a shard amount was given
    /// that is not a power of two greater than one.
    pub fn validate(&self) -> Result<(), MapError> {
        match self.shard_amount {
            Some(shards) if shards < 2 || !shards.is_power_of_two() => {
                Err(MapError::InvalidShardAmount(shards))
            }
            _ => Ok(()),
        }
    }

    /// Builds an empty map with these settings
    ///
    /// # Errors
    ///
    /// Returns `MapError::InvalidShardAmount` if the shard amount is invalid.
    pub fn build<K, V>(&self) -> Result<SyncMap<K, V>, MapError>
    where
        K: Eq + Hash,
    {
        if let Err(e) = self.validate() {
            warn!(error = %e, "rejected sync map config");
            return Err(e);
        }

        let inner = match self.shard_amount {
            Some(shards) => DashMap::with_capacity_and_shard_amount(self.capacity, shards),
            None => DashMap::with_capacity(self.capacity),
        };
        debug!(
            capacity = self.capacity,
            shard_amount = ?self.shard_amount,
            "built sync map"
        );
        Ok(SyncMap::from_dashmap(inner))
    }
}
