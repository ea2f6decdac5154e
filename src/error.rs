use thiserror::Error;

/// Errors that can occur when configuring a [`SyncMap`](crate::SyncMap)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// The requested shard amount is not a power of two greater than one
    #[error("shard amount must be a power of two greater than 1, got {0}")]
    InvalidShardAmount(usize),
}
