//! Generation source trait.
//!
//! Defines where map generations come from, independent of storage.

use async_trait::async_trait;

use crate::error::Result;
use crate::generation::MapGeneration;

/// Produces the current set of valid map generations.
///
/// # Implementation Notes
///
/// Implementations should:
/// - Skip invalid candidates instead of failing the whole scan
/// - Have no side effects beyond reading their backing store
/// - Return generations in any order; callers sort
#[async_trait]
pub trait GenerationSource: Send + Sync {
    /// Scans the backing store.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<MapGeneration>)`: All valid generations (possibly empty)
    /// - `Err(_)`: The store itself could not be read
    async fn scan(&self) -> Result<Vec<MapGeneration>>;

    /// Short description of the backing store, for logs.
    fn describe(&self) -> String;
}
