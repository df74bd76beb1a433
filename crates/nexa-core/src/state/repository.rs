//! State repository trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::state::model::AppState;

/// Durable home of the single persisted `AppState` blob.
///
/// `load` and `save` never fail from the caller's point of view: storage
/// problems are reported out-of-band and degrade to defaults or a dropped
/// write.
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Returns the default state overlaid with whatever is stored.
    fn load(&self) -> AppState;

    /// Schedules a debounced write of `state`. Later calls supersede earlier
    /// pending ones.
    fn save(&self, state: &AppState);

    /// Writes the pending state, if any, right away.
    async fn flush(&self) -> Result<()>;

    /// Cancels any pending write and deletes the stored blob.
    async fn clear(&self) -> Result<()>;
}
