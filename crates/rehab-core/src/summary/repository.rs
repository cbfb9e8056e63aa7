//! Summary repository trait.
//!
//! Defines the interface to the persistence collaborator that stores session
//! summaries.

use super::model::SessionSummary;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract store for session summaries.
///
/// Decouples the session flow from the storage mechanism (remote progress
/// API, in-memory store for tests, ...).
#[async_trait]
pub trait SummaryRepository: Send + Sync {
    /// Stores a summary.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Summary stored
    /// - `Err(_)`: The store rejected the summary or could not be reached
    async fn save(&self, summary: &SessionSummary) -> Result<()>;

    /// Lists stored summaries, most recent first.
    ///
    /// # Arguments
    ///
    /// * `limit` - Maximum number of summaries to return
    async fn list_recent(&self, limit: usize) -> Result<Vec<SessionSummary>>;
}
