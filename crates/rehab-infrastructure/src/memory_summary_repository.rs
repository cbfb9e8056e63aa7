//! In-process SummaryRepository implementation.

use async_trait::async_trait;
use rehab_core::error::Result;
use rehab_core::summary::{SessionSummary, SummaryRepository};
use tokio::sync::RwLock;

/// Keeps summaries in memory for the lifetime of the process.
///
/// Used when no progress backend is configured and as the persistence
/// collaborator in tests.
#[derive(Default)]
pub struct InMemorySummaryRepository {
    summaries: RwLock<Vec<SessionSummary>>,
}

impl InMemorySummaryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.summaries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.summaries.read().await.is_empty()
    }
}

#[async_trait]
impl SummaryRepository for InMemorySummaryRepository {
    async fn save(&self, summary: &SessionSummary) -> Result<()> {
        let mut summaries = self.summaries.write().await;
        // Saving the same summary twice replaces it.
        summaries.retain(|existing| existing.id != summary.id);
        summaries.push(summary.clone());
        tracing::debug!(
            "[InMemorySummaryRepository] Saved summary {} ({} total)",
            summary.id,
            summaries.len()
        );
        Ok(())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<SessionSummary>> {
        let summaries = self.summaries.read().await;
        let mut recent: Vec<SessionSummary> = summaries.iter().rev().cloned().collect();
        // Stable: equal timestamps keep newest-saved first.
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(limit);
        Ok(recent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rehab_core::exercise::ExerciseType;

    fn summary(id: &str, created_at: &str, reps_completed: u32) -> SessionSummary {
        SessionSummary {
            id: id.to_string(),
            exercise_type: ExerciseType::OpenClose,
            sets_planned: 3,
            reps_planned: 10,
            reps_completed,
            notes: Some(format!("notes for {}", id)),
            created_at: created_at.to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_and_list_round_trip() {
        let repo = InMemorySummaryRepository::new();
        let original = summary("a", "2025-01-01T00:00:00+00:00", 30);

        repo.save(&original).await.unwrap();

        let listed = repo.list_recent(50).await.unwrap();
        assert_eq!(listed, vec![original]);
    }

    #[tokio::test]
    async fn test_most_recent_first_with_limit() {
        let repo = InMemorySummaryRepository::new();
        repo.save(&summary("old", "2025-01-01T00:00:00+00:00", 1))
            .await
            .unwrap();
        repo.save(&summary("new", "2025-01-03T00:00:00+00:00", 3))
            .await
            .unwrap();
        repo.save(&summary("mid", "2025-01-02T00:00:00+00:00", 2))
            .await
            .unwrap();

        let ids: Vec<String> = repo
            .list_recent(2)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["new", "mid"]);
    }

    #[tokio::test]
    async fn test_resave_replaces() {
        let repo = InMemorySummaryRepository::new();
        repo.save(&summary("a", "2025-01-01T00:00:00+00:00", 1))
            .await
            .unwrap();
        repo.save(&summary("a", "2025-01-01T00:00:00+00:00", 9))
            .await
            .unwrap();

        assert_eq!(repo.len().await, 1);
        assert_eq!(repo.list_recent(10).await.unwrap()[0].reps_completed, 9);
    }
}
