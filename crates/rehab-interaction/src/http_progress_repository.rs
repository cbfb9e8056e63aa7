//! HttpProgressRepository - summaries stored by the backend's progress API.

use crate::client::{BackendClient, RequestFailure, check_status};
use async_trait::async_trait;
use rehab_core::error::Result;
use rehab_core::exercise::ExerciseType;
use rehab_core::summary::{SessionSummary, SummaryRepository};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ProgressRequest<'a> {
    exercise_type: ExerciseType,
    sets_planned: u32,
    reps_planned: u32,
    reps_completed: u32,
    notes: &'a str,
}

impl<'a> From<&'a SessionSummary> for ProgressRequest<'a> {
    fn from(summary: &'a SessionSummary) -> Self {
        Self {
            exercise_type: summary.exercise_type,
            sets_planned: summary.sets_planned,
            reps_planned: summary.reps_planned,
            reps_completed: summary.reps_completed,
            notes: summary.notes.as_deref().unwrap_or(""),
        }
    }
}

/// A row of the backend progress table.
#[derive(Debug, Deserialize)]
struct ProgressRecord {
    id: i64,
    exercise_type: String,
    #[serde(default)]
    sets_planned: Option<i64>,
    #[serde(default)]
    reps_planned: Option<i64>,
    #[serde(default)]
    reps_completed: Option<i64>,
    #[serde(default)]
    notes: Option<String>,
    created_at: String,
}

impl ProgressRecord {
    /// Converts a backend row; rows with an unknown exercise are skipped.
    fn into_summary(self) -> Option<SessionSummary> {
        let exercise_type = match self.exercise_type.parse::<ExerciseType>() {
            Ok(exercise) => exercise,
            Err(_) => {
                tracing::warn!(
                    "[HttpProgressRepository] Skipping record {} with unknown exercise '{}'",
                    self.id,
                    self.exercise_type
                );
                return None;
            }
        };
        let count = |value: Option<i64>| value.and_then(|v| u32::try_from(v).ok()).unwrap_or(0);

        Some(SessionSummary {
            id: self.id.to_string(),
            exercise_type,
            sets_planned: count(self.sets_planned),
            reps_planned: count(self.reps_planned),
            reps_completed: count(self.reps_completed),
            notes: self.notes.filter(|n| !n.trim().is_empty()),
            created_at: self.created_at,
        })
    }
}

/// Summary repository backed by `GET/POST /api/progress`.
///
/// The backend assigns its own ids and timestamps, so listed summaries carry
/// those rather than the ones stamped locally.
#[derive(Clone)]
pub struct HttpProgressRepository {
    client: BackendClient,
}

impl HttpProgressRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SummaryRepository for HttpProgressRepository {
    async fn save(&self, summary: &SessionSummary) -> Result<()> {
        let response = self
            .client
            .http()
            .post(self.client.url("/api/progress"))
            .json(&ProgressRequest::from(summary))
            .send()
            .await
            .map_err(|err| RequestFailure::from_transport("Progress save", err))
            .map_err(RequestFailure::into_persistence_error)?;

        check_status("Progress save", response)
            .await
            .map_err(RequestFailure::into_persistence_error)?;

        tracing::info!(
            "[HttpProgressRepository] Saved {} summary ({} reps)",
            summary.exercise_type,
            summary.reps_completed
        );
        Ok(())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<SessionSummary>> {
        let response = self
            .client
            .http()
            .get(self.client.url("/api/progress"))
            .send()
            .await
            .map_err(|err| RequestFailure::from_transport("Progress listing", err))
            .map_err(RequestFailure::into_persistence_error)?;

        let response = check_status("Progress listing", response)
            .await
            .map_err(RequestFailure::into_persistence_error)?;

        let records: Vec<ProgressRecord> = response
            .json()
            .await
            .map_err(|err| RequestFailure::from_transport("Progress listing", err))
            .map_err(RequestFailure::into_persistence_error)?;

        // The backend already orders newest first.
        Ok(records
            .into_iter()
            .filter_map(ProgressRecord::into_summary)
            .take(limit)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_request_shape() {
        let summary = SessionSummary {
            id: "local-id".to_string(),
            exercise_type: ExerciseType::Pinch,
            sets_planned: 3,
            reps_planned: 10,
            reps_completed: 28,
            notes: None,
            created_at: "2025-01-01T00:00:00+00:00".to_string(),
        };
        let json = serde_json::to_value(ProgressRequest::from(&summary)).unwrap();
        assert_eq!(json["exercise_type"], "pinch");
        assert_eq!(json["reps_completed"], 28);
        assert_eq!(json["notes"], "");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_records_map_to_summaries() {
        let json = r#"[
            {"id": 7, "exercise_type": "open_close", "sets_planned": 3, "reps_planned": 10,
             "reps_completed": 30, "notes": "good", "created_at": "2025-02-01T10:00:00"},
            {"id": 6, "exercise_type": "wrist_roll", "sets_planned": 1, "reps_planned": 1,
             "reps_completed": 1, "notes": "", "created_at": "2025-01-31T10:00:00"},
            {"id": 5, "exercise_type": "pinch", "sets_planned": null, "reps_planned": null,
             "reps_completed": null, "notes": "", "created_at": "2025-01-30T10:00:00"}
        ]"#;
        let records: Vec<ProgressRecord> = serde_json::from_str(json).unwrap();
        let summaries: Vec<SessionSummary> = records
            .into_iter()
            .filter_map(ProgressRecord::into_summary)
            .collect();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, "7");
        assert_eq!(summaries[0].notes.as_deref(), Some("good"));
        assert_eq!(summaries[1].exercise_type, ExerciseType::Pinch);
        assert_eq!(summaries[1].sets_planned, 0);
        assert!(summaries[1].notes.is_none());
    }
}
