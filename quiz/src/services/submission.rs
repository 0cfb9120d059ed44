use std::collections::HashMap;

use chrono::{DateTime, Utc};
use lib::storage::{ResponseRecord, Storage, StorageError};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Turns a completed quiz into a persisted response record. Constructed once
/// at startup with the storage handle it delegates to.
#[derive(Debug, Clone)]
pub struct SubmissionService {
    storage: Storage,
}

impl SubmissionService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Store the submission under a freshly generated id and return the id.
    /// The inputs are taken verbatim; validating them is the boundary's
    /// concern.
    pub async fn submit(
        &self,
        name: String,
        answers: HashMap<String, String>,
        timestamp: DateTime<Utc>,
    ) -> Result<Uuid, SubmissionError> {
        let record = ResponseRecord {
            id: Uuid::new_v4(),
            name,
            answers,
            submitted_at: timestamp,
        };
        self.storage
            .save(&record)
            .await
            .map_err(SubmissionError::Persistence)?;
        debug!("Stored quiz response {}", record.id);
        Ok(record.id)
    }
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("could not persist response: {0}")]
    Persistence(#[source] StorageError),
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use lib::storage::LocalStore;

    use super::*;

    async fn temp_service() -> SubmissionService {
        let path = std::env::temp_dir().join(format!("quiz-submission-{}.json", Uuid::new_v4()));
        SubmissionService::new(Storage::local(LocalStore::open(path).await.unwrap()))
    }

    #[tokio::test]
    async fn test_submit_stores_the_record_verbatim() {
        let service = temp_service().await;
        let answers = HashMap::from([("q3".to_owned(), "Focus only on my point".to_owned())]);
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let id = service
            .submit("Ada".into(), answers.clone(), timestamp)
            .await
            .unwrap();

        let record = service.storage.get(id).await.unwrap().unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.name, "Ada");
        assert_eq!(record.answers, answers);
        assert_eq!(record.submitted_at, timestamp);
    }

    #[tokio::test]
    async fn test_submit_generates_unique_ids() {
        let service = temp_service().await;
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let first = service
            .submit("Ada".into(), HashMap::new(), timestamp)
            .await
            .unwrap();
        let second = service
            .submit("Ada".into(), HashMap::new(), timestamp)
            .await
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(service.storage.get_all().await.unwrap().len(), 2);
    }
}
