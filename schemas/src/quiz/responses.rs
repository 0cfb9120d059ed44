use std::collections::HashMap;

use chrono::{DateTime, Utc};
use lib::{questions::QuestionBank, storage::ResponseRecord};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Object, Serialize, Deserialize)]
pub struct SubmitRequest {
    /// The name the participant entered before starting the quiz. May be
    /// empty.
    pub name: String,
    /// The selected option per question id.
    pub answers: HashMap<String, String>,
    /// When the quiz was submitted.
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Object, Serialize, Deserialize)]
pub struct Submitted {
    /// The identifier of the stored response.
    pub id: Uuid,
}

/// A stored response together with its score against the question bank.
#[derive(Debug, Clone, PartialEq, Object, Serialize, Deserialize)]
pub struct ScoredResponse {
    #[oai(flatten)]
    #[serde(flatten)]
    pub response: ResponseRecord,
    /// The number of questions answered with the correct option.
    pub score: usize,
    /// The total number of questions in the bank.
    pub total: usize,
}

impl ScoredResponse {
    pub fn from(response: ResponseRecord, bank: &QuestionBank) -> Self {
        Self {
            score: bank.score(&response.answers),
            total: bank.len(),
            response,
        }
    }
}

#[derive(Debug, Clone, Object, Serialize, Deserialize)]
pub struct ClearedResponses {
    /// The number of responses that were deleted.
    pub deleted: u64,
    /// Human readable summary of the clear operation.
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "error", content = "reason", rename_all = "snake_case")]
pub enum GetResponseError {
    /// The requested response does not exist.
    ResponseNotFound,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_scored_response_uses_the_bank() {
        let bank = QuestionBank::builtin();
        let record = ResponseRecord {
            id: Uuid::new_v4(),
            name: "Ada".into(),
            answers: HashMap::from([
                ("q1".to_owned(), "Pause and think before reacting".to_owned()),
                ("q2".to_owned(), "Avoid the situation".to_owned()),
            ]),
            submitted_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };

        let scored = ScoredResponse::from(record.clone(), &bank);
        assert_eq!(scored.score, 1);
        assert_eq!(scored.total, 5);
        assert_eq!(scored.response, record);
    }
}
