use std::collections::HashMap;

use chrono::{DateTime, Utc};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;

pub use self::{local::LocalStore, redis::RedisStore};

mod local;
mod redis;

/// A completed quiz submission. Created exactly once at submission time,
/// never mutated afterwards and deleted only by [`Storage::clear`].
#[derive(Debug, Clone, PartialEq, Object, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// The unique identifier of the response.
    pub id: Uuid,
    /// The name the participant entered before starting the quiz. May be
    /// empty.
    pub name: String,
    /// The selected option per question id. Questions that timed out without
    /// a selection are absent.
    pub answers: HashMap<String, String>,
    /// When the response was submitted.
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("redis error: {0}")]
    Redis(#[from] ::redis::RedisError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed response record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persists response records in redis when a reachable server is configured
/// and in the local data file otherwise. The choice is made once at
/// construction and held for the lifetime of the process; callers never see
/// which backend served a request.
#[derive(Debug, Clone)]
pub struct Storage {
    remote: Option<RedisStore>,
    local: LocalStore,
}

impl Storage {
    pub async fn connect(config: &Config) -> Result<Self, StorageError> {
        let local = LocalStore::open(&config.data_file).await?;
        let remote = match &config.redis {
            Some(redis) => match RedisStore::connect(&redis.responses).await {
                Ok(store) => {
                    info!("Storing responses in redis");
                    Some(store)
                }
                Err(err) => {
                    warn!(
                        "Redis is not available ({err}), storing responses in {}",
                        config.data_file.display()
                    );
                    None
                }
            },
            None => {
                info!("Storing responses in {}", config.data_file.display());
                None
            }
        };
        Ok(Self { remote, local })
    }

    /// A storage handle that only ever uses the given local store.
    pub fn local(store: LocalStore) -> Self {
        Self {
            remote: None,
            local: store,
        }
    }

    /// Write `record` under its id and add the id to the response index.
    pub async fn save(&self, record: &ResponseRecord) -> Result<(), StorageError> {
        if let Some(remote) = &self.remote {
            match remote.save(record).await {
                Ok(()) => return Ok(()),
                Err(err) => warn!("Redis write failed ({err}), degrading to the local store"),
            }
        }
        self.local.save(record).await
    }

    /// Look up a single record. A missing id is `None`, not an error.
    pub async fn get(&self, id: Uuid) -> Result<Option<ResponseRecord>, StorageError> {
        if let Some(remote) = &self.remote {
            match remote.get(id).await {
                Ok(record) => return Ok(record),
                Err(err) => warn!("Redis read failed ({err}), degrading to the local store"),
            }
        }
        self.local.get(id).await
    }

    /// All retrievable records referenced by the response index, most recent
    /// first. Index entries whose record is missing are filtered out.
    pub async fn get_all(&self) -> Result<Vec<ResponseRecord>, StorageError> {
        let mut records = match &self.remote {
            Some(remote) => match remote.get_all().await {
                Ok(records) => records,
                Err(err) => {
                    warn!("Redis read failed ({err}), degrading to the local store");
                    self.local.get_all().await?
                }
            },
            None => self.local.get_all().await?,
        };
        records.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(records)
    }

    /// Delete every indexed record and empty the index. Returns the number of
    /// deleted records; clearing an empty store is fine and returns 0.
    pub async fn clear(&self) -> Result<u64, StorageError> {
        if let Some(remote) = &self.remote {
            match remote.clear().await {
                Ok(deleted) => return Ok(deleted),
                Err(err) => warn!("Redis clear failed ({err}), degrading to the local store"),
            }
        }
        self.local.clear().await
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::TimeZone;

    use super::*;

    fn temp_data_file() -> PathBuf {
        std::env::temp_dir().join(format!("quiz-storage-{}.json", Uuid::new_v4()))
    }

    async fn temp_storage() -> Storage {
        Storage::local(LocalStore::open(temp_data_file()).await.unwrap())
    }

    fn record(name: &str, submitted_at: DateTime<Utc>) -> ResponseRecord {
        ResponseRecord {
            id: Uuid::new_v4(),
            name: name.into(),
            answers: HashMap::from([("q1".to_owned(), "Pause and think before reacting".to_owned())]),
            submitted_at,
        }
    }

    fn timestamp(second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, second).unwrap()
    }

    #[tokio::test]
    async fn test_save_get_roundtrip() {
        let storage = temp_storage().await;
        let record = record("Ada", timestamp(0));

        storage.save(&record).await.unwrap();

        assert_eq!(storage.get(record.id).await.unwrap(), Some(record.clone()));
        // reads are idempotent
        assert_eq!(storage.get(record.id).await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_get_missing_id_is_none() {
        let storage = temp_storage().await;
        assert_eq!(storage.get(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_all_orders_most_recent_first() {
        let storage = temp_storage().await;
        let first = record("Ada", timestamp(1));
        let second = record("Grace", timestamp(2));

        storage.save(&first).await.unwrap();
        storage.save(&second).await.unwrap();

        assert_eq!(storage.get_all().await.unwrap(), vec![second, first]);
    }

    #[tokio::test]
    async fn test_clear_empties_the_store_and_is_idempotent() {
        let storage = temp_storage().await;
        storage.save(&record("Ada", timestamp(0))).await.unwrap();
        storage.save(&record("Grace", timestamp(1))).await.unwrap();

        assert_eq!(storage.clear().await.unwrap(), 2);
        assert!(storage.get_all().await.unwrap().is_empty());
        assert_eq!(storage.clear().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unreachable_redis_falls_back_to_local() {
        let config = Config {
            host: "127.0.0.1".into(),
            port: 0,
            data_file: temp_data_file(),
            redis: Some(crate::config::RedisConfig {
                responses: "redis://127.0.0.1:1".parse().unwrap(),
            }),
        };
        let storage = Storage::connect(&config).await.unwrap();

        let record = record("Ada", timestamp(0));
        storage.save(&record).await.unwrap();
        assert_eq!(storage.get(record.id).await.unwrap(), Some(record.clone()));
        assert_eq!(storage.get_all().await.unwrap(), vec![record]);
        assert_eq!(storage.clear().await.unwrap(), 1);
    }
}
