use futures::future::{join_all, try_join_all};
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError, RedisResult};
use tracing::warn;
use url::Url;
use uuid::Uuid;

use super::{ResponseRecord, StorageError};

const RESPONSE_KEY_PREFIX: &str = "response:";
const RESPONSE_INDEX_KEY: &str = "response_ids";

/// Remote response store. Records live under `response:{id}`, the response
/// index is a native redis set under `response_ids`.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect to the redis server at `url`. Failing to connect here is what
    /// routes the process to the local store instead.
    pub async fn connect(url: &Url) -> RedisResult<Self> {
        Ok(Self {
            conn: ConnectionManager::new(Client::open(url.as_str())?).await?,
        })
    }

    pub async fn save(&self, record: &ResponseRecord) -> Result<(), StorageError> {
        let payload = serde_json::to_string(record)?;
        let mut conn = self.conn.clone();
        let _: () = conn.set(record_key(record.id), payload).await?;
        let _: () = conn.sadd(RESPONSE_INDEX_KEY, record.id.to_string()).await?;
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<ResponseRecord>, StorageError> {
        let mut conn = self.conn.clone();
        let payload: Option<String> = conn.get(record_key(id)).await?;
        Ok(match payload {
            Some(payload) => Some(serde_json::from_str(&payload)?),
            None => None,
        })
    }

    /// Fetch every record referenced by the index concurrently. Entries whose
    /// record is missing or unreadable are skipped, not fatal.
    pub async fn get_all(&self) -> Result<Vec<ResponseRecord>, StorageError> {
        let mut conn = self.conn.clone();
        let ids: Vec<String> = conn.smembers(RESPONSE_INDEX_KEY).await?;
        let reads = join_all(
            ids.iter()
                .filter_map(|id| id.parse().ok())
                .map(|id| self.get(id)),
        )
        .await;
        Ok(reads
            .into_iter()
            .filter_map(|read| match read {
                Ok(record) => record,
                Err(err) => {
                    warn!("Skipping unreadable response record: {err}");
                    None
                }
            })
            .collect())
    }

    pub async fn clear(&self) -> Result<u64, StorageError> {
        let mut conn = self.conn.clone();
        let ids: Vec<String> = conn.smembers(RESPONSE_INDEX_KEY).await?;
        try_join_all(ids.iter().map(|id| {
            let key = format!("{RESPONSE_KEY_PREFIX}{id}");
            let mut conn = self.conn.clone();
            async move {
                let _: () = conn.del(key).await?;
                Ok::<_, RedisError>(())
            }
        }))
        .await?;
        let _: () = conn.del(RESPONSE_INDEX_KEY).await?;
        Ok(ids.len() as u64)
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").finish()
    }
}

fn record_key(id: Uuid) -> String {
    format!("{RESPONSE_KEY_PREFIX}{id}")
}
