use std::{collections::BTreeMap, io::ErrorKind, path::PathBuf, sync::Arc};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ResponseRecord, StorageError};

/// File backed fallback store: a single JSON file mapping response id to
/// record, rewritten wholesale on every mutation. The write lock keeps index
/// updates exclusive; beyond that the filesystem is the only consistency
/// guarantee.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
    data: Arc<RwLock<DataFile>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct DataFile {
    responses: BTreeMap<Uuid, ResponseRecord>,
}

impl LocalStore {
    /// Open the store at `path`, loading any previously persisted responses.
    /// A missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let data = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == ErrorKind::NotFound => DataFile::default(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path,
            data: Arc::new(RwLock::new(data)),
        })
    }

    pub async fn save(&self, record: &ResponseRecord) -> Result<(), StorageError> {
        let mut data = self.data.write().await;
        data.responses.insert(record.id, record.clone());
        self.persist(&data).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<ResponseRecord>, StorageError> {
        Ok(self.data.read().await.responses.get(&id).cloned())
    }

    pub async fn get_all(&self) -> Result<Vec<ResponseRecord>, StorageError> {
        Ok(self.data.read().await.responses.values().cloned().collect())
    }

    pub async fn clear(&self) -> Result<u64, StorageError> {
        let mut data = self.data.write().await;
        let deleted = data.responses.len() as u64;
        data.responses.clear();
        self.persist(&data).await?;
        Ok(deleted)
    }

    async fn persist(&self, data: &DataFile) -> Result<(), StorageError> {
        tokio::fs::write(&self.path, serde_json::to_vec_pretty(data)?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::{TimeZone, Utc};

    use super::*;

    fn temp_data_file() -> PathBuf {
        std::env::temp_dir().join(format!("quiz-local-store-{}.json", Uuid::new_v4()))
    }

    fn record(name: &str) -> ResponseRecord {
        ResponseRecord {
            id: Uuid::new_v4(),
            name: name.into(),
            answers: HashMap::from([("q2".to_owned(), "Stay calm and listen".to_owned())]),
            submitted_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let path = temp_data_file();
        let record = record("Ada");

        let store = LocalStore::open(&path).await.unwrap();
        store.save(&record).await.unwrap();
        drop(store);

        let store = LocalStore::open(&path).await.unwrap();
        assert_eq!(store.get(record.id).await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_clear_rewrites_the_data_file() {
        let path = temp_data_file();

        let store = LocalStore::open(&path).await.unwrap();
        store.save(&record("Ada")).await.unwrap();
        assert_eq!(store.clear().await.unwrap(), 1);
        drop(store);

        let store = LocalStore::open(&path).await.unwrap();
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_rejects_corrupt_data_file() {
        let path = temp_data_file();
        tokio::fs::write(&path, b"not json").await.unwrap();
        assert!(LocalStore::open(&path).await.is_err());
    }
}
