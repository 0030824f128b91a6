use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::store::{Record, Store, StoreError};

/// In-process store. A single `RwLock` serializes writers against readers.
pub struct MemoryStore<T> {
    records: RwLock<HashMap<String, T>>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl<T: Record> Store<T> for MemoryStore<T> {
    async fn get(&self, id: &str) -> Result<Option<T>, StoreError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn put(&self, record: T) -> Result<(), StoreError> {
        let key = record.key().to_string();
        self.records.write().await.insert(key, record);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.records.write().await.remove(id).is_some())
    }

    async fn list(&self) -> Result<Vec<T>, StoreError> {
        let records = self.records.read().await;
        let mut all: Vec<T> = records.values().cloned().collect();
        all.sort_by(|a, b| a.key().cmp(b.key()));
        Ok(all)
    }
}
