//! Key/value persistence. Records are stored as JSON under `task:{id}` and
//! `project:{id}`.

use std::collections::BTreeMap;
use std::sync::Arc;

use redis::{AsyncCommands, Client};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;

pub const TASK_PREFIX: &str = "task:";
pub const PROJECT_PREFIX: &str = "project:";

pub fn task_key(id: Uuid) -> String {
    format!("{TASK_PREFIX}{id}")
}

pub fn project_key(id: Uuid) -> String {
    format!("{PROJECT_PREFIX}{id}")
}

#[derive(Clone)]
pub enum Storage {
    Redis(Arc<Client>),
    Memory(Arc<RwLock<BTreeMap<String, String>>>),
}

impl Storage {
    pub fn redis(url: &str) -> Result<Self, AppError> {
        Ok(Storage::Redis(Arc::new(Client::open(url)?)))
    }

    pub fn memory() -> Self {
        Storage::Memory(Arc::default())
    }

    async fn get_raw(&self, key: &str) -> Result<Option<String>, AppError> {
        match self {
            Storage::Redis(client) => {
                let mut conn = client.get_async_connection().await?;
                Ok(conn.get(key).await?)
            }
            Storage::Memory(map) => Ok(map.read().await.get(key).cloned()),
        }
    }

    async fn set_raw(&self, key: &str, value: String) -> Result<(), AppError> {
        match self {
            Storage::Redis(client) => {
                let mut conn = client.get_async_connection().await?;
                let _: () = conn.set(key, value).await?;
                Ok(())
            }
            Storage::Memory(map) => {
                map.write().await.insert(key.to_string(), value);
                Ok(())
            }
        }
    }

    async fn values_raw(&self, prefix: &str) -> Result<Vec<String>, AppError> {
        match self {
            Storage::Redis(client) => {
                let mut conn = client.get_async_connection().await?;
                let keys: Vec<String> = conn.keys(format!("{prefix}*")).await?;
                let mut values = Vec::with_capacity(keys.len());
                for key in keys {
                    let value: Option<String> = conn.get(&key).await?;
                    values.extend(value);
                }
                Ok(values)
            }
            Storage::Memory(map) => Ok(map
                .read()
                .await
                .iter()
                .filter(|(key, _)| key.starts_with(prefix))
                .map(|(_, value)| value.clone())
                .collect()),
        }
    }

    /// Returns whether the key existed.
    pub async fn delete(&self, key: &str) -> Result<bool, AppError> {
        match self {
            Storage::Redis(client) => {
                let mut conn = client.get_async_connection().await?;
                let deleted: usize = conn.del(key).await?;
                Ok(deleted > 0)
            }
            Storage::Memory(map) => Ok(map.write().await.remove(key).is_some()),
        }
    }

    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        match self.get_raw(key).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Every record under `prefix`. Records that fail to decode are skipped
    /// with a warning.
    pub async fn load_all<T: DeserializeOwned>(&self, prefix: &str) -> Result<Vec<T>, AppError> {
        let raw = self.values_raw(prefix).await?;
        let mut records = Vec::with_capacity(raw.len());
        for json in raw {
            match serde_json::from_str(&json) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(prefix, error = %e, "skipping undecodable record"),
            }
        }
        Ok(records)
    }

    pub async fn save<T: Serialize>(&self, key: &str, record: &T) -> Result<(), AppError> {
        let json = serde_json::to_string(record)?;
        self.set_raw(key, json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{CreateTaskRequest, Task};

    #[tokio::test]
    async fn memory_store_saves_loads_and_deletes() {
        let storage = Storage::memory();
        let task = Task::new(CreateTaskRequest {
            title: "Persist me".to_string(),
            ..CreateTaskRequest::default()
        });
        let key = task_key(task.id);

        storage.save(&key, &task).await.unwrap();
        assert_eq!(storage.load::<Task>(&key).await.unwrap(), Some(task.clone()));
        assert_eq!(storage.load_all::<Task>(TASK_PREFIX).await.unwrap().len(), 1);
        assert!(storage.load_all::<Task>(PROJECT_PREFIX).await.unwrap().is_empty());

        assert!(storage.delete(&key).await.unwrap());
        assert!(!storage.delete(&key).await.unwrap());
        assert_eq!(storage.load::<Task>(&key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn undecodable_records_are_skipped() {
        let storage = Storage::memory();
        storage.set_raw("task:broken", "{".to_string()).await.unwrap();
        assert!(storage.load_all::<Task>(TASK_PREFIX).await.unwrap().is_empty());
    }
}
