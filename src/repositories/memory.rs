//! In-process store used by the service and route tests.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::UrlRepositoryTrait;
use crate::errors::RepositoryError;
use crate::models::UrlRecord;

type Result<T> = std::result::Result<T, RepositoryError>;

/// Vec-backed store that hands out ids 1, 2, 3, ... like a serial column.
#[derive(Default)]
pub struct InMemoryUrlRepository {
    rows: RwLock<Vec<UrlRecord>>,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn records(&self) -> Vec<UrlRecord> {
        self.rows.read().await.clone()
    }
}

#[async_trait]
impl UrlRepositoryTrait for InMemoryUrlRepository {
    async fn insert(&self, url: &str) -> Result<UrlRecord> {
        let mut rows = self.rows.write().await;
        let record = UrlRecord {
            id: rows.len() as i64 + 1,
            url: url.to_string(),
            alias: None,
            created_at: Utc::now(),
        };
        rows.push(record.clone());
        Ok(record)
    }

    async fn set_alias(&self, id: i64, alias: &str) -> Result<u64> {
        let mut rows = self.rows.write().await;
        if rows
            .iter()
            .any(|r| r.id != id && r.alias.as_deref() == Some(alias))
        {
            return Err(RepositoryError::Conflict("Alias already assigned".to_string()));
        }

        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("URL with id {} not found", id)))?;
        row.alias = Some(alias.to_string());
        Ok(1)
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<UrlRecord>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|r| r.alias.as_deref() == Some(alias))
            .cloned())
    }
}
