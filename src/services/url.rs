use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use validator::Validate;

use crate::errors::ServiceError;
use crate::models::{CreateUrlDto, UrlRecord};
use crate::repositories::UrlRepositoryTrait;
use crate::utils::base62;

type Result<T> = std::result::Result<T, ServiceError>;

#[async_trait]
pub trait UrlServiceTrait {
    /// Stores a new URL and gives it an alias derived from its id.
    async fn create(&self, dto: CreateUrlDto) -> Result<UrlRecord>;

    /// Looks up the URL an alias points to.
    async fn resolve(&self, alias: &str) -> Result<String>;
}

pub struct UrlService<T: UrlRepositoryTrait> {
    repository: Arc<T>,
}

impl<T: UrlRepositoryTrait> UrlService<T> {
    pub fn new(repository: Arc<T>) -> Self {
        Self { repository }
    }

    /// Alias for a freshly inserted record. Pure; the caller persists it.
    pub fn allocate_alias(id: i64) -> Result<String> {
        Ok(base62::encode(id)?)
    }
}

#[async_trait]
impl<T: UrlRepositoryTrait> UrlServiceTrait for UrlService<T> {
    async fn create(&self, dto: CreateUrlDto) -> Result<UrlRecord> {
        let dto = dto.trimmed();
        if let Err(e) = dto.validate() {
            return Err(ServiceError::Validation(e.to_string()));
        }

        // The alias is a function of the committed id, so this is two writes.
        let mut record = self.repository.insert(&dto.url).await?;
        let alias = Self::allocate_alias(record.id)?;
        self.repository.set_alias(record.id, &alias).await?;

        info!("Shortened '{}' as '{}' (id {})", record.url, alias, record.id);
        record.alias = Some(alias);
        Ok(record)
    }

    async fn resolve(&self, alias: &str) -> Result<String> {
        match self.repository.find_by_alias(alias).await? {
            Some(record) => Ok(record.url),
            None => {
                debug!("No URL stored under alias '{}'", alias);
                Err(ServiceError::AliasNotFound(alias.to_string()))
            }
        }
    }
}
