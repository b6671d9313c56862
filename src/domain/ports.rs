use crate::domain::model::{ContentEntity, QueryDescriptor};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Boundary to the content store. `Ok(None)` is the not-found case; errors
/// are transport or query failures only.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, query: &QueryDescriptor, slug: &str) -> Result<Option<ContentEntity>>;
}

pub trait ConfigProvider: Send + Sync {
    fn site_name(&self) -> &str;
}
