// Adapters layer: concrete ContentFetcher implementations.

pub mod file;
pub mod graphql;

pub use file::FileFetcher;
pub use graphql::GraphqlFetcher;

use crate::domain::model::{ContentEntity, QueryDescriptor};
use crate::domain::ports::ContentFetcher;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// The fetcher selected by `source.type`.
#[derive(Debug, Clone)]
pub enum SourceFetcher {
    Graphql(GraphqlFetcher),
    File(FileFetcher),
}

#[async_trait]
impl ContentFetcher for SourceFetcher {
    async fn fetch(&self, query: &QueryDescriptor, slug: &str) -> Result<Option<ContentEntity>> {
        match self {
            SourceFetcher::Graphql(f) => f.fetch(query, slug).await,
            SourceFetcher::File(f) => f.fetch(query, slug).await,
        }
    }
}

/// First matching record, projected onto the canonical shape.
pub(crate) fn first_entity(
    query: &QueryDescriptor,
    slug: &str,
    items: Vec<Map<String, Value>>,
) -> Result<Option<ContentEntity>> {
    if items.len() > 1 {
        tracing::warn!(
            "⚠️ {} entries in {} share slug {:?}, using the first",
            items.len(),
            query.collection,
            slug
        );
    }

    let Some(raw) = items.into_iter().next() else {
        return Ok(None);
    };

    let entity = serde_json::from_value(Value::Object(query.project(raw)))?;
    Ok(Some(entity))
}
