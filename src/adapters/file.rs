use crate::adapters::first_entity;
use crate::domain::model::{ContentEntity, QueryDescriptor};
use crate::domain::ports::ContentFetcher;
use crate::utils::error::{PageError, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Reads raw entries from `<content_dir>/<collection>.json`, either a bare
/// array or a `{ "items": [...] }` object. Field names are the source ones;
/// aliases are applied on the way out.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    base_path: PathBuf,
}

impl FileFetcher {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn collection_path(&self, query: &QueryDescriptor) -> PathBuf {
        self.base_path.join(format!("{}.json", query.collection))
    }
}

fn into_records(value: Value) -> Result<Vec<Map<String, Value>>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("items") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        other => {
            return Err(PageError::QueryError {
                message: format!("expected an array of entries, found {}", other),
            })
        }
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(obj) => Some(obj),
            _ => None,
        })
        .collect())
}

#[async_trait]
impl ContentFetcher for FileFetcher {
    async fn fetch(&self, query: &QueryDescriptor, slug: &str) -> Result<Option<ContentEntity>> {
        let path = self.collection_path(query);
        tracing::debug!("Reading {} from {}", query.collection, path.display());

        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No collection file at {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let records = into_records(serde_json::from_slice(&data)?)?;
        let matches: Vec<_> = records
            .into_iter()
            .filter(|r| r.get("slug").and_then(Value::as_str) == Some(slug))
            .collect();

        first_entity(query, slug, matches)
    }
}
