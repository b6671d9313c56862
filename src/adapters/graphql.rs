use crate::adapters::first_entity;
use crate::domain::model::{Collection, ContentEntity, QueryDescriptor};
use crate::domain::ports::ContentFetcher;
use crate::utils::error::{PageError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<CollectionData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct CollectionData {
    collection: Option<Collection<Map<String, Value>>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

/// Fetches entries from a GraphQL content API (Contentful-style collections).
#[derive(Debug, Clone)]
pub struct GraphqlFetcher {
    client: Client,
    endpoint: String,
    access_token: Option<String>,
}

impl GraphqlFetcher {
    pub fn new(endpoint: impl Into<String>, access_token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            access_token,
        })
    }
}

#[async_trait]
impl ContentFetcher for GraphqlFetcher {
    async fn fetch(&self, query: &QueryDescriptor, slug: &str) -> Result<Option<ContentEntity>> {
        let body = json!({
            "query": query.document(),
            "variables": { "slug": slug },
        });

        tracing::debug!("Querying {} for slug {:?} at {}", query.collection, slug, self.endpoint);
        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Content API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PageError::UpstreamStatusError {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GraphqlResponse = response.json().await?;
        if !payload.errors.is_empty() {
            let message = payload
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(PageError::QueryError { message });
        }

        let items = payload
            .data
            .and_then(|d| d.collection)
            .map(|c| c.items)
            .unwrap_or_default();

        first_entity(query, slug, items)
    }
}
