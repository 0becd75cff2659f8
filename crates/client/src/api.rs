//! REST client for the dashboard backend.
//!
//! One-shot request/response calls: no retries, no deduplication, no local
//! merging. The backend is the only source of truth and views simply
//! re-fetch.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use stockdesk_core::InventoryId;
use stockdesk_inventory::InventoryCount;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::wire::{
    Envelope, InventoryDto, InventorySummary, InventorySummaryDto, Page, PageDto, UnreadCountDto,
};

/// Listing query for `GET /inventories`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
}

impl InventoryQuery {
    pub fn first_page(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            search: None,
        }
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = if term.trim().is_empty() {
            None
        } else {
            Some(term.trim().to_string())
        };
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }
}

/// HTTP client bound to one backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.config
            .api_url()
            .join(path)
            .map_err(|e| ClientError::Network(format!("invalid endpoint {path}: {e}")))
    }

    fn get(&self, url: Url) -> RequestBuilder {
        let req = self.http.get(url);
        match self.config.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let resp = req.send().await?;
        let resp = check_status(resp).await?;
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Check connectivity by hitting the health endpoint.
    pub async fn check_connectivity(&self) -> bool {
        let url = match self.endpoint("health") {
            Ok(url) => url,
            Err(_) => return false,
        };

        match self.get(url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(err) => {
                tracing::debug!(error = %err, "health check failed");
                false
            }
        }
    }

    /// Fetch one inventory count with its product lines.
    #[tracing::instrument(skip(self, id), fields(inventory_id = %id))]
    pub async fn get_inventory(&self, id: &InventoryId) -> Result<InventoryCount, ClientError> {
        let url = self.endpoint(&format!("inventories/{}", id.as_str()))?;
        let envelope: Envelope<InventoryDto> = self.send_json(self.get(url)).await?;
        let count = InventoryCount::try_from(envelope.into_inner())?;

        tracing::info!(products = count.products.len(), "inventory fetched");
        Ok(count)
    }

    /// Fetch one page of the inventory listing.
    #[tracing::instrument(skip(self, query), fields(page = query.page, limit = query.limit))]
    pub async fn list_inventories(
        &self,
        query: &InventoryQuery,
    ) -> Result<Page<InventorySummary>, ClientError> {
        let url = self.endpoint("inventories")?;
        let mut params = vec![
            ("page", query.page.to_string()),
            ("limit", query.limit.to_string()),
        ];
        if let Some(search) = &query.search {
            params.push(("search", search.clone()));
        }

        let dto: PageDto<InventorySummaryDto> =
            self.send_json(self.get(url).query(&params)).await?;
        let page = dto.into_page(query.page, query.limit)?;

        tracing::info!(items = page.items.len(), total = ?page.total, "inventories listed");
        Ok(page)
    }

    /// Fetch the number of unread messages for the current user.
    pub async fn unread_message_count(&self) -> Result<u64, ClientError> {
        let url = self.endpoint("messages/unread-count")?;
        let dto: UnreadCountDto = self.send_json(self.get(url)).await?;
        Ok(dto.count)
    }
}

async fn check_status(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    tracing::warn!(status = status.as_u16(), url = %resp.url(), "request failed");

    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound);
    }

    Err(ClientError::Api {
        status: status.as_u16(),
        body: resp.text().await.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_term_is_trimmed_and_blank_dropped() {
        let q = InventoryQuery::first_page(20).with_search("  drill ");
        assert_eq!(q.search.as_deref(), Some("drill"));

        let q = q.with_search("   ");
        assert_eq!(q.search, None);
    }

    #[test]
    fn page_and_limit_are_at_least_one() {
        let q = InventoryQuery::first_page(0).with_page(0);
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 1);
    }

    #[test]
    fn endpoints_join_onto_base_path() {
        let config = ClientConfig::new("https://erp.example.com/api").unwrap();
        let client = ApiClient::new(config).unwrap();
        let url = client.endpoint("inventories/inv-1").unwrap();
        assert_eq!(url.as_str(), "https://erp.example.com/api/inventories/inv-1");
    }

    #[test]
    fn inventory_ids_cannot_climb_out_of_the_collection() {
        assert!("..".parse::<InventoryId>().is_err());
        assert!("inv-1%2F..".parse::<InventoryId>().is_err());

        let config = ClientConfig::new("https://erp.example.com/api").unwrap();
        let client = ApiClient::new(config).unwrap();
        let id: InventoryId = "count.2024".parse().unwrap();
        let url = client.endpoint(&format!("inventories/{}", id.as_str())).unwrap();
        assert_eq!(url.as_str(), "https://erp.example.com/api/inventories/count.2024");
    }
}
