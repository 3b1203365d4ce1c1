//! HTTP client for the retail data service's OData endpoints.
//!
//! Every collection is exposed as `<base>/<EntitySet>?$format=json` and
//! wrapped in the OData v2 envelope `{"d":{"results":[...]}}`.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::models::{
    Customer, Department, Inventory, Notification, Order, Product, Promotion, Store,
};

use super::{ApiError, DataService};

// ============================================================================
// Constants
// ============================================================================

/// Fallback endpoint when no base URL is configured.
const DEFAULT_BASE_URL: &str = "http://localhost:8080/odata";

/// HTTP request timeout in seconds.
/// 30s allows for slow responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// OData v2 response envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    d: ResultSet<T>,
}

#[derive(Debug, Deserialize)]
struct ResultSet<T> {
    results: Vec<T>,
}

/// Client for the remote retail data service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = config.request_timeout_secs.unwrap_or(REQUEST_TIMEOUT_SECS);
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self { client, base_url })
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get_collection<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;

        let envelope: Envelope<T> = response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))?;

        debug!(url = %url, records = envelope.d.results.len(), "collection fetched");
        Ok(envelope.d.results)
    }

    /// Escape a keyword for embedding in an OData `$filter` string literal.
    fn escape_keyword(keyword: &str) -> String {
        keyword.replace('\'', "''")
    }

    fn inventory_path(keywords: &[String]) -> String {
        let mut path = String::from("Inventory?$format=json");
        if !keywords.is_empty() {
            let clauses: Vec<String> = keywords
                .iter()
                .map(|kw| format!("substringof('{}', productName)", Self::escape_keyword(kw)))
                .collect();
            path.push_str("&$filter=");
            path.push_str(&clauses.join(" or "));
        }
        path
    }
}

#[async_trait]
impl DataService for ApiClient {
    async fn fetch_customers(&self) -> Result<Vec<Customer>> {
        self.get_collection("Customer?$format=json").await
    }

    async fn fetch_departments(&self) -> Result<Vec<Department>> {
        self.get_collection("Department?$format=json").await
    }

    async fn fetch_products(&self) -> Result<Vec<Product>> {
        self.get_collection("Product?$format=json").await
    }

    async fn fetch_promotions(&self) -> Result<Vec<Promotion>> {
        self.get_collection("Promotion?$format=json").await
    }

    async fn fetch_stores(&self) -> Result<Vec<Store>> {
        self.get_collection("Store?$format=json").await
    }

    async fn fetch_inventories(&self, keywords: &[String]) -> Result<Vec<Inventory>> {
        self.get_collection(&Self::inventory_path(keywords)).await
    }

    async fn fetch_orders(&self, customer_id: i32) -> Result<Vec<Order>> {
        self.get_collection(&format!("getOrder?CustomerID={}&$format=json", customer_id))
            .await
    }

    async fn fetch_notifications(&self, customer_id: i32) -> Result<Vec<Notification>> {
        self.get_collection(&format!(
            "getNotification?CustomerID={}&$format=json",
            customer_id
        ))
        .await
    }
}
