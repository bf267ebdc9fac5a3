//! VK API client for catalog ingestion.
//!
//! Listings come either from a community's market section (`market.get`)
//! or from market attachments on its wall posts (`wall.get`). Requests
//! run against a list of base URLs; on a VK error payload or a transport
//! failure the next URL is tried.

use serde_json::Value;

/// Mirror endpoints answer the same method calls when the primary is
/// unreachable from the deployment region.
pub const DEFAULT_BASE_URLS: &[&str] = &[
    "https://api.vk.com/method/",
    "https://vkresult.ru/method/",
];

#[derive(thiserror::Error, Debug)]
pub enum VkError {
    #[error("all API endpoints failed for {method}")]
    Exhausted { method: String },
}

pub struct VkClient {
    token: String,
    api_version: String,
    base_urls: Vec<String>,
    http: reqwest::Client,
}

impl VkClient {
    pub fn new(token: String, api_version: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");
        Self {
            token,
            api_version,
            base_urls: DEFAULT_BASE_URLS.iter().map(|s| s.to_string()).collect(),
            http,
        }
    }

    pub fn with_base_urls(mut self, base_urls: Vec<String>) -> Self {
        self.base_urls = base_urls;
        self
    }

    /// Call a VK API method, walking the base URL list until one answers
    /// without an `error` payload.
    async fn call(&self, method: &str, params: &[(&str, String)]) -> Result<Value, VkError> {
        let mut query: Vec<(&str, String)> = params.to_vec();
        query.push(("access_token", self.token.clone()));
        query.push(("v", self.api_version.clone()));

        for base_url in &self.base_urls {
            let url = format!("{}{}", base_url, method);
            let resp = match self.http.get(&url).query(&query).send().await {
                Ok(resp) => resp,
                Err(err) => {
                    tracing::warn!("Failed with {}: {}", base_url, err);
                    continue;
                }
            };

            let data: Value = match resp.json().await {
                Ok(data) => data,
                Err(err) => {
                    tracing::warn!("Failed with {}: {}", base_url, err);
                    continue;
                }
            };

            if let Some(error) = data.get("error") {
                tracing::error!("VK API Error: {}", error);
                continue;
            }

            return Ok(data.get("response").cloned().unwrap_or_else(|| Value::Object(Default::default())));
        }

        Err(VkError::Exhausted {
            method: method.to_string(),
        })
    }

    /// Fetch a community's market listings, 200 per page.
    pub async fn market_items(&self, group_id: i64, limit: i64) -> Result<Vec<Value>, VkError> {
        let mut items: Vec<Value> = Vec::new();
        let mut offset: i64 = 0;
        let count: i64 = 200;

        while (items.len() as i64) < limit {
            let data = self
                .call(
                    "market.get",
                    &[
                        ("owner_id", (-group_id).to_string()),
                        ("count", count.to_string()),
                        ("offset", offset.to_string()),
                        ("extended", "1".to_string()),
                    ],
                )
                .await?;

            let batch = data
                .get("items")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            if batch.is_empty() {
                break;
            }

            let short_page = (batch.len() as i64) < count;
            items.extend(batch);
            offset += count;

            if short_page {
                break;
            }
        }

        items.truncate(limit as usize);
        Ok(items)
    }

    /// Fetch market attachments from a community's wall, 100 posts per page.
    pub async fn wall_items(&self, group_id: i64, limit: i64) -> Result<Vec<Value>, VkError> {
        let mut items: Vec<Value> = Vec::new();
        let mut offset: i64 = 0;
        let count: i64 = 100;

        while (items.len() as i64) < limit {
            let data = self
                .call(
                    "wall.get",
                    &[
                        ("owner_id", (-group_id).to_string()),
                        ("count", count.to_string()),
                        ("offset", offset.to_string()),
                    ],
                )
                .await?;

            let posts = data
                .get("items")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            if posts.is_empty() {
                break;
            }

            for post in &posts {
                let attachments = post
                    .get("attachments")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default();
                for att in attachments {
                    if att.get("type").and_then(Value::as_str) == Some("market") {
                        if let Some(market) = att.get("market") {
                            items.push(market.clone());
                        }
                    }
                }
            }

            let short_page = (posts.len() as i64) < count;
            offset += count;

            if short_page {
                break;
            }
        }

        items.truncate(limit as usize);
        Ok(items)
    }

    /// Resolve a community's display name, falling back to `Group {id}`.
    pub async fn group_name(&self, group_id: i64) -> String {
        let fallback = format!("Group {}", group_id);
        let data = match self
            .call("groups.getById", &[("group_ids", group_id.to_string())])
            .await
        {
            Ok(data) => data,
            Err(_) => return fallback,
        };

        // Older API versions answer with a bare array, newer ones wrap
        // it in a `groups` field.
        let first = data
            .as_array()
            .and_then(|groups| groups.first())
            .or_else(|| {
                data.get("groups")
                    .and_then(Value::as_array)
                    .and_then(|groups| groups.first())
            });

        first
            .and_then(|group| group.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(fallback)
    }
}
