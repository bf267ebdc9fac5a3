//! Typed HTTP client for the comparator API.
//!
//! One method per endpoint, single-shot requests. The base URL is an
//! explicit constructor argument so callers decide where it comes from.

use crate::forms::{Comparison, ComparisonType, Parse, ParseSource, SearchQuery};
use crate::models::{Build, CatalogStats};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("build not found")]
    NotFound,
    #[error("request failed: {0}")]
    RequestFailed(String),
}

pub struct PcBuildsClient {
    base_url: String,
    http: reqwest::Client,
}

impl PcBuildsClient {
    pub fn new(base_url: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub async fn our_builds(&self) -> Result<Vec<Build>, ClientError> {
        self.get_json(&format!("{}/builds/our", self.base_url), &[])
            .await
    }

    pub async fn build(&self, id: &str) -> Result<Build, ClientError> {
        self.get_json(&format!("{}/builds/{}", self.base_url, id), &[])
            .await
    }

    pub async fn compare_by_price(&self, build_id: &str) -> Result<Vec<Build>, ClientError> {
        self.post_json(
            &format!("{}/compare/price", self.base_url),
            &Comparison {
                build_id: build_id.to_string(),
                comparison_type: ComparisonType::Price,
            },
        )
        .await
    }

    pub async fn compare_by_specs(&self, build_id: &str) -> Result<Vec<Build>, ClientError> {
        self.post_json(
            &format!("{}/compare/specs", self.base_url),
            &Comparison {
                build_id: build_id.to_string(),
                comparison_type: ComparisonType::Specs,
            },
        )
        .await
    }

    pub async fn search(&self, filters: &SearchQuery) -> Result<Vec<Build>, ClientError> {
        let query = serde_urlencoded_pairs(filters);
        self.get_json(&format!("{}/search", self.base_url), &query)
            .await
    }

    pub async fn statistics(&self) -> Result<CatalogStats, ClientError> {
        self.get_json(&format!("{}/stats", self.base_url), &[])
            .await
    }

    pub async fn start_parsing(
        &self,
        group_ids: Vec<i64>,
        source: ParseSource,
    ) -> Result<Value, ClientError> {
        self.post_json(
            &format!("{}/parse/start", self.base_url),
            &Parse { group_ids, source },
        )
        .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|err| ClientError::RequestFailed(format!("server unreachable: {}", err)))?;

        Self::decode(resp).await
    }

    async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| ClientError::RequestFailed(format!("server unreachable: {}", err)))?;

        Self::decode(resp).await
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound);
        }
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::RequestFailed(format!(
                "request failed ({}): {}",
                status, body
            )));
        }

        resp.json()
            .await
            .map_err(|err| ClientError::RequestFailed(format!("invalid response: {}", err)))
    }
}

fn serde_urlencoded_pairs(filters: &SearchQuery) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let push = |pairs: &mut Vec<(String, String)>, key: &str, value: Option<String>| {
        if let Some(value) = value {
            pairs.push((key.to_string(), value));
        }
    };
    push(&mut pairs, "q", filters.q.clone());
    push(&mut pairs, "cpu", filters.cpu.clone());
    push(&mut pairs, "gpu", filters.gpu.clone());
    push(&mut pairs, "company", filters.company.clone());
    push(&mut pairs, "min_price", filters.min_price.map(|p| p.to_string()));
    push(&mut pairs, "max_price", filters.max_price.map(|p| p.to_string()));
    pairs
}
