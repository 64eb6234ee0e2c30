use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use tracing::{debug, info, warn};

use super::cache::ResponseCache;
use super::query::{decode_response, ContributionQuery, GraphQlRequest, PULL_REQUESTS_QUERY};
use crate::config::ClientConfig;
use crate::error::{ContribError, Result};
use crate::source::{ContributionSource, ContributionsPayload};

pub struct GithubClient {
    client: reqwest::Client,
    endpoint: String,
    cache: Mutex<ResponseCache>,
}

impl GithubClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let token = config.require_token()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| ContribError::Config(format!("invalid user agent: {e}")))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| ContribError::Config("token contains invalid characters".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            cache: Mutex::new(ResponseCache::new(config.cache_ttl)),
        })
    }

    fn cached(&self, query: &ContributionQuery) -> Option<ContributionsPayload> {
        self.cache.lock().ok()?.get(query)
    }

    fn remember(&self, query: &ContributionQuery, payload: &ContributionsPayload) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(query.clone(), payload.clone());
        }
    }

    async fn post(&self, query: &ContributionQuery) -> Result<ContributionsPayload> {
        let request = GraphQlRequest { query: PULL_REQUESTS_QUERY, variables: query };
        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(%status, login = %query.login, "GraphQL request rejected");
            return Err(ContribError::Api { status: status.as_u16(), body });
        }
        decode_response(&body, &query.login)
    }
}

#[async_trait]
impl ContributionSource for GithubClient {
    async fn fetch(&self, query: &ContributionQuery) -> Result<ContributionsPayload> {
        if let Some(payload) = self.cached(query) {
            debug!(login = %query.login, from = %query.from, "served from cache");
            return Ok(payload);
        }

        info!(login = %query.login, from = %query.from, "querying pull-request contributions");
        let payload = self.post(query).await?;
        info!(
            login = %query.login,
            repositories = payload.dataset.len(),
            contributions = payload.dataset.total_contributions(),
            "query resolved"
        );
        self.remember(query, &payload);
        Ok(payload)
    }
}
