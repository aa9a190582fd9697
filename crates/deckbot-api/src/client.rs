//! Databook API client
//!
//! All data requests carry a bearer token. The first request logs in; a 401
//! answer refreshes the token and retries, up to `max_auth_retries` times.

use crate::config::DatabookConfig;
use crate::error::{ApiError, Result};
use deckbot_core::{Company, CompanyRef, MetricDetail, MetricRef};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

const AUTH_PATH: [&str; 2] = ["auth", "local"];
const API: &str = "api";
const COMPANIES: &str = "companies";
const METRICS: &str = "metrics";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// Databook API client
#[derive(Debug)]
pub struct DatabookClient {
    client: Client,
    config: DatabookConfig,
    token: RwLock<Option<String>>,
}

impl DatabookClient {
    /// Create a new client from a validated configuration
    pub fn new(config: DatabookConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("deckbot/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config,
            token: RwLock::new(None),
        })
    }

    /// Start with an already issued token instead of logging in
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = RwLock::new(Some(token.into()));
        self
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &DatabookConfig {
        &self.config
    }

    /// Endpoint URL with `segments` appended, each one percent-encoded
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.config.endpoint)
            .map_err(|e| ApiError::ConfigError(format!("invalid endpoint: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::ConfigError("endpoint cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Log in with the configured credentials and store the issued token
    pub async fn authenticate(&self) -> Result<String> {
        debug!("Requesting Databook token for {}", self.config.email);

        let response = self
            .client
            .post(self.url(&AUTH_PATH)?)
            .form(&[
                ("email", self.config.email.as_str()),
                ("password", self.config.password.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::AuthenticationFailed(format!(
                "login returned HTTP {status}"
            )));
        }

        let body = response.bytes().await?;
        let TokenResponse { token } = serde_json::from_slice(&body)
            .map_err(|e| ApiError::AuthenticationFailed(format!("no token in response: {e}")))?;

        *self.token.write().await = Some(token.clone());
        Ok(token)
    }

    async fn current_token(&self) -> Result<String> {
        if let Some(token) = self.token.read().await.clone() {
            return Ok(token);
        }
        self.authenticate().await
    }

    /// GET a JSON document, refreshing the token on 401
    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.url(segments)?;
        let path = url.path();
        let mut refreshes = 0;

        loop {
            let token = self.current_token().await?;
            debug!("GET {}", url);
            let response = self
                .client
                .get(url.clone())
                .bearer_auth(&token)
                .send()
                .await?;

            match response.status() {
                status if status.is_success() => {
                    let body = response.bytes().await?;
                    return Ok(serde_json::from_slice(&body)?);
                }
                StatusCode::UNAUTHORIZED => {
                    if refreshes >= self.config.max_auth_retries {
                        return Err(ApiError::Unauthorized {
                            path: path.to_string(),
                            refreshes,
                        });
                    }
                    refreshes += 1;
                    debug!("Token rejected for {}, refreshing", path);
                    self.authenticate().await?;
                }
                StatusCode::INTERNAL_SERVER_ERROR => {
                    return Err(ApiError::Rejected {
                        path: path.to_string(),
                    });
                }
                status => {
                    return Err(ApiError::UnexpectedStatus {
                        status: status.as_u16(),
                        path: path.to_string(),
                    });
                }
            }
        }
    }

    /// Get every company available to the account
    pub async fn list_companies(&self) -> Result<Vec<CompanyRef>> {
        self.get_json(&[API, COMPANIES, ""]).await
    }

    /// Get the overview of a company
    pub async fn company_overview(&self, company_id: &str) -> Result<Company> {
        let mut company: Company = self
            .get_json(&[API, COMPANIES, id_segment(company_id)?])
            .await?;
        if company.id.is_empty() {
            company.id = company_id.to_string();
        }
        Ok(company)
    }

    /// Get the metrics offered for a company
    pub async fn company_metrics(&self, company_id: &str) -> Result<Vec<MetricRef>> {
        self.get_json(&[API, COMPANIES, id_segment(company_id)?, METRICS])
            .await
    }

    /// Get the chart data and description of one metric
    pub async fn metric_detail(&self, company_id: &str, metric_id: &str) -> Result<MetricDetail> {
        let mut detail: MetricDetail = self
            .get_json(&[
                API,
                COMPANIES,
                id_segment(company_id)?,
                METRICS,
                id_segment(metric_id)?,
            ])
            .await?;
        if detail.id.is_empty() {
            detail.id = metric_id.to_string();
        }
        Ok(detail)
    }

    /// Download an external asset such as a logo
    pub async fn fetch_asset(&self, url: &str) -> Result<Vec<u8>> {
        debug!("Fetching asset {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Asset {} returned HTTP {}", url, status);
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                path: url.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// An id used as one path segment; empty and dot-only ids would address another resource
fn id_segment(id: &str) -> Result<&str> {
    if matches!(id.trim(), "" | "." | "..") {
        return Err(ApiError::InvalidId(id.to_string()));
    }
    Ok(id)
}
