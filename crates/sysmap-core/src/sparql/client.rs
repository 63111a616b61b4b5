use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;

use super::{QueryResults, SparqlError};
use crate::config::{SparqlConfig, SPARQL_RESULTS_JSON};

/// Anything that can answer a SELECT query.
///
/// The loader only depends on this trait, so tests and offline tooling can
/// serve canned results.
#[async_trait]
pub trait SparqlSource: Send + Sync {
    async fn select(&self, query: &str) -> Result<QueryResults, SparqlError>;
}

/// HTTP client for a SPARQL 1.1 protocol endpoint.
///
/// Queries are sent as `GET <endpoint>?query=...` asking for JSON results.
pub struct SparqlClient {
    endpoint: String,
    timeout: Duration,
    client: Client,
}

impl SparqlClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
            client: Client::new(),
        }
    }

    pub fn from_config(config: &SparqlConfig) -> Self {
        Self::new(config.endpoint.clone(), Duration::from_secs(config.timeout_secs))
    }

    async fn send_request(&self, query: &str) -> Result<QueryResults, SparqlError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("query", query)])
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SparqlError::Endpoint {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.text().await.map_err(|e| self.request_error(e))?;
        Ok(QueryResults::from_json(&body)?)
    }

    fn request_error(&self, err: reqwest::Error) -> SparqlError {
        if err.is_timeout() {
            SparqlError::Timeout(self.timeout.as_secs())
        } else {
            err.into()
        }
    }
}

#[async_trait]
impl SparqlSource for SparqlClient {
    async fn select(&self, query: &str) -> Result<QueryResults, SparqlError> {
        tracing::debug!(endpoint = %self.endpoint, bytes = query.len(), "sending query");
        self.send_request(query).await
    }
}
