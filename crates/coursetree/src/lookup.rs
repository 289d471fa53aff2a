#![forbid(unsafe_code)]

//! The remote catalog lookup.
//!
//! The pipeline only sees the [`Lookup`] trait. [`HttpLookup`] is the
//! production implementation: one `GET <endpoint>?query=<q>` per search,
//! answered by a JSON array of `{id, name, parent_id}` records. No
//! pagination, no retries.

use std::time::Duration;

use coursetree_core::Record;
use reqwest::Url;
use reqwest::blocking::Client;

use crate::error::{ConfigError, LookupError};

/// Fetch the raw record list for a free-text query.
pub trait Lookup {
    fn lookup(&self, query: &str) -> Result<Vec<Record>, LookupError>;
}

impl<F> Lookup for F
where
    F: Fn(&str) -> Result<Vec<Record>, LookupError>,
{
    fn lookup(&self, query: &str) -> Result<Vec<Record>, LookupError> {
        self(query)
    }
}

/// Blocking HTTP implementation of [`Lookup`].
#[derive(Debug, Clone)]
pub struct HttpLookup {
    client: Client,
    endpoint: Url,
}

impl HttpLookup {
    /// Build a client for `endpoint` with a per-request `timeout`.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let endpoint = parse_endpoint(endpoint)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("coursetree/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ConfigError::Client)?;
        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

impl Lookup for HttpLookup {
    fn lookup(&self, query: &str) -> Result<Vec<Record>, LookupError> {
        tracing::debug!(endpoint = %self.endpoint, query, "lookup request");
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("query", query)])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response.text()?;
        let records: Vec<Record> = serde_json::from_str(&body)?;
        tracing::debug!(records = records.len(), bytes = body.len(), "lookup response");
        Ok(records)
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };
    let url = Url::parse(endpoint).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme {other:?}"))),
    }
}
