use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use tracing::{debug, warn};

use crate::config::HttpConfig;

/// Uniform result of an outbound call. Transport failures never surface as
/// `Err`; they arrive as `status_code == 0` with `error` set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub status_code: u16,
    pub body: String,
    pub error: Option<String>,
}

impl Envelope {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status_code: 0,
            body: String::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }

    pub fn error_text(&self) -> String {
        self.error.clone().unwrap_or_default()
    }
}

#[async_trait]
pub trait HttpGateway: Send + Sync {
    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Envelope;
    async fn post(&self, url: &str, body: &serde_json::Value, params: &[(&str, &str)]) -> Envelope;
}

#[derive(Clone)]
pub struct ReqwestGateway {
    client: Client,
}

impl ReqwestGateway {
    pub fn new(cfg: &HttpConfig) -> anyhow::Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
            .build()?;
        Ok(Self { client })
    }

    async fn send(&self, req: reqwest::RequestBuilder, method: &str, url: &str) -> Envelope {
        let resp = match req.send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, %method, %url, "outbound request failed");
                return Envelope::failed(e.to_string());
            }
        };
        let status = resp.status();
        let body = match resp.text().await {
            Ok(b) => b,
            Err(e) => {
                warn!(error = %e, %method, %url, "reading response body failed");
                return Envelope {
                    status_code: status.as_u16(),
                    body: String::new(),
                    error: Some(e.to_string()),
                };
            }
        };
        debug!(%method, %url, status = status.as_u16(), "outbound request done");
        let error = (!status.is_success()).then(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string())
        });
        Envelope {
            status_code: status.as_u16(),
            body,
            error,
        }
    }
}

#[async_trait]
impl HttpGateway for ReqwestGateway {
    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Envelope {
        let req = self.client.get(url).query(params);
        self.send(req, "GET", url).await
    }

    async fn post(&self, url: &str, body: &serde_json::Value, params: &[(&str, &str)]) -> Envelope {
        let req = self.client.post(url).query(params).json(body);
        self.send(req, "POST", url).await
    }
}
