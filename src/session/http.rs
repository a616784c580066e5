use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::config::{default_timeout_seconds, Config};
use crate::error::SdkError;
use crate::services::ServiceTable;

use super::api_session::Session;
use super::response::SessionResponse;

const AUTH_TOKEN_HEADER: &str = "Authtoken";

/// Session backed by a reqwest HTTP client
#[derive(Clone)]
pub struct HttpSession {
    client: Client,
    base_url: String,
    token: String,
    timeout: Duration,
    services: ServiceTable,
}

impl HttpSession {
    /// Create a new session with the default endpoint table and request timeout
    pub fn new(base_url: String, token: String) -> Result<Self, SdkError> {
        let timeout = Duration::from_secs(default_timeout_seconds());
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            token,
            timeout,
            services: ServiceTable::default(),
        })
    }

    /// Create a session from the loaded configuration
    pub fn from_config(config: &Config) -> Result<Self, SdkError> {
        let timeout = Duration::from_secs(config.server.timeout_seconds);
        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(config.server.accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            base_url: config.server.url.clone(),
            token: config.server.token.clone(),
            timeout,
            services: config.services.clone(),
        })
    }

    /// Timeout applied to every request
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn with_services(mut self, services: ServiceTable) -> Self {
        self.services = services;
        self
    }

    /// Build the full URL for a path relative to the base URL
    pub(crate) fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        }
    }
}

#[async_trait::async_trait]
impl Session for HttpSession {
    async fn get(&self, path: &str) -> Result<SessionResponse, SdkError> {
        let url = self.build_url(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(AUTH_TOKEN_HEADER, &self.token)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("GET {} returned status {}", url, status);

        Ok(SessionResponse::new(status, body))
    }

    fn services(&self) -> &ServiceTable {
        &self.services
    }
}
