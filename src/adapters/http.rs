use crate::domain::model::{HealthStatus, ProfileRequest, ResponseEnvelope};
use crate::domain::ports::{ConfigProvider, RecommendationSource};
use crate::utils::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;

pub const RECOMMEND_PATH: &str = "/api/recommend";
pub const HEALTH_PATH: &str = "/health";

/// Talks to the CareerHelper backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRecommendationClient {
    client: Client,
    base_url: String,
    headers: HashMap<String, String>,
}

impl HttpRecommendationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            headers: HashMap::new(),
        }
    }

    /// Only the address and headers are taken; the configured timeout is
    /// applied by [`SubmissionController`].
    ///
    /// [`SubmissionController`]: crate::core::controller::SubmissionController
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        let mut client = Self::new(config.base_url());
        client.headers = config.headers();
        client
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn recommend_url(&self) -> String {
        format!("{}{}", self.base_url, RECOMMEND_PATH)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let mut builder = builder;
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }
        builder
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        let url = format!("{}{}", self.base_url, HEALTH_PATH);
        tracing::debug!("Checking backend health at: {}", url);

        let response = self.request(self.client.get(&url)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Http {
                status: status.as_u16(),
                message: None,
            });
        }
        Ok(response.json::<HealthStatus>().await?)
    }
}

#[async_trait]
impl RecommendationSource for HttpRecommendationClient {
    async fn recommend(&self, profile: &ProfileRequest) -> Result<ResponseEnvelope> {
        let url = self.recommend_url();
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .request(self.client.post(&url))
            .json(profile)
            .send()
            .await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let bytes = response.bytes().await?;
        let body = serde_json::from_slice::<serde_json::Value>(&bytes);

        if status.is_success() {
            Ok(ResponseEnvelope::from_value(body?))
        } else {
            let message = body
                .ok()
                .map(ResponseEnvelope::from_value)
                .and_then(|envelope| envelope.failure_message().map(str::to_string));
            Err(AppError::Http {
                status: status.as_u16(),
                message,
            })
        }
    }
}
