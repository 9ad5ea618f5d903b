use crate::domain::model::{ProfileRequest, ResponseEnvelope};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn timeout(&self) -> Option<Duration>;
    fn headers(&self) -> HashMap<String, String>;
}

/// Anything that can turn a profile into a recommendation response.
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn recommend(&self, profile: &ProfileRequest) -> Result<ResponseEnvelope>;
}
