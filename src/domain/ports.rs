use crate::domain::model::{ProfileSnapshot, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn username(&self) -> &str;
    fn api_base(&self) -> &str;
    fn token(&self) -> Option<&str>;
    fn stats_output(&self) -> &str;
    fn langs_output(&self) -> &str;
    fn concurrent_requests(&self) -> usize;
    fn per_page(&self) -> u32;
    fn timeout_seconds(&self) -> u64;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ProfileSnapshot>;
    async fn transform(&self, snapshot: ProfileSnapshot) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<Vec<String>>;
}
