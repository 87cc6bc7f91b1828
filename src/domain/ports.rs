use crate::domain::model::{NumberPair, NumerologyResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

/// Settings the roster export pipeline needs, whatever their source.
pub trait ConfigProvider: Send + Sync {
    fn roster_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    /// Zip archive name when the outputs should be bundled.
    fn compression_filename(&self) -> Option<&str>;

    fn compression_enabled(&self) -> bool {
        self.compression_filename().is_some()
    }

    fn file_stem(&self) -> &str {
        "roster_export"
    }
}

/// Expiring key/value store for rendered text.
pub trait TextCache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String, ttl: Duration);
}

/// Anything that exposes a root and destiny number can be scored.
pub trait CoreNumbers {
    fn root_number(&self) -> u32;
    fn destiny_number(&self) -> u32;
}

impl CoreNumbers for NumerologyResult {
    fn root_number(&self) -> u32 {
        self.root_number
    }

    fn destiny_number(&self) -> u32 {
        self.destiny_number
    }
}

impl CoreNumbers for NumberPair {
    fn root_number(&self) -> u32 {
        self.root_number
    }

    fn destiny_number(&self) -> u32 {
        self.destiny_number
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    type Record: Send;
    type Output: Send;

    async fn extract(&self) -> Result<Vec<Self::Record>>;
    async fn transform(&self, data: Vec<Self::Record>) -> Result<Self::Output>;
    async fn load(&self, result: Self::Output) -> Result<String>;
}
