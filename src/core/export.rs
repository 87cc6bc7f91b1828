use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

/// Drives a `Pipeline` through extract, transform and load.
pub struct ExportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ExportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting export");

        let records = self.pipeline.extract().await?;
        tracing::info!("📥 Extracted {} records", records.len());

        let output = self.pipeline.transform(records).await?;
        tracing::debug!("🔄 Transform finished");

        let location = self.pipeline.load(output).await?;
        tracing::info!("✅ Output saved to: {}", location);

        Ok(location)
    }
}
