use crate::domain::model::{ExecutionOutput, RasterLayer};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Runs an external program to completion.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, program: &str, args: &[String]) -> Result<ExecutionOutput>;
}

/// Resolves an input reference to raster metadata.
///
/// `Ok(None)` means the reference does not name a readable raster.
#[async_trait]
pub trait RasterProbe: Send + Sync {
    async fn probe(&self, source: &str) -> Result<Option<RasterLayer>>;
}

pub trait ToolConfig: Send + Sync {
    fn gdalwarp(&self) -> &str;
    fn gdalinfo(&self) -> &str;
    fn dry_run(&self) -> bool;
}
