pub mod algorithm;
pub mod builder;
pub mod engine;
pub mod escape;

pub use crate::domain::model::{
    ConversionJob, ConversionParameters, ExecutionOutput, RasterLayer, RunReport, WarpArgument,
};
pub use crate::domain::ports::{CommandExecutor, RasterProbe, ToolConfig};
pub use crate::utils::error::Result;
