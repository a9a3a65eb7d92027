pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{local_engine, GdalInfoProbe, ProcessExecutor};
pub use config::toml_config::TomlConfig;
pub use crate::core::{
    builder::{build_command, WarpCommand},
    engine::ConversionEngine,
};
pub use domain::model::{ConversionJob, ConversionParameters, RasterLayer, RunReport};
pub use utils::error::{GeoidError, Result};
