// Adapters layer: concrete implementations of the domain ports that talk to GDAL binaries.

pub mod gdalinfo;
pub mod process;

pub use gdalinfo::GdalInfoProbe;
pub use process::ProcessExecutor;

use crate::core::engine::ConversionEngine;
use crate::core::ToolConfig;

/// Engine that runs the local GDAL binaries named by `config`.
pub fn local_engine<C: ToolConfig + ?Sized>(
    config: &C,
) -> ConversionEngine<ProcessExecutor, GdalInfoProbe<ProcessExecutor>> {
    let probe = GdalInfoProbe::with_program(ProcessExecutor::new(), config.gdalinfo());
    ConversionEngine::new(ProcessExecutor::new(), probe)
        .with_gdalwarp(config.gdalwarp())
        .with_dry_run(config.dry_run())
}
