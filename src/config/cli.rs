use crate::core::algorithm::{COMMAND_NAME, GEOID_GRID_EXTENSIONS};
use crate::core::{ConversionJob, ToolConfig};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, Validate,
};
use clap::Args;
use serde::{Deserialize, Serialize};

/// Arguments for a single conversion run.
#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct CliConfig {
    /// Input raster with ellipsoidal heights
    #[arg(short, long)]
    pub input: String,

    /// Geoid grid file (.tif/.tiff)
    #[arg(short, long = "geoid-grid")]
    pub geoid_grid_file: String,

    /// Output raster with orthometric heights
    #[arg(short, long)]
    pub output: String,

    /// Overwrite the output raster if it exists
    #[arg(long)]
    pub overwrite: bool,

    #[arg(long, default_value = COMMAND_NAME, help = "gdalwarp binary to run")]
    pub gdalwarp: String,

    #[arg(long, default_value = "gdalinfo", help = "gdalinfo binary used to read the input")]
    pub gdalinfo: String,

    /// Print the command without running gdalwarp
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CliConfig {
    pub fn to_job(&self) -> ConversionJob {
        ConversionJob {
            input: self.input.clone(),
            geoid_grid_file: self.geoid_grid_file.clone(),
            output: self.output.clone(),
            overwrite: self.overwrite,
        }
    }
}

impl ToolConfig for CliConfig {
    fn gdalwarp(&self) -> &str {
        &self.gdalwarp
    }

    fn gdalinfo(&self) -> &str {
        &self.gdalinfo
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_path("geoid-grid", &self.geoid_grid_file)?;
        validate_file_extension("geoid-grid", &self.geoid_grid_file, &GEOID_GRID_EXTENSIONS)?;
        validate_path("output", &self.output)?;
        validate_non_empty_string("gdalwarp", &self.gdalwarp)?;
        validate_non_empty_string("gdalinfo", &self.gdalinfo)?;
        Ok(())
    }
}
