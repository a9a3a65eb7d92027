use crate::core::algorithm::{COMMAND_NAME, INPUT};
use crate::core::escape::escape_and_join;
use crate::domain::model::{ConversionParameters, RasterLayer, WarpArgument};
use crate::utils::error::{GeoidError, Result};

/// Geographic WGS84 with ellipsoidal heights.
pub const SOURCE_SRS: &str = "+proj=longlat +datum=WGS84 +no_def";

const TARGET_SRS_BASE: &str = "+proj=longlat +datum=WGS84 +no_defs";

pub fn target_srs(geoid_grid_file: &str) -> String {
    format!("{} +geoidgrids={}", TARGET_SRS_BASE, geoid_grid_file)
}

/// A fully assembled gdalwarp invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct WarpCommand {
    pub program: &'static str,
    pub arguments: Vec<WarpArgument>,
}

impl WarpCommand {
    /// Arguments as console strings, e.g. `-tr 0.001 0.001`.
    pub fn rendered_arguments(&self) -> Vec<String> {
        self.arguments.iter().map(|arg| arg.to_string()).collect()
    }

    /// Flattened argument vector for spawning the process directly.
    pub fn argv(&self) -> Vec<String> {
        self.arguments.iter().flat_map(|arg| arg.tokens()).collect()
    }

    /// Tool name paired with the escaped, joined argument string.
    pub fn console_command(&self) -> (String, String) {
        (
            self.program.to_string(),
            escape_and_join(&self.rendered_arguments()),
        )
    }
}

/// Builds the gdalwarp command that shifts ellipsoidal heights onto the geoid.
///
/// Output resolution equals the input's, so only the vertical values change.
/// Fails with [`GeoidError::InvalidInput`] when the input raster is missing.
pub fn build_command(params: &ConversionParameters) -> Result<WarpCommand> {
    let source_crs = WarpArgument::Option {
        flag: "-s_srs",
        values: vec![SOURCE_SRS.to_string()],
    };
    let target_crs = WarpArgument::Option {
        flag: "-t_srs",
        values: vec![target_srs(&params.geoid_grid_file)],
    };

    let input = params
        .input
        .as_ref()
        .ok_or_else(|| GeoidError::InvalidInput {
            parameter: params
                .input_value
                .clone()
                .unwrap_or_else(|| INPUT.to_string()),
        })?;

    let mut arguments = vec![source_crs, target_crs, cell_size(input)];

    if params.overwrite {
        arguments.push(WarpArgument::Switch("-overwrite"));
    }

    arguments.push(WarpArgument::Path(input.source.clone()));
    arguments.push(WarpArgument::Path(params.output.clone()));

    tracing::debug!(
        input = %input.source,
        output = %params.output,
        "built {} command with {} arguments",
        COMMAND_NAME,
        arguments.len()
    );

    Ok(WarpCommand {
        program: COMMAND_NAME,
        arguments,
    })
}

fn cell_size(input: &RasterLayer) -> WarpArgument {
    WarpArgument::Option {
        flag: "-tr",
        values: vec![input.pixel_size_x.to_string(), input.pixel_size_y.to_string()],
    }
}
