use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raster metadata the command builder needs from the input layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterLayer {
    /// Path or GDAL connection string the raster was opened from.
    pub source: String,
    /// Ground units per pixel along x, always positive.
    pub pixel_size_x: f64,
    /// Ground units per pixel along y, always positive.
    pub pixel_size_y: f64,
    pub width: Option<u64>,
    pub height: Option<u64>,
}

impl RasterLayer {
    pub fn new(source: impl Into<String>, pixel_size_x: f64, pixel_size_y: f64) -> Self {
        Self {
            source: source.into(),
            pixel_size_x,
            pixel_size_y,
            width: None,
            height: None,
        }
    }
}

/// Resolved parameters for one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionParameters {
    /// `None` when the input could not be resolved to a raster.
    pub input: Option<RasterLayer>,
    /// Raw value the user supplied for the input, used in error messages.
    pub input_value: Option<String>,
    pub geoid_grid_file: String,
    pub overwrite: bool,
    pub output: String,
}

/// One unresolved conversion request, as read from the CLI or a job file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionJob {
    pub input: String,
    pub geoid_grid_file: String,
    pub output: String,
    #[serde(default)]
    pub overwrite: bool,
}

impl ConversionJob {
    pub fn into_parameters(self, input: Option<RasterLayer>) -> ConversionParameters {
        ConversionParameters {
            input,
            input_value: Some(self.input),
            geoid_grid_file: self.geoid_grid_file,
            overwrite: self.overwrite,
            output: self.output,
        }
    }
}

/// One element of a gdalwarp argument list.
#[derive(Debug, Clone, PartialEq)]
pub enum WarpArgument {
    /// An option followed by its values, e.g. `-tr 0.5 0.5`.
    Option {
        flag: &'static str,
        values: Vec<String>,
    },
    /// A bare switch, e.g. `-overwrite`.
    Switch(&'static str),
    /// A positional file path.
    Path(String),
}

impl WarpArgument {
    /// Tokens passed to the process, without any shell quoting.
    pub fn tokens(&self) -> Vec<String> {
        match self {
            WarpArgument::Option { flag, values } => {
                let mut tokens = Vec::with_capacity(values.len() + 1);
                tokens.push(flag.to_string());
                tokens.extend(values.iter().cloned());
                tokens
            }
            WarpArgument::Switch(flag) => vec![flag.to_string()],
            WarpArgument::Path(path) => vec![path.clone()],
        }
    }
}

impl fmt::Display for WarpArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarpArgument::Option { flag, values } => {
                write!(f, "{}", flag)?;
                for value in values {
                    if value.contains(char::is_whitespace) {
                        write!(f, " \"{}\"", value)?;
                    } else {
                        write!(f, " {}", value)?;
                    }
                }
                Ok(())
            }
            WarpArgument::Switch(flag) => write!(f, "{}", flag),
            WarpArgument::Path(path) => write!(f, "{}", path),
        }
    }
}

/// Outcome of running an external program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionOutput {
    /// `None` when the process was terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub program: String,
    pub arguments: Vec<String>,
    pub command_line: String,
    pub input: RasterLayer,
    pub output: String,
    pub executed: bool,
    pub status: Option<i32>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_display_quotes_values_with_spaces() {
        let arg = WarpArgument::Option {
            flag: "-s_srs",
            values: vec!["+proj=longlat +datum=WGS84".to_string()],
        };
        assert_eq!(arg.to_string(), "-s_srs \"+proj=longlat +datum=WGS84\"");
        assert_eq!(arg.tokens(), vec!["-s_srs", "+proj=longlat +datum=WGS84"]);
    }

    #[test]
    fn test_option_display_multiple_values() {
        let arg = WarpArgument::Option {
            flag: "-tr",
            values: vec!["0.5".to_string(), "0.25".to_string()],
        };
        assert_eq!(arg.to_string(), "-tr 0.5 0.25");
        assert_eq!(arg.tokens().len(), 3);
    }

    #[test]
    fn test_job_into_parameters_keeps_raw_input() {
        let job = ConversionJob {
            input: "/in.tif".to_string(),
            geoid_grid_file: "/geoid.tif".to_string(),
            output: "/out.tif".to_string(),
            overwrite: true,
        };
        let params = job.into_parameters(None);
        assert_eq!(params.input_value.as_deref(), Some("/in.tif"));
        assert!(params.input.is_none());
        assert!(params.overwrite);
    }

    #[test]
    fn test_execution_output_success() {
        let mut output = ExecutionOutput::default();
        assert!(!output.success());
        output.status = Some(0);
        assert!(output.success());
    }
}
