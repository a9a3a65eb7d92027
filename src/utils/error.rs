use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoidError {
    #[error("Invalid input layer {parameter}")]
    InvalidInput { parameter: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("External tool not found: {program}")]
    ToolNotFound { program: String },

    #[error("{program} exited with status {}: {stderr}", fmt_status(.status))]
    ToolFailed {
        program: String,
        status: Option<i32>,
        stderr: String,
    },
}

fn fmt_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "unknown".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    ExternalTool,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GeoidError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GeoidError::InvalidInput { .. } => ErrorCategory::Input,
            GeoidError::ConfigError { .. }
            | GeoidError::MissingConfigError { .. }
            | GeoidError::InvalidConfigValueError { .. }
            | GeoidError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            GeoidError::ToolNotFound { .. } | GeoidError::ToolFailed { .. } => {
                ErrorCategory::ExternalTool
            }
            GeoidError::IoError(_) | GeoidError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // gdalwarp can fail on a transient condition (locked output, full disk)
            GeoidError::ToolFailed { .. } => ErrorSeverity::Medium,
            GeoidError::InvalidInput { .. }
            | GeoidError::ConfigError { .. }
            | GeoidError::MissingConfigError { .. }
            | GeoidError::InvalidConfigValueError { .. }
            | GeoidError::ConfigValidationError { .. } => ErrorSeverity::High,
            GeoidError::ToolNotFound { .. }
            | GeoidError::IoError(_)
            | GeoidError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            GeoidError::InvalidInput { .. } => {
                "Check that the input raster exists and can be opened by gdalinfo".to_string()
            }
            GeoidError::ConfigError { .. } | GeoidError::ConfigValidationError { .. } => {
                "Review the configuration file syntax and values".to_string()
            }
            GeoidError::MissingConfigError { field } => {
                format!("Provide a value for '{}'", field)
            }
            GeoidError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}'", field)
            }
            GeoidError::ToolNotFound { program } => format!(
                "Install GDAL or point --gdalwarp/--gdalinfo at the binary (looked for '{}')",
                program
            ),
            GeoidError::ToolFailed { .. } => {
                "Inspect the gdalwarp output above; use --overwrite if the output file already exists"
                    .to_string()
            }
            GeoidError::IoError(_) => "Check file permissions and available disk space".to_string(),
            GeoidError::SerializationError(_) => {
                "The GDAL tools produced unexpected output; check the GDAL version".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GeoidError::InvalidInput { parameter } => {
                format!("Could not open input raster: {}", parameter)
            }
            GeoidError::ToolNotFound { program } => {
                format!("Could not run '{}'", program)
            }
            GeoidError::ToolFailed { program, .. } => {
                format!("'{}' did not complete the conversion", program)
            }
            other => other.to_string(),
        }
    }

    /// Process exit code derived from severity.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, GeoidError>;
