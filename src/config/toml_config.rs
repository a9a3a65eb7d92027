use crate::core::algorithm::{COMMAND_NAME, GEOID_GRID_EXTENSIONS};
use crate::core::{ConversionJob, ToolConfig};
use crate::utils::error::{GeoidError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_required_field,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_GDALINFO: &str = "gdalinfo";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub tools: Option<ToolsConfig>,
    pub options: Option<OptionsConfig>,
    pub defaults: Option<DefaultsConfig>,
    #[serde(rename = "job", default)]
    pub jobs: Vec<JobConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsConfig {
    pub gdalwarp: Option<String>,
    pub gdalinfo: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionsConfig {
    pub dry_run: Option<bool>,
}

/// Values applied to every job that does not set them itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub geoid_grid_file: Option<String>,
    pub overwrite: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub input: String,
    pub output: String,
    pub geoid_grid_file: Option<String>,
    pub overwrite: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GeoidError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GeoidError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GEOID_DIR})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GeoidError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Jobs with `[defaults]` applied.
    pub fn jobs(&self) -> Result<Vec<ConversionJob>> {
        let defaults = self.defaults.clone().unwrap_or_default();

        self.jobs
            .iter()
            .enumerate()
            .map(|(index, job)| -> Result<ConversionJob> {
                let geoid_grid_file = job
                    .geoid_grid_file
                    .clone()
                    .or_else(|| defaults.geoid_grid_file.clone());
                let field = format!("job[{}].geoid_grid_file", index);
                let geoid_grid_file = validate_required_field(&field, &geoid_grid_file)?.clone();

                Ok(ConversionJob {
                    input: job.input.clone(),
                    geoid_grid_file,
                    output: job.output.clone(),
                    overwrite: job.overwrite.or(defaults.overwrite).unwrap_or(false),
                })
            })
            .collect()
    }

    pub fn set_dry_run(&mut self, dry_run: bool) {
        self.options.get_or_insert_with(OptionsConfig::default).dry_run = Some(dry_run);
    }

    pub fn validate_config(&self) -> Result<()> {
        if self.jobs.is_empty() {
            return Err(GeoidError::ConfigValidationError {
                field: "job".to_string(),
                message: "at least one [[job]] entry is required".to_string(),
            });
        }

        validate_non_empty_string("tools.gdalwarp", self.gdalwarp())?;
        validate_non_empty_string("tools.gdalinfo", self.gdalinfo())?;

        for (index, job) in self.jobs()?.iter().enumerate() {
            validate_path(&format!("job[{}].input", index), &job.input)?;
            validate_path(&format!("job[{}].output", index), &job.output)?;
            let geoid_field = format!("job[{}].geoid_grid_file", index);
            validate_path(&geoid_field, &job.geoid_grid_file)?;
            validate_file_extension(&geoid_field, &job.geoid_grid_file, &GEOID_GRID_EXTENSIONS)?;
        }

        Ok(())
    }
}

impl ToolConfig for TomlConfig {
    fn gdalwarp(&self) -> &str {
        self.tools
            .as_ref()
            .and_then(|t| t.gdalwarp.as_deref())
            .unwrap_or(COMMAND_NAME)
    }

    fn gdalinfo(&self) -> &str {
        self.tools
            .as_ref()
            .and_then(|t| t.gdalinfo.as_deref())
            .unwrap_or(DEFAULT_GDALINFO)
    }

    fn dry_run(&self) -> bool {
        self.options
            .as_ref()
            .and_then(|o| o.dry_run)
            .unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
