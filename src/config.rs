use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::registry::{JOB_EXTENSION, LOG_EXTENSION, RECIPE_EXTENSION};

/// Where to find jobs and recipes, and how their files are named
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Folder of job files used to resolve log files
    #[serde(default)]
    pub job_folder: Option<PathBuf>,
    /// Folder of recipe files used to check recipe steps
    #[serde(default)]
    pub recipe_folder: Option<PathBuf>,
    /// Recipe names treated as existing in addition to the recipe folder
    #[serde(default)]
    pub recipes: Vec<String>,
    /// Extension of job files
    #[serde(default = "default_job_extension")]
    pub job_extension: String,
    /// Extension of log files
    #[serde(default = "default_log_extension")]
    pub log_extension: String,
    /// Extension of recipe files
    #[serde(default = "default_recipe_extension")]
    pub recipe_extension: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            job_folder: None,
            recipe_folder: None,
            recipes: Vec::new(),
            job_extension: default_job_extension(),
            log_extension: default_log_extension(),
            recipe_extension: default_recipe_extension(),
        }
    }
}

fn default_job_extension() -> String {
    JOB_EXTENSION.to_string()
}

fn default_log_extension() -> String {
    LOG_EXTENSION.to_string()
}

fn default_recipe_extension() -> String {
    RECIPE_EXTENSION.to_string()
}

impl Settings {
    /// Load settings from file and environment variables
    ///
    /// Settings are loaded with the following priority (highest to lowest):
    /// 1. Environment variables with AJA_RECIPE__ prefix
    /// 2. aja-recipe.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: AJA_RECIPE__RECIPE_FOLDER
    pub fn load() -> Result<Self, ConfigError> {
        load_settings()
    }
}

/// Load settings from file and environment variables
///
/// See [`Settings::load`] for the source priority.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("aja-recipe").required(false))
        .add_source(
            Environment::with_prefix("AJA_RECIPE")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("recipes")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
