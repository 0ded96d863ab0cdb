use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a single parse request
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Input path is neither a job file nor a log file
    #[error("Unknown filetype: {0}")]
    UnknownFileType(String),

    /// A log file was given without any way to look up its job
    #[error("Must pass either a jobs mapping or a jobs folder to resolve a log file")]
    MissingResolutionInput,

    /// The resolved job file has no bytes to scan
    #[error("Job file is empty: {}", .0.display())]
    EmptyJobFile(PathBuf),

    /// Failed to read a job file or list a folder
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl RecipeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RecipeError::Io {
            path: path.into(),
            source,
        }
    }
}
