pub mod builder;
pub mod config;
pub mod crossref;
pub mod error;
pub mod model;
pub mod registry;
pub mod resolver;
pub mod scanner;

use std::path::{Path, PathBuf};

pub use builder::{InputKind, RecipeParser, RecipeParserBuilder};
pub use crate::config::Settings;
pub use crossref::{annotate, CrossReference};
pub use error::RecipeError;
pub use model::{ParseResult, RecipeStatus, RecipeWarning, Token, TokenKind};
pub use registry::{NameRegistry, RecipeSet};
pub use resolver::{job_name_from_log, JobLocator};
pub use scanner::{recipe_steps, scan, Scan};

/// Parse a job file with default settings.
///
/// Recipe steps are not checked against any recipe set.
pub fn get_recipe(path: impl AsRef<Path>) -> Result<ParseResult, RecipeError> {
    RecipeParser::builder().parse(path)
}

/// Parse a job file or log file with settings loaded from `aja-recipe.toml`
/// and `AJA_RECIPE__*` environment variables.
pub fn get_recipe_with_settings(path: impl AsRef<Path>) -> Result<ParseResult, RecipeError> {
    let settings = Settings::load()?;
    RecipeParser::builder().settings(&settings).parse(path)
}

/// Name of the job a log file belongs to and the job file it maps to.
///
/// The job file is `None` (with a warning logged) when `jobs` knows no job of
/// that name.
pub fn get_job(log_path: impl AsRef<Path>, jobs: &dyn JobLocator) -> (String, Option<PathBuf>) {
    let (job_name, job_path, _) =
        resolver::resolve_job(log_path.as_ref(), jobs, registry::LOG_EXTENSION);
    (job_name, job_path)
}

/// Every `.ajp` job file in `dir`, keyed by job name.
pub fn build_jobs_dict(dir: impl AsRef<Path>) -> Result<NameRegistry, RecipeError> {
    let (jobs, _) = NameRegistry::from_dir(dir.as_ref(), registry::JOB_EXTENSION)?;
    Ok(jobs)
}

/// Names of every `.rcp` recipe file in `dir`.
pub fn build_recipe_list(dir: impl AsRef<Path>) -> Result<RecipeSet, RecipeError> {
    let (recipes, _) = RecipeSet::from_dir(dir.as_ref(), registry::RECIPE_EXTENSION)?;
    Ok(recipes)
}
