use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::config::Settings;
use crate::crossref::annotate;
use crate::model::{ParseResult, RecipeWarning, RAW_RECIPE_INFO};
use crate::registry::{has_extension, NameRegistry, RecipeSet};
use crate::resolver::resolve_job;
use crate::scanner::{recipe_steps, scan};
use crate::RecipeError;

/// What kind of file a parse request points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A job file, parsed directly
    Job,
    /// A log file, parsed through the job it names
    Log,
}

/// Builder for configuring and executing a job file parse
#[derive(Debug, Clone)]
pub struct RecipeParserBuilder {
    jobs: NameRegistry,
    job_folder: Option<PathBuf>,
    recipes: Vec<String>,
    recipe_folder: Option<PathBuf>,
    job_extension: String,
    log_extension: String,
    recipe_extension: String,
}

impl Default for RecipeParserBuilder {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl RecipeParserBuilder {
    fn from_settings(settings: &Settings) -> Self {
        RecipeParserBuilder {
            jobs: NameRegistry::default(),
            job_folder: settings.job_folder.clone(),
            recipes: settings.recipes.clone(),
            recipe_folder: settings.recipe_folder.clone(),
            job_extension: settings.job_extension.clone(),
            log_extension: settings.log_extension.clone(),
            recipe_extension: settings.recipe_extension.clone(),
        }
    }

    /// Take folders, extra recipes and extensions from loaded settings
    ///
    /// Replaces anything set before; jobs added with [`jobs`](Self::jobs) are kept.
    pub fn settings(self, settings: &Settings) -> Self {
        RecipeParserBuilder {
            jobs: self.jobs,
            ..Self::from_settings(settings)
        }
    }

    /// Add job name to job file mappings
    ///
    /// These win over files of the same name found in the job folder.
    ///
    /// # Example
    /// ```
    /// use aja_recipe::RecipeParser;
    ///
    /// let builder = RecipeParser::builder()
    ///     .jobs([("Nb_Dep", "/data/jobs/Nb_Dep.ajp")]);
    /// ```
    pub fn jobs<I, K, V>(mut self, jobs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<PathBuf>,
    {
        self.jobs.extend(jobs);
        self
    }

    /// Set the folder of job files used to resolve log files
    pub fn job_folder(mut self, dir: impl Into<PathBuf>) -> Self {
        self.job_folder = Some(dir.into());
        self
    }

    /// Add recipe names that count as existing
    ///
    /// # Example
    /// ```
    /// use aja_recipe::RecipeParser;
    ///
    /// let builder = RecipeParser::builder()
    ///     .recipes(["Pump_Down", "Presputter"]);
    /// ```
    pub fn recipes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recipes.extend(names.into_iter().map(Into::into));
        self
    }

    /// Set the folder of recipe files used to check recipe steps
    pub fn recipe_folder(mut self, dir: impl Into<PathBuf>) -> Self {
        self.recipe_folder = Some(dir.into());
        self
    }

    /// Classify a path by its extension
    pub fn classify(&self, path: &Path) -> Result<InputKind, RecipeError> {
        if has_extension(path, &self.log_extension) {
            Ok(InputKind::Log)
        } else if has_extension(path, &self.job_extension) {
            Ok(InputKind::Job)
        } else {
            let extension = path
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default();
            Err(RecipeError::UnknownFileType(extension))
        }
    }

    /// Parse a job file, or the job a log file was produced by
    ///
    /// # Errors
    /// Returns `RecipeError` if:
    /// - The path is neither a job file nor a log file
    /// - A log file is given without jobs or a job folder
    /// - A folder or the job file cannot be read
    /// - The job file is empty
    ///
    /// Everything else (missing job, corrupt stream, unknown recipes) is
    /// reported in [`ParseResult::warnings`].
    ///
    /// # Example
    /// ```no_run
    /// use aja_recipe::RecipeParser;
    ///
    /// let result = RecipeParser::builder()
    ///     .recipe_folder("/data/recipes")
    ///     .parse("/data/jobs/Nb_Dep.ajp")?;
    /// println!("{:?}", result.recipe);
    /// # Ok::<(), aja_recipe::RecipeError>(())
    /// ```
    pub fn parse(self, path: impl AsRef<Path>) -> Result<ParseResult, RecipeError> {
        let path = path.as_ref();
        let kind = self.classify(path)?;
        let mut warnings = Vec::new();

        let (job_name, job_path) = match kind {
            InputKind::Log => {
                if self.jobs.is_empty() && self.job_folder.is_none() {
                    return Err(RecipeError::MissingResolutionInput);
                }
                let jobs = self.job_registry(&mut warnings)?;
                let (job_name, job_path, warning) =
                    resolve_job(path, &jobs, &self.log_extension);
                warnings.extend(warning);
                (job_name, job_path)
            }
            InputKind::Job => {
                let job_name = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                (job_name, Some(path.to_path_buf()))
            }
        };

        let Some(job_path) = job_path else {
            return Ok(ParseResult::unresolved(job_name, warnings));
        };

        let recipes = self.recipe_set(&mut warnings)?;

        let raw_job = fs::read(&job_path).map_err(|e| RecipeError::io(&job_path, e))?;
        if raw_job.is_empty() {
            return Err(RecipeError::EmptyJobFile(job_path));
        }
        debug!("Read {} bytes from {}", raw_job.len(), job_path.display());

        let mut scanned = scan(&raw_job);
        if let Some(offset) = scanned.corrupt_at {
            let warning = RecipeWarning::StreamCorruption {
                job_name: job_name.clone(),
                offset,
            };
            warn!("{}", warning);
            warnings.push(warning);
        }

        let check = annotate(&mut scanned.tokens, &recipes);
        if !check.all_known {
            let warning = RecipeWarning::IncompleteRecipeSet {
                missing: check.missing,
            };
            warn!("{}", warning);
            warnings.push(warning);
        }

        Ok(ParseResult {
            job_name,
            job_path: Some(job_path),
            recipe: recipe_steps(&scanned.tokens),
            raw_recipe: scanned.tokens,
            raw_job,
            info: RAW_RECIPE_INFO,
            all_known: check.all_known,
            warnings,
        })
    }

    /// Jobs from the job folder, overridden by explicitly added jobs
    fn job_registry(&self, warnings: &mut Vec<RecipeWarning>) -> Result<NameRegistry, RecipeError> {
        let mut jobs = match &self.job_folder {
            Some(dir) => {
                let (listed, warning) = NameRegistry::from_dir(dir, &self.job_extension)?;
                warnings.extend(warning);
                listed
            }
            None => NameRegistry::default(),
        };
        jobs.extend(self.jobs.iter());
        Ok(jobs)
    }

    fn recipe_set(&self, warnings: &mut Vec<RecipeWarning>) -> Result<RecipeSet, RecipeError> {
        let mut recipes = match &self.recipe_folder {
            Some(dir) => {
                let (listed, warning) = RecipeSet::from_dir(dir, &self.recipe_extension)?;
                warnings.extend(warning);
                listed
            }
            None => RecipeSet::default(),
        };
        recipes.extend(self.recipes.iter().cloned());
        Ok(recipes)
    }
}

/// Main entry point for the builder API
pub struct RecipeParser;

impl RecipeParser {
    /// Creates a new builder for parsing job files
    ///
    /// # Example
    /// ```
    /// use aja_recipe::RecipeParser;
    ///
    /// let builder = RecipeParser::builder();
    /// ```
    pub fn builder() -> RecipeParserBuilder {
        RecipeParserBuilder::default()
    }
}
