//! Folder listings of job and recipe files.

use crate::error::RecipeError;
use crate::model::RecipeWarning;
use log::{info, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

pub const JOB_EXTENSION: &str = "ajp";
pub const LOG_EXTENSION: &str = "dlg";
pub const RECIPE_EXTENSION: &str = "rcp";

/// Job name to job file path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameRegistry {
    entries: BTreeMap<String, PathBuf>,
}

impl NameRegistry {
    /// List `dir` and register every file with extension `extension` under
    /// its file stem.
    ///
    /// An empty listing is not an error; the returned warning says so.
    pub fn from_dir(
        dir: &Path,
        extension: &str,
    ) -> Result<(Self, Option<RecipeWarning>), RecipeError> {
        let entries: BTreeMap<String, PathBuf> = list_named(dir, extension)?.into_iter().collect();
        info!("Found {} job files in {}", entries.len(), dir.display());
        let warning = empty_warning(entries.is_empty(), dir, "job");
        Ok((NameRegistry { entries }, warning))
    }

    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.entries.insert(name.into(), path.into());
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }
}

impl<K: Into<String>, V: Into<PathBuf>> Extend<(K, V)> for NameRegistry {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, path) in iter {
            self.insert(name, path);
        }
    }
}

impl<K: Into<String>, V: Into<PathBuf>> FromIterator<(K, V)> for NameRegistry {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut registry = NameRegistry::default();
        registry.extend(iter);
        registry
    }
}

/// Names of the recipe files known to exist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeSet {
    names: BTreeSet<String>,
}

impl RecipeSet {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RecipeSet {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// List `dir` and collect the stem of every file with extension `extension`.
    pub fn from_dir(
        dir: &Path,
        extension: &str,
    ) -> Result<(Self, Option<RecipeWarning>), RecipeError> {
        let names: BTreeSet<String> = list_named(dir, extension)?
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        info!("Found {} recipe files in {}", names.len(), dir.display());
        let warning = empty_warning(names.is_empty(), dir, "recipe");
        Ok((RecipeSet { names }, warning))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> Extend<S> for RecipeSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}

fn empty_warning(empty: bool, dir: &Path, kind: &str) -> Option<RecipeWarning> {
    if !empty {
        return None;
    }
    let warning = RecipeWarning::EmptyRegistry {
        dir: dir.to_path_buf(),
        kind: kind.to_string(),
    };
    warn!("{}", warning);
    Some(warning)
}

/// `(stem, path)` for every visible file in `dir` with the given extension.
fn list_named(dir: &Path, extension: &str) -> Result<Vec<(String, PathBuf)>, RecipeError> {
    let listing = fs::read_dir(dir).map_err(|e| RecipeError::io(dir, e))?;

    let mut named = Vec::new();
    for entry in listing {
        let path = entry.map_err(|e| RecipeError::io(dir, e))?.path();
        if !path.is_file() || !has_extension(&path, extension) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if stem.starts_with('.') {
            continue;
        }
        named.push((stem.to_string(), path.clone()));
    }
    Ok(named)
}

pub(crate) fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}
