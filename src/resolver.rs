//! Maps a log file back to the job that produced it.

use crate::model::RecipeWarning;
use crate::registry::NameRegistry;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Anything that can find the file of a job by its name.
pub trait JobLocator {
    fn locate(&self, job_name: &str) -> Option<PathBuf>;
}

impl JobLocator for NameRegistry {
    fn locate(&self, job_name: &str) -> Option<PathBuf> {
        self.get(job_name).map(Path::to_path_buf)
    }
}

impl<F> JobLocator for F
where
    F: Fn(&str) -> Option<PathBuf>,
{
    fn locate(&self, job_name: &str) -> Option<PathBuf> {
        self(job_name)
    }
}

/// Job name encoded in a log file name.
///
/// Log files are named `<job name>_<a>_<b>.<log_extension>`: the log
/// extension is removed, the name is split on `_` and the last two pieces are
/// dropped. The meaning of those two pieces is not documented anywhere; the
/// rule is kept as-is so existing log folders keep resolving. Names with fewer
/// than three pieces give an empty job name.
pub fn job_name_from_log(log_path: &Path, log_extension: &str) -> String {
    let file_name = log_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = file_name
        .strip_suffix(log_extension)
        .and_then(|s| s.strip_suffix('.'))
        .unwrap_or(&file_name);

    let pieces: Vec<&str> = stem.split('_').collect();
    let keep = pieces.len().saturating_sub(2);
    pieces[..keep].join("_")
}

/// Job name of a log file and the job file it maps to, if any.
pub fn resolve_job(
    log_path: &Path,
    jobs: &dyn JobLocator,
    log_extension: &str,
) -> (String, Option<PathBuf>, Option<RecipeWarning>) {
    let job_name = job_name_from_log(log_path, log_extension);
    match jobs.locate(&job_name) {
        Some(path) => {
            debug!("Resolved {} to job {}", log_path.display(), path.display());
            (job_name, Some(path), None)
        }
        None => {
            let warning = RecipeWarning::UnresolvedJob {
                job_name: job_name.clone(),
            };
            warn!("{}", warning);
            (job_name, None, Some(warning))
        }
    }
}
