use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::path::PathBuf;
use thiserror::Error;

/// Description of the `raw_recipe` entries carried by every [`ParseResult`].
pub const RAW_RECIPE_INFO: &str = "raw_recipe format is: (string index, string, recipe exists?)";

/// What region of the job file a token covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// The fixed-length opaque lead-in of the job file.
    Header,
    /// A possible recipe step name.
    RecipeCandidate,
    /// The separator following a recipe step name.
    Delimiter,
    /// Bytes left over after a stream ended without a final recipe step.
    Residue,
    /// Placeholder emitted when no job file could be resolved.
    Missing,
}

/// Whether a token names a recipe that exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeStatus {
    Found,
    Missing,
    /// Not a recipe candidate, or no recipe set to check against.
    #[default]
    NotApplicable,
}

impl RecipeStatus {
    pub fn from_found(found: bool) -> Self {
        if found {
            RecipeStatus::Found
        } else {
            RecipeStatus::Missing
        }
    }

    /// `Some(found)` for checked candidates, `None` otherwise.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            RecipeStatus::Found => Some(true),
            RecipeStatus::Missing => Some(false),
            RecipeStatus::NotApplicable => None,
        }
    }
}

/// One contiguous region of a job file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Absolute byte offset, `None` only for the missing-file placeholder.
    pub offset: Option<usize>,
    #[serde(serialize_with = "serialize_lossy")]
    pub content: Vec<u8>,
    pub kind: TokenKind,
    pub status: RecipeStatus,
}

impl Token {
    pub(crate) fn new(offset: usize, content: &[u8], kind: TokenKind) -> Self {
        Token {
            offset: Some(offset),
            content: content.to_vec(),
            kind,
            status: RecipeStatus::NotApplicable,
        }
    }

    /// Placeholder standing in for a job file that could not be found.
    pub fn missing() -> Self {
        Token {
            offset: None,
            content: Vec::new(),
            kind: TokenKind::Missing,
            status: RecipeStatus::NotApplicable,
        }
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }

    /// True for recipe candidates that are real names rather than stray
    /// delimiter bytes.
    pub fn is_recipe_step(&self) -> bool {
        self.kind == TokenKind::RecipeCandidate
            && self.content.first().is_some_and(|b| *b != 0)
    }
}

fn serialize_lossy<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(bytes))
}

/// Non-fatal conditions reported alongside a best-effort result.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum RecipeWarning {
    #[error("No {kind} files found in directory {}", dir.display())]
    EmptyRegistry { dir: PathBuf, kind: String },

    #[error("Job file not found for: {job_name:?}")]
    UnresolvedJob { job_name: String },

    #[error("Job file may be corrupt, missing final recipe step: {job_name} (stream ended at byte {offset})")]
    StreamCorruption { job_name: String, offset: usize },

    #[error("Not all recipes were located: {}", missing.join(", "))]
    IncompleteRecipeSet { missing: Vec<String> },
}

/// Everything learned about one job file.
#[derive(Debug, Clone, Serialize)]
pub struct ParseResult {
    pub job_name: String,
    pub job_path: Option<PathBuf>,
    /// Recipe steps in the order the job invokes them.
    pub recipe: Vec<String>,
    /// Every token of the job file, including header and delimiters.
    pub raw_recipe: Vec<Token>,
    #[serde(serialize_with = "serialize_lossy")]
    pub raw_job: Vec<u8>,
    pub info: &'static str,
    pub all_known: bool,
    pub warnings: Vec<RecipeWarning>,
}

impl ParseResult {
    /// Result for a job whose file could not be resolved.
    pub fn unresolved(job_name: String, warnings: Vec<RecipeWarning>) -> Self {
        ParseResult {
            job_name,
            job_path: None,
            recipe: Vec::new(),
            raw_recipe: vec![Token::missing()],
            raw_job: Vec::new(),
            info: RAW_RECIPE_INFO,
            all_known: true,
            warnings,
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
