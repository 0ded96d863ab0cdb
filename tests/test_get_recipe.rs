use aja_recipe::{
    build_jobs_dict, build_recipe_list, get_job, get_recipe, RecipeError, RecipeParser,
    RecipeStatus, RecipeWarning, TokenKind,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HEADER: &[u8] = b"\x00\x00\x00\x02\x00\x00\x00\x03";
const DELIM: &[u8] = b"\x00\x00\x00\x00";

fn job_bytes(steps: &[&str]) -> Vec<u8> {
    let mut raw = HEADER.to_vec();
    for (i, step) in steps.iter().enumerate() {
        if i > 0 {
            raw.extend_from_slice(DELIM);
        }
        raw.extend_from_slice(step.as_bytes());
    }
    raw
}

/// Lab layout with `jobs/`, `recipes/` and `logs/` folders
fn lab() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for sub in ["jobs", "recipes", "logs"] {
        fs::create_dir(dir.path().join(sub)).unwrap();
    }
    dir
}

fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_job_file_end_to_end() {
    let lab = lab();
    let job = write(&lab.path().join("jobs"), "Nb_Dep.ajp", &job_bytes(&["stepA", "stepB"]));

    let result = RecipeParser::builder()
        .recipes(["stepA"])
        .parse(&job)
        .unwrap();

    assert_eq!(result.job_name, "Nb_Dep");
    assert_eq!(result.recipe, vec!["stepA", "stepB"]);
    assert!(!result.all_known);
    assert_eq!(
        result.warnings,
        vec![RecipeWarning::IncompleteRecipeSet {
            missing: vec!["stepB".to_string()]
        }]
    );

    let flags: Vec<RecipeStatus> = result
        .raw_recipe
        .iter()
        .filter(|t| t.kind == TokenKind::RecipeCandidate)
        .map(|t| t.status)
        .collect();
    assert_eq!(flags, vec![RecipeStatus::Found, RecipeStatus::Missing]);
    assert_eq!(result.raw_job, job_bytes(&["stepA", "stepB"]));
}

#[test]
fn test_recipe_folder_cross_reference() {
    let lab = lab();
    let recipes = lab.path().join("recipes");
    write(&recipes, "Pump_Down.rcp", b"");
    write(&recipes, "Presputter.rcp", b"");
    write(&recipes, "Deposit.rcp", b"");
    let job = write(
        &lab.path().join("jobs"),
        "Film.ajp",
        &job_bytes(&["Pump_Down", "Presputter", "Deposit"]),
    );

    let result = RecipeParser::builder()
        .recipe_folder(&recipes)
        .parse(&job)
        .unwrap();

    assert!(result.all_known);
    assert!(!result.has_warnings());
    assert_eq!(result.recipe, vec!["Pump_Down", "Presputter", "Deposit"]);
}

#[test]
fn test_without_recipes_nothing_is_judged() {
    let lab = lab();
    let job = write(&lab.path().join("jobs"), "Film.ajp", &job_bytes(&["Mystery", "Step"]));

    let result = get_recipe(&job).unwrap();

    assert!(result.all_known);
    assert!(result.warnings.is_empty());
    assert!(result
        .raw_recipe
        .iter()
        .all(|t| t.status == RecipeStatus::NotApplicable));
}

#[test]
fn test_truncated_job_is_reported_corrupt() {
    let lab = lab();
    let mut raw = job_bytes(&["Clean", "Deposit"]);
    raw.extend_from_slice(DELIM);
    let job = write(&lab.path().join("jobs"), "Cut.ajp", &raw);

    let result = get_recipe(&job).unwrap();

    assert_eq!(result.recipe, vec!["Clean", "Deposit"]);
    assert_eq!(
        result.warnings,
        vec![RecipeWarning::StreamCorruption {
            job_name: "Cut".to_string(),
            offset: raw.len()
        }]
    );
}

#[test]
fn test_log_file_resolves_through_job_folder() {
    let lab = lab();
    let jobs = lab.path().join("jobs");
    write(&jobs, "Nb_Dep.ajp", &job_bytes(&["Pump", "Sputter"]));
    let log = write(&lab.path().join("logs"), "Nb_Dep_0042_20240105.dlg", b"log text");

    let result = RecipeParser::builder()
        .job_folder(&jobs)
        .parse(&log)
        .unwrap();

    assert_eq!(result.job_name, "Nb_Dep");
    assert_eq!(result.job_path, Some(jobs.join("Nb_Dep.ajp")));
    assert_eq!(result.recipe, vec!["Pump", "Sputter"]);
}

#[test]
fn test_explicit_jobs_override_job_folder() {
    let lab = lab();
    let jobs = lab.path().join("jobs");
    write(&jobs, "Nb_Dep.ajp", &job_bytes(&["Old", "Steps"]));
    let newer = write(lab.path(), "Nb_Dep_v2.ajp", &job_bytes(&["New", "Steps"]));

    let result = RecipeParser::builder()
        .job_folder(&jobs)
        .jobs([("Nb_Dep", newer.clone())])
        .parse("Nb_Dep_0001_0002.dlg")
        .unwrap();

    assert_eq!(result.job_path, Some(newer));
    assert_eq!(result.recipe, vec!["New", "Steps"]);
}

#[test]
fn test_unresolved_log_degrades_to_placeholder() {
    let lab = lab();
    let jobs = lab.path().join("jobs");

    let result = RecipeParser::builder()
        .job_folder(&jobs)
        .parse("Ghost_0001_0002.dlg")
        .unwrap();

    assert_eq!(result.job_name, "Ghost");
    assert!(result.recipe.is_empty());
    assert_eq!(result.raw_recipe.len(), 1);
    assert_eq!(result.raw_recipe[0].kind, TokenKind::Missing);
    assert_eq!(result.raw_recipe[0].offset, None);
    assert!(result.raw_recipe[0].content.is_empty());
    assert!(result.raw_job.is_empty());
    assert_eq!(
        result.warnings,
        vec![
            RecipeWarning::EmptyRegistry {
                dir: jobs,
                kind: "job".to_string()
            },
            RecipeWarning::UnresolvedJob {
                job_name: "Ghost".to_string()
            },
        ]
    );
}

#[test]
fn test_log_without_resolution_input_fails() {
    let result = get_recipe("Nb_Dep_0001_0002.dlg");

    assert!(matches!(result, Err(RecipeError::MissingResolutionInput)));
}

#[test]
fn test_unknown_extension_fails() {
    let result = get_recipe("notes.xyz");

    match result {
        Err(RecipeError::UnknownFileType(ext)) => assert_eq!(ext, "xyz"),
        other => panic!("Expected UnknownFileType, got {:?}", other),
    }
}

#[test]
fn test_empty_job_file_fails() {
    let lab = lab();
    let job = write(&lab.path().join("jobs"), "Empty.ajp", b"");

    let result = get_recipe(&job);

    assert!(matches!(result, Err(RecipeError::EmptyJobFile(path)) if path == job));
}

#[test]
fn test_missing_job_file_is_io_error() {
    let lab = lab();

    let result = get_recipe(lab.path().join("jobs").join("Gone.ajp"));

    assert!(matches!(result, Err(RecipeError::Io { .. })));
}

#[test]
fn test_folder_helpers() {
    let lab = lab();
    write(&lab.path().join("jobs"), "A.ajp", b"");
    write(&lab.path().join("jobs"), "B.ajp", b"");
    write(&lab.path().join("recipes"), "Vent.rcp", b"");

    let jobs = build_jobs_dict(lab.path().join("jobs")).unwrap();
    let recipes = build_recipe_list(lab.path().join("recipes")).unwrap();

    assert_eq!(jobs.len(), 2);
    assert_eq!(recipes.iter().collect::<Vec<_>>(), vec!["Vent"]);

    let (name, path) = get_job("B_1_2.dlg", &jobs);
    assert_eq!(name, "B");
    assert_eq!(path, Some(lab.path().join("jobs").join("B.ajp")));
}

#[test]
fn test_result_serializes_to_json() {
    let lab = lab();
    let job = write(&lab.path().join("jobs"), "J.ajp", &job_bytes(&["Pump", "Vent"]));

    let result = RecipeParser::builder().recipes(["Pump"]).parse(&job).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["job_name"], "J");
    assert_eq!(json["recipe"], serde_json::json!(["Pump", "Vent"]));
    assert_eq!(json["raw_recipe"][1]["status"], "found");
    assert_eq!(json["warnings"][0]["warning"], "incomplete_recipe_set");
}
