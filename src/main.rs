use std::path::PathBuf;

use clap::Parser;
use log::{debug, error};

use aja_recipe::{ParseResult, RecipeParser, RecipeStatus, Settings};

#[derive(Parser, Debug)]
#[command(
    name = "aja-recipe",
    version,
    about = "List the recipe steps an AJA job file runs"
)]
struct Cli {
    /// Job file (.ajp) or log file (.dlg) to inspect
    file: PathBuf,

    /// Folder of job files used to resolve a log file
    #[arg(long, value_name = "DIR")]
    jobs_dir: Option<PathBuf>,

    /// Map a job name to its file, e.g. --job Nb_Dep=/data/Nb_Dep.ajp
    #[arg(long = "job", value_name = "NAME=PATH", value_parser = parse_job)]
    jobs: Vec<(String, PathBuf)>,

    /// Folder of recipe files to check the steps against
    #[arg(long, value_name = "DIR")]
    recipes_dir: Option<PathBuf>,

    /// Recipe name to treat as existing (repeatable)
    #[arg(long = "recipe", value_name = "NAME")]
    recipes: Vec<String>,

    /// Print the whole result as JSON
    #[arg(long, conflicts_with = "raw")]
    json: bool,

    /// Print every token of the job file with its offset
    #[arg(long)]
    raw: bool,
}

fn parse_job(value: &str) -> Result<(String, PathBuf), String> {
    let (name, path) = value
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PATH, got {value:?}"))?;
    Ok((name.to_string(), PathBuf::from(path)))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{}", e);
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    debug!("{:#?}", settings);

    let mut builder = RecipeParser::builder()
        .settings(&settings)
        .jobs(cli.jobs)
        .recipes(cli.recipes);
    if let Some(dir) = cli.jobs_dir {
        builder = builder.job_folder(dir);
    }
    if let Some(dir) = cli.recipes_dir {
        builder = builder.recipe_folder(dir);
    }

    let result = builder.parse(&cli.file)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if cli.raw {
        print_raw(&result);
    } else {
        for step in &result.recipe {
            println!("{}", step);
        }
    }

    Ok(())
}

fn print_raw(result: &ParseResult) {
    println!("# {}", result.info);
    for token in &result.raw_recipe {
        let offset = token
            .offset
            .map(|o| o.to_string())
            .unwrap_or_else(|| "-".to_string());
        let exists = match token.status {
            RecipeStatus::Found => "yes",
            RecipeStatus::Missing => "no",
            RecipeStatus::NotApplicable => "-",
        };
        let kind = format!("{:?}", token.kind);
        println!("{:>8}  {:<16}  {:<4}  {:?}", offset, kind, exists, token.text());
    }
}
