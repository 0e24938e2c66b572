mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use console::{Term, style};
use dialoguer::Input;
use std::path::PathBuf;
use std::process;
use tracing::debug;
use yts2nas::{ConfigManager, DownloadStation, FailureLog, Pipeline, YtsIndex, read_movie_list};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Validate CLI arguments first
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    // Initialize logging based on verbosity
    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    // Configuration problems are fatal before anything is read
    let config_manager = match ConfigManager::load(args.config.as_deref()) {
        Ok(manager) => manager,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            process::exit(1);
        }
    };
    debug!("Using configuration {:?}", config_manager.config_file());

    let mut config = config_manager.into_config();
    if let Some(failed_log) = args.failed_log {
        config.general.failed_log = failed_log;
    }
    let config = config;

    let term = Term::stdout();
    let list_path = match args.file {
        Some(path) => path,
        None => prompt_for_list()?,
    };

    let movies = match read_movie_list(&list_path) {
        Ok(movies) => movies,
        Err(e) => {
            term.write_line(&format!("{} {}", style("[ERROR]").red(), e))?;
            process::exit(1);
        }
    };

    term.write_line(&format!(
        "{} Loaded {} movies from file.",
        style("[SUCCESS]").green(),
        movies.len()
    ))?;

    let index = YtsIndex::new(&config.index)?;
    let station = DownloadStation::new(&config.nas)?;
    let pipeline = Pipeline::new(index, station, FailureLog::new(&config.general.failed_log))
        .with_delay(config.general.delay());

    pipeline.run(&movies).await?;

    Ok(())
}

fn prompt_for_list() -> Result<PathBuf> {
    let input: String = Input::new()
        .with_prompt(format!("{} Location of (.txt) file", style(">").cyan()))
        .interact_text()?;
    Ok(PathBuf::from(input.trim()))
}
