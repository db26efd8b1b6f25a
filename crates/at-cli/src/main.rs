use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use at_cli::commands::{employees, events, export, init, prune, report, scan, status, watch};
use at_cli::{Cli, Commands, Config, EmployeesAction};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(at_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = at_db::Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let mut stdout = std::io::stdout().lock();
    match &cli.command {
        Some(Commands::Init) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            init::run(&db, &config)?;
        }
        Some(Commands::Watch) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            watch::run(db, &config)?;
        }
        Some(Commands::Scan) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            scan::run(&db)?;
        }
        Some(Commands::Status { json }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            status::run(&mut stdout, db, &config, *json)?;
        }
        Some(Commands::Events { date, limit }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            events::run(&mut stdout, &db, *date, *limit)?;
        }
        Some(Commands::Report { date, json }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            report::run(&mut stdout, &db, date, *json)?;
        }
        Some(Commands::Export { date, output }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            export::run(&db, date, output.as_deref())?;
        }
        Some(Commands::Employees { action }) => {
            let (mut db, config) = open_database(cli.config.as_deref())?;
            match action {
                EmployeesAction::Add { name, mac, picture } => {
                    employees::add(&mut db, name, mac, picture.as_deref())?;
                }
                EmployeesAction::List { search } => {
                    employees::list(&db, search.as_deref())?;
                }
                EmployeesAction::Remove { id } => {
                    employees::remove(&mut db, *id)?;
                }
                EmployeesAction::Sync { file } => {
                    let path = file
                        .as_deref()
                        .or(config.roster_path.as_deref())
                        .context("no roster file given and no roster_path configured")?;
                    employees::sync(&mut db, path)?;
                }
            }
        }
        Some(Commands::Prune { keep_days }) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            prune::run(&mut db, *keep_days)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
