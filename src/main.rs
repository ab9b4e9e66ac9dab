mod analysis;
mod auth;
mod cli;
mod cli_help;
mod config;
mod db;
mod error;
mod fetch;
mod gamify;
mod lint;
mod projects;
mod report;
mod report_helpers;
mod score;
mod walk;

use std::io;

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands, Credentials};
use config::Config;
use db::Store;
use error::Result;

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "debtquest=debug"
    } else {
        "debtquest=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn open_store(cli: &Cli) -> Result<(Config, Store)> {
    let config = Config::load(cli.config.as_deref())?.with_database(cli.db.clone());
    let store = Store::open(&config.database)?;
    gamify::catalog::seed_badges(store.conn())?;
    Ok((config, store))
}

fn login(store: &Store, credentials: &Credentials) -> Result<db::models::User> {
    auth::authenticate(store.conn(), &credentials.username, &credentials.password)
}

fn dispatch(cli: Cli) -> Result<()> {
    if let Commands::Completions { shell } = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "dq", &mut io::stdout());
        return Ok(());
    }

    let (config, mut store) = open_store(&cli)?;
    match cli.command {
        Commands::Analyze { url, json } => analysis::run(&mut store, &config, &url, json),
        Commands::Projects { json } => projects::run_list(&store, json),
        Commands::Project { id, json } => projects::run_detail(&store, id, json),
        Commands::Report { id, json, markdown } => report::run(&store, id, json, markdown),
        Commands::Register {
            username,
            password,
            json,
        } => auth::run_register(&store, &username, &password, json),
        Commands::Resolve {
            issue_id,
            credentials,
            json,
        } => {
            let user = login(&store, &credentials)?;
            gamify::run_resolve(&mut store, issue_id, &user, json)
        }
        Commands::Leaderboard { json } => gamify::run_leaderboard(&store, json),
        Commands::Badges { credentials, json } => {
            let user = login(&store, &credentials)?;
            gamify::run_badges(&store, &user, json)
        }
        Commands::Completions { .. } => Ok(()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = dispatch(cli) {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}
