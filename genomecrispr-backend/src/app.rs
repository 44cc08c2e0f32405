use std::process::ExitCode;

use anyhow::Context;
use camino::Utf8PathBuf;
use serde::Serialize;

use crate::{
    config::{Cli, Command, Config, read_criteria},
    db::{
        Database,
        criteria::{compile_select, parse_criteria},
        error::{ErrorClass, Result},
        field_schema::FieldSchema,
    },
    util::DevContainer,
};

/// # Errors
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let Cli {
        mut config,
        log_dir,
        command,
    } = cli;

    initialize_logging(log_dir);

    config
        .read_secrets()
        .context("failed to read secrets directory")?;

    let outcome = match command {
        Command::Compile { table, criteria } => {
            let schema = FieldSchema::genomecrispr();
            let compiled = parse_criteria(&read_criteria(&criteria)?)
                .and_then(|criterion| compile_select(&table, &criterion, &schema));

            to_json(compiled)?
        }
        Command::Genes { criteria } => match parse_criteria(&read_criteria(&criteria)?) {
            Ok(criterion) => {
                let app_state = AppState::new(config).await?;
                to_json(app_state.db().search_genes(&criterion).await)?
            }
            Err(err) => Err(err),
        },
        Command::Search(args) => {
            let app_state = AppState::new(config).await?;
            to_json(app_state.db().resolve(&args.into()).await)?
        }
        Command::Phenotypes { sg_ids } => {
            let app_state = AppState::new(config).await?;
            to_json(app_state.db().phenotypes_for(&sg_ids).await)?
        }
        Command::Effects { sg_id } => {
            let app_state = AppState::new(config).await?;
            to_json(app_state.db().effects_for_sg(sg_id).await)?
        }
    };

    Ok(report(outcome))
}

fn to_json<T: Serialize>(result: Result<T>) -> anyhow::Result<Result<serde_json::Value>> {
    match result {
        Ok(value) => {
            let value = serde_json::to_value(value).context("failed to serialize result")?;
            Ok(Ok(value))
        }
        Err(err) => Ok(Err(err)),
    }
}

fn report(outcome: Result<serde_json::Value>) -> ExitCode {
    match outcome {
        Ok(value) => {
            println!("{value:#}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let class = err.class();
            eprintln!("{:#}", serde_json::json!({ "class": class, "error": err }));

            match class {
                ErrorClass::Client => ExitCode::from(2),
                ErrorClass::NotFound => ExitCode::from(3),
                ErrorClass::Server => ExitCode::from(4),
            }
        }
    }
}

fn initialize_logging(log_dir: Option<Utf8PathBuf>) {
    use tracing::Level;
    use tracing_subscriber::{filter::Targets, prelude::*};

    let log_layer = tracing_subscriber::fmt::layer();

    match log_dir {
        None => {
            let dev_log_filter = Targets::new()
                .with_target("genomecrispr_backend", Level::DEBUG)
                .with_target("testcontainers", Level::INFO);
            let log_layer = log_layer
                .pretty()
                .with_writer(std::io::stderr)
                .with_filter(dev_log_filter);

            if tracing_subscriber::registry().with(log_layer).try_init().is_err() {
                tracing::debug!("global subscriber already set");
            }
        }
        Some(path) => {
            let log_writer = tracing_appender::rolling::daily(path, "genomecrispr.log");
            let prod_log_filter = Targets::new().with_target("genomecrispr_backend", Level::INFO);
            let log_layer = log_layer
                .json()
                .with_writer(log_writer)
                .with_filter(prod_log_filter);

            if tracing_subscriber::registry().with(log_layer).try_init().is_err() {
                tracing::debug!("global subscriber already set");
            }
        }
    }
}

enum AppState {
    Dev {
        db: Database,
        _pg_container: DevContainer,
    },
    Prod {
        db: Database,
    },
}

impl AppState {
    async fn new(config: Config) -> anyhow::Result<Self> {
        let state = Self::connect(config)
            .await
            .context("failed to initialize app state")?;
        tracing::info!("initialized app state");

        Ok(state)
    }

    async fn connect(config: Config) -> anyhow::Result<Self> {
        let state = if config.is_dev() {
            let pg_container = DevContainer::start("dev", true)
                .await
                .context("failed to start postgres container instance")?;

            let db = pg_container
                .bootstrap(
                    config.seed_data()?,
                    config.max_connections(),
                    config.query_timeout(),
                )
                .await?;

            Self::Dev {
                db,
                _pg_container: pg_container,
            }
        } else {
            let db = Database::new(
                &config.db_url(),
                config.max_connections(),
                config.query_timeout(),
            )?;

            Self::Prod { db }
        };

        Ok(state)
    }

    fn db(&self) -> &Database {
        match self {
            Self::Dev { db, .. } | Self::Prod { db } => db,
        }
    }
}
