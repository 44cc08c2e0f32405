use std::fs;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use genomecrispr_core::model::{
    SortOrder,
    search::{ScreenFilter, SearchQuery, SgFilter},
};

use crate::db::seed_data::SeedData;

#[derive(Args, serde::Deserialize, Clone)]
pub struct Config {
    /// Run against a throwaway Postgres container loaded with seed data
    #[arg(long, default_value_t)]
    dev: bool,
    #[arg(long, env = "GENOMECRISPR_SECRETS_DIR")]
    secrets_dir: Option<Utf8PathBuf>,
    #[arg(long, env = "GENOMECRISPR_DB_USER", default_value_t)]
    db_user: String,
    #[arg(long, env = "GENOMECRISPR_DB_PASSWORD", default_value_t)]
    db_password: String,
    #[arg(long, env = "GENOMECRISPR_DB_HOST", default_value_t = String::from("localhost"))]
    db_host: String,
    #[arg(long, env = "GENOMECRISPR_DB_PORT", default_value_t = 5432)]
    db_port: u16,
    #[arg(long, env = "GENOMECRISPR_DB_NAME", default_value_t = String::from("genomecrispr"))]
    db_name: String,
    #[arg(long, env = "GENOMECRISPR_MAX_CONNECTIONS", default_value_t = 8)]
    max_connections: usize,
    #[arg(long, env = "GENOMECRISPR_QUERY_TIMEOUT_SECS", default_value_t = 30)]
    query_timeout_secs: u64,
    #[arg(long, env = "GENOMECRISPR_SEED_DATA_PATH")]
    seed_data_path: Option<Utf8PathBuf>,
}

impl Config {
    #[must_use]
    pub fn is_dev(&self) -> bool {
        self.dev
    }

    #[must_use]
    pub fn max_connections(&self) -> usize {
        self.max_connections
    }

    #[must_use]
    pub fn query_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.query_timeout_secs)
    }

    /// # Errors
    pub fn read_secrets(&mut self) -> anyhow::Result<()> {
        let Self {
            secrets_dir,
            db_user,
            db_password,
            db_name,
            ..
        } = self;

        let Some(secrets_dir) = secrets_dir else {
            return Ok(());
        };

        let read_secret = |name: &str| {
            fs::read_to_string(secrets_dir.join(name))
                .map(|s| s.trim().to_string())
                .context(format!("failed to read secret {name}"))
        };

        *db_user = read_secret("db_user")?;
        *db_password = read_secret("db_password")?;
        *db_name = read_secret("db_name")?;

        Ok(())
    }

    #[must_use]
    pub fn db_url(&self) -> String {
        let Self {
            db_user,
            db_password,
            db_host,
            db_port,
            db_name,
            ..
        } = self;

        format!("postgres://{db_user}:{db_password}@{db_host}:{db_port}/{db_name}")
    }

    /// # Errors
    pub fn seed_data(&self) -> anyhow::Result<SeedData> {
        let Some(seed_data_path) = &self.seed_data_path else {
            return Ok(SeedData::demo());
        };

        let contents = fs::read_to_string(seed_data_path)
            .context(format!("failed to read seed data from {seed_data_path}"))?;

        Ok(serde_json::from_str(&contents)?)
    }
}

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,
    #[arg(long, env = "GENOMECRISPR_LOG_DIR")]
    pub log_dir: Option<Utf8PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the parameterized `SELECT` a criterion tree compiles to
    Compile {
        #[arg(long, default_value = "gene")]
        table: String,
        /// JSON criterion tree, or `@path` to a file containing one
        criteria: String,
    },
    /// Run a criterion tree against the gene table
    Genes {
        /// JSON criterion tree, or `@path` to a file containing one
        criteria: String,
    },
    /// Look up a gene and collect its sgRNAs and screens
    Search(SearchArgs),
    /// Phenotype records for a comma-separated list of sgRNA ids
    Phenotypes {
        #[arg(value_delimiter = ',', required = true)]
        sg_ids: Vec<i32>,
    },
    /// The effect an sgRNA had in each screen it was measured in
    Effects { sg_id: i32 },
}

#[derive(Args)]
pub struct SearchArgs {
    /// Gene symbol or Ensembl stable identifier
    query: String,
    #[arg(long)]
    pubmed: Option<String>,
    #[arg(long)]
    screentype: Option<String>,
    #[arg(long)]
    condition: Option<String>,
    #[arg(long)]
    cas: Option<String>,
    #[arg(long)]
    cellline: Option<String>,
    #[arg(long)]
    sequence: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    effect: Option<String>,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    sg_page: i64,
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    sg_limit: i64,
    #[arg(long, default_value = "sequence")]
    sg_sort_by: String,
    #[arg(long, default_value = "asc")]
    sg_sort_order: String,
    #[arg(long, default_value = "pubmed")]
    screen_sort_by: String,
    #[arg(long, default_value = "asc")]
    screen_sort_order: String,
}

impl From<SearchArgs> for SearchQuery {
    fn from(args: SearchArgs) -> Self {
        let SearchArgs {
            query,
            pubmed,
            screentype,
            condition,
            cas,
            cellline,
            sequence,
            effect,
            sg_page,
            sg_limit,
            sg_sort_by,
            sg_sort_order,
            screen_sort_by,
            screen_sort_order,
        } = args;

        Self {
            query,
            screen_filter: ScreenFilter {
                pubmed,
                screentype,
                condition,
                cas,
                cellline,
            },
            sg_filter: SgFilter { sequence, effect },
            sg_page,
            sg_limit,
            sg_sort_by,
            sg_sort_order: SortOrder::from(sg_sort_order),
            screen_sort_by,
            screen_sort_order: SortOrder::from(screen_sort_order),
        }
    }
}

/// # Errors
pub fn read_criteria(raw: &str) -> anyhow::Result<String> {
    let Some(path) = raw.strip_prefix('@') else {
        return Ok(raw.to_string());
    };
    let path = Utf8Path::new(path);

    fs::read_to_string(path).context(format!("failed to read criteria from {path}"))
}
