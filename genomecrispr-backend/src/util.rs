use std::time::Duration;

use anyhow::Context;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use testcontainers_modules::{
    postgres::Postgres,
    testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner},
};
use uuid::Uuid;

use crate::db::{Database, DbConnection, seed_data::SeedData};

const POSTGRES_VERSION: &str = "17-alpine";
const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub struct DevContainer {
    container: ContainerAsync<Postgres>,
    password: Option<String>,
}

impl DevContainer {
    /// # Errors
    pub async fn start(purpose: &str, with_password: bool) -> anyhow::Result<Self> {
        let name = format!("genomecrispr-{purpose}-{}", Uuid::now_v7());
        let password = with_password.then(|| Uuid::now_v7().simple().to_string());

        let image = match &password {
            Some(password) => Postgres::default().with_password(password),
            None => Postgres::default().with_host_auth(),
        };

        let container = image
            .with_tag(POSTGRES_VERSION)
            .with_container_name(name)
            .start()
            .await?;

        Ok(Self {
            container,
            password,
        })
    }

    /// # Errors
    pub async fn db_url(&self) -> anyhow::Result<String> {
        let Self {
            container,
            password,
        } = self;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(5432).await?;
        let credentials = match password {
            Some(password) => format!("postgres:{password}"),
            None => "postgres".to_string(),
        };

        Ok(format!("postgres://{credentials}@{host}:{port}/postgres"))
    }

    /// # Errors
    pub async fn bootstrap(
        &self,
        seed_data: SeedData,
        max_connections: usize,
        query_timeout: Duration,
    ) -> anyhow::Result<Database> {
        let db = Database::new(&self.db_url().await?, max_connections, query_timeout)?;

        run_migrations(db.conn().await?)
            .await
            .context("failed to run database migrations")?;
        tracing::info!("ran database migrations");

        seed_data
            .write(&mut *db.conn().await?)
            .await
            .context("failed to insert seed data")?;

        Ok(db)
    }
}

async fn run_migrations(db_conn: DbConnection) -> anyhow::Result<()> {
    let mut wrapper: AsyncConnectionWrapper<DbConnection> = AsyncConnectionWrapper::from(db_conn);

    tokio::task::spawn_blocking(move || {
        wrapper
            .run_pending_migrations(MIGRATIONS)
            .map(|_| ())
            .map_err(|err| anyhow::anyhow!(err))
    })
    .await??;

    Ok(())
}
