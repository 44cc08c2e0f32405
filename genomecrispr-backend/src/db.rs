pub mod association;
pub mod criteria;
pub mod error;
pub mod field_schema;
pub mod gene;
pub mod phen;
pub mod resolver;
pub mod screen;
pub mod seed_data;
pub mod sg;
pub mod statement;
#[cfg(test)]
pub(crate) mod test_util;
mod util;

use std::{future::Future, sync::Arc, time::Duration};

use diesel_async::{
    AsyncPgConnection,
    pooled_connection::{
        AsyncDieselConnectionManager,
        deadpool::{Object, Pool},
    },
};
use field_schema::FieldSchema;
use genomecrispr_core::model::{
    criteria::Criterion, gene::Gene, phen::PhenForSg, screen::SgEffect,
};

pub type DbConnection = Object<AsyncPgConnection>;

#[derive(Clone)]
pub struct Database {
    pool: Pool<AsyncPgConnection>,
    schema: Arc<FieldSchema>,
    query_timeout: Duration,
}

impl Database {
    /// # Errors
    pub fn new(db_url: &str, max_connections: usize, query_timeout: Duration) -> anyhow::Result<Self> {
        let db_config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(db_url);
        let pool = Pool::builder(db_config).max_size(max_connections).build()?;

        Ok(Self {
            pool,
            schema: Arc::new(FieldSchema::genomecrispr()),
            query_timeout,
        })
    }

    #[must_use]
    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    /// # Errors
    pub async fn conn(&self) -> error::Result<DbConnection> {
        self.timed(async { Ok(self.pool.get().await?) }).await
    }

    async fn timed<T>(&self, fut: impl Future<Output = error::Result<T>>) -> error::Result<T> {
        tokio::time::timeout(self.query_timeout, fut).await?
    }

    /// # Errors
    pub async fn find_genes(&self, query: &str) -> error::Result<Vec<Gene>> {
        let mut db_conn = self.conn().await?;

        self.timed(gene::find_genes(query, &mut db_conn)).await
    }

    /// # Errors
    pub async fn search_genes(&self, criterion: &Criterion) -> error::Result<Vec<Gene>> {
        let statement = criteria::gene_search(criterion, &self.schema)?;
        let mut db_conn = self.conn().await?;

        self.timed(statement.load(&mut db_conn)).await
    }

    /// # Errors
    pub async fn phenotypes_for(&self, sg_ids: &[i32]) -> error::Result<Vec<PhenForSg>> {
        if sg_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut db_conn = self.conn().await?;

        self.timed(phen::phenotypes_for(sg_ids, &mut db_conn)).await
    }

    /// # Errors
    pub async fn effects_for_sg(&self, sg_id: i32) -> error::Result<Vec<SgEffect>> {
        let mut db_conn = self.conn().await?;

        self.timed(screen::effects_for_sg(sg_id, &mut db_conn)).await
    }
}
