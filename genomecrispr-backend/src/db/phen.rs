use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use genomecrispr_core::model::phen::PhenForSg;
use genomecrispr_schema::{phen, sgscreen};

use super::error::Result;

/// # Errors
pub async fn phenotypes_for(
    sg_ids: &[i32],
    db_conn: &mut AsyncPgConnection,
) -> Result<Vec<PhenForSg>> {
    if sg_ids.is_empty() {
        return Ok(Vec::new());
    }

    let phenotypes = phen::table
        .inner_join(sgscreen::table)
        .filter(sgscreen::sg_id.eq_any(sg_ids))
        .order_by((sgscreen::sg_id, phen::id))
        .select(PhenForSg::as_select())
        .load(db_conn)
        .await?;

    Ok(phenotypes)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::db::{Database, test_util::db};

    #[rstest]
    #[tokio::test]
    async fn phenotypes_grouped_by_sg(#[future] db: Database) {
        let db = db.await;

        let phenotypes = db.phenotypes_for(&[4, 1, 99]).await.unwrap();
        let keys: Vec<_> = phenotypes.iter().map(|p| (p.sg_id, p.phen.id)).collect();

        assert_eq!(keys, [(1, 1), (1, 2), (4, 4), (4, 5)]);
        assert_eq!(phenotypes[0].phen.log2fc, -1.5);
    }

    #[rstest]
    #[tokio::test]
    async fn no_sgs_no_phenotypes(#[future] db: Database) {
        let db = db.await;

        assert!(db.phenotypes_for(&[]).await.unwrap().is_empty());
        assert!(db.phenotypes_for(&[3, 5]).await.unwrap().is_empty());
    }
}
