use garde::Validate;
use genomecrispr_core::model::{
    Pagination,
    gene::Gene,
    search::{Bundle, SearchQuery},
};
use valuable::Valuable;

use super::{
    Database,
    association::{AssociatedEntity, checked_offset},
    error::{Error, Result},
    screen::Screens,
    sg::Sgs,
};

impl Database {
    /// Screens aren't paginated, so their total is just how many came back.
    ///
    /// # Errors
    pub async fn resolve(&self, query: &SearchQuery) -> Result<Bundle> {
        query.validate()?;

        let pagination = Pagination {
            page: query.sg_page,
            limit: query.sg_limit,
        };
        checked_offset(pagination)?;

        let genes = self.find_genes(&query.query).await?;
        if genes.is_empty() {
            tracing::info!(query = query.as_value(), "no gene matched");

            return Err(Error::NotFound {
                query: query.query.trim().to_string(),
            });
        }

        let gene_ids: Vec<i32> = genes.iter().map(Gene::id).collect();
        let schema = self.schema();

        let sg_leg = async {
            let mut db_conn = self.conn().await?;

            let total = self
                .timed(Sgs::count_matching(
                    &gene_ids,
                    &query.sg_filter,
                    schema,
                    &mut db_conn,
                ))
                .await?;
            let sgs = self
                .timed(Sgs::fetch_matching(
                    &gene_ids,
                    &query.sg_filter,
                    &query.sg_sort_by,
                    query.sg_sort_order,
                    Some(pagination),
                    schema,
                    &mut db_conn,
                ))
                .await?;

            Ok::<_, Error>((total, sgs))
        };

        let screen_leg = async {
            let mut db_conn = self.conn().await?;

            self.timed(Screens::fetch_matching(
                &gene_ids,
                &query.screen_filter,
                &query.screen_sort_by,
                query.screen_sort_order,
                None,
                schema,
                &mut db_conn,
            ))
            .await
        };

        let ((total_sg_count, sgs), screens) = tokio::try_join!(sg_leg, screen_leg)?;

        tracing::info!(
            query = query.as_value(),
            n_genes = genes.len(),
            total_sg_count,
            n_screens = screens.len(),
            "resolved gene search"
        );

        Ok(Bundle {
            genes,
            total_sg_count,
            total_screen_count: screens.len(),
            sgs,
            screens,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use genomecrispr_core::model::search::SearchQuery;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::db::{Database, error::Error};

    // Points at a port nothing listens on: validation has to fail before a
    // connection is attempted for these to pass.
    fn unreachable_db() -> Database {
        Database::new(
            "postgres://nobody@127.0.0.1:1/nothing",
            1,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[rstest]
    #[case(SearchQuery::new(""))]
    #[case(SearchQuery::new("   "))]
    #[case(SearchQuery { sg_page: -1, ..SearchQuery::new("TP53") })]
    #[case(SearchQuery { sg_limit: 0, ..SearchQuery::new("TP53") })]
    #[case(SearchQuery { sg_page: i64::MAX / 2, ..SearchQuery::new("TP53") })]
    #[tokio::test]
    async fn invalid_queries_fail_validation(#[case] query: SearchQuery) {
        let err = unreachable_db().resolve(&query).await.unwrap_err();

        assert!(matches!(err, Error::Validation { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn storage_failures_are_opaque() {
        let err = unreachable_db()
            .resolve(&SearchQuery::new("TP53"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "storage failure");
    }

    mod storage {
        use genomecrispr_core::model::search::{ScreenFilter, SearchQuery, SgFilter};
        use pretty_assertions::assert_eq;
        use rstest::rstest;

        use crate::db::{Database, error::Error, test_util::db};

        #[rstest]
        #[tokio::test]
        async fn unknown_gene(#[future] db: Database) {
            let db = db.await;

            let err = db.resolve(&SearchQuery::new("A1CF")).await.unwrap_err();

            assert_eq!(
                err,
                Error::NotFound {
                    query: "A1CF".to_string()
                }
            );
        }

        #[rstest]
        #[tokio::test]
        async fn symbol_shared_by_two_genes(#[future] db: Database) {
            let db = db.await;

            let bundle = db.resolve(&SearchQuery::new("tp53")).await.unwrap();

            let gene_ids: Vec<_> = bundle.genes.iter().map(|g| g.id()).collect();
            let sg_ids: Vec<_> = bundle.sgs.iter().map(|row| row.sg.id()).collect();
            let screen_ids: Vec<_> = bundle.screens.iter().map(|s| s.id).collect();

            assert_eq!(gene_ids, [2, 3]);
            assert_eq!(bundle.total_sg_count, 4);
            assert_eq!(sg_ids, [5, 6, 4, 4]);
            assert_eq!(screen_ids, [1, 3]);
            assert_eq!(bundle.total_screen_count, 2);
        }

        #[rstest]
        #[tokio::test]
        async fn sg_page_does_not_change_totals(#[future] db: Database) {
            let db = db.await;

            let query = SearchQuery {
                sg_page: 1,
                sg_limit: 3,
                sg_sort_by: "bogus".to_string(),
                ..SearchQuery::new("ENSG00000012048")
            };
            let bundle = db.resolve(&query).await.unwrap();

            let sg_ids: Vec<_> = bundle.sgs.iter().map(|row| row.sg.id()).collect();

            assert_eq!(bundle.total_sg_count, 4);
            assert_eq!(sg_ids, [3]);
            assert_eq!(bundle.total_screen_count, bundle.screens.len());
        }

        #[rstest]
        #[tokio::test]
        async fn filters_apply_to_their_own_collection(#[future] db: Database) {
            let db = db.await;

            let query = SearchQuery {
                sg_filter: SgFilter {
                    effect: Some("-".to_string()),
                    ..Default::default()
                },
                screen_filter: ScreenFilter {
                    cas: Some("dcas".to_string()),
                    ..Default::default()
                },
                ..SearchQuery::new("TP53")
            };
            let bundle = db.resolve(&query).await.unwrap();

            let screen_ids: Vec<_> = bundle.screens.iter().map(|s| s.id).collect();

            assert_eq!(bundle.total_sg_count, 1);
            assert_eq!(bundle.sgs[0].effect, Some(-2));
            assert_eq!(screen_ids, [3]);
        }
    }
}
