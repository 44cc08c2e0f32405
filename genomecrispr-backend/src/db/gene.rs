use diesel::{define_sql_function, prelude::*, sql_types::Text};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use genomecrispr_core::model::gene::Gene;
use genomecrispr_schema::gene;

use super::error::Result;

const ENSG_PREFIX: &str = "ENSG";

define_sql_function!(fn lower(x: Text) -> Text);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneLookup<'a> {
    Ensg(&'a str),
    Symbol(&'a str),
}

impl<'a> GeneLookup<'a> {
    #[must_use]
    pub fn classify(query: &'a str) -> Self {
        let query = query.trim();

        let is_ensg = query
            .get(..ENSG_PREFIX.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(ENSG_PREFIX));

        if is_ensg {
            Self::Ensg(query)
        } else {
            Self::Symbol(query)
        }
    }
}

/// # Errors
pub async fn find_genes(query: &str, db_conn: &mut AsyncPgConnection) -> Result<Vec<Gene>> {
    let base = gene::table
        .select(Gene::as_select())
        .order_by(gene::id)
        .into_boxed();

    let query = match GeneLookup::classify(query) {
        GeneLookup::Ensg(ensg) => base.filter(lower(gene::ensg).eq(lower(ensg))),
        GeneLookup::Symbol(symbol) => base.filter(lower(gene::symbol).eq(lower(symbol))),
    };

    Ok(query.load(db_conn).await?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("ENSG00000141510", GeneLookup::Ensg("ENSG00000141510"))]
    #[case("ensg00000141510", GeneLookup::Ensg("ensg00000141510"))]
    #[case(" EnsG00000141510 ", GeneLookup::Ensg("EnsG00000141510"))]
    #[case("TP53", GeneLookup::Symbol("TP53"))]
    #[case("ENS", GeneLookup::Symbol("ENS"))]
    #[case("ENSMUSG00000059552", GeneLookup::Symbol("ENSMUSG00000059552"))]
    fn classification(#[case] query: &str, #[case] expected: GeneLookup) {
        assert_eq!(GeneLookup::classify(query), expected);
    }

    mod storage {
        use pretty_assertions::assert_eq;
        use rstest::rstest;

        use crate::db::{Database, test_util::db};

        #[rstest]
        #[case("TP53", vec![2, 3])]
        #[case("tp53", vec![2, 3])]
        #[case("ensg00000012048", vec![1])]
        #[case(" KRAS ", vec![4])]
        #[case("A1CF", vec![])]
        #[case("TP5", vec![])]
        #[tokio::test]
        async fn lookup(#[future] db: Database, #[case] query: &str, #[case] expected: Vec<i32>) {
            let db = db.await;

            let genes = db.find_genes(query).await.unwrap();

            assert_eq!(genes.iter().map(|g| g.id()).collect::<Vec<_>>(), expected);
        }
    }
}
