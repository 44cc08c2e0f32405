use diesel::prelude::*;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl, scoped_futures::ScopedFutureExt};
use genomecrispr_core::model::{gene::Gene, phen::Phen, screen::Screen, sg::Sg};
use genomecrispr_schema::{gene, genescreen, phen, screen, sg, sgscreen};
use serde::Deserialize;

use super::error::{Error, Result};

macro_rules! insert_all {
    ($db_conn:expr, $table:ident, $rows:expr) => {
        if !$rows.is_empty() {
            diesel::insert_into($table::table)
                .values(&$rows)
                .on_conflict_do_nothing()
                .execute($db_conn)
                .await?;
        }
    };
}

#[derive(Deserialize, Insertable, Clone, Copy)]
#[diesel(table_name = genescreen, check_for_backend(diesel::pg::Pg))]
struct GeneScreen {
    gene_id: i32,
    screen_id: i32,
}

#[derive(Deserialize, Insertable, Clone, Copy)]
#[diesel(table_name = sgscreen, check_for_backend(diesel::pg::Pg))]
struct SgScreen {
    sg_id: i32,
    screen_id: i32,
    phen_id: i32,
}

#[derive(Deserialize, Clone)]
pub struct SeedData {
    genes: Vec<Gene>,
    sgs: Vec<Sg>,
    screens: Vec<Screen>,
    phens: Vec<Phen>,
    #[serde(default)]
    genescreens: Vec<GeneScreen>,
    #[serde(default)]
    sgscreens: Vec<SgScreen>,
}

impl SeedData {
    /// # Errors
    pub async fn write(self, db_conn: &mut AsyncPgConnection) -> Result<()> {
        let Self {
            genes,
            sgs,
            screens,
            phens,
            genescreens,
            sgscreens,
        } = self;

        db_conn
            .transaction::<_, Error, _>(|conn| {
                async move {
                    insert_all!(conn, gene, genes);
                    insert_all!(conn, sg, sgs);
                    insert_all!(conn, screen, screens);
                    insert_all!(conn, phen, phens);
                    insert_all!(conn, genescreen, genescreens);
                    insert_all!(conn, sgscreen, sgscreens);

                    Ok(())
                }
                .scope_boxed()
            })
            .await?;

        tracing::info!("wrote seed data");

        Ok(())
    }

    #[must_use]
    pub fn demo() -> Self {
        let gene = |id, symbol: &str, ensg: &str| Gene {
            id,
            symbol: symbol.to_string(),
            ensg: ensg.to_string(),
        };
        let sg = |id, chr: &str, start, strand: &str, sequence: &str, gene_id| Sg {
            id,
            chr: chr.to_string(),
            start,
            end: start + 23,
            strand: strand.to_string(),
            sequence: sequence.to_string(),
            gene_id,
        };
        let screen = |id, pubmed, screentype: &str, condition: &str, cas: &str, cellline: &str| {
            Screen {
                id,
                pubmed,
                screentype: screentype.to_string(),
                condition: condition.to_string(),
                cas: cas.to_string(),
                cellline: cellline.to_string(),
            }
        };
        let phen = |id, effect, log2fc, rc_initial, rc_final| Phen {
            id,
            effect,
            log2fc,
            rc_initial,
            rc_final,
        };
        let genescreen = |gene_id, screen_id| GeneScreen { gene_id, screen_id };
        let sgscreen = |sg_id, screen_id, phen_id| SgScreen {
            sg_id,
            screen_id,
            phen_id,
        };

        Self {
            genes: vec![
                gene(1, "BRCA1", "ENSG00000012048"),
                gene(2, "TP53", "ENSG00000141510"),
                gene(3, "TP53", "ENSG00000276999"),
                gene(4, "KRAS", "ENSG00000133703"),
            ],
            sgs: vec![
                sg(1, "chr17", 43_044_300, "+", "AAAGTCCTAGGACTTCCAGCTGG", 1),
                sg(2, "chr17", 43_044_100, "-", "CCCTTGGACTAGCTACGGTAAGG", 1),
                sg(3, "chr17", 43_044_200, "+", "GGGACTTACGATCGATCGACCGG", 1),
                sg(4, "chr17", 7_661_800, "+", "TTTACGATCGATCGTAGCTATGG", 2),
                sg(5, "chr17", 7_661_700, "-", "ACGTTTGACCATGACTGACTCGG", 2),
                sg(6, "chr17", 7_661_900, "+", "CATGACTGACTAGCTAGCTAAGG", 3),
                sg(7, "chr12", 25_245_300, "-", "GATCGTAGCTAGCTAGGATCTGG", 4),
            ],
            screens: vec![
                screen(1, 12_345_678, "negative selection", "viability", "Cas9", "HEK293T"),
                screen(2, 23_456_789, "positive selection", "vemurafenib", "Cas9", "A375"),
                screen(3, 34_512_345, "negative selection", "viability", "dCas9", "K562"),
                screen(4, 45_678_901, "negative selection", "viability", "Cas9", "HeLa"),
            ],
            phens: vec![
                phen(1, -2, -1.5, 410, 160),
                phen(2, 1, 0.5, 380, 520),
                phen(3, -3, -2.1, 500, 110),
                phen(4, 0, 0.1, 300, 310),
                phen(5, -2, -1.2, 450, 190),
                phen(6, 2, 1.3, 220, 540),
            ],
            genescreens: vec![
                genescreen(1, 1),
                genescreen(1, 2),
                genescreen(2, 1),
                genescreen(2, 3),
                genescreen(3, 3),
                genescreen(4, 4),
            ],
            sgscreens: vec![
                sgscreen(1, 1, 1),
                sgscreen(1, 2, 2),
                sgscreen(2, 1, 3),
                sgscreen(4, 1, 4),
                sgscreen(4, 3, 5),
                sgscreen(6, 3, 6),
            ],
        }
    }
}
