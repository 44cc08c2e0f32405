use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use genomecrispr_core::model::{
    screen::{Screen, SgEffect},
    search::ScreenFilter,
};
use genomecrispr_schema::{phen, screen, sgscreen};

use super::{association::AssociatedEntity, error::Result};

pub struct Screens;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ScreenSortColumn {
    Pubmed,
    Screentype,
    Condition,
    Cas,
    Cellline,
}

impl AssociatedEntity for Screens {
    type Row = Screen;
    type Filter = ScreenFilter;
    type SortColumn = ScreenSortColumn;

    const TABLE: &'static str = "screen";
    const SOURCE: &'static str =
        "screen INNER JOIN genescreen ON screen.id = genescreen.screen_id";
    const GENE_ID_FIELD: &'static str = "genescreen.gene_id";
    const SELECTION: &'static str = "DISTINCT screen.*";
    const COUNT_SELECTION: &'static str = "COUNT(DISTINCT screen.id) AS total";
    const TIE_BREAKER: &'static str = "screen.id ASC";

    fn filter_values(filter: &Self::Filter) -> Vec<(&'static str, Option<&str>)> {
        let ScreenFilter {
            pubmed,
            screentype,
            condition,
            cas,
            cellline,
        } = filter;

        vec![
            ("screen.pubmed", pubmed.as_deref()),
            ("screen.screentype", screentype.as_deref()),
            ("screen.condition", condition.as_deref()),
            ("screen.cas", cas.as_deref()),
            ("screen.cellline", cellline.as_deref()),
        ]
    }
}

/// # Errors
pub async fn effects_for_sg(sg_id: i32, db_conn: &mut AsyncPgConnection) -> Result<Vec<SgEffect>> {
    let effects = sgscreen::table
        .inner_join(phen::table)
        .inner_join(screen::table)
        .filter(sgscreen::sg_id.eq(sg_id))
        .order_by(screen::id)
        .select((
            screen::id,
            screen::pubmed,
            screen::cellline,
            phen::effect,
            phen::log2fc,
        ))
        .load(db_conn)
        .await?;

    Ok(effects)
}
