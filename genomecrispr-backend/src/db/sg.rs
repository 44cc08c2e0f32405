use genomecrispr_core::model::{search::SgFilter, sg::SgWithEffect};

use super::association::AssociatedEntity;

pub struct Sgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum SgSortColumn {
    Sequence,
    Start,
    End,
    Chr,
    Strand,
    GeneId,
}

impl AssociatedEntity for Sgs {
    type Row = SgWithEffect;
    type Filter = SgFilter;
    type SortColumn = SgSortColumn;

    const TABLE: &'static str = "sg";
    const SOURCE: &'static str = "sg LEFT JOIN sgscreen ON sg.id = sgscreen.sg_id LEFT JOIN phen ON sgscreen.phen_id = phen.id";
    const GENE_ID_FIELD: &'static str = "sg.gene_id";
    const SELECTION: &'static str = "sg.*, phen.effect";
    const COUNT_SELECTION: &'static str = "COUNT(*) AS total";
    const TIE_BREAKER: &'static str = "sg.id ASC, sgscreen.screen_id ASC";

    fn filter_values(filter: &Self::Filter) -> Vec<(&'static str, Option<&str>)> {
        let SgFilter { sequence, effect } = filter;

        vec![
            ("sg.sequence", sequence.as_deref()),
            ("phen.effect", effect.as_deref()),
        ]
    }
}
