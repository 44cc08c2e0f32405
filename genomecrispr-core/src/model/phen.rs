use serde::{Deserialize, Serialize};

#[cfg(feature = "backend")]
use genomecrispr_schema::{phen, sgscreen};

#[cfg_attr(
    feature = "backend",
    derive(diesel::Queryable, diesel::Selectable, diesel::Insertable),
    diesel(table_name = phen, check_for_backend(diesel::pg::Pg))
)]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Phen {
    pub id: i32,
    pub effect: i32,
    pub log2fc: f64,
    pub rc_initial: i32,
    pub rc_final: i32,
}

#[cfg_attr(
    feature = "backend",
    derive(diesel::Queryable, diesel::Selectable),
    diesel(table_name = sgscreen, check_for_backend(diesel::pg::Pg))
)]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PhenForSg {
    #[serde(flatten)]
    #[cfg_attr(feature = "backend", diesel(embed))]
    pub phen: Phen,
    pub sg_id: i32,
}
