use serde::{Deserialize, Serialize};

#[cfg(feature = "backend")]
use genomecrispr_schema::screen;

#[cfg_attr(
    feature = "backend",
    derive(
        diesel::Queryable,
        diesel::Selectable,
        diesel::QueryableByName,
        diesel::Insertable
    ),
    diesel(table_name = screen, check_for_backend(diesel::pg::Pg))
)]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Screen {
    pub id: i32,
    pub pubmed: i32,
    pub screentype: String,
    pub condition: String,
    pub cas: String,
    pub cellline: String,
}

#[cfg_attr(feature = "backend", derive(diesel::Queryable))]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SgEffect {
    pub screen_id: i32,
    pub pubmed: i32,
    pub cellline: String,
    pub effect: i32,
    pub log2fc: f64,
}
