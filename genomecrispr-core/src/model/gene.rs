use serde::{Deserialize, Serialize};

#[cfg(feature = "backend")]
use genomecrispr_schema::gene;

#[cfg_attr(
    feature = "backend",
    derive(
        diesel::Queryable,
        diesel::Selectable,
        diesel::QueryableByName,
        diesel::Insertable
    ),
    diesel(table_name = gene, check_for_backend(diesel::pg::Pg))
)]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Gene {
    pub id: i32,
    pub symbol: String,
    pub ensg: String,
}

impl Gene {
    #[must_use]
    pub fn id(&self) -> i32 {
        self.id
    }
}
