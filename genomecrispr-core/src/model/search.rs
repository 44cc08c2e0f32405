use serde::{Deserialize, Serialize};

use super::{SortOrder, gene::Gene, screen::Screen, sg::SgWithEffect};

#[cfg_attr(feature = "backend", derive(valuable::Valuable))]
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SgFilter {
    pub sequence: Option<String>,
    pub effect: Option<String>,
}

#[cfg_attr(feature = "backend", derive(valuable::Valuable))]
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ScreenFilter {
    pub pubmed: Option<String>,
    pub screentype: Option<String>,
    pub condition: Option<String>,
    pub cas: Option<String>,
    pub cellline: Option<String>,
}

#[cfg_attr(
    feature = "backend",
    derive(valuable::Valuable, garde::Validate),
    garde(allow_unvalidated)
)]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SearchQuery {
    #[cfg_attr(feature = "backend", garde(custom(not_blank)))]
    pub query: String,
    pub screen_filter: ScreenFilter,
    pub sg_filter: SgFilter,
    #[cfg_attr(feature = "backend", garde(range(min = 0)))]
    pub sg_page: i64,
    #[cfg_attr(feature = "backend", garde(range(min = 1)))]
    pub sg_limit: i64,
    pub sg_sort_by: String,
    pub sg_sort_order: SortOrder,
    pub screen_sort_by: String,
    pub screen_sort_order: SortOrder,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            screen_filter: ScreenFilter::default(),
            sg_filter: SgFilter::default(),
            sg_page: 0,
            sg_limit: 10,
            sg_sort_by: "sequence".to_string(),
            sg_sort_order: SortOrder::Asc,
            screen_sort_by: "pubmed".to_string(),
            screen_sort_order: SortOrder::Asc,
        }
    }
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }
}

#[cfg(feature = "backend")]
#[allow(clippy::ptr_arg)]
fn not_blank(value: &String, _context: &()) -> garde::Result {
    if value.trim().is_empty() {
        return Err(garde::Error::new("must not be blank"));
    }

    Ok(())
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Bundle {
    pub genes: Vec<Gene>,
    pub total_sg_count: i64,
    pub total_screen_count: usize,
    pub sgs: Vec<SgWithEffect>,
    pub screens: Vec<Screen>,
}
