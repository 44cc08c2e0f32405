use serde::{Deserialize, Serialize};

pub mod criteria;
pub mod gene;
pub mod phen;
pub mod screen;
pub mod search;
pub mod sg;

#[cfg_attr(feature = "backend", derive(valuable::Valuable))]
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    #[must_use]
    pub fn offset(&self) -> Option<i64> {
        self.page.checked_mul(self.limit)
    }
}

#[cfg_attr(feature = "backend", derive(valuable::Valuable))]
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    #[strum(serialize = "ASC")]
    Asc,
    #[strum(serialize = "DESC")]
    Desc,
}

impl From<&str> for SortOrder {
    fn from(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

impl From<String> for SortOrder {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("asc", SortOrder::Asc)]
    #[case("DESC", SortOrder::Desc)]
    #[case(" desc ", SortOrder::Desc)]
    #[case("descending", SortOrder::Asc)]
    #[case("", SortOrder::Asc)]
    #[case("; drop table gene", SortOrder::Asc)]
    fn sort_order_normalization(#[case] raw: &str, #[case] expected: SortOrder) {
        assert_eq!(SortOrder::from(raw), expected);
    }

    #[test]
    fn sort_order_renders_as_sql_keyword() {
        assert_eq!(SortOrder::Asc.to_string(), "ASC");
        assert_eq!(SortOrder::Desc.to_string(), "DESC");
    }

    #[test]
    fn sort_order_deserializes_leniently() {
        let order: SortOrder = serde_json::from_str(r#""sideways""#).unwrap();
        assert_eq!(order, SortOrder::Asc);
    }

    #[test]
    fn offset_is_page_times_limit() {
        let pagination = Pagination { page: 3, limit: 25 };
        assert_eq!(pagination.offset(), Some(75));
    }

    #[test]
    fn offset_overflow_is_none() {
        let pagination = Pagination {
            page: i64::MAX / 2,
            limit: 10,
        };
        assert_eq!(pagination.offset(), None);
    }
}
