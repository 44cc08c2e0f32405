use serde::{Deserialize, Serialize};

#[cfg(feature = "backend")]
use diesel::QueryableByName;
#[cfg(feature = "backend")]
use genomecrispr_schema::sg;

pub const PAM_LENGTH: usize = 3;

#[cfg_attr(
    feature = "backend",
    derive(
        diesel::Queryable,
        diesel::Selectable,
        diesel::QueryableByName,
        diesel::Insertable
    ),
    diesel(table_name = sg, check_for_backend(diesel::pg::Pg))
)]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Sg {
    pub id: i32,
    pub chr: String,
    pub start: i32,
    pub end: i32,
    pub strand: String,
    pub sequence: String,
    pub gene_id: i32,
}

impl Sg {
    #[must_use]
    pub fn id(&self) -> i32 {
        self.id
    }

    fn pam_start(&self) -> usize {
        let n_chars = self.sequence.chars().count();
        let guide_len = n_chars.saturating_sub(PAM_LENGTH);

        self.sequence
            .char_indices()
            .nth(guide_len)
            .map_or(self.sequence.len(), |(i, _)| i)
    }

    #[must_use]
    pub fn guide(&self) -> &str {
        &self.sequence[..self.pam_start()]
    }

    /// Split by position, never by matching a motif.
    #[must_use]
    pub fn pam(&self) -> &str {
        &self.sequence[self.pam_start()..]
    }
}

#[cfg_attr(feature = "backend", derive(diesel::QueryableByName))]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SgWithEffect {
    #[serde(flatten)]
    #[cfg_attr(feature = "backend", diesel(embed))]
    pub sg: Sg,
    #[cfg_attr(
        feature = "backend",
        diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Int4>)
    )]
    pub effect: Option<i32>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn sg(sequence: &str) -> Sg {
        Sg {
            id: 1,
            chr: "chr17".to_string(),
            start: 43_044_295,
            end: 43_044_318,
            strand: "+".to_string(),
            sequence: sequence.to_string(),
            gene_id: 1,
        }
    }

    #[rstest]
    #[case("GACTCAGTTCAACTCCAGGCTGG", "GACTCAGTTCAACTCCAGGC", "TGG")]
    #[case("AGG", "", "AGG")]
    #[case("GG", "", "GG")]
    #[case("", "", "")]
    fn guide_and_pam_are_split_by_position(
        #[case] sequence: &str,
        #[case] guide: &str,
        #[case] pam: &str,
    ) {
        let sg = sg(sequence);

        assert_eq!(sg.guide(), guide);
        assert_eq!(sg.pam(), pam);
    }

    #[test]
    fn pam_is_positional_even_without_ngg() {
        let sg = sg("ACGTACGTACGTACGTACGTACT");

        assert_eq!(sg.pam(), "ACT");
    }

    #[test]
    fn sg_with_effect_serializes_flat() {
        let row = SgWithEffect {
            sg: sg("ACGTAGG"),
            effect: None,
        };
        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json["sequence"], "ACGTAGG");
        assert_eq!(json["effect"], serde_json::Value::Null);
    }
}
