use std::collections::HashMap;

use serde::Serialize;

use super::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FieldKind {
    Text,
    Integer,
    Real,
    ForeignKey,
}

impl FieldKind {
    #[must_use]
    pub fn is_text(self) -> bool {
        matches!(self, Self::Text)
    }
}

/// Whitelist of every `table.column` a criterion or a filter may name.
#[derive(Debug, Clone, Default)]
pub struct FieldSchema {
    fields: HashMap<String, FieldKind>,
}

impl FieldSchema {
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, FieldKind)>,
        S: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, kind)| (name.into(), kind))
                .collect(),
        }
    }

    #[must_use]
    pub fn genomecrispr() -> Self {
        use FieldKind::{ForeignKey, Integer, Real, Text};

        Self::from_fields([
            ("gene.id", Integer),
            ("gene.symbol", Text),
            ("gene.ensg", Text),
            ("sg.id", Integer),
            ("sg.chr", Text),
            ("sg.start", Integer),
            ("sg.end", Integer),
            ("sg.strand", Text),
            ("sg.sequence", Text),
            ("sg.gene_id", ForeignKey),
            ("screen.id", Integer),
            ("screen.pubmed", Integer),
            ("screen.screentype", Text),
            ("screen.condition", Text),
            ("screen.cas", Text),
            ("screen.cellline", Text),
            ("phen.id", Integer),
            ("phen.effect", Integer),
            ("phen.log2fc", Real),
            ("phen.rc_initial", Integer),
            ("phen.rc_final", Integer),
            ("sgscreen.sg_id", ForeignKey),
            ("sgscreen.screen_id", ForeignKey),
            ("sgscreen.phen_id", ForeignKey),
            ("genescreen.gene_id", ForeignKey),
            ("genescreen.screen_id", ForeignKey),
            ("decoy.start", Integer),
            ("decoy.end", Integer),
            ("decoy.chr", Integer),
            ("decoy.strand", Text),
            ("decoy.pubmed", Integer),
            ("decoy.cellline", Text),
            ("decoy.condition", Text),
            ("decoy.sequence", Text),
            ("decoy.symbol", Text),
            ("decoy.ensg", Text),
            ("decoy.log2fc", Real),
            ("decoy.rc_initial", Text),
            ("decoy.rc_final", Text),
            ("decoy.effect", Integer),
            ("decoy.cas", Text),
            ("decoy.screentype", Text),
        ])
    }

    /// # Errors
    pub fn kind_of(&self, field: &str) -> Result<FieldKind> {
        self.fields
            .get(field)
            .copied()
            .ok_or_else(|| Error::UnknownField {
                field: field.to_string(),
            })
    }

    #[must_use]
    pub fn has_table(&self, table: &str) -> bool {
        self.fields
            .keys()
            .filter_map(|field| field.split_once('.'))
            .any(|(t, _)| t == table)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, FieldKind)> {
        self.fields.iter().map(|(name, kind)| (name.as_str(), *kind))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("gene.symbol", FieldKind::Text)]
    #[case("sg.end", FieldKind::Integer)]
    #[case("sg.gene_id", FieldKind::ForeignKey)]
    #[case("phen.log2fc", FieldKind::Real)]
    #[case("decoy.chr", FieldKind::Integer)]
    fn known_fields(#[case] field: &str, #[case] expected: FieldKind) {
        let schema = FieldSchema::genomecrispr();

        assert_eq!(schema.kind_of(field).unwrap(), expected);
    }

    #[rstest]
    #[case("symbol")]
    #[case("gene.symbol; drop table gene")]
    #[case("GENE.SYMBOL")]
    #[case("")]
    fn unknown_fields(#[case] field: &str) {
        let schema = FieldSchema::genomecrispr();

        assert_eq!(
            schema.kind_of(field),
            Err(Error::UnknownField {
                field: field.to_string()
            })
        );
    }

    #[test]
    fn tables() {
        let schema = FieldSchema::genomecrispr();

        for table in ["gene", "sg", "screen", "phen", "sgscreen", "genescreen", "decoy"] {
            assert!(schema.has_table(table), "{table} should be registered");
        }
        assert!(!schema.has_table("pg_user"));
        assert!(!schema.has_table("gene.symbol"));
    }

    #[test]
    fn alternate_schema() {
        let schema = FieldSchema::from_fields([("t.a", FieldKind::Text)]);

        assert!(schema.has_table("t"));
        assert!(!schema.has_table("gene"));
        assert_eq!(schema.fields().count(), 1);
    }
}
