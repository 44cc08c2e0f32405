use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Criterion {
    Combinator {
        op: Conjunction,
        #[serde(alias = "children")]
        descendants: Vec<Criterion>,
    },
    Leaf {
        field: String,
        op: Operator,
        val: LeafValue,
    },
}

impl Criterion {
    pub fn leaf(field: impl Into<String>, op: Operator, val: impl Into<LeafValue>) -> Self {
        Self::Leaf {
            field: field.into(),
            op,
            val: val.into(),
        }
    }

    #[must_use]
    pub fn and(descendants: Vec<Criterion>) -> Self {
        Self::Combinator {
            op: Conjunction::And,
            descendants,
        }
    }

    #[must_use]
    pub fn or(descendants: Vec<Criterion>) -> Self {
        Self::Combinator {
            op: Conjunction::Or,
            descendants,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Conjunction {
    #[serde(rename = "AND", alias = "and")]
    #[strum(serialize = "AND")]
    And,
    #[serde(rename = "OR", alias = "or")]
    #[strum(serialize = "OR")]
    Or,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Operator {
    #[serde(rename = "=")]
    #[strum(serialize = "=")]
    Eq,
    #[serde(rename = "!=", alias = "<>")]
    #[strum(serialize = "!=")]
    NotEq,
    #[serde(rename = ">")]
    #[strum(serialize = ">")]
    Gt,
    #[serde(rename = "<")]
    #[strum(serialize = "<")]
    Lt,
    #[serde(rename = ">=")]
    #[strum(serialize = ">=")]
    GtEq,
    #[serde(rename = "<=")]
    #[strum(serialize = "<=")]
    LtEq,
    #[serde(rename = "like", alias = "LIKE")]
    #[strum(serialize = "like")]
    Like,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum LeafValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Display for LeafValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(value) => value.fmt(f),
            Self::Real(value) => value.fmt(f),
            Self::Text(value) => value.fmt(f),
        }
    }
}

impl From<i64> for LeafValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LeafValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for LeafValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for LeafValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn leaf_from_reference_shape() {
        let criterion: Criterion =
            serde_json::from_value(json!({"field": "decoy.cellline", "op": "like", "val": "J%"}))
                .unwrap();

        assert_eq!(criterion, Criterion::leaf("decoy.cellline", Operator::Like, "J%"));
    }

    #[test]
    fn nested_combinator() {
        let criterion: Criterion = serde_json::from_value(json!({
            "op": "OR",
            "descendants": [
                {"field": "sg.chr", "op": "=", "val": "chr17"},
                {"op": "and", "children": [
                    {"field": "sg.start", "op": ">=", "val": 100},
                    {"field": "phen.log2fc", "op": "<", "val": -1.5}
                ]}
            ]
        }))
        .unwrap();

        let expected = Criterion::or(vec![
            Criterion::leaf("sg.chr", Operator::Eq, "chr17"),
            Criterion::and(vec![
                Criterion::leaf("sg.start", Operator::GtEq, 100_i64),
                Criterion::leaf("phen.log2fc", Operator::Lt, -1.5),
            ]),
        ]);

        assert_eq!(criterion, expected);
    }

    #[test]
    fn empty_combinator_still_parses() {
        let criterion: Criterion =
            serde_json::from_value(json!({"op": "AND", "descendants": []})).unwrap();

        assert_eq!(criterion, Criterion::and(vec![]));
    }

    #[test]
    fn operators_outside_the_closed_set_are_rejected() {
        let parsed = serde_json::from_value::<Criterion>(
            json!({"field": "gene.symbol", "op": "= 'x' OR 1=1 --", "val": "TP53"}),
        );

        assert!(parsed.is_err());
    }

    #[test]
    fn operators_render_as_sql() {
        let rendered: Vec<String> = [
            Operator::Eq,
            Operator::NotEq,
            Operator::Gt,
            Operator::Lt,
            Operator::GtEq,
            Operator::LtEq,
            Operator::Like,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();

        assert_eq!(rendered, ["=", "!=", ">", "<", ">=", "<=", "like"]);
    }
}
