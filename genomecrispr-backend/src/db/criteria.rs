use genomecrispr_core::model::criteria::{Criterion, LeafValue, Operator};

use super::{
    error::{Error, Result},
    field_schema::{FieldKind, FieldSchema},
    statement::{SqlParam, Statement, quote_field},
};

pub type CompiledCriteria = Statement;

/// # Errors
pub fn compile(criterion: &Criterion, schema: &FieldSchema) -> Result<CompiledCriteria> {
    let mut statement = Statement::default();
    write_criterion(criterion, schema, None, &mut statement)?;

    Ok(statement)
}

/// # Errors
pub fn compile_select(
    table: &str,
    criterion: &Criterion,
    schema: &FieldSchema,
) -> Result<CompiledCriteria> {
    if !schema.has_table(table) {
        return Err(Error::UnknownTable {
            table: table.to_string(),
        });
    }

    let mut statement = Statement::new(format!("SELECT * FROM {} WHERE ", quote_field(table)));
    write_criterion(criterion, schema, Some(table), &mut statement)?;

    tracing::debug!(sql = statement.sql(), n_params = statement.params().len(), "compiled criteria");

    Ok(statement)
}

/// # Errors
pub fn gene_search(criterion: &Criterion, schema: &FieldSchema) -> Result<CompiledCriteria> {
    let mut statement = compile_select("gene", criterion, schema)?;
    statement.push_sql(" ORDER BY gene.id ASC");

    Ok(statement)
}

/// # Errors
pub fn parse_criteria(json: &str) -> Result<Criterion> {
    serde_json::from_str(json).map_err(|err| Error::MalformedCriteria {
        reason: err.to_string(),
    })
}

fn write_criterion(
    criterion: &Criterion,
    schema: &FieldSchema,
    table: Option<&str>,
    statement: &mut Statement,
) -> Result<()> {
    match criterion {
        Criterion::Leaf { field, op, val } => {
            let kind = schema.kind_of(field)?;

            if let Some(table) = table {
                let in_table = field.split_once('.').is_some_and(|(t, _)| t == table);
                if !in_table {
                    return Err(Error::FieldOutsideTable {
                        field: field.clone(),
                        table: table.to_string(),
                    });
                }
            }

            let placeholder = statement.push_param(coerce(field, kind, *op, val)?);

            statement.push_sql(&format!("{} {op} {placeholder}", quote_field(field)));
        }
        Criterion::Combinator { op, descendants } => {
            if descendants.is_empty() {
                return Err(Error::EmptyCombinator);
            }

            statement.push_sql("(");
            for (i, descendant) in descendants.iter().enumerate() {
                if i > 0 {
                    statement.push_sql(&format!(" {op} "));
                }
                write_criterion(descendant, schema, table, statement)?;
            }
            statement.push_sql(")");
        }
    }

    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn coerce(field: &str, kind: FieldKind, op: Operator, value: &LeafValue) -> Result<SqlParam> {
    use FieldKind::{ForeignKey, Integer, Real, Text};

    let invalid = |reason: &str| Error::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    if op == Operator::Like && !kind.is_text() {
        return Err(invalid("`like` only applies to text fields"));
    }

    match (kind, value) {
        (Text, value) => Ok(SqlParam::Text(value.to_string())),
        (Integer | ForeignKey, LeafValue::Integer(n)) => Ok(SqlParam::Integer(*n)),
        (Integer | ForeignKey, LeafValue::Text(s)) => s
            .trim()
            .parse()
            .map(SqlParam::Integer)
            .map_err(|_| invalid("expected an integer")),
        (Integer | ForeignKey, LeafValue::Real(_)) => Err(invalid("expected an integer")),
        (Real, LeafValue::Integer(n)) => Ok(SqlParam::Real(*n as f64)),
        (Real, LeafValue::Real(x)) if x.is_finite() => Ok(SqlParam::Real(*x)),
        (Real, LeafValue::Text(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|x| x.is_finite())
            .map(SqlParam::Real)
            .ok_or_else(|| invalid("expected a number")),
        (Real, LeafValue::Real(_)) => Err(invalid("expected a finite number")),
    }
}
