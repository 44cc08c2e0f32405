use std::str::FromStr;

use diesel::{QueryableByName, pg::Pg};
use diesel_async::AsyncPgConnection;
use genomecrispr_core::model::{Pagination, SortOrder};
use itertools::Itertools;

use super::{
    error::{Error, Result},
    field_schema::FieldSchema,
    statement::{Statement, quote_field},
    util::{AsIlike, present_filters},
};

/// # Errors
pub fn checked_offset(pagination: Pagination) -> Result<i64> {
    pagination.offset().ok_or_else(|| Error::Validation {
        reason: format!(
            "page {} of size {} is out of range",
            pagination.page, pagination.limit
        ),
    })
}

/// A collection reached from a set of genes through a fixed join path.
pub trait AssociatedEntity {
    type Row: QueryableByName<Pg> + Send + 'static;
    type Filter;
    type SortColumn: FromStr + Into<&'static str>;

    const TABLE: &'static str;
    const SOURCE: &'static str;
    const GENE_ID_FIELD: &'static str;
    const SELECTION: &'static str;
    const COUNT_SELECTION: &'static str;
    const TIE_BREAKER: &'static str;

    fn filter_values(filter: &Self::Filter) -> Vec<(&'static str, Option<&str>)>;

    /// # Errors
    fn write_source(
        gene_ids: &[i32],
        filter: &Self::Filter,
        schema: &FieldSchema,
        statement: &mut Statement,
    ) -> Result<()> {
        statement.push_sql(&format!(" FROM {} WHERE ", Self::SOURCE));

        if gene_ids.is_empty() {
            statement.push_sql("FALSE");
        } else {
            let placeholders = gene_ids
                .iter()
                .map(|id| statement.push_param(*id))
                .join(", ");
            statement.push_sql(&format!(
                "{} IN ({placeholders})",
                quote_field(Self::GENE_ID_FIELD)
            ));
        }

        for (field, value) in present_filters(Self::filter_values(filter)) {
            let column = quote_field(field);
            let column = if schema.kind_of(field)?.is_text() {
                column
            } else {
                format!("CAST({column} AS TEXT)")
            };

            let placeholder = statement.push_param(value.as_ilike());
            statement.push_sql(&format!(" AND {column} ILIKE {placeholder}"));
        }

        Ok(())
    }

    /// # Errors
    fn count_statement(
        gene_ids: &[i32],
        filter: &Self::Filter,
        schema: &FieldSchema,
    ) -> Result<Statement> {
        let mut statement = Statement::new(format!("SELECT {}", Self::COUNT_SELECTION));
        Self::write_source(gene_ids, filter, schema, &mut statement)?;

        Ok(statement)
    }

    /// # Errors
    fn fetch_statement(
        gene_ids: &[i32],
        filter: &Self::Filter,
        sort_by: &str,
        sort_order: SortOrder,
        pagination: Option<Pagination>,
        schema: &FieldSchema,
    ) -> Result<Statement> {
        let mut statement = Statement::new(format!("SELECT {}", Self::SELECTION));
        Self::write_source(gene_ids, filter, schema, &mut statement)?;

        if let Ok(column) = sort_by.parse::<Self::SortColumn>() {
            let column: &'static str = column.into();
            let field = quote_field(&format!("{}.{column}", Self::TABLE));

            statement.push_sql(&format!(
                " ORDER BY {field} {sort_order}, {}",
                Self::TIE_BREAKER
            ));
        } else {
            tracing::debug!(sort_by, table = Self::TABLE, "falling back to primary key order");
            statement.push_sql(&format!(" ORDER BY {}", Self::TIE_BREAKER));
        }

        if let Some(pagination) = pagination {
            let offset = checked_offset(pagination)?;

            statement
                .push_sql(" LIMIT ")
                .bind(pagination.limit)
                .push_sql(" OFFSET ")
                .bind(offset);
        }

        Ok(statement)
    }

    /// # Errors
    async fn count_matching(
        gene_ids: &[i32],
        filter: &Self::Filter,
        schema: &FieldSchema,
        db_conn: &mut AsyncPgConnection,
    ) -> Result<i64> {
        Self::count_statement(gene_ids, filter, schema)?
            .load_total(db_conn)
            .await
    }

    /// # Errors
    async fn fetch_matching(
        gene_ids: &[i32],
        filter: &Self::Filter,
        sort_by: &str,
        sort_order: SortOrder,
        pagination: Option<Pagination>,
        schema: &FieldSchema,
        db_conn: &mut AsyncPgConnection,
    ) -> Result<Vec<Self::Row>> {
        Self::fetch_statement(gene_ids, filter, sort_by, sort_order, pagination, schema)?
            .load(db_conn)
            .await
    }
}
