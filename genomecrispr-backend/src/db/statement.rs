use diesel::{
    QueryableByName,
    pg::Pg,
    query_builder::{BoxedSqlQuery, SqlQuery},
    sql_types::{BigInt, Double, Text},
};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::Serialize;

use super::error::Result;

const RESERVED_WORDS: [&str; 10] = [
    "end", "order", "group", "user", "limit", "offset", "select", "where", "table", "from",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlParam {
    Text(String),
    Integer(i64),
    Real(f64),
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for SqlParam {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for SqlParam {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statement {
    sql: String,
    params: Vec<SqlParam>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    #[must_use]
    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    pub fn push_sql(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    pub fn push_param(&mut self, param: impl Into<SqlParam>) -> String {
        self.params.push(param.into());
        format!("${}", self.params.len())
    }

    pub fn bind(&mut self, param: impl Into<SqlParam>) -> &mut Self {
        let placeholder = self.push_param(param);
        self.push_sql(&placeholder)
    }

    fn into_query(self) -> BoxedSqlQuery<'static, Pg, SqlQuery> {
        let Self { sql, params } = self;

        let query: BoxedSqlQuery<'static, Pg, SqlQuery> = diesel::sql_query(sql).into_boxed();

        params
            .into_iter()
            .fold(query, |query, param| match param {
                SqlParam::Text(value) => query.bind::<Text, _>(value),
                SqlParam::Integer(value) => query.bind::<BigInt, _>(value),
                SqlParam::Real(value) => query.bind::<Double, _>(value),
            })
    }

    /// # Errors
    pub async fn load<Row>(self, db_conn: &mut AsyncPgConnection) -> Result<Vec<Row>>
    where
        Row: QueryableByName<Pg> + Send + 'static,
    {
        tracing::debug!(sql = %self.sql, n_params = self.params.len(), "running statement");

        Ok(self.into_query().load(db_conn).await?)
    }

    /// # Errors
    pub async fn load_total(self, db_conn: &mut AsyncPgConnection) -> Result<i64> {
        #[derive(QueryableByName)]
        struct Total {
            #[diesel(sql_type = BigInt)]
            total: i64,
        }

        let rows: Vec<Total> = self.load(db_conn).await?;

        Ok(rows.as_slice().first().map_or(0, |row| row.total))
    }
}

/// Double-quotes any part of a `table.column` that is a reserved word.
#[must_use]
pub fn quote_field(field: &str) -> String {
    field
        .split('.')
        .map(|part| {
            if RESERVED_WORDS.contains(&part) {
                format!(r#""{part}""#)
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn placeholders_count_up() {
        let mut statement = Statement::new("SELECT * FROM sg WHERE sg.start > ");
        statement.bind(100_i64).push_sql(" AND sg.chr = ");
        statement.bind("chr17".to_string());

        assert_eq!(
            statement.sql(),
            "SELECT * FROM sg WHERE sg.start > $1 AND sg.chr = $2"
        );
        assert_eq!(
            statement.params(),
            [SqlParam::Integer(100), SqlParam::Text("chr17".to_string())]
        );
    }

    #[test]
    fn push_param_leaves_sql_alone() {
        let mut statement = Statement::default();
        let placeholder = statement.push_param(1.5_f64);

        assert_eq!(placeholder, "$1");
        assert_eq!(statement.sql(), "");
    }

    #[rstest]
    #[case("sg.end", r#"sg."end""#)]
    #[case("sg.start", "sg.start")]
    #[case("screen.condition", "screen.condition")]
    #[case("decoy.end", r#"decoy."end""#)]
    fn quoting(#[case] field: &str, #[case] expected: &str) {
        assert_eq!(quote_field(field), expected);
    }
}
