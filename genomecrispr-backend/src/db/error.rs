use diesel_async::pooled_connection::deadpool;
use serde::Serialize;
use valuable::Valuable;

#[derive(thiserror::Error, Debug, Serialize, Valuable, Clone, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Error {
    #[error("unknown field {field}")]
    UnknownField { field: String },
    #[error("unknown table {table}")]
    UnknownTable { table: String },
    #[error("{field} is not a column of {table}")]
    FieldOutsideTable { field: String, table: String },
    #[error("combinator has no descendants")]
    EmptyCombinator,
    #[error("malformed criteria: {reason}")]
    MalformedCriteria { reason: String },
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("invalid search request: {reason}")]
    Validation { reason: String },
    #[error("no gene matches {query}")]
    NotFound { query: String },
    // The underlying message is logged where the error is converted and never
    // leaves the process.
    #[error("storage failure")]
    Storage {
        #[serde(skip)]
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorClass {
    Client,
    NotFound,
    Server,
}

impl Error {
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        use Error::{
            EmptyCombinator, FieldOutsideTable, InvalidValue, MalformedCriteria, NotFound,
            Storage, UnknownField, UnknownTable, Validation,
        };

        match self {
            UnknownField { .. }
            | UnknownTable { .. }
            | FieldOutsideTable { .. }
            | EmptyCombinator
            | MalformedCriteria { .. }
            | InvalidValue { .. }
            | Validation { .. } => ErrorClass::Client,
            NotFound { .. } => ErrorClass::NotFound,
            Storage { .. } => ErrorClass::Server,
        }
    }

    fn from_storage_error(err: impl std::error::Error) -> Self {
        tracing::error!(error = %err, "storage failure");

        Self::Storage {
            message: format!("{err:?}"),
        }
    }
}

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        Self::from_storage_error(err)
    }
}

impl From<deadpool::PoolError> for Error {
    fn from(err: deadpool::PoolError) -> Self {
        Self::from_storage_error(err)
    }
}

impl From<diesel::ConnectionError> for Error {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::from_storage_error(err)
    }
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        Self::from_storage_error(err)
    }
}

impl From<garde::Report> for Error {
    fn from(report: garde::Report) -> Self {
        Self::Validation {
            reason: report.to_string().trim().to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
