use chrono::NaiveDate;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Fund store not found at {0}")]
    MissingStore(String),
    #[error("Unable to open fund store {location}: {source}")]
    Connection {
        location: String,
        #[source]
        source: DbErr,
    },
    #[error("Query failed {0}")]
    Query(#[from] DbErr),
    #[error("Unknown attribute {0:?}")]
    UnknownAttribute(String),
    #[error("Invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Search keyword is empty")]
    EmptyKeyword,
    #[error("Cannot rescale {code}: price on {date} is {price}")]
    InvalidBasePrice {
        code: String,
        date: NaiveDate,
        price: f64,
    },
}

impl DbError {
    /// The store could not be reached at all.
    pub fn is_connection(&self) -> bool {
        matches!(self, DbError::MissingStore(_) | DbError::Connection { .. })
    }

    /// A rescale or change was computed against a zero (or non finite) base.
    pub fn is_division(&self) -> bool {
        matches!(self, DbError::InvalidBasePrice { .. })
    }

    /// The caller handed in something the query layer refuses to run.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            DbError::UnknownAttribute(_) | DbError::InvalidDate(_) | DbError::EmptyKeyword
        )
    }
}
