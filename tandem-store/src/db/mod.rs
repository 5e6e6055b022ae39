pub mod connection;

pub use connection::{Database, DbConnection, DbPool};

use chrono::{DateTime, Utc};

/// Parse an RFC3339 timestamp column, reporting a conversion failure at the
/// given column index instead of panicking inside a row-mapping closure.
pub(crate) fn parse_timestamp(idx: usize, value: String) -> rusqlite::Result<DateTime<Utc>> {
    value.parse::<DateTime<Utc>>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
