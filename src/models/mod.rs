//! Core data models for the veterinary registry.
//!
//! Rows are mapped by hand (see the `FromRow` impls) so that the column
//! layout of `migrations/0001_init.sql` is the single source of truth and the
//! unsigned identifiers exposed over JSON are range-checked on the way in.

pub mod account;
pub mod veterinary;

use chrono::{DateTime, Utc};
use sqlx::{Row, sqlite::SqliteRow};

/// Read an `INTEGER` column and narrow it into an unsigned identifier.
pub(crate) fn decode_unsigned<T>(row: &SqliteRow, column: &str) -> Result<T, sqlx::Error>
where
    T: TryFrom<i64>,
    T::Error: std::error::Error + Send + Sync + 'static,
{
    let raw: i64 = row.try_get(column)?;
    T::try_from(raw).map_err(|err| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(err),
    })
}

/// Clinic timestamps are stored as microseconds since the Unix epoch.
pub(crate) fn to_micros(at: DateTime<Utc>) -> i64 {
    at.timestamp_micros()
}

/// Read a microsecond `INTEGER` column back into a timestamp.
pub(crate) fn decode_micros(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    let raw: i64 = row.try_get(column)?;
    DateTime::from_timestamp_micros(raw).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: format!("{raw} is not a valid timestamp").into(),
    })
}
